pub mod algebra;
pub mod errors;
pub mod models;
pub mod parser;
pub mod services;

pub use algebra::*;
pub use errors::*;
pub use models::*;
pub use services::*;
