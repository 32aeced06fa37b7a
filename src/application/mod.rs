//! Application layer managing state and command dispatch.
//!
//! This module coordinates between the domain layer and presentation
//! layer: it owns the three grids, the export buffers, and the
//! diagnostic, and exposes one named operation per user action.

pub mod state;

pub use state::*;
