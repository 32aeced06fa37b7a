//! TSMAT - Terminal Matrix Multiplier Library
//!
//! A terminal application for multiplying two symbolic matrices (up to
//! 5x5) and exporting the computation as MATLAB or LaTeX text, built in
//! Rust.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
