//! Utility functions

pub mod panic;

pub use panic::panics_to_errors;
