//! Error handling module
//!
//! Defines the error taxonomy of the configuration builder and its exit codes

pub mod types;

pub use types::*;
