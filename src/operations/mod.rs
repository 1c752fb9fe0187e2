//! Operations module
//!
//! Coordinates a configuration session: form, post-processing, and write

pub mod build;
pub mod post_process;

pub use build::*;
pub use post_process::*;
