//! System abstraction for filesystem operations
//!
//! The configuration document and the package catalog are the only files the
//! builder touches. Going through this trait keeps the load/write paths
//! testable with an in-memory implementation.

use std::io;
use std::path::Path;

pub mod mock;
pub mod real;

pub use mock::MockSystem;
pub use real::RealSystem;

/// Unified trait for filesystem operations
///
/// # Implementations
/// - `RealSystem`: Production implementation using `std::fs` and `tempfile`
/// - `MockSystem`: Test implementation using in-memory storage
pub trait System: Send + Sync {
    /// Read entire file contents as a string
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Replace the file at `path` with `contents` in a single step
    ///
    /// Either the whole new content becomes visible at `path` or the previous
    /// file is left untouched.
    fn write_atomic(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}
