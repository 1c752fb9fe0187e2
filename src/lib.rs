//! `orch-config` - An interactive builder for the EMF installer configuration
//!
//! This library loads an existing configuration document (migrating older
//! schema versions), walks the user through a form of validated fields,
//! derives the enabled application set from the package catalog, and writes
//! the document back atomically.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod operations;
pub mod system;

use anyhow::Result;
use cli::Args;
use config::OrchConfig;
use form::FormRuntime;
use operations::build::BuildOperation;
use std::io;
use system::System;

/// Main entry point for the orch-config library
///
/// The `--debug` dump goes to stdout; logging stays on stderr.
///
/// # Errors
///
/// Returns an error if loading, the form, or writing fails; the error wraps
/// an [`error::ConfigError`] carrying the process exit code
#[inline]
pub fn run(args: &Args, system: &dyn System, runtime: &mut dyn FormRuntime) -> Result<OrchConfig> {
    run_with_output(args, system, runtime, &mut io::stdout())
}

/// Same as [`run`], echoing the `--debug` dump to `out`
///
/// # Errors
///
/// Returns an error if loading, the form, writing, or the echo fails
#[inline]
pub fn run_with_output(
    args: &Args,
    system: &dyn System,
    runtime: &mut dyn FormRuntime,
    out: &mut dyn io::Write,
) -> Result<OrchConfig> {
    let operation = BuildOperation::new(args, system)?;
    operation.execute(runtime, out)
}
