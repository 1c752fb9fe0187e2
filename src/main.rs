//! # `orch-config`
//!
//! `orch-config` interactively builds the configuration document consumed by
//! the EMF installer.
//!
//! ## Usage
//!
//! ```sh
//! orch-config --config configs.yaml --package packages.yaml
//! ```
//!
//! Pass `--expert` to show every optional section without a confirmation
//! step, and `--debug` to print the final document to stdout.
//!
//! ## Exit codes
//! - `0`: the document was written
//! - `1`: `--help` was requested
//! - `2`: usage error, or the package catalog cannot be loaded
//! - `3`: the existing document cannot be loaded or migrated
//! - `4`: the form was cancelled
//! - `5`: the document cannot be written

use clap::Parser as _;
use clap::error::ErrorKind;
use orch_config::cli::Args;
use orch_config::error::ConfigError;
use orch_config::form::TerminalRuntime;
use orch_config::system::real::RealSystem;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if err.kind() == ErrorKind::DisplayHelp => {
            let _ = err.print();
            std::process::exit(1);
        }
        Err(err) => err.exit(),
    };

    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    // stdout is reserved for the --debug document dump
    fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let system = RealSystem::new();
    let mut runtime = TerminalRuntime::new();

    match orch_config::run(&args, &system, &mut runtime) {
        Ok(_) => std::process::exit(0),
        Err(err) => {
            error!("{}", err);
            std::process::exit(
                err.downcast_ref::<ConfigError>()
                    .map_or(1, ConfigError::exit_code),
            );
        }
    }
}
