use crate::form::Flags;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for orch-config
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "orch-config")]
#[command(about = "An interactive tool to build EMF config")]
#[command(long_about = None)]
#[command(version)]
pub struct Args {
    /// Path to the configuration document
    #[arg(short, long, value_name = "PATH", default_value = "configs.yaml")]
    pub config: PathBuf,

    /// Path to the package catalog
    #[arg(short, long, value_name = "PATH", default_value = "packages.yaml")]
    pub package: PathBuf,

    /// Show every optional section without asking first
    #[arg(short, long)]
    pub expert: bool,

    /// Enable debug logging and print the final document to stdout
    #[arg(short, long)]
    pub debug: bool,
}

impl Args {
    /// Initial form flags for this invocation
    #[must_use]
    #[inline]
    pub fn flags(&self) -> Flags {
        Flags {
            debug: self.debug,
            package_path: self.package.clone(),
            config_path: self.config.clone(),
            expert_mode: self.expert,
            ..Flags::default()
        }
    }
}
