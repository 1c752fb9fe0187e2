//! Live state the form reads and writes
//!
//! `FormState` pairs the document being edited with scratch values that only
//! exist while the form runs. Scratch values reach the document through the
//! post-processor alone.

use crate::config::OrchConfig;
use std::path::PathBuf;

/// Command-line switches plus the answers of the optional-section gates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags {
    pub debug: bool,
    pub package_path: PathBuf,
    pub config_path: PathBuf,
    /// Show every optional section without asking first
    pub expert_mode: bool,

    pub configure_aws_expert: bool,
    pub configure_onprem_expert: bool,
    pub configure_proxy: bool,
    pub configure_cert: bool,
    pub configure_sre: bool,
    pub configure_smtp: bool,
}

/// How the enabled app list is chosen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigMode {
    /// Pick packages; every app of a picked package is enabled
    #[default]
    Simple,
    /// Pick individual apps
    Advanced,
    /// Keep the list already in the document
    Skip,
}

/// Values collected by the form that are not written as-is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scratch {
    /// Comma separated; split into `aws.jump_host_whitelist` afterwards
    pub jump_host_whitelist: String,
    /// Package ids picked in Simple mode
    pub enabled_simple: Vec<String>,
    /// App ids picked in Advanced mode
    pub enabled_advanced: Vec<String>,
    pub config_mode: ConfigMode,
}

/// Everything a form run reads and writes
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub config: OrchConfig,
    pub flags: Flags,
    pub scratch: Scratch,
}

impl FormState {
    #[must_use]
    #[inline]
    pub fn new(config: OrchConfig, flags: Flags) -> Self {
        let scratch = Scratch {
            jump_host_whitelist: config.aws.jump_host_whitelist.join(","),
            ..Scratch::default()
        };
        Self {
            config,
            flags,
            scratch,
        }
    }
}
