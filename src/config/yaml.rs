//! YAML loading and saving of the configuration document

use crate::config::OrchConfig;
use crate::config::migrate;
use crate::error::ConfigError;
use crate::system::System;
use serde_yaml::Value;
use std::io;
use std::path::Path;
use tracing::{debug, info};

/// Load the configuration document at `path`
///
/// A missing file is not an error: the caller gets an empty document of the
/// current version.
///
/// # Errors
///
/// Returns an error if:
/// - The file exists but cannot be read
/// - The content is not valid YAML or does not decode into the document
/// - The version is missing or cannot be migrated
#[inline]
pub fn load_config(system: &dyn System, path: &Path) -> Result<OrchConfig, ConfigError> {
    let content = match system.read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            info!("Config file does not exist. Starting fresh...");
            return Ok(OrchConfig::default());
        }
        Err(cause) => {
            return Err(ConfigError::DocumentUnreadable {
                path: path.to_path_buf(),
                cause,
            });
        }
    };

    let config = parse_config(&content)?;
    debug!("Loaded config file {}", path.display());
    Ok(config)
}

/// Decode a configuration document, migrating it to the current version
///
/// # Errors
///
/// Returns an error if the content is not valid YAML, has no usable
/// version, or does not match the document layout
#[inline]
pub fn parse_config(content: &str) -> Result<OrchConfig, ConfigError> {
    // The version decides how to read the rest, so start from the generic tree
    let raw: Value = serde_yaml::from_str(content).map_err(|e| {
        if let Some(location) = e.location() {
            ConfigError::malformed(format!(
                "line {}, column {}: {e}",
                location.line(),
                location.column()
            ))
        } else {
            ConfigError::malformed(e.to_string())
        }
    })?;

    let migrated = migrate::migrate(raw)?;
    serde_yaml::from_value(migrated).map_err(|e| ConfigError::malformed(e.to_string()))
}

/// Encode the document as YAML
///
/// # Errors
///
/// Returns an error if the document cannot be serialized
#[inline]
pub fn to_yaml(config: &OrchConfig) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(config)
}

/// Atomically replace the document at `path`
///
/// # Errors
///
/// Returns `WriteFailed` if the document cannot be encoded or written; the
/// previous file is left untouched in both cases
#[inline]
pub fn save_config(
    system: &dyn System,
    path: &Path,
    config: &OrchConfig,
) -> Result<(), ConfigError> {
    let write_failed = |cause: io::Error| ConfigError::WriteFailed {
        path: path.to_path_buf(),
        cause,
    };

    let content = to_yaml(config).map_err(|e| write_failed(io::Error::other(e)))?;
    system
        .write_atomic(path, content.as_bytes())
        .map_err(write_failed)?;

    info!("Config file written to {}", path.display());
    Ok(())
}
