//! Schema migration for the configuration document
//!
//! Migration runs on the generic YAML tree, before the document is decoded
//! into `OrchConfig`. Each step turns version `n` into version `n + 1` and
//! knows nothing about later versions; steps are chained until the current
//! version is reached.

use crate::error::ConfigError;
use serde_yaml::{Mapping, Value};
use tracing::info;

/// Version written by this tool
pub const CURRENT_VERSION: u32 = 2;

/// Oldest version that can still be migrated
pub const MIN_VERSION: u32 = 1;

type Step = fn(Mapping) -> Mapping;

/// Migration steps, indexed by the version they upgrade from
const STEPS: [(u32, Step); 1] = [(1, v1_to_v2)];

/// Read the `version` key of a raw document
///
/// # Errors
///
/// Returns an error if:
/// - The document is not a mapping
/// - `version` is missing
/// - `version` is not an integer
#[inline]
pub fn read_version(document: &Value) -> Result<i64, ConfigError> {
    let mapping = match document {
        Value::Mapping(mapping) => mapping,
        Value::Null => return Err(ConfigError::MissingVersion),
        _ => return Err(ConfigError::malformed("top level of config file must be a mapping")),
    };

    let version = mapping.get("version").ok_or(ConfigError::MissingVersion)?;
    version
        .as_i64()
        .ok_or_else(|| ConfigError::malformed("version is not an integer in config file"))
}

/// Bring a raw document up to `CURRENT_VERSION`
///
/// # Errors
///
/// Returns an error if the version is missing, malformed, or outside
/// `MIN_VERSION..=CURRENT_VERSION`
#[inline]
pub fn migrate(document: Value) -> Result<Value, ConfigError> {
    let found = read_version(&document)?;
    let mut version = u32::try_from(found)
        .ok()
        .filter(|v| (MIN_VERSION..=CURRENT_VERSION).contains(v))
        .ok_or(ConfigError::UnsupportedVersion { found })?;

    let Value::Mapping(mut mapping) = document else {
        return Err(ConfigError::malformed("top level of config file must be a mapping"));
    };

    while version < CURRENT_VERSION {
        let step = STEPS
            .iter()
            .find(|(from, _)| *from == version)
            .map(|(_, step)| *step)
            .ok_or(ConfigError::UnsupportedVersion { found })?;
        info!("Migrating config file from version {} to {}", version, version + 1);
        mapping = step(mapping);
        version += 1;
    }

    Ok(Value::Mapping(mapping))
}

/// Version 1 named the deployment `clusterName`/`clusterDomain`, supported
/// Azure, and kept the app list at the top level. Anything without a
/// version 2 counterpart is dropped.
fn v1_to_v2(old: Mapping) -> Mapping {
    let lookup = |section: &str, key: &str| -> Option<Value> {
        old.get(section)
            .and_then(|s| s.get(key))
            .filter(|v| !v.is_null())
            .cloned()
    };

    let mut new = Mapping::new();
    new.insert("version".into(), Value::from(2));

    if let Some(provider) = old.get("provider").and_then(Value::as_str)
        && matches!(provider, "aws" | "onprem")
    {
        new.insert("provider".into(), provider.into());
    }

    let mut global = Mapping::new();
    if let Some(name) = lookup("global", "clusterName") {
        global.insert("orchName".into(), name);
    }
    if let Some(domain) = lookup("global", "clusterDomain") {
        global.insert("parentDomain".into(), domain);
    }
    if !global.is_empty() {
        new.insert("global".into(), Value::Mapping(global));
    }

    if let Some(region) = lookup("aws", "region") {
        let mut aws = Mapping::new();
        aws.insert("region".into(), region);
        new.insert("aws".into(), Value::Mapping(aws));
    }

    if let Some(enabled) = old.get("enabled").filter(|v| v.is_sequence()) {
        let mut orch = Mapping::new();
        orch.insert("enabled".into(), enabled.clone());
        new.insert("orch".into(), Value::Mapping(orch));
    }

    new
}
