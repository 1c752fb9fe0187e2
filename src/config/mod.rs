//! Configuration document
//!
//! The versioned installer configuration written to `configs.yaml`, its YAML
//! loading and saving, and the migration of older document versions.
//!
//! Optional values are plain strings, lists and booleans whose zero value
//! means "absent": they are skipped on output and defaulted on input, so a
//! document survives a write/read cycle unchanged. Keys this version does not
//! know are kept in the `extra` map of the record they appear in.

pub mod migrate;
pub mod validation;
pub mod yaml;

use crate::error::ConfigError;
use crate::system::System;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

pub use migrate::CURRENT_VERSION;

/// Keys of a record that this version of the document does not model
pub type UnknownKeys = BTreeMap<String, Value>;

/// Password assigned to every orchestrator account until first login
pub const DEFAULT_PASSWORD: &str = "ChangeMeOn1stLogin!";

/// Infrastructure the orchestrator is deployed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Aws,
    Onprem,
}

impl fmt::Display for Provider {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Aws => f.write_str("aws"),
            Self::Onprem => f.write_str("onprem"),
        }
    }
}

/// Sizing preset, by number of edge nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Scale {
    Nodes10,
    Nodes100,
    Nodes500,
    Nodes1000,
    Nodes10000,
}

impl Scale {
    /// Every preset, smallest first
    pub const ALL: [Self; 5] = [
        Self::Nodes10,
        Self::Nodes100,
        Self::Nodes500,
        Self::Nodes1000,
        Self::Nodes10000,
    ];

    /// Number of edge nodes the preset targets
    #[must_use]
    #[inline]
    pub const fn edge_nodes(self) -> u32 {
        match self {
            Self::Nodes10 => 10,
            Self::Nodes100 => 100,
            Self::Nodes500 => 500,
            Self::Nodes1000 => 1000,
            Self::Nodes10000 => 10000,
        }
    }

    #[must_use]
    #[inline]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Nodes10 => "1~10 Edge Nodes",
            Self::Nodes100 => "10~100 Edge Nodes",
            Self::Nodes500 => "100~500 Edge Nodes",
            Self::Nodes1000 => "500~1000 Edge Nodes",
            Self::Nodes10000 => "1000~10000 Edge Nodes",
        }
    }
}

impl TryFrom<u32> for Scale {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|scale| scale.edge_nodes() == value)
            .ok_or_else(|| {
                format!("scale must be one of: 10, 100, 500, 1000, 10000 (got {value})")
            })
    }
}

impl From<Scale> for u32 {
    fn from(scale: Scale) -> Self {
        scale.edge_nodes()
    }
}

/// Settings shared by every provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalConfig {
    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub orch_name: String,

    /// Domain the orchestrator lives under, not including `orch_name`
    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub parent_domain: String,

    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub admin_email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<Scale>,

    #[serde(flatten)]
    pub extra: UnknownKeys,
}

/// AWS deployment settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsConfig {
    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub region: String,

    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub customer_tag: String,

    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub cache_registry: String,

    /// CIDRs or hosts allowed to reach the jump host
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub jump_host_whitelist: Vec<String>,

    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub vpc_id: String,

    #[serde(default, rename = "reduceNSTTL", skip_serializing_if = "is_false")]
    pub reduce_ns_ttl: bool,

    #[serde(
        default,
        rename = "eksDnsIP",
        deserialize_with = "scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub eks_dns_ip: String,

    #[serde(flatten)]
    pub extra: UnknownKeys,
}

/// On-premises deployment settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnpremConfig {
    #[serde(
        default,
        rename = "argoIP",
        deserialize_with = "scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub argo_ip: String,

    #[serde(
        default,
        rename = "traefikIP",
        deserialize_with = "scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub traefik_ip: String,

    #[serde(
        default,
        rename = "nginxIP",
        deserialize_with = "scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub nginx_ip: String,

    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub docker_username: String,

    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub docker_token: String,

    #[serde(flatten)]
    pub extra: UnknownKeys,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyConfig {
    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub http_proxy: String,

    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub https_proxy: String,

    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub socks_proxy: String,

    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub no_proxy: String,

    #[serde(flatten)]
    pub extra: UnknownKeys,
}

/// User supplied TLS material, PEM encoded
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertConfig {
    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub tls_cert: String,

    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub tls_key: String,

    #[serde(
        default,
        rename = "tlsCA",
        deserialize_with = "scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub tls_ca: String,

    #[serde(flatten)]
    pub extra: UnknownKeys,
}

/// Site reliability engineering export target
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SreConfig {
    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub username: String,

    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub password: String,

    #[serde(
        default,
        rename = "secretURL",
        deserialize_with = "scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub secret_url: String,

    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub ca_secret: String,

    #[serde(flatten)]
    pub extra: UnknownKeys,
}

/// Email notification relay
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmtpConfig {
    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub username: String,

    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub password: String,

    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub url: String,

    /// Kept as typed; validated as an integer in 1..=65535
    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub port: String,

    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub from: String,

    #[serde(flatten)]
    pub extra: UnknownKeys,
}

/// Orchestrator application selection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrchSettings {
    /// App ids from the package catalog
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enabled: Vec<String>,

    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub default_password: String,

    #[serde(flatten)]
    pub extra: UnknownKeys,
}

/// The installer configuration document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchConfig {
    pub version: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,

    #[serde(default, skip_serializing_if = "is_default")]
    pub global: GlobalConfig,

    /// Only meaningful when `provider` is AWS; may linger from an earlier session
    #[serde(default, skip_serializing_if = "is_default")]
    pub aws: AwsConfig,

    /// Only meaningful when `provider` is on-prem; may linger from an earlier session
    #[serde(default, skip_serializing_if = "is_default")]
    pub onprem: OnpremConfig,

    #[serde(default, skip_serializing_if = "is_default")]
    pub proxy: ProxyConfig,

    #[serde(default, skip_serializing_if = "is_default")]
    pub cert: CertConfig,

    #[serde(default, skip_serializing_if = "is_default")]
    pub sre: SreConfig,

    #[serde(default, skip_serializing_if = "is_default")]
    pub smtp: SmtpConfig,

    #[serde(default, skip_serializing_if = "is_default")]
    pub orch: OrchSettings,

    #[serde(flatten)]
    pub extra: UnknownKeys,
}

impl Default for OrchConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            provider: None,
            global: GlobalConfig::default(),
            aws: AwsConfig::default(),
            onprem: OnpremConfig::default(),
            proxy: ProxyConfig::default(),
            cert: CertConfig::default(),
            sre: SreConfig::default(),
            smtp: SmtpConfig::default(),
            orch: OrchSettings::default(),
            extra: UnknownKeys::new(),
        }
    }
}

impl OrchConfig {
    /// Load the document at `path`, or start a fresh one if it does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, decoded, or migrated
    #[inline]
    pub fn load_from_file(system: &dyn System, path: &Path) -> Result<Self, ConfigError> {
        yaml::load_config(system, path)
    }

    /// Atomically replace the document at `path`
    ///
    /// # Errors
    ///
    /// Returns `WriteFailed` if the document cannot be encoded or written
    #[inline]
    pub fn save_to_file(&self, system: &dyn System, path: &Path) -> Result<(), ConfigError> {
        yaml::save_config(system, path, self)
    }

    /// Run every field validator over the document
    ///
    /// # Errors
    ///
    /// Returns the first field that fails validation
    #[inline]
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate_config(self)
    }
}

/// Read any plain scalar into a string field
///
/// Hand-edited documents carry `port: 587` or `orchName: 123` unquoted.
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error as _;

    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!(
            "expected a scalar value, got {other:?}"
        ))),
    }
}

fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

fn is_false(value: &bool) -> bool {
    !*value
}
