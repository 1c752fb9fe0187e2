//! Orchestrator package catalog
//!
//! The catalog (`packages.yaml`) lists the packages offered in Simple mode and
//! the apps each package enables. It is read once per run and never written.

use crate::error::ConfigError;
use crate::system::System;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::debug;

/// The finest-grained unit that can be enabled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A user-facing bundle of apps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub apps: BTreeMap<String, App>,
}

/// Mapping of package id to package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    packages: BTreeMap<String, Package>,
}

impl Catalog {
    /// Load the catalog from file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read (`CatalogUnreadable`)
    /// - The content is not a package definition (`CatalogMalformed`)
    #[inline]
    pub fn load_from_file(system: &dyn System, path: &Path) -> Result<Self, ConfigError> {
        let content =
            system
                .read_to_string(path)
                .map_err(|cause| ConfigError::CatalogUnreadable {
                    path: path.to_path_buf(),
                    cause,
                })?;

        let catalog = Self::load_from_string(&content)?;
        debug!(
            "Loaded {} packages with {} apps from {}",
            catalog.packages.len(),
            catalog.app_ids().len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Load the catalog from YAML content
    ///
    /// # Errors
    ///
    /// Returns `CatalogMalformed` if the content does not decode
    #[inline]
    pub fn load_from_string(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|cause| ConfigError::CatalogMalformed { cause })
    }

    #[must_use]
    #[inline]
    pub fn package(&self, id: &str) -> Option<&Package> {
        self.packages.get(id)
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Packages ordered by display name, for stable option lists
    #[must_use]
    #[inline]
    pub fn packages_by_name(&self) -> Vec<(&str, &Package)> {
        let mut packages: Vec<(&str, &Package)> = self
            .packages
            .iter()
            .map(|(id, package)| (id.as_str(), package))
            .collect();
        packages.sort_by(|a, b| a.1.name.cmp(&b.1.name).then_with(|| a.0.cmp(b.0)));
        packages
    }

    /// Apps of every package ordered by display name
    ///
    /// An app listed by more than one package appears once.
    #[must_use]
    #[inline]
    pub fn apps_by_name(&self) -> Vec<(&str, &App)> {
        let mut apps: BTreeMap<&str, &App> = BTreeMap::new();
        for package in self.packages.values() {
            for (id, app) in &package.apps {
                apps.entry(id.as_str()).or_insert(app);
            }
        }
        let mut apps: Vec<(&str, &App)> = apps.into_iter().collect();
        apps.sort_by(|a, b| a.1.name.cmp(&b.1.name).then_with(|| a.0.cmp(b.0)));
        apps
    }

    /// Every app id in the catalog
    #[must_use]
    #[inline]
    pub fn app_ids(&self) -> BTreeSet<&str> {
        self.packages
            .values()
            .flat_map(|package| package.apps.keys().map(String::as_str))
            .collect()
    }

    #[must_use]
    #[inline]
    pub fn contains_app(&self, id: &str) -> bool {
        self.packages
            .values()
            .any(|package| package.apps.contains_key(id))
    }

    /// Union of the apps of the given packages, without duplicates
    ///
    /// Unknown package ids contribute nothing.
    #[must_use]
    #[inline]
    pub fn expand<S: AsRef<str>>(&self, package_ids: &[S]) -> Vec<String> {
        let apps: BTreeSet<&str> = package_ids
            .iter()
            .filter_map(|id| self.packages.get(id.as_ref()))
            .flat_map(|package| package.apps.keys().map(String::as_str))
            .collect();
        apps.into_iter().map(str::to_owned).collect()
    }
}
