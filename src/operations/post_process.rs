//! Post-processing of a completed form
//!
//! Moves scratch answers into the document and fills defaults. Validators are
//! not re-run here. Applying the step twice yields the same document.

use crate::catalog::Catalog;
use crate::config::DEFAULT_PASSWORD;
use crate::form::{ConfigMode, FormState};
use tracing::{debug, warn};

/// Apply the scratch answers of a completed form to its document
///
/// - Simple mode: `orch.enabled` becomes every app of the picked packages
/// - Advanced mode: `orch.enabled` becomes the picked apps
/// - Skip mode: ids that no longer exist in the catalog are dropped
/// - A non-empty jump host whitelist is split on `,` and trimmed
/// - An empty default password gets the well-known initial one
///
/// The block of the provider that was not selected is left alone.
#[inline]
pub fn post_process(state: &mut FormState, catalog: &Catalog) {
    let enabled = match state.scratch.config_mode {
        ConfigMode::Simple => catalog.expand(&state.scratch.enabled_simple),
        ConfigMode::Advanced => state.scratch.enabled_advanced.clone(),
        ConfigMode::Skip => {
            let (known, unknown): (Vec<String>, Vec<String>) = state
                .config
                .orch
                .enabled
                .iter()
                .cloned()
                .partition(|id| catalog.contains_app(id));
            if !unknown.is_empty() {
                warn!(
                    "Dropping apps no longer in the package catalog: {}",
                    unknown.join(", ")
                );
            }
            known
        }
    };
    debug!(
        "Enabled {} apps ({:?} mode)",
        enabled.len(),
        state.scratch.config_mode
    );
    state.config.orch.enabled = enabled;

    if !state.scratch.jump_host_whitelist.is_empty() {
        state.config.aws.jump_host_whitelist = split_list(&state.scratch.jump_host_whitelist);
    }

    if state.config.orch.default_password.is_empty() {
        DEFAULT_PASSWORD.clone_into(&mut state.config.orch.default_password);
    }
}

/// Split a comma separated list, trimming entries and dropping empty ones
fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list(" 10.0.0.0/8 , 192.168.0.0/16 "),
            vec!["10.0.0.0/8", "192.168.0.0/16"]
        );
        assert_eq!(split_list("a,,b, "), vec!["a", "b"]);
        assert!(split_list(" , ").is_empty());
    }
}
