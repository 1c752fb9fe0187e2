//! Build operation coordination

use crate::catalog::Catalog;
use crate::cli::Args;
use crate::config::OrchConfig;
use crate::config::yaml::to_yaml;
use crate::form::{FormRuntime, FormState, installer_form, run_form};
use crate::operations::post_process::post_process;
use crate::system::System;
use anyhow::{Result, anyhow};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Coordinates one interactive configuration session
///
/// Everything that can fail before the form starts (document load and
/// migration, catalog load) happens in [`BuildOperation::new`], so a broken
/// input never reaches the user as a half-shown form.
#[non_exhaustive]
pub struct BuildOperation<'src> {
    state: FormState,
    catalog: Catalog,
    config_path: PathBuf,
    system: &'src dyn System,
}

impl<'src> BuildOperation<'src> {
    /// Load the document and the package catalog
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The document cannot be read, parsed, or migrated
    /// - The catalog cannot be read or parsed
    #[inline]
    pub fn new(args: &Args, system: &'src dyn System) -> Result<Self> {
        let config = OrchConfig::load_from_file(system, &args.config)?;
        if config != OrchConfig::default()
            && let Err(err) = config.validate()
        {
            warn!("Existing configuration needs attention: {err}");
        }

        let catalog = Catalog::load_from_file(system, &args.package)?;
        if catalog.is_empty() {
            warn!("Package catalog {} is empty", args.package.display());
        }

        Ok(BuildOperation {
            state: FormState::new(config, args.flags()),
            catalog,
            config_path: args.config.clone(),
            system,
        })
    }

    /// Run the form, post-process the answers and write the document
    ///
    /// Nothing is written unless the form completes. With `--debug` the
    /// written document is echoed to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The user cancels the form or the terminal fails
    /// - The document cannot be written
    /// - The debug echo cannot be written to `out`
    #[inline]
    pub fn execute(
        mut self,
        runtime: &mut dyn FormRuntime,
        out: &mut dyn Write,
    ) -> Result<OrchConfig> {
        debug!("Starting configuration form");
        run_form(&installer_form(), &mut self.state, &self.catalog, runtime)?;

        post_process(&mut self.state, &self.catalog);

        let config = self.state.config;
        config.save_to_file(self.system, &self.config_path)?;

        if self.state.flags.debug {
            let yaml = to_yaml(&config)
                .map_err(|err| anyhow!("failed to render configuration: {err}"))?;
            out.write_all(yaml.as_bytes())
                .and_then(|()| out.flush())
                .map_err(|err| anyhow!("failed to print configuration: {err}"))?;
        }

        info!("Configuration complete");
        Ok(config)
    }
}
