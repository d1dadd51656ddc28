//! Layered configuration for a selection run.
//!
//! Sources, lowest priority first: built-in defaults, `featsel.toml` in the
//! working directory, an explicit config file, `FEATSEL_*` environment
//! variables. Command-line flags are applied on top by the binary.

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::data::{LoadOptions, Normalization};
use crate::error::Result;
use crate::selection::Algorithm;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "featsel.toml";

/// Prefix for environment overrides, e.g. `FEATSEL_PARALLEL=true`.
pub const ENV_PREFIX: &str = "FEATSEL_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Search direction; prompted for when unset.
    pub algorithm: Option<Algorithm>,
    pub normalization: Normalization,
    pub skip_leading_features: usize,
    /// Evaluate candidates and held-out instances on the rayon pool.
    pub parallel: bool,
    /// Memoize subset accuracies.
    pub cache: bool,
    /// Instances in the generated dataset when no file is given.
    pub synthetic_instances: usize,
    pub seed: u64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            algorithm: None,
            normalization: Normalization::ZScore,
            skip_leading_features: 0,
            parallel: false,
            cache: false,
            synthetic_instances: 100,
            seed: 42,
        }
    }
}

impl SelectionConfig {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            normalization: self.normalization,
            skip_leading_features: self.skip_leading_features,
        }
    }
}

/// Builds the figment for the given working directory and optional explicit
/// config file, without extracting it.
pub fn figment(workspace: Option<&Path>, config_file: Option<&Path>) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(SelectionConfig::default()));

    if let Some(ws) = workspace {
        let ws_config = ws.join(DEFAULT_CONFIG_FILE);
        if ws_config.exists() {
            figment = figment.merge(Toml::file(ws_config));
        }
    }

    if let Some(path) = config_file {
        figment = figment.merge(Toml::file(path));
    }

    figment.merge(Env::prefixed(ENV_PREFIX))
}

/// Loads the layered configuration.
pub fn load_config(workspace: Option<&Path>, config_file: Option<&Path>) -> Result<SelectionConfig> {
    let config: SelectionConfig = figment(workspace, config_file).extract()?;
    tracing::debug!(?config, "Loaded configuration");
    Ok(config)
}
