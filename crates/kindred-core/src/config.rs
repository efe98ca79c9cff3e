//! Engine configuration loaded from TOML and environment.
//!
//! | Source | Example |
//! |--------|---------|
//! | Defaults | built-in keyword lists, steps and baseline |
//! | File (`KINDRED_CONFIG`, default `config/kindred`) | `rng_seed = 42` |
//! | Env (`KINDRED__` prefix, `__` separator) | `KINDRED__SNAPSHOT_PATH=./data/profiles.json` |

use crate::adaptation::AdaptationRules;
use crate::error::Result;
use crate::taxonomy::PersonalityTrait;
use crate::templates::TemplateCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_PATH: &str = "config/kindred";

/// Settings for a [`PersonalityEngine`](crate::PersonalityEngine).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seed for template selection. Unset = OS entropy.
    #[serde(default)]
    pub rng_seed: Option<u64>,
    /// JSON snapshot restored on start and written by `save_snapshot`. Unset = memory only.
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
    /// Baseline weights overriding the built-in seed for new profiles.
    #[serde(default)]
    pub baseline: BTreeMap<PersonalityTrait, f64>,
    #[serde(default)]
    pub adaptation: AdaptationRules,
    /// Per-category replacements for the reference template lists.
    #[serde(default)]
    pub templates: BTreeMap<TemplateCategory, Vec<String>>,
}

impl EngineConfig {
    /// Load from file and environment. Precedence: env > file (`KINDRED_CONFIG` or `config/kindred`) > defaults.
    pub fn load() -> Result<Self> {
        let config_path =
            std::env::var("KINDRED_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let builder = config::Config::builder()
            .add_source(config::File::with_name(&config_path).required(false))
            .add_source(config::Environment::with_prefix("KINDRED").separator("__"));

        let built = builder.build()?;
        let cfg: EngineConfig = built.try_deserialize()?;
        tracing::debug!(target: "kindred::config", path = %config_path, "Engine configuration loaded");
        Ok(cfg)
    }

    /// Parse an inline TOML document; absent keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let built = config::Config::builder()
            .add_source(config::File::from_str(content, config::FileFormat::Toml))
            .build()?;
        Ok(built.try_deserialize()?)
    }

    /// Write this configuration as TOML, creating parent directories as needed.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, content)?;
        Ok(())
    }
}
