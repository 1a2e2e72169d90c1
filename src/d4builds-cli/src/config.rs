//! Configuration management for d4builds CLI

use anyhow::{Context, Result};
use d4builds::ItemNameOverrides;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_PLANNER_API: &str = "https://planners.maxroll.gg/profiles/d4/{planner_id}";
pub const DEFAULT_MAPPING_URL: &str = "https://assets-ng.maxroll.gg/d4-tools/game/data.min.json";
pub const DEFAULT_TIERLIST_URL: &str = "https://maxroll.gg/d4/tierlists/endgame-tier-list";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output_dir: PathBuf,
    pub delay_ms: u64,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub timeout_secs: u64,
    pub planner_api: String,
    pub mapping_url: String,
    pub tierlist_url: String,
    pub default_tier: String,
    pub category: String,
    /// Extra item-name overrides TSV, merged over the built-in table
    pub item_names: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("public/data/builds"),
            delay_ms: 500,
            max_retries: 3,
            retry_delay_ms: 1000,
            timeout_secs: 30,
            planner_api: DEFAULT_PLANNER_API.to_string(),
            mapping_url: DEFAULT_MAPPING_URL.to_string(),
            tierlist_url: DEFAULT_TIERLIST_URL.to_string(),
            default_tier: "A".to_string(),
            category: "endgame".to_string(),
            item_names: None,
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("d4builds");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file, or defaults if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse config file")
    }

    /// Built-in item-name overrides, extended by `item_names` when set
    pub fn item_name_overrides(&self) -> Result<ItemNameOverrides> {
        let mut overrides = ItemNameOverrides::embedded().clone();

        if let Some(path) = &self.item_names {
            let tsv = fs::read_to_string(path)
                .with_context(|| format!("Failed to read item names from {}", path.display()))?;
            let extra = ItemNameOverrides::from_tsv(&tsv);
            tracing::info!("Loaded {} item name overrides from {}", extra.len(), path.display());
            overrides.extend(extra);
        }

        Ok(overrides)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(())
    }
}
