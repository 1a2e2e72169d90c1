//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up d4builds defaults.

use std::path::PathBuf;

use crate::config::Config;
use anyhow::Result;

/// Values `configure` can persist
#[derive(Debug, Default)]
pub struct ConfigUpdate {
    pub output_dir: Option<PathBuf>,
    pub delay_ms: Option<u64>,
    pub tierlist_url: Option<String>,
    pub item_names: Option<PathBuf>,
}

impl ConfigUpdate {
    fn is_empty(&self) -> bool {
        self.output_dir.is_none()
            && self.delay_ms.is_none()
            && self.tierlist_url.is_none()
            && self.item_names.is_none()
    }

    /// Apply to `config`, returning the names of the keys that changed
    fn apply(self, config: &mut Config) -> Vec<&'static str> {
        let mut changed = Vec::new();
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
            changed.push("output_dir");
        }
        if let Some(ms) = self.delay_ms {
            config.delay_ms = ms;
            changed.push("delay_ms");
        }
        if let Some(url) = self.tierlist_url {
            config.tierlist_url = url;
            changed.push("tierlist_url");
        }
        if let Some(path) = self.item_names {
            config.item_names = Some(path);
            changed.push("item_names");
        }
        changed
    }
}

/// Handle the configure command
pub fn handle(show: bool, update: ConfigUpdate) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if update.is_empty() {
        show_usage();
        return Ok(());
    }

    for key in update.apply(&mut config) {
        println!("Updated {}", key);
    }
    config.save()?;

    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

/// Display current configuration
fn show_config(config: &Config) {
    println!("Output directory: {}", config.output_dir.display());
    println!("Delay:            {} ms", config.delay_ms);
    println!(
        "Retries:          {} (backoff {} ms)",
        config.max_retries, config.retry_delay_ms
    );
    println!("Timeout:          {} s", config.timeout_secs);
    println!("Planner API:      {}", config.planner_api);
    println!("Mapping data:     {}", config.mapping_url);
    println!("Tier list:        {}", config.tierlist_url);
    println!("Default tier:     {}", config.default_tier);
    println!("Category:         {}", config.category);
    match &config.item_names {
        Some(path) => println!("Item names:       {}", path.display()),
        None => println!("Item names:       (built-in)"),
    }

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: d4builds configure --output-dir DIR");
    println!("   or: d4builds configure --delay-ms MS");
    println!("   or: d4builds configure --tierlist-url URL");
    println!("   or: d4builds configure --item-names FILE.tsv");
    println!("   or: d4builds configure --show");
}
