//! Sync command handler
//!
//! One full run: mapping table once, then every requested class in turn.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use d4builds::{fetch_mapping, Fetch, Layout, Resolver, SyncOptions, Syncer};

use crate::config::Config;
use crate::guides::{TierList, CLASSES};
use crate::net::HttpFetcher;
use crate::store::JsonStore;

/// Handle the sync command
pub fn handle(
    classes: Vec<String>,
    output: Option<PathBuf>,
    flat: bool,
    no_tierlist: bool,
) -> Result<()> {
    let config = Config::load()?;
    let classes = select_classes(&classes)?;
    let output = output.unwrap_or_else(|| config.output_dir.clone());
    let overrides = config.item_name_overrides()?;

    let fetcher = HttpFetcher::from_config(&config);
    let mapping = fetch_mapping(&fetcher, &config.mapping_url)
        .with_context(|| format!("Failed to load mapping data from {}", config.mapping_url))?;

    let tiers = if no_tierlist {
        TierList::default()
    } else {
        load_tier_list(&fetcher, &config.tierlist_url)
    };

    let layout = if flat {
        Layout::Flat {
            profile_index: None,
        }
    } else {
        Layout::Profiles
    };
    let delay = Duration::from_millis(config.delay_ms);
    let options = SyncOptions {
        planner_api: config.planner_api.clone(),
        category: config.category.clone(),
        layout,
        delay,
    };

    let syncer = Syncer::new(&fetcher, Resolver::new(&mapping, &overrides), options);
    let mut store = JsonStore::new(&output);
    let mut synced = 0;
    let mut failed = 0;

    for (i, class_name) in classes.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            std::thread::sleep(delay);
        }

        let guides = tiers.guides_for(class_name, &config.default_tier);
        tracing::info!("{}: {} guides", class_name, guides.len());

        let report = syncer.sync_class(class_name, &guides, &mut store);
        println!(
            "{:<12} {:>3} synced, {:>3} failed",
            class_name,
            report.builds.len(),
            report.failures.len()
        );
        for (url, err) in &report.failures {
            println!("  {}: {}", url, err);
        }

        synced += report.builds.len();
        failed += report.failures.len();
    }

    println!();
    println!("Builds synced: {}", synced);
    println!("Builds failed: {}", failed);
    println!("Output: {}", output.display());

    Ok(())
}

/// Requested classes, lowercased and checked; all known classes when empty
fn select_classes(requested: &[String]) -> Result<Vec<String>> {
    if requested.is_empty() {
        return Ok(CLASSES.iter().map(|c| c.to_string()).collect());
    }

    let mut selected = Vec::new();
    for class in requested {
        let class = class.trim().to_lowercase();
        if !CLASSES.contains(&class.as_str()) {
            bail!("Unknown class '{}' (expected one of: {})", class, CLASSES.join(", "));
        }
        if !selected.contains(&class) {
            selected.push(class);
        }
    }
    Ok(selected)
}

/// The tier list is optional: failures fall back to the built-in table
fn load_tier_list<F: Fetch + ?Sized>(fetcher: &F, url: &str) -> TierList {
    match fetcher.fetch_text(url) {
        Ok(html) => {
            let tiers = TierList::parse(&html, url);
            if tiers.is_empty() {
                tracing::warn!("Tier list had no guide entries, using built-in guides");
            } else {
                tracing::info!("Tier list: {} guides", tiers.len());
            }
            tiers
        }
        Err(e) => {
            tracing::warn!("Could not load tier list, using built-in guides: {}", e);
            TierList::default()
        }
    }
}
