//! Offline transform of a saved planner response

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use d4builds::{
    transform_build, BuildContext, BuildRecord, ItemNameOverrides, Layout, MappingTable,
    PlannerPayload, Resolver,
};

use crate::config::Config;

/// Handle the transform command
pub fn handle(
    planner: &Path,
    mapping: &Path,
    url: &str,
    tier: &str,
    flat: bool,
    profile: Option<String>,
) -> Result<()> {
    let config = Config::load()?;
    let layout = if flat {
        Layout::Flat {
            profile_index: profile,
        }
    } else {
        Layout::Profiles
    };

    let overrides = config.item_name_overrides()?;
    let context = BuildContext::new(url, tier, &config.category);

    let build = transform_files(planner, mapping, &context, &layout, &overrides)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&build).context("Failed to serialize build")?
    );

    Ok(())
}

fn transform_files(
    planner: &Path,
    mapping: &Path,
    context: &BuildContext,
    layout: &Layout,
    overrides: &ItemNameOverrides,
) -> Result<BuildRecord> {
    let planner_text = fs::read_to_string(planner)
        .with_context(|| format!("Failed to read planner data from {}", planner.display()))?;
    let mapping_text = fs::read_to_string(mapping)
        .with_context(|| format!("Failed to read mapping data from {}", mapping.display()))?;

    let payload = PlannerPayload::from_json(&planner_text)
        .with_context(|| format!("Invalid planner response in {}", planner.display()))?;
    let mapping = MappingTable::from_json(&mapping_text)
        .with_context(|| format!("Invalid mapping data in {}", mapping.display()))?;

    let resolver = Resolver::new(&mapping, overrides);

    Ok(transform_build(&payload, context, layout, &resolver))
}

#[cfg(test)]
mod tests {
    use super::*;
    use d4builds::BuildGear;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_inputs(dir: &TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
        let data = json!({
            "items": { "1": { "id": "Ring_Rare", "explicits": [{ "nid": 7 }] } },
            "profiles": [
                { "name": "Starter", "items": { "16": 1 } },
                { "name": "Mythic", "items": { "17": 1 } }
            ],
            "activeProfile": 1
        });
        let planner = dir.path().join("planner.json");
        fs::write(
            &planner,
            json!({ "class": "Rogue", "data": data.to_string() }).to_string(),
        )
        .unwrap();

        let mapping = dir.path().join("mapping.json");
        fs::write(
            &mapping,
            json!({ "affixes": { "Lucky": { "id": 7, "prefix": "Lucky Hit Chance" } } }).to_string(),
        )
        .unwrap();

        (planner, mapping)
    }

    fn context(url: &str, tier: &str) -> BuildContext {
        BuildContext::new(url, tier, "endgame")
    }

    #[test]
    fn test_transform_files_profiles() {
        let dir = TempDir::new().unwrap();
        let (planner, mapping) = write_inputs(&dir);
        let context = context("https://maxroll.gg/d4/build-guides/barrage-rogue-guide", "S");

        let build = transform_files(
            &planner,
            &mapping,
            &context,
            &Layout::Profiles,
            ItemNameOverrides::embedded(),
        )
        .unwrap();
        assert_eq!(build.id, "barrage-rogue");
        assert_eq!(build.class_name, "rogue");
        match build.gear {
            BuildGear::Profiles { profile_order, .. } => {
                assert_eq!(profile_order, vec!["starter", "mythic"]);
            }
            BuildGear::Flat { .. } => panic!("expected profiles"),
        }
    }

    #[test]
    fn test_transform_files_flat() {
        let dir = TempDir::new().unwrap();
        let (planner, mapping) = write_inputs(&dir);
        let layout = Layout::Flat {
            profile_index: None,
        };

        let build = transform_files(
            &planner,
            &mapping,
            &context("https://x/y-guide", "A"),
            &layout,
            ItemNameOverrides::embedded(),
        )
        .unwrap();
        assert!(matches!(build.gear, BuildGear::Flat { .. }));
    }

    #[test]
    fn test_configured_item_names_apply() {
        let dir = TempDir::new().unwrap();
        let (_, mapping) = write_inputs(&dir);
        let data = json!({
            "items": { "1": { "id": "Ring_Unique_Custom_007" } },
            "profiles": [{ "name": "Mythic", "items": { "16": 1 } }]
        });
        let planner = dir.path().join("unique.json");
        fs::write(
            &planner,
            json!({ "class": "Rogue", "data": data.to_string() }).to_string(),
        )
        .unwrap();

        let names = dir.path().join("names.tsv");
        fs::write(&names, "internal_id\tname\nring_unique_custom_007\tBand of Testing\n").unwrap();
        let config = Config {
            item_names: Some(names),
            ..Default::default()
        };

        let layout = Layout::Flat {
            profile_index: None,
        };
        let build = transform_files(
            &planner,
            &mapping,
            &context("https://x/y-guide", "A"),
            &layout,
            &config.item_name_overrides().unwrap(),
        )
        .unwrap();
        let BuildGear::Flat { gear } = build.gear else {
            panic!("expected flat gear");
        };
        assert_eq!(
            gear[&d4builds::Slot::Ring].priority_uniques,
            vec!["Band of Testing"]
        );
    }

    #[test]
    fn test_missing_planner_file() {
        let dir = TempDir::new().unwrap();
        let (_, mapping) = write_inputs(&dir);
        let err = transform_files(
            &dir.path().join("nope.json"),
            &mapping,
            &context("https://x/y-guide", "A"),
            &Layout::Profiles,
            ItemNameOverrides::embedded(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to read planner data"));
    }
}
