//! Build assembly
//!
//! Turns one planner payload into a [`BuildRecord`]. Multi-profile output is
//! the general case; the flat `gear` shape is the same extraction run over a
//! single selected profile.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::gear::{extract_gear, GearMap};
use crate::normalize::{build_identity, canonical_profile, progression_rank};
use crate::planner::PlannerPayload;
use crate::resolve::Resolver;

/// Gear for one canonical profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileGear {
    pub name: String,
    pub gear: GearMap,
}

/// Which gear layout a build record carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BuildGear {
    Profiles {
        profile_order: Vec<String>,
        profiles: IndexMap<String, ProfileGear>,
    },
    Flat {
        gear: GearMap,
    },
}

/// Output layout requested by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Layout {
    /// Every distinct progression profile
    #[default]
    Profiles,
    /// One profile; an optional numeric index from the guide page picks it
    Flat { profile_index: Option<String> },
}

/// Labels attached to a build that do not come from the planner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    pub source_url: String,
    pub tier: String,
    pub category: String,
    /// `YYYY-MM-DD`
    pub last_updated: String,
}

impl BuildContext {
    /// Context stamped with today's date
    pub fn new(source_url: &str, tier: &str, category: &str) -> Self {
        Self {
            source_url: source_url.to_string(),
            tier: tier.to_string(),
            category: category.to_string(),
            last_updated: chrono::Local::now().format("%Y-%m-%d").to_string(),
        }
    }
}

/// A normalized build, ready to serialize
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub tier: String,
    pub source_url: String,
    pub category: String,
    pub tags: Vec<String>,
    pub last_updated: String,
    #[serde(flatten)]
    pub gear: BuildGear,
}

impl BuildRecord {
    /// File name this record is stored under within its class directory
    pub fn file_name(&self) -> String {
        format!("{}.json", self.id)
    }
}

/// Transform a planner payload into a build record
pub fn transform_build(
    payload: &PlannerPayload,
    context: &BuildContext,
    layout: &Layout,
    resolver: &Resolver<'_>,
) -> BuildRecord {
    let gear = match layout {
        Layout::Profiles => {
            let (profile_order, profiles) = extract_profiles(payload, resolver);
            BuildGear::Profiles {
                profile_order,
                profiles,
            }
        }
        Layout::Flat { profile_index } => {
            let gear = payload
                .data
                .select_profile(profile_index.as_deref())
                .map(|profile| extract_gear(profile, &payload.data.items, resolver))
                .unwrap_or_default();
            BuildGear::Flat { gear }
        }
    };

    let identity = build_identity(&context.source_url);
    let class_name = payload
        .class_name
        .as_deref()
        .unwrap_or("unknown")
        .to_lowercase();

    BuildRecord {
        id: identity.id,
        name: identity.name,
        class_name,
        tier: context.tier.clone(),
        source_url: context.source_url.clone(),
        category: context.category.clone(),
        tags: Vec::new(),
        last_updated: context.last_updated.clone(),
        gear,
    }
}

/// Extract every distinct profile that yields gear, in progression order
fn extract_profiles(
    payload: &PlannerPayload,
    resolver: &Resolver<'_>,
) -> (Vec<String>, IndexMap<String, ProfileGear>) {
    let mut seen = HashSet::new();
    let mut profiles = IndexMap::new();

    for profile in &payload.data.profiles {
        let canonical = canonical_profile(&profile.name);
        if !seen.insert(canonical.key.clone()) {
            tracing::debug!(
                "Skipping profile '{}': '{}' already extracted",
                profile.name,
                canonical.key
            );
            continue;
        }

        let gear = extract_gear(profile, &payload.data.items, resolver);
        if gear.values().all(|slot| slot.is_empty()) {
            tracing::debug!("Profile '{}' has no gear", profile.name);
            continue;
        }

        profiles.insert(
            canonical.key,
            ProfileGear {
                name: canonical.display,
                gear,
            },
        );
    }

    // stable: non-standard keys keep insertion order
    profiles.sort_by(|a, _, b, _| progression_rank(a).cmp(&progression_rank(b)));
    let order = profiles.keys().cloned().collect();

    (order, profiles)
}

/// One line of a class index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub id: String,
    pub name: String,
    pub tier: String,
    pub file: String,
}

/// Summary of all builds produced for a class in one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassIndex {
    #[serde(rename = "class")]
    pub class_name: String,
    pub builds: Vec<IndexEntry>,
}

impl ClassIndex {
    pub fn from_builds(class_name: &str, builds: &[BuildRecord]) -> Self {
        Self {
            class_name: class_name.to_string(),
            builds: builds
                .iter()
                .map(|build| IndexEntry {
                    id: build.id.clone(),
                    name: build.name.clone(),
                    tier: build.tier.clone(),
                    file: build.file_name(),
                })
                .collect(),
        }
    }
}
