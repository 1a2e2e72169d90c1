//! Guide discovery
//!
//! The tier list page embeds its entries as JSON inside `<script>` blocks.
//! Every object there that links to a build guide and carries a `tier`
//! contributes one (url, tier) pair. Classes the tier list yields nothing for
//! fall back to the built-in guide table.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use d4builds::GuideEntry;

/// Path fragment every build guide URL contains
pub const GUIDE_PATH: &str = "/d4/build-guides/";

pub const CLASSES: &[&str] = &[
    "paladin",
    "barbarian",
    "druid",
    "necromancer",
    "rogue",
    "sorcerer",
    "spiritborn",
];

/// Guides synced when the tier list is unavailable
pub const BUILT_IN_GUIDES: &[(&str, &[&str])] = &[
    (
        "paladin",
        &[
            "https://maxroll.gg/d4/build-guides/wing-strikes-paladin-guide",
            "https://maxroll.gg/d4/build-guides/blessed-hammer-paladin-guide",
        ],
    ),
    (
        "barbarian",
        &[
            "https://maxroll.gg/d4/build-guides/bash-barbarian-guide",
            "https://maxroll.gg/d4/build-guides/double-swing-barbarian-guide",
            "https://maxroll.gg/d4/build-guides/whirlwind-barbarian-guide",
        ],
    ),
    (
        "druid",
        &[
            "https://maxroll.gg/d4/build-guides/pulverize-druid-guide",
            "https://maxroll.gg/d4/build-guides/tornado-druid-guide",
        ],
    ),
    (
        "necromancer",
        &[
            "https://maxroll.gg/d4/build-guides/minion-necromancer-guide",
            "https://maxroll.gg/d4/build-guides/bone-spear-necromancer-guide",
        ],
    ),
    (
        "rogue",
        &[
            "https://maxroll.gg/d4/build-guides/barrage-rogue-guide",
            "https://maxroll.gg/d4/build-guides/twisting-blades-rogue-guide",
        ],
    ),
    (
        "sorcerer",
        &[
            "https://maxroll.gg/d4/build-guides/frozen-orb-sorcerer-guide",
            "https://maxroll.gg/d4/build-guides/ball-lightning-sorcerer-guide",
        ],
    ),
    (
        "spiritborn",
        &[
            "https://maxroll.gg/d4/build-guides/quill-volley-spiritborn-guide",
            "https://maxroll.gg/d4/build-guides/evade-spiritborn-guide",
        ],
    ),
];

static SCRIPT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script([^>]*)>(.*?)</script>").unwrap());

/// Built-in guide URLs for a class
pub fn built_in_guides(class_name: &str) -> &'static [&'static str] {
    BUILT_IN_GUIDES
        .iter()
        .find(|(class, _)| *class == class_name)
        .map(|(_, urls)| *urls)
        .unwrap_or(&[])
}

/// Class named in a guide URL slug (`.../whirlwind-barbarian-guide` → `barbarian`)
pub fn class_from_url(url: &str) -> Option<&'static str> {
    let identity = d4builds::build_identity(url);
    let tokens: Vec<&str> = identity.id.split('-').collect();
    CLASSES
        .iter()
        .copied()
        .find(|class| tokens.contains(class))
}

/// Guide URL -> tier, as listed on the tier list page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierList {
    tiers: IndexMap<String, String>,
}

impl TierList {
    /// Parse the tier list page. Relative guide links are resolved against `base_url`.
    pub fn parse(html: &str, base_url: &str) -> Self {
        let origin = origin(base_url);
        let mut tiers = IndexMap::new();

        for caps in SCRIPT_BLOCK.captures_iter(html) {
            let attrs = caps.get(1).map_or("", |m| m.as_str()).to_ascii_lowercase();
            if !attrs.contains("json") && !attrs.contains("__next_data__") {
                continue;
            }
            let body = caps.get(2).map_or("", |m| m.as_str());
            match serde_json::from_str::<Value>(body.trim()) {
                Ok(value) => collect_tiers(&value, origin, &mut tiers),
                Err(e) => tracing::debug!("Skipping undecodable script block: {}", e),
            }
        }

        Self { tiers }
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn tier(&self, url: &str) -> Option<&str> {
        self.tiers.get(url).map(String::as_str)
    }

    /// Guides for a class: tier list entries if any, else the built-in table
    pub fn guides_for(&self, class_name: &str, default_tier: &str) -> Vec<GuideEntry> {
        let listed: Vec<GuideEntry> = self
            .tiers
            .iter()
            .filter(|(url, _)| class_from_url(url) == Some(class_name))
            .map(|(url, tier)| GuideEntry::new(url, tier))
            .collect();
        if !listed.is_empty() {
            return listed;
        }

        built_in_guides(class_name)
            .iter()
            .map(|url| GuideEntry::new(url, self.tier(url).unwrap_or(default_tier)))
            .collect()
    }
}

fn collect_tiers(value: &Value, origin: &str, tiers: &mut IndexMap<String, String>) {
    match value {
        Value::Object(object) => {
            let guide_url = object
                .values()
                .filter_map(Value::as_str)
                .find(|s| s.contains(GUIDE_PATH));
            let tier = object.get("tier").and_then(|tier| match tier {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            });
            if let (Some(url), Some(tier)) = (guide_url, tier) {
                tiers
                    .entry(absolute_url(url, origin))
                    .or_insert(tier);
            }
            for child in object.values() {
                collect_tiers(child, origin, tiers);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_tiers(item, origin, tiers);
            }
        }
        _ => {}
    }
}

/// `https://host/a/b` → `https://host`
fn origin(url: &str) -> &str {
    let Some(scheme_end) = url.find("://") else {
        return "";
    };
    let host_start = scheme_end + 3;
    match url[host_start..].find('/') {
        Some(slash) => &url[..host_start + slash],
        None => url,
    }
}

fn absolute_url(url: &str, origin: &str) -> String {
    let url = url.split(['?', '#']).next().unwrap_or(url);
    let url = url.trim_end_matches('/');
    if url.starts_with('/') {
        format!("{}{}", origin, url)
    } else {
        url.to_string()
    }
}
