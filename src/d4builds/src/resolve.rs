//! ID resolution against the mapping table
//!
//! Affix and aspect lookups return `None` on a miss; callers skip that
//! contribution. Unique item names always resolve to something displayable.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::mapping::{MappingTable, NamedRecord};
use crate::normalize::{normalize_token, strip_season_tag, title_case};
use crate::overrides::ItemNameOverrides;

static NUMERIC_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"_\d+$").unwrap());
static WEAPON_SIZE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?i)[12]h").unwrap());

/// Resolve a numeric affix ID to a normalized affix name.
///
/// Preference: suffix text without its leading `of `, then prefix text,
/// then the internal name with any season tag removed.
pub fn resolve_affix_name(affix_id: u64, mapping: &MappingTable) -> Option<String> {
    let affix = mapping.affix_by_id(affix_id)?;
    let record = &affix.record;

    let from_suffix = record
        .suffix
        .as_deref()
        .and_then(|suffix| suffix.strip_prefix("of "))
        .map(normalize_token);
    let from_prefix = || {
        record
            .prefix
            .as_deref()
            .filter(|prefix| !prefix.trim().is_empty())
            .map(normalize_token)
    };
    let from_internal = || Some(normalize_token(strip_season_tag(&affix.internal_name)));

    from_suffix
        .filter(|name| !name.is_empty())
        .or_else(|| from_prefix().filter(|name| !name.is_empty()))
        .or_else(|| from_internal().filter(|name| !name.is_empty()))
}

/// Resolve an aspect (legendary power) ID to a normalized name
pub fn resolve_aspect_name(aspect_id: &str, mapping: &MappingTable) -> Option<String> {
    mapping
        .legendary_power(aspect_id)
        .and_then(NamedRecord::display_name)
        .map(normalize_token)
        .filter(|name| !name.is_empty())
}

/// Resolve a unique item's internal ID to a display name.
///
/// Tries the mapping table (exact, case-insensitive, then both again with
/// the season tag stripped), then the overrides table (exact, without a
/// trailing `_NNN`, then by fragment), and finally derives a name from the
/// ID itself. Never returns an empty string for a non-empty ID.
pub fn resolve_unique_item_name(
    item_id: &str,
    mapping: &MappingTable,
    overrides: &ItemNameOverrides,
) -> String {
    let untagged = strip_season_tag(item_id);

    let from_mapping = mapping
        .item(item_id)
        .or_else(|| mapping.item_ignore_case(item_id))
        .or_else(|| mapping.item(untagged))
        .or_else(|| mapping.item_ignore_case(untagged))
        .and_then(NamedRecord::display_name);
    if let Some(name) = from_mapping {
        return name.to_string();
    }

    let cleaned = untagged.to_lowercase();
    let unnumbered = NUMERIC_SUFFIX.replace(&cleaned, "");
    let from_overrides = overrides
        .get(&cleaned)
        .or_else(|| overrides.get(&unnumbered))
        .or_else(|| overrides.find_fragment(&cleaned));
    if let Some(name) = from_overrides {
        return name.to_string();
    }

    derive_item_name(item_id)
}

/// Build a readable name from an internal ID: `Helm_Unique_Barb_101` → `Helm Unique Barb`
fn derive_item_name(item_id: &str) -> String {
    let trimmed = item_id.trim_end_matches(|c: char| c.is_ascii_digit());
    let untagged = strip_season_tag(trimmed);
    let without_size = WEAPON_SIZE.replace(untagged, "");
    let name = title_case(&without_size.replace('_', " "));
    if !name.is_empty() {
        return name;
    }

    let raw = title_case(&item_id.replace('_', " "));
    if raw.is_empty() {
        item_id.to_string()
    } else {
        raw
    }
}

/// Resolver bound to one run's mapping table and overrides
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    pub mapping: &'a MappingTable,
    pub overrides: &'a ItemNameOverrides,
}

impl<'a> Resolver<'a> {
    pub fn new(mapping: &'a MappingTable, overrides: &'a ItemNameOverrides) -> Self {
        Self { mapping, overrides }
    }

    pub fn affix_name(&self, affix_id: u64) -> Option<String> {
        resolve_affix_name(affix_id, self.mapping)
    }

    pub fn aspect_name(&self, aspect_id: &str) -> Option<String> {
        resolve_aspect_name(aspect_id, self.mapping)
    }

    pub fn unique_item_name(&self, item_id: &str) -> String {
        resolve_unique_item_name(item_id, self.mapping, self.overrides)
    }
}
