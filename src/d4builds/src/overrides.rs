//! Manual item-name overrides
//!
//! Unique items whose internal IDs are missing from the mapping table get
//! their display names from a hand-maintained TSV (`internal_id`, `name`).
//! The default table is embedded at compile time from `share/item_names.tsv`;
//! a local TSV can extend or replace entries at resolver construction.

use indexmap::IndexMap;
use once_cell::sync::Lazy;

const ITEM_NAMES_TSV: &str = include_str!("../../../share/item_names.tsv");

static EMBEDDED: Lazy<ItemNameOverrides> = Lazy::new(|| ItemNameOverrides::from_tsv(ITEM_NAMES_TSV));

/// Cleaned internal item ID (or ID fragment) -> display name
#[derive(Debug, Clone, Default)]
pub struct ItemNameOverrides {
    entries: IndexMap<String, String>,
}

impl ItemNameOverrides {
    /// The table shipped with the crate
    pub fn embedded() -> &'static ItemNameOverrides {
        &EMBEDDED
    }

    /// Parse a TSV with a header line. Keys are lowercased; blank and
    /// `#` comment lines are ignored.
    pub fn from_tsv(tsv: &str) -> Self {
        let entries = tsv
            .lines()
            .skip(1)
            .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
            .filter_map(|line| {
                let mut cols = line.splitn(2, '\t');
                let id = cols.next()?.trim().to_lowercase();
                let name = cols.next()?.trim().to_string();
                if id.is_empty() || name.is_empty() {
                    return None;
                }
                Some((id, name))
            })
            .collect();
        Self { entries }
    }

    /// Add entries from another table, replacing existing keys
    pub fn extend(&mut self, other: ItemNameOverrides) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, cleaned_id: &str) -> Option<&str> {
        self.entries.get(cleaned_id).map(String::as_str)
    }

    /// Find the longest override key contained in `cleaned_id`.
    ///
    /// Ties keep table order.
    pub fn find_fragment(&self, cleaned_id: &str) -> Option<&str> {
        let mut best: Option<(&String, &String)> = None;
        for (key, name) in &self.entries {
            if !cleaned_id.contains(key.as_str()) {
                continue;
            }
            if best.map_or(true, |(k, _)| key.len() > k.len()) {
                best = Some((key, name));
            }
        }
        best.map(|(_, name)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TSV: &str = "internal_id\tname\n\
        1hsword_unique_paladin_002\tSword of the Test\n\
        # comment\n\
        \n\
        helm_unique_barb\tBarbarian Test Helm\n\
        unique_barb\tGeneric Barbarian Thing\n\
        Ring_Unique_Mixed\tMixed Case Key\n\
        broken line without tab\n";

    #[test]
    fn test_from_tsv() {
        let overrides = ItemNameOverrides::from_tsv(TSV);
        assert_eq!(overrides.len(), 4);
        assert_eq!(overrides.get("1hsword_unique_paladin_002"), Some("Sword of the Test"));
        assert_eq!(overrides.get("ring_unique_mixed"), Some("Mixed Case Key"));
        assert_eq!(overrides.get("missing"), None);
    }

    #[test]
    fn test_find_fragment_prefers_longest() {
        let overrides = ItemNameOverrides::from_tsv(TSV);
        assert_eq!(
            overrides.find_fragment("helm_unique_barb_777"),
            Some("Barbarian Test Helm")
        );
        assert_eq!(
            overrides.find_fragment("chest_unique_barb_001"),
            Some("Generic Barbarian Thing")
        );
        assert_eq!(overrides.find_fragment("boots_rare_001"), None);
    }

    #[test]
    fn test_extend_replaces() {
        let mut overrides = ItemNameOverrides::from_tsv(TSV);
        overrides.extend(ItemNameOverrides::from_tsv(
            "internal_id\tname\nunique_barb\tReplaced\nnew_key\tNew\n",
        ));
        assert_eq!(overrides.get("unique_barb"), Some("Replaced"));
        assert_eq!(overrides.get("new_key"), Some("New"));
        assert_eq!(overrides.len(), 5);
    }

    #[test]
    fn test_embedded_table_loads() {
        let embedded = ItemNameOverrides::embedded();
        assert!(!embedded.is_empty());
    }
}
