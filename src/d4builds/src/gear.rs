//! Per-slot gear aggregation for one profile

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::planner::{ItemRecord, Profile};
use crate::resolve::Resolver;
use crate::slots::{classify_slot, Slot};

/// Weight of the first explicit affix; each later position loses 2
pub const BASE_AFFIX_WEIGHT: u32 = 10;
/// Lowest weight any affix is given
pub const MIN_AFFIX_WEIGHT: u32 = 3;

/// Weight for an explicit affix at `position` (0-based): `max(10 - 2*i, 3)`
pub fn affix_weight(position: usize) -> u32 {
    let drop = u32::try_from(position)
        .unwrap_or(u32::MAX)
        .saturating_mul(2);
    BASE_AFFIX_WEIGHT.saturating_sub(drop).max(MIN_AFFIX_WEIGHT)
}

/// Unique-item innate powers resolve like affixes but are not generic affixes
pub fn is_unique_power(affix_name: &str) -> bool {
    affix_name.contains("_unique_") || affix_name.starts_with("uberunique_")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedAffix {
    pub name: String,
    pub weight: u32,
}

/// Gear recommendations for one equipment slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearSlotAggregate {
    pub slot: Slot,
    pub priority_uniques: Vec<String>,
    pub priority_aspects: Vec<String>,
    pub priority_affixes: Vec<WeightedAffix>,
    pub required_tempers: Vec<String>,
}

impl GearSlotAggregate {
    pub fn new(slot: Slot) -> Self {
        Self {
            slot,
            priority_uniques: Vec::new(),
            priority_aspects: Vec::new(),
            priority_affixes: Vec::new(),
            required_tempers: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.priority_uniques.is_empty()
            && self.priority_aspects.is_empty()
            && self.priority_affixes.is_empty()
            && self.required_tempers.is_empty()
    }

    fn add_unique(&mut self, name: String) {
        if !name.is_empty() && !self.priority_uniques.contains(&name) {
            self.priority_uniques.push(name);
        }
    }

    fn add_aspect(&mut self, name: String) {
        if !self.priority_aspects.contains(&name) {
            self.priority_aspects.push(name);
        }
    }

    /// First occurrence of a name wins, whatever its weight
    fn add_affix(&mut self, name: String, weight: u32) {
        if self.priority_affixes.iter().all(|a| a.name != name) {
            self.priority_affixes.push(WeightedAffix { name, weight });
        }
    }

    fn absorb(&mut self, item: &ItemRecord, resolver: &Resolver<'_>) {
        if item.is_unique() {
            self.add_unique(resolver.unique_item_name(&item.id));
        }

        if let Some(aspect) = item.aspect_id.as_deref().and_then(|id| resolver.aspect_name(id)) {
            self.add_aspect(aspect);
        }

        for (position, affix_id) in item.explicits.iter().enumerate() {
            let Some(name) = affix_id.and_then(|id| resolver.affix_name(id)) else {
                continue;
            };
            if is_unique_power(&name) {
                continue;
            }
            self.add_affix(name, affix_weight(position));
        }
    }
}

/// Slot -> aggregate, in order of first appearance
pub type GearMap = IndexMap<Slot, GearSlotAggregate>;

/// Fold one profile's item assignments into per-slot aggregates.
///
/// Entries whose item is missing from the catalog, or whose slot cannot be
/// classified, are skipped.
pub fn extract_gear(
    profile: &Profile,
    catalog: &HashMap<String, ItemRecord>,
    resolver: &Resolver<'_>,
) -> GearMap {
    let mut gear = GearMap::new();

    for (slot_id, item_ref) in &profile.items {
        let Some(item) = catalog.get(item_ref) else {
            tracing::debug!("Profile '{}' references missing item {}", profile.name, item_ref);
            continue;
        };
        let Some(slot) = classify_slot(slot_id, &item.id) else {
            tracing::debug!("Could not classify slot {} for item '{}'", slot_id, item.id);
            continue;
        };

        gear.entry(slot)
            .or_insert_with(|| GearSlotAggregate::new(slot))
            .absorb(item, resolver);
    }

    gear
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::MappingTable;
    use crate::overrides::ItemNameOverrides;
    use serde_json::json;

    fn mapping() -> MappingTable {
        MappingTable::from_value(&json!({
            "affixes": {
                "CritChance": { "id": 1, "prefix": "Critical Strike Chance" },
                "AttackSpeed": { "id": 2, "prefix": "Attack Speed" },
                "MaxLife": { "id": 3, "prefix": "Maximum Life" },
                "Armor": { "id": 4, "prefix": "Armor" },
                "Strength": { "id": 5, "prefix": "Strength" },
                "Willpower": { "id": 6, "prefix": "Willpower" },
                "CritChanceAgain": { "id": 7, "suffix": "of Critical Strike Chance" },
                "S04_Helm_Unique_Barb_101": { "id": 8 },
                "S04_UberUnique_Power": { "id": 9 }
            },
            "legendaryPowers": { "300": { "name": "Aspect of Berserk Ripping" } }
        }))
    }

    fn item(id: &str, explicits: &[u64]) -> ItemRecord {
        ItemRecord {
            id: id.to_string(),
            aspect_id: None,
            explicits: explicits.iter().map(|nid| Some(*nid)).collect(),
        }
    }

    fn profile(items: &[(&str, &str)]) -> Profile {
        Profile {
            name: "test".to_string(),
            items: items
                .iter()
                .map(|(slot, item)| (slot.to_string(), item.to_string()))
                .collect(),
        }
    }

    fn run(profile: &Profile, catalog: &HashMap<String, ItemRecord>) -> GearMap {
        let mapping = mapping();
        let overrides = ItemNameOverrides::default();
        extract_gear(profile, catalog, &Resolver::new(&mapping, &overrides))
    }

    #[test]
    fn test_affix_weight() {
        let weights: Vec<u32> = (0..7).map(affix_weight).collect();
        assert_eq!(weights, vec![10, 8, 6, 4, 3, 3, 3]);
        assert_eq!(affix_weight(usize::MAX), MIN_AFFIX_WEIGHT);
    }

    #[test]
    fn test_is_unique_power() {
        assert!(is_unique_power("helm_unique_barb_101"));
        assert!(is_unique_power("uberunique_power"));
        assert!(!is_unique_power("unique_looking"));
        assert!(!is_unique_power("critical_strike_chance"));
    }

    #[test]
    fn test_weights_by_position() {
        let catalog = HashMap::from([("a".to_string(), item("Chest_Rare", &[1, 2, 3, 4, 5, 6]))]);
        let gear = run(&profile(&[("5", "a")]), &catalog);
        let weights: Vec<u32> = gear[&Slot::Chest]
            .priority_affixes
            .iter()
            .map(|a| a.weight)
            .collect();
        assert_eq!(weights, vec![10, 8, 6, 4, 3, 3]);
    }

    #[test]
    fn test_duplicate_affix_keeps_first() {
        let catalog = HashMap::from([
            ("a".to_string(), item("Ring_Rare_1", &[2, 1, 7])),
            ("b".to_string(), item("Ring_Rare_2", &[1])),
        ]);
        let gear = run(&profile(&[("16", "a"), ("17", "b")]), &catalog);
        let ring = &gear[&Slot::Ring];
        assert_eq!(
            ring.priority_affixes,
            vec![
                WeightedAffix { name: "attack_speed".into(), weight: 10 },
                WeightedAffix { name: "critical_strike_chance".into(), weight: 8 },
            ]
        );
    }

    #[test]
    fn test_unique_powers_excluded_but_positions_count() {
        let catalog = HashMap::from([("a".to_string(), item("Helm_Unique_Barb_101", &[8, 9, 1]))]);
        let gear = run(&profile(&[("4", "a")]), &catalog);
        let helm = &gear[&Slot::Helm];
        assert_eq!(helm.priority_uniques, vec!["Helm Unique Barb".to_string()]);
        assert_eq!(
            helm.priority_affixes,
            vec![WeightedAffix { name: "critical_strike_chance".into(), weight: 6 }]
        );
    }

    #[test]
    fn test_unresolved_affixes_skipped() {
        let mut record = item("Gloves_Rare", &[999, 3]);
        record.explicits.insert(0, None);
        let catalog = HashMap::from([("a".to_string(), record)]);
        let gear = run(&profile(&[("13", "a")]), &catalog);
        assert_eq!(
            gear[&Slot::Gloves].priority_affixes,
            vec![WeightedAffix { name: "maximum_life".into(), weight: 6 }]
        );
    }

    #[test]
    fn test_aspects_deduplicated() {
        let mut first = item("2HAxe_Legendary", &[]);
        first.aspect_id = Some("300".to_string());
        let mut second = first.clone();
        second.id = "2HMace_Legendary".to_string();
        let mut unknown = first.clone();
        unknown.aspect_id = Some("301".to_string());
        let catalog = HashMap::from([
            ("a".to_string(), first),
            ("b".to_string(), second),
            ("c".to_string(), unknown),
        ]);
        let gear = run(&profile(&[("8", "a"), ("9", "b"), ("11", "c")]), &catalog);
        assert_eq!(gear.len(), 1);
        assert_eq!(
            gear[&Slot::Weapon].priority_aspects,
            vec!["aspect_of_berserk_ripping".to_string()]
        );
    }

    #[test]
    fn test_skips_missing_and_unclassified() {
        let catalog = HashMap::from([
            ("a".to_string(), item("Charm_Thing", &[1])),
            ("b".to_string(), item("Boots_Rare", &[1])),
        ]);
        let gear = run(&profile(&[("99", "a"), ("15", "missing"), ("98", "b")]), &catalog);
        let slots: Vec<Slot> = gear.keys().copied().collect();
        assert_eq!(slots, vec![Slot::Boots]);
    }

    #[test]
    fn test_empty_aggregate() {
        let catalog = HashMap::from([("a".to_string(), item("Pants_Rare", &[404]))]);
        let gear = run(&profile(&[("14", "a")]), &catalog);
        assert!(gear[&Slot::Pants].is_empty());
    }
}
