//! Equipment slot classification
//!
//! Planner profiles key their items by numeric slot ID. Known IDs map
//! directly; anything else falls back to the item's internal type prefix.

use serde::{Deserialize, Serialize};

/// Canonical equipment slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Helm,
    Chest,
    Gloves,
    Pants,
    Boots,
    Ring,
    Amulet,
    Weapon,
    Offhand,
}

impl Slot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Helm => "helm",
            Self::Chest => "chest",
            Self::Gloves => "gloves",
            Self::Pants => "pants",
            Self::Boots => "boots",
            Self::Ring => "ring",
            Self::Amulet => "amulet",
            Self::Weapon => "weapon",
            Self::Offhand => "offhand",
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Planner numeric slot ID -> slot
pub const SLOT_IDS: &[(&str, Slot)] = &[
    ("4", Slot::Helm),
    ("5", Slot::Chest),
    ("6", Slot::Chest), // alt chest?
    ("8", Slot::Weapon),   // 2H weapon slot 1
    ("9", Slot::Weapon),   // 2H weapon slot 2 / offhand
    ("10", Slot::Offhand),
    ("11", Slot::Weapon),  // 1H weapon
    ("12", Slot::Offhand), // 1H offhand
    ("13", Slot::Gloves),
    ("14", Slot::Pants),
    ("15", Slot::Boots),
    ("16", Slot::Ring), // ring 1
    ("17", Slot::Ring), // ring 2
    ("18", Slot::Amulet),
];

/// Internal item ID prefix -> slot, checked in order
pub const ITEM_TYPE_PREFIXES: &[(&str, Slot)] = &[
    ("helm", Slot::Helm),
    ("chest", Slot::Chest),
    ("gloves", Slot::Gloves),
    ("pants", Slot::Pants),
    ("boots", Slot::Boots),
    ("amulet", Slot::Amulet),
    ("ring", Slot::Ring),
    ("1hsword", Slot::Weapon),
    ("1hmace", Slot::Weapon),
    ("1haxe", Slot::Weapon),
    ("dagger", Slot::Weapon),
    ("wand", Slot::Weapon),
    ("2hsword", Slot::Weapon),
    ("2hmace", Slot::Weapon),
    ("2haxe", Slot::Weapon),
    ("2hpolearm", Slot::Weapon),
    ("2hscythe", Slot::Weapon),
    ("staff", Slot::Weapon),
    ("bow", Slot::Weapon),
    ("crossbow", Slot::Weapon),
    ("focus", Slot::Offhand),
    ("shield", Slot::Offhand),
    ("totem", Slot::Offhand),
];

/// Slot for a known numeric slot ID
pub fn slot_by_id(slot_id: &str) -> Option<Slot> {
    SLOT_IDS
        .iter()
        .find(|(id, _)| *id == slot_id)
        .map(|(_, slot)| *slot)
}

/// Slot inferred from an internal item ID such as `Helm_Unique_Barb_101`
pub fn slot_by_item_id(item_internal_id: &str) -> Option<Slot> {
    let lower = item_internal_id.to_ascii_lowercase();
    ITEM_TYPE_PREFIXES
        .iter()
        .find(|(prefix, _)| lower.starts_with(prefix))
        .map(|(_, slot)| *slot)
}

/// Classify a profile entry: numeric slot ID first, item type prefix second
pub fn classify_slot(slot_id: &str, item_internal_id: &str) -> Option<Slot> {
    slot_by_id(slot_id).or_else(|| slot_by_item_id(item_internal_id))
}
