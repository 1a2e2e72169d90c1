//! Game data mapping table
//!
//! The planner references affixes, aspects and items by numeric or internal
//! IDs. The mapping table published alongside the planner resolves those IDs
//! to names. It is fetched once per run and never mutated.
//!
//! Parsing is lenient: categories that are not objects are treated as empty
//! and entries that fail to deserialize are skipped.

use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

/// An affix definition keyed by its internal name (e.g. `S04_CooldownReductionCDR`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AffixRecord {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<u64>,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub suffix: Option<String>,
}

/// An item or legendary power with a display name.
///
/// Records may carry the short keys (`n`, `t`), the long ones, or both.
/// The short key wins when it is not blank.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedRecord {
    #[serde(default, rename = "n")]
    pub short_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "t")]
    pub short_type: Option<String>,
    #[serde(default)]
    pub r#type: Option<String>,
}

impl NamedRecord {
    /// Display name, if present and not blank
    pub fn display_name(&self) -> Option<&str> {
        first_present(&self.short_name, &self.name)
    }

    pub fn item_type(&self) -> Option<&str> {
        first_present(&self.short_type, &self.r#type)
    }
}

fn first_present<'a>(
    preferred: &'a Option<String>,
    fallback: &'a Option<String>,
) -> Option<&'a str> {
    [preferred, fallback]
        .into_iter()
        .filter_map(|text| text.as_deref().map(str::trim))
        .find(|text| !text.is_empty())
}

/// Affix resolved through the numeric ID index
#[derive(Debug, Clone)]
pub struct IndexedAffix {
    /// Internal name, the key the affix is stored under
    pub internal_name: String,
    pub record: AffixRecord,
}

#[derive(Debug, Default)]
pub struct MappingTable {
    affixes: HashMap<String, AffixRecord>,
    items: HashMap<String, NamedRecord>,
    legendary_powers: HashMap<String, NamedRecord>,
    aspects: HashMap<String, NamedRecord>,

    affix_index: OnceCell<HashMap<u64, IndexedAffix>>,
    items_by_lower: OnceCell<HashMap<String, String>>,
}

impl MappingTable {
    /// Parse a mapping table from raw JSON text
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value))
    }

    /// Build a mapping table from an already-decoded JSON value
    pub fn from_value(value: &Value) -> Self {
        Self {
            affixes: lenient_category(value.get("affixes")),
            items: lenient_category(value.get("items")),
            legendary_powers: lenient_category(value.get("legendaryPowers")),
            aspects: lenient_category(value.get("aspects")),
            ..Default::default()
        }
    }

    pub fn affix(&self, internal_name: &str) -> Option<&AffixRecord> {
        self.affixes.get(internal_name)
    }

    pub fn item(&self, key: &str) -> Option<&NamedRecord> {
        self.items.get(key)
    }

    /// Look up an item key ignoring ASCII case
    pub fn item_ignore_case(&self, key: &str) -> Option<&NamedRecord> {
        let index = self.items_by_lower.get_or_init(|| {
            let mut index = HashMap::with_capacity(self.items.len());
            for key in self.items.keys() {
                index
                    .entry(key.to_ascii_lowercase())
                    .and_modify(|existing: &mut String| {
                        // Several keys can fold to the same lowercase form;
                        // keep the smallest so the choice is stable.
                        if key.as_str() < existing.as_str() {
                            *existing = key.clone();
                        }
                    })
                    .or_insert_with(|| key.clone());
            }
            index
        });
        let original = index.get(&key.to_ascii_lowercase())?;
        self.items.get(original)
    }

    /// Legendary power (aspect) by stringified ID.
    ///
    /// `legendaryPowers` is consulted first, then `aspects`.
    pub fn legendary_power(&self, id: &str) -> Option<&NamedRecord> {
        self.legendary_powers
            .get(id)
            .or_else(|| self.aspects.get(id))
    }

    /// Reverse index from numeric affix ID to affix, built on first use
    pub fn affix_index(&self) -> &HashMap<u64, IndexedAffix> {
        self.affix_index.get_or_init(|| {
            let index: HashMap<u64, IndexedAffix> = self
                .affixes
                .iter()
                .filter_map(|(name, record)| {
                    let id = record.id.filter(|id| *id != 0)?;
                    Some((
                        id,
                        IndexedAffix {
                            internal_name: name.clone(),
                            record: record.clone(),
                        },
                    ))
                })
                .collect();
            tracing::debug!("Built affix ID lookup with {} entries", index.len());
            index
        })
    }

    pub fn affix_by_id(&self, id: u64) -> Option<&IndexedAffix> {
        self.affix_index().get(&id)
    }

    pub fn stats(&self) -> MappingStats {
        MappingStats {
            affixes: self.affixes.len(),
            items: self.items.len(),
            legendary_powers: self.legendary_powers.len() + self.aspects.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingStats {
    pub affixes: usize,
    pub items: usize,
    pub legendary_powers: usize,
}

/// Decode each entry of a JSON object independently, dropping the ones that fail
pub(crate) fn lenient_category<T: DeserializeOwned>(value: Option<&Value>) -> HashMap<String, T> {
    let Some(Value::Object(entries)) = value else {
        return HashMap::new();
    };

    entries
        .iter()
        .filter_map(|(key, entry)| {
            let record = T::deserialize(entry).ok()?;
            Some((key.clone(), record))
        })
        .collect()
}

/// Accept numeric IDs given as numbers or numeric strings
pub(crate) fn lenient_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(id_from_value))
}

/// Numeric ID from a JSON number or numeric string
pub(crate) fn id_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
