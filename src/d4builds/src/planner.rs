//! Planner API payloads
//!
//! A planner response carries metadata (`class`, `name`) and a `data` field
//! holding the actual build as JSON encoded in a string. Decoding is
//! best-effort: undecodable data becomes an empty build, malformed items and
//! profiles are dropped individually.

use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;

use crate::mapping::id_from_value;

/// Raw planner response for one build
#[derive(Debug, Clone, Default)]
pub struct PlannerPayload {
    pub class_name: Option<String>,
    pub name: Option<String>,
    pub data: PlannerData,
}

impl PlannerPayload {
    /// Parse a planner response from raw JSON text
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value))
    }

    pub fn from_value(value: &Value) -> Self {
        Self {
            class_name: string_field(value, "class"),
            name: string_field(value, "name"),
            data: PlannerData::decode(value.get("data")),
        }
    }
}

/// Decoded contents of the planner's `data` field
#[derive(Debug, Clone, Default)]
pub struct PlannerData {
    /// Item catalog: profile item reference -> item
    pub items: HashMap<String, ItemRecord>,
    pub profiles: Vec<Profile>,
    pub active_profile: usize,
}

impl PlannerData {
    /// Decode the embedded data, which is usually a JSON string but may
    /// already be an object. Anything undecodable yields empty data.
    pub fn decode(data: Option<&Value>) -> Self {
        match data {
            Some(Value::String(text)) => match serde_json::from_str::<Value>(text) {
                Ok(value) => Self::from_value(&value),
                Err(e) => {
                    tracing::warn!("Could not decode planner data: {}", e);
                    Self::default()
                }
            },
            Some(value @ Value::Object(_)) => Self::from_value(value),
            _ => Self::default(),
        }
    }

    fn from_value(value: &Value) -> Self {
        let items = match value.get("items") {
            Some(Value::Object(entries)) => entries
                .iter()
                .filter_map(|(key, item)| Some((key.clone(), ItemRecord::from_value(item)?)))
                .collect(),
            _ => HashMap::new(),
        };

        let profiles = match value.get("profiles") {
            Some(Value::Array(entries)) => entries.iter().filter_map(Profile::from_value).collect(),
            _ => Vec::new(),
        };

        let active_profile = value
            .get("activeProfile")
            .and_then(Value::as_u64)
            .and_then(|idx| usize::try_from(idx).ok())
            .unwrap_or(0);

        Self {
            items,
            profiles,
            active_profile,
        }
    }

    /// Pick one profile for single-profile output.
    ///
    /// A numeric index picks that profile, or the first one when out of
    /// range. Without a numeric index `activeProfile` applies, again
    /// falling back to the first profile.
    pub fn select_profile(&self, requested: Option<&str>) -> Option<&Profile> {
        let idx = requested
            .and_then(|id| id.trim().parse::<usize>().ok())
            .unwrap_or(self.active_profile);

        self.profiles.get(idx).or_else(|| self.profiles.first())
    }
}

/// One named gear loadout (e.g. "Starter", "Mythic")
#[derive(Debug, Clone, Default)]
pub struct Profile {
    pub name: String,
    /// Numeric slot ID -> item catalog reference, in declared order
    pub items: IndexMap<String, String>,
}

impl Profile {
    fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let name = object
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let items = match object.get("items") {
            Some(Value::Object(entries)) => entries
                .iter()
                .filter_map(|(slot_id, item_ref)| Some((slot_id.clone(), reference(item_ref)?)))
                .collect(),
            _ => IndexMap::new(),
        };

        Some(Self { name, items })
    }
}

/// An item as placed in the planner
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemRecord {
    /// Internal ID such as `Helm_Unique_Barb_101`
    pub id: String,
    /// Aspect reference carried by the legendary power
    pub aspect_id: Option<String>,
    /// Explicit affix IDs in declared order; `None` where an entry has no usable ID
    pub explicits: Vec<Option<u64>>,
}

impl ItemRecord {
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        let id = object
            .get("id")
            .and_then(reference)
            .unwrap_or_default();

        let aspect_id = object
            .get("legendaryPower")
            .and_then(|power| power.get("nid"))
            .and_then(reference)
            .filter(|nid| nid != "0");

        let explicits = match object.get("explicits") {
            Some(Value::Array(entries)) => entries
                .iter()
                .map(|affix| {
                    affix
                        .get("nid")
                        .and_then(id_from_value)
                        .filter(|nid| *nid != 0)
                })
                .collect(),
            _ => Vec::new(),
        };

        Some(Self {
            id,
            aspect_id,
            explicits,
        })
    }

    pub fn is_unique(&self) -> bool {
        self.id.to_lowercase().contains("unique")
    }
}

/// A string or numeric reference as a non-empty string
fn reference(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
}
