//! End-to-end transformation of planner payloads

use d4builds::{
    transform_build, BuildContext, BuildGear, BuildRecord, ItemNameOverrides, Layout,
    MappingTable, PlannerPayload, Resolver,
};
use serde_json::{json, Value};

const GUIDE_URL: &str = "https://maxroll.gg/d4/build-guides/whirlwind-barbarian-guide";

fn mapping() -> MappingTable {
    MappingTable::from_value(&json!({
        "affixes": {
            "S04_CritChance": { "id": 1001, "suffix": "of Critical Strike Chance" },
            "S04_AttackSpeed": { "id": 1002, "prefix": "Attack Speed" },
            "S04_Helm_Unique_Barb_101": { "id": 1003 }
        },
        "legendaryPowers": {
            "5001": { "name": "Aspect of Berserk Ripping" }
        }
    }))
}

fn context() -> BuildContext {
    BuildContext {
        source_url: GUIDE_URL.to_string(),
        tier: "S".to_string(),
        category: "endgame".to_string(),
        last_updated: "2025-06-01".to_string(),
    }
}

fn transform(payload: &PlannerPayload, layout: &Layout) -> BuildRecord {
    let mapping = mapping();
    let overrides = ItemNameOverrides::default();
    transform_build(payload, &context(), layout, &Resolver::new(&mapping, &overrides))
}

fn planner(data: Value) -> PlannerPayload {
    PlannerPayload::from_value(&json!({
        "class": "Barbarian",
        "name": "Whirlwind Planner",
        "data": data.to_string(),
    }))
}

#[test]
fn helm_unique_with_weighted_affix() {
    let payload = planner(json!({
        "items": {
            "7": {
                "id": "Helm_Unique_Barb_101",
                "explicits": [{ "nid": 1001 }]
            }
        },
        "profiles": [{ "name": "Endgame", "items": { "4": 7 } }]
    }));

    let build = transform(&payload, &Layout::Profiles);
    let value = serde_json::to_value(&build).unwrap();

    let helm = &value["profiles"]["mythic"]["gear"]["helm"];
    assert_eq!(helm["priority_uniques"], json!(["Helm Unique Barb"]));
    assert_eq!(
        helm["priority_affixes"],
        json!([{ "name": "critical_strike_chance", "weight": 10 }])
    );
    assert_eq!(value["profile_order"], json!(["mythic"]));
    assert_eq!(value["id"], "whirlwind-barbarian");
    assert_eq!(value["name"], "Whirlwind Barbarian");
    assert_eq!(value["class"], "barbarian");
    assert_eq!(value["category"], "endgame");
    assert_eq!(value["last_updated"], "2025-06-01");
}

#[test]
fn full_item_contributions() {
    let payload = planner(json!({
        "items": {
            "1": {
                "id": "Helm_Unique_Barb_101",
                "legendaryPower": { "nid": 5001 },
                "explicits": [
                    { "nid": 1003 },
                    { "nid": 1002 },
                    { "nid": 9999 },
                    { "nid": 1001 },
                    { "nid": 1002 }
                ]
            }
        },
        "profiles": [{ "name": "Ancestral (BiS)", "items": { "4": 1 } }]
    }));

    let build = transform(&payload, &Layout::Profiles);
    let value = serde_json::to_value(&build).unwrap();
    let helm = &value["profiles"]["ancestral"]["gear"]["helm"];

    assert_eq!(value["profiles"]["ancestral"]["name"], "Ancestral");
    assert_eq!(helm["priority_aspects"], json!(["aspect_of_berserk_ripping"]));
    assert_eq!(
        helm["priority_affixes"],
        json!([
            { "name": "attack_speed", "weight": 8 },
            { "name": "critical_strike_chance", "weight": 4 }
        ])
    );
    assert_eq!(helm["required_tempers"], json!([]));
}

#[test]
fn profile_order_standard_first() {
    let payload = planner(json!({
        "items": { "1": { "id": "Helm_Rare", "explicits": [{ "nid": 1001 }] } },
        "profiles": [
            { "name": "Leveling", "items": { "4": 1 } },
            { "name": "BiS", "items": { "4": 1 } },
            { "name": "Push Build", "items": { "4": 1 } }
        ]
    }));

    let build = transform(&payload, &Layout::Profiles);
    let BuildGear::Profiles { profile_order, .. } = build.gear else {
        panic!("expected profiles layout");
    };
    assert_eq!(profile_order, vec!["starter", "mythic", "push"]);
}

#[test]
fn malformed_data_yields_empty_build() {
    let payload = PlannerPayload::from_value(&json!({
        "class": "Druid",
        "data": "this is {not json",
    }));

    let build = transform(&payload, &Layout::Profiles);
    let value = serde_json::to_value(&build).unwrap();
    assert_eq!(value["profile_order"], json!([]));
    assert_eq!(value["profiles"], json!({}));
    assert_eq!(value["class"], "druid");

    let flat = transform(&payload, &Layout::Flat { profile_index: None });
    assert_eq!(serde_json::to_value(&flat).unwrap()["gear"], json!({}));
}

#[test]
fn record_round_trips_through_json() {
    let payload = planner(json!({
        "items": { "1": { "id": "Ring_Rare", "explicits": [{ "nid": 1002 }] } },
        "profiles": [{ "name": "Starter", "items": { "16": 1 } }]
    }));
    let build = transform(&payload, &Layout::Profiles);

    let text = serde_json::to_string_pretty(&build).unwrap();
    let parsed: BuildRecord = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, build);
}
