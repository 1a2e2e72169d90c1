//! # d4builds
//!
//! Diablo IV build-guide extraction - planner parsing, ID resolution and
//! gear normalization.
//!
//! This library provides functionality to:
//! - Locate the planner embedded in a build guide page
//! - Decode planner payloads and their nested JSON data
//! - Resolve affix, aspect and unique item IDs against the game mapping table
//! - Fold per-profile gear into weighted, de-duplicated slot recommendations
//! - Drive a sequential sync over many guides with per-build failure isolation
//!
//! ## Example
//!
//! ```no_run
//! use d4builds::{BuildContext, ItemNameOverrides, Layout, MappingTable, PlannerPayload, Resolver};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mapping = MappingTable::from_json(&std::fs::read_to_string("data.min.json")?)?;
//! let payload = PlannerPayload::from_json(&std::fs::read_to_string("planner.json")?)?;
//!
//! let resolver = Resolver::new(&mapping, ItemNameOverrides::embedded());
//! let context = BuildContext::new(
//!     "https://maxroll.gg/d4/build-guides/whirlwind-barbarian-guide",
//!     "S",
//!     "endgame",
//! );
//! let build = d4builds::transform_build(&payload, &context, &Layout::Profiles, &resolver);
//! println!("{}", serde_json::to_string_pretty(&build)?);
//! # Ok(())
//! # }
//! ```

pub mod build;
pub mod error;
pub mod gear;
pub mod guide;
pub mod mapping;
pub mod normalize;
pub mod overrides;
pub mod planner;
pub mod resolve;
pub mod slots;
pub mod sync;

#[doc(inline)]
pub use build::{
    transform_build, BuildContext, BuildGear, BuildRecord, ClassIndex, IndexEntry, Layout,
    ProfileGear,
};
#[doc(inline)]
pub use error::{Result, SyncError};
#[doc(inline)]
pub use gear::{affix_weight, extract_gear, GearMap, GearSlotAggregate, WeightedAffix};
#[doc(inline)]
pub use guide::{find_planner_ref, PlannerRef};
#[doc(inline)]
pub use mapping::MappingTable;
#[doc(inline)]
pub use normalize::{build_identity, canonical_profile, normalize_token, CanonicalProfile};
#[doc(inline)]
pub use overrides::ItemNameOverrides;
#[doc(inline)]
pub use planner::{ItemRecord, PlannerData, PlannerPayload, Profile};
#[doc(inline)]
pub use resolve::{resolve_affix_name, resolve_aspect_name, resolve_unique_item_name, Resolver};
#[doc(inline)]
pub use slots::{classify_slot, Slot};
#[doc(inline)]
pub use sync::{fetch_mapping, BuildSink, ClassReport, Fetch, GuideEntry, SyncOptions, Syncer};
