//! Guide page parsing
//!
//! Build guides embed the planner as an element whose class list contains
//! `d4-embed`. Its `data-d4-profile` attribute is the planner ID; the
//! optional `data-d4-id` (or `data-d4-data`) selects a profile inside it.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, SyncError};

static OPEN_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[A-Za-z][^>]*>").unwrap());
static CLASS_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\sclass\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap());
static PLANNER_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\sdata-d4-profile\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap());
static PROFILE_INDEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\sdata-d4-id\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap());
static PROFILE_DATA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\sdata-d4-data\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap());

/// Planner reference found on a guide page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerRef {
    pub planner_id: String,
    pub profile_id: Option<String>,
}

/// Locate the planner embed in a guide page.
///
/// Fails with [`SyncError::MissingPlannerId`] when the page has no embed or
/// the first embed has no planner ID.
pub fn find_planner_ref(html: &str, url: &str) -> Result<PlannerRef> {
    let tag = OPEN_TAG
        .find_iter(html)
        .map(|m| m.as_str())
        .find(|tag| is_embed(tag))
        .ok_or_else(|| SyncError::MissingPlannerId(url.to_string()))?;

    let planner_id = attribute(tag, &PLANNER_ID)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| SyncError::MissingPlannerId(url.to_string()))?;
    let profile_id = attribute(tag, &PROFILE_INDEX)
        .filter(|id| !id.is_empty())
        .or_else(|| attribute(tag, &PROFILE_DATA).filter(|id| !id.is_empty()));

    Ok(PlannerRef {
        planner_id,
        profile_id,
    })
}

fn is_embed(tag: &str) -> bool {
    CLASS_ATTR
        .captures(tag)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .is_some_and(|classes| {
            classes
                .as_str()
                .split_whitespace()
                .any(|class| class.contains("d4-embed"))
        })
}

/// Value of a quoted attribute within a single opening tag
fn attribute(tag: &str, pattern: &Regex) -> Option<String> {
    let caps = pattern.captures(tag)?;
    let value = caps.get(1).or_else(|| caps.get(2))?;
    Some(value.as_str().trim().to_string())
}
