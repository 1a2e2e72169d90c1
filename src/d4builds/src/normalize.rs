//! Text canonicalization
//!
//! Turns free text from guides and planner data into stable tokens:
//! affix/aspect names, profile keys and build identities.

use once_cell::sync::Lazy;
use regex::Regex;

static BRACKETED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[.*?\]").unwrap());
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static PARENTHETICAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)").unwrap());
static SEASON_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]\d+_").unwrap());

/// Normalize free text to a `lowercase_with_underscores` token.
///
/// Bracketed segments are dropped, then everything that is not a word
/// character or whitespace. The result is idempotent.
///
/// - `"Foo [Rare]"` → `"foo"`
/// - `"Critical Strike Chance"` → `"critical_strike_chance"`
pub fn normalize_token(text: &str) -> String {
    let text = BRACKETED.replace_all(text, "");
    let text = NON_WORD.replace_all(&text, "");
    let text = text.trim().to_lowercase();
    WHITESPACE.replace_all(&text, "_").into_owned()
}

/// Strip a leading season-version tag such as `S04_`.
pub fn strip_season_tag(text: &str) -> &str {
    match SEASON_TAG.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

/// Capitalize each whitespace-separated word and collapse runs of whitespace.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A profile name mapped onto a progression stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalProfile {
    pub key: String,
    pub display: String,
}

impl CanonicalProfile {
    fn new(key: &str, display: &str) -> Self {
        Self {
            key: key.to_string(),
            display: display.to_string(),
        }
    }
}

/// Progression stages in output order. Keys outside this list sort after it.
pub const PROGRESSION_ORDER: &[&str] = &["starter", "ancestral", "mythic"];

/// Canonicalize a planner profile name.
///
/// Categories are checked in priority order; the first match wins:
/// starter/leveling, ancestral, mythic/bis/endgame, sanctified, push.
/// Anything else keeps its own name with parenthetical notes removed.
pub fn canonical_profile(name: &str) -> CanonicalProfile {
    let lower = name.to_lowercase();
    let has = |needle: &str| lower.contains(needle);

    if has("starter") || has("leveling") {
        CanonicalProfile::new("starter", "Starter")
    } else if has("ancestral") {
        CanonicalProfile::new("ancestral", "Ancestral")
    } else if has("mythic") || has("bis") || has("endgame") {
        CanonicalProfile::new("mythic", "Mythic")
    } else if has("sanctif") {
        CanonicalProfile::new("sanctified", "Sanctified")
    } else if has("push") {
        CanonicalProfile::new("push", "Push")
    } else {
        let cleaned = PARENTHETICAL.replace_all(name, "");
        let display = title_case(&cleaned);
        let key = normalize_token(&display);
        if key.is_empty() {
            CanonicalProfile::new("default", "Default")
        } else {
            CanonicalProfile { key, display }
        }
    }
}

/// Position of a profile key in the progression order
pub fn progression_rank(key: &str) -> usize {
    PROGRESSION_ORDER
        .iter()
        .position(|k| *k == key)
        .unwrap_or(PROGRESSION_ORDER.len())
}

/// Identity of a build derived from its guide URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildIdentity {
    pub id: String,
    pub name: String,
}

/// Derive build id and display name from a guide URL.
///
/// `https://maxroll.gg/d4/build-guides/whirlwind-barbarian-guide`
/// → id `whirlwind-barbarian`, name `Whirlwind Barbarian`
pub fn build_identity(source_url: &str) -> BuildIdentity {
    let path = source_url
        .split(['?', '#'])
        .next()
        .unwrap_or(source_url)
        .trim_end_matches('/');
    let slug = path.rsplit('/').next().unwrap_or(path);
    let id = slug.strip_suffix("-guide").unwrap_or(slug).to_string();
    let name = title_case(&id.replace('-', " "));

    BuildIdentity { id, name }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_token() {
        assert_eq!(normalize_token("Foo [Rare]"), "foo");
        assert_eq!(normalize_token("Critical Strike Chance"), "critical_strike_chance");
        assert_eq!(normalize_token("  Maximum   Life  "), "maximum_life");
        assert_eq!(normalize_token("+20% Attack Speed"), "20_attack_speed");
        assert_eq!(normalize_token("CooldownReductionCDR"), "cooldownreductioncdr");
        assert_eq!(normalize_token("single"), "single");
        assert_eq!(normalize_token(""), "");
    }

    #[test]
    fn test_normalize_token_idempotent() {
        let inputs = [
            "Foo [Rare]",
            "Aspect of the Moonrise",
            "  spaced \t out\nwords ",
            "[only brackets]",
            "under_score mixed-Case!",
            "Ünïcödé Nämé",
            "a [b",
            "___",
        ];
        for input in inputs {
            let once = normalize_token(input);
            assert_eq!(normalize_token(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_strip_season_tag() {
        assert_eq!(strip_season_tag("S04_CooldownReduction"), "CooldownReduction");
        assert_eq!(strip_season_tag("X123_Thing"), "Thing");
        assert_eq!(strip_season_tag("Helm_Unique_Barb_101"), "Helm_Unique_Barb_101");
        assert_eq!(strip_season_tag("1HSword_Unique"), "1HSword_Unique");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("whirlwind barbarian"), "Whirlwind Barbarian");
        assert_eq!(title_case("  HELM   unique "), "Helm Unique");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_canonical_profile_categories() {
        assert_eq!(canonical_profile("Leveling").key, "starter");
        assert_eq!(canonical_profile("Starter Build").display, "Starter");
        assert_eq!(canonical_profile("BiS").key, "mythic");
        assert_eq!(canonical_profile("Endgame Pit Push").key, "mythic");
        assert_eq!(canonical_profile("Sanctification").key, "sanctified");
        assert_eq!(canonical_profile("Push Build").key, "push");
    }

    #[test]
    fn test_canonical_profile_ancestral_bis() {
        let profile = canonical_profile("Ancestral (BiS)");
        assert_eq!(profile.key, "ancestral");
        assert_eq!(profile.display, "Ancestral");
    }

    #[test]
    fn test_canonical_profile_precedence() {
        // starter is checked before mythic
        assert_eq!(canonical_profile("Starter to Mythic").key, "starter");
    }

    #[test]
    fn test_canonical_profile_fallback() {
        let profile = canonical_profile("speed farm (T4)");
        assert_eq!(profile.key, "speed_farm");
        assert_eq!(profile.display, "Speed Farm");

        let profile = canonical_profile("(notes only)");
        assert_eq!(profile.key, "default");
    }

    #[test]
    fn test_progression_rank() {
        assert_eq!(progression_rank("starter"), 0);
        assert_eq!(progression_rank("mythic"), 2);
        assert_eq!(progression_rank("push"), PROGRESSION_ORDER.len());
    }

    #[test]
    fn test_build_identity() {
        let identity =
            build_identity("https://maxroll.gg/d4/build-guides/whirlwind-barbarian-guide");
        assert_eq!(identity.id, "whirlwind-barbarian");
        assert_eq!(identity.name, "Whirlwind Barbarian");

        let identity = build_identity("https://maxroll.gg/d4/build-guides/bone-spear-necromancer/?x=1");
        assert_eq!(identity.id, "bone-spear-necromancer");
        assert_eq!(identity.name, "Bone Spear Necromancer");
    }
}
