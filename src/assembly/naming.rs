//! Part-name normalization shared by grouping and catalog lookup.

use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| pattern(r"\s+"));
static HYPHEN: LazyLock<Regex> = LazyLock::new(|| pattern(r"\s*-\s*"));
static COMMA: LazyLock<Regex> = LazyLock::new(|| pattern(r"\s*,\s*"));
static REPEATED_HYPHENS: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?:\s-\s){2,}"));
static PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| pattern(r"[.,]"));
static TRAILING_HYPHENS: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?:\s-\s)+$"));
static TRAILING_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| pattern(r"[\s-]+$"));
static TRAILING_DIGITS: LazyLock<Regex> = LazyLock::new(|| pattern(r"\d+$"));
static TRAILING_NUMBER_TOKEN: LazyLock<Regex> = LazyLock::new(|| pattern(r"^(.*\S)[\s-]+\d+$"));

fn pattern(source: &str) -> Regex {
    match Regex::new(source) {
        Ok(regex) => regex,
        Err(error) => panic!("invalid name pattern {source:?}: {error}"),
    }
}

/// Cleans an exported node name for display and grouping: underscores become
/// spaces, hyphens and commas get canonical spacing (`" - "`, `", "`),
/// whitespace runs collapse and the ends are trimmed.
pub fn normalize_part_name(raw: &str) -> String {
    let spaced = raw.replace('_', " ");
    let spaced = HYPHEN.replace_all(&spaced, " - ");
    let spaced = COMMA.replace_all(&spaced, ", ");
    WHITESPACE.replace_all(&spaced, " ").trim().to_string()
}

/// Strict lookup key: the display name without `.`/`,`, trailing separators
/// removed, lowercased.
pub fn normalize_match_key(raw: &str) -> String {
    let name = normalize_part_name(raw);
    let key = REPEATED_HYPHENS.replace_all(&name, " - ");
    let key = PUNCTUATION.replace_all(&key, "");
    let key = WHITESPACE.replace_all(&key, " ");
    strip_trailing_separators(&key).trim().to_lowercase()
}

/// Loose lookup key: the strict key with trailing numeric suffixes removed,
/// so `bolt m8 - 12` and `bolt m8 - 12, 3` both become `bolt m8`.
///
/// Whole numeric tokens are dropped first; digits glued to the last word
/// (`nut3`) are only stripped when no such token existed. The first token is
/// never removed.
pub fn normalize_match_key_loose(raw: &str) -> String {
    let mut key = normalize_match_key(raw);
    let mut dropped_token = false;
    loop {
        let Some(prefix) = TRAILING_NUMBER_TOKEN
            .captures(&key)
            .and_then(|captures| captures.get(1))
            .map(|prefix| strip_trailing_separators(prefix.as_str()))
            .filter(|prefix| !prefix.is_empty())
        else {
            break;
        };
        key = prefix;
        dropped_token = true;
    }

    if !dropped_token {
        let unglued = strip_trailing_separators(&TRAILING_DIGITS.replace(&key, ""));
        if !unglued.is_empty() {
            key = unglued;
        }
    }
    key.trim().to_string()
}

fn strip_trailing_separators(value: &str) -> String {
    let value = TRAILING_HYPHENS.replace(value, "");
    TRAILING_SEPARATORS.replace(&value, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_names_get_canonical_spacing() {
        assert_eq!(normalize_part_name("Bolt_M8 - 12"), "Bolt M8 - 12");
        assert_eq!(normalize_part_name("  Bolt_M8-12,3 "), "Bolt M8 - 12, 3");
        assert_eq!(normalize_part_name("Shaft__Main\t\tRear"), "Shaft Main Rear");
        assert_eq!(normalize_part_name("a--b"), "a - - b");
        assert_eq!(normalize_part_name("a -, b"), "a -, b");
        assert_eq!(normalize_part_name("-Cap"), "- Cap");
        assert_eq!(normalize_part_name(""), "");
    }

    #[test]
    fn strict_key_drops_punctuation_and_trailing_separators() {
        assert_eq!(normalize_match_key("Bolt_M8 - 12"), "bolt m8 - 12");
        assert_eq!(normalize_match_key("Bolt_M8 - 12, 3"), "bolt m8 - 12 3");
        assert_eq!(normalize_match_key("Housing v1.2 -"), "housing v12");
        assert_eq!(normalize_match_key("Cover - -"), "cover");
    }

    #[test]
    fn loose_keys_ignore_numeric_suffixes() {
        assert_eq!(normalize_match_key_loose("Bolt_M8 - 12"), "bolt m8");
        assert_eq!(normalize_match_key_loose("Bolt_M8 - 12, 3"), "bolt m8");
        assert_eq!(normalize_match_key_loose("Gear_3"), "gear");
        assert_eq!(normalize_match_key_loose("Nut3"), "nut");
        assert_eq!(normalize_match_key_loose("Rotor"), "rotor");
    }

    #[test]
    fn loose_key_keeps_first_token() {
        assert_eq!(normalize_match_key_loose("123"), "123");
        assert_eq!(normalize_match_key_loose("42 - 7"), "42");
        assert_eq!(normalize_match_key_loose("-5"), "- 5");
        assert_eq!(normalize_match_key_loose(""), "");
    }
}
