//! Issue-key parsing and ordering utilities.

use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;

static KEY_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Z0-9-]*-[0-9]+$").expect("valid key regex"));

/// Check that a key has the `PROJECT-NUMBER` shape.
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    KEY_FORMAT.is_match(key)
}

/// Project prefix of a key: everything before the last `-`.
///
/// Keys without a dash are their own project.
#[must_use]
pub fn project_of(key: &str) -> &str {
    key.rfind('-').map_or(key, |dash| &key[..dash])
}

/// Numeric suffix of a key, if it has one.
#[must_use]
pub fn issue_number(key: &str) -> Option<u64> {
    key.rfind('-')
        .and_then(|dash| key[dash + 1..].parse().ok())
}

/// Order keys by (project, issue number); non-numeric suffixes sort last
/// within their project.
#[must_use]
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    let left = (project_of(a), issue_number(a).is_none(), issue_number(a));
    let right = (project_of(b), issue_number(b).is_none(), issue_number(b));
    left.cmp(&right).then_with(|| a.cmp(b))
}

/// Sort keys into (project, number) order, dropping duplicates.
#[must_use]
pub fn sort_issue_keys(keys: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut keys: Vec<String> = keys.into_iter().collect();
    keys.sort_unstable();
    keys.dedup();
    keys.sort_by(|a, b| compare_keys(a, b));
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_format() {
        assert!(is_valid_key("AAH-1682"));
        assert!(is_valid_key("AAP2-9"));
        assert!(is_valid_key("AAP-RFE-12"));
        assert!(!is_valid_key("aah-1"));
        assert!(!is_valid_key("AAH"));
        assert!(!is_valid_key("AAH-"));
        assert!(!is_valid_key("AAH-12x"));
    }

    #[test]
    fn test_project_of() {
        assert_eq!(project_of("AAH-1682"), "AAH");
        assert_eq!(project_of("AAP-RFE-12"), "AAP-RFE");
        assert_eq!(project_of("NODASH"), "NODASH");
    }

    #[test]
    fn test_issue_number() {
        assert_eq!(issue_number("AAH-1682"), Some(1682));
        assert_eq!(issue_number("AAH-x"), None);
        assert_eq!(issue_number("NODASH"), None);
    }

    #[test]
    fn test_sort_is_numeric_not_lexicographic() {
        let keys = vec![
            "AAH-100".to_string(),
            "AAH-9".to_string(),
            "AAH-9".to_string(),
            "AAP-2".to_string(),
        ];
        let sorted = sort_issue_keys(keys);
        assert_eq!(sorted, vec!["AAH-9", "AAH-100", "AAP-2"]);
    }

    #[test]
    fn test_non_numeric_suffix_sorts_last() {
        let keys = vec!["AAH-abc".to_string(), "AAH-2".to_string()];
        let sorted = sort_issue_keys(keys);
        assert_eq!(sorted, vec!["AAH-2", "AAH-abc"]);
    }
}
