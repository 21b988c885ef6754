//! Nickname candidates embedded in a raw name string.
//!
//! Three independent non-greedy scans (parentheses, double quotes, single
//! quotes) whose captures are unioned. Captures are kept verbatim; empty
//! captures are dropped.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

static PARENTHESIZED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((.*?)\)").unwrap());
static DOUBLE_QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#""(.*?)""#).unwrap());
static SINGLE_QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r"'(.*?)'").unwrap());

/// Captures of one pattern, in scan order.
fn scan<'a>(pattern: &Regex, name: &'a str) -> Vec<&'a str> {
    pattern
        .captures_iter(name)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn parenthesized(name: &str) -> Vec<&str> {
    scan(&PARENTHESIZED, name)
}

pub fn double_quoted(name: &str) -> Vec<&str> {
    scan(&DOUBLE_QUOTED, name)
}

pub fn single_quoted(name: &str) -> Vec<&str> {
    scan(&SINGLE_QUOTED, name)
}

/// Union of all three scans.
pub fn extract_nicknames(name: &str) -> BTreeSet<&str> {
    parenthesized(name)
        .into_iter()
        .chain(double_quoted(name))
        .chain(single_quoted(name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_pattern_in_isolation() {
        assert_eq!(parenthesized("Robert (Bob) Smith"), vec!["Bob"]);
        assert_eq!(double_quoted(r#"Robert "Bobby" Smith"#), vec!["Bobby"]);
        assert_eq!(single_quoted("Robert 'Rob' Smith"), vec!["Rob"]);
    }

    #[test]
    fn non_greedy_multiple_matches() {
        assert_eq!(parenthesized("A (x) B (y)"), vec!["x", "y"]);
    }

    #[test]
    fn unbalanced_brackets_yield_nothing() {
        assert!(parenthesized("Robert (Bob Smith").is_empty());
        assert!(parenthesized("Robert Bob) Smith").is_empty());
        assert!(double_quoted(r#"Robert "Bob Smith"#).is_empty());
    }

    #[test]
    fn empty_captures_dropped() {
        assert!(parenthesized("Robert () Smith").is_empty());
        assert!(double_quoted(r#"Robert "" Smith"#).is_empty());
    }

    #[test]
    fn captures_not_trimmed() {
        assert_eq!(parenthesized("Robert ( Bob ) Smith"), vec![" Bob "]);
    }

    #[test]
    fn scans_are_independent() {
        // the apostrophe pair is found even though it sits inside parentheses
        let set = extract_nicknames("Mary ('Molly') O'Neil");
        assert!(set.contains("'Molly'"));
        assert!(set.contains("Molly"));
    }

    #[test]
    fn union_of_all_scans() {
        let set = extract_nicknames(r#"A (one) "two" 'three'"#);
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec!["one", "three", "two"]);
    }
}
