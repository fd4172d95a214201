//! Named predicate tables applied to list query filters

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, Utc};

pub type Predicate<T> = fn(&T, &str) -> bool;

/// Filter registry for one resource
pub struct FilterSet<T> {
    predicates: HashMap<&'static str, Predicate<T>>,
}

impl<T> FilterSet<T> {
    pub fn new() -> Self {
        Self {
            predicates: HashMap::new(),
        }
    }

    pub fn with(mut self, name: &'static str, predicate: Predicate<T>) -> Self {
        self.predicates.insert(name, predicate);
        self
    }

    pub fn get(&self, name: &str) -> Option<Predicate<T>> {
        self.predicates.get(name).copied()
    }

    /// Whether `item` satisfies every filter in `filters`
    pub fn matches(&self, item: &T, filters: &BTreeMap<String, String>) -> bool {
        filters.iter().all(|(key, value)| {
            if is_pass_through(value) {
                return true;
            }
            match self.get(key) {
                Some(predicate) => predicate(item, value),
                None => true,
            }
        })
    }
}

impl<T> Default for FilterSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Empty and `all` values disable a filter
pub fn is_pass_through(value: &str) -> bool {
    value.is_empty() || value == "all"
}

pub fn apply_filters<T>(
    items: Vec<T>,
    filters: &BTreeMap<String, String>,
    set: &FilterSet<T>,
) -> Vec<T> {
    items
        .into_iter()
        .filter(|item| set.matches(item, filters))
        .collect()
}

/// Numeric id from a filter value or path segment
pub fn parse_id(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

/// RFC 3339 timestamp, or a bare `YYYY-MM-DD` date taken as midnight UTC
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Case-insensitive substring test
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u64,
        name: &'static str,
    }

    fn items() -> Vec<Item> {
        vec![
            Item { id: 1, name: "Alpha" },
            Item { id: 2, name: "Beta" },
            Item { id: 3, name: "alphabet" },
        ]
    }

    fn set() -> FilterSet<Item> {
        FilterSet::<Item>::new()
            .with("search", |item, value| contains_ci(item.name, value))
            .with("id", |item, value| parse_id(value) == Some(item.id))
    }

    fn filters(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_search_filter() {
        let kept = apply_filters(items(), &filters(&[("search", "ALPHA")]), &set());
        assert_eq!(kept.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_pass_through_and_unknown_keys() {
        let all = filters(&[("search", "all"), ("id", ""), ("unknown", "zzz")]);
        assert_eq!(apply_filters(items(), &all, &set()).len(), 3);
    }

    #[test]
    fn test_filters_combine_and_are_idempotent() {
        let f = filters(&[("search", "alpha"), ("id", "3")]);
        let once = apply_filters(items(), &f, &set());
        assert_eq!(once, vec![Item { id: 3, name: "alphabet" }]);
        let twice = apply_filters(once.clone(), &f, &set());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_parse_instant_formats() {
        let date = parse_instant("2025-03-01").unwrap();
        assert_eq!(date.to_rfc3339(), "2025-03-01T00:00:00+00:00");
        let ts = parse_instant("2025-03-01T10:00:00-03:00").unwrap();
        assert_eq!(ts.to_rfc3339(), "2025-03-01T13:00:00+00:00");
        assert!(parse_instant("yesterday").is_none());
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("-1"), None);
    }
}
