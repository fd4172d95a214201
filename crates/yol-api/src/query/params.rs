//! Query-string parsing for list endpoints

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::{form_urlencoded, Url};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Keys consumed by the pipeline itself; everything else is a filter
const RESERVED_KEYS: [&str; 4] = ["page", "per_page", "sort_by", "order"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// `asc` (or nothing) is ascending, any other value descends
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() || raw == "asc" {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed list request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub page: u32,
    pub per_page: u32,
    pub sort_by: Option<String>,
    pub order: SortOrder,
    pub search: Option<String>,
    /// Every non-reserved key, `search` included
    pub filters: BTreeMap<String, String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            sort_by: None,
            order: SortOrder::Asc,
            search: None,
            filters: BTreeMap::new(),
        }
    }
}

impl ListParams {
    pub fn from_url(url: &Url) -> Self {
        Self::from_pairs(url.query_pairs())
    }

    /// Parse a raw query string (without the leading `?`)
    pub fn from_query(query: Option<&str>) -> Self {
        match query {
            Some(query) => Self::from_pairs(form_urlencoded::parse(query.as_bytes())),
            None => Self::default(),
        }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut reserved: BTreeMap<&'static str, String> = BTreeMap::new();
        let mut filters = BTreeMap::new();

        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            match RESERVED_KEYS.iter().find(|reserved_key| **reserved_key == key) {
                Some(reserved_key) => {
                    reserved
                        .entry(*reserved_key)
                        .or_insert_with(|| value.to_string());
                }
                None => {
                    filters.insert(key.to_string(), value.to_string());
                }
            }
        }

        let page = reserved
            .get("page")
            .and_then(|raw| parse_positive(raw))
            .unwrap_or(DEFAULT_PAGE);
        let per_page = reserved
            .get("per_page")
            .and_then(|raw| parse_positive(raw))
            .unwrap_or(DEFAULT_PER_PAGE);
        let sort_by = reserved
            .get("sort_by")
            .filter(|raw| !raw.is_empty())
            .cloned();
        let order = reserved
            .get("order")
            .map(|raw| SortOrder::parse(raw))
            .unwrap_or_default();
        let search = filters
            .get("search")
            .filter(|raw| !raw.is_empty())
            .cloned();

        Self {
            page,
            per_page,
            sort_by,
            order,
            search,
            filters,
        }
    }

    /// Fill in `sort_by` when the request did not name one
    pub fn with_default_sort(mut self, field: &str) -> Self {
        if self.sort_by.is_none() {
            self.sort_by = Some(field.to_string());
        }
        self
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }
}

/// Whole numbers ≥ 1; anything else falls back to the caller's default
fn parse_positive(raw: &str) -> Option<u32> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() || value < 1.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return None;
    }
    Some(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_query() {
        let params = ListParams::from_query(None);
        assert_eq!(params, ListParams::default());
        assert_eq!(params.page, 1);
        assert_eq!(params.per_page, 10);
        assert_eq!(params.order, SortOrder::Asc);
    }

    #[test]
    fn test_reserved_keys_are_split_from_filters() {
        let params = ListParams::from_query(Some(
            "page=2&per_page=25&sort_by=created_at&order=desc&search=silva&status=active",
        ));
        assert_eq!(params.page, 2);
        assert_eq!(params.per_page, 25);
        assert_eq!(params.sort_by.as_deref(), Some("created_at"));
        assert_eq!(params.order, SortOrder::Desc);
        assert_eq!(params.search.as_deref(), Some("silva"));
        assert_eq!(params.filter("search"), Some("silva"));
        assert_eq!(params.filter("status"), Some("active"));
        assert!(params.filter("page").is_none());
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        for raw in ["0", "-3", "abc", "", "2.5", "NaN", "Infinity"] {
            let params = ListParams::from_pairs([("page", raw), ("per_page", raw)]);
            assert_eq!(params.page, DEFAULT_PAGE, "page={}", raw);
            assert_eq!(params.per_page, DEFAULT_PER_PAGE, "per_page={}", raw);
        }
        assert_eq!(ListParams::from_pairs([("page", "3.0")]).page, 3);
    }

    #[test]
    fn test_repeated_keys() {
        let params = ListParams::from_query(Some("page=2&page=5&status=active&status=archived"));
        assert_eq!(params.page, 2);
        assert_eq!(params.filter("status"), Some("archived"));
    }

    #[test]
    fn test_order_and_sort_edge_cases() {
        let params = ListParams::from_query(Some("sort_by=&order=DESC"));
        assert!(params.sort_by.is_none());
        assert_eq!(params.order, SortOrder::Desc);
        assert_eq!(SortOrder::parse("whatever"), SortOrder::Desc);
        assert_eq!(SortOrder::parse(""), SortOrder::Asc);
    }

    #[test]
    fn test_from_url_decodes_values() {
        let url = Url::parse("http://localhost/api/folders?search=Jo%C3%A3o+Silva").unwrap();
        let params = ListParams::from_url(&url);
        assert_eq!(params.search.as_deref(), Some("João Silva"));
    }

    #[test]
    fn test_default_sort_only_when_missing() {
        let params = ListParams::from_query(Some("sort_by=title")).with_default_sort("due_date");
        assert_eq!(params.sort_by.as_deref(), Some("title"));
        let params = ListParams::default().with_default_sort("due_date");
        assert_eq!(params.sort_by.as_deref(), Some("due_date"));
    }
}
