//! List query builder

use std::collections::BTreeMap;

use yol_api::query::SortOrder;

/// Page, sort, search and filter parameters for a list request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub sort_by: Option<String>,
    pub order: Option<SortOrder>,
    pub search: Option<String>,
    pub filters: BTreeMap<String, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>) -> Self {
        self.sort_by = Some(field.into());
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Fill every unset field from `defaults`; filters set here win
    pub fn or(mut self, defaults: &QueryParams) -> Self {
        self.page = self.page.or(defaults.page);
        self.per_page = self.per_page.or(defaults.per_page);
        self.sort_by = self.sort_by.or_else(|| defaults.sort_by.clone());
        self.order = self.order.or(defaults.order);
        self.search = self.search.or_else(|| defaults.search.clone());
        for (key, value) in &defaults.filters {
            self.filters
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        self
    }

    /// Query-string pairs, empty values left out
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let mut push = |key: &str, value: String| {
            if !value.is_empty() {
                pairs.push((key.to_string(), value));
            }
        };

        if let Some(page) = self.page {
            push("page", page.to_string());
        }
        if let Some(per_page) = self.per_page {
            push("per_page", per_page.to_string());
        }
        if let Some(sort_by) = &self.sort_by {
            push("sort_by", sort_by.clone());
        }
        if let Some(order) = self.order {
            push("order", order.to_string());
        }
        if let Some(search) = &self.search {
            push("search", search.clone());
        }
        for (key, value) in &self.filters {
            push(key, value.clone());
        }
        pairs
    }

    /// Stable cache-key segment for these parameters
    pub fn cache_segment(&self) -> String {
        self.to_pairs()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&")
    }
}
