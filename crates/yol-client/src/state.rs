//! Fetch state machine and the keyed query cache

use std::collections::HashMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::ClientError;

/// Lifecycle of one query
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState<T> {
    #[default]
    Idle,
    Loading,
    Success(T),
    Error(ClientError),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FetchState::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ClientError> {
        match self {
            FetchState::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchState<U> {
        match self {
            FetchState::Idle => FetchState::Idle,
            FetchState::Loading => FetchState::Loading,
            FetchState::Success(data) => FetchState::Success(f(data)),
            FetchState::Error(err) => FetchState::Error(err),
        }
    }
}

/// Cache key: an ordered list of segments such as `["folders", "get", "7"]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn with(mut self, segment: impl Into<String>) -> Self {
        self.0.push(segment.into());
        self
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

/// Shared store of fetch states, kept as JSON so one cache serves every resource
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: RwLock<HashMap<QueryKey, FetchState<Value>>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of `key`; unknown keys are idle
    pub async fn state(&self, key: &QueryKey) -> FetchState<Value> {
        self.entries
            .read()
            .await
            .get(key)
            .cloned()
            .unwrap_or_default()
    }

    /// Typed view of a cached entry; entries that no longer decode read as idle
    pub async fn typed<T: DeserializeOwned>(&self, key: &QueryKey) -> FetchState<T> {
        match self.state(key).await {
            FetchState::Idle => FetchState::Idle,
            FetchState::Loading => FetchState::Loading,
            FetchState::Success(value) => serde_json::from_value(value)
                .map(FetchState::Success)
                .unwrap_or_default(),
            FetchState::Error(err) => FetchState::Error(err),
        }
    }

    pub async fn set(&self, key: QueryKey, state: FetchState<Value>) {
        self.entries.write().await.insert(key, state);
    }

    pub async fn contains(&self, key: &QueryKey) -> bool {
        self.entries.read().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Drop every entry whose key starts with `prefix`, returning how many went
    pub async fn invalidate(&self, prefix: &QueryKey) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        let dropped = before - entries.len();
        tracing::debug!(prefix = %prefix, dropped, "Invalidated cached queries");
        dropped
    }

    /// Rewrite the data of every successful entry under `prefix` in place
    pub async fn update_where(&self, prefix: &QueryKey, mut f: impl FnMut(&mut Value)) {
        let mut entries = self.entries.write().await;
        for (_, state) in entries.iter_mut().filter(|(key, _)| key.starts_with(prefix)) {
            if let FetchState::Success(value) = state {
                f(value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fetch_state_accessors() {
        let idle: FetchState<u32> = FetchState::default();
        assert!(!idle.is_loading());
        assert_eq!(idle.data(), None);

        assert!(FetchState::<u32>::Loading.is_loading());

        let done = FetchState::Success(3u32).map(|n| n * 2);
        assert_eq!(done.data(), Some(&6));

        let failed: FetchState<u32> = FetchState::Error(ClientError::Transport("down".into()));
        assert!(failed.is_error());
        assert!(failed.error().is_some());
        assert_eq!(failed.data(), None);
    }

    #[test]
    fn test_key_prefixes() {
        let key = QueryKey::new(["folders", "get"]).with("7");
        assert!(key.starts_with(&QueryKey::new(["folders"])));
        assert!(key.starts_with(&QueryKey::new(["folders", "get", "7"])));
        assert!(!key.starts_with(&QueryKey::new(["folders", "list"])));
        assert!(!QueryKey::new(["folders"]).starts_with(&key));
        assert_eq!(key.to_string(), "[folders, get, 7]");
    }

    #[tokio::test]
    async fn test_invalidate_by_prefix() {
        let cache = QueryCache::new();
        cache
            .set(QueryKey::new(["folders", "list", "page=1"]), FetchState::Success(json!([])))
            .await;
        cache
            .set(QueryKey::new(["folders", "list", "page=2"]), FetchState::Loading)
            .await;
        cache
            .set(QueryKey::new(["folders", "get", "1"]), FetchState::Success(json!({"id": 1})))
            .await;
        cache
            .set(QueryKey::new(["tasks", "list"]), FetchState::Success(json!([])))
            .await;

        let dropped = cache.invalidate(&QueryKey::new(["folders", "list"])).await;
        assert_eq!(dropped, 2);
        assert_eq!(cache.len().await, 2);
        assert!(cache.contains(&QueryKey::new(["folders", "get", "1"])).await);
        assert_eq!(
            cache.state(&QueryKey::new(["folders", "list", "page=1"])).await,
            FetchState::Idle
        );
    }

    #[tokio::test]
    async fn test_update_where_touches_successes_only() {
        let cache = QueryCache::new();
        let list = QueryKey::new(["folders", "list", "page=1"]);
        cache.set(list.clone(), FetchState::Success(json!({"n": 1}))).await;
        cache
            .set(QueryKey::new(["folders", "list", "page=2"]), FetchState::Loading)
            .await;

        cache
            .update_where(&QueryKey::new(["folders"]), |value| value["n"] = json!(2))
            .await;

        assert_eq!(cache.state(&list).await.data(), Some(&json!({"n": 2})));
        let typed: FetchState<HashMap<String, u32>> = cache.typed(&list).await;
        assert_eq!(typed.data().and_then(|m| m.get("n")), Some(&2));
    }
}
