//! User service

use chrono::Utc;
use serde_json::{json, Map, Value};
use tracing::debug;
use url::form_urlencoded;

use super::merge::{build_record, merge_record, timestamp};
use crate::error::{ApiError, ApiResult};
use crate::models::{PaginatedResponse, User};
use crate::query::{apply_filters, apply_sorting, contains_ci, paginate, FilterSet, ListParams};
use crate::store::MockStore;

const RESOURCE: &str = "User";

pub fn user_filters() -> FilterSet<User> {
    FilterSet::<User>::new()
        .with("search", |user, value| {
            contains_ci(&user.full_name, value)
                || contains_ci(&user.email, value)
                || contains_ci(&user.username, value)
        })
        .with("role", |user, value| {
            user.roles.iter().any(|role| role.slug.as_str() == value)
        })
}

/// Initials avatar rendered by ui-avatars.com
pub fn initials_avatar(full_name: &str) -> String {
    let name: String = form_urlencoded::byte_serialize(full_name.as_bytes()).collect();
    format!("https://ui-avatars.com/api/?name={}&background=random", name)
}

/// User service
pub struct UserService;

impl UserService {
    pub fn new() -> Self {
        Self
    }

    pub async fn list(
        &self,
        store: &MockStore,
        params: &ListParams,
        base_url: &str,
    ) -> ApiResult<PaginatedResponse<User>> {
        let snapshot = store.users.read().await.snapshot();
        let filtered = apply_filters(snapshot, &params.filters, &user_filters());
        let sorted = apply_sorting(filtered, params.sort_by.as_deref(), params.order);
        debug!(matched = sorted.len(), page = params.page, "Listed users");
        Ok(paginate(sorted, params.page, params.per_page, base_url))
    }

    pub async fn get(&self, store: &MockStore, id: u64) -> ApiResult<User> {
        store
            .users
            .read()
            .await
            .find(id)
            .cloned()
            .ok_or_else(|| ApiError::not_found(RESOURCE))
    }

    /// Register a user; id, avatar and missing username are derived server-side
    pub async fn create(&self, store: &MockStore, body: Value) -> ApiResult<User> {
        let now = Utc::now();
        let mut users = store.users.write().await;

        let full_name = body
            .get("full_name")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let mut synthesized = Map::new();
        synthesized.insert("id".into(), json!(users.next_id()));
        synthesized.insert("avatar_url".into(), json!(initials_avatar(full_name)));
        synthesized.insert("created_at".into(), timestamp(now));
        synthesized.insert("updated_at".into(), timestamp(now));

        let has_username = body
            .get("username")
            .and_then(Value::as_str)
            .is_some_and(|username| !username.is_empty());
        if !has_username {
            let email = body.get("email").and_then(Value::as_str).unwrap_or_default();
            let prefix = email.split('@').next().unwrap_or_default();
            synthesized.insert("username".into(), json!(prefix));
        }

        let user: User = build_record(body, synthesized)?;
        users.insert(user.clone());
        debug!(user_id = user.id, "Created user");
        Ok(user)
    }

    pub async fn update(&self, store: &MockStore, id: u64, body: Value) -> ApiResult<User> {
        let mut users = store.users.write().await;
        let current = users.find(id).ok_or_else(|| ApiError::not_found(RESOURCE))?;
        let updated: User = merge_record(current, body, id, Utc::now())?;
        users.replace(updated.clone());
        debug!(user_id = id, "Updated user");
        Ok(updated)
    }

    pub async fn delete(&self, store: &MockStore, id: u64) -> ApiResult<()> {
        if store.users.write().await.remove(id).is_none() {
            return Err(ApiError::not_found(RESOURCE));
        }
        debug!(user_id = id, "Deleted user");
        Ok(())
    }
}

impl Default for UserService {
    fn default() -> Self {
        Self::new()
    }
}
