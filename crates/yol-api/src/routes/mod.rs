//! HTTP routes, all mounted under `/api`

pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod folders;
pub mod tasks;
pub mod users;

use std::sync::Arc;

use axum::Router;

use crate::config::MockConfig;
use crate::error::{ApiError, ApiResult};
use crate::query::parse_id;
use crate::store::MockStore;

/// Shared state for every API route
#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<MockStore>,
    pub config: Arc<MockConfig>,
}

impl ApiState {
    pub fn new(store: MockStore, config: MockConfig) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }

    /// Generate a dataset from `config` and wrap it
    pub fn generate(config: MockConfig) -> Self {
        let store = MockStore::generate(&config);
        Self::new(store, config)
    }
}

/// API routes without the `/api` prefix
pub fn configure(state: ApiState) -> Router {
    Router::new()
        .merge(auth::routes(state.clone()))
        .merge(folders::routes(state.clone()))
        .merge(tasks::routes(state.clone()))
        .merge(users::routes(state.clone()))
        .merge(clients::routes(state.clone()))
        .merge(dashboard::routes(state))
}

/// Complete API router, nested under `/api`
pub fn router(state: ApiState) -> Router {
    Router::new().nest("/api", configure(state))
}

/// Path ids that are not numbers cannot match any record
pub(crate) fn path_id(raw: &str, resource: &'static str) -> ApiResult<u64> {
    parse_id(raw).ok_or(ApiError::NotFound { resource })
}
