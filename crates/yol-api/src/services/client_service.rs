//! Client service (read-only)

use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::models::{Client, PaginatedResponse};
use crate::query::{apply_filters, apply_sorting, contains_ci, paginate, FilterSet, ListParams};
use crate::store::MockStore;

pub fn client_filters() -> FilterSet<Client> {
    FilterSet::<Client>::new()
        .with("search", |client, value| {
            contains_ci(&client.name, value)
                || contains_ci(&client.document, value)
                || client
                    .email
                    .as_deref()
                    .is_some_and(|email| contains_ci(email, value))
        })
        .with("type", |client, value| client.metadata.kind.as_str() == value)
}

/// Client service
pub struct ClientService;

impl ClientService {
    pub fn new() -> Self {
        Self
    }

    pub async fn list(
        &self,
        store: &MockStore,
        params: &ListParams,
        base_url: &str,
    ) -> ApiResult<PaginatedResponse<Client>> {
        let snapshot = store.clients.read().await.snapshot();
        let filtered = apply_filters(snapshot, &params.filters, &client_filters());
        let sorted = apply_sorting(filtered, params.sort_by.as_deref(), params.order);
        debug!(matched = sorted.len(), page = params.page, "Listed clients");
        Ok(paginate(sorted, params.page, params.per_page, base_url))
    }

    pub async fn get(&self, store: &MockStore, id: u64) -> ApiResult<Client> {
        store
            .clients
            .read()
            .await
            .find(id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Client"))
    }
}

impl Default for ClientService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockConfig;

    #[tokio::test]
    async fn test_type_filter_and_lookup() {
        let store = MockStore::generate(&MockConfig {
            folders: 1,
            tasks: 1,
            users: 3,
            clients: 25,
            seed: Some(2),
            ..MockConfig::default()
        });
        let service = ClientService::new();
        let params = ListParams::from_query(Some("type=company&per_page=100"));
        let page = service.list(&store, &params, "/api/clients").await.unwrap();
        assert!(page.data.iter().any(|c| c.name == "Empresa ABC Ltda"));
        assert!(page.data.iter().all(|c| c.is_company()));

        let params = ListParams::from_query(Some("search=123.456.789-00"));
        let page = service.list(&store, &params, "/api/clients").await.unwrap();
        assert_eq!(page.data[0].name, "João Silva");

        assert!(service.get(&store, 26).await.is_err());
    }
}
