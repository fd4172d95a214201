//! Folder queries, including the favorite toggle and consultation list

use std::ops::Deref;

use serde_json::{json, Value};
use yol_api::models::{ApiResponse, Folder, FolderDetail, FolderStats, PaginatedResponse};
use yol_api::query::SortOrder;

use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::params::QueryParams;
use crate::resource::{track, ResourceApi};
use crate::state::{FetchState, QueryKey};

const BASE: &str = "folders";

/// Folder API: the generic CRUD surface plus folder-only endpoints
#[derive(Debug, Clone)]
pub struct FolderApi {
    resource: ResourceApi<Folder>,
}

impl Deref for FolderApi {
    type Target = ResourceApi<Folder>;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}

/// Defaults of the consultation screen: ten newest folders first
pub fn consultation_defaults() -> QueryParams {
    QueryParams::new()
        .page(1)
        .per_page(10)
        .sort_by("created_at")
        .order(SortOrder::Desc)
}

impl FolderApi {
    pub fn new(client: ApiClient) -> Self {
        Self {
            resource: ResourceApi::new(client, BASE),
        }
    }

    /// Flip the favorite flag and swap the returned record into every cached copy
    pub async fn toggle_favorite(&self, id: u64) -> ClientResult<Folder> {
        let response: ApiResponse<Folder> = self
            .client()
            .patch(&format!("/{}/{}/favorite", BASE, id))
            .await?;
        let folder = response.data;
        let record = serde_json::to_value(&folder)?;

        let cache = self.client().cache();
        cache
            .update_where(&self.list_prefix(), |page| {
                if let Some(items) = page.get_mut("data").and_then(Value::as_array_mut) {
                    items
                        .iter_mut()
                        .filter(|item| item["id"] == json!(id))
                        .for_each(|item| *item = record.clone());
                }
            })
            .await;
        cache
            .update_where(&self.get_key(id), |entry| {
                entry["data"] = record.clone();
            })
            .await;

        Ok(folder)
    }

    pub async fn stats(&self) -> ClientResult<FolderStats> {
        let key = QueryKey::new([BASE, "stats"]);
        let params = QueryParams::new();
        let response: ApiResponse<FolderStats> = track(
            self.client(),
            key,
            self.client().get(&format!("/{}/stats", BASE), &params),
        )
        .await?;
        Ok(response.data)
    }

    /// Folder list with the consultation defaults; caller values win
    ///
    /// Pages are cached under the regular list key, so folder writes reach them.
    pub async fn consultation(&self, params: &QueryParams) -> ClientResult<PaginatedResponse<Folder>> {
        self.list(&params.clone().or(&consultation_defaults()))
            .await
    }

    pub async fn consultation_state(&self, params: &QueryParams) -> FetchState<PaginatedResponse<Folder>> {
        self.list_state(&params.clone().or(&consultation_defaults()))
            .await
    }

    /// Detail projection of one folder
    pub async fn detail(&self, id: u64) -> ClientResult<FolderDetail> {
        let key = QueryKey::new([BASE, "detail"]).with(id.to_string());
        let params = QueryParams::new();
        let response: ApiResponse<FolderDetail> = track(
            self.client(),
            key,
            self.client()
                .get(&format!("/{}/consultation/{}", BASE, id), &params),
        )
        .await?;
        Ok(response.data)
    }
}
