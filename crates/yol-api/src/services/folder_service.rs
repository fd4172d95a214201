//! Folder service - listing, registration and favorites for legal folders

use chrono::{Datelike, Utc};
use serde_json::{json, Map, Value};
use tracing::debug;

use super::merge::{build_record, merge_record, timestamp};
use super::percentage;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    AreaBreakdown, FavoriteFolder, Folder, FolderArea, FolderDetail, FolderStats, FolderStatus,
    PaginatedResponse, StatusBreakdown,
};
use crate::query::{
    apply_filters, apply_sorting, contains_ci, paginate, parse_id, parse_instant, FilterSet,
    ListParams,
};
use crate::store::MockStore;

const RESOURCE: &str = "Folder";
const CODE_OFFSET: usize = 1001;
const RECENT_COUNT: usize = 5;

/// Predicates behind `GET /folders` query filters
pub fn folder_filters() -> FilterSet<Folder> {
    FilterSet::<Folder>::new()
        .with("search", |folder, value| {
            contains_ci(&folder.code, value)
                || contains_ci(&folder.title, value)
                || contains_ci(&folder.client.name, value)
                || folder
                    .case_number
                    .as_deref()
                    .is_some_and(|number| contains_ci(number, value))
        })
        .with("status", |folder, value| folder.status.as_str() == value)
        .with("area", |folder, value| folder.area.as_str() == value)
        .with("client_id", |folder, value| {
            parse_id(value) == Some(folder.client.id)
        })
        .with("responsible_id", |folder, value| {
            parse_id(value) == Some(folder.responsible_lawyer.id)
        })
        .with("is_favorite", |folder, value| {
            folder.is_favorite == (value == "true")
        })
        .with("date_from", |folder, value| {
            parse_instant(value).is_some_and(|from| folder.created_at >= from)
        })
        .with("date_to", |folder, value| {
            parse_instant(value).is_some_and(|to| folder.created_at <= to)
        })
}

/// Folder service
pub struct FolderService;

impl FolderService {
    pub fn new() -> Self {
        Self
    }

    /// Filter, sort and paginate folders
    pub async fn list(
        &self,
        store: &MockStore,
        params: &ListParams,
        base_url: &str,
    ) -> ApiResult<PaginatedResponse<Folder>> {
        let snapshot = store.folders.read().await.snapshot();
        let filtered = apply_filters(snapshot, &params.filters, &folder_filters());
        let sorted = apply_sorting(filtered, params.sort_by.as_deref(), params.order);
        debug!(
            matched = sorted.len(),
            page = params.page,
            per_page = params.per_page,
            "Listed folders"
        );
        Ok(paginate(sorted, params.page, params.per_page, base_url))
    }

    pub async fn get(&self, store: &MockStore, id: u64) -> ApiResult<Folder> {
        store
            .folders
            .read()
            .await
            .find(id)
            .cloned()
            .ok_or_else(|| ApiError::not_found(RESOURCE))
    }

    /// Register a folder from a partial body
    pub async fn create(&self, store: &MockStore, body: Value) -> ApiResult<Folder> {
        let now = Utc::now();
        let mut folders = store.folders.write().await;

        let id = folders.next_id();
        let mut synthesized = Map::new();
        synthesized.insert("id".into(), json!(id));
        synthesized.insert(
            "code".into(),
            json!(format!("{}/{}", folders.len() + CODE_OFFSET, now.year())),
        );
        synthesized.insert("documents_count".into(), json!(0));
        synthesized.insert("tasks_count".into(), json!(0));
        synthesized.insert("hearings_count".into(), json!(0));
        synthesized.insert("is_favorite".into(), json!(false));
        synthesized.insert("created_at".into(), timestamp(now));
        synthesized.insert("updated_at".into(), timestamp(now));

        let folder: Folder = build_record(body, synthesized)?;
        folders.insert(folder.clone());
        debug!(folder_id = folder.id, code = %folder.code, "Created folder");
        Ok(folder)
    }

    pub async fn update(&self, store: &MockStore, id: u64, body: Value) -> ApiResult<Folder> {
        let mut folders = store.folders.write().await;
        let current = folders.find(id).ok_or_else(|| ApiError::not_found(RESOURCE))?;
        let updated: Folder = merge_record(current, body, id, Utc::now())?;
        folders.replace(updated.clone());
        debug!(folder_id = id, "Updated folder");
        Ok(updated)
    }

    /// Flip `is_favorite`
    pub async fn toggle_favorite(&self, store: &MockStore, id: u64) -> ApiResult<Folder> {
        let mut folders = store.folders.write().await;
        let folder = folders
            .find_mut(id)
            .ok_or_else(|| ApiError::not_found(RESOURCE))?;
        folder.is_favorite = !folder.is_favorite;
        folder.updated_at = Utc::now();
        debug!(folder_id = id, is_favorite = folder.is_favorite, "Toggled favorite");
        Ok(folder.clone())
    }

    pub async fn delete(&self, store: &MockStore, id: u64) -> ApiResult<()> {
        if store.folders.write().await.remove(id).is_none() {
            return Err(ApiError::not_found(RESOURCE));
        }
        debug!(folder_id = id, "Deleted folder");
        Ok(())
    }

    /// Status and area breakdown, favorites count and the newest folders
    pub async fn stats(&self, store: &MockStore) -> ApiResult<FolderStats> {
        let folders = store.folders.read().await;
        let all = folders.all();
        let total = all.len() as u64;

        let mut recent: Vec<Folder> = all.to_vec();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(RECENT_COUNT);

        Ok(FolderStats {
            total,
            by_status: status_breakdown(all),
            by_area: area_breakdown(all),
            favorites: all.iter().filter(|f| f.is_favorite).count() as u64,
            recent,
        })
    }

    /// Favorites as widget rows
    pub async fn favorites(&self, store: &MockStore) -> ApiResult<Vec<FavoriteFolder>> {
        let folders = store.folders.read().await;
        Ok(folders
            .all()
            .iter()
            .filter(|folder| folder.is_favorite)
            .map(|folder| FavoriteFolder {
                id: folder.id,
                name: folder.responsible_lawyer.full_name.clone(),
                count: folder.documents_count,
            })
            .collect())
    }

    /// Consultation projection of one folder
    pub async fn consultation(&self, store: &MockStore, id: u64) -> ApiResult<FolderDetail> {
        let folders = store.folders.read().await;
        folders
            .find(id)
            .map(FolderDetail::from)
            .ok_or_else(|| ApiError::not_found(RESOURCE))
    }
}

impl Default for FolderService {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn status_breakdown(folders: &[Folder]) -> Vec<StatusBreakdown> {
    let total = folders.len() as u64;
    FolderStatus::ALL
        .into_iter()
        .map(|status| {
            let count = folders.iter().filter(|f| f.status == status).count() as u64;
            StatusBreakdown {
                status,
                count,
                percentage: percentage(count, total),
            }
        })
        .collect()
}

pub(crate) fn area_breakdown(folders: &[Folder]) -> Vec<AreaBreakdown> {
    let total = folders.len() as u64;
    FolderArea::ALL
        .into_iter()
        .map(|area| {
            let count = folders.iter().filter(|f| f.area == area).count() as u64;
            AreaBreakdown {
                area,
                count,
                percentage: percentage(count, total),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockConfig;

    fn store() -> MockStore {
        MockStore::generate(&MockConfig {
            folders: 30,
            tasks: 10,
            users: 6,
            clients: 5,
            seed: Some(7),
            ..MockConfig::default()
        })
    }

    #[tokio::test]
    async fn test_list_filters_and_paginates() {
        let store = store();
        let service = FolderService::new();
        let params = ListParams::from_query(Some("status=active&per_page=5&sort_by=id&order=desc"));
        let page = service.list(&store, &params, "/api/folders").await.unwrap();
        assert!(page.data.len() <= 5);
        assert!(page.data.iter().all(|f| f.status == FolderStatus::Active));
        assert!(page.data.windows(2).all(|w| w[0].id > w[1].id));
    }

    #[tokio::test]
    async fn test_search_matches_client_name() {
        let store = store();
        let service = FolderService::new();
        let name = store.folders.read().await.all()[0].client.name.to_uppercase();
        let params = ListParams::from_pairs([("search", name.as_str()), ("per_page", "100")]);
        let page = service.list(&store, &params, "/api/folders").await.unwrap();
        assert!(!page.data.is_empty());
        assert!(page
            .data
            .iter()
            .all(|f| contains_ci(&f.client.name, &name)
                || contains_ci(&f.title, &name)
                || contains_ci(&f.code, &name)));
    }

    #[tokio::test]
    async fn test_create_synthesizes_fields() {
        let store = store();
        let service = FolderService::new();
        let template = service.get(&store, 1).await.unwrap();
        let body = json!({
            "title": "Ação de Cobrança - Teste",
            "status": "active",
            "area": "labor",
            "client": template.client,
            "responsible_lawyer": template.responsible_lawyer,
            "is_favorite": true,
            "id": 5
        });
        let created = service.create(&store, body).await.unwrap();
        assert_eq!(created.id, 1831);
        assert_eq!(created.code, format!("{}/{}", 31 + 1001, Utc::now().year()));
        assert!(!created.is_favorite);
        assert_eq!(created.documents_count, 0);
        assert_eq!(service.get(&store, 1831).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_create_rejects_incomplete_body() {
        let store = store();
        let err = FolderService::new()
            .create(&store, json!({"title": "Sem cliente"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_merges_and_pins_id() {
        let store = store();
        let service = FolderService::new();
        let updated = service
            .update(&store, 3, json!({"title": "Novo título", "id": 999}))
            .await
            .unwrap();
        assert_eq!(updated.id, 3);
        assert_eq!(updated.title, "Novo título");
        assert!(service.get(&store, 999).await.is_err());

        let missing = service.update(&store, 404, json!({})).await.unwrap_err();
        assert!(matches!(missing, ApiError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_toggle_favorite_twice_restores() {
        let store = store();
        let service = FolderService::new();
        let before = service.get(&store, 2).await.unwrap().is_favorite;
        assert_eq!(service.toggle_favorite(&store, 2).await.unwrap().is_favorite, !before);
        assert_eq!(service.toggle_favorite(&store, 2).await.unwrap().is_favorite, before);
        assert!(service.toggle_favorite(&store, 9999).await.is_err());
    }

    #[tokio::test]
    async fn test_delete() {
        let store = store();
        let service = FolderService::new();
        service.delete(&store, 4).await.unwrap();
        assert!(service.get(&store, 4).await.is_err());
        assert!(service.delete(&store, 4).await.is_err());
    }

    #[tokio::test]
    async fn test_stats_sum_to_total() {
        let store = store();
        let stats = FolderService::new().stats(&store).await.unwrap();
        assert_eq!(stats.total, 31);
        assert_eq!(stats.by_status.iter().map(|s| s.count).sum::<u64>(), 31);
        assert_eq!(stats.by_area.len(), 12);
        assert_eq!(stats.recent.len(), 5);
        assert!(stats.recent.windows(2).all(|w| w[0].created_at >= w[1].created_at));
        let pct: f64 = stats.by_status.iter().map(|s| s.percentage).sum();
        assert!((pct - 100.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_consultation_projection() {
        let store = store();
        let service = FolderService::new();
        let detail = service.consultation(&store, 1830).await.unwrap();
        assert_eq!(detail.id, "1830");
        assert!(["Ativo", "Suspenso", "Encerrado", "Arquivado"].contains(&detail.status.as_str()));
        assert!(service.consultation(&store, 0).await.is_err());
    }
}
