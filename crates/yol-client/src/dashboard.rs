//! Dashboard and chart widget queries

use serde::de::DeserializeOwned;
use serde::Serialize;
use yol_api::models::{
    ActiveFolders, Activity, ActivityCounter, ApiResponse, AreaSlice, ClientBirthday,
    DashboardStats, DeadlineCategory, FavoriteClient, FavoriteFolderCard, RequestPoint,
    UrgentTask,
};

use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::params::QueryParams;
use crate::resource::track;
use crate::state::QueryKey;

#[derive(Debug, Clone)]
pub struct DashboardApi {
    client: ApiClient,
}

impl DashboardApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn fetch<T: Serialize + DeserializeOwned>(&self, name: &str, path: &str) -> ClientResult<T> {
        let params = QueryParams::new();
        track(
            &self.client,
            QueryKey::new(["dashboard", name]),
            self.client.get(path, &params),
        )
        .await
    }

    async fn fetch_data<T: Serialize + DeserializeOwned>(&self, name: &str, path: &str) -> ClientResult<T> {
        let response: ApiResponse<T> = self.fetch(name, path).await?;
        Ok(response.data)
    }

    pub async fn stats(&self) -> ClientResult<DashboardStats> {
        self.fetch_data("stats", "/dashboard/stats").await
    }

    pub async fn favorite_folders(&self) -> ClientResult<Vec<FavoriteFolderCard>> {
        self.fetch_data("favorite-folders", "/dashboard/favorite-folders")
            .await
    }

    pub async fn urgent_tasks(&self) -> ClientResult<Vec<UrgentTask>> {
        self.fetch_data("urgent-tasks", "/dashboard/urgent-tasks").await
    }

    pub async fn recent_activity(&self) -> ClientResult<Vec<Activity>> {
        self.fetch_data("recent-activity", "/dashboard/recent-activity")
            .await
    }

    pub async fn birthdays(&self) -> ClientResult<Vec<ClientBirthday>> {
        self.fetch_data("birthdays", "/dashboard/birthdays").await
    }

    pub async fn favorite_clients(&self) -> ClientResult<Vec<FavoriteClient>> {
        self.fetch("favorite-clients", "/dashboard/favorite-clients")
            .await
    }

    pub async fn active_folders(&self) -> ClientResult<ActiveFolders> {
        self.fetch("active-folders", "/dashboard/active-folders").await
    }

    pub async fn area_division(&self) -> ClientResult<Vec<AreaSlice>> {
        self.fetch("area-division", "/area-division").await
    }

    pub async fn folder_activity(&self) -> ClientResult<Vec<ActivityCounter>> {
        self.fetch("folder-activity", "/folder-activity").await
    }

    pub async fn requests(&self) -> ClientResult<Vec<RequestPoint>> {
        self.fetch("requests", "/requests").await
    }

    pub async fn hearings(&self) -> ClientResult<Vec<DeadlineCategory>> {
        self.fetch("hearings", "/hearings").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FetchState;
    use crate::test_support::spawn_server;

    #[tokio::test]
    async fn test_widgets_decode_and_cache() {
        let client = spawn_server().await;
        let dashboard = DashboardApi::new(client.clone());

        let stats = dashboard.stats().await.unwrap();
        assert_eq!(stats.folders.total, 26);
        assert_eq!(stats.tasks.total, 20);

        assert!(dashboard.favorite_folders().await.unwrap().len() <= 5);
        assert!(dashboard.urgent_tasks().await.unwrap().len() <= 10);
        assert_eq!(dashboard.folder_activity().await.unwrap().len(), 4);
        assert_eq!(dashboard.hearings().await.unwrap().len(), 3);
        assert!(dashboard.favorite_clients().await.unwrap().len() <= 6);
        dashboard.active_folders().await.unwrap();
        dashboard.area_division().await.unwrap();
        dashboard.requests().await.unwrap();
        dashboard.recent_activity().await.unwrap();
        dashboard.birthdays().await.unwrap();

        let cached: FetchState<ApiResponse<DashboardStats>> = client
            .cache()
            .typed(&QueryKey::new(["dashboard", "stats"]))
            .await;
        assert_eq!(cached.data().map(|r| r.data.folders.total), Some(26));
    }
}
