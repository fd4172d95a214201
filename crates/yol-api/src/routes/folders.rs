//! Folder HTTP routes

use axum::{
    extract::{rejection::JsonRejection, Path, RawQuery, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde_json::Value;

use super::{path_id, ApiState};
use crate::error::ApiResult;
use crate::models::{
    ApiResponse, FavoriteFolder, Folder, FolderDetail, FolderStats, PaginatedResponse,
};
use crate::query::ListParams;
use crate::services::FolderService;

const BASE_URL: &str = "/api/folders";
const RESOURCE: &str = "Folder";

pub fn routes(state: ApiState) -> Router {
    Router::new()
        .route("/folders", get(list_folders).post(create_folder))
        .route("/folders/stats", get(folder_stats))
        .route("/folders/favorites", get(favorite_folders))
        .route("/folders/consultation/{id}", get(consult_folder))
        .route(
            "/folders/{id}",
            get(get_folder).put(update_folder).delete(delete_folder),
        )
        .route("/folders/{id}/favorite", patch(toggle_favorite))
        .with_state(state)
}

async fn list_folders(
    State(state): State<ApiState>,
    RawQuery(query): RawQuery,
) -> ApiResult<Json<PaginatedResponse<Folder>>> {
    let params = ListParams::from_query(query.as_deref());
    let page = FolderService::new()
        .list(&state.store, &params, BASE_URL)
        .await?;
    Ok(Json(page))
}

async fn get_folder(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Folder>>> {
    let id = path_id(&id, RESOURCE)?;
    let folder = FolderService::new().get(&state.store, id).await?;
    Ok(Json(ApiResponse::new(folder)))
}

async fn create_folder(
    State(state): State<ApiState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Folder>>)> {
    let Json(body) = body?;
    let folder = FolderService::new().create(&state.store, body).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(folder))))
}

async fn update_folder(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<Folder>>> {
    let id = path_id(&id, RESOURCE)?;
    let Json(body) = body?;
    let folder = FolderService::new().update(&state.store, id, body).await?;
    Ok(Json(ApiResponse::new(folder)))
}

async fn toggle_favorite(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Folder>>> {
    let id = path_id(&id, RESOURCE)?;
    let folder = FolderService::new().toggle_favorite(&state.store, id).await?;
    Ok(Json(ApiResponse::new(folder)))
}

async fn delete_folder(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = path_id(&id, RESOURCE)?;
    FolderService::new().delete(&state.store, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn folder_stats(State(state): State<ApiState>) -> ApiResult<Json<ApiResponse<FolderStats>>> {
    let stats = FolderService::new().stats(&state.store).await?;
    Ok(Json(ApiResponse::new(stats)))
}

async fn favorite_folders(
    State(state): State<ApiState>,
) -> ApiResult<Json<ApiResponse<Vec<FavoriteFolder>>>> {
    let favorites = FolderService::new().favorites(&state.store).await?;
    Ok(Json(ApiResponse::new(favorites)))
}

async fn consult_folder(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<FolderDetail>>> {
    let id = path_id(&id, RESOURCE)?;
    let detail = FolderService::new().consultation(&state.store, id).await?;
    Ok(Json(ApiResponse::new(detail)))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::routes::test_support::{app, send};

    #[tokio::test]
    async fn test_list_envelope() {
        let (app, _) = app();
        let (status, body) = send(&app, Method::GET, "/api/folders?page=2&per_page=15", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meta"]["total"], 41);
        assert_eq!(body["meta"]["last_page"], 3);
        assert_eq!(body["meta"]["current_page"], 2);
        assert_eq!(body["meta"]["next_page_url"], "/api/folders?page=3");
        assert_eq!(body["meta"]["previous_page_url"], "/api/folders?page=1");
        assert_eq!(body["data"].as_array().unwrap().len(), 15);
    }

    #[tokio::test]
    async fn test_page_beyond_last_is_empty() {
        let (app, _) = app();
        let (status, body) = send(&app, Method::GET, "/api/folders?page=99", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"].as_array().unwrap().is_empty());
        assert_eq!(body["meta"]["current_page"], 99);
        assert!(body["meta"]["next_page_url"].is_null());
    }

    #[tokio::test]
    async fn test_get_and_missing_folder() {
        let (app, _) = app();
        let (status, body) = send(&app, Method::GET, "/api/folders/1830", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], 1830);

        let (status, body) = send(&app, Method::GET, "/api/folders/77777", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"errors": [{"message": "Folder not found"}]}));

        let (status, _) = send(&app, Method::GET, "/api/folders/abc", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_toggle_favorite_flips_flag() {
        let (app, state) = app();
        let before = state.store.folders.read().await.find(5).unwrap().is_favorite;

        let (status, body) = send(&app, Method::PATCH, "/api/folders/5/favorite", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["is_favorite"], !before);
        assert_eq!(
            state.store.folders.read().await.find(5).unwrap().is_favorite,
            !before
        );

        let (status, body) = send(&app, Method::PATCH, "/api/folders/424242/favorite", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["errors"][0]["message"], "Folder not found");
    }

    #[tokio::test]
    async fn test_create_update_delete_cycle() {
        let (app, _) = app();
        let (_, existing) = send(&app, Method::GET, "/api/folders/1", None).await;
        let body = json!({
            "title": "Ação de Despejo - Teste",
            "status": "pending",
            "area": "real_estate",
            "client": existing["data"]["client"],
            "responsible_lawyer": existing["data"]["responsible_lawyer"]
        });

        let (status, created) = send(&app, Method::POST, "/api/folders", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["data"]["id"].as_u64().unwrap();
        assert_eq!(id, 1831);
        assert_eq!(created["data"]["is_favorite"], false);

        let uri = format!("/api/folders/{}", id);
        let (status, updated) =
            send(&app, Method::PUT, &uri, Some(json!({"status": "archived"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["data"]["status"], "archived");
        assert_eq!(updated["data"]["title"], "Ação de Despejo - Teste");

        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_body_is_validation_error() {
        let (app, _) = app();
        let (status, body) =
            send(&app, Method::POST, "/api/folders", Some(json!({"title": "Incompleta"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["rule"], "validation");
    }

    #[tokio::test]
    async fn test_filters_and_sorting() {
        let (app, _) = app();
        let (_, body) = send(
            &app,
            Method::GET,
            "/api/folders?status=active&sort_by=created_at&order=desc&per_page=100",
            None,
        )
        .await;
        let data = body["data"].as_array().unwrap();
        assert!(data.iter().all(|f| f["status"] == "active"));
        let dates: Vec<&str> = data.iter().map(|f| f["created_at"].as_str().unwrap()).collect();
        assert!(dates.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test]
    async fn test_static_segments_before_ids() {
        let (app, _) = app();
        let (status, body) = send(&app, Method::GET, "/api/folders/stats", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total"], 41);

        let (status, body) = send(&app, Method::GET, "/api/folders/favorites", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"].is_array());

        let (status, body) = send(&app, Method::GET, "/api/folders/consultation/1830", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], "1830");
        assert!(body["data"]["processNumber"].is_string());
    }
}
