//! Dashboard and chart widget routes
//!
//! Everything here is recomputed from the store on each request.

use axum::{extract::State, routing::get, Json, Router};

use super::ApiState;
use crate::error::ApiResult;
use crate::models::{
    Activity, ActiveFolders, ActivityCounter, ApiResponse, AreaSlice, BirthdayPerson,
    ClientBirthday, DashboardStats, DeadlineCategory, FavoriteClient, FavoriteFolderCard,
    RequestPoint, UrgentTask,
};
use crate::services::DashboardService;

pub fn routes(state: ApiState) -> Router {
    Router::new()
        .route("/dashboard/stats", get(stats))
        .route("/dashboard/favorite-folders", get(favorite_folders))
        .route("/dashboard/urgent-tasks", get(urgent_tasks))
        .route("/dashboard/recent-activity", get(recent_activity))
        .route("/dashboard/birthdays", get(client_birthdays))
        .route("/dashboard/favorite-clients", get(favorite_clients))
        .route("/dashboard/active-folders", get(active_folders))
        .route("/area-division", get(area_division))
        .route("/folder-activity", get(folder_activity))
        .route("/requests", get(requests))
        .route("/hearings", get(hearings))
        .route("/birthdays", get(birthday_people))
        .with_state(state)
}

async fn stats(State(state): State<ApiState>) -> ApiResult<Json<ApiResponse<DashboardStats>>> {
    let stats = DashboardService::new().stats(&state.store).await?;
    Ok(Json(ApiResponse::new(stats)))
}

async fn favorite_folders(
    State(state): State<ApiState>,
) -> ApiResult<Json<ApiResponse<Vec<FavoriteFolderCard>>>> {
    let folders = DashboardService::new().favorite_folders(&state.store).await?;
    Ok(Json(ApiResponse::new(folders)))
}

async fn urgent_tasks(
    State(state): State<ApiState>,
) -> ApiResult<Json<ApiResponse<Vec<UrgentTask>>>> {
    let tasks = DashboardService::new().urgent_tasks(&state.store).await?;
    Ok(Json(ApiResponse::new(tasks)))
}

async fn recent_activity(
    State(state): State<ApiState>,
) -> ApiResult<Json<ApiResponse<Vec<Activity>>>> {
    let activity = DashboardService::new().recent_activity(&state.store).await?;
    Ok(Json(ApiResponse::new(activity)))
}

async fn client_birthdays(
    State(state): State<ApiState>,
) -> ApiResult<Json<ApiResponse<Vec<ClientBirthday>>>> {
    let birthdays = DashboardService::new().birthdays(&state.store).await?;
    Ok(Json(ApiResponse::new(birthdays)))
}

async fn favorite_clients(State(state): State<ApiState>) -> ApiResult<Json<Vec<FavoriteClient>>> {
    Ok(Json(
        DashboardService::new().favorite_clients(&state.store).await?,
    ))
}

async fn active_folders(State(state): State<ApiState>) -> ApiResult<Json<ActiveFolders>> {
    Ok(Json(DashboardService::new().active_folders(&state.store).await?))
}

async fn area_division(State(state): State<ApiState>) -> ApiResult<Json<Vec<AreaSlice>>> {
    Ok(Json(DashboardService::new().area_division(&state.store).await?))
}

async fn folder_activity(State(state): State<ApiState>) -> ApiResult<Json<Vec<ActivityCounter>>> {
    Ok(Json(
        DashboardService::new().folder_activity(&state.store).await?,
    ))
}

async fn requests() -> Json<Vec<RequestPoint>> {
    Json(DashboardService::new().requests())
}

async fn hearings() -> Json<Vec<DeadlineCategory>> {
    Json(DashboardService::new().hearings())
}

async fn birthday_people() -> Json<Vec<BirthdayPerson>> {
    Json(DashboardService::new().birthday_people())
}
