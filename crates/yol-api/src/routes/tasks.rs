//! Task HTTP routes

use axum::{
    extract::{rejection::JsonRejection, Path, RawQuery, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde_json::Value;

use super::{path_id, ApiState};
use crate::error::ApiResult;
use crate::models::{ApiResponse, PaginatedResponse, Task, TaskDashboard};
use crate::query::ListParams;
use crate::services::TaskService;

const BASE_URL: &str = "/api/tasks";
const RESOURCE: &str = "Task";

pub fn routes(state: ApiState) -> Router {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/dashboard", get(task_dashboard))
        .route(
            "/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/tasks/{id}/complete", patch(complete_task))
        .with_state(state)
}

async fn list_tasks(
    State(state): State<ApiState>,
    RawQuery(query): RawQuery,
) -> ApiResult<Json<PaginatedResponse<Task>>> {
    let params = ListParams::from_query(query.as_deref());
    let page = TaskService::new()
        .list(&state.store, &params, BASE_URL)
        .await?;
    Ok(Json(page))
}

async fn get_task(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Task>>> {
    let id = path_id(&id, RESOURCE)?;
    let task = TaskService::new().get(&state.store, id).await?;
    Ok(Json(ApiResponse::new(task)))
}

async fn create_task(
    State(state): State<ApiState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Task>>)> {
    let Json(body) = body?;
    let task = TaskService::new().create(&state.store, body).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(task))))
}

async fn update_task(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<Task>>> {
    let id = path_id(&id, RESOURCE)?;
    let Json(body) = body?;
    let task = TaskService::new().update(&state.store, id, body).await?;
    Ok(Json(ApiResponse::new(task)))
}

async fn complete_task(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Task>>> {
    let id = path_id(&id, RESOURCE)?;
    let task = TaskService::new().complete(&state.store, id).await?;
    Ok(Json(ApiResponse::new(task)))
}

async fn delete_task(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = path_id(&id, RESOURCE)?;
    TaskService::new().delete(&state.store, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn task_dashboard(State(state): State<ApiState>) -> ApiResult<Json<ApiResponse<TaskDashboard>>> {
    let dashboard = TaskService::new().dashboard(&state.store).await?;
    Ok(Json(ApiResponse::new(dashboard)))
}
