//! User HTTP routes

use axum::{
    extract::{rejection::JsonRejection, Path, RawQuery, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use super::{path_id, ApiState};
use crate::error::ApiResult;
use crate::models::{ApiResponse, PaginatedResponse, User};
use crate::query::ListParams;
use crate::services::UserService;

const BASE_URL: &str = "/api/users";
const RESOURCE: &str = "User";

pub fn routes(state: ApiState) -> Router {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .with_state(state)
}

async fn list_users(
    State(state): State<ApiState>,
    RawQuery(query): RawQuery,
) -> ApiResult<Json<PaginatedResponse<User>>> {
    let params = ListParams::from_query(query.as_deref());
    let page = UserService::new()
        .list(&state.store, &params, BASE_URL)
        .await?;
    Ok(Json(page))
}

async fn get_user(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<User>>> {
    let id = path_id(&id, RESOURCE)?;
    let user = UserService::new().get(&state.store, id).await?;
    Ok(Json(ApiResponse::new(user)))
}

async fn create_user(
    State(state): State<ApiState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<User>>)> {
    let Json(body) = body?;
    let user = UserService::new().create(&state.store, body).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(user))))
}

async fn update_user(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<User>>> {
    let id = path_id(&id, RESOURCE)?;
    let Json(body) = body?;
    let user = UserService::new().update(&state.store, id, body).await?;
    Ok(Json(ApiResponse::new(user)))
}

async fn delete_user(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = path_id(&id, RESOURCE)?;
    UserService::new().delete(&state.store, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
