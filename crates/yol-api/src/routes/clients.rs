//! Client HTTP routes (read-only)

use axum::{
    extract::{Path, RawQuery, State},
    routing::get,
    Json, Router,
};

use super::{path_id, ApiState};
use crate::error::ApiResult;
use crate::models::{ApiResponse, Client, PaginatedResponse};
use crate::query::ListParams;
use crate::services::ClientService;

pub fn routes(state: ApiState) -> Router {
    Router::new()
        .route("/clients", get(list_clients))
        .route("/clients/{id}", get(get_client))
        .with_state(state)
}

async fn list_clients(
    State(state): State<ApiState>,
    RawQuery(query): RawQuery,
) -> ApiResult<Json<PaginatedResponse<Client>>> {
    let params = ListParams::from_query(query.as_deref());
    let page = ClientService::new()
        .list(&state.store, &params, "/api/clients")
        .await?;
    Ok(Json(page))
}

async fn get_client(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Client>>> {
    let id = path_id(&id, "Client")?;
    let client = ClientService::new().get(&state.store, id).await?;
    Ok(Json(ApiResponse::new(client)))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};

    use crate::routes::test_support::{app, send};

    #[tokio::test]
    async fn test_clients_routes() {
        let (app, _) = app();
        let (status, body) = send(&app, Method::GET, "/api/clients?type=individual&per_page=50", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"]
            .as_array()
            .unwrap()
            .iter()
            .all(|c| c["metadata"]["type"] == "individual"));

        let (status, body) = send(&app, Method::GET, "/api/clients/2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Empresa ABC Ltda");
    }
}
