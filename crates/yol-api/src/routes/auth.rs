//! Mock authentication routes

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};

use super::ApiState;
use crate::error::ApiResult;
use crate::models::{
    ApiResponse, AuthenticatedUser, ForgotPasswordRequest, LoginRequest, MessageBody,
    RefreshedToken, ResetPasswordRequest, User,
};
use crate::services::AuthService;

pub fn routes(state: ApiState) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/sign-in", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
        .route("/auth/refresh", post(refresh))
        .route("/auth/forgot-password", post(forgot_password))
        .route("/auth/reset-password", post(reset_password))
        .with_state(state)
}

/// Unreadable bodies fall through to the credential check and fail there
async fn login(
    State(state): State<ApiState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<AuthenticatedUser>> {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let user = AuthService::new().login(&state.store, &state.config, &request)?;
    Ok(Json(user))
}

async fn logout() -> Json<ApiResponse<MessageBody>> {
    Json(ApiResponse::new(AuthService::new().logout()))
}

async fn me(State(state): State<ApiState>) -> Json<ApiResponse<User>> {
    Json(ApiResponse::new(AuthService::new().me(&state.store)))
}

async fn refresh() -> Json<ApiResponse<RefreshedToken>> {
    Json(ApiResponse::new(AuthService::new().refresh()))
}

async fn forgot_password(
    body: Result<Json<ForgotPasswordRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<MessageBody>>> {
    let Json(request) = body?;
    Ok(Json(ApiResponse::new(
        AuthService::new().forgot_password(&request),
    )))
}

async fn reset_password(
    State(state): State<ApiState>,
    body: Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<MessageBody>>> {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let message = AuthService::new().reset_password(&state.config, &request)?;
    Ok(Json(ApiResponse::new(message)))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::routes::test_support::{app, send};

    #[tokio::test]
    async fn test_login_success() {
        let (app, _) = app();
        let credentials = json!({"email": "test@benicio.com.br", "password": "benicio123"});
        for uri in ["/api/auth/login", "/api/sign-in"] {
            let (status, body) = send(&app, Method::POST, uri, Some(credentials.clone())).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["id"], 2);
            assert_eq!(body["full_name"], "Dr. João Benício");
            assert_eq!(body["metadata"]["email_verified"], true);
            assert!(body["roles"].is_array());
            assert!(body["auth"]["access_token"]
                .as_str()
                .unwrap()
                .starts_with("yol_access_"));
            assert!(body["auth"]["refresh_token"].is_string());
        }
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let (app, _) = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            Some(json!({"email": "test@benicio.com.br", "password": "wrong"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body,
            json!({"errors": [{"message": "E-mail ou senha inválidos", "field": "email", "rule": "auth"}]})
        );

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/sign-in",
            Some(json!({"email": "test@benicio.com.br"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, Method::POST, "/api/auth/login", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_session_endpoints() {
        let (app, _) = app();
        let (status, body) = send(&app, Method::POST, "/api/auth/logout", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["message"], "Logout successful");

        let (_, body) = send(&app, Method::GET, "/api/auth/me", None).await;
        assert_eq!(body["data"]["email"], "joao@benicio.com.br");

        let (_, body) = send(&app, Method::POST, "/api/auth/refresh", None).await;
        assert!(body["data"]["token"].as_str().unwrap().starts_with("yol_access_"));
    }

    #[tokio::test]
    async fn test_password_reset_flow() {
        let (app, _) = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/forgot-password",
            Some(json!({"email": "ana@benicio.com.br"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"]["message"]
            .as_str()
            .unwrap()
            .contains("ana@benicio.com.br"));

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/reset-password",
            Some(json!({"token": "valid-reset-token", "password": "nova-senha"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["message"], "Password reset successfully");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/reset-password",
            Some(json!({"token": "expired", "password": "nova-senha"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"errors": [{"message": "Invalid or expired token", "field": "token", "rule": "invalid"}]})
        );
    }
}
