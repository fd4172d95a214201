//! Mock authentication
//!
//! A single configured credential pair logs in as the session lawyer.
//! Tokens are opaque and never checked by any other endpoint.

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::MockConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    AuthTokens, AuthenticatedUser, ForgotPasswordRequest, LoginRequest, MessageBody,
    RefreshedToken, ResetPasswordRequest, User,
};
use crate::store::MockStore;

fn opaque_token(kind: &str) -> String {
    format!("yol_{}_{}", kind, Uuid::new_v4().simple())
}

/// Auth service
pub struct AuthService;

impl AuthService {
    pub fn new() -> Self {
        Self
    }

    /// Exchange the configured credentials for the session user and tokens
    pub fn login(
        &self,
        store: &MockStore,
        config: &MockConfig,
        request: &LoginRequest,
    ) -> ApiResult<AuthenticatedUser> {
        if !config.accepts(&request.email, &request.password) {
            warn!(email = %request.email, "Rejected login attempt");
            return Err(ApiError::InvalidCredentials);
        }

        let now = Utc::now();
        let mut user = store.session_user.clone();
        user.metadata.email_verified = true;
        user.metadata.email_verified_at = Some(now);
        user.metadata.last_login_at = Some(now);
        user.updated_at = now;

        debug!(user_id = user.id, "Login succeeded");
        Ok(AuthenticatedUser {
            user,
            auth: AuthTokens {
                access_token: opaque_token("access"),
                refresh_token: opaque_token("refresh"),
            },
        })
    }

    pub fn logout(&self) -> MessageBody {
        MessageBody::new("Logout successful")
    }

    pub fn me(&self, store: &MockStore) -> User {
        store.session_user.clone()
    }

    pub fn refresh(&self) -> RefreshedToken {
        RefreshedToken {
            token: opaque_token("access"),
        }
    }

    pub fn forgot_password(&self, request: &ForgotPasswordRequest) -> MessageBody {
        debug!(email = %request.email, "Password reset requested");
        MessageBody::new(format!(
            "If {} is registered, you will receive password reset instructions.",
            request.email
        ))
    }

    pub fn reset_password(
        &self,
        config: &MockConfig,
        request: &ResetPasswordRequest,
    ) -> ApiResult<MessageBody> {
        if request.token != config.reset_token {
            warn!("Rejected password reset token");
            return Err(ApiError::InvalidToken);
        }
        Ok(MessageBody::new("Password reset successfully"))
    }
}

impl Default for AuthService {
    fn default() -> Self {
        Self::new()
    }
}
