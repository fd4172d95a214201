//! Login and session calls

use serde_json::json;
use yol_api::models::{ApiResponse, AuthenticatedUser, MessageBody, User};

use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::params::QueryParams;

#[derive(Debug, Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Log in and keep the access token for later requests
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthenticatedUser> {
        let user: AuthenticatedUser = self
            .client
            .post("/auth/login", &json!({"email": email, "password": password}))
            .await?;
        self.client
            .set_token(Some(user.auth.access_token.clone()))
            .await;
        Ok(user)
    }

    /// Drop the stored token along with everything cached under it
    pub async fn logout(&self) -> ClientResult<MessageBody> {
        let response: ApiResponse<MessageBody> =
            self.client.post("/auth/logout", &json!({})).await?;
        self.client.set_token(None).await;
        self.client.cache().clear().await;
        Ok(response.data)
    }

    pub async fn me(&self) -> ClientResult<User> {
        let response: ApiResponse<User> = self.client.get("/auth/me", &QueryParams::new()).await?;
        Ok(response.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_server;

    #[tokio::test]
    async fn test_login_stores_token() {
        let client = spawn_server().await;
        let auth = AuthApi::new(client.clone());

        let user = auth.login("test@benicio.com.br", "benicio123").await.unwrap();
        assert_eq!(user.user.email, "joao@benicio.com.br");
        assert_eq!(client.token().await, Some(user.auth.access_token.clone()));

        let me = auth.me().await.unwrap();
        assert_eq!(me.id, user.user.id);

        let message = auth.logout().await.unwrap();
        assert_eq!(message.message, "Logout successful");
        assert_eq!(client.token().await, None);
    }

    #[tokio::test]
    async fn test_rejected_login() {
        let client = spawn_server().await;
        let auth = AuthApi::new(client.clone());

        let err = auth.login("test@benicio.com.br", "errada").await.unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "E-mail ou senha inválidos");
        assert_eq!(client.token().await, None);
    }
}
