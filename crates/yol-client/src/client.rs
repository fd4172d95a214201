//! HTTP transport shared by every API wrapper

use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;
use yol_api::models::ErrorResponse;

use crate::error::{ClientError, ClientResult, UNKNOWN_ERROR};
use crate::params::QueryParams;
use crate::state::QueryCache;

/// HTTP client for the YOL API
///
/// Clones share the bearer token and the query cache.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
    cache: Arc<QueryCache>,
}

impl ApiClient {
    /// `base_url` includes the `/api` prefix, e.g. `http://localhost:3333/api`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
            cache: Arc::new(QueryCache::new()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    pub async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Create a request with optional bearer authentication
    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self.http.request(method, self.url(path));
        if let Some(token) = self.token().await {
            req = req.bearer_auth(token);
        }
        req
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, params: &QueryParams) -> ClientResult<T> {
        let req = self.request(Method::GET, path).await.query(&params.to_pairs());
        decode(execute(req).await?).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.request(Method::POST, path).await.json(body);
        decode(execute(req).await?).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.request(Method::PUT, path).await.json(body);
        decode(execute(req).await?).await
    }

    pub async fn patch<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let req = self.request(Method::PATCH, path).await;
        decode(execute(req).await?).await
    }

    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let req = self.request(Method::DELETE, path).await;
        execute(req).await?;
        Ok(())
    }
}

async fn execute(req: RequestBuilder) -> ClientResult<Response> {
    let response = req.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ErrorResponse>()
        .await
        .ok()
        .and_then(|body| body.errors.into_iter().next())
        .map(|detail| detail.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
    debug!(status = status.as_u16(), %message, "API request failed");
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};
    use yol_api::models::{ApiResponse, Folder, PaginatedResponse};

    use crate::error::ClientError;
    use crate::params::QueryParams;
    use crate::test_support::spawn_server;

    #[tokio::test]
    async fn test_get_with_params() {
        let client = spawn_server().await;
        let page: PaginatedResponse<Folder> = client
            .get("/folders", &QueryParams::new().page(2).per_page(10).search(""))
            .await
            .unwrap();
        assert_eq!(page.meta.current_page, 2);
        assert_eq!(page.meta.per_page, 10);
        assert_eq!(page.data.len(), 10);
    }

    #[tokio::test]
    async fn test_error_envelope_message() {
        let client = spawn_server().await;
        let err = client
            .get::<ApiResponse<Folder>>("/folders/9999", &QueryParams::new())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ClientError::Api {
                status: 404,
                message: "Folder not found".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_unknown_route_falls_back() {
        let client = spawn_server().await;
        let err = client
            .get::<Value>("/does-not-exist", &QueryParams::new())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ClientError::Api {
                status: 404,
                message: "Erro desconhecido".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_validation_error_message() {
        let client = spawn_server().await;
        let err = client
            .post::<_, Value>("/folders", &json!([1, 2, 3]))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
    }
}
