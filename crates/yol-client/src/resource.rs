//! Cached CRUD access to one REST collection

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use yol_api::models::{ApiResponse, PaginatedResponse};

use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::params::QueryParams;
use crate::state::{FetchState, QueryKey};

/// CRUD wrapper over `/{base}` that records every read in the query cache
///
/// Successful writes invalidate the keys they make stale: create and delete
/// drop `[base, "list"]`, update also drops `[base, "get", id]`.
#[derive(Debug, Clone)]
pub struct ResourceApi<T> {
    client: ApiClient,
    base: &'static str,
    _record: PhantomData<fn() -> T>,
}

impl<T> ResourceApi<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(client: ApiClient, base: &'static str) -> Self {
        Self {
            client,
            base,
            _record: PhantomData,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn base(&self) -> &'static str {
        self.base
    }

    pub fn list_prefix(&self) -> QueryKey {
        QueryKey::new([self.base, "list"])
    }

    pub fn list_key(&self, params: &QueryParams) -> QueryKey {
        self.list_prefix().with(params.cache_segment())
    }

    pub fn get_key(&self, id: u64) -> QueryKey {
        QueryKey::new([self.base, "get"]).with(id.to_string())
    }

    fn path(&self) -> String {
        format!("/{}", self.base)
    }

    fn item_path(&self, id: u64) -> String {
        format!("/{}/{}", self.base, id)
    }

    pub async fn list(&self, params: &QueryParams) -> ClientResult<PaginatedResponse<T>> {
        let path = self.path();
        track(&self.client, self.list_key(params), self.client.get(&path, params)).await
    }

    pub async fn get(&self, id: u64) -> ClientResult<T> {
        let path = self.item_path(id);
        let params = QueryParams::new();
        let response: ApiResponse<T> =
            track(&self.client, self.get_key(id), self.client.get(&path, &params)).await?;
        Ok(response.data)
    }

    pub async fn create<B: Serialize + ?Sized>(&self, body: &B) -> ClientResult<T> {
        let response: ApiResponse<T> = self.client.post(&self.path(), body).await?;
        self.client.cache().invalidate(&self.list_prefix()).await;
        Ok(response.data)
    }

    pub async fn update<B: Serialize + ?Sized>(&self, id: u64, body: &B) -> ClientResult<T> {
        let response: ApiResponse<T> = self.client.put(&self.item_path(id), body).await?;
        self.client.cache().invalidate(&self.get_key(id)).await;
        self.client.cache().invalidate(&self.list_prefix()).await;
        Ok(response.data)
    }

    pub async fn delete(&self, id: u64) -> ClientResult<()> {
        self.client.delete(&self.item_path(id)).await?;
        self.client.cache().invalidate(&self.list_prefix()).await;
        Ok(())
    }

    /// Cached state of a list query
    pub async fn list_state(&self, params: &QueryParams) -> FetchState<PaginatedResponse<T>> {
        self.client.cache().typed(&self.list_key(params)).await
    }

    /// Cached state of a single record
    pub async fn get_state(&self, id: u64) -> FetchState<T> {
        self.client
            .cache()
            .typed::<ApiResponse<T>>(&self.get_key(id))
            .await
            .map(|response| response.data)
    }
}

/// Record `Loading`, then the outcome of `fetch`, under `key`
pub async fn track<R: Serialize>(
    client: &ApiClient,
    key: QueryKey,
    fetch: impl std::future::Future<Output = ClientResult<R>>,
) -> ClientResult<R> {
    let cache = client.cache();
    cache.set(key.clone(), FetchState::Loading).await;
    match fetch.await {
        Ok(data) => {
            let value = serde_json::to_value(&data).unwrap_or(Value::Null);
            cache.set(key, FetchState::Success(value)).await;
            Ok(data)
        }
        Err(err) => {
            cache.set(key, FetchState::Error(err.clone())).await;
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use yol_api::models::User;

    use super::*;
    use crate::test_support::spawn_server;

    #[tokio::test]
    async fn test_reads_are_cached() {
        let client = spawn_server().await;
        let users: ResourceApi<User> = ResourceApi::new(client, "users");

        let params = QueryParams::new().per_page(5);
        assert_eq!(users.list_state(&params).await, FetchState::Idle);
        let page = users.list(&params).await.unwrap();
        assert_eq!(page.data.len(), 5);
        let cached = users.list_state(&params).await;
        assert_eq!(cached.data().map(|p| p.meta.total), Some(page.meta.total));

        let user = users.get(2).await.unwrap();
        assert_eq!(user.full_name, "Dr. João Benício");
        assert_eq!(users.get_state(2).await.data().map(|u| u.id), Some(2));

        assert!(users.get(4040).await.is_err());
        assert!(users.get_state(4040).await.is_error());
    }

    #[tokio::test]
    async fn test_writes_invalidate() {
        let client = spawn_server().await;
        let users: ResourceApi<User> = ResourceApi::new(client.clone(), "users");
        let params = QueryParams::new();

        users.list(&params).await.unwrap();
        users.get(3).await.unwrap();
        users.get(4).await.unwrap();

        let created = users
            .create(&json!({"full_name": "Paula Reis", "email": "paula.reis@benicio.com.br"}))
            .await
            .unwrap();
        assert_eq!(created.username, "paula.reis");
        assert_eq!(users.list_state(&params).await, FetchState::Idle);
        assert!(users.get_state(3).await.data().is_some());

        users.list(&params).await.unwrap();
        let updated = users
            .update(3, &json!({"phone": "(11) 90000-0000"}))
            .await
            .unwrap();
        assert_eq!(updated.phone.as_deref(), Some("(11) 90000-0000"));
        assert_eq!(users.get_state(3).await, FetchState::Idle);
        assert_eq!(users.list_state(&params).await, FetchState::Idle);
        assert!(users.get_state(4).await.data().is_some());

        users.list(&params).await.unwrap();
        users.delete(created.id).await.unwrap();
        assert_eq!(users.list_state(&params).await, FetchState::Idle);
        assert!(users.get(created.id).await.unwrap_err().is_not_found());
    }
}
