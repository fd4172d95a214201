//! YOL API client
//!
//! Typed access to the YOL mock API with a shared query cache. Every
//! request records its [`FetchState`] under a [`QueryKey`], and writes
//! invalidate the keys they make stale.

pub mod auth;
pub mod client;
pub mod dashboard;
pub mod error;
pub mod folders;
pub mod params;
pub mod resource;
pub mod state;

pub use auth::AuthApi;
pub use client::ApiClient;
pub use dashboard::DashboardApi;
pub use error::{ClientError, ClientResult};
pub use folders::FolderApi;
pub use params::QueryParams;
pub use resource::ResourceApi;
pub use state::{FetchState, QueryCache, QueryKey};

#[cfg(test)]
pub(crate) mod test_support {
    use yol_api::{ApiState, MockConfig};

    use crate::ApiClient;

    /// Serve a small seeded dataset on an ephemeral port
    pub async fn spawn_server() -> ApiClient {
        let state = ApiState::generate(MockConfig {
            folders: 25,
            tasks: 20,
            users: 8,
            clients: 10,
            seed: Some(77),
            ..MockConfig::default()
        });
        let app = yol_api::routes::router(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        ApiClient::new(format!("http://{}/api", addr))
    }
}
