//! YOL mock server
//!
//! Serves the in-memory YOL API for local frontend development.

mod config;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use axum::{extract::State, http::HeaderValue, response::Json, routing::get, Router};
use clap::Parser;
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yol_api::ApiState;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "yol-server", version, about = "Mock REST backend for the YOL dashboard")]
struct Cli {
    /// TOML configuration file; environment variables are used when absent
    #[arg(short, long, env = "YOL_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long)]
    host: Option<String>,

    #[arg(short, long)]
    port: Option<u16>,

    /// Seed for a reproducible dataset
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if cli.seed.is_some() {
        config.mock.seed = cli.seed;
    }

    init_tracing(&config);
    info!("Starting YOL mock server on {}:{}", config.host, config.port);

    let state = ApiState::generate(config.mock.clone());
    let (folders, tasks, users, clients) = state.store.counts().await;
    info!(folders, tasks, users, clients, seed = ?config.mock.seed, "Generated mock dataset");

    let app = build_router(state, &config);

    let addr = SocketAddr::new(config.host.parse()?, config.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "yol_server=info,yol_api=info,tower_http=debug".into());
    let json = config.json_logs();

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins()
        .into_iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

fn build_router(state: ApiState, config: &Config) -> Router {
    let public_routes = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .with_state(state.clone());

    Router::new()
        .merge(public_routes)
        .merge(yol_api::routes::router(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
}

async fn root() -> &'static str {
    "YOL Mock API"
}

async fn health_check(State(state): State<ApiState>) -> Json<Value> {
    let (folders, tasks, users, clients) = state.store.counts().await;
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "folders": folders,
        "tasks": tasks,
        "users": users,
        "clients": clients
    }))
}
