//! YOL mock API
//!
//! In-process REST backend for the YOL legal-office dashboard. The whole
//! dataset is generated at startup and lives in memory until the process exits.
//!
//! # Features
//! - Folder (legal case) listing, lookup, registration, update, favorites and deletion
//! - Task, user and client listings with filtering, sorting and pagination
//! - Dashboard aggregates recomputed from the in-memory set on every request
//! - Mock authentication against a single configured credential pair

pub mod config;
pub mod error;
pub mod generators;
pub mod models;
pub mod query;
pub mod routes;
pub mod services;
pub mod store;

pub use config::MockConfig;
pub use error::{ApiError, ApiResult};
pub use routes::ApiState;
pub use store::MockStore;
