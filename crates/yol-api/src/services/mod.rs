//! Business logic over the in-memory store
//!
//! Services are stateless; every method takes the store it works on.

pub mod auth_service;
pub mod client_service;
pub mod dashboard_service;
pub mod folder_service;
pub mod merge;
pub mod task_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use client_service::ClientService;
pub use dashboard_service::DashboardService;
pub use folder_service::FolderService;
pub use task_service::TaskService;
pub use user_service::UserService;

/// Share of `count` in `total` as a percentage; 0 for an empty total
pub(crate) fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

pub(crate) fn count_where<T>(items: &[T], pred: impl Fn(&T) -> bool) -> u64 {
    items.iter().filter(|item| pred(item)).count() as u64
}
