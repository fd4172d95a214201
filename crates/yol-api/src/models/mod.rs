//! Wire models shared by the API and its client

pub mod client;
pub mod dashboard;
pub mod envelope;
pub mod folder;
pub mod folder_detail;
pub mod iso;
pub mod task;
pub mod user;

pub use client::*;
pub use dashboard::*;
pub use envelope::*;
pub use folder::*;
pub use folder_detail::*;
pub use task::*;
pub use user::*;
