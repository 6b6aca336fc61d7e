pub mod auth;
pub mod json;

pub use auth::{require_permission, PermissionGuard};
pub use json::JsonBody;
