//! Custom Axum extractors.

pub mod admin;
pub mod json;

pub use admin::AdminAccess;
pub use json::ValidatedJson;
