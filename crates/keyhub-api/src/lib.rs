//! # keyhub-api
//!
//! HTTP API layer for KeyHub built on Axum.
//!
//! Exposes the client activation endpoint, the operator issuance and
//! listing endpoints, and a health probe, together with the middleware
//! stack, extractors, DTOs, and error mapping they share.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
