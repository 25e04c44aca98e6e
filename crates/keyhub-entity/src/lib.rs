//! # keyhub-entity
//!
//! Domain entity models for KeyHub. Every struct in this crate represents
//! a database table row or a domain value object. Database entities
//! derive `sqlx::FromRow`.

pub mod license;
