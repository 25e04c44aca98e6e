//! # keyhub-core
//!
//! Core crate for KeyHub. Contains the key generator trait,
//! configuration schemas, the license key type, sorting types,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other KeyHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
