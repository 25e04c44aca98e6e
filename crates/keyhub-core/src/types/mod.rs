//! Core type definitions used across the KeyHub workspace.

pub mod key;
pub mod sorting;

pub use key::LicenseKey;
pub use sorting::SortDirection;
