//! # keyhub-service
//!
//! Business logic service layer for KeyHub. The two operations the outer
//! adapters call are [`IssuanceService::issue_keys`] and
//! [`ActivationService::activate`]; the remaining services cover operator
//! access and read-only views.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod activation;
pub mod admin;
pub mod issuance;
pub mod keygen;
pub mod query;

pub use activation::{ActivationResult, ActivationService};
pub use admin::{AdminAuthenticator, hash_password};
pub use issuance::IssuanceService;
pub use keygen::UuidKeyGenerator;
pub use query::LicenseQueryService;
