//! License domain entities.

pub mod model;
pub mod outcome;
pub mod state;
pub mod validity;

pub use model::{LicenseRecord, NewLicense};
pub use outcome::{ActivationOutcome, LicenseStats};
pub use state::LicenseState;
pub use validity::ValidDays;
