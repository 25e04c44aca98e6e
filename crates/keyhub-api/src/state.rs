//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use keyhub_core::config::AppConfig;
use keyhub_core::result::AppResult;
use keyhub_database::store::LicenseStore;
use keyhub_service::{
    ActivationService, AdminAuthenticator, IssuanceService, LicenseQueryService, UuidKeyGenerator,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Process start, for uptime reporting
    pub started_at: Instant,

    // ── Infrastructure ───────────────────────────────────────
    /// License store (PostgreSQL or in-memory)
    pub store: Arc<dyn LicenseStore>,

    // ── Services ─────────────────────────────────────────────
    /// Client activation
    pub activation_service: Arc<ActivationService>,
    /// Batch issuance
    pub issuance_service: Arc<IssuanceService>,
    /// Listing and counts
    pub query_service: Arc<LicenseQueryService>,
    /// Admin password check
    pub admin_auth: Arc<AdminAuthenticator>,
}

impl AppState {
    /// Wire every service over `store`.
    pub fn new(config: AppConfig, store: Arc<dyn LicenseStore>) -> AppResult<Self> {
        let admin_auth = Arc::new(AdminAuthenticator::new(&config.admin)?);
        let activation_service = Arc::new(ActivationService::new(Arc::clone(&store)));
        let issuance_service = Arc::new(IssuanceService::new(
            Arc::clone(&store),
            Arc::new(UuidKeyGenerator::new()),
        ));
        let query_service = Arc::new(LicenseQueryService::new(
            Arc::clone(&store),
            config.admin.list_limit,
        ));

        Ok(Self {
            config: Arc::new(config),
            started_at: Instant::now(),
            store,
            activation_service,
            issuance_service,
            query_service,
            admin_auth,
        })
    }
}
