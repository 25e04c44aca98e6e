//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use chrono::Utc;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use keyhub_api::{AppState, build_app};
use keyhub_core::config::AppConfig;
use keyhub_core::types::LicenseKey;
use keyhub_database::{LicenseStore, MemoryLicenseStore};
use keyhub_entity::license::{LicenseRecord, NewLicense, ValidDays};

/// Admin password configured for every test app.
pub const ADMIN_PASSWORD: &str = "test-admin-password";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The store behind the router, for direct inspection
    pub store: MemoryLicenseStore,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application over an empty in-memory store
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.admin.password_hash =
            Some(keyhub_service::hash_password(ADMIN_PASSWORD).expect("Failed to hash password"));
        Self::with_config(config)
    }

    /// Create a test application from an explicit config
    pub fn with_config(config: AppConfig) -> Self {
        let store = MemoryLicenseStore::new();
        let state = AppState::new(config.clone(), Arc::new(store.clone()))
            .expect("Failed to build app state");

        Self {
            router: build_app(state),
            store,
            config,
        }
    }

    /// Insert an unactivated license directly into the store
    pub async fn seed_license(&self, key: &str, valid_days: i32) -> LicenseKey {
        let key = LicenseKey::new(key).expect("Invalid key");
        let record = LicenseRecord::issue(
            NewLicense {
                key: key.clone(),
                valid_days: ValidDays::new(valid_days).expect("Invalid validity"),
                note: "seeded".to_string(),
            },
            Utc::now(),
        );
        self.store.create(&record).await.expect("Failed to seed license");
        key
    }

    /// Fetch a record straight from the store
    pub async fn record(&self, key: &str) -> LicenseRecord {
        self.store
            .get(&LicenseKey::new(key).expect("Invalid key"))
            .await
            .expect("License not found")
    }

    /// POST /api/activate
    pub async fn activate(&self, key: &str, hwid: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/activate",
            Some(serde_json::json!({ "key": key, "hwid": hwid })),
            None,
        )
        .await
    }

    /// Send a request; `admin_password` goes in the `x-admin-password` header
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        admin_password: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(password) = admin_password {
            req = req.header("x-admin-password", password);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
