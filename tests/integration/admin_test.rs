//! Integration tests for the admin issuance and listing endpoints.

mod helpers;

use axum::http::StatusCode;
use chrono::{DateTime, FixedOffset};
use serde_json::{Value, json};

use helpers::ADMIN_PASSWORD;
use keyhub_core::config::AppConfig;
use keyhub_entity::license::LicenseState;

fn issue_body(password: &str, count: i64, days: i32) -> Value {
    json!({ "password": password, "count": count, "days": days, "note": "acme" })
}

#[tokio::test]
async fn test_issue_creates_unactivated_keys() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/admin/licenses",
            Some(issue_body(ADMIN_PASSWORD, 3, 30)),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    let keys = response.body["data"]["keys"].as_array().expect("keys array");
    assert_eq!(keys.len(), 3);

    for key in keys {
        let record = app.record(key.as_str().expect("key string")).await;
        assert_eq!(record.state, LicenseState::Unactivated);
        assert_eq!(record.valid_days.days(), 30);
        assert_eq!(record.note, "acme");
    }
}

#[tokio::test]
async fn test_issued_key_activates() {
    let app = helpers::TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/admin/licenses",
            Some(issue_body(ADMIN_PASSWORD, 1, -1)),
            None,
        )
        .await;
    let key = response.body["data"]["keys"][0]
        .as_str()
        .expect("key string")
        .to_string();

    let activated = app.activate(&key, "machine-1").await;
    assert_eq!(activated.status, StatusCode::OK);
    assert_eq!(activated.body["days"], -1);
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/admin/licenses",
            Some(issue_body("guess", 5, 30)),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "AUTHENTICATION");
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_out_of_range_arguments_write_nothing() {
    let app = helpers::TestApp::new();

    for (count, days, code) in [
        (0, 30, "INVALID_COUNT"),
        (101, 30, "INVALID_COUNT"),
        (5, 0, "INVALID_VALIDITY"),
        (5, -7, "INVALID_VALIDITY"),
    ] {
        let response = app
            .request(
                "POST",
                "/api/admin/licenses",
                Some(issue_body(ADMIN_PASSWORD, count, days)),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{count}/{days}");
        assert_eq!(response.body["error"], code);
    }

    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_unconfigured_admin_rejects_everything() {
    let app = helpers::TestApp::with_config(AppConfig::default());

    let response = app
        .request(
            "POST",
            "/api/admin/licenses",
            Some(issue_body(ADMIN_PASSWORD, 1, 30)),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_requires_header_and_returns_newest_first() {
    let app = helpers::TestApp::new();
    for i in 0..5 {
        app.seed_license(&format!("KEY-{i}"), 30).await;
    }

    let denied = app.request("GET", "/api/admin/licenses", None, None).await;
    assert_eq!(denied.status, StatusCode::UNAUTHORIZED);

    let wrong = app
        .request("GET", "/api/admin/licenses", None, Some("guess"))
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request(
            "GET",
            "/api/admin/licenses?limit=3",
            None,
            Some(ADMIN_PASSWORD),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let rows = response.body["data"].as_array().expect("rows");
    assert_eq!(rows.len(), 3);
    let created: Vec<DateTime<FixedOffset>> = rows
        .iter()
        .map(|r| {
            DateTime::parse_from_rfc3339(r["created_at"].as_str().expect("timestamp"))
                .expect("rfc3339")
        })
        .collect();
    assert!(created.windows(2).all(|pair| pair[0] >= pair[1]));
    assert_eq!(rows[0]["state"], "unactivated");
}

#[tokio::test]
async fn test_list_shows_activated_key_with_maximum_validity() {
    let app = helpers::TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/admin/licenses",
            Some(issue_body(ADMIN_PASSWORD, 1, i32::MAX)),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let key = response.body["data"]["keys"][0]
        .as_str()
        .expect("key string")
        .to_string();

    let activated = app.activate(&key, "machine-1").await;
    assert_eq!(activated.status, StatusCode::OK);
    assert_eq!(activated.body["days"], i32::MAX);

    let listed = app
        .request("GET", "/api/admin/licenses", None, Some(ADMIN_PASSWORD))
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    let row = &listed.body["data"][0];
    assert_eq!(row["state"], "activated");
    assert_eq!(row["valid_days"], i32::MAX);
    assert!(row["expires_at"].is_null());
}

#[tokio::test]
async fn test_stats_counts_states() {
    let app = helpers::TestApp::new();
    for i in 0..4 {
        app.seed_license(&format!("KEY-{i}"), 30).await;
    }
    app.activate("KEY-0", "machine-1").await;

    let response = app
        .request(
            "GET",
            "/api/admin/licenses/stats",
            None,
            Some(ADMIN_PASSWORD),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["data"],
        json!({ "total": 4, "activated": 1, "unactivated": 3 })
    );
}
