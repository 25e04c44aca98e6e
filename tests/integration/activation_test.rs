//! Integration tests for the client activation endpoint.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use keyhub_entity::license::LicenseState;

#[tokio::test]
async fn test_first_activation_binds_machine() {
    let app = helpers::TestApp::new();
    app.seed_license("KEY-A", 30).await;

    let response = app.activate("KEY-A", "machine-1").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({ "status": "success", "msg": "activated", "days": 30 })
    );

    let record = app.record("KEY-A").await;
    assert_eq!(record.state, LicenseState::Activated);
    assert_eq!(record.machine_id.as_deref(), Some("machine-1"));
    assert!(record.activated_at.is_some());
}

#[tokio::test]
async fn test_same_machine_gets_welcome_back() {
    let app = helpers::TestApp::new();
    app.seed_license("KEY-B", -1).await;

    app.activate("KEY-B", "machine-1").await;
    let bound = app.record("KEY-B").await;

    let response = app.activate("KEY-B", "machine-1").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["msg"], "welcome back");
    assert_eq!(response.body["days"], -1);

    assert_eq!(app.record("KEY-B").await, bound);
}

#[tokio::test]
async fn test_other_machine_is_forbidden() {
    let app = helpers::TestApp::new();
    app.seed_license("KEY-C", 7).await;
    app.activate("KEY-C", "machine-1").await;

    let response = app.activate("KEY-C", "machine-2").await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "MACHINE_MISMATCH");
    assert!(!response.body.to_string().contains("machine-1"));
    assert_eq!(
        app.record("KEY-C").await.machine_id.as_deref(),
        Some("machine-1")
    );
}

#[tokio::test]
async fn test_unknown_key_is_not_found() {
    let app = helpers::TestApp::new();

    let response = app.activate("NO-SUCH-KEY", "machine-1").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "KEY_NOT_FOUND");
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_missing_fields_are_rejected() {
    let app = helpers::TestApp::new();
    app.seed_license("KEY-D", 30).await;

    let blank_hwid = app.activate("KEY-D", "").await;
    assert_eq!(blank_hwid.status, StatusCode::BAD_REQUEST);
    assert_eq!(blank_hwid.body["error"], "VALIDATION");

    let no_hwid = app
        .request("POST", "/api/activate", Some(json!({ "key": "KEY-D" })), None)
        .await;
    assert_eq!(no_hwid.status, StatusCode::BAD_REQUEST);

    assert_eq!(app.record("KEY-D").await.state, LicenseState::Unactivated);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_machines_single_winner() {
    let app = helpers::TestApp::new();
    app.seed_license("KEY-RACE", 365).await;

    let attempts = (0..16).map(|i| {
        let app = &app;
        async move { app.activate("KEY-RACE", &format!("machine-{i}")).await }
    });
    let responses = futures::future::join_all(attempts).await;

    let winners = responses
        .iter()
        .filter(|r| r.status == StatusCode::OK)
        .count();
    let losers = responses
        .iter()
        .filter(|r| r.status == StatusCode::FORBIDDEN)
        .count();
    assert_eq!(winners, 1);
    assert_eq!(losers, 15);

    let record = app.record("KEY-RACE").await;
    assert_eq!(record.state, LicenseState::Activated);
    assert!(record.machine_id.is_some());
}

#[tokio::test]
async fn test_keys_bind_independently() {
    let app = helpers::TestApp::new();
    for i in 0..5 {
        app.seed_license(&format!("KEY-{i}"), 30).await;
    }

    for i in 0..5 {
        let response = app.activate(&format!("KEY-{i}"), &format!("machine-{i}")).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["msg"], "activated");
    }

    for i in 0..5 {
        let record = app.record(&format!("KEY-{i}")).await;
        assert_eq!(record.machine_id, Some(format!("machine-{i}")));
    }
}

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["store"], "connected");
}
