mod common;

use axum::http::StatusCode;

use common::{ADMIN, COURSE1, HOST_SECRET};

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_ok() {
    use tower::ServiceExt;

    let (app, _state, _host) = common::test_app();
    let resp = app
        .oneshot(
            http::Request::builder()
                .uri("/health")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// POST /api/v1/auth/sessions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn open_session_returns_bearer_token() {
    let (server, state, _host) = common::test_server();

    let resp = server
        .post("/api/v1/auth/sessions")
        .add_header("x-host-secret", HOST_SECRET)
        .json(&serde_json::json!({ "user_id": ADMIN.0 }))
        .await;
    resp.assert_status_ok();

    let body: serde_json::Value = resp.json();
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], state.config.session_ttl_secs);
    assert!(body["session_token"].as_str().unwrap().starts_with("sst_"));
}

#[tokio::test]
async fn open_session_requires_host_secret() {
    let (server, _state, _host) = common::test_server();

    let resp = server
        .post("/api/v1/auth/sessions")
        .json(&serde_json::json!({ "user_id": ADMIN.0 }))
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);

    let resp = server
        .post("/api/v1/auth/sessions")
        .add_header("x-host-secret", "wrong")
        .json(&serde_json::json!({ "user_id": ADMIN.0 }))
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn open_session_rejects_non_positive_user() {
    let (server, _state, _host) = common::test_server();

    let resp = server
        .post("/api/v1/auth/sessions")
        .add_header("x-host-secret", HOST_SECRET)
        .json(&serde_json::json!({ "user_id": 0 }))
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.json::<serde_json::Value>()["error"]["details"][0]["field"],
        "user_id"
    );
}

// ---------------------------------------------------------------------------
// POST /api/v1/auth/logout
// ---------------------------------------------------------------------------

#[tokio::test]
async fn logout_invalidates_session() {
    let (server, _state, _host) = common::test_server();
    let token = common::open_session(&server, ADMIN).await;

    server
        .post("/api/v1/auth/logout")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .get(&format!("/api/v1/courses/{COURSE1}/banner"))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn hidden_banners_come_back_after_logout() {
    let (server, _state, _host) = common::test_server();
    let token = common::open_session(&server, ADMIN).await;

    server
        .post("/api/v1/banner/hide")
        .authorization_bearer(&token)
        .json(&serde_json::json!({ "courseid": COURSE1.0 }))
        .await
        .assert_status_ok();
    assert_eq!(common::banner(&server, &token, COURSE1).await["show"], false);

    server
        .post("/api/v1/auth/logout")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let token = common::open_session(&server, ADMIN).await;
    assert_eq!(common::banner(&server, &token, COURSE1).await["show"], true);
}

#[tokio::test]
async fn logout_without_session_is_unauthorized() {
    let (server, _state, _host) = common::test_server();

    server
        .post("/api/v1/auth/logout")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
