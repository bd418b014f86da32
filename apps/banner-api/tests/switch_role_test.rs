mod common;

use axum::http::StatusCode;
use axum_test::{TestResponse, TestServer};

use common::{ADMIN, COURSE1, COURSE2, EDITING_TEACHER, STUDENT};
use switchrole_core::state::last_role_key;
use switchrole_core::{CourseId, RoleId};

async fn post_switch(
    server: &TestServer,
    token: &str,
    course: CourseId,
    role: RoleId,
    returnurl: &str,
) -> TestResponse {
    server
        .post("/api/v1/switch-role")
        .authorization_bearer(token)
        .content_type("application/x-www-form-urlencoded")
        .bytes(format!("id={course}&switchrole={role}&returnurl={returnurl}").into())
        .await
}

// ---------------------------------------------------------------------------
// POST /api/v1/switch-role
// ---------------------------------------------------------------------------

#[tokio::test]
async fn switching_records_role_and_redirects() {
    let (server, _state, host) = common::test_server();
    let token = common::open_session(&server, ADMIN).await;

    let resp = post_switch(&server, &token, COURSE1, STUDENT, "/course/view.php?id=2").await;
    resp.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(resp.header("location").to_str().unwrap(), "/course/view.php?id=2");

    assert!(host.prefs.contains(ADMIN, &last_role_key(COURSE1)));

    let body = common::banner(&server, &token, COURSE1).await;
    assert_eq!(body["show"], true);
    let html = body["html"].as_str().unwrap();
    assert!(html.contains("with your <b>Student</b> course role."));
    assert!(html.contains(r#"name="switchrole" value="0""#));
    assert!(html.contains("Return to my normal role"));
}

#[tokio::test]
async fn switching_back_clears_the_preference() {
    let (server, _state, host) = common::test_server();
    let token = common::open_session(&server, ADMIN).await;

    post_switch(&server, &token, COURSE1, STUDENT, "/course/view.php?id=2")
        .await
        .assert_status(StatusCode::SEE_OTHER);
    post_switch(&server, &token, COURSE1, RoleId::NONE, "/course/view.php?id=2")
        .await
        .assert_status(StatusCode::SEE_OTHER);

    assert!(!host.prefs.contains(ADMIN, &last_role_key(COURSE1)));
    let html = common::banner(&server, &token, COURSE1).await["html"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(html.contains(r#"name="switchrole" value="5""#));
}

#[tokio::test]
async fn last_role_is_reapplied_in_a_new_session() {
    let (server, _state, _host) = common::test_server();
    let token = common::open_session(&server, ADMIN).await;
    post_switch(&server, &token, COURSE1, STUDENT, "/course/view.php?id=2")
        .await
        .assert_status(StatusCode::SEE_OTHER);

    let fresh = common::open_session(&server, ADMIN).await;

    let html = common::banner(&server, &fresh, COURSE1).await["html"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(html.contains("<b>Student</b>"));

    // Only the course that was switched.
    let other = common::banner(&server, &fresh, COURSE2).await;
    assert!(!other["html"].as_str().unwrap().contains("<b>Student</b>"));
}

#[tokio::test]
async fn stale_last_role_is_cleared() {
    let (server, state, host) = common::test_server();
    state
        .banner
        .state()
        .set_last_role(ADMIN, COURSE1, EDITING_TEACHER)
        .await
        .unwrap();
    let token = common::open_session(&server, ADMIN).await;

    let body = common::banner(&server, &token, COURSE1).await;
    assert!(!body["html"].as_str().unwrap().contains("<b>"));
    assert!(!host.prefs.contains(ADMIN, &last_role_key(COURSE1)));
}

#[tokio::test]
async fn role_not_held_is_ignored() {
    let (server, _state, host) = common::test_server();
    let token = common::open_session(&server, ADMIN).await;

    post_switch(&server, &token, COURSE1, EDITING_TEACHER, "/course/view.php?id=2")
        .await
        .assert_status(StatusCode::SEE_OTHER);

    assert!(!host.prefs.contains(ADMIN, &last_role_key(COURSE1)));
    let html = common::banner(&server, &token, COURSE1).await["html"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(!html.contains("<b>"));
}

#[tokio::test]
async fn foreign_return_url_falls_back_to_course_page() {
    let (server, _state, _host) = common::test_server();
    let token = common::open_session(&server, ADMIN).await;

    let resp = post_switch(&server, &token, COURSE1, STUDENT, "https://example.com/").await;
    resp.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(resp.header("location").to_str().unwrap(), "/course/view.php?id=2");
}

#[tokio::test]
async fn unknown_course_is_not_found() {
    let (server, _state, _host) = common::test_server();
    let token = common::open_session(&server, ADMIN).await;

    post_switch(&server, &token, CourseId(9999), STUDENT, "/")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
