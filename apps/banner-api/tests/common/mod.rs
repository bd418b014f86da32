#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;

use banner_api::config::{Config, SWITCH_ROUTE};
use banner_api::db::kv::{KeyValueStore, MemoryStore};
use banner_api::AppState;
use switchrole_core::memory::{MemoryDirectory, MemoryPreferenceStore};
use switchrole_core::{BannerConfig, CategoryId, Course, CourseId, RoleId, SwitchRoleBanner, UserId};

pub const HOST_SECRET: &str = "test-host-secret";
pub const CAPABILITY: &str = "moodle/course:view";

pub const SITE: CourseId = CourseId(1);
pub const COURSE1: CourseId = CourseId(2);
pub const COURSE2: CourseId = CourseId(3);
pub const COURSE3: CourseId = CourseId(4);
pub const CATEGORY: CategoryId = CategoryId(1);

pub const EDITING_TEACHER: RoleId = RoleId(3);
pub const TEACHER: RoleId = RoleId(4);
pub const STUDENT: RoleId = RoleId(5);

/// Site administrator enrolled as a student in every test course.
pub const ADMIN: UserId = UserId(10);
/// Plain student without any elevated capability.
pub const STUDENT_USER: UserId = UserId(20);

/// In-memory stores behind a test [`AppState`].
pub struct TestHost {
    pub directory: Arc<MemoryDirectory>,
    pub prefs: Arc<MemoryPreferenceStore>,
}

fn course(id: CourseId, fullname: &str) -> Course {
    Course {
        id,
        category: CATEGORY,
        fullname: fullname.to_string(),
    }
}

/// Build a test AppState on in-memory stores.
pub fn test_state() -> (AppState, TestHost) {
    let directory = Arc::new(MemoryDirectory::new());
    directory.add_course(course(SITE, "Test site"));
    directory.add_course(course(COURSE1, "Course 1"));
    directory.add_course(course(COURSE2, "Course 2"));
    directory.add_course(course(COURSE3, "Course 3"));

    directory.add_role(EDITING_TEACHER, "editingteacher", "Teacher", true);
    directory.add_role(TEACHER, "teacher", "Non-editing teacher", true);
    directory.add_role(STUDENT, "student", "Student", true);

    directory.grant(ADMIN, None, CAPABILITY);
    for id in [COURSE1, COURSE2, COURSE3] {
        directory.assign(ADMIN, id, STUDENT);
        directory.assign(STUDENT_USER, id, STUDENT);
    }

    let prefs = Arc::new(MemoryPreferenceStore::new());

    let config = Config {
        database_url: String::new(),
        port: 0,
        host_secret: HOST_SECRET.to_string(),
        session_ttl_secs: 3600,
        banner: BannerConfig {
            switch_url: SWITCH_ROUTE.to_string(),
            ..BannerConfig::default()
        },
    };
    let banner = SwitchRoleBanner::new(config.banner.clone(), directory.clone(), prefs.clone());
    let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

    let state = AppState {
        kv,
        banner: Arc::new(banner),
        config: Arc::new(config),
    };

    (state, TestHost { directory, prefs })
}

/// Build the full application router wired to the test state.
pub fn test_app() -> (Router, AppState, TestHost) {
    let (state, host) = test_state();
    let app = banner_api::routes::router().with_state(state.clone());
    (app, state, host)
}

pub fn test_server() -> (TestServer, AppState, TestHost) {
    let (app, state, host) = test_app();
    (TestServer::new(app).unwrap(), state, host)
}

/// Open a session as the host would and return its bearer token.
pub async fn open_session(server: &TestServer, user: UserId) -> String {
    let resp = server
        .post("/api/v1/auth/sessions")
        .add_header("x-host-secret", HOST_SECRET)
        .json(&serde_json::json!({ "user_id": user.0 }))
        .await;
    resp.assert_status_ok();
    resp.json::<serde_json::Value>()["session_token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Fetch the banner for a course page.
pub async fn banner(server: &TestServer, token: &str, course: CourseId) -> serde_json::Value {
    let resp = server
        .get(&format!("/api/v1/courses/{course}/banner"))
        .authorization_bearer(token)
        .await;
    resp.assert_status_ok();
    resp.json()
}
