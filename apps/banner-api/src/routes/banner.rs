//! Page hooks for one course page render.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use switchrole_core::host::CourseDirectory;
use switchrole_core::{Course, CourseId, Page, RequestContext, SwitchRequest};

use crate::auth::middleware::AuthSession;
use crate::error::{ApiError, ApiErrorBody};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/courses/{course_id}/banner", get(course_banner))
}

/// Looks up a course, 404 when it does not exist.
pub(crate) async fn load_course(state: &AppState, id: i64) -> Result<Course, ApiError> {
    state
        .banner
        .courses()
        .course(CourseId(id))
        .await?
        .ok_or_else(|| ApiError::not_found("Course not found"))
}

pub(crate) fn course_view_url(course: CourseId) -> String {
    format!("/course/view.php?id={course}")
}

// ---------------------------------------------------------------------------
// GET /api/v1/courses/{course_id}/banner
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BannerQuery {
    /// Page url being rendered, path plus query. Defaults to the course view.
    pub url: Option<String>,
    /// Page layout. Defaults to `course`.
    pub layout: Option<String>,
    /// Explicit `switchrole` request parameter, if any.
    pub switchrole: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BannerResponse {
    pub show: bool,
    pub html: Option<String>,
}

/// Runs the login and footer hooks for a page in the course.
#[utoipa::path(
    get,
    path = "/api/v1/courses/{course_id}/banner",
    tag = "Banner",
    security(("bearer" = [])),
    params(("course_id" = i64, Path, description = "Course id"), BannerQuery),
    responses(
        (status = 200, description = "Banner decision", body = BannerResponse),
        (status = 401, description = "Invalid session", body = ApiErrorBody),
        (status = 404, description = "Unknown course", body = ApiErrorBody),
    ),
)]
pub async fn course_banner(
    State(state): State<AppState>,
    mut auth: AuthSession,
    Path(course_id): Path<i64>,
    Query(query): Query<BannerQuery>,
) -> Result<Json<BannerResponse>, ApiError> {
    let course = load_course(&state, course_id).await?;
    let url = query.url.unwrap_or_else(|| course_view_url(course.id));
    let layout = query.layout.unwrap_or_else(|| "course".to_string());

    let mut ctx = RequestContext::new(
        auth.data.user.clone(),
        course,
        Page::new(&url, &layout),
        std::mem::take(&mut auth.data.state),
    );

    let request = SwitchRequest {
        switchrole: query.switchrole,
    };
    let outcome = state.banner.after_require_login(&mut ctx, &request).await;
    let html = match outcome {
        Ok(outcome) => {
            tracing::debug!(?outcome, "role switch handled");
            state.banner.before_footer(&mut ctx).await
        }
        Err(err) => Err(err),
    };

    // The session may have been switched even if rendering failed.
    auth.data.state = ctx.into_session();
    auth.save(&state).await?;
    let html = html?;

    Ok(Json(BannerResponse {
        show: html.is_some(),
        html,
    }))
}
