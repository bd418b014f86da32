//! Target of the banner's switch buttons.

use axum::extract::State;
use axum::response::Redirect;
use axum::routing::post;
use axum::{Form, Router};
use serde::Deserialize;
use utoipa::ToSchema;

use switchrole_core::{Page, RequestContext, RoleId, SwitchOutcome, SwitchRequest};

use crate::auth::middleware::AuthSession;
use crate::error::{ApiError, ApiErrorBody};
use crate::routes::banner::{course_view_url, load_course};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/switch-role", post(switch_role))
}

// ---------------------------------------------------------------------------
// POST /api/v1/switch-role
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, ToSchema)]
pub struct SwitchRoleForm {
    /// Course id.
    pub id: i64,
    /// Role to switch to; 0 returns to the normal role.
    pub switchrole: i64,
    pub returnurl: Option<String>,
}

/// Switches role in the course and redirects back to the page.
#[utoipa::path(
    post,
    path = "/api/v1/switch-role",
    tag = "Banner",
    security(("bearer" = [])),
    request_body(content = SwitchRoleForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to the return url"),
        (status = 401, description = "Invalid session", body = ApiErrorBody),
        (status = 404, description = "Unknown course", body = ApiErrorBody),
    ),
)]
pub async fn switch_role(
    State(state): State<AppState>,
    mut auth: AuthSession,
    Form(form): Form<SwitchRoleForm>,
) -> Result<Redirect, ApiError> {
    let course = load_course(&state, form.id).await?;
    let return_url =
        local_url(form.returnurl.as_deref()).unwrap_or_else(|| course_view_url(course.id));

    let mut ctx = RequestContext::new(
        auth.data.user.clone(),
        course,
        Page::new(&return_url, "course"),
        std::mem::take(&mut auth.data.state),
    );

    let outcome = state
        .banner
        .after_require_login(&mut ctx, &SwitchRequest::switching_to(RoleId(form.switchrole)))
        .await;
    if let Ok(SwitchOutcome::Recorded(role)) = outcome {
        ctx.switch_role(role);
        tracing::info!(user = %ctx.user.id, course = %ctx.course.id, %role, "role switched");
    }

    auth.data.state = ctx.into_session();
    auth.save(&state).await?;
    outcome?;

    Ok(Redirect::to(&return_url))
}

/// Accepts site-relative urls only.
fn local_url(url: Option<&str>) -> Option<String> {
    url.filter(|u| u.starts_with('/') && !u.starts_with("//") && !u.contains('\\'))
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_site_relative_return_urls_are_followed() {
        assert_eq!(
            local_url(Some("/course/view.php?id=2")).as_deref(),
            Some("/course/view.php?id=2")
        );
        assert_eq!(local_url(Some("https://evil.example/")), None);
        assert_eq!(local_url(Some("//evil.example/")), None);
        assert_eq!(local_url(Some("/\\evil.example")), None);
        assert_eq!(local_url(None), None);
    }
}
