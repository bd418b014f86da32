//! The `hide_banner` remote call.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use switchrole_core::external::HideBannerParams;

use crate::auth::middleware::AuthSession;
use crate::error::{ApiError, ApiErrorBody};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/banner/hide", post(hide_banner))
}

// ---------------------------------------------------------------------------
// POST /api/v1/banner/hide
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, ToSchema)]
pub struct HideBannerRequest {
    pub courseid: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HideBannerResponse {
    pub result: bool,
}

/// Hides the banner for one course for the rest of the session.
#[utoipa::path(
    post,
    path = "/api/v1/banner/hide",
    tag = "Banner",
    security(("bearer" = [])),
    request_body = HideBannerRequest,
    responses(
        (status = 200, description = "Banner hidden", body = HideBannerResponse),
        (status = 400, description = "Invalid course id", body = ApiErrorBody),
        (status = 401, description = "Invalid session", body = ApiErrorBody),
        (status = 404, description = "Unknown course", body = ApiErrorBody),
    ),
)]
pub async fn hide_banner(
    State(state): State<AppState>,
    mut auth: AuthSession,
    Json(body): Json<HideBannerRequest>,
) -> Result<Json<HideBannerResponse>, ApiError> {
    let params = HideBannerParams {
        courseid: body.courseid,
    };
    let result = state
        .banner
        .hide_banner(&mut auth.data.state, &params)
        .await?;
    auth.save(&state).await?;

    Ok(Json(HideBannerResponse {
        result: result.result,
    }))
}
