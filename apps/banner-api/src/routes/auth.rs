//! Auth routes: host-issued sessions and logout.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use switchrole_core::{Session, User};

use crate::auth::middleware::AuthSession;
use crate::auth::sessions::{self, SessionData};
use crate::error::{ApiError, ApiErrorBody, FieldError};
use crate::AppState;

/// Header carrying the shared secret on host-to-service calls.
pub const HOST_SECRET_HEADER: &str = "x-host-secret";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/sessions", post(open_session))
        .route("/auth/logout", post(logout))
}

// ---------------------------------------------------------------------------
// POST /api/v1/auth/sessions
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, ToSchema)]
pub struct OpenSessionRequest {
    pub user_id: i64,
    #[serde(default)]
    pub is_guest: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OpenSessionResponse {
    pub session_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Opens a session for a user the host has already authenticated.
#[utoipa::path(
    post,
    path = "/api/v1/auth/sessions",
    tag = "Auth",
    request_body = OpenSessionRequest,
    params(("x-host-secret" = String, Header, description = "Shared host secret")),
    responses(
        (status = 200, description = "Session opened", body = OpenSessionResponse),
        (status = 400, description = "Invalid user id", body = ApiErrorBody),
        (status = 401, description = "Missing or wrong host secret", body = ApiErrorBody),
    ),
)]
pub async fn open_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<OpenSessionRequest>,
) -> Result<Json<OpenSessionResponse>, ApiError> {
    let secret = headers
        .get(HOST_SECRET_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("Missing host secret"))?;
    if secret != state.config.host_secret {
        return Err(ApiError::unauthorized("Invalid host secret"));
    }

    if body.user_id <= 0 {
        return Err(ApiError::validation(vec![FieldError {
            field: "user_id".to_string(),
            message: "must be a positive integer".to_string(),
        }]));
    }

    let user = if body.is_guest {
        User::guest(body.user_id)
    } else {
        User::new(body.user_id)
    };
    let token = sessions::generate_session_token();
    sessions::store_session(
        state.kv.as_ref(),
        &token,
        &SessionData {
            user,
            state: Session::new(),
        },
        state.config.session_ttl_secs,
    )
    .await?;

    tracing::info!(user = body.user_id, guest = body.is_guest, "session opened");

    Ok(Json(OpenSessionResponse {
        session_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.config.session_ttl_secs,
    }))
}

// ---------------------------------------------------------------------------
// POST /api/v1/auth/logout
// ---------------------------------------------------------------------------

/// Ends the session; dismissed banners come back on the next login.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "Auth",
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Session destroyed"),
        (status = 401, description = "Invalid session", body = ApiErrorBody),
    ),
)]
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthSession,
) -> Result<StatusCode, ApiError> {
    sessions::destroy_session(state.kv.as_ref(), &auth.token).await?;
    tracing::info!(user = %auth.data.user.id, "session destroyed");
    Ok(StatusCode::NO_CONTENT)
}
