//! Session token extraction.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::auth::sessions::{self, SessionData};
use crate::error::ApiError;
use crate::AppState;

/// Session extracted from the `Authorization: Bearer <token>` header.
///
/// Handlers that change the session state call [`AuthSession::save`].
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub data: SessionData,
}

impl AuthSession {
    pub async fn save(&self, state: &AppState) -> Result<(), ApiError> {
        sessions::store_session(
            state.kv.as_ref(),
            &self.token,
            &self.data,
            state.config.session_ttl_secs,
        )
        .await
    }
}

/// Rejection returned when the bearer token is missing or invalid.
pub struct AuthError {
    message: &'static str,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": {
                "code": "UNAUTHORIZED",
                "message": self.message
            }
        });
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AuthError {
                message: "Missing Authorization header",
            })?;

        let token = header.strip_prefix("Bearer ").ok_or(AuthError {
            message: "Invalid Authorization header format",
        })?;

        let data = sessions::lookup_session(state.kv.as_ref(), token)
            .await
            .map_err(|_| AuthError {
                message: "Session lookup failed",
            })?
            .ok_or(AuthError {
                message: "Invalid or expired session",
            })?;

        Ok(AuthSession {
            token: token.to_string(),
            data,
        })
    }
}
