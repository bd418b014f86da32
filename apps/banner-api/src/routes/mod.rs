pub mod auth;
pub mod banner;
pub mod health;
pub mod hide;
pub mod switch;

use axum::Router;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest(
            "/api/v1",
            auth::router()
                .merge(hide::router())
                .merge(banner::router())
                .merge(switch::router()),
        )
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health,
        // Auth
        auth::open_session,
        auth::logout,
        // Banner
        banner::course_banner,
        hide::hide_banner,
        switch::switch_role,
    ),
    components(
        schemas(
            // Error types
            crate::error::ApiErrorBody,
            crate::error::ApiErrorDetail,
            crate::error::FieldError,
            // Route request/response types
            health::HealthResponse,
            auth::OpenSessionRequest,
            auth::OpenSessionResponse,
            banner::BannerResponse,
            hide::HideBannerRequest,
            hide::HideBannerResponse,
            switch::SwitchRoleForm,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check"),
        (name = "Auth", description = "Session management"),
        (name = "Banner", description = "Switch role banner"),
    )
)]
pub struct ApiDoc;
