use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use banner_api::config::Config;
use banner_api::db::directory::PgDirectory;
use banner_api::db::kv::{KeyValueStore, MemoryStore};
use banner_api::db::preferences::PgPreferenceStore;
use banner_api::AppState;
use switchrole_core::SwitchRoleBanner;

#[tokio::main]
async fn main() {
    // Load .env file (silently skip if missing; env vars may be set externally)
    if dotenvy::dotenv().is_err() {
        let env_path = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
        let _ = dotenvy::from_path(env_path);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let port = config.port;

    let db = banner_api::db::pool::connect(&config.database_url);
    let directory = Arc::new(PgDirectory::new(db.clone()));
    let preferences = Arc::new(PgPreferenceStore::new(db));
    let banner = SwitchRoleBanner::new(config.banner.clone(), directory, preferences);

    // Sessions are process local until a shared store is wired in.
    let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

    tracing::info!(
        site_course = %config.banner.site_course_id,
        capability = %config.banner.elevated_capability,
        "banner-api configured"
    );

    let state = AppState {
        kv,
        banner: Arc::new(banner),
        config: Arc::new(config),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(banner_api::routes::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "banner-api listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(?err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
