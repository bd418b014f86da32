pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

use std::sync::Arc;

use config::Config;
use db::kv::KeyValueStore;
use switchrole_core::SwitchRoleBanner;

/// Shared application state available to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub kv: Arc<dyn KeyValueStore>,
    pub banner: Arc<SwitchRoleBanner>,
    pub config: Arc<Config>,
}
