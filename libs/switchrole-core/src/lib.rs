//! Role switching banner for course pages.
//!
//! Decides, per page render, whether a user is looking at a course through an
//! elevated (site or category) role instead of one of their enrolled roles,
//! and renders a banner offering to switch role, switch back, or self-enrol.

pub mod config;
pub mod context;
pub mod error;
pub mod external;
pub mod hooks;
pub mod host;
pub mod ids;
pub mod memory;
pub mod model;
pub mod orchestrator;
pub mod policy;
pub mod privacy;
pub mod render;
pub mod resolver;
pub mod session;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use config::BannerConfig;
pub use context::RequestContext;
pub use error::{Error, Result};
pub use hooks::SwitchRoleBanner;
pub use ids::{CategoryId, CourseId, RoleId, UserId};
pub use model::{Course, Page, RoleAssignment, User};
pub use orchestrator::{SwitchOutcome, SwitchRequest};
pub use policy::BannerMode;
pub use session::Session;
