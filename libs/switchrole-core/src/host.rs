//! Seams to the host application.
//!
//! The host owns users, courses, roles, capabilities and preference storage.
//! Implementations live in [`crate::memory`] (tests, development) and in the
//! API crate (PostgreSQL).

use async_trait::async_trait;

use crate::error::Result;
use crate::ids::{CategoryId, CourseId, RoleId, UserId};
use crate::model::{Course, RoleAssignment};

/// Role assignment storage.
#[async_trait]
pub trait RoleSource: Send + Sync {
    /// Roles assigned to the user in the course, excluding any role that is
    /// only active because of a role switch.
    async fn course_roles(&self, user: UserId, course: CourseId) -> Result<Vec<RoleAssignment>>;

    /// Roles anyone may switch to in the course context, with display names.
    async fn switchable_roles(&self, course: CourseId) -> Result<Vec<RoleAssignment>>;

    /// Display name of a role in the course context.
    async fn role_name(&self, role: RoleId, course: CourseId) -> Result<Option<String>>;
}

/// Capability evaluation.
#[async_trait]
pub trait AccessControl: Send + Sync {
    /// Whether the user holds `capability` in the category context (or any
    /// context above it). Fails with `NotFound` for an unknown category.
    async fn has_capability(
        &self,
        user: UserId,
        capability: &str,
        category: CategoryId,
    ) -> Result<bool>;
}

/// Course lookup and enrolment methods.
#[async_trait]
pub trait CourseDirectory: Send + Sync {
    async fn course(&self, id: CourseId) -> Result<Option<Course>>;

    /// Whether a self enrolment method is enabled for the course.
    async fn self_enrol_enabled(&self, course: CourseId) -> Result<bool>;
}

/// Durable user-scoped preferences (name/value pairs).
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get(&self, user: UserId, name: &str) -> Result<Option<String>>;
    async fn set(&self, user: UserId, name: &str, value: &str) -> Result<()>;
    async fn unset(&self, user: UserId, name: &str) -> Result<()>;
    /// Preference names stored for the user starting with `prefix`.
    async fn names_with_prefix(&self, user: UserId, prefix: &str) -> Result<Vec<String>>;
    /// Users holding a preference called `name`.
    async fn users_with(&self, name: &str) -> Result<Vec<UserId>>;
    /// Removes the preference `name` for every user.
    async fn delete_all_named(&self, name: &str) -> Result<()>;
}
