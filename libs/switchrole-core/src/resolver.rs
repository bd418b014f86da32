use std::sync::Arc;

use crate::context::RequestContext;
use crate::error::Result;
use crate::host::{AccessControl, RoleSource};
use crate::ids::RoleId;
use crate::model::RoleAssignment;

/// Works out which roles the current user holds in the course and which of
/// them they can switch to.
#[derive(Clone)]
pub struct RoleResolver {
    roles: Arc<dyn RoleSource>,
    access: Arc<dyn AccessControl>,
    capability: String,
}

impl RoleResolver {
    pub fn new(
        roles: Arc<dyn RoleSource>,
        access: Arc<dyn AccessControl>,
        capability: impl Into<String>,
    ) -> Self {
        Self {
            roles,
            access,
            capability: capability.into(),
        }
    }

    /// Roles assigned to the user in the course (switches not included).
    pub async fn course_roles(&self, ctx: &mut RequestContext) -> Result<Vec<RoleAssignment>> {
        if let Some(roles) = &ctx.cache.course_roles {
            return Ok(roles.clone());
        }
        let roles = self.roles.course_roles(ctx.user.id, ctx.course.id).await?;
        ctx.cache.course_roles = Some(roles.clone());
        Ok(roles)
    }

    /// Course roles the user may switch to right now.
    ///
    /// Empty while a switch is active: the switched role never carries the
    /// ability to switch again.
    pub async fn switchable_roles(&self, ctx: &mut RequestContext) -> Result<Vec<RoleAssignment>> {
        if let Some(roles) = &ctx.cache.switchable_roles {
            return Ok(roles.clone());
        }

        let roles = if !self.active_switched_role(ctx).await?.is_none() {
            Vec::new()
        } else {
            let held = self.course_roles(ctx).await?;
            if held.is_empty() {
                Vec::new()
            } else {
                self.roles
                    .switchable_roles(ctx.course.id)
                    .await?
                    .into_iter()
                    .filter(|role| held.iter().any(|h| h.id == role.id))
                    .collect()
            }
        };

        ctx.cache.switchable_roles = Some(roles.clone());
        Ok(roles)
    }

    /// The role the course is switched to, if the user actually holds it.
    pub async fn active_switched_role(&self, ctx: &mut RequestContext) -> Result<RoleId> {
        let switched = ctx.session.switched_role(ctx.course.id);
        if switched.is_none() {
            return Ok(RoleId::NONE);
        }
        let held = self.course_roles(ctx).await?;
        if held.iter().any(|r| r.id == switched) {
            Ok(switched)
        } else {
            Ok(RoleId::NONE)
        }
    }

    /// Whether the user can view the course through a role held above it.
    /// Guests never can.
    pub async fn has_elevated_role(&self, ctx: &mut RequestContext) -> Result<bool> {
        if ctx.user.is_guest {
            return Ok(false);
        }
        if let Some(elevated) = ctx.cache.elevated {
            return Ok(elevated);
        }
        let elevated = self
            .access
            .has_capability(ctx.user.id, &self.capability, ctx.course.category)
            .await?;
        ctx.cache.elevated = Some(elevated);
        Ok(elevated)
    }

    /// Display name of a role in the course.
    pub async fn role_name(&self, ctx: &mut RequestContext, role: RoleId) -> Result<String> {
        if let Some(name) = self.roles.role_name(role, ctx.course.id).await? {
            return Ok(name);
        }
        Ok(self
            .course_roles(ctx)
            .await?
            .into_iter()
            .find(|r| r.id == role)
            .map(|r| r.shortname)
            .unwrap_or_else(|| role.to_string()))
    }
}
