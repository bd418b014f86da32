use serde::{Deserialize, Serialize};

use crate::context::RequestContext;
use crate::error::Result;
use crate::ids::{CourseId, RoleId};
use crate::resolver::RoleResolver;
use crate::state::SwitchStateStore;

/// Request parameters relevant to role switching.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwitchRequest {
    /// The `switchrole` parameter. Negative values count as absent.
    #[serde(default)]
    pub switchrole: Option<i64>,
}

impl SwitchRequest {
    pub fn switching_to(role: RoleId) -> Self {
        Self {
            switchrole: Some(role.0),
        }
    }

    fn explicit_role(&self) -> Option<RoleId> {
        self.switchrole.filter(|id| *id >= 0).map(RoleId)
    }
}

/// What one orchestration pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "role", rename_all = "snake_case")]
pub enum SwitchOutcome {
    /// Site course, nothing to do.
    Skipped,
    /// An explicit switch was stored as the last role.
    Recorded(RoleId),
    /// The stored last role was applied to the session.
    AutoSwitched(RoleId),
    /// The stored last role is no longer switchable and was cleared.
    ClearedStale(RoleId),
    Unchanged,
}

/// Remembers explicit role switches and re-applies them on later visits.
#[derive(Clone)]
pub struct SwitchOrchestrator {
    site_course: CourseId,
    resolver: RoleResolver,
    state: SwitchStateStore,
}

impl SwitchOrchestrator {
    pub fn new(site_course: CourseId, resolver: RoleResolver, state: SwitchStateStore) -> Self {
        Self {
            site_course,
            resolver,
            state,
        }
    }

    /// Runs once per request, after login and before rendering.
    pub async fn handle_role_switch(
        &self,
        ctx: &mut RequestContext,
        request: &SwitchRequest,
    ) -> Result<SwitchOutcome> {
        let user = ctx.user.id;
        let course = ctx.course.id;

        if course == self.site_course {
            return Ok(SwitchOutcome::Skipped);
        }

        if let Some(role) = request.explicit_role() {
            let switchable = self.resolver.switchable_roles(ctx).await?;
            if role.is_none() || switchable.iter().any(|r| r.id == role) {
                self.state.set_last_role(user, course, role).await?;
                tracing::info!(%user, %course, %role, "recorded last role");
                return Ok(SwitchOutcome::Recorded(role));
            }
            tracing::debug!(%user, %course, %role, "ignoring switch to a role that is not switchable");
        }

        let active = self.resolver.active_switched_role(ctx).await?;
        let last = self.state.get_last_role(user, course).await?;
        if !active.is_none() || last.is_none() {
            return Ok(SwitchOutcome::Unchanged);
        }

        let switchable = self.resolver.switchable_roles(ctx).await?;
        if switchable.iter().any(|r| r.id == last) {
            ctx.switch_role(last);
            tracing::info!(%user, %course, role = %last, "switched to last role");
            Ok(SwitchOutcome::AutoSwitched(last))
        } else {
            self.state.set_last_role(user, course, RoleId::NONE).await?;
            tracing::info!(%user, %course, role = %last, "cleared stale last role");
            Ok(SwitchOutcome::ClearedStale(last))
        }
    }
}
