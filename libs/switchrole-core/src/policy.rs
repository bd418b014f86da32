use std::sync::Arc;

use serde::Serialize;

use crate::config::BannerConfig;
use crate::context::RequestContext;
use crate::error::Result;
use crate::host::CourseDirectory;
use crate::model::{Page, RoleAssignment};
use crate::render::{self, BannerTargets};
use crate::resolver::RoleResolver;
use crate::state::SwitchStateStore;

/// Which banner to show. Selected once per render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BannerMode {
    /// The course is switched to a role; offer to switch back.
    ActiveSwitch { role_name: String },
    /// The user holds no role in the course.
    SelfEnrol { can_enrol: bool },
    /// Offer each switchable role.
    SwitchableRoles { targets: Vec<RoleAssignment> },
}

/// Pages the banner never appears on.
#[derive(Debug, Clone)]
pub struct PageExclusions {
    paths: Vec<String>,
    layouts: Vec<String>,
}

impl PageExclusions {
    pub fn new(paths: Vec<String>, layouts: Vec<String>) -> Self {
        Self { paths, layouts }
    }

    pub fn is_excluded(&self, page: &Page) -> bool {
        let path = page.path();
        self.paths.iter().any(|p| p == path) || self.layouts.iter().any(|l| *l == page.layout)
    }
}

#[derive(Clone)]
pub struct BannerPolicy {
    config: Arc<BannerConfig>,
    exclusions: PageExclusions,
    resolver: RoleResolver,
    state: SwitchStateStore,
    courses: Arc<dyn CourseDirectory>,
}

impl BannerPolicy {
    pub fn new(
        config: Arc<BannerConfig>,
        resolver: RoleResolver,
        state: SwitchStateStore,
        courses: Arc<dyn CourseDirectory>,
    ) -> Self {
        let exclusions =
            PageExclusions::new(config.excluded_paths.clone(), config.excluded_layouts.clone());
        Self {
            config,
            exclusions,
            resolver,
            state,
            courses,
        }
    }

    /// Site course and excluded pages never show the banner.
    pub fn is_excluded_page(&self, ctx: &RequestContext) -> bool {
        ctx.course.id == self.config.site_course_id || self.exclusions.is_excluded(&ctx.page)
    }

    pub async fn should_show_banner(&self, ctx: &mut RequestContext) -> Result<bool> {
        let course = ctx.course.id;

        if course == self.config.site_course_id {
            return Ok(false);
        }
        if self.state.is_banner_hidden(&ctx.session, course) {
            tracing::debug!(%course, "banner hidden this session");
            return Ok(false);
        }
        if self.exclusions.is_excluded(&ctx.page) {
            return Ok(false);
        }
        if !self.resolver.has_elevated_role(ctx).await? {
            return Ok(false);
        }
        if self.resolver.course_roles(ctx).await?.is_empty() {
            return Ok(false);
        }

        let switchable = self.resolver.switchable_roles(ctx).await?;
        let active = self.resolver.active_switched_role(ctx).await?;
        if switchable.is_empty() && active.is_none() {
            tracing::debug!(%course, "nothing to switch to");
            return Ok(false);
        }

        Ok(true)
    }

    pub async fn banner_mode(&self, ctx: &mut RequestContext) -> Result<BannerMode> {
        let active = self.resolver.active_switched_role(ctx).await?;
        if !active.is_none() {
            let role_name = self.resolver.role_name(ctx, active).await?;
            return Ok(BannerMode::ActiveSwitch { role_name });
        }

        if self.resolver.course_roles(ctx).await?.is_empty() {
            let can_enrol = self.courses.self_enrol_enabled(ctx.course.id).await?;
            return Ok(BannerMode::SelfEnrol { can_enrol });
        }

        Ok(BannerMode::SwitchableRoles {
            targets: self.resolver.switchable_roles(ctx).await?,
        })
    }

    pub async fn render_banner(&self, ctx: &mut RequestContext) -> Result<String> {
        let mode = self.banner_mode(ctx).await?;
        let targets = BannerTargets {
            course: ctx.course.id,
            switch_url: &self.config.switch_url,
            enrol_url: &self.config.enrol_url,
            return_url: &ctx.page.url,
        };
        Ok(render::render(&mode, &targets, &self.config.strings))
    }
}
