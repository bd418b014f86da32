use std::sync::Arc;

use crate::config::BannerConfig;
use crate::context::RequestContext;
use crate::error::Result;
use crate::external::{HideBannerEndpoint, HideBannerParams, HideBannerResult};
use crate::host::{AccessControl, CourseDirectory, PreferenceStore, RoleSource};
use crate::orchestrator::{SwitchOrchestrator, SwitchOutcome, SwitchRequest};
use crate::policy::BannerPolicy;
use crate::privacy::PrivacyProvider;
use crate::resolver::RoleResolver;
use crate::session::Session;
use crate::state::SwitchStateStore;

/// The banner as the host sees it: two page hooks and one remote call.
#[derive(Clone)]
pub struct SwitchRoleBanner {
    config: Arc<BannerConfig>,
    courses: Arc<dyn CourseDirectory>,
    resolver: RoleResolver,
    state: SwitchStateStore,
    policy: BannerPolicy,
    orchestrator: SwitchOrchestrator,
    endpoint: HideBannerEndpoint,
    privacy: PrivacyProvider,
}

impl SwitchRoleBanner {
    pub fn new<H>(config: BannerConfig, host: Arc<H>, preferences: Arc<dyn PreferenceStore>) -> Self
    where
        H: RoleSource + AccessControl + CourseDirectory + 'static,
    {
        Self::from_parts(config, host.clone(), host.clone(), host, preferences)
    }

    pub fn from_parts(
        config: BannerConfig,
        roles: Arc<dyn RoleSource>,
        access: Arc<dyn AccessControl>,
        courses: Arc<dyn CourseDirectory>,
        preferences: Arc<dyn PreferenceStore>,
    ) -> Self {
        let config = Arc::new(config);
        let resolver = RoleResolver::new(
            roles.clone(),
            access,
            config.elevated_capability.clone(),
        );
        let state = SwitchStateStore::new(preferences.clone());
        let policy = BannerPolicy::new(
            config.clone(),
            resolver.clone(),
            state.clone(),
            courses.clone(),
        );
        let orchestrator =
            SwitchOrchestrator::new(config.site_course_id, resolver.clone(), state.clone());
        let endpoint = HideBannerEndpoint::new(courses.clone(), state.clone());
        let privacy = PrivacyProvider::new(preferences, roles, courses.clone());

        Self {
            config,
            courses,
            resolver,
            state,
            policy,
            orchestrator,
            endpoint,
            privacy,
        }
    }

    pub fn config(&self) -> &BannerConfig {
        &self.config
    }

    pub fn courses(&self) -> &Arc<dyn CourseDirectory> {
        &self.courses
    }

    pub fn resolver(&self) -> &RoleResolver {
        &self.resolver
    }

    pub fn state(&self) -> &SwitchStateStore {
        &self.state
    }

    pub fn policy(&self) -> &BannerPolicy {
        &self.policy
    }

    pub fn orchestrator(&self) -> &SwitchOrchestrator {
        &self.orchestrator
    }

    pub fn endpoint(&self) -> &HideBannerEndpoint {
        &self.endpoint
    }

    pub fn privacy(&self) -> &PrivacyProvider {
        &self.privacy
    }

    /// Hook run after login: stores or re-applies the user's last role.
    pub async fn after_require_login(
        &self,
        ctx: &mut RequestContext,
        request: &SwitchRequest,
    ) -> Result<SwitchOutcome> {
        self.orchestrator.handle_role_switch(ctx, request).await
    }

    /// Hook run before the page footer: the banner markup, if any.
    pub async fn before_footer(&self, ctx: &mut RequestContext) -> Result<Option<String>> {
        if !self.policy.should_show_banner(ctx).await? {
            return Ok(None);
        }
        self.policy.render_banner(ctx).await.map(Some)
    }

    pub async fn hide_banner(
        &self,
        session: &mut Session,
        params: &HideBannerParams,
    ) -> Result<HideBannerResult> {
        self.endpoint.hide_banner(session, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, COURSE, STUDENT};

    #[tokio::test]
    async fn footer_renders_banner_for_elevated_student() {
        let fx = testing::fixture();
        let mut ctx = fx.course_page();

        let html = fx.banner.before_footer(&mut ctx).await.unwrap().unwrap();
        assert!(html.contains(&fx.config.strings.viewing_as_admin));
    }

    #[tokio::test]
    async fn footer_is_empty_once_hidden() {
        let fx = testing::fixture();
        let mut session = Session::new();
        fx.banner
            .hide_banner(
                &mut session,
                &HideBannerParams {
                    courseid: Some(COURSE.0),
                },
            )
            .await
            .unwrap();

        let mut ctx = fx.page("/course/view.php?id=2", "course", session);
        assert!(fx.banner.before_footer(&mut ctx).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn login_hook_reapplies_last_role_before_footer() {
        let fx = testing::fixture();
        fx.banner
            .state()
            .set_last_role(testing::ADMIN, COURSE, STUDENT)
            .await
            .unwrap();

        let mut ctx = fx.course_page();
        let outcome = fx
            .banner
            .after_require_login(&mut ctx, &SwitchRequest::default())
            .await
            .unwrap();
        assert_eq!(outcome, SwitchOutcome::AutoSwitched(STUDENT));

        let html = fx.banner.before_footer(&mut ctx).await.unwrap().unwrap();
        assert!(html.contains("<b>Student</b>"));
        assert_eq!(ctx.into_session().switched_role(COURSE), STUDENT);
    }
}
