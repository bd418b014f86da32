//! Shared fixture: one course in one category, an administrator with a site
//! wide view capability who is enrolled in the course as a student.

use std::sync::Arc;

use crate::config::BannerConfig;
use crate::context::RequestContext;
use crate::external::HideBannerEndpoint;
use crate::hooks::SwitchRoleBanner;
use crate::ids::{CategoryId, CourseId, RoleId, UserId};
use crate::memory::{MemoryDirectory, MemoryPreferenceStore};
use crate::model::{Course, Page, User};
use crate::orchestrator::SwitchOrchestrator;
use crate::policy::BannerPolicy;
use crate::resolver::RoleResolver;
use crate::session::Session;
use crate::state::SwitchStateStore;

pub const SITE: CourseId = CourseId(1);
pub const COURSE: CourseId = CourseId(2);
pub const CATEGORY: CategoryId = CategoryId(1);
pub const ADMIN: UserId = UserId(10);
pub const CAPABILITY: &str = "moodle/course:view";

pub const MANAGER: RoleId = RoleId(1);
pub const EDITING_TEACHER: RoleId = RoleId(3);
pub const TEACHER: RoleId = RoleId(4);
pub const STUDENT: RoleId = RoleId(5);

pub struct Fixture {
    pub directory: Arc<MemoryDirectory>,
    pub prefs: Arc<MemoryPreferenceStore>,
    pub config: BannerConfig,
    pub banner: SwitchRoleBanner,
    pub resolver: RoleResolver,
    pub state: SwitchStateStore,
    pub policy: BannerPolicy,
    pub orchestrator: SwitchOrchestrator,
    pub endpoint: HideBannerEndpoint,
}

impl Fixture {
    pub fn page(&self, url: &str, layout: &str, session: Session) -> RequestContext {
        RequestContext::new(
            User::new(ADMIN),
            Course {
                id: COURSE,
                category: CATEGORY,
                fullname: "Test course".to_string(),
            },
            Page::new(url, layout),
            session,
        )
    }

    pub fn course_page(&self) -> RequestContext {
        self.page("/course/view.php?id=2", "course", Session::new())
    }
}

pub fn fixture() -> Fixture {
    let directory = Arc::new(MemoryDirectory::new());
    directory.add_course(Course {
        id: SITE,
        category: CATEGORY,
        fullname: "Site".to_string(),
    });
    directory.add_course(Course {
        id: COURSE,
        category: CATEGORY,
        fullname: "Test course".to_string(),
    });
    directory.add_role(MANAGER, "manager", "Manager", false);
    directory.add_role(EDITING_TEACHER, "editingteacher", "Teacher", true);
    directory.add_role(TEACHER, "teacher", "Non-editing teacher", true);
    directory.add_role(STUDENT, "student", "Student", true);

    directory.grant(ADMIN, None, CAPABILITY);
    directory.assign(ADMIN, COURSE, STUDENT);

    let prefs = Arc::new(MemoryPreferenceStore::new());
    let config = BannerConfig::default();
    let banner = SwitchRoleBanner::new(config.clone(), directory.clone(), prefs.clone());

    Fixture {
        resolver: banner.resolver().clone(),
        state: banner.state().clone(),
        policy: banner.policy().clone(),
        orchestrator: banner.orchestrator().clone(),
        endpoint: banner.endpoint().clone(),
        directory,
        prefs,
        config,
        banner,
    }
}
