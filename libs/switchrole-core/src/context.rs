use crate::ids::RoleId;
use crate::model::{Course, Page, RoleAssignment, User};
use crate::session::Session;

/// Lookups memoized for the lifetime of one request.
#[derive(Debug, Default)]
pub(crate) struct RoleCache {
    pub(crate) course_roles: Option<Vec<RoleAssignment>>,
    pub(crate) switchable_roles: Option<Vec<RoleAssignment>>,
    pub(crate) elevated: Option<bool>,
}

/// Everything one page render or remote call works on.
///
/// Built per request and dropped with it; the session is handed back to the
/// host with [`RequestContext::into_session`] so it can be persisted.
#[derive(Debug)]
pub struct RequestContext {
    pub user: User,
    pub course: Course,
    pub page: Page,
    pub session: Session,
    pub(crate) cache: RoleCache,
}

impl RequestContext {
    pub fn new(user: User, course: Course, page: Page, session: Session) -> Self {
        Self {
            user,
            course,
            page,
            session,
            cache: RoleCache::default(),
        }
    }

    /// Switches the course to `role` in the session's access state.
    pub fn switch_role(&mut self, role: RoleId) {
        self.session.switch_role(self.course.id, role);
        // Switchability depends on the active switch.
        self.cache.switchable_roles = None;
    }

    pub fn into_session(self) -> Session {
        self.session
    }
}
