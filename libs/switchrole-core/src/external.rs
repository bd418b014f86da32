//! The `hide_banner` remote call.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::host::CourseDirectory;
use crate::ids::CourseId;
use crate::session::Session;
use crate::state::SwitchStateStore;

#[derive(Debug, Clone, Deserialize)]
pub struct HideBannerParams {
    pub courseid: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HideBannerResult {
    pub result: bool,
}

#[derive(Clone)]
pub struct HideBannerEndpoint {
    courses: Arc<dyn CourseDirectory>,
    state: SwitchStateStore,
}

impl HideBannerEndpoint {
    pub fn new(courses: Arc<dyn CourseDirectory>, state: SwitchStateStore) -> Self {
        Self { courses, state }
    }

    /// Hides the banner for the course in the caller's session.
    ///
    /// The session is only touched once the course id has been validated and
    /// resolved.
    pub async fn hide_banner(
        &self,
        session: &mut Session,
        params: &HideBannerParams,
    ) -> Result<HideBannerResult> {
        let course = match params.courseid {
            None => return Err(Error::validation("courseid", "is required")),
            Some(id) if id <= 0 => {
                return Err(Error::validation("courseid", "must be a positive integer"))
            }
            Some(id) => CourseId(id),
        };

        if self.courses.course(course).await?.is_none() {
            return Err(Error::not_found(format!("course {course}")));
        }

        self.state.hide_banner(session, course);
        Ok(HideBannerResult { result: true })
    }
}
