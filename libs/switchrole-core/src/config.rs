use serde::{Deserialize, Serialize};

use crate::ids::CourseId;
use crate::render::BannerStrings;

/// Capability a user needs above the course for the banner to apply.
pub const DEFAULT_ELEVATED_CAPABILITY: &str = "moodle/course:view";

/// Banner settings supplied by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerConfig {
    /// The site-level front page course. Never shows the banner.
    pub site_course_id: CourseId,
    pub elevated_capability: String,
    /// Target of the switch role buttons.
    pub switch_url: String,
    /// Target of the self enrolment button.
    pub enrol_url: String,
    /// Page paths (without query) that never show the banner.
    pub excluded_paths: Vec<String>,
    /// Page layouts that never show the banner.
    pub excluded_layouts: Vec<String>,
    pub strings: BannerStrings,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            site_course_id: CourseId(1),
            elevated_capability: DEFAULT_ELEVATED_CAPABILITY.to_string(),
            switch_url: "/course/switchrole.php".to_string(),
            enrol_url: "/enrol/index.php".to_string(),
            excluded_paths: vec!["/enrol/index.php".to_string()],
            excluded_layouts: vec!["popup".to_string(), "embedded".to_string()],
            strings: BannerStrings::default(),
        }
    }
}
