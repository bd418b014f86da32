use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::ids::{CourseId, RoleId};

/// Session attribute holding the courses whose banner was dismissed.
pub const HIDDEN_BANNERS_KEY: &str = "switchrolebanner_hidden";

/// Per-session state the banner reads and writes.
///
/// Serialized only when the host persists the session; the hidden set is a
/// JSON array under [`HIDDEN_BANNERS_KEY`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(
        rename = "switchrolebanner_hidden",
        default,
        skip_serializing_if = "BTreeSet::is_empty"
    )]
    hidden_banners: BTreeSet<CourseId>,

    /// Host access state: the role each course is switched to.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    switched_roles: BTreeMap<CourseId, RoleId>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the course was not hidden before.
    pub fn hide_banner(&mut self, course: CourseId) -> bool {
        self.hidden_banners.insert(course)
    }

    pub fn is_banner_hidden(&self, course: CourseId) -> bool {
        self.hidden_banners.contains(&course)
    }

    pub fn hidden_banners(&self) -> impl Iterator<Item = CourseId> + '_ {
        self.hidden_banners.iter().copied()
    }

    /// The role the course is switched to, `RoleId::NONE` when not switched.
    pub fn switched_role(&self, course: CourseId) -> RoleId {
        self.switched_roles
            .get(&course)
            .copied()
            .unwrap_or(RoleId::NONE)
    }

    /// Switches the course to `role`; `RoleId::NONE` switches back.
    pub fn switch_role(&mut self, course: CourseId, role: RoleId) {
        if role.is_none() {
            self.switched_roles.remove(&course);
        } else {
            self.switched_roles.insert(course, role);
        }
    }
}
