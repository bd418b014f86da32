use serde::{Deserialize, Serialize};

use crate::ids::{CategoryId, CourseId, RoleId, UserId};

/// The authenticated user of the current request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub is_guest: bool,
}

impl User {
    pub fn new(id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            is_guest: false,
        }
    }

    pub fn guest(id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            is_guest: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub category: CategoryId,
    pub fullname: String,
}

/// A role a user holds in a course context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub id: RoleId,
    pub shortname: String,
    /// Display name of the role in the course context.
    pub name: String,
}

impl RoleAssignment {
    pub fn new(id: impl Into<RoleId>, shortname: &str, name: &str) -> Self {
        Self {
            id: id.into(),
            shortname: shortname.to_string(),
            name: name.to_string(),
        }
    }
}

/// The page being rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Path plus query string, e.g. `/course/view.php?id=2`.
    pub url: String,
    /// Host page layout (`course`, `incourse`, `popup`, ...).
    pub layout: String,
}

impl Page {
    pub fn new(url: &str, layout: &str) -> Self {
        Self {
            url: url.to_string(),
            layout: layout.to_string(),
        }
    }

    /// The url without its query string.
    pub fn path(&self) -> &str {
        self.url.split('?').next().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_path_strips_query() {
        let page = Page::new("/enrol/index.php?id=4", "incourse");
        assert_eq!(page.path(), "/enrol/index.php");
        assert_eq!(Page::new("/course/view.php", "course").path(), "/course/view.php");
    }
}
