use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::host::{AccessControl, CourseDirectory, PreferenceStore, RoleSource};
use crate::ids::{CategoryId, CourseId, RoleId, UserId};
use crate::model::{Course, RoleAssignment};

// ---------------------------------------------------------------------------
// Host directory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct RoleDef {
    shortname: String,
    name: String,
    switchable: bool,
}

#[derive(Default)]
struct DirectoryData {
    categories: HashSet<CategoryId>,
    courses: BTreeMap<CourseId, Course>,
    self_enrol: HashSet<CourseId>,
    /// Ordered by id, which doubles as the host sort order.
    roles: BTreeMap<RoleId, RoleDef>,
    assignments: HashMap<(UserId, CourseId), BTreeSet<RoleId>>,
    /// `None` category means the grant applies site-wide.
    grants: HashSet<(UserId, Option<CategoryId>, String)>,
}

/// In-memory host: courses, roles, assignments and capability grants.
pub struct MemoryDirectory {
    data: Mutex<DirectoryData>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self {
            data: Mutex::new(DirectoryData::default()),
        }
    }

    pub fn add_category(&self, id: CategoryId) {
        self.data.lock().categories.insert(id);
    }

    pub fn add_course(&self, course: Course) {
        let mut data = self.data.lock();
        data.categories.insert(course.category);
        data.courses.insert(course.id, course);
    }

    pub fn set_self_enrol(&self, course: CourseId, enabled: bool) {
        let mut data = self.data.lock();
        if enabled {
            data.self_enrol.insert(course);
        } else {
            data.self_enrol.remove(&course);
        }
    }

    pub fn add_role(&self, id: RoleId, shortname: &str, name: &str, switchable: bool) {
        self.data.lock().roles.insert(
            id,
            RoleDef {
                shortname: shortname.to_string(),
                name: name.to_string(),
                switchable,
            },
        );
    }

    /// Enrols the user in the course with the given role.
    pub fn assign(&self, user: UserId, course: CourseId, role: RoleId) {
        self.data
            .lock()
            .assignments
            .entry((user, course))
            .or_default()
            .insert(role);
    }

    pub fn unassign(&self, user: UserId, course: CourseId, role: RoleId) {
        if let Some(roles) = self.data.lock().assignments.get_mut(&(user, course)) {
            roles.remove(&role);
        }
    }

    /// Grants a capability at a category, or site-wide when `category` is `None`.
    pub fn grant(&self, user: UserId, category: Option<CategoryId>, capability: &str) {
        self.data
            .lock()
            .grants
            .insert((user, category, capability.to_string()));
    }

    pub fn revoke(&self, user: UserId, category: Option<CategoryId>, capability: &str) {
        self.data
            .lock()
            .grants
            .remove(&(user, category, capability.to_string()));
    }
}

impl Default for MemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoleSource for MemoryDirectory {
    async fn course_roles(&self, user: UserId, course: CourseId) -> Result<Vec<RoleAssignment>> {
        let data = self.data.lock();
        let Some(assigned) = data.assignments.get(&(user, course)) else {
            return Ok(Vec::new());
        };
        Ok(assigned
            .iter()
            .filter_map(|id| {
                data.roles
                    .get(id)
                    .map(|def| RoleAssignment::new(*id, &def.shortname, &def.name))
            })
            .collect())
    }

    async fn switchable_roles(&self, _course: CourseId) -> Result<Vec<RoleAssignment>> {
        let data = self.data.lock();
        Ok(data
            .roles
            .iter()
            .filter(|(_, def)| def.switchable)
            .map(|(id, def)| RoleAssignment::new(*id, &def.shortname, &def.name))
            .collect())
    }

    async fn role_name(&self, role: RoleId, _course: CourseId) -> Result<Option<String>> {
        Ok(self.data.lock().roles.get(&role).map(|def| def.name.clone()))
    }
}

#[async_trait]
impl AccessControl for MemoryDirectory {
    async fn has_capability(
        &self,
        user: UserId,
        capability: &str,
        category: CategoryId,
    ) -> Result<bool> {
        let data = self.data.lock();
        if !data.categories.contains(&category) {
            return Err(Error::not_found(format!("course category {category}")));
        }
        let capability = capability.to_string();
        Ok(data.grants.contains(&(user, None, capability.clone()))
            || data.grants.contains(&(user, Some(category), capability)))
    }
}

#[async_trait]
impl CourseDirectory for MemoryDirectory {
    async fn course(&self, id: CourseId) -> Result<Option<Course>> {
        Ok(self.data.lock().courses.get(&id).cloned())
    }

    async fn self_enrol_enabled(&self, course: CourseId) -> Result<bool> {
        Ok(self.data.lock().self_enrol.contains(&course))
    }
}

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

/// In-memory user preference table.
pub struct MemoryPreferenceStore {
    data: Mutex<BTreeMap<(UserId, String), String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self {
            data: Mutex::new(BTreeMap::new()),
        }
    }

    /// Whether a record exists for the user, regardless of its value.
    pub fn contains(&self, user: UserId, name: &str) -> bool {
        self.data.lock().contains_key(&(user, name.to_string()))
    }
}

impl Default for MemoryPreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn get(&self, user: UserId, name: &str) -> Result<Option<String>> {
        Ok(self.data.lock().get(&(user, name.to_string())).cloned())
    }

    async fn set(&self, user: UserId, name: &str, value: &str) -> Result<()> {
        self.data
            .lock()
            .insert((user, name.to_string()), value.to_string());
        Ok(())
    }

    async fn unset(&self, user: UserId, name: &str) -> Result<()> {
        self.data.lock().remove(&(user, name.to_string()));
        Ok(())
    }

    async fn names_with_prefix(&self, user: UserId, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .data
            .lock()
            .keys()
            .filter(|(owner, name)| *owner == user && name.starts_with(prefix))
            .map(|(_, name)| name.clone())
            .collect())
    }

    async fn users_with(&self, name: &str) -> Result<Vec<UserId>> {
        Ok(self
            .data
            .lock()
            .keys()
            .filter(|(_, key)| key == name)
            .map(|(user, _)| *user)
            .collect())
    }

    async fn delete_all_named(&self, name: &str) -> Result<()> {
        self.data.lock().retain(|(_, key), _| key != name);
        Ok(())
    }
}
