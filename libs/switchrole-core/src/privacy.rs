//! Export and erasure of stored last-role preferences.

use std::sync::Arc;

use serde::Serialize;

use crate::error::Result;
use crate::host::{CourseDirectory, PreferenceStore, RoleSource};
use crate::ids::{CourseId, RoleId, UserId};
use crate::state::{course_from_key, last_role_key, LAST_COURSE_ROLE};

/// Description of a kind of personal data held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferenceMetadata {
    pub name: String,
    pub description: &'static str,
}

/// One exported preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedPreference {
    pub course_id: CourseId,
    pub key: String,
    pub role_id: RoleId,
    pub description: String,
}

#[derive(Clone)]
pub struct PrivacyProvider {
    preferences: Arc<dyn PreferenceStore>,
    roles: Arc<dyn RoleSource>,
    courses: Arc<dyn CourseDirectory>,
}

impl PrivacyProvider {
    pub fn new(
        preferences: Arc<dyn PreferenceStore>,
        roles: Arc<dyn RoleSource>,
        courses: Arc<dyn CourseDirectory>,
    ) -> Self {
        Self {
            preferences,
            roles,
            courses,
        }
    }

    pub fn metadata() -> Vec<PreferenceMetadata> {
        vec![PreferenceMetadata {
            name: format!("{LAST_COURSE_ROLE}ID"),
            description: "Records the last role the user switched to in a course",
        }]
    }

    /// Courses the user has a stored preference for.
    pub async fn courses_for_user(&self, user: UserId) -> Result<Vec<CourseId>> {
        let mut ids: Vec<CourseId> = self
            .preferences
            .names_with_prefix(user, LAST_COURSE_ROLE)
            .await?
            .iter()
            .filter_map(|name| course_from_key(name))
            .collect();
        ids.sort();
        ids.dedup();

        let mut courses = Vec::with_capacity(ids.len());
        for id in ids {
            if self.courses.course(id).await?.is_some() {
                courses.push(id);
            }
        }
        Ok(courses)
    }

    pub async fn users_in_course(&self, course: CourseId) -> Result<Vec<UserId>> {
        self.preferences.users_with(&last_role_key(course)).await
    }

    pub async fn export_user_data(
        &self,
        user: UserId,
        courses: &[CourseId],
    ) -> Result<Vec<ExportedPreference>> {
        let mut exported = Vec::new();
        for &course_id in courses {
            let Some(course) = self.courses.course(course_id).await? else {
                continue;
            };
            let key = last_role_key(course_id);
            let Some(value) = self.preferences.get(user, &key).await? else {
                continue;
            };
            let Ok(role_id) = value.trim().parse::<i64>().map(RoleId) else {
                continue;
            };
            let role_name = self
                .roles
                .role_name(role_id, course_id)
                .await?
                .unwrap_or_else(|| role_id.to_string());

            exported.push(ExportedPreference {
                course_id,
                key,
                role_id,
                description: format!(
                    "You last switched to the \"{}\" role for \"{}\"",
                    role_name, course.fullname
                ),
            });
        }
        Ok(exported)
    }

    /// Removes every user's preference for the course.
    pub async fn delete_for_course(&self, course: CourseId) -> Result<()> {
        self.preferences
            .delete_all_named(&last_role_key(course))
            .await
    }

    pub async fn delete_for_user(&self, user: UserId, courses: &[CourseId]) -> Result<()> {
        for &course in courses {
            self.preferences.unset(user, &last_role_key(course)).await?;
        }
        Ok(())
    }

    pub async fn delete_for_users(&self, course: CourseId, users: &[UserId]) -> Result<()> {
        let key = last_role_key(course);
        for &user in users {
            self.preferences.unset(user, &key).await?;
        }
        Ok(())
    }
}
