//! PostgreSQL-backed course, role and capability lookups.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use switchrole_core::host::{AccessControl, CourseDirectory, RoleSource};
use switchrole_core::{CategoryId, Course, CourseId, Result, RoleAssignment, RoleId, UserId};

use crate::db::pool::{storage_error, DbPool};
use crate::db::schema::{capability_grants, course_categories, courses, role_assignments, roles};
use crate::models::course::CourseRow;
use crate::models::role::Role;

/// Guards against cycles in a corrupted category tree.
const MAX_CATEGORY_DEPTH: usize = 64;

#[derive(Clone)]
pub struct PgDirectory {
    db: DbPool,
}

impl PgDirectory {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// The category and its ancestors, nearest first.
    async fn category_path(&self, category: CategoryId) -> Result<Vec<i64>> {
        let mut conn = self.db.get().await.map_err(storage_error)?;
        let mut path = Vec::new();
        let mut next = Some(category.0);

        while let Some(id) = next {
            if path.len() >= MAX_CATEGORY_DEPTH || path.contains(&id) {
                break;
            }
            let parent: Option<Option<i64>> = course_categories::table
                .find(id)
                .select(course_categories::parent_id)
                .first(&mut conn)
                .await
                .optional()
                .map_err(storage_error)?;

            match parent {
                Some(parent) => {
                    path.push(id);
                    next = parent;
                }
                None if path.is_empty() => {
                    return Err(switchrole_core::Error::not_found(format!(
                        "category {category}"
                    )))
                }
                None => break,
            }
        }
        Ok(path)
    }
}

#[async_trait]
impl RoleSource for PgDirectory {
    async fn course_roles(&self, user: UserId, course: CourseId) -> Result<Vec<RoleAssignment>> {
        let mut conn = self.db.get().await.map_err(storage_error)?;
        let rows: Vec<Role> = role_assignments::table
            .inner_join(roles::table)
            .filter(role_assignments::user_id.eq(user.0))
            .filter(role_assignments::course_id.eq(course.0))
            .select(Role::as_select())
            .distinct()
            .order((roles::sortorder.asc(), roles::id.asc()))
            .load(&mut conn)
            .await
            .map_err(storage_error)?;

        Ok(rows.into_iter().map(RoleAssignment::from).collect())
    }

    async fn switchable_roles(&self, _course: CourseId) -> Result<Vec<RoleAssignment>> {
        let mut conn = self.db.get().await.map_err(storage_error)?;
        let rows: Vec<Role> = roles::table
            .filter(roles::switchable.eq(true))
            .select(Role::as_select())
            .order((roles::sortorder.asc(), roles::id.asc()))
            .load(&mut conn)
            .await
            .map_err(storage_error)?;

        Ok(rows.into_iter().map(RoleAssignment::from).collect())
    }

    async fn role_name(&self, role: RoleId, _course: CourseId) -> Result<Option<String>> {
        let mut conn = self.db.get().await.map_err(storage_error)?;
        let row: Option<Role> = roles::table
            .find(role.0)
            .select(Role::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(storage_error)?;

        Ok(row.map(|r| r.display_name().to_string()))
    }
}

#[async_trait]
impl AccessControl for PgDirectory {
    async fn has_capability(
        &self,
        user: UserId,
        capability: &str,
        category: CategoryId,
    ) -> Result<bool> {
        let path = self.category_path(category).await?;

        let mut conn = self.db.get().await.map_err(storage_error)?;
        let grants: i64 = capability_grants::table
            .filter(capability_grants::user_id.eq(user.0))
            .filter(capability_grants::capability.eq(capability))
            .filter(
                capability_grants::category_id
                    .is_null()
                    .or(capability_grants::category_id.eq_any(path)),
            )
            .count()
            .get_result(&mut conn)
            .await
            .map_err(storage_error)?;

        Ok(grants > 0)
    }
}

#[async_trait]
impl CourseDirectory for PgDirectory {
    async fn course(&self, id: CourseId) -> Result<Option<Course>> {
        let mut conn = self.db.get().await.map_err(storage_error)?;
        let row: Option<CourseRow> = courses::table
            .find(id.0)
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(storage_error)?;

        Ok(row.map(Course::from))
    }

    async fn self_enrol_enabled(&self, course: CourseId) -> Result<bool> {
        let mut conn = self.db.get().await.map_err(storage_error)?;
        let enabled: Option<bool> = courses::table
            .find(course.0)
            .select(courses::self_enrol)
            .first(&mut conn)
            .await
            .optional()
            .map_err(storage_error)?;

        Ok(enabled.unwrap_or(false))
    }
}
