//! PostgreSQL-backed user preferences.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use switchrole_core::host::PreferenceStore;
use switchrole_core::{Result, UserId};

use crate::db::pool::{storage_error, DbPool};
use crate::db::schema::user_preferences;
use crate::models::preference::{NewPreference, Preference};

#[derive(Clone)]
pub struct PgPreferenceStore {
    db: DbPool,
}

impl PgPreferenceStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PreferenceStore for PgPreferenceStore {
    async fn get(&self, user: UserId, name: &str) -> Result<Option<String>> {
        let mut conn = self.db.get().await.map_err(storage_error)?;
        let row: Option<Preference> = user_preferences::table
            .filter(user_preferences::user_id.eq(user.0))
            .filter(user_preferences::name.eq(name))
            .select(Preference::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(storage_error)?;

        Ok(row.map(|p| p.value))
    }

    async fn set(&self, user: UserId, name: &str, value: &str) -> Result<()> {
        let now = Utc::now();
        let mut conn = self.db.get().await.map_err(storage_error)?;
        diesel::insert_into(user_preferences::table)
            .values(NewPreference {
                user_id: user.0,
                name,
                value,
                updated_at: now,
            })
            .on_conflict((user_preferences::user_id, user_preferences::name))
            .do_update()
            .set((
                user_preferences::value.eq(value),
                user_preferences::updated_at.eq(now),
            ))
            .execute(&mut conn)
            .await
            .map_err(storage_error)?;

        Ok(())
    }

    async fn unset(&self, user: UserId, name: &str) -> Result<()> {
        let mut conn = self.db.get().await.map_err(storage_error)?;
        diesel::delete(
            user_preferences::table
                .filter(user_preferences::user_id.eq(user.0))
                .filter(user_preferences::name.eq(name)),
        )
        .execute(&mut conn)
        .await
        .map_err(storage_error)?;

        Ok(())
    }

    async fn names_with_prefix(&self, user: UserId, prefix: &str) -> Result<Vec<String>> {
        let mut conn = self.db.get().await.map_err(storage_error)?;
        let names: Vec<String> = user_preferences::table
            .filter(user_preferences::user_id.eq(user.0))
            .filter(user_preferences::name.like(format!("{}%", escape_like(prefix))))
            .select(user_preferences::name)
            .order(user_preferences::name.asc())
            .load(&mut conn)
            .await
            .map_err(storage_error)?;

        Ok(names)
    }

    async fn users_with(&self, name: &str) -> Result<Vec<UserId>> {
        let mut conn = self.db.get().await.map_err(storage_error)?;
        let ids: Vec<i64> = user_preferences::table
            .filter(user_preferences::name.eq(name))
            .select(user_preferences::user_id)
            .order(user_preferences::user_id.asc())
            .load(&mut conn)
            .await
            .map_err(storage_error)?;

        Ok(ids.into_iter().map(UserId).collect())
    }

    async fn delete_all_named(&self, name: &str) -> Result<()> {
        let mut conn = self.db.get().await.map_err(storage_error)?;
        let removed = diesel::delete(user_preferences::table.filter(user_preferences::name.eq(name)))
            .execute(&mut conn)
            .await
            .map_err(storage_error)?;

        tracing::debug!(name, removed, "deleted preferences");
        Ok(())
    }
}

/// Escapes LIKE wildcards; the prefix itself contains `_`.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
