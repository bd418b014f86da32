use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::db::schema::user_preferences;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = user_preferences)]
pub struct Preference {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = user_preferences)]
pub struct NewPreference<'a> {
    pub user_id: i64,
    pub name: &'a str,
    pub value: &'a str,
    pub updated_at: DateTime<Utc>,
}
