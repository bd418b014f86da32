use diesel::prelude::*;

use switchrole_core::{CategoryId, Course, CourseId};

use crate::db::schema::courses;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = courses)]
pub struct CourseRow {
    pub id: i64,
    pub category_id: i64,
    pub fullname: String,
    pub self_enrol: bool,
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        Course {
            id: CourseId(row.id),
            category: CategoryId(row.category_id),
            fullname: row.fullname,
        }
    }
}
