use diesel::prelude::*;

use switchrole_core::RoleAssignment;

use crate::db::schema::roles;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = roles)]
pub struct Role {
    pub id: i64,
    pub shortname: String,
    pub name: String,
    pub sortorder: i32,
    pub switchable: bool,
}

impl Role {
    /// Display name, falling back to the short name when none is set.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.shortname
        } else {
            &self.name
        }
    }
}

impl From<Role> for RoleAssignment {
    fn from(role: Role) -> Self {
        RoleAssignment::new(role.id, &role.shortname, role.display_name())
    }
}
