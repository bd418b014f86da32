use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

id_type!(
    /// Host user id.
    UserId
);
id_type!(
    /// Host course id.
    CourseId
);
id_type!(
    /// Course category id. Courses always live in exactly one category.
    CategoryId
);
id_type!(
    /// Host role id. `RoleId::NONE` (0) means "no role", never a real role.
    RoleId
);

impl RoleId {
    pub const NONE: RoleId = RoleId(0);

    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}
