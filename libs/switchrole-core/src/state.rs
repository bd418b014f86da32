use std::sync::Arc;

use crate::error::Result;
use crate::host::PreferenceStore;
use crate::ids::{CourseId, RoleId, UserId};
use crate::session::Session;

/// Prefix of the per-course "last role" preference name.
pub const LAST_COURSE_ROLE: &str = "switchrolebanner_lastrole_";

/// Preference name holding the last role the user switched to in `course`.
pub fn last_role_key(course: CourseId) -> String {
    format!("{LAST_COURSE_ROLE}{course}")
}

/// Course id encoded in a last role preference name, if it is one.
pub fn course_from_key(name: &str) -> Option<CourseId> {
    let digits = name.strip_prefix(LAST_COURSE_ROLE)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().map(CourseId)
}

/// Durable last-role preferences and session-scoped banner dismissals.
#[derive(Clone)]
pub struct SwitchStateStore {
    preferences: Arc<dyn PreferenceStore>,
}

impl SwitchStateStore {
    pub fn new(preferences: Arc<dyn PreferenceStore>) -> Self {
        Self { preferences }
    }

    pub fn preferences(&self) -> &Arc<dyn PreferenceStore> {
        &self.preferences
    }

    /// Stores `role` as the user's last role in the course. `RoleId::NONE`
    /// removes the record instead of storing a zero.
    pub async fn set_last_role(&self, user: UserId, course: CourseId, role: RoleId) -> Result<()> {
        let key = last_role_key(course);
        if role.is_none() {
            self.preferences.unset(user, &key).await
        } else {
            self.preferences
                .set(user, &key, &role.0.to_string())
                .await
        }
    }

    pub async fn get_last_role(&self, user: UserId, course: CourseId) -> Result<RoleId> {
        let value = self.preferences.get(user, &last_role_key(course)).await?;
        Ok(value
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|id| *id > 0)
            .map(RoleId)
            .unwrap_or(RoleId::NONE))
    }

    pub fn hide_banner(&self, session: &mut Session, course: CourseId) {
        if session.hide_banner(course) {
            tracing::debug!(%course, "banner hidden for session");
        }
    }

    pub fn is_banner_hidden(&self, session: &Session, course: CourseId) -> bool {
        session.is_banner_hidden(course)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryPreferenceStore;

    fn store() -> (SwitchStateStore, Arc<MemoryPreferenceStore>) {
        let prefs = Arc::new(MemoryPreferenceStore::new());
        (SwitchStateStore::new(prefs.clone()), prefs)
    }

    #[test]
    fn key_round_trips_course_id() {
        assert_eq!(last_role_key(CourseId(42)), "switchrolebanner_lastrole_42");
        assert_eq!(course_from_key("switchrolebanner_lastrole_42"), Some(CourseId(42)));
        assert_eq!(course_from_key("switchrolebanner_lastrole_"), None);
        assert_eq!(course_from_key("switchrolebanner_lastrole_4x"), None);
        assert_eq!(course_from_key("other_42"), None);
    }

    #[tokio::test]
    async fn last_role_defaults_to_none() {
        let (state, _) = store();
        assert_eq!(
            state.get_last_role(UserId(1), CourseId(2)).await.unwrap(),
            RoleId::NONE
        );
    }

    #[tokio::test]
    async fn setting_zero_deletes_the_record() {
        let (state, prefs) = store();
        state
            .set_last_role(UserId(1), CourseId(2), RoleId(5))
            .await
            .unwrap();
        assert_eq!(
            state.get_last_role(UserId(1), CourseId(2)).await.unwrap(),
            RoleId(5)
        );
        assert!(prefs.contains(UserId(1), &last_role_key(CourseId(2))));

        state
            .set_last_role(UserId(1), CourseId(2), RoleId::NONE)
            .await
            .unwrap();
        assert_eq!(
            state.get_last_role(UserId(1), CourseId(2)).await.unwrap(),
            RoleId::NONE
        );
        assert!(!prefs.contains(UserId(1), &last_role_key(CourseId(2))));
    }

    #[tokio::test]
    async fn garbage_values_read_as_none() {
        let (state, prefs) = store();
        prefs
            .set(UserId(1), &last_role_key(CourseId(2)), "student")
            .await
            .unwrap();
        assert_eq!(
            state.get_last_role(UserId(1), CourseId(2)).await.unwrap(),
            RoleId::NONE
        );
    }

    #[test]
    fn hiding_is_idempotent_and_per_course() {
        let (state, _) = store();
        let mut session = Session::new();
        let (first, middle, last, never) = (CourseId(3), CourseId(4), CourseId(5), CourseId(6));

        assert!(!state.is_banner_hidden(&session, first));
        state.hide_banner(&mut session, first);
        state.hide_banner(&mut session, first);
        assert!(state.is_banner_hidden(&session, first));

        state.hide_banner(&mut session, middle);
        assert!(!state.is_banner_hidden(&session, last));
        state.hide_banner(&mut session, last);

        assert!(state.is_banner_hidden(&session, first));
        assert!(state.is_banner_hidden(&session, middle));
        assert!(state.is_banner_hidden(&session, last));
        assert!(!state.is_banner_hidden(&session, never));
    }
}
