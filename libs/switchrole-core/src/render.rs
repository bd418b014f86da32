//! HTML for the three banner presentations.

use serde::{Deserialize, Serialize};

use crate::ids::{CourseId, RoleId};
use crate::policy::BannerMode;

const BUTTON_CONTAINER: &str = "switchrolebanner-btncontainer mr-2 mb-1";

/// User-facing banner text. `{role}` in `viewing_as_role` is replaced with the
/// (escaped) role name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerStrings {
    pub viewing_as_admin: String,
    pub viewing_as_role: String,
    pub can_self_enrol: String,
    pub switch_role_to: String,
    pub switch_role_return: String,
    pub enrol_me: String,
}

impl Default for BannerStrings {
    fn default() -> Self {
        Self {
            viewing_as_admin:
                "You are currently viewing this course with your site or course category role."
                    .to_string(),
            viewing_as_role:
                "You are currently viewing this course with your <b>{role}</b> course role."
                    .to_string(),
            can_self_enrol: "You are currently viewing this course with your site or course \
                             category role but can enrol yourself in this course."
                .to_string(),
            switch_role_to: "Switch role to...".to_string(),
            switch_role_return: "Return to my normal role".to_string(),
            enrol_me: "Enrol me".to_string(),
        }
    }
}

/// Where the banner's buttons point.
pub struct BannerTargets<'a> {
    pub course: CourseId,
    pub switch_url: &'a str,
    pub enrol_url: &'a str,
    pub return_url: &'a str,
}

pub fn render(mode: &BannerMode, targets: &BannerTargets<'_>, strings: &BannerStrings) -> String {
    let (message, buttons) = match mode {
        BannerMode::ActiveSwitch { role_name } => (
            strings
                .viewing_as_role
                .replace("{role}", &html_escape(role_name)),
            container(&switch_button(targets, RoleId::NONE, &strings.switch_role_return)),
        ),
        BannerMode::SelfEnrol { can_enrol: true } => (
            html_escape(&strings.can_self_enrol),
            container(&enrol_button(targets, &strings.enrol_me)),
        ),
        BannerMode::SelfEnrol { can_enrol: false } => {
            (html_escape(&strings.viewing_as_admin), String::new())
        }
        BannerMode::SwitchableRoles { targets: roles } => {
            let mut buttons = container(&html_escape(&strings.switch_role_to));
            for role in roles {
                buttons.push_str(&container(&switch_button(targets, role.id, &role.name)));
            }
            (html_escape(&strings.viewing_as_admin), buttons)
        }
    };

    format!(
        r#"<div class="switchrolebanner alert alert-info" role="alert" data-courseid="{course}"><button type="button" class="close" data-action="hide-banner" aria-label="Close">&times;</button><div class="switchrolebanner-message">{message}</div><div class="switchrolebanner-buttons d-flex flex-wrap">{buttons}</div></div>"#,
        course = targets.course,
    )
}

fn container(inner: &str) -> String {
    format!(r#"<div class="{BUTTON_CONTAINER}">{inner}</div>"#)
}

fn switch_button(targets: &BannerTargets<'_>, role: RoleId, label: &str) -> String {
    format!(
        r#"<form method="post" action="{action}"><input type="hidden" name="id" value="{course}"><input type="hidden" name="switchrole" value="{role}"><input type="hidden" name="returnurl" value="{returnurl}"><button type="submit" class="btn btn-secondary">{label}</button></form>"#,
        action = html_escape(targets.switch_url),
        course = targets.course,
        returnurl = html_escape(targets.return_url),
        label = html_escape(label),
    )
}

fn enrol_button(targets: &BannerTargets<'_>, label: &str) -> String {
    format!(
        r#"<form method="get" action="{action}"><input type="hidden" name="id" value="{course}"><button type="submit" class="btn btn-primary">{label}</button></form>"#,
        action = html_escape(targets.enrol_url),
        course = targets.course,
        label = html_escape(label),
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
