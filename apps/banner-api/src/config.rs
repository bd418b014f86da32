use switchrole_core::{BannerConfig, CourseId};

/// This service's own switch target, used unless `SWITCH_URL` points elsewhere.
pub const SWITCH_ROUTE: &str = "/api/v1/switch-role";

/// Banner API configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Port the HTTP server binds to.
    pub port: u16,
    /// Shared secret the host application presents when opening sessions.
    pub host_secret: String,
    /// Lifetime of a session token in seconds.
    pub session_ttl_secs: u64,
    /// Banner behaviour handed to the core library.
    pub banner: BannerConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Panics with a descriptive message if a required variable is missing.
    pub fn from_env() -> Self {
        let mut banner = BannerConfig {
            switch_url: SWITCH_ROUTE.to_string(),
            ..BannerConfig::default()
        };
        if let Some(id) = parsed_var("SITE_COURSE_ID") {
            banner.site_course_id = CourseId(id);
        }
        if let Some(capability) = optional_var("ELEVATED_CAPABILITY") {
            banner.elevated_capability = capability;
        }
        if let Some(url) = optional_var("SWITCH_URL") {
            banner.switch_url = url;
        }
        if let Some(url) = optional_var("ENROL_URL") {
            banner.enrol_url = url;
        }
        if let Some(pages) = optional_var("EXCLUDED_PAGES") {
            banner.excluded_paths = split_list(&pages);
        }
        if let Some(layouts) = optional_var("EXCLUDED_LAYOUTS") {
            banner.excluded_layouts = split_list(&layouts);
        }

        Self {
            database_url: required_var("DATABASE_URL"),
            port: parsed_var("PORT").unwrap_or(4003),
            host_secret: required_var("HOST_SECRET"),
            session_ttl_secs: parsed_var("SESSION_TTL_SECS").unwrap_or(7200),
            banner,
        }
    }
}

fn required_var(name: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| panic!("{name} env var is required"))
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    optional_var(name).and_then(|v| v.parse().ok())
}

/// Comma separated list, blanks dropped.
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_comma_separated_lists() {
        assert_eq!(
            split_list(" /enrol/index.php, ,/admin/index.php "),
            vec!["/enrol/index.php", "/admin/index.php"]
        );
        assert!(split_list("").is_empty());
    }
}
