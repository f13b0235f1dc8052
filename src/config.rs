use std::fmt;
use std::time::Duration;

/// Who may reach `/admin/create`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminCreatePolicy {
    /// Reachable without signing in, as listed in the route table.
    #[default]
    Open,
    /// Wrapped in the admin guard like every other admin page.
    Guarded,
}

impl AdminCreatePolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "open" => Some(Self::Open),
            "guarded" => Some(Self::Guarded),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub session_key: Option<String>,
    pub cookie_secure: bool,
    pub query_stale: Duration,
    pub query_wait: Duration,
    pub admin_create_policy: AdminCreatePolicy,
    pub app_name: String,
    pub db_max_connections: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            bind_addr: "127.0.0.1:8080".to_string(),
            session_key: None,
            cookie_secure: false,
            query_stale: Duration::from_secs(30),
            query_wait: Duration::from_millis(5000),
            admin_create_policy: AdminCreatePolicy::Open,
            app_name: "Donor Dashboard".to_string(),
            db_max_connections: 8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{key} must be set"),
            ConfigError::Invalid { key, value } => write!(f, "invalid value for {key}: '{value}'"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup; unset keys take defaults,
    /// except `DATABASE_URL`, which is required.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let admin_create_policy = match get("ADMIN_CREATE_POLICY") {
            Some(raw) => AdminCreatePolicy::parse(&raw)
                .ok_or(ConfigError::Invalid { key: "ADMIN_CREATE_POLICY", value: raw })?,
            None => defaults.admin_create_policy,
        };

        Ok(Self {
            database_url,
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            session_key: get("SESSION_KEY"),
            cookie_secure: parse_or("COOKIE_SECURE", get("COOKIE_SECURE"), parse_bool, defaults.cookie_secure)?,
            query_stale: parse_or(
                "QUERY_STALE_SECS",
                get("QUERY_STALE_SECS"),
                |v| v.parse().ok().map(Duration::from_secs),
                defaults.query_stale,
            )?,
            query_wait: parse_or(
                "QUERY_WAIT_MS",
                get("QUERY_WAIT_MS"),
                |v| v.parse().ok().map(Duration::from_millis),
                defaults.query_wait,
            )?,
            admin_create_policy,
            app_name: get("APP_NAME").unwrap_or(defaults.app_name),
            db_max_connections: parse_or(
                "DB_MAX_CONNECTIONS",
                get("DB_MAX_CONNECTIONS"),
                |v| v.parse().ok().filter(|n| *n > 0),
                defaults.db_max_connections,
            )?,
        })
    }
}

fn parse_or<T>(
    key: &'static str,
    raw: Option<String>,
    parse: impl Fn(&str) -> Option<T>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => parse(value.trim()).ok_or(ConfigError::Invalid { key, value }),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
