//! Session configuration types.

use serde::{Deserialize, Serialize};

/// Cookie name used when none is configured
pub const DEFAULT_SESSION_NAME: &str = "user-data";

/// Session storage backend type.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionStorage {
    /// In-memory storage, lost on restart.
    #[default]
    Memory,
    /// Redis-backed storage (requires the `session-redis` feature).
    Redis,
}

/// Session cookie and storage configuration.
///
/// # Example
///
/// ```toml
/// [session]
/// cookie_name = "user-data"
/// expiry_secs = 3600
/// secure = true
/// same_site = "lax"
/// storage = "redis"
/// redis_url = "redis://localhost:6379"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionConfig {
    /// Session cookie name.
    ///
    /// Default: `"user-data"`
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Session expiry in seconds.
    ///
    /// - `0`: Session cookie (expires when browser closes)
    /// - `> 0`: Persistent cookie with specified lifetime
    ///
    /// Default: `86400` (24 hours)
    #[serde(default = "default_expiry_secs")]
    pub expiry_secs: u64,

    /// Session inactivity timeout in seconds (optional).
    ///
    /// If not set, `expiry_secs` is used as an inactivity timeout.
    #[serde(default)]
    pub inactivity_timeout_secs: Option<u64>,

    /// Cookie path.
    ///
    /// Default: `"/"`
    #[serde(default = "default_cookie_path")]
    pub cookie_path: String,

    /// Cookie domain (optional).
    #[serde(default)]
    pub cookie_domain: Option<String>,

    /// Secure cookie flag (HTTPS only).
    ///
    /// Default: `true`
    #[serde(default = "default_secure")]
    pub secure: bool,

    /// HttpOnly cookie flag.
    ///
    /// Default: `true`
    #[serde(default = "default_http_only")]
    pub http_only: bool,

    /// SameSite cookie policy: `"strict"`, `"lax"` or `"none"`.
    ///
    /// The provider redirect is a cross-site top-level navigation, so
    /// `"strict"` drops the cookie on the way back.
    ///
    /// Default: `"lax"`
    #[serde(default = "default_same_site")]
    pub same_site: String,

    /// Session storage backend.
    ///
    /// Default: `"memory"`
    #[serde(default)]
    pub storage: SessionStorage,

    /// Redis URL, required when `storage = "redis"`.
    #[serde(default)]
    pub redis_url: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            expiry_secs: default_expiry_secs(),
            inactivity_timeout_secs: None,
            cookie_path: default_cookie_path(),
            cookie_domain: None,
            secure: default_secure(),
            http_only: default_http_only(),
            same_site: default_same_site(),
            storage: SessionStorage::default(),
            redis_url: None,
        }
    }
}

fn default_cookie_name() -> String {
    DEFAULT_SESSION_NAME.to_string()
}

fn default_expiry_secs() -> u64 {
    86400
}

fn default_cookie_path() -> String {
    "/".to_string()
}

fn default_secure() -> bool {
    true
}

fn default_http_only() -> bool {
    true
}

fn default_same_site() -> String {
    "lax".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.cookie_name, "user-data");
        assert_eq!(config.expiry_secs, 86400);
        assert_eq!(config.cookie_path, "/");
        assert!(config.secure);
        assert!(config.http_only);
        assert_eq!(config.same_site, "lax");
        assert_eq!(config.storage, SessionStorage::Memory);
    }

    #[test]
    fn test_partial_deserialize() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"cookie_name":"sid","storage":"redis"}"#).unwrap();
        assert_eq!(config.cookie_name, "sid");
        assert_eq!(config.storage, SessionStorage::Redis);
        assert_eq!(config.expiry_secs, 86400);
    }
}
