//! Configuration management using Figment
//!
//! Sources, lowest priority first:
//! 1. Built-in defaults
//! 2. `/etc/oauth-service/config.toml`
//! 3. `~/.config/oauth-service/config.toml` (XDG)
//! 4. `./config.toml`
//! 5. `OAUTH_SERVICE_` environment variables, nested with `__`
//!    (e.g. `OAUTH_SERVICE_OAUTH__CLIENT_ID`)
//!
//! An explicit path given to [`Config::load_from`] replaces steps 2–4. Files
//! ending in `.json` are parsed as JSON, anything else as TOML.

use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::authenticator::AuthenticatorConfig;
use crate::error::{Error, Result};
use crate::handler::{DEFAULT_LOGIN_PATTERN, DEFAULT_REDIRECT_PATTERN};
use crate::oauth::ClientConfig;
use crate::session::SessionConfig;

const APP_NAME: &str = "oauth-service";
const ENV_PREFIX: &str = "OAUTH_SERVICE_";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Service configuration
    #[serde(default)]
    pub service: ServiceConfig,

    /// OAuth2 provider parameters
    #[serde(default)]
    pub oauth: ClientConfig,

    /// Route patterns
    #[serde(default)]
    pub routes: RoutesConfig,

    /// Session cookie and storage
    #[serde(default)]
    pub session: SessionConfig,

    /// Authenticator selection
    #[serde(default)]
    pub authenticator: AuthenticatorConfig,

    /// What happens after a successful login
    #[serde(default)]
    pub completion: CompletionConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Service port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            port: default_port(),
            log_level: default_log_level(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Paths served by the login handler
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoutesConfig {
    #[serde(default = "default_login_route")]
    pub login: String,

    #[serde(default = "default_redirect_route")]
    pub redirect: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            login: default_login_route(),
            redirect: default_redirect_route(),
        }
    }
}

/// Post-login behavior.
///
/// With `redirect_to` set the user is stored in the session and the
/// browser is redirected there. Otherwise the user is returned as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CompletionConfig {
    #[serde(default)]
    pub redirect_to: Option<String>,
}

impl Config {
    /// Load configuration from the standard locations
    pub fn load() -> Result<Self> {
        let config_paths = Self::find_config_paths();

        tracing::debug!("Searching for config files in order:");
        for path in &config_paths {
            tracing::debug!("  - {}", path.display());
        }

        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Lowest priority first so later files override earlier ones
        for path in config_paths.iter().rev() {
            if path.exists() {
                tracing::info!("Loading configuration from: {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
        }

        let config: Config = figment.merge(Self::env()).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// Bypasses the standard locations. Environment variables still apply.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("failed to read file: {}", path.display()),
            )));
        }

        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let figment = if path.extension().is_some_and(|ext| ext == "json") {
            figment.merge(Json::file(path))
        } else {
            figment.merge(Toml::file(path))
        };

        let config: Config = figment.merge(Self::env()).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the fields without usable defaults were provided
    pub fn validate(&self) -> Result<()> {
        if !self.oauth.is_configured() {
            return Err(Error::InvalidOption(
                "configuration invalid: required field oauth missing".to_string(),
            ));
        }
        if self.oauth.redirect_url.is_empty() {
            return Err(Error::InvalidOption(
                "configuration invalid: required field oauth.redirect_url missing".to_string(),
            ));
        }
        Ok(())
    }

    fn env() -> Env {
        Env::prefixed(ENV_PREFIX).split("__")
    }

    /// Candidate config files, highest priority first
    fn find_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        let xdg_dirs = xdg::BaseDirectories::with_prefix(APP_NAME);
        if let Some(path) = xdg_dirs.find_config_file("config.toml") {
            paths.push(path);
        }

        paths.push(PathBuf::from("/etc").join(APP_NAME).join("config.toml"));
        paths
    }
}

fn default_service_name() -> String {
    APP_NAME.to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_login_route() -> String {
    DEFAULT_LOGIN_PATTERN.to_string()
}

fn default_redirect_route() -> String {
    DEFAULT_REDIRECT_PATTERN.to_string()
}
