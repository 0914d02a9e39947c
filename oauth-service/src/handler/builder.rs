//! Validating builder for [`AuthHandler`]

use std::sync::Arc;

use tower_sessions::SessionStore;

use super::{AuthHandler, Inner};
use crate::authenticator::{Authenticator, AuthenticatorRegistry, LoginHandler};
use crate::error::{Error, Result};
use crate::oauth::{ClientConfig, OAuthClient};
use crate::session::{session_layer, MemoryStore, SessionConfig, SharedStore};

/// Default login route
pub const DEFAULT_LOGIN_PATTERN: &str = "/login";

/// Default provider callback route
pub const DEFAULT_REDIRECT_PATTERN: &str = "/redirect";

enum AuthenticatorChoice {
    Direct(Arc<dyn Authenticator>),
    Named(AuthenticatorRegistry, String),
}

/// Collects handler options; [`build`](Self::build) validates them all.
///
/// Omitted options fall back to defaults. Supplied values that are invalid
/// are always rejected.
pub struct AuthHandlerBuilder {
    client_config: Option<ClientConfig>,
    authenticator: Option<AuthenticatorChoice>,
    login_handler: Option<Arc<dyn LoginHandler>>,
    login_pattern: String,
    redirect_pattern: String,
    session: SessionConfig,
    store: Option<SharedStore>,
}

impl AuthHandlerBuilder {
    pub(crate) fn new() -> Self {
        Self {
            client_config: None,
            authenticator: None,
            login_handler: None,
            login_pattern: DEFAULT_LOGIN_PATTERN.to_string(),
            redirect_pattern: DEFAULT_REDIRECT_PATTERN.to_string(),
            session: SessionConfig::default(),
            store: None,
        }
    }

    /// OAuth2 provider parameters (required)
    pub fn client_config(mut self, config: ClientConfig) -> Self {
        self.client_config = Some(config);
        self
    }

    /// Use this authenticator
    pub fn authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = Some(AuthenticatorChoice::Direct(authenticator));
        self
    }

    /// Resolve the authenticator `name` from `registry` at build time
    pub fn authenticators(mut self, registry: &AuthenticatorRegistry, name: impl Into<String>) -> Self {
        self.authenticator = Some(AuthenticatorChoice::Named(registry.clone(), name.into()));
        self
    }

    /// Callback replacing [`Authenticator::on_authenticated`]
    pub fn login_handler(mut self, handler: Arc<dyn LoginHandler>) -> Self {
        self.login_handler = Some(handler);
        self
    }

    pub fn login_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.login_pattern = pattern.into();
        self
    }

    pub fn redirect_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.redirect_pattern = pattern.into();
        self
    }

    /// Session cookie settings. Replaces any earlier [`session_name`](Self::session_name).
    pub fn session_config(mut self, config: SessionConfig) -> Self {
        self.session = config;
        self
    }

    /// Session cookie name
    pub fn session_name(mut self, name: impl Into<String>) -> Self {
        self.session.cookie_name = name.into();
        self
    }

    /// Backend holding the state token. Defaults to [`MemoryStore`].
    pub fn session_store<S: SessionStore>(mut self, store: S) -> Self {
        self.store = Some(SharedStore::new(store));
        self
    }

    /// Like [`session_store`](Self::session_store) for an already shared store
    pub fn shared_store(mut self, store: SharedStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> Result<AuthHandler> {
        let client_config = self
            .client_config
            .ok_or_else(|| Error::InvalidOption("oauth2 client config is missing".to_string()))?;
        let client = OAuthClient::new(&client_config)?;

        validate_pattern("login", &self.login_pattern)?;
        validate_pattern("redirect", &self.redirect_pattern)?;
        if self.login_pattern == self.redirect_pattern {
            return Err(Error::InvalidOption(format!(
                "login and redirect patterns are both {:?}",
                self.login_pattern
            )));
        }

        if self.session.cookie_name.is_empty() {
            return Err(Error::InvalidOption("session name is empty".to_string()));
        }

        let authenticator = match self.authenticator {
            Some(AuthenticatorChoice::Direct(authenticator)) => authenticator,
            Some(AuthenticatorChoice::Named(registry, name)) => registry.resolve(&name)?,
            None => {
                return Err(Error::InvalidOption(
                    "authenticator is missing".to_string(),
                ))
            }
        };

        let store = self
            .store
            .unwrap_or_else(|| SharedStore::new(MemoryStore::default()));
        let session_layer = session_layer(&self.session, store)?;

        tracing::debug!(
            authenticator = authenticator.name(),
            login = %self.login_pattern,
            redirect = %self.redirect_pattern,
            "auth handler configured"
        );

        Ok(AuthHandler {
            inner: Arc::new(Inner {
                client,
                authenticator,
                login_handler: self.login_handler,
                login_pattern: self.login_pattern,
                redirect_pattern: self.redirect_pattern,
                session: self.session,
                session_layer,
            }),
        })
    }
}

fn validate_pattern(kind: &str, pattern: &str) -> Result<()> {
    if pattern.is_empty() {
        return Err(Error::InvalidOption(format!("{kind} pattern is empty")));
    }
    if !pattern.starts_with('/') {
        return Err(Error::InvalidOption(format!(
            "{kind} pattern {pattern:?} must start with '/'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authenticator::GoogleAuthenticator;

    fn client_config() -> ClientConfig {
        ClientConfig {
            client_id: "foo".to_string(),
            client_secret: "bar".to_string(),
            auth_url: "https://provider.example.com/auth".to_string(),
            token_url: "https://provider.example.com/token".to_string(),
            redirect_url: "https://app.example.com/redirect".to_string(),
            ..Default::default()
        }
    }

    fn builder() -> AuthHandlerBuilder {
        AuthHandler::builder()
            .client_config(client_config())
            .authenticator(Arc::new(GoogleAuthenticator::new()))
    }

    fn invalid_option(result: Result<AuthHandler>) -> String {
        match result {
            Err(Error::InvalidOption(msg)) => msg,
            other => panic!("expected invalid option, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults() {
        let handler = builder().build().unwrap();
        assert_eq!(handler.login_pattern(), "/login");
        assert_eq!(handler.redirect_pattern(), "/redirect");
        assert_eq!(handler.session_name(), "user-data");
    }

    #[test]
    fn test_custom_patterns() {
        let handler = builder()
            .login_pattern("/signin")
            .redirect_pattern("/auth")
            .session_name("sid")
            .build()
            .unwrap();
        assert_eq!(handler.login_pattern(), "/signin");
        assert_eq!(handler.redirect_pattern(), "/auth");
        assert_eq!(handler.session_name(), "sid");
    }

    #[test]
    fn test_missing_client_config() {
        let result = AuthHandler::builder()
            .authenticator(Arc::new(GoogleAuthenticator::new()))
            .build();
        assert!(invalid_option(result).contains("client config"));
    }

    #[test]
    fn test_missing_authenticator() {
        let result = AuthHandler::builder().client_config(client_config()).build();
        assert!(invalid_option(result).contains("authenticator"));
    }

    #[test]
    fn test_empty_patterns_rejected() {
        assert!(invalid_option(builder().login_pattern("").build()).contains("login"));
        assert!(invalid_option(builder().redirect_pattern("").build()).contains("redirect"));
    }

    #[test]
    fn test_relative_pattern_rejected() {
        invalid_option(builder().login_pattern("login").build());
    }

    #[test]
    fn test_identical_patterns_rejected() {
        invalid_option(builder().redirect_pattern("/login").build());
    }

    #[test]
    fn test_empty_session_name_rejected() {
        assert!(invalid_option(builder().session_name("").build()).contains("session name"));
    }

    #[test]
    fn test_out_of_range_session_expiry_rejected() {
        let session = SessionConfig {
            expiry_secs: u64::MAX,
            ..Default::default()
        };
        assert!(invalid_option(builder().session_config(session).build()).contains("expiry"));
    }

    #[test]
    fn test_registry_lookup() {
        let registry = AuthenticatorRegistry::new().with(GoogleAuthenticator::new());

        let handler = AuthHandler::builder()
            .client_config(client_config())
            .authenticators(&registry, "google.com")
            .build();
        assert!(handler.is_ok());

        let missing = AuthHandler::builder()
            .client_config(client_config())
            .authenticators(&registry, "facebook.com")
            .build();
        assert!(matches!(missing, Err(Error::UnknownAuthenticator(_))));
    }

    #[test]
    fn test_invalid_client_url_rejected() {
        let mut config = client_config();
        config.auth_url = "::".to_string();
        invalid_option(
            AuthHandler::builder()
                .client_config(config)
                .authenticator(Arc::new(GoogleAuthenticator::new()))
                .build(),
        );
    }
}
