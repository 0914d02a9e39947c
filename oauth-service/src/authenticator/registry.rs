//! Named authenticator lookup

use std::collections::HashMap;
use std::sync::Arc;

use super::{
    Authenticator, AuthenticatorConfig, FacebookAuthenticator, GoogleAuthenticator,
    MappedAuthenticator,
};
use crate::error::{Error, Result};

/// Authenticators keyed by provider name.
///
/// Built explicitly at startup and handed to the handler builder. Use the
/// provider's domain as the key to avoid clashes.
#[derive(Clone, Default)]
pub struct AuthenticatorRegistry {
    authenticators: HashMap<String, Arc<dyn Authenticator>>,
}

impl AuthenticatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every compiled-in authenticator.
    ///
    /// `mapped` is only registered when `config.mapping` is set, and fails
    /// here if the mapping is invalid.
    pub fn builtin(config: &AuthenticatorConfig) -> Result<Self> {
        let mut registry = Self::new()
            .with(GoogleAuthenticator::new())
            .with(FacebookAuthenticator::new());

        if let Some(mapping) = &config.mapping {
            registry.register(MappedAuthenticator::new(mapping.clone())?);
        }

        Ok(registry)
    }

    /// Register under [`Authenticator::name`], replacing any existing entry
    pub fn register<A: Authenticator + 'static>(&mut self, authenticator: A) {
        let name = authenticator.name().to_string();
        self.register_as(name, Arc::new(authenticator));
    }

    /// Register under an explicit name
    pub fn register_as(&mut self, name: impl Into<String>, authenticator: Arc<dyn Authenticator>) {
        let name = name.into();
        if self.authenticators.insert(name.clone(), authenticator).is_some() {
            tracing::warn!(authenticator = %name, "replacing registered authenticator");
        }
    }

    pub fn with<A: Authenticator + 'static>(mut self, authenticator: A) -> Self {
        self.register(authenticator);
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Authenticator>> {
        self.authenticators.get(name).cloned()
    }

    /// Look up `name`, failing with [`Error::UnknownAuthenticator`]
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Authenticator>> {
        self.get(name)
            .ok_or_else(|| Error::UnknownAuthenticator(name.to_string()))
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.authenticators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for AuthenticatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatorRegistry")
            .field("authenticators", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authenticator::UserMapping;

    #[test]
    fn test_builtin_without_mapping() {
        let registry = AuthenticatorRegistry::builtin(&AuthenticatorConfig::default()).unwrap();
        assert_eq!(registry.names(), vec!["facebook.com", "google.com"]);
        assert_eq!(registry.resolve("google.com").unwrap().name(), "google.com");
    }

    #[test]
    fn test_builtin_with_mapping() {
        let config = AuthenticatorConfig {
            provider: "mapped".to_string(),
            mapping: Some(UserMapping {
                userinfo_url: "https://provider.example.com/userinfo".to_string(),
                id: "sub".to_string(),
                ..Default::default()
            }),
        };
        let registry = AuthenticatorRegistry::builtin(&config).unwrap();
        assert!(registry.get("mapped").is_some());
    }

    #[test]
    fn test_builtin_rejects_invalid_mapping() {
        let config = AuthenticatorConfig {
            provider: "mapped".to_string(),
            mapping: Some(UserMapping::default()),
        };
        assert!(AuthenticatorRegistry::builtin(&config).is_err());
    }

    #[test]
    fn test_resolve_unknown() {
        let registry = AuthenticatorRegistry::new();
        let err = registry.resolve("github.com").err().unwrap();
        assert!(matches!(err, Error::UnknownAuthenticator(ref name) if name == "github.com"));
        assert_eq!(err.to_string(), "implementation github.com not registered");
    }

    #[test]
    fn test_register_as_alias() {
        let mut registry = AuthenticatorRegistry::new();
        registry.register_as("accounts.google.com", Arc::new(GoogleAuthenticator::new()));
        assert!(registry.get("accounts.google.com").is_some());
        assert!(registry.get("google.com").is_none());
    }
}
