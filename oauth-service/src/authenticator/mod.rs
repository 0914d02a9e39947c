//! Provider-specific user retrieval
//!
//! An [`Authenticator`] turns an authorized HTTP client into a normalized
//! [`UserInfo`]. Implementations are selected by name through an
//! [`AuthenticatorRegistry`] populated at startup.
//!
//! # Example
//!
//! ```rust,ignore
//! use oauth_service::authenticator::{AuthenticatorConfig, AuthenticatorRegistry};
//!
//! let registry = AuthenticatorRegistry::builtin(&AuthenticatorConfig::default())?;
//! let google = registry.resolve("google.com")?;
//! ```

pub mod config;
pub mod login;
pub mod providers;
pub mod registry;

pub use config::{AuthenticatorConfig, UserMapping};
pub use login::{LoginHandler, SessionLogin, USER_KEY};
pub use providers::{FacebookAuthenticator, GoogleAuthenticator, MappedAuthenticator};
pub use registry::AuthenticatorRegistry;

use async_trait::async_trait;
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::Result;
use crate::oauth::AuthorizedClient;

/// Authenticated user as reported by the identity provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// Provider-scoped user identifier
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Strategy for fetching the user behind an access token
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Registry name, conventionally the provider's domain
    fn name(&self) -> &str;

    /// Fetch the user's profile with a client carrying the access token
    async fn retrieve_user(&self, client: &AuthorizedClient) -> Result<UserInfo>;

    /// Called once per successful login when no [`LoginHandler`] is set.
    ///
    /// The default responds `200 OK` with the user as JSON.
    async fn on_authenticated(&self, _session: &Session, user: UserInfo) -> Response {
        Json(user).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_info_serialization() {
        let user = UserInfo {
            id: "42".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], "42");
        assert_eq!(json["first_name"], "Ada");
        assert_eq!(json["email"], "ada@example.com");
    }
}
