//! OAuth2 client configuration types.

use serde::{Deserialize, Serialize};

/// How client credentials are presented to the token endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClientAuthType {
    /// HTTP Basic authentication header
    #[default]
    BasicAuth,
    /// `client_id` and `client_secret` in the form body
    RequestBody,
}

/// Immutable description of the remote identity provider.
///
/// # Example
///
/// ```toml
/// [oauth]
/// client_id = "my-client"
/// client_secret = "my-secret"
/// auth_url = "https://accounts.google.com/o/oauth2/v2/auth"
/// token_url = "https://oauth2.googleapis.com/token"
/// redirect_url = "https://app.example.com/redirect"
/// scopes = ["openid", "email", "profile"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Client identifier issued by the provider
    #[serde(default)]
    pub client_id: String,

    /// Client secret issued by the provider
    #[serde(default)]
    pub client_secret: String,

    /// Authorization endpoint
    #[serde(default)]
    pub auth_url: String,

    /// Token endpoint
    #[serde(default)]
    pub token_url: String,

    /// Callback URL registered with the provider
    #[serde(default)]
    pub redirect_url: String,

    /// Scopes requested on the authorization URL
    #[serde(default)]
    pub scopes: Vec<String>,

    /// Token endpoint client authentication
    #[serde(default)]
    pub auth_type: ClientAuthType,
}

impl ClientConfig {
    /// Whether the required fields are present
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.auth_url.is_empty() && !self.token_url.is_empty()
    }
}
