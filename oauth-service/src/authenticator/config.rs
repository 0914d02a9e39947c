//! Authenticator selection and field mapping configuration.

use serde::{Deserialize, Serialize};

/// Which authenticator to use and how to configure the mapped one.
///
/// ```toml
/// [authenticator]
/// provider = "mapped"
///
/// [authenticator.mapping]
/// userinfo_url = "https://provider.example.com/userinfo"
/// id = "sub"
/// first_name = "given_name"
/// last_name = "family_name"
/// email = "email"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatorConfig {
    /// Registry name of the authenticator.
    ///
    /// Default: `"google.com"`
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Enables the `mapped` authenticator when present
    #[serde(default)]
    pub mapping: Option<UserMapping>,
}

impl Default for AuthenticatorConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            mapping: None,
        }
    }
}

fn default_provider() -> String {
    "google.com".to_string()
}

/// Profile endpoint plus the JSON key for each [`UserInfo`] field.
///
/// An empty key leaves that field blank. `id` must name a key.
///
/// [`UserInfo`]: super::UserInfo
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserMapping {
    #[serde(default)]
    pub userinfo_url: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}
