//! Declarative authenticator driven by a [`UserMapping`]

use async_trait::async_trait;
use reqwest::Url;
use serde_json::{Map, Value};

use super::fetch_profile;
use crate::authenticator::{Authenticator, UserInfo, UserMapping};
use crate::error::{Error, Result};
use crate::oauth::AuthorizedClient;

/// Copies configured JSON keys of a profile document into a [`UserInfo`].
#[derive(Debug, Clone)]
pub struct MappedAuthenticator {
    mapping: UserMapping,
}

impl MappedAuthenticator {
    /// Validate the mapping and build the authenticator
    pub fn new(mapping: UserMapping) -> Result<Self> {
        Url::parse(&mapping.userinfo_url).map_err(|e| {
            Error::InvalidOption(format!(
                "user mapping userinfo_url {:?}: {}",
                mapping.userinfo_url, e
            ))
        })?;

        if mapping.id.is_empty() {
            return Err(Error::InvalidOption(
                "user mapping must name an id key".to_string(),
            ));
        }

        Ok(Self { mapping })
    }

    fn decode(&self, profile: &Map<String, Value>) -> Result<UserInfo> {
        let id = match profile.get(&self.mapping.id) {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => {
                return Err(Error::Retrieval(format!(
                    "profile has no usable {:?} field",
                    self.mapping.id
                )))
            }
        };

        Ok(UserInfo {
            id,
            first_name: optional_field(profile, &self.mapping.first_name),
            last_name: optional_field(profile, &self.mapping.last_name),
            email: optional_field(profile, &self.mapping.email),
        })
    }
}

/// String value under `key`, blank when unmapped, absent or not a string
fn optional_field(profile: &Map<String, Value>, key: &str) -> String {
    if key.is_empty() {
        return String::new();
    }
    match profile.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            tracing::debug!(key, kind = ?other, "ignoring non-string profile field");
            String::new()
        }
        None => String::new(),
    }
}

#[async_trait]
impl Authenticator for MappedAuthenticator {
    fn name(&self) -> &str {
        "mapped"
    }

    async fn retrieve_user(&self, client: &AuthorizedClient) -> Result<UserInfo> {
        let profile: Map<String, Value> =
            fetch_profile(client, &self.mapping.userinfo_url).await?;
        self.decode(&profile)
    }
}
