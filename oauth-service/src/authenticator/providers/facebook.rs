//! Facebook authenticator implementation

use async_trait::async_trait;
use serde::Deserialize;

use super::fetch_profile;
use crate::authenticator::{Authenticator, UserInfo};
use crate::error::Result;
use crate::oauth::AuthorizedClient;

const GRAPH_ME_URL: &str = "https://graph.facebook.com/me?fields=id,first_name,last_name,email";

#[derive(Debug, Deserialize)]
struct FacebookProfile {
    id: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    // Absent unless the email permission was granted
    #[serde(default)]
    email: String,
}

/// Reads the Graph API `/me` node
#[derive(Debug, Clone)]
pub struct FacebookAuthenticator {
    profile_url: String,
}

impl FacebookAuthenticator {
    pub fn new() -> Self {
        Self {
            profile_url: GRAPH_ME_URL.to_string(),
        }
    }

    pub fn with_profile_url(mut self, url: impl Into<String>) -> Self {
        self.profile_url = url.into();
        self
    }
}

impl Default for FacebookAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Authenticator for FacebookAuthenticator {
    fn name(&self) -> &str {
        "facebook.com"
    }

    async fn retrieve_user(&self, client: &AuthorizedClient) -> Result<UserInfo> {
        let profile: FacebookProfile = fetch_profile(client, &self.profile_url).await?;
        Ok(UserInfo {
            id: profile.id,
            first_name: profile.first_name,
            last_name: profile.last_name,
            email: profile.email,
        })
    }
}
