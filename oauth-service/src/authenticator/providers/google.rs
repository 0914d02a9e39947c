//! Google authenticator implementation

use async_trait::async_trait;
use serde::Deserialize;

use super::fetch_profile;
use crate::authenticator::{Authenticator, UserInfo};
use crate::error::Result;
use crate::oauth::AuthorizedClient;

const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

#[derive(Debug, Deserialize)]
struct GoogleProfile {
    sub: String,
    #[serde(default)]
    given_name: String,
    #[serde(default)]
    family_name: String,
    #[serde(default)]
    email: String,
}

impl From<GoogleProfile> for UserInfo {
    fn from(profile: GoogleProfile) -> Self {
        Self {
            id: profile.sub,
            first_name: profile.given_name,
            last_name: profile.family_name,
            email: profile.email,
        }
    }
}

/// Reads the OpenID Connect userinfo endpoint
#[derive(Debug, Clone)]
pub struct GoogleAuthenticator {
    userinfo_url: String,
}

impl GoogleAuthenticator {
    pub fn new() -> Self {
        Self {
            userinfo_url: USERINFO_URL.to_string(),
        }
    }

    /// Use a different userinfo endpoint
    pub fn with_userinfo_url(mut self, url: impl Into<String>) -> Self {
        self.userinfo_url = url.into();
        self
    }
}

impl Default for GoogleAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Authenticator for GoogleAuthenticator {
    fn name(&self) -> &str {
        "google.com"
    }

    async fn retrieve_user(&self, client: &AuthorizedClient) -> Result<UserInfo> {
        let profile: GoogleProfile = fetch_profile(client, &self.userinfo_url).await?;
        Ok(profile.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authenticator::providers::test_support::client;
    use crate::error::Error;

    #[tokio::test]
    async fn test_retrieve_user() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/userinfo")
            .match_header("authorization", "Bearer foo")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"sub":"1234","given_name":"Ada","family_name":"Lovelace","email":"ada@example.com","email_verified":true}"#,
            )
            .create_async()
            .await;

        let authenticator =
            GoogleAuthenticator::new().with_userinfo_url(format!("{}/userinfo", server.url()));
        let user = authenticator.retrieve_user(&client("foo")).await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            user,
            UserInfo {
                id: "1234".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "ada@example.com".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_missing_sub_is_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/userinfo")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"email":"ada@example.com"}"#)
            .create_async()
            .await;

        let authenticator =
            GoogleAuthenticator::new().with_userinfo_url(format!("{}/userinfo", server.url()));
        let err = authenticator.retrieve_user(&client("foo")).await.unwrap_err();
        assert!(matches!(err, Error::Retrieval(_)));
    }

    #[tokio::test]
    async fn test_unauthorized_is_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/userinfo")
            .with_status(401)
            .with_body("invalid token")
            .create_async()
            .await;

        let authenticator =
            GoogleAuthenticator::new().with_userinfo_url(format!("{}/userinfo", server.url()));
        let err = authenticator.retrieve_user(&client("foo")).await.unwrap_err();
        assert!(err.to_string().contains("401"));
    }
}
