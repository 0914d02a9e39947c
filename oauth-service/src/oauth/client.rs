//! Authorization code grant client

use oauth2::{
    basic::BasicErrorResponse, AccessToken, AuthType, AuthUrl, AuthorizationCode, Client,
    ClientId, ClientSecret, CsrfToken, EmptyExtraTokenFields, RedirectUrl, Scope,
    StandardRevocableToken, StandardTokenIntrospectionResponse, StandardTokenResponse,
    TokenResponse, TokenUrl,
};
use reqwest::{Client as HttpClient, IntoUrl, RequestBuilder};

use super::config::{ClientAuthType, ClientConfig};
use crate::error::{Error, Result};

/// Type alias for our configured OAuth client
type ConfiguredClient = Client<
    BasicErrorResponse,
    StandardTokenResponse<EmptyExtraTokenFields, oauth2::basic::BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, oauth2::basic::BasicTokenType>,
    StandardRevocableToken,
    BasicErrorResponse,
    oauth2::EndpointSet,
    oauth2::EndpointNotSet,
    oauth2::EndpointNotSet,
    oauth2::EndpointNotSet,
    oauth2::EndpointSet,
>;

/// OAuth2 client for a single provider.
///
/// Built once from a [`ClientConfig`]. URLs are validated here so that a
/// running handler never sees a malformed endpoint.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    client: ConfiguredClient,
    http_client: HttpClient,
    scopes: Vec<String>,
}

impl OAuthClient {
    /// Create a client from configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        if config.client_id.is_empty() {
            return Err(Error::InvalidOption("client id is empty".to_string()));
        }

        let mut client = Client::new(ClientId::new(config.client_id.clone()))
            .set_auth_uri(
                AuthUrl::new(config.auth_url.clone())
                    .map_err(|e| Error::InvalidOption(format!("auth url: {}", e)))?,
            )
            .set_token_uri(
                TokenUrl::new(config.token_url.clone())
                    .map_err(|e| Error::InvalidOption(format!("token url: {}", e)))?,
            )
            .set_redirect_uri(
                RedirectUrl::new(config.redirect_url.clone())
                    .map_err(|e| Error::InvalidOption(format!("redirect url: {}", e)))?,
            );

        if !config.client_secret.is_empty() {
            client = client.set_client_secret(ClientSecret::new(config.client_secret.clone()));
        }

        let client = match config.auth_type {
            ClientAuthType::BasicAuth => client.set_auth_type(AuthType::BasicAuth),
            ClientAuthType::RequestBody => client.set_auth_type(AuthType::RequestBody),
        };

        // Provider redirects are never followed
        let http_client = HttpClient::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            http_client,
            scopes: config.scopes.clone(),
        })
    }

    /// Provider authorization URL carrying `state`
    pub fn authorize_url(&self, state: &str) -> String {
        let mut request = self
            .client
            .authorize_url(|| CsrfToken::new(state.to_string()));

        for scope in &self.scopes {
            request = request.add_scope(Scope::new(scope.clone()));
        }

        let (url, _) = request.url();
        url.to_string()
    }

    /// Exchange an authorization code for an access token.
    ///
    /// Returns a client that authenticates every request with the token.
    pub async fn exchange(&self, code: &str) -> Result<AuthorizedClient> {
        let token = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&self.http_client)
            .await
            .map_err(|e| Error::Exchange(error_chain(&e)))?;

        tracing::debug!(
            token_type = ?token.token_type(),
            expires_in = ?token.expires_in(),
            "authorization code exchanged"
        );

        Ok(AuthorizedClient::new(
            self.http_client.clone(),
            token.access_token().clone(),
        ))
    }
}

/// HTTP client that sends `Authorization: Bearer <token>` on every request
#[derive(Debug, Clone)]
pub struct AuthorizedClient {
    http_client: HttpClient,
    token: AccessToken,
}

impl AuthorizedClient {
    pub fn new(http_client: HttpClient, token: AccessToken) -> Self {
        Self { http_client, token }
    }

    /// Start an authenticated GET request
    pub fn get<U: IntoUrl>(&self, url: U) -> RequestBuilder {
        self.http_client.get(url).bearer_auth(self.token.secret())
    }
}

/// Render an error with all of its sources, outermost first
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig {
            client_id: "test-client-id".to_string(),
            client_secret: "test-secret".to_string(),
            auth_url: "https://provider.example.com/authorize".to_string(),
            token_url: "https://provider.example.com/token".to_string(),
            redirect_url: "https://app.example.com/redirect".to_string(),
            scopes: vec!["openid".to_string(), "email".to_string()],
            auth_type: ClientAuthType::BasicAuth,
        }
    }

    #[test]
    fn test_authorize_url_generation() {
        let client = OAuthClient::new(&config()).unwrap();
        let url = client.authorize_url("test-state");

        assert!(url.starts_with("https://provider.example.com/authorize?"));
        assert!(url.contains("client_id=test-client-id"));
        assert!(url.contains("state=test-state"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fapp.example.com%2Fredirect"));
        assert!(url.contains("scope=openid+email"));
    }

    #[test]
    fn test_rejects_invalid_urls() {
        let mut bad = config();
        bad.token_url = "not a url".to_string();
        assert!(matches!(
            OAuthClient::new(&bad),
            Err(Error::InvalidOption(msg)) if msg.starts_with("token url")
        ));

        let mut bad = config();
        bad.redirect_url = String::new();
        assert!(matches!(OAuthClient::new(&bad), Err(Error::InvalidOption(_))));
    }

    #[test]
    fn test_rejects_missing_client_id() {
        let mut bad = config();
        bad.client_id = String::new();
        assert!(matches!(OAuthClient::new(&bad), Err(Error::InvalidOption(_))));
    }

    #[tokio::test]
    async fn test_exchange_unreachable_endpoint() {
        let mut cfg = config();
        cfg.token_url = "http://127.0.0.1:1/token".to_string();
        let client = OAuthClient::new(&cfg).unwrap();

        let err = client.exchange("code").await.unwrap_err();
        assert!(matches!(err, Error::Exchange(_)));
        assert!(err.to_string().starts_with("token exchange failed: "));
    }
}
