//! Login-initiate and login-redirect routes
//!
//! ```rust,ignore
//! use oauth_service::prelude::*;
//!
//! let handler = AuthHandler::builder()
//!     .client_config(config.oauth.clone())
//!     .authenticators(&registry, "google.com")
//!     .redirect_pattern("/auth")
//!     .build()?;
//!
//! let app = handler.router().route("/health", get(health));
//! ```

mod builder;

pub use builder::{AuthHandlerBuilder, DEFAULT_LOGIN_PATTERN, DEFAULT_REDIRECT_PATTERN};

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::authenticator::{Authenticator, LoginHandler};
use crate::error::{Error, Result};
use crate::oauth::{consume_state, issue_state, OAuthClient};
use crate::session::{SessionConfig, SessionManagerLayer, SharedStore};

/// The OAuth2 authorization code login handler.
///
/// Cheap to clone. Construct with [`AuthHandler::builder`].
#[derive(Clone)]
pub struct AuthHandler {
    inner: Arc<Inner>,
}

struct Inner {
    client: OAuthClient,
    authenticator: Arc<dyn Authenticator>,
    login_handler: Option<Arc<dyn LoginHandler>>,
    login_pattern: String,
    redirect_pattern: String,
    session: SessionConfig,
    session_layer: SessionManagerLayer<SharedStore>,
}

/// Query parameters of the provider callback
#[derive(Debug, Default, Deserialize)]
struct RedirectParams {
    #[serde(default)]
    state: String,
    #[serde(default)]
    code: String,
    error: Option<String>,
    error_description: Option<String>,
}

impl AuthHandler {
    pub fn builder() -> AuthHandlerBuilder {
        AuthHandlerBuilder::new()
    }

    pub fn login_pattern(&self) -> &str {
        &self.inner.login_pattern
    }

    pub fn redirect_pattern(&self) -> &str {
        &self.inner.redirect_pattern
    }

    pub fn session_name(&self) -> &str {
        &self.inner.session.cookie_name
    }

    /// Router serving the login and redirect patterns behind the session layer
    pub fn router(&self) -> Router {
        Router::new()
            .route(&self.inner.login_pattern, get(login))
            .route(&self.inner.redirect_pattern, get(redirect))
            .with_state(self.clone())
            .layer(self.inner.session_layer.clone())
    }
}

impl std::fmt::Debug for AuthHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthHandler")
            .field("authenticator", &self.inner.authenticator.name())
            .field("login_pattern", &self.inner.login_pattern)
            .field("redirect_pattern", &self.inner.redirect_pattern)
            .field("session_name", &self.inner.session.cookie_name)
            .field("login_handler", &self.inner.login_handler.is_some())
            .finish()
    }
}

#[tracing::instrument(name = "login", skip_all)]
async fn login(
    State(handler): State<AuthHandler>,
    Extension(session): Extension<Session>,
) -> Result<Response> {
    tracing::debug!("Received request.");

    let state = issue_state(&session).await?;
    let location = handler.inner.client.authorize_url(&state);

    tracing::debug!("redirecting to authorization endpoint");
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

#[tracing::instrument(name = "redirect", skip_all)]
async fn redirect(
    State(handler): State<AuthHandler>,
    Extension(session): Extension<Session>,
    Query(params): Query<RedirectParams>,
) -> Result<Response> {
    tracing::debug!("Received request.");

    consume_state(&session, &params.state).await?;

    if let Some(error) = params.error {
        let reason = match params.error_description {
            Some(description) => format!("{error}: {description}"),
            None => error,
        };
        return Err(Error::AuthorizationDenied(reason));
    }

    let inner = &handler.inner;
    let client = inner.client.exchange(&params.code).await?;
    let user = inner.authenticator.retrieve_user(&client).await?;

    tracing::info!(
        authenticator = inner.authenticator.name(),
        user_id = %user.id,
        "user authenticated"
    );

    let response = match &inner.login_handler {
        Some(login_handler) => login_handler.handle(user, &session).await,
        None => inner.authenticator.on_authenticated(&session, user).await,
    };
    Ok(response)
}
