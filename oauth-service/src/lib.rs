//! # oauth-service
//!
//! OAuth2 Authorization Code Grant login handler for axum.
//!
//! The handler serves two routes. The login route issues a session-bound
//! state token and redirects the browser to the provider. The redirect route
//! checks the state, exchanges the code for an access token and asks an
//! [`Authenticator`](authenticator::Authenticator) for the user's profile.
//! The application then receives a normalized
//! [`UserInfo`](authenticator::UserInfo).
//!
//! ## Example
//!
//! ```rust,no_run
//! use oauth_service::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let registry = AuthenticatorRegistry::builtin(&config.authenticator)?;
//!
//!     let handler = AuthHandler::builder()
//!         .client_config(config.oauth.clone())
//!         .authenticators(&registry, config.authenticator.provider.clone())
//!         .login_pattern(config.routes.login.clone())
//!         .redirect_pattern(config.routes.redirect.clone())
//!         .session_config(config.session.clone())
//!         .build()?;
//!
//!     Server::new(config).serve(handler.router()).await
//! }
//! ```

pub mod authenticator;
pub mod config;
pub mod error;
pub mod handler;
pub mod health;
pub mod oauth;
pub mod observability;
pub mod server;
pub mod session;

/// Commonly used types
pub mod prelude {
    pub use crate::authenticator::{
        Authenticator, AuthenticatorConfig, AuthenticatorRegistry, LoginHandler, SessionLogin,
        UserInfo, UserMapping,
    };
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::handler::{AuthHandler, AuthHandlerBuilder};
    pub use crate::health::health;
    pub use crate::oauth::{AuthorizedClient, ClientConfig};
    pub use crate::observability::init_tracing;
    pub use crate::server::Server;
    pub use crate::session::{Session, SessionConfig, SharedStore};

    pub use axum::{routing::get, Router};
}
