//! OAuth2 authorization code grant plumbing
//!
//! [`OAuthClient`] builds authorization URLs and exchanges codes for
//! tokens. [`AuthorizedClient`] is what authenticators use to call the
//! provider's APIs afterwards.

pub mod client;
pub mod config;
pub mod state;

pub use client::{AuthorizedClient, OAuthClient};
pub use config::{ClientAuthType, ClientConfig};
pub use state::{consume_state, generate_state, issue_state, STATE_KEY};
