//! Built-in authenticator implementations

pub mod facebook;
pub mod google;
pub mod mapped;

pub use facebook::FacebookAuthenticator;
pub use google::GoogleAuthenticator;
pub use mapped::MappedAuthenticator;

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::oauth::{client::error_chain, AuthorizedClient};

/// GET a JSON profile document with the authorized client.
///
/// Non-2xx statuses and undecodable bodies are retrieval errors.
pub(crate) async fn fetch_profile<T: DeserializeOwned>(
    client: &AuthorizedClient,
    url: &str,
) -> Result<T> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| Error::Retrieval(error_chain(&e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Retrieval(format!(
            "profile request failed: {} - {}",
            status,
            body.trim()
        )));
    }

    response
        .json()
        .await
        .map_err(|e| Error::Retrieval(format!("invalid profile response: {}", e)))
}
