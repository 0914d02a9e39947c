//! Error types and HTTP response conversion

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Result type alias using the crate [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while building or running the login handler.
///
/// Request-time variants render as plain text: the message followed by a
/// newline. The remaining variants only surface during startup.
#[derive(Error, Debug)]
pub enum Error {
    /// The session could not be loaded from the store
    #[error("unable to read session: {0}")]
    SessionRead(String),

    /// The session could not be written back to the store
    #[error("unable to save session: {0}")]
    SessionWrite(String),

    /// The `state` query parameter did not match the session
    #[error("state token invalid")]
    InvalidState,

    /// The provider redirected back with an `error` parameter
    #[error("authorization denied: {0}")]
    AuthorizationDenied(String),

    /// Authorization code could not be exchanged for a token
    #[error("token exchange failed: {0}")]
    Exchange(String),

    /// User profile could not be fetched or decoded
    #[error("unable to retrieve user: {0}")]
    Retrieval(String),

    /// A construction option was missing or malformed
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// No authenticator is registered under the requested name
    #[error("implementation {0} not registered")]
    UnknownAuthenticator(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// HTTP status used when this error terminates a request
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidState | Error::AuthorizationDenied(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }

        let mut response = (status, format!("{self}\n")).into_response();
        let headers = response.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        headers.insert(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        );
        response
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::InvalidState.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            Error::AuthorizationDenied("access_denied".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            Error::SessionRead("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::Exchange("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_plain_text_body() {
        let response = Error::SessionRead("boom".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"unable to read session: boom\n");
    }

    #[tokio::test]
    async fn test_invalid_state_body() {
        let response = Error::InvalidState.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"state token invalid\n");
    }
}
