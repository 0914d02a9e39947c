//! Application callbacks for completed logins

use async_trait::async_trait;
use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::Session;

use super::UserInfo;
use crate::error::Error;

/// Session key the logged-in user is stored under by [`SessionLogin`]
pub const USER_KEY: &str = "user";

/// Receives the user after a successful login.
///
/// When configured on the handler it replaces
/// [`Authenticator::on_authenticated`](super::Authenticator::on_authenticated).
#[async_trait]
pub trait LoginHandler: Send + Sync {
    async fn handle(&self, user: UserInfo, session: &Session) -> Response;
}

/// Stores the user in the session, then permanently redirects into the app.
#[derive(Debug, Clone)]
pub struct SessionLogin {
    redirect_to: String,
}

impl SessionLogin {
    pub fn new(redirect_to: impl Into<String>) -> Self {
        Self {
            redirect_to: redirect_to.into(),
        }
    }
}

#[async_trait]
impl LoginHandler for SessionLogin {
    async fn handle(&self, user: UserInfo, session: &Session) -> Response {
        if let Err(e) = session.insert(USER_KEY, &user).await {
            return Error::SessionWrite(e.to_string()).into_response();
        }
        if let Err(e) = session.save().await {
            return Error::SessionWrite(e.to_string()).into_response();
        }

        tracing::info!(user_id = %user.id, "user logged in");
        Redirect::permanent(&self.redirect_to).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::{header, StatusCode};
    use std::sync::Arc;
    use tower_sessions::{
        session::{Id, Record},
        session_store, SessionStore,
    };
    use tower_sessions_memory_store::MemoryStore;

    #[derive(Debug, Clone)]
    struct ReadOnlyStore;

    #[async_trait]
    impl SessionStore for ReadOnlyStore {
        async fn create(&self, _record: &mut Record) -> session_store::Result<()> {
            Err(session_store::Error::Backend("read only".to_string()))
        }

        async fn save(&self, _record: &Record) -> session_store::Result<()> {
            Err(session_store::Error::Backend("read only".to_string()))
        }

        async fn load(&self, _session_id: &Id) -> session_store::Result<Option<Record>> {
            Ok(None)
        }

        async fn delete(&self, _session_id: &Id) -> session_store::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_stores_user_and_redirects() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        let user = UserInfo {
            id: "42".to_string(),
            first_name: "Ada".to_string(),
            ..Default::default()
        };

        let response = SessionLogin::new("app/").handle(user.clone(), &session).await;

        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "app/");
        assert_eq!(session.get::<UserInfo>(USER_KEY).await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_save_failure_skips_redirect() {
        let session = Session::new(None, Arc::new(ReadOnlyStore), None);
        let user = UserInfo {
            id: "42".to_string(),
            ..Default::default()
        };

        let response = SessionLogin::new("app/").handle(user, &session).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get(header::LOCATION).is_none());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.starts_with("unable to save session: "), "{body}");
        assert!(body.ends_with("read only\n"), "{body}");
    }
}
