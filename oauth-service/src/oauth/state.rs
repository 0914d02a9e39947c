//! Session-bound state tokens for CSRF protection
//!
//! A login stores a fresh token in the caller's session. The redirect leg
//! takes it back out, so a token is consumed whether or not it matches.

use tower_sessions::Session;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Session key holding the in-flight state token
pub const STATE_KEY: &str = "state";

/// Generate an unguessable state value
pub fn generate_state() -> String {
    Uuid::new_v4().to_string()
}

/// Store a fresh state token in the session and persist it.
///
/// Any previously issued token is overwritten.
pub async fn issue_state(session: &Session) -> Result<String> {
    let previous: Option<String> = session
        .get(STATE_KEY)
        .await
        .map_err(|e| Error::SessionRead(e.to_string()))?;
    if previous.is_some() {
        tracing::debug!("replacing outstanding state token");
    }

    let state = generate_state();
    session
        .insert(STATE_KEY, &state)
        .await
        .map_err(|e| Error::SessionWrite(e.to_string()))?;
    session
        .save()
        .await
        .map_err(|e| Error::SessionWrite(e.to_string()))?;

    Ok(state)
}

/// Remove the session's state token and check it against `presented`.
///
/// The removal is persisted before the comparison result is returned.
pub async fn consume_state(session: &Session, presented: &str) -> Result<()> {
    let stored: Option<String> = session
        .remove(STATE_KEY)
        .await
        .map_err(|e| Error::SessionRead(e.to_string()))?;

    let Some(stored) = stored else {
        return Err(Error::InvalidState);
    };

    session
        .save()
        .await
        .map_err(|e| Error::SessionWrite(e.to_string()))?;

    if stored.is_empty() || stored != presented {
        return Err(Error::InvalidState);
    }

    Ok(())
}
