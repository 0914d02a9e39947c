//! Cookie-backed sessions carrying the login state token.
//!
//! # Feature Flags
//!
//! - `session-redis`: Redis session store via `fred`
//!
//! ```toml
//! [session]
//! cookie_name = "user-data"
//! secure = false  # true in production
//! storage = "memory"
//! ```

mod config;
mod store;

pub use config::{SessionConfig, SessionStorage, DEFAULT_SESSION_NAME};
pub use store::SharedStore;

pub use tower_sessions::{Expiry, Session, SessionManagerLayer, SessionStore};
pub use tower_sessions_memory_store::MemoryStore;

#[cfg(feature = "session-redis")]
pub use tower_sessions_redis_store::{fred, RedisStore};

use time::Duration;
use tower_sessions::cookie::SameSite;

use crate::error::{Error, Result};

/// Build a `SessionManagerLayer` over `store` from configuration.
///
/// # Errors
///
/// Returns [`Error::InvalidOption`] if a timeout does not fit in a signed
/// 64-bit second count.
pub fn session_layer(
    config: &SessionConfig,
    store: SharedStore,
) -> Result<SessionManagerLayer<SharedStore>> {
    let expiry = if config.expiry_secs == 0 {
        Expiry::OnSessionEnd
    } else if let Some(inactivity) = config.inactivity_timeout_secs {
        Expiry::OnInactivity(seconds("session.inactivity_timeout_secs", inactivity)?)
    } else {
        Expiry::OnInactivity(seconds("session.expiry_secs", config.expiry_secs)?)
    };

    let same_site = match config.same_site.to_lowercase().as_str() {
        "strict" => SameSite::Strict,
        "none" => SameSite::None,
        _ => SameSite::Lax,
    };

    let mut layer = SessionManagerLayer::new(store)
        .with_name(config.cookie_name.clone())
        .with_expiry(expiry)
        .with_secure(config.secure)
        .with_http_only(config.http_only)
        .with_same_site(same_site)
        .with_path(config.cookie_path.clone());

    if let Some(domain) = config.cookie_domain.clone() {
        layer = layer.with_domain(domain);
    }

    Ok(layer)
}

fn seconds(field: &str, secs: u64) -> Result<Duration> {
    i64::try_from(secs)
        .map(Duration::seconds)
        .map_err(|_| Error::InvalidOption(format!("{field} out of range: {secs}")))
}

/// Open the storage backend named by `config.storage`.
///
/// # Errors
///
/// Returns an error if Redis is selected without a URL, if the crate was
/// built without `session-redis`, or if the connection fails.
pub async fn store_from_config(config: &SessionConfig) -> Result<SharedStore> {
    match config.storage {
        SessionStorage::Memory => {
            tracing::info!("Using in-memory session store");
            Ok(SharedStore::new(MemoryStore::default()))
        }
        SessionStorage::Redis => {
            let redis_url = config.redis_url.as_deref().ok_or_else(|| {
                Error::InvalidOption("session.redis_url is required for redis storage".to_string())
            })?;
            redis_store(redis_url).await
        }
    }
}

#[cfg(feature = "session-redis")]
async fn redis_store(redis_url: &str) -> Result<SharedStore> {
    use tower_sessions_redis_store::fred::prelude::*;

    let redis_config = Config::from_url(redis_url)
        .map_err(|e| Error::Internal(format!("Invalid Redis URL for sessions: {e}")))?;

    let pool = Builder::from_config(redis_config)
        .build_pool(6)
        .map_err(|e| Error::Internal(format!("Failed to create session Redis pool: {e}")))?;

    pool.init()
        .await
        .map_err(|e| Error::Internal(format!("Failed to connect to Redis for sessions: {e}")))?;

    tracing::info!("Using Redis session store");
    Ok(SharedStore::new(RedisStore::new(pool)))
}

#[cfg(not(feature = "session-redis"))]
async fn redis_store(_redis_url: &str) -> Result<SharedStore> {
    Err(Error::InvalidOption(
        "redis session storage requires the session-redis feature".to_string(),
    ))
}
