//! Persistence collaborators
//!
//! The HTTP layer and the auth flows only see these traits. `PgStore` is the
//! production backend; `MemoryStore` implements the same contract in-process.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Chirp, User};

const UNIQUE_VIOLATION: &str = "23505";
/// `query_canceled`, raised when `statement_timeout` fires.
const QUERY_CANCELED: &str = "57014";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    /// Also returned for refresh tokens that exist but are expired or revoked.
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store query failed: {0}")]
    Query(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db) => from_sqlstate(db.code().as_deref(), err.to_string()),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            _ => StoreError::Query(err.to_string()),
        }
    }
}

fn from_sqlstate(code: Option<&str>, message: String) -> StoreError {
    match code {
        Some(UNIQUE_VIOLATION) => StoreError::Conflict,
        Some(QUERY_CANCELED) => StoreError::Unavailable(message),
        _ => StoreError::Query(message),
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// `Conflict` if the email is already registered.
    async fn create_user(&self, user: User) -> Result<User, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<User, StoreError>;

    /// Removes every user together with their chirps and refresh tokens.
    async fn delete_all_users(&self) -> Result<u64, StoreError>;
}

#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Insert a new, unrevoked token. `Conflict` if the token already exists.
    async fn store_refresh_token(
        &self,
        token: &str,
        user_id: Uuid,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Owner of an unrevoked, unexpired token.
    ///
    /// Unknown, expired and revoked tokens are all `NotFound`.
    async fn lookup_active_user(&self, token: &str) -> Result<Uuid, StoreError>;

    /// Stamp `revoked_at`. `NotFound` if the token is unknown or already revoked.
    async fn revoke_refresh_token(&self, token: &str) -> Result<(), StoreError>;
}

#[async_trait]
pub trait ChirpStore: Send + Sync {
    async fn create_chirp(&self, chirp: Chirp) -> Result<Chirp, StoreError>;

    /// All chirps, oldest first.
    async fn list_chirps(&self) -> Result<Vec<Chirp>, StoreError>;

    async fn get_chirp(&self, id: Uuid) -> Result<Chirp, StoreError>;

    async fn delete_chirp(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Everything the application needs from persistence.
pub trait Store: UserStore + RefreshTokenStore + ChirpStore {}

impl<T> Store for T where T: UserStore + RefreshTokenStore + ChirpStore {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlstate_mapping() {
        assert!(matches!(
            from_sqlstate(Some("23505"), "duplicate key".into()),
            StoreError::Conflict
        ));
        assert!(matches!(
            from_sqlstate(Some("57014"), "canceling statement due to statement timeout".into()),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            from_sqlstate(Some("42601"), "syntax error".into()),
            StoreError::Query(_)
        ));
        assert!(matches!(from_sqlstate(None, "unknown".into()), StoreError::Query(_)));
    }

    #[test]
    fn test_pool_timeout_is_unavailable() {
        assert!(matches!(
            StoreError::from(sqlx::Error::PoolTimedOut),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(StoreError::from(sqlx::Error::RowNotFound), StoreError::NotFound));
    }
}
