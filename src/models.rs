//! Records owned by the persistent store.

use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub hashed_password: String,
}

impl User {
    pub fn new(email: String, hashed_password: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            email,
            hashed_password,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Chirp {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
    pub user_id: Uuid,
}

impl Chirp {
    pub fn new(body: String, user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            body,
            user_id,
        }
    }
}

/// A persisted refresh token. Only `revoked_at` and `updated_at` ever change.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    /// Usable iff never revoked and `at` is strictly before expiry.
    pub fn is_active_at(&self, at: DateTime<Utc>) -> bool {
        self.revoked_at.is_none() && at < self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn token(expires_in: Duration, revoked: bool) -> RefreshToken {
        let now = Utc::now();
        RefreshToken {
            token: "abc".to_string(),
            user_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            expires_at: now + expires_in,
            revoked_at: revoked.then_some(now),
        }
    }

    #[test]
    fn test_active_refresh_token() {
        assert!(token(Duration::days(60), false).is_active_at(Utc::now()));
    }

    #[test]
    fn test_revoked_refresh_token_is_inactive() {
        assert!(!token(Duration::days(60), true).is_active_at(Utc::now()));
    }

    #[test]
    fn test_expiry_boundary_is_exclusive() {
        let record = token(Duration::days(1), false);
        assert!(!record.is_active_at(record.expires_at));
        assert!(record.is_active_at(record.expires_at - Duration::seconds(1)));
    }

    #[test]
    fn test_new_user_timestamps_match() {
        let user = User::new("a@b.co".to_string(), "hash".to_string());
        assert_eq!(user.created_at, user.updated_at);
    }
}
