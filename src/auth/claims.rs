//! JWT Claims structure
//!
//! Registered claims (RFC 7519) carried by an access token. Nothing beyond
//! the issuer, subject and the two timestamps is encoded.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::jwt::{TokenError, ISSUER};

/// JWT Claims for access tokens
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Issuer, always `ISSUER` for tokens minted here
    pub iss: String,
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// # Errors
    /// `TokenError::Signing` if `issued_at + ttl` is outside the representable range
    pub fn new(user_id: Uuid, issued_at: DateTime<Utc>, ttl: Duration) -> Result<Self, TokenError> {
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Signing("ttl out of range".to_string()))?;

        Ok(Self {
            iss: ISSUER.to_string(),
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Extract user ID from claims
    ///
    /// # Errors
    /// `TokenError::MalformedSubject` if the subject is not a UUID
    pub fn user_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::MalformedSubject)
    }
}
