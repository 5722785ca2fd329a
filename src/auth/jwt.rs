//! Access Token Issuing and Verification
//!
//! Access tokens are HS256 JWTs. The signing secret is passed into every
//! call; callers never depend on jsonwebtoken directly, only on
//! `issue_access_token` and `verify_access_token`.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::claims::Claims;

/// Issuer claim for every token this service mints.
pub const ISSUER: &str = "chirpy";

const ACCESS_TOKEN_TTL_SECONDS: i64 = 60 * 60;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token signature does not match")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
    #[error("token could not be parsed")]
    MalformedToken,
    #[error("token issuer mismatch")]
    IssuerMismatch,
    #[error("token subject is not a valid user id")]
    MalformedSubject,
    #[error("token signing failed: {0}")]
    Signing(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidIssuer => TokenError::IssuerMismatch,
            _ => TokenError::MalformedToken,
        }
    }
}

/// Lifetime of an access token.
pub fn access_token_ttl() -> Duration {
    Duration::seconds(ACCESS_TOKEN_TTL_SECONDS)
}

/// Sign a new access token for `user_id`, valid for `ttl` from now.
pub fn issue_access_token(user_id: Uuid, secret: &str, ttl: Duration) -> Result<String, TokenError> {
    let claims = Claims::new(user_id, Utc::now(), ttl)?;

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::Signing(e.to_string()))
}

/// Verify an access token and return the user it was issued to.
///
/// jsonwebtoken checks the signature before deserializing or validating any
/// claim, so an `Expired` or `IssuerMismatch` result always comes from a
/// token this server signed.
pub fn verify_access_token(token: &str, secret: &str) -> Result<Uuid, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_issuer(&[ISSUER]);
    validation.set_required_spec_claims(&["exp", "iss", "sub"]);

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        let err = TokenError::from(e);
        tracing::debug!(error = %err, "Access token rejected");
        err
    })?;

    data.claims.user_id()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-characters-long";

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_issue_and_verify_token() {
        let user_id = Uuid::new_v4();

        let token = issue_access_token(user_id, SECRET, Duration::hours(1))
            .expect("Failed to issue token");
        let verified = verify_access_token(&token, SECRET).expect("Failed to verify token");

        assert_eq!(verified, user_id);
    }

    #[test]
    fn test_invalid_token() {
        let result = verify_access_token("invalid.token.string", SECRET);
        assert_eq!(result, Err(TokenError::MalformedToken));
    }

    #[test]
    fn test_wrong_secret() {
        let token = issue_access_token(Uuid::new_v4(), SECRET, Duration::hours(1)).unwrap();

        let result = verify_access_token(&token, "wrong_secret");
        assert_eq!(result, Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_tampered_token() {
        let token = issue_access_token(Uuid::new_v4(), SECRET, Duration::hours(1)).unwrap();

        let tampered = format!("{}X", token);
        assert!(verify_access_token(&tampered, SECRET).is_err());
    }

    #[test]
    fn test_expired_token() {
        let token = issue_access_token(Uuid::new_v4(), SECRET, Duration::seconds(-10)).unwrap();

        let result = verify_access_token(&token, SECRET);
        assert_eq!(result, Err(TokenError::Expired));
    }

    #[test]
    fn test_expired_token_with_wrong_secret_reports_signature() {
        let token = issue_access_token(Uuid::new_v4(), SECRET, Duration::seconds(-10)).unwrap();

        let result = verify_access_token(&token, "another-secret");
        assert_eq!(result, Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_wrong_issuer() {
        let mut claims = Claims::new(Uuid::new_v4(), Utc::now(), Duration::hours(1)).unwrap();
        claims.iss = "someone-else".to_string();

        let result = verify_access_token(&sign(&claims, SECRET), SECRET);
        assert_eq!(result, Err(TokenError::IssuerMismatch));
    }

    #[test]
    fn test_malformed_subject() {
        let mut claims = Claims::new(Uuid::new_v4(), Utc::now(), Duration::hours(1)).unwrap();
        claims.sub = "not-a-uuid".to_string();

        let result = verify_access_token(&sign(&claims, SECRET), SECRET);
        assert_eq!(result, Err(TokenError::MalformedSubject));
    }

    #[test]
    fn test_other_algorithms_are_rejected() {
        let claims = Claims::new(Uuid::new_v4(), Utc::now(), Duration::hours(1)).unwrap();
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(verify_access_token(&token, SECRET).is_err());
    }

    #[test]
    fn test_huge_ttl_returns_error_instead_of_panicking() {
        let result = issue_access_token(Uuid::new_v4(), SECRET, Duration::days(1_000_000_000));
        assert_eq!(
            result,
            Err(TokenError::Signing("ttl out of range".to_string()))
        );
    }

    #[test]
    fn test_default_ttl_is_one_hour() {
        assert_eq!(access_token_ttl().num_minutes(), 60);
    }
}
