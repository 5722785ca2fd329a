//! Authentication module
//!
//! Credential primitives, the access token codec, bearer extraction and the
//! login/refresh/revoke flows built from them.

mod bearer;
mod claims;
mod flow;
mod jwt;
mod password;
mod refresh_token;

pub use bearer::{extract_bearer_token, BearerError};
pub use claims::Claims;
pub use flow::{authenticate, login, refresh, revoke, LoginOutcome};
pub use jwt::{access_token_ttl, issue_access_token, verify_access_token, TokenError, ISSUER};
pub use password::{
    check_password_hash, hash_password, spawn_check_password_hash, spawn_hash_password, HashError,
};
pub use refresh_token::{generate_refresh_token, refresh_token_ttl, RandomSourceError};

use thiserror::Error;
use uuid::Uuid;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("incorrect email or password")]
    InvalidCredentials,
    #[error("refresh token is unknown, expired or revoked")]
    Unauthorized,
    #[error(transparent)]
    Bearer(#[from] BearerError),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Hash(#[from] HashError),
    #[error(transparent)]
    RandomSource(#[from] RandomSourceError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// User id bound into request extensions by `JwtMiddleware`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub Uuid);

impl AuthenticatedUser {
    pub fn user_id(&self) -> Uuid {
        self.0
    }
}
