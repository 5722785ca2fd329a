//! Authentication flows
//!
//! Each flow takes the store and the signing secret explicitly and returns
//! an `AuthError`; translating that into a response is the HTTP layer's job.

use actix_web::http::header::HeaderMap;
use chrono::Utc;
use uuid::Uuid;

use super::bearer::extract_bearer_token;
use super::jwt::{access_token_ttl, issue_access_token, verify_access_token};
use super::password::spawn_check_password_hash;
use super::refresh_token::{generate_refresh_token, refresh_token_ttl};
use super::AuthError;
use crate::models::User;
use crate::store::{RefreshTokenStore, StoreError, UserStore};

/// Everything a successful login hands back to the client.
#[derive(Debug)]
pub struct LoginOutcome {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

/// Check credentials, then mint an access token and a stored refresh token.
///
/// An unknown email and a wrong password are the same `InvalidCredentials`.
#[tracing::instrument(name = "Logging in user", skip_all)]
pub async fn login<S>(
    store: &S,
    secret: &str,
    email: &str,
    password: &str,
) -> Result<LoginOutcome, AuthError>
where
    S: UserStore + RefreshTokenStore + ?Sized,
{
    let user = match store.find_user_by_email(email).await {
        Ok(user) => user,
        Err(StoreError::NotFound) => return Err(AuthError::InvalidCredentials),
        Err(e) => return Err(e.into()),
    };

    let matches =
        spawn_check_password_hash(password.to_string(), user.hashed_password.clone()).await?;
    if !matches {
        return Err(AuthError::InvalidCredentials);
    }

    let access_token = issue_access_token(user.id, secret, access_token_ttl())?;
    let refresh_token = generate_refresh_token()?;

    let now = Utc::now();
    store
        .store_refresh_token(&refresh_token, user.id, now, now + refresh_token_ttl())
        .await?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(LoginOutcome {
        user,
        access_token,
        refresh_token,
    })
}

/// Exchange an active refresh token for a new access token.
///
/// The refresh token itself is left untouched.
#[tracing::instrument(name = "Refreshing access token", skip_all)]
pub async fn refresh<S>(store: &S, secret: &str, refresh_token: &str) -> Result<String, AuthError>
where
    S: RefreshTokenStore + ?Sized,
{
    let user_id = match store.lookup_active_user(refresh_token).await {
        Ok(user_id) => user_id,
        Err(StoreError::NotFound) => return Err(AuthError::Unauthorized),
        Err(e) => return Err(e.into()),
    };

    let token = issue_access_token(user_id, secret, access_token_ttl())?;
    tracing::info!(user_id = %user_id, "Access token refreshed");

    Ok(token)
}

#[tracing::instrument(name = "Revoking refresh token", skip_all)]
pub async fn revoke<S>(store: &S, refresh_token: &str) -> Result<(), AuthError>
where
    S: RefreshTokenStore + ?Sized,
{
    match store.revoke_refresh_token(refresh_token).await {
        Ok(()) => Ok(()),
        Err(StoreError::NotFound) => Err(AuthError::Unauthorized),
        Err(e) => Err(e.into()),
    }
}

/// Resolve the user behind an `Authorization: Bearer <access token>` header.
pub fn authenticate(headers: &HeaderMap, secret: &str) -> Result<Uuid, AuthError> {
    let token = extract_bearer_token(headers)?;
    Ok(verify_access_token(&token, secret)?)
}
