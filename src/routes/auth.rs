//! Authentication Routes
//!
//! Login with email and password, exchange a refresh token for a new access
//! token, and revoke a refresh token. Refresh tokens travel in the
//! `Authorization: Bearer` header, never in the body.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::{self, extract_bearer_token};
use crate::configuration::JwtSettings;
use crate::error::AppError;
use crate::store::Store;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    pub email: String,
    pub token: String,
    pub refresh_token: String,
}

#[derive(Serialize)]
pub struct RefreshResponse {
    pub token: String,
}

/// POST /api/login
///
/// # Errors
/// - 401: unknown email or wrong password, with the same message for both
pub async fn login(
    form: web::Json<LoginRequest>,
    store: web::Data<dyn Store>,
    jwt_config: web::Data<JwtSettings>,
) -> Result<HttpResponse, AppError> {
    let outcome = auth::login(
        store.get_ref(),
        &jwt_config.secret,
        form.email.trim(),
        &form.password,
    )
    .await?;

    let user = outcome.user;
    Ok(HttpResponse::Ok().json(LoginResponse {
        id: user.id.to_string(),
        created_at: user.created_at.to_rfc3339(),
        updated_at: user.updated_at.to_rfc3339(),
        email: user.email,
        token: outcome.access_token,
        refresh_token: outcome.refresh_token,
    }))
}

/// POST /api/refresh
///
/// Issues a new access token. The refresh token stays valid.
pub async fn refresh(
    req: HttpRequest,
    store: web::Data<dyn Store>,
    jwt_config: web::Data<JwtSettings>,
) -> Result<HttpResponse, AppError> {
    let refresh_token = extract_bearer_token(req.headers())?;
    let token = auth::refresh(store.get_ref(), &jwt_config.secret, &refresh_token).await?;

    Ok(HttpResponse::Ok().json(RefreshResponse { token }))
}

/// POST /api/revoke
///
/// Revoking an unknown or already revoked token is a 401.
pub async fn revoke(
    req: HttpRequest,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let refresh_token = extract_bearer_token(req.headers())?;
    auth::revoke(store.get_ref(), &refresh_token).await?;

    Ok(HttpResponse::NoContent().finish())
}
