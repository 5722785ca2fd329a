use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::content_filter::{clean_body, BANNED_WORDS};
use crate::error::{AppError, ErrorContext};
use crate::models::Chirp;
use crate::store::{ChirpStore, Store};
use crate::validators::{validate_chirp_body, ValidationError};

#[derive(Deserialize)]
pub struct CreateChirpRequest {
    pub body: String,
}

#[derive(Serialize)]
pub struct ChirpResponse {
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    pub body: String,
    pub user_id: String,
}

impl From<Chirp> for ChirpResponse {
    fn from(chirp: Chirp) -> Self {
        Self {
            id: chirp.id.to_string(),
            created_at: chirp.created_at.to_rfc3339(),
            updated_at: chirp.updated_at.to_rfc3339(),
            body: chirp.body,
            user_id: chirp.user_id.to_string(),
        }
    }
}

fn parse_chirp_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| ValidationError::InvalidFormat("chirpID").into())
}

/// POST /api/chirps (requires access token)
pub async fn create_chirp(
    user: web::ReqData<AuthenticatedUser>,
    form: web::Json<CreateChirpRequest>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("create_chirp").with_user_id(user.user_id());

    validate_chirp_body(&form.body)?;
    let cleaned = clean_body(&form.body, &BANNED_WORDS);

    let chirp = store
        .create_chirp(Chirp::new(cleaned, user.user_id()))
        .await?;

    tracing::info!(
        request_id = %context.request_id,
        operation = %context.operation,
        user_id = ?context.user_id,
        chirp_id = %chirp.id,
        "Chirp created"
    );

    Ok(HttpResponse::Created().json(ChirpResponse::from(chirp)))
}

/// GET /api/chirps
pub async fn list_chirps(store: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    let chirps: Vec<ChirpResponse> = store
        .list_chirps()
        .await?
        .into_iter()
        .map(ChirpResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(chirps))
}

/// GET /api/chirps/{chirpID}
pub async fn get_chirp(
    path: web::Path<String>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let chirp_id = parse_chirp_id(&path)?;
    let chirp = store.get_chirp(chirp_id).await?;

    Ok(HttpResponse::Ok().json(ChirpResponse::from(chirp)))
}

/// DELETE /api/chirps/{chirpID} (requires access token)
///
/// # Errors
/// - 403: the chirp belongs to another user
/// - 404: no such chirp
pub async fn delete_chirp(
    user: web::ReqData<AuthenticatedUser>,
    path: web::Path<String>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let chirp_id = parse_chirp_id(&path)?;
    let chirp = store.get_chirp(chirp_id).await?;

    if chirp.user_id != user.user_id() {
        return Err(AppError::Forbidden("chirp belongs to another user"));
    }

    store.delete_chirp(chirp_id).await?;
    tracing::info!(user_id = %user.user_id(), chirp_id = %chirp_id, "Chirp deleted");

    Ok(HttpResponse::NoContent().finish())
}
