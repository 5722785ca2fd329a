use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::spawn_hash_password;
use crate::error::{AppError, ErrorContext};
use crate::models::User;
use crate::store::{Store, UserStore};
use crate::validators::{is_valid_email, validate_password};

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
}

/// Public view of a user. The password hash never leaves the server.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
            email: user.email.clone(),
        }
    }
}

/// POST /api/users
///
/// # Errors
/// - 400: invalid email or empty password
/// - 409: email already registered
pub async fn create_user(
    form: web::Json<CreateUserRequest>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("user_registration");

    let email = is_valid_email(&form.email)?;
    validate_password(&form.password)?;

    let form = form.into_inner();
    let hashed_password = spawn_hash_password(form.password).await?;
    let user = store.create_user(User::new(email, hashed_password)).await?;

    tracing::info!(
        request_id = %context.request_id,
        operation = %context.operation,
        user_id = %user.id,
        "User registered successfully"
    );

    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}
