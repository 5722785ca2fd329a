//! Application Error Handling
//!
//! Every concern keeps its own error enum (`ValidationError`, `StoreError`,
//! `AuthError`, ...). They all convert into `AppError`, which is the only
//! error a handler returns and the only one that knows about HTTP.

use actix_web::{error::ResponseError, http::StatusCode, HttpRequest, HttpResponse};
use thiserror::Error;

use crate::auth::{AuthError, BearerError, HashError, TokenError};
use crate::store::StoreError;
use crate::validators::ValidationError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("forbidden: {0}")]
    Forbidden(&'static str),
}

impl From<BearerError> for AppError {
    fn from(err: BearerError) -> Self {
        AppError::Auth(err.into())
    }
}

impl From<HashError> for AppError {
    fn from(err: HashError) -> Self {
        AppError::Auth(err.into())
    }
}

/// Error response body
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Error code for client-side handling
    pub code: String,
    /// Unique id, also present in the log line for this error
    pub error_id: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>, error_id: &str) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            error_id: error_id.to_string(),
        }
    }
}

/// Trait for converting errors to HTTP responses with proper logging
pub trait ErrorHandler {
    fn error_response(&self, error_id: &str) -> (StatusCode, ErrorResponse);
    fn log_error(&self, error_id: &str);
}

fn classify_store(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::Conflict => (
            StatusCode::CONFLICT,
            "DUPLICATE_ENTRY",
            "Record already exists".to_string(),
        ),
        StoreError::NotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Record not found".to_string(),
        ),
        StoreError::Unavailable(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "SERVICE_UNAVAILABLE",
            "Database service temporarily unavailable".to_string(),
        ),
        StoreError::Query(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "DATABASE_ERROR",
            "Database error occurred".to_string(),
        ),
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "Internal server error".to_string(),
    )
}

impl AppError {
    fn classify(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string()),
            AppError::Store(e) => classify_store(e),
            AppError::Auth(e) => match e {
                AuthError::InvalidCredentials => (
                    StatusCode::UNAUTHORIZED,
                    "INVALID_CREDENTIALS",
                    "Incorrect email or password".to_string(),
                ),
                AuthError::Unauthorized
                | AuthError::Bearer(_)
                | AuthError::Token(
                    TokenError::InvalidSignature
                    | TokenError::Expired
                    | TokenError::MalformedToken
                    | TokenError::IssuerMismatch
                    | TokenError::MalformedSubject,
                ) => (
                    StatusCode::UNAUTHORIZED,
                    "UNAUTHORIZED",
                    "Unauthorized".to_string(),
                ),
                AuthError::Store(e @ StoreError::Unavailable(_)) => classify_store(e),
                // Conflict or NotFound from inside a flow is a server fault
                AuthError::Token(TokenError::Signing(_))
                | AuthError::Hash(_)
                | AuthError::RandomSource(_)
                | AuthError::Store(_) => internal(),
            },
            AppError::Forbidden(reason) => (StatusCode::FORBIDDEN, "FORBIDDEN", reason.to_string()),
        }
    }
}

impl ErrorHandler for AppError {
    fn error_response(&self, error_id: &str) -> (StatusCode, ErrorResponse) {
        let (status, code, message) = self.classify();
        (status, ErrorResponse::new(message, code, error_id))
    }

    fn log_error(&self, error_id: &str) {
        let status = self.classify().0;
        if status.is_server_error() {
            tracing::error!(error_id = error_id, error = %self, "Request failed");
        } else {
            tracing::warn!(error_id = error_id, error = %self, "Request rejected");
        }
    }
}

/// Implement ResponseError for Actix-web integration
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let error_id = uuid::Uuid::new_v4().to_string();
        self.log_error(&error_id);

        let (status, error_response) = <Self as ErrorHandler>::error_response(self, &error_id);

        HttpResponse::build(status).json(error_response)
    }

    fn status_code(&self) -> StatusCode {
        self.classify().0
    }
}

/// Renders JSON extractor failures as a 400 `AppError`.
pub fn json_error_handler(err: actix_web::error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::from(ValidationError::MalformedBody(err.to_string())).into()
}

/// Per-request context attached to log lines
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub request_id: String,
    pub user_id: Option<String>,
    pub operation: String,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            user_id: None,
            operation: operation.into(),
        }
    }

    pub fn with_user_id(mut self, user_id: impl ToString) -> Self {
        self.user_id = Some(user_id.to_string());
        self
    }
}
