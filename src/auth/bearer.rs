//! Bearer credential extraction from the `Authorization` header.

use actix_web::http::header::{HeaderMap, AUTHORIZATION};
use thiserror::Error;

const SCHEME: &str = "Bearer";

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BearerError {
    #[error("authorization header is missing")]
    MissingHeader,
    #[error("authorization header is not a bearer credential")]
    MalformedScheme,
}

/// Return the credential of an `Authorization: Bearer <credential>` header.
///
/// The scheme is matched case-sensitively and must be followed by exactly one
/// space. Anything after a further space is ignored.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, BearerError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(BearerError::MissingHeader)?
        .to_str()
        .map_err(|_| BearerError::MalformedScheme)?;

    if value.is_empty() {
        return Err(BearerError::MissingHeader);
    }

    let (scheme, rest) = value.split_once(' ').ok_or(BearerError::MalformedScheme)?;
    if scheme != SCHEME {
        return Err(BearerError::MalformedScheme);
    }

    match rest.split(' ').next() {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(BearerError::MalformedScheme),
    }
}
