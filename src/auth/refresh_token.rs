//! Refresh Token Generation
//!
//! Refresh tokens are opaque: 32 bytes from the operating system CSPRNG,
//! hex-encoded. All of their state lives in the `RefreshTokenStore`.

use chrono::Duration;
use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

const REFRESH_TOKEN_BYTES: usize = 32;
const REFRESH_TOKEN_TTL_DAYS: i64 = 60;

#[derive(Debug, Error)]
#[error("secure random source unavailable: {0}")]
pub struct RandomSourceError(#[from] rand::Error);

/// Lifetime of a refresh token, counted from its creation.
pub fn refresh_token_ttl() -> Duration {
    Duration::days(REFRESH_TOKEN_TTL_DAYS)
}

/// Generate a new refresh token as 64 lowercase hex characters.
///
/// # Errors
/// Fails if the OS random source cannot be read. There is no fallback to a
/// weaker generator.
pub fn generate_refresh_token() -> Result<String, RandomSourceError> {
    let mut key = [0u8; REFRESH_TOKEN_BYTES];
    OsRng.try_fill_bytes(&mut key)?;

    Ok(key.iter().map(|byte| format!("{:02x}", byte)).collect())
}
