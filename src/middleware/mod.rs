//! Middleware module
//!
//! Bearer authentication for protected resources and the static file hit
//! counter.

mod hit_counter;
mod jwt_middleware;

pub use hit_counter::{FileserverHits, HitCounter};
pub use jwt_middleware::JwtMiddleware;
