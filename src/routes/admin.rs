use actix_web::{web, HttpResponse};

use crate::configuration::Platform;
use crate::error::AppError;
use crate::middleware::FileserverHits;
use crate::store::{Store, UserStore};

/// GET /admin/metrics
pub async fn metrics(hits: web::Data<FileserverHits>) -> HttpResponse {
    let body = format!(
        r#"<html>
  <body>
    <h1>Welcome, Chirpy Admin</h1>
    <p>Chirpy has been visited {} times!</p>
  </body>
</html>"#,
        hits.get()
    );

    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

/// POST /admin/reset
///
/// Deletes every user (cascading to chirps and refresh tokens) and zeroes the
/// hit counter. Only available on the `dev` platform.
pub async fn reset(
    platform: web::Data<Platform>,
    store: web::Data<dyn Store>,
    hits: web::Data<FileserverHits>,
) -> Result<HttpResponse, AppError> {
    if !platform.allows_reset() {
        return Err(AppError::Forbidden("reset is only allowed on the dev platform"));
    }

    let removed = store.delete_all_users().await?;
    hits.reset();
    tracing::warn!(users_removed = removed, "Store reset");

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Reset successful"))
}
