use actix_files as fs;
use actix_web::dev::Server;
use actix_web::{guard, middleware::Logger, web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;

use crate::configuration::{JwtSettings, Platform};
use crate::error::json_error_handler;
use crate::middleware::{FileserverHits, HitCounter, JwtMiddleware};
use crate::routes::{
    create_chirp, create_user, delete_chirp, get_chirp, health_check, list_chirps, login,
    metrics, refresh, reset, revoke,
};
use crate::store::Store;

pub fn run(
    listener: TcpListener,
    store: Arc<dyn Store>,
    jwt_config: JwtSettings,
    platform: Platform,
) -> Result<Server, std::io::Error> {
    let store: web::Data<dyn Store> = web::Data::from(store);
    let jwt_config_data = web::Data::new(jwt_config.clone());
    let platform = web::Data::new(platform);
    let hits = web::Data::new(FileserverHits::default());

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            // Shared state
            .app_data(store.clone())
            .app_data(jwt_config_data.clone())
            .app_data(platform.clone())
            .app_data(hits.clone())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            // Static site, every request counted
            .service(
                web::scope("/app")
                    .wrap(HitCounter::new(hits.clone().into_inner()))
                    .service(fs::Files::new("/", "./public").index_file("index.html")),
            )
            .service(
                web::scope("/admin")
                    .route("/metrics", web::get().to(metrics))
                    .route("/reset", web::post().to(reset)),
            )
            .service(
                web::scope("/api")
                    .route("/healthz", web::get().to(health_check))
                    .route("/users", web::post().to(create_user))
                    .route("/login", web::post().to(login))
                    .route("/refresh", web::post().to(refresh))
                    .route("/revoke", web::post().to(revoke))
                    // Protected resources come first; their guard falls through
                    // to the public resource on the same path for other methods.
                    .service(
                        web::resource("/chirps")
                            .guard(guard::Post())
                            .route(web::post().to(create_chirp))
                            .wrap(JwtMiddleware::new(jwt_config.clone())),
                    )
                    .service(web::resource("/chirps").route(web::get().to(list_chirps)))
                    .service(
                        web::resource("/chirps/{chirpID}")
                            .guard(guard::Delete())
                            .route(web::delete().to(delete_chirp))
                            .wrap(JwtMiddleware::new(jwt_config.clone())),
                    )
                    .service(web::resource("/chirps/{chirpID}").route(web::get().to(get_chirp))),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
