use chirpy::configuration::get_configuration;
use chirpy::startup::run;
use chirpy::store::PgStore;
use chirpy::telemetry::init_telemetry;
use sqlx::postgres::PgPoolOptions;
use std::net::TcpListener;
use std::sync::Arc;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Configuration decides the log format, so it is read before telemetry.
    let configuration = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "Configuration error")
    })?;

    init_telemetry(configuration.application.platform);
    tracing::info!(
        platform = ?configuration.application.platform,
        "Configuration loaded successfully"
    );

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(configuration.database.acquire_timeout())
        .connect(&configuration.database.connection_string())
        .await
        .map_err(|e| {
            tracing::error!("Failed to create connection pool: {}", e);
            std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "Database connection error",
            )
        })?;

    sqlx::migrate!("./migrations").run(&pool).await.map_err(|e| {
        tracing::error!("Failed to run migrations: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, "Migration error")
    })?;
    tracing::info!("Database ready");

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Server listening on: {}", address);

    let store = Arc::new(PgStore::new(pool));
    let server = run(
        listener,
        store,
        configuration.jwt.clone(),
        configuration.application.platform,
    )?;

    server.await
}
