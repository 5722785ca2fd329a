use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::configuration::Platform;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialise structured logging, filtered by `RUST_LOG` (default `info`).
///
/// Production emits JSON lines on stdout; `dev` uses the human-readable
/// formatter.
pub fn init_telemetry(platform: Platform) {
    let registry = tracing_subscriber::registry().with(env_filter());

    match platform {
        Platform::Production => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stdout)
                    .json(),
            )
            .init(),
        Platform::Dev => registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init(),
    }
}
