use std::fmt;
use std::time::Duration;

use config::ConfigError;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
    pub jwt: JwtSettings,
}

/// Deployment platform. Only `dev` allows destructive admin endpoints.
#[derive(serde::Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Dev,
    #[default]
    Production,
}

impl Platform {
    pub fn allows_reset(&self) -> bool {
        matches!(self, Platform::Dev)
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub platform: Platform,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    pub port: u16,
    pub host: String,
    pub database_name: String,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
    /// Server-side cap on a single statement. Cancelled statements surface
    /// as `StoreError::Unavailable`.
    #[serde(default = "default_statement_timeout_secs")]
    pub statement_timeout_secs: u64,
}

fn default_acquire_timeout_secs() -> u64 {
    2
}

fn default_statement_timeout_secs() -> u64 {
    5
}

impl DatabaseSettings {
    pub fn connection_string(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}?options=-c%20statement_timeout%3D{}",
            self.username,
            self.password,
            self.host,
            self.port,
            self.database_name,
            self.statement_timeout().as_millis()
        )
    }

    pub fn connection_string_without_db(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}",
            self.username, self.password, self.host, self.port
        )
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn statement_timeout(&self) -> Duration {
        Duration::from_secs(self.statement_timeout_secs)
    }
}

/// JWT signing settings. Token lifetimes and issuer are fixed in `auth`.
#[derive(serde::Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
}

impl fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &"[redacted]")
            .finish()
    }
}

/// Load settings from `configuration.yaml` (optional), then `APP_*`
/// environment variables, e.g. `APP_JWT__SECRET` or
/// `APP_APPLICATION__PLATFORM=dev`.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("configuration").required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;
    settings.try_deserialize::<Settings>()
}
