//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! TOML files and `BARID__`-prefixed environment variables. Each sub-module
//! represents a logical configuration section, and every section has
//! defaults so the server can start without any file present.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod rates;
pub mod reviews;
pub mod shipments;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::{DatabaseConfig, StoreBackend};
pub use self::logging::LoggingConfig;
pub use self::rates::RatesConfig;
pub use self::reviews::ReviewsConfig;
pub use self::shipments::ShipmentsConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// configuration (default.toml + environment overlay + environment variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Document store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Admin authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Shipment record settings.
    #[serde(default)]
    pub shipments: ShipmentsConfig,
    /// Rate estimator settings.
    #[serde(default)]
    pub rates: RatesConfig,
    /// Review moderation settings.
    #[serde(default)]
    pub reviews: ReviewsConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files and the environment.
    ///
    /// Merges `config/default.toml` with an environment-specific overlay
    /// `config/{env}.toml` and environment variables prefixed with `BARID__`
    /// (double underscore separates nested keys, e.g. `BARID__SERVER__PORT`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("BARID")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
