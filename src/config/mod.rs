//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values load under the `BOOKWELL` prefix
//! with `__` separating nested keys.
//!
//! # Example
//!
//! ```no_run
//! use bookwell::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod checkin;
mod error;
mod events;
mod server;
mod store;

pub use checkin::CheckInConfig;
pub use error::{ConfigError, ValidationError};
pub use events::EventsConfig;
pub use server::{Environment, ServerConfig};
pub use store::StoreConfig;

use serde::Deserialize;

/// Root application configuration.
///
/// Every field defaults, so a bare process boots against the in-memory
/// adapters with no environment at all.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Store configuration (table names)
    #[serde(default)]
    pub store: StoreConfig,

    /// Event bus configuration (bus name, outbound source)
    #[serde(default)]
    pub events: EventsConfig,

    /// Check-in policy (window minutes, default radius)
    #[serde(default)]
    pub checkin: CheckInConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variable Format
    ///
    /// - `BOOKWELL__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `BOOKWELL__EVENTS__BUS_NAME=prod-bus` -> `events.bus_name = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into their types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("BOOKWELL")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.store.validate()?;
        self.events.validate()?;
        self.checkin.validate()?;
        Ok(())
    }

    /// Check if running in production environment.
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
