//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `TRADEOFF` prefix and nested values use `__` as separator.
//!
//! # Example
//!
//! ```no_run
//! use tradeoff_engine::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod solver;
mod telemetry;

pub use error::{ConfigError, ValidationError};
pub use solver::SolverConfig;
pub use telemetry::init_tracing;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Weight-solver service configuration
    #[serde(default)]
    pub solver: SolverConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads a `.env` file if present, then reads environment variables
    /// with the `TRADEOFF` prefix; `TRADEOFF__SOLVER__BASE_URL=...` maps to
    /// `solver.base_url`.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TRADEOFF")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.solver.validate()?;
        Ok(())
    }
}
