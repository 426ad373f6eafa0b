//! Database settings loaded from the environment
//!
//! Settings are read from `PBX_`-prefixed environment variables, with a
//! `.env` file honored in development. `PBX_DATABASE_URL` is the only
//! required variable.

use serde::Deserialize;

use crate::error::DatabaseError;
use crate::pool::DatabaseConfig;

/// Database settings resolved from the environment
///
/// # Example
///
/// ```rust,ignore
/// use infra_db::{create_pool, Settings};
///
/// let settings = Settings::load()?;
/// let pool = create_pool(settings.into_pool_config()).await?;
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// PostgreSQL connection string (`PBX_DATABASE_URL`)
    pub database_url: String,
    /// Maximum pool size (`PBX_MAX_CONNECTIONS`, default 10)
    pub max_connections: u32,
    /// Minimum pool size (`PBX_MIN_CONNECTIONS`, default 2)
    pub min_connections: u32,
}

impl Settings {
    /// Loads settings from the environment
    ///
    /// A `.env` file in the working directory is loaded first when present;
    /// real environment variables take precedence over it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Configuration` when `PBX_DATABASE_URL` is
    /// missing or a variable does not parse.
    pub fn load() -> Result<Self, DatabaseError> {
        dotenvy::dotenv().ok();

        config::Config::builder()
            .set_default("max_connections", 10)
            .map_err(|e| DatabaseError::Configuration(e.to_string()))?
            .set_default("min_connections", 2)
            .map_err(|e| DatabaseError::Configuration(e.to_string()))?
            .add_source(config::Environment::with_prefix("PBX"))
            .build()
            .map_err(|e| DatabaseError::Configuration(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DatabaseError::Configuration(e.to_string()))
    }

    /// Converts the settings into a pool configuration
    pub fn into_pool_config(self) -> DatabaseConfig {
        DatabaseConfig::new(self.database_url)
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
    }
}
