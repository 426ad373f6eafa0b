//! Infrastructure Database Layer
//!
//! This crate provides the database infrastructure for the PBX configuration
//! system, implementing the repository pattern on PostgreSQL using SQLx.
//!
//! # Architecture
//!
//! Each repository owns the SQL for one domain and maps between legacy-shaped
//! rows and the domain types. Multi-row mutations (associations, template
//! writes, member reordering) run inside transactions so the referential
//! rules of the configuration hold under concurrent writers.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig, EndpointRepository};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/pbx")).await?;
//! let repo = EndpointRepository::new(pool);
//! ```

pub mod config;
pub mod error;
pub mod pool;
pub mod repositories;

pub use config::Settings;
pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, DatabaseConfig, DatabasePool};
pub use repositories::{
    CallCenterRepository, DialplanRepository, EndpointRepository, FuncKeyRepository,
    QueueLogRepository,
};
