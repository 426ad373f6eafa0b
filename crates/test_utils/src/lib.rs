//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! PBX configuration test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for common entities
//! - `builders`: Builder patterns for test data construction
//! - `database`: Database test helpers and container management
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based test data generators

pub mod assertions;
pub mod builders;
pub mod database;
pub mod fixtures;
pub mod generators;

pub use assertions::*;
pub use builders::*;
pub use database::*;
pub use fixtures::*;
pub use generators::*;

use once_cell::sync::Lazy;

static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
});

/// Initializes tracing for tests, once per process
///
/// Safe to call from every test; later calls are no-ops. The filter honors
/// `RUST_LOG` and defaults to `info`.
pub fn init_test_tracing() {
    Lazy::force(&TRACING);
}
