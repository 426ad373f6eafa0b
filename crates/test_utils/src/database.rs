//! Database Test Utilities
//!
//! Spins up a disposable PostgreSQL container, applies the schema, and hands
//! out a connection pool. Tests that only read can share one container via
//! [`get_shared_test_database`]; tests that mutate freely should take an
//! isolated one.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use testcontainers::{
    core::{IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};
use tokio::sync::OnceCell;

const POSTGRES_IMAGE: &str = "postgres";
const POSTGRES_TAG: &str = "16-alpine";
const POSTGRES_USER: &str = "test_user";
const POSTGRES_PASSWORD: &str = "test_password";
const POSTGRES_DB: &str = "pbx_test";

/// Tables in FK-safe truncation order
const ALL_TABLES: [&str; 17] = [
    "queue_log",
    "queue_members",
    "func_keys",
    "func_key_templates",
    "call_filter_members",
    "call_filters",
    "line_extensions",
    "user_lines",
    "extensions",
    "lines",
    "users",
    "voicemails",
    "cti_profiles",
    "agents",
    "queues",
    "context_ranges",
    "contexts",
];

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A PostgreSQL test container with the PBX schema applied
pub struct TestDatabase {
    _container: ContainerAsync<GenericImage>,
    url: String,
    pool: PgPool,
}

impl TestDatabase {
    /// Starts a container, waits for Postgres, and applies the schema
    ///
    /// # Errors
    ///
    /// Fails when no Docker daemon is reachable or the schema does not apply.
    pub async fn start() -> Result<Self, BoxError> {
        let container = GenericImage::new(POSTGRES_IMAGE, POSTGRES_TAG)
            .with_exposed_port(5432.tcp())
            .with_wait_for(WaitFor::message_on_stderr(
                "database system is ready to accept connections",
            ))
            .with_env_var("POSTGRES_USER", POSTGRES_USER)
            .with_env_var("POSTGRES_PASSWORD", POSTGRES_PASSWORD)
            .with_env_var("POSTGRES_DB", POSTGRES_DB)
            .start()
            .await?;

        let host = container.get_host().await?;
        let port = container.get_host_port_ipv4(5432).await?;
        let url = format!(
            "postgres://{POSTGRES_USER}:{POSTGRES_PASSWORD}@{host}:{port}/{POSTGRES_DB}"
        );

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&url)
            .await?;

        let schema = include_str!("../../../migrations/0001_initial_schema.sql");
        sqlx::raw_sql(schema).execute(&pool).await?;

        Ok(Self {
            _container: container,
            url,
            pool,
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Connection URL of the containerized server
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Truncates every table, keeping the schema
    pub async fn reset(&self) -> Result<(), BoxError> {
        for table in ALL_TABLES {
            sqlx::query(&format!("TRUNCATE TABLE {table} CASCADE"))
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }
}

static SHARED_TEST_DB: OnceCell<Arc<TestDatabase>> = OnceCell::const_new();

/// One container shared by the whole test binary
///
/// Callers that write data must `reset()` first and tolerate neighbours.
///
/// # Panics
///
/// Panics when the container cannot be started.
pub async fn get_shared_test_database() -> Arc<TestDatabase> {
    SHARED_TEST_DB
        .get_or_init(|| async {
            Arc::new(
                TestDatabase::start()
                    .await
                    .expect("failed to start shared test database"),
            )
        })
        .await
        .clone()
}

/// A fresh container for one test, dropped with the value
pub async fn create_isolated_test_database() -> Result<TestDatabase, BoxError> {
    TestDatabase::start().await
}
