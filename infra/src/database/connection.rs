//! MySQL connection pool creation.

use std::time::Duration;

use sqlx::mysql::MySqlPoolOptions;
use sqlx::{MySql, Pool};

use ss_shared::config::DatabaseConfig;

/// Create a MySQL connection pool from the database configuration.
pub async fn create_pool(config: &DatabaseConfig) -> Result<Pool<MySql>, sqlx::Error> {
    tracing::info!(
        max_connections = config.max_connections,
        "Creating MySQL connection pool"
    );

    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout))
        .connect(&config.url)
        .await
}
