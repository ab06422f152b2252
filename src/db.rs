use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;
use std::time::Duration;

use crate::config::Config;

/// Builds the pool every repository call borrows its connection from.
pub async fn init_db(config: &Config) -> Result<MySqlPool, sqlx::Error> {
    tracing::info!(
        max_connections = config.db_max_connections,
        "Creating database connection pool"
    );

    MySqlPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_secs))
        .connect(&config.database_url)
        .await
}
