use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::is_sqlite_memory;
use crate::error::AppError;

/// Open a connection pool. Does NOT run any migrations.
pub async fn connect_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let mut opts = ConnectOptions::new(url.to_owned());
    opts.sqlx_logging(false)
        .connect_timeout(Duration::from_secs(10));

    // Each in-memory connection is its own database; pin the pool to one.
    if is_sqlite_memory(url) {
        opts.max_connections(1).min_connections(1);
    }

    let conn = Database::connect(opts)
        .await
        .map_err(|e| AppError::db_unavailable(format!("Failed to connect to database: {e}")))?;
    Ok(conn)
}

/// Connect and apply pending migrations.
pub async fn bootstrap_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(url).await?;
    migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::config(format!("Migration failed: {e}")))?;
    info!(backend = ?conn.get_database_backend(), "database ready");
    Ok(conn)
}
