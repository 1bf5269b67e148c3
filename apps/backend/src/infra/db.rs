//! Database connection and bootstrap.

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

use crate::config::db::{db_url, DbProfile};
use crate::error::AppError;

pub async fn connect_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let url = db_url(profile)?;
    let mut opts = ConnectOptions::new(url.clone());
    opts.sqlx_logging(false)
        .connect_timeout(Duration::from_secs(10));
    if url.starts_with("sqlite") {
        // SQLite gets a single pooled connection: one writer, and an
        // in-memory database that survives between acquires.
        opts.max_connections(1).min_connections(1);
    }
    let conn = Database::connect(opts)
        .await
        .map_err(|err| AppError::config(format!("failed to connect to database: {err}")))?;
    Ok(conn)
}

/// Connects and brings the schema up to date.
pub async fn bootstrap_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(profile).await?;
    migration::migrate(&conn, migration::MigrationCommand::Up)
        .await
        .map_err(|err| AppError::config(format!("migration failed: {err}")))?;
    info!("database schema is up to date");
    Ok(conn)
}
