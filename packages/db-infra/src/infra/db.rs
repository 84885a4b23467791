use std::future::Future;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{sanitize_db_url, DbKind, DbSettings};
use crate::error::DbInfraError;

async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval: Duration,
) -> Result<T, DbInfraError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbInfraError>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(
                        "connection_retry=success attempts={} interval_ms={}",
                        attempt,
                        interval.as_millis()
                    );
                }
                return Ok(result);
            }
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(_) => {
                warn!(
                    "connection_retry=failed attempt={} max_attempts={} interval_ms={}",
                    attempt,
                    max_attempts,
                    interval.as_millis()
                );
                tokio::time::sleep(interval).await;
                attempt += 1;
            }
        }
    }
}

/// Open a pooled connection, retrying while the server comes up.
pub async fn connect_db(settings: &DbSettings) -> Result<DatabaseConnection, DbInfraError> {
    let kind = settings.kind()?;
    let mut opt = ConnectOptions::new(settings.url.clone());
    opt.max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    if kind == DbKind::Sqlite {
        opt.min_connections(settings.max_connections);
    }

    info!(
        "db_connect=start kind={:?} url={} max_connections={}",
        kind,
        sanitize_db_url(&settings.url),
        settings.max_connections
    );

    retry_connection(
        || {
            let opt = opt.clone();
            async move {
                Database::connect(opt)
                    .await
                    .map_err(|e| DbInfraError::Connect {
                        message: format!("failed to connect to {kind:?}: {e}"),
                    })
            }
        },
        settings.connect_attempts,
        settings.retry_interval,
    )
    .await
}

/// Connect and bring the schema up to date. Used by the backend at startup.
pub async fn bootstrap_db(settings: &DbSettings) -> Result<DatabaseConnection, DbInfraError> {
    let conn = connect_db(settings).await?;
    run(&conn, MigrationCommand::Up).await?;
    Ok(conn)
}

/// Connect and run a single migration command. Used by the migration CLI.
pub async fn orchestrate_migration(
    settings: &DbSettings,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    let conn = connect_db(settings).await?;
    info!("migrate=start command={:?}", command);
    run(&conn, command).await?;
    info!("migrate=done command={:?}", command);
    Ok(())
}

async fn run(conn: &DatabaseConnection, command: MigrationCommand) -> Result<(), DbInfraError> {
    migrate(conn, command)
        .await
        .map_err(|e| DbInfraError::Migration {
            message: format!("{command:?} failed: {e}"),
        })
}
