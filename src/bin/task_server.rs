//! Runs the task board HTTP server against `PostgreSQL`.
//!
//! Usage:
//!
//! ```text
//! task_server [config-path]
//! ```
//!
//! Without an argument the server reads `config/app.*` if present. Any
//! setting can be overridden with a `TASKBOARD_`-prefixed environment
//! variable, for example `TASKBOARD_DATABASE_URL`.

use mockable::DefaultClock;
use std::path::PathBuf;
use std::sync::Arc;
use taskboard::{
    api,
    config::AppConfig,
    task::{
        adapters::postgres::{PostgresTaskRepository, apply_migrations, build_pool},
        services::TaskLifecycleService,
    },
    telemetry,
};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = config_path
        .as_deref()
        .map_or_else(AppConfig::load, AppConfig::load_from)?;
    telemetry::init(config.debug)?;

    let pool = build_pool(&config.database_url, config.max_connections)?;
    let migration_pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = migration_pool.get()?;
        apply_migrations(&mut connection)?;
        Ok::<(), BoxError>(())
    })
    .await??;
    tracing::info!("database schema ready");

    let service = TaskLifecycleService::new(
        Arc::new(PostgresTaskRepository::new(pool)),
        Arc::new(DefaultClock),
    );
    api::serve(&config.listen_address, service).await?;
    Ok(())
}
