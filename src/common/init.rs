use crate::common::clock::SystemClock;
use crate::common::state::AppState;
use crate::settings::AppSettings;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::{MySql, Pool};
use std::sync::Arc;

pub fn initialize_logging(settings: &AppSettings) {
    tracing_subscriber::fmt()
        .with_max_level(settings.level)
        // .json()
        .with_timer(tracing_subscriber::fmt::time())
        .with_level(true)
        .compact()
        .init();
}

pub async fn initialize_state(settings: &AppSettings) -> anyhow::Result<AppState> {
    let db = initialize_db(settings).await?;
    let clock = Arc::new(SystemClock::new());
    Ok(AppState { db, clock })
}

pub fn initialize_db(settings: &AppSettings) -> impl Future<Output = sqlx::Result<Pool<MySql>>> {
    MySqlPoolOptions::new()
        .acquire_timeout(settings.db_wait_timeout)
        .max_connections(settings.db_max_connections as _)
        .connect(&settings.database_url)
}

pub async fn run_migrations(settings: &AppSettings) -> anyhow::Result<()> {
    let db = initialize_db(settings).await?;
    sqlx::migrate!("./migrations").run(&db).await?;
    tracing::info!("Migrations applied");
    Ok(())
}
