use crate::common::env::FromEnv;
use std::env;
use std::net::IpAddr;
use std::ops::Deref;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::Level;

/// Hard ceiling for long-poll requests, regardless of configuration.
pub const POLL_TIMEOUT_CEILING_SECS: u64 = 30;

pub struct AppSettings {
    pub app_component: String,
    pub level: Level,
    pub app_host: IpAddr,
    pub app_port: u16,

    pub database_url: String,
    pub db_max_connections: usize,
    pub db_wait_timeout: Duration,
    pub db_lock_wait_timeout: Duration,

    pub poll_max_timeout: Duration,
    pub default_part_length_secs: i32,
}

impl AppSettings {
    pub fn load_from_env() -> anyhow::Result<Self> {
        let _ = dotenv::dotenv();

        let app_component = env::var("APP_COMPONENT")?;
        let level = Level::from_env("LOG_LEVEL")?;
        let app_host = IpAddr::from_env("APP_HOST")?;
        let app_port = u16::from_env("APP_PORT")?;

        let database_url = env::var("DATABASE_URL")?;
        let db_max_connections = usize::from_env("DB_MAX_CONNECTIONS")?;
        let db_wait_timeout_secs = u64::from_env("DB_WAIT_TIMEOUT_SECS")?;
        let db_wait_timeout = Duration::from_secs(db_wait_timeout_secs);
        let db_lock_wait_timeout_secs = u64::from_env_or("DB_LOCK_WAIT_TIMEOUT_SECS", 10)?;
        let db_lock_wait_timeout = Duration::from_secs(db_lock_wait_timeout_secs);

        let poll_max_timeout_secs =
            u64::from_env_or("POLL_MAX_TIMEOUT_SECS", POLL_TIMEOUT_CEILING_SECS)?;
        let poll_max_timeout =
            Duration::from_secs(poll_max_timeout_secs.clamp(1, POLL_TIMEOUT_CEILING_SECS));
        let default_part_length_secs = i32::from_env_or("DEFAULT_PART_LENGTH_SECS", 1800)?;

        Ok(AppSettings {
            app_component,
            level,
            app_port,
            app_host,

            database_url,
            db_max_connections,
            db_wait_timeout,
            db_lock_wait_timeout,

            poll_max_timeout,
            default_part_length_secs,
        })
    }

    pub fn get() -> &'static AppSettings {
        settings()
    }
}

pub fn settings() -> &'static AppSettings {
    static SETTINGS: LazyLock<AppSettings> =
        LazyLock::new(|| AppSettings::load_from_env().expect("Failed to load settings"));
    SETTINGS.deref()
}
