//! Process configuration, loaded once from the environment at startup.
//!
//! Reads individual env vars with `std::env::var` rather than pulling
//! in a config crate; this module just centralizes that into one
//! struct so `AppState::new` doesn't repeat the lookups.

use crate::errors::AppError;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub port: u16,

    pub hub_shard_count: usize,
    pub hub_send_queue_capacity: usize,
    pub hub_max_buffer_warnings: u32,
    pub hub_ping_interval: Duration,
    pub hub_read_timeout: Duration,

    pub db_call_timeout: Duration,
    pub redis_call_timeout: Duration,
    pub broadcast_write_timeout: Duration,
    pub broadcast_max_retries: u32,
    pub broadcast_retry_backoff: Duration,
    pub shutdown_drain: Duration,

    pub announce_offset: Duration,
    pub waiting_room_offset: Duration,
    pub countdown_offset: Duration,

    pub cluster_instance_id: String,
    pub cluster_redis_url: Option<String>,
}

fn env_var(key: &str) -> Result<String, AppError> {
    std::env::var(key).map_err(|_| AppError::EnvError(key.to_string()))
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: env_var("DATABASE_URL")?,
            redis_url: env_var("REDIS_URL")?,
            port: env_or("PORT", 3001),

            hub_shard_count: env_or("HUB_SHARD_COUNT", 16),
            hub_send_queue_capacity: env_or("HUB_SEND_QUEUE_CAPACITY", 128),
            hub_max_buffer_warnings: env_or("HUB_MAX_BUFFER_WARNINGS", 3),
            hub_ping_interval: Duration::from_secs(env_or("HUB_PING_INTERVAL_SECS", 15)),
            hub_read_timeout: Duration::from_secs(env_or("HUB_READ_TIMEOUT_SECS", 30)),

            db_call_timeout: Duration::from_secs(env_or("DB_CALL_TIMEOUT_SECS", 5)),
            redis_call_timeout: Duration::from_secs(env_or("REDIS_CALL_TIMEOUT_SECS", 5)),
            broadcast_write_timeout: Duration::from_millis(env_or(
                "BROADCAST_WRITE_TIMEOUT_MS",
                2000,
            )),
            broadcast_max_retries: env_or("BROADCAST_MAX_RETRIES", 3),
            broadcast_retry_backoff: Duration::from_millis(env_or(
                "BROADCAST_RETRY_BACKOFF_MS",
                100,
            )),
            shutdown_drain: Duration::from_secs(env_or("SHUTDOWN_DRAIN_SECS", 10)),

            announce_offset: Duration::from_secs(env_or("ANNOUNCE_OFFSET_SECS", 300)),
            waiting_room_offset: Duration::from_secs(env_or("WAITING_ROOM_OFFSET_SECS", 60)),
            countdown_offset: Duration::from_secs(env_or("COUNTDOWN_OFFSET_SECS", 10)),

            cluster_instance_id: std::env::var("CLUSTER_INSTANCE_ID")
                .unwrap_or_else(|_| uuid::Uuid::new_v4().to_string()),
            cluster_redis_url: std::env::var("CLUSTER_REDIS_URL").ok(),
        })
    }
}
