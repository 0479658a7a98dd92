//! Shared application state handed to every handler and engine task.
//!
//! A thin bag of pool handles cloned into each axum handler: Postgres
//! for durable records, a Redis pool for the transient cache, the
//! realtime hub, and the quiz manager that owns every in-flight quiz's
//! task.

use std::sync::Arc;

use bb8::Pool;
use bb8_redis::RedisConnectionManager;
use sqlx::PgPool;

use crate::cache::CacheRepository;
use crate::config::Config;
use crate::db::Repositories;
use crate::engine::quiz_manager::QuizManager;
use crate::errors::AppError;
use crate::pubsub::PubSub;
use crate::realtime::hub::Hub;

/// Pooled async Redis connection handle, shared by every repository
/// and engine component that talks to the cache.
pub type RedisClient = Pool<RedisConnectionManager>;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Repositories,
    pub cache: CacheRepository,
    pub hub: Arc<Hub>,
    pub quiz_manager: Arc<QuizManager>,
    pub pubsub: Arc<dyn PubSub>,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let postgres = PgPool::connect(&config.database_url)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let manager = RedisConnectionManager::new(config.redis_url.clone())
            .map_err(AppError::RedisCommandError)?;
        let redis = Pool::builder()
            .build(manager)
            .await
            .map_err(|e| AppError::RedisPoolError(e.to_string()))?;

        let config = Arc::new(config);
        let db = Repositories::new(postgres);
        let cache = CacheRepository::new(redis);
        let pubsub = crate::pubsub::build(&config).await?;
        let hub = Arc::new(Hub::new(config.clone(), pubsub.clone()));
        if config.cluster_redis_url.is_some() {
            hub.install_cluster_listener().await?;
        }
        let quiz_manager = QuizManager::new(config.clone(), db.clone(), cache.clone(), hub.clone());

        Ok(Self {
            config,
            db,
            cache,
            hub,
            quiz_manager,
            pubsub,
        })
    }
}
