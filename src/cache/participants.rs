//! Participant/ready-set operations backing `HandleReady`.

use redis::AsyncCommands;
use uuid::Uuid;

use super::{CacheKey, CacheRepository, keys::DEFAULT_TTL_SECS};
use crate::errors::AppError;

impl CacheRepository {
    /// Idempotently add `user_id` to the quiz's participant set and
    /// record that they sent "ready". Returns `true` if this call was
    /// the one that actually added the user (first ready).
    pub async fn mark_ready(&self, quiz_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let mut conn = self
            .redis
            .get()
            .await
            .map_err(|e| AppError::RedisPoolError(e.to_string()))?;

        let participants_key = CacheKey::participants(quiz_id);
        let added: i64 = conn
            .sadd(&participants_key, user_id.to_string())
            .await
            .map_err(AppError::RedisCommandError)?;
        let _: () = conn
            .expire(&participants_key, DEFAULT_TTL_SECS)
            .await
            .map_err(AppError::RedisCommandError)?;

        let ready_key = CacheKey::ready(quiz_id, user_id);
        let _: () = conn
            .set_ex(&ready_key, "1", DEFAULT_TTL_SECS as u64)
            .await
            .map_err(AppError::RedisCommandError)?;

        Ok(added > 0)
    }

    /// All participant user ids for a quiz.
    pub async fn participants(&self, quiz_id: Uuid) -> Result<Vec<Uuid>, AppError> {
        let mut conn = self
            .redis
            .get()
            .await
            .map_err(|e| AppError::RedisPoolError(e.to_string()))?;

        let raw: Vec<String> = conn
            .smembers(CacheKey::participants(quiz_id))
            .await
            .map_err(AppError::RedisCommandError)?;

        Ok(raw.into_iter().filter_map(|s| Uuid::parse_str(&s).ok()).collect())
    }
}
