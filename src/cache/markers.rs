//! Per-question answered/eliminated markers.

use redis::AsyncCommands;
use uuid::Uuid;

use super::{CacheKey, CacheRepository, keys::DEFAULT_TTL_SECS};
use crate::errors::AppError;

impl CacheRepository {
    /// Records that `user_id` answered `question_number`. Returns `false`
    /// if a marker already existed (duplicate submission).
    pub async fn mark_answered(
        &self,
        quiz_id: Uuid,
        question_number: i32,
        user_id: Uuid,
    ) -> Result<bool, AppError> {
        let mut conn = self
            .redis
            .get()
            .await
            .map_err(|e| AppError::RedisPoolError(e.to_string()))?;

        let key = CacheKey::answered(quiz_id, question_number, user_id);
        let set: bool = redis::cmd("SET")
            .arg(&key)
            .arg("1")
            .arg("NX")
            .arg("EX")
            .arg(DEFAULT_TTL_SECS)
            .query_async(&mut *conn)
            .await
            .map_err(AppError::RedisCommandError)?;

        Ok(set)
    }

    pub async fn has_answered(
        &self,
        quiz_id: Uuid,
        question_number: i32,
        user_id: Uuid,
    ) -> Result<bool, AppError> {
        let mut conn = self
            .redis
            .get()
            .await
            .map_err(|e| AppError::RedisPoolError(e.to_string()))?;

        conn.exists(CacheKey::answered(quiz_id, question_number, user_id))
            .await
            .map_err(AppError::RedisCommandError)
    }

    /// Marks `user_id` eliminated for the remainder of the quiz. Returns
    /// `false` if they were already eliminated (idempotent).
    pub async fn mark_eliminated(&self, quiz_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let mut conn = self
            .redis
            .get()
            .await
            .map_err(|e| AppError::RedisPoolError(e.to_string()))?;

        let key = CacheKey::eliminated(quiz_id, user_id);
        let set: bool = redis::cmd("SET")
            .arg(&key)
            .arg("1")
            .arg("NX")
            .arg("EX")
            .arg(DEFAULT_TTL_SECS)
            .query_async(&mut *conn)
            .await
            .map_err(AppError::RedisCommandError)?;

        Ok(set)
    }

    pub async fn is_eliminated(&self, quiz_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let mut conn = self
            .redis
            .get()
            .await
            .map_err(|e| AppError::RedisPoolError(e.to_string()))?;

        conn.exists(CacheKey::eliminated(quiz_id, user_id))
            .await
            .map_err(AppError::RedisCommandError)
    }
}
