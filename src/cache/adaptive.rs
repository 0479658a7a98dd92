//! Per-question pass-rate counters backing the adaptive selector.
//!
//! `question_total` and `question_passed` are plain incrementing
//! counters; the pass rate for a question is `passed / total` once the
//! question closes. No TTL beyond the shared default — the counters are
//! read once by `result_finalizer`/`adaptive_selector` and never again.

use redis::AsyncCommands;
use uuid::Uuid;

use super::{CacheKey, CacheRepository, keys::DEFAULT_TTL_SECS};
use crate::errors::AppError;

impl CacheRepository {
    pub async fn record_question_outcome(
        &self,
        quiz_id: Uuid,
        question_number: i32,
        correct: bool,
    ) -> Result<(), AppError> {
        let mut conn = self
            .redis
            .get()
            .await
            .map_err(|e| AppError::RedisPoolError(e.to_string()))?;

        let total_key = CacheKey::question_total(quiz_id, question_number);
        let _: i64 = conn
            .incr(&total_key, 1)
            .await
            .map_err(AppError::RedisCommandError)?;
        let _: () = conn
            .expire(&total_key, DEFAULT_TTL_SECS)
            .await
            .map_err(AppError::RedisCommandError)?;

        if correct {
            let passed_key = CacheKey::question_passed(quiz_id, question_number);
            let _: i64 = conn
                .incr(&passed_key, 1)
                .await
                .map_err(AppError::RedisCommandError)?;
            let _: () = conn
                .expire(&passed_key, DEFAULT_TTL_SECS)
                .await
                .map_err(AppError::RedisCommandError)?;
        }

        Ok(())
    }

    /// `(passed, total)` counts observed for a question so far.
    pub async fn question_stats(
        &self,
        quiz_id: Uuid,
        question_number: i32,
    ) -> Result<(i64, i64), AppError> {
        let mut conn = self
            .redis
            .get()
            .await
            .map_err(|e| AppError::RedisPoolError(e.to_string()))?;

        let total: Option<i64> = conn
            .get(CacheKey::question_total(quiz_id, question_number))
            .await
            .map_err(AppError::RedisCommandError)?;
        let passed: Option<i64> = conn
            .get(CacheKey::question_passed(quiz_id, question_number))
            .await
            .map_err(AppError::RedisCommandError)?;

        Ok((passed.unwrap_or(0), total.unwrap_or(0)))
    }

    /// Pass rate in `[0.0, 1.0]`; `0.0` when no answers were recorded.
    pub async fn pass_rate(&self, quiz_id: Uuid, question_number: i32) -> Result<f64, AppError> {
        let (passed, total) = self.question_stats(quiz_id, question_number).await?;
        if total == 0 {
            return Ok(0.0);
        }
        Ok(passed as f64 / total as f64)
    }
}
