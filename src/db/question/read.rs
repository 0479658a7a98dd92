use uuid::Uuid;

use crate::errors::AppError;
use crate::models::db::Question;

use super::QuestionRepository;

impl QuestionRepository {
    pub async fn find_by_id(&self, question_id: Uuid) -> Result<Question, AppError> {
        sqlx::query_as::<_, Question>(
            "SELECT id, quiz_id, text, options, correct_option_index, time_limit_seconds,
                difficulty, is_used, point_value
            FROM questions WHERE id = $1",
        )
        .bind(question_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("failed to load question: {e}")))?
        .ok_or_else(|| AppError::NotFound(format!("question {question_id}")))
    }

    /// A quiz-owned question at `difficulty` not yet asked in this quiz
    /// (lookup step 1). `exclude` lists question ids already asked.
    pub async fn quiz_owned_at_difficulty(
        &self,
        quiz_id: Uuid,
        difficulty: i16,
        exclude: &[Uuid],
    ) -> Result<Option<Question>, AppError> {
        sqlx::query_as::<_, Question>(
            "SELECT id, quiz_id, text, options, correct_option_index, time_limit_seconds,
                difficulty, is_used, point_value
            FROM questions
            WHERE quiz_id = $1 AND difficulty = $2 AND NOT (id = ANY($3))
            ORDER BY id LIMIT 1",
        )
        .bind(quiz_id)
        .bind(difficulty)
        .bind(exclude)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("failed to query quiz-owned question: {e}")))
    }

    /// An unused pool question at `difficulty` (lookup step 2).
    pub async fn pool_at_difficulty(
        &self,
        difficulty: i16,
    ) -> Result<Option<Question>, AppError> {
        sqlx::query_as::<_, Question>(
            "SELECT id, quiz_id, text, options, correct_option_index, time_limit_seconds,
                difficulty, is_used, point_value
            FROM questions
            WHERE quiz_id IS NULL AND difficulty = $1 AND is_used = false
            ORDER BY id LIMIT 1",
        )
        .bind(difficulty)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("failed to query pool question: {e}")))
    }

    /// Whether any question (quiz-owned or pool, any difficulty) exists
    /// at all — used by `Schedule` to reject with `NoQuestions`.
    pub async fn any_available(&self, quiz_id: Uuid) -> Result<bool, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM questions
            WHERE (quiz_id = $1) OR (quiz_id IS NULL AND is_used = false)",
        )
        .bind(quiz_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("failed to count questions: {e}")))?;
        Ok(count > 0)
    }
}
