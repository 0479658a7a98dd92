use uuid::Uuid;

use crate::errors::AppError;
use crate::models::db::UserAnswer;

use super::UserAnswerRepository;

impl UserAnswerRepository {
    /// All answers a user submitted in a quiz, in question order —
    /// the input `ComputePerPlayer` folds into a `Result` row.
    pub async fn for_user(&self, user_id: Uuid, quiz_id: Uuid) -> Result<Vec<UserAnswer>, AppError> {
        sqlx::query_as::<_, UserAnswer>(
            "SELECT id, user_id, quiz_id, question_id, selected_option, is_correct,
                response_time_ms, is_eliminated, elimination_reason, score, created_at
            FROM user_answers
            WHERE user_id = $1 AND quiz_id = $2
            ORDER BY created_at ASC",
        )
        .bind(user_id)
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("failed to load user answers: {e}")))
    }

    pub async fn exists(
        &self,
        user_id: Uuid,
        quiz_id: Uuid,
        question_id: Uuid,
    ) -> Result<bool, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM user_answers
            WHERE user_id = $1 AND quiz_id = $2 AND question_id = $3",
        )
        .bind(user_id)
        .bind(quiz_id)
        .bind(question_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("failed to check user answer: {e}")))?;
        Ok(count > 0)
    }
}
