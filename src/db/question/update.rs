use uuid::Uuid;

use crate::errors::AppError;

use super::QuestionRepository;

impl QuestionRepository {
    /// Marks a pool question used so it is never selected again.
    /// No-op for quiz-owned questions, which are scoped to one game by
    /// `quiz_id` alone.
    pub async fn mark_used(&self, question_id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE questions SET is_used = true WHERE id = $1 AND quiz_id IS NULL")
            .bind(question_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("failed to mark question used: {e}")))?;
        Ok(())
    }
}
