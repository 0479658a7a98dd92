use uuid::Uuid;

use crate::errors::AppError;
use crate::models::enums::QuizStatus;

use super::QuizRepository;

impl QuizRepository {
    pub async fn set_status(&self, quiz_id: Uuid, status: QuizStatus) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE quizzes SET status = $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(status)
        .bind(quiz_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("failed to update quiz status: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("quiz {quiz_id}")));
        }
        Ok(())
    }

    /// Freeze `question_count` at T0 so it no longer drifts if an admin
    /// edits the question pool mid-lifecycle - the value stored here is
    /// authoritative for the rest of this quiz's run.
    pub async fn lock_question_count(
        &self,
        quiz_id: Uuid,
        question_count: i32,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE quizzes SET question_count = $1, updated_at = NOW() WHERE id = $2")
            .bind(question_count)
            .bind(quiz_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("failed to lock question count: {e}")))?;
        Ok(())
    }
}
