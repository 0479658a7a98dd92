use uuid::Uuid;

use crate::errors::AppError;
use crate::models::db::Quiz;

use super::QuizRepository;

impl QuizRepository {
    pub async fn find_by_id(&self, quiz_id: Uuid) -> Result<Quiz, AppError> {
        sqlx::query_as::<_, Quiz>(
            "SELECT id, title, scheduled_start_time, status, question_count, prize_fund, created_at, updated_at
            FROM quizzes WHERE id = $1",
        )
        .bind(quiz_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("failed to load quiz: {e}")))?
        .ok_or_else(|| AppError::NotFound(format!("quiz {quiz_id}")))
    }
}
