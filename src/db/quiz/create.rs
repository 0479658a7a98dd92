use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::db::Quiz;
use crate::models::enums::QuizStatus;

use super::QuizRepository;

impl QuizRepository {
    pub async fn create(
        &self,
        title: &str,
        scheduled_start_time: NaiveDateTime,
        question_count: i32,
        prize_fund: i64,
    ) -> Result<Quiz, AppError> {
        sqlx::query_as::<_, Quiz>(
            "INSERT INTO quizzes (title, scheduled_start_time, status, question_count, prize_fund)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, scheduled_start_time, status, question_count, prize_fund, created_at, updated_at",
        )
        .bind(title)
        .bind(scheduled_start_time)
        .bind(QuizStatus::Scheduled)
        .bind(question_count)
        .bind(prize_fund)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("failed to create quiz: {e}")))
    }
}
