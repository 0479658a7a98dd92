use uuid::Uuid;

use crate::errors::AppError;
use crate::models::db::QuizResult;

use super::ResultRepository;

impl ResultRepository {
    pub async fn for_quiz(&self, quiz_id: Uuid) -> Result<Vec<QuizResult>, AppError> {
        sqlx::query_as::<_, QuizResult>(
            "SELECT user_id, quiz_id, score, correct_answers, total_questions,
                is_eliminated, eliminated_on_question, elimination_reason,
                rank, is_winner, prize_fund, completed_at
            FROM results WHERE quiz_id = $1
            ORDER BY rank ASC NULLS LAST",
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("failed to load results: {e}")))
    }

    pub async fn for_user(&self, user_id: Uuid, quiz_id: Uuid) -> Result<Option<QuizResult>, AppError> {
        sqlx::query_as::<_, QuizResult>(
            "SELECT user_id, quiz_id, score, correct_answers, total_questions,
                is_eliminated, eliminated_on_question, elimination_reason,
                rank, is_winner, prize_fund, completed_at
            FROM results WHERE quiz_id = $1 AND user_id = $2",
        )
        .bind(quiz_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("failed to load result: {e}")))
    }
}
