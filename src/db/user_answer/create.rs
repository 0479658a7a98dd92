use uuid::Uuid;

use crate::errors::AppError;
use crate::models::db::UserAnswer;
use crate::models::enums::EliminationReason;

use super::UserAnswerRepository;

impl UserAnswerRepository {
    /// Inserts one answer row. The `(user_id, quiz_id, question_id)`
    /// unique constraint enforces at most one answer per question; a
    /// conflict surfaces as `DuplicateAnswer` without mutating anything
    /// else.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        &self,
        user_id: Uuid,
        quiz_id: Uuid,
        question_id: Uuid,
        selected_option: i32,
        is_correct: bool,
        response_time_ms: i64,
        is_eliminated: bool,
        elimination_reason: Option<EliminationReason>,
        score: i32,
    ) -> Result<UserAnswer, AppError> {
        sqlx::query_as::<_, UserAnswer>(
            "INSERT INTO user_answers
                (user_id, quiz_id, question_id, selected_option, is_correct,
                 response_time_ms, is_eliminated, elimination_reason, score)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, user_id, quiz_id, question_id, selected_option, is_correct,
                response_time_ms, is_eliminated, elimination_reason, score, created_at",
        )
        .bind(user_id)
        .bind(quiz_id)
        .bind(question_id)
        .bind(selected_option)
        .bind(is_correct)
        .bind(response_time_ms)
        .bind(is_eliminated)
        .bind(elimination_reason)
        .bind(score)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::DuplicateAnswer;
                }
            }
            AppError::DatabaseError(format!("failed to insert user answer: {e}"))
        })
    }
}
