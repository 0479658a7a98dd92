use uuid::Uuid;

use crate::errors::AppError;
use crate::models::enums::EliminationReason;

use super::ResultRepository;

impl ResultRepository {
    /// `ComputePerPlayer`: inserts the player's `Result` row and
    /// folds their score into the running `users` counters, in one
    /// transaction so a crash never leaves one write without the other.
    #[allow(clippy::too_many_arguments)]
    pub async fn compute_per_player(
        &self,
        user_id: Uuid,
        quiz_id: Uuid,
        score: i32,
        correct_answers: i32,
        total_questions: i32,
        is_eliminated: bool,
        eliminated_on_question: Option<i32>,
        elimination_reason: Option<EliminationReason>,
    ) -> Result<(), AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::DatabaseError(format!("failed to start transaction: {e}")))?;

        sqlx::query(
            "INSERT INTO results
                (user_id, quiz_id, score, correct_answers, total_questions,
                 is_eliminated, eliminated_on_question, elimination_reason,
                 is_winner, prize_fund, completed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, false, 0, NOW())
            ON CONFLICT (user_id, quiz_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(quiz_id)
        .bind(score)
        .bind(correct_answers)
        .bind(total_questions)
        .bind(is_eliminated)
        .bind(eliminated_on_question)
        .bind(elimination_reason)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("failed to insert result: {e}")))?;

        sqlx::query(
            "UPDATE users
            SET total_score = total_score + $1,
                highest_score = GREATEST(highest_score, $1),
                games_played = games_played + 1
            WHERE id = $2",
        )
        .bind(score)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("failed to update user totals: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(format!("failed to commit transaction: {e}")))?;

        Ok(())
    }

    /// `FinalizeWinners`: dense-ranks every result, selects the
    /// winner set, splits the prize pool by integer division, and
    /// writes both `results` and `users` in one transaction. Returns
    /// the winning user ids (for the `results_available` broadcast).
    pub async fn finalize_winners(
        &self,
        quiz_id: Uuid,
        question_count: i32,
        prize_fund: i64,
    ) -> Result<Vec<Uuid>, AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::DatabaseError(format!("failed to start transaction: {e}")))?;

        sqlx::query(
            "UPDATE results r
            SET rank = ranked.rank
            FROM (
                SELECT user_id,
                    RANK() OVER (ORDER BY score DESC, correct_answers DESC) AS rank
                FROM results WHERE quiz_id = $1
            ) ranked
            WHERE r.quiz_id = $1 AND r.user_id = ranked.user_id",
        )
        .bind(quiz_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("failed to rank results: {e}")))?;

        let winners: Vec<Uuid> = sqlx::query_scalar(
            "SELECT user_id FROM results
            WHERE quiz_id = $1 AND correct_answers = $2 AND is_eliminated = false",
        )
        .bind(quiz_id)
        .bind(question_count)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("failed to select winners: {e}")))?;

        let prize_per_winner = if winners.is_empty() {
            0
        } else {
            prize_fund / winners.len() as i64
        };

        if !winners.is_empty() {
            sqlx::query(
                "UPDATE results SET is_winner = true, prize_fund = $1
                WHERE quiz_id = $2 AND user_id = ANY($3)",
            )
            .bind(prize_per_winner)
            .bind(quiz_id)
            .bind(&winners)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(format!("failed to mark winners: {e}")))?;

            sqlx::query(
                "UPDATE users SET wins_count = wins_count + 1,
                    total_prize_won = total_prize_won + $1
                WHERE id = ANY($2)",
            )
            .bind(prize_per_winner)
            .bind(&winners)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(format!("failed to update winner totals: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(format!("failed to commit transaction: {e}")))?;

        Ok(winners)
    }
}
