use uuid::Uuid;

use crate::errors::AppError;
use crate::models::db::User;

use super::UserRepository;

impl UserRepository {
    pub async fn find_by_id(&self, user_id: Uuid) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, total_score, highest_score, games_played, wins_count, total_prize_won
            FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("failed to load user: {e}")))?
        .ok_or_else(|| AppError::NotFound(format!("user {user_id}")))
    }
}
