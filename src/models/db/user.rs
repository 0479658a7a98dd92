use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

/// Running per-user counters updated by the Result Finalizer.
/// Maps to the `users` table (a thin slice of it — profile/auth fields
/// live in the external user-profile service this engine doesn't own).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub total_score: i64,
    pub highest_score: i32,
    pub games_played: i32,
    pub wins_count: i32,
    pub total_prize_won: i64,
}
