use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

use crate::models::enums::EliminationReason;

/// An immutable record of a player's answer to one question.
/// Maps to the `user_answers` table; unique on `(user_id, quiz_id, question_id)`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserAnswer {
    pub id: Uuid,
    pub user_id: Uuid,
    pub quiz_id: Uuid,
    pub question_id: Uuid,
    pub selected_option: i32,
    pub is_correct: bool,
    pub response_time_ms: i64,
    pub is_eliminated: bool,
    pub elimination_reason: Option<EliminationReason>,
    pub score: i32,
    pub created_at: NaiveDateTime,
}
