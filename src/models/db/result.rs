use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

use crate::models::enums::EliminationReason;

/// A player's final standing in a quiz.
/// Maps to the `results` table; unique on `(user_id, quiz_id)`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Result {
    pub user_id: Uuid,
    pub quiz_id: Uuid,
    pub score: i32,
    pub correct_answers: i32,
    pub total_questions: i32,
    pub is_eliminated: bool,
    pub eliminated_on_question: Option<i32>,
    pub elimination_reason: Option<EliminationReason>,
    pub rank: Option<i64>,
    pub is_winner: bool,
    pub prize_fund: i64,
    pub completed_at: NaiveDateTime,
}
