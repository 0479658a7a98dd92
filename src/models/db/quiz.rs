use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

use crate::models::enums::QuizStatus;

/// A scheduled or running quiz.
/// Maps to the `quizzes` table in PostgreSQL.
///
/// `question_count` is fixed at T0 and is authoritative for the length
/// of the question loop even if a `MaxQuestionsPerQuiz` config value
/// later disagrees (see the open question in DESIGN.md).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: Uuid,
    pub title: String,
    pub scheduled_start_time: NaiveDateTime,
    pub status: QuizStatus,
    pub question_count: i32,
    pub prize_fund: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
