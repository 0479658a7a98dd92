use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

/// A trivia question, either owned by a quiz or sitting in the shared pool
/// (`quiz_id IS NULL`).
/// Maps to the `questions` table in PostgreSQL.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: Uuid,
    pub quiz_id: Option<Uuid>,
    pub text: String,
    /// Stored as JSONB; `FromRow` decodes it via sqlx's `Json` support.
    pub options: sqlx::types::Json<Vec<String>>,
    pub correct_option_index: i32,
    pub time_limit_seconds: i32,
    pub difficulty: i16,
    pub is_used: bool,
    /// Present in the schema but unused by the answer processor, which
    /// only ever awards 1/0 (weighted scoring is a non-goal).
    pub point_value: i32,
}

/// Wire shape of one answer option sent to clients: `{id, text}`.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionOption {
    pub id: usize,
    pub text: String,
}

impl Question {
    pub fn options_for_wire(&self) -> Vec<QuestionOption> {
        self.options
            .0
            .iter()
            .enumerate()
            .map(|(id, text)| QuestionOption {
                id,
                text: text.clone(),
            })
            .collect()
    }
}
