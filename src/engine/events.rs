//! Wire vocabulary for the WebSocket channel. Tagged the same way as
//! every other message pair in this codebase: `{"type": "...", "data": {...}}`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::db::question::QuestionOption;
use crate::models::enums::EliminationReason;

/// Inbound messages from a connected client (inbound table).
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ClientMessage {
    #[serde(rename = "user:ready")]
    UserReady { quiz_id: Uuid },
    #[serde(rename = "user:answer")]
    UserAnswer {
        question_id: Uuid,
        selected_option: i32,
        timestamp_ms: i64,
    },
    #[serde(rename = "user:resync")]
    UserResync { quiz_id: Uuid },
    #[serde(rename = "user:heartbeat")]
    UserHeartbeat {},
}

/// Outbound messages the engine sends to one or many clients (
/// outbound table). `data` carries the payload; a handful of variants
/// (`quiz:announcement` etc.) have no payload of their own.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    #[serde(rename = "quiz:announcement")]
    QuizAnnouncement {
        quiz_id: Uuid,
        title: String,
        start_time: chrono::NaiveDateTime,
    },
    #[serde(rename = "quiz:waiting_room")]
    QuizWaitingRoom { seconds_until_start: i64 },
    #[serde(rename = "quiz:countdown")]
    QuizCountdown { seconds_remaining: i64 },
    #[serde(rename = "quiz:start")]
    QuizStart { quiz_id: Uuid, question_count: i32 },
    #[serde(rename = "quiz:finish")]
    QuizFinish { partial: bool },
    #[serde(rename = "quiz:cancelled")]
    QuizCancelled { quiz_id: Uuid },
    #[serde(rename = "quiz:question")]
    QuizQuestion {
        number: i32,
        total: i32,
        text: String,
        options: Vec<QuestionOption>,
        time_limit: i32,
    },
    #[serde(rename = "quiz:timer")]
    QuizTimer { seconds_left: i32 },
    #[serde(rename = "quiz:answer_reveal")]
    QuizAnswerReveal { correct_option: i32 },
    #[serde(rename = "quiz:answer_result")]
    QuizAnswerResult {
        is_correct: bool,
        score: i32,
        response_time_ms: i64,
    },
    #[serde(rename = "quiz:elimination")]
    QuizElimination { reason: EliminationReason },
    #[serde(rename = "quiz:user_ready")]
    QuizUserReady { user_id: Uuid },
    #[serde(rename = "adaptive:question_stats")]
    AdaptiveQuestionStats {
        question_number: i32,
        pass_rate: f64,
    },
    #[serde(rename = "quiz:ad_break")]
    QuizAdBreak { url: String, duration_seconds: i32 },
    #[serde(rename = "quiz:ad_break_end")]
    QuizAdBreakEnd {},
    #[serde(rename = "quiz:results_available")]
    QuizResultsAvailable { quiz_id: Uuid },
    #[serde(rename = "quiz:state")]
    QuizState {
        phase: String,
        current_question: Option<QuizQuestionState>,
        time_remaining: Option<i32>,
        is_eliminated: bool,
    },
    #[serde(rename = "server:buffer_warning")]
    ServerBufferWarning {},
    #[serde(rename = "server:heartbeat")]
    ServerHeartbeat {},
    #[serde(rename = "server:error")]
    ServerError { code: String, message: String },
}

/// The `current_question` field of a `quiz:state` resync payload.
#[derive(Debug, Clone, Serialize)]
pub struct QuizQuestionState {
    pub number: i32,
    pub total: i32,
    pub text: String,
    pub options: Vec<QuestionOption>,
    pub time_limit: i32,
}

impl ServerMessage {
    pub fn error(err: &crate::errors::AppError) -> Self {
        ServerMessage::ServerError {
            code: err.ws_error_code().to_string(),
            message: err.to_string(),
        }
    }

    pub fn unknown_message_type() -> Self {
        ServerMessage::ServerError {
            code: "unknown_message_type".to_string(),
            message: "unrecognized message type".to_string(),
        }
    }
}
