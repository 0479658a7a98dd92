use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::events::QuizQuestionState;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub start_time: NaiveDateTime,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateResponse {
    pub phase: String,
    pub current_question: Option<QuizQuestionState>,
    pub time_remaining: Option<i32>,
    pub is_eliminated: bool,
    pub live_player_count: usize,
}

pub async fn schedule(
    State(state): State<AppState>,
    Path(quiz_id): Path<Uuid>,
    Json(req): Json<ScheduleRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .quiz_manager
        .schedule(quiz_id, req.start_time)
        .await
        .map(|_| StatusCode::ACCEPTED)
        .map_err(|e| e.to_response())
}

pub async fn cancel(
    State(state): State<AppState>,
    Path(quiz_id): Path<Uuid>,
) -> StatusCode {
    state.quiz_manager.cancel(quiz_id).await;
    StatusCode::NO_CONTENT
}

pub async fn get_state(
    State(state): State<AppState>,
    Path((quiz_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<StateResponse>, (StatusCode, String)> {
    let current = state
        .quiz_manager
        .get_current_state(user_id, quiz_id)
        .await
        .map_err(|e| e.to_response())?;
    let live_player_count = state.quiz_manager.live_player_count(quiz_id).await;

    Ok(Json(StateResponse {
        phase: current.phase,
        current_question: current.current_question,
        time_remaining: current.time_remaining,
        is_eliminated: current.is_eliminated,
        live_player_count,
    }))
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
