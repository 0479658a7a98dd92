use axum::middleware as axum_middleware;
use axum::routing::{delete, get, post};
use axum::Router;

use crate::middleware::rate_limit_middleware;
use crate::state::AppState;

use super::handlers;

pub fn http_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/quizzes/{quiz_id}/schedule", post(handlers::schedule))
        .route("/quizzes/{quiz_id}/cancel", delete(handlers::cancel))
        .route("/quizzes/{quiz_id}/state/{user_id}", get(handlers::get_state))
        .layer(axum_middleware::from_fn(rate_limit_middleware))
}
