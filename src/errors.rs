//! Crate-wide error type.
//!
//! `AppError` is the single error currency passed between repositories,
//! engine components, and the HTTP/WS edges. `to_response()` maps it to
//! the status code an admin HTTP caller should see; `ws_error_code()`
//! maps it to the stable string code sent in a `server:error` frame
//! (/— input validation errors surface to the caller and never
//! mutate game state).

use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("invalid start time: {0}")]
    InvalidTime(String),

    #[error("no questions available for quiz {0}")]
    NoQuestions(String),

    #[error("question pool exhausted for quiz {0}")]
    QuestionExhausted(String),

    #[error("answer submitted for a stale question")]
    StaleAnswer,

    #[error("answer already recorded for this question")]
    DuplicateAnswer,

    #[error("user already eliminated")]
    AlreadyEliminated,

    #[error("cache unavailable: {0}")]
    CacheUnavailable(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("cluster transport unavailable: {0}")]
    ClusterUnavailable(String),

    #[error("backpressure timeout delivering to client")]
    BackpressureTimeout,

    #[error("database error: {0}")]
    DatabaseError(String),

    #[error("redis error: {0}")]
    RedisError(String),

    #[error("redis command error: {0}")]
    RedisCommandError(#[from] redis::RedisError),

    #[error("redis pool error: {0}")]
    RedisPoolError(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("missing environment variable: {0}")]
    EnvError(String),
}

impl AppError {
    /// Map to an HTTP status + message for the engine's thin admin surface.
    pub fn to_response(&self) -> (StatusCode, String) {
        let status = match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AlreadyExists(_)
            | AppError::DuplicateAnswer
            | AppError::AlreadyEliminated => StatusCode::CONFLICT,
            AppError::BadRequest(_)
            | AppError::InvalidInput(_)
            | AppError::InvalidTime(_)
            | AppError::NoQuestions(_)
            | AppError::StaleAnswer => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::CacheUnavailable(_)
            | AppError::StoreUnavailable(_)
            | AppError::ClusterUnavailable(_)
            | AppError::RedisPoolError(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::BackpressureTimeout => StatusCode::REQUEST_TIMEOUT,
            AppError::QuestionExhausted(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DatabaseError(_)
            | AppError::RedisError(_)
            | AppError::RedisCommandError(_)
            | AppError::Serialization(_)
            | AppError::Deserialization(_)
            | AppError::EnvError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string())
    }

    /// Stable code sent to clients inside a `server:error` frame.
    pub fn ws_error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "not_found",
            AppError::InvalidTime(_) => "invalid_time",
            AppError::NoQuestions(_) => "no_questions",
            AppError::QuestionExhausted(_) => "question_exhausted",
            AppError::StaleAnswer => "stale_answer",
            AppError::DuplicateAnswer => "duplicate_answer",
            AppError::AlreadyEliminated => "already_eliminated",
            AppError::CacheUnavailable(_) => "cache_unavailable",
            AppError::StoreUnavailable(_) => "store_unavailable",
            AppError::ClusterUnavailable(_) => "cluster_unavailable",
            AppError::BackpressureTimeout => "backpressure_timeout",
            AppError::Unauthorized(_) => "unauthorized",
            _ => "internal_error",
        }
    }
}
