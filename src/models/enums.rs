//! Closed enums shared across storage layers.
//!
//! Validators reject unknown values at the system boundary (serde's
//! default behavior already does this for JSON/SQL round-trips), per
//! the "tagged variants" design note.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::AppError;

/// Quiz lifecycle status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "quiz_status", rename_all = "lowercase")]
#[serde(rename_all = "snake_case")]
pub enum QuizStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl FromStr for QuizStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(QuizStatus::Scheduled),
            "in_progress" => Ok(QuizStatus::InProgress),
            "completed" => Ok(QuizStatus::Completed),
            "cancelled" => Ok(QuizStatus::Cancelled),
            other => Err(AppError::BadRequest(format!("unknown quiz status: {other}"))),
        }
    }
}

/// Why a `UserAnswer` carries `is_eliminated = true`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "elimination_reason", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EliminationReason {
    IncorrectAnswer,
    TimeExceeded,
    NoAnswerTimeout,
    AlreadyEliminated,
}

impl EliminationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EliminationReason::IncorrectAnswer => "incorrect_answer",
            EliminationReason::TimeExceeded => "time_exceeded",
            EliminationReason::NoAnswerTimeout => "no_answer_timeout",
            EliminationReason::AlreadyEliminated => "already_eliminated",
        }
    }
}

impl FromStr for EliminationReason {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "incorrect_answer" => Ok(EliminationReason::IncorrectAnswer),
            "time_exceeded" => Ok(EliminationReason::TimeExceeded),
            "no_answer_timeout" => Ok(EliminationReason::NoAnswerTimeout),
            "already_eliminated" => Ok(EliminationReason::AlreadyEliminated),
            other => Err(AppError::BadRequest(format!(
                "unknown elimination reason: {other}"
            ))),
        }
    }
}

/// Ad asset media kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "media_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl FromStr for MediaKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "image" => Ok(MediaKind::Image),
            "video" => Ok(MediaKind::Video),
            other => Err(AppError::BadRequest(format!("unknown media kind: {other}"))),
        }
    }
}

/// Question difficulty, clamped to `1..=5` by construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct Difficulty(i16);

impl Difficulty {
    pub const MIN: i16 = 1;
    pub const MAX: i16 = 5;

    pub fn new(value: i16) -> Result<Self, AppError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(AppError::BadRequest(format!(
                "difficulty {value} outside of [{}, {}]",
                Self::MIN,
                Self::MAX
            )))
        }
    }

    pub fn get(&self) -> i16 {
        self.0
    }

    pub fn saturating_up(&self) -> Self {
        Self(self.0.min(Self::MAX - 1) + 1)
    }

    pub fn saturating_down(&self) -> Self {
        Self((self.0 - 1).max(Self::MIN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_rejects_out_of_range() {
        assert!(Difficulty::new(0).is_err());
        assert!(Difficulty::new(6).is_err());
        assert!(Difficulty::new(3).is_ok());
    }

    #[test]
    fn difficulty_saturates_at_bounds() {
        assert_eq!(Difficulty::new(5).unwrap().saturating_up().get(), 5);
        assert_eq!(Difficulty::new(1).unwrap().saturating_down().get(), 1);
        assert_eq!(Difficulty::new(3).unwrap().saturating_up().get(), 4);
    }
}
