//! Answer processor: the single-writer validator for every
//! submitted answer. Ordering is enforced by the database's unique
//! constraint on `(user_id, quiz_id, question_id)`, not by an in-process
//! lock — concurrent answers from different users never block each other.

use uuid::Uuid;

use crate::cache::CacheRepository;
use crate::db::user_answer::UserAnswerRepository;
use crate::engine::active_state::now_ms;
use crate::errors::AppError;
use crate::models::db::{Question, UserAnswer};
use crate::models::enums::EliminationReason;

pub struct AnswerOutcome {
    pub record: UserAnswer,
    pub newly_eliminated: bool,
}

pub struct AnswerProcessor {
    user_answers: UserAnswerRepository,
    cache: CacheRepository,
}

impl AnswerProcessor {
    pub fn new(user_answers: UserAnswerRepository, cache: CacheRepository) -> Self {
        Self {
            user_answers,
            cache,
        }
    }

    /// `HandleReady`: idempotently marks the user a participant.
    /// Returns `true` the first time this user becomes ready.
    pub async fn handle_ready(&self, quiz_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        self.cache.mark_ready(quiz_id, user_id).await
    }

    /// `ProcessAnswer` (steps 1-7).
    pub async fn process_answer(
        &self,
        user_id: Uuid,
        quiz_id: Uuid,
        question: &Question,
        question_number: i32,
        selected_option: i32,
        question_start_time_ms: i64,
    ) -> Result<AnswerOutcome, AppError> {
        if self.cache.is_eliminated(quiz_id, user_id).await? {
            return Err(AppError::AlreadyEliminated);
        }

        let response_time_ms = now_ms() - question_start_time_ms;
        let time_limit_ms = question.time_limit_seconds as i64 * 1000;

        let option_in_range = (0..question.options.0.len() as i32).contains(&selected_option);
        let answered_correct_option =
            option_in_range && selected_option == question.correct_option_index;
        let late = response_time_ms > time_limit_ms;

        let (is_correct, score, elimination_reason) = if late {
            (false, 0, Some(EliminationReason::TimeExceeded))
        } else if answered_correct_option {
            (true, 1, None)
        } else {
            (false, 0, Some(EliminationReason::IncorrectAnswer))
        };

        let is_eliminated = elimination_reason.is_some();

        let record = self
            .user_answers
            .insert(
                user_id,
                quiz_id,
                question.id,
                selected_option,
                is_correct,
                response_time_ms.max(0),
                is_eliminated,
                elimination_reason,
                score,
            )
            .await?;

        self.cache
            .mark_answered(quiz_id, question_number, user_id)
            .await?;

        let newly_eliminated = if is_eliminated {
            self.cache.mark_eliminated(quiz_id, user_id).await?
        } else {
            false
        };

        self.cache
            .record_question_outcome(quiz_id, question_number, is_correct)
            .await?;

        Ok(AnswerOutcome {
            record,
            newly_eliminated,
        })
    }

    /// Timeout elimination: inserts the synthetic
    /// no-answer record for a participant who never submitted.
    pub async fn eliminate_for_timeout(
        &self,
        user_id: Uuid,
        quiz_id: Uuid,
        question: &Question,
        question_number: i32,
    ) -> Result<(), AppError> {
        let inserted = self
            .user_answers
            .insert(
                user_id,
                quiz_id,
                question.id,
                -1,
                false,
                question.time_limit_seconds as i64 * 1000,
                true,
                Some(EliminationReason::NoAnswerTimeout),
                0,
            )
            .await;

        match inserted {
            Ok(_) => {}
            Err(AppError::DuplicateAnswer) => return Ok(()),
            Err(e) => return Err(e),
        }

        self.cache
            .mark_answered(quiz_id, question_number, user_id)
            .await?;
        self.cache.mark_eliminated(quiz_id, user_id).await?;
        self.cache
            .record_question_outcome(quiz_id, question_number, false)
            .await?;
        Ok(())
    }
}
