//! Question runner: the per-question state machine. Runs to
//! completion in a dedicated task per active quiz; every blocking point
//! honors the shared cancellation token.

use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::cache::CacheRepository;
use crate::db::ad::AdRepository;
use crate::engine::active_state::ActiveQuizState;
use crate::engine::adaptive_selector::{AdaptiveSelector, SlotConfig};
use crate::engine::answer_processor::AnswerProcessor;
use crate::engine::cancel::CancelToken;
use crate::engine::events::ServerMessage;
use crate::errors::AppError;
use crate::realtime::hub::Hub;

pub struct QuestionRunner {
    state: Arc<ActiveQuizState>,
    hub: Arc<Hub>,
    cache: CacheRepository,
    ads: AdRepository,
    selector: AdaptiveSelector,
    answers: Arc<AnswerProcessor>,
    token: CancelToken,
}

impl QuestionRunner {
    pub fn new(
        state: Arc<ActiveQuizState>,
        hub: Arc<Hub>,
        cache: CacheRepository,
        ads: AdRepository,
        selector: AdaptiveSelector,
        answers: Arc<AnswerProcessor>,
        token: CancelToken,
    ) -> Self {
        Self {
            state,
            hub,
            cache,
            ads,
            selector,
            answers,
            token,
        }
    }

    /// Runs the full question loop. Returns `Ok(())` when every
    /// question has been asked and revealed, or the plan is exhausted
    /// and the game must be aborted (`QuestionExhausted`).
    pub async fn run(&self, plan: &[SlotConfig]) -> Result<(), AppError> {
        let quiz_id = self.state.quiz.id;
        let question_count = self.state.quiz.question_count;
        let mut asked = Vec::with_capacity(question_count as usize);

        for number in 1..=question_count {
            if self.token.is_cancelled() {
                break;
            }

            let question = self
                .selector
                .next_question(quiz_id, number, plan, &asked)
                .await?;
            asked.push(question.id);

            self.state
                .set_current_question(question.clone(), number)
                .await;
            let _ = self
                .hub
                .broadcast_to_quiz(
                    quiz_id,
                    &ServerMessage::QuizQuestion {
                        number,
                        total: question_count,
                        text: question.text.clone(),
                        options: question.options_for_wire(),
                        time_limit: question.time_limit_seconds,
                    },
                )
                .await;

            self.run_timer(quiz_id, question.time_limit_seconds).await;

            self.eliminate_timeouts(quiz_id, &question, number).await;

            let pass_rate = self.cache.pass_rate(quiz_id, number).await.unwrap_or(0.0);
            let _ = self
                .hub
                .broadcast_to_quiz(
                    quiz_id,
                    &ServerMessage::AdaptiveQuestionStats {
                        question_number: number,
                        pass_rate,
                    },
                )
                .await;

            let _ = self
                .hub
                .broadcast_to_quiz(
                    quiz_id,
                    &ServerMessage::QuizAnswerReveal {
                        correct_option: question.correct_option_index,
                    },
                )
                .await;

            self.run_ad_break(quiz_id, number).await;

            self.state.clear_current_question().await;
        }

        Ok(())
    }

    async fn run_timer(&self, quiz_id: Uuid, time_limit_seconds: i32) {
        for remaining in (0..=time_limit_seconds).rev() {
            let _ = self
                .hub
                .broadcast_to_quiz(quiz_id, &ServerMessage::QuizTimer { seconds_left: remaining })
                .await;
            if remaining == 0 {
                break;
            }
            if !self.token.sleep(Duration::from_secs(1)).await {
                break;
            }
        }
    }

    async fn eliminate_timeouts(
        &self,
        quiz_id: Uuid,
        question: &crate::models::db::Question,
        number: i32,
    ) {
        let participants = self.cache.participants(quiz_id).await.unwrap_or_default();
        for user_id in participants {
            let already_answered = self
                .cache
                .has_answered(quiz_id, number, user_id)
                .await
                .unwrap_or(false);
            if already_answered {
                continue;
            }

            if self
                .answers
                .eliminate_for_timeout(user_id, quiz_id, question, number)
                .await
                .is_ok()
            {
                let _ = self
                    .hub
                    .send_to_user(
                        user_id,
                        &ServerMessage::QuizElimination {
                            reason: crate::models::enums::EliminationReason::NoAnswerTimeout,
                        },
                    )
                    .await;
            }
        }
    }

    async fn run_ad_break(&self, quiz_id: Uuid, question_number: i32) {
        let Ok(Some((slot, asset))) = self.ads.active_slot_after(quiz_id, question_number).await else {
            return;
        };
        if !slot.is_active {
            return;
        }

        let _ = self
            .hub
            .broadcast_to_quiz(
                quiz_id,
                &ServerMessage::QuizAdBreak {
                    url: asset.url.clone(),
                    duration_seconds: asset.duration_seconds,
                },
            )
            .await;

        self.token
            .sleep(Duration::from_secs(asset.duration_seconds as u64))
            .await;

        let _ = self
            .hub
            .broadcast_to_quiz(quiz_id, &ServerMessage::QuizAdBreakEnd {})
            .await;
    }
}
