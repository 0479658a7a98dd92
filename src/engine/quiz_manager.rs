//! Quiz Manager: owns the single `ActiveQuizState`, wires the
//! scheduler, question runner, answer processor and result finalizer
//! together, and is the only component external HTTP/WS handlers call
//! into directly.
//!
//! The start/finish handoff could be modeled as two channels
//! (`quizStart`, `questionsDone`) feeding a manager event loop, but
//! this collapses that into a single spawned task per quiz that awaits
//! the runner directly and then calls `finish` itself - behaviorally
//! identical (one task owns the whole lifecycle from T0 to finish)
//! without round-tripping through a channel only one task ever reads.

use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::cache::CacheRepository;
use crate::config::Config;
use crate::db::Repositories;
use crate::engine::active_state::ActiveQuizState;
use crate::engine::adaptive_selector::{default_plan, AdaptiveSelector, SlotConfig};
use crate::engine::answer_processor::AnswerProcessor;
use crate::engine::cancel::{pair, CancelHandle};
use crate::engine::events::{QuizQuestionState, ServerMessage};
use crate::engine::result_finalizer::ResultFinalizer;
use crate::engine::scheduler::Scheduler;
use crate::errors::AppError;
use crate::models::enums::QuizStatus;
use crate::realtime::hub::Hub;

pub struct GetCurrentState {
    pub phase: String,
    pub current_question: Option<QuizQuestionState>,
    pub time_remaining: Option<i32>,
    pub is_eliminated: bool,
}

pub struct QuizManager {
    config: Arc<Config>,
    db: Repositories,
    cache: CacheRepository,
    hub: Arc<Hub>,
    scheduler: Scheduler,
    answers: Arc<AnswerProcessor>,
    finalizer: ResultFinalizer,
    active: RwLock<Option<Arc<ActiveQuizState>>>,
    active_handle: Mutex<Option<CancelHandle>>,
}

impl QuizManager {
    /// Builds the manager and wires the scheduler's `quizStart` channel
    /// to a dispatch loop that owns each quiz's lifecycle task. Returns
    /// an `Arc` since the dispatch loop needs to hold its own handle.
    pub fn new(config: Arc<Config>, db: Repositories, cache: CacheRepository, hub: Arc<Hub>) -> Arc<Self> {
        let (scheduler, mut quiz_start_rx) = Scheduler::new(config.clone(), db.quiz.clone(), hub.clone());
        let answers = Arc::new(AnswerProcessor::new(db.user_answer.clone(), cache.clone()));
        let finalizer = ResultFinalizer::new(db.user_answer.clone(), db.result.clone(), cache.clone());

        let manager = Arc::new(Self {
            config,
            db,
            cache,
            hub,
            scheduler,
            answers,
            finalizer,
            active: RwLock::new(None),
            active_handle: Mutex::new(None),
        });

        let dispatch_manager = manager.clone();
        tokio::spawn(async move {
            while let Some(quiz_id) = quiz_start_rx.recv().await {
                let manager = dispatch_manager.clone();
                tokio::spawn(async move {
                    manager.run_quiz(quiz_id).await;
                });
            }
        });

        manager
    }

    /// `Schedule`.
    pub async fn schedule(&self, quiz_id: Uuid, start_time: chrono::NaiveDateTime) -> Result<(), AppError> {
        let quiz = self.db.quiz.find_by_id(quiz_id).await?;
        if !self.db.question.any_available(quiz_id).await? {
            return Err(AppError::NoQuestions(quiz_id.to_string()));
        }
        self.scheduler.schedule(quiz_id, quiz.title, start_time).await
    }

    /// `Cancel`.
    pub async fn cancel(&self, quiz_id: Uuid) {
        self.scheduler.cancel(quiz_id).await;
    }

    /// `HandleReady` (delegates to the answer processor).
    pub async fn handle_ready(&self, user_id: Uuid, quiz_id: Uuid) -> Result<(), AppError> {
        let became_ready = self.answers.handle_ready(quiz_id, user_id).await?;
        self.hub.subscribe(user_id, quiz_id).await;
        if became_ready {
            let _ = self
                .hub
                .broadcast_to_quiz(quiz_id, &ServerMessage::QuizUserReady { user_id })
                .await;
        }
        Ok(())
    }

    /// `ProcessAnswer`: rejects stale answers before delegating
    /// to the answer processor.
    pub async fn process_answer(
        &self,
        user_id: Uuid,
        question_id: Uuid,
        selected_option: i32,
    ) -> Result<ServerMessage, AppError> {
        let guard = self.active.read().await;
        let state = guard.as_ref().ok_or_else(|| AppError::StaleAnswer)?;
        let current = state.current_question().await.ok_or(AppError::StaleAnswer)?;
        if current.question.id != question_id {
            return Err(AppError::StaleAnswer);
        }
        let quiz_id = state.quiz.id;
        let number = current.number;
        let start_time_ms = current.start_time_ms;
        drop(guard);

        let outcome = self
            .answers
            .process_answer(
                user_id,
                quiz_id,
                &current.question,
                number,
                selected_option,
                start_time_ms,
            )
            .await?;

        if outcome.newly_eliminated {
            if let Some(reason) = outcome.record.elimination_reason {
                let _ = self
                    .hub
                    .send_to_user(user_id, &ServerMessage::QuizElimination { reason })
                    .await;
            }
        }

        Ok(ServerMessage::QuizAnswerResult {
            is_correct: outcome.record.is_correct,
            score: outcome.record.score,
            response_time_ms: outcome.record.response_time_ms,
        })
    }

    /// `GetCurrentState`: read-side for `user:resync`.
    pub async fn get_current_state(&self, user_id: Uuid, quiz_id: Uuid) -> Result<GetCurrentState, AppError> {
        let is_eliminated = self.cache.is_eliminated(quiz_id, user_id).await.unwrap_or(false);
        let guard = self.active.read().await;

        let Some(state) = guard.as_ref().filter(|s| s.quiz.id == quiz_id) else {
            let quiz = self.db.quiz.find_by_id(quiz_id).await?;
            let phase = match quiz.status {
                QuizStatus::Scheduled => "scheduled",
                QuizStatus::InProgress => "in_progress",
                QuizStatus::Completed => "completed",
                QuizStatus::Cancelled => "cancelled",
            };
            return Ok(GetCurrentState {
                phase: phase.to_string(),
                current_question: None,
                time_remaining: None,
                is_eliminated,
            });
        };

        let current = state.current_question().await;
        let (question_state, time_remaining) = match current {
            Some(c) => {
                let elapsed_ms = crate::engine::active_state::now_ms() - c.start_time_ms;
                let remaining = c.question.time_limit_seconds - (elapsed_ms / 1000) as i32;
                (
                    Some(QuizQuestionState {
                        number: c.number,
                        total: state.quiz.question_count,
                        text: c.question.text.clone(),
                        options: c.question.options_for_wire(),
                        time_limit: c.question.time_limit_seconds,
                    }),
                    Some(remaining.max(0)),
                )
            }
            None => (None, None),
        };

        Ok(GetCurrentState {
            phase: "in_progress".to_string(),
            current_question: question_state,
            time_remaining,
            is_eliminated,
        })
    }

    pub async fn live_player_count(&self, quiz_id: Uuid) -> usize {
        self.hub.quiz_subscriber_count(quiz_id).await
    }

    /// `Shutdown`: cancels internal context, interrupting the
    /// active game's in-flight sleeps so its task can unwind.
    pub async fn shutdown(&self) {
        if let Some(handle) = self.active_handle.lock().await.take() {
            handle.cancel();
        }
    }

    async fn run_quiz(self: Arc<Self>, quiz_id: Uuid) {
        let quiz = match self.db.quiz.find_by_id(quiz_id).await {
            Ok(q) => q,
            Err(_) => return,
        };

        let question_count = quiz.question_count;
        if self
            .db
            .quiz
            .lock_question_count(quiz_id, question_count)
            .await
            .is_err()
        {
            return;
        }

        let state = Arc::new(ActiveQuizState::new(quiz));
        *self.active.write().await = Some(state.clone());

        let (handle, token) = pair();
        *self.active_handle.lock().await = Some(handle);

        let _ = self
            .hub
            .broadcast_to_quiz(quiz_id, &ServerMessage::QuizStart { quiz_id, question_count })
            .await;

        let plan: Vec<SlotConfig> = default_plan(question_count);
        let selector = AdaptiveSelector::new(self.db.question.clone(), self.cache.clone());
        let runner = crate::engine::question_runner::QuestionRunner::new(
            state.clone(),
            self.hub.clone(),
            self.cache.clone(),
            self.db.ad.clone(),
            selector,
            self.answers.clone(),
            token,
        );

        let result = runner.run(&plan).await;
        self.active_handle.lock().await.take();

        *self.active.write().await = None;
        self.finish(quiz_id, question_count, result.is_err()).await;
    }

    /// `finish`: persists completion, broadcasts, and hands off
    /// to the result finalizer.
    async fn finish(&self, quiz_id: Uuid, question_count: i32, partial: bool) {
        let _ = self.db.quiz.set_status(quiz_id, QuizStatus::Completed).await;
        let _ = self
            .hub
            .broadcast_to_quiz(quiz_id, &ServerMessage::QuizFinish { partial })
            .await;

        let participants = self.cache.participants(quiz_id).await.unwrap_or_default();
        for user_id in participants {
            let _ = self
                .finalizer
                .compute_per_player(user_id, quiz_id, question_count)
                .await;
        }

        if !partial {
            let quiz = match self.db.quiz.find_by_id(quiz_id).await {
                Ok(q) => q,
                Err(_) => return,
            };
            if self
                .finalizer
                .finalize_winners(quiz_id, question_count, quiz.prize_fund)
                .await
                .is_ok()
            {
                let _ = self
                    .hub
                    .broadcast_to_quiz(quiz_id, &ServerMessage::QuizResultsAvailable { quiz_id })
                    .await;
            }
        }
    }
}
