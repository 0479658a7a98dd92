//! Adaptive question selector.
//!
//! Slot configuration (`base_difficulty`/`target_pass_rate` per
//! question index) is not part of the persisted schema, so this
//! selector generates a default plan at `Schedule` time (see the
//! design ledger for the reasoning): difficulty cycles `1..=5` across
//! slots, every slot targets a 0.6 pass rate, with ±0.15 adjustment
//! bands.

use uuid::Uuid;

use crate::cache::CacheRepository;
use crate::db::question::QuestionRepository;
use crate::errors::AppError;
use crate::models::db::Question;
use crate::models::enums::Difficulty;

const DELTA_UP: f64 = 0.15;
const DELTA_DOWN: f64 = 0.15;

#[derive(Debug, Clone, Copy)]
pub struct SlotConfig {
    pub base_difficulty: i16,
    pub target_pass_rate: f64,
}

/// Default per-slot plan for a quiz with `question_count` questions.
pub fn default_plan(question_count: i32) -> Vec<SlotConfig> {
    (0..question_count)
        .map(|i| SlotConfig {
            base_difficulty: ((i % 5) + 1) as i16,
            target_pass_rate: 0.6,
        })
        .collect()
}

pub struct AdaptiveSelector {
    questions: QuestionRepository,
    cache: CacheRepository,
}

impl AdaptiveSelector {
    pub fn new(questions: QuestionRepository, cache: CacheRepository) -> Self {
        Self { questions, cache }
    }

    /// Picks question `slot` (1-based) for `quiz_id`, given the slots
    /// already asked (`asked`) and the configured plan.
    pub async fn next_question(
        &self,
        quiz_id: Uuid,
        slot: i32,
        plan: &[SlotConfig],
        asked: &[Uuid],
    ) -> Result<Question, AppError> {
        let config = plan
            .get((slot - 1) as usize)
            .copied()
            .ok_or_else(|| AppError::QuestionExhausted(quiz_id.to_string()))?;

        let base = Difficulty::new(config.base_difficulty)?;
        let difficulty = if slot == 1 {
            base
        } else {
            let (passed, total) = self.cache.question_stats(quiz_id, slot - 1).await?;
            let observed = passed as f64 / (total.max(1)) as f64;
            if observed > config.target_pass_rate + DELTA_UP {
                base.saturating_up()
            } else if observed < config.target_pass_rate - DELTA_DOWN {
                base.saturating_down()
            } else {
                base
            }
        };

        self.lookup(quiz_id, difficulty.get(), asked).await
    }

    /// Hybrid lookup order: quiz-owned at `d`, then pool at `d`,
    /// then fan out `d+1..5` then `d-1..1` through the same two sources.
    async fn lookup(&self, quiz_id: Uuid, difficulty: i16, asked: &[Uuid]) -> Result<Question, AppError> {
        if let Some(q) = self.try_difficulty(quiz_id, difficulty, asked).await? {
            return Ok(q);
        }

        let ascending = (difficulty + 1)..=Difficulty::MAX;
        let descending = (Difficulty::MIN..difficulty).rev();

        for d in ascending {
            if let Some(q) = self.try_difficulty(quiz_id, d, asked).await? {
                return Ok(q);
            }
        }
        for d in descending {
            if let Some(q) = self.try_difficulty(quiz_id, d, asked).await? {
                return Ok(q);
            }
        }

        Err(AppError::QuestionExhausted(quiz_id.to_string()))
    }

    async fn try_difficulty(
        &self,
        quiz_id: Uuid,
        difficulty: i16,
        asked: &[Uuid],
    ) -> Result<Option<Question>, AppError> {
        if let Some(q) = self
            .questions
            .quiz_owned_at_difficulty(quiz_id, difficulty, asked)
            .await?
        {
            return Ok(Some(q));
        }
        if let Some(q) = self.questions.pool_at_difficulty(difficulty).await? {
            self.questions.mark_used(q.id).await?;
            return Ok(Some(q));
        }
        Ok(None)
    }
}
