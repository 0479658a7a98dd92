//! Result finalizer: derives each player's final tally from
//! their `UserAnswer` rows, then ranks and splits the prize pool.

use uuid::Uuid;

use crate::cache::CacheRepository;
use crate::db::result::ResultRepository;
use crate::db::user_answer::UserAnswerRepository;
use crate::errors::AppError;

pub struct ResultFinalizer {
    user_answers: UserAnswerRepository,
    results: ResultRepository,
    cache: CacheRepository,
}

impl ResultFinalizer {
    pub fn new(
        user_answers: UserAnswerRepository,
        results: ResultRepository,
        cache: CacheRepository,
    ) -> Self {
        Self {
            user_answers,
            results,
            cache,
        }
    }

    /// `ComputePerPlayer`: folds one player's answers into a
    /// `Result` row and the running `users` counters.
    pub async fn compute_per_player(
        &self,
        user_id: Uuid,
        quiz_id: Uuid,
        total_questions: i32,
    ) -> Result<(), AppError> {
        let answers = self.user_answers.for_user(user_id, quiz_id).await?;

        let score: i32 = answers.iter().map(|a| a.score).sum();
        let correct_answers = answers.iter().filter(|a| a.is_correct).count() as i32;

        let first_elimination = answers.iter().find(|a| a.is_eliminated);
        let eliminated_on_question = if first_elimination.is_some() {
            self.question_number_for(&answers, first_elimination.unwrap().question_id)
        } else {
            None
        };
        let elimination_reason = first_elimination.and_then(|a| a.elimination_reason);

        let is_eliminated = self.cache.is_eliminated(quiz_id, user_id).await?;

        self.results
            .compute_per_player(
                user_id,
                quiz_id,
                score,
                correct_answers,
                total_questions,
                is_eliminated,
                eliminated_on_question,
                elimination_reason,
            )
            .await
    }

    /// Answers are recorded in submission order, not indexed by question
    /// number directly; this resolves the 1-based slot of the answer
    /// that first triggered elimination, for the `eliminated_on_question`
    /// column.
    fn question_number_for(
        &self,
        answers: &[crate::models::db::UserAnswer],
        question_id: Uuid,
    ) -> Option<i32> {
        answers
            .iter()
            .position(|a| a.question_id == question_id)
            .map(|idx| (idx + 1) as i32)
    }

    /// `FinalizeWinners`: ranks, selects winners, splits the
    /// prize pool, and returns the winning user ids.
    pub async fn finalize_winners(
        &self,
        quiz_id: Uuid,
        question_count: i32,
        prize_fund: i64,
    ) -> Result<Vec<Uuid>, AppError> {
        self.results
            .finalize_winners(quiz_id, question_count, prize_fund)
            .await
    }
}
