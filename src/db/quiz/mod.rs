//! Quiz repository: schedule/cancel/status transitions (used by both the scheduler and quiz manager).

mod create;
mod read;
mod update;

use sqlx::PgPool;

#[derive(Clone)]
pub struct QuizRepository {
    pub(crate) pool: PgPool,
}

impl QuizRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
