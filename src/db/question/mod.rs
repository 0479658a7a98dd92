//! Question repository: quiz-owned + shared pool questions to the adaptive selector.

mod read;
mod update;

use sqlx::PgPool;

#[derive(Clone)]
pub struct QuestionRepository {
    pub(crate) pool: PgPool,
}

impl QuestionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
