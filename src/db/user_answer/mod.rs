//! UserAnswer repository: the single append-only record of every
//! accepted or eliminating answer (the answer processor).

mod create;
mod read;

use sqlx::PgPool;

#[derive(Clone)]
pub struct UserAnswerRepository {
    pub(crate) pool: PgPool,
}

impl UserAnswerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
