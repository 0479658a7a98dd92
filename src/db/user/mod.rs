//! User repository: the running per-user counters result finalization
//! folds into.

mod read;

use sqlx::PgPool;

#[derive(Clone)]
pub struct UserRepository {
    pub(crate) pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
