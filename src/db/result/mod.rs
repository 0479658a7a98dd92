//! Result repository: per-player result rows and the ranking/prize
//! transaction. The two public entry points mirror
//! `ResultFinalizer::compute_per_player`/`finalize_winners` -
//! everything else here is a private helper those two call.

mod finalize;
mod read;

use sqlx::PgPool;

#[derive(Clone)]
pub struct ResultRepository {
    pub(crate) pool: PgPool,
}

impl ResultRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
