//! Ad slot/asset repository: the ad-break lookup the runner consults
//! after each question reveal.

mod read;

use sqlx::PgPool;

#[derive(Clone)]
pub struct AdRepository {
    pub(crate) pool: PgPool,
}

impl AdRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
