//! Cache/KV adapter: the engine's view of the relational-adjacent
//! Redis store, in the same per-entity repository shape as the
//! Postgres repositories. Scoped to what the engine actually needs:
//! participant/ready sets, per-question answered/eliminated markers,
//! and the adaptive pass-rate counters.

mod adaptive;
mod markers;
mod participants;

pub mod keys;

use crate::state::RedisClient;

pub use keys::CacheKey;

/// Repository for the quiz engine's transient Redis-backed state.
#[derive(Clone)]
pub struct CacheRepository {
    pub(crate) redis: RedisClient,
}

impl CacheRepository {
    pub fn new(redis: RedisClient) -> Self {
        Self { redis }
    }
}
