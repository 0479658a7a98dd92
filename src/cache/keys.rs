use uuid::Uuid;

/// Redis key builder for consistent key naming across the engine.
/// All keys carry a 24h TTL unless noted.
pub struct CacheKey;

impl CacheKey {
    pub fn participants(quiz_id: Uuid) -> String {
        format!("quiz:{quiz_id}:participants")
    }

    pub fn ready(quiz_id: Uuid, user_id: Uuid) -> String {
        format!("quiz:{quiz_id}:ready:{user_id}")
    }

    pub fn answered(quiz_id: Uuid, question_number: i32, user_id: Uuid) -> String {
        format!("quiz:{quiz_id}:q{question_number}:answered:{user_id}")
    }

    pub fn eliminated(quiz_id: Uuid, user_id: Uuid) -> String {
        format!("quiz:{quiz_id}:eliminated:{user_id}")
    }

    pub fn question_total(quiz_id: Uuid, question_number: i32) -> String {
        format!("quiz:{quiz_id}:q{question_number}:total")
    }

    pub fn question_passed(quiz_id: Uuid, question_number: i32) -> String {
        format!("quiz:{quiz_id}:q{question_number}:passed")
    }
}

/// Default TTL applied to every key this engine writes.
pub const DEFAULT_TTL_SECS: i64 = 24 * 60 * 60;
