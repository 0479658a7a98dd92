//! `ActiveQuizState`: the one piece of per-quiz shared memory,
//! guarded by a single read/write lock. Readers (`ProcessAnswer`,
//! `GetCurrentState`) take a read lock; the Runner takes a write lock
//! only to set/clear the current question.

use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;

use crate::models::db::{Question, Quiz};

pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before epoch")
        .as_millis() as i64
}

#[derive(Clone)]
pub struct CurrentQuestion {
    pub question: Question,
    pub number: i32,
    pub start_time_ms: i64,
}

struct Inner {
    current: Option<CurrentQuestion>,
}

pub struct ActiveQuizState {
    pub quiz: Quiz,
    inner: RwLock<Inner>,
}

impl ActiveQuizState {
    pub fn new(quiz: Quiz) -> Self {
        Self {
            quiz,
            inner: RwLock::new(Inner { current: None }),
        }
    }

    /// Sets the current question and records its start time. Must be
    /// called (and awaited) *before* the question is broadcast (I-2).
    pub async fn set_current_question(&self, question: Question, number: i32) -> i64 {
        let start_time_ms = now_ms();
        let mut inner = self.inner.write().await;
        inner.current = Some(CurrentQuestion {
            question,
            number,
            start_time_ms,
        });
        start_time_ms
    }

    pub async fn clear_current_question(&self) {
        self.inner.write().await.current = None;
    }

    pub async fn current_question(&self) -> Option<CurrentQuestion> {
        self.inner.read().await.current.clone()
    }
}
