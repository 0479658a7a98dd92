use axum::extract::ws::Message;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

/// One connected socket's outbound side: a bounded queue a writer task
/// drains to the real socket, plus the bookkeeping the shard's
/// backpressure policy needs.
pub struct Client {
    pub user_id: Uuid,
    pub tx: mpsc::Sender<Message>,
    pub subscriptions: RwLock<std::collections::HashSet<Uuid>>,
    pub buffer_warnings: AtomicU32,
}

impl Client {
    pub fn new(user_id: Uuid, capacity: usize) -> (Arc<Self>, mpsc::Receiver<Message>) {
        let (tx, rx) = mpsc::channel(capacity);
        (
            Arc::new(Self {
                user_id,
                tx,
                subscriptions: RwLock::new(std::collections::HashSet::new()),
                buffer_warnings: AtomicU32::new(0),
            }),
            rx,
        )
    }

    /// Enqueues `message` without blocking. Returns `false` if the
    /// queue was full (the shard turns this into a buffer-warning/
    /// disconnect decision, never head-of-line blocking).
    pub fn try_enqueue(&self, message: Message) -> bool {
        match self.tx.try_send(message) {
            Ok(()) => {
                self.buffer_warnings.store(0, Ordering::Relaxed);
                true
            }
            Err(_) => false,
        }
    }

    pub fn record_buffer_warning(&self) -> u32 {
        self.buffer_warnings.fetch_add(1, Ordering::Relaxed) + 1
    }
}
