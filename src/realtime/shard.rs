use axum::extract::ws::Message;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::client::Client;

/// One partition of connections. Each shard owns its own client map
/// and per-quiz subscription index and runs no event loop of its own
/// in this implementation — operations take the shard's locks directly
/// and never hold one across socket I/O.
pub struct Shard {
    clients: RwLock<HashMap<Uuid, Arc<Client>>>,
    quiz_subscribers: RwLock<HashMap<Uuid, HashSet<Uuid>>>,
}

impl Shard {
    pub fn new() -> Self {
        Self {
            clients: RwLock::new(HashMap::new()),
            quiz_subscribers: RwLock::new(HashMap::new()),
        }
    }

    pub async fn register(&self, client: Arc<Client>) {
        self.clients.write().await.insert(client.user_id, client);
    }

    pub async fn unregister(&self, user_id: Uuid) {
        let client = self.clients.write().await.remove(&user_id);
        if let Some(client) = client {
            let subs: Vec<Uuid> = client.subscriptions.read().await.iter().copied().collect();
            let mut index = self.quiz_subscribers.write().await;
            for quiz_id in subs {
                if let Some(set) = index.get_mut(&quiz_id) {
                    set.remove(&user_id);
                    if set.is_empty() {
                        index.remove(&quiz_id);
                    }
                }
            }
        }
    }

    pub async fn subscribe(&self, user_id: Uuid, quiz_id: Uuid) {
        if let Some(client) = self.clients.read().await.get(&user_id) {
            client.subscriptions.write().await.insert(quiz_id);
        }
        self.quiz_subscribers
            .write()
            .await
            .entry(quiz_id)
            .or_default()
            .insert(user_id);
    }

    pub async fn client(&self, user_id: Uuid) -> Option<Arc<Client>> {
        self.clients.read().await.get(&user_id).cloned()
    }

    /// Subscribers to `quiz_id` currently held by this shard.
    pub async fn quiz_subscribers(&self, quiz_id: Uuid) -> Vec<Arc<Client>> {
        let Some(ids) = self.quiz_subscribers.read().await.get(&quiz_id).cloned() else {
            return Vec::new();
        };
        let clients = self.clients.read().await;
        ids.iter().filter_map(|id| clients.get(id).cloned()).collect()
    }

    pub async fn client_count(&self) -> usize {
        self.clients.read().await.len()
    }

    pub async fn quiz_subscriber_count(&self, quiz_id: Uuid) -> usize {
        self.quiz_subscribers
            .read()
            .await
            .get(&quiz_id)
            .map(HashSet::len)
            .unwrap_or(0)
    }
}

/// Fan-out helper shared by `broadcast_to_quiz`: enqueues `message` on
/// every client, applying the backpressure policy per client.
pub(super) fn enqueue_or_warn(client: &Client, message: Message, max_warnings: u32) -> ClientOutcome {
    if client.try_enqueue(message) {
        ClientOutcome::Delivered
    } else {
        let warnings = client.record_buffer_warning();
        if warnings >= max_warnings {
            ClientOutcome::Overflowed
        } else {
            ClientOutcome::Warned
        }
    }
}

pub(super) enum ClientOutcome {
    Delivered,
    Warned,
    Overflowed,
}
