use axum::extract::ws::Message;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use super::client::Client;
use super::shard::{enqueue_or_warn, ClientOutcome, Shard};
use crate::cache::CacheRepository;
use crate::config::Config;
use crate::errors::AppError;
use crate::pubsub::{Channel, ClusterMessage, PubSub};

/// The sharded, optionally-clustered realtime fan-out.
///
/// Local delivery always partitions by a stable hash of `user_id`
/// across `shards.len()` shards. Clustering, when configured, publishes
/// outbound bytes to the cluster `broadcast`/`direct` channels and
/// relies on every node's own subscribe loop to fan out locally -
/// `BroadcastBytes` in clustered mode never delivers directly to avoid
/// double delivery.
pub struct Hub {
    shards: Vec<Shard>,
    config: Arc<Config>,
    pubsub: Arc<dyn PubSub>,
    clustered: bool,
}

fn shard_index(user_id: Uuid, shard_count: usize) -> usize {
    let bytes = user_id.as_bytes();
    let mut acc: u64 = 0;
    for chunk in bytes.chunks(8) {
        let mut buf = [0u8; 8];
        buf[..chunk.len()].copy_from_slice(chunk);
        acc ^= u64::from_le_bytes(buf);
    }
    (acc as usize) % shard_count
}

impl Hub {
    pub fn new(config: Arc<Config>, pubsub: Arc<dyn PubSub>) -> Self {
        let shards = (0..config.hub_shard_count).map(|_| Shard::new()).collect();
        let clustered = config.cluster_redis_url.is_some();
        Self {
            shards,
            config,
            pubsub,
            clustered,
        }
    }

    /// Installs the cluster receive loop: `broadcast` messages are
    /// rebroadcast to local subscribers; `direct` messages are delivered
    /// to the addressed local user if present.
    pub async fn install_cluster_listener(self: &Arc<Self>) -> Result<(), AppError> {
        let this = self.clone();
        self.pubsub
            .subscribe(
                Channel::Broadcast,
                Arc::new(move |msg: ClusterMessage| {
                    let this = this.clone();
                    tokio::spawn(async move {
                        this.deliver_cluster_broadcast(msg).await;
                    });
                }),
            )
            .await?;

        let this = self.clone();
        self.pubsub
            .subscribe(
                Channel::Direct,
                Arc::new(move |msg: ClusterMessage| {
                    let this = this.clone();
                    tokio::spawn(async move {
                        this.deliver_cluster_direct(msg).await;
                    });
                }),
            )
            .await?;

        Ok(())
    }

    async fn deliver_cluster_broadcast(&self, msg: ClusterMessage) {
        #[derive(serde::Deserialize)]
        struct Envelope {
            quiz_id: Uuid,
            bytes: Vec<u8>,
        }
        if let Ok(env) = serde_json::from_slice::<Envelope>(&msg.payload) {
            self.deliver_local_to_quiz(env.quiz_id, Message::Binary(env.bytes.into()))
                .await;
        }
    }

    async fn deliver_cluster_direct(&self, msg: ClusterMessage) {
        #[derive(serde::Deserialize)]
        struct Envelope {
            user_id: Uuid,
            bytes: Vec<u8>,
        }
        if let Ok(env) = serde_json::from_slice::<Envelope>(&msg.payload) {
            self.deliver_local_to_user(env.user_id, Message::Binary(env.bytes.into()))
                .await;
        }
    }

    fn shard(&self, user_id: Uuid) -> &Shard {
        &self.shards[shard_index(user_id, self.shards.len())]
    }

    pub async fn register(&self, user_id: Uuid) -> (Arc<Client>, tokio::sync::mpsc::Receiver<Message>) {
        let (client, rx) = Client::new(user_id, self.config.hub_send_queue_capacity);
        self.shard(user_id).register(client.clone()).await;
        (client, rx)
    }

    pub async fn unregister(&self, user_id: Uuid) {
        self.shard(user_id).unregister(user_id).await;
    }

    pub async fn subscribe(&self, user_id: Uuid, quiz_id: Uuid) {
        self.shard(user_id).subscribe(user_id, quiz_id).await;
    }

    pub async fn send_to_user<M: Serialize>(&self, user_id: Uuid, msg: &M) -> Result<(), AppError> {
        let bytes = serde_json::to_vec(msg).map_err(|e| AppError::Serialization(e.to_string()))?;
        let delivered = self.deliver_local_to_user(user_id, Message::Binary(bytes.clone().into())).await;
        if !delivered && self.clustered {
            #[derive(serde::Serialize)]
            struct Envelope<'a> {
                user_id: Uuid,
                bytes: &'a [u8],
            }
            let envelope = serde_json::to_vec(&Envelope { user_id, bytes: &bytes })
                .map_err(|e| AppError::Serialization(e.to_string()))?;
            self.pubsub.publish(Channel::Direct, envelope).await?;
        }
        Ok(())
    }

    async fn deliver_local_to_user(&self, user_id: Uuid, message: Message) -> bool {
        let Some(client) = self.shard(user_id).client(user_id).await else {
            return false;
        };
        matches!(
            enqueue_or_warn(&client, message, self.config.hub_max_buffer_warnings),
            ClientOutcome::Delivered | ClientOutcome::Warned
        )
    }

    /// `BroadcastToQuiz`: fans out to every shard's quiz index in
    /// parallel; a slow subscriber only ever affects its own
    /// backpressure counter, never the others.
    pub async fn broadcast_to_quiz<M: Serialize>(&self, quiz_id: Uuid, msg: &M) -> Result<(), AppError> {
        let bytes = serde_json::to_vec(msg).map_err(|e| AppError::Serialization(e.to_string()))?;

        if self.clustered {
            #[derive(serde::Serialize)]
            struct Envelope<'a> {
                quiz_id: Uuid,
                bytes: &'a [u8],
            }
            let envelope = serde_json::to_vec(&Envelope { quiz_id, bytes: &bytes })
                .map_err(|e| AppError::Serialization(e.to_string()))?;
            self.pubsub.publish(Channel::Broadcast, envelope).await?;
        } else {
            self.deliver_local_to_quiz(quiz_id, Message::Binary(bytes.into())).await;
        }
        Ok(())
    }

    async fn deliver_local_to_quiz(&self, quiz_id: Uuid, message: Message) {
        let mut tasks = Vec::with_capacity(self.shards.len());

        for shard in &self.shards {
            let subscribers = shard.quiz_subscribers(quiz_id).await;
            let message = message.clone();
            let max_warnings = self.config.hub_max_buffer_warnings;
            tasks.push(tokio::spawn(async move {
                let mut local_overflow = Vec::new();
                for client in subscribers {
                    match enqueue_or_warn(&client, message.clone(), max_warnings) {
                        ClientOutcome::Delivered => {}
                        ClientOutcome::Warned => {
                            if let Ok(bytes) = serde_json::to_vec(
                                &crate::engine::events::ServerMessage::ServerBufferWarning {},
                            ) {
                                let _ = client.tx.try_send(Message::Binary(bytes.into()));
                            }
                        }
                        ClientOutcome::Overflowed => local_overflow.push(client.user_id),
                    }
                }
                local_overflow
            }));
        }

        let mut overflowed_ids = Vec::new();
        for task in tasks {
            if let Ok(ids) = task.await {
                overflowed_ids.extend(ids);
            }
        }

        for user_id in overflowed_ids {
            self.unregister(user_id).await;
        }
    }

    /// `GetActiveSubscribers`: subscribers not eliminated, per
    /// the cache's elimination marker. Cache errors degrade to
    /// "treat as active".
    pub async fn active_subscribers(&self, quiz_id: Uuid, cache: &CacheRepository) -> Vec<Uuid> {
        let mut all_subscribers = Vec::new();
        for shard in &self.shards {
            all_subscribers.extend(shard.quiz_subscribers(quiz_id).await.into_iter().map(|c| c.user_id));
        }

        let mut active = Vec::with_capacity(all_subscribers.len());
        for user_id in all_subscribers {
            let eliminated = cache.is_eliminated(quiz_id, user_id).await.unwrap_or(false);
            if !eliminated {
                active.push(user_id);
            }
        }
        active
    }

    pub async fn quiz_subscriber_count(&self, quiz_id: Uuid) -> usize {
        let mut total = 0;
        for shard in &self.shards {
            total += shard.quiz_subscriber_count(quiz_id).await;
        }
        total
    }

    pub async fn total_client_count(&self) -> usize {
        let mut total = 0;
        for shard in &self.shards {
            total += shard.client_count().await;
        }
        total
    }
}
