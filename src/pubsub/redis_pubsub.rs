use async_trait::async_trait;
use futures::StreamExt;
use std::sync::Arc;

use super::{Channel, ClusterMessage, PubSub};
use crate::errors::AppError;

/// Redis-backed `PubSub`. Each outbound message is tagged with this
/// node's instance id so `subscribe` can skip self-authored echoes -
/// a node never reacts to its own broadcast.
pub struct RedisPubSub {
    client: redis::Client,
    instance_id: String,
}

impl RedisPubSub {
    pub async fn connect(redis_url: &str, instance_id: String) -> Result<Self, AppError> {
        let client = redis::Client::open(redis_url)
            .map_err(AppError::RedisCommandError)?;
        Ok(Self { client, instance_id })
    }

    fn envelope(&self, payload: Vec<u8>) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.instance_id.len() + 1 + payload.len());
        buf.extend_from_slice(self.instance_id.as_bytes());
        buf.push(0);
        buf.extend_from_slice(&payload);
        buf
    }

    fn unwrap_envelope(raw: &[u8]) -> Option<(String, Vec<u8>)> {
        let idx = raw.iter().position(|&b| b == 0)?;
        let origin = String::from_utf8(raw[..idx].to_vec()).ok()?;
        Some((origin, raw[idx + 1..].to_vec()))
    }
}

#[async_trait]
impl PubSub for RedisPubSub {
    async fn publish(&self, channel: Channel, payload: Vec<u8>) -> Result<(), AppError> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(AppError::RedisCommandError)?;
        let envelope = self.envelope(payload);
        redis::cmd("PUBLISH")
            .arg(channel.as_str())
            .arg(envelope)
            .query_async::<()>(&mut conn)
            .await
            .map_err(AppError::RedisCommandError)?;
        Ok(())
    }

    async fn subscribe(
        &self,
        channel: Channel,
        handler: Arc<dyn Fn(ClusterMessage) + Send + Sync>,
    ) -> Result<(), AppError> {
        let mut pubsub = self
            .client
            .get_async_pubsub()
            .await
            .map_err(AppError::RedisCommandError)?;
        pubsub
            .subscribe(channel.as_str())
            .await
            .map_err(AppError::RedisCommandError)?;

        let instance_id = self.instance_id.clone();
        tokio::spawn(async move {
            let mut stream = pubsub.into_on_message();
            while let Some(msg) = stream.next().await {
                let raw: Vec<u8> = match msg.get_payload() {
                    Ok(bytes) => bytes,
                    Err(_) => continue,
                };
                let Some((origin, payload)) = Self::unwrap_envelope(&raw) else {
                    continue;
                };
                if origin == instance_id {
                    continue;
                }
                handler(ClusterMessage {
                    origin_instance_id: origin,
                    payload,
                });
            }
        });

        Ok(())
    }

    fn instance_id(&self) -> &str {
        &self.instance_id
    }
}
