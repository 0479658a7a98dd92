//! Cluster pub/sub provider: the optional multi-node fan-out contract
//! the realtime hub publishes through when clustering is configured.
//! A "no-op" implementation satisfies the contract when a single node
//! is running.

mod noop;
mod redis_pubsub;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppError;

pub use noop::NoopPubSub;
pub use redis_pubsub::RedisPubSub;

/// The three logical channels every cluster node publishes/subscribes
/// on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Broadcast,
    Direct,
    Metrics,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Broadcast => "quiz_engine:broadcast",
            Channel::Direct => "quiz_engine:direct",
            Channel::Metrics => "quiz_engine:metrics",
        }
    }
}

/// An inbound cluster message, tagged with the instance id that
/// published it so a node can ignore its own echoes.
#[derive(Debug, Clone)]
pub struct ClusterMessage {
    pub origin_instance_id: String,
    pub payload: Vec<u8>,
}

/// At-least-once, best-effort-ordered pub/sub across cluster nodes.
#[async_trait]
pub trait PubSub: Send + Sync {
    async fn publish(&self, channel: Channel, payload: Vec<u8>) -> Result<(), AppError>;

    /// Registers a handler invoked for every message received on
    /// `channel` that was not authored by this instance. Implementations
    /// spawn their own receive loop; this call returns once the
    /// subscription is established.
    async fn subscribe(
        &self,
        channel: Channel,
        handler: Arc<dyn Fn(ClusterMessage) + Send + Sync>,
    ) -> Result<(), AppError>;

    fn instance_id(&self) -> &str;
}

/// Builds the configured `PubSub` implementation: Redis-backed when
/// `cluster_redis_url` is set, otherwise the no-op single-node default.
pub async fn build(config: &Config) -> Result<Arc<dyn PubSub>, AppError> {
    match &config.cluster_redis_url {
        Some(url) => {
            let provider = RedisPubSub::connect(url, config.cluster_instance_id.clone()).await?;
            Ok(Arc::new(provider))
        }
        None => Ok(Arc::new(NoopPubSub::new(config.cluster_instance_id.clone()))),
    }
}
