use async_trait::async_trait;
use std::sync::Arc;

use super::{Channel, ClusterMessage, PubSub};
use crate::errors::AppError;

/// Satisfies the `PubSub` contract when no cluster is configured.
/// Publishes are dropped; subscriptions never fire. Every hub broadcast
/// is already delivered locally, so single-node deployments lose
/// nothing by skipping the cluster hop.
pub struct NoopPubSub {
    instance_id: String,
}

impl NoopPubSub {
    pub fn new(instance_id: String) -> Self {
        Self { instance_id }
    }
}

#[async_trait]
impl PubSub for NoopPubSub {
    async fn publish(&self, _channel: Channel, _payload: Vec<u8>) -> Result<(), AppError> {
        Ok(())
    }

    async fn subscribe(
        &self,
        _channel: Channel,
        _handler: Arc<dyn Fn(ClusterMessage) + Send + Sync>,
    ) -> Result<(), AppError> {
        Ok(())
    }

    fn instance_id(&self) -> &str {
        &self.instance_id
    }
}
