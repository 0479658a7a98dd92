//! WebSocket connection wrapper for driving `/ws/{user_id}` in tests.

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use uuid::Uuid;

pub struct WsConnection {
    sender: futures_util::stream::SplitSink<
        tokio_tungstenite::WebSocketStream<
            tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
        >,
        Message,
    >,
    receiver: futures_util::stream::SplitStream<
        tokio_tungstenite::WebSocketStream<
            tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
        >,
    >,
}

impl WsConnection {
    pub async fn connect(ws_base_url: &str, user_id: Uuid) -> Result<Self, Box<dyn std::error::Error>> {
        let url = format!("{ws_base_url}/ws/{user_id}");
        let (ws_stream, _) = connect_async(url).await?;
        let (sender, receiver) = ws_stream.split();
        Ok(Self { sender, receiver })
    }

    pub async fn send_json(&mut self, msg: &Value) -> Result<(), Box<dyn std::error::Error>> {
        self.sender
            .send(Message::Text(msg.to_string().into()))
            .await?;
        Ok(())
    }

    /// Server frames arrive as `Binary` (the engine serializes once and
    /// hands the same bytes to every transport), so both binary and
    /// text are accepted here.
    pub async fn recv_json(&mut self) -> Result<Value, Box<dyn std::error::Error>> {
        while let Some(msg) = self.receiver.next().await {
            match msg? {
                Message::Text(text) => return Ok(serde_json::from_str(&text)?),
                Message::Binary(bytes) => return Ok(serde_json::from_slice(&bytes)?),
                Message::Ping(_) | Message::Pong(_) => continue,
                _ => continue,
            }
        }
        Err("connection closed before a message arrived".into())
    }

    pub async fn recv_json_timeout(
        &mut self,
        timeout: std::time::Duration,
    ) -> Result<Value, Box<dyn std::error::Error>> {
        tokio::time::timeout(timeout, self.recv_json())
            .await
            .map_err(|_| Box::<dyn std::error::Error>::from("timed out waiting for a message"))?
    }

    /// Drains messages until one whose `type` field equals `message_type`,
    /// or the timeout elapses - broadcasts the lifecycle emits (announcement,
    /// waiting room, countdown) would otherwise land in front of the frame
    /// a test actually wants to assert on.
    pub async fn recv_until(
        &mut self,
        message_type: &str,
        timeout: std::time::Duration,
    ) -> Result<Value, Box<dyn std::error::Error>> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return Err("timed out waiting for message type".into());
            }
            let value = self.recv_json_timeout(remaining).await?;
            if value.get("type").and_then(Value::as_str) == Some(message_type) {
                return Ok(value);
            }
        }
    }
}
