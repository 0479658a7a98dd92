//! Realtime hub: sharded WebSocket fan-out with backpressure and
//! optional cluster pub/sub. Per-shard maps with bounded per-client
//! queues instead of one global mutex-guarded connection map, so a slow
//! client in one shard never blocks registration or broadcast in
//! another.

pub mod client;
pub mod hub;
pub mod shard;
