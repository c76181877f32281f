//! Outbound messaging seam.
//!
//! The domain and use cases never talk to a WebSocket directly; they
//! hand serialized frames to a [`MessagePusher`]. The WebSocket-backed
//! implementation lives in the infrastructure layer.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::error::MessagePushError;
use super::value_object::ConnectionId;

/// Per-connection channel the pusher delivers frames through.
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Registers a freshly accepted connection.
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// Removes a connection after it closed.
    async fn unregister_connection(&self, connection_id: &ConnectionId);

    /// Sends one frame to one connection.
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// Sends one frame to each target. Individual failures are logged
    /// and skipped; room state re-sent on reconnect is the recovery path
    /// for missed frames.
    async fn broadcast(&self, targets: Vec<ConnectionId>, content: &str);

    /// Sends one frame to every registered connection (room-list
    /// updates).
    async fn broadcast_all(&self, content: &str);
}
