//! UseCase: connection loss.
//!
//! Disconnects are expected, not exceptional: the player's seat is kept
//! for the grace period, spectators are dropped, and a room left with no
//! connected player is scheduled for deferred deletion.

use std::sync::Arc;

use crate::domain::{ConnectionId, DeletionScheduler, Disconnection, Room, RoomRegistry};

pub struct DisconnectUseCase {
    registry: Arc<dyn RoomRegistry>,
    scheduler: Arc<dyn DeletionScheduler>,
}

impl DisconnectUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, scheduler: Arc<dyn DeletionScheduler>) -> Self {
        Self {
            registry,
            scheduler,
        }
    }

    /// Removes any matchmaking ticket (a vanished client must never be
    /// paired), updates the room holding the connection, and schedules
    /// deletion when every player is now disconnected. Returns `None`
    /// when the connection was in no room.
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<(Disconnection, Room)> {
        if self.registry.dequeue_seeker(connection_id).await {
            tracing::info!(
                "Removed matchmaking ticket of disconnected connection {}",
                connection_id
            );
        }

        let (disconnection, room) = self.registry.mark_disconnected(connection_id).await?;
        if let Disconnection::Player {
            all_players_disconnected: true,
            ..
        } = &disconnection
        {
            self.scheduler.schedule(room.id.clone()).await;
        }
        Some((disconnection, room))
    }
}
