//! UseCase: random matchmaking (find, cancel, game-started report).

use std::sync::Arc;

use crate::domain::{
    CancelOutcome, ConnectionId, EnqueueOutcome, PlayerName, Room, RoomId, RoomRegistry,
};

use super::error::MatchStartError;

pub struct MatchmakingUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl MatchmakingUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// Queues the requester; pairs the two oldest entries into a playing
    /// room once two are waiting. Asking again before being paired is a
    /// logged no-op.
    pub async fn find(&self, connection_id: ConnectionId, name: PlayerName) -> EnqueueOutcome {
        self.registry.enqueue_seeker(connection_id, name).await
    }

    /// Drops the requester's queue entry and, when the requester sits in
    /// a not-yet-started random match, deletes that room so its occupants
    /// can be told.
    pub async fn cancel(&self, connection_id: &ConnectionId) -> CancelOutcome {
        let dequeued = self.registry.dequeue_seeker(connection_id).await;
        let cancelled_room = self.registry.cancel_random_match(connection_id).await;
        CancelOutcome {
            dequeued,
            cancelled_room,
        }
    }

    /// Records that the clients of a matchmade room brought the board
    /// up; the room can no longer be cancelled.
    pub async fn mark_started(&self, room_id: &RoomId) -> Result<Room, MatchStartError> {
        self.registry
            .mark_match_started(room_id)
            .await
            .map_err(|_| MatchStartError::RoomNotFound)
    }
}
