//! UseCase: joining a game room (player, reconnect, or spectator).

use std::sync::Arc;

use crate::domain::{
    ConnectionId, DeletionScheduler, GameJoin, PlayerName, Room, RoomId, RoomRegistry,
};

use super::error::JoinRoomError;

pub struct JoinRoomUseCase {
    registry: Arc<dyn RoomRegistry>,
    scheduler: Arc<dyn DeletionScheduler>,
}

impl JoinRoomUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, scheduler: Arc<dyn DeletionScheduler>) -> Self {
        Self {
            registry,
            scheduler,
        }
    }

    /// Resolves the join (spectator request or overflow, takeover of a
    /// disconnected seat by name, fresh seat) and cancels any pending
    /// deletion timer for the room.
    pub async fn execute(
        &self,
        room_id: &RoomId,
        connection_id: ConnectionId,
        name: PlayerName,
        as_spectator: bool,
    ) -> Result<(GameJoin, Room), JoinRoomError> {
        let (join, room) = self
            .registry
            .join_room(room_id, connection_id, name, as_spectator)
            .await
            .map_err(|_| JoinRoomError::RoomNotFound)?;
        self.scheduler.cancel(room_id).await;
        Ok((join, room))
    }
}
