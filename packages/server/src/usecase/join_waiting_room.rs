//! UseCase: joining the pre-game lobby.

use std::sync::Arc;

use crate::domain::{
    ConnectionId, DeletionScheduler, PlayerName, Room, RoomId, RoomRegistry, WaitingJoin,
};

use super::error::JoinWaitingRoomError;

pub struct JoinWaitingRoomUseCase {
    registry: Arc<dyn RoomRegistry>,
    scheduler: Arc<dyn DeletionScheduler>,
}

impl JoinWaitingRoomUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, scheduler: Arc<dyn DeletionScheduler>) -> Self {
        Self {
            registry,
            scheduler,
        }
    }

    /// Seats the requester per the join policy (reconnect by name first,
    /// spectator overflow, fresh seat). A successful join means a live
    /// connection, so a pending deletion timer is cancelled.
    pub async fn execute(
        &self,
        room_id: &RoomId,
        connection_id: ConnectionId,
        name: PlayerName,
    ) -> Result<(WaitingJoin, Room), JoinWaitingRoomError> {
        let (join, room) = self
            .registry
            .join_waiting_room(room_id, connection_id, name)
            .await
            .map_err(|_| JoinWaitingRoomError::RoomNotFound)?;
        self.scheduler.cancel(room_id).await;
        Ok((join, room))
    }
}
