//! UseCase: room creation.

use std::sync::Arc;

use crate::domain::{ConnectionId, PlayerName, Room, RoomRegistry};

pub struct CreateRoomUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl CreateRoomUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// Creates a lobby room with the requester seated as host at 'X'.
    pub async fn execute(&self, connection_id: ConnectionId, name: PlayerName) -> Room {
        self.registry.create_room(connection_id, name).await
    }
}
