//! UseCase: host-gated game start.

use std::sync::Arc;

use crate::domain::{ConnectionId, PlayerName, Room, RoomId, RoomRegistry};

use super::error::StartGameError;

pub struct StartGameUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl StartGameUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// Moves the room into play. Authorized for a host, or for the
    /// recorded creator (who is re-granted host status on the spot).
    pub async fn execute(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
        name: &PlayerName,
    ) -> Result<Room, StartGameError> {
        let room = self
            .registry
            .start_game(room_id, connection_id, name)
            .await?;
        Ok(room)
    }
}
