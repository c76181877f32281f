//! UseCase: resetting the board for a rematch.

use std::sync::Arc;

use crate::domain::{RestartInfo, Room, RoomId, RoomRegistry};

use super::error::RestartGameError;

pub struct RestartGameUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl RestartGameUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// Clears the board and alternates the opening symbol. Requires both
    /// players connected; scores are kept.
    pub async fn execute(
        &self,
        room_id: &RoomId,
    ) -> Result<(RestartInfo, Room), RestartGameError> {
        let (info, room) = self.registry.restart_game(room_id).await?;
        Ok((info, room))
    }
}
