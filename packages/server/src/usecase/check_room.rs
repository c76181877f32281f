//! UseCase: room existence/status probe.

use std::sync::Arc;

use crate::domain::{Player, RoomId, RoomRegistry, RoomStatus};

/// Answer for a `checkRoom` probe; goes to the requester only.
#[derive(Debug, Clone)]
pub struct RoomStatusReport {
    pub exists: bool,
    pub players: Option<Vec<Player>>,
    pub status: Option<RoomStatus>,
}

pub struct CheckRoomUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl CheckRoomUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// A missing room is a regular `exists: false` answer here, not an
    /// error event.
    pub async fn execute(&self, room_id: &RoomId) -> RoomStatusReport {
        match self.registry.get_room(room_id).await {
            Ok(room) => RoomStatusReport {
                exists: true,
                players: Some(room.players.clone()),
                status: Some(room.status),
            },
            Err(_) => RoomStatusReport {
                exists: false,
                players: None,
                status: None,
            },
        }
    }
}
