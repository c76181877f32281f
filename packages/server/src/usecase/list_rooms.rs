//! UseCase: room listings for the HTTP surface and the room-list
//! broadcast.

use std::sync::Arc;

use crate::domain::{RegistryError, Room, RoomId, RoomRegistry};

pub struct ListRoomsUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl ListRoomsUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    pub async fn rooms(&self) -> Vec<Room> {
        self.registry.rooms().await
    }

    pub async fn room(&self, room_id: &RoomId) -> Result<Room, RegistryError> {
        self.registry.get_room(room_id).await
    }

    /// Room ids for the `availableRooms` event.
    pub async fn room_id_strings(&self) -> Vec<String> {
        self.registry
            .room_ids()
            .await
            .iter()
            .map(|id| id.as_str().to_string())
            .collect()
    }
}
