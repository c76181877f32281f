//! UseCase: chat in either channel (game or waiting room).

use std::sync::Arc;

use crate::domain::{ChatChannel, ChatEntry, Room, RoomId, RoomRegistry};

use super::error::ChatError;

pub struct ChatUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl ChatUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// Stores the message in the channel's bounded history and returns
    /// the stamped entry for broadcasting to the whole room, sender
    /// included.
    pub async fn execute(
        &self,
        room_id: &RoomId,
        channel: ChatChannel,
        sender: String,
        message: String,
        symbol: Option<String>,
    ) -> Result<(ChatEntry, Room), ChatError> {
        self.registry
            .append_chat(room_id, channel, sender, message, symbol)
            .await
            .map_err(|_| ChatError::RoomNotFound)
    }
}
