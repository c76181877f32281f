//! UseCase: reconnecting into a specific seat.

use std::sync::Arc;

use sanmoku_shared::board::Symbol;

use crate::domain::{
    ConnectionId, DeletionScheduler, Player, PlayerName, Room, RoomId, RoomRegistry,
};

use super::error::ReconnectError;

pub struct ReconnectUseCase {
    registry: Arc<dyn RoomRegistry>,
    scheduler: Arc<dyn DeletionScheduler>,
}

impl ReconnectUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, scheduler: Arc<dyn DeletionScheduler>) -> Self {
        Self {
            registry,
            scheduler,
        }
    }

    /// Takes over a disconnected seat (or joins fresh when a seat is
    /// free) and cancels any pending deletion timer before it can fire.
    pub async fn execute(
        &self,
        room_id: &RoomId,
        connection_id: ConnectionId,
        name: PlayerName,
        symbol: Option<Symbol>,
    ) -> Result<(Player, Room), ReconnectError> {
        let (player, room) = self
            .registry
            .reconnect(room_id, connection_id, name, symbol)
            .await?;
        self.scheduler.cancel(room_id).await;
        Ok((player, room))
    }
}
