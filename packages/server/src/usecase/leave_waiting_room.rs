//! UseCase: leaving the pre-game lobby.

use std::sync::Arc;

use crate::domain::{LeaveInfo, PlayerName, Room, RoomId, RoomRegistry};

use super::error::LeaveWaitingRoomError;

pub struct LeaveWaitingRoomUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl LeaveWaitingRoomUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// Removes the named participant. `Ok(None)` when the name is not in
    /// the room. An emptied room is deleted by the registry; `now_empty`
    /// in the outcome tells the gateway to re-announce the room list.
    pub async fn execute(
        &self,
        room_id: &RoomId,
        name: &PlayerName,
    ) -> Result<Option<(LeaveInfo, Room)>, LeaveWaitingRoomError> {
        self.registry
            .leave_waiting_room(room_id, name)
            .await
            .map_err(|_| LeaveWaitingRoomError::RoomNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConnectionId;
    use crate::infrastructure::registry::InMemoryRoomRegistry;
    use sanmoku_shared::time::FixedClock;

    fn conn(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string())
    }

    fn name(value: &str) -> PlayerName {
        PlayerName::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_host_leave_promotes_the_remaining_player() {
        // given:
        let registry = Arc::new(InMemoryRoomRegistry::new(Arc::new(FixedClock::new(1_000))));
        let room = registry.create_room(conn("c1"), name("Alice")).await;
        registry
            .join_waiting_room(&room.id, conn("c2"), name("Bob"))
            .await
            .unwrap();
        let usecase = LeaveWaitingRoomUseCase::new(registry.clone());

        // when:
        let result = usecase.execute(&room.id, &name("Alice")).await.unwrap();

        // then:
        let (info, snapshot) = result.unwrap();
        assert_eq!(info.new_host.unwrap().name, name("Bob"));
        assert!(!info.now_empty);
        assert_eq!(snapshot.players.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_name_is_a_silent_no_op() {
        // given:
        let registry = Arc::new(InMemoryRoomRegistry::new(Arc::new(FixedClock::new(1_000))));
        let room = registry.create_room(conn("c1"), name("Alice")).await;
        let usecase = LeaveWaitingRoomUseCase::new(registry);

        // when:
        let result = usecase.execute(&room.id, &name("Nobody")).await.unwrap();

        // then:
        assert!(result.is_none());
    }
}
