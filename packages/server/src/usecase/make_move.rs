//! UseCase: applying a board move.

use std::sync::Arc;

use crate::domain::{ConnectionId, MoveInfo, Room, RoomId, RoomRegistry};

use super::error::MakeMoveError;

pub struct MakeMoveUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl MakeMoveUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// Applies the move when it is legal. `Ok(None)` means an illegal
    /// move: no mutation, no broadcast, no error event (the board state
    /// is the source of truth and simply did not change).
    pub async fn execute(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
        cell: usize,
    ) -> Result<Option<(MoveInfo, Room)>, MakeMoveError> {
        self.registry
            .apply_move(room_id, connection_id, cell)
            .await
            .map_err(|_| MakeMoveError::RoomNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PlayerName;
    use crate::infrastructure::registry::InMemoryRoomRegistry;
    use sanmoku_shared::board::{Symbol, Verdict};
    use sanmoku_shared::time::FixedClock;

    fn conn(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string())
    }

    fn name(value: &str) -> PlayerName {
        PlayerName::new(value.to_string()).unwrap()
    }

    async fn started_room() -> (Arc<InMemoryRoomRegistry>, RoomId) {
        let registry = Arc::new(InMemoryRoomRegistry::new(Arc::new(FixedClock::new(1_000))));
        let room = registry.create_room(conn("c1"), name("Alice")).await;
        registry
            .join_waiting_room(&room.id, conn("c2"), name("Bob"))
            .await
            .unwrap();
        registry
            .start_game(&room.id, &conn("c1"), &name("Alice"))
            .await
            .unwrap();
        (registry, room.id)
    }

    #[tokio::test]
    async fn test_x_win_across_the_top_row_scores_one() {
        // given: X takes 0, 1, 2 while O answers 4, 5
        let (registry, room_id) = started_room().await;
        let usecase = MakeMoveUseCase::new(registry);

        // when:
        for (c, cell) in [("c1", 0), ("c2", 4), ("c1", 1), ("c2", 5)] {
            assert!(
                usecase
                    .execute(&room_id, &conn(c), cell)
                    .await
                    .unwrap()
                    .is_some()
            );
        }
        let (info, room) = usecase
            .execute(&room_id, &conn("c1"), 2)
            .await
            .unwrap()
            .unwrap();

        // then:
        assert_eq!(
            info.verdict,
            Verdict::Win {
                winner: Symbol::X,
                line: [0, 1, 2]
            }
        );
        assert_eq!(info.scores.x, 1);
        assert!(!room.game_active);
    }

    #[tokio::test]
    async fn test_illegal_moves_change_nothing_and_stay_silent() {
        // given:
        let (registry, room_id) = started_room().await;
        let usecase = MakeMoveUseCase::new(registry.clone());
        usecase
            .execute(&room_id, &conn("c1"), 0)
            .await
            .unwrap()
            .unwrap();

        // when: occupied cell, and out-of-turn
        let occupied = usecase.execute(&room_id, &conn("c2"), 0).await.unwrap();
        let out_of_turn = usecase.execute(&room_id, &conn("c1"), 5).await.unwrap();

        // then: both ignored, board and turn unchanged
        assert!(occupied.is_none());
        assert!(out_of_turn.is_none());
        let room = registry.get_room(&room_id).await.unwrap();
        assert_eq!(room.board.cell(0), Some(Symbol::X));
        assert_eq!(room.current_player, Symbol::O);
    }

    #[tokio::test]
    async fn test_missing_room_is_an_error() {
        // given:
        let registry = Arc::new(InMemoryRoomRegistry::new(Arc::new(FixedClock::new(1_000))));
        let usecase = MakeMoveUseCase::new(registry);

        // when:
        let missing = RoomId::new("missing1".to_string()).unwrap();
        let result = usecase.execute(&missing, &conn("c1"), 0).await;

        // then:
        assert_eq!(result.unwrap_err(), MakeMoveError::RoomNotFound);
    }
}
