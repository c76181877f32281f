//! In-memory [`RoomRegistry`].
//!
//! One mutex guards the rooms map and the matchmaking queue together, so
//! a whole event step (including queue pairing plus room creation) runs
//! under a single lock hold and is atomic towards every other step.
//! There is no persistence; the store lives and dies with the process.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use sanmoku_shared::board::Symbol;
use sanmoku_shared::time::Clock;

use crate::domain::{
    ChatChannel, ChatEntry, ConnectionId, Disconnection, EnqueueOutcome, GameJoin, LeaveInfo,
    MatchTicket, MoveInfo, Player, PlayerName, RegistryError, RestartInfo, Room, RoomId,
    RoomIdFactory, RoomRegistry, Timestamp, WaitingJoin,
};

struct RegistryState {
    rooms: HashMap<String, Room>,
    queue: VecDeque<MatchTicket>,
}

pub struct InMemoryRoomRegistry {
    state: Mutex<RegistryState>,
    clock: Arc<dyn Clock>,
}

impl InMemoryRoomRegistry {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(RegistryState {
                rooms: HashMap::new(),
                queue: VecDeque::new(),
            }),
            clock,
        }
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_millis())
    }

    /// Generates an id not currently in use.
    fn fresh_room_id(rooms: &HashMap<String, Room>) -> RoomId {
        loop {
            let id = RoomIdFactory::generate();
            if !rooms.contains_key(id.as_str()) {
                return id;
            }
        }
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn create_room(&self, creator: ConnectionId, creator_name: PlayerName) -> Room {
        let mut state = self.state.lock().await;
        let id = Self::fresh_room_id(&state.rooms);
        let room = Room::new_waiting(id.clone(), creator, creator_name, self.now());
        state.rooms.insert(id.as_str().to_string(), room.clone());
        tracing::info!("Room {} created by {}", id, room.creator_name);
        room
    }

    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RegistryError> {
        let state = self.state.lock().await;
        state
            .rooms
            .get(room_id.as_str())
            .cloned()
            .ok_or(RegistryError::RoomNotFound)
    }

    async fn rooms(&self) -> Vec<Room> {
        let state = self.state.lock().await;
        state.rooms.values().cloned().collect()
    }

    async fn room_ids(&self) -> Vec<RoomId> {
        let state = self.state.lock().await;
        state.rooms.values().map(|r| r.id.clone()).collect()
    }

    async fn delete_room(&self, room_id: &RoomId) -> bool {
        let mut state = self.state.lock().await;
        let existed = state.rooms.remove(room_id.as_str()).is_some();
        if existed {
            tracing::info!("Room {} deleted", room_id);
        }
        existed
    }

    async fn find_room_of_connection(&self, connection_id: &ConnectionId) -> Option<RoomId> {
        let state = self.state.lock().await;
        state
            .rooms
            .values()
            .find(|room| room.holds_connection(connection_id))
            .map(|room| room.id.clone())
    }

    async fn join_waiting_room(
        &self,
        room_id: &RoomId,
        connection_id: ConnectionId,
        name: PlayerName,
    ) -> Result<(WaitingJoin, Room), RegistryError> {
        let mut state = self.state.lock().await;
        let room = state
            .rooms
            .get_mut(room_id.as_str())
            .ok_or(RegistryError::RoomNotFound)?;
        let join = room.join_waiting(connection_id, name);
        Ok((join, room.clone()))
    }

    async fn leave_waiting_room(
        &self,
        room_id: &RoomId,
        name: &PlayerName,
    ) -> Result<Option<(LeaveInfo, Room)>, RegistryError> {
        let mut state = self.state.lock().await;
        let room = state
            .rooms
            .get_mut(room_id.as_str())
            .ok_or(RegistryError::RoomNotFound)?;
        let Some(info) = room.leave(name) else {
            return Ok(None);
        };
        let snapshot = room.clone();
        if info.now_empty {
            state.rooms.remove(room_id.as_str());
            tracing::info!("Room {} deleted (no participants left)", room_id);
        }
        Ok(Some((info, snapshot)))
    }

    async fn append_chat(
        &self,
        room_id: &RoomId,
        channel: ChatChannel,
        sender: String,
        message: String,
        symbol: Option<String>,
    ) -> Result<(ChatEntry, Room), RegistryError> {
        let mut state = self.state.lock().await;
        let room = state
            .rooms
            .get_mut(room_id.as_str())
            .ok_or(RegistryError::RoomNotFound)?;
        let entry = ChatEntry {
            sender,
            message,
            symbol,
            timestamp: self.now(),
        };
        room.push_chat(channel, entry.clone());
        Ok((entry, room.clone()))
    }

    async fn start_game(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
        name: &PlayerName,
    ) -> Result<Room, RegistryError> {
        let mut state = self.state.lock().await;
        let room = state
            .rooms
            .get_mut(room_id.as_str())
            .ok_or(RegistryError::RoomNotFound)?;
        room.start(connection_id, name)?;
        tracing::info!("Game starting in room {} by host {}", room_id, name);
        Ok(room.clone())
    }

    async fn join_room(
        &self,
        room_id: &RoomId,
        connection_id: ConnectionId,
        name: PlayerName,
        as_spectator: bool,
    ) -> Result<(GameJoin, Room), RegistryError> {
        let mut state = self.state.lock().await;
        let room = state
            .rooms
            .get_mut(room_id.as_str())
            .ok_or(RegistryError::RoomNotFound)?;
        let join = room.join_game(connection_id, name, as_spectator);
        Ok((join, room.clone()))
    }

    async fn reconnect(
        &self,
        room_id: &RoomId,
        connection_id: ConnectionId,
        name: PlayerName,
        symbol: Option<Symbol>,
    ) -> Result<(Player, Room), RegistryError> {
        let mut state = self.state.lock().await;
        let room = state
            .rooms
            .get_mut(room_id.as_str())
            .ok_or(RegistryError::RoomNotFound)?;
        let player = room.reconnect_seat(connection_id, name, symbol)?;
        Ok((player, room.clone()))
    }

    async fn apply_move(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
        cell: usize,
    ) -> Result<Option<(MoveInfo, Room)>, RegistryError> {
        let mut state = self.state.lock().await;
        let room = state
            .rooms
            .get_mut(room_id.as_str())
            .ok_or(RegistryError::RoomNotFound)?;
        Ok(room
            .apply_move(connection_id, cell)
            .map(|info| (info, room.clone())))
    }

    async fn restart_game(
        &self,
        room_id: &RoomId,
    ) -> Result<(RestartInfo, Room), RegistryError> {
        let mut state = self.state.lock().await;
        let room = state
            .rooms
            .get_mut(room_id.as_str())
            .ok_or(RegistryError::RoomNotFound)?;
        let info = room.restart()?;
        Ok((info, room.clone()))
    }

    async fn mark_match_started(&self, room_id: &RoomId) -> Result<Room, RegistryError> {
        let mut state = self.state.lock().await;
        let room = state
            .rooms
            .get_mut(room_id.as_str())
            .ok_or(RegistryError::RoomNotFound)?;
        room.mark_match_started(self.now());
        Ok(room.clone())
    }

    async fn mark_disconnected(
        &self,
        connection_id: &ConnectionId,
    ) -> Option<(Disconnection, Room)> {
        let now = self.now();
        let mut state = self.state.lock().await;
        for room in state.rooms.values_mut() {
            if let Some(disconnection) = room.mark_disconnected(connection_id, now) {
                return Some((disconnection, room.clone()));
            }
        }
        None
    }

    async fn enqueue_seeker(
        &self,
        connection_id: ConnectionId,
        name: PlayerName,
    ) -> EnqueueOutcome {
        let mut state = self.state.lock().await;
        if state
            .queue
            .iter()
            .any(|ticket| ticket.connection_id == connection_id)
        {
            tracing::info!("Player {} is already in the matchmaking queue", name);
            return EnqueueOutcome::AlreadyQueued;
        }
        state.queue.push_back(MatchTicket {
            connection_id,
            player_name: name.clone(),
            joined_at: self.now(),
        });
        tracing::info!(
            "Added {} to the matchmaking queue (length {})",
            name,
            state.queue.len()
        );

        if state.queue.len() < 2 {
            return EnqueueOutcome::Waiting;
        }

        // pair the two oldest entries; still inside the same lock hold,
        // so no third join can race the pairing
        let first = state.queue.pop_front().expect("queue holds two tickets");
        let second = state.queue.pop_front().expect("queue holds two tickets");
        let id = Self::fresh_room_id(&state.rooms);
        let room = Room::new_random_match(id.clone(), first, second, self.now());
        state.rooms.insert(id.as_str().to_string(), room.clone());
        tracing::info!(
            "Matched {} and {} in room {}",
            room.players[0].name,
            room.players[1].name,
            id
        );
        EnqueueOutcome::Paired { room }
    }

    async fn dequeue_seeker(&self, connection_id: &ConnectionId) -> bool {
        let mut state = self.state.lock().await;
        let before = state.queue.len();
        state
            .queue
            .retain(|ticket| ticket.connection_id != *connection_id);
        state.queue.len() < before
    }

    async fn cancel_random_match(
        &self,
        connection_id: &ConnectionId,
    ) -> Option<(Room, PlayerName)> {
        let mut state = self.state.lock().await;
        let room_key = state
            .rooms
            .values()
            .find(|room| {
                room.is_random_match
                    && room.game_started_at.is_none()
                    && room.holds_connection(connection_id)
            })
            .map(|room| room.id.as_str().to_string())?;
        let room = state.rooms.remove(&room_key)?;
        let cancelled_by = room
            .player_by_connection(connection_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| {
                PlayerName::new("A player".to_string()).expect("literal name is valid")
            });
        tracing::info!(
            "Room {} deleted after random match cancellation by {}",
            room.id,
            cancelled_by
        );
        Some((room, cancelled_by))
    }
}
