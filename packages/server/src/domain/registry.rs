//! Room registry and deletion-scheduler seams.
//!
//! The registry is the sole owner of room and matchmaking state. Every
//! method is one atomic event-processing step: implementations hold one
//! lock across the whole transition, so callers never observe a
//! half-paired queue or a partially updated room.

use async_trait::async_trait;
use sanmoku_shared::board::Symbol;

use super::entity::{ChatChannel, ChatEntry, Player};
use super::error::RegistryError;
use super::room::{
    Disconnection, GameJoin, LeaveInfo, MoveInfo, RestartInfo, Room, WaitingJoin,
};
use super::value_object::{ConnectionId, PlayerName, RoomId};

/// Outcome of a matchmaking request.
#[derive(Debug, Clone)]
pub enum EnqueueOutcome {
    /// The connection is already waiting; nothing changed.
    AlreadyQueued,
    /// Queued; no opponent available yet.
    Waiting,
    /// Paired with the oldest waiting entry into a fresh playing room.
    /// `players[0]` is the older ticket (host, 'X').
    Paired { room: Room },
}

/// Outcome of a matchmaking cancellation.
#[derive(Debug, Clone)]
pub struct CancelOutcome {
    /// Whether a queue entry was removed.
    pub dequeued: bool,
    /// The unstarted random-match room that was deleted, with the name
    /// of the player who cancelled. Snapshot taken before deletion.
    pub cancelled_room: Option<(Room, PlayerName)>,
}

#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// Creates a lobby room with the creator seated as host at 'X'. The
    /// fresh id is collision-checked against live rooms.
    async fn create_room(&self, creator: ConnectionId, creator_name: PlayerName) -> Room;

    /// Snapshot of one room.
    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RegistryError>;

    /// Snapshot of all rooms.
    async fn rooms(&self) -> Vec<Room>;

    /// Ids of all live rooms.
    async fn room_ids(&self) -> Vec<RoomId>;

    /// Removes a room. Returns whether it existed; deleting a room that
    /// is already gone is a no-op, not a fault.
    async fn delete_room(&self, room_id: &RoomId) -> bool;

    /// The room currently holding this connection, if any.
    async fn find_room_of_connection(&self, connection_id: &ConnectionId) -> Option<RoomId>;

    async fn join_waiting_room(
        &self,
        room_id: &RoomId,
        connection_id: ConnectionId,
        name: PlayerName,
    ) -> Result<(WaitingJoin, Room), RegistryError>;

    /// Explicit waiting-room leave. `Ok(None)` when the name is not in
    /// the room. Deletes the room when it ends up empty.
    async fn leave_waiting_room(
        &self,
        room_id: &RoomId,
        name: &PlayerName,
    ) -> Result<Option<(LeaveInfo, Room)>, RegistryError>;

    /// Appends a chat message, stamped with the registry clock, to the
    /// given channel (bounded history).
    async fn append_chat(
        &self,
        room_id: &RoomId,
        channel: ChatChannel,
        sender: String,
        message: String,
        symbol: Option<String>,
    ) -> Result<(ChatEntry, Room), RegistryError>;

    /// Host-gated game start.
    async fn start_game(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
        name: &PlayerName,
    ) -> Result<Room, RegistryError>;

    async fn join_room(
        &self,
        room_id: &RoomId,
        connection_id: ConnectionId,
        name: PlayerName,
        as_spectator: bool,
    ) -> Result<(GameJoin, Room), RegistryError>;

    async fn reconnect(
        &self,
        room_id: &RoomId,
        connection_id: ConnectionId,
        name: PlayerName,
        symbol: Option<Symbol>,
    ) -> Result<(Player, Room), RegistryError>;

    /// Applies a move. `Ok(None)` when the move is illegal (silently
    /// ignored by the gateway).
    async fn apply_move(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
        cell: usize,
    ) -> Result<Option<(MoveInfo, Room)>, RegistryError>;

    async fn restart_game(
        &self,
        room_id: &RoomId,
    ) -> Result<(RestartInfo, Room), RegistryError>;

    /// Marks a matchmade game as underway (`gameInitialized` flow).
    async fn mark_match_started(&self, room_id: &RoomId) -> Result<Room, RegistryError>;

    /// Connection-loss bookkeeping for whatever room holds the
    /// connection.
    async fn mark_disconnected(
        &self,
        connection_id: &ConnectionId,
    ) -> Option<(Disconnection, Room)>;

    /// Adds a matchmaking ticket; pairs the two oldest entries
    /// atomically once the queue holds two. Idempotent per connection.
    async fn enqueue_seeker(
        &self,
        connection_id: ConnectionId,
        name: PlayerName,
    ) -> EnqueueOutcome;

    /// Removes this connection's matchmaking ticket, if any.
    async fn dequeue_seeker(&self, connection_id: &ConnectionId) -> bool;

    /// Deletes the unstarted random-match room holding this connection,
    /// if any, returning its pre-deletion snapshot.
    async fn cancel_random_match(
        &self,
        connection_id: &ConnectionId,
    ) -> Option<(Room, PlayerName)>;
}

/// Deferred-deletion seam for rooms whose players all disconnected.
///
/// Scheduling is reuse-if-present: a second schedule for the same room
/// while a timer is pending must not reset the clock. A timer firing
/// after the room was already deleted by another path is a no-op.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeletionScheduler: Send + Sync {
    async fn schedule(&self, room_id: RoomId);
    async fn cancel(&self, room_id: &RoomId);
}
