//! Error types of the domain layer.

use sanmoku_shared::board::Symbol;
use thiserror::Error;

/// Validation failures when constructing value objects.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("player name must be 1 to 32 characters")]
    InvalidPlayerName,
    #[error("room id must not be empty")]
    InvalidRoomId,
}

/// Failures reported by [`super::RoomRegistry`] operations.
///
/// Rejections of room transitions live here too: the registry is the
/// single entry point for mutations, so its callers see one error type
/// per operation family instead of nested results.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("room not found")]
    RoomNotFound,
    #[error("need at least 2 players to start the game")]
    NotEnoughPlayers,
    #[error("player not found in room")]
    PlayerNotFound,
    #[error("only the host can start the game")]
    NotHost,
    #[error("this player position is already taken")]
    PositionTaken,
    #[error("room is full")]
    RoomFull,
    #[error("{name} is already seated as {seated}; reconnect with that symbol")]
    SymbolMismatch { name: String, seated: Symbol },
    #[error("cannot restart game - waiting for opponent")]
    NotEnoughConnected,
}

/// Failures when pushing messages to clients.
#[derive(Debug, Error)]
pub enum MessagePushError {
    #[error("connection '{0}' not found")]
    ConnectionNotFound(String),
    #[error("failed to push message: {0}")]
    PushFailed(String),
}
