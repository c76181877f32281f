//! Per-use-case error types.
//!
//! The `#[error]` strings are the exact messages sent to the requester
//! in the `error` event, which is why some of them carry punctuation.

use thiserror::Error;

use crate::domain::RegistryError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JoinWaitingRoomError {
    #[error("Room not found!")]
    RoomNotFound,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LeaveWaitingRoomError {
    #[error("Room not found!")]
    RoomNotFound,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("Room not found")]
    RoomNotFound,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StartGameError {
    #[error("Room not found")]
    RoomNotFound,
    #[error("Need at least 2 players to start the game")]
    NotEnoughPlayers,
    #[error("Player not found in room")]
    PlayerNotFound,
    #[error("Only the host can start the game")]
    NotHost,
}

impl From<RegistryError> for StartGameError {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::NotEnoughPlayers => StartGameError::NotEnoughPlayers,
            RegistryError::PlayerNotFound => StartGameError::PlayerNotFound,
            RegistryError::NotHost => StartGameError::NotHost,
            _ => StartGameError::RoomNotFound,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JoinRoomError {
    #[error("Room does not exist!")]
    RoomNotFound,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReconnectError {
    #[error("Room does not exist anymore!")]
    RoomNotFound,
    #[error("This player position is already taken!")]
    PositionTaken,
    #[error("Room is full!")]
    RoomFull,
    #[error("{0}")]
    SymbolMismatch(String),
}

impl From<RegistryError> for ReconnectError {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::PositionTaken => ReconnectError::PositionTaken,
            RegistryError::RoomFull => ReconnectError::RoomFull,
            RegistryError::SymbolMismatch { .. } => {
                ReconnectError::SymbolMismatch(error.to_string())
            }
            _ => ReconnectError::RoomNotFound,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MakeMoveError {
    #[error("Room not found")]
    RoomNotFound,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RestartGameError {
    #[error("Room not found")]
    RoomNotFound,
    #[error("Cannot restart game - waiting for opponent")]
    NotEnoughConnected,
}

impl From<RegistryError> for RestartGameError {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::NotEnoughConnected => RestartGameError::NotEnoughConnected,
            _ => RestartGameError::RoomNotFound,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchStartError {
    #[error("Room not found")]
    RoomNotFound,
}
