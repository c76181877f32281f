//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::Room;
use sanmoku_shared::time::timestamp_to_rfc3339;

use super::websocket::{PlayerStatusDto, ScoresDto};

/// One line of the room list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub id: String,
    pub player_count: usize,
    pub spectator_count: usize,
    pub active: bool,
    pub status: String,
}

impl From<&Room> for RoomSummaryDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            player_count: room.players.len(),
            spectator_count: room.spectators.len(),
            active: room.game_active,
            status: room.status.as_str().to_string(),
        }
    }
}

/// Full detail of one room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailDto {
    pub id: String,
    pub status: String,
    pub players: Vec<PlayerStatusDto>,
    pub spectator_count: usize,
    pub scores: ScoresDto,
    pub is_random_match: bool,
    pub created_at: String,
}

impl From<&Room> for RoomDetailDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            status: room.status.as_str().to_string(),
            players: room.players.iter().map(PlayerStatusDto::from).collect(),
            spectator_count: room.spectators.len(),
            scores: ScoresDto::from(&room.scores),
            is_random_match: room.is_random_match,
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}
