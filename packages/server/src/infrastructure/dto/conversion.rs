//! Conversion from domain entities to wire DTOs.

use sanmoku_shared::board::Board;

use crate::domain::{ChatEntry, Participant, Player, Scores, Spectator};

use super::websocket::{
    ChatMessageDto, ParticipantDto, PlayerDto, PlayerSeatDto, PlayerStatusDto, ScoresDto,
};

/// Symbol string shown for spectators in participant lists.
pub const SPECTATOR_SYMBOL: &str = "spectator";

impl From<&Participant> for ParticipantDto {
    fn from(participant: &Participant) -> Self {
        Self {
            id: participant.connection_id.as_str().to_string(),
            name: participant.name.as_str().to_string(),
            symbol: participant
                .symbol
                .map(|s| s.as_str().to_string())
                .unwrap_or_else(|| SPECTATOR_SYMBOL.to_string()),
            connected: participant.connected,
            is_spectator: participant.is_spectator,
            is_host: participant.is_host,
        }
    }
}

impl From<&Spectator> for ParticipantDto {
    fn from(spectator: &Spectator) -> Self {
        Self {
            id: spectator.connection_id.as_str().to_string(),
            name: spectator.name.as_str().to_string(),
            symbol: SPECTATOR_SYMBOL.to_string(),
            connected: spectator.connected,
            is_spectator: true,
            is_host: false,
        }
    }
}

impl From<&Player> for PlayerDto {
    fn from(player: &Player) -> Self {
        Self {
            id: player.connection_id.as_str().to_string(),
            name: player.name.as_str().to_string(),
            symbol: player.symbol,
            connected: player.connected,
            is_host: player.is_host,
        }
    }
}

impl From<&Player> for PlayerSeatDto {
    fn from(player: &Player) -> Self {
        Self {
            name: player.name.as_str().to_string(),
            symbol: player.symbol,
        }
    }
}

impl From<&Player> for PlayerStatusDto {
    fn from(player: &Player) -> Self {
        Self {
            name: player.name.as_str().to_string(),
            symbol: player.symbol,
            connected: player.connected,
        }
    }
}

impl From<&Scores> for ScoresDto {
    fn from(scores: &Scores) -> Self {
        Self {
            x: scores.x,
            o: scores.o,
        }
    }
}

impl From<&ChatEntry> for ChatMessageDto {
    fn from(entry: &ChatEntry) -> Self {
        Self {
            sender: entry.sender.clone(),
            message: entry.message.clone(),
            symbol: entry.symbol.clone(),
            timestamp: entry.timestamp.value(),
        }
    }
}

/// Board cells as the wire carries them: `""` for empty, else the mark.
pub fn board_to_cells(board: &Board) -> Vec<String> {
    board
        .cells()
        .iter()
        .map(|cell| match cell {
            Some(symbol) => symbol.as_str().to_string(),
            None => String::new(),
        })
        .collect()
}
