//! The WebSocket event protocol.
//!
//! Every frame is a JSON object `{"event": <name>, "data": <payload>}`.
//! Event and field names are camelCase; board cells travel as `""`,
//! `"X"` or `"O"`, a spectator's symbol as `"spectator"`.

use sanmoku_shared::board::Symbol;
use serde::{Deserialize, Serialize};

/// One chat message as shown to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessageDto {
    pub sender: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    pub timestamp: i64,
}

/// One entry of the waiting-room participant list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub id: String,
    pub name: String,
    /// `"X"`, `"O"` or `"spectator"`.
    pub symbol: String,
    pub connected: bool,
    pub is_spectator: bool,
    pub is_host: bool,
}

/// A seated player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDto {
    pub id: String,
    pub name: String,
    pub symbol: Symbol,
    pub connected: bool,
    pub is_host: bool,
}

/// Name/symbol pair used by `randomMatchFound`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSeatDto {
    pub name: String,
    pub symbol: Symbol,
}

/// Player line of a `roomStatus` reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatusDto {
    pub name: String,
    pub symbol: Symbol,
    pub connected: bool,
}

/// Win counters keyed by symbol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoresDto {
    #[serde(rename = "X")]
    pub x: u32,
    #[serde(rename = "O")]
    pub o: u32,
}

/// `roomJoined` payload. The reconnect path fills in the full game
/// state; plain joins only carry the seat assignment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomJoinedDto {
    pub room_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_symbol: Option<Symbol>,
    pub is_spectator: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_host: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waiting_room: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_state: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_player: Option<Symbol>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub players: Option<Vec<PlayerDto>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<ScoresDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<ParticipantDto>>,
}

/// `gameOver` payload: either a winner with its line or a draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOverDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Symbol>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winning_combination: Option<[usize; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draw: Option<bool>,
    pub scores: ScoresDto,
}

/// Client -> server events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    #[serde(rename = "createRoom", rename_all = "camelCase")]
    CreateRoom { player_name: String },
    #[serde(rename = "joinWaitingRoom", rename_all = "camelCase")]
    JoinWaitingRoom { room_id: String, player_name: String },
    #[serde(rename = "leaveWaitingRoom", rename_all = "camelCase")]
    LeaveWaitingRoom { room_id: String, player_name: String },
    #[serde(rename = "waitingRoomMessage", rename_all = "camelCase")]
    WaitingRoomMessage {
        room_id: String,
        sender: String,
        message: String,
        symbol: Option<String>,
    },
    #[serde(rename = "startGame", rename_all = "camelCase")]
    StartGame { room_id: String, player_name: String },
    #[serde(rename = "joinRoom", rename_all = "camelCase")]
    JoinRoom {
        room_id: String,
        player_name: String,
        as_spectator: Option<bool>,
    },
    #[serde(rename = "checkRoom", rename_all = "camelCase")]
    CheckRoom { room_id: String },
    #[serde(rename = "reconnectToRoom", rename_all = "camelCase")]
    ReconnectToRoom {
        room_id: String,
        player_name: String,
        player_symbol: Option<String>,
    },
    #[serde(rename = "makeMove", rename_all = "camelCase")]
    MakeMove { room_id: String, cell_index: usize },
    #[serde(rename = "restartGame", rename_all = "camelCase")]
    RestartGame { room_id: String },
    #[serde(rename = "chatMessage", rename_all = "camelCase")]
    ChatMessage {
        room_id: String,
        sender: String,
        message: String,
        symbol: Option<String>,
    },
    #[serde(rename = "findRandomMatch", rename_all = "camelCase")]
    FindRandomMatch { player_name: String },
    #[serde(rename = "cancelRandomMatch")]
    CancelRandomMatch,
    #[serde(rename = "randomMatchGameStarted", rename_all = "camelCase")]
    RandomMatchGameStarted { room_id: String },
}

/// Server -> client events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    #[serde(rename = "availableRooms")]
    AvailableRooms { rooms: Vec<String> },
    #[serde(rename = "roomCreated", rename_all = "camelCase")]
    RoomCreated {
        room_id: String,
        player_symbol: Symbol,
        is_host: bool,
        waiting_room: bool,
    },
    #[serde(rename = "waitingRoomJoined", rename_all = "camelCase")]
    WaitingRoomJoined {
        room_id: String,
        player_symbol: String,
        is_host: bool,
        is_spectator: bool,
        participants: Vec<ParticipantDto>,
    },
    #[serde(rename = "participantJoined", rename_all = "camelCase")]
    ParticipantJoined {
        participant: ParticipantDto,
        participants: Vec<ParticipantDto>,
    },
    #[serde(rename = "participantLeft", rename_all = "camelCase")]
    ParticipantLeft {
        participant_name: String,
        participants: Vec<ParticipantDto>,
    },
    #[serde(rename = "participantsUpdate", rename_all = "camelCase")]
    ParticipantsUpdate { participants: Vec<ParticipantDto> },
    #[serde(rename = "waitingRoomMessage")]
    WaitingRoomMessage(ChatMessageDto),
    #[serde(rename = "gameStarting")]
    GameStarting,
    #[serde(rename = "roomJoined")]
    RoomJoined(RoomJoinedDto),
    #[serde(rename = "playerJoined", rename_all = "camelCase")]
    PlayerJoined { player: PlayerDto },
    #[serde(rename = "spectatorJoined", rename_all = "camelCase")]
    SpectatorJoined { spectator: ParticipantDto },
    #[serde(rename = "roomStatus", rename_all = "camelCase")]
    RoomStatus {
        room_id: String,
        exists: bool,
        players: Option<Vec<PlayerStatusDto>>,
        status: Option<String>,
    },
    #[serde(rename = "moveMade", rename_all = "camelCase")]
    MoveMade {
        cell_index: usize,
        symbol: Symbol,
        game_state: Vec<String>,
    },
    #[serde(rename = "gameOver")]
    GameOver(GameOverDto),
    #[serde(rename = "playerTurnChanged", rename_all = "camelCase")]
    PlayerTurnChanged { current_player: Symbol },
    #[serde(rename = "gameRestarted", rename_all = "camelCase")]
    GameRestarted {
        game_state: Vec<String>,
        current_player: Symbol,
    },
    #[serde(rename = "chatMessage")]
    ChatMessage(ChatMessageDto),
    #[serde(rename = "randomMatchFound", rename_all = "camelCase")]
    RandomMatchFound {
        room_id: String,
        player_symbol: Symbol,
        is_host: bool,
        waiting_room: bool,
        opponent_name: String,
        players: Vec<PlayerSeatDto>,
    },
    #[serde(rename = "randomMatchCancelled", rename_all = "camelCase")]
    RandomMatchCancelled {
        message: String,
        cancelled_by: String,
        room_id: String,
        reason: String,
    },
    #[serde(rename = "gameInitialized", rename_all = "camelCase")]
    GameInitialized {
        game_state: Vec<String>,
        current_player: Symbol,
        players: Vec<PlayerDto>,
        game_active: bool,
    },
    #[serde(rename = "playerLeft", rename_all = "camelCase")]
    PlayerLeft { player_name: String, temporary: bool },
    #[serde(rename = "spectatorLeft", rename_all = "camelCase")]
    SpectatorLeft { spectator_name: String },
    #[serde(rename = "error")]
    Error { message: String },
}

impl ServerEvent {
    /// Serializes the event into one wire frame. Infallible for these
    /// plain data shapes.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("server event serializes")
    }
}
