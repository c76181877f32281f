//! Use cases: one per inbound client operation.
//!
//! Each use case orchestrates the registry and the deletion scheduler
//! and returns post-state snapshots; serializing and delivering the
//! resulting events stays in the UI layer.

pub mod chat;
pub mod check_room;
pub mod create_room;
pub mod disconnect;
pub mod error;
pub mod join_room;
pub mod join_waiting_room;
pub mod leave_waiting_room;
pub mod list_rooms;
pub mod make_move;
pub mod matchmaking;
pub mod reconnect;
pub mod restart_game;
pub mod start_game;

pub use chat::ChatUseCase;
pub use check_room::{CheckRoomUseCase, RoomStatusReport};
pub use create_room::CreateRoomUseCase;
pub use disconnect::DisconnectUseCase;
pub use error::{
    ChatError, JoinRoomError, JoinWaitingRoomError, LeaveWaitingRoomError, MakeMoveError,
    MatchStartError, ReconnectError, RestartGameError, StartGameError,
};
pub use join_room::JoinRoomUseCase;
pub use join_waiting_room::JoinWaitingRoomUseCase;
pub use leave_waiting_room::LeaveWaitingRoomUseCase;
pub use list_rooms::ListRoomsUseCase;
pub use make_move::MakeMoveUseCase;
pub use matchmaking::MatchmakingUseCase;
pub use reconnect::ReconnectUseCase;
pub use restart_game::RestartGameUseCase;
pub use start_game::StartGameUseCase;
