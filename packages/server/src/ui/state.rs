//! Shared application state wired at process start.

use std::sync::Arc;

use crate::domain::MessagePusher;
use crate::usecase::{
    ChatUseCase, CheckRoomUseCase, CreateRoomUseCase, DisconnectUseCase, JoinRoomUseCase,
    JoinWaitingRoomUseCase, LeaveWaitingRoomUseCase, ListRoomsUseCase, MakeMoveUseCase,
    MatchmakingUseCase, ReconnectUseCase, RestartGameUseCase, StartGameUseCase,
};

pub struct AppState {
    pub pusher: Arc<dyn MessagePusher>,
    pub create_room: Arc<CreateRoomUseCase>,
    pub join_waiting_room: Arc<JoinWaitingRoomUseCase>,
    pub leave_waiting_room: Arc<LeaveWaitingRoomUseCase>,
    pub chat: Arc<ChatUseCase>,
    pub start_game: Arc<StartGameUseCase>,
    pub join_room: Arc<JoinRoomUseCase>,
    pub check_room: Arc<CheckRoomUseCase>,
    pub reconnect: Arc<ReconnectUseCase>,
    pub make_move: Arc<MakeMoveUseCase>,
    pub restart_game: Arc<RestartGameUseCase>,
    pub matchmaking: Arc<MatchmakingUseCase>,
    pub disconnect: Arc<DisconnectUseCase>,
    pub list_rooms: Arc<ListRoomsUseCase>,
}
