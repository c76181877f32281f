//! Inbound event routing: one handler per [`ClientEvent`] variant.
//!
//! Handlers run the matching use case and turn its outcome into pushes
//! to the requester and broadcasts to the room. A handler that cannot
//! find the named room answers the requester with an `error` event and
//! touches nobody else; illegal moves stay silent.

use std::sync::Arc;

use sanmoku_shared::board::{Symbol, Verdict};

use crate::domain::{
    ConnectionId, Disconnection, DomainError, EnqueueOutcome, GameJoin, PlayerName, Room, RoomId,
    RoomStatus,
};
use crate::domain::entity::ChatChannel;
use crate::infrastructure::dto::conversion::board_to_cells;
use crate::infrastructure::dto::websocket::{
    ChatMessageDto, ClientEvent, GameOverDto, ParticipantDto, PlayerDto, PlayerSeatDto,
    PlayerStatusDto, RoomJoinedDto, ScoresDto, ServerEvent,
};

use super::super::state::AppState;

pub async fn dispatch(state: &Arc<AppState>, connection_id: &ConnectionId, event: ClientEvent) {
    if let Err(message) = route(state, connection_id, event).await {
        reply(
            state,
            connection_id,
            &ServerEvent::Error { message },
        )
        .await;
    }
}

/// `Err(message)` becomes an `error` event to the requester only.
async fn route(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    event: ClientEvent,
) -> Result<(), String> {
    match event {
        ClientEvent::CreateRoom { player_name } => {
            on_create_room(state, connection_id, player_name).await
        }
        ClientEvent::JoinWaitingRoom {
            room_id,
            player_name,
        } => on_join_waiting_room(state, connection_id, room_id, player_name).await,
        ClientEvent::LeaveWaitingRoom {
            room_id,
            player_name,
        } => on_leave_waiting_room(state, connection_id, room_id, player_name).await,
        ClientEvent::WaitingRoomMessage {
            room_id,
            sender,
            message,
            symbol,
        } => {
            on_chat(
                state,
                ChatChannel::WaitingRoom,
                room_id,
                sender,
                message,
                symbol,
            )
            .await
        }
        ClientEvent::StartGame {
            room_id,
            player_name,
        } => on_start_game(state, connection_id, room_id, player_name).await,
        ClientEvent::JoinRoom {
            room_id,
            player_name,
            as_spectator,
        } => {
            on_join_room(
                state,
                connection_id,
                room_id,
                player_name,
                as_spectator.unwrap_or(false),
            )
            .await
        }
        ClientEvent::CheckRoom { room_id } => on_check_room(state, connection_id, room_id).await,
        ClientEvent::ReconnectToRoom {
            room_id,
            player_name,
            player_symbol,
        } => on_reconnect(state, connection_id, room_id, player_name, player_symbol).await,
        ClientEvent::MakeMove {
            room_id,
            cell_index,
        } => on_make_move(state, connection_id, room_id, cell_index).await,
        ClientEvent::RestartGame { room_id } => on_restart_game(state, room_id).await,
        ClientEvent::ChatMessage {
            room_id,
            sender,
            message,
            symbol,
        } => on_chat(state, ChatChannel::Game, room_id, sender, message, symbol).await,
        ClientEvent::FindRandomMatch { player_name } => {
            on_find_random_match(state, connection_id, player_name).await
        }
        ClientEvent::CancelRandomMatch => on_cancel_random_match(state, connection_id).await,
        ClientEvent::RandomMatchGameStarted { room_id } => {
            on_random_match_game_started(state, room_id).await
        }
    }
}

// ---- helpers ----------------------------------------------------------

async fn reply(state: &Arc<AppState>, connection_id: &ConnectionId, event: &ServerEvent) {
    if let Err(e) = state.pusher.push_to(connection_id, &event.to_json()).await {
        tracing::warn!("Failed to reply to '{}': {}", connection_id, e);
    }
}

/// Room members reachable right now, minus the requester.
fn targets_except(room: &Room, connection_id: &ConnectionId) -> Vec<ConnectionId> {
    room.connected_targets()
        .into_iter()
        .filter(|target| target != connection_id)
        .collect()
}

fn participant_dtos(room: &Room) -> Vec<ParticipantDto> {
    room.participants().iter().map(ParticipantDto::from).collect()
}

async fn broadcast_room_list(state: &Arc<AppState>) {
    let rooms = state.list_rooms.room_id_strings().await;
    state
        .pusher
        .broadcast_all(&ServerEvent::AvailableRooms { rooms }.to_json())
        .await;
}

fn parse_room_id(raw: String) -> Result<RoomId, String> {
    RoomId::new(raw).map_err(|e: DomainError| e.to_string())
}

fn parse_name(raw: String) -> Result<PlayerName, String> {
    PlayerName::new(raw).map_err(|e| e.to_string())
}

// ---- handlers ---------------------------------------------------------

async fn on_create_room(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    player_name: String,
) -> Result<(), String> {
    let name = parse_name(player_name)?;
    let room = state.create_room.execute(connection_id.clone(), name).await;
    reply(
        state,
        connection_id,
        &ServerEvent::RoomCreated {
            room_id: room.id.as_str().to_string(),
            player_symbol: Symbol::X,
            is_host: true,
            waiting_room: true,
        },
    )
    .await;
    broadcast_room_list(state).await;
    Ok(())
}

async fn on_join_waiting_room(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    room_id: String,
    player_name: String,
) -> Result<(), String> {
    let room_id = parse_room_id(room_id)?;
    let name = parse_name(player_name)?;
    let (join, room) = state
        .join_waiting_room
        .execute(&room_id, connection_id.clone(), name)
        .await
        .map_err(|e| e.to_string())?;

    let participants = participant_dtos(&room);
    let participant = ParticipantDto::from(join.participant());
    reply(
        state,
        connection_id,
        &ServerEvent::WaitingRoomJoined {
            room_id: room.id.as_str().to_string(),
            player_symbol: participant.symbol.clone(),
            is_host: participant.is_host,
            is_spectator: participant.is_spectator,
            participants: participants.clone(),
        },
    )
    .await;

    if join.is_new() {
        state
            .pusher
            .broadcast(
                targets_except(&room, connection_id),
                &ServerEvent::ParticipantJoined {
                    participant,
                    participants,
                }
                .to_json(),
            )
            .await;
    }

    // replay the lobby chat so a late joiner sees the conversation
    for entry in &room.waiting_room_messages {
        reply(
            state,
            connection_id,
            &ServerEvent::WaitingRoomMessage(ChatMessageDto::from(entry)),
        )
        .await;
    }
    Ok(())
}

async fn on_leave_waiting_room(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    room_id: String,
    player_name: String,
) -> Result<(), String> {
    let room_id = parse_room_id(room_id)?;
    let name = parse_name(player_name)?;
    let outcome = state
        .leave_waiting_room
        .execute(&room_id, &name)
        .await
        .map_err(|e| e.to_string())?;

    // an unknown name left nothing to announce
    let Some((info, room)) = outcome else {
        return Ok(());
    };

    state
        .pusher
        .broadcast(
            targets_except(&room, connection_id),
            &ServerEvent::ParticipantLeft {
                participant_name: info.participant_name.as_str().to_string(),
                participants: participant_dtos(&room),
            }
            .to_json(),
        )
        .await;

    if info.now_empty {
        broadcast_room_list(state).await;
    }
    Ok(())
}

async fn on_chat(
    state: &Arc<AppState>,
    channel: ChatChannel,
    room_id: String,
    sender: String,
    message: String,
    symbol: Option<String>,
) -> Result<(), String> {
    let room_id = parse_room_id(room_id)?;
    let (entry, room) = state
        .chat
        .execute(&room_id, channel, sender, message, symbol)
        .await
        .map_err(|e| e.to_string())?;

    let dto = ChatMessageDto::from(&entry);
    let event = match channel {
        ChatChannel::WaitingRoom => ServerEvent::WaitingRoomMessage(dto),
        ChatChannel::Game => ServerEvent::ChatMessage(dto),
    };
    // the sender is a room member, so it gets its own message back
    state
        .pusher
        .broadcast(room.connected_targets(), &event.to_json())
        .await;
    Ok(())
}

async fn on_start_game(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    room_id: String,
    player_name: String,
) -> Result<(), String> {
    let room_id = parse_room_id(room_id)?;
    let name = parse_name(player_name)?;
    let room = state
        .start_game
        .execute(&room_id, connection_id, &name)
        .await
        .map_err(|e| e.to_string())?;

    state
        .pusher
        .broadcast(room.connected_targets(), &ServerEvent::GameStarting.to_json())
        .await;
    Ok(())
}

async fn on_join_room(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    room_id: String,
    player_name: String,
    as_spectator: bool,
) -> Result<(), String> {
    let room_id = parse_room_id(room_id)?;
    let name = parse_name(player_name)?;
    let (join, room) = state
        .join_room
        .execute(&room_id, connection_id.clone(), name, as_spectator)
        .await
        .map_err(|e| e.to_string())?;

    let waiting_room = room.status == RoomStatus::Waiting;
    match join {
        GameJoin::SpectatorSeat {
            spectator,
            room_was_full,
        } => {
            if room_was_full {
                reply(
                    state,
                    connection_id,
                    &ServerEvent::Error {
                        message: "Room is full! Joining as spectator.".to_string(),
                    },
                )
                .await;
            }
            reply(
                state,
                connection_id,
                &ServerEvent::RoomJoined(RoomJoinedDto {
                    room_id: room.id.as_str().to_string(),
                    is_spectator: true,
                    waiting_room: Some(waiting_room),
                    ..Default::default()
                }),
            )
            .await;
            state
                .pusher
                .broadcast(
                    targets_except(&room, connection_id),
                    &ServerEvent::SpectatorJoined {
                        spectator: ParticipantDto::from(&spectator),
                    }
                    .to_json(),
                )
                .await;
        }
        GameJoin::Reconnected { player } => {
            reply(
                state,
                connection_id,
                &ServerEvent::RoomJoined(RoomJoinedDto {
                    room_id: room.id.as_str().to_string(),
                    player_symbol: Some(player.symbol),
                    is_spectator: false,
                    is_host: Some(player.is_host),
                    waiting_room: Some(waiting_room),
                    ..Default::default()
                }),
            )
            .await;
            let others = targets_except(&room, connection_id);
            state
                .pusher
                .broadcast(
                    others,
                    &ServerEvent::PlayerJoined {
                        player: PlayerDto::from(&player),
                    }
                    .to_json(),
                )
                .await;
            state
                .pusher
                .broadcast(
                    room.connected_targets(),
                    &ServerEvent::ParticipantsUpdate {
                        participants: participant_dtos(&room),
                    }
                    .to_json(),
                )
                .await;
        }
        GameJoin::Seated { player } => {
            reply(
                state,
                connection_id,
                &ServerEvent::RoomJoined(RoomJoinedDto {
                    room_id: room.id.as_str().to_string(),
                    player_symbol: Some(player.symbol),
                    is_spectator: false,
                    is_host: Some(player.is_host),
                    waiting_room: Some(waiting_room),
                    ..Default::default()
                }),
            )
            .await;
            state
                .pusher
                .broadcast(
                    targets_except(&room, connection_id),
                    &ServerEvent::PlayerJoined {
                        player: PlayerDto::from(&player),
                    }
                    .to_json(),
                )
                .await;
        }
    }
    Ok(())
}

async fn on_check_room(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    room_id: String,
) -> Result<(), String> {
    // a malformed id is an ordinary "does not exist" answer
    let Ok(parsed) = RoomId::new(room_id.clone()) else {
        reply(
            state,
            connection_id,
            &ServerEvent::RoomStatus {
                room_id,
                exists: false,
                players: None,
                status: None,
            },
        )
        .await;
        return Ok(());
    };

    let report = state.check_room.execute(&parsed).await;
    reply(
        state,
        connection_id,
        &ServerEvent::RoomStatus {
            room_id,
            exists: report.exists,
            players: report
                .players
                .map(|players| players.iter().map(PlayerStatusDto::from).collect()),
            status: report.status.map(|s| s.as_str().to_string()),
        },
    )
    .await;
    Ok(())
}

async fn on_reconnect(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    room_id: String,
    player_name: String,
    player_symbol: Option<String>,
) -> Result<(), String> {
    let room_id = parse_room_id(room_id)?;
    let name = parse_name(player_name)?;
    let symbol = player_symbol.and_then(|raw| raw.parse::<Symbol>().ok());
    let (player, room) = state
        .reconnect
        .execute(&room_id, connection_id.clone(), name, symbol)
        .await
        .map_err(|e| e.to_string())?;

    let participants = participant_dtos(&room);
    reply(
        state,
        connection_id,
        &ServerEvent::RoomJoined(RoomJoinedDto {
            room_id: room.id.as_str().to_string(),
            player_symbol: Some(player.symbol),
            is_spectator: false,
            is_host: Some(player.is_host),
            game_state: Some(board_to_cells(&room.board)),
            current_player: Some(room.current_player),
            players: Some(room.players.iter().map(PlayerDto::from).collect()),
            scores: Some(ScoresDto::from(&room.scores)),
            participants: Some(participants.clone()),
            ..Default::default()
        }),
    )
    .await;

    state
        .pusher
        .broadcast(
            targets_except(&room, connection_id),
            &ServerEvent::PlayerJoined {
                player: PlayerDto::from(&player),
            }
            .to_json(),
        )
        .await;
    state
        .pusher
        .broadcast(
            room.connected_targets(),
            &ServerEvent::ParticipantsUpdate { participants }.to_json(),
        )
        .await;
    Ok(())
}

async fn on_make_move(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    room_id: String,
    cell_index: usize,
) -> Result<(), String> {
    let room_id = parse_room_id(room_id)?;
    let outcome = state
        .make_move
        .execute(&room_id, connection_id, cell_index)
        .await
        .map_err(|e| e.to_string())?;

    // an illegal move mutates nothing and is not reported
    let Some((info, room)) = outcome else {
        return Ok(());
    };

    let targets = room.connected_targets();
    state
        .pusher
        .broadcast(
            targets.clone(),
            &ServerEvent::MoveMade {
                cell_index: info.cell,
                symbol: info.symbol,
                game_state: board_to_cells(&info.board),
            }
            .to_json(),
        )
        .await;

    let follow_up = match info.verdict {
        Verdict::Win { winner, line } => ServerEvent::GameOver(GameOverDto {
            winner: Some(winner),
            winning_combination: Some(line),
            draw: None,
            scores: ScoresDto::from(&info.scores),
        }),
        Verdict::Draw => ServerEvent::GameOver(GameOverDto {
            winner: None,
            winning_combination: None,
            draw: Some(true),
            scores: ScoresDto::from(&info.scores),
        }),
        Verdict::InProgress => ServerEvent::PlayerTurnChanged {
            current_player: info.current_player,
        },
    };
    state.pusher.broadcast(targets, &follow_up.to_json()).await;
    Ok(())
}

async fn on_restart_game(state: &Arc<AppState>, room_id: String) -> Result<(), String> {
    let room_id = parse_room_id(room_id)?;
    let (info, room) = state
        .restart_game
        .execute(&room_id)
        .await
        .map_err(|e| e.to_string())?;

    state
        .pusher
        .broadcast(
            room.connected_targets(),
            &ServerEvent::GameRestarted {
                game_state: board_to_cells(&info.board),
                current_player: info.current_player,
            }
            .to_json(),
        )
        .await;
    Ok(())
}

async fn on_find_random_match(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    player_name: String,
) -> Result<(), String> {
    let name = parse_name(player_name)?;
    match state.matchmaking.find(connection_id.clone(), name).await {
        EnqueueOutcome::AlreadyQueued | EnqueueOutcome::Waiting => {}
        EnqueueOutcome::Paired { room } => {
            let seats: Vec<PlayerSeatDto> = room.players.iter().map(PlayerSeatDto::from).collect();
            for (index, player) in room.players.iter().enumerate() {
                let opponent = &room.players[1 - index];
                let found = ServerEvent::RandomMatchFound {
                    room_id: room.id.as_str().to_string(),
                    player_symbol: player.symbol,
                    is_host: player.is_host,
                    waiting_room: false,
                    opponent_name: opponent.name.as_str().to_string(),
                    players: seats.clone(),
                };
                if let Err(e) = state
                    .pusher
                    .push_to(&player.connection_id, &found.to_json())
                    .await
                {
                    tracing::warn!(
                        "Failed to notify '{}' about the match: {}",
                        player.connection_id,
                        e
                    );
                }
            }
            broadcast_room_list(state).await;
        }
    }
    Ok(())
}

async fn on_cancel_random_match(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
) -> Result<(), String> {
    let outcome = state.matchmaking.cancel(connection_id).await;
    if let Some((room, cancelled_by)) = outcome.cancelled_room {
        // everyone in the room hears it, the canceller included
        state
            .pusher
            .broadcast(
                room.connected_targets(),
                &ServerEvent::RandomMatchCancelled {
                    message: format!("{cancelled_by} cancelled the match"),
                    cancelled_by: cancelled_by.as_str().to_string(),
                    room_id: room.id.as_str().to_string(),
                    reason: "cancelled".to_string(),
                }
                .to_json(),
            )
            .await;
        broadcast_room_list(state).await;
    }
    Ok(())
}

async fn on_random_match_game_started(
    state: &Arc<AppState>,
    room_id: String,
) -> Result<(), String> {
    let room_id = parse_room_id(room_id)?;
    let room = state
        .matchmaking
        .mark_started(&room_id)
        .await
        .map_err(|e| e.to_string())?;

    state
        .pusher
        .broadcast(
            room.connected_targets(),
            &ServerEvent::GameInitialized {
                game_state: board_to_cells(&room.board),
                current_player: Symbol::X,
                players: room.players.iter().map(PlayerDto::from).collect(),
                game_active: true,
            }
            .to_json(),
        )
        .await;
    Ok(())
}

/// Connection-level disconnect (not a client event). Updates the room,
/// announces the departure, and re-broadcasts the room list.
pub async fn handle_disconnect(state: &Arc<AppState>, connection_id: &ConnectionId) {
    if let Some((disconnection, room)) = state.disconnect.execute(connection_id).await {
        let targets = targets_except(&room, connection_id);
        let event = match (&disconnection, room.status) {
            (Disconnection::Player { player, .. }, RoomStatus::Waiting) => {
                ServerEvent::ParticipantLeft {
                    participant_name: player.name.as_str().to_string(),
                    participants: participant_dtos(&room),
                }
            }
            (Disconnection::Player { player, .. }, RoomStatus::Playing) => {
                ServerEvent::PlayerLeft {
                    player_name: player.name.as_str().to_string(),
                    temporary: true,
                }
            }
            (Disconnection::Spectator { spectator }, RoomStatus::Waiting) => {
                ServerEvent::ParticipantLeft {
                    participant_name: spectator.name.as_str().to_string(),
                    participants: participant_dtos(&room),
                }
            }
            (Disconnection::Spectator { spectator }, RoomStatus::Playing) => {
                ServerEvent::SpectatorLeft {
                    spectator_name: spectator.name.as_str().to_string(),
                }
            }
        };
        state.pusher.broadcast(targets, &event.to_json()).await;
    }
    broadcast_room_list(state).await;
}
