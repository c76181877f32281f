//! Online session against the sanmoku server.
//!
//! One task pair plus a blocking readline thread: the read task renders
//! server events and keeps the session view current, the command task
//! turns typed commands into client events, and a writer task owns the
//! WebSocket sink.

use std::sync::{Arc, Mutex};

use futures_util::{SinkExt, StreamExt};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use sanmoku_server::infrastructure::dto::websocket::{ClientEvent, ServerEvent};
use sanmoku_shared::board::Symbol;

use crate::error::ClientError;
use crate::render::{render_participants, render_wire_board};

/// What the client knows about its own seat.
#[derive(Default)]
struct SessionView {
    room_id: Option<String>,
    symbol: Option<Symbol>,
    is_host: bool,
    in_lobby: bool,
}

const HELP: &str = "commands:
  /create            create a room (you become host)
  /lobby <room>      join a waiting room
  /leave             leave the waiting room
  /start             start the game (host only)
  /join <room>       join a game room
  /watch <room>      spectate a game room
  /check <room>      probe a room
  /reconnect <room> <X|O>   reconnect into a seat
  /random            find a random match
  /cancel            cancel the random match search
  /move <0-8>        place your mark (a bare digit works too)
  /restart           restart the finished game
  /quit              leave
anything else is sent as chat";

pub async fn run_online(url: &str, name: &str) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::Connection(e.to_string()))?;
    tracing::info!("Connected to {}", url);
    println!("You are '{name}'.\n{HELP}\n");

    let (mut write, mut read) = ws_stream.split();
    let view = Arc::new(Mutex::new(SessionView::default()));

    // all outbound frames funnel through one channel into the sink
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<String>();
    let mut write_task = tokio::spawn(async move {
        while let Some(frame) = out_rx.recv().await {
            if write.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    let view_for_read = Arc::clone(&view);
    let out_for_read = out_tx.clone();
    let name_for_read = name.to_string();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => match serde_json::from_str::<ServerEvent>(&text) {
                    Ok(event) => {
                        handle_server_event(event, &view_for_read, &out_for_read, &name_for_read)
                    }
                    Err(_) => println!("<- {text}"),
                },
                Ok(Message::Close(_)) | Err(_) => {
                    println!("connection closed by the server");
                    break;
                }
                _ => {}
            }
        }
    });

    // rustyline is synchronous; it gets its own thread
    let (line_tx, mut line_rx) = mpsc::unbounded_channel::<String>();
    let prompt = format!("{name}> ");
    std::thread::spawn(move || {
        let mut editor = match DefaultEditor::new() {
            Ok(editor) => editor,
            Err(e) => {
                eprintln!("failed to initialize readline: {e}");
                return;
            }
        };
        loop {
            match editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if line.is_empty() {
                        continue;
                    }
                    editor.add_history_entry(&line).ok();
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => {
                    eprintln!("readline error: {e}");
                    break;
                }
            }
        }
    });

    let name_for_commands = name.to_string();
    let mut command_task = tokio::spawn(async move {
        while let Some(line) = line_rx.recv().await {
            if line == "/quit" {
                break;
            }
            match parse_command(&line, &view, &name_for_commands) {
                Ok(Some(event)) => {
                    let frame = serde_json::to_string(&event).expect("client event serializes");
                    if out_tx.send(frame).is_err() {
                        break;
                    }
                }
                Ok(None) => {}
                Err(message) => println!("{message}"),
            }
        }
    });

    tokio::select! {
        _ = &mut read_task => {
            write_task.abort();
            command_task.abort();
        }
        _ = &mut command_task => {
            read_task.abort();
            write_task.abort();
        }
        _ = &mut write_task => {
            read_task.abort();
            command_task.abort();
        }
    }

    Ok(())
}

/// Turns one typed line into a client event; `Ok(None)` handled locally.
fn parse_command(
    line: &str,
    view: &Arc<Mutex<SessionView>>,
    name: &str,
) -> Result<Option<ClientEvent>, String> {
    let mut parts = line.splitn(3, ' ');
    let command = parts.next().unwrap_or_default();

    let current_room = || -> Result<String, String> {
        view.lock()
            .expect("session view lock")
            .room_id
            .clone()
            .ok_or_else(|| "you are not in a room".to_string())
    };

    let event = match command {
        "/help" => {
            println!("{HELP}");
            return Ok(None);
        }
        "/create" => ClientEvent::CreateRoom {
            player_name: name.to_string(),
        },
        "/lobby" => ClientEvent::JoinWaitingRoom {
            room_id: required_arg(parts.next(), "/lobby <room>")?,
            player_name: name.to_string(),
        },
        "/leave" => ClientEvent::LeaveWaitingRoom {
            room_id: current_room()?,
            player_name: name.to_string(),
        },
        "/start" => ClientEvent::StartGame {
            room_id: current_room()?,
            player_name: name.to_string(),
        },
        "/join" => ClientEvent::JoinRoom {
            room_id: required_arg(parts.next(), "/join <room>")?,
            player_name: name.to_string(),
            as_spectator: None,
        },
        "/watch" => ClientEvent::JoinRoom {
            room_id: required_arg(parts.next(), "/watch <room>")?,
            player_name: name.to_string(),
            as_spectator: Some(true),
        },
        "/check" => ClientEvent::CheckRoom {
            room_id: required_arg(parts.next(), "/check <room>")?,
        },
        "/reconnect" => ClientEvent::ReconnectToRoom {
            room_id: required_arg(parts.next(), "/reconnect <room> <X|O>")?,
            player_name: name.to_string(),
            player_symbol: parts.next().map(str::to_string),
        },
        "/random" => ClientEvent::FindRandomMatch {
            player_name: name.to_string(),
        },
        "/cancel" => ClientEvent::CancelRandomMatch,
        "/restart" => ClientEvent::RestartGame {
            room_id: current_room()?,
        },
        "/move" => make_move_event(required_arg(parts.next(), "/move <0-8>")?, current_room()?)?,
        _ if line.parse::<usize>().is_ok() => {
            make_move_event(line.to_string(), current_room()?)?
        }
        _ if command.starts_with('/') => return Err(format!("unknown command {command}")),
        _ => {
            // plain text is chat, routed to whichever channel applies
            let (room_id, symbol, in_lobby) = {
                let view = view.lock().expect("session view lock");
                (
                    view.room_id.clone(),
                    view.symbol.map(|s| s.as_str().to_string()),
                    view.in_lobby,
                )
            };
            let room_id = room_id.ok_or_else(|| "you are not in a room".to_string())?;
            if in_lobby {
                ClientEvent::WaitingRoomMessage {
                    room_id,
                    sender: name.to_string(),
                    message: line.to_string(),
                    symbol,
                }
            } else {
                ClientEvent::ChatMessage {
                    room_id,
                    sender: name.to_string(),
                    message: line.to_string(),
                    symbol,
                }
            }
        }
    };
    Ok(Some(event))
}

fn required_arg(arg: Option<&str>, usage: &str) -> Result<String, String> {
    arg.map(str::to_string)
        .ok_or_else(|| format!("usage: {usage}"))
}

fn make_move_event(raw: String, room_id: String) -> Result<ClientEvent, String> {
    let cell_index = raw
        .parse::<usize>()
        .ok()
        .filter(|cell| *cell < 9)
        .ok_or_else(|| "cell index must be 0-8".to_string())?;
    Ok(ClientEvent::MakeMove {
        room_id,
        cell_index,
    })
}

/// Renders one server event and keeps the session view current.
fn handle_server_event(
    event: ServerEvent,
    view: &Arc<Mutex<SessionView>>,
    out_tx: &mpsc::UnboundedSender<String>,
    name: &str,
) {
    match event {
        ServerEvent::AvailableRooms { rooms } => {
            if rooms.is_empty() {
                println!("no open rooms");
            } else {
                println!("open rooms: {}", rooms.join(", "));
            }
        }
        ServerEvent::RoomCreated {
            room_id,
            player_symbol,
            is_host,
            ..
        } => {
            {
                let mut view = view.lock().expect("session view lock");
                view.room_id = Some(room_id.clone());
                view.symbol = Some(player_symbol);
                view.is_host = is_host;
                view.in_lobby = true;
            }
            println!("room {room_id} created; you are {player_symbol} (host)");
            println!("share the room id, then /start when everyone is in");
            // the creator sits in the waiting room right away
            let join = ClientEvent::JoinWaitingRoom {
                room_id,
                player_name: name.to_string(),
            };
            let _ = out_tx.send(serde_json::to_string(&join).expect("client event serializes"));
        }
        ServerEvent::WaitingRoomJoined {
            room_id,
            player_symbol,
            is_host,
            participants,
            ..
        } => {
            {
                let mut view = view.lock().expect("session view lock");
                view.room_id = Some(room_id.clone());
                view.symbol = player_symbol.parse().ok();
                view.is_host = is_host;
                view.in_lobby = true;
            }
            println!("waiting room {room_id} joined as {player_symbol}");
            print!("{}", render_participants(&participants));
        }
        ServerEvent::ParticipantJoined { participant, .. } => {
            println!("{} joined the waiting room", participant.name);
        }
        ServerEvent::ParticipantLeft {
            participant_name, ..
        } => {
            println!("{participant_name} left");
        }
        ServerEvent::ParticipantsUpdate { participants } => {
            print!("{}", render_participants(&participants));
        }
        ServerEvent::WaitingRoomMessage(message) | ServerEvent::ChatMessage(message) => {
            println!("[{}] {}", message.sender, message.message);
        }
        ServerEvent::GameStarting => {
            view.lock().expect("session view lock").in_lobby = false;
            println!("game starting; X moves first");
        }
        ServerEvent::RoomJoined(joined) => {
            {
                let mut view = view.lock().expect("session view lock");
                view.room_id = Some(joined.room_id.clone());
                view.symbol = joined.player_symbol;
                view.is_host = joined.is_host.unwrap_or(false);
                view.in_lobby = joined.waiting_room.unwrap_or(false);
            }
            if joined.is_spectator {
                println!("watching room {}", joined.room_id);
            } else {
                println!(
                    "joined room {} as {}",
                    joined.room_id,
                    joined
                        .player_symbol
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "?".to_string())
                );
            }
            if let Some(cells) = joined.game_state {
                print!("{}", render_wire_board(&cells));
            }
            if let Some(current) = joined.current_player {
                println!("{current} to move");
            }
        }
        ServerEvent::PlayerJoined { player } => {
            println!("{} joined as {}", player.name, player.symbol);
        }
        ServerEvent::SpectatorJoined { spectator } => {
            println!("{} is watching", spectator.name);
        }
        ServerEvent::RoomStatus {
            room_id,
            exists,
            players,
            status,
        } => {
            if exists {
                let seats = players
                    .unwrap_or_default()
                    .iter()
                    .map(|p| format!("{}={}", p.symbol, p.name))
                    .collect::<Vec<_>>()
                    .join(", ");
                println!(
                    "room {room_id}: status {} ({seats})",
                    status.unwrap_or_default()
                );
            } else {
                println!("room {room_id} does not exist");
            }
        }
        ServerEvent::MoveMade {
            symbol, game_state, ..
        } => {
            println!("{symbol} moved:");
            print!("{}", render_wire_board(&game_state));
        }
        ServerEvent::GameOver(over) => {
            if over.draw.unwrap_or(false) {
                println!("draw!");
            } else if let Some(winner) = over.winner {
                println!("{winner} wins!");
            }
            println!("score X:{} O:{}  (/restart for a rematch)", over.scores.x, over.scores.o);
        }
        ServerEvent::PlayerTurnChanged { current_player } => {
            let mine = view.lock().expect("session view lock").symbol == Some(current_player);
            if mine {
                println!("your turn ({current_player})");
            } else {
                println!("{current_player} to move");
            }
        }
        ServerEvent::GameRestarted {
            game_state,
            current_player,
        } => {
            println!("new round, {current_player} opens:");
            print!("{}", render_wire_board(&game_state));
        }
        ServerEvent::RandomMatchFound {
            room_id,
            player_symbol,
            is_host,
            opponent_name,
            ..
        } => {
            {
                let mut view = view.lock().expect("session view lock");
                view.room_id = Some(room_id.clone());
                view.symbol = Some(player_symbol);
                view.is_host = is_host;
                view.in_lobby = false;
            }
            println!("matched against {opponent_name}; you are {player_symbol}");
            // the host reports the board up, which flips the room to
            // started and locks out cancellation
            if is_host {
                let started = ClientEvent::RandomMatchGameStarted { room_id };
                let _ = out_tx
                    .send(serde_json::to_string(&started).expect("client event serializes"));
            }
        }
        ServerEvent::RandomMatchCancelled { message, .. } => {
            view.lock().expect("session view lock").room_id = None;
            println!("{message}");
        }
        ServerEvent::GameInitialized {
            game_state,
            current_player,
            ..
        } => {
            print!("{}", render_wire_board(&game_state));
            println!("{current_player} to move");
        }
        ServerEvent::PlayerLeft {
            player_name,
            temporary,
        } => {
            if temporary {
                println!("{player_name} disconnected (may reconnect)");
            } else {
                println!("{player_name} left");
            }
        }
        ServerEvent::SpectatorLeft { spectator_name } => {
            println!("{spectator_name} stopped watching");
        }
        ServerEvent::Error { message } => {
            println!("error: {message}");
        }
    }
}
