//! Multiplayer Tic-Tac-Toe room server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sanmoku-server
//! cargo run --bin sanmoku-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use sanmoku_server::{
    infrastructure::{
        pusher::WebSocketMessagePusher, registry::InMemoryRoomRegistry, supervisor::RoomReaper,
    },
    ui::{server::run_server, state::AppState},
    usecase::{
        ChatUseCase, CheckRoomUseCase, CreateRoomUseCase, DisconnectUseCase, JoinRoomUseCase,
        JoinWaitingRoomUseCase, LeaveWaitingRoomUseCase, ListRoomsUseCase, MakeMoveUseCase,
        MatchmakingUseCase, ReconnectUseCase, RestartGameUseCase, StartGameUseCase,
    },
};
use sanmoku_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Multiplayer Tic-Tac-Toe room server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "3000")]
    port: u16,

    /// Grace period in seconds before a room with no connected players
    /// is deleted
    #[arg(long, default_value = "300")]
    grace_secs: u64,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Registry (in-memory room store + matchmaking queue)
    // 2. MessagePusher (WebSocket implementation)
    // 3. Deletion supervisor
    // 4. UseCases
    // 5. AppState + server

    // 1. Registry
    let registry = Arc::new(InMemoryRoomRegistry::new(Arc::new(SystemClock)));

    // 2. MessagePusher
    let pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Deletion supervisor
    let reaper = Arc::new(RoomReaper::new(
        registry.clone(),
        pusher.clone(),
        Duration::from_secs(args.grace_secs),
    ));

    // 4. UseCases
    let state = AppState {
        pusher: pusher.clone(),
        create_room: Arc::new(CreateRoomUseCase::new(registry.clone())),
        join_waiting_room: Arc::new(JoinWaitingRoomUseCase::new(
            registry.clone(),
            reaper.clone(),
        )),
        leave_waiting_room: Arc::new(LeaveWaitingRoomUseCase::new(registry.clone())),
        chat: Arc::new(ChatUseCase::new(registry.clone())),
        start_game: Arc::new(StartGameUseCase::new(registry.clone())),
        join_room: Arc::new(JoinRoomUseCase::new(registry.clone(), reaper.clone())),
        check_room: Arc::new(CheckRoomUseCase::new(registry.clone())),
        reconnect: Arc::new(ReconnectUseCase::new(registry.clone(), reaper.clone())),
        make_move: Arc::new(MakeMoveUseCase::new(registry.clone())),
        restart_game: Arc::new(RestartGameUseCase::new(registry.clone())),
        matchmaking: Arc::new(MatchmakingUseCase::new(registry.clone())),
        disconnect: Arc::new(DisconnectUseCase::new(registry.clone(), reaper.clone())),
        list_rooms: Arc::new(ListRoomsUseCase::new(registry.clone())),
    };

    // 5. Run the server
    if let Err(e) = run_server(Arc::new(state), args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
