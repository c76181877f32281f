//! CLI client for sanmoku.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sanmoku-client -- --name Alice
//! cargo run --bin sanmoku-client -- --mode ai
//! cargo run --bin sanmoku-client -- --mode local
//! ```

use clap::{Parser, ValueEnum};

use sanmoku_client::{local::run_local, online::run_online};
use sanmoku_shared::logger::setup_logger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Play against the server
    Online,
    /// Two players at one keyboard
    Local,
    /// Against the computer
    Ai,
}

#[derive(Parser, Debug)]
#[command(name = "client")]
#[command(about = "CLI client for the sanmoku Tic-Tac-Toe server", long_about = None)]
struct Args {
    /// WebSocket URL of the game server
    #[arg(long, default_value = "ws://127.0.0.1:3000/ws")]
    url: String,

    /// Display name used for online play
    #[arg(short, long, default_value = "Player")]
    name: String,

    /// Play mode
    #[arg(short, long, value_enum, default_value_t = Mode::Online)]
    mode: Mode,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "warn");

    let args = Args::parse();

    let result = match args.mode {
        Mode::Local => run_local(false),
        Mode::Ai => run_local(true),
        Mode::Online => run_online(&args.url, &args.name).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
