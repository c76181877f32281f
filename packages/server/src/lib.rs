//! Multiplayer Tic-Tac-Toe room server.
//!
//! Layered like the rest of the workspace's services:
//! - `domain`: room/player entities, value objects, and the traits the
//!   upper layers depend on
//! - `usecase`: one use case per inbound client operation
//! - `infrastructure`: in-memory room registry, WebSocket message
//!   pusher, deletion supervisor, and the wire DTOs
//! - `ui`: axum router, WebSocket session handling, HTTP endpoints

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
