//! UI layer: axum router, WebSocket session handling, HTTP endpoints.

pub mod handler;
pub mod server;
pub mod signal;
pub mod state;
