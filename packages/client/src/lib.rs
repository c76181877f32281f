//! CLI client for the sanmoku Tic-Tac-Toe application.
//!
//! Three play modes: local two-player, local versus the AI heuristic
//! (both built on the shared board engine), and online play against the
//! room server.

pub mod error;
pub mod local;
pub mod online;
pub mod render;
