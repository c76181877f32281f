//! Infrastructure layer: concrete implementations of the domain seams
//! plus the wire DTOs.

pub mod dto;
pub mod pusher;
pub mod registry;
pub mod supervisor;
