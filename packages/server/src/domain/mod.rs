//! Domain layer: entities, value objects and the traits the rest of the
//! server depends on. Everything in here is synchronous and pure except
//! the two injected seams ([`RoomRegistry`], [`MessagePusher`],
//! [`DeletionScheduler`]).

pub mod entity;
pub mod error;
pub mod pusher;
pub mod registry;
pub mod room;
pub mod value_object;

pub use entity::{ChatChannel, ChatEntry, MatchTicket, Player, Scores, Spectator};
pub use error::{DomainError, MessagePushError, RegistryError};
pub use pusher::{MessagePusher, PusherChannel};
pub use registry::{CancelOutcome, DeletionScheduler, EnqueueOutcome, RoomRegistry};
pub use room::{
    Disconnection, GameJoin, LeaveInfo, MoveInfo, Participant, RestartInfo, Room, RoomStatus,
    WaitingJoin,
};
pub use value_object::{ConnectionId, PlayerName, RoomId, RoomIdFactory, Timestamp};
