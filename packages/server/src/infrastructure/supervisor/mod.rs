mod reaper;

pub use reaper::RoomReaper;
