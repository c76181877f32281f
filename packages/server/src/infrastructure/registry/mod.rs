mod inmemory;

pub use inmemory::InMemoryRoomRegistry;
