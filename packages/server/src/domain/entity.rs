//! Entities held inside a [`super::Room`] and the matchmaking queue.

use std::collections::VecDeque;

use sanmoku_shared::board::Symbol;

use super::value_object::{ConnectionId, PlayerName, Timestamp};

/// Chat history cap per channel; the oldest entry is evicted first.
pub const MESSAGE_HISTORY_LIMIT: usize = 50;

/// A seated player. Exactly one player per symbol per room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub connection_id: ConnectionId,
    pub name: PlayerName,
    pub symbol: Symbol,
    pub connected: bool,
    /// Capability flag, not tied to the symbol. Normally the creator.
    pub is_host: bool,
    pub disconnected_at: Option<Timestamp>,
}

impl Player {
    pub fn new(
        connection_id: ConnectionId,
        name: PlayerName,
        symbol: Symbol,
        is_host: bool,
    ) -> Self {
        Self {
            connection_id,
            name,
            symbol,
            connected: true,
            is_host,
            disconnected_at: None,
        }
    }
}

/// A watcher. Never affects board state and never holds host rights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spectator {
    pub connection_id: ConnectionId,
    pub name: PlayerName,
    pub connected: bool,
}

impl Spectator {
    pub fn new(connection_id: ConnectionId, name: PlayerName) -> Self {
        Self {
            connection_id,
            name,
            connected: true,
        }
    }
}

/// Which chat history a message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatChannel {
    /// In-game chat.
    Game,
    /// Pre-game lobby chat.
    WaitingRoom,
}

/// One chat message. `symbol` is whatever the sender presented
/// ("X", "O" or "spectator"), kept verbatim for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub sender: String,
    pub message: String,
    pub symbol: Option<String>,
    pub timestamp: Timestamp,
}

/// Win counters for the lifetime of a room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scores {
    pub x: u32,
    pub o: u32,
}

impl Scores {
    pub fn increment(&mut self, winner: Symbol) {
        match winner {
            Symbol::X => self.x += 1,
            Symbol::O => self.o += 1,
        }
    }

    pub fn get(&self, symbol: Symbol) -> u32 {
        match symbol {
            Symbol::X => self.x,
            Symbol::O => self.o,
        }
    }
}

/// A matchmaking queue entry, alive from `findRandomMatch` until paired
/// or cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTicket {
    pub connection_id: ConnectionId,
    pub player_name: PlayerName,
    pub joined_at: Timestamp,
}

/// Appends to a bounded history, evicting the oldest entry past the cap.
pub fn push_bounded(history: &mut VecDeque<ChatEntry>, entry: ChatEntry) {
    history.push_back(entry);
    while history.len() > MESSAGE_HISTORY_LIMIT {
        history.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: usize) -> ChatEntry {
        ChatEntry {
            sender: "alice".to_string(),
            message: format!("message {n}"),
            symbol: Some("X".to_string()),
            timestamp: Timestamp::new(n as i64),
        }
    }

    #[test]
    fn test_history_evicts_oldest_past_the_cap() {
        // given:
        let mut history = VecDeque::new();

        // when: one more entry than the cap
        for n in 0..=MESSAGE_HISTORY_LIMIT {
            push_bounded(&mut history, entry(n));
        }

        // then: oldest entry is gone, newest is last
        assert_eq!(history.len(), MESSAGE_HISTORY_LIMIT);
        assert_eq!(history.front().unwrap().message, "message 1");
        assert_eq!(
            history.back().unwrap().message,
            format!("message {MESSAGE_HISTORY_LIMIT}")
        );
    }

    #[test]
    fn test_scores_increment_per_symbol() {
        // given:
        let mut scores = Scores::default();

        // when:
        scores.increment(Symbol::X);
        scores.increment(Symbol::X);
        scores.increment(Symbol::O);

        // then:
        assert_eq!(scores.get(Symbol::X), 2);
        assert_eq!(scores.get(Symbol::O), 1);
    }
}
