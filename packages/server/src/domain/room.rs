//! The room entity and its state transitions.
//!
//! Every mutation of a room happens through a method here, synchronously,
//! so the registry can hold its lock across one whole transition and no
//! half-updated room is ever observable. Methods return snapshot structs
//! with everything the gateway needs for its broadcasts.

use std::collections::VecDeque;

use sanmoku_shared::board::{Board, Symbol, Verdict};

use super::entity::{
    ChatChannel, ChatEntry, MatchTicket, Player, Scores, Spectator, push_bounded,
};
use super::error::RegistryError;
use super::value_object::{ConnectionId, PlayerName, RoomId, Timestamp};

/// Room lifecycle: pre-game lobby or board in progress (including
/// finished-but-not-reset).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomStatus {
    Waiting,
    Playing,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Waiting => "waiting",
            RoomStatus::Playing => "playing",
        }
    }
}

/// Union view over players and spectators, computed on demand so it can
/// never drift out of sync with the underlying lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub connection_id: ConnectionId,
    pub name: PlayerName,
    pub symbol: Option<Symbol>,
    pub connected: bool,
    pub is_spectator: bool,
    pub is_host: bool,
}

impl Participant {
    fn from_player(player: &Player) -> Self {
        Self {
            connection_id: player.connection_id.clone(),
            name: player.name.clone(),
            symbol: Some(player.symbol),
            connected: player.connected,
            is_spectator: false,
            is_host: player.is_host,
        }
    }

    fn from_spectator(spectator: &Spectator) -> Self {
        Self {
            connection_id: spectator.connection_id.clone(),
            name: spectator.name.clone(),
            symbol: None,
            connected: spectator.connected,
            is_spectator: true,
            is_host: false,
        }
    }
}

/// Outcome of a waiting-room join.
#[derive(Debug, Clone)]
pub enum WaitingJoin {
    /// The name was already known; the connection was re-associated.
    Rejoined { participant: Participant },
    JoinedAsPlayer { participant: Participant },
    JoinedAsSpectator { participant: Participant },
}

impl WaitingJoin {
    pub fn participant(&self) -> &Participant {
        match self {
            WaitingJoin::Rejoined { participant }
            | WaitingJoin::JoinedAsPlayer { participant }
            | WaitingJoin::JoinedAsSpectator { participant } => participant,
        }
    }

    pub fn is_new(&self) -> bool {
        !matches!(self, WaitingJoin::Rejoined { .. })
    }
}

/// Outcome of an explicit waiting-room leave.
#[derive(Debug, Clone)]
pub struct LeaveInfo {
    pub participant_name: PlayerName,
    /// Player promoted when the leaving participant held host rights.
    pub new_host: Option<Participant>,
    pub now_empty: bool,
}

/// Outcome of a game join.
#[derive(Debug, Clone)]
pub enum GameJoin {
    /// Seated as a spectator; `room_was_full` marks the redirect of a
    /// would-be player, which the gateway reports before seating.
    SpectatorSeat {
        spectator: Spectator,
        room_was_full: bool,
    },
    /// A disconnected seat with the same name was taken back over.
    Reconnected { player: Player },
    Seated { player: Player },
}

/// Snapshot of one applied move.
#[derive(Debug, Clone)]
pub struct MoveInfo {
    pub cell: usize,
    pub symbol: Symbol,
    pub board: Board,
    pub verdict: Verdict,
    /// Next player when the game continues; unchanged on a terminal move.
    pub current_player: Symbol,
    pub scores: Scores,
}

/// Snapshot of a reset board.
#[derive(Debug, Clone, PartialEq)]
pub struct RestartInfo {
    pub board: Board,
    pub current_player: Symbol,
}

/// What a connection loss did to the room.
#[derive(Debug, Clone)]
pub enum Disconnection {
    /// The player keeps their seat for the reconnection grace period.
    Player {
        player: Player,
        all_players_disconnected: bool,
    },
    /// Spectators get no grace period; the seat is gone.
    Spectator { spectator: Spectator },
}

/// A single game session: players, spectators, board, chat, scores.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: RoomId,
    pub players: Vec<Player>,
    pub spectators: Vec<Spectator>,
    pub board: Board,
    pub current_player: Symbol,
    pub game_active: bool,
    pub status: RoomStatus,
    pub scores: Scores,
    pub messages: VecDeque<ChatEntry>,
    pub waiting_room_messages: VecDeque<ChatEntry>,
    /// Stable identity of the original creator; used to re-grant host
    /// status even when the creator returns on a new connection.
    pub creator_id: ConnectionId,
    pub creator_name: PlayerName,
    pub is_random_match: bool,
    pub created_at: Timestamp,
    /// Set once the clients of a random match report the board up;
    /// cancellation is only possible before that.
    pub game_started_at: Option<Timestamp>,
}

impl Room {
    /// A lobby room with its creator seated as host at 'X'.
    pub fn new_waiting(
        id: RoomId,
        creator_id: ConnectionId,
        creator_name: PlayerName,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            players: vec![Player::new(
                creator_id.clone(),
                creator_name.clone(),
                Symbol::X,
                true,
            )],
            spectators: Vec::new(),
            board: Board::new(),
            current_player: Symbol::X,
            game_active: false,
            status: RoomStatus::Waiting,
            scores: Scores::default(),
            messages: VecDeque::new(),
            waiting_room_messages: VecDeque::new(),
            creator_id,
            creator_name,
            is_random_match: false,
            created_at: now,
            game_started_at: None,
        }
    }

    /// A matchmade room that skips the lobby: both players seated, the
    /// older ticket as host at 'X', board live immediately.
    pub fn new_random_match(
        id: RoomId,
        first: MatchTicket,
        second: MatchTicket,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            players: vec![
                Player::new(
                    first.connection_id.clone(),
                    first.player_name.clone(),
                    Symbol::X,
                    true,
                ),
                Player::new(second.connection_id, second.player_name, Symbol::O, false),
            ],
            spectators: Vec::new(),
            board: Board::new(),
            current_player: Symbol::X,
            game_active: true,
            status: RoomStatus::Playing,
            scores: Scores::default(),
            messages: VecDeque::new(),
            waiting_room_messages: VecDeque::new(),
            creator_id: first.connection_id,
            creator_name: first.player_name,
            is_random_match: true,
            created_at: now,
            game_started_at: None,
        }
    }

    /// The union view for waiting-room UIs: players first, then
    /// spectators.
    pub fn participants(&self) -> Vec<Participant> {
        self.players
            .iter()
            .map(Participant::from_player)
            .chain(self.spectators.iter().map(Participant::from_spectator))
            .collect()
    }

    pub fn is_creator(&self, connection_id: &ConnectionId, name: &PlayerName) -> bool {
        self.creator_name == *name || self.creator_id == *connection_id
    }

    pub fn player_by_connection(&self, connection_id: &ConnectionId) -> Option<&Player> {
        self.players
            .iter()
            .find(|p| p.connection_id == *connection_id)
    }

    pub fn holds_connection(&self, connection_id: &ConnectionId) -> bool {
        self.players
            .iter()
            .any(|p| p.connection_id == *connection_id)
            || self
                .spectators
                .iter()
                .any(|s| s.connection_id == *connection_id)
    }

    pub fn connected_player_count(&self) -> usize {
        self.players.iter().filter(|p| p.connected).count()
    }

    /// Connection ids of everyone currently reachable in this room.
    pub fn connected_targets(&self) -> Vec<ConnectionId> {
        self.players
            .iter()
            .filter(|p| p.connected)
            .map(|p| p.connection_id.clone())
            .chain(
                self.spectators
                    .iter()
                    .filter(|s| s.connected)
                    .map(|s| s.connection_id.clone()),
            )
            .collect()
    }

    /// Waiting-room join, resolved in order: reconnect by name, spectator
    /// overflow, player seat (the creator always ends up holding 'X').
    pub fn join_waiting(&mut self, connection_id: ConnectionId, name: PlayerName) -> WaitingJoin {
        let is_creator = self.is_creator(&connection_id, &name);

        if let Some(player) = self.players.iter_mut().find(|p| p.name == name) {
            player.connection_id = connection_id;
            player.connected = true;
            player.disconnected_at = None;
            if is_creator {
                player.is_host = true;
            }
            return WaitingJoin::Rejoined {
                participant: Participant::from_player(player),
            };
        }
        if let Some(spectator) = self.spectators.iter_mut().find(|s| s.name == name) {
            spectator.connection_id = connection_id;
            spectator.connected = true;
            return WaitingJoin::Rejoined {
                participant: Participant::from_spectator(spectator),
            };
        }

        if self.players.len() >= 2 {
            let spectator = Spectator::new(connection_id, name);
            self.spectators.push(spectator.clone());
            return WaitingJoin::JoinedAsSpectator {
                participant: Participant::from_spectator(&spectator),
            };
        }

        let first_seat = self.players.is_empty();
        let mut symbol = if first_seat {
            Symbol::X
        } else {
            self.players[0].symbol.opponent()
        };
        let is_host = first_seat || is_creator;
        if is_creator && symbol != Symbol::X {
            // swap with the incumbent so the creator holds 'X'
            if let Some(other) = self.players.first_mut() {
                other.symbol = Symbol::O;
            }
            symbol = Symbol::X;
        }
        let player = Player::new(connection_id, name, symbol, is_host);
        self.players.push(player.clone());
        WaitingJoin::JoinedAsPlayer {
            participant: Participant::from_player(&player),
        }
    }

    /// Explicit leave by name. Promotes the first remaining connected
    /// player when the host leaves.
    pub fn leave(&mut self, name: &PlayerName) -> Option<LeaveInfo> {
        if let Some(index) = self.players.iter().position(|p| p.name == *name) {
            let removed = self.players.remove(index);
            let mut new_host = None;
            if removed.is_host {
                if let Some(next) = self.players.iter_mut().find(|p| p.connected) {
                    next.is_host = true;
                    new_host = Some(Participant::from_player(next));
                }
            }
            return Some(LeaveInfo {
                participant_name: removed.name,
                new_host,
                now_empty: self.players.is_empty() && self.spectators.is_empty(),
            });
        }
        if let Some(index) = self.spectators.iter().position(|s| s.name == *name) {
            let removed = self.spectators.remove(index);
            return Some(LeaveInfo {
                participant_name: removed.name,
                new_host: None,
                now_empty: self.players.is_empty() && self.spectators.is_empty(),
            });
        }
        None
    }

    /// Host-gated game start. A requester matching the recorded creator
    /// identity is re-granted host status instead of being rejected.
    pub fn start(
        &mut self,
        connection_id: &ConnectionId,
        name: &PlayerName,
    ) -> Result<(), RegistryError> {
        if self.players.len() < 2 {
            return Err(RegistryError::NotEnoughPlayers);
        }
        let is_creator = self.is_creator(connection_id, name);
        let Some(player) = self.players.iter_mut().find(|p| p.name == *name) else {
            return Err(RegistryError::PlayerNotFound);
        };
        if !player.is_host {
            if is_creator {
                player.is_host = true;
            } else {
                return Err(RegistryError::NotHost);
            }
        }
        self.status = RoomStatus::Playing;
        self.game_active = true;
        self.current_player = Symbol::X;
        Ok(())
    }

    /// Game join: explicit spectators and overflow go to the gallery, a
    /// disconnected seat with the same name is taken back over, otherwise
    /// a fresh seat with the complement symbol ('X' and host when the
    /// room is empty).
    pub fn join_game(
        &mut self,
        connection_id: ConnectionId,
        name: PlayerName,
        as_spectator: bool,
    ) -> GameJoin {
        let is_creator = self.is_creator(&connection_id, &name);
        let name_is_seated = self.players.iter().any(|p| p.name == name);

        if as_spectator || (self.players.len() >= 2 && !name_is_seated) {
            let spectator = Spectator::new(connection_id, name);
            self.spectators.push(spectator.clone());
            return GameJoin::SpectatorSeat {
                spectator,
                room_was_full: false,
            };
        }

        if let Some(player) = self
            .players
            .iter_mut()
            .find(|p| p.name == name && !p.connected)
        {
            player.connection_id = connection_id;
            player.connected = true;
            player.disconnected_at = None;
            if is_creator {
                player.is_host = true;
            }
            return GameJoin::Reconnected {
                player: player.clone(),
            };
        }

        if self.players.len() >= 2 {
            // the name collides with a connected player; redirect
            let spectator = Spectator::new(connection_id, name);
            self.spectators.push(spectator.clone());
            return GameJoin::SpectatorSeat {
                spectator,
                room_was_full: true,
            };
        }

        let first_seat = self.players.is_empty();
        let symbol = if first_seat {
            Symbol::X
        } else {
            self.players[0].symbol.opponent()
        };
        let player = Player::new(connection_id, name, symbol, first_seat);
        self.players.push(player.clone());
        GameJoin::Seated { player }
    }

    /// Reconnect into a specific seat.
    ///
    /// A requested symbol that disagrees with where the name is already
    /// seated is rejected outright; re-seating needs an explicit
    /// reconnect with the seated symbol.
    pub fn reconnect_seat(
        &mut self,
        connection_id: ConnectionId,
        name: PlayerName,
        requested: Option<Symbol>,
    ) -> Result<Player, RegistryError> {
        if let Some(requested) = requested {
            if let Some(seated) = self
                .players
                .iter()
                .find(|p| p.name == name && p.symbol != requested)
            {
                return Err(RegistryError::SymbolMismatch {
                    name: name.as_str().to_string(),
                    seated: seated.symbol,
                });
            }
        }
        let is_creator = self.is_creator(&connection_id, &name);

        // without an explicit symbol, prefer the seat the name held
        let requested = requested.or_else(|| {
            self.players
                .iter()
                .find(|p| p.name == name)
                .map(|p| p.symbol)
        });

        if let Some(symbol) = requested {
            if let Some(seat) = self.players.iter_mut().find(|p| p.symbol == symbol) {
                if seat.connection_id != connection_id && seat.connected {
                    return Err(RegistryError::PositionTaken);
                }
                seat.connection_id = connection_id;
                seat.name = name;
                seat.connected = true;
                seat.disconnected_at = None;
                if is_creator {
                    seat.is_host = true;
                }
                return Ok(seat.clone());
            }
        }

        if self.players.len() < 2 {
            let symbol = requested.unwrap_or_else(|| {
                self.players
                    .first()
                    .map(|p| p.symbol.opponent())
                    .unwrap_or(Symbol::X)
            });
            let player = Player::new(connection_id, name, symbol, is_creator);
            self.players.push(player.clone());
            return Ok(player);
        }

        Err(RegistryError::RoomFull)
    }

    /// Applies a move if it is legal. Illegal moves (inactive game,
    /// unknown connection, out of turn, occupied cell) return `None` and
    /// leave the room untouched.
    pub fn apply_move(&mut self, connection_id: &ConnectionId, cell: usize) -> Option<MoveInfo> {
        if !self.game_active {
            return None;
        }
        let symbol = self.player_by_connection(connection_id)?.symbol;
        if symbol != self.current_player {
            return None;
        }
        if !self.board.try_place(cell, symbol) {
            return None;
        }
        let verdict = self.board.evaluate();
        match verdict {
            Verdict::Win { winner, .. } => {
                self.game_active = false;
                self.scores.increment(winner);
            }
            Verdict::Draw => {
                self.game_active = false;
            }
            Verdict::InProgress => {
                self.current_player = self.current_player.opponent();
            }
        }
        Some(MoveInfo {
            cell,
            symbol,
            board: self.board,
            verdict,
            current_player: self.current_player,
            scores: self.scores,
        })
    }

    /// Resets the board for a rematch. The opening symbol alternates.
    pub fn restart(&mut self) -> Result<RestartInfo, RegistryError> {
        if self.connected_player_count() < 2 {
            return Err(RegistryError::NotEnoughConnected);
        }
        self.board = Board::new();
        self.game_active = true;
        self.current_player = self.current_player.opponent();
        Ok(RestartInfo {
            board: self.board,
            current_player: self.current_player,
        })
    }

    pub fn push_chat(&mut self, channel: ChatChannel, entry: ChatEntry) {
        match channel {
            ChatChannel::Game => push_bounded(&mut self.messages, entry),
            ChatChannel::WaitingRoom => push_bounded(&mut self.waiting_room_messages, entry),
        }
    }

    /// Connection-loss bookkeeping. Players are kept (disconnected) for
    /// the grace period; spectators are dropped immediately.
    pub fn mark_disconnected(
        &mut self,
        connection_id: &ConnectionId,
        now: Timestamp,
    ) -> Option<Disconnection> {
        if let Some(player) = self
            .players
            .iter_mut()
            .find(|p| p.connection_id == *connection_id)
        {
            player.connected = false;
            player.disconnected_at = Some(now);
            let snapshot = player.clone();
            let all_players_disconnected = self.players.iter().all(|p| !p.connected);
            return Some(Disconnection::Player {
                player: snapshot,
                all_players_disconnected,
            });
        }
        if let Some(index) = self
            .spectators
            .iter()
            .position(|s| s.connection_id == *connection_id)
        {
            let spectator = self.spectators.remove(index);
            return Some(Disconnection::Spectator { spectator });
        }
        None
    }

    /// Marks a matchmade game as actually underway; cancellation is no
    /// longer possible afterwards.
    pub fn mark_match_started(&mut self, now: Timestamp) {
        self.status = RoomStatus::Playing;
        self.game_active = true;
        self.game_started_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::RoomIdFactory;

    fn name(value: &str) -> PlayerName {
        PlayerName::new(value.to_string()).unwrap()
    }

    fn conn(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string())
    }

    fn waiting_room() -> Room {
        Room::new_waiting(
            RoomIdFactory::generate(),
            conn("conn-alice"),
            name("Alice"),
            Timestamp::new(1_000),
        )
    }

    /// Waiting room with Alice (host, X) and Bob (O) seated.
    fn two_player_room() -> Room {
        let mut room = waiting_room();
        room.join_waiting(conn("conn-bob"), name("Bob"));
        room
    }

    fn started_room() -> Room {
        let mut room = two_player_room();
        room.start(&conn("conn-alice"), &name("Alice")).unwrap();
        room
    }

    #[test]
    fn test_new_waiting_room_seats_the_creator_as_host_x() {
        // given/when:
        let room = waiting_room();

        // then:
        assert_eq!(room.status, RoomStatus::Waiting);
        assert!(!room.game_active);
        assert_eq!(room.players.len(), 1);
        assert_eq!(room.players[0].symbol, Symbol::X);
        assert!(room.players[0].is_host);
        assert_eq!(room.current_player, Symbol::X);
    }

    #[test]
    fn test_second_waiting_join_gets_the_complement_symbol() {
        // given:
        let mut room = waiting_room();

        // when:
        let join = room.join_waiting(conn("conn-bob"), name("Bob"));

        // then:
        assert!(join.is_new());
        assert_eq!(join.participant().symbol, Some(Symbol::O));
        assert!(!join.participant().is_host);
        assert_eq!(room.players.len(), 2);
    }

    #[test]
    fn test_third_waiting_join_becomes_a_spectator() {
        // given:
        let mut room = two_player_room();

        // when:
        let join = room.join_waiting(conn("conn-carol"), name("Carol"));

        // then:
        assert!(matches!(join, WaitingJoin::JoinedAsSpectator { .. }));
        assert!(join.participant().is_spectator);
        assert_eq!(room.spectators.len(), 1);
        assert_eq!(room.participants().len(), 3);
    }

    #[test]
    fn test_waiting_rejoin_by_name_updates_the_connection() {
        // given:
        let mut room = two_player_room();

        // when: Bob comes back on a new connection
        let join = room.join_waiting(conn("conn-bob-2"), name("Bob"));

        // then: same seat, new connection id, nothing duplicated
        assert!(!join.is_new());
        assert_eq!(room.players.len(), 2);
        assert_eq!(room.players[1].connection_id, conn("conn-bob-2"));
        assert!(room.players[1].connected);
    }

    #[test]
    fn test_creator_joining_second_swaps_symbols_to_hold_x() {
        // given: a room created by Alice where Bob grabbed a seat first
        let mut room = waiting_room();
        room.players.clear();
        room.join_waiting(conn("conn-bob"), name("Bob"));
        assert_eq!(room.players[0].symbol, Symbol::X);

        // when: the creator arrives on a fresh connection
        let join = room.join_waiting(conn("conn-alice-2"), name("Alice"));

        // then: creator holds X and host status, incumbent was moved to O
        assert_eq!(join.participant().symbol, Some(Symbol::X));
        assert!(join.participant().is_host);
        assert_eq!(room.players[0].symbol, Symbol::O);
    }

    #[test]
    fn test_leave_promotes_the_next_connected_player_to_host() {
        // given:
        let mut room = two_player_room();

        // when: the host leaves
        let info = room.leave(&name("Alice")).unwrap();

        // then: Bob is promoted
        let new_host = info.new_host.unwrap();
        assert_eq!(new_host.name, name("Bob"));
        assert!(new_host.is_host);
        assert!(!info.now_empty);
        assert!(room.players[0].is_host);
    }

    #[test]
    fn test_leave_of_the_last_participant_empties_the_room() {
        // given:
        let mut room = waiting_room();

        // when:
        let info = room.leave(&name("Alice")).unwrap();

        // then:
        assert!(info.now_empty);
        assert!(room.leave(&name("Alice")).is_none());
    }

    #[test]
    fn test_start_requires_two_players() {
        // given:
        let mut room = waiting_room();

        // then:
        assert_eq!(
            room.start(&conn("conn-alice"), &name("Alice")),
            Err(RegistryError::NotEnoughPlayers)
        );
    }

    #[test]
    fn test_start_rejects_a_non_host_non_creator() {
        // given:
        let mut room = two_player_room();

        // then:
        assert_eq!(
            room.start(&conn("conn-bob"), &name("Bob")),
            Err(RegistryError::NotHost)
        );
        assert_eq!(room.status, RoomStatus::Waiting);
    }

    #[test]
    fn test_start_regrants_host_to_the_creator_on_a_new_connection() {
        // given: the creator lost the host flag (e.g. stale rejoin)
        let mut room = two_player_room();
        room.players[0].is_host = false;

        // when: start requested from a connection the room has never seen,
        // but under the creator's name
        let result = room.start(&conn("conn-alice-new"), &name("Alice"));

        // then: re-granted and started
        assert!(result.is_ok());
        assert!(room.players[0].is_host);
        assert_eq!(room.status, RoomStatus::Playing);
        assert!(room.game_active);
        assert_eq!(room.current_player, Symbol::X);
    }

    #[test]
    fn test_join_game_seats_players_then_redirects_to_spectator() {
        // given: an empty shell of a room
        let mut room = waiting_room();
        room.players.clear();

        // when: three distinct joins
        let first = room.join_game(conn("c1"), name("Dana"), false);
        let second = room.join_game(conn("c2"), name("Eve"), false);
        let third = room.join_game(conn("c3"), name("Frank"), false);

        // then: first is host X, second is O, third spectates
        match first {
            GameJoin::Seated { player } => {
                assert_eq!(player.symbol, Symbol::X);
                assert!(player.is_host);
            }
            other => panic!("expected Seated, got {other:?}"),
        }
        match second {
            GameJoin::Seated { player } => {
                assert_eq!(player.symbol, Symbol::O);
                assert!(!player.is_host);
            }
            other => panic!("expected Seated, got {other:?}"),
        }
        match third {
            GameJoin::SpectatorSeat { room_was_full, .. } => assert!(!room_was_full),
            other => panic!("expected SpectatorSeat, got {other:?}"),
        }
        assert_eq!(room.spectators.len(), 1);
    }

    #[test]
    fn test_join_game_takes_over_a_disconnected_seat_by_name() {
        // given:
        let mut room = started_room();
        room.mark_disconnected(&conn("conn-bob"), Timestamp::new(2_000));

        // when:
        let join = room.join_game(conn("conn-bob-2"), name("Bob"), false);

        // then:
        match join {
            GameJoin::Reconnected { player } => {
                assert_eq!(player.symbol, Symbol::O);
                assert_eq!(player.connection_id, conn("conn-bob-2"));
                assert!(player.connected);
            }
            other => panic!("expected Reconnected, got {other:?}"),
        }
        assert_eq!(room.players.len(), 2);
    }

    #[test]
    fn test_join_game_with_a_taken_name_redirects_with_notice() {
        // given: Bob is seated and connected
        let mut room = started_room();

        // when: another connection joins under Bob's name
        let join = room.join_game(conn("conn-impostor"), name("Bob"), false);

        // then: spectator with the full-room notice
        match join {
            GameJoin::SpectatorSeat { room_was_full, .. } => assert!(room_was_full),
            other => panic!("expected SpectatorSeat, got {other:?}"),
        }
    }

    #[test]
    fn test_reconnect_takes_over_a_disconnected_seat() {
        // given:
        let mut room = started_room();
        room.mark_disconnected(&conn("conn-alice"), Timestamp::new(2_000));

        // when:
        let player = room
            .reconnect_seat(conn("conn-alice-2"), name("Alice"), Some(Symbol::X))
            .unwrap();

        // then: seat retaken, host restored to the creator
        assert_eq!(player.symbol, Symbol::X);
        assert!(player.connected);
        assert!(player.is_host);
        assert!(player.disconnected_at.is_none());
    }

    #[test]
    fn test_reconnect_rejects_a_seat_held_by_a_live_connection() {
        // given:
        let mut room = started_room();

        // when: someone else wants Bob's live seat
        let result = room.reconnect_seat(conn("conn-other"), name("Mallory"), Some(Symbol::O));

        // then:
        assert_eq!(result, Err(RegistryError::PositionTaken));
    }

    #[test]
    fn test_reconnect_with_a_mismatched_symbol_is_rejected() {
        // given: Bob is seated as O
        let mut room = started_room();
        room.mark_disconnected(&conn("conn-bob"), Timestamp::new(2_000));

        // when: Bob asks for X
        let result = room.reconnect_seat(conn("conn-bob-2"), name("Bob"), Some(Symbol::X));

        // then: explicit rejection, no silent re-seating
        assert_eq!(
            result,
            Err(RegistryError::SymbolMismatch {
                name: "Bob".to_string(),
                seated: Symbol::O,
            })
        );
        assert_eq!(room.players[1].connection_id, conn("conn-bob"));
    }

    #[test]
    fn test_reconnect_without_a_symbol_finds_the_named_seat() {
        // given:
        let mut room = started_room();
        room.mark_disconnected(&conn("conn-bob"), Timestamp::new(2_000));

        // when:
        let player = room
            .reconnect_seat(conn("conn-bob-2"), name("Bob"), None)
            .unwrap();

        // then:
        assert_eq!(player.symbol, Symbol::O);
        assert!(player.connected);
    }

    #[test]
    fn test_reconnect_joins_fresh_with_the_complement_symbol() {
        // given: only Alice seated
        let mut room = waiting_room();
        room.status = RoomStatus::Playing;

        // when: a newcomer reconnects without a symbol
        let player = room
            .reconnect_seat(conn("conn-carol"), name("Carol"), None)
            .unwrap();

        // then:
        assert_eq!(player.symbol, Symbol::O);
        assert_eq!(room.players.len(), 2);
    }

    #[test]
    fn test_reconnect_into_a_full_room_is_rejected() {
        // given:
        let mut room = started_room();

        // when: no symbol given, both seats held by live connections
        let result = room.reconnect_seat(conn("conn-carol"), name("Carol"), None);

        // then:
        assert_eq!(result, Err(RegistryError::RoomFull));
    }

    #[test]
    fn test_moves_alternate_and_flip_the_turn() {
        // given:
        let mut room = started_room();

        // when:
        let info = room.apply_move(&conn("conn-alice"), 0).unwrap();

        // then:
        assert_eq!(info.symbol, Symbol::X);
        assert_eq!(info.verdict, Verdict::InProgress);
        assert_eq!(info.current_player, Symbol::O);
        assert_eq!(room.current_player, Symbol::O);
    }

    #[test]
    fn test_out_of_turn_and_occupied_moves_are_silently_rejected() {
        // given:
        let mut room = started_room();

        // when/then: O may not open
        assert!(room.apply_move(&conn("conn-bob"), 0).is_none());

        // when/then: X takes 0, then O cannot take 0 again
        assert!(room.apply_move(&conn("conn-alice"), 0).is_some());
        assert!(room.apply_move(&conn("conn-bob"), 0).is_none());

        // then: board and turn unchanged by the rejections
        assert_eq!(room.board.cell(0), Some(Symbol::X));
        assert_eq!(room.current_player, Symbol::O);
    }

    #[test]
    fn test_unknown_connection_cannot_move() {
        let mut room = started_room();
        assert!(room.apply_move(&conn("conn-nobody"), 0).is_none());
    }

    #[test]
    fn test_winning_line_ends_the_game_and_scores_the_winner() {
        // given: X plays 0,1,2 while O plays 4,5
        let mut room = started_room();
        room.apply_move(&conn("conn-alice"), 0).unwrap();
        room.apply_move(&conn("conn-bob"), 4).unwrap();
        room.apply_move(&conn("conn-alice"), 1).unwrap();
        room.apply_move(&conn("conn-bob"), 5).unwrap();

        // when:
        let info = room.apply_move(&conn("conn-alice"), 2).unwrap();

        // then:
        assert_eq!(
            info.verdict,
            Verdict::Win {
                winner: Symbol::X,
                line: [0, 1, 2]
            }
        );
        assert_eq!(info.scores.x, 1);
        assert!(!room.game_active);

        // and: no further moves are accepted
        assert!(room.apply_move(&conn("conn-bob"), 8).is_none());
    }

    #[test]
    fn test_full_board_without_a_line_is_a_draw() {
        // given: 0:X 1:O 2:X 3:X 4:O 5:O 6:O 7:X 8:X, in legal turn order
        let mut room = started_room();
        let moves = [
            ("conn-alice", 0),
            ("conn-bob", 1),
            ("conn-alice", 2),
            ("conn-bob", 4),
            ("conn-alice", 3),
            ("conn-bob", 5),
            ("conn-alice", 7),
            ("conn-bob", 6),
        ];
        for (c, cell) in moves {
            assert!(room.apply_move(&conn(c), cell).is_some(), "cell {cell}");
        }

        // when:
        let info = room.apply_move(&conn("conn-alice"), 8).unwrap();

        // then:
        assert_eq!(info.verdict, Verdict::Draw);
        assert_eq!(info.scores, Scores::default());
        assert!(!room.game_active);
    }

    #[test]
    fn test_restart_alternates_the_opening_player() {
        // given:
        let mut room = started_room();
        assert_eq!(room.current_player, Symbol::X);

        // when:
        let info = room.restart().unwrap();

        // then:
        assert_eq!(info.current_player, Symbol::O);
        assert!(room.game_active);
        assert!(room.board.free_cells().len() == 9);
    }

    #[test]
    fn test_restart_needs_two_connected_players() {
        // given:
        let mut room = started_room();
        room.mark_disconnected(&conn("conn-bob"), Timestamp::new(2_000));

        // then:
        assert_eq!(room.restart(), Err(RegistryError::NotEnoughConnected));
    }

    #[test]
    fn test_scores_survive_a_restart() {
        // given: X wins a round
        let mut room = started_room();
        room.apply_move(&conn("conn-alice"), 0).unwrap();
        room.apply_move(&conn("conn-bob"), 4).unwrap();
        room.apply_move(&conn("conn-alice"), 1).unwrap();
        room.apply_move(&conn("conn-bob"), 5).unwrap();
        room.apply_move(&conn("conn-alice"), 2).unwrap();
        assert_eq!(room.scores.x, 1);

        // when:
        room.restart().unwrap();

        // then:
        assert_eq!(room.scores.x, 1);
        assert_eq!(room.scores.o, 0);
    }

    #[test]
    fn test_player_disconnect_keeps_the_seat() {
        // given:
        let mut room = started_room();

        // when:
        let disconnection = room
            .mark_disconnected(&conn("conn-bob"), Timestamp::new(5_000))
            .unwrap();

        // then:
        match disconnection {
            Disconnection::Player {
                player,
                all_players_disconnected,
            } => {
                assert!(!player.connected);
                assert_eq!(player.disconnected_at, Some(Timestamp::new(5_000)));
                assert!(!all_players_disconnected);
            }
            other => panic!("expected Player, got {other:?}"),
        }
        assert_eq!(room.players.len(), 2);
    }

    #[test]
    fn test_last_player_disconnect_reports_all_disconnected() {
        // given:
        let mut room = started_room();
        room.mark_disconnected(&conn("conn-alice"), Timestamp::new(5_000));

        // when:
        let disconnection = room
            .mark_disconnected(&conn("conn-bob"), Timestamp::new(5_001))
            .unwrap();

        // then:
        assert!(matches!(
            disconnection,
            Disconnection::Player {
                all_players_disconnected: true,
                ..
            }
        ));
    }

    #[test]
    fn test_spectator_disconnect_removes_the_spectator() {
        // given:
        let mut room = two_player_room();
        room.join_waiting(conn("conn-carol"), name("Carol"));
        assert_eq!(room.spectators.len(), 1);

        // when:
        let disconnection = room
            .mark_disconnected(&conn("conn-carol"), Timestamp::new(5_000))
            .unwrap();

        // then: gone immediately, no grace period
        assert!(matches!(disconnection, Disconnection::Spectator { .. }));
        assert!(room.spectators.is_empty());
        assert_eq!(room.participants().len(), 2);
    }

    #[test]
    fn test_random_match_room_skips_the_lobby() {
        // given:
        let first = MatchTicket {
            connection_id: conn("conn-p1"),
            player_name: name("P1"),
            joined_at: Timestamp::new(1),
        };
        let second = MatchTicket {
            connection_id: conn("conn-p2"),
            player_name: name("P2"),
            joined_at: Timestamp::new(2),
        };

        // when:
        let room = Room::new_random_match(
            RoomIdFactory::generate(),
            first,
            second,
            Timestamp::new(10),
        );

        // then:
        assert_eq!(room.status, RoomStatus::Playing);
        assert!(room.game_active);
        assert!(room.is_random_match);
        assert!(room.game_started_at.is_none());
        assert_eq!(room.players[0].symbol, Symbol::X);
        assert!(room.players[0].is_host);
        assert_eq!(room.players[1].symbol, Symbol::O);
        assert!(!room.players[1].is_host);
    }

    #[test]
    fn test_participants_projection_tracks_both_lists() {
        // given:
        let mut room = two_player_room();
        room.join_waiting(conn("conn-carol"), name("Carol"));

        // when:
        let participants = room.participants();

        // then: players first, then spectators, one entry each
        assert_eq!(participants.len(), 3);
        assert!(!participants[0].is_spectator);
        assert!(!participants[1].is_spectator);
        assert!(participants[2].is_spectator);
        assert_eq!(participants[2].symbol, None);

        // and: a removal is reflected without any extra bookkeeping
        room.leave(&name("Carol"));
        assert_eq!(room.participants().len(), 2);
    }
}
