//! Integration tests driving the server binary over a real WebSocket.

use std::process::{Child, Command, Stdio};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

const RECV_TIMEOUT: Duration = Duration::from_secs(10);

/// Helper struct to manage the server process lifecycle.
struct TestServer {
    process: Child,
    port: u16,
}

impl TestServer {
    /// Starts a server on the given port and waits for it to answer
    /// health checks (the first test run also pays the build).
    async fn start(port: u16) -> Self {
        let process = Command::new("cargo")
            .args([
                "run",
                "--bin",
                "sanmoku-server",
                "--",
                "--port",
                &port.to_string(),
            ])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .expect("failed to start server");

        let server = TestServer { process, port };
        server.wait_until_healthy().await;
        server
    }

    fn ws_url(&self) -> String {
        format!("ws://127.0.0.1:{}/ws", self.port)
    }

    fn api_url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{}", self.port, path)
    }

    async fn wait_until_healthy(&self) {
        let client = reqwest::Client::new();
        for _ in 0..900 {
            if let Ok(response) = client.get(self.api_url("/api/health")).send().await {
                if response.status().is_success() {
                    return;
                }
            }
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        panic!("server did not become healthy on port {}", self.port);
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}

/// One WebSocket client speaking the event protocol.
struct TestClient {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    async fn connect(url: &str) -> Self {
        let (ws, _) = connect_async(url).await.expect("websocket connect");
        TestClient { ws }
    }

    async fn send(&mut self, event: Value) {
        self.ws
            .send(Message::Text(event.to_string().into()))
            .await
            .expect("websocket send");
    }

    /// Reads frames until one carries the wanted event name. Frames for
    /// other events (room-list updates and the like) are skipped.
    async fn recv_event(&mut self, event_name: &str) -> Value {
        loop {
            let frame = tokio::time::timeout(RECV_TIMEOUT, self.ws.next())
                .await
                .unwrap_or_else(|_| panic!("timed out waiting for '{event_name}'"))
                .expect("stream ended")
                .expect("websocket error");
            if let Message::Text(text) = frame {
                let value: Value = serde_json::from_str(&text).expect("frame is JSON");
                if value["event"] == event_name {
                    return value["data"].clone();
                }
            }
        }
    }
}

/// Sends one move and asserts both sides saw it.
async fn play_move(mover: &mut TestClient, other: &mut TestClient, room_id: &str, cell: usize) {
    mover
        .send(json!({"event": "makeMove", "data": {"roomId": room_id, "cellIndex": cell}}))
        .await;
    let seen_by_mover = mover.recv_event("moveMade").await;
    let seen_by_other = other.recv_event("moveMade").await;
    assert_eq!(seen_by_mover["cellIndex"], cell);
    assert_eq!(seen_by_other["cellIndex"], cell);
}

/// Creates a room with Alice and seats Bob, returning the room id.
async fn set_up_room(alice: &mut TestClient, bob: &mut TestClient) -> String {
    alice.send(json!({"event": "createRoom", "data": {"playerName": "Alice"}})).await;
    let created = alice.recv_event("roomCreated").await;
    let room_id = created["roomId"].as_str().expect("room id").to_string();
    assert_eq!(created["playerSymbol"], "X");
    assert_eq!(created["isHost"], true);

    bob.send(json!({
        "event": "joinWaitingRoom",
        "data": {"roomId": room_id, "playerName": "Bob"}
    }))
    .await;
    let joined = bob.recv_event("waitingRoomJoined").await;
    assert_eq!(joined["playerSymbol"], "O");
    room_id
}

#[tokio::test]
async fn test_full_game_scenario_x_wins_the_top_row() {
    let server = TestServer::start(18090).await;
    let mut alice = TestClient::connect(&server.ws_url()).await;
    let mut bob = TestClient::connect(&server.ws_url()).await;

    let room_id = set_up_room(&mut alice, &mut bob).await;

    // the host starts; both sides see it
    alice
        .send(json!({"event": "startGame", "data": {"roomId": room_id, "playerName": "Alice"}}))
        .await;
    alice.recv_event("gameStarting").await;
    bob.recv_event("gameStarting").await;

    // round-trip: checkRoom reports the playing room with the original
    // seats
    bob.send(json!({"event": "checkRoom", "data": {"roomId": room_id}}))
        .await;
    let status = bob.recv_event("roomStatus").await;
    assert_eq!(status["exists"], true);
    assert_eq!(status["status"], "playing");
    let players = status["players"].as_array().expect("players");
    assert!(players.iter().any(|p| p["name"] == "Alice" && p["symbol"] == "X"));
    assert!(players.iter().any(|p| p["name"] == "Bob" && p["symbol"] == "O"));

    // X takes the top row while O answers in the middle; both sides
    // drain each moveMade so their streams stay in step
    play_move(&mut alice, &mut bob, &room_id, 0).await;
    play_move(&mut bob, &mut alice, &room_id, 4).await;
    play_move(&mut alice, &mut bob, &room_id, 1).await;
    play_move(&mut bob, &mut alice, &room_id, 5).await;
    alice
        .send(json!({"event": "makeMove", "data": {"roomId": room_id, "cellIndex": 2}}))
        .await;

    let over = bob.recv_event("gameOver").await;
    assert_eq!(over["winner"], "X");
    assert_eq!(over["winningCombination"], json!([0, 1, 2]));
    assert_eq!(over["scores"]["X"], 1);
    assert_eq!(over["scores"]["O"], 0);
}

#[tokio::test]
async fn test_illegal_moves_are_not_broadcast() {
    let server = TestServer::start(18091).await;
    let mut alice = TestClient::connect(&server.ws_url()).await;
    let mut bob = TestClient::connect(&server.ws_url()).await;

    let room_id = set_up_room(&mut alice, &mut bob).await;
    alice
        .send(json!({"event": "startGame", "data": {"roomId": room_id, "playerName": "Alice"}}))
        .await;
    bob.recv_event("gameStarting").await;

    // O tries to open out of turn, then X moves legally; the only
    // moveMade Bob sees is X's
    bob.send(json!({"event": "makeMove", "data": {"roomId": room_id, "cellIndex": 8}}))
        .await;
    alice
        .send(json!({"event": "makeMove", "data": {"roomId": room_id, "cellIndex": 0}}))
        .await;
    let made = bob.recv_event("moveMade").await;
    assert_eq!(made["cellIndex"], 0);
    assert_eq!(made["symbol"], "X");
    assert_eq!(made["gameState"][8], "");
}

#[tokio::test]
async fn test_random_match_pairs_two_seekers() {
    let server = TestServer::start(18092).await;
    let mut p1 = TestClient::connect(&server.ws_url()).await;
    let mut p2 = TestClient::connect(&server.ws_url()).await;

    p1.send(json!({"event": "findRandomMatch", "data": {"playerName": "P1"}}))
        .await;
    p2.send(json!({"event": "findRandomMatch", "data": {"playerName": "P2"}}))
        .await;

    let first = p1.recv_event("randomMatchFound").await;
    let second = p2.recv_event("randomMatchFound").await;

    assert_eq!(first["playerSymbol"], "X");
    assert_eq!(first["isHost"], true);
    assert_eq!(first["opponentName"], "P2");
    assert_eq!(second["playerSymbol"], "O");
    assert_eq!(second["isHost"], false);
    assert_eq!(second["opponentName"], "P1");
    assert_eq!(first["roomId"], second["roomId"]);
    assert_eq!(first["waitingRoom"], false);
}

#[tokio::test]
async fn test_join_of_a_missing_room_reports_an_error() {
    let server = TestServer::start(18093).await;
    let mut client = TestClient::connect(&server.ws_url()).await;

    client
        .send(json!({
            "event": "joinRoom",
            "data": {"roomId": "deadbeef", "playerName": "Alice"}
        }))
        .await;

    let error = client.recv_event("error").await;
    assert_eq!(error["message"], "Room does not exist!");
}

#[tokio::test]
async fn test_http_surface_lists_rooms() {
    let server = TestServer::start(18094).await;
    let mut alice = TestClient::connect(&server.ws_url()).await;

    alice
        .send(json!({"event": "createRoom", "data": {"playerName": "Alice"}}))
        .await;
    let created = alice.recv_event("roomCreated").await;
    let room_id = created["roomId"].as_str().expect("room id");

    let client = reqwest::Client::new();
    let rooms: Value = client
        .get(server.api_url("/api/rooms"))
        .send()
        .await
        .expect("rooms request")
        .json()
        .await
        .expect("rooms json");
    let rooms = rooms.as_array().expect("rooms array");
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0]["id"], room_id);
    assert_eq!(rooms[0]["status"], "waiting");
    assert_eq!(rooms[0]["playerCount"], 1);

    let detail = client
        .get(server.api_url(&format!("/api/rooms/{room_id}")))
        .send()
        .await
        .expect("detail request");
    assert!(detail.status().is_success());

    let missing = client
        .get(server.api_url("/api/rooms/deadbeef"))
        .send()
        .await
        .expect("missing request");
    assert_eq!(missing.status().as_u16(), 404);
}
