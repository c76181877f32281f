//! WebSocket connection lifecycle.
//!
//! One task pair per connection: the receive loop parses frames into
//! [`ClientEvent`]s and dispatches them, the pusher loop forwards frames
//! queued by the [`crate::domain::MessagePusher`] back to the socket.
//! When either side ends, the disconnect flow runs.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::sync::mpsc;

use crate::domain::ConnectionId;
use crate::infrastructure::dto::websocket::{ClientEvent, ServerEvent};

use super::super::state::AppState;
use super::event;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Forwards frames queued for this connection to its WebSocket sink.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();
    let (tx, rx) = mpsc::unbounded_channel();
    state
        .pusher
        .register_connection(connection_id.clone(), tx)
        .await;
    tracing::info!("Connection '{}' accepted", connection_id);

    let (sender, receiver) = socket.split();
    let mut send_task = pusher_loop(rx, sender);

    // every new connection gets the current room list
    let rooms = state.list_rooms.room_id_strings().await;
    if let Err(e) = state
        .pusher
        .push_to(
            &connection_id,
            &ServerEvent::AvailableRooms { rooms }.to_json(),
        )
        .await
    {
        tracing::warn!("Failed to send room list to '{}': {}", connection_id, e);
    }

    let state_for_read = Arc::clone(&state);
    let connection_for_read = connection_id.clone();
    let mut recv_task =
        tokio::spawn(async move { read_loop(receiver, state_for_read, connection_for_read).await });

    // whichever task finishes first tears the session down
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    event::handle_disconnect(&state, &connection_id).await;
    state.pusher.unregister_connection(&connection_id).await;
    tracing::info!("Connection '{}' closed", connection_id);
}

async fn read_loop(
    mut receiver: SplitStream<WebSocket>,
    state: Arc<AppState>,
    connection_id: ConnectionId,
) {
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::error!("WebSocket error on '{}': {}", connection_id, e);
                break;
            }
        };

        match msg {
            Message::Text(text) => match serde_json::from_str::<ClientEvent>(&text) {
                Ok(client_event) => {
                    tracing::debug!("Event from '{}': {:?}", connection_id, client_event);
                    event::dispatch(&state, &connection_id, client_event).await;
                }
                Err(e) => {
                    tracing::warn!("Unparseable frame from '{}': {}", connection_id, e);
                }
            },
            Message::Ping(_) => {
                // handled by the protocol layer
                tracing::debug!("Received ping from '{}'", connection_id);
            }
            Message::Close(_) => {
                tracing::info!("Connection '{}' requested close", connection_id);
                break;
            }
            _ => {}
        }
    }
}
