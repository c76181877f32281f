//! Deferred deletion of rooms whose players all disconnected.
//!
//! One cancellable timer per room id. Scheduling while a timer is
//! already pending keeps the running one (the clock is never reset), and
//! a timer that fires after the room was deleted through another path is
//! a no-op.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::domain::{DeletionScheduler, MessagePusher, RoomId, RoomRegistry};
use crate::infrastructure::dto::websocket::ServerEvent;

pub struct RoomReaper {
    registry: Arc<dyn RoomRegistry>,
    pusher: Arc<dyn MessagePusher>,
    grace: Duration,
    timers: Arc<Mutex<HashMap<String, JoinHandle<()>>>>,
}

impl RoomReaper {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        pusher: Arc<dyn MessagePusher>,
        grace: Duration,
    ) -> Self {
        Self {
            registry,
            pusher,
            grace,
            timers: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl DeletionScheduler for RoomReaper {
    async fn schedule(&self, room_id: RoomId) {
        let mut timers = self.timers.lock().await;
        if timers.contains_key(room_id.as_str()) {
            tracing::debug!("Deletion timer for room {} already pending", room_id);
            return;
        }
        tracing::info!(
            "No connected players in room {}, scheduling deletion in {:?}",
            room_id,
            self.grace
        );

        let registry = Arc::clone(&self.registry);
        let pusher = Arc::clone(&self.pusher);
        let timer_map = Arc::clone(&self.timers);
        let grace = self.grace;
        let key = room_id.as_str().to_string();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            timer_map.lock().await.remove(room_id.as_str());
            if registry.delete_room(&room_id).await {
                tracing::info!("Room {} deleted after grace period", room_id);
            } else {
                tracing::debug!("Room {} was already gone when its timer fired", room_id);
            }
            let rooms = registry
                .room_ids()
                .await
                .iter()
                .map(|id| id.as_str().to_string())
                .collect();
            pusher
                .broadcast_all(&ServerEvent::AvailableRooms { rooms }.to_json())
                .await;
        });
        timers.insert(key, handle);
    }

    async fn cancel(&self, room_id: &RoomId) {
        let mut timers = self.timers.lock().await;
        if let Some(handle) = timers.remove(room_id.as_str()) {
            handle.abort();
            tracing::info!("Deletion timer cancelled for room {}", room_id);
        }
    }
}
