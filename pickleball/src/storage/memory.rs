//! In-memory store, used by tests and short-lived sessions.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::errors::StorageResult;
use super::repository::{EventStore, HostTokenStore};
use crate::event::{Event, EventId};

/// Event and token store backed by hash maps
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    events: Arc<RwLock<HashMap<EventId, Event>>>,
    tokens: Arc<RwLock<HashMap<EventId, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn save(&self, event: &Event) -> StorageResult<()> {
        self.events
            .write()
            .await
            .insert(event.id.clone(), event.clone());
        Ok(())
    }

    async fn load(&self, event_id: &str) -> StorageResult<Option<Event>> {
        Ok(self.events.read().await.get(event_id).cloned())
    }

    async fn delete(&self, event_id: &str) -> StorageResult<()> {
        self.events.write().await.remove(event_id);
        self.tokens.write().await.remove(event_id);
        Ok(())
    }

    async fn list_all(&self) -> StorageResult<HashMap<EventId, Event>> {
        Ok(self.events.read().await.clone())
    }
}

#[async_trait]
impl HostTokenStore for MemoryStore {
    async fn set_token(&self, event_id: &str, token: &str) -> StorageResult<()> {
        self.tokens
            .write()
            .await
            .insert(event_id.to_string(), token.to_string());
        Ok(())
    }

    async fn get_token(&self, event_id: &str) -> StorageResult<Option<String>> {
        Ok(self.tokens.read().await.get(event_id).cloned())
    }
}
