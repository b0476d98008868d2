//! Repository trait definitions for event persistence and host identity.
//!
//! Stores hold whole event snapshots keyed by id. Host tokens live in a
//! separate store so a device can remember which events it hosts.

use std::collections::HashMap;

use async_trait::async_trait;
use log::warn;

use super::errors::StorageResult;
use crate::event::{Event, EventId};

/// Trait for event snapshot persistence
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Insert or replace an event
    async fn save(&self, event: &Event) -> StorageResult<()>;

    /// Find an event by id
    async fn load(&self, event_id: &str) -> StorageResult<Option<Event>>;

    /// Remove an event. Missing ids are not an error.
    async fn delete(&self, event_id: &str) -> StorageResult<()>;

    /// Every stored event keyed by id
    async fn list_all(&self) -> StorageResult<HashMap<EventId, Event>>;
}

/// Trait for host token bookkeeping
#[async_trait]
pub trait HostTokenStore: Send + Sync {
    async fn set_token(&self, event_id: &str, token: &str) -> StorageResult<()>;

    async fn get_token(&self, event_id: &str) -> StorageResult<Option<String>>;
}

/// Whether the stored token for `event` proves host rights
pub async fn authorize_host<S>(store: &S, event: &Event) -> StorageResult<bool>
where
    S: HostTokenStore + ?Sized,
{
    let token = store.get_token(&event.id).await?;
    let authorized = event.is_host(token.as_deref());
    if !authorized {
        warn!("Host check failed for event {}", event.id);
    }
    Ok(authorized)
}
