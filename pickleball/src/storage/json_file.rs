//! JSON document store on the local filesystem.
//!
//! Layout inside the data directory:
//! - `pb_events_v1.json`: object mapping event id to event snapshot
//! - `host_tokens.json`: object mapping event id to host token
//!
//! Writes go to a temporary sibling first and are renamed into place.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, info};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tokio::sync::Mutex;

use super::errors::StorageResult;
use super::repository::{EventStore, HostTokenStore};
use crate::event::{Event, EventId};

pub const EVENTS_FILE: &str = "pb_events_v1.json";
pub const HOST_TOKENS_FILE: &str = "host_tokens.json";

/// Event and token store persisted as two JSON documents
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
    // Serializes read-modify-write cycles on both documents
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn events_path(&self) -> PathBuf {
        self.dir.join(EVENTS_FILE)
    }

    fn tokens_path(&self) -> PathBuf {
        self.dir.join(HOST_TOKENS_FILE)
    }
}

async fn read_map<T: DeserializeOwned>(path: &Path) -> StorageResult<HashMap<EventId, T>> {
    match fs::read(path).await {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
        Err(e) => Err(e.into()),
    }
}

async fn write_map<T: Serialize>(path: &Path, map: &HashMap<EventId, T>) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let bytes = serde_json::to_vec_pretty(map)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, &bytes).await?;
    fs::rename(&tmp, path).await?;

    debug!("Wrote {} entries to {}", map.len(), path.display());
    Ok(())
}

#[async_trait]
impl EventStore for JsonFileStore {
    async fn save(&self, event: &Event) -> StorageResult<()> {
        let _guard = self.lock.lock().await;
        let path = self.events_path();
        let mut events: HashMap<EventId, Event> = read_map(&path).await?;
        events.insert(event.id.clone(), event.clone());
        write_map(&path, &events).await
    }

    async fn load(&self, event_id: &str) -> StorageResult<Option<Event>> {
        let _guard = self.lock.lock().await;
        let mut events: HashMap<EventId, Event> = read_map(&self.events_path()).await?;
        Ok(events.remove(event_id))
    }

    async fn delete(&self, event_id: &str) -> StorageResult<()> {
        let _guard = self.lock.lock().await;

        let events_path = self.events_path();
        let mut events: HashMap<EventId, Event> = read_map(&events_path).await?;
        if events.remove(event_id).is_some() {
            write_map(&events_path, &events).await?;
            info!("Deleted event {event_id}");
        }

        let tokens_path = self.tokens_path();
        let mut tokens: HashMap<EventId, String> = read_map(&tokens_path).await?;
        if tokens.remove(event_id).is_some() {
            write_map(&tokens_path, &tokens).await?;
        }

        Ok(())
    }

    async fn list_all(&self) -> StorageResult<HashMap<EventId, Event>> {
        let _guard = self.lock.lock().await;
        read_map(&self.events_path()).await
    }
}

#[async_trait]
impl HostTokenStore for JsonFileStore {
    async fn set_token(&self, event_id: &str, token: &str) -> StorageResult<()> {
        let _guard = self.lock.lock().await;
        let path = self.tokens_path();
        let mut tokens: HashMap<EventId, String> = read_map(&path).await?;
        tokens.insert(event_id.to_string(), token.to_string());
        write_map(&path, &tokens).await
    }

    async fn get_token(&self, event_id: &str) -> StorageResult<Option<String>> {
        let _guard = self.lock.lock().await;
        let mut tokens: HashMap<EventId, String> = read_map(&self.tokens_path()).await?;
        Ok(tokens.remove(event_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventConfig;
    use crate::storage::StorageError;
    use chrono::Utc;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("pb-store-{}", uuid::Uuid::new_v4().simple()))
    }

    #[tokio::test]
    async fn test_missing_files_read_as_empty() {
        let store = JsonFileStore::new(scratch_dir());
        assert!(store.list_all().await.unwrap().is_empty());
        assert!(store.get_token("x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_creates_documents() {
        let dir = scratch_dir();
        let store = JsonFileStore::new(&dir);
        let ev = Event::new(EventConfig::default(), Utc::now()).unwrap();

        store.save(&ev).await.unwrap();
        store.set_token(&ev.id, &ev.host_token).await.unwrap();

        assert!(dir.join(EVENTS_FILE).exists());
        assert!(dir.join(HOST_TOKENS_FILE).exists());
        assert!(!dir.join("pb_events_v1.json.tmp").exists());
        assert_eq!(store.load(&ev.id).await.unwrap(), Some(ev));

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_corrupt_document_is_reported() {
        let dir = scratch_dir();
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(EVENTS_FILE), b"{not json").unwrap();

        let store = JsonFileStore::new(&dir);
        assert!(matches!(
            store.list_all().await,
            Err(StorageError::Serialization(_))
        ));

        let _ = std::fs::remove_dir_all(dir);
    }
}
