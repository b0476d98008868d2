//! Persistence for event snapshots and host tokens.

pub mod errors;
pub mod json_file;
pub mod memory;
pub mod repository;

pub use errors::{StorageError, StorageResult};
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use repository::{EventStore, HostTokenStore, authorize_host};
