//! Event module: configuration, snapshot model and host operations.
//!
//! An [`Event`] bundles a configuration, the confirmed roster and every
//! round played so far. Host actions (timer control, scoring, playoffs) are
//! methods that return a new snapshot, so a failed action never leaves a
//! half-applied state behind.

pub mod config;
pub mod models;
pub mod operations;

pub use config::{EventConfig, SchedulePreview, ScoringType};
pub use models::{Event, EventId, RoundSelection, new_host_token};
