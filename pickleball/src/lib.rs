//! # Pickleball
//!
//! Round-robin scheduling, live scoring and standings for pickleball events.
//!
//! An event runs through three phases:
//!
//! - **Setup**: configure team and court counts, name the teams
//! - **Round robin**: every team plays every other team once, rounds are timed,
//!   scored and submitted by the host
//! - **Playoffs**: the top four play semifinals, then gold and bronze finals
//!
//! ## Core Modules
//!
//! - [`tournament`]: Scheduler, round lifecycle, standings and playoff bracket
//! - [`event`]: Event snapshot, configuration and host operations
//! - [`storage`]: Event and host token persistence
//! - [`share`]: Spectator links
//!
//! ## Example
//!
//! ```
//! use chrono::Utc;
//! use pickleball::{Eligibility, Event, EventConfig, RoundSelection, Side};
//!
//! let event = Event::new(EventConfig::new("Friday Social", 4, 2), Utc::now()).unwrap();
//! let event = event.confirm_teams(Event::placeholder_teams(4)).unwrap();
//!
//! let round_id = event.rounds[0].id.clone();
//! let match_id = event.rounds[0].matches[0].id.clone();
//! let event = event
//!     .set_score(&round_id, &match_id, Side::A, Some(11), Utc::now())
//!     .and_then(|e| e.set_score(&round_id, &match_id, Side::B, Some(7), Utc::now()))
//!     .unwrap();
//!
//! let table = event.standings(RoundSelection::RoundRobin, Eligibility::Live);
//! assert_eq!(table[0].wins, 1);
//! ```

/// Event configuration, snapshot and host operations.
pub mod event;
pub use event::{Event, EventConfig, EventId, RoundSelection, SchedulePreview, ScoringType};

/// Share link helpers.
pub mod share;
pub use share::{event_share_url, parse_share_fragment};

/// Event persistence.
pub mod storage;
pub use storage::{
    EventStore, HostTokenStore, JsonFileStore, MemoryStore, StorageError, StorageResult,
    authorize_host,
};

/// Scheduling, standings and playoffs.
pub mod tournament;
pub use tournament::{
    Eligibility, Match, MatchStatus, Round, RoundLabel, RoundStatus, Side, StandingRow, Team,
    TournamentError, TournamentResult, format_clock,
};
