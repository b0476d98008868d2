//! Tournament module: round-robin scheduling, standings and playoffs.
//!
//! This module provides the pure core of an event:
//! - Circle-method round-robin schedule with court and wave assignment
//! - Round timer lifecycle (start, pause, submit, reset)
//! - Leaderboard computation over any subset of rounds
//! - Four-team playoff bracket seeded from the leaderboard
//!
//! ## Example
//!
//! ```
//! use pickleball::tournament::{Eligibility, Team, compute_standings, generate_schedule};
//!
//! let teams: Vec<Team> = (1..=6)
//!     .map(|i| Team::new(format!("team-{i}"), format!("Team {i}")))
//!     .collect();
//!
//! // Six teams on three courts: five rounds of three matches
//! let rounds = generate_schedule(&teams, 3).unwrap();
//! assert_eq!(rounds.len(), 5);
//!
//! let standings = compute_standings(&teams, &rounds, Eligibility::Live);
//! assert_eq!(standings.len(), 6);
//! ```

pub mod errors;
pub mod models;
pub mod playoffs;
pub mod round;
pub mod scheduler;
pub mod standings;

pub use errors::{TournamentError, TournamentResult};
pub use models::{Match, MatchId, MatchStatus, RoundId, Side, StandingRow, Team, TeamId};
pub use playoffs::{PLAYOFF_SEEDS, build_finals, champion, seed_semifinals};
pub use round::{Round, RoundLabel, RoundStatus, format_clock};
pub use scheduler::{Pairing, circle_pairings, generate_schedule, generate_schedule_for_ids};
pub use standings::{Eligibility, compute_standings};
