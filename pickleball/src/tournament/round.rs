//! Rounds and the round timer lifecycle.
//!
//! A round moves `NotStarted -> InProgress <-> Stopped -> Submitted`. The
//! timer never ticks on its own: a running round stores the instant it was
//! started, and the live duration is computed from a caller supplied `now`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::{TournamentError, TournamentResult};
use super::models::{Match, MatchId, RoundId, TeamId};

/// Round lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    NotStarted,
    InProgress,
    Stopped,
    /// Terminal for scoring purposes
    Submitted,
}

impl std::fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundStatus::NotStarted => write!(f, "not_started"),
            RoundStatus::InProgress => write!(f, "in_progress"),
            RoundStatus::Stopped => write!(f, "stopped"),
            RoundStatus::Submitted => write!(f, "submitted"),
        }
    }
}

/// Round label: sequential number for round robin, stage name for playoffs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundLabel {
    Number(u32),
    SemiFinal,
    Finals,
}

impl RoundLabel {
    pub fn is_playoff(&self) -> bool {
        !matches!(self, RoundLabel::Number(_))
    }
}

impl std::fmt::Display for RoundLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundLabel::Number(n) => write!(f, "Round {n}"),
            RoundLabel::SemiFinal => write!(f, "SF"),
            RoundLabel::Finals => write!(f, "FINALS"),
        }
    }
}

/// A time-boxed round of matches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub label: RoundLabel,
    pub status: RoundStatus,
    /// Set only while the timer runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    /// Seconds accumulated by earlier start/stop cycles
    pub elapsed_seconds: u64,
    pub matches: Vec<Match>,
    /// Teams without a match this round
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub byes: Vec<TeamId>,
}

impl Round {
    /// Create a round that has not started
    pub fn new(id: impl Into<RoundId>, label: RoundLabel, matches: Vec<Match>) -> Self {
        Self {
            id: id.into(),
            label,
            status: RoundStatus::NotStarted,
            started_at: None,
            elapsed_seconds: 0,
            matches,
            byes: Vec::new(),
        }
    }

    pub fn with_byes(mut self, byes: Vec<TeamId>) -> Self {
        self.byes = byes;
        self
    }

    pub fn is_submitted(&self) -> bool {
        self.status == RoundStatus::Submitted
    }

    pub fn find_match(&self, match_id: &str) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == match_id)
    }

    /// Number of waves the matches are spread over
    pub fn wave_count(&self) -> u32 {
        self.matches
            .iter()
            .map(|m| m.wave_number.unwrap_or(1))
            .max()
            .unwrap_or(0)
    }

    /// Total seconds on the clock at `now`
    pub fn elapsed_seconds_at(&self, now: DateTime<Utc>) -> u64 {
        match (self.status, self.started_at) {
            (RoundStatus::InProgress, Some(started_at)) => {
                self.elapsed_seconds + seconds_between(started_at, now)
            }
            _ => self.elapsed_seconds,
        }
    }

    /// Start or resume the timer
    pub fn start(&self, now: DateTime<Utc>) -> TournamentResult<Self> {
        match self.status {
            RoundStatus::NotStarted | RoundStatus::Stopped => Ok(Self {
                status: RoundStatus::InProgress,
                started_at: Some(now),
                ..self.clone()
            }),
            status => Err(self.invalid_state("start", status)),
        }
    }

    /// Stop the timer, folding the running segment into `elapsed_seconds`
    pub fn pause(&self, now: DateTime<Utc>) -> TournamentResult<Self> {
        match self.status {
            RoundStatus::InProgress => Ok(Self {
                status: RoundStatus::Stopped,
                started_at: None,
                elapsed_seconds: self.elapsed_seconds_at(now),
                ..self.clone()
            }),
            status => Err(self.invalid_state("pause", status)),
        }
    }

    /// Pause if running, otherwise an unchanged copy
    pub fn pause_if_running(&self, now: DateTime<Utc>) -> Self {
        self.pause(now).unwrap_or_else(|_| self.clone())
    }

    /// Lock the round. A running timer is stopped first.
    pub fn submit(&self, now: DateTime<Utc>) -> TournamentResult<Self> {
        if self.is_submitted() {
            return Err(self.invalid_state("submit", self.status));
        }

        Ok(Self {
            status: RoundStatus::Submitted,
            started_at: None,
            elapsed_seconds: self.elapsed_seconds_at(now),
            ..self.clone()
        })
    }

    /// Wipe scores, winners and the timer
    pub fn reset(&self) -> TournamentResult<Self> {
        if self.is_submitted() {
            return Err(TournamentError::RoundSubmitted(self.id.clone()));
        }

        Ok(Self {
            status: RoundStatus::NotStarted,
            started_at: None,
            elapsed_seconds: 0,
            matches: self.matches.iter().map(Match::cleared).collect(),
            ..self.clone()
        })
    }

    /// Copy of this round with one match replaced by `update`
    pub fn update_match<F>(&self, match_id: &str, update: F) -> TournamentResult<Self>
    where
        F: FnOnce(&Match) -> TournamentResult<Match>,
    {
        if self.is_submitted() {
            return Err(TournamentError::RoundSubmitted(self.id.clone()));
        }

        let index = self
            .matches
            .iter()
            .position(|m| m.id == match_id)
            .ok_or_else(|| TournamentError::MatchNotFound(MatchId::from(match_id)))?;

        let mut next = self.clone();
        next.matches[index] = update(&self.matches[index])?;
        Ok(next)
    }

    fn invalid_state(&self, action: &'static str, status: RoundStatus) -> TournamentError {
        TournamentError::InvalidRoundState {
            round: self.id.clone(),
            action,
            status,
        }
    }
}

fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
    u64::try_from((to - from).num_seconds()).unwrap_or(0)
}

/// Format seconds as `MM:SS`
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
