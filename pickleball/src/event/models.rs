//! Event snapshot model and read-only queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use uuid::Uuid;

use super::config::{EventConfig, SchedulePreview};
use crate::tournament::{
    Eligibility, Round, RoundStatus, StandingRow, Team, TeamId, TournamentResult, champion,
    compute_standings, playoffs::FINALS_ROUND_ID,
};

/// Event ID type
pub type EventId = String;

/// Which rounds a leaderboard covers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundSelection {
    #[default]
    RoundRobin,
    Playoffs,
    All,
}

/// Full event snapshot
///
/// An event is a value: every update in [`super::operations`] returns a new
/// snapshot and leaves the current one untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub created_at: DateTime<Utc>,
    /// Secret that identifies the host
    pub host_token: String,
    pub config: EventConfig,
    pub teams: Vec<Team>,
    /// Round-robin rounds, empty until teams are confirmed
    pub rounds: Vec<Round>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playoff_rounds: Option<Vec<Round>>,
}

/// Generate a fresh host secret
pub fn new_host_token() -> String {
    Uuid::new_v4().to_string()
}

fn new_event_id() -> EventId {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(10);
    id
}

impl Event {
    /// Create an event with no teams yet
    ///
    /// # Errors
    ///
    /// Returns the first configuration problem found by [`EventConfig::validate`].
    pub fn new(config: EventConfig, now: DateTime<Utc>) -> TournamentResult<Self> {
        config.validate()?;

        Ok(Self {
            id: new_event_id(),
            created_at: now,
            host_token: new_host_token(),
            config,
            teams: Vec::new(),
            rounds: Vec::new(),
            playoff_rounds: None,
        })
    }

    /// Default roster: `Team 1..=n` with ids `team-1..=n`
    pub fn placeholder_teams(n: u32) -> Vec<Team> {
        (1..=n)
            .map(|i| Team::new(format!("team-{i}"), format!("Team {i}")))
            .collect()
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn number_of_teams(&self) -> u32 {
        self.config.number_of_teams
    }

    pub fn number_of_courts(&self) -> u32 {
        self.config.number_of_courts
    }

    pub fn preview(&self) -> SchedulePreview {
        self.config.preview()
    }

    pub fn team(&self, team_id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    /// Display name for a team id, falling back to the id itself
    pub fn team_name<'a>(&'a self, team_id: &'a str) -> &'a str {
        self.team(team_id).map_or(team_id, |t| t.name.as_str())
    }

    pub fn playoff_rounds(&self) -> &[Round] {
        self.playoff_rounds.as_deref().unwrap_or_default()
    }

    /// Round robin followed by playoff rounds
    pub fn all_rounds(&self) -> impl Iterator<Item = &Round> {
        self.rounds.iter().chain(self.playoff_rounds())
    }

    pub fn find_round(&self, round_id: &str) -> Option<&Round> {
        self.all_rounds().find(|r| r.id == round_id)
    }

    /// Whether any round-robin round has left `NotStarted`
    pub fn has_started(&self) -> bool {
        self.rounds
            .iter()
            .any(|r| r.status != RoundStatus::NotStarted)
    }

    pub fn submitted_round_count(&self) -> usize {
        self.rounds.iter().filter(|r| r.is_submitted()).count()
    }

    pub fn all_round_robin_submitted(&self) -> bool {
        !self.rounds.is_empty() && self.rounds.iter().all(Round::is_submitted)
    }

    pub fn selected_rounds(&self, selection: RoundSelection) -> Vec<&Round> {
        match selection {
            RoundSelection::RoundRobin => self.rounds.iter().collect(),
            RoundSelection::Playoffs => self.playoff_rounds().iter().collect(),
            RoundSelection::All => self.all_rounds().collect(),
        }
    }

    /// Leaderboard over the selected rounds
    pub fn standings(&self, selection: RoundSelection, eligibility: Eligibility) -> Vec<StandingRow> {
        compute_standings(&self.teams, self.selected_rounds(selection), eligibility)
    }

    /// Gold medal team, once the finals are submitted
    pub fn champion(&self) -> Option<&Team> {
        let finals = self
            .playoff_rounds()
            .iter()
            .find(|r| r.id == FINALS_ROUND_ID)?;
        let winner: &TeamId = champion(finals)?;
        self.team(winner)
    }

    /// Whether `token` is this event's host secret
    pub fn is_host(&self, token: Option<&str>) -> bool {
        token.is_some_and(|token| {
            bool::from(token.as_bytes().ct_eq(self.host_token.as_bytes()))
        })
    }
}
