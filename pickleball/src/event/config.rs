//! Event configuration models.

use serde::{Deserialize, Serialize};

use crate::tournament::{TournamentError, TournamentResult, scheduler::MIN_TEAMS};

/// How the host intends to score games. Stored for display only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringType {
    #[default]
    Traditional,
    PointsFor,
    WinDiff,
}

impl std::fmt::Display for ScoringType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringType::Traditional => write!(f, "traditional"),
            ScoringType::PointsFor => write!(f, "points_for"),
            ScoringType::WinDiff => write!(f, "win_diff"),
        }
    }
}

impl std::str::FromStr for ScoringType {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "traditional" => Ok(ScoringType::Traditional),
            "points_for" | "points-for" => Ok(ScoringType::PointsFor),
            "win_diff" | "win-diff" => Ok(ScoringType::WinDiff),
            other => Err(TournamentError::InvalidConfig(format!(
                "unknown scoring type '{other}'"
            ))),
        }
    }
}

/// Event configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventConfig {
    /// Event name
    pub name: String,
    /// Number of teams in the round robin
    pub number_of_teams: u32,
    /// Courts available per round
    pub number_of_courts: u32,
    /// Target score (usually 11, 15 or 21)
    pub points_per_game: u32,
    pub win_by_2: bool,
    pub scoring_type: ScoringType,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            name: "Open Play".to_string(),
            number_of_teams: 6,
            number_of_courts: 3,
            points_per_game: 11,
            win_by_2: true,
            scoring_type: ScoringType::Traditional,
        }
    }
}

impl EventConfig {
    /// Create a configuration with default scoring
    pub fn new(name: impl Into<String>, number_of_teams: u32, number_of_courts: u32) -> Self {
        Self {
            name: name.into(),
            number_of_teams,
            number_of_courts,
            ..Self::default()
        }
    }

    pub fn with_points_per_game(mut self, points: u32) -> Self {
        self.points_per_game = points;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> TournamentResult<()> {
        if self.name.trim().is_empty() {
            return Err(TournamentError::InvalidConfig(
                "event name must not be empty".to_string(),
            ));
        }

        if (self.number_of_teams as usize) < MIN_TEAMS {
            return Err(TournamentError::NotEnoughTeams {
                needed: MIN_TEAMS,
                current: self.number_of_teams as usize,
            });
        }

        if self.number_of_courts == 0 {
            return Err(TournamentError::NoCourts);
        }

        if self.points_per_game == 0 {
            return Err(TournamentError::InvalidConfig(
                "points per game must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Shape of the schedule this configuration produces
    pub fn preview(&self) -> SchedulePreview {
        SchedulePreview::for_counts(self.number_of_teams, self.number_of_courts)
    }
}

/// Schedule shape, known before any team is entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulePreview {
    pub total_rounds: u32,
    pub matches_per_round: u32,
    pub waves_per_round: u32,
    /// Teams sitting out each round (0 or 1)
    pub byes_per_round: u32,
    /// `n * (n - 1) / 2`, which outgrows `u32` past 65,536 teams
    pub total_matches: u64,
}

impl SchedulePreview {
    pub fn for_counts(teams: u32, courts: u32) -> Self {
        let total_rounds = if teams % 2 == 0 {
            teams.saturating_sub(1)
        } else {
            teams
        };
        let matches_per_round = teams / 2;
        let waves_per_round = if courts == 0 {
            0
        } else {
            matches_per_round.div_ceil(courts)
        };

        Self {
            total_rounds,
            matches_per_round,
            waves_per_round,
            byes_per_round: teams % 2,
            total_matches: u64::from(teams) * u64::from(teams.saturating_sub(1)) / 2,
        }
    }
}
