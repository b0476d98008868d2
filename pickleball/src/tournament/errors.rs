//! Tournament error types.

use thiserror::Error;

use super::models::{MatchId, RoundId, TeamId};
use super::round::RoundStatus;

/// Tournament errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TournamentError {
    #[error("Invalid input: need at least {needed} teams, have {current}")]
    NotEnoughTeams { needed: usize, current: usize },

    #[error("Invalid input: at least one court is required")]
    NoCourts,

    #[error("Invalid input: expected {expected} teams, got {actual}")]
    TeamCountMismatch { expected: usize, actual: usize },

    #[error("Invalid input: team {0} appears more than once")]
    DuplicateTeam(TeamId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Team not found: {0}")]
    TeamNotFound(TeamId),

    #[error("Round not found: {0}")]
    RoundNotFound(RoundId),

    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    #[error("Team {team} is not playing in match {match_id}")]
    TeamNotInMatch { team: TeamId, match_id: MatchId },

    #[error("Cannot {action} round {round} while it is {status}")]
    InvalidRoundState {
        round: RoundId,
        action: &'static str,
        status: RoundStatus,
    },

    #[error("Round {0} has been submitted and can no longer be edited")]
    RoundSubmitted(RoundId),

    #[error("Tournament already started")]
    TournamentStarted,

    #[error("Round robin incomplete: {submitted} of {total} rounds submitted")]
    RoundRobinIncomplete { submitted: usize, total: usize },

    #[error("Insufficient teams for playoffs: need {needed}, have {current}")]
    NotEnoughSeeds { needed: usize, current: usize },

    #[error("Playoffs already started")]
    PlayoffsAlreadyStarted,

    #[error("Semifinals are not decided yet")]
    SemiFinalsIncomplete,

    #[error("Finals already scheduled")]
    FinalsAlreadyScheduled,
}

pub type TournamentResult<T> = Result<T, TournamentError>;
