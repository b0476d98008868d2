//! Fixed four-team single elimination bracket.
//!
//! The top four of the round-robin leaderboard play semifinals (1 v 4 and
//! 2 v 3). The winners meet for gold on court 1 and the losers play for
//! bronze on court 2.

use log::info;

use super::errors::{TournamentError, TournamentResult};
use super::models::{Match, StandingRow, TeamId};
use super::round::{Round, RoundLabel, RoundStatus};

/// Number of teams in the bracket
pub const PLAYOFF_SEEDS: usize = 4;

pub const SEMIFINAL_ROUND_ID: &str = "round-sf";
pub const FINALS_ROUND_ID: &str = "round-finals";
pub const GOLD_MATCH_ID: &str = "match-final-gold";
pub const BRONZE_MATCH_ID: &str = "match-final-bronze";

/// Build the semifinal round from a ranked leaderboard
///
/// # Errors
///
/// * `TournamentError::NotEnoughSeeds` - fewer than four rows
pub fn seed_semifinals(standings: &[StandingRow]) -> TournamentResult<Round> {
    if standings.len() < PLAYOFF_SEEDS {
        return Err(TournamentError::NotEnoughSeeds {
            needed: PLAYOFF_SEEDS,
            current: standings.len(),
        });
    }

    let mut seeds: Vec<&StandingRow> = standings.iter().collect();
    seeds.sort_by_key(|row| row.rank);
    let seed = |n: usize| seeds[n - 1].team_id.clone();

    info!(
        "Seeding semifinals: {} v {}, {} v {}",
        seed(1),
        seed(4),
        seed(2),
        seed(3)
    );

    Ok(Round::new(
        SEMIFINAL_ROUND_ID,
        RoundLabel::SemiFinal,
        vec![
            Match::new("match-sf-1", 1, seed(1), seed(4)).playoff(),
            Match::new("match-sf-2", 2, seed(2), seed(3)).playoff(),
        ],
    ))
}

/// Build the finals round from a submitted semifinal round
///
/// # Errors
///
/// * `TournamentError::InvalidRoundState` - semifinals not submitted
/// * `TournamentError::SemiFinalsIncomplete` - a semifinal has no winner
pub fn build_finals(semifinals: &Round) -> TournamentResult<Round> {
    if semifinals.status != RoundStatus::Submitted {
        return Err(TournamentError::InvalidRoundState {
            round: semifinals.id.clone(),
            action: "advance from",
            status: semifinals.status,
        });
    }

    let [first, second] = semifinals.matches.as_slice() else {
        return Err(TournamentError::SemiFinalsIncomplete);
    };
    let (winner_1, loser_1) = decided(first)?;
    let (winner_2, loser_2) = decided(second)?;

    info!("Finals: {winner_1} v {winner_2} for gold, {loser_1} v {loser_2} for bronze");

    Ok(Round::new(
        FINALS_ROUND_ID,
        RoundLabel::Finals,
        vec![
            Match::new(GOLD_MATCH_ID, 1, winner_1, winner_2).playoff(),
            Match::new(BRONZE_MATCH_ID, 2, loser_1, loser_2).playoff(),
        ],
    ))
}

fn decided(m: &Match) -> TournamentResult<(TeamId, TeamId)> {
    match (m.winner(), m.loser()) {
        (Some(winner), Some(loser)) => Ok((winner.clone(), loser.clone())),
        _ => Err(TournamentError::SemiFinalsIncomplete),
    }
}

/// Gold medal winner, once the finals round is submitted
pub fn champion(finals: &Round) -> Option<&TeamId> {
    if !finals.is_submitted() {
        return None;
    }
    finals.find_match(GOLD_MATCH_ID)?.winner()
}
