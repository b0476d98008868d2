//! Round-robin schedule generation using the circle method.
//!
//! Teams sit around a circle with the first team fixed as the anchor. Each
//! round pairs opposite seats, then every seat except the anchor moves one
//! place clockwise. With an odd number of teams an empty seat joins the
//! circle and whoever faces it sits the round out.

use std::collections::HashSet;

use log::debug;

use super::errors::{TournamentError, TournamentResult};
use super::models::{Match, Team, TeamId};
use super::round::{Round, RoundLabel};

/// Minimum number of teams for a schedule
pub const MIN_TEAMS: usize = 2;

/// Outcome of one seat pairing in a round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pairing {
    /// Two teams play each other
    Paired(TeamId, TeamId),
    /// The team has no opponent this round
    Bye(TeamId),
}

#[derive(Debug, Clone)]
enum Seat {
    Team(TeamId),
    Empty,
}

fn pair(left: &Seat, right: &Seat) -> Option<Pairing> {
    match (left, right) {
        (Seat::Team(a), Seat::Team(b)) => Some(Pairing::Paired(a.clone(), b.clone())),
        (Seat::Team(team), Seat::Empty) | (Seat::Empty, Seat::Team(team)) => {
            Some(Pairing::Bye(team.clone()))
        }
        (Seat::Empty, Seat::Empty) => None,
    }
}

/// Pairings for every round, in seat order
///
/// Returns `N - 1` rounds for an even team count and `N` rounds for an odd
/// one. Every unordered pair of teams is paired exactly once.
pub fn circle_pairings(team_ids: &[TeamId]) -> Vec<Vec<Pairing>> {
    let mut circle: Vec<Seat> = team_ids.iter().cloned().map(Seat::Team).collect();
    if circle.len() % 2 == 1 {
        circle.push(Seat::Empty);
    }

    let seats = circle.len();
    let mut rounds = Vec::with_capacity(seats.saturating_sub(1));

    for _ in 1..seats {
        let pairings = (0..seats / 2)
            .filter_map(|i| pair(&circle[i], &circle[seats - 1 - i]))
            .collect();
        rounds.push(pairings);

        // The anchor at seat 0 never moves
        if let Some(last) = circle.pop() {
            circle.insert(1, last);
        }
    }

    rounds
}

/// Court and wave for the match at `position` within a round
///
/// Courts fill in order; once every court is used the next match starts a
/// new wave on court 1.
pub fn court_and_wave(position: usize, courts: u32) -> (u32, u32) {
    let courts = courts.max(1) as usize;
    ((position % courts) as u32 + 1, (position / courts) as u32 + 1)
}

/// Generate the full round-robin schedule for `teams` on `courts` courts
///
/// # Errors
///
/// * `TournamentError::NotEnoughTeams` - fewer than two teams
/// * `TournamentError::NoCourts` - zero courts
/// * `TournamentError::DuplicateTeam` - a team id appears twice
pub fn generate_schedule(teams: &[Team], courts: u32) -> TournamentResult<Vec<Round>> {
    let team_ids: Vec<TeamId> = teams.iter().map(|t| t.id.clone()).collect();
    generate_schedule_for_ids(&team_ids, courts)
}

/// Same as [`generate_schedule`], keyed by team id only
pub fn generate_schedule_for_ids(team_ids: &[TeamId], courts: u32) -> TournamentResult<Vec<Round>> {
    validate_input(team_ids, courts)?;

    let rounds: Vec<Round> = circle_pairings(team_ids)
        .into_iter()
        .enumerate()
        .map(|(index, pairings)| build_round(index, pairings, courts))
        .collect();

    debug!(
        "Generated {} rounds for {} teams on {} courts",
        rounds.len(),
        team_ids.len(),
        courts
    );

    Ok(rounds)
}

fn validate_input(team_ids: &[TeamId], courts: u32) -> TournamentResult<()> {
    if team_ids.len() < MIN_TEAMS {
        return Err(TournamentError::NotEnoughTeams {
            needed: MIN_TEAMS,
            current: team_ids.len(),
        });
    }

    if courts == 0 {
        return Err(TournamentError::NoCourts);
    }

    let mut seen = HashSet::with_capacity(team_ids.len());
    for id in team_ids {
        if !seen.insert(id) {
            return Err(TournamentError::DuplicateTeam(id.clone()));
        }
    }

    Ok(())
}

fn build_round(index: usize, pairings: Vec<Pairing>, courts: u32) -> Round {
    let mut matches = Vec::new();
    let mut byes = Vec::new();

    for (seat, pairing) in pairings.into_iter().enumerate() {
        match pairing {
            Pairing::Paired(team_a, team_b) => {
                let (court, wave) = court_and_wave(matches.len(), courts);
                let mut m = Match::new(format!("round-{index}-match-{seat}"), court, team_a, team_b);
                m.wave_number = Some(wave);
                matches.push(m);
            }
            Pairing::Bye(team) => byes.push(team),
        }
    }

    Round::new(
        format!("round-{index}"),
        RoundLabel::Number(index as u32 + 1),
        matches,
    )
    .with_byes(byes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournament::RoundStatus;

    fn ids(n: usize) -> Vec<TeamId> {
        (1..=n).map(|i| format!("team-{i}")).collect()
    }

    #[test]
    fn test_six_teams_three_courts() {
        let rounds = generate_schedule_for_ids(&ids(6), 3).unwrap();
        assert_eq!(rounds.len(), 5);
        for round in &rounds {
            assert_eq!(round.matches.len(), 3);
            assert!(round.byes.is_empty());
            let courts: Vec<u32> = round.matches.iter().map(|m| m.court_number).collect();
            assert_eq!(courts, vec![1, 2, 3]);
            assert!(round.matches.iter().all(|m| m.wave_number == Some(1)));
        }
    }

    #[test]
    fn test_first_round_pairs_opposite_seats() {
        let rounds = generate_schedule_for_ids(&ids(4), 2).unwrap();
        let first: Vec<(&str, &str)> = rounds[0]
            .matches
            .iter()
            .map(|m| (m.team_a.as_str(), m.team_b.as_str()))
            .collect();
        assert_eq!(first, vec![("team-1", "team-4"), ("team-2", "team-3")]);

        // team-4 rotates into seat 1
        let second: Vec<(&str, &str)> = rounds[1]
            .matches
            .iter()
            .map(|m| (m.team_a.as_str(), m.team_b.as_str()))
            .collect();
        assert_eq!(second, vec![("team-1", "team-3"), ("team-4", "team-2")]);
    }

    #[test]
    fn test_odd_count_gives_one_bye_per_round() {
        let rounds = generate_schedule_for_ids(&ids(5), 2).unwrap();
        assert_eq!(rounds.len(), 5);
        for round in &rounds {
            assert_eq!(round.matches.len(), 2);
            assert_eq!(round.byes.len(), 1);
        }

        let mut byes: Vec<&TeamId> = rounds.iter().flat_map(|r| &r.byes).collect();
        byes.sort();
        byes.dedup();
        assert_eq!(byes.len(), 5);
    }

    #[test]
    fn test_single_court_forces_waves() {
        let rounds = generate_schedule_for_ids(&ids(5), 1).unwrap();
        for round in &rounds {
            let placement: Vec<(u32, Option<u32>)> = round
                .matches
                .iter()
                .map(|m| (m.court_number, m.wave_number))
                .collect();
            assert_eq!(placement, vec![(1, Some(1)), (1, Some(2))]);
            assert_eq!(round.wave_count(), 2);
        }
    }

    #[test]
    fn test_court_and_wave() {
        assert_eq!(court_and_wave(0, 3), (1, 1));
        assert_eq!(court_and_wave(2, 3), (3, 1));
        assert_eq!(court_and_wave(3, 3), (1, 2));
        assert_eq!(court_and_wave(7, 3), (2, 3));
    }

    #[test]
    fn test_rounds_are_fresh() {
        let rounds = generate_schedule_for_ids(&ids(4), 2).unwrap();
        for (i, round) in rounds.iter().enumerate() {
            assert_eq!(round.id, format!("round-{i}"));
            assert_eq!(round.label, RoundLabel::Number(i as u32 + 1));
            assert_eq!(round.status, RoundStatus::NotStarted);
            assert_eq!(round.elapsed_seconds, 0);
            assert!(round.matches.iter().all(|m| !m.is_playoff));
        }
    }

    #[test]
    fn test_two_teams_single_match() {
        let rounds = generate_schedule_for_ids(&ids(2), 4).unwrap();
        assert_eq!(rounds.len(), 1);
        assert_eq!(rounds[0].matches.len(), 1);
    }

    #[test]
    fn test_rejects_invalid_input() {
        assert_eq!(
            generate_schedule_for_ids(&ids(1), 2).unwrap_err(),
            TournamentError::NotEnoughTeams {
                needed: 2,
                current: 1
            }
        );
        assert_eq!(
            generate_schedule_for_ids(&ids(4), 0).unwrap_err(),
            TournamentError::NoCourts
        );

        let dup = vec!["x".to_string(), "y".to_string(), "x".to_string()];
        assert_eq!(
            generate_schedule_for_ids(&dup, 1).unwrap_err(),
            TournamentError::DuplicateTeam("x".to_string())
        );
    }

    #[test]
    fn test_circle_pairings_mark_byes() {
        let rounds = circle_pairings(&ids(3));
        assert_eq!(rounds.len(), 3);
        assert_eq!(
            rounds[0],
            vec![
                Pairing::Bye("team-1".to_string()),
                Pairing::Paired("team-2".to_string(), "team-3".to_string()),
            ]
        );
    }
}
