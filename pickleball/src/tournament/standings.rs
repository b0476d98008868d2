//! Leaderboard computation.
//!
//! Standings are rebuilt from scratch on every call. The caller decides which
//! rounds count (round robin, playoffs or both) and whether unsubmitted
//! rounds are included.

use std::cmp::Ordering;
use std::collections::HashMap;

use log::warn;
use serde::{Deserialize, Serialize};

use super::models::{Match, StandingRow, Team};
use super::round::{Round, RoundStatus};

/// Which results feed the leaderboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Eligibility {
    /// Every complete match, whatever the state of its round
    #[default]
    Live,
    /// Only matches in submitted rounds
    Final,
}

impl Eligibility {
    /// Whether match results in this round count
    pub fn counts_results(&self, round: &Round) -> bool {
        match self {
            Eligibility::Live => true,
            Eligibility::Final => round.is_submitted(),
        }
    }

    /// Whether byes in this round count. A bye is only recorded once its
    /// round has actually been played.
    pub fn counts_byes(&self, round: &Round) -> bool {
        match self {
            Eligibility::Live => round.status != RoundStatus::NotStarted,
            Eligibility::Final => round.is_submitted(),
        }
    }
}

/// Compute ranked standings for `teams` over the given rounds
///
/// Every team gets exactly one row. Ranks run `1..=teams.len()` with no gaps
/// and no ties.
pub fn compute_standings<'a, I>(teams: &[Team], rounds: I, eligibility: Eligibility) -> Vec<StandingRow>
where
    I: IntoIterator<Item = &'a Round>,
{
    let mut rows: Vec<StandingRow> = teams.iter().map(StandingRow::new).collect();
    let index: HashMap<&str, usize> = teams
        .iter()
        .enumerate()
        .map(|(i, team)| (team.id.as_str(), i))
        .collect();

    for round in rounds {
        if eligibility.counts_results(round) {
            for m in &round.matches {
                record_match(&mut rows, &index, round, m);
            }
        }

        if eligibility.counts_byes(round) {
            for team_id in &round.byes {
                match index.get(team_id.as_str()) {
                    Some(&i) => rows[i].bye_count += 1,
                    None => warn!("Round {} lists a bye for unknown team {}", round.id, team_id),
                }
            }
        }
    }

    for row in &mut rows {
        row.diff = differential(row.points_for, row.points_against);
    }

    rows.sort_by(compare_rows);
    for (position, row) in rows.iter_mut().enumerate() {
        row.rank = position + 1;
    }

    rows
}

fn record_match(rows: &mut [StandingRow], index: &HashMap<&str, usize>, round: &Round, m: &Match) {
    let Some((score_a, score_b)) = m.final_score() else {
        return;
    };

    let (Some(&a), Some(&b)) = (index.get(m.team_a.as_str()), index.get(m.team_b.as_str())) else {
        warn!(
            "Skipping match {} in round {}: unknown team ({} vs {})",
            m.id, round.id, m.team_a, m.team_b
        );
        return;
    };

    if a == b {
        warn!("Skipping match {} in round {}: team plays itself", m.id, round.id);
        return;
    }

    rows[a].games_played += 1;
    rows[b].games_played += 1;
    let (score_a, score_b) = (u64::from(score_a), u64::from(score_b));
    rows[a].points_for = rows[a].points_for.saturating_add(score_a);
    rows[a].points_against = rows[a].points_against.saturating_add(score_b);
    rows[b].points_for = rows[b].points_for.saturating_add(score_b);
    rows[b].points_against = rows[b].points_against.saturating_add(score_a);

    match score_a.cmp(&score_b) {
        Ordering::Greater => {
            rows[a].wins += 1;
            rows[b].losses += 1;
        }
        Ordering::Less => {
            rows[b].wins += 1;
            rows[a].losses += 1;
        }
        Ordering::Equal => {}
    }
}

fn differential(points_for: u64, points_against: u64) -> i64 {
    let clamp = |points: u64| i64::try_from(points).unwrap_or(i64::MAX);
    clamp(points_for).saturating_sub(clamp(points_against))
}

// Compare stages, highest priority first.

fn compare_wins(a: &StandingRow, b: &StandingRow) -> Ordering {
    b.wins.cmp(&a.wins)
}

fn compare_diff(a: &StandingRow, b: &StandingRow) -> Ordering {
    b.diff.cmp(&a.diff)
}

fn compare_points_for(a: &StandingRow, b: &StandingRow) -> Ordering {
    b.points_for.cmp(&a.points_for)
}

fn compare_name(a: &StandingRow, b: &StandingRow) -> Ordering {
    a.team_name.cmp(&b.team_name)
}

// Only reached by two teams sharing a display name
fn compare_id(a: &StandingRow, b: &StandingRow) -> Ordering {
    a.team_id.cmp(&b.team_id)
}

/// Leaderboard order
pub fn compare_rows(a: &StandingRow, b: &StandingRow) -> Ordering {
    compare_wins(a, b)
        .then_with(|| compare_diff(a, b))
        .then_with(|| compare_points_for(a, b))
        .then_with(|| compare_name(a, b))
        .then_with(|| compare_id(a, b))
}
