//! Tournament data models: teams, matches and leaderboard rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Team ID type
pub type TeamId = String;

/// Match ID type
pub type MatchId = String;

/// Round ID type
pub type RoundId = String;

/// A doubles team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Stable identifier, unique within an event
    pub id: TeamId,
    /// Display name
    pub name: String,
    pub player1: String,
    pub player2: String,
}

impl Team {
    /// Create a team
    pub fn new(id: impl Into<TeamId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            player1: String::new(),
            player2: String::new(),
        }
    }

    /// Set both player names
    pub fn with_players(mut self, player1: impl Into<String>, player2: impl Into<String>) -> Self {
        self.player1 = player1.into();
        self.player2 = player2.into();
        self
    }
}

/// Match status, always derived from the scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// At least one score missing
    Pending,
    /// Both scores entered
    Complete,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::Pending => write!(f, "pending"),
            MatchStatus::Complete => write!(f, "complete"),
        }
    }
}

/// One side of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    A,
    B,
}

/// A single match on a court
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// Court number (1-indexed)
    pub court_number: u32,
    /// Wave within the round (1-indexed), set by the scheduler
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wave_number: Option<u32>,
    pub team_a: TeamId,
    pub team_b: TeamId,
    pub score_a: Option<u32>,
    pub score_b: Option<u32>,
    /// Winner picked by the host, independent of the scores
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner_id: Option<TeamId>,
    #[serde(default)]
    pub is_playoff: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_at: Option<DateTime<Utc>>,
}

impl Match {
    /// Create a pending match
    pub fn new(
        id: impl Into<MatchId>,
        court_number: u32,
        team_a: impl Into<TeamId>,
        team_b: impl Into<TeamId>,
    ) -> Self {
        Self {
            id: id.into(),
            court_number,
            wave_number: None,
            team_a: team_a.into(),
            team_b: team_b.into(),
            score_a: None,
            score_b: None,
            winner_id: None,
            is_playoff: false,
            last_edited_at: None,
        }
    }

    /// Mark the match as part of the playoff bracket
    pub fn playoff(mut self) -> Self {
        self.is_playoff = true;
        self
    }

    /// Complete once both scores are present
    pub fn status(&self) -> MatchStatus {
        match (self.score_a, self.score_b) {
            (Some(_), Some(_)) => MatchStatus::Complete,
            _ => MatchStatus::Pending,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status() == MatchStatus::Complete
    }

    /// Both scores, if the match is complete
    pub fn final_score(&self) -> Option<(u32, u32)> {
        self.score_a.zip(self.score_b)
    }

    pub fn involves(&self, team_id: &str) -> bool {
        self.team_a == team_id || self.team_b == team_id
    }

    /// Which side a team plays on
    pub fn side_of(&self, team_id: &str) -> Option<Side> {
        if self.team_a == team_id {
            Some(Side::A)
        } else if self.team_b == team_id {
            Some(Side::B)
        } else {
            None
        }
    }

    pub fn team(&self, side: Side) -> &TeamId {
        match side {
            Side::A => &self.team_a,
            Side::B => &self.team_b,
        }
    }

    /// Decided winner of the match
    ///
    /// An explicit pick by the host wins over the scores. Without one, the
    /// side with the strictly higher score of a complete match is the winner.
    pub fn winner(&self) -> Option<&TeamId> {
        if let Some(winner) = self.winner_id.as_ref().filter(|id| self.involves(id)) {
            return Some(winner);
        }

        match self.final_score()? {
            (a, b) if a > b => Some(&self.team_a),
            (a, b) if b > a => Some(&self.team_b),
            _ => None,
        }
    }

    /// The side that did not win
    pub fn loser(&self) -> Option<&TeamId> {
        match self.side_of(self.winner()?)? {
            Side::A => Some(&self.team_b),
            Side::B => Some(&self.team_a),
        }
    }

    /// Copy of this match with one score replaced
    pub fn with_score(&self, side: Side, score: Option<u32>, edited_at: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        match side {
            Side::A => next.score_a = score,
            Side::B => next.score_b = score,
        }
        next.last_edited_at = Some(edited_at);
        next
    }

    /// Copy of this match with scores, winner and edit stamp cleared
    pub fn cleared(&self) -> Self {
        Self {
            score_a: None,
            score_b: None,
            winner_id: None,
            last_edited_at: None,
            ..self.clone()
        }
    }
}

/// One leaderboard row, recomputed on every query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRow {
    /// Position in the leaderboard (1-indexed, no ties)
    pub rank: usize,
    pub team_id: TeamId,
    pub team_name: String,
    pub wins: u32,
    pub losses: u32,
    /// Widened so large raw scores cannot overflow the totals
    pub points_for: u64,
    pub points_against: u64,
    /// Point differential (`points_for - points_against`)
    pub diff: i64,
    pub games_played: u32,
    /// Rounds the team sat out
    pub bye_count: u32,
}

impl StandingRow {
    /// Zeroed row for a team
    pub fn new(team: &Team) -> Self {
        Self {
            rank: 0,
            team_id: team.id.clone(),
            team_name: team.name.clone(),
            wins: 0,
            losses: 0,
            points_for: 0,
            points_against: 0,
            diff: 0,
            games_played: 0,
            bye_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(a: Option<u32>, b: Option<u32>) -> Match {
        let mut m = Match::new("m1", 1, "a", "b");
        m.score_a = a;
        m.score_b = b;
        m
    }

    #[test]
    fn test_status_follows_scores() {
        assert_eq!(scored(None, None).status(), MatchStatus::Pending);
        assert_eq!(scored(Some(11), None).status(), MatchStatus::Pending);
        assert_eq!(scored(None, Some(4)).status(), MatchStatus::Pending);
        assert_eq!(scored(Some(11), Some(4)).status(), MatchStatus::Complete);
        assert_eq!(scored(Some(0), Some(0)).status(), MatchStatus::Complete);
    }

    #[test]
    fn test_winner_from_scores() {
        assert_eq!(scored(Some(11), Some(7)).winner().map(String::as_str), Some("a"));
        assert_eq!(scored(Some(9), Some(11)).winner().map(String::as_str), Some("b"));
        assert_eq!(scored(Some(10), Some(10)).winner(), None);
        assert_eq!(scored(Some(10), None).winner(), None);
    }

    #[test]
    fn test_explicit_winner_overrides_scores() {
        let mut m = scored(Some(11), Some(7));
        m.winner_id = Some("b".to_string());
        assert_eq!(m.winner().map(String::as_str), Some("b"));
        assert_eq!(m.loser().map(String::as_str), Some("a"));
    }

    #[test]
    fn test_foreign_winner_is_ignored() {
        let mut m = scored(None, None);
        m.winner_id = Some("z".to_string());
        assert_eq!(m.winner(), None);
        assert_eq!(m.loser(), None);
    }

    #[test]
    fn test_with_score_stamps_edit_time() {
        let now = Utc::now();
        let m = scored(None, None).with_score(Side::B, Some(6), now);
        assert_eq!(m.score_b, Some(6));
        assert_eq!(m.score_a, None);
        assert_eq!(m.last_edited_at, Some(now));
    }

    #[test]
    fn test_cleared_keeps_pairing() {
        let mut m = scored(Some(11), Some(3)).playoff();
        m.winner_id = Some("a".to_string());
        let cleared = m.cleared();
        assert_eq!(cleared.status(), MatchStatus::Pending);
        assert_eq!(cleared.winner_id, None);
        assert_eq!(cleared.team_a, "a");
        assert!(cleared.is_playoff);
    }

    #[test]
    fn test_status_is_not_serialized() {
        let json = serde_json::to_value(scored(Some(1), Some(2))).unwrap();
        assert!(json.get("status").is_none());
        assert_eq!(json["score_a"], 1);
    }
}
