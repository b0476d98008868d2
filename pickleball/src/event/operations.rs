//! Host operations on an event snapshot.
//!
//! Each operation borrows the current snapshot and returns the next one. On
//! error the caller still holds the untouched original.

use chrono::{DateTime, Utc};
use log::{debug, info};

use super::models::{Event, RoundSelection};
use crate::tournament::{
    Eligibility, Round, RoundId, Side, Team, TeamId, TournamentError, TournamentResult,
    build_finals, generate_schedule, playoffs::SEMIFINAL_ROUND_ID, seed_semifinals,
};

/// Where a round lives inside the event
#[derive(Debug, Clone, Copy)]
enum RoundSlot {
    RoundRobin(usize),
    Playoff(usize),
}

impl Event {
    fn locate_round(&self, round_id: &str) -> TournamentResult<RoundSlot> {
        if let Some(i) = self.rounds.iter().position(|r| r.id == round_id) {
            return Ok(RoundSlot::RoundRobin(i));
        }
        self.playoff_rounds()
            .iter()
            .position(|r| r.id == round_id)
            .map(RoundSlot::Playoff)
            .ok_or_else(|| TournamentError::RoundNotFound(RoundId::from(round_id)))
    }

    /// Copy of this event with one round replaced by `update`
    fn with_round<F>(&self, round_id: &str, update: F) -> TournamentResult<Self>
    where
        F: FnOnce(&Round) -> TournamentResult<Round>,
    {
        let slot = self.locate_round(round_id)?;
        let mut next = self.clone();
        match slot {
            RoundSlot::RoundRobin(i) => {
                next.rounds[i] = update(&self.rounds[i])?;
            }
            RoundSlot::Playoff(i) => {
                let rounds = next.playoff_rounds.get_or_insert_with(Vec::new);
                rounds[i] = update(&self.playoff_rounds()[i])?;
            }
        }
        Ok(next)
    }

    /// Lock in the roster and generate the round-robin schedule
    ///
    /// # Errors
    ///
    /// * `TournamentError::TournamentStarted` - a round has already left `NotStarted`
    /// * `TournamentError::TeamCountMismatch` - roster size differs from the config
    /// * `TournamentError::DuplicateTeam` - two teams share an id
    pub fn confirm_teams(&self, teams: Vec<Team>) -> TournamentResult<Self> {
        if self.has_started() {
            return Err(TournamentError::TournamentStarted);
        }

        let expected = self.config.number_of_teams as usize;
        if teams.len() != expected {
            return Err(TournamentError::TeamCountMismatch {
                expected,
                actual: teams.len(),
            });
        }

        let rounds = generate_schedule(&teams, self.config.number_of_courts)?;
        info!(
            "Event {}: confirmed {} teams, {} rounds scheduled",
            self.id,
            teams.len(),
            rounds.len()
        );

        Ok(Self {
            teams,
            rounds,
            playoff_rounds: None,
            ..self.clone()
        })
    }

    /// Change a team's display name before play begins
    pub fn rename_team(&self, team_id: &str, name: impl Into<String>) -> TournamentResult<Self> {
        if self.has_started() {
            return Err(TournamentError::TournamentStarted);
        }

        let name = name.into();
        if name.trim().is_empty() {
            return Err(TournamentError::InvalidConfig(
                "team name must not be empty".to_string(),
            ));
        }

        let index = self.team_index(team_id)?;
        let mut next = self.clone();
        next.teams[index].name = name;
        Ok(next)
    }

    /// Set the two player names on a team before play begins
    ///
    /// Blank names are allowed and clear the slot.
    pub fn set_players(
        &self,
        team_id: &str,
        player1: impl Into<String>,
        player2: impl Into<String>,
    ) -> TournamentResult<Self> {
        if self.has_started() {
            return Err(TournamentError::TournamentStarted);
        }

        let (player1, player2): (String, String) = (player1.into(), player2.into());
        let index = self.team_index(team_id)?;
        let mut next = self.clone();
        let team = next.teams[index].clone();
        next.teams[index] = team.with_players(player1.trim(), player2.trim());
        debug!("Event {}: players updated for {}", self.id, team_id);
        Ok(next)
    }

    fn team_index(&self, team_id: &str) -> TournamentResult<usize> {
        self.teams
            .iter()
            .position(|t| t.id == team_id)
            .ok_or_else(|| TournamentError::TeamNotFound(TeamId::from(team_id)))
    }

    pub fn start_round(&self, round_id: &str, now: DateTime<Utc>) -> TournamentResult<Self> {
        let next = self.with_round(round_id, |r| r.start(now))?;
        info!("Event {}: round {} started", self.id, round_id);
        Ok(next)
    }

    pub fn pause_round(&self, round_id: &str, now: DateTime<Utc>) -> TournamentResult<Self> {
        let next = self.with_round(round_id, |r| r.pause(now))?;
        info!("Event {}: round {} paused", self.id, round_id);
        Ok(next)
    }

    /// Clear scores, winners and the timer of an unsubmitted round
    pub fn reset_round(&self, round_id: &str) -> TournamentResult<Self> {
        let next = self.with_round(round_id, Round::reset)?;
        info!("Event {}: round {} reset", self.id, round_id);
        Ok(next)
    }

    /// Lock a round. Submission is final.
    pub fn submit_round(&self, round_id: &str, now: DateTime<Utc>) -> TournamentResult<Self> {
        let next = self.with_round(round_id, |r| r.submit(now))?;
        info!("Event {}: round {} submitted", self.id, round_id);
        Ok(next)
    }

    /// Record one side's score. Editing stops a running clock.
    ///
    /// # Errors
    ///
    /// * `TournamentError::RoundSubmitted` - the round is locked
    /// * `TournamentError::RoundNotFound` / `MatchNotFound` - unknown ids
    pub fn set_score(
        &self,
        round_id: &str,
        match_id: &str,
        side: Side,
        score: Option<u32>,
        now: DateTime<Utc>,
    ) -> TournamentResult<Self> {
        self.with_round(round_id, |round| {
            round
                .update_match(match_id, |m| Ok(m.with_score(side, score, now)))
                .map(|r| r.pause_if_running(now))
        })
        .inspect(|_| debug!("Event {}: {} side {:?} = {:?}", self.id, match_id, side, score))
    }

    /// Pick the winner of a match. Editing stops a running clock.
    ///
    /// # Errors
    ///
    /// * `TournamentError::TeamNotInMatch` - `team_id` is neither side
    /// * `TournamentError::RoundSubmitted` - the round is locked
    pub fn select_winner(
        &self,
        round_id: &str,
        match_id: &str,
        team_id: &str,
        now: DateTime<Utc>,
    ) -> TournamentResult<Self> {
        self.with_round(round_id, |round| {
            round
                .update_match(match_id, |m| {
                    if !m.involves(team_id) {
                        return Err(TournamentError::TeamNotInMatch {
                            team: TeamId::from(team_id),
                            match_id: m.id.clone(),
                        });
                    }
                    let mut next = m.clone();
                    next.winner_id = Some(TeamId::from(team_id));
                    next.last_edited_at = Some(now);
                    Ok(next)
                })
                .map(|r| r.pause_if_running(now))
        })
        .inspect(|_| debug!("Event {}: {} won {}", self.id, team_id, match_id))
    }

    /// Seed the semifinals from the final round-robin leaderboard
    ///
    /// # Errors
    ///
    /// * `TournamentError::PlayoffsAlreadyStarted` - playoffs exist
    /// * `TournamentError::RoundRobinIncomplete` - a round is not submitted
    /// * `TournamentError::NotEnoughSeeds` - fewer than four teams
    pub fn initialize_playoffs(&self) -> TournamentResult<Self> {
        if self.playoff_rounds.is_some() {
            return Err(TournamentError::PlayoffsAlreadyStarted);
        }

        if !self.all_round_robin_submitted() {
            return Err(TournamentError::RoundRobinIncomplete {
                submitted: self.submitted_round_count(),
                total: self.rounds.len(),
            });
        }

        let standings = self.standings(RoundSelection::RoundRobin, Eligibility::Final);
        let semifinals = seed_semifinals(&standings)?;
        info!("Event {}: playoffs initialized", self.id);

        Ok(Self {
            playoff_rounds: Some(vec![semifinals]),
            ..self.clone()
        })
    }

    /// Schedule gold and bronze matches from the submitted semifinals
    ///
    /// # Errors
    ///
    /// * `TournamentError::FinalsAlreadyScheduled` - finals exist
    /// * `TournamentError::SemiFinalsIncomplete` - no semifinals, or one undecided
    /// * `TournamentError::InvalidRoundState` - semifinals not submitted
    pub fn advance_playoffs(&self) -> TournamentResult<Self> {
        let playoffs = self.playoff_rounds();
        if playoffs.len() > 1 {
            return Err(TournamentError::FinalsAlreadyScheduled);
        }

        let semifinals = playoffs
            .iter()
            .find(|r| r.id == SEMIFINAL_ROUND_ID)
            .ok_or(TournamentError::SemiFinalsIncomplete)?;
        let finals = build_finals(semifinals)?;
        info!("Event {}: finals scheduled", self.id);

        let mut next = self.clone();
        next.playoff_rounds
            .get_or_insert_with(Vec::new)
            .push(finals);
        Ok(next)
    }
}
