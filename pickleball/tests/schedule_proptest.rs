/// Property-based tests for the round-robin scheduler using proptest
///
/// These tests check the circle-method guarantees over a wide range of team
/// and court counts.
use pickleball::tournament::{
    Pairing, Team, TeamId, circle_pairings, generate_schedule, scheduler::court_and_wave,
};
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

fn roster(n: usize) -> Vec<Team> {
    (1..=n)
        .map(|i| Team::new(format!("team-{i}"), format!("Team {i}")))
        .collect()
}

fn padded(n: usize) -> usize {
    n + n % 2
}

proptest! {
    #[test]
    fn test_round_count(n in 2usize..=24, courts in 1u32..=8) {
        let rounds = generate_schedule(&roster(n), courts).unwrap();
        prop_assert_eq!(rounds.len(), padded(n) - 1);
    }

    #[test]
    fn test_every_pair_meets_exactly_once(n in 2usize..=24, courts in 1u32..=8) {
        let rounds = generate_schedule(&roster(n), courts).unwrap();
        let mut meetings: HashMap<(TeamId, TeamId), usize> = HashMap::new();
        for m in rounds.iter().flat_map(|r| &r.matches) {
            let key = if m.team_a < m.team_b {
                (m.team_a.clone(), m.team_b.clone())
            } else {
                (m.team_b.clone(), m.team_a.clone())
            };
            *meetings.entry(key).or_default() += 1;
        }

        prop_assert_eq!(meetings.len(), n * (n - 1) / 2);
        prop_assert!(meetings.values().all(|&count| count == 1));
    }

    #[test]
    fn test_each_team_appears_once_per_round(n in 2usize..=24, courts in 1u32..=8) {
        let teams = roster(n);
        let rounds = generate_schedule(&teams, courts).unwrap();
        for round in &rounds {
            let mut seen: HashSet<&str> = HashSet::new();
            for m in &round.matches {
                prop_assert!(seen.insert(m.team_a.as_str()));
                prop_assert!(seen.insert(m.team_b.as_str()));
            }
            for bye in &round.byes {
                prop_assert!(seen.insert(bye.as_str()));
            }
            prop_assert_eq!(seen.len(), n);
            prop_assert_eq!(round.byes.len(), n % 2);
            prop_assert_eq!(round.matches.len(), n / 2);
        }
    }

    #[test]
    fn test_odd_rosters_rotate_the_bye(n in (1usize..=11).prop_map(|k| 2 * k + 1)) {
        let rounds = generate_schedule(&roster(n), 2).unwrap();
        let byes: HashSet<&TeamId> = rounds.iter().flat_map(|r| &r.byes).collect();
        prop_assert_eq!(byes.len(), n);
    }

    #[test]
    fn test_courts_and_waves_follow_position(n in 2usize..=24, courts in 1u32..=8) {
        let rounds = generate_schedule(&roster(n), courts).unwrap();
        for round in &rounds {
            for (k, m) in round.matches.iter().enumerate() {
                let (court, wave) = court_and_wave(k, courts);
                prop_assert_eq!(m.court_number, court);
                prop_assert_eq!(m.wave_number, Some(wave));
                prop_assert!((1..=courts).contains(&m.court_number));
            }
        }
    }

    #[test]
    fn test_schedule_is_deterministic(n in 2usize..=16, courts in 1u32..=4) {
        let teams = roster(n);
        prop_assert_eq!(
            generate_schedule(&teams, courts).unwrap(),
            generate_schedule(&teams, courts).unwrap()
        );
    }

    #[test]
    fn test_pairings_cover_padded_field(n in 2usize..=24) {
        let ids: Vec<TeamId> = roster(n).into_iter().map(|t| t.id).collect();
        for round in circle_pairings(&ids) {
            let seats: usize = round
                .iter()
                .map(|p| match p {
                    Pairing::Paired(..) => 2,
                    Pairing::Bye(_) => 1,
                })
                .sum();
            prop_assert_eq!(seats, n);
        }
    }
}
