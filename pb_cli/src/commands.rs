//! Command parsing and execution.

use std::fmt::{self, Write as _};

use anyhow::{Context, Result, anyhow, bail};
use chrono::Utc;
use log::info;
use pico_args::Arguments;
use pickleball::tournament::playoffs::{FINALS_ROUND_ID, SEMIFINAL_ROUND_ID};
use pickleball::{
    Eligibility, Event, EventConfig, EventStore, HostTokenStore, Round, RoundSelection,
    SchedulePreview, ScoringType, Side, StandingRow, Team, authorize_host, event_share_url,
    format_clock, parse_share_fragment,
};

use crate::config::CliConfig;

/// Options for `create`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateArgs {
    pub name: String,
    pub teams: u32,
    pub courts: Option<u32>,
    pub points: Option<u32>,
    pub win_by_2: bool,
    pub scoring: ScoringType,
    /// Comma separated team names, in seat order
    pub names: Option<Vec<String>>,
}

/// A parsed subcommand
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create(CreateArgs),
    Preview { teams: u32, courts: u32 },
    List,
    Show { event: String },
    Start { event: String, round: String },
    Pause { event: String, round: String },
    Reset { event: String, round: String },
    Submit { event: String, round: String },
    Score {
        event: String,
        round: String,
        game: String,
        score_a: Option<u32>,
        score_b: Option<u32>,
    },
    Winner {
        event: String,
        round: String,
        game: String,
        team: String,
    },
    Standings {
        event: String,
        selection: RoundSelection,
        eligibility: Eligibility,
    },
    Playoffs { event: String },
    Rename {
        event: String,
        team: String,
        name: String,
    },
    Players {
        event: String,
        team: String,
        player1: String,
        player2: String,
    },
    Delete { event: String },
    Link { event: String },
    Export { event: String },
    Claim { link: String, token: String },
}

/// Parse the subcommand and its arguments
///
/// Global options must already have been taken from `pargs`.
pub fn parse_command(mut pargs: Arguments) -> Result<Command> {
    // Flags first, pico-args hands out free arguments in order afterwards
    let teams: Option<u32> = pargs.opt_value_from_str("--teams")?;
    let courts: Option<u32> = pargs.opt_value_from_str("--courts")?;
    let points: Option<u32> = pargs.opt_value_from_str("--points")?;
    let no_win_by_2 = pargs.contains("--no-win-by-2");
    let scoring: Option<ScoringType> = pargs.opt_value_from_str("--scoring")?;
    let names: Option<String> = pargs.opt_value_from_str("--names")?;
    let playoffs = pargs.contains("--playoffs");
    let all = pargs.contains("--all");
    let final_only = pargs.contains("--final");

    let subcommand = pargs
        .subcommand()?
        .ok_or_else(|| anyhow!("missing command, see --help"))?;

    let rest: Vec<String> = pargs
        .finish()
        .into_iter()
        .map(|arg| {
            arg.into_string()
                .map_err(|arg| anyhow!("argument is not valid UTF-8: {arg:?}"))
        })
        .collect::<Result<_>>()?;
    let mut rest = rest.into_iter();
    let mut next = |what: &str| {
        rest.next()
            .ok_or_else(|| anyhow!("{subcommand}: missing {what}"))
    };

    let command = match subcommand.as_str() {
        "create" => {
            let name = next("event name")?;
            let names = names.map(|list| {
                list.split(',')
                    .map(|n| n.trim().to_string())
                    .collect::<Vec<_>>()
            });
            let teams = match (teams, &names) {
                (Some(teams), _) => teams,
                (None, Some(names)) => names.len() as u32,
                (None, None) => bail!("create: --teams or --names is required"),
            };
            Command::Create(CreateArgs {
                name,
                teams,
                courts,
                points,
                win_by_2: !no_win_by_2,
                scoring: scoring.unwrap_or_default(),
                names,
            })
        }
        "preview" => Command::Preview {
            teams: teams.ok_or_else(|| anyhow!("preview: --teams is required"))?,
            courts: courts.ok_or_else(|| anyhow!("preview: --courts is required"))?,
        },
        "list" => Command::List,
        "show" => Command::Show {
            event: next("event id")?,
        },
        "start" | "pause" | "reset" | "submit" => {
            let event = next("event id")?;
            let round = next("round")?;
            match subcommand.as_str() {
                "start" => Command::Start { event, round },
                "pause" => Command::Pause { event, round },
                "reset" => Command::Reset { event, round },
                _ => Command::Submit { event, round },
            }
        }
        "score" => Command::Score {
            event: next("event id")?,
            round: next("round")?,
            game: next("match")?,
            score_a: parse_score(&next("first score")?)?,
            score_b: parse_score(&next("second score")?)?,
        },
        "winner" => Command::Winner {
            event: next("event id")?,
            round: next("round")?,
            game: next("match")?,
            team: next("team")?,
        },
        "standings" => Command::Standings {
            event: next("event id")?,
            selection: match (playoffs, all) {
                (_, true) => RoundSelection::All,
                (true, false) => RoundSelection::Playoffs,
                (false, false) => RoundSelection::RoundRobin,
            },
            eligibility: if final_only {
                Eligibility::Final
            } else {
                Eligibility::Live
            },
        },
        "playoffs" => Command::Playoffs {
            event: next("event id")?,
        },
        "rename" => Command::Rename {
            event: next("event id")?,
            team: next("team")?,
            name: next("new name")?,
        },
        "players" => Command::Players {
            event: next("event id")?,
            team: next("team")?,
            player1: next("first player")?,
            player2: next("second player")?,
        },
        "delete" => Command::Delete {
            event: next("event id")?,
        },
        "link" => Command::Link {
            event: next("event id")?,
        },
        "export" => Command::Export {
            event: next("event id")?,
        },
        "claim" => Command::Claim {
            link: next("share link")?,
            token: next("host token")?,
        },
        other => bail!("unknown command '{other}', see --help"),
    };

    Ok(command)
}

/// `-` clears a score
fn parse_score(raw: &str) -> Result<Option<u32>> {
    if raw == "-" {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .with_context(|| format!("invalid score '{raw}'"))
}

/// Execute a command against `store`, returning the text to print
pub async fn run<S>(command: Command, store: &S, config: &CliConfig) -> Result<String>
where
    S: EventStore + HostTokenStore,
{
    match command {
        Command::Create(args) => create(args, store, config).await,
        Command::Preview { teams, courts } => {
            let event_config = EventConfig::new("preview", teams, courts);
            event_config.validate()?;
            Ok(render_preview(&event_config.preview()))
        }
        Command::List => list(store).await,
        Command::Show { event } => render_event(&load(store, &event).await?),
        Command::Start { event, round } => {
            mutate(store, &event, |ev| {
                let id = resolve_round(ev, &round)?;
                Ok(ev.start_round(&id, Utc::now())?)
            })
            .await
        }
        Command::Pause { event, round } => {
            mutate(store, &event, |ev| {
                let id = resolve_round(ev, &round)?;
                Ok(ev.pause_round(&id, Utc::now())?)
            })
            .await
        }
        Command::Reset { event, round } => {
            mutate(store, &event, |ev| {
                let id = resolve_round(ev, &round)?;
                Ok(ev.reset_round(&id)?)
            })
            .await
        }
        Command::Submit { event, round } => {
            mutate(store, &event, |ev| {
                let id = resolve_round(ev, &round)?;
                Ok(ev.submit_round(&id, Utc::now())?)
            })
            .await
        }
        Command::Score {
            event,
            round,
            game,
            score_a,
            score_b,
        } => {
            mutate(store, &event, |ev| {
                let round_id = resolve_round(ev, &round)?;
                let match_id = resolve_match(ev, &round_id, &game)?;
                let now = Utc::now();
                let ev = ev.set_score(&round_id, &match_id, Side::A, score_a, now)?;
                Ok(ev.set_score(&round_id, &match_id, Side::B, score_b, now)?)
            })
            .await
        }
        Command::Winner {
            event,
            round,
            game,
            team,
        } => {
            mutate(store, &event, |ev| {
                let round_id = resolve_round(ev, &round)?;
                let match_id = resolve_match(ev, &round_id, &game)?;
                let team_id = resolve_team(ev, &team)?;
                Ok(ev.select_winner(&round_id, &match_id, &team_id, Utc::now())?)
            })
            .await
        }
        Command::Standings {
            event,
            selection,
            eligibility,
        } => {
            let ev = load(store, &event).await?;
            render_standings(&ev.standings(selection, eligibility))
        }
        Command::Playoffs { event } => {
            mutate(store, &event, |ev| {
                if ev.playoff_rounds.is_none() {
                    Ok(ev.initialize_playoffs()?)
                } else {
                    Ok(ev.advance_playoffs()?)
                }
            })
            .await
        }
        Command::Rename { event, team, name } => {
            mutate(store, &event, |ev| {
                let team_id = resolve_team(ev, &team)?;
                Ok(ev.rename_team(&team_id, name.as_str())?)
            })
            .await
        }
        Command::Players {
            event,
            team,
            player1,
            player2,
        } => {
            mutate(store, &event, |ev| {
                let team_id = resolve_team(ev, &team)?;
                Ok(ev.set_players(&team_id, player1.as_str(), player2.as_str())?)
            })
            .await
        }
        Command::Delete { event } => {
            let ev = load(store, &event).await?;
            require_host(store, &ev).await?;
            store.delete(&ev.id).await?;
            info!("Deleted event {}", ev.id);
            Ok(format!("Deleted {}\n", ev.name()))
        }
        Command::Link { event } => {
            let ev = load(store, &event).await?;
            Ok(format!("{}\n", event_share_url(&config.base_url, &ev.id)))
        }
        Command::Export { event } => {
            let ev = load(store, &event).await?;
            Ok(format!("{}\n", serde_json::to_string_pretty(&ev)?))
        }
        Command::Claim { link, token } => {
            let event_id =
                parse_share_fragment(&link).ok_or_else(|| anyhow!("not an event link: {link}"))?;
            let ev = load(store, &event_id).await?;
            if !ev.is_host(Some(&token)) {
                bail!("host token does not match event {event_id}");
            }
            store.set_token(&ev.id, &token).await?;
            Ok(format!("You now host {}\n", ev.name()))
        }
    }
}

async fn create<S>(args: CreateArgs, store: &S, config: &CliConfig) -> Result<String>
where
    S: EventStore + HostTokenStore,
{
    let event_config = EventConfig {
        name: args.name,
        number_of_teams: args.teams,
        number_of_courts: args.courts.unwrap_or(config.default_courts),
        points_per_game: args.points.unwrap_or(config.default_points),
        win_by_2: args.win_by_2,
        scoring_type: args.scoring,
    };

    let teams = match args.names {
        Some(names) => names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Team::new(format!("team-{}", i + 1), name))
            .collect(),
        None => Event::placeholder_teams(args.teams),
    };

    let ev = Event::new(event_config, Utc::now())?.confirm_teams(teams)?;
    store.save(&ev).await?;
    store.set_token(&ev.id, &ev.host_token).await?;
    info!("Created event {} ({})", ev.id, ev.name());

    let mut out = String::new();
    writeln!(out, "Created {} ({})", ev.name(), ev.id)?;
    writeln!(out, "Share: {}", event_share_url(&config.base_url, &ev.id))?;
    writeln!(out, "Host token: {}", ev.host_token)?;
    out.push_str(&render_preview(&ev.preview()));
    Ok(out)
}

async fn list<S: EventStore + HostTokenStore>(store: &S) -> Result<String> {
    let events = store.list_all().await?;
    let mut events: Vec<&Event> = events.values().collect();
    events.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut out = String::new();
    if events.is_empty() {
        out.push_str("No events\n");
    }
    for ev in events {
        let host = if authorize_host(store, ev).await? {
            " [host]"
        } else {
            ""
        };
        writeln!(
            out,
            "{}  {}  {} teams  {}/{} rounds submitted{}",
            ev.id,
            ev.name(),
            ev.teams.len(),
            ev.submitted_round_count(),
            ev.rounds.len(),
            host
        )?;
    }
    Ok(out)
}

async fn load<S: EventStore>(store: &S, event_id: &str) -> Result<Event> {
    store
        .load(event_id)
        .await?
        .ok_or_else(|| anyhow!("event not found: {event_id}"))
}

async fn require_host<S: HostTokenStore>(store: &S, ev: &Event) -> Result<()> {
    if !authorize_host(store, ev).await? {
        bail!("only the host can change event {}", ev.id);
    }
    Ok(())
}

/// Load, authorize, apply `update` and save the result
async fn mutate<S, F>(store: &S, event_id: &str, update: F) -> Result<String>
where
    S: EventStore + HostTokenStore,
    F: FnOnce(&Event) -> Result<Event>,
{
    let ev = load(store, event_id).await?;
    require_host(store, &ev).await?;
    let next = update(&ev)?;
    store.save(&next).await?;
    render_event(&next)
}

/// Accepts a round number, `sf`, `finals` or a round id
fn resolve_round(ev: &Event, raw: &str) -> Result<String> {
    match raw.to_lowercase().as_str() {
        "sf" | "semis" | "semifinals" => return Ok(SEMIFINAL_ROUND_ID.to_string()),
        "finals" | "final" => return Ok(FINALS_ROUND_ID.to_string()),
        _ => {}
    }

    if let Ok(number) = raw.parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(|i| ev.rounds.get(i))
            .map(|r| r.id.clone())
            .ok_or_else(|| anyhow!("no round {number}, event has {}", ev.rounds.len()));
    }

    Ok(raw.to_string())
}

/// Accepts a 1-based match position or a match id
fn resolve_match(ev: &Event, round_id: &str, raw: &str) -> Result<String> {
    let round = ev
        .find_round(round_id)
        .ok_or_else(|| anyhow!("round not found: {round_id}"))?;

    match raw.parse::<usize>() {
        Ok(number) => number
            .checked_sub(1)
            .and_then(|i| round.matches.get(i))
            .map(|m| m.id.clone())
            .ok_or_else(|| anyhow!("no match {number} in {}", round.label)),
        Err(_) => Ok(raw.to_string()),
    }
}

/// Accepts a team id or a team name (case-insensitive)
fn resolve_team(ev: &Event, raw: &str) -> Result<String> {
    if let Some(team) = ev.team(raw) {
        return Ok(team.id.clone());
    }
    ev.teams
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(raw))
        .map(|t| t.id.clone())
        .ok_or_else(|| anyhow!("no team named '{raw}'"))
}

fn render_preview(preview: &SchedulePreview) -> String {
    format!(
        "{} rounds, {} matches per round in {} wave(s), {} bye(s) per round, {} matches total\n",
        preview.total_rounds,
        preview.matches_per_round,
        preview.waves_per_round,
        preview.byes_per_round,
        preview.total_matches
    )
}

fn render_round(out: &mut String, ev: &Event, round: &Round) -> fmt::Result {
    let now = Utc::now();
    writeln!(
        out,
        "{} [{}] {}",
        round.label,
        round.status,
        format_clock(round.elapsed_seconds_at(now))
    )?;

    for (i, m) in round.matches.iter().enumerate() {
        let score = |s: Option<u32>| s.map_or_else(|| "-".to_string(), |s| s.to_string());
        let wave = m
            .wave_number
            .map(|w| format!(" wave {w}"))
            .unwrap_or_default();
        let mark = |id: &str| if m.winner().is_some_and(|w| w == id) { "*" } else { "" };
        writeln!(
            out,
            "  {}. court {}{}  {}{} {} - {} {}{}",
            i + 1,
            m.court_number,
            wave,
            ev.team_name(&m.team_a),
            mark(&m.team_a),
            score(m.score_a),
            score(m.score_b),
            ev.team_name(&m.team_b),
            mark(&m.team_b),
        )?;
    }

    if !round.byes.is_empty() {
        let byes: Vec<&str> = round.byes.iter().map(|id| ev.team_name(id)).collect();
        writeln!(out, "  bye: {}", byes.join(", "))?;
    }
    Ok(())
}

/// `Name (Ana & Ben)`, or just the name when no players are set
fn team_label(team: &Team) -> String {
    let players: Vec<&str> = [team.player1.as_str(), team.player2.as_str()]
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect();
    if players.is_empty() {
        team.name.clone()
    } else {
        format!("{} ({})", team.name, players.join(" & "))
    }
}

fn render_event(ev: &Event) -> Result<String> {
    let mut out = String::new();
    let win_by = if ev.config.win_by_2 { ", win by 2" } else { "" };
    writeln!(
        out,
        "{} ({})  {} teams, {} courts, to {}{}, {} scoring",
        ev.name(),
        ev.id,
        ev.teams.len(),
        ev.number_of_courts(),
        ev.config.points_per_game,
        win_by,
        ev.config.scoring_type
    )?;

    let roster: Vec<String> = ev.teams.iter().map(team_label).collect();
    if !roster.is_empty() {
        writeln!(out, "Teams: {}", roster.join(", "))?;
    }

    for round in ev.all_rounds() {
        render_round(&mut out, ev, round)?;
    }

    if let Some(champion) = ev.champion() {
        writeln!(out, "Champion: {}", team_label(champion))?;
    }
    Ok(out)
}

fn render_standings(rows: &[StandingRow]) -> Result<String> {
    let width = rows
        .iter()
        .map(|r| r.team_name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut out = String::new();
    writeln!(
        out,
        "{:>3}  {:<width$}  {:>3} {:>3} {:>4} {:>4} {:>5} {:>3} {:>4}",
        "#", "Team", "W", "L", "PF", "PA", "Diff", "GP", "Bye"
    )?;
    for r in rows {
        writeln!(
            out,
            "{:>3}  {:<width$}  {:>3} {:>3} {:>4} {:>4} {:>+5} {:>3} {:>4}",
            r.rank,
            r.team_name,
            r.wins,
            r.losses,
            r.points_for,
            r.points_against,
            r.diff,
            r.games_played,
            r.bye_count
        )?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pickleball::{MemoryStore, RoundStatus};
    use std::ffi::OsString;
    use std::path::PathBuf;

    fn args(line: &str) -> Arguments {
        Arguments::from_vec(line.split_whitespace().map(OsString::from).collect())
    }

    fn config() -> CliConfig {
        CliConfig {
            data_dir: PathBuf::from("unused"),
            base_url: "https://pb.example/".to_string(),
            default_courts: 2,
            default_points: 11,
        }
    }

    async fn created(store: &MemoryStore) -> Event {
        let command = parse_command(args("create Ladder --teams 4")).unwrap();
        run(command, store, &config()).await.unwrap();
        let events = store.list_all().await.unwrap();
        events.into_values().next().unwrap()
    }

    #[test]
    fn test_parse_create() {
        let command = parse_command(args("create Social --names A,B,C --courts 1")).unwrap();
        let Command::Create(create) = command else {
            panic!("expected create");
        };
        assert_eq!(create.name, "Social");
        assert_eq!(create.teams, 3);
        assert_eq!(create.courts, Some(1));
        assert!(create.win_by_2);
        assert_eq!(create.names.unwrap(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_parse_standings_flags() {
        let command = parse_command(args("standings ev1 --playoffs --final")).unwrap();
        assert_eq!(
            command,
            Command::Standings {
                event: "ev1".to_string(),
                selection: RoundSelection::Playoffs,
                eligibility: Eligibility::Final,
            }
        );
    }

    #[test]
    fn test_parse_score_clears_with_dash() {
        let command = parse_command(args("score ev1 2 1 11 -")).unwrap();
        assert!(matches!(
            command,
            Command::Score {
                score_a: Some(11),
                score_b: None,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_command(args("")).is_err());
        assert!(parse_command(args("juggle")).is_err());
        assert!(parse_command(args("start ev1")).is_err());
        assert!(parse_command(args("create Ladder")).is_err());
        assert!(parse_command(args("score ev1 1 1 eleven 3")).is_err());
    }

    #[tokio::test]
    async fn test_create_then_score_round() {
        let store = MemoryStore::new();
        let ev = created(&store).await;
        assert_eq!(ev.rounds.len(), 3);
        assert_eq!(ev.number_of_courts(), 2);

        let out = run(
            parse_command(args(&format!("score {} 1 1 11 6", ev.id))).unwrap(),
            &store,
            &config(),
        )
        .await
        .unwrap();
        assert!(out.contains("11 - 6"));

        let ev = store.load(&ev.id).await.unwrap().unwrap();
        assert_eq!(ev.rounds[0].matches[0].score_a, Some(11));

        let out = run(
            parse_command(args(&format!("standings {}", ev.id))).unwrap(),
            &store,
            &config(),
        )
        .await
        .unwrap();
        assert!(out.lines().nth(1).unwrap().contains("+5"));
    }

    #[tokio::test]
    async fn test_round_lifecycle_commands() {
        let store = MemoryStore::new();
        let ev = created(&store).await;
        for line in ["start {} 2", "pause {} 2", "submit {} 2"] {
            let command = parse_command(args(&line.replace("{}", &ev.id))).unwrap();
            run(command, &store, &config()).await.unwrap();
        }
        let ev = store.load(&ev.id).await.unwrap().unwrap();
        assert_eq!(ev.rounds[1].status, RoundStatus::Submitted);

        let reset = parse_command(args(&format!("reset {} 2", ev.id))).unwrap();
        assert!(run(reset, &store, &config()).await.is_err());
    }

    #[tokio::test]
    async fn test_mutations_require_host_token() {
        let store = MemoryStore::new();
        let ev = created(&store).await;
        store.set_token(&ev.id, "someone-else").await.unwrap();

        let start = parse_command(args(&format!("start {} 1", ev.id))).unwrap();
        let err = run(start, &store, &config()).await.unwrap_err();
        assert!(err.to_string().contains("only the host"));

        // Viewing stays open
        let show = parse_command(args(&format!("show {}", ev.id))).unwrap();
        assert!(run(show, &store, &config()).await.is_ok());

        let link = format!("https://pb.example/#/event/{}", ev.id);
        let claim = Command::Claim {
            link,
            token: ev.host_token.clone(),
        };
        run(claim, &store, &config()).await.unwrap();
        let start = parse_command(args(&format!("start {} 1", ev.id))).unwrap();
        assert!(run(start, &store, &config()).await.is_ok());
    }

    #[tokio::test]
    async fn test_winner_by_team_name() {
        let store = MemoryStore::new();
        let ev = created(&store).await;
        let team_b = ev.rounds[0].matches[0].team_b.clone();
        let name = ev.team_name(&team_b).to_uppercase();

        let command = Command::Winner {
            event: ev.id.clone(),
            round: "1".to_string(),
            game: "1".to_string(),
            team: name,
        };
        run(command, &store, &config()).await.unwrap();

        let ev = store.load(&ev.id).await.unwrap().unwrap();
        assert_eq!(ev.rounds[0].matches[0].winner(), Some(&team_b));
    }

    #[tokio::test]
    async fn test_link_and_delete() {
        let store = MemoryStore::new();
        let ev = created(&store).await;

        let out = run(Command::Link { event: ev.id.clone() }, &store, &config())
            .await
            .unwrap();
        assert_eq!(out.trim(), format!("https://pb.example/#/event/{}", ev.id));

        run(Command::Delete { event: ev.id.clone() }, &store, &config())
            .await
            .unwrap();
        assert!(store.list_all().await.unwrap().is_empty());
        assert!(store.get_token(&ev.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_export_is_the_stored_snapshot() {
        let store = MemoryStore::new();
        let ev = created(&store).await;
        let out = run(Command::Export { event: ev.id.clone() }, &store, &config())
            .await
            .unwrap();
        let parsed: Event = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, ev);
    }

    #[tokio::test]
    async fn test_preview_validates_counts() {
        let store = MemoryStore::new();
        let no_courts = parse_command(args("preview --teams 6 --courts 0")).unwrap();
        let err = run(no_courts, &store, &config()).await.unwrap_err();
        assert!(err.to_string().contains("court"));

        let one_team = parse_command(args("preview --teams 1 --courts 2")).unwrap();
        assert!(run(one_team, &store, &config()).await.is_err());

        let large = parse_command(args("preview --teams 70000 --courts 1")).unwrap();
        let out = run(large, &store, &config()).await.unwrap();
        assert!(out.contains("2449965000 matches total"));
    }

    #[tokio::test]
    async fn test_players_command() {
        let store = MemoryStore::new();
        let ev = created(&store).await;

        let command = parse_command(args(&format!("players {} team-2 Ana Ben", ev.id))).unwrap();
        let out = run(command, &store, &config()).await.unwrap();
        assert!(out.contains("Team 2 (Ana & Ben)"));

        let ev = store.load(&ev.id).await.unwrap().unwrap();
        let team = ev.team("team-2").unwrap();
        assert_eq!((team.player1.as_str(), team.player2.as_str()), ("Ana", "Ben"));

        let start = parse_command(args(&format!("start {} 1", ev.id))).unwrap();
        run(start, &store, &config()).await.unwrap();
        let late = parse_command(args(&format!("players {} team-1 Cy Di", ev.id))).unwrap();
        assert!(run(late, &store, &config()).await.is_err());

        assert!(parse_command(args("players ev1 team-1 Solo")).is_err());
    }

    #[test]
    fn test_render_standings_handles_large_totals() {
        let mut row = StandingRow::new(&Team::new("t1", "Bangers"));
        row.rank = 1;
        row.points_for = 6_000_000_000;
        row.diff = 6_000_000_000;
        let out = render_standings(&[row]).unwrap();
        assert!(out.contains("6000000000"));
        assert!(out.contains("+6000000000"));
    }

    #[test]
    fn test_resolve_round_aliases() {
        let ev = Event::new(EventConfig::new("R", 4, 2), Utc::now())
            .unwrap()
            .confirm_teams(Event::placeholder_teams(4))
            .unwrap();
        assert_eq!(resolve_round(&ev, "1").unwrap(), "round-0");
        assert_eq!(resolve_round(&ev, "SF").unwrap(), SEMIFINAL_ROUND_ID);
        assert_eq!(resolve_round(&ev, "finals").unwrap(), FINALS_ROUND_ID);
        assert_eq!(resolve_round(&ev, "round-2").unwrap(), "round-2");
        assert!(resolve_round(&ev, "0").is_err());
        assert!(resolve_round(&ev, "9").is_err());
    }
}
