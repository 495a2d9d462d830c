//! Touchline - A terminal sports tracker with persisted favourites
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use touchline::api::{self, SportsApi, TheSportsDbClient};
use touchline::{
    Config, EntityId, EntityKind, FavouritesStore, Identified, KeyValueStore, SqliteStore, Team,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (RUST_LOG=debug for verbose output)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command = parse_args()?;
    if matches!(command, Command::Help) {
        print_help();
        return Ok(());
    }
    if matches!(command, Command::Version) {
        print_version();
        return Ok(());
    }

    let config = Config::load()?;
    let store = FavouritesStore::with_key(SqliteStore::open()?, &config.storage_key);
    store.load().await;

    let client = TheSportsDbClient::new(&config.api_base_url, &config.api_key)
        .with_sport(&config.sport, config.league_limit);

    match command {
        Command::Fav(action) => fav_cli(&store, action).await,
        Command::Leagues => leagues_cli(&client, &store).await,
        Command::Teams { league_id } => teams_cli(&client, &store, league_id).await,
        Command::Search { name } => search_cli(&client, &store, &name).await,
        Command::Team { id } => team_cli(&client, &store, id).await,
        Command::Players { team_id } => players_cli(&client, &store, team_id).await,
        Command::Player { id } => player_cli(&client, &store, id).await,
        Command::Events { league_id } => events_cli(&client, league_id).await,
        Command::Event { id } => event_cli(&client, id).await,
        Command::Favourites => favourites_cli(&client, &store, &config).await,
        Command::Help | Command::Version => Ok(()),
    }
}

/// CLI commands
enum Command {
    Fav(FavAction),
    Leagues,
    Teams { league_id: EntityId },
    Search { name: String },
    Team { id: EntityId },
    Players { team_id: EntityId },
    Player { id: EntityId },
    Events { league_id: EntityId },
    Event { id: EntityId },
    Favourites,
    Help,
    Version,
}

/// `fav` subcommands
enum FavAction {
    List,
    Add(EntityKind, EntityId),
    Remove(EntityKind, EntityId),
    Toggle(EntityKind, EntityId),
    Clear,
    Raw,
}

fn parse_args() -> Result<Command> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() == 1 {
        return Ok(Command::Help);
    }

    let id_arg = |index: usize, what: &str| -> Result<EntityId> {
        let raw = args
            .get(index)
            .ok_or_else(|| anyhow::anyhow!("Missing {what}"))?;
        Ok(EntityId::parse(raw)?)
    };

    match args[1].as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "-v" | "--version" | "version" => Ok(Command::Version),

        "fav" | "favs" => {
            let action = match args.get(2).map(String::as_str) {
                None | Some("list" | "ls") => FavAction::List,
                Some("clear") => FavAction::Clear,
                Some("raw") => FavAction::Raw,
                Some(verb @ ("add" | "remove" | "rm" | "toggle")) => {
                    let kind = args
                        .get(3)
                        .ok_or_else(|| anyhow::anyhow!("Missing kind (team, player or league)"))?;
                    let kind = EntityKind::from_str(kind)?;
                    let id = id_arg(4, "id")?;
                    match verb {
                        "add" => FavAction::Add(kind, id),
                        "toggle" => FavAction::Toggle(kind, id),
                        _ => FavAction::Remove(kind, id),
                    }
                }
                Some(other) => {
                    return Err(anyhow::anyhow!(
                        "Unknown fav action: {other}\nRun 'touchline --help' for usage"
                    ));
                }
            };
            Ok(Command::Fav(action))
        }

        "leagues" => Ok(Command::Leagues),
        "teams" => Ok(Command::Teams {
            league_id: id_arg(2, "league id")?,
        }),
        "search" => {
            let name = args[2..].join(" ");
            if name.trim().is_empty() {
                return Err(anyhow::anyhow!("Missing team name"));
            }
            Ok(Command::Search { name })
        }
        "team" => Ok(Command::Team {
            id: id_arg(2, "team id")?,
        }),
        "players" => Ok(Command::Players {
            team_id: id_arg(2, "team id")?,
        }),
        "player" => Ok(Command::Player {
            id: id_arg(2, "player id")?,
        }),
        "events" => Ok(Command::Events {
            league_id: id_arg(2, "league id")?,
        }),
        "event" => Ok(Command::Event {
            id: id_arg(2, "event id")?,
        }),
        "favourites" | "favorites" => Ok(Command::Favourites),

        other => Err(anyhow::anyhow!(
            "Unknown command: {other}\nRun 'touchline --help' for usage"
        )),
    }
}

fn print_help() {
    let config_path = Config::default_path()
        .map_or_else(|_| "Unknown".to_string(), |p| p.display().to_string());

    println!(
        r#"🏏 Touchline - sports tracker with favourites

USAGE:
    touchline [COMMAND]

COMMANDS:
    fav [list]                         Show favourite ids
    fav add <kind> <id>                Bookmark a team, player or league
    fav remove <kind> <id>             Remove a bookmark
    fav toggle <kind> <id>             Flip a bookmark
    fav clear                          Remove all bookmarks
    fav raw                            Show the stored favourites value
      <kind> is one of: team, player, league

    leagues                            List leagues of the configured sport
    teams <league_id>                  Teams in a league
    search <name>                      Search teams by name
    team <id>                          Team details
    players <team_id>                  Squad of a team
    player <id>                        Player details
    events <league_id>                 Upcoming fixtures in a league
    event <id>                         Fixture details
    favourites                         Favourite teams from the configured leagues

OPTIONS:
    -h, --help                         Show this help message
    -v, --version                      Show version information

CONFIG:
    {}
"#,
        config_path
    );
}

fn print_version() {
    println!("touchline {}", touchline::VERSION);
}

/// Star shown next to favourited records
fn star<S: KeyValueStore>(
    store: &FavouritesStore<S>,
    record: &impl Identified,
) -> &'static str {
    match record.entity_id() {
        Some(id) if store.is_favourite(record.kind(), id) => "★",
        _ => " ",
    }
}

async fn fav_cli<S: KeyValueStore>(
    store: &FavouritesStore<S>,
    action: FavAction,
) -> Result<()> {
    let set = match action {
        FavAction::List => store.snapshot(),
        FavAction::Add(kind, id) => {
            let set = store.add_entity(kind, id).await;
            println!("✓ {} {} bookmarked", kind, id);
            set
        }
        FavAction::Remove(kind, id) => {
            let set = store.remove_entity(kind, id).await;
            println!("✓ {} {} removed", kind, id);
            set
        }
        FavAction::Toggle(kind, id) => {
            let set = store.toggle_entity(kind, id).await;
            let state = if set.contains(kind, id) { "bookmarked" } else { "removed" };
            println!("✓ {} {} {}", kind, id, state);
            set
        }
        FavAction::Clear => {
            store.clear().await;
            println!("✓ Favourites cleared");
            return Ok(());
        }
        FavAction::Raw => {
            match store.raw().await {
                Some(raw) => println!("{}", raw),
                None => println!("(nothing stored under {:?})", store.key()),
            }
            return Ok(());
        }
    };

    for &kind in EntityKind::all() {
        let ids: Vec<String> = set.ids(kind).iter().map(ToString::to_string).collect();
        let list = if ids.is_empty() { "-".to_string() } else { ids.join(", ") };
        println!("{:<8} {}", kind.collection(), list);
    }

    Ok(())
}

async fn leagues_cli<S: KeyValueStore>(
    client: &TheSportsDbClient,
    store: &FavouritesStore<S>,
) -> Result<()> {
    let leagues = client.all_leagues().await?;
    if leagues.is_empty() {
        println!("No leagues found.");
        return Ok(());
    }

    for league in &leagues {
        println!("{} {:>6}  {}", star(store, league), league.id, league.name);
    }

    Ok(())
}

async fn teams_cli<S: KeyValueStore>(
    client: &TheSportsDbClient,
    store: &FavouritesStore<S>,
    league_id: EntityId,
) -> Result<()> {
    let teams = client.teams_in_league(league_id).await?;
    print_teams(store, &teams);
    Ok(())
}

async fn search_cli<S: KeyValueStore>(
    client: &TheSportsDbClient,
    store: &FavouritesStore<S>,
    name: &str,
) -> Result<()> {
    let teams = client.search_teams(name).await?;
    print_teams(store, &teams);
    Ok(())
}

fn print_teams<S: KeyValueStore>(store: &FavouritesStore<S>, teams: &[Team]) {
    if teams.is_empty() {
        println!("No teams found.");
        return;
    }

    for team in teams {
        println!(
            "{} {:>6}  {}{}",
            star(store, team),
            team.id,
            team.name,
            team.country
                .as_deref()
                .map(|c| format!(" ({c})"))
                .unwrap_or_default()
        );
    }
}

async fn team_cli<S: KeyValueStore>(
    client: &TheSportsDbClient,
    store: &FavouritesStore<S>,
    id: EntityId,
) -> Result<()> {
    let team = client
        .lookup_team(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Team {} not found", id))?;

    println!("{} {}", star(store, &team), team.name);
    println!("{}", "─".repeat(60));
    print_field("League", team.league.as_deref());
    print_field("Country", team.country.as_deref());
    print_field("Stadium", team.stadium.as_deref());
    print_field("Founded", team.formed_year.as_deref());
    if let Some(description) = team.description.as_deref() {
        println!();
        for line in textwrap::wrap(description, 72) {
            println!("{}", line);
        }
    }

    Ok(())
}

async fn players_cli<S: KeyValueStore>(
    client: &TheSportsDbClient,
    store: &FavouritesStore<S>,
    team_id: EntityId,
) -> Result<()> {
    let players = client.players_in_team(team_id).await?;
    if players.is_empty() {
        println!("No players found.");
        return Ok(());
    }

    for player in &players {
        println!(
            "{} {:>8}  {:<30} {}",
            star(store, player),
            player.id,
            player.name,
            player.position.as_deref().unwrap_or("")
        );
    }

    Ok(())
}

async fn player_cli<S: KeyValueStore>(
    client: &TheSportsDbClient,
    store: &FavouritesStore<S>,
    id: EntityId,
) -> Result<()> {
    let player = client
        .lookup_player(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Player {} not found", id))?;

    println!("{} {}", star(store, &player), player.name);
    println!("{}", "─".repeat(60));
    print_field("Team", player.team.as_deref());
    print_field("Position", player.position.as_deref());
    print_field("Nationality", player.nationality.as_deref());

    Ok(())
}

async fn events_cli(client: &TheSportsDbClient, league_id: EntityId) -> Result<()> {
    let events = client.next_events(league_id).await?;
    if events.is_empty() {
        println!("No upcoming events.");
        return Ok(());
    }

    for event in &events {
        let date = event
            .date()
            .map_or_else(|| "TBD".to_string(), |d| d.format("%a %d %b %Y").to_string());
        println!("{:<16} {}", date, event.matchup());
    }

    Ok(())
}

async fn event_cli(client: &TheSportsDbClient, id: EntityId) -> Result<()> {
    let event = client
        .lookup_event(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Event {} not found", id))?;

    println!("{}", event.matchup());
    println!("{}", "─".repeat(60));
    print_field("League", event.league.as_deref());
    print_field("Date", event.date_event.as_deref());
    print_field("Time", event.time.as_deref());
    print_field("Venue", event.venue.as_deref());
    print_field("Status", event.status.as_deref());
    if let (Some(home), Some(away)) = (&event.home_score, &event.away_score) {
        println!("{:<12} {} - {}", "Score", home, away);
    }

    Ok(())
}

async fn favourites_cli<S: KeyValueStore>(
    client: &TheSportsDbClient,
    store: &FavouritesStore<S>,
    config: &Config,
) -> Result<()> {
    let teams = api::favourite_teams(client, store, &config.favourite_leagues).await;
    if teams.is_empty() {
        println!("No favourite teams yet.");
        println!("\nBookmark one with:");
        println!("  touchline fav add team <id>");
        return Ok(());
    }

    println!("Favourite teams:\n");
    print_teams(store, &teams);

    Ok(())
}

fn print_field(label: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        println!("{:<12} {}", label, value);
    }
}
