//! Remote sports data source
//!
//! Read-only. The favourites store never calls it; the application fetches
//! records here and asks the store which of them are favourites.

pub mod thesportsdb;

use anyhow::Result;

use crate::favourites::FavouritesStore;
use crate::models::{EntityId, Event, League, Player, Team};
use crate::storage::KeyValueStore;

pub use thesportsdb::TheSportsDbClient;

/// Unified API trait for sports data providers
#[allow(async_fn_in_trait)]
pub trait SportsApi {
    /// All leagues of the configured sport
    async fn all_leagues(&self) -> Result<Vec<League>>;

    /// A single league
    async fn lookup_league(&self, id: EntityId) -> Result<Option<League>>;

    /// Every team in a league
    async fn teams_in_league(&self, league_id: EntityId) -> Result<Vec<Team>>;

    /// Teams whose name matches `name`
    async fn search_teams(&self, name: &str) -> Result<Vec<Team>>;

    /// A single team
    async fn lookup_team(&self, id: EntityId) -> Result<Option<Team>>;

    /// A team's squad
    async fn players_in_team(&self, team_id: EntityId) -> Result<Vec<Player>>;

    /// A single player
    async fn lookup_player(&self, id: EntityId) -> Result<Option<Player>>;

    /// Upcoming fixtures in a league
    async fn next_events(&self, league_id: EntityId) -> Result<Vec<Event>>;

    /// A single fixture
    async fn lookup_event(&self, id: EntityId) -> Result<Option<Event>>;
}

/// Fetch the teams of every league in `league_ids` and keep the favourites.
///
/// A league that fails to load is logged and skipped; the rest still count.
pub async fn favourite_teams<A, S>(
    api: &A,
    store: &FavouritesStore<S>,
    league_ids: &[EntityId],
) -> Vec<Team>
where
    A: SportsApi,
    S: KeyValueStore,
{
    if store.snapshot().teams().is_empty() {
        return Vec::new();
    }

    let mut all_teams = Vec::new();
    for &league_id in league_ids {
        match api.teams_in_league(league_id).await {
            Ok(teams) => all_teams.extend(teams),
            Err(e) => {
                tracing::warn!("Failed to fetch teams for league {}: {:#}", league_id, e);
            }
        }
    }

    tracing::debug!("Fetched {} teams from {} leagues", all_teams.len(), league_ids.len());
    store.select(all_teams)
}
