//! TheSportsDB v1 JSON API client

use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::models::{EntityId, Event, League, Player, Team};

use super::SportsApi;

/// Public API host
pub const DEFAULT_BASE_URL: &str = "https://www.thesportsdb.com";

/// Free-tier API key
pub const DEFAULT_API_KEY: &str = "3";

/// TheSportsDB API client
pub struct TheSportsDbClient {
    client: Client,
    base_url: String,
    api_key: String,
    sport: String,
    league_limit: usize,
}

impl TheSportsDbClient {
    /// Create a new client
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            sport: "Cricket".to_string(),
            league_limit: 20,
        }
    }

    /// Restrict `all_leagues` to one sport, keeping at most `limit` entries
    pub fn with_sport(mut self, sport: &str, limit: usize) -> Self {
        self.sport = sport.to_string();
        self.league_limit = limit;
        self
    }

    /// Build API URL
    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/api/v1/json/{}/{}", self.base_url, self.api_key, endpoint)
    }

    /// GET an endpoint and pull the list stored under `field`
    async fn fetch_list<T: DeserializeOwned>(&self, endpoint: &str, field: &str) -> Result<Vec<T>> {
        let url = self.api_url(endpoint);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {endpoint}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("TheSportsDB error {status}: {body}");
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read {endpoint} response"))?;

        parse_list(&body, field).with_context(|| format!("Failed to parse {endpoint} response"))
    }
}

impl SportsApi for TheSportsDbClient {
    async fn all_leagues(&self) -> Result<Vec<League>> {
        let leagues: Vec<League> = self.fetch_list("all_leagues.php", "leagues").await?;
        Ok(leagues
            .into_iter()
            .filter(|l| l.is_sport(&self.sport))
            .take(self.league_limit)
            .collect())
    }

    async fn lookup_league(&self, id: EntityId) -> Result<Option<League>> {
        let leagues = self
            .fetch_list(&format!("lookupleague.php?id={id}"), "leagues")
            .await?;
        Ok(leagues.into_iter().next())
    }

    async fn teams_in_league(&self, league_id: EntityId) -> Result<Vec<Team>> {
        self.fetch_list(&format!("lookup_all_teams.php?id={league_id}"), "teams")
            .await
    }

    async fn search_teams(&self, name: &str) -> Result<Vec<Team>> {
        let endpoint = format!("searchteams.php?t={}", urlencoding::encode(name));
        self.fetch_list(&endpoint, "teams").await
    }

    async fn lookup_team(&self, id: EntityId) -> Result<Option<Team>> {
        let teams = self
            .fetch_list(&format!("lookupteam.php?id={id}"), "teams")
            .await?;
        Ok(teams.into_iter().next())
    }

    async fn players_in_team(&self, team_id: EntityId) -> Result<Vec<Player>> {
        self.fetch_list(&format!("lookup_all_players.php?id={team_id}"), "player")
            .await
    }

    async fn lookup_player(&self, id: EntityId) -> Result<Option<Player>> {
        let players = self
            .fetch_list(&format!("lookupplayer.php?id={id}"), "players")
            .await?;
        Ok(players.into_iter().next())
    }

    async fn next_events(&self, league_id: EntityId) -> Result<Vec<Event>> {
        self.fetch_list(&format!("eventsnextleague.php?id={league_id}"), "events")
            .await
    }

    async fn lookup_event(&self, id: EntityId) -> Result<Option<Event>> {
        let events = self
            .fetch_list(&format!("lookupevent.php?id={id}"), "events")
            .await?;
        Ok(events.into_iter().next())
    }
}

/// Decode `{"<field>": [..] | null}`.
///
/// TheSportsDB answers "nothing found" with `null`, a missing field or an
/// empty body, and occasionally puts `null` entries inside the array.
fn parse_list<T: DeserializeOwned>(body: &str, field: &str) -> Result<Vec<T>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut value: serde_json::Value = serde_json::from_str(body)?;
    let list = match value.get_mut(field).map(serde_json::Value::take) {
        None | Some(serde_json::Value::Null) => return Ok(Vec::new()),
        Some(list) => list,
    };

    let items: Vec<Option<T>> = serde_json::from_value(list)?;
    Ok(items.into_iter().flatten().collect())
}
