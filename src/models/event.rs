//! Fixture/event record from TheSportsDB

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::de::null_as_default;

/// An event as returned by `eventsnextleague.php` / `lookupevent.php`
///
/// Events are not favouritable, so there is no `Identified` impl.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Upstream identifier (numeric string)
    #[serde(rename = "idEvent", default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Event title, e.g. "Mumbai Indians vs Chennai Super Kings"
    #[serde(rename = "strEvent", default, deserialize_with = "null_as_default")]
    pub name: String,
    /// League name
    #[serde(rename = "strLeague", default)]
    pub league: Option<String>,
    /// Date as `YYYY-MM-DD`
    #[serde(rename = "dateEvent", default)]
    pub date_event: Option<String>,
    /// Start time as `HH:MM:SS`
    #[serde(rename = "strTime", default)]
    pub time: Option<String>,
    /// Home side
    #[serde(rename = "strHomeTeam", default)]
    pub home_team: Option<String>,
    /// Away side
    #[serde(rename = "strAwayTeam", default)]
    pub away_team: Option<String>,
    /// Home score
    #[serde(rename = "intHomeScore", default)]
    pub home_score: Option<String>,
    /// Away score
    #[serde(rename = "intAwayScore", default)]
    pub away_score: Option<String>,
    /// Venue
    #[serde(rename = "strVenue", default)]
    pub venue: Option<String>,
    /// Status, e.g. "Not Started", "Match Finished"
    #[serde(rename = "strStatus", default)]
    pub status: Option<String>,
}

impl Event {
    /// Parsed event date, if present and well-formed
    pub fn date(&self) -> Option<NaiveDate> {
        self.date_event
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }

    /// "Home vs Away", falling back to the event title
    pub fn matchup(&self) -> String {
        match (&self.home_team, &self.away_team) {
            (Some(home), Some(away)) => format!("{home} vs {away}"),
            _ => self.name.clone(),
        }
    }
}
