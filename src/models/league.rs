//! League record from TheSportsDB

use serde::{Deserialize, Serialize};

use super::de::null_as_default;
use super::{EntityId, EntityKind, Identified};

/// A league as returned by `all_leagues.php` / `lookupleague.php`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    /// Upstream identifier (numeric string)
    #[serde(rename = "idLeague", default, deserialize_with = "null_as_default")]
    pub id: String,
    /// League name
    #[serde(rename = "strLeague", default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Sport, e.g. "Cricket"
    #[serde(rename = "strSport", default)]
    pub sport: Option<String>,
    /// Alternate names
    #[serde(rename = "strLeagueAlternate", default)]
    pub alternate: Option<String>,
    /// Country
    #[serde(rename = "strCountry", default)]
    pub country: Option<String>,
    /// Badge image URL
    #[serde(rename = "strBadge", default)]
    pub badge_url: Option<String>,
    /// English description
    #[serde(rename = "strDescriptionEN", default)]
    pub description: Option<String>,
}

impl League {
    /// Whether this league belongs to the given sport (case-insensitive)
    pub fn is_sport(&self, sport: &str) -> bool {
        self.sport
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case(sport))
    }
}

impl Identified for League {
    fn kind(&self) -> EntityKind {
        EntityKind::League
    }

    fn entity_id(&self) -> Option<EntityId> {
        EntityId::parse(&self.id).ok()
    }
}
