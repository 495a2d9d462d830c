//! Team record from TheSportsDB

use serde::{Deserialize, Serialize};

use super::de::null_as_default;
use super::{EntityId, EntityKind, Identified};

/// A team as returned by `lookup_all_teams.php` and friends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Upstream identifier (numeric string)
    #[serde(rename = "idTeam", default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Team name
    #[serde(rename = "strTeam", default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Short name, e.g. "MI"
    #[serde(rename = "strTeamShort", default)]
    pub short_name: Option<String>,
    /// League the team plays in
    #[serde(rename = "strLeague", default)]
    pub league: Option<String>,
    /// Country
    #[serde(rename = "strCountry", default)]
    pub country: Option<String>,
    /// Home ground
    #[serde(rename = "strStadium", default)]
    pub stadium: Option<String>,
    /// Year founded
    #[serde(rename = "intFormedYear", default)]
    pub formed_year: Option<String>,
    /// Badge image URL
    #[serde(rename = "strTeamBadge", default)]
    pub badge_url: Option<String>,
    /// English description
    #[serde(rename = "strDescriptionEN", default)]
    pub description: Option<String>,
}

impl Identified for Team {
    fn kind(&self) -> EntityKind {
        EntityKind::Team
    }

    fn entity_id(&self) -> Option<EntityId> {
        EntityId::parse(&self.id).ok()
    }
}
