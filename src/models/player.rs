//! Player record from TheSportsDB

use serde::{Deserialize, Serialize};

use super::de::null_as_default;
use super::{EntityId, EntityKind, Identified};

/// A player as returned by `lookup_all_players.php` / `lookupplayer.php`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Upstream identifier (numeric string)
    #[serde(rename = "idPlayer", default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Player name
    #[serde(rename = "strPlayer", default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Current team
    #[serde(rename = "strTeam", default)]
    pub team: Option<String>,
    /// Playing position / role
    #[serde(rename = "strPosition", default)]
    pub position: Option<String>,
    /// Nationality
    #[serde(rename = "strNationality", default)]
    pub nationality: Option<String>,
    /// Thumbnail image URL
    #[serde(rename = "strThumb", default)]
    pub thumb_url: Option<String>,
}

impl Identified for Player {
    fn kind(&self) -> EntityKind {
        EntityKind::Player
    }

    fn entity_id(&self) -> Option<EntityId> {
        EntityId::parse(&self.id).ok()
    }
}
