//! Identifier and category types shared by the store and the API models

use serde::{Deserialize, Serialize};

use crate::error::FavouritesError;

/// Upstream identifier of a team, player or league
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct EntityId(u64);

impl EntityId {
    /// Wrap a raw identifier, rejecting zero
    pub fn new(raw: u64) -> Result<Self, FavouritesError> {
        if raw == 0 {
            return Err(FavouritesError::InvalidIdentifier(raw.to_string()));
        }
        Ok(Self(raw))
    }

    /// Parse an identifier as it arrives from the API or the command line
    pub fn parse(s: &str) -> Result<Self, FavouritesError> {
        let trimmed = s.trim();
        let raw: u64 = trimmed
            .parse()
            .map_err(|_| FavouritesError::InvalidIdentifier(s.to_string()))?;
        Self::new(raw).map_err(|_| FavouritesError::InvalidIdentifier(s.to_string()))
    }

    /// The raw integer value
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for EntityId {
    type Error = FavouritesError;

    fn try_from(raw: u64) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<EntityId> for u64 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which collection of the favourites set an identifier belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A team
    Team,
    /// A player
    Player,
    /// A league
    League,
}

impl EntityKind {
    /// All kinds, in display order
    pub const fn all() -> &'static [Self] {
        &[Self::Team, Self::Player, Self::League]
    }

    /// Singular display name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Team => "Team",
            Self::Player => "Player",
            Self::League => "League",
        }
    }

    /// Name of the matching collection in the persisted JSON
    pub const fn collection(&self) -> &'static str {
        match self {
            Self::Team => "teams",
            Self::Player => "players",
            Self::League => "leagues",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Result<Self, FavouritesError> {
        match s.trim().to_lowercase().as_str() {
            "team" | "teams" => Ok(Self::Team),
            "player" | "players" => Ok(Self::Player),
            "league" | "leagues" => Ok(Self::League),
            _ => Err(FavouritesError::UnknownKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A remote record that can be matched against the favourites set
pub trait Identified {
    /// Which favourites collection this record maps to
    fn kind(&self) -> EntityKind;

    /// The record's identifier, if the upstream value is a valid one
    fn entity_id(&self) -> Option<EntityId>;
}
