//! The three-collection favourites aggregate and its durable JSON shape

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use crate::models::{EntityId, EntityKind, Identified};

/// Bookmarked team, player and league identifiers
///
/// Each collection holds an identifier at most once and keeps insertion
/// order. Serializes as `{"teams":[..],"players":[..],"leagues":[..]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FavouritesSet {
    teams: Vec<EntityId>,
    players: Vec<EntityId>,
    leagues: Vec<EntityId>,
}

/// Stored shape as read back from disk, before any validation
#[derive(Deserialize)]
struct StoredFavourites {
    #[serde(default)]
    teams: Option<Vec<Value>>,
    #[serde(default)]
    players: Option<Vec<Value>>,
    #[serde(default)]
    leagues: Option<Vec<Value>>,
}

/// Accept positive integers, and numeric strings written by older builds
fn stored_id(value: &Value) -> Option<EntityId> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|raw| EntityId::new(raw).ok()),
        Value::String(s) => EntityId::parse(s).ok(),
        _ => None,
    }
}

/// Keep the valid ids of one stored collection.
/// The flag is set when anything was dropped or rewritten.
fn stored_ids(values: Option<Vec<Value>>) -> (Vec<EntityId>, bool) {
    let values = values.unwrap_or_default();
    let mut repaired = false;
    let ids = values
        .iter()
        .filter_map(|value| {
            let id = stored_id(value);
            repaired |= !matches!(value, Value::Number(_)) || id.is_none();
            id
        })
        .collect();
    (ids, repaired)
}

impl FavouritesSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifiers of one kind, in insertion order
    pub fn ids(&self, kind: EntityKind) -> &[EntityId] {
        match kind {
            EntityKind::Team => &self.teams,
            EntityKind::Player => &self.players,
            EntityKind::League => &self.leagues,
        }
    }

    fn ids_mut(&mut self, kind: EntityKind) -> &mut Vec<EntityId> {
        match kind {
            EntityKind::Team => &mut self.teams,
            EntityKind::Player => &mut self.players,
            EntityKind::League => &mut self.leagues,
        }
    }

    /// Favourite teams
    pub fn teams(&self) -> &[EntityId] {
        &self.teams
    }

    /// Favourite players
    pub fn players(&self) -> &[EntityId] {
        &self.players
    }

    /// Favourite leagues
    pub fn leagues(&self) -> &[EntityId] {
        &self.leagues
    }

    /// Membership check
    pub fn contains(&self, kind: EntityKind, id: EntityId) -> bool {
        self.ids(kind).contains(&id)
    }

    /// Append `id` unless already present. Returns whether it was added.
    pub fn insert(&mut self, kind: EntityKind, id: EntityId) -> bool {
        if self.contains(kind, id) {
            return false;
        }
        self.ids_mut(kind).push(id);
        true
    }

    /// Drop `id` if present. Returns whether it was removed.
    pub fn remove(&mut self, kind: EntityKind, id: EntityId) -> bool {
        let ids = self.ids_mut(kind);
        let before = ids.len();
        ids.retain(|&existing| existing != id);
        ids.len() != before
    }

    /// Remove duplicate identifiers, keeping each first occurrence.
    /// Returns whether anything changed.
    pub fn normalize(&mut self) -> bool {
        let mut changed = false;
        for &kind in EntityKind::all() {
            let ids = self.ids_mut(kind);
            let before = ids.len();
            let mut seen = HashSet::with_capacity(before);
            ids.retain(|id| seen.insert(*id));
            changed |= ids.len() != before;
        }
        changed
    }

    /// Total number of favourites across all kinds
    pub fn len(&self) -> usize {
        self.teams.len() + self.players.len() + self.leagues.len()
    }

    /// Whether all three collections are empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Encode in the durable storage format
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decode from the durable storage format, without deduplicating.
    ///
    /// Missing or `null` collections read as empty. Elements that are not
    /// valid identifiers are dropped rather than failing the whole value.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        Self::decode(raw).map(|(set, _)| set)
    }

    /// Like [`from_json`](Self::from_json), also reporting whether any
    /// element had to be dropped or rewritten
    pub fn decode(raw: &str) -> serde_json::Result<(Self, bool)> {
        let stored: StoredFavourites = serde_json::from_str(raw)?;
        let (teams, teams_repaired) = stored_ids(stored.teams);
        let (players, players_repaired) = stored_ids(stored.players);
        let (leagues, leagues_repaired) = stored_ids(stored.leagues);
        let set = Self {
            teams,
            players,
            leagues,
        };
        Ok((set, teams_repaired || players_repaired || leagues_repaired))
    }

    /// Reconcile a fetched list against this set.
    ///
    /// Drops records without a valid id, keeps the first record per id,
    /// and returns only favourites, in fetch order.
    pub fn select<T, I>(&self, records: I) -> Vec<T>
    where
        T: Identified,
        I: IntoIterator<Item = T>,
    {
        let mut seen = HashSet::new();
        records
            .into_iter()
            .filter(|record| {
                record.entity_id().is_some_and(|id| {
                    seen.insert((record.kind(), id)) && self.contains(record.kind(), id)
                })
            })
            .collect()
    }
}
