//! Errors raised at the favourites call boundary

use thiserror::Error;

/// Malformed arguments handed to the favourites store.
///
/// Persistence problems never show up here; the store logs and recovers
/// from those on its own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FavouritesError {
    /// The identifier was empty, non-numeric or zero
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    /// The category selector was not team, player or league
    #[error("unknown favourite kind: {0:?} (expected team, player or league)")]
    UnknownKind(String),
}
