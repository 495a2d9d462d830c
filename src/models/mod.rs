//! Data models for Touchline

mod de;
mod entity;
mod event;
mod league;
mod player;
mod team;

pub use entity::{EntityId, EntityKind, Identified};
pub use event::Event;
pub use league::League;
pub use player::Player;
pub use team::Team;
