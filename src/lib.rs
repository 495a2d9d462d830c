//! # Touchline
//!
//! A terminal sports tracker backed by TheSportsDB, with a persisted list of
//! favourite teams, players and leagues.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          CLI                                │
//! │        Parses commands, wires config, API and store         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │     Config      │ │       API       │ │   Favourites    │
//! │                 │ │                 │ │                 │
//! │ • Load/Save     │ │ • TheSportsDB   │ │ • Serialized    │
//! │ • Leagues       │ │ • Unified trait │ │ • Self-healing  │
//! │ • Storage key   │ │ • Reconcile     │ │ • Subscriptions │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//!                                                  │
//!                                                  ▼
//!                                         ┌─────────────────┐
//!                                         │     Storage     │
//!                                         │                 │
//!                                         │ • SQLite        │
//!                                         │ • In-memory     │
//!                                         └─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`api`] — TheSportsDB client and favourite reconciliation
//! - [`config`] — Configuration management
//! - [`error`] — Errors raised at the favourites call boundary
//! - [`favourites`] — The favourites store
//! - [`models`] — Identifiers and remote records
//! - [`storage`] — Key-value persistence backends
//!
//! ## Example
//!
//! ```no_run
//! use touchline::{EntityId, EntityKind, FavouritesStore, MemoryStore};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let store = FavouritesStore::new(MemoryStore::new());
//! store.load().await;
//! store.add_entity(EntityKind::Team, EntityId::parse("133604")?).await;
//! assert!(store.is_favourite(EntityKind::Team, EntityId::parse("133604")?));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::future_not_send)]

pub mod api;
pub mod config;
pub mod error;
pub mod favourites;
pub mod models;
pub mod paths;
pub mod storage;

// Re-export main types for convenience
pub use config::Config;
pub use error::FavouritesError;
pub use favourites::{FavouritesSet, FavouritesStore};
pub use models::{EntityId, EntityKind, Event, Identified, League, Player, Team};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
