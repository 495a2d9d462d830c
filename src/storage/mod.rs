//! Persistence backends for the favourites store
//!
//! The store only needs a durable string-to-string map. Two backends ship:
//! [`SqliteStore`] for on-device storage and [`MemoryStore`] for tests and
//! throwaway sessions.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use anyhow::Result;

/// Asynchronous key-value persistence
#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` if absent
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
