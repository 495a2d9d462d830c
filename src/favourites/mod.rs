//! Persisted favourites store
//!
//! [`FavouritesStore`] owns the canonical [`FavouritesSet`] and keeps a copy
//! of it in a [`KeyValueStore`] under one fixed key. Every mutating
//! operation runs its whole read-modify-write cycle, backend write included,
//! under a single async mutex, so rapid taps from several screens can never
//! overwrite each other. A mutation that reaches the mutex before the first
//! [`load`](FavouritesStore::load) reads the persisted value itself, so it
//! never builds on an empty set and writes that over saved favourites.
//!
//! Persistence is best-effort: backend failures are logged and swallowed,
//! and the in-memory set stays authoritative for the running session.

mod set;

pub use set::FavouritesSet;

use tokio::sync::{Mutex, MutexGuard, watch};

use crate::models::{EntityId, EntityKind, Identified};
use crate::storage::KeyValueStore;

/// Storage key used unless the caller picks another one
pub const DEFAULT_STORAGE_KEY: &str = "favourites";

/// State behind the mutation lock
#[derive(Debug, Default)]
struct StoreState {
    set: FavouritesSet,
    /// Whether the persisted value has been read into `set`
    loaded: bool,
}

/// Serialized, persisted set of favourite teams, players and leagues
pub struct FavouritesStore<S> {
    backend: S,
    key: String,
    /// Canonical set. Holding the guard is what serializes mutations.
    state: Mutex<StoreState>,
    /// Last committed snapshot, for lock-free reads and subscribers
    published: watch::Sender<FavouritesSet>,
}

impl<S: KeyValueStore> FavouritesStore<S> {
    /// Create an empty store over `backend` using the default key.
    ///
    /// Nothing is read until [`load`](Self::load) or the first mutation.
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    /// Create an empty store over `backend` using a custom key
    pub fn with_key(backend: S, key: &str) -> Self {
        let (published, _) = watch::channel(FavouritesSet::default());
        Self {
            backend,
            key: key.to_string(),
            state: Mutex::new(StoreState::default()),
            published,
        }
    }

    /// The persistence backend
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// The storage key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace the in-memory set with the persisted one.
    ///
    /// A missing value loads as empty. An unparseable value loads as empty
    /// and is left in place. Invalid and duplicate ids are dropped and the
    /// cleaned value is written back. If the backend cannot be read at all,
    /// the current in-memory set is kept.
    pub async fn load(&self) -> FavouritesSet {
        let mut state = self.state.lock().await;
        self.read_persisted(&mut state).await;
        state.set.clone()
    }

    /// Bookmark `id`. A no-op without a write if it is already present.
    pub async fn add_entity(&self, kind: EntityKind, id: EntityId) -> FavouritesSet {
        self.mutate("add", kind, id, |set| set.insert(kind, id)).await
    }

    /// Un-bookmark `id`. A no-op without a write if it is absent.
    pub async fn remove_entity(&self, kind: EntityKind, id: EntityId) -> FavouritesSet {
        self.mutate("remove", kind, id, |set| set.remove(kind, id)).await
    }

    /// Add `id` if absent, remove it if present, as a single operation
    pub async fn toggle_entity(&self, kind: EntityKind, id: EntityId) -> FavouritesSet {
        self.mutate("toggle", kind, id, |set| {
            if !set.remove(kind, id) {
                set.insert(kind, id);
            }
            true
        })
        .await
    }

    /// Drop every favourite and persist the empty set
    pub async fn clear(&self) -> FavouritesSet {
        let mut state = self.state.lock().await;
        state.loaded = true;
        let snapshot = self.commit(&mut state, FavouritesSet::default());
        self.persist(&snapshot).await;
        tracing::debug!("Cleared favourites");
        snapshot
    }

    /// The raw persisted value, for inspection
    pub async fn raw(&self) -> Option<String> {
        let _guard = self.state.lock().await;
        match self.backend.get(&self.key).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to read favourites: {:#}", e);
                None
            }
        }
    }

    /// Synchronous membership check against the in-memory set
    pub fn is_favourite(&self, kind: EntityKind, id: EntityId) -> bool {
        self.published.borrow().contains(kind, id)
    }

    /// Current committed set
    pub fn snapshot(&self) -> FavouritesSet {
        self.published.borrow().clone()
    }

    /// Receive a fresh snapshot after every committed change
    pub fn subscribe(&self) -> watch::Receiver<FavouritesSet> {
        self.published.subscribe()
    }

    /// Keep only the favourites out of a fetched list; see [`FavouritesSet::select`]
    pub fn select<T, I>(&self, records: I) -> Vec<T>
    where
        T: Identified,
        I: IntoIterator<Item = T>,
    {
        self.published.borrow().select(records)
    }

    /// Read, repair and install the persisted value. Caller holds the lock.
    async fn read_persisted(&self, state: &mut MutexGuard<'_, StoreState>) {
        let raw = match self.backend.get(&self.key).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to read favourites, keeping current set: {:#}", e);
                return;
            }
        };
        state.loaded = true;

        let Some(raw) = raw else {
            tracing::debug!("No persisted favourites under {:?}", self.key);
            self.commit(state, FavouritesSet::default());
            return;
        };

        let (mut set, repaired) = match FavouritesSet::decode(&raw) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::warn!("Persisted favourites are corrupted, starting empty: {}", e);
                (FavouritesSet::default(), false)
            }
        };

        let deduped = set.normalize();
        if repaired || deduped {
            tracing::info!("Removed invalid or duplicate favourites, re-persisting");
            self.persist(&set).await;
        }

        tracing::debug!("Loaded {} favourites", set.len());
        self.commit(state, set);
    }

    /// Run one serialized read-modify-write cycle.
    ///
    /// `apply` returns whether it changed the set; unchanged sets are
    /// neither published nor written. If the persisted value has never been
    /// read, it is read first. If that read fails, the change stays in
    /// memory only, so an unread value on disk is never clobbered.
    async fn mutate<F>(
        &self,
        op: &str,
        kind: EntityKind,
        id: EntityId,
        apply: F,
    ) -> FavouritesSet
    where
        F: FnOnce(&mut FavouritesSet) -> bool,
    {
        let mut state = self.state.lock().await;
        if !state.loaded {
            self.read_persisted(&mut state).await;
        }

        let mut next = state.set.clone();
        if !apply(&mut next) {
            tracing::debug!("{} {} {}: nothing to do", op, kind, id);
            return next;
        }

        // Publish first so the UI reflects the change while the write is in flight.
        let snapshot = self.commit(&mut state, next);
        if state.loaded {
            self.persist(&snapshot).await;
        } else {
            tracing::warn!("{} {} {}: favourites never loaded, not persisting", op, kind, id);
        }
        tracing::debug!("{} {} {}: done", op, kind, id);
        snapshot
    }

    /// Install `next` as the canonical set and notify subscribers if it differs
    fn commit(&self, state: &mut MutexGuard<'_, StoreState>, next: FavouritesSet) -> FavouritesSet {
        state.set = next;
        self.published.send_if_modified(|published| {
            if *published == state.set {
                return false;
            }
            published.clone_from(&state.set);
            true
        });
        state.set.clone()
    }

    /// Write `set` to the backend, logging and swallowing failures
    async fn persist(&self, set: &FavouritesSet) {
        let json = match set.to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to encode favourites: {}", e);
                return;
            }
        };

        if let Err(e) = self.backend.set(&self.key, &json).await {
            tracing::warn!("Failed to persist favourites: {:#}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    const KEY: &str = DEFAULT_STORAGE_KEY;

    fn id(raw: u64) -> EntityId {
        EntityId::new(raw).unwrap()
    }

    fn stored(store: &FavouritesStore<MemoryStore>) -> Option<String> {
        store.backend().value(KEY)
    }

    #[tokio::test]
    async fn test_load_empty_storage() {
        let store = FavouritesStore::new(MemoryStore::new());
        let set = store.load().await;
        assert!(set.is_empty());
        assert_eq!(store.backend().write_count(), 0);
        assert_eq!(stored(&store), None);
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let store = FavouritesStore::new(MemoryStore::new());
        store.load().await;

        let once = store.add_entity(EntityKind::Team, id(7)).await;
        let twice = store.add_entity(EntityKind::Team, id(7)).await;

        assert_eq!(once, twice);
        assert_eq!(twice.teams(), &[id(7)]);
        assert_eq!(store.backend().write_count(), 1);
    }

    #[tokio::test]
    async fn test_remove_absent_is_noop() {
        let store = FavouritesStore::new(MemoryStore::new());
        store.add_entity(EntityKind::League, id(4328)).await;
        let writes = store.backend().write_count();

        let set = store.remove_entity(EntityKind::League, id(1)).await;

        assert_eq!(set.leagues(), &[id(4328)]);
        assert_eq!(store.backend().write_count(), writes);
    }

    #[tokio::test]
    async fn test_round_trip() {
        let backend = MemoryStore::new();
        let first = FavouritesStore::new(backend);
        first.add_entity(EntityKind::Team, id(1)).await;
        first.add_entity(EntityKind::Player, id(2)).await;
        let saved = first.add_entity(EntityKind::League, id(3)).await;

        let raw = stored(&first).unwrap();
        let second = FavouritesStore::new(MemoryStore::with_value(KEY, &raw));
        assert_eq!(second.load().await, saved);
    }

    #[tokio::test]
    async fn test_load_self_heals_duplicates() {
        let store = FavouritesStore::new(MemoryStore::with_value(
            KEY,
            r#"{"teams":[1,2,2,3],"players":[],"leagues":[]}"#,
        ));

        let set = store.load().await;

        assert_eq!(set.teams(), &[id(1), id(2), id(3)]);
        assert_eq!(
            stored(&store).as_deref(),
            Some(r#"{"teams":[1,2,3],"players":[],"leagues":[]}"#)
        );
        assert_eq!(store.backend().write_count(), 1);
    }

    #[tokio::test]
    async fn test_clean_load_does_not_write() {
        let store =
            FavouritesStore::new(MemoryStore::with_value(KEY, r#"{"teams":[1],"players":[2]}"#));
        let set = store.load().await;
        assert_eq!(set.players(), &[id(2)]);
        assert_eq!(store.backend().write_count(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_adds_both_land() {
        let store = FavouritesStore::new(MemoryStore::new());
        store.load().await;

        tokio::join!(
            store.add_entity(EntityKind::Team, id(10)),
            store.add_entity(EntityKind::Team, id(11)),
        );

        let set = store.snapshot();
        assert!(set.contains(EntityKind::Team, id(10)));
        assert!(set.contains(EntityKind::Team, id(11)));

        let persisted = FavouritesSet::from_json(&stored(&store).unwrap()).unwrap();
        assert_eq!(persisted, set);
    }

    #[tokio::test]
    async fn test_load_racing_add_keeps_add() {
        let store = FavouritesStore::new(MemoryStore::new());

        let (_, after_add) = tokio::join!(
            store.load(),
            store.add_entity(EntityKind::Player, id(5))
        );

        assert_eq!(after_add.players(), &[id(5)]);
        assert!(store.is_favourite(EntityKind::Player, id(5)));
        assert_eq!(store.load().await.players(), &[id(5)]);
    }

    #[tokio::test]
    async fn test_no_cross_kind_leakage() {
        let store = FavouritesStore::new(MemoryStore::new());
        let set = store.add_entity(EntityKind::Team, id(5)).await;

        assert_eq!(set.teams(), &[id(5)]);
        assert!(set.players().is_empty());
        assert!(set.leagues().is_empty());
        assert!(!store.is_favourite(EntityKind::Player, id(5)));
        assert!(!store.is_favourite(EntityKind::League, id(5)));
    }

    #[tokio::test]
    async fn test_corrupted_storage_loads_empty() {
        let store = FavouritesStore::new(MemoryStore::with_value(KEY, "not-json"));

        let set = store.load().await;

        assert!(set.is_empty());
        assert_eq!(stored(&store).as_deref(), Some("not-json"));
        assert_eq!(store.backend().write_count(), 0);
    }

    #[tokio::test]
    async fn test_add_replaces_corrupted_value() {
        let store = FavouritesStore::new(MemoryStore::with_value(KEY, "not-json"));

        let set = store.add_entity(EntityKind::Team, id(9)).await;

        assert_eq!(set.teams(), &[id(9)]);
        assert_eq!(
            stored(&store).as_deref(),
            Some(r#"{"teams":[9],"players":[],"leagues":[]}"#)
        );

        store.backend().insert(KEY, "not-json");
        assert!(store.load().await.is_empty());
        assert!(!store.is_favourite(EntityKind::Team, id(9)));
    }

    #[tokio::test]
    async fn test_add_before_load_keeps_saved_favourites() {
        let store = FavouritesStore::new(MemoryStore::with_value(
            KEY,
            r#"{"teams":[1,2],"players":[],"leagues":[4328]}"#,
        ));

        let (after_add, loaded) = tokio::join!(
            store.add_entity(EntityKind::Player, id(5)),
            store.load()
        );

        let expected = r#"{"teams":[1,2],"players":[5],"leagues":[4328]}"#;
        assert_eq!(after_add.to_json().unwrap(), expected);
        assert_eq!(loaded.to_json().unwrap(), expected);
        assert_eq!(stored(&store).as_deref(), Some(expected));
        assert_eq!(store.backend().write_count(), 1);
    }

    #[tokio::test]
    async fn test_remove_and_toggle_before_load() {
        let store = FavouritesStore::new(MemoryStore::with_value(
            KEY,
            r#"{"teams":[1,2],"players":[8],"leagues":[]}"#,
        ));

        let set = store.remove_entity(EntityKind::Team, id(1)).await;
        assert_eq!(set.teams(), &[id(2)]);
        assert_eq!(set.players(), &[id(8)]);

        let other = FavouritesStore::new(MemoryStore::with_value(
            KEY,
            r#"{"teams":[1],"players":[8],"leagues":[]}"#,
        ));
        let set = other.toggle_entity(EntityKind::Player, id(8)).await;
        assert_eq!(set.teams(), &[id(1)]);
        assert!(set.players().is_empty());
        assert_eq!(
            stored(&other).as_deref(),
            Some(r#"{"teams":[1],"players":[],"leagues":[]}"#)
        );
    }

    #[tokio::test]
    async fn test_add_with_unreadable_storage_does_not_overwrite() {
        let store = FavouritesStore::new(MemoryStore::with_value(
            KEY,
            r#"{"teams":[1],"players":[],"leagues":[]}"#,
        ));
        store.backend().set_fail_reads(true);

        let set = store.add_entity(EntityKind::Team, id(2)).await;

        assert_eq!(set.teams(), &[id(2)]);
        assert_eq!(store.backend().write_count(), 0);

        store.backend().set_fail_reads(false);
        let set = store.add_entity(EntityKind::Team, id(3)).await;
        assert_eq!(set.teams(), &[id(1), id(3)]);
        assert_eq!(
            stored(&store).as_deref(),
            Some(r#"{"teams":[1,3],"players":[],"leagues":[]}"#)
        );
    }

    #[tokio::test]
    async fn test_load_drops_invalid_ids() {
        let store = FavouritesStore::new(MemoryStore::with_value(
            KEY,
            r#"{"teams":[0,133604],"players":[],"leagues":[4328]}"#,
        ));

        let set = store.load().await;

        assert_eq!(set.teams(), &[id(133_604)]);
        assert_eq!(set.leagues(), &[id(4328)]);
        assert_eq!(
            stored(&store).as_deref(),
            Some(r#"{"teams":[133604],"players":[],"leagues":[4328]}"#)
        );

        let set = store.add_entity(EntityKind::Team, id(7)).await;
        assert_eq!(set.teams(), &[id(133_604), id(7)]);
        assert_eq!(set.leagues(), &[id(4328)]);
    }

    #[tokio::test]
    async fn test_end_to_end() {
        let store = FavouritesStore::new(MemoryStore::new());
        store.load().await;

        store.add_entity(EntityKind::Team, id(100)).await;
        store.add_entity(EntityKind::Team, id(200)).await;
        let set = store.remove_entity(EntityKind::Team, id(100)).await;

        let expected = r#"{"teams":[200],"players":[],"leagues":[]}"#;
        assert_eq!(set.to_json().unwrap(), expected);
        assert_eq!(stored(&store).as_deref(), Some(expected));
    }

    #[tokio::test]
    async fn test_write_failure_keeps_memory() {
        let store = FavouritesStore::new(MemoryStore::new());
        store.backend().set_fail_writes(true);

        let set = store.add_entity(EntityKind::Team, id(3)).await;

        assert_eq!(set.teams(), &[id(3)]);
        assert!(store.is_favourite(EntityKind::Team, id(3)));
        assert_eq!(stored(&store), None);
    }

    #[tokio::test]
    async fn test_read_failure_keeps_memory() {
        let store = FavouritesStore::new(MemoryStore::new());
        store.add_entity(EntityKind::League, id(4425)).await;
        store.backend().set_fail_reads(true);

        let set = store.load().await;

        assert_eq!(set.leagues(), &[id(4425)]);
        assert_eq!(store.raw().await, None);
    }

    #[tokio::test]
    async fn test_toggle() {
        let store = FavouritesStore::new(MemoryStore::new());
        let on = store.toggle_entity(EntityKind::Player, id(8)).await;
        assert!(on.contains(EntityKind::Player, id(8)));
        let off = store.toggle_entity(EntityKind::Player, id(8)).await;
        assert!(off.is_empty());
        assert_eq!(store.backend().write_count(), 2);
    }

    #[tokio::test]
    async fn test_clear() {
        let store = FavouritesStore::new(MemoryStore::new());
        store.add_entity(EntityKind::Team, id(1)).await;
        store.add_entity(EntityKind::League, id(2)).await;

        assert!(store.clear().await.is_empty());
        assert_eq!(
            store.raw().await.as_deref(),
            Some(r#"{"teams":[],"players":[],"leagues":[]}"#)
        );
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let store = FavouritesStore::new(MemoryStore::new());
        let mut rx = store.subscribe();

        store.add_entity(EntityKind::Team, id(12)).await;

        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().contains(EntityKind::Team, id(12)));

        store.add_entity(EntityKind::Team, id(12)).await;
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_custom_key() {
        let store = FavouritesStore::with_key(MemoryStore::new(), "favourites-v2");
        store.add_entity(EntityKind::Team, id(1)).await;
        assert_eq!(store.key(), "favourites-v2");
        assert!(store.backend().value("favourites-v2").is_some());
        assert!(store.backend().value(KEY).is_none());
    }

    #[test]
    fn test_is_favourite_is_sync() {
        let store = FavouritesStore::new(MemoryStore::new());
        tokio_test::block_on(store.add_entity(EntityKind::Team, id(77)));
        assert!(store.is_favourite(EntityKind::Team, id(77)));
        assert!(!store.is_favourite(EntityKind::Team, id(78)));
    }
}
