//! Filters: the active keyword set restricting the visible job list.
//!
//! Owns the set exclusively and persists it under a fixed storage key after every
//! mutation. Order is insertion order; `toggle` never introduces duplicates.

pub mod handlers;
mod view;

use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, error, warn};

use crate::notify::Notifier;
use crate::storage::KeyValueStore;

pub const STORAGE_KEY: &str = "filters";
pub const DEFAULT_FILTERS: [&str; 3] = ["Frontend", "CSS", "JavaScript"];

pub struct Filters {
    active: RwLock<Vec<String>>,
    // Held from mutation through the storage write, so writes land in mutation order
    // while readers of `active` are not blocked by storage I/O.
    persist_lock: Mutex<()>,
    store: Arc<dyn KeyValueStore>,
    notifier: Notifier,
}

impl Filters {
    /// Restores the persisted set, or starts from `DEFAULT_FILTERS` when nothing is stored.
    /// A stored value that cannot be read or parsed is logged and replaced by the defaults.
    pub fn load(store: Arc<dyn KeyValueStore>, notifier: Notifier) -> Self {
        let active = match store.get(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(saved) => {
                    debug!(count = saved.len(), "Restored persisted filters");
                    saved
                }
                Err(e) => {
                    warn!("Persisted filters are corrupt, using defaults: {e}");
                    default_filters()
                }
            },
            Ok(None) => default_filters(),
            Err(e) => {
                warn!("Could not read persisted filters, using defaults: {e}");
                default_filters()
            }
        };

        Self {
            active: RwLock::new(active),
            persist_lock: Mutex::new(()),
            store,
            notifier,
        }
    }

    /// Snapshot of the active filters. Mutating the returned vector has no effect here.
    pub fn get(&self) -> Vec<String> {
        self.read().clone()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.read().iter().any(|k| k == keyword)
    }

    /// Removes `keyword` if active, appends it otherwise. Applying it twice is a no-op.
    pub fn toggle(&self, keyword: &str) {
        self.mutate(|active| {
            match active.iter().position(|k| k == keyword) {
                Some(index) => {
                    active.remove(index);
                }
                None => active.push(keyword.to_string()),
            }
            debug!(keyword, active = ?active, "Filter toggled");
        });
    }

    pub fn clear(&self) {
        self.mutate(|active| {
            active.clear();
            debug!("Filters cleared");
        });
    }

    /// Applies `change`, then persists a snapshot taken under the write lock.
    /// The write lock is released before the storage write.
    fn mutate(&self, change: impl FnOnce(&mut Vec<String>)) {
        let _persisting = self.persist_lock.lock().unwrap_or_else(|e| e.into_inner());
        let snapshot = {
            let mut active = self.write();
            change(&mut *active);
            serde_json::to_string(&*active)
        };

        match snapshot {
            Ok(raw) => self.persist(&raw),
            Err(e) => error!("Failed to serialize filters: {e}"),
        }
        self.notifier.notify();
    }

    // Storage failures leave the in-memory set authoritative for this session.
    fn persist(&self, raw: &str) {
        if let Err(e) = self.store.set(STORAGE_KEY, raw) {
            error!("Failed to persist filters: {e}");
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<String>> {
        self.active.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<String>> {
        self.active.write().unwrap_or_else(|e| e.into_inner())
    }
}

fn default_filters() -> Vec<String> {
    DEFAULT_FILTERS.iter().map(|k| k.to_string()).collect()
}
