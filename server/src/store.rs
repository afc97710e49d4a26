use std::collections::{hash_map::Entry, HashMap};
use tokio::sync::RwLock;

/// Errors raised by [`LinkStore`] writes.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("short code '{0}' is already taken")]
    CodeTaken(String),
}

/// Shared in-memory mapping short_code -> original_url.
///
/// Reads (`contains`, `get`) take the shared side of the lock and may run in
/// parallel; `insert` takes the exclusive side for the duration of a single
/// map insert. Entries are only ever added, never updated or removed, so a
/// code that resolves once resolves to the same URL for the life of the
/// process.
#[derive(Debug, Default)]
pub struct LinkStore {
    links: RwLock<HashMap<String, String>>,
}

impl LinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `true` if the code is currently mapped.
    pub async fn contains(&self, short_code: &str) -> bool {
        self.links.read().await.contains_key(short_code)
    }

    /// Look up a short code. Returns a clone of the original URL if present.
    pub async fn get(&self, short_code: &str) -> Option<String> {
        self.links.read().await.get(short_code).cloned()
    }

    /// Insert a mapping if the code is free.
    ///
    /// The existence check and the insert happen under one write guard, so
    /// two writers racing on the same code cannot both succeed. The loser
    /// gets [`StoreError::CodeTaken`] and the winner's URL is kept.
    pub async fn insert(
        &self,
        short_code: impl Into<String>,
        original_url: impl Into<String>,
    ) -> Result<(), StoreError> {
        let mut links = self.links.write().await;
        match links.entry(short_code.into()) {
            Entry::Occupied(taken) => Err(StoreError::CodeTaken(taken.key().clone())),
            Entry::Vacant(slot) => {
                slot.insert(original_url.into());
                Ok(())
            }
        }
    }

    /// Number of mappings currently stored.
    pub async fn len(&self) -> usize {
        self.links.read().await.len()
    }
}
