//! The location pool: fixed built-ins plus persisted user additions.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::store::{Storage, StoreError};

/// Locations every copy of the game ships with. Always in the pool and
/// never editable.
pub const BUILTIN_LOCATIONS: &[&str] = &[
    "Airport",
    "Beach",
    "Casino",
    "Concert Hall",
    "Police Station",
    "Restaurant",
    "School",
    "Theater",
    "Hospital",
    "Library",
];

#[derive(thiserror::Error, Debug)]
pub enum LocationError {
    #[error("location name is empty")]
    EmptyName,
    #[error("location {0:?} already exists")]
    DuplicateLocation(String),
    #[error("location {0:?} is not a custom location")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The editable registry behind the assignment pool. Built-ins are fixed;
/// the custom set is rewritten wholesale through the store on every edit.
pub struct LocationRegistry<S> {
    custom: Vec<String>,
    store: S,
}

impl<S: Storage<Vec<String>>> LocationRegistry<S> {
    /// Load the persisted custom set, treating a missing or unreadable
    /// store as empty.
    pub fn open(store: S) -> Self {
        let custom = store.load().unwrap_or_default();
        Self { custom, store }
    }

    pub fn custom(&self) -> &[String] {
        &self.custom
    }

    /// Add a custom location. The name is trimmed first; an empty result
    /// and a name already present (built-in or custom) are rejected. The
    /// store is written before the in-memory set, so a failed save leaves
    /// the registry unchanged.
    pub fn add(&mut self, name: &str) -> Result<(), LocationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LocationError::EmptyName);
        }
        if BUILTIN_LOCATIONS.contains(&name) || self.custom.iter().any(|c| c == name) {
            return Err(LocationError::DuplicateLocation(name.to_string()));
        }
        let mut next = self.custom.clone();
        next.push(name.to_string());
        self.store.save(&next)?;
        self.custom = next;
        tracing::debug!(location = name, custom = self.custom.len(), "custom location added");
        Ok(())
    }

    /// Remove a custom location and persist the rest. Built-ins cannot be
    /// removed; a name missing from the custom set is reported, not
    /// ignored.
    pub fn remove(&mut self, name: &str) -> Result<(), LocationError> {
        let Some(index) = self.custom.iter().position(|c| c == name) else {
            return Err(LocationError::NotFound(name.to_string()));
        };
        let mut next = self.custom.clone();
        next.remove(index);
        self.store.save(&next)?;
        self.custom = next;
        tracing::debug!(location = name, custom = self.custom.len(), "custom location removed");
        Ok(())
    }

    /// Materialize `builtins ∪ custom` for the next game start. Built fresh
    /// on every call so an edit is never missed.
    pub fn pool(&self) -> LocationPool {
        LocationPool::new(&self.custom)
    }
}

/// The full set of candidate locations for one deal. Never empty: the
/// built-ins are always present.
#[derive(Debug, Clone)]
pub struct LocationPool {
    locations: Vec<String>,
}

impl LocationPool {
    fn new(custom: &[String]) -> Self {
        let mut locations: Vec<String> =
            BUILTIN_LOCATIONS.iter().map(|s| s.to_string()).collect();
        locations.extend(custom.iter().cloned());
        Self { locations }
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.locations.iter().any(|l| l == name)
    }

    /// Pick one location uniformly.
    pub fn choose(&self, rng: &mut impl Rng) -> &str {
        self.locations
            .choose(rng)
            .map(String::as_str)
            .expect("pool always contains the built-ins")
    }
}
