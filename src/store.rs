//! Minimal persistence seam: a whole-file JSON store and an in-memory
//! stand-in.

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("encode failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Whole-value load/save. A read that fails for any reason yields `None`
/// and the caller falls back to its default; only writes report errors.
pub trait Storage<T> {
    fn load(&self) -> Option<T>;
    fn save(&self, value: &T) -> Result<(), StoreError>;
}

/// A JSON file rewritten wholesale on every save.
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl<T> Storage<T> for JsonFile
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self) -> Option<T> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(path = %self.path.display(), %err, "store absent");
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::debug!(path = %self.path.display(), %err, "store unreadable, treating as absent");
                None
            }
        }
    }

    fn save(&self, value: &T) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(value)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

/// Keeps the last saved value in memory. Lets the registry and cache be
/// exercised without touching the filesystem.
pub struct MemoryStore<T> {
    slot: RefCell<Option<T>>,
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self { slot: RefCell::new(None) }
    }
}

impl<T: Clone> MemoryStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(value: T) -> Self {
        Self { slot: RefCell::new(Some(value)) }
    }
}

impl<T: Clone> Storage<T> for MemoryStore<T> {
    fn load(&self) -> Option<T> {
        self.slot.borrow().clone()
    }

    fn save(&self, value: &T) -> Result<(), StoreError> {
        *self.slot.borrow_mut() = Some(value.clone());
        Ok(())
    }
}
