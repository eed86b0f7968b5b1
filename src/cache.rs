//! Last-session cache: the previous configuration, offered for reuse at
//! startup.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::session::{Session, SessionConfig};
use crate::store::{Storage, StoreError};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("no usable previous session was found")]
    MissingOrInvalid,
}

/// Wire shape of `player_cache.json`. Names are keyed `"Player 1"`,
/// `"Player 2"`, ... in seat order; `timer` is whole seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCache {
    pub players: usize,
    pub spies: usize,
    #[serde(default)]
    pub names: BTreeMap<String, String>,
    #[serde(default)]
    pub timer: Option<u32>,
}

impl PlayerCache {
    /// Capture the fields worth offering again next launch.
    pub fn from_session(session: &Session) -> Self {
        let names = session
            .player_names()
            .iter()
            .enumerate()
            .map(|(i, name)| (format!("Player {}", i + 1), name.clone()))
            .collect();
        Self {
            players: session.players(),
            spies: session.spies(),
            names,
            timer: session.discussion_secs(),
        }
    }

    /// Re-validate the cached fields and hand back a config plus the seat
    /// names. A cache that no longer passes the configuration rules is
    /// reported rather than trusted; a missing timer is fine and yields an
    /// untimed discussion.
    pub fn restore(&self) -> Result<(SessionConfig, Vec<String>), CacheError> {
        let config = SessionConfig::restore(self.players, self.spies, self.timer)
            .ok_or(CacheError::MissingOrInvalid)?;
        let names = (0..self.players)
            .map(|i| {
                let seat = format!("Player {}", i + 1);
                self.names.get(&seat).cloned().unwrap_or(seat)
            })
            .collect();
        Ok((config, names))
    }

    /// Load from the store, treating missing or unreadable data as absent.
    pub fn load(store: &impl Storage<PlayerCache>) -> Option<PlayerCache> {
        store.load()
    }

    /// Overwrite the previous cache, keeping no history.
    pub fn save(&self, store: &impl Storage<PlayerCache>) -> Result<(), StoreError> {
        store.save(self)
    }
}
