//! Session configuration, validation, and game start.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::locations::LocationPool;
use crate::roles::RoleAssignment;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("please enter whole numbers")]
    ParseError,
    #[error("at least 2 players are required")]
    TooFewPlayers,
    #[error("there must be between 1 and {max} spies")]
    InvalidSpyCount { max: usize },
    #[error("please enter a discussion time of at least 1 minute")]
    InvalidDuration,
}

/// Validated game parameters. A freshly configured session always carries a
/// discussion duration; only one restored from cache may lack it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    players: usize,
    spies: usize,
    discussion_secs: Option<u32>,
}

impl SessionConfig {
    /// Validate counts and a duration in minutes. Violations are reported
    /// one at a time, in a fixed order: player count, spy count, duration.
    pub fn new(players: i64, spies: i64, minutes: i64) -> Result<Self, ConfigError> {
        if players <= 1 {
            return Err(ConfigError::TooFewPlayers);
        }
        if spies <= 0 || spies >= players {
            return Err(ConfigError::InvalidSpyCount { max: (players - 1) as usize });
        }
        if minutes <= 0 {
            return Err(ConfigError::InvalidDuration);
        }
        let secs = u32::try_from(minutes)
            .ok()
            .and_then(|m| m.checked_mul(60))
            .ok_or(ConfigError::InvalidDuration)?;
        Ok(Self {
            players: players as usize,
            spies: spies as usize,
            discussion_secs: Some(secs),
        })
    }

    /// Parse raw text fields the way a form delivers them, then validate.
    /// All three fields must parse as integers before any range check runs.
    pub fn parse(players: &str, spies: &str, minutes: &str) -> Result<Self, ConfigError> {
        let players: i64 = players.trim().parse().map_err(|_| ConfigError::ParseError)?;
        let spies: i64 = spies.trim().parse().map_err(|_| ConfigError::ParseError)?;
        let minutes: i64 = minutes.trim().parse().map_err(|_| ConfigError::ParseError)?;
        Self::new(players, spies, minutes)
    }

    /// Rebuild a config from cached fields. The timer may be absent or
    /// stale; a non-positive one is dropped rather than rejected.
    pub(crate) fn restore(players: usize, spies: usize, discussion_secs: Option<u32>) -> Option<Self> {
        if players <= 1 || spies == 0 || spies >= players {
            return None;
        }
        Some(Self {
            players,
            spies,
            discussion_secs: discussion_secs.filter(|s| *s > 0),
        })
    }

    pub fn players(&self) -> usize {
        self.players
    }

    pub fn spies(&self) -> usize {
        self.spies
    }

    /// Discussion length in whole seconds, if a timer was configured.
    pub fn discussion_secs(&self) -> Option<u32> {
        self.discussion_secs
    }
}

/// Trim raw name entries, defaulting blank (and missing) ones to
/// `"Player N"`.
pub fn normalize_names(entries: &[String], players: usize) -> Vec<String> {
    (0..players)
        .map(|i| {
            let raw = entries.get(i).map(|s| s.trim()).unwrap_or("");
            if raw.is_empty() {
                format!("Player {}", i + 1)
            } else {
                raw.to_string()
            }
        })
        .collect()
}

/// An immutable running game: validated config, final seat names, and the
/// location dealt for this round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    config: SessionConfig,
    names: Vec<String>,
    location: String,
}

impl Session {
    /// Pick a location from the pool, deal the roles, and freeze the
    /// session. Pure given the random source; callers seed `rng` to
    /// reproduce a deal.
    pub fn start(
        config: SessionConfig,
        names: Vec<String>,
        pool: &LocationPool,
        rng: &mut impl Rng,
    ) -> (Self, RoleAssignment) {
        let names = normalize_names(&names, config.players());
        let location = pool.choose(rng).to_string();
        let roles = RoleAssignment::deal(config.players(), config.spies(), &location, rng);
        tracing::debug!(
            players = config.players(),
            spies = config.spies(),
            pool = pool.len(),
            "session started"
        );
        (Self { config, names, location }, roles)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn players(&self) -> usize {
        self.config.players
    }

    pub fn spies(&self) -> usize {
        self.config.spies
    }

    pub fn discussion_secs(&self) -> Option<u32> {
        self.config.discussion_secs
    }

    /// The secret venue for this round. Everyone but the spies knows it.
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn player_name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn player_names(&self) -> &[String] {
        &self.names
    }
}
