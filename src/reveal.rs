//! The reveal phase: each player privately views their role, one at a
//! time, strictly advancing.

use serde::Serialize;

use crate::countdown::Discussion;
use crate::roles::{Role, RoleAssignment};
use crate::session::Session;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RevealError {
    #[error("{remaining} player(s) still need to see their role")]
    IncompleteReveal { remaining: usize },
    #[error("every role has already been revealed")]
    RevealComplete,
}

/// Where the reveal phase currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RevealState {
    /// Player `next + 1` of `total` holds the device.
    Revealing { next: usize, total: usize },
    /// Everyone has acknowledged their role.
    AllRevealed,
}

/// One player's private look at their role. Only ever handed out for the
/// seat under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleCard<'a> {
    pub player: &'a str,
    pub role: &'a Role,
}

/// Walks the device around the table. Owns the immutable session and deal;
/// the cursor is its only mutable state.
pub struct RevealSequencer {
    session: Session,
    roles: RoleAssignment,
    cursor: usize,
}

impl RevealSequencer {
    pub fn new(session: Session, roles: RoleAssignment) -> Self {
        debug_assert_eq!(session.players(), roles.len());
        Self { session, roles, cursor: 0 }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> RevealState {
        if self.cursor >= self.session.players() {
            RevealState::AllRevealed
        } else {
            RevealState::Revealing { next: self.cursor, total: self.session.players() }
        }
    }

    /// Players who have not acknowledged their role yet.
    pub fn remaining(&self) -> usize {
        self.session.players().saturating_sub(self.cursor)
    }

    /// Show the current player their role without advancing. Repeating the
    /// request within the same turn is fine; no other seat is readable.
    pub fn request_reveal(&self) -> Result<RoleCard<'_>, RevealError> {
        match (self.session.player_name(self.cursor), self.roles.get(self.cursor)) {
            (Some(player), Some(role)) => Ok(RoleCard { player, role }),
            _ => Err(RevealError::RevealComplete),
        }
    }

    /// The current player is done looking; pass the device on. The final
    /// acknowledgement completes the reveal phase.
    pub fn acknowledge(&mut self) -> Result<RevealState, RevealError> {
        if self.cursor >= self.session.players() {
            return Err(RevealError::RevealComplete);
        }
        self.cursor += 1;
        tracing::debug!(
            acknowledged = self.cursor,
            total = self.session.players(),
            "role acknowledged"
        );
        Ok(self.state())
    }

    /// Hand off to the discussion phase. Rejected while anyone still has a
    /// reveal pending; whether the discussion is timed follows the
    /// session's configuration.
    pub fn start_discussion(&self) -> Result<Discussion, RevealError> {
        match self.state() {
            RevealState::Revealing { .. } => {
                Err(RevealError::IncompleteReveal { remaining: self.remaining() })
            }
            RevealState::AllRevealed => Ok(Discussion::begin(self.session.discussion_secs())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locations::LocationRegistry;
    use crate::session::{Session, SessionConfig};
    use crate::store::MemoryStore;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sequencer(players: i64, spies: i64, minutes: i64) -> RevealSequencer {
        let registry = LocationRegistry::open(MemoryStore::new());
        let config = SessionConfig::new(players, spies, minutes).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let (session, roles) = Session::start(config, vec![], &registry.pool(), &mut rng);
        RevealSequencer::new(session, roles)
    }

    #[test]
    fn acknowledge_walks_every_seat_then_completes() {
        let mut seq = sequencer(3, 1, 5);

        assert_eq!(seq.state(), RevealState::Revealing { next: 0, total: 3 });
        assert_eq!(
            seq.acknowledge().unwrap(),
            RevealState::Revealing { next: 1, total: 3 }
        );
        assert_eq!(
            seq.acknowledge().unwrap(),
            RevealState::Revealing { next: 2, total: 3 }
        );
        assert_eq!(seq.acknowledge().unwrap(), RevealState::AllRevealed);
        assert_eq!(seq.acknowledge(), Err(RevealError::RevealComplete));
    }

    #[test]
    fn request_repeats_within_a_turn_and_tracks_the_cursor() {
        let mut seq = sequencer(3, 1, 5);

        let first = seq.request_reveal().unwrap();
        let again = seq.request_reveal().unwrap();
        assert_eq!(first, again);
        assert_eq!(first.player, "Player 1");

        seq.acknowledge().unwrap();
        let second = seq.request_reveal().unwrap();
        assert_eq!(second.player, "Player 2");
    }

    #[test]
    fn discussion_is_gated_until_everyone_has_seen_their_role() {
        let mut seq = sequencer(3, 1, 5);
        seq.acknowledge().unwrap();

        assert_eq!(
            seq.start_discussion().unwrap_err(),
            RevealError::IncompleteReveal { remaining: 2 }
        );

        seq.acknowledge().unwrap();
        seq.acknowledge().unwrap();
        assert!(matches!(
            seq.start_discussion().unwrap(),
            Discussion::Timed(countdown) if countdown.remaining() == 300
        ));
        assert_eq!(seq.request_reveal(), Err(RevealError::RevealComplete));
    }

    #[test]
    fn roles_seen_in_order_match_the_deal() {
        let mut seq = sequencer(4, 2, 5);
        let mut spies = 0;
        for _ in 0..4 {
            if seq.request_reveal().unwrap().role.is_spy() {
                spies += 1;
            }
            seq.acknowledge().unwrap();
        }
        assert_eq!(spies, 2);
    }
}
