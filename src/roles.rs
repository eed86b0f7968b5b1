//! Hidden roles and the per-session deal.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A single player's hidden role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Role {
    /// Does not know the location and must deduce it from the discussion.
    Spy,
    /// Knows the session's secret location.
    Agent { location: String },
}

impl Role {
    pub fn is_spy(&self) -> bool {
        matches!(self, Role::Spy)
    }
}

/// One role per player, index `i` belonging to player `i + 1`. Dealt once
/// per session and immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleAssignment {
    roles: Vec<Role>,
}

impl RoleAssignment {
    /// Deal `spies` spy roles and `players - spies` agent roles for
    /// `location`, uniformly shuffled. Counts are assumed already validated
    /// by [`SessionConfig`](crate::session::SessionConfig).
    pub(crate) fn deal(players: usize, spies: usize, location: &str, rng: &mut impl Rng) -> Self {
        let mut roles = Vec::with_capacity(players);
        roles.extend(std::iter::repeat_with(|| Role::Spy).take(spies));
        roles.extend(
            std::iter::repeat_with(|| Role::Agent { location: location.to_string() })
                .take(players - spies),
        );
        roles.shuffle(rng);
        Self { roles }
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Role> {
        self.roles.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.roles.iter()
    }

    pub fn spy_count(&self) -> usize {
        self.roles.iter().filter(|r| r.is_spy()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn deal_has_exact_role_counts() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for players in 2..=8 {
            for spies in 1..players {
                let deal = RoleAssignment::deal(players, spies, "Beach", &mut rng);
                assert_eq!(deal.len(), players);
                assert_eq!(deal.spy_count(), spies);
                for role in deal.iter().filter(|r| !r.is_spy()) {
                    assert_eq!(role, &Role::Agent { location: "Beach".to_string() });
                }
            }
        }
    }

    #[test]
    fn deal_is_deterministic_for_a_fixed_seed() {
        let a = RoleAssignment::deal(6, 2, "Casino", &mut ChaCha8Rng::seed_from_u64(7));
        let b = RoleAssignment::deal(6, 2, "Casino", &mut ChaCha8Rng::seed_from_u64(7));
        let c = RoleAssignment::deal(6, 2, "Casino", &mut ChaCha8Rng::seed_from_u64(8));

        let order = |deal: &RoleAssignment| deal.iter().map(Role::is_spy).collect::<Vec<_>>();
        assert_eq!(order(&a), order(&b));
        assert_ne!(order(&a), order(&c), "different seeds should reorder the deal");
    }

    #[test]
    fn every_seat_is_a_spy_at_the_expected_rate() {
        const TRIALS: usize = 4000;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut spy_hits = [0usize; 5];

        for _ in 0..TRIALS {
            let deal = RoleAssignment::deal(5, 2, "Library", &mut rng);
            for (seat, role) in deal.iter().enumerate() {
                if role.is_spy() {
                    spy_hits[seat] += 1;
                }
            }
        }

        // expected 2/5 per seat
        for (seat, hits) in spy_hits.iter().enumerate() {
            let rate = *hits as f64 / TRIALS as f64;
            assert!(
                (rate - 0.4).abs() < 0.05,
                "seat {seat} was a spy at rate {rate}, expected about 0.4"
            );
        }
    }
}
