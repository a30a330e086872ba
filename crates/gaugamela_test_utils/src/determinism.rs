//! Determinism testing utilities.
//!
//! The AI has no randomness, so replaying the same orders from the same
//! opening must always reach the same battlefield. This module hashes a
//! battle and runs a scripted game several times to check that.
//!
//! Sources of non-determinism this guards against:
//!
//! - **HashMap iteration order**: unit iteration must follow collection
//!   order, never hasher order.
//! - **Slot reuse**: generational ids must not let a stale handle act on a
//!   newly spawned unit.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use gaugamela_core::battle::BattleState;
use tracing::debug;

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Hashes from each run.
    pub hashes: Vec<u64>,
    /// Number of steps played per run.
    pub steps: u64,
}

impl DeterminismResult {
    /// Get all unique hashes (should be 1 for a deterministic game).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that every run ended in the same state.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Battle is non-deterministic!\n\
                 Runs: {}\n\
                 Steps: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                self.steps,
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Play a scripted game several times and compare the final states.
///
/// # Arguments
///
/// * `runs` - Number of times to play
/// * `steps` - Number of steps per run
/// * `setup` - Builds the starting state
/// * `step` - Advances the state by one step (e.g. one full turn)
/// * `hash` - Hashes the final state
pub fn verify_determinism<S, Setup, Step, HashFn>(
    runs: usize,
    steps: u64,
    setup: Setup,
    step: Step,
    hash: HashFn,
) -> DeterminismResult
where
    Setup: Fn() -> S,
    Step: Fn(&mut S),
    HashFn: Fn(&S) -> u64,
{
    let mut hashes = Vec::with_capacity(runs);

    for run in 0..runs {
        let mut state = setup();
        for _ in 0..steps {
            step(&mut state);
        }
        let digest = hash(&state);
        debug!("Determinism run {run}: {digest:#018x}");
        hashes.push(digest);
    }

    let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);

    DeterminismResult {
        is_deterministic,
        hashes,
        steps,
    }
}

/// Hash everything observable about a battle.
///
/// Covers turn, selection and every unit's kind, team, cell, exact hp bits
/// and morale, in collection order.
#[must_use]
pub fn battle_hash(state: &BattleState) -> u64 {
    let mut hasher = DefaultHasher::new();
    state.turn().hash(&mut hasher);
    state.selected().map(|unit| unit.id).hash(&mut hasher);
    for unit in state.units().iter() {
        unit.id.hash(&mut hasher);
        unit.kind.hash(&mut hasher);
        unit.team.hash(&mut hasher);
        unit.position.hash(&mut hasher);
        unit.hp.to_bits().hash(&mut hasher);
        unit.morale.hash(&mut hasher);
    }
    hasher.finish()
}

/// Proptest strategies for battle properties.
pub mod strategies {
    use gaugamela_core::data::{Deployment, UnitKind};
    use gaugamela_core::factions::Team;
    use gaugamela_core::grid::{GridPos, COLS, ROWS};
    use proptest::prelude::*;

    /// Any cell on the default grid.
    pub fn arb_cell() -> impl Strategy<Value = GridPos> {
        (0..COLS, 0..ROWS).prop_map(|(x, y)| GridPos::new(x, y))
    }

    /// Any pixel position, including a margin outside the default surface.
    pub fn arb_pixel() -> impl Strategy<Value = (f32, f32)> {
        (-100.0f32..900.0, -100.0f32..700.0)
    }

    /// Any unit kind.
    pub fn arb_kind() -> impl Strategy<Value = UnitKind> {
        prop::sample::select(UnitKind::ALL.to_vec())
    }

    /// Any team.
    pub fn arb_team() -> impl Strategy<Value = Team> {
        prop_oneof![Just(Team::Player), Just(Team::Ai)]
    }

    /// Morale values a unit can actually hold.
    pub fn arb_morale() -> impl Strategy<Value = i32> {
        20i32..=100
    }

    /// Attack stats in a plausible range.
    pub fn arb_attack() -> impl Strategy<Value = i32> {
        0i32..=50
    }

    /// A roster of up to `max_units` units on distinct cells.
    pub fn arb_roster(max_units: usize) -> impl Strategy<Value = Vec<Deployment>> {
        proptest::collection::hash_map(arb_cell(), (arb_kind(), arb_team()), 1..=max_units)
            .prop_map(|cells| {
                let mut roster: Vec<Deployment> = cells
                    .into_iter()
                    .map(|(position, (kind, team))| Deployment {
                        kind,
                        team,
                        position,
                    })
                    .collect();
                roster.sort_by_key(|deployment| (deployment.position.y, deployment.position.x));
                roster
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn identical_battles_hash_alike() {
        assert_eq!(
            battle_hash(&fixtures::opening_battle()),
            battle_hash(&fixtures::opening_battle())
        );
    }

    #[test]
    fn hash_sees_selection() {
        let plain = fixtures::opening_battle();
        let mut selected = fixtures::opening_battle();
        let phalanx = fixtures::unit_at(&selected, 2, 12);
        selected.select(phalanx);
        assert_ne!(battle_hash(&plain), battle_hash(&selected));
    }

    #[test]
    fn counter_is_deterministic() {
        let result = verify_determinism(3, 10, || 0u64, |n| *n += 1, |n| *n);
        assert!(result.is_deterministic);
        assert_eq!(result.unique_hashes(), vec![10]);
        result.assert_deterministic();
    }
}
