//! Generational arena holding the live units.
//!
//! Units are addressed by [`UnitId`], a slot index paired with the slot's
//! generation. Removing a unit bumps its slot generation, so stale ids held
//! by a selection or an AI pass simply stop resolving instead of aliasing a
//! unit spawned into the reused slot.
//!
//! Collection order (the order units were spawned, minus removals) is kept
//! separately from slot order. Every "first unit found" rule in the game
//! walks units in collection order.

use std::fmt;

use crate::data::{Deployment, UnitData, UnitKind};
use crate::factions::Team;
use crate::grid::GridPos;

/// Stable handle to a unit instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId {
    index: u32,
    generation: u32,
}

impl UnitId {
    /// Slot index inside the arena.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Generation of the slot when this id was issued.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// A live unit on the battlefield.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    /// Handle of this unit.
    pub id: UnitId,
    /// Archetype key.
    pub kind: UnitKind,
    /// Owning side.
    pub team: Team,
    /// Current cell.
    pub position: GridPos,
    /// Current hit points. Fractional because damage is never rounded.
    pub hp: f64,
    /// Current morale, as a percentage.
    pub morale: i32,
}

impl Unit {
    /// Check whether the unit still has hit points left.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    unit: Option<Unit>,
}

/// Arena of live units with insertion-ordered iteration.
#[derive(Debug, Clone, Default)]
pub struct UnitStorage {
    slots: Vec<Slot>,
    free: Vec<u32>,
    order: Vec<UnitId>,
}

impl UnitStorage {
    /// Create empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a unit at full archetype hp and morale, returning its id.
    pub fn spawn(&mut self, deployment: Deployment, archetype: &UnitData) -> UnitId {
        let id = match self.free.pop() {
            Some(index) => UnitId {
                index,
                generation: self.slots[index as usize].generation,
            },
            None => {
                let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
                self.slots.push(Slot {
                    generation: 0,
                    unit: None,
                });
                UnitId {
                    index,
                    generation: 0,
                }
            }
        };

        self.slots[id.index as usize].unit = Some(Unit {
            id,
            kind: deployment.kind,
            team: deployment.team,
            position: deployment.position,
            hp: f64::from(archetype.hp),
            morale: archetype.morale,
        });
        self.order.push(id);
        id
    }

    /// Remove a unit by id. Returns `None` if the id is stale.
    pub fn remove(&mut self, id: UnitId) -> Option<Unit> {
        let slot = self.slot_mut(id)?;
        let unit = slot.unit.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.order.retain(|&live| live != id);
        Some(unit)
    }

    /// Get a unit by id.
    #[must_use]
    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.unit.as_ref())
    }

    /// Get a mutable reference to a unit by id.
    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.slot_mut(id).and_then(|slot| slot.unit.as_mut())
    }

    /// Check if an id still resolves to a live unit.
    #[must_use]
    pub fn contains(&self, id: UnitId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if no units are left.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Live unit ids in collection order.
    #[must_use]
    pub fn ids(&self) -> &[UnitId] {
        &self.order
    }

    /// Iterate live units in collection order.
    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.order.iter().filter_map(|&id| self.get(id))
    }

    /// Iterate one team's units in collection order.
    pub fn team(&self, team: Team) -> impl Iterator<Item = &Unit> {
        self.iter().filter(move |unit| unit.team == team)
    }

    /// First unit (in collection order) standing on `pos`.
    #[must_use]
    pub fn occupant(&self, pos: GridPos) -> Option<&Unit> {
        self.iter().find(|unit| unit.position == pos)
    }

    /// Check whether any unit stands on `pos`.
    #[must_use]
    pub fn is_occupied(&self, pos: GridPos) -> bool {
        self.occupant(pos).is_some()
    }

    fn slot_mut(&mut self, id: UnitId) -> Option<&mut Slot> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
    }
}
