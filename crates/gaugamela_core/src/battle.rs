//! Battle state: live units, selection, turn indicator and dirty flag.
//!
//! All unit mutation funnels through [`BattleState::apply`], which is also
//! what raises the dirty flag. The flag is only ever lowered by the renderer
//! after it has drawn the current state.

use tracing::{debug, info};

use crate::catalog::UnitCatalog;
use crate::data::{Deployment, Scenario};
use crate::error::{GameError, Result};
use crate::factions::Team;
use crate::grid::{Grid, GridPos};
use crate::rules::Rules;
use crate::storage::{Unit, UnitId, UnitStorage};

/// Whose turn it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Turn {
    /// Pointer input is accepted.
    #[default]
    Player,
    /// The AI pass is running.
    Ai,
}

/// A mutation of unit state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Change {
    /// Move a unit to an empty, in-bounds cell.
    Relocate {
        /// Unit to move.
        unit: UnitId,
        /// Destination cell.
        to: GridPos,
    },
    /// Deal damage and shake morale.
    Wound {
        /// Unit taking the hit.
        target: UnitId,
        /// Hit points to subtract, unrounded.
        damage: f64,
        /// Morale to subtract before the floor is applied.
        morale_penalty: i32,
    },
}

/// What a [`Change`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    /// The unit moved.
    Relocated {
        /// Cell it left.
        from: GridPos,
        /// Cell it entered.
        to: GridPos,
    },
    /// The unit was hit and survived.
    Wounded {
        /// Hit points left.
        hp: f64,
        /// Morale left.
        morale: i32,
    },
    /// The unit was hit and removed. Holds its final state.
    Killed(Unit),
}

/// Mutable battle state for one session.
#[derive(Debug, Clone)]
pub struct BattleState {
    units: UnitStorage,
    grid: Grid,
    rules: Rules,
    selected: Option<UnitId>,
    turn: Turn,
    dirty: bool,
}

impl BattleState {
    /// Create an empty battlefield. Starts dirty so the first frame draws it.
    #[must_use]
    pub fn new(grid: Grid, rules: Rules) -> Self {
        Self {
            units: UnitStorage::new(),
            grid,
            rules,
            selected: None,
            turn: Turn::Player,
            dirty: true,
        }
    }

    /// Deploy a scenario's roster in order.
    pub fn from_scenario(scenario: &Scenario, catalog: &UnitCatalog) -> Result<Self> {
        scenario.validate(catalog)?;
        let mut state = Self::new(scenario.grid, scenario.rules);
        for deployment in &scenario.roster {
            state.spawn(*deployment, catalog)?;
        }
        info!(
            "Deployed {} units for '{}'",
            state.units.len(),
            scenario.name
        );
        Ok(state)
    }

    /// Place a new unit at full archetype stats.
    pub fn spawn(&mut self, deployment: Deployment, catalog: &UnitCatalog) -> Result<UnitId> {
        let archetype = catalog.lookup(deployment.kind)?;
        if !self.grid.contains(deployment.position) {
            return Err(GameError::DeploymentOutOfBounds {
                kind: deployment.kind,
                position: deployment.position,
                cols: self.grid.cols,
                rows: self.grid.rows,
            });
        }
        if self.units.is_occupied(deployment.position) {
            return Err(GameError::CellOccupied(deployment.position));
        }
        let id = self.units.spawn(deployment, archetype);
        self.dirty = true;
        Ok(id)
    }

    /// Apply a unit mutation and mark the state for redraw.
    ///
    /// Returns `None` without touching anything if the unit is gone, or if a
    /// relocation targets an occupied or off-grid cell.
    pub fn apply(&mut self, change: Change) -> Option<Applied> {
        let applied = match change {
            Change::Relocate { unit, to } => {
                if !self.grid.contains(to) || self.units.is_occupied(to) {
                    return None;
                }
                let unit = self.units.get_mut(unit)?;
                let from = unit.position;
                unit.position = to;
                Applied::Relocated { from, to }
            }
            Change::Wound {
                target,
                damage,
                morale_penalty,
            } => {
                let rules = self.rules;
                let unit = self.units.get_mut(target)?;
                unit.hp -= damage;
                unit.morale = rules.morale_after_hit(unit.morale, morale_penalty);
                if unit.is_alive() {
                    Applied::Wounded {
                        hp: unit.hp,
                        morale: unit.morale,
                    }
                } else {
                    let fallen = self.units.remove(target)?;
                    if self.selected == Some(target) {
                        self.selected = None;
                    }
                    debug!("Removed {} {} from the field", fallen.kind, fallen.id);
                    Applied::Killed(fallen)
                }
            }
        };
        self.dirty = true;
        Some(applied)
    }

    /// Live units.
    #[must_use]
    pub fn units(&self) -> &UnitStorage {
        &self.units
    }

    /// Get a live unit.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id)
    }

    /// Battlefield dimensions.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Combat constants.
    #[must_use]
    pub const fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Whose turn it is.
    #[must_use]
    pub const fn turn(&self) -> Turn {
        self.turn
    }

    /// Currently selected unit, if it is still alive.
    #[must_use]
    pub fn selected(&self) -> Option<&Unit> {
        self.selected.and_then(|id| self.units.get(id))
    }

    /// Select a unit. Only live player units can be selected.
    pub fn select(&mut self, id: UnitId) -> bool {
        match self.units.get(id) {
            Some(unit) if unit.team == Team::Player => {
                self.selected = Some(id);
                true
            }
            _ => false,
        }
    }

    /// Drop the current selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Number of live units on one side.
    #[must_use]
    pub fn team_size(&self, team: Team) -> usize {
        self.units.team(team).count()
    }

    /// Check whether the drawn surface is stale.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub(crate) fn request_redraw(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_turn(&mut self, turn: Turn) {
        self.turn = turn;
    }
}
