//! Scripted AI for the Persian side.
//!
//! One synchronous pass per AI turn. Each AI unit live at the start of the
//! pass acts exactly once, in collection order:
//! - attack the first player unit within range, or
//! - step one cell toward the nearest player unit.
//!
//! There is no target scoring or pathfinding. Ties go to whichever unit
//! comes first in collection order.

use tracing::{debug, trace};

use crate::battle::{Applied, BattleState, Change};
use crate::catalog::UnitCatalog;
use crate::combat;
use crate::events::BattleEvent;
use crate::factions::Team;
use crate::storage::{Unit, UnitId};

/// Run every AI unit once and return what each did.
///
/// The acting roster is snapshotted before the first unit moves. An id that
/// no longer resolves by the time its turn comes is skipped.
pub fn run_ai_turn(state: &mut BattleState, catalog: &UnitCatalog) -> Vec<BattleEvent> {
    let roster: Vec<UnitId> = state.units().team(Team::Ai).map(|unit| unit.id).collect();
    let mut events = Vec::with_capacity(roster.len());

    for id in roster {
        let Some(unit) = state.unit(id).cloned() else {
            trace!("AI unit {id} fell before acting");
            continue;
        };
        if let Some(event) = act(state, catalog, &unit) {
            events.push(event);
        }
    }
    events
}

fn act(state: &mut BattleState, catalog: &UnitCatalog, unit: &Unit) -> Option<BattleEvent> {
    let range = catalog.get(unit.kind)?.range;

    let in_reach = state
        .units()
        .team(Team::Player)
        .find(|enemy| combat::in_range(unit.position, enemy.position, range))
        .map(|enemy| enemy.id);
    if let Some(target) = in_reach {
        let penalty = state.rules().ai_morale_penalty;
        return combat::strike(state, catalog, unit.id, target, penalty);
    }

    let Some(nearest) = nearest_enemy(state, unit) else {
        return Some(BattleEvent::Held { unit: unit.id });
    };
    let step = unit.position.step_toward(nearest.position);
    match state.apply(Change::Relocate {
        unit: unit.id,
        to: step,
    }) {
        Some(Applied::Relocated { from, to }) => {
            debug!("AI moved {} to {to}", unit.kind);
            Some(BattleEvent::Advanced {
                unit: unit.id,
                from,
                to,
            })
        }
        _ => {
            trace!("AI {} blocked at {}", unit.kind, unit.position);
            Some(BattleEvent::Held { unit: unit.id })
        }
    }
}

/// Closest player unit by Manhattan distance; the first strictly closer one wins.
fn nearest_enemy<'a>(state: &'a BattleState, unit: &Unit) -> Option<&'a Unit> {
    let mut best: Option<(&Unit, i32)> = None;
    for enemy in state.units().team(Team::Player) {
        let distance = unit.position.manhattan(enemy.position);
        if best.map_or(true, |(_, closest)| distance < closest) {
            best = Some((enemy, distance));
        }
    }
    best.map(|(enemy, _)| enemy)
}
