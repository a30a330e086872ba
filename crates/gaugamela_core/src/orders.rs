//! Player orders: select, move and attack.
//!
//! Both gestures are silent no-ops outside the player's turn or off the
//! grid. Illegal moves and attacks return `None` and leave the state
//! untouched.

use tracing::{debug, trace};

use crate::battle::{Applied, BattleState, Change, Turn};
use crate::catalog::UnitCatalog;
use crate::combat;
use crate::events::BattleEvent;
use crate::factions::Team;
use crate::grid::GridPos;

/// Primary action: select a player unit on `cell`, or move the selected
/// unit there.
///
/// A player unit on the cell always wins over a move. A move succeeds only
/// when the cell is empty and within the selected unit's range.
pub fn select_or_move(
    state: &mut BattleState,
    catalog: &UnitCatalog,
    cell: GridPos,
) -> Option<BattleEvent> {
    if state.turn() != Turn::Player || !state.grid().contains(cell) {
        return None;
    }

    let clicked = state
        .units()
        .team(Team::Player)
        .find(|unit| unit.position == cell)
        .map(|unit| BattleEvent::Selected {
            unit: unit.id,
            kind: unit.kind,
            team: unit.team,
            hp: unit.hp,
            morale: unit.morale,
        });
    if let Some(event) = clicked {
        if let BattleEvent::Selected { unit, kind, .. } = &event {
            state.select(*unit);
            debug!("Selected unit: {kind}");
        }
        return Some(event);
    }

    let selected = state.selected()?;
    let id = selected.id;
    let range = catalog.get(selected.kind)?.range;
    if !combat::in_range(selected.position, cell, range) {
        trace!("Move to {cell} out of range {range}");
        return None;
    }
    if state.units().is_occupied(cell) {
        trace!("Move to {cell} blocked");
        return None;
    }

    match state.apply(Change::Relocate { unit: id, to: cell })? {
        Applied::Relocated { from, to } => {
            debug!("Moved {id} from {from} to {to}");
            Some(BattleEvent::Moved { unit: id, from, to })
        }
        _ => None,
    }
}

/// Secondary action: attack the AI unit on `cell` with the selected unit.
pub fn attack(
    state: &mut BattleState,
    catalog: &UnitCatalog,
    cell: GridPos,
) -> Option<BattleEvent> {
    if state.turn() != Turn::Player || !state.grid().contains(cell) {
        return None;
    }
    let attacker = state.selected()?;
    let attacker_id = attacker.id;
    let range = catalog.get(attacker.kind)?.range;
    let origin = attacker.position;

    let target = state
        .units()
        .team(Team::Ai)
        .find(|unit| unit.position == cell)?
        .id;
    if !combat::in_range(origin, cell, range) {
        trace!("Target at {cell} out of range {range}");
        return None;
    }

    let penalty = state.rules().player_morale_penalty;
    combat::strike(state, catalog, attacker_id, target, penalty)
}
