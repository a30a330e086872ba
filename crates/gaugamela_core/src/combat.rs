//! Attack resolution shared by player orders and the AI.
//!
//! Damage is `attack × morale / 100`, kept as a float and subtracted from
//! the target without rounding. Every hit also costs the target a fixed
//! amount of morale, floored by [`Rules::morale_floor`](crate::rules::Rules).

use tracing::{debug, info, warn};

use crate::battle::{Applied, BattleState, Change};
use crate::catalog::UnitCatalog;
use crate::events::BattleEvent;
use crate::grid::GridPos;
use crate::storage::UnitId;

/// Damage dealt by an attacker with the given attack stat and morale.
#[must_use]
pub fn damage(attack: i32, morale: i32) -> f64 {
    f64::from(attack) * (f64::from(morale) / 100.0)
}

/// Check whether `target` lies within `range` Manhattan cells of `from`.
#[must_use]
pub const fn in_range(from: GridPos, target: GridPos, range: i32) -> bool {
    from.manhattan(target) <= range
}

/// Resolve one attack. Range must already have been checked by the caller.
///
/// Returns `None` if either unit is gone or the attacker's archetype is
/// missing from the catalog.
pub fn strike(
    state: &mut BattleState,
    catalog: &UnitCatalog,
    attacker: UnitId,
    target: UnitId,
    morale_penalty: i32,
) -> Option<BattleEvent> {
    let striker = state.unit(attacker)?;
    let by = striker.team;
    let Some(archetype) = catalog.get(striker.kind) else {
        warn!("No archetype for {}, attack dropped", striker.kind);
        return None;
    };
    let dealt = damage(archetype.attack, striker.morale);

    let applied = state.apply(Change::Wound {
        target,
        damage: dealt,
        morale_penalty,
    })?;

    let (target_kind, target_team, hp, morale, killed) = match applied {
        Applied::Killed(fallen) => {
            info!("{} defeated", fallen.kind);
            (fallen.kind, fallen.team, fallen.hp, fallen.morale, true)
        }
        Applied::Wounded { hp, morale } => {
            let wounded = state.unit(target)?;
            (wounded.kind, wounded.team, hp, morale, false)
        }
        Applied::Relocated { .. } => return None,
    };
    debug!("Attacked {target_kind} for {dealt} damage");

    Some(BattleEvent::Struck {
        by,
        attacker,
        target,
        target_kind,
        target_team,
        damage: dealt,
        hp,
        morale,
        killed,
    })
}
