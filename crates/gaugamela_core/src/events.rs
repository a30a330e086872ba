//! Events produced by orders and the AI, and the status text they map to.

use crate::data::UnitKind;
use crate::factions::Team;
use crate::grid::GridPos;
use crate::storage::UnitId;

/// Prompt shown whenever control returns to the player.
pub const TURN_PROMPT: &str = "Your turn, Macedonian commander!";

/// Something that happened on the battlefield.
#[derive(Debug, Clone, PartialEq)]
pub enum BattleEvent {
    /// The player picked up a unit.
    Selected {
        /// Selected unit.
        unit: UnitId,
        /// Its archetype.
        kind: UnitKind,
        /// Its side.
        team: Team,
        /// Current hit points.
        hp: f64,
        /// Current morale.
        morale: i32,
    },
    /// The player relocated the selected unit.
    Moved {
        /// Moved unit.
        unit: UnitId,
        /// Cell it left.
        from: GridPos,
        /// Cell it entered.
        to: GridPos,
    },
    /// An attack connected.
    Struck {
        /// Side that made the attack.
        by: Team,
        /// Attacking unit.
        attacker: UnitId,
        /// Unit that was hit.
        target: UnitId,
        /// Archetype of the unit that was hit.
        target_kind: UnitKind,
        /// Side of the unit that was hit.
        target_team: Team,
        /// Damage dealt, unrounded.
        damage: f64,
        /// Target hit points after the blow (may be negative).
        hp: f64,
        /// Target morale after the blow.
        morale: i32,
        /// Whether the target was removed from the field.
        killed: bool,
    },
    /// An AI unit stepped toward the nearest enemy.
    Advanced {
        /// Moving unit.
        unit: UnitId,
        /// Cell it left.
        from: GridPos,
        /// Cell it entered.
        to: GridPos,
    },
    /// An AI unit had nothing in range and could not step.
    Held {
        /// Idle unit.
        unit: UnitId,
    },
    /// Control returned to the player.
    TurnStarted,
}

impl BattleEvent {
    /// Status text for this event, if it updates the status line.
    #[must_use]
    pub fn status_line(&self) -> Option<String> {
        match self {
            Self::Selected {
                kind,
                team,
                hp,
                morale,
                ..
            } => Some(format!(
                "{} {kind}: HP {hp}, Morale {morale}",
                team.demonym()
            )),
            Self::Struck {
                by: Team::Player,
                target_kind,
                target_team,
                hp,
                morale,
                ..
            } => Some(format!(
                "Attacked {} {target_kind}! HP: {hp}, Morale: {morale}",
                target_team.demonym()
            )),
            Self::Struck {
                by: Team::Ai,
                target_kind,
                target_team,
                hp,
                morale,
                ..
            } => Some(format!(
                "AI attacked {} {target_kind}! HP: {hp}, Morale: {morale}",
                target_team.demonym()
            )),
            Self::TurnStarted => Some(TURN_PROMPT.to_string()),
            Self::Moved { .. } | Self::Advanced { .. } | Self::Held { .. } => None,
        }
    }
}
