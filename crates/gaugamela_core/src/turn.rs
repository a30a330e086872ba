//! Turn alternation and end-of-battle detection.

use tracing::info;

use crate::ai;
use crate::battle::{BattleState, Turn};
use crate::catalog::UnitCatalog;
use crate::events::BattleEvent;
use crate::factions::Team;

/// How a battle ended, from the player's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// No AI units remain.
    Victory,
    /// No player units remain.
    Defeat,
}

impl Outcome {
    /// Message shown in the end-of-battle notification.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Victory => "Victory! The Macedonians triumph, as Alexander did at Gaugamela!",
            Self::Defeat => "Defeat! The Persians overwhelm you, unlike the historical outcome.",
        }
    }

    /// Short title for the notification.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Victory => "VICTORY",
            Self::Defeat => "DEFEAT",
        }
    }
}

/// Check whether either side has been wiped out.
///
/// Victory is checked first, so an empty field counts as a win.
#[must_use]
pub fn check_outcome(state: &BattleState) -> Option<Outcome> {
    if state.team_size(Team::Ai) == 0 {
        Some(Outcome::Victory)
    } else if state.team_size(Team::Player) == 0 {
        Some(Outcome::Defeat)
    } else {
        None
    }
}

/// End the player's turn and run the AI to completion.
///
/// Returns `None` when it is not the player's turn. Otherwise returns the
/// AI's events followed by [`BattleEvent::TurnStarted`]. Control is back
/// with the player on return, with no unit selected.
pub fn end_turn(state: &mut BattleState, catalog: &UnitCatalog) -> Option<Vec<BattleEvent>> {
    if state.turn() != Turn::Player {
        return None;
    }

    state.set_turn(Turn::Ai);
    info!("AI turn started");
    let mut events = ai::run_ai_turn(state, catalog);

    state.set_turn(Turn::Player);
    state.clear_selection();
    state.request_redraw();
    events.push(BattleEvent::TurnStarted);
    info!("Player turn started");
    Some(events)
}
