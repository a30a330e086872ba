//! Session: the single owner of all battle state.
//!
//! A session holds the catalog, the scenario it was started from, the live
//! battle and the status line. Hosts keep exactly one and forward pointer
//! gestures, the end-turn control and frame ticks to it. When a battle ends
//! the host calls [`Session::reset`] to redeploy the opening roster.
//!
//! # Example
//!
//! ```
//! use gaugamela_core::session::Session;
//! use gaugamela_core::grid::GridPos;
//!
//! let mut session = Session::standard().unwrap();
//!
//! // Select the cavalry, then ride one cell east
//! session.select_or_move(GridPos::new(4, 12));
//! session.select_or_move(GridPos::new(5, 12));
//! assert!(session.battle().is_dirty());
//!
//! // Hand over to the AI
//! session.end_turn();
//! assert_eq!(session.status(), "Your turn, Macedonian commander!");
//! ```

use tracing::info;

use crate::battle::BattleState;
use crate::catalog::UnitCatalog;
use crate::data::Scenario;
use crate::error::Result;
use crate::events::{BattleEvent, TURN_PROMPT};
use crate::grid::{Grid, GridPos};
use crate::orders;
use crate::render::{self, Canvas};
use crate::turn::{self, Outcome};

/// One game from opening roster to victory or defeat, then again.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: UnitCatalog,
    scenario: Scenario,
    opening: BattleState,
    battle: BattleState,
    status: String,
    battles_started: u32,
}

impl Session {
    /// Validate the scenario against the catalog and deploy it.
    pub fn new(catalog: UnitCatalog, scenario: Scenario) -> Result<Self> {
        let opening = BattleState::from_scenario(&scenario, &catalog)?;
        Ok(Self {
            battle: opening.clone(),
            opening,
            catalog,
            scenario,
            status: TURN_PROMPT.to_string(),
            battles_started: 1,
        })
    }

    /// Session over the embedded catalog and Gaugamela scenario.
    pub fn standard() -> Result<Self> {
        Self::new(UnitCatalog::standard()?, Scenario::gaugamela()?)
    }

    /// Live battle state.
    #[must_use]
    pub const fn battle(&self) -> &BattleState {
        &self.battle
    }

    /// Archetype table.
    #[must_use]
    pub const fn catalog(&self) -> &UnitCatalog {
        &self.catalog
    }

    /// Scenario the session deploys from.
    #[must_use]
    pub const fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// Battlefield dimensions.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        self.battle.grid()
    }

    /// Current status line.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// How many battles this session has deployed, including the current one.
    #[must_use]
    pub const fn battles_started(&self) -> u32 {
        self.battles_started
    }

    /// Primary click at surface pixel `(px, py)`.
    pub fn primary_click(&mut self, px: f32, py: f32) -> Option<BattleEvent> {
        let cell = self.grid().cell_at(px, py)?;
        self.select_or_move(cell)
    }

    /// Secondary click at surface pixel `(px, py)`.
    pub fn secondary_click(&mut self, px: f32, py: f32) -> Option<BattleEvent> {
        let cell = self.grid().cell_at(px, py)?;
        self.attack(cell)
    }

    /// Select or move on a cell.
    pub fn select_or_move(&mut self, cell: GridPos) -> Option<BattleEvent> {
        let event = orders::select_or_move(&mut self.battle, &self.catalog, cell)?;
        self.report(&event);
        Some(event)
    }

    /// Attack the AI unit on a cell.
    pub fn attack(&mut self, cell: GridPos) -> Option<BattleEvent> {
        let event = orders::attack(&mut self.battle, &self.catalog, cell)?;
        self.report(&event);
        Some(event)
    }

    /// End the player's turn. `None` if it was not the player's turn.
    pub fn end_turn(&mut self) -> Option<Vec<BattleEvent>> {
        let events = turn::end_turn(&mut self.battle, &self.catalog)?;
        for event in &events {
            self.report(event);
        }
        Some(events)
    }

    /// Current outcome, if one side has been wiped out.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        turn::check_outcome(&self.battle)
    }

    /// Redraw if anything changed since the last draw.
    pub fn redraw_if_dirty(&mut self, canvas: &mut impl Canvas) -> bool {
        render::redraw_if_dirty(&mut self.battle, &self.catalog, canvas)
    }

    /// One display frame: redraw on demand, then check for the end.
    pub fn frame(&mut self, canvas: &mut impl Canvas) -> Option<Outcome> {
        self.redraw_if_dirty(canvas);
        self.outcome()
    }

    /// Throw the current battle away and redeploy the opening roster.
    pub fn reset(&mut self) {
        self.battle = self.opening.clone();
        self.status = TURN_PROMPT.to_string();
        self.battles_started += 1;
        info!(
            "Redeployed '{}' (battle {})",
            self.scenario.name, self.battles_started
        );
    }

    fn report(&mut self, event: &BattleEvent) {
        if let Some(line) = event.status_line() {
            self.status = line;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::Turn;
    use crate::factions::Team;

    #[test]
    fn clicks_map_through_the_grid() {
        let mut session = Session::standard().unwrap();
        // (170, 490) is inside cell (4, 12)
        let event = session.primary_click(170.0, 490.0).unwrap();
        assert!(matches!(event, BattleEvent::Selected { .. }));
        assert_eq!(session.status(), "Macedonian cavalry: HP 80, Morale 90");

        assert!(session.primary_click(-3.0, 490.0).is_none());
        assert!(session.secondary_click(170.0, 612.0).is_none());
    }

    #[test]
    fn rejected_orders_keep_status() {
        let mut session = Session::standard().unwrap();
        session.select_or_move(GridPos::new(2, 12));
        let before = session.status().to_string();
        assert!(session.select_or_move(GridPos::new(9, 9)).is_none());
        assert_eq!(session.status(), before);
    }

    #[test]
    fn end_turn_resets_status_prompt() {
        let mut session = Session::standard().unwrap();
        session.select_or_move(GridPos::new(2, 12));
        session.end_turn().unwrap();
        assert_eq!(session.status(), TURN_PROMPT);
        assert_eq!(session.battle().turn(), Turn::Player);
    }

    #[test]
    fn reset_restores_opening_roster() {
        let mut session = Session::standard().unwrap();
        session.select_or_move(GridPos::new(4, 12));
        session.select_or_move(GridPos::new(5, 12));
        session.end_turn();
        session.reset();

        let positions: Vec<_> = session
            .battle()
            .units()
            .iter()
            .map(|unit| (unit.team, unit.position))
            .collect();
        assert_eq!(
            positions,
            vec![
                (Team::Player, GridPos::new(2, 12)),
                (Team::Player, GridPos::new(4, 12)),
                (Team::Ai, GridPos::new(18, 2)),
            ]
        );
        assert!(session.battle().is_dirty());
        assert!(session.battle().selected().is_none());
        assert_eq!(session.battles_started(), 2);
    }
}
