//! Scenario data: grid, combat rules and the opening roster.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::unit_data::UnitKind;
use crate::catalog::UnitCatalog;
use crate::error::{GameError, Result};
use crate::factions::Team;
use crate::grid::{Grid, GridPos};
use crate::rules::Rules;

/// Default scenario, as RON source.
pub const EMBEDDED_SCENARIO: &str = include_str!("../../../../assets/data/scenario.ron");

/// One unit placed on the field at session start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    /// Archetype to instantiate.
    pub kind: UnitKind,
    /// Owning side.
    pub team: Team,
    /// Starting cell.
    pub position: GridPos,
}

impl Deployment {
    /// Create a deployment.
    #[must_use]
    pub const fn new(kind: UnitKind, team: Team, x: i32, y: i32) -> Self {
        Self {
            kind,
            team,
            position: GridPos::new(x, y),
        }
    }
}

/// Everything needed to (re)start a session.
///
/// # Example RON
///
/// ```ron
/// Scenario(
///     name: "Gaugamela",
///     grid: (cols: 20, rows: 15, cell_size: 40),
///     rules: (morale_floor: 20, player_morale_penalty: 20, ai_morale_penalty: 15),
///     roster: [
///         (kind: phalanx, team: player, position: (x: 2, y: 12)),
///     ],
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Human-readable name.
    pub name: String,
    /// Battlefield dimensions.
    #[serde(default)]
    pub grid: Grid,
    /// Combat constants.
    #[serde(default)]
    pub rules: Rules,
    /// Units in collection order.
    pub roster: Vec<Deployment>,
}

impl Scenario {
    /// Parse a scenario from RON source.
    pub fn from_ron(source: &str, path: &str) -> Result<Self> {
        super::parse_ron(source, path)
    }

    /// The embedded Gaugamela opening.
    pub fn gaugamela() -> Result<Self> {
        Self::from_ron(EMBEDDED_SCENARIO, "<embedded>/scenario.ron")
    }

    /// Check the grid and rules are usable, the roster fits the grid, has
    /// no stacked units and only names kinds the catalog knows.
    pub fn validate(&self, catalog: &UnitCatalog) -> Result<()> {
        self.grid.validate()?;
        self.rules.validate()?;

        let mut occupied = HashSet::with_capacity(self.roster.len());
        for deployment in &self.roster {
            catalog.lookup(deployment.kind)?;
            if !self.grid.contains(deployment.position) {
                return Err(GameError::DeploymentOutOfBounds {
                    kind: deployment.kind,
                    position: deployment.position,
                    cols: self.grid.cols,
                    rows: self.grid.rows,
                });
            }
            if !occupied.insert(deployment.position) {
                return Err(GameError::CellOccupied(deployment.position));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_scenario_parses() {
        let scenario = Scenario::gaugamela().unwrap();
        assert_eq!(scenario.name, "Gaugamela");
        assert_eq!(scenario.grid, Grid::default());
        assert_eq!(scenario.rules, Rules::default());
        assert_eq!(
            scenario.roster,
            vec![
                Deployment::new(UnitKind::Phalanx, Team::Player, 2, 12),
                Deployment::new(UnitKind::Cavalry, Team::Player, 4, 12),
                Deployment::new(UnitKind::PersianInfantry, Team::Ai, 18, 2),
            ]
        );
    }

    #[test]
    fn embedded_scenario_is_valid() {
        let catalog = UnitCatalog::standard().unwrap();
        assert!(Scenario::gaugamela().unwrap().validate(&catalog).is_ok());
    }

    #[test]
    fn grid_and_rules_are_optional() {
        let scenario =
            Scenario::from_ron("(name: \"Skirmish\", roster: [])", "skirmish.ron").unwrap();
        assert_eq!(scenario.grid, Grid::default());
        assert_eq!(scenario.rules, Rules::default());
    }

    #[test]
    fn parse_errors_name_the_file() {
        let err = Scenario::from_ron("(name: ", "broken.ron").unwrap_err();
        assert!(matches!(err, GameError::DataParseError { ref path, .. } if path == "broken.ron"));
    }

    #[test]
    fn validate_rejects_out_of_bounds_deployment() {
        let catalog = UnitCatalog::standard().unwrap();
        let scenario = Scenario {
            name: "Off the map".into(),
            grid: Grid::default(),
            rules: Rules::default(),
            roster: vec![Deployment::new(UnitKind::Phalanx, Team::Player, 20, 0)],
        };
        assert!(matches!(
            scenario.validate(&catalog),
            Err(GameError::DeploymentOutOfBounds { .. })
        ));
    }

    #[test]
    fn validate_rejects_stacked_units() {
        let catalog = UnitCatalog::standard().unwrap();
        let scenario = Scenario {
            name: "Stacked".into(),
            grid: Grid::default(),
            rules: Rules::default(),
            roster: vec![
                Deployment::new(UnitKind::Phalanx, Team::Player, 3, 3),
                Deployment::new(UnitKind::PersianInfantry, Team::Ai, 3, 3),
            ],
        };
        assert_eq!(
            scenario.validate(&catalog),
            Err(GameError::CellOccupied(GridPos::new(3, 3)))
        );
    }

    #[test]
    fn validate_rejects_negative_penalties_from_file() {
        let catalog = UnitCatalog::standard().unwrap();
        let scenario = Scenario::from_ron(
            "(name: \"Rally\", rules: (player_morale_penalty: -20), roster: [])",
            "rally.ron",
        )
        .unwrap();
        assert!(matches!(
            scenario.validate(&catalog),
            Err(GameError::InvalidRules(_))
        ));
    }

    #[test]
    fn validate_rejects_overflowing_grid_from_file() {
        let catalog = UnitCatalog::standard().unwrap();
        let scenario = Scenario::from_ron(
            "(name: \"Vast\", grid: (cols: 2000000000, rows: 15, cell_size: 40), roster: [])",
            "vast.ron",
        )
        .unwrap();
        assert!(matches!(
            scenario.validate(&catalog),
            Err(GameError::InvalidGrid(_))
        ));
    }

    #[test]
    fn validate_rejects_kinds_missing_from_catalog() {
        let catalog =
            UnitCatalog::from_ron("{ phalanx: (hp: 100, attack: 20, range: 1, morale: 80, color: red) }", "partial.ron")
                .unwrap();
        let scenario = Scenario::gaugamela().unwrap();
        assert_eq!(
            scenario.validate(&catalog),
            Err(GameError::UnknownUnitType(UnitKind::Cavalry))
        );
    }
}
