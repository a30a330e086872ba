//! Test fixtures and helpers.
//!
//! Pre-built battles and a canvas that records draw calls,
//! for consistent testing.

use gaugamela_core::prelude::*;

/// The embedded archetype table.
///
/// # Panics
///
/// Panics if the embedded data fails to parse.
#[must_use]
pub fn catalog() -> UnitCatalog {
    UnitCatalog::standard().expect("embedded catalog parses")
}

/// The opening Gaugamela battle.
///
/// # Panics
///
/// Panics if the embedded data fails to parse.
#[must_use]
pub fn opening_battle() -> BattleState {
    let scenario = Scenario::gaugamela().expect("embedded scenario parses");
    BattleState::from_scenario(&scenario, &catalog()).expect("embedded scenario is valid")
}

/// A fresh session over the embedded data.
///
/// # Panics
///
/// Panics if the embedded data fails to parse.
#[must_use]
pub fn opening_session() -> Session {
    Session::standard().expect("embedded session builds")
}

/// A default-sized battle holding exactly `roster`.
///
/// # Panics
///
/// Panics if the roster is invalid for the default grid.
#[must_use]
pub fn battle_with(roster: &[Deployment]) -> BattleState {
    let catalog = catalog();
    let mut state = BattleState::new(Grid::default(), Rules::default());
    for deployment in roster {
        state
            .spawn(*deployment, &catalog)
            .expect("fixture roster is valid");
    }
    state
}

/// A session deploying exactly `roster` on the default grid.
///
/// # Panics
///
/// Panics if the roster is invalid for the default grid.
#[must_use]
pub fn session_with(roster: &[Deployment]) -> Session {
    let scenario = Scenario {
        name: "Fixture".to_string(),
        grid: Grid::default(),
        rules: Rules::default(),
        roster: roster.to_vec(),
    };
    Session::new(catalog(), scenario).expect("fixture scenario is valid")
}

/// Player phalanx at `(x, y)`.
#[must_use]
pub const fn phalanx(x: i32, y: i32) -> Deployment {
    Deployment::new(UnitKind::Phalanx, Team::Player, x, y)
}

/// Player cavalry at `(x, y)`.
#[must_use]
pub const fn cavalry(x: i32, y: i32) -> Deployment {
    Deployment::new(UnitKind::Cavalry, Team::Player, x, y)
}

/// AI Persian infantry at `(x, y)`.
#[must_use]
pub const fn persian(x: i32, y: i32) -> Deployment {
    Deployment::new(UnitKind::PersianInfantry, Team::Ai, x, y)
}

/// Id of whatever unit stands on `(x, y)`.
///
/// # Panics
///
/// Panics if the cell is empty.
#[must_use]
pub fn unit_at(state: &BattleState, x: i32, y: i32) -> UnitId {
    state
        .units()
        .occupant(GridPos::new(x, y))
        .unwrap_or_else(|| panic!("no unit at ({x}, {y})"))
        .id
}

/// Pixel at the centre of a cell on the default grid.
#[must_use]
pub fn cell_center(x: i32, y: i32) -> (f32, f32) {
    let size = Grid::default().cell_size as f32;
    ((x as f32 + 0.5) * size, (y as f32 + 0.5) * size)
}

/// One recorded canvas call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    /// `clear(width, height)`
    Clear(i32, i32),
    /// `fill_rect(rect, color)`
    Fill(PixelRect, Rgb),
    /// `stroke_rect(rect, color)`
    Stroke(PixelRect, Rgb),
    /// `fill_text(text, x, y)`
    Text(String, i32, i32),
}

/// Canvas that records every call instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    /// Calls in the order they were made.
    pub calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    /// How many times the surface was cleared (one per full redraw).
    #[must_use]
    pub fn frames(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::Clear(..)))
            .count()
    }

    /// All text drawn so far.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text(text, ..) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Forget everything recorded.
    pub fn reset(&mut self) {
        self.calls.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, width: i32, height: i32) {
        self.calls.push(DrawCall::Clear(width, height));
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Rgb) {
        self.calls.push(DrawCall::Fill(rect, color));
    }

    fn stroke_rect(&mut self, rect: PixelRect, color: Rgb) {
        self.calls.push(DrawCall::Stroke(rect, color));
    }

    fn fill_text(&mut self, text: &str, x: i32, y: i32, _size: f32, _color: Rgb) {
        self.calls.push(DrawCall::Text(text.to_string(), x, y));
    }
}
