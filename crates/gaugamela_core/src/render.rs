//! Battlefield renderer.
//!
//! Draws against the [`Canvas`] trait so the rules crate never touches a
//! graphics API. Coordinates are surface pixels with the origin at the
//! top-left corner. Drawing is the only place the dirty flag is cleared.

use tracing::debug;

use crate::battle::BattleState;
use crate::catalog::UnitCatalog;
use crate::data::UnitColor;
use crate::storage::Unit;

/// Margin between a cell edge and the unit square inside it.
pub const UNIT_INSET: i32 = 5;

/// Baseline offset of a unit's label from the top of its cell.
pub const LABEL_OFFSET_Y: i32 = 15;

/// Label font size in pixels.
pub const FONT_SIZE: f32 = 12.0;

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Tan battlefield background (`#d2b48c`).
    pub const BACKGROUND: Self = Self(0xd2, 0xb4, 0x8c);
    /// Grid line color (`#333`).
    pub const GRID_LINE: Self = Self(0x33, 0x33, 0x33);
    /// Label color.
    pub const TEXT: Self = Self(0, 0, 0);
}

impl From<UnitColor> for Rgb {
    fn from(color: UnitColor) -> Self {
        let [r, g, b] = color.rgb();
        Self(r, g, b)
    }
}

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl PixelRect {
    /// Create a rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Drawing primitives offered by the host graphics context.
pub trait Canvas {
    /// Discard everything drawn so far.
    fn clear(&mut self, width: i32, height: i32);

    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: PixelRect, color: Rgb);

    /// Outline a rectangle with a one-pixel line.
    fn stroke_rect(&mut self, rect: PixelRect, color: Rgb);

    /// Draw text with its baseline starting at `(x, y)`.
    fn fill_text(&mut self, text: &str, x: i32, y: i32, size: f32, color: Rgb);
}

/// Label drawn over a unit square.
#[must_use]
pub fn unit_label(unit: &Unit) -> String {
    format!("HP:{} M:{}", unit.hp, unit.morale)
}

/// Draw the whole battlefield and mark the state clean.
pub fn draw_battlefield(state: &mut BattleState, catalog: &UnitCatalog, canvas: &mut impl Canvas) {
    let grid = *state.grid();
    let (width, height) = (grid.width_px(), grid.height_px());

    canvas.clear(width, height);
    canvas.fill_rect(PixelRect::new(0, 0, width, height), Rgb::BACKGROUND);
    for cell in grid.cells() {
        let (x, y) = grid.cell_origin(cell);
        canvas.stroke_rect(
            PixelRect::new(x, y, grid.cell_size, grid.cell_size),
            Rgb::GRID_LINE,
        );
    }

    let square = grid.cell_size - 2 * UNIT_INSET;
    for unit in state.units().iter() {
        let (x, y) = grid.cell_origin(unit.position);
        if let Some(archetype) = catalog.get(unit.kind) {
            canvas.fill_rect(
                PixelRect::new(x + UNIT_INSET, y + UNIT_INSET, square, square),
                archetype.color.into(),
            );
        }
        canvas.fill_text(&unit_label(unit), x, y + LABEL_OFFSET_Y, FONT_SIZE, Rgb::TEXT);
    }

    debug!("Battlefield drawn");
    state.mark_clean();
}

/// Draw only if the state changed since the last draw.
///
/// Returns whether anything was drawn.
pub fn redraw_if_dirty(
    state: &mut BattleState,
    catalog: &UnitCatalog,
    canvas: &mut impl Canvas,
) -> bool {
    if !state.is_dirty() {
        return false;
    }
    draw_battlefield(state, catalog, canvas);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Scenario;

    #[derive(Default)]
    struct Tally {
        clears: usize,
        fills: Vec<(PixelRect, Rgb)>,
        strokes: usize,
        texts: Vec<(String, i32, i32)>,
    }

    impl Canvas for Tally {
        fn clear(&mut self, _width: i32, _height: i32) {
            self.clears += 1;
        }

        fn fill_rect(&mut self, rect: PixelRect, color: Rgb) {
            self.fills.push((rect, color));
        }

        fn stroke_rect(&mut self, _rect: PixelRect, _color: Rgb) {
            self.strokes += 1;
        }

        fn fill_text(&mut self, text: &str, x: i32, y: i32, _size: f32, _color: Rgb) {
            self.texts.push((text.to_string(), x, y));
        }
    }

    fn opening() -> (BattleState, UnitCatalog) {
        let catalog = UnitCatalog::standard().unwrap();
        let state = BattleState::from_scenario(&Scenario::gaugamela().unwrap(), &catalog).unwrap();
        (state, catalog)
    }

    #[test]
    fn draws_background_grid_and_units() {
        let (mut state, catalog) = opening();
        let mut canvas = Tally::default();
        draw_battlefield(&mut state, &catalog, &mut canvas);

        assert_eq!(canvas.clears, 1);
        assert_eq!(canvas.strokes, 300);
        assert_eq!(canvas.fills.len(), 4);
        assert_eq!(
            canvas.fills[0],
            (PixelRect::new(0, 0, 800, 600), Rgb::BACKGROUND)
        );
        assert_eq!(
            canvas.fills[1],
            (PixelRect::new(85, 485, 30, 30), Rgb(255, 0, 0))
        );
        assert_eq!(
            canvas.texts[0],
            ("HP:100 M:80".to_string(), 80, 495)
        );
        assert!(!state.is_dirty());
    }

    #[test]
    fn redraw_only_when_dirty() {
        let (mut state, catalog) = opening();
        let mut canvas = Tally::default();

        assert!(redraw_if_dirty(&mut state, &catalog, &mut canvas));
        assert!(!redraw_if_dirty(&mut state, &catalog, &mut canvas));
        assert_eq!(canvas.clears, 1);
    }

    #[test]
    fn labels_show_fractional_hp() {
        let (state, _) = opening();
        let mut unit = state.units().iter().next().unwrap().clone();
        unit.hp = 57.5;
        unit.morale = 20;
        assert_eq!(unit_label(&unit), "HP:57.5 M:20");
    }
}
