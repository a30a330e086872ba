//! Input plugin for pointer handling.
//!
//! Left click selects or moves, right click attacks. Clicks are read from
//! the primary window in logical pixels with the origin at the top-left,
//! which is also the battlefield's pixel space.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::data_loader::ActiveSession;
use crate::plugins::BattleSet;
use crate::victory::GameState;

/// Plugin reading the mouse over the battlefield.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            read_pointer
                .in_set(BattleSet::Input)
                .before(apply_battlefield_clicks),
        );
    }
}

/// Which gesture a click was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    /// Select a unit or move the selected one.
    Primary,
    /// Attack with the selected unit.
    Secondary,
}

/// A click on the battlefield surface.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct BattlefieldClick {
    /// Gesture.
    pub kind: ClickKind,
    /// Pixel position from the surface's top-left corner.
    pub position: Vec2,
}

impl BattlefieldClick {
    /// Primary click at `(x, y)`.
    #[must_use]
    pub const fn primary(x: f32, y: f32) -> Self {
        Self {
            kind: ClickKind::Primary,
            position: Vec2::new(x, y),
        }
    }

    /// Secondary click at `(x, y)`.
    #[must_use]
    pub const fn secondary(x: f32, y: f32) -> Self {
        Self {
            kind: ClickKind::Secondary,
            position: Vec2::new(x, y),
        }
    }
}

/// Turns mouse presses over the battlefield into [`BattlefieldClick`]s.
///
/// Presses over egui panels or windows are left to egui.
fn read_pointer(
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut contexts: EguiContexts,
    mut clicks: EventWriter<BattlefieldClick>,
) {
    let kind = if mouse_button.just_pressed(MouseButton::Left) {
        ClickKind::Primary
    } else if mouse_button.just_pressed(MouseButton::Right) {
        ClickKind::Secondary
    } else {
        return;
    };

    if let Some(ctx) = contexts.try_ctx_mut() {
        if ctx.wants_pointer_input() || ctx.is_pointer_over_area() {
            return;
        }
    }

    let Ok(window) = windows.get_single() else {
        return;
    };

    let Some(cursor_position) = window.cursor_position() else {
        return;
    };

    clicks.send(BattlefieldClick {
        kind,
        position: cursor_position,
    });
}

/// Applies clicks to the session.
///
/// Clicks while the game-over notification is showing are dropped.
pub fn apply_battlefield_clicks(
    mut clicks: EventReader<BattlefieldClick>,
    mut session: ResMut<ActiveSession>,
    game_state: Res<GameState>,
) {
    for click in clicks.read() {
        if *game_state != GameState::Playing {
            continue;
        }
        let Vec2 { x, y } = click.position;
        let event = match click.kind {
            ClickKind::Primary => session.primary_click(x, y),
            ClickKind::Secondary => session.secondary_click(x, y),
        };
        if let Some(event) = event {
            tracing::trace!("Click at ({x}, {y}): {event:?}");
        }
    }
}
