//! Render plugin drawing the battlefield with sprites.
//!
//! [`SpriteCanvas`] implements the rules crate's [`Canvas`] on top of Bevy:
//! every draw call spawns one or more entities tagged [`BattlefieldSprite`],
//! and `clear` despawns the previous frame's entities. Surface pixel
//! `(x, y)` lands at world `(x, -y)`; later calls get a higher z.

use bevy::prelude::*;
use bevy::sprite::Anchor;
use bevy::window::PrimaryWindow;
use gaugamela_core::render::{Canvas, PixelRect, Rgb};

use crate::data_loader::ActiveSession;

/// Depth step between consecutive draw calls.
const Z_STEP: f32 = 0.001;

/// Plugin checking for a window to draw into.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, check_primary_window);
    }
}

/// Marker for entities belonging to the current battlefield frame.
#[derive(Component, Debug, Clone, Copy)]
pub struct BattlefieldSprite;

/// Convert a battlefield color to a Bevy color.
#[must_use]
pub fn to_color(Rgb(r, g, b): Rgb) -> Color {
    Color::srgb_u8(r, g, b)
}

/// A [`Canvas`] that spawns sprites and text through `Commands`.
pub struct SpriteCanvas<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    stale: Vec<Entity>,
    z: f32,
}

impl<'a, 'w, 's> SpriteCanvas<'a, 'w, 's> {
    /// Canvas whose `clear` despawns `stale`.
    pub fn new(commands: &'a mut Commands<'w, 's>, stale: Vec<Entity>) -> Self {
        Self {
            commands,
            stale,
            z: 0.0,
        }
    }

    fn next_z(&mut self) -> f32 {
        self.z += Z_STEP;
        self.z
    }

    fn spawn_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        let z = self.next_z();
        self.commands.spawn((
            SpriteBundle {
                sprite: Sprite {
                    color,
                    custom_size: Some(Vec2::new(width, height)),
                    anchor: Anchor::TopLeft,
                    ..default()
                },
                transform: Transform::from_xyz(x, -y, z),
                ..default()
            },
            BattlefieldSprite,
        ));
    }
}

impl Canvas for SpriteCanvas<'_, '_, '_> {
    fn clear(&mut self, _width: i32, _height: i32) {
        for entity in self.stale.drain(..) {
            self.commands.entity(entity).despawn_recursive();
        }
        self.z = 0.0;
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Rgb) {
        self.spawn_rect(
            rect.x as f32,
            rect.y as f32,
            rect.width as f32,
            rect.height as f32,
            to_color(color),
        );
    }

    fn stroke_rect(&mut self, rect: PixelRect, color: Rgb) {
        let (x, y) = (rect.x as f32, rect.y as f32);
        let (width, height) = (rect.width as f32, rect.height as f32);
        let color = to_color(color);

        self.spawn_rect(x, y, width, 1.0, color);
        self.spawn_rect(x, y + height - 1.0, width, 1.0, color);
        self.spawn_rect(x, y, 1.0, height, color);
        self.spawn_rect(x + width - 1.0, y, 1.0, height, color);
    }

    fn fill_text(&mut self, text: &str, x: i32, y: i32, size: f32, color: Rgb) {
        let z = self.next_z();
        self.commands.spawn((
            Text2dBundle {
                text: Text::from_section(
                    text,
                    TextStyle {
                        font_size: size,
                        color: to_color(color),
                        ..default()
                    },
                ),
                text_anchor: Anchor::BottomLeft,
                transform: Transform::from_xyz(x as f32, -(y as f32), z),
                ..default()
            },
            BattlefieldSprite,
        ));
    }
}

/// Redraws the battlefield when the session marks it dirty.
pub fn redraw_battlefield(
    mut commands: Commands,
    mut session: ResMut<ActiveSession>,
    sprites: Query<Entity, With<BattlefieldSprite>>,
) {
    if !session.battle().is_dirty() {
        return;
    }

    let mut canvas = SpriteCanvas::new(&mut commands, sprites.iter().collect());
    session.redraw_if_dirty(&mut canvas);
}

/// Exits with an error if there is no window to draw into.
fn check_primary_window(
    windows: Query<(), With<PrimaryWindow>>,
    mut exit: EventWriter<AppExit>,
) {
    if windows.is_empty() {
        tracing::error!("No primary window: cannot create a rendering context");
        exit.send(AppExit::error());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_converts_exactly() {
        assert_eq!(to_color(Rgb::BACKGROUND), Color::srgb_u8(0xd2, 0xb4, 0x8c));
        assert_eq!(to_color(Rgb::TEXT), Color::srgb_u8(0, 0, 0));
    }

    #[test]
    fn missing_window_requests_error_exit() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_systems(Startup, check_primary_window);
        app.update();

        let exits = app.world().resource::<Events<AppExit>>();
        let mut reader = exits.get_reader();
        let sent: Vec<_> = reader.read(exits).cloned().collect();
        assert_eq!(sent, vec![AppExit::error()]);
    }
}
