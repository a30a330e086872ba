//! Camera plugin.
//!
//! The battlefield is drawn with surface pixel `(x, y)` at world
//! `(x, -y)`, so a fixed camera centred on the window puts surface pixel
//! `(0, 0)` at the top-left corner.

use bevy::prelude::*;

use crate::data_loader::ActiveSession;
use crate::ui::DisplaySettings;

/// Plugin spawning the fixed 2D camera.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            spawn_camera.run_if(resource_exists::<ActiveSession>),
        );
    }
}

/// Marker component for the main game camera.
#[derive(Component)]
pub struct MainCamera;

/// World position of the camera for a window of `width` by `height`.
#[must_use]
pub fn camera_center(width: f32, height: f32) -> Vec2 {
    Vec2::new(width / 2.0, -height / 2.0)
}

/// Spawns the main 2D camera.
fn spawn_camera(
    mut commands: Commands,
    session: Res<ActiveSession>,
    settings: Res<DisplaySettings>,
) {
    let grid = session.grid();
    let center = camera_center(
        grid.width_px() as f32,
        grid.height_px() as f32 + settings.status_bar_height,
    );

    commands.spawn((
        Camera2dBundle {
            transform: Transform::from_xyz(center.x, center.y, 999.9),
            ..default()
        },
        MainCamera,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_corner_maps_to_surface_origin() {
        let center = camera_center(800.0, 640.0);
        // half a window right of and below world origin
        assert_eq!(center, Vec2::new(400.0, -320.0));
    }
}
