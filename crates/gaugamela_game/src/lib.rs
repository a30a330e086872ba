//! # Gaugamela Game
//!
//! Desktop client for Gaugamela.
//!
//! This crate hosts the rules crate inside Bevy: it owns the window,
//! turns pointer clicks into orders, draws the battlefield with sprites
//! and shows the status bar and game-over notification with egui.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::path::Path;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::window::WindowResolution;

pub mod camera;
pub mod data_loader;
pub mod input;
pub mod plugins;
pub mod render;
pub mod ui;
pub mod victory;

pub use data_loader::{ActiveSession, BattleDataPlugin, DataLoadError};
pub use plugins::{GamePlugins, HeadlessGamePlugins};
pub use ui::DisplaySettings;

/// Catalog file read at startup when present.
pub const UNITS_PATH: &str = "assets/data/units.ron";

/// Scenario file read at startup when present.
pub const SCENARIO_PATH: &str = "assets/data/scenario.ron";

/// Display settings file read at startup when present.
pub const DISPLAY_PATH: &str = "assets/data/display.ron";

/// Run the game.
///
/// # Errors
///
/// Returns an error if a data file is present but cannot be read, parsed
/// or validated.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let session = data_loader::load_session(Path::new(UNITS_PATH), Path::new(SCENARIO_PATH))?;
    let display = data_loader::load_display_settings(Path::new(DISPLAY_PATH))?;

    let grid = *session.grid();
    let width = grid.width_px() as f32;
    let height = grid.height_px() as f32 + display.status_bar_height;

    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: display.title.clone(),
                    resolution: WindowResolution::new(width, height),
                    resizable: false,
                    ..default()
                }),
                ..default()
            })
            .disable::<LogPlugin>(), // Logging already initialized in main.rs
    );

    app.insert_resource(ActiveSession::new(session));
    app.insert_resource(display);
    app.insert_resource(ClearColor(Color::srgb(0.15, 0.15, 0.18)));

    app.add_plugins(GamePlugins);

    if let AppExit::Error(code) = app.run() {
        return Err(format!("client exited with status {code}").into());
    }

    Ok(())
}
