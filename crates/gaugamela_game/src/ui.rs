//! UI plugin for the status bar using egui.
//!
//! A single bar along the bottom of the window holds the End Turn button
//! and the status line.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};
use serde::{Deserialize, Serialize};

use crate::data_loader::ActiveSession;
use crate::plugins::BattleSet;
use crate::victory::GameState;

/// Plugin for the egui status bar.
pub struct GameUiPlugin;

impl Plugin for GameUiPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<EguiPlugin>() {
            app.add_plugins(EguiPlugin);
        }
        app.init_resource::<DisplaySettings>()
            .add_systems(Update, status_bar.in_set(BattleSet::Input));
    }
}

/// Window and status bar settings.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Window title.
    pub title: String,
    /// Height of the bottom bar in logical pixels.
    pub status_bar_height: f32,
    /// Status line font size.
    pub font_size: f32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            title: "Gaugamela: Alexander vs. Darius".to_string(),
            status_bar_height: 40.0,
            font_size: 16.0,
        }
    }
}

/// The player pressed End Turn.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndTurnRequested;

/// Draws the bottom bar and reports End Turn presses.
pub fn status_bar(
    mut contexts: EguiContexts,
    session: Res<ActiveSession>,
    settings: Res<DisplaySettings>,
    game_state: Res<GameState>,
    mut end_turn: EventWriter<EndTurnRequested>,
) {
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };

    egui::TopBottomPanel::bottom("status_bar")
        .exact_height(settings.status_bar_height)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                let playing = *game_state == GameState::Playing;
                let button = ui.add_enabled(playing, egui::Button::new("End Turn"));
                if button.clicked() {
                    end_turn.send(EndTurnRequested);
                }

                ui.separator();
                ui.label(egui::RichText::new(session.status()).size(settings.font_size));
            });
        });
}

/// Hands control to the AI for each End Turn press.
///
/// Presses while the battle is over are dropped.
pub fn handle_end_turn(
    mut requests: EventReader<EndTurnRequested>,
    mut session: ResMut<ActiveSession>,
    game_state: Res<GameState>,
) {
    for _ in requests.read() {
        if *game_state != GameState::Playing {
            continue;
        }
        if let Some(events) = session.end_turn() {
            tracing::debug!("AI pass produced {} events", events.len());
        }
    }
}
