//! Victory and defeat handling.
//!
//! Watches the session for a wiped-out side, shows the outcome in a modal
//! notification and redeploys the opening roster once it is dismissed.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use gaugamela_core::turn::Outcome;

use crate::data_loader::ActiveSession;
use crate::plugins::BattleSet;

/// Plugin for the game-over notification.
pub struct VictoryPlugin;

impl Plugin for VictoryPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            victory_ui
                .in_set(BattleSet::Outcome)
                .after(check_victory_conditions),
        );
    }
}

/// Current state of the battle.
#[derive(Resource, Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameState {
    /// Battle is in progress.
    #[default]
    Playing,
    /// Player has won.
    Victory,
    /// Player has lost.
    Defeat,
}

impl GameState {
    /// The outcome being shown, if the battle is over.
    #[must_use]
    pub const fn outcome(self) -> Option<Outcome> {
        match self {
            Self::Playing => None,
            Self::Victory => Some(Outcome::Victory),
            Self::Defeat => Some(Outcome::Defeat),
        }
    }
}

impl From<Outcome> for GameState {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Victory => Self::Victory,
            Outcome::Defeat => Self::Defeat,
        }
    }
}

/// The player dismissed the game-over notification.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeAcknowledged;

/// Checks whether either side has been wiped out.
pub fn check_victory_conditions(session: Res<ActiveSession>, mut game_state: ResMut<GameState>) {
    // Don't check if game already ended
    if *game_state != GameState::Playing {
        return;
    }

    if let Some(outcome) = session.outcome() {
        *game_state = outcome.into();
        tracing::info!("{} - {}", outcome.title(), outcome.message());
    }
}

/// Displays the game-over notification.
pub fn victory_ui(
    game_state: Res<GameState>,
    mut egui_contexts: EguiContexts,
    mut acknowledged: EventWriter<OutcomeAcknowledged>,
) {
    let Some(outcome) = game_state.outcome() else {
        return;
    };

    let Some(ctx) = egui_contexts.try_ctx_mut() else {
        return;
    };

    let color = match outcome {
        Outcome::Victory => egui::Color32::from_rgb(50, 200, 50),
        Outcome::Defeat => egui::Color32::from_rgb(200, 50, 50),
    };

    egui::Window::new(outcome.title())
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(outcome.title())
                        .size(32.0)
                        .color(color)
                        .strong(),
                );
                ui.add_space(10.0);
                ui.label(outcome.message());
                ui.add_space(10.0);
                if ui.button("OK").clicked() {
                    acknowledged.send(OutcomeAcknowledged);
                }
            });
        });
}

/// Redeploys the opening roster once the notification is dismissed.
pub fn restart_on_acknowledge(
    mut acknowledged: EventReader<OutcomeAcknowledged>,
    mut session: ResMut<ActiveSession>,
    mut game_state: ResMut<GameState>,
) {
    if acknowledged.read().count() == 0 || *game_state == GameState::Playing {
        return;
    }

    session.reset();
    *game_state = GameState::Playing;
    tracing::info!("Battle {} begins", session.battles_started());
}
