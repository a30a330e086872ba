//! Game plugins for Bevy.
//!
//! This module provides the plugin groups for the game client and the
//! system sets that order one frame of the battle loop.

use bevy::app::PluginGroupBuilder;
use bevy::prelude::*;

use crate::camera::CameraPlugin;
use crate::data_loader::{ActiveSession, BattleDataPlugin};
use crate::input::{apply_battlefield_clicks, BattlefieldClick, InputPlugin};
use crate::render::{redraw_battlefield, RenderPlugin};
use crate::ui::{handle_end_turn, EndTurnRequested, GameUiPlugin};
use crate::victory::{
    check_victory_conditions, restart_on_acknowledge, GameState, OutcomeAcknowledged,
    VictoryPlugin,
};

/// Stages of one frame, run in declaration order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BattleSet {
    /// Pointer clicks and UI controls become orders.
    Input,
    /// End Turn requests run the AI pass.
    Turn,
    /// The battlefield is redrawn if anything changed.
    Draw,
    /// Game-over detection, notification and restart.
    Outcome,
}

/// The battle loop itself: orders, turns, redraw and outcome.
///
/// Needs no window or egui context, so it also runs under `MinimalPlugins`.
pub struct BattleLoopPlugin;

impl Plugin for BattleLoopPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameState>()
            .add_event::<BattlefieldClick>()
            .add_event::<EndTurnRequested>()
            .add_event::<OutcomeAcknowledged>()
            .configure_sets(
                Update,
                (
                    BattleSet::Input,
                    BattleSet::Turn,
                    BattleSet::Draw,
                    BattleSet::Outcome,
                )
                    .chain(),
            );
        // Nothing in the loop can run without a session to act on
        for set in [
            BattleSet::Input,
            BattleSet::Turn,
            BattleSet::Draw,
            BattleSet::Outcome,
        ] {
            app.configure_sets(Update, set.run_if(resource_exists::<ActiveSession>));
        }
        app.add_systems(Update, apply_battlefield_clicks.in_set(BattleSet::Input))
            .add_systems(Update, handle_end_turn.in_set(BattleSet::Turn))
            .add_systems(Update, redraw_battlefield.in_set(BattleSet::Draw))
            .add_systems(
                Update,
                (check_victory_conditions, restart_on_acknowledge)
                    .chain()
                    .in_set(BattleSet::Outcome),
            );
    }
}

// ============================================================================
// Plugin Groups
// ============================================================================

/// Main plugin group containing all game client plugins.
///
/// # Example
/// ```ignore
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(GamePlugins)
///     .run();
/// ```
pub struct GamePlugins;

impl PluginGroup for GamePlugins {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(BattleDataPlugin) // Session first
            .add(BattleLoopPlugin)
            .add(CameraPlugin)
            .add(InputPlugin)
            .add(RenderPlugin)
            .add(GameUiPlugin)
            .add(VictoryPlugin)
    }
}

/// Headless plugin group for testing the battle loop.
///
/// Runs the battle without a window, camera, pointer or egui. Orders are
/// fed in as [`BattlefieldClick`] and [`EndTurnRequested`] events.
///
/// # Example
/// ```ignore
/// App::new()
///     .add_plugins(MinimalPlugins)
///     .add_plugins(HeadlessGamePlugins)
///     .run();
/// ```
pub struct HeadlessGamePlugins;

impl PluginGroup for HeadlessGamePlugins {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(BattleDataPlugin)
            .add(BattleLoopPlugin)
    }
}
