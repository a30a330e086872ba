//! Victory condition tests.
//!
//! Tests for win/lose detection and restart driven through the battle loop.

use bevy::prelude::*;
use gaugamela_core::prelude::*;
use gaugamela_game::input::BattlefieldClick;
use gaugamela_game::ui::EndTurnRequested;
use gaugamela_game::victory::{GameState, OutcomeAcknowledged};
use gaugamela_game::{ActiveSession, HeadlessGamePlugins};
use gaugamela_test_utils::fixtures::{self, cell_center, persian, phalanx};

fn setup_app(session: Session) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(ActiveSession::new(session));
    app.add_plugins(HeadlessGamePlugins);
    app
}

fn click(app: &mut App, event: fn(f32, f32) -> BattlefieldClick, x: i32, y: i32) {
    let (px, py) = cell_center(x, y);
    app.world_mut().send_event(event(px, py));
}

fn game_state(app: &App) -> GameState {
    *app.world().resource::<GameState>()
}

#[test]
fn game_starts_in_playing_state() {
    let mut app = setup_app(fixtures::opening_session());
    app.update();
    assert_eq!(game_state(&app), GameState::Playing);
}

#[test]
fn victory_when_last_persian_falls() {
    let mut app = setup_app(fixtures::session_with(&[phalanx(2, 12), persian(3, 12)]));
    click(&mut app, BattlefieldClick::primary, 2, 12);
    for _ in 0..6 {
        click(&mut app, BattlefieldClick::secondary, 3, 12);
    }
    app.update();

    assert_eq!(game_state(&app), GameState::Victory);
    let session = app.world().resource::<ActiveSession>();
    assert_eq!(session.battle().team_size(Team::Ai), 0);
}

#[test]
fn defeat_when_macedonians_are_wiped_out() {
    let mut app = setup_app(fixtures::session_with(&[phalanx(2, 12), persian(2, 11)]));

    for _ in 0..20 {
        app.world_mut().send_event(EndTurnRequested);
        app.update();
        if game_state(&app) != GameState::Playing {
            break;
        }
    }

    assert_eq!(game_state(&app), GameState::Defeat);
}

#[test]
fn orders_are_ignored_after_the_battle_ends() {
    let mut app = setup_app(fixtures::session_with(&[phalanx(2, 12), persian(3, 12)]));
    click(&mut app, BattlefieldClick::primary, 2, 12);
    for _ in 0..6 {
        click(&mut app, BattlefieldClick::secondary, 3, 12);
    }
    app.update();

    click(&mut app, BattlefieldClick::primary, 3, 12);
    app.world_mut().send_event(EndTurnRequested);
    app.update();

    let session = app.world().resource::<ActiveSession>();
    let phalanx = session.battle().units().iter().next().unwrap();
    assert_eq!(phalanx.position, GridPos::new(2, 12));
    assert_eq!(game_state(&app), GameState::Victory);
}

#[test]
fn acknowledging_the_outcome_redeploys() {
    let mut app = setup_app(fixtures::session_with(&[phalanx(2, 12), persian(3, 12)]));
    click(&mut app, BattlefieldClick::primary, 2, 12);
    for _ in 0..6 {
        click(&mut app, BattlefieldClick::secondary, 3, 12);
    }
    app.update();

    app.world_mut().send_event(OutcomeAcknowledged);
    app.update();

    assert_eq!(game_state(&app), GameState::Playing);
    let session = app.world().resource::<ActiveSession>();
    assert_eq!(session.battles_started(), 2);
    assert_eq!(session.battle().team_size(Team::Ai), 1);
    assert_eq!(session.status(), "Your turn, Macedonian commander!");
}

#[test]
fn stray_acknowledgement_does_not_reset() {
    let mut app = setup_app(fixtures::opening_session());
    app.world_mut().send_event(OutcomeAcknowledged);
    app.update();

    assert_eq!(app.world().resource::<ActiveSession>().battles_started(), 1);
}
