//! Turn and pointer tests.
//!
//! Drives the battle loop with click and End Turn events.

use bevy::prelude::*;
use gaugamela_core::prelude::*;
use gaugamela_game::input::BattlefieldClick;
use gaugamela_game::ui::EndTurnRequested;
use gaugamela_game::{ActiveSession, HeadlessGamePlugins};
use gaugamela_test_utils::fixtures::{self, cell_center};

fn setup_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(ActiveSession::new(fixtures::opening_session()));
    app.add_plugins(HeadlessGamePlugins);
    app.update();
    app
}

fn session(app: &App) -> &Session {
    app.world().resource::<ActiveSession>()
}

#[test]
fn clicking_a_unit_reports_it() {
    let mut app = setup_app();
    let (px, py) = cell_center(4, 12);
    app.world_mut().send_event(BattlefieldClick::primary(px, py));
    app.update();

    assert_eq!(session(&app).status(), "Macedonian cavalry: HP 80, Morale 90");
    assert_eq!(
        session(&app).battle().selected().map(|unit| unit.kind),
        Some(UnitKind::Cavalry)
    );
}

#[test]
fn clicks_on_the_status_bar_miss_the_field() {
    let mut app = setup_app();
    let (px, py) = cell_center(4, 12);
    app.world_mut().send_event(BattlefieldClick::primary(px, py));
    app.world_mut().send_event(BattlefieldClick::primary(170.0, 620.0));
    app.update();

    assert!(session(&app).battle().units().is_occupied(GridPos::new(4, 12)));
}

#[test]
fn end_turn_runs_the_persians() {
    let mut app = setup_app();
    app.world_mut().send_event(EndTurnRequested);
    app.update();

    let session = session(&app);
    assert!(session.battle().units().is_occupied(GridPos::new(17, 3)));
    assert_eq!(session.battle().turn(), Turn::Player);
    assert_eq!(session.status(), "Your turn, Macedonian commander!");
    assert!(!session.battle().is_dirty());
}

#[test]
fn end_turn_drops_the_selection() {
    let mut app = setup_app();
    let (px, py) = cell_center(2, 12);
    app.world_mut().send_event(BattlefieldClick::primary(px, py));
    app.world_mut().send_event(EndTurnRequested);
    app.update();

    assert!(session(&app).battle().selected().is_none());
}

#[test]
fn attack_out_of_range_changes_nothing() {
    let mut app = setup_app();
    let (px, py) = cell_center(2, 12);
    app.world_mut().send_event(BattlefieldClick::primary(px, py));
    let (px, py) = cell_center(18, 2);
    app.world_mut().send_event(BattlefieldClick::secondary(px, py));
    app.update();

    let persian = session(&app)
        .battle()
        .units()
        .occupant(GridPos::new(18, 2))
        .unwrap();
    assert_eq!(persian.morale, 70);
    assert_eq!(session(&app).status(), "Macedonian phalanx: HP 100, Morale 80");
}
