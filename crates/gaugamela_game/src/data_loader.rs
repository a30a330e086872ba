//! Battle data loading for the game client.
//!
//! Reads the unit catalog and scenario from RON files when they exist and
//! falls back to the embedded defaults otherwise. A file that exists but
//! cannot be read, parsed or validated is an error.

use std::collections::BTreeMap;
use std::path::Path;

use bevy::prelude::*;
use gaugamela_core::catalog::UnitCatalog;
use gaugamela_core::data::{Scenario, UnitData, UnitKind};
use gaugamela_core::error::GameError;
use gaugamela_core::session::Session;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::ui::DisplaySettings;

/// Errors that can occur during battle data loading.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// Failed to read file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        /// Path to the file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse RON file.
    #[error("Failed to parse RON file '{path}': {source}")]
    ParseError {
        /// Path to the file.
        path: String,
        /// Underlying parse error.
        #[source]
        source: ron::error::SpannedError,
    },

    /// Parsed data was rejected by the rules.
    #[error("Invalid battle data: {0}")]
    Invalid(#[from] GameError),
}

/// Result type for data loading operations.
pub type DataLoadResult<T> = Result<T, DataLoadError>;

/// The one live session, shared by every client system.
#[derive(Resource, Debug, Deref, DerefMut)]
pub struct ActiveSession(pub Session);

impl ActiveSession {
    /// Wrap a session.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self(session)
    }
}

/// Read and parse a RON file, or `None` if it does not exist.
fn read_ron<T: DeserializeOwned>(path: &Path) -> DataLoadResult<Option<T>> {
    let path_str = path.display().to_string();

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(DataLoadError::IoError {
                path: path_str,
                source: e,
            })
        }
    };

    let data = ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
        path: path_str,
        source: e,
    })?;

    Ok(Some(data))
}

/// Load the unit catalog from `path`, or the embedded table if it is absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read, parsed or
/// validated.
pub fn load_catalog(path: &Path) -> DataLoadResult<UnitCatalog> {
    match read_ron::<BTreeMap<UnitKind, UnitData>>(path)? {
        Some(archetypes) => {
            let catalog = UnitCatalog::new(archetypes)?;
            tracing::info!(
                "Loaded {} unit archetypes from {}",
                catalog.len(),
                path.display()
            );
            Ok(catalog)
        }
        None => {
            tracing::warn!(
                "Unit data not found at {}, using embedded catalog",
                path.display()
            );
            Ok(UnitCatalog::standard()?)
        }
    }
}

/// Load the scenario from `path`, or the embedded opening if it is absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_scenario(path: &Path) -> DataLoadResult<Scenario> {
    match read_ron::<Scenario>(path)? {
        Some(scenario) => {
            tracing::info!(
                "Loaded scenario '{}' with {} units from {}",
                scenario.name,
                scenario.roster.len(),
                path.display()
            );
            Ok(scenario)
        }
        None => {
            tracing::warn!(
                "Scenario not found at {}, using embedded Gaugamela",
                path.display()
            );
            Ok(Scenario::gaugamela()?)
        }
    }
}

/// Load catalog and scenario and deploy them into a session.
///
/// # Errors
///
/// Returns an error if either file is unusable or the scenario does not fit
/// the catalog.
pub fn load_session(units_path: &Path, scenario_path: &Path) -> DataLoadResult<Session> {
    let catalog = load_catalog(units_path)?;
    let scenario = load_scenario(scenario_path)?;
    Ok(Session::new(catalog, scenario)?)
}

/// Load display settings from `path`, or the defaults if it is absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_display_settings(path: &Path) -> DataLoadResult<DisplaySettings> {
    Ok(read_ron(path)?.unwrap_or_default())
}

/// Bevy plugin providing the [`ActiveSession`] resource.
///
/// The binary inserts a session loaded from disk before adding plugins;
/// anything that has not (tests, headless apps) gets the embedded battle.
/// If even that cannot be built the app is asked to exit with an error.
pub struct BattleDataPlugin;

impl Plugin for BattleDataPlugin {
    fn build(&self, app: &mut App) {
        if app.world().contains_resource::<ActiveSession>() {
            return;
        }
        install_session(app, Session::standard());
    }
}

/// Insert `session` as the [`ActiveSession`], or request an error exit.
pub fn install_session(app: &mut App, session: gaugamela_core::error::Result<Session>) {
    match session {
        Ok(session) => {
            app.insert_resource(ActiveSession::new(session));
        }
        Err(e) => {
            tracing::error!("Failed to build battle: {}", e);
            app.world_mut().send_event(AppExit::error());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn missing_files_fall_back_to_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let session = load_session(
            &dir.path().join("units.ron"),
            &dir.path().join("scenario.ron"),
        )
        .unwrap();

        assert_eq!(session.scenario().name, "Gaugamela");
        assert_eq!(session.battle().units().len(), 3);
    }

    #[test]
    fn catalog_file_overrides_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "units.ron",
            "{ phalanx: (hp: 120, attack: 20, range: 1, morale: 80, color: red) }",
        );

        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(UnitKind::Phalanx).unwrap().hp, 120);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "scenario.ron", "Scenario(name: ");

        let result = load_scenario(&path);
        assert!(matches!(result, Err(DataLoadError::ParseError { .. })));
    }

    #[test]
    fn scenario_outside_catalog_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let units = write_file(
            &dir,
            "units.ron",
            "{ phalanx: (hp: 100, attack: 20, range: 1, morale: 80, color: red) }",
        );

        let result = load_session(&units, &dir.path().join("scenario.ron"));
        assert!(matches!(
            result,
            Err(DataLoadError::Invalid(GameError::UnknownUnitType(_)))
        ));
    }

    #[test]
    fn display_settings_default_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_display_settings(&dir.path().join("display.ron")).unwrap();
        assert_eq!(settings, DisplaySettings::default());
    }

    #[test]
    fn plugin_keeps_existing_session() {
        let mut app = App::new();
        let mut session = Session::standard().unwrap();
        session.reset();
        app.insert_resource(ActiveSession::new(session));
        app.add_plugins(BattleDataPlugin);

        assert_eq!(app.world().resource::<ActiveSession>().battles_started(), 2);
    }

    #[test]
    fn shipped_files_match_embedded_defaults() {
        let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets/data");

        let catalog = load_catalog(&data.join("units.ron")).unwrap();
        assert_eq!(catalog, UnitCatalog::standard().unwrap());

        let scenario = load_scenario(&data.join("scenario.ron")).unwrap();
        assert_eq!(scenario, Scenario::gaugamela().unwrap());
    }

    #[test]
    fn unbuildable_battle_exits_without_running_the_loop() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        install_session(
            &mut app,
            Err(GameError::InvalidGrid("dimensions must be positive, got 0x0".into())),
        );
        app.add_plugins(crate::plugins::BattleLoopPlugin);
        app.update();

        assert!(!app.world().contains_resource::<ActiveSession>());
        let exits = app.world().resource::<Events<AppExit>>();
        let mut reader = exits.get_reader();
        let sent: Vec<_> = reader.read(exits).cloned().collect();
        assert_eq!(sent, vec![AppExit::error()]);
    }
}
