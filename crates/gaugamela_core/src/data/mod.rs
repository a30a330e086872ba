//! Data structures for catalog and scenario configuration.
//!
//! This module contains pure data structures that define unit archetypes
//! and the opening roster. All structs are designed to be deserialized
//! from RON. The default data files are embedded at compile time.
//!
//! **Note:** This module contains no IO - it only defines data types.
//! File loading is handled by `gaugamela_game`.

mod scenario_data;
mod unit_data;

pub use scenario_data::{Deployment, Scenario, EMBEDDED_SCENARIO};
pub use unit_data::{UnitColor, UnitData, UnitKind};

/// Default archetype table, as RON source.
pub const EMBEDDED_UNITS: &str = include_str!("../../../../assets/data/units.ron");

/// Parse RON source, tagging failures with the file they came from.
pub(crate) fn parse_ron<T: serde::de::DeserializeOwned>(
    source: &str,
    path: &str,
) -> crate::error::Result<T> {
    ron::from_str(source).map_err(|e| crate::error::GameError::DataParseError {
        path: path.to_string(),
        message: e.to_string(),
    })
}
