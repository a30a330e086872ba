//! Error types for the battle rules.

use thiserror::Error;

use crate::data::UnitKind;
use crate::grid::GridPos;

/// Result type alias using [`GameError`].
pub type Result<T> = std::result::Result<T, GameError>;

/// Top-level error type for all battle rule errors.
///
/// None of these are produced by gameplay itself: illegal moves and attacks
/// are rejected silently. Errors only come out of loading and validating the
/// catalog and scenario at session start.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// The catalog has no archetype for this unit kind.
    #[error("Unknown unit type: {0}")]
    UnknownUnitType(UnitKind),

    /// An archetype carries stats outside the accepted ranges.
    #[error("Invalid archetype '{kind}': {reason}")]
    InvalidArchetype {
        /// Offending unit kind.
        kind: UnitKind,
        /// What was wrong with it.
        reason: String,
    },

    /// Data file parsing error.
    #[error("Failed to parse data file '{path}': {message}")]
    DataParseError {
        /// Path (or embedded name) of the file that failed to parse.
        path: String,
        /// Error message.
        message: String,
    },

    /// A roster entry lies outside the battlefield.
    #[error("Deployment of {kind} at {position} is outside the {cols}x{rows} grid")]
    DeploymentOutOfBounds {
        /// Unit kind being deployed.
        kind: UnitKind,
        /// Requested cell.
        position: GridPos,
        /// Grid width in cells.
        cols: i32,
        /// Grid height in cells.
        rows: i32,
    },

    /// Two roster entries share a cell.
    #[error("Cell {0} is already occupied")]
    CellOccupied(GridPos),

    /// Grid dimensions or cell size are unusable.
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// Combat constants are unusable.
    #[error("Invalid rules: {0}")]
    InvalidRules(String),
}
