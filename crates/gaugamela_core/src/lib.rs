//! # Gaugamela Core
//!
//! Battle rules for Gaugamela, a turn-based tactics game on a square grid.
//!
//! This crate contains **only** game logic:
//! - No rendering (the renderer draws against the [`render::Canvas`] trait)
//! - No windowing or input devices
//! - No file IO (default data is embedded at compile time)
//!
//! This separation enables:
//! - Headless testing of every rule
//! - Swapping the host (Bevy client, test canvas, anything else)
//!
//! ## Crate Structure
//!
//! - [`catalog`] - Unit archetype table
//! - [`battle`] - Live units, selection, turn and dirty flag
//! - [`orders`] - Player select/move/attack
//! - [`ai`] - Scripted AI pass
//! - [`turn`] - Turn alternation and outcome detection
//! - [`render`] - Battlefield drawing
//! - [`session`] - Owning context tying it all together

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod ai;
pub mod battle;
pub mod catalog;
pub mod combat;
pub mod data;
pub mod error;
pub mod events;
pub mod factions;
pub mod grid;
pub mod orders;
pub mod render;
pub mod rules;
pub mod session;
pub mod storage;
pub mod turn;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::battle::{BattleState, Turn};
    pub use crate::catalog::UnitCatalog;
    pub use crate::data::{Deployment, Scenario, UnitColor, UnitData, UnitKind};
    pub use crate::error::{GameError, Result};
    pub use crate::events::BattleEvent;
    pub use crate::factions::Team;
    pub use crate::grid::{Grid, GridPos};
    pub use crate::render::{Canvas, PixelRect, Rgb};
    pub use crate::rules::Rules;
    pub use crate::session::Session;
    pub use crate::storage::{Unit, UnitId};
    pub use crate::turn::Outcome;
}
