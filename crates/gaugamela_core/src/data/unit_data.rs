//! Unit archetype data structures.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Closed set of unit types that can appear on the battlefield.
///
/// Serialized in snake_case so data files read `phalanx`,
/// `cavalry` and `persian_infantry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// Macedonian heavy infantry.
    Phalanx,
    /// Macedonian companion cavalry.
    Cavalry,
    /// Achaemenid line infantry.
    PersianInfantry,
}

impl UnitKind {
    /// Every unit kind, in declaration order.
    pub const ALL: [Self; 3] = [Self::Phalanx, Self::Cavalry, Self::PersianInfantry];

    /// The data-file key for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Phalanx => "phalanx",
            Self::Cavalry => "cavalry",
            Self::PersianInfantry => "persian_infantry",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named display color for a unit square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitColor {
    /// `red`
    Red,
    /// `orange`
    Orange,
    /// `blue`
    Blue,
    /// `green`
    Green,
    /// `purple`
    Purple,
    /// `gold`
    Gold,
}

impl UnitColor {
    /// sRGB value of the color, matching the CSS named color.
    #[must_use]
    pub const fn rgb(self) -> [u8; 3] {
        match self {
            Self::Red => [255, 0, 0],
            Self::Orange => [255, 165, 0],
            Self::Blue => [0, 0, 255],
            Self::Green => [0, 128, 0],
            Self::Purple => [128, 0, 128],
            Self::Gold => [255, 215, 0],
        }
    }
}

/// Immutable stat template for one unit kind.
///
/// # Example RON
///
/// ```ron
/// (hp: 100, attack: 20, range: 1, morale: 80, color: red)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitData {
    /// Starting hit points.
    pub hp: i32,
    /// Base damage before the morale multiplier.
    pub attack: i32,
    /// Movement and attack reach, in Manhattan cells.
    pub range: i32,
    /// Starting morale, as a percentage.
    pub morale: i32,
    /// Square color on the battlefield.
    pub color: UnitColor,
}

impl UnitData {
    /// Check the stats are usable for `kind`.
    pub fn validate(&self, kind: UnitKind) -> Result<()> {
        let reason = if self.hp <= 0 {
            Some(format!("hp must be positive, got {}", self.hp))
        } else if self.attack < 0 {
            Some(format!("attack must not be negative, got {}", self.attack))
        } else if self.range < 0 {
            Some(format!("range must not be negative, got {}", self.range))
        } else if !(0..=100).contains(&self.morale) {
            Some(format!("morale must be within 0..=100, got {}", self.morale))
        } else {
            None
        };

        match reason {
            Some(reason) => Err(GameError::InvalidArchetype { kind, reason }),
            None => Ok(()),
        }
    }
}
