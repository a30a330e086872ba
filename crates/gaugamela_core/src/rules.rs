//! Tunable combat constants.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Morale can never be pushed below this value by damage.
pub const MORALE_FLOOR: i32 = 20;

/// Morale lost by a Persian unit struck by the player.
pub const PLAYER_MORALE_PENALTY: i32 = 20;

/// Morale lost by a Macedonian unit struck by the AI.
pub const AI_MORALE_PENALTY: i32 = 15;

/// Combat constants shared by player orders and the AI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Lowest morale a wounded unit can drop to.
    pub morale_floor: i32,
    /// Morale penalty applied by player attacks.
    pub player_morale_penalty: i32,
    /// Morale penalty applied by AI attacks.
    pub ai_morale_penalty: i32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            morale_floor: MORALE_FLOOR,
            player_morale_penalty: PLAYER_MORALE_PENALTY,
            ai_morale_penalty: AI_MORALE_PENALTY,
        }
    }
}

impl Rules {
    /// Reject constants that would let a hit raise morale.
    pub fn validate(&self) -> Result<()> {
        if self.morale_floor < 0 {
            return Err(GameError::InvalidRules(format!(
                "morale floor must not be negative, got {}",
                self.morale_floor
            )));
        }
        for (name, penalty) in [
            ("player_morale_penalty", self.player_morale_penalty),
            ("ai_morale_penalty", self.ai_morale_penalty),
        ] {
            if penalty < 0 {
                return Err(GameError::InvalidRules(format!(
                    "{name} must not be negative, got {penalty}"
                )));
            }
        }
        Ok(())
    }

    /// Morale after taking a hit with the given penalty.
    #[must_use]
    pub fn morale_after_hit(&self, morale: i32, penalty: i32) -> i32 {
        (morale - penalty).max(self.morale_floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn morale_is_floored() {
        let rules = Rules::default();
        assert_eq!(rules.morale_after_hit(70, 20), 50);
        assert_eq!(rules.morale_after_hit(30, 20), 20);
        assert_eq!(rules.morale_after_hit(20, 15), 20);
    }

    #[test]
    fn validate_rejects_negative_constants() {
        assert!(Rules::default().validate().is_ok());

        let healing_hits = Rules {
            player_morale_penalty: -20,
            ..Rules::default()
        };
        assert!(matches!(
            healing_hits.validate(),
            Err(GameError::InvalidRules(_))
        ));

        let sunken_floor = Rules {
            morale_floor: -1,
            ..Rules::default()
        };
        assert!(sunken_floor.validate().is_err());

        let ai_heals = Rules {
            ai_morale_penalty: -15,
            ..Rules::default()
        };
        assert!(ai_heals.validate().is_err());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let rules: Rules = ron::from_str("(ai_morale_penalty: 5)").unwrap();
        assert_eq!(rules.ai_morale_penalty, 5);
        assert_eq!(rules.morale_floor, MORALE_FLOOR);
        assert_eq!(rules.player_morale_penalty, PLAYER_MORALE_PENALTY);
    }
}
