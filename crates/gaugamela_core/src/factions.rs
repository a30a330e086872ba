//! Team definitions.

use serde::{Deserialize, Serialize};

/// The two sides of the battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    /// Units commanded through pointer input.
    Player,
    /// Units driven by the scripted AI.
    Ai,
}

impl Team {
    /// Get the demonym used in status text.
    #[must_use]
    pub const fn demonym(&self) -> &'static str {
        match self {
            Self::Player => "Macedonian",
            Self::Ai => "Persian",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demonyms() {
        assert_eq!(Team::Player.demonym(), "Macedonian");
        assert_eq!(Team::Ai.demonym(), "Persian");
    }
}
