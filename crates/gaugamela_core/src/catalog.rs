//! Unit catalog: the fixed archetype table.

use std::collections::BTreeMap;

use crate::data::{parse_ron, UnitData, UnitKind, EMBEDDED_UNITS};
use crate::error::{GameError, Result};

/// Archetype table keyed by unit kind.
///
/// Built once at startup and never mutated afterwards; every lookup is a
/// pure read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnitCatalog {
    archetypes: BTreeMap<UnitKind, UnitData>,
}

impl UnitCatalog {
    /// Build a catalog from archetypes, validating each one.
    pub fn new(archetypes: impl IntoIterator<Item = (UnitKind, UnitData)>) -> Result<Self> {
        let archetypes: BTreeMap<_, _> = archetypes.into_iter().collect();
        for (kind, data) in &archetypes {
            data.validate(*kind)?;
        }
        Ok(Self { archetypes })
    }

    /// Parse a catalog from a RON map of `kind: (stats)`.
    pub fn from_ron(source: &str, path: &str) -> Result<Self> {
        let archetypes: BTreeMap<UnitKind, UnitData> = parse_ron(source, path)?;
        Self::new(archetypes)
    }

    /// The embedded default archetype table.
    pub fn standard() -> Result<Self> {
        Self::from_ron(EMBEDDED_UNITS, "<embedded>/units.ron")
    }

    /// Get the archetype for a kind, if present.
    #[must_use]
    pub fn get(&self, kind: UnitKind) -> Option<&UnitData> {
        self.archetypes.get(&kind)
    }

    /// Get the archetype for a kind.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownUnitType`] if the kind has no entry.
    pub fn lookup(&self, kind: UnitKind) -> Result<&UnitData> {
        self.get(kind).ok_or(GameError::UnknownUnitType(kind))
    }

    /// Check whether a kind has an archetype.
    #[must_use]
    pub fn contains(&self, kind: UnitKind) -> bool {
        self.archetypes.contains_key(&kind)
    }

    /// Number of archetypes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }

    /// Iterate archetypes in kind order.
    pub fn iter(&self) -> impl Iterator<Item = (UnitKind, &UnitData)> {
        self.archetypes.iter().map(|(kind, data)| (*kind, data))
    }
}
