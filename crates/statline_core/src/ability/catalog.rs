//! Typed ability catalog and arc summaries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::tag::{AbilityTag, PayloadShape};
use crate::damage::{DamageValue, DamageVector};
use crate::movement::MovementProfile;

/// Merged real sums are snapped to millionths before comparison.
const MERGE_SCALE: f64 = 1e6;

/// Snap accumulated float noise (`0.1 + 0.2 - 0.3`) back onto the grid.
fn normalize_sum(sum: f64) -> f64 {
    (sum * MERGE_SCALE).round() / MERGE_SCALE
}

/// Errors raised when a payload does not fit its tag.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// The value's shape differs from the tag's declared shape.
    #[error("Ability {tag} takes a {expected} payload, got {found}")]
    ShapeMismatch {
        /// Tag being written.
        tag: AbilityTag,
        /// Shape the tag declares.
        expected: PayloadShape,
        /// Shape that was supplied.
        found: PayloadShape,
    },
}

/// An ability payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AbilityValue {
    /// Plain flag.
    None,
    /// Whole-number count.
    Int(i64),
    /// Real number.
    Real(f64),
    /// Single damage value.
    Damage(DamageValue),
    /// Damage vector.
    Vector(DamageVector),
    /// Movement profile.
    Map(MovementProfile),
    /// Nested arc summary (turrets).
    Arc(Box<ArcSummary>),
}

impl AbilityValue {
    /// Shape of this value.
    #[must_use]
    pub const fn shape(&self) -> PayloadShape {
        match self {
            Self::None => PayloadShape::None,
            Self::Int(_) => PayloadShape::Int,
            Self::Real(_) => PayloadShape::Real,
            Self::Damage(_) => PayloadShape::Damage,
            Self::Vector(_) => PayloadShape::Vector,
            Self::Map(_) => PayloadShape::Map,
            Self::Arc(_) => PayloadShape::Arc,
        }
    }

    /// Numeric value, if this is an integer or real.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Real(x) => Some(*x),
            _ => None,
        }
    }

    /// Whether a tag of `shape` may hold this value.
    ///
    /// Real-shaped tags store whole sums as integers, so they accept both.
    fn fits(&self, shape: PayloadShape) -> bool {
        let own = self.shape();
        own == shape || (shape == PayloadShape::Real && own == PayloadShape::Int)
    }
}

/// Map of ability tags to payloads.
///
/// Every mutator checks the payload against the tag's declared shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AbilityCatalog {
    entries: BTreeMap<AbilityTag, AbilityValue>,
}

impl AbilityCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn check(tag: AbilityTag, value: &AbilityValue) -> Result<(), CatalogError> {
        if value.fits(tag.shape()) {
            Ok(())
        } else {
            Err(CatalogError::ShapeMismatch {
                tag,
                expected: tag.shape(),
                found: value.shape(),
            })
        }
    }

    fn expect_shape(
        tag: AbilityTag,
        shapes: &[PayloadShape],
        found: PayloadShape,
    ) -> Result<(), CatalogError> {
        if shapes.contains(&tag.shape()) {
            Ok(())
        } else {
            Err(CatalogError::ShapeMismatch {
                tag,
                expected: tag.shape(),
                found,
            })
        }
    }

    /// Add a flag tag. No-op if already present.
    pub fn set(&mut self, tag: AbilityTag) -> Result<(), CatalogError> {
        Self::check(tag, &AbilityValue::None)?;
        self.entries.entry(tag).or_insert(AbilityValue::None);
        Ok(())
    }

    /// Add `n` to an integer or real tag, storing `n` if absent.
    pub fn merge_int(&mut self, tag: AbilityTag, n: i64) -> Result<(), CatalogError> {
        Self::expect_shape(tag, &[PayloadShape::Int, PayloadShape::Real], PayloadShape::Int)?;
        let merged = match self.entries.get(&tag) {
            Some(AbilityValue::Int(existing)) => AbilityValue::Int(existing + n),
            Some(AbilityValue::Real(existing)) => AbilityValue::Real(existing + n as f64),
            _ => AbilityValue::Int(n),
        };
        self.entries.insert(tag, merged);
        Ok(())
    }

    /// Add `d` to a real tag.
    ///
    /// The sum is snapped to a fixed resolution first. A sum of zero or
    /// less removes the tag; a whole-number sum is stored as an integer.
    pub fn merge_real(&mut self, tag: AbilityTag, d: f64) -> Result<(), CatalogError> {
        Self::expect_shape(tag, &[PayloadShape::Real], PayloadShape::Real)?;
        let existing = self
            .entries
            .get(&tag)
            .and_then(AbilityValue::as_f64)
            .unwrap_or(0.0);
        let sum = normalize_sum(existing + d);
        if sum <= 0.0 {
            self.entries.remove(&tag);
        } else if sum.fract() == 0.0 {
            self.entries.insert(tag, AbilityValue::Int(sum as i64));
        } else {
            self.entries.insert(tag, AbilityValue::Real(sum));
        }
        Ok(())
    }

    /// Store `value` unconditionally.
    pub fn replace(&mut self, tag: AbilityTag, value: AbilityValue) -> Result<(), CatalogError> {
        Self::check(tag, &value)?;
        self.entries.insert(tag, value);
        Ok(())
    }

    /// Remove a tag, returning its payload.
    pub fn remove(&mut self, tag: AbilityTag) -> Option<AbilityValue> {
        self.entries.remove(&tag)
    }

    /// Whether a tag is present.
    #[must_use]
    pub fn contains(&self, tag: AbilityTag) -> bool {
        self.entries.contains_key(&tag)
    }

    /// Whether any of `tags` is present.
    #[must_use]
    pub fn contains_any(&self, tags: &[AbilityTag]) -> bool {
        tags.iter().any(|tag| self.contains(*tag))
    }

    /// Payload of a tag.
    #[must_use]
    pub fn get(&self, tag: AbilityTag) -> Option<&AbilityValue> {
        self.entries.get(&tag)
    }

    /// Integer payload of a tag.
    #[must_use]
    pub fn int(&self, tag: AbilityTag) -> Option<i64> {
        match self.entries.get(&tag) {
            Some(AbilityValue::Int(n)) => Some(*n),
            _ => None,
        }
    }

    /// Numeric payload of an integer or real tag.
    #[must_use]
    pub fn number(&self, tag: AbilityTag) -> Option<f64> {
        self.entries.get(&tag).and_then(AbilityValue::as_f64)
    }

    /// Damage-value payload of a tag.
    #[must_use]
    pub fn damage(&self, tag: AbilityTag) -> Option<DamageValue> {
        match self.entries.get(&tag) {
            Some(AbilityValue::Damage(value)) => Some(*value),
            _ => None,
        }
    }

    /// Damage-vector payload of a tag.
    #[must_use]
    pub fn vector(&self, tag: AbilityTag) -> Option<&DamageVector> {
        match self.entries.get(&tag) {
            Some(AbilityValue::Vector(vector)) => Some(vector),
            _ => None,
        }
    }

    /// Arc-summary payload of a tag.
    #[must_use]
    pub fn arc(&self, tag: AbilityTag) -> Option<&ArcSummary> {
        match self.entries.get(&tag) {
            Some(AbilityValue::Arc(summary)) => Some(summary),
            _ => None,
        }
    }

    /// Movement-map payload of a tag.
    #[must_use]
    pub fn map(&self, tag: AbilityTag) -> Option<&MovementProfile> {
        match self.entries.get(&tag) {
            Some(AbilityValue::Map(profile)) => Some(profile),
            _ => None,
        }
    }

    /// Entries in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (AbilityTag, &AbilityValue)> {
        self.entries.iter().map(|(tag, value)| (*tag, value))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Abilities of one firing arc or one turret, plus its standard damage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcSummary {
    standard: DamageVector,
    abilities: AbilityCatalog,
}

impl ArcSummary {
    /// Create a summary with the given standard damage and no abilities.
    #[must_use]
    pub fn new(standard: DamageVector) -> Self {
        Self {
            standard,
            abilities: AbilityCatalog::new(),
        }
    }

    /// Standard damage of the arc.
    #[must_use]
    pub const fn standard(&self) -> &DamageVector {
        &self.standard
    }

    /// Replace the standard damage.
    pub fn set_standard(&mut self, standard: DamageVector) {
        self.standard = standard;
    }

    /// Abilities of the arc.
    #[must_use]
    pub const fn abilities(&self) -> &AbilityCatalog {
        &self.abilities
    }

    /// Mutable abilities of the arc.
    pub fn abilities_mut(&mut self) -> &mut AbilityCatalog {
        &mut self.abilities
    }

    /// Empty only when there are neither abilities nor damage.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty() && !self.standard.has_damage()
    }
}
