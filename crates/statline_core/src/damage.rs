//! Range-banded damage values.
//!
//! A [`DamageValue`] is a single band's damage: a whole number, or
//! "minimal" damage that is non-zero but below 1 (printed `0*`).
//! A [`DamageVector`] holds one to four bands (Short, Medium, Long,
//! Extreme) built with one of the named rounding policies.

use std::fmt;

use serde::{Deserialize, Serialize};
use winnow::ascii::dec_uint;
use winnow::combinator::{alt, opt, separated};
use winnow::error::{ContextError, ErrMode};
use winnow::Parser;

use crate::error::{ConversionError, Result};
use crate::math::{round_half_up, round_up, round_up_to_tenth};

pub(crate) type WResult<T> = std::result::Result<T, ErrMode<ContextError>>;

/// Maximum number of range bands (S/M/L/E).
pub const MAX_BANDS: usize = 4;

/// Band labels in order.
pub const BAND_LABELS: [&str; MAX_BANDS] = ["S", "M", "L", "E"];

/// Damage for a single range band.
///
/// Minimal damage always has magnitude 0. Equality compares both the
/// magnitude and the minimal flag, so `0` and `0*` differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DamageValue {
    magnitude: u32,
    minimal: bool,
}

impl DamageValue {
    /// No damage.
    pub const ZERO: Self = Self {
        magnitude: 0,
        minimal: false,
    };

    /// Non-zero damage below 1.
    pub const MINIMAL: Self = Self {
        magnitude: 0,
        minimal: true,
    };

    /// Create a whole-number damage value.
    #[must_use]
    pub const fn new(magnitude: u32) -> Self {
        Self {
            magnitude,
            minimal: false,
        }
    }

    /// Round normally: `0 < x < 0.5` is minimal, otherwise round half up.
    #[must_use]
    pub fn rounded_normal(value: f64) -> Self {
        if value <= 0.0 {
            Self::ZERO
        } else if value < 0.5 {
            Self::MINIMAL
        } else {
            Self::new(round_half_up(value) as u32)
        }
    }

    /// Round up aggressively. Never produces minimal damage.
    #[must_use]
    pub fn rounded_up(value: f64) -> Self {
        if value <= 0.0 {
            Self::ZERO
        } else {
            Self::new(round_up(value) as u32)
        }
    }

    /// Round up to the tenth, then round normally.
    #[must_use]
    pub fn dual_rounded_normal(value: f64) -> Self {
        Self::rounded_normal(round_up_to_tenth(value))
    }

    /// Round up to the tenth, then round up; below 0.5 is minimal.
    #[must_use]
    pub fn dual_rounded_up(value: f64) -> Self {
        let tenths = round_up_to_tenth(value);
        if tenths <= 0.0 {
            Self::ZERO
        } else if tenths < 0.5 {
            Self::MINIMAL
        } else {
            Self::new(round_up(tenths) as u32)
        }
    }

    /// Whole-number part (0 for minimal damage).
    #[must_use]
    pub const fn magnitude(self) -> u32 {
        self.magnitude
    }

    /// Whether this is minimal damage.
    #[must_use]
    pub const fn is_minimal(self) -> bool {
        self.minimal
    }

    /// Whether this deals no damage at all.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.magnitude == 0 && !self.minimal
    }

    /// Value used by point calculations: minimal damage counts as 0.5.
    #[must_use]
    pub fn as_points(self) -> f64 {
        if self.minimal {
            0.5
        } else {
            f64::from(self.magnitude)
        }
    }

    /// Display form where zero prints as `-`.
    #[must_use]
    pub fn to_dash_string(self) -> String {
        if self.is_zero() {
            "-".to_string()
        } else {
            self.to_string()
        }
    }

    /// Parse `0*`, `-` or a whole number.
    pub fn parse(text: &str) -> Result<Self> {
        let mut input = text;
        let value = damage_value(&mut input)
            .map_err(|_| ConversionError::malformed(text, "expected damage value"))?;
        if input.is_empty() {
            Ok(value)
        } else {
            Err(ConversionError::malformed(text, "trailing text after damage value"))
        }
    }
}

impl fmt::Display for DamageValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.minimal {
            write!(f, "0*")
        } else {
            write!(f, "{}", self.magnitude)
        }
    }
}

/// Damage across one to four range bands.
///
/// `standard` controls how zero bands print: `0` for a unit's standard
/// damage, `-` for special-ability damage. Bands past `range_bands` are
/// always zero and are never printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DamageVector {
    values: [DamageValue; MAX_BANDS],
    range_bands: u8,
    standard: bool,
}

impl DamageVector {
    /// An all-zero vector.
    #[must_use]
    pub fn zero(range_bands: usize, standard: bool) -> Self {
        Self::from_values(&[], range_bands, standard)
    }

    /// Build from already-rounded values, padding with zero.
    #[must_use]
    pub fn from_values(values: &[DamageValue], range_bands: usize, standard: bool) -> Self {
        let bands = range_bands.clamp(1, MAX_BANDS);
        let mut padded = [DamageValue::ZERO; MAX_BANDS];
        for (slot, value) in padded.iter_mut().zip(values.iter()).take(bands) {
            *slot = *value;
        }
        Self {
            values: padded,
            range_bands: bands as u8,
            standard,
        }
    }

    fn with_policy(
        raw: &[f64],
        range_bands: usize,
        standard: bool,
        policy: fn(f64) -> DamageValue,
    ) -> Self {
        let values: Vec<DamageValue> = raw.iter().map(|&v| policy(v)).collect();
        Self::from_values(&values, range_bands, standard)
    }

    /// Every band rounded normally.
    #[must_use]
    pub fn rounded_normal(raw: &[f64], range_bands: usize, standard: bool) -> Self {
        Self::with_policy(raw, range_bands, standard, DamageValue::rounded_normal)
    }

    /// Every band rounded up.
    #[must_use]
    pub fn rounded_up(raw: &[f64], range_bands: usize, standard: bool) -> Self {
        Self::with_policy(raw, range_bands, standard, DamageValue::rounded_up)
    }

    /// Every band rounded to the tenth and then normally.
    #[must_use]
    pub fn dual_rounded_normal(raw: &[f64], range_bands: usize, standard: bool) -> Self {
        Self::with_policy(raw, range_bands, standard, DamageValue::dual_rounded_normal)
    }

    /// Every band rounded to the tenth and then up.
    #[must_use]
    pub fn dual_rounded_up(raw: &[f64], range_bands: usize, standard: bool) -> Self {
        Self::with_policy(raw, range_bands, standard, DamageValue::dual_rounded_up)
    }

    /// Value of band `index` (0 = Short). Out-of-range bands are zero.
    #[must_use]
    pub fn band(&self, index: usize) -> DamageValue {
        if index < self.range_bands() {
            self.values[index]
        } else {
            DamageValue::ZERO
        }
    }

    /// Short-range damage.
    #[must_use]
    pub fn s(&self) -> DamageValue {
        self.band(0)
    }

    /// Medium-range damage.
    #[must_use]
    pub fn m(&self) -> DamageValue {
        self.band(1)
    }

    /// Long-range damage.
    #[must_use]
    pub fn l(&self) -> DamageValue {
        self.band(2)
    }

    /// Extreme-range damage.
    #[must_use]
    pub fn e(&self) -> DamageValue {
        self.band(3)
    }

    /// Number of meaningful bands.
    #[must_use]
    pub fn range_bands(&self) -> usize {
        usize::from(self.range_bands)
    }

    /// Whether zero bands print as `0` (standard damage).
    #[must_use]
    pub const fn is_standard(&self) -> bool {
        self.standard
    }

    /// Meaningful bands in order.
    pub fn values(&self) -> impl Iterator<Item = DamageValue> + '_ {
        self.values.iter().copied().take(self.range_bands())
    }

    /// Whether any band deals damage (minimal counts).
    #[must_use]
    pub fn has_damage(&self) -> bool {
        self.values().any(|v| !v.is_zero())
    }

    /// Largest band in point terms (minimal = 0.5).
    #[must_use]
    pub fn max_points(&self) -> f64 {
        self.values().map(DamageValue::as_points).fold(0.0, f64::max)
    }

    /// Text form that [`DamageVector::parse`] reads back exactly.
    ///
    /// Special vectors are wrapped in brackets so that the `standard`
    /// flag survives even when no band is zero.
    #[must_use]
    pub fn to_string_for_serialization(&self) -> String {
        if self.standard {
            self.to_string()
        } else {
            format!("[{self}]")
        }
    }

    /// Parse the serialization form.
    pub fn parse(text: &str) -> Result<Self> {
        let (body, standard) = match text.strip_prefix('[') {
            Some(inner) => match inner.strip_suffix(']') {
                Some(body) => (body, false),
                None => return Err(ConversionError::malformed(text, "unclosed '['")),
            },
            None => (text, true),
        };

        let mut input = body;
        let values = damage_bands(&mut input)
            .map_err(|_| ConversionError::malformed(text, "expected 1-4 damage values"))?;
        if !input.is_empty() {
            return Err(ConversionError::malformed(
                text,
                "trailing text after damage values",
            ));
        }
        Ok(Self::from_values(&values, values.len(), standard))
    }
}

impl fmt::Display for DamageVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .values()
            .map(|v| {
                if self.standard {
                    v.to_string()
                } else {
                    v.to_dash_string()
                }
            })
            .collect();
        write!(f, "{}", parts.join("/"))
    }
}

/// Parse one damage value: `-`, `0*` or a whole number.
pub(crate) fn damage_value(input: &mut &str) -> WResult<DamageValue> {
    alt((
        "-".value(DamageValue::ZERO),
        (dec_uint::<_, u32, _>, opt('*'))
            .verify(|(magnitude, star): &(u32, Option<char>)| star.is_none() || *magnitude == 0)
            .map(|(magnitude, star)| {
                if star.is_some() {
                    DamageValue::MINIMAL
                } else {
                    DamageValue::new(magnitude)
                }
            }),
    ))
    .parse_next(input)
}

/// Parse one to four `/`-separated damage values.
pub(crate) fn damage_bands(input: &mut &str) -> WResult<Vec<DamageValue>> {
    separated(1..=MAX_BANDS, damage_value, '/').parse_next(input)
}
