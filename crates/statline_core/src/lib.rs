//! # Statline Core
//!
//! Deterministic conversion of detailed combat-unit records into abstracted
//! tabletop statlines: range-banded damage, a point value and a catalog of
//! special abilities.
//!
//! This crate contains **only** deterministic logic:
//! - No IO
//! - No randomness
//! - No shared mutable state
//!
//! This separation enables:
//! - Parallel batch conversion without synchronization
//! - Reproducing published statlines bit-for-bit
//! - Property and regression testing of every rule
//!
//! ## Crate Structure
//!
//! - [`record`] - Source unit records and undamaged snapshots
//! - [`damage`] - Damage values, vectors and rounding policies
//! - [`ability`] - Ability tags, the typed catalog and arc summaries
//! - [`convert`] - The conversion pipeline
//! - [`element`] - The converted statline
//! - [`export`] - Text export and the ability-line parser
//! - [`math`] - Rounding helpers

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod ability;
pub mod convert;
pub mod damage;
pub mod element;
pub mod error;
pub mod export;
pub mod math;
pub mod movement;
pub mod record;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::ability::{AbilityCatalog, AbilityTag, AbilityValue, ArcSummary, PayloadShape};
    pub use crate::convert::{
        classify, convert, ConversionOptions, Converter, Facing, UnitCategory,
    };
    pub use crate::damage::{DamageValue, DamageVector};
    pub use crate::element::{ConvertedElement, Durability, ElementDamage};
    pub use crate::error::{ConversionError, Result};
    pub use crate::export::{ability_line, export, parse_abilities, parse_arc_line};
    pub use crate::movement::{MovementMode, MovementProfile};
    pub use crate::record::{CleanCopy, RecordLibrary, SnapshotSource, UnitRecord};
}
