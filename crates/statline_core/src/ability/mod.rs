//! Special abilities.
//!
//! - [`AbilityTag`]: the closed set of ability keywords
//! - [`AbilityCatalog`]: shape-checked tag → payload map
//! - [`ArcSummary`]: a catalog plus standard damage, per arc or turret

mod catalog;
mod tag;

pub use catalog::{AbilityCatalog, AbilityValue, ArcSummary, CatalogError};
pub use tag::{AbilityTag, PayloadShape};
