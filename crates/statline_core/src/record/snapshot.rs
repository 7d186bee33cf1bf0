//! Undamaged snapshots of source records.
//!
//! Conversion always works on a private, undamaged copy of the unit. The
//! caller's record is only borrowed.

use std::collections::BTreeMap;

use tracing::debug;

use super::UnitRecord;
use crate::error::{ConversionError, Result};

/// Produces the undamaged reference copy of a live record.
pub trait SnapshotSource {
    /// Return an undamaged copy of `live`.
    fn undamaged(&self, live: &UnitRecord) -> Result<UnitRecord>;
}

impl<S: SnapshotSource + ?Sized> SnapshotSource for &S {
    fn undamaged(&self, live: &UnitRecord) -> Result<UnitRecord> {
        (**self).undamaged(live)
    }
}

/// Clones the live record and clears its damage state.
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanCopy;

impl SnapshotSource for CleanCopy {
    fn undamaged(&self, live: &UnitRecord) -> Result<UnitRecord> {
        let mut copy = live.clone();
        copy.damage = None;
        Ok(copy)
    }
}

/// Re-resolves the pristine definition of a unit by name.
///
/// Fails with [`ConversionError::SnapshotUnavailable`] when the library has
/// no definition for the unit.
#[derive(Debug, Clone, Default)]
pub struct RecordLibrary {
    records: BTreeMap<String, UnitRecord>,
}

impl RecordLibrary {
    /// Create an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pristine definition, replacing any with the same name.
    pub fn insert(&mut self, record: UnitRecord) {
        self.records.insert(record.display_name(), record);
    }

    /// Definition for a "Chassis Model" key.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&UnitRecord> {
        self.records.get(name)
    }

    /// Number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the library is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<UnitRecord> for RecordLibrary {
    fn from_iter<T: IntoIterator<Item = UnitRecord>>(iter: T) -> Self {
        let mut library = Self::new();
        for record in iter {
            library.insert(record);
        }
        library
    }
}

impl SnapshotSource for RecordLibrary {
    fn undamaged(&self, live: &UnitRecord) -> Result<UnitRecord> {
        let name = live.display_name();
        let pristine = self
            .records
            .get(&name)
            .ok_or_else(|| ConversionError::SnapshotUnavailable {
                unit: name.clone(),
                reason: "no definition in record library".to_string(),
            })?;
        debug!(unit = %name, "Resolved pristine definition");

        let mut copy = pristine.clone();
        copy.damage = None;
        Ok(copy)
    }
}
