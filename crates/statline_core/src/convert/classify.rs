//! Unit categories and their derived predicates.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConversionError, Result};
use crate::record::{SourceKind, UnitRecord};

/// Statline unit category.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitCategory {
    /// BattleMek.
    BM,
    /// IndustrialMek.
    IM,
    /// ProtoMek.
    PM,
    /// Combat vehicle.
    CV,
    /// Support vehicle.
    SV,
    /// Battle armor.
    BA,
    /// Conventional infantry.
    CI,
    /// Aerospace fighter.
    AF,
    /// Conventional fighter.
    CF,
    /// Small craft.
    SC,
    /// Spheroid DropShip.
    DS,
    /// Aerodyne DropShip.
    DA,
    /// JumpShip.
    JS,
    /// WarShip.
    WS,
    /// Space station.
    SS,
    /// Mobile structure. Never produced by conversion.
    MS,
}

impl UnitCategory {
    /// Category code as printed.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::BM => "BM",
            Self::IM => "IM",
            Self::PM => "PM",
            Self::CV => "CV",
            Self::SV => "SV",
            Self::BA => "BA",
            Self::CI => "CI",
            Self::AF => "AF",
            Self::CF => "CF",
            Self::SC => "SC",
            Self::DS => "DS",
            Self::DA => "DA",
            Self::JS => "JS",
            Self::WS => "WS",
            Self::SS => "SS",
            Self::MS => "MS",
        }
    }

    /// Ground category.
    #[must_use]
    pub const fn is_ground(self) -> bool {
        matches!(
            self,
            Self::BM | Self::IM | Self::PM | Self::CV | Self::SV | Self::BA | Self::CI
        )
    }

    /// Aerospace category.
    #[must_use]
    pub const fn is_aerospace(self) -> bool {
        matches!(
            self,
            Self::AF | Self::CF | Self::SC | Self::DS | Self::DA | Self::JS | Self::WS | Self::SS
        )
    }

    /// BattleMek or IndustrialMek.
    #[must_use]
    pub const fn is_mek(self) -> bool {
        matches!(self, Self::BM | Self::IM)
    }

    /// Battle armor or conventional infantry.
    #[must_use]
    pub const fn is_infantry(self) -> bool {
        matches!(self, Self::BA | Self::CI)
    }

    /// Combat or support vehicle.
    #[must_use]
    pub const fn is_vehicle(self) -> bool {
        matches!(self, Self::CV | Self::SV)
    }

    /// Fighters (aerospace or conventional).
    #[must_use]
    pub const fn is_fighter(self) -> bool {
        matches!(self, Self::AF | Self::CF)
    }

    /// Damage is tracked per firing arc.
    #[must_use]
    pub const fn uses_arcs(self) -> bool {
        matches!(
            self,
            Self::SC | Self::DS | Self::DA | Self::JS | Self::WS | Self::SS
        )
    }

    /// The element has a damage threshold.
    #[must_use]
    pub const fn uses_threshold(self) -> bool {
        self.is_aerospace()
    }

    /// The unit tracks heat and can overheat.
    #[must_use]
    pub const fn tracks_heat(self) -> bool {
        matches!(self, Self::BM | Self::IM | Self::AF)
    }

    /// Overheat can extend to long range.
    #[must_use]
    pub const fn supports_extended_overheat(self) -> bool {
        matches!(self, Self::AF)
    }

    /// Damage has an Extreme band.
    #[must_use]
    pub const fn uses_extreme_band(self) -> bool {
        self.is_aerospace()
    }

    /// Turret-mounted weapons are tallied separately.
    #[must_use]
    pub const fn can_mount_turrets(self) -> bool {
        matches!(self, Self::BM | Self::IM | Self::CV | Self::SV)
    }

    /// Size adds to offense.
    #[must_use]
    pub const fn has_size_offense_bonus(self) -> bool {
        matches!(self, Self::BM | Self::IM | Self::PM)
    }

    /// Number of bands in a standard damage vector.
    #[must_use]
    pub const fn damage_bands(self) -> usize {
        if self.uses_extreme_band() {
            4
        } else {
            3
        }
    }
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Map a source record to its category.
pub fn classify(record: &UnitRecord) -> Result<UnitCategory> {
    let category = match record.kind {
        SourceKind::Mek => UnitCategory::BM,
        SourceKind::IndustrialMek => UnitCategory::IM,
        SourceKind::ProtoMek => UnitCategory::PM,
        SourceKind::Tank | SourceKind::Vtol | SourceKind::Naval => UnitCategory::CV,
        SourceKind::SupportTank
        | SourceKind::SupportVtol
        | SourceKind::FixedWingSupport
        | SourceKind::LargeSupportTank => UnitCategory::SV,
        SourceKind::BattleArmor => UnitCategory::BA,
        SourceKind::Infantry => UnitCategory::CI,
        SourceKind::AeroFighter => UnitCategory::AF,
        SourceKind::ConvFighter => UnitCategory::CF,
        SourceKind::SmallCraft => UnitCategory::SC,
        SourceKind::SpheroidDropship => UnitCategory::DS,
        SourceKind::AerodyneDropship => UnitCategory::DA,
        SourceKind::Jumpship => UnitCategory::JS,
        SourceKind::Warship => UnitCategory::WS,
        SourceKind::SpaceStation => UnitCategory::SS,
        SourceKind::EscapePod
        | SourceKind::Lifeboat
        | SourceKind::GunEmplacement
        | SourceKind::MobileStructure => {
            return Err(ConversionError::UnconvertibleCategory {
                unit: record.display_name(),
                kind: format!("{:?}", record.kind),
            });
        }
    };
    Ok(category)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: &str) -> UnitRecord {
        let text = format!("UnitRecord(chassis: \"Test\", kind: {kind})");
        UnitRecord::from_ron(&text, "test").unwrap()
    }

    #[test]
    fn test_classify_kinds() {
        assert_eq!(classify(&record("Mek")).unwrap(), UnitCategory::BM);
        assert_eq!(classify(&record("Vtol")).unwrap(), UnitCategory::CV);
        assert_eq!(classify(&record("FixedWingSupport")).unwrap(), UnitCategory::SV);
        assert_eq!(classify(&record("AerodyneDropship")).unwrap(), UnitCategory::DA);
    }

    #[test]
    fn test_unconvertible_kinds() {
        for kind in ["EscapePod", "Lifeboat", "GunEmplacement", "MobileStructure"] {
            let err = classify(&record(kind)).unwrap_err();
            assert!(
                matches!(err, ConversionError::UnconvertibleCategory { .. }),
                "{kind}"
            );
        }
    }

    #[test]
    fn test_ground_and_aerospace_partition() {
        let all = [
            UnitCategory::BM,
            UnitCategory::IM,
            UnitCategory::PM,
            UnitCategory::CV,
            UnitCategory::SV,
            UnitCategory::BA,
            UnitCategory::CI,
            UnitCategory::AF,
            UnitCategory::CF,
            UnitCategory::SC,
            UnitCategory::DS,
            UnitCategory::DA,
            UnitCategory::JS,
            UnitCategory::WS,
            UnitCategory::SS,
        ];
        for category in all {
            assert_ne!(category.is_ground(), category.is_aerospace(), "{category}");
            if category.uses_arcs() {
                assert!(category.is_aerospace());
                assert!(!category.can_mount_turrets());
            }
        }
    }

    #[test]
    fn test_heat_predicates() {
        assert!(UnitCategory::BM.tracks_heat());
        assert!(!UnitCategory::CV.tracks_heat());
        assert!(UnitCategory::AF.supports_extended_overheat());
        assert!(!UnitCategory::BM.supports_extended_overheat());
        assert_eq!(UnitCategory::AF.damage_bands(), 4);
        assert_eq!(UnitCategory::BM.damage_bands(), 3);
    }
}
