//! The closed set of ability tags and the payload shape each one carries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Payload shape a tag requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayloadShape {
    /// No payload; the tag is a plain flag.
    None,
    /// Whole-number count.
    Int,
    /// Real number (whole values are stored as integers).
    Real,
    /// Single damage value.
    Damage,
    /// Range-banded damage vector.
    Vector,
    /// Movement profile keyed by mode.
    Map,
    /// Nested arc summary.
    Arc,
}

impl fmt::Display for PayloadShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Int => "integer",
            Self::Real => "real",
            Self::Damage => "damage value",
            Self::Vector => "damage vector",
            Self::Map => "movement map",
            Self::Arc => "arc summary",
        };
        f.write_str(name)
    }
}

macro_rules! ability_tags {
    ($($variant:ident => $code:literal, $shape:ident, $doc:literal;)*) => {
        /// A special ability keyword.
        ///
        /// Each tag declares its payload shape statically; the catalog
        /// refuses values of any other shape.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub enum AbilityTag {
            $(
                #[doc = $doc]
                $variant,
            )*
        }

        impl AbilityTag {
            /// Every tag, in declaration order.
            pub const ALL: &'static [AbilityTag] = &[$(AbilityTag::$variant,)*];

            /// Printed code of the tag.
            #[must_use]
            pub const fn code(self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)*
                }
            }

            /// Payload shape the tag requires.
            #[must_use]
            pub const fn shape(self) -> PayloadShape {
                match self {
                    $(Self::$variant => PayloadShape::$shape,)*
                }
            }
        }
    };
}

ability_tags! {
    Ac => "AC", Vector, "Autocannon special damage.";
    Aecm => "AECM", None, "Angel ECM.";
    Afc => "AFC", None, "Advanced fire control.";
    Amp => "AMP", None, "Amphibious.";
    Ams => "AMS", None, "Anti-missile system.";
    Arm => "ARM", None, "Armored components.";
    Ars => "ARS", None, "Armored motive system.";
    ArtAis => "ARTAIS", Int, "Arrow IV artillery (Inner Sphere).";
    ArtAc => "ARTAC", Int, "Arrow IV artillery (Clan).";
    ArtBa => "ARTBA", Int, "Battle armor tube artillery.";
    ArtCm5 => "ARTCM5", Int, "Cruise missile/50 artillery.";
    ArtCm7 => "ARTCM7", Int, "Cruise missile/70 artillery.";
    ArtCm9 => "ARTCM9", Int, "Cruise missile/90 artillery.";
    ArtCm12 => "ARTCM12", Int, "Cruise missile/120 artillery.";
    ArtLt => "ARTLT", Int, "Long Tom artillery.";
    ArtS => "ARTS", Int, "Sniper artillery.";
    ArtT => "ARTT", Int, "Thumper artillery.";
    ArtLtc => "ARTLTC", Int, "Long Tom artillery cannon.";
    ArtSc => "ARTSC", Int, "Sniper artillery cannon.";
    ArtTc => "ARTTC", Int, "Thumper artillery cannon.";
    At => "AT", Int, "Aerospace fighter transport bay capacity.";
    AtDoors => "ATxD", Int, "Aerospace fighter transport bay doors.";
    Bar => "BAR", None, "Barrier armor rating below 10.";
    Bfc => "BFC", None, "Basic fire control.";
    Bh => "BH", None, "Bloodhound active probe.";
    Bhj2 => "BHJ2", None, "HarJel II self-repair.";
    Bhj3 => "BHJ3", None, "HarJel III self-repair.";
    Bim => "BIM", Map, "Bimodal land-air mek movement.";
    Bomb => "BOMB", Int, "External bomb capacity.";
    Brid => "BRID", None, "Bridge layer.";
    Bt => "BT", None, "Booby trap.";
    Btas => "BTAS", Int, "Battle armor taser.";
    C3bsm => "C3BSM", Int, "Boosted C3 master.";
    C3bss => "C3BSS", None, "Boosted C3 slave.";
    C3em => "C3EM", Int, "Emergency C3 master.";
    C3i => "C3I", None, "Improved C3.";
    C3m => "C3M", Int, "C3 master.";
    C3rs => "C3RS", None, "C3 remote sensor.";
    C3s => "C3S", None, "C3 slave.";
    Cap => "CAP", Vector, "Capital weapon damage.";
    Case => "CASE", None, "Cellular ammunition storage.";
    Caseii => "CASEII", None, "CASE II.";
    Casep => "CASEP", None, "Prototype CASE.";
    Cnarc => "CNARC", Int, "Compact Narc.";
    Cr => "CR", None, "Critical-resistant.";
    Crw => "CRW", Int, "Crewed (crew quirk).";
    Ct => "CT", Real, "Cargo transport tonnage.";
    CtDoors => "CTxD", Int, "Cargo transport bay doors.";
    Dn => "DN", None, "Drone carrier control.";
    Dro => "DRO", None, "Drone.";
    Dt => "DT", Int, "Docking collar.";
    Ecm => "ECM", None, "Electronic countermeasures.";
    Ecs => "ECS", None, "Emergency coolant system.";
    Ee => "EE", None, "Elementary (internal combustion) engine.";
    Ene => "ENE", None, "Energy-only weapons.";
    Fc => "FC", None, "Fuel cell engine.";
    Flk => "FLK", Vector, "Flak special damage.";
    Fr => "FR", None, "Fire-resistant.";
    Heli => "HELI", None, "Helipad.";
    Hpg => "HPG", None, "Hyperpulse generator.";
    Ht => "HT", Vector, "Heat damage.";
    Htc => "HTC", None, "Hitch.";
    Iatm => "IATM", Vector, "Improved ATM special damage.";
    If => "IF", Damage, "Indirect fire.";
    Inarc => "INARC", Int, "Improved Narc.";
    It => "IT", Real, "Infantry transport tonnage.";
    Itsm => "I-TSM", None, "Industrial triple-strength myomer.";
    Kf => "KF", None, "Kearny-Fuchida drive.";
    Lam => "LAM", Map, "Land-air mek movement.";
    Lecm => "LECM", None, "Light ECM.";
    Lf => "LF", None, "Lithium-fusion battery.";
    Lmas => "LMAS", None, "Light mimetic armor system.";
    Lprb => "LPRB", None, "Light active probe.";
    Lrm => "LRM", Vector, "Long-range missile special damage.";
    Ltag => "LTAG", None, "Light TAG.";
    Mas => "MAS", None, "Mimetic armor system.";
    Mash => "MASH", Int, "Mobile army surgical hospital.";
    Mds => "MDS", Int, "Mine dispenser.";
    Mec => "MEC", None, "Mechanized battle armor.";
    Mel => "MEL", None, "Melee weapon.";
    Mfb => "MFB", None, "Mobile field base.";
    Mhq => "MHQ", Real, "Mobile headquarters.";
    Msl => "MSL", Vector, "Capital missile damage.";
    Mt => "MT", Int, "Mek transport bay capacity.";
    MtDoors => "MTxD", Int, "Mek transport bay doors.";
    Mtas => "MTAS", Int, "Mek taser.";
    Nc3 => "NC3", None, "Naval C3.";
    Nova => "NOVA", None, "Nova combined electronic warfare system.";
    Omni => "OMNI", None, "OmniUnit.";
    Ovl => "OVL", None, "Overheat long.";
    Pnt => "PNT", Int, "Point defense.";
    Prb => "PRB", None, "Active probe.";
    Pt => "PT", Int, "ProtoMek transport bay capacity.";
    PtDoors => "PTxD", Int, "ProtoMek transport bay doors.";
    Rams => "RAMS", None, "Reflective laser anti-missile system.";
    Rcn => "RCN", None, "Recon.";
    Rear => "REAR", Vector, "Rear-facing weapons.";
    Rhs => "RHS", None, "Radical heat sink.";
    Rsd => "RSD", Int, "Remote sensor dispenser.";
    Scap => "SCAP", Vector, "Sub-capital weapon damage.";
    Seal => "SEAL", None, "Environmental sealing.";
    Shld => "SHLD", None, "Shield.";
    Snarc => "SNARC", Int, "Standard Narc.";
    Soa => "SOA", None, "Space operations adaptation.";
    Srch => "SRCH", None, "Searchlight.";
    Srm => "SRM", Vector, "Short-range missile special damage.";
    St => "ST", Int, "Small craft transport bay capacity.";
    StDoors => "STxD", Int, "Small craft transport bay doors.";
    Stl => "STL", None, "Stealth.";
    Tag => "TAG", None, "Target acquisition gear.";
    Tor => "TOR", Vector, "Torpedo special damage.";
    Tsemp => "TSEMP", Int, "TSEMP cannon.";
    Tsempo => "TSEMPO", Int, "One-shot TSEMP.";
    Tsm => "TSM", None, "Triple-strength myomer.";
    Tur => "TUR", Arc, "Turret.";
    Umu => "UMU", None, "Underwater maneuvering units.";
    Vrt => "VRT", None, "Variable range targeting.";
    Vstol => "VSTOL", None, "VSTOL capable.";
    Vth => "VTH", Int, "Heavy vehicle transport bay capacity.";
    VthDoors => "VTHxD", Int, "Heavy vehicle transport bay doors.";
    Vtm => "VTM", Int, "Light/medium vehicle transport bay capacity.";
    VtmDoors => "VTMxD", Int, "Light/medium vehicle transport bay doors.";
    Vts => "VTS", Int, "Superheavy vehicle transport bay capacity.";
    VtsDoors => "VTSxD", Int, "Superheavy vehicle transport bay doors.";
    Wat => "WAT", None, "Watchdog composite electronic warfare system.";
    Xmec => "XMEC", None, "Extended mechanized (magnetic clamps).";
}

impl AbilityTag {
    /// Look a tag up by its exact code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|tag| tag.code() == code)
    }

    /// The longest tag code that prefixes `text`.
    #[must_use]
    pub fn longest_prefix(text: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .filter(|tag| text.starts_with(tag.code()))
            .max_by_key(|tag| tag.code().len())
    }

    /// Artillery tags print their count as `CODE-n`.
    #[must_use]
    pub const fn is_artillery(self) -> bool {
        matches!(
            self,
            Self::ArtAis
                | Self::ArtAc
                | Self::ArtBa
                | Self::ArtCm5
                | Self::ArtCm7
                | Self::ArtCm9
                | Self::ArtCm12
                | Self::ArtLt
                | Self::ArtS
                | Self::ArtT
                | Self::ArtLtc
                | Self::ArtSc
                | Self::ArtTc
        )
    }

    /// Door-count tag paired with a transport bay tag.
    #[must_use]
    pub const fn doors(self) -> Option<Self> {
        match self {
            Self::At => Some(Self::AtDoors),
            Self::Ct => Some(Self::CtDoors),
            Self::Mt => Some(Self::MtDoors),
            Self::Pt => Some(Self::PtDoors),
            Self::St => Some(Self::StDoors),
            Self::Vth => Some(Self::VthDoors),
            Self::Vtm => Some(Self::VtmDoors),
            Self::Vts => Some(Self::VtsDoors),
            _ => None,
        }
    }

    /// Whether this tag only ever prints attached to its bay tag.
    #[must_use]
    pub const fn is_door_count(self) -> bool {
        matches!(
            self,
            Self::AtDoors
                | Self::CtDoors
                | Self::MtDoors
                | Self::PtDoors
                | Self::StDoors
                | Self::VthDoors
                | Self::VtmDoors
                | Self::VtsDoors
        )
    }

    /// Whether this tag marks a C3 network device.
    #[must_use]
    pub const fn is_c3(self) -> bool {
        matches!(
            self,
            Self::C3m
                | Self::C3s
                | Self::C3i
                | Self::C3bsm
                | Self::C3bss
                | Self::C3em
                | Self::Nc3
                | Self::C3rs
        )
    }
}

impl fmt::Display for AbilityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique() {
        let codes: HashSet<&str> = AbilityTag::ALL.iter().map(|t| t.code()).collect();
        assert_eq!(codes.len(), AbilityTag::ALL.len());
    }

    #[test]
    fn test_from_code() {
        assert_eq!(AbilityTag::from_code("I-TSM"), Some(AbilityTag::Itsm));
        assert_eq!(AbilityTag::from_code("CASEII"), Some(AbilityTag::Caseii));
        assert_eq!(AbilityTag::from_code("NOPE"), None);
    }

    #[test]
    fn test_longest_prefix_prefers_longer_codes() {
        assert_eq!(AbilityTag::longest_prefix("ARTLTC-1"), Some(AbilityTag::ArtLtc));
        assert_eq!(AbilityTag::longest_prefix("ARTLT-2"), Some(AbilityTag::ArtLt));
        assert_eq!(AbilityTag::longest_prefix("CASEII"), Some(AbilityTag::Caseii));
        assert_eq!(AbilityTag::longest_prefix("HTC"), Some(AbilityTag::Htc));
        assert_eq!(AbilityTag::longest_prefix("HT1/1/-"), Some(AbilityTag::Ht));
        assert_eq!(AbilityTag::longest_prefix("ZZZ"), None);
    }

    #[test]
    fn test_door_tags_pair_with_bays() {
        for tag in AbilityTag::ALL {
            if let Some(doors) = tag.doors() {
                assert!(doors.is_door_count());
                assert_eq!(doors.shape(), PayloadShape::Int);
            }
        }
    }

    #[test]
    fn test_artillery_tags_are_counts() {
        for tag in AbilityTag::ALL.iter().filter(|t| t.is_artillery()) {
            assert_eq!(tag.shape(), PayloadShape::Int);
            assert!(tag.code().starts_with("ART"));
        }
    }
}
