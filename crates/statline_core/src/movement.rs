//! Movement modes and the movement profile of a converted element.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A movement mode key.
///
/// Variant order is the print order of a movement string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MovementMode {
    /// Default ground movement (no suffix).
    Default,
    /// Jumping.
    Jump,
    /// Submarine / UMU.
    Umu,
    /// Tracked vehicle.
    Tracked,
    /// Wheeled vehicle.
    Wheeled,
    /// Hovercraft.
    Hover,
    /// VTOL.
    Vtol,
    /// Naval surface vessel.
    Naval,
    /// Wing-in-ground-effect.
    Wige,
    /// Foot infantry.
    Foot,
    /// Motorized infantry.
    Motorized,
    /// Aerodyne thrust.
    AerodyneThrust,
    /// Spheroid thrust.
    SpheroidThrust,
    /// Station keeping.
    StationKeeping,
}

impl MovementMode {
    /// All modes in print order.
    pub const ALL: [Self; 14] = [
        Self::Default,
        Self::Jump,
        Self::Umu,
        Self::Tracked,
        Self::Wheeled,
        Self::Hover,
        Self::Vtol,
        Self::Naval,
        Self::Wige,
        Self::Foot,
        Self::Motorized,
        Self::AerodyneThrust,
        Self::SpheroidThrust,
        Self::StationKeeping,
    ];

    /// Suffix printed after the movement value.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Default => "",
            Self::Jump => "j",
            Self::Umu => "s",
            Self::Tracked => "t",
            Self::Wheeled => "w",
            Self::Hover => "h",
            Self::Vtol => "v",
            Self::Naval => "n",
            Self::Wige => "g",
            Self::Foot => "f",
            Self::Motorized => "m",
            Self::AerodyneThrust => "a",
            Self::SpheroidThrust => "p",
            Self::StationKeeping => "k",
        }
    }

    /// Look a mode up by its suffix.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.code() == code)
    }

    /// Thrust modes are measured in thrust points, not inches.
    #[must_use]
    pub const fn is_thrust(self) -> bool {
        matches!(
            self,
            Self::AerodyneThrust | Self::SpheroidThrust | Self::StationKeeping
        )
    }
}

/// Movement values keyed by mode.
///
/// Ground values are inches, thrust values are thrust points.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MovementProfile {
    modes: BTreeMap<MovementMode, u32>,
}

impl MovementProfile {
    /// Create an empty profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value of a mode. A value of 0 removes the mode.
    pub fn insert(&mut self, mode: MovementMode, value: u32) {
        if value == 0 {
            self.modes.remove(&mode);
        } else {
            self.modes.insert(mode, value);
        }
    }

    /// Builder-style [`MovementProfile::insert`].
    #[must_use]
    pub fn with(mut self, mode: MovementMode, value: u32) -> Self {
        self.insert(mode, value);
        self
    }

    /// Value of a mode, if present.
    #[must_use]
    pub fn get(&self, mode: MovementMode) -> Option<u32> {
        self.modes.get(&mode).copied()
    }

    /// Highest value across all modes.
    #[must_use]
    pub fn top_speed(&self) -> u32 {
        self.modes.values().copied().max().unwrap_or(0)
    }

    /// Highest value across all modes except jumping.
    #[must_use]
    pub fn top_ground_speed(&self) -> u32 {
        self.modes
            .iter()
            .filter(|(mode, _)| **mode != MovementMode::Jump)
            .map(|(_, value)| *value)
            .max()
            .unwrap_or(0)
    }

    /// Whether the profile includes a jump mode.
    #[must_use]
    pub fn has_jump(&self) -> bool {
        self.modes.contains_key(&MovementMode::Jump)
    }

    /// Modes and values in print order.
    pub fn iter(&self) -> impl Iterator<Item = (MovementMode, u32)> + '_ {
        self.modes.iter().map(|(mode, value)| (*mode, *value))
    }

    /// Whether no mode is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }
}

impl fmt::Display for MovementProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(mode, value)| {
                if mode.is_thrust() {
                    format!("{value}{}", mode.code())
                } else {
                    format!("{value}\"{}", mode.code())
                }
            })
            .collect();
        write!(f, "{}", parts.join("/"))
    }
}
