//! Non-weapon equipment and transport bays.

use serde::{Deserialize, Serialize};

use super::weapon::Location;

/// Kind of a non-weapon equipment item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentKind {
    /// Guardian ECM.
    Ecm,
    /// Angel ECM.
    AngelEcm,
    /// Light ECM.
    LightEcm,
    /// Watchdog CEWS.
    Watchdog,
    /// Nova CEWS.
    NovaCews,
    /// Beagle-style active probe.
    ActiveProbe,
    /// Bloodhound active probe.
    Bloodhound,
    /// Light active probe.
    LightActiveProbe,
    /// C3 slave unit.
    C3Slave,
    /// Boosted C3 slave.
    C3BoostedSlave,
    /// Improved C3 computer.
    C3i,
    /// Naval C3.
    NavalC3,
    /// C3 remote sensor launcher.
    C3RemoteSensor,
    /// Remote sensor dispenser.
    RemoteSensorDispenser,
    /// Triple-strength myomer.
    Tsm,
    /// Industrial TSM.
    IndustrialTsm,
    /// Hatchet, sword, claws and similar.
    MeleeWeapon,
    /// CASE.
    Case,
    /// CASE II.
    CaseII,
    /// Prototype CASE.
    CaseP,
    /// Armored component.
    ArmoredComponent,
    /// Communications equipment.
    CommunicationsEquipment,
    /// Mobile headquarters.
    MobileHq,
    /// MASH theater.
    Mash,
    /// Searchlight.
    Searchlight,
    /// Amphibious chassis.
    AmphibiousChassis,
    /// Environmental sealing.
    EnvironmentalSealing,
    /// Shield.
    Shield,
    /// Stealth armor system.
    StealthArmorSystem,
    /// Mimetic armor.
    MimeticArmor,
    /// Light mimetic armor.
    LightMimeticArmor,
    /// Magnetic clamp.
    MagneticClamp,
    /// Battle armor light TAG designator.
    LightTagDesignator,
    /// Drone operating system.
    DroneOs,
    /// Drone carrier control system.
    DroneCarrierControl,
    /// Hyperpulse generator.
    Hpg,
    /// Kearny-Fuchida drive.
    KfDrive,
    /// Lithium-fusion battery.
    LithiumFusionBattery,
    /// Radical heat sink system.
    RadicalHeatSink,
    /// Emergency coolant system.
    EmergencyCoolant,
    /// Advanced fire control.
    AdvancedFireControl,
    /// Basic fire control.
    BasicFireControl,
    /// VSTOL chassis.
    VstolChassis,
    /// Helipad.
    Helipad,
    /// Docking collar.
    DockingCollar,
    /// Bridge layer.
    BridgeLayer,
    /// Variable range targeting.
    VariableRangeTargeting,
    /// Fire-resistant armor.
    FireResistantArmor,
    /// Reinforced cockpit.
    ReinforcedCockpit,
    /// HarJel II.
    HarJelII,
    /// HarJel III.
    HarJelIII,
    /// Recon camera.
    ReconCamera,
    /// High-resolution imager.
    HighResImager,
    /// Hyperspectral imager.
    HyperspectralImager,
    /// Infrared imager.
    InfraredImager,
    /// Trailer hitch.
    TrailerHitch,
    /// Cargo container.
    CargoContainer,
    /// Armored motive system.
    ArmoredMotiveSystem,
    /// Booby trap.
    BoobyTrap,
    /// Mobile field base.
    MobileFieldBase,
    /// Mine dispenser.
    MineDispenser,
    /// Null-signature system.
    NullSignature,
    /// Void-signature system.
    VoidSignature,
    /// Chameleon light polarization shield.
    ChameleonLps,
    /// Targeting computer.
    TargetingComputer,
    /// Actuator enhancement system.
    Aes,
    /// Myomer accelerator signal circuitry.
    Masc,
    /// Supercharger.
    Supercharger,
    /// Coolant pod.
    CoolantPod,
    /// Partial wing.
    PartialWing,
}

/// A mounted equipment item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentMount {
    /// Equipment kind.
    pub kind: EquipmentKind,
    /// Mount location.
    #[serde(default)]
    pub location: Location,
    /// Tonnage (used by tonnage-valued abilities).
    #[serde(default)]
    pub tonnage: f64,
}

/// Kind of a transport bay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BayKind {
    /// Cargo.
    Cargo,
    /// Conventional infantry.
    Infantry,
    /// Battle armor.
    BattleArmor,
    /// Meks.
    Mek,
    /// ProtoMeks.
    ProtoMek,
    /// Light or medium vehicles.
    LightVehicle,
    /// Heavy vehicles.
    HeavyVehicle,
    /// Superheavy vehicles.
    SuperheavyVehicle,
    /// Aerospace fighters.
    Fighter,
    /// Small craft.
    SmallCraft,
}

/// A transport bay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportBay {
    /// Bay kind.
    pub kind: BayKind,
    /// Capacity in units, or tons for cargo and infantry bays.
    pub capacity: f64,
    /// Number of doors.
    #[serde(default)]
    pub doors: u32,
}
