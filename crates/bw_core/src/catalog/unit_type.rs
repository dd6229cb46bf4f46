//! Unit type catalog.
//!
//! One row per unit type the rules engines know about. Supply values are in
//! engine units, where one displayed supply is two engine units, so that
//! half-supply types such as the Zergling are integral.

use serde::{Deserialize, Serialize};

use super::damage::UnitSizeType;
use super::race::Race;
use super::tech::TechType;
use super::upgrade::UpgradeType;
use super::weapon::WeaponType;
use crate::error::{QueryError, Result};
use crate::position::TilePosition;

// ============================================================================
// Type traits
// ============================================================================

/// Bitflags describing what a unit type is and how placement treats it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TypeTraits(u32);

impl TypeTraits {
    /// No traits.
    pub const NONE: Self = Self(0);
    /// A structure.
    pub const BUILDING: Self = Self(1 << 0);
    /// A structure that attaches to another structure.
    pub const ADDON: Self = Self(1 << 1);
    /// Always airborne.
    pub const FLYER: Self = Self(1 << 2);
    /// A structure that can lift off.
    pub const FLYING_BUILDING: Self = Self(1 << 3);
    /// Built on top of a vespene geyser.
    pub const REFINERY: Self = Self(1 << 4);
    /// Accepts gathered resources.
    pub const RESOURCE_DEPOT: Self = Self(1 << 5);
    /// Must be placed entirely on creep.
    pub const REQUIRES_CREEP: Self = Self(1 << 6);
    /// Must be placed inside a power field.
    pub const REQUIRES_PSI: Self = Self(1 << 7);
    /// Can move under its own power.
    pub const CAN_MOVE: Self = Self(1 << 8);
    /// Spawns larva.
    pub const PRODUCES_LARVA: Self = Self(1 << 9);
    /// A mineral field.
    pub const MINERAL_FIELD: Self = Self(1 << 10);
    /// Two units hatch from one egg.
    pub const TWO_UNITS_IN_ONE_EGG: Self = Self(1 << 11);
    /// Capture-the-flag beacon.
    pub const FLAG_BEACON: Self = Self(1 << 12);
    /// Map-analysis marker for a start location.
    pub const START_LOCATION: Self = Self(1 << 13);
    /// Campaign hero variant.
    pub const HERO: Self = Self(1 << 14);
    /// Holds harvestable resources.
    pub const RESOURCE_CONTAINER: Self = Self(1 << 15);
    /// Gathers resources and constructs buildings.
    pub const WORKER: Self = Self(1 << 16);

    /// Create from raw bits.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Get raw bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Check if all flags in `other` are set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if any flag in `other` is set.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Combine with another set of flags.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl std::ops::BitOr for TypeTraits {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

// ============================================================================
// Unit types
// ============================================================================

/// Every unit type known to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum UnitType {
    // Terran units
    TerranMarine,
    TerranGhost,
    TerranVulture,
    TerranGoliath,
    TerranSiegeTankTankMode,
    TerranScv,
    TerranWraith,
    TerranScienceVessel,
    TerranDropship,
    TerranBattlecruiser,
    TerranVultureSpiderMine,
    TerranNuclearMissile,
    TerranFirebat,
    TerranMedic,
    TerranValkyrie,
    // Zerg units
    ZergLarva,
    ZergEgg,
    ZergZergling,
    ZergHydralisk,
    ZergUltralisk,
    ZergDrone,
    ZergOverlord,
    ZergMutalisk,
    ZergQueen,
    ZergDefiler,
    ZergScourge,
    ZergLurker,
    // Protoss units
    ProtossCorsair,
    ProtossDarkTemplar,
    ProtossProbe,
    ProtossZealot,
    ProtossDragoon,
    ProtossHighTemplar,
    ProtossShuttle,
    ProtossScout,
    ProtossArbiter,
    ProtossCarrier,
    ProtossInterceptor,
    ProtossReaver,
    ProtossObserver,
    ProtossScarab,
    // Heroes
    HeroWarbringer,
    HeroGantrithor,
    // Terran buildings
    TerranCommandCenter,
    TerranComsatStation,
    TerranNuclearSilo,
    TerranSupplyDepot,
    TerranRefinery,
    TerranBarracks,
    TerranAcademy,
    TerranFactory,
    TerranStarport,
    TerranControlTower,
    TerranScienceFacility,
    TerranCovertOps,
    TerranPhysicsLab,
    TerranMachineShop,
    TerranEngineeringBay,
    TerranArmory,
    TerranMissileTurret,
    TerranBunker,
    // Zerg buildings
    ZergHatchery,
    ZergLair,
    ZergHive,
    ZergNydusCanal,
    ZergHydraliskDen,
    ZergDefilerMound,
    ZergGreaterSpire,
    ZergQueensNest,
    ZergEvolutionChamber,
    ZergUltraliskCavern,
    ZergSpire,
    ZergSpawningPool,
    ZergCreepColony,
    ZergSporeColony,
    ZergSunkenColony,
    ZergExtractor,
    // Protoss buildings
    ProtossNexus,
    ProtossRoboticsFacility,
    ProtossPylon,
    ProtossAssimilator,
    ProtossObservatory,
    ProtossGateway,
    ProtossPhotonCannon,
    ProtossCitadelOfAdun,
    ProtossCyberneticsCore,
    ProtossTemplarArchives,
    ProtossForge,
    ProtossStargate,
    ProtossFleetBeacon,
    ProtossArbiterTribunal,
    ProtossRoboticsSupportBay,
    ProtossShieldBattery,
    // Neutral
    MineralFieldType1,
    MineralFieldType2,
    MineralFieldType3,
    VespeneGeyser,
    ZergFlagBeacon,
    TerranFlagBeacon,
    ProtossFlagBeacon,
    StartLocation,
}

/// Static data for a [`UnitType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitTypeData {
    /// The type this row describes.
    pub unit_type: UnitType,
    /// Engine identifier.
    pub id: u16,
    /// Display name.
    pub name: &'static str,
    /// Owning race.
    pub race: Race,
    /// Producer type and how many of it are consumed.
    pub what_builds: Option<(UnitType, u32)>,
    /// Unit types that must exist, with counts.
    pub required_units: &'static [(UnitType, u32)],
    /// Tech that must be researched.
    pub required_tech: Option<TechType>,
    /// Mineral price.
    pub mineral_price: i32,
    /// Gas price.
    pub gas_price: i32,
    /// Supply consumed, in engine units.
    pub supply_required: i32,
    /// Supply provided, in engine units.
    pub supply_provided: i32,
    /// Footprint width in tiles.
    pub tile_width: i32,
    /// Footprint height in tiles.
    pub tile_height: i32,
    /// Pixels from center to left edge.
    pub dimension_left: i32,
    /// Pixels from center to top edge.
    pub dimension_up: i32,
    /// Pixels from center to right edge.
    pub dimension_right: i32,
    /// Pixels from center to bottom edge.
    pub dimension_down: i32,
    /// Size class for the damage ratio table.
    pub size: UnitSizeType,
    /// Base armor.
    pub armor: i32,
    /// Upgrade that raises armor.
    pub armor_upgrade: Option<UpgradeType>,
    /// Weapon against ground targets.
    pub ground_weapon: Option<WeaponType>,
    /// Weapon against air targets.
    pub air_weapon: Option<WeaponType>,
    /// Trait flags.
    pub traits: TypeTraits,
}

impl UnitTypeData {
    const fn new(unit_type: UnitType, id: u16, name: &'static str, race: Race) -> Self {
        Self {
            unit_type,
            id,
            name,
            race,
            what_builds: None,
            required_units: &[],
            required_tech: None,
            mineral_price: 0,
            gas_price: 0,
            supply_required: 0,
            supply_provided: 0,
            tile_width: 1,
            tile_height: 1,
            dimension_left: 8,
            dimension_up: 8,
            dimension_right: 7,
            dimension_down: 7,
            size: UnitSizeType::Small,
            armor: 0,
            armor_upgrade: None,
            ground_weapon: None,
            air_weapon: None,
            traits: TypeTraits::NONE,
        }
    }

    const fn built_by(mut self, producer: UnitType) -> Self {
        self.what_builds = Some((producer, 1));
        self
    }

    const fn requires(mut self, units: &'static [(UnitType, u32)]) -> Self {
        self.required_units = units;
        self
    }

    const fn tech(mut self, tech: TechType) -> Self {
        self.required_tech = Some(tech);
        self
    }

    const fn price(mut self, minerals: i32, gas: i32) -> Self {
        self.mineral_price = minerals;
        self.gas_price = gas;
        self
    }

    const fn supply(mut self, required: i32, provided: i32) -> Self {
        self.supply_required = required;
        self.supply_provided = provided;
        self
    }

    const fn dims(mut self, left: i32, up: i32, right: i32, down: i32) -> Self {
        self.dimension_left = left;
        self.dimension_up = up;
        self.dimension_right = right;
        self.dimension_down = down;
        self
    }

    const fn size(mut self, size: UnitSizeType) -> Self {
        self.size = size;
        self
    }

    const fn armor(mut self, armor: i32, upgrade: UpgradeType) -> Self {
        self.armor = armor;
        self.armor_upgrade = Some(upgrade);
        self
    }

    const fn weapons(mut self, ground: Option<WeaponType>, air: Option<WeaponType>) -> Self {
        self.ground_weapon = ground;
        self.air_weapon = air;
        self
    }

    const fn traits(mut self, traits: TypeTraits) -> Self {
        self.traits = self.traits.union(traits);
        self
    }

    /// A Large structure occupying `width` × `height` tiles with its center
    /// on the footprint's midpoint. Structures have no armor upgrade.
    const fn structure(mut self, width: i32, height: i32, armor: i32) -> Self {
        self.tile_width = width;
        self.tile_height = height;
        self.dimension_left = width * 16;
        self.dimension_up = height * 16;
        self.dimension_right = width * 16 - 1;
        self.dimension_down = height * 16 - 1;
        self.size = UnitSizeType::Large;
        self.armor = armor;
        self.traits = self.traits.union(TypeTraits::BUILDING);
        self
    }
}

use Race::{Neutral, Protoss, Terran, Zerg};
use TypeTraits as F;
use UnitSizeType::{Independent, Large, Medium};
use UnitType as T;
use UnitTypeData as D;
use UpgradeType as U;
use WeaponType as W;

const MOBILE: TypeTraits = F::CAN_MOVE;
const AIR: TypeTraits = F::FLYER.union(F::CAN_MOVE);
const LIFTS: TypeTraits = F::FLYING_BUILDING;
const ADDON: TypeTraits = F::ADDON;
const CREEP: TypeTraits = F::REQUIRES_CREEP;
const PSI: TypeTraits = F::REQUIRES_PSI;

static UNIT_TYPES: &[UnitTypeData] = &[
    // ---- Terran units ------------------------------------------------------
    D::new(T::TerranMarine, 0, "Terran Marine", Terran)
        .built_by(T::TerranBarracks)
        .requires(&[(T::TerranBarracks, 1)])
        .price(50, 0)
        .supply(2, 0)
        .dims(8, 9, 8, 10)
        .armor(0, U::TerranInfantryArmor)
        .weapons(Some(W::GaussRifle), Some(W::GaussRifle))
        .traits(MOBILE),
    D::new(T::TerranGhost, 1, "Terran Ghost", Terran)
        .built_by(T::TerranBarracks)
        .requires(&[(T::TerranBarracks, 1), (T::TerranAcademy, 1), (T::TerranCovertOps, 1)])
        .price(25, 75)
        .supply(2, 0)
        .dims(7, 10, 7, 11)
        .armor(0, U::TerranInfantryArmor)
        .weapons(Some(W::C10CanisterRifle), Some(W::C10CanisterRifle))
        .traits(MOBILE),
    D::new(T::TerranVulture, 2, "Terran Vulture", Terran)
        .built_by(T::TerranFactory)
        .requires(&[(T::TerranFactory, 1)])
        .price(75, 0)
        .supply(4, 0)
        .dims(16, 16, 15, 15)
        .size(Medium)
        .armor(0, U::TerranVehiclePlating)
        .weapons(Some(W::FragmentationGrenade), None)
        .traits(MOBILE),
    D::new(T::TerranGoliath, 3, "Terran Goliath", Terran)
        .built_by(T::TerranFactory)
        .requires(&[(T::TerranFactory, 1), (T::TerranArmory, 1)])
        .price(100, 50)
        .supply(4, 0)
        .dims(16, 16, 15, 15)
        .size(Large)
        .armor(1, U::TerranVehiclePlating)
        .weapons(Some(W::TwinAutocannons), Some(W::HellfireMissilePack))
        .traits(MOBILE),
    D::new(T::TerranSiegeTankTankMode, 5, "Terran Siege Tank Tank Mode", Terran)
        .built_by(T::TerranFactory)
        .requires(&[(T::TerranFactory, 1), (T::TerranMachineShop, 1)])
        .price(150, 100)
        .supply(4, 0)
        .dims(16, 16, 15, 15)
        .size(Large)
        .armor(1, U::TerranVehiclePlating)
        .weapons(Some(W::ArcliteCannon), None)
        .traits(MOBILE),
    D::new(T::TerranScv, 7, "Terran SCV", Terran)
        .built_by(T::TerranCommandCenter)
        .requires(&[(T::TerranCommandCenter, 1)])
        .price(50, 0)
        .supply(2, 0)
        .dims(11, 11, 11, 11)
        .armor(0, U::TerranInfantryArmor)
        .weapons(Some(W::FusionCutter), None)
        .traits(MOBILE.union(F::WORKER)),
    D::new(T::TerranWraith, 8, "Terran Wraith", Terran)
        .built_by(T::TerranStarport)
        .requires(&[(T::TerranStarport, 1)])
        .price(150, 100)
        .supply(4, 0)
        .dims(19, 15, 18, 14)
        .size(Large)
        .armor(0, U::TerranShipPlating)
        .weapons(Some(W::BurstLasers), Some(W::GeminiMissiles))
        .traits(AIR),
    D::new(T::TerranScienceVessel, 9, "Terran Science Vessel", Terran)
        .built_by(T::TerranStarport)
        .requires(&[(T::TerranStarport, 1), (T::TerranControlTower, 1), (T::TerranScienceFacility, 1)])
        .price(100, 225)
        .supply(4, 0)
        .dims(32, 33, 32, 16)
        .size(Large)
        .armor(1, U::TerranShipPlating)
        .traits(AIR),
    D::new(T::TerranDropship, 11, "Terran Dropship", Terran)
        .built_by(T::TerranStarport)
        .requires(&[(T::TerranStarport, 1), (T::TerranControlTower, 1)])
        .price(100, 100)
        .supply(4, 0)
        .dims(24, 16, 24, 20)
        .size(Large)
        .armor(1, U::TerranShipPlating)
        .traits(AIR),
    D::new(T::TerranBattlecruiser, 12, "Terran Battlecruiser", Terran)
        .built_by(T::TerranStarport)
        .requires(&[(T::TerranStarport, 1), (T::TerranControlTower, 1), (T::TerranPhysicsLab, 1)])
        .price(400, 300)
        .supply(12, 0)
        .dims(37, 29, 37, 29)
        .size(Large)
        .armor(3, U::TerranShipPlating)
        .weapons(Some(W::AtsLaserBattery), Some(W::AtaLaserBattery))
        .traits(AIR),
    D::new(T::TerranVultureSpiderMine, 13, "Terran Vulture Spider Mine", Terran)
        .built_by(T::TerranVulture)
        .tech(TechType::SpiderMines)
        .price(1, 0)
        .dims(7, 7, 7, 7)
        .traits(MOBILE),
    D::new(T::TerranNuclearMissile, 14, "Terran Nuclear Missile", Terran)
        .built_by(T::TerranNuclearSilo)
        .requires(&[(T::TerranNuclearSilo, 1)])
        .price(200, 200)
        .supply(16, 0)
        .dims(7, 14, 7, 14)
        .size(Independent)
        .traits(AIR),
    D::new(T::TerranFirebat, 32, "Terran Firebat", Terran)
        .built_by(T::TerranBarracks)
        .requires(&[(T::TerranBarracks, 1), (T::TerranAcademy, 1)])
        .price(50, 25)
        .supply(2, 0)
        .dims(11, 7, 11, 14)
        .armor(1, U::TerranInfantryArmor)
        .weapons(Some(W::FlameThrower), None)
        .traits(MOBILE),
    D::new(T::TerranMedic, 34, "Terran Medic", Terran)
        .built_by(T::TerranBarracks)
        .requires(&[(T::TerranBarracks, 1), (T::TerranAcademy, 1)])
        .price(50, 25)
        .supply(2, 0)
        .dims(8, 9, 8, 10)
        .armor(1, U::TerranInfantryArmor)
        .traits(MOBILE),
    D::new(T::TerranValkyrie, 58, "Terran Valkyrie", Terran)
        .built_by(T::TerranStarport)
        .requires(&[(T::TerranStarport, 1), (T::TerranControlTower, 1), (T::TerranArmory, 1)])
        .price(250, 125)
        .supply(6, 0)
        .dims(12, 12, 12, 12)
        .size(Large)
        .armor(2, U::TerranShipPlating)
        .weapons(None, Some(W::HaloRockets))
        .traits(AIR),
    // ---- Zerg units --------------------------------------------------------
    D::new(T::ZergLarva, 35, "Zerg Larva", Zerg)
        .built_by(T::ZergHatchery)
        .price(1, 1)
        .armor(10, U::ZergCarapace)
        .traits(MOBILE),
    D::new(T::ZergEgg, 36, "Zerg Egg", Zerg)
        .built_by(T::ZergLarva)
        .price(1, 1)
        .dims(16, 16, 15, 15)
        .size(Medium)
        .armor(10, U::ZergCarapace),
    D::new(T::ZergZergling, 37, "Zerg Zergling", Zerg)
        .built_by(T::ZergLarva)
        .requires(&[(T::ZergSpawningPool, 1)])
        .price(50, 0)
        .supply(1, 0)
        .dims(8, 4, 7, 11)
        .armor(0, U::ZergCarapace)
        .weapons(Some(W::Claws), None)
        .traits(MOBILE.union(F::TWO_UNITS_IN_ONE_EGG)),
    D::new(T::ZergHydralisk, 38, "Zerg Hydralisk", Zerg)
        .built_by(T::ZergLarva)
        .requires(&[(T::ZergHydraliskDen, 1)])
        .price(75, 25)
        .supply(2, 0)
        .dims(10, 10, 10, 12)
        .size(Medium)
        .armor(0, U::ZergCarapace)
        .weapons(Some(W::NeedleSpines), Some(W::NeedleSpines))
        .traits(MOBILE),
    D::new(T::ZergUltralisk, 39, "Zerg Ultralisk", Zerg)
        .built_by(T::ZergLarva)
        .requires(&[(T::ZergUltraliskCavern, 1)])
        .price(200, 200)
        .supply(8, 0)
        .dims(19, 16, 18, 15)
        .size(Large)
        .armor(1, U::ZergCarapace)
        .weapons(Some(W::KaiserBlades), None)
        .traits(MOBILE),
    D::new(T::ZergDrone, 41, "Zerg Drone", Zerg)
        .built_by(T::ZergLarva)
        .price(50, 0)
        .supply(2, 0)
        .dims(11, 11, 11, 11)
        .armor(0, U::ZergCarapace)
        .weapons(Some(W::ToxicSpores), None)
        .traits(MOBILE.union(F::WORKER)),
    D::new(T::ZergOverlord, 42, "Zerg Overlord", Zerg)
        .built_by(T::ZergLarva)
        .price(100, 0)
        .supply(0, 16)
        .dims(25, 25, 24, 24)
        .size(Large)
        .armor(0, U::ZergFlyerCarapace)
        .traits(AIR),
    D::new(T::ZergMutalisk, 43, "Zerg Mutalisk", Zerg)
        .built_by(T::ZergLarva)
        .requires(&[(T::ZergSpire, 1)])
        .price(100, 100)
        .supply(4, 0)
        .dims(22, 22, 21, 21)
        .armor(0, U::ZergFlyerCarapace)
        .weapons(Some(W::GlaveWurm), Some(W::GlaveWurm))
        .traits(AIR),
    D::new(T::ZergQueen, 45, "Zerg Queen", Zerg)
        .built_by(T::ZergLarva)
        .requires(&[(T::ZergQueensNest, 1)])
        .price(100, 100)
        .supply(4, 0)
        .dims(24, 24, 23, 23)
        .size(Medium)
        .armor(0, U::ZergFlyerCarapace)
        .traits(AIR),
    D::new(T::ZergDefiler, 46, "Zerg Defiler", Zerg)
        .built_by(T::ZergLarva)
        .requires(&[(T::ZergDefilerMound, 1)])
        .price(50, 150)
        .supply(4, 0)
        .dims(13, 12, 13, 12)
        .size(Medium)
        .armor(1, U::ZergCarapace)
        .traits(MOBILE),
    D::new(T::ZergScourge, 47, "Zerg Scourge", Zerg)
        .built_by(T::ZergLarva)
        .requires(&[(T::ZergSpire, 1)])
        .price(25, 75)
        .supply(1, 0)
        .dims(12, 12, 11, 11)
        .armor(0, U::ZergFlyerCarapace)
        .weapons(None, Some(W::SuicideScourge))
        .traits(AIR.union(F::TWO_UNITS_IN_ONE_EGG)),
    D::new(T::ZergLurker, 103, "Zerg Lurker", Zerg)
        .built_by(T::ZergHydralisk)
        .requires(&[(T::ZergHydraliskDen, 1)])
        .tech(TechType::LurkerAspect)
        .price(50, 100)
        .supply(4, 0)
        .dims(15, 15, 16, 16)
        .size(Medium)
        .armor(1, U::ZergCarapace)
        .weapons(Some(W::SubterraneanSpines), None)
        .traits(MOBILE),
    // ---- Protoss units -----------------------------------------------------
    D::new(T::ProtossCorsair, 60, "Protoss Corsair", Protoss)
        .built_by(T::ProtossStargate)
        .requires(&[(T::ProtossStargate, 1)])
        .price(150, 100)
        .supply(4, 0)
        .dims(18, 16, 17, 15)
        .size(Medium)
        .armor(1, U::ProtossAirArmor)
        .weapons(None, Some(W::NeutronFlare))
        .traits(AIR),
    D::new(T::ProtossDarkTemplar, 61, "Protoss Dark Templar", Protoss)
        .built_by(T::ProtossGateway)
        .requires(&[(T::ProtossGateway, 1), (T::ProtossTemplarArchives, 1)])
        .price(125, 100)
        .supply(4, 0)
        .dims(12, 6, 11, 19)
        .armor(1, U::ProtossGroundArmor)
        .weapons(Some(W::WarpBlades), None)
        .traits(MOBILE),
    D::new(T::ProtossProbe, 64, "Protoss Probe", Protoss)
        .built_by(T::ProtossNexus)
        .requires(&[(T::ProtossNexus, 1)])
        .price(50, 0)
        .supply(2, 0)
        .dims(11, 11, 11, 11)
        .armor(0, U::ProtossGroundArmor)
        .weapons(Some(W::ParticleBeam), None)
        .traits(MOBILE.union(F::WORKER)),
    D::new(T::ProtossZealot, 65, "Protoss Zealot", Protoss)
        .built_by(T::ProtossGateway)
        .requires(&[(T::ProtossGateway, 1)])
        .price(100, 0)
        .supply(4, 0)
        .dims(11, 5, 11, 13)
        .armor(1, U::ProtossGroundArmor)
        .weapons(Some(W::PsiBlades), None)
        .traits(MOBILE),
    D::new(T::ProtossDragoon, 66, "Protoss Dragoon", Protoss)
        .built_by(T::ProtossGateway)
        .requires(&[(T::ProtossGateway, 1), (T::ProtossCyberneticsCore, 1)])
        .price(125, 50)
        .supply(4, 0)
        .dims(15, 15, 16, 16)
        .size(Large)
        .armor(1, U::ProtossGroundArmor)
        .weapons(Some(W::PhaseDisruptor), Some(W::PhaseDisruptor))
        .traits(MOBILE),
    D::new(T::ProtossHighTemplar, 67, "Protoss High Templar", Protoss)
        .built_by(T::ProtossGateway)
        .requires(&[(T::ProtossGateway, 1), (T::ProtossTemplarArchives, 1)])
        .price(50, 150)
        .supply(4, 0)
        .dims(12, 10, 11, 13)
        .armor(0, U::ProtossGroundArmor)
        .traits(MOBILE),
    D::new(T::ProtossShuttle, 69, "Protoss Shuttle", Protoss)
        .built_by(T::ProtossRoboticsFacility)
        .requires(&[(T::ProtossRoboticsFacility, 1)])
        .price(200, 0)
        .supply(4, 0)
        .dims(20, 16, 19, 15)
        .size(Large)
        .armor(1, U::ProtossAirArmor)
        .traits(AIR),
    D::new(T::ProtossScout, 70, "Protoss Scout", Protoss)
        .built_by(T::ProtossStargate)
        .requires(&[(T::ProtossStargate, 1)])
        .price(275, 125)
        .supply(6, 0)
        .dims(18, 16, 17, 15)
        .size(Large)
        .armor(0, U::ProtossAirArmor)
        .weapons(Some(W::DualPhotonBlasters), Some(W::AntiMatterMissiles))
        .traits(AIR),
    D::new(T::ProtossArbiter, 71, "Protoss Arbiter", Protoss)
        .built_by(T::ProtossStargate)
        .requires(&[(T::ProtossStargate, 1), (T::ProtossArbiterTribunal, 1)])
        .price(100, 350)
        .supply(8, 0)
        .dims(22, 22, 21, 21)
        .size(Large)
        .armor(1, U::ProtossAirArmor)
        .weapons(Some(W::PhaseDisruptorCannon), Some(W::PhaseDisruptorCannon))
        .traits(AIR),
    D::new(T::ProtossCarrier, 72, "Protoss Carrier", Protoss)
        .built_by(T::ProtossStargate)
        .requires(&[(T::ProtossStargate, 1), (T::ProtossFleetBeacon, 1)])
        .price(350, 250)
        .supply(12, 0)
        .dims(32, 32, 31, 31)
        .size(Large)
        .armor(4, U::ProtossAirArmor)
        .traits(AIR),
    D::new(T::ProtossInterceptor, 73, "Protoss Interceptor", Protoss)
        .built_by(T::ProtossCarrier)
        .price(25, 0)
        .armor(0, U::ProtossAirArmor)
        .weapons(Some(W::PulseCannon), Some(W::PulseCannon))
        .traits(AIR),
    D::new(T::ProtossReaver, 83, "Protoss Reaver", Protoss)
        .built_by(T::ProtossRoboticsFacility)
        .requires(&[(T::ProtossRoboticsFacility, 1), (T::ProtossRoboticsSupportBay, 1)])
        .price(200, 100)
        .supply(8, 0)
        .dims(16, 16, 15, 15)
        .size(Large)
        .armor(0, U::ProtossGroundArmor)
        .weapons(Some(W::Scarab), None)
        .traits(MOBILE),
    D::new(T::ProtossObserver, 84, "Protoss Observer", Protoss)
        .built_by(T::ProtossRoboticsFacility)
        .requires(&[(T::ProtossRoboticsFacility, 1), (T::ProtossObservatory, 1)])
        .price(25, 75)
        .supply(2, 0)
        .dims(16, 16, 15, 15)
        .armor(0, U::ProtossAirArmor)
        .traits(AIR),
    D::new(T::ProtossScarab, 85, "Protoss Scarab", Protoss)
        .built_by(T::ProtossReaver)
        .price(15, 0)
        .dims(2, 2, 2, 2)
        .traits(MOBILE),
    // ---- Heroes ------------------------------------------------------------
    D::new(T::HeroWarbringer, 81, "Hero Warbringer", Protoss)
        .dims(16, 16, 15, 15)
        .size(Large)
        .armor(0, U::ProtossGroundArmor)
        .weapons(Some(W::Scarab), None)
        .traits(MOBILE.union(F::HERO)),
    D::new(T::HeroGantrithor, 82, "Hero Gantrithor", Protoss)
        .dims(32, 32, 31, 31)
        .size(Large)
        .armor(4, U::ProtossAirArmor)
        .traits(AIR.union(F::HERO)),
    // ---- Terran buildings --------------------------------------------------
    D::new(T::TerranCommandCenter, 106, "Terran Command Center", Terran)
        .built_by(T::TerranScv)
        .price(400, 0)
        .supply(0, 20)
        .structure(4, 3, 1)
        .traits(LIFTS.union(F::RESOURCE_DEPOT)),
    D::new(T::TerranComsatStation, 107, "Terran Comsat Station", Terran)
        .built_by(T::TerranCommandCenter)
        .requires(&[(T::TerranCommandCenter, 1), (T::TerranAcademy, 1)])
        .price(50, 50)
        .structure(2, 2, 1)
        .traits(ADDON),
    D::new(T::TerranNuclearSilo, 108, "Terran Nuclear Silo", Terran)
        .built_by(T::TerranCommandCenter)
        .requires(&[(T::TerranCommandCenter, 1), (T::TerranCovertOps, 1)])
        .price(100, 100)
        .structure(2, 2, 1)
        .traits(ADDON),
    D::new(T::TerranSupplyDepot, 109, "Terran Supply Depot", Terran)
        .built_by(T::TerranScv)
        .price(100, 0)
        .supply(0, 16)
        .structure(3, 2, 1),
    D::new(T::TerranRefinery, 110, "Terran Refinery", Terran)
        .built_by(T::TerranScv)
        .price(100, 0)
        .structure(4, 2, 1)
        .traits(F::REFINERY.union(F::RESOURCE_CONTAINER)),
    D::new(T::TerranBarracks, 111, "Terran Barracks", Terran)
        .built_by(T::TerranScv)
        .requires(&[(T::TerranCommandCenter, 1)])
        .price(150, 0)
        .structure(4, 3, 1)
        .traits(LIFTS),
    D::new(T::TerranAcademy, 112, "Terran Academy", Terran)
        .built_by(T::TerranScv)
        .requires(&[(T::TerranBarracks, 1)])
        .price(150, 0)
        .structure(3, 2, 1),
    D::new(T::TerranFactory, 113, "Terran Factory", Terran)
        .built_by(T::TerranScv)
        .requires(&[(T::TerranBarracks, 1)])
        .price(200, 100)
        .structure(4, 3, 1)
        .traits(LIFTS),
    D::new(T::TerranStarport, 114, "Terran Starport", Terran)
        .built_by(T::TerranScv)
        .requires(&[(T::TerranFactory, 1)])
        .price(150, 100)
        .structure(4, 3, 1)
        .traits(LIFTS),
    D::new(T::TerranControlTower, 115, "Terran Control Tower", Terran)
        .built_by(T::TerranStarport)
        .requires(&[(T::TerranStarport, 1)])
        .price(50, 50)
        .structure(2, 2, 1)
        .traits(ADDON),
    D::new(T::TerranScienceFacility, 116, "Terran Science Facility", Terran)
        .built_by(T::TerranScv)
        .requires(&[(T::TerranStarport, 1)])
        .price(100, 150)
        .structure(4, 3, 1)
        .traits(LIFTS),
    D::new(T::TerranCovertOps, 117, "Terran Covert Ops", Terran)
        .built_by(T::TerranScienceFacility)
        .requires(&[(T::TerranScienceFacility, 1)])
        .price(50, 50)
        .structure(2, 2, 1)
        .traits(ADDON),
    D::new(T::TerranPhysicsLab, 118, "Terran Physics Lab", Terran)
        .built_by(T::TerranScienceFacility)
        .requires(&[(T::TerranScienceFacility, 1)])
        .price(50, 50)
        .structure(2, 2, 1)
        .traits(ADDON),
    D::new(T::TerranMachineShop, 120, "Terran Machine Shop", Terran)
        .built_by(T::TerranFactory)
        .requires(&[(T::TerranFactory, 1)])
        .price(50, 50)
        .structure(2, 2, 1)
        .traits(ADDON),
    D::new(T::TerranEngineeringBay, 122, "Terran Engineering Bay", Terran)
        .built_by(T::TerranScv)
        .requires(&[(T::TerranCommandCenter, 1)])
        .price(125, 0)
        .structure(4, 3, 1)
        .traits(LIFTS),
    D::new(T::TerranArmory, 123, "Terran Armory", Terran)
        .built_by(T::TerranScv)
        .requires(&[(T::TerranFactory, 1)])
        .price(100, 50)
        .structure(3, 2, 1),
    D::new(T::TerranMissileTurret, 124, "Terran Missile Turret", Terran)
        .built_by(T::TerranScv)
        .requires(&[(T::TerranEngineeringBay, 1)])
        .price(75, 0)
        .structure(2, 2, 0)
        .weapons(None, Some(W::LongboltMissile)),
    D::new(T::TerranBunker, 125, "Terran Bunker", Terran)
        .built_by(T::TerranScv)
        .requires(&[(T::TerranBarracks, 1)])
        .price(100, 0)
        .structure(3, 2, 1),
    // ---- Zerg buildings ----------------------------------------------------
    D::new(T::ZergHatchery, 131, "Zerg Hatchery", Zerg)
        .built_by(T::ZergDrone)
        .price(300, 0)
        .supply(0, 2)
        .structure(4, 3, 1)
        .traits(F::RESOURCE_DEPOT.union(F::PRODUCES_LARVA)),
    D::new(T::ZergLair, 132, "Zerg Lair", Zerg)
        .built_by(T::ZergHatchery)
        .requires(&[(T::ZergHatchery, 1), (T::ZergSpawningPool, 1)])
        .price(150, 100)
        .supply(0, 2)
        .structure(4, 3, 1)
        .traits(F::RESOURCE_DEPOT.union(F::PRODUCES_LARVA).union(CREEP)),
    D::new(T::ZergHive, 133, "Zerg Hive", Zerg)
        .built_by(T::ZergLair)
        .requires(&[(T::ZergLair, 1), (T::ZergQueensNest, 1)])
        .price(200, 150)
        .supply(0, 2)
        .structure(4, 3, 1)
        .traits(F::RESOURCE_DEPOT.union(F::PRODUCES_LARVA).union(CREEP)),
    D::new(T::ZergNydusCanal, 134, "Zerg Nydus Canal", Zerg)
        .built_by(T::ZergDrone)
        .requires(&[(T::ZergHive, 1)])
        .price(150, 0)
        .structure(2, 2, 1)
        .traits(CREEP),
    D::new(T::ZergHydraliskDen, 135, "Zerg Hydralisk Den", Zerg)
        .built_by(T::ZergDrone)
        .requires(&[(T::ZergSpawningPool, 1)])
        .price(100, 50)
        .structure(3, 2, 1)
        .traits(CREEP),
    D::new(T::ZergDefilerMound, 136, "Zerg Defiler Mound", Zerg)
        .built_by(T::ZergDrone)
        .requires(&[(T::ZergHive, 1)])
        .price(100, 100)
        .structure(4, 2, 1)
        .traits(CREEP),
    D::new(T::ZergGreaterSpire, 137, "Zerg Greater Spire", Zerg)
        .built_by(T::ZergSpire)
        .requires(&[(T::ZergSpire, 1), (T::ZergHive, 1)])
        .price(100, 150)
        .structure(2, 2, 1)
        .traits(CREEP),
    D::new(T::ZergQueensNest, 138, "Zerg Queens Nest", Zerg)
        .built_by(T::ZergDrone)
        .requires(&[(T::ZergLair, 1)])
        .price(150, 100)
        .structure(3, 2, 1)
        .traits(CREEP),
    D::new(T::ZergEvolutionChamber, 139, "Zerg Evolution Chamber", Zerg)
        .built_by(T::ZergDrone)
        .requires(&[(T::ZergHatchery, 1)])
        .price(75, 0)
        .structure(3, 2, 1)
        .traits(CREEP),
    D::new(T::ZergUltraliskCavern, 140, "Zerg Ultralisk Cavern", Zerg)
        .built_by(T::ZergDrone)
        .requires(&[(T::ZergHive, 1)])
        .price(150, 200)
        .structure(3, 2, 1)
        .traits(CREEP),
    D::new(T::ZergSpire, 141, "Zerg Spire", Zerg)
        .built_by(T::ZergDrone)
        .requires(&[(T::ZergLair, 1)])
        .price(200, 150)
        .structure(2, 2, 1)
        .traits(CREEP),
    D::new(T::ZergSpawningPool, 142, "Zerg Spawning Pool", Zerg)
        .built_by(T::ZergDrone)
        .requires(&[(T::ZergHatchery, 1)])
        .price(200, 0)
        .structure(3, 2, 1)
        .traits(CREEP),
    D::new(T::ZergCreepColony, 143, "Zerg Creep Colony", Zerg)
        .built_by(T::ZergDrone)
        .price(75, 0)
        .structure(2, 2, 0)
        .traits(CREEP),
    D::new(T::ZergSporeColony, 144, "Zerg Spore Colony", Zerg)
        .built_by(T::ZergCreepColony)
        .requires(&[(T::ZergCreepColony, 1), (T::ZergEvolutionChamber, 1)])
        .price(50, 0)
        .structure(2, 2, 0)
        .weapons(None, Some(W::SeekerSpores))
        .traits(CREEP),
    D::new(T::ZergSunkenColony, 146, "Zerg Sunken Colony", Zerg)
        .built_by(T::ZergCreepColony)
        .requires(&[(T::ZergCreepColony, 1), (T::ZergSpawningPool, 1)])
        .price(50, 0)
        .structure(2, 2, 2)
        .weapons(Some(W::SubterraneanTentacle), None)
        .traits(CREEP),
    D::new(T::ZergExtractor, 149, "Zerg Extractor", Zerg)
        .built_by(T::ZergDrone)
        .price(50, 0)
        .structure(4, 2, 1)
        .traits(F::REFINERY.union(F::RESOURCE_CONTAINER)),
    // ---- Protoss buildings -------------------------------------------------
    D::new(T::ProtossNexus, 154, "Protoss Nexus", Protoss)
        .built_by(T::ProtossProbe)
        .price(400, 0)
        .supply(0, 18)
        .structure(4, 3, 1)
        .traits(F::RESOURCE_DEPOT),
    D::new(T::ProtossRoboticsFacility, 155, "Protoss Robotics Facility", Protoss)
        .built_by(T::ProtossProbe)
        .requires(&[(T::ProtossCyberneticsCore, 1)])
        .price(200, 200)
        .structure(3, 2, 1)
        .traits(PSI),
    D::new(T::ProtossPylon, 156, "Protoss Pylon", Protoss)
        .built_by(T::ProtossProbe)
        .price(100, 0)
        .supply(0, 16)
        .structure(2, 2, 0),
    D::new(T::ProtossAssimilator, 157, "Protoss Assimilator", Protoss)
        .built_by(T::ProtossProbe)
        .price(100, 0)
        .structure(4, 2, 1)
        .traits(F::REFINERY.union(F::RESOURCE_CONTAINER)),
    D::new(T::ProtossObservatory, 159, "Protoss Observatory", Protoss)
        .built_by(T::ProtossProbe)
        .requires(&[(T::ProtossRoboticsFacility, 1)])
        .price(50, 100)
        .structure(3, 2, 1)
        .traits(PSI),
    D::new(T::ProtossGateway, 160, "Protoss Gateway", Protoss)
        .built_by(T::ProtossProbe)
        .requires(&[(T::ProtossNexus, 1)])
        .price(150, 0)
        .structure(4, 3, 1)
        .traits(PSI),
    D::new(T::ProtossPhotonCannon, 162, "Protoss Photon Cannon", Protoss)
        .built_by(T::ProtossProbe)
        .requires(&[(T::ProtossForge, 1)])
        .price(150, 0)
        .structure(2, 2, 1)
        .weapons(Some(W::StsPhotonCannon), Some(W::StaPhotonCannon))
        .traits(PSI),
    D::new(T::ProtossCitadelOfAdun, 163, "Protoss Citadel of Adun", Protoss)
        .built_by(T::ProtossProbe)
        .requires(&[(T::ProtossCyberneticsCore, 1)])
        .price(150, 100)
        .structure(3, 2, 1)
        .traits(PSI),
    D::new(T::ProtossCyberneticsCore, 164, "Protoss Cybernetics Core", Protoss)
        .built_by(T::ProtossProbe)
        .requires(&[(T::ProtossGateway, 1)])
        .price(200, 0)
        .structure(3, 2, 1)
        .traits(PSI),
    D::new(T::ProtossTemplarArchives, 165, "Protoss Templar Archives", Protoss)
        .built_by(T::ProtossProbe)
        .requires(&[(T::ProtossCitadelOfAdun, 1)])
        .price(150, 200)
        .structure(3, 2, 1)
        .traits(PSI),
    D::new(T::ProtossForge, 166, "Protoss Forge", Protoss)
        .built_by(T::ProtossProbe)
        .requires(&[(T::ProtossNexus, 1)])
        .price(150, 0)
        .structure(3, 2, 1)
        .traits(PSI),
    D::new(T::ProtossStargate, 167, "Protoss Stargate", Protoss)
        .built_by(T::ProtossProbe)
        .requires(&[(T::ProtossCyberneticsCore, 1)])
        .price(150, 150)
        .structure(4, 3, 1)
        .traits(PSI),
    D::new(T::ProtossFleetBeacon, 169, "Protoss Fleet Beacon", Protoss)
        .built_by(T::ProtossProbe)
        .requires(&[(T::ProtossStargate, 1)])
        .price(300, 200)
        .structure(3, 2, 1)
        .traits(PSI),
    D::new(T::ProtossArbiterTribunal, 170, "Protoss Arbiter Tribunal", Protoss)
        .built_by(T::ProtossProbe)
        .requires(&[(T::ProtossStargate, 1), (T::ProtossTemplarArchives, 1)])
        .price(200, 150)
        .structure(3, 2, 1)
        .traits(PSI),
    D::new(T::ProtossRoboticsSupportBay, 171, "Protoss Robotics Support Bay", Protoss)
        .built_by(T::ProtossProbe)
        .requires(&[(T::ProtossRoboticsFacility, 1)])
        .price(150, 100)
        .structure(3, 2, 1)
        .traits(PSI),
    D::new(T::ProtossShieldBattery, 172, "Protoss Shield Battery", Protoss)
        .built_by(T::ProtossProbe)
        .requires(&[(T::ProtossGateway, 1)])
        .price(100, 0)
        .structure(2, 2, 1)
        .traits(PSI),
    // ---- Neutral -----------------------------------------------------------
    D::new(T::MineralFieldType1, 176, "Resource Mineral Field", Neutral)
        .structure(2, 1, 1)
        .size(Independent)
        .traits(F::MINERAL_FIELD.union(F::RESOURCE_CONTAINER)),
    D::new(T::MineralFieldType2, 177, "Resource Mineral Field Type 2", Neutral)
        .structure(2, 1, 1)
        .size(Independent)
        .traits(F::MINERAL_FIELD.union(F::RESOURCE_CONTAINER)),
    D::new(T::MineralFieldType3, 178, "Resource Mineral Field Type 3", Neutral)
        .structure(2, 1, 1)
        .size(Independent)
        .traits(F::MINERAL_FIELD.union(F::RESOURCE_CONTAINER)),
    D::new(T::VespeneGeyser, 188, "Resource Vespene Geyser", Neutral)
        .structure(4, 2, 1)
        .size(Independent)
        .traits(F::RESOURCE_CONTAINER),
    D::new(T::ZergFlagBeacon, 197, "Special Zerg Flag Beacon", Zerg)
        .structure(3, 2, 0)
        .traits(F::FLAG_BEACON),
    D::new(T::TerranFlagBeacon, 198, "Special Terran Flag Beacon", Terran)
        .structure(3, 2, 0)
        .traits(F::FLAG_BEACON),
    D::new(T::ProtossFlagBeacon, 199, "Special Protoss Flag Beacon", Protoss)
        .structure(3, 2, 0)
        .traits(F::FLAG_BEACON),
    D::new(T::StartLocation, 214, "Special Start Location", Neutral)
        .structure(4, 3, 0)
        .size(Independent)
        .traits(F::START_LOCATION),
];

// ============================================================================
// Accessors
// ============================================================================

impl UnitType {
    /// Every unit type, in table order.
    pub fn all() -> impl Iterator<Item = UnitType> {
        UNIT_TYPES.iter().map(|u| u.unit_type)
    }

    /// Static data for this type.
    #[must_use]
    pub fn data(self) -> &'static UnitTypeData {
        &UNIT_TYPES[self as usize]
    }

    /// Look up a type by engine identifier.
    pub fn from_id(id: u16) -> Result<Self> {
        UNIT_TYPES
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.unit_type)
            .ok_or(QueryError::UnknownUnitType(id))
    }

    /// Look up a type by display name, ignoring case.
    pub fn from_name(name: &str) -> Result<Self> {
        UNIT_TYPES
            .iter()
            .find(|u| u.name.eq_ignore_ascii_case(name))
            .map(|u| u.unit_type)
            .ok_or_else(|| QueryError::UnknownName(name.to_string()))
    }

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.data().name
    }

    /// Owning race.
    #[must_use]
    pub fn race(self) -> Race {
        self.data().race
    }

    /// Trait flags.
    #[must_use]
    pub fn traits(self) -> TypeTraits {
        self.data().traits
    }

    /// Producer type, if the type can be produced at all.
    #[must_use]
    pub fn what_builds(self) -> Option<UnitType> {
        self.data().what_builds.map(|(producer, _)| producer)
    }

    /// Required unit types with counts.
    #[must_use]
    pub fn required_units(self) -> &'static [(UnitType, u32)] {
        self.data().required_units
    }

    /// Required tech, if any.
    #[must_use]
    pub fn required_tech(self) -> Option<TechType> {
        self.data().required_tech
    }

    /// Mineral price.
    #[must_use]
    pub fn mineral_price(self) -> i32 {
        self.data().mineral_price
    }

    /// Gas price.
    #[must_use]
    pub fn gas_price(self) -> i32 {
        self.data().gas_price
    }

    /// Supply consumed, in engine units.
    #[must_use]
    pub fn supply_required(self) -> i32 {
        self.data().supply_required
    }

    /// Supply provided, in engine units.
    #[must_use]
    pub fn supply_provided(self) -> i32 {
        self.data().supply_provided
    }

    /// Footprint width in tiles.
    #[must_use]
    pub fn tile_width(self) -> i32 {
        self.data().tile_width
    }

    /// Footprint height in tiles.
    #[must_use]
    pub fn tile_height(self) -> i32 {
        self.data().tile_height
    }

    /// Footprint size in tiles.
    #[must_use]
    pub fn tile_size(self) -> TilePosition {
        TilePosition::new(self.tile_width(), self.tile_height())
    }

    /// Size class.
    #[must_use]
    pub fn size(self) -> UnitSizeType {
        self.data().size
    }

    /// Base armor.
    #[must_use]
    pub fn armor(self) -> i32 {
        self.data().armor
    }

    /// Upgrade that raises armor.
    #[must_use]
    pub fn armor_upgrade(self) -> Option<UpgradeType> {
        self.data().armor_upgrade
    }

    /// Weapon against ground targets.
    #[must_use]
    pub fn ground_weapon(self) -> Option<WeaponType> {
        self.data().ground_weapon
    }

    /// Weapon against air targets.
    #[must_use]
    pub fn air_weapon(self) -> Option<WeaponType> {
        self.data().air_weapon
    }

    /// A structure.
    #[must_use]
    pub fn is_building(self) -> bool {
        self.traits().contains(TypeTraits::BUILDING)
    }

    /// Attaches to another structure.
    #[must_use]
    pub fn is_addon(self) -> bool {
        self.traits().contains(TypeTraits::ADDON)
    }

    /// Always airborne.
    #[must_use]
    pub fn is_flyer(self) -> bool {
        self.traits().contains(TypeTraits::FLYER)
    }

    /// Structure that can lift off.
    #[must_use]
    pub fn is_flying_building(self) -> bool {
        self.traits().contains(TypeTraits::FLYING_BUILDING)
    }

    /// Built on a geyser.
    #[must_use]
    pub fn is_refinery(self) -> bool {
        self.traits().contains(TypeTraits::REFINERY)
    }

    /// Accepts gathered resources.
    #[must_use]
    pub fn is_resource_depot(self) -> bool {
        self.traits().contains(TypeTraits::RESOURCE_DEPOT)
    }

    /// Must stand on creep.
    #[must_use]
    pub fn requires_creep(self) -> bool {
        self.traits().contains(TypeTraits::REQUIRES_CREEP)
    }

    /// Must stand in a power field.
    #[must_use]
    pub fn requires_psi(self) -> bool {
        self.traits().contains(TypeTraits::REQUIRES_PSI)
    }

    /// Moves under its own power.
    #[must_use]
    pub fn can_move(self) -> bool {
        self.traits().contains(TypeTraits::CAN_MOVE)
    }

    /// Spawns larva.
    #[must_use]
    pub fn produces_larva(self) -> bool {
        self.traits().contains(TypeTraits::PRODUCES_LARVA)
    }

    /// A mineral field.
    #[must_use]
    pub fn is_mineral_field(self) -> bool {
        self.traits().contains(TypeTraits::MINERAL_FIELD)
    }

    /// Two units per egg.
    #[must_use]
    pub fn is_two_units_in_one_egg(self) -> bool {
        self.traits().contains(TypeTraits::TWO_UNITS_IN_ONE_EGG)
    }

    /// Capture-the-flag beacon.
    #[must_use]
    pub fn is_flag_beacon(self) -> bool {
        self.traits().contains(TypeTraits::FLAG_BEACON)
    }

    /// Start-location marker.
    #[must_use]
    pub fn is_start_location(self) -> bool {
        self.traits().contains(TypeTraits::START_LOCATION)
    }

    /// Campaign hero.
    #[must_use]
    pub fn is_hero(self) -> bool {
        self.traits().contains(TypeTraits::HERO)
    }

    /// Holds harvestable resources.
    #[must_use]
    pub fn is_resource_container(self) -> bool {
        self.traits().contains(TypeTraits::RESOURCE_CONTAINER)
    }

    /// Gathers and constructs.
    #[must_use]
    pub fn is_worker(self) -> bool {
        self.traits().contains(TypeTraits::WORKER)
    }

    /// Whether a unit of this type can stand in for `other` when
    /// researching or upgrading.
    ///
    /// A morphed structure keeps the abilities of the structure it came from.
    #[must_use]
    pub fn is_successor_of(self, other: UnitType) -> bool {
        if self == other {
            return true;
        }
        matches!(
            (other, self),
            (UnitType::ZergHatchery, UnitType::ZergLair | UnitType::ZergHive)
                | (UnitType::ZergLair, UnitType::ZergHive)
                | (UnitType::ZergSpire, UnitType::ZergGreaterSpire)
        )
    }

    /// The standard type a hero variant produces like, or `self`.
    #[must_use]
    pub fn base_producer(self) -> UnitType {
        match self {
            UnitType::HeroGantrithor => UnitType::ProtossCarrier,
            UnitType::HeroWarbringer => UnitType::ProtossReaver,
            other => other,
        }
    }
}

impl std::fmt::Display for UnitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
