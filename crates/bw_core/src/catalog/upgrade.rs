//! Upgrade catalog.

use serde::{Deserialize, Serialize};

use super::race::Race;
use super::unit_type::UnitType;
use crate::error::{QueryError, Result};

/// A levelled player upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum UpgradeType {
    TerranInfantryArmor,
    TerranVehiclePlating,
    TerranShipPlating,
    ZergCarapace,
    ZergFlyerCarapace,
    ProtossGroundArmor,
    ProtossAirArmor,
    TerranInfantryWeapons,
    TerranVehicleWeapons,
    TerranShipWeapons,
    ZergMeleeAttacks,
    ZergMissileAttacks,
    ZergFlyerAttacks,
    ProtossGroundWeapons,
    ProtossAirWeapons,
    ProtossPlasmaShields,
    U238Shells,
    IonThrusters,
    CharonBoosters,
    PneumatizedCarapace,
    MetabolicBoost,
    AdrenalGlands,
    MuscularAugments,
    GroovedSpines,
    AnabolicSynthesis,
    ChitinousPlating,
    SingularityCharge,
    LegEnhancements,
    ReaverCapacity,
    CarrierCapacity,
}

/// Static data for an [`UpgradeType`].
///
/// Prices for level `n` are `base + factor * (n - 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeTypeData {
    /// The upgrade this row describes.
    pub upgrade: UpgradeType,
    /// Engine identifier.
    pub id: u16,
    /// Display name.
    pub name: &'static str,
    /// Owning race.
    pub race: Race,
    /// Mineral price of level 1.
    pub mineral_base: i32,
    /// Mineral increase per further level.
    pub mineral_factor: i32,
    /// Gas price of level 1.
    pub gas_base: i32,
    /// Gas increase per further level.
    pub gas_factor: i32,
    /// Highest level reachable under standard rules.
    pub max_repeats: i32,
    /// Structure that performs the upgrade.
    pub what_upgrades: UnitType,
    /// Extra structure needed for levels 1, 2 and 3.
    pub whats_required: [Option<UnitType>; 3],
}

impl UpgradeTypeData {
    const fn new(
        upgrade: UpgradeType,
        id: u16,
        name: &'static str,
        race: Race,
        what_upgrades: UnitType,
        minerals: i32,
        gas: i32,
    ) -> Self {
        Self {
            upgrade,
            id,
            name,
            race,
            mineral_base: minerals,
            mineral_factor: 0,
            gas_base: gas,
            gas_factor: 0,
            max_repeats: 1,
            what_upgrades,
            whats_required: [None; 3],
        }
    }

    /// Three levels with a per-level price step and the same requirement
    /// for levels 2 and 3.
    const fn levelled(mut self, mineral_factor: i32, gas_factor: i32, later: UnitType) -> Self {
        self.max_repeats = 3;
        self.mineral_factor = mineral_factor;
        self.gas_factor = gas_factor;
        self.whats_required = [None, Some(later), Some(later)];
        self
    }

    const fn required_by_level(mut self, level_two: UnitType, level_three: UnitType) -> Self {
        self.whats_required = [self.whats_required[0], Some(level_two), Some(level_three)];
        self
    }

    const fn requires(mut self, unit_type: UnitType) -> Self {
        self.whats_required = [Some(unit_type), self.whats_required[1], self.whats_required[2]];
        self
    }
}

use Race::{Protoss, Terran, Zerg};
use UnitType as T;
use UpgradeType as U;
use UpgradeTypeData as D;

static UPGRADES: &[UpgradeTypeData] = &[
    D::new(U::TerranInfantryArmor, 0, "Terran Infantry Armor", Terran, T::TerranEngineeringBay, 100, 100)
        .levelled(75, 75, T::TerranScienceFacility),
    D::new(U::TerranVehiclePlating, 1, "Terran Vehicle Plating", Terran, T::TerranArmory, 100, 100)
        .levelled(75, 75, T::TerranScienceFacility),
    D::new(U::TerranShipPlating, 2, "Terran Ship Plating", Terran, T::TerranArmory, 150, 150)
        .levelled(75, 75, T::TerranScienceFacility),
    D::new(U::ZergCarapace, 3, "Zerg Carapace", Zerg, T::ZergEvolutionChamber, 150, 150)
        .levelled(75, 75, T::ZergLair)
        .required_by_level(T::ZergLair, T::ZergHive),
    D::new(U::ZergFlyerCarapace, 4, "Zerg Flyer Carapace", Zerg, T::ZergSpire, 150, 150)
        .levelled(75, 75, T::ZergLair)
        .required_by_level(T::ZergLair, T::ZergHive),
    D::new(U::ProtossGroundArmor, 5, "Protoss Ground Armor", Protoss, T::ProtossForge, 100, 100)
        .levelled(75, 75, T::ProtossTemplarArchives),
    D::new(U::ProtossAirArmor, 6, "Protoss Air Armor", Protoss, T::ProtossCyberneticsCore, 150, 150)
        .levelled(75, 75, T::ProtossFleetBeacon),
    D::new(U::TerranInfantryWeapons, 7, "Terran Infantry Weapons", Terran, T::TerranEngineeringBay, 100, 100)
        .levelled(75, 75, T::TerranScienceFacility),
    D::new(U::TerranVehicleWeapons, 8, "Terran Vehicle Weapons", Terran, T::TerranArmory, 100, 100)
        .levelled(75, 75, T::TerranScienceFacility),
    D::new(U::TerranShipWeapons, 9, "Terran Ship Weapons", Terran, T::TerranArmory, 100, 100)
        .levelled(50, 50, T::TerranScienceFacility),
    D::new(U::ZergMeleeAttacks, 10, "Zerg Melee Attacks", Zerg, T::ZergEvolutionChamber, 100, 100)
        .levelled(50, 50, T::ZergLair)
        .required_by_level(T::ZergLair, T::ZergHive),
    D::new(U::ZergMissileAttacks, 11, "Zerg Missile Attacks", Zerg, T::ZergEvolutionChamber, 100, 100)
        .levelled(50, 50, T::ZergLair)
        .required_by_level(T::ZergLair, T::ZergHive),
    D::new(U::ZergFlyerAttacks, 12, "Zerg Flyer Attacks", Zerg, T::ZergSpire, 100, 100)
        .levelled(75, 75, T::ZergLair)
        .required_by_level(T::ZergLair, T::ZergHive),
    D::new(U::ProtossGroundWeapons, 13, "Protoss Ground Weapons", Protoss, T::ProtossForge, 100, 100)
        .levelled(50, 50, T::ProtossTemplarArchives),
    D::new(U::ProtossAirWeapons, 14, "Protoss Air Weapons", Protoss, T::ProtossCyberneticsCore, 100, 100)
        .levelled(75, 75, T::ProtossFleetBeacon),
    D::new(U::ProtossPlasmaShields, 15, "Protoss Plasma Shields", Protoss, T::ProtossForge, 200, 200)
        .levelled(100, 100, T::ProtossCyberneticsCore),
    D::new(U::U238Shells, 16, "U-238 Shells", Terran, T::TerranAcademy, 150, 150),
    D::new(U::IonThrusters, 17, "Ion Thrusters", Terran, T::TerranMachineShop, 100, 100),
    D::new(U::CharonBoosters, 54, "Charon Boosters", Terran, T::TerranMachineShop, 100, 100)
        .requires(T::TerranArmory),
    D::new(U::PneumatizedCarapace, 26, "Pneumatized Carapace", Zerg, T::ZergLair, 150, 150),
    D::new(U::MetabolicBoost, 27, "Metabolic Boost", Zerg, T::ZergSpawningPool, 100, 100),
    D::new(U::AdrenalGlands, 28, "Adrenal Glands", Zerg, T::ZergSpawningPool, 200, 200)
        .requires(T::ZergHive),
    D::new(U::MuscularAugments, 29, "Muscular Augments", Zerg, T::ZergHydraliskDen, 150, 150)
        .requires(T::ZergLair),
    D::new(U::GroovedSpines, 30, "Grooved Spines", Zerg, T::ZergHydraliskDen, 150, 150)
        .requires(T::ZergLair),
    D::new(U::AnabolicSynthesis, 53, "Anabolic Synthesis", Zerg, T::ZergUltraliskCavern, 200, 200),
    D::new(U::ChitinousPlating, 52, "Chitinous Plating", Zerg, T::ZergUltraliskCavern, 150, 150),
    D::new(U::SingularityCharge, 33, "Singularity Charge", Protoss, T::ProtossCyberneticsCore, 150, 150),
    D::new(U::LegEnhancements, 34, "Leg Enhancements", Protoss, T::ProtossCitadelOfAdun, 150, 150),
    D::new(U::ReaverCapacity, 36, "Reaver Capacity", Protoss, T::ProtossRoboticsSupportBay, 200, 200),
    D::new(U::CarrierCapacity, 43, "Carrier Capacity", Protoss, T::ProtossFleetBeacon, 100, 100),
];

impl UpgradeType {
    /// Every upgrade, in table order.
    pub fn all() -> impl Iterator<Item = UpgradeType> {
        UPGRADES.iter().map(|u| u.upgrade)
    }

    /// Static data for this upgrade.
    #[must_use]
    pub fn data(self) -> &'static UpgradeTypeData {
        &UPGRADES[self as usize]
    }

    /// Look up an upgrade by engine identifier.
    pub fn from_id(id: u16) -> Result<Self> {
        UPGRADES
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.upgrade)
            .ok_or(QueryError::UnknownUpgradeType(id))
    }

    /// Mineral price of the given level (1-based).
    #[must_use]
    pub fn mineral_price(self, level: i32) -> i32 {
        let data = self.data();
        data.mineral_base + data.mineral_factor * (level - 1).max(0)
    }

    /// Gas price of the given level (1-based).
    #[must_use]
    pub fn gas_price(self, level: i32) -> i32 {
        let data = self.data();
        data.gas_base + data.gas_factor * (level - 1).max(0)
    }

    /// Structure that must exist to research the given level (1-based).
    #[must_use]
    pub fn whats_required(self, level: i32) -> Option<UnitType> {
        let index = usize::try_from(level - 1).ok()?;
        self.data().whats_required.get(index).copied().flatten()
    }

    /// Highest level under standard rules.
    #[must_use]
    pub fn max_repeats(self) -> i32 {
        self.data().max_repeats
    }

    /// Structure that performs the upgrade.
    #[must_use]
    pub fn what_upgrades(self) -> UnitType {
        self.data().what_upgrades
    }

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.data().name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_enum() {
        for (index, row) in UPGRADES.iter().enumerate() {
            assert_eq!(row.upgrade as usize, index, "table row out of order for {:?}", row.upgrade);
        }
    }

    #[test]
    fn test_level_prices() {
        let armor = UpgradeType::TerranInfantryArmor;
        assert_eq!(armor.mineral_price(1), 100);
        assert_eq!(armor.mineral_price(2), 175);
        assert_eq!(armor.gas_price(3), 250);
    }

    #[test]
    fn test_level_requirements() {
        let carapace = UpgradeType::ZergCarapace;
        assert_eq!(carapace.whats_required(1), None);
        assert_eq!(carapace.whats_required(2), Some(UnitType::ZergLair));
        assert_eq!(carapace.whats_required(3), Some(UnitType::ZergHive));
        assert_eq!(carapace.whats_required(4), None);
        assert_eq!(carapace.whats_required(0), None);
    }

    #[test]
    fn test_from_id() {
        assert_eq!(UpgradeType::from_id(43), Ok(UpgradeType::CarrierCapacity));
        assert_eq!(UpgradeType::from_id(999), Err(QueryError::UnknownUpgradeType(999)));
    }
}
