//! Researchable tech catalog.

use serde::{Deserialize, Serialize};

use super::race::Race;
use super::unit_type::UnitType;
use crate::error::{QueryError, Result};

/// A one-shot research.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum TechType {
    Stimpacks,
    Lockdown,
    EmpShockwave,
    SpiderMines,
    TankSiegeMode,
    Irradiate,
    YamatoGun,
    CloakingField,
    PersonnelCloaking,
    Restoration,
    OpticalFlare,
    Burrowing,
    SpawnBroodlings,
    Plague,
    Consume,
    Ensnare,
    LurkerAspect,
    PsionicStorm,
    Hallucination,
    Recall,
    StasisField,
    DisruptionWeb,
    MindControl,
    Maelstrom,
}

/// Static data for a [`TechType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TechTypeData {
    /// The tech this row describes.
    pub tech: TechType,
    /// Engine identifier.
    pub id: u16,
    /// Display name.
    pub name: &'static str,
    /// Owning race.
    pub race: Race,
    /// Mineral price.
    pub mineral_price: i32,
    /// Gas price.
    pub gas_price: i32,
    /// Structure that performs the research.
    pub what_researches: UnitType,
    /// Additional structure that must exist.
    pub required_unit: Option<UnitType>,
}

const fn tech(
    tech: TechType,
    id: u16,
    name: &'static str,
    race: Race,
    what_researches: UnitType,
    price: i32,
) -> TechTypeData {
    TechTypeData {
        tech,
        id,
        name,
        race,
        mineral_price: price,
        gas_price: price,
        what_researches,
        required_unit: None,
    }
}

use Race::{Protoss, Terran, Zerg};
use TechType as X;
use UnitType as T;

static TECHS: &[TechTypeData] = &[
    tech(X::Stimpacks, 0, "Stim Packs", Terran, T::TerranAcademy, 100),
    tech(X::Lockdown, 1, "Lockdown", Terran, T::TerranCovertOps, 200),
    tech(X::EmpShockwave, 2, "EMP Shockwave", Terran, T::TerranScienceFacility, 200),
    tech(X::SpiderMines, 3, "Spider Mines", Terran, T::TerranMachineShop, 100),
    tech(X::TankSiegeMode, 5, "Tank Siege Mode", Terran, T::TerranMachineShop, 150),
    tech(X::Irradiate, 7, "Irradiate", Terran, T::TerranScienceFacility, 200),
    tech(X::YamatoGun, 8, "Yamato Gun", Terran, T::TerranPhysicsLab, 100),
    tech(X::CloakingField, 9, "Cloaking Field", Terran, T::TerranControlTower, 150),
    tech(X::PersonnelCloaking, 10, "Personnel Cloaking", Terran, T::TerranCovertOps, 100),
    tech(X::Restoration, 24, "Restoration", Terran, T::TerranAcademy, 100),
    tech(X::OpticalFlare, 30, "Optical Flare", Terran, T::TerranAcademy, 100),
    tech(X::Burrowing, 11, "Burrowing", Zerg, T::ZergHatchery, 100),
    tech(X::SpawnBroodlings, 13, "Spawn Broodlings", Zerg, T::ZergQueensNest, 100),
    tech(X::Plague, 15, "Plague", Zerg, T::ZergDefilerMound, 200),
    tech(X::Consume, 16, "Consume", Zerg, T::ZergDefilerMound, 100),
    tech(X::Ensnare, 17, "Ensnare", Zerg, T::ZergQueensNest, 100),
    TechTypeData {
        required_unit: Some(T::ZergLair),
        ..tech(X::LurkerAspect, 32, "Lurker Aspect", Zerg, T::ZergHydraliskDen, 200)
    },
    tech(X::PsionicStorm, 19, "Psionic Storm", Protoss, T::ProtossTemplarArchives, 200),
    tech(X::Hallucination, 20, "Hallucination", Protoss, T::ProtossTemplarArchives, 150),
    tech(X::Recall, 21, "Recall", Protoss, T::ProtossArbiterTribunal, 150),
    tech(X::StasisField, 22, "Stasis Field", Protoss, T::ProtossArbiterTribunal, 150),
    tech(X::DisruptionWeb, 25, "Disruption Web", Protoss, T::ProtossFleetBeacon, 200),
    tech(X::MindControl, 27, "Mind Control", Protoss, T::ProtossTemplarArchives, 200),
    tech(X::Maelstrom, 31, "Maelstrom", Protoss, T::ProtossTemplarArchives, 100),
];

impl TechType {
    /// Every tech, in table order.
    pub fn all() -> impl Iterator<Item = TechType> {
        TECHS.iter().map(|t| t.tech)
    }

    /// Static data for this tech.
    #[must_use]
    pub fn data(self) -> &'static TechTypeData {
        &TECHS[self as usize]
    }

    /// Look up a tech by engine identifier.
    pub fn from_id(id: u16) -> Result<Self> {
        TECHS
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.tech)
            .ok_or(QueryError::UnknownTechType(id))
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

    /// Structure that performs the research.
    #[must_use]
    pub fn what_researches(self) -> UnitType {
        self.data().what_researches
    }

    /// Additional structure that must exist, if any.
    #[must_use]
    pub fn required_unit(self) -> Option<UnitType> {
        self.data().required_unit
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
        for (index, row) in TECHS.iter().enumerate() {
            assert_eq!(row.tech as usize, index, "table row out of order for {:?}", row.tech);
        }
    }

    #[test]
    fn test_lurker_aspect_needs_lair() {
        assert_eq!(TechType::LurkerAspect.required_unit(), Some(UnitType::ZergLair));
        assert_eq!(TechType::LurkerAspect.what_researches(), UnitType::ZergHydraliskDen);
        assert_eq!(TechType::Stimpacks.required_unit(), None);
    }

    #[test]
    fn test_from_id() {
        assert_eq!(TechType::from_id(5), Ok(TechType::TankSiegeMode));
        assert_eq!(TechType::from_id(26), Err(QueryError::UnknownTechType(26)));
    }
}
