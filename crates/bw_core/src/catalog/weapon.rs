//! Weapon catalog.

use serde::{Deserialize, Serialize};

use super::damage::DamageType;
use super::upgrade::UpgradeType;
use crate::error::{QueryError, Result};

/// A weapon mounted on a unit type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeaponType {
    /// Marine rifle.
    GaussRifle,
    /// Ghost rifle.
    C10CanisterRifle,
    /// Vulture grenades.
    FragmentationGrenade,
    /// Goliath ground cannons.
    TwinAutocannons,
    /// Goliath anti-air missiles.
    HellfireMissilePack,
    /// Siege tank cannon.
    ArcliteCannon,
    /// SCV tool.
    FusionCutter,
    /// Wraith anti-air missiles.
    GeminiMissiles,
    /// Wraith ground lasers.
    BurstLasers,
    /// Battlecruiser ground battery.
    AtsLaserBattery,
    /// Battlecruiser air battery.
    AtaLaserBattery,
    /// Firebat flamer.
    FlameThrower,
    /// Missile turret launcher.
    LongboltMissile,
    /// Valkyrie rockets.
    HaloRockets,
    /// Zergling claws.
    Claws,
    /// Hydralisk spines.
    NeedleSpines,
    /// Ultralisk blades.
    KaiserBlades,
    /// Drone spit.
    ToxicSpores,
    /// Mutalisk bouncing attack.
    GlaveWurm,
    /// Spore colony anti-air.
    SeekerSpores,
    /// Sunken colony tentacle.
    SubterraneanTentacle,
    /// Scourge self-destruct.
    SuicideScourge,
    /// Lurker burrowed spines.
    SubterraneanSpines,
    /// Probe beam.
    ParticleBeam,
    /// Zealot blades.
    PsiBlades,
    /// Dragoon cannon.
    PhaseDisruptor,
    /// Dark templar blades.
    WarpBlades,
    /// Scout ground blasters.
    DualPhotonBlasters,
    /// Scout anti-air missiles.
    AntiMatterMissiles,
    /// Arbiter cannon.
    PhaseDisruptorCannon,
    /// Interceptor cannon.
    PulseCannon,
    /// Photon cannon vs ground.
    StsPhotonCannon,
    /// Photon cannon vs air.
    StaPhotonCannon,
    /// Reaver projectile.
    Scarab,
    /// Corsair splash anti-air.
    NeutronFlare,
}

/// Static data for a [`WeaponType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponTypeData {
    /// The weapon this row describes.
    pub weapon: WeaponType,
    /// Engine identifier.
    pub id: u16,
    /// Display name.
    pub name: &'static str,
    /// Base damage per projectile.
    pub damage_amount: i32,
    /// Damage added per level of [`Self::upgrade`].
    pub damage_bonus: i32,
    /// Projectiles per attack.
    pub damage_factor: i32,
    /// Damage type keyed into the ratio table.
    pub damage_type: DamageType,
    /// Upgrade that raises this weapon's damage.
    pub upgrade: Option<UpgradeType>,
}

const fn weapon(
    weapon: WeaponType,
    id: u16,
    name: &'static str,
    damage_amount: i32,
    damage_factor: i32,
    damage_type: DamageType,
) -> WeaponTypeData {
    WeaponTypeData {
        weapon,
        id,
        name,
        damage_amount,
        damage_bonus: 0,
        damage_factor,
        damage_type,
        upgrade: None,
    }
}

impl WeaponTypeData {
    const fn upgraded_by(mut self, upgrade: UpgradeType, bonus: i32) -> Self {
        self.upgrade = Some(upgrade);
        self.damage_bonus = bonus;
        self
    }
}

use DamageType::{Concussive, Explosive, Normal};
use UpgradeType as U;
use WeaponType as W;

static WEAPONS: [WeaponTypeData; WeaponType::ALL.len()] = [
    weapon(W::GaussRifle, 0, "Gauss Rifle", 6, 1, Normal).upgraded_by(U::TerranInfantryWeapons, 1),
    weapon(W::C10CanisterRifle, 2, "C-10 Canister Rifle", 10, 1, Concussive)
        .upgraded_by(U::TerranInfantryWeapons, 1),
    weapon(W::FragmentationGrenade, 4, "Fragmentation Grenade", 20, 1, Concussive)
        .upgraded_by(U::TerranVehicleWeapons, 2),
    weapon(W::TwinAutocannons, 8, "Twin Autocannons", 12, 1, Normal)
        .upgraded_by(U::TerranVehicleWeapons, 1),
    weapon(W::HellfireMissilePack, 10, "Hellfire Missile Pack", 10, 2, Explosive)
        .upgraded_by(U::TerranVehicleWeapons, 2),
    weapon(W::ArcliteCannon, 12, "Arclite Cannon", 30, 1, Explosive)
        .upgraded_by(U::TerranVehicleWeapons, 3),
    weapon(W::FusionCutter, 13, "Fusion Cutter", 5, 1, Normal),
    weapon(W::GeminiMissiles, 15, "Gemini Missiles", 20, 1, Explosive)
        .upgraded_by(U::TerranShipWeapons, 2),
    weapon(W::BurstLasers, 17, "Burst Lasers", 8, 1, Normal).upgraded_by(U::TerranShipWeapons, 1),
    weapon(W::AtsLaserBattery, 19, "ATS Laser Battery", 25, 1, Normal)
        .upgraded_by(U::TerranShipWeapons, 3),
    weapon(W::AtaLaserBattery, 21, "ATA Laser Battery", 25, 1, Normal)
        .upgraded_by(U::TerranShipWeapons, 3),
    weapon(W::FlameThrower, 23, "Flame Thrower", 8, 2, Concussive)
        .upgraded_by(U::TerranInfantryWeapons, 1),
    weapon(W::LongboltMissile, 29, "Longbolt Missile", 20, 1, Explosive),
    weapon(W::HaloRockets, 103, "Halo Rockets", 6, 1, Explosive)
        .upgraded_by(U::TerranShipWeapons, 1),
    weapon(W::Claws, 35, "Claws", 5, 1, Normal).upgraded_by(U::ZergMeleeAttacks, 1),
    weapon(W::NeedleSpines, 38, "Needle Spines", 10, 1, Explosive)
        .upgraded_by(U::ZergMissileAttacks, 1),
    weapon(W::KaiserBlades, 40, "Kaiser Blades", 20, 1, Normal).upgraded_by(U::ZergMeleeAttacks, 3),
    weapon(W::ToxicSpores, 42, "Toxic Spores", 5, 1, Normal),
    weapon(W::GlaveWurm, 48, "Glave Wurm", 9, 1, Normal).upgraded_by(U::ZergFlyerAttacks, 1),
    weapon(W::SeekerSpores, 52, "Seeker Spores", 15, 1, Normal),
    weapon(W::SubterraneanTentacle, 53, "Subterranean Tentacle", 40, 1, Explosive),
    weapon(W::SuicideScourge, 55, "Suicide Scourge", 110, 1, Normal),
    weapon(W::SubterraneanSpines, 109, "Subterranean Spines", 20, 1, Normal)
        .upgraded_by(U::ZergMissileAttacks, 2),
    weapon(W::ParticleBeam, 62, "Particle Beam", 5, 1, Normal),
    weapon(W::PsiBlades, 64, "Psi Blades", 8, 2, Normal).upgraded_by(U::ProtossGroundWeapons, 1),
    weapon(W::PhaseDisruptor, 66, "Phase Disruptor", 20, 1, Explosive)
        .upgraded_by(U::ProtossGroundWeapons, 2),
    weapon(W::WarpBlades, 111, "Warp Blades", 40, 1, Normal).upgraded_by(U::ProtossGroundWeapons, 3),
    weapon(W::DualPhotonBlasters, 72, "Dual Photon Blasters", 8, 1, Normal)
        .upgraded_by(U::ProtossAirWeapons, 1),
    weapon(W::AntiMatterMissiles, 73, "Anti-Matter Missiles", 14, 2, Explosive)
        .upgraded_by(U::ProtossAirWeapons, 1),
    weapon(W::PhaseDisruptorCannon, 75, "Phase Disruptor Cannon", 10, 1, Explosive)
        .upgraded_by(U::ProtossAirWeapons, 1),
    weapon(W::PulseCannon, 77, "Pulse Cannon", 6, 1, Normal).upgraded_by(U::ProtossAirWeapons, 1),
    weapon(W::StsPhotonCannon, 78, "STS Photon Cannon", 20, 1, Normal),
    weapon(W::StaPhotonCannon, 79, "STA Photon Cannon", 20, 1, Normal),
    weapon(W::Scarab, 80, "Scarab", 100, 1, Normal),
    weapon(W::NeutronFlare, 100, "Neutron Flare", 5, 1, Explosive)
        .upgraded_by(U::ProtossAirWeapons, 1),
];

impl WeaponType {
    /// Every weapon, in table order.
    pub const ALL: [WeaponType; 35] = [
        W::GaussRifle,
        W::C10CanisterRifle,
        W::FragmentationGrenade,
        W::TwinAutocannons,
        W::HellfireMissilePack,
        W::ArcliteCannon,
        W::FusionCutter,
        W::GeminiMissiles,
        W::BurstLasers,
        W::AtsLaserBattery,
        W::AtaLaserBattery,
        W::FlameThrower,
        W::LongboltMissile,
        W::HaloRockets,
        W::Claws,
        W::NeedleSpines,
        W::KaiserBlades,
        W::ToxicSpores,
        W::GlaveWurm,
        W::SeekerSpores,
        W::SubterraneanTentacle,
        W::SuicideScourge,
        W::SubterraneanSpines,
        W::ParticleBeam,
        W::PsiBlades,
        W::PhaseDisruptor,
        W::WarpBlades,
        W::DualPhotonBlasters,
        W::AntiMatterMissiles,
        W::PhaseDisruptorCannon,
        W::PulseCannon,
        W::StsPhotonCannon,
        W::StaPhotonCannon,
        W::Scarab,
        W::NeutronFlare,
    ];

    /// Static data for this weapon.
    #[must_use]
    pub fn data(self) -> &'static WeaponTypeData {
        &WEAPONS[self as usize]
    }

    /// Look up a weapon by engine identifier.
    pub fn from_id(id: u16) -> Result<Self> {
        WEAPONS
            .iter()
            .find(|w| w.id == id)
            .map(|w| w.weapon)
            .ok_or(QueryError::UnknownWeaponType(id))
    }

    /// Base damage per projectile.
    #[must_use]
    pub fn damage_amount(self) -> i32 {
        self.data().damage_amount
    }

    /// Projectiles per attack.
    #[must_use]
    pub fn damage_factor(self) -> i32 {
        self.data().damage_factor
    }

    /// Damage per upgrade level.
    #[must_use]
    pub fn damage_bonus(self) -> i32 {
        self.data().damage_bonus
    }

    /// Damage type.
    #[must_use]
    pub fn damage_type(self) -> DamageType {
        self.data().damage_type
    }

    /// Upgrade raising this weapon's damage.
    #[must_use]
    pub fn upgrade(self) -> Option<UpgradeType> {
        self.data().upgrade
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
        for weapon in WeaponType::ALL {
            assert_eq!(weapon.data().weapon, weapon, "table row out of order for {weapon:?}");
        }
    }

    #[test]
    fn test_ids_round_trip() {
        for weapon in WeaponType::ALL {
            assert_eq!(WeaponType::from_id(weapon.data().id), Ok(weapon));
        }
    }

    #[test]
    fn test_unknown_id_is_error() {
        assert_eq!(WeaponType::from_id(9999), Err(QueryError::UnknownWeaponType(9999)));
    }
}
