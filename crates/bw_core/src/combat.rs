//! Per-hit damage resolution.
//!
//! A single hit is resolved in three steps: the attacker's weapon damage
//! (with its owner's weapon upgrades), minus the target's armor (with its
//! owner's armor upgrades) unless the damage type ignores armor, then
//! scaled by the damage type's ratio against the target's size class.
//!
//! All arithmetic is integer. The ratio table is out of 256 and the final
//! division truncates.

use crate::catalog::{DamageType, UnitSizeType, UnitType, UpgradeType, WeaponType, DAMAGE_RATIO_SCALE};
use crate::client::EngineClient;
use crate::game::Game;
use crate::snapshot::{Player, PlayerId};

/// Extra armor per Chitinous Plating level, for Ultralisks only.
pub const CHITINOUS_PLATING_ARMOR: i32 = 2;

/// Damage dealt by one hit of `damage` raw damage against `armor`.
///
/// Never negative.
#[must_use]
pub fn hit_damage(damage: i32, armor: i32, damage_type: DamageType, size: UnitSizeType) -> i32 {
    let through = if damage_type.ignores_armor() {
        damage
    } else {
        damage - armor
    };
    through.max(0) * damage_type.ratio_vs(size) / DAMAGE_RATIO_SCALE
}

/// Raw damage per hit of `weapon` with `player`'s weapon upgrades.
#[must_use]
pub fn weapon_damage(weapon: WeaponType, player: Option<&Player>) -> i32 {
    let level = match (player, weapon.upgrade()) {
        (Some(player), Some(upgrade)) => player.upgrade_level(upgrade),
        _ => 0,
    };
    (weapon.damage_amount() + weapon.damage_bonus() * level) * weapon.damage_factor()
}

/// Armor of `unit_type` with `player`'s armor upgrades.
#[must_use]
pub fn unit_armor(unit_type: UnitType, player: Option<&Player>) -> i32 {
    let Some(player) = player else {
        return unit_type.armor();
    };
    let mut armor = unit_type.armor() + unit_type.armor_upgrade().map_or(0, |u| player.upgrade_level(u));
    if unit_type == UnitType::ZergUltralisk {
        armor += CHITINOUS_PLATING_ARMOR * player.upgrade_level(UpgradeType::ChitinousPlating);
    }
    armor
}

impl<C: EngineClient> Game<C> {
    /// Damage of one hit from a `from_type` to a `to_type`.
    ///
    /// The attacker uses its air weapon against flyers and its ground weapon
    /// otherwise; without a usable weapon the damage is zero. Players that
    /// are `None` or unknown contribute no upgrades.
    #[must_use]
    pub fn damage_between(
        &self,
        from_type: UnitType,
        to_type: UnitType,
        from_player: Option<PlayerId>,
        to_player: Option<PlayerId>,
    ) -> i32 {
        let weapon = if to_type.is_flyer() {
            from_type.air_weapon()
        } else {
            from_type.ground_weapon()
        };
        let Some(weapon) = weapon else {
            return 0;
        };

        let attacker = from_player.and_then(|id| self.player(id));
        let defender = to_player.and_then(|id| self.player(id));
        hit_damage(
            weapon_damage(weapon, attacker),
            unit_armor(to_type, defender),
            weapon.damage_type(),
            to_type.size(),
        )
    }

    /// [`Self::damage_between`] with the target owned by the local player
    /// unless `to_player` says otherwise.
    #[must_use]
    pub fn damage_from(
        &self,
        from_type: UnitType,
        to_type: UnitType,
        from_player: Option<PlayerId>,
        to_player: Option<PlayerId>,
    ) -> i32 {
        let to_player = to_player.or(self.snapshot().self_player);
        self.damage_between(from_type, to_type, from_player, to_player)
    }

    /// [`Self::damage_between`] with the attacker owned by the local player
    /// unless `from_player` says otherwise.
    #[must_use]
    pub fn damage_to(
        &self,
        to_type: UnitType,
        from_type: UnitType,
        to_player: Option<PlayerId>,
        from_player: Option<PlayerId>,
    ) -> i32 {
        let from_player = from_player.or(self.snapshot().self_player);
        self.damage_between(from_type, to_type, from_player, to_player)
    }
}
