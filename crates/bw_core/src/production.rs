//! Production legality.
//!
//! Answers "could the local player start making this right now?" from the
//! current snapshot alone. The checks run in the engine's order and
//! [`Game::production_failure`] reports the first one that fails.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{TechType, UnitType, UpgradeType};
use crate::client::EngineClient;
use crate::game::Game;
use crate::snapshot::{Player, Unit, UnitId};

/// Interceptors a carrier holds before Carrier Capacity.
pub const CARRIER_BASE_CAPACITY: u32 = 4;

/// Scarabs a reaver holds before Reaver Capacity.
pub const REAVER_BASE_CAPACITY: u32 = 5;

/// Why the local player cannot start a production, research or upgrade.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum LegalityFailure {
    /// The snapshot has no local player.
    #[error("no local player")]
    NoLocalPlayer,

    /// Custom game rules disable the type or tech.
    #[error("disabled by game rules")]
    Unavailable,

    /// The unit belongs to someone else.
    #[error("unit {unit} is not ours")]
    NotOwner {
        /// The unit.
        unit: UnitId,
    },

    /// The unit's type cannot produce, research or upgrade this.
    #[error("unit {unit} is the wrong type")]
    WrongProducer {
        /// The unit.
        unit: UnitId,
    },

    /// A larva producer has no larva left.
    #[error("unit {unit} has no larva")]
    NoLarva {
        /// The producer.
        unit: UnitId,
    },

    /// A nydus canal is unfinished or already has an exit.
    #[error("nydus canal {unit} cannot open another exit")]
    NydusUnavailable {
        /// The canal.
        unit: UnitId,
    },

    /// A carrier or reaver is full.
    #[error("unit {unit} is at capacity ({max})")]
    CapacityFull {
        /// The carrier or reaver.
        unit: UnitId,
        /// Its current capacity.
        max: u32,
    },

    /// Not enough minerals.
    #[error("needs {need} minerals, has {have}")]
    Minerals {
        /// Price.
        need: i32,
        /// Stock.
        have: i32,
    },

    /// Not enough gas.
    #[error("needs {need} gas, has {have}")]
    Gas {
        /// Price.
        need: i32,
        /// Stock.
        have: i32,
    },

    /// Not enough free supply.
    #[error("needs {need} supply, {free} free")]
    Supply {
        /// Supply after the producer's own is returned.
        need: i32,
        /// Total minus used.
        free: i32,
    },

    /// A prerequisite structure or unit is missing.
    #[error("requires {count} completed {unit_type}")]
    MissingUnit {
        /// The prerequisite.
        unit_type: UnitType,
        /// How many are needed.
        count: u32,
    },

    /// A prerequisite tech is unresearched.
    #[error("requires {tech:?}")]
    MissingTech {
        /// The tech.
        tech: TechType,
    },

    /// The producer lacks the addon the type needs.
    #[error("unit {unit} lacks a {addon}")]
    MissingAddon {
        /// The producer.
        unit: UnitId,
        /// The addon type.
        addon: UnitType,
    },

    /// The unit is lifted, busy or unfinished.
    #[error("unit {unit} cannot take orders now")]
    UnitBusy {
        /// The unit.
        unit: UnitId,
    },

    /// Already being researched or upgraded.
    #[error("already in progress")]
    InProgress,

    /// Already researched.
    #[error("already researched")]
    AlreadyResearched,

    /// Upgrade already at the highest level the rules allow.
    #[error("already at level {level}")]
    MaxLevel {
        /// Current level.
        level: i32,
    },
}

/// Shorthand for early returns in the legality checks.
pub(crate) type Legality = std::result::Result<(), LegalityFailure>;

pub(crate) fn afford(player: &Player, minerals: i32, gas: i32) -> Legality {
    if player.minerals < minerals {
        return Err(LegalityFailure::Minerals {
            need: minerals,
            have: player.minerals,
        });
    }
    if player.gas < gas {
        return Err(LegalityFailure::Gas {
            need: gas,
            have: player.gas,
        });
    }
    Ok(())
}

impl<C: EngineClient> Game<C> {
    /// Whether the local player can make `unit_type`, optionally from `builder`.
    #[must_use]
    pub fn can_make(&self, unit_type: UnitType, builder: Option<&Unit>) -> bool {
        self.production_failure(unit_type, builder).is_none()
    }

    /// The first production rule that fails, if any.
    #[must_use]
    pub fn production_failure(&self, unit_type: UnitType, builder: Option<&Unit>) -> Option<LegalityFailure> {
        let failure = self.check_production(unit_type, builder).err();
        if let Some(failure) = &failure {
            tracing::trace!("Cannot make {unit_type}: {failure}");
        }
        failure
    }

    fn check_production(&self, unit_type: UnitType, builder: Option<&Unit>) -> Legality {
        let me = self.self_player().ok_or(LegalityFailure::NoLocalPlayer)?;
        if !me.is_unit_available(unit_type) {
            return Err(LegalityFailure::Unavailable);
        }

        let required_type = unit_type.what_builds();
        if let Some(builder) = builder {
            if builder.player != me.id {
                return Err(LegalityFailure::NotOwner { unit: builder.id });
            }

            if unit_type == UnitType::ZergNydusCanal && builder.unit_type == UnitType::ZergNydusCanal {
                return if builder.is_completed() && builder.nydus_exit.is_none() {
                    Ok(())
                } else {
                    Err(LegalityFailure::NydusUnavailable { unit: builder.id })
                };
            }

            if required_type == Some(UnitType::ZergLarva) && builder.unit_type.produces_larva() {
                if builder.larva_count == 0 {
                    return Err(LegalityFailure::NoLarva { unit: builder.id });
                }
            } else if Some(builder.unit_type.base_producer()) != required_type {
                return Err(LegalityFailure::WrongProducer { unit: builder.id });
            }

            check_capacity(me, builder)?;
        }

        afford(me, unit_type.mineral_price(), unit_type.gas_price())?;
        self.check_supply(me, unit_type, required_type)?;

        let mut addon = None;
        for &(required, count) in unit_type.required_units() {
            if required.is_addon() {
                addon = Some(required);
            }
            if !self.has_unit_type_requirement(me.id, Some(required), count) {
                return Err(LegalityFailure::MissingUnit {
                    unit_type: required,
                    count,
                });
            }
        }

        if let Some(tech) = unit_type.required_tech() {
            if !me.has_researched(tech) {
                return Err(LegalityFailure::MissingTech { tech });
            }
        }

        match (builder, addon) {
            (Some(builder), Some(addon)) if addon.what_builds() == required_type => {
                let attached = builder.addon.and_then(|id| self.unit(id)).map(|a| a.unit_type);
                if attached == Some(addon) {
                    Ok(())
                } else {
                    Err(LegalityFailure::MissingAddon { unit: builder.id, addon })
                }
            }
            _ => Ok(()),
        }
    }

    fn check_supply(&self, me: &Player, unit_type: UnitType, required_type: Option<UnitType>) -> Legality {
        let race = unit_type.race();
        let per_egg = if unit_type.is_two_units_in_one_egg() { 2 } else { 1 };
        let supply_required = unit_type.supply_required() * per_egg;
        if supply_required <= 0 {
            return Ok(());
        }
        // Morphing from a same-race unit hands its supply back.
        let returned = required_type
            .filter(|producer| producer.race() == race)
            .map_or(0, |producer| producer.supply_required());
        let need = supply_required - returned;
        let free = me.supply_total(race) - me.supply_used(race);
        if free < need {
            return Err(LegalityFailure::Supply { need, free });
        }
        Ok(())
    }
}

fn check_capacity(me: &Player, builder: &Unit) -> Legality {
    let (base, upgrade, stored) = match builder.unit_type.base_producer() {
        UnitType::ProtossCarrier => (CARRIER_BASE_CAPACITY, UpgradeType::CarrierCapacity, builder.interceptor_count),
        UnitType::ProtossReaver => (REAVER_BASE_CAPACITY, UpgradeType::ReaverCapacity, builder.scarab_count),
        _ => return Ok(()),
    };
    let max = if me.upgrade_level(upgrade) > 0 || builder.unit_type.is_hero() {
        base * 2
    } else {
        base
    };
    if stored + builder.training_queue.len() as u32 >= max {
        return Err(LegalityFailure::CapacityFull { unit: builder.id, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Race;
    use crate::position::{Position, TilePosition};
    use crate::snapshot::{MapData, PlayerId, Snapshot, UnitFlags};

    const ME: PlayerId = PlayerId(0);
    const THEM: PlayerId = PlayerId(1);

    fn player(race: Race) -> Player {
        let mut me = Player::new(ME, "me", race);
        me.minerals = 1000;
        me.gas = 1000;
        me.supply_total = [400, 400, 400];
        me
    }

    fn game_with(me: Player, units: Vec<Unit>) -> Game {
        let mut snap = Snapshot::new(MapData::new(64, 64).unwrap());
        snap.insert_player(me);
        snap.insert_player(Player::new(THEM, "them", Race::Zerg));
        snap.self_player = Some(ME);
        for unit in units {
            snap.insert_unit(unit, true);
        }
        Game::from_snapshot(snap)
    }

    fn building(id: u32, unit_type: UnitType, x: i32) -> Unit {
        Unit::at_tile(UnitId(id), unit_type, ME, TilePosition::new(x, 2))
    }

    #[test]
    fn test_no_local_player() {
        let snap = Snapshot::new(MapData::new(8, 8).unwrap());
        let game = Game::from_snapshot(snap);
        assert_eq!(
            game.production_failure(UnitType::TerranMarine, None),
            Some(LegalityFailure::NoLocalPlayer)
        );
    }

    #[test]
    fn test_marine_from_barracks() {
        let barracks = building(1, UnitType::TerranBarracks, 2);
        let game = game_with(player(Race::Terran), vec![barracks.clone()]);
        assert!(game.can_make(UnitType::TerranMarine, None));
        assert!(game.can_make(UnitType::TerranMarine, Some(&barracks)));
    }

    #[test]
    fn test_missing_prerequisite() {
        let game = game_with(player(Race::Terran), Vec::new());
        assert_eq!(
            game.production_failure(UnitType::TerranMarine, None),
            Some(LegalityFailure::MissingUnit {
                unit_type: UnitType::TerranBarracks,
                count: 1
            })
        );
    }

    #[test]
    fn test_incomplete_prerequisite_does_not_count() {
        let barracks = building(1, UnitType::TerranBarracks, 2).with_flags(UnitFlags::EXISTS | UnitFlags::VISIBLE);
        let game = game_with(player(Race::Terran), vec![barracks]);
        assert!(!game.can_make(UnitType::TerranMarine, None));
    }

    #[test]
    fn test_builder_must_be_ours_and_right_type() {
        let mut theirs = building(1, UnitType::TerranBarracks, 2);
        theirs.player = THEM;
        let factory = building(2, UnitType::TerranFactory, 8);
        let barracks = building(3, UnitType::TerranBarracks, 14);
        let game = game_with(player(Race::Terran), vec![theirs.clone(), factory.clone(), barracks]);

        assert_eq!(
            game.production_failure(UnitType::TerranMarine, Some(&theirs)),
            Some(LegalityFailure::NotOwner { unit: UnitId(1) })
        );
        assert_eq!(
            game.production_failure(UnitType::TerranMarine, Some(&factory)),
            Some(LegalityFailure::WrongProducer { unit: UnitId(2) })
        );
    }

    #[test]
    fn test_resources() {
        let barracks = building(1, UnitType::TerranBarracks, 2);
        let mut me = player(Race::Terran);
        me.minerals = 49;
        let game = game_with(me, vec![barracks]);
        assert_eq!(
            game.production_failure(UnitType::TerranMarine, None),
            Some(LegalityFailure::Minerals { need: 50, have: 49 })
        );
    }

    #[test]
    fn test_supply_is_checked_per_race() {
        let barracks = building(1, UnitType::TerranBarracks, 2);
        let mut me = player(Race::Terran);
        me.supply_total = [400, 20, 400];
        me.supply_used = [0, 19, 0];
        let game = game_with(me, vec![barracks]);
        assert_eq!(
            game.production_failure(UnitType::TerranMarine, None),
            Some(LegalityFailure::Supply { need: 2, free: 1 })
        );
    }

    #[test]
    fn test_zerglings_need_supply_for_two() {
        let mut hatchery = building(1, UnitType::ZergHatchery, 2);
        hatchery.larva_count = 1;
        let pool = building(2, UnitType::ZergSpawningPool, 8);
        let mut me = player(Race::Zerg);
        me.supply_total = [10, 400, 400];
        me.supply_used = [9, 0, 0];
        let game = game_with(me, vec![hatchery.clone(), pool]);
        assert_eq!(
            game.production_failure(UnitType::ZergZergling, Some(&hatchery)),
            Some(LegalityFailure::Supply { need: 2, free: 1 })
        );
    }

    #[test]
    fn test_larva_requirement() {
        let hatchery = building(1, UnitType::ZergHatchery, 2);
        let pool = building(2, UnitType::ZergSpawningPool, 8);
        let game = game_with(player(Race::Zerg), vec![hatchery.clone(), pool.clone()]);
        assert_eq!(
            game.production_failure(UnitType::ZergZergling, Some(&hatchery)),
            Some(LegalityFailure::NoLarva { unit: UnitId(1) })
        );

        let mut with_larva = hatchery;
        with_larva.larva_count = 3;
        let game = game_with(player(Race::Zerg), vec![with_larva.clone(), pool]);
        assert!(game.can_make(UnitType::ZergZergling, Some(&with_larva)));
    }

    #[test]
    fn test_lurker_morph_returns_hydralisk_supply() {
        let den = building(1, UnitType::ZergHydraliskDen, 2);
        let hydra = Unit::new(UnitId(2), UnitType::ZergHydralisk, ME, Position::new(400, 400));
        let mut me = player(Race::Zerg);
        me.supply_total = [20, 0, 0];
        me.supply_used = [18, 0, 0];
        me.researched.insert(TechType::LurkerAspect);
        let game = game_with(me.clone(), vec![den.clone(), hydra.clone()]);
        // Lurker costs 4, the hydralisk hands back 2.
        assert!(game.can_make(UnitType::ZergLurker, Some(&hydra)));

        me.researched.clear();
        let game = game_with(me, vec![den, hydra.clone()]);
        assert_eq!(
            game.production_failure(UnitType::ZergLurker, Some(&hydra)),
            Some(LegalityFailure::MissingTech {
                tech: TechType::LurkerAspect
            })
        );
    }

    #[test]
    fn test_addon_must_be_attached() {
        let mut factory = building(1, UnitType::TerranFactory, 2);
        let shop = building(2, UnitType::TerranMachineShop, 6);
        let bare = building(3, UnitType::TerranFactory, 20);
        factory.addon = Some(UnitId(2));
        let game = game_with(player(Race::Terran), vec![factory.clone(), shop, bare.clone()]);

        assert!(game.can_make(UnitType::TerranSiegeTankTankMode, Some(&factory)));
        assert!(game.can_make(UnitType::TerranSiegeTankTankMode, None));
        assert_eq!(
            game.production_failure(UnitType::TerranSiegeTankTankMode, Some(&bare)),
            Some(LegalityFailure::MissingAddon {
                unit: UnitId(3),
                addon: UnitType::TerranMachineShop
            })
        );
    }

    #[test]
    fn test_carrier_capacity() {
        let mut carrier = Unit::new(UnitId(1), UnitType::ProtossCarrier, ME, Position::new(300, 300));
        carrier.interceptor_count = 3;
        carrier.training_queue = vec![UnitType::ProtossInterceptor];
        let mut me = player(Race::Protoss);
        let game = game_with(me.clone(), vec![carrier.clone()]);
        assert_eq!(
            game.production_failure(UnitType::ProtossInterceptor, Some(&carrier)),
            Some(LegalityFailure::CapacityFull { unit: UnitId(1), max: 4 })
        );

        me.upgrade_levels.insert(UpgradeType::CarrierCapacity, 1);
        let game = game_with(me, vec![carrier.clone()]);
        assert!(game.can_make(UnitType::ProtossInterceptor, Some(&carrier)));
    }

    #[test]
    fn test_hero_reaver_has_double_capacity() {
        let mut warbringer = Unit::new(UnitId(1), UnitType::HeroWarbringer, ME, Position::new(300, 300));
        warbringer.scarab_count = 9;
        let game = game_with(player(Race::Protoss), vec![warbringer.clone()]);
        assert!(game.can_make(UnitType::ProtossScarab, Some(&warbringer)));

        warbringer.scarab_count = 10;
        assert_eq!(
            game.production_failure(UnitType::ProtossScarab, Some(&warbringer)),
            Some(LegalityFailure::CapacityFull { unit: UnitId(1), max: 10 })
        );
    }

    #[test]
    fn test_nydus_exit() {
        let mut canal = building(1, UnitType::ZergNydusCanal, 2);
        let game = game_with(player(Race::Zerg), vec![canal.clone()]);
        assert!(game.can_make(UnitType::ZergNydusCanal, Some(&canal)));

        canal.nydus_exit = Some(UnitId(9));
        assert_eq!(
            game.production_failure(UnitType::ZergNydusCanal, Some(&canal)),
            Some(LegalityFailure::NydusUnavailable { unit: UnitId(1) })
        );
    }

    #[test]
    fn test_unavailable_type() {
        let barracks = building(1, UnitType::TerranBarracks, 2);
        let mut me = player(Race::Terran);
        me.unavailable_units.insert(UnitType::TerranMarine);
        let game = game_with(me, vec![barracks]);
        assert_eq!(
            game.production_failure(UnitType::TerranMarine, None),
            Some(LegalityFailure::Unavailable)
        );
    }
}
