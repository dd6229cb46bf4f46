//! Research and upgrade legality.

use crate::catalog::{TechType, UnitType, UpgradeType};
use crate::client::EngineClient;
use crate::game::Game;
use crate::production::{afford, Legality, LegalityFailure};
use crate::snapshot::{Player, Unit};

impl<C: EngineClient> Game<C> {
    /// Whether the local player can start researching `tech`, optionally at `unit`.
    ///
    /// With `check_can_issue`, the unit must also be landed, idle and complete.
    #[must_use]
    pub fn can_research(&self, tech: TechType, unit: Option<&Unit>, check_can_issue: bool) -> bool {
        self.research_failure(tech, unit, check_can_issue).is_none()
    }

    /// The first research rule that fails, if any.
    #[must_use]
    pub fn research_failure(&self, tech: TechType, unit: Option<&Unit>, check_can_issue: bool) -> Option<LegalityFailure> {
        let failure = self.check_research(tech, unit, check_can_issue).err();
        if let Some(failure) = &failure {
            tracing::trace!("Cannot research {}: {failure}", tech.name());
        }
        failure
    }

    /// Whether the local player can start the next level of `upgrade`,
    /// optionally at `unit`.
    #[must_use]
    pub fn can_upgrade(&self, upgrade: UpgradeType, unit: Option<&Unit>, check_can_issue: bool) -> bool {
        self.upgrade_failure(upgrade, unit, check_can_issue).is_none()
    }

    /// The first upgrade rule that fails, if any.
    #[must_use]
    pub fn upgrade_failure(
        &self,
        upgrade: UpgradeType,
        unit: Option<&Unit>,
        check_can_issue: bool,
    ) -> Option<LegalityFailure> {
        let failure = self.check_upgrade(upgrade, unit, check_can_issue).err();
        if let Some(failure) = &failure {
            tracing::trace!("Cannot upgrade {}: {failure}", upgrade.name());
        }
        failure
    }

    fn check_research(&self, tech: TechType, unit: Option<&Unit>, check_can_issue: bool) -> Legality {
        let me = self.self_player().ok_or(LegalityFailure::NoLocalPlayer)?;
        if let Some(unit) = unit {
            check_researcher(me, unit, tech.what_researches(), check_can_issue)?;
        }
        if me.is_researching(tech) {
            return Err(LegalityFailure::InProgress);
        }
        if me.has_researched(tech) {
            return Err(LegalityFailure::AlreadyResearched);
        }
        if !me.is_research_available(tech) {
            return Err(LegalityFailure::Unavailable);
        }
        afford(me, tech.mineral_price(), tech.gas_price())?;
        self.require(me, tech.required_unit())
    }

    fn check_upgrade(&self, upgrade: UpgradeType, unit: Option<&Unit>, check_can_issue: bool) -> Legality {
        let me = self.self_player().ok_or(LegalityFailure::NoLocalPlayer)?;
        if let Some(unit) = unit {
            check_researcher(me, unit, upgrade.what_upgrades(), check_can_issue)?;
        }
        let level = me.upgrade_level(upgrade);
        let next = level + 1;
        self.require(me, Some(upgrade.what_upgrades()))?;
        self.require(me, upgrade.whats_required(next))?;
        if me.is_upgrading(upgrade) {
            return Err(LegalityFailure::InProgress);
        }
        if level >= me.max_upgrade_level(upgrade) {
            return Err(LegalityFailure::MaxLevel { level });
        }
        afford(me, upgrade.mineral_price(next), upgrade.gas_price(next))
    }

    fn require(&self, me: &Player, unit_type: Option<UnitType>) -> Legality {
        match unit_type {
            Some(t) if !self.has_unit_type_requirement(me.id, Some(t), 1) => {
                Err(LegalityFailure::MissingUnit { unit_type: t, count: 1 })
            }
            _ => Ok(()),
        }
    }
}

fn check_researcher(me: &Player, unit: &Unit, researcher: UnitType, check_can_issue: bool) -> Legality {
    if unit.player != me.id {
        return Err(LegalityFailure::NotOwner { unit: unit.id });
    }
    if !unit.unit_type.is_successor_of(researcher) {
        return Err(LegalityFailure::WrongProducer { unit: unit.id });
    }
    if check_can_issue && (unit.is_lifted() || !unit.is_idle() || !unit.is_completed()) {
        return Err(LegalityFailure::UnitBusy { unit: unit.id });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Race;
    use crate::position::TilePosition;
    use crate::snapshot::{MapData, PlayerId, Snapshot, UnitFlags, UnitId};

    const ME: PlayerId = PlayerId(0);

    fn rich(race: Race) -> Player {
        let mut me = Player::new(ME, "me", race);
        me.minerals = 1000;
        me.gas = 1000;
        me
    }

    fn game_with(me: Player, units: &[Unit]) -> Game {
        let mut snap = Snapshot::new(MapData::new(64, 64).unwrap());
        snap.insert_player(me);
        snap.self_player = Some(ME);
        for unit in units {
            snap.insert_unit(unit.clone(), true);
        }
        Game::from_snapshot(snap)
    }

    fn structure(id: u32, unit_type: UnitType) -> Unit {
        Unit::at_tile(UnitId(id), unit_type, ME, TilePosition::new(id as i32 * 5, 2))
    }

    #[test]
    fn test_research_happy_path() {
        let academy = structure(1, UnitType::TerranAcademy);
        let game = game_with(rich(Race::Terran), &[academy.clone()]);
        assert!(game.can_research(TechType::Stimpacks, None, false));
        assert!(game.can_research(TechType::Stimpacks, Some(&academy), true));
    }

    #[test]
    fn test_research_state_rules() {
        let academy = structure(1, UnitType::TerranAcademy);
        let mut me = rich(Race::Terran);
        me.researching.insert(TechType::Stimpacks);
        let game = game_with(me.clone(), &[academy.clone()]);
        assert_eq!(
            game.research_failure(TechType::Stimpacks, None, false),
            Some(LegalityFailure::InProgress)
        );

        me.researching.clear();
        me.researched.insert(TechType::Stimpacks);
        let game = game_with(me.clone(), &[academy.clone()]);
        assert_eq!(
            game.research_failure(TechType::Stimpacks, None, false),
            Some(LegalityFailure::AlreadyResearched)
        );

        me.researched.clear();
        me.unavailable_techs.insert(TechType::Stimpacks);
        let game = game_with(me, &[academy]);
        assert_eq!(
            game.research_failure(TechType::Stimpacks, None, false),
            Some(LegalityFailure::Unavailable)
        );
    }

    #[test]
    fn test_research_unit_checks() {
        let busy = structure(1, UnitType::TerranAcademy).with_flags(UnitFlags::EXISTS | UnitFlags::VISIBLE | UnitFlags::COMPLETED);
        let barracks = structure(2, UnitType::TerranBarracks);
        let game = game_with(rich(Race::Terran), &[busy.clone(), barracks.clone()]);

        assert!(game.can_research(TechType::Stimpacks, Some(&busy), false));
        assert_eq!(
            game.research_failure(TechType::Stimpacks, Some(&busy), true),
            Some(LegalityFailure::UnitBusy { unit: UnitId(1) })
        );
        assert_eq!(
            game.research_failure(TechType::Stimpacks, Some(&barracks), false),
            Some(LegalityFailure::WrongProducer { unit: UnitId(2) })
        );
    }

    #[test]
    fn test_lurker_aspect_needs_lair_and_accepts_hive() {
        let den = structure(1, UnitType::ZergHydraliskDen);
        let hatchery = structure(2, UnitType::ZergHatchery);
        let game = game_with(rich(Race::Zerg), &[den.clone(), hatchery]);
        assert_eq!(
            game.research_failure(TechType::LurkerAspect, Some(&den), true),
            Some(LegalityFailure::MissingUnit {
                unit_type: UnitType::ZergLair,
                count: 1
            })
        );

        let hive = structure(2, UnitType::ZergHive);
        let game = game_with(rich(Race::Zerg), &[den.clone(), hive]);
        assert!(game.can_research(TechType::LurkerAspect, Some(&den), true));
    }

    #[test]
    fn test_upgrade_costs_scale_with_level() {
        let bay = structure(1, UnitType::TerranEngineeringBay);
        let armory = structure(2, UnitType::TerranArmory);
        let science = structure(3, UnitType::TerranScienceFacility);
        let mut me = rich(Race::Terran);
        me.upgrade_levels.insert(UpgradeType::TerranInfantryArmor, 1);
        me.minerals = 174;
        let game = game_with(me.clone(), &[bay.clone(), armory.clone(), science.clone()]);
        assert_eq!(
            game.upgrade_failure(UpgradeType::TerranInfantryArmor, None, false),
            Some(LegalityFailure::Minerals { need: 175, have: 174 })
        );

        me.minerals = 175;
        let game = game_with(me, &[bay, armory, science]);
        assert!(game.can_upgrade(UpgradeType::TerranInfantryArmor, None, false));
    }

    #[test]
    fn test_upgrade_level_prerequisite() {
        let chamber = structure(1, UnitType::ZergEvolutionChamber);
        let hatchery = structure(2, UnitType::ZergHatchery);
        let mut me = rich(Race::Zerg);
        me.upgrade_levels.insert(UpgradeType::ZergCarapace, 1);
        let game = game_with(me, &[chamber.clone(), hatchery]);
        assert_eq!(
            game.upgrade_failure(UpgradeType::ZergCarapace, Some(&chamber), true),
            Some(LegalityFailure::MissingUnit {
                unit_type: UnitType::ZergLair,
                count: 1
            })
        );
    }

    #[test]
    fn test_upgrade_at_max_level_is_rejected() {
        let bay = structure(1, UnitType::TerranEngineeringBay);
        let mut me = rich(Race::Terran);
        me.upgrade_levels.insert(UpgradeType::TerranInfantryArmor, 3);
        let game = game_with(me.clone(), &[bay.clone()]);
        assert!(!game.can_upgrade(UpgradeType::TerranInfantryArmor, Some(&bay), false));

        me.upgrade_levels.insert(UpgradeType::TerranInfantryArmor, 1);
        me.max_upgrade_levels.insert(UpgradeType::TerranInfantryArmor, 1);
        let science = structure(2, UnitType::TerranScienceFacility);
        let game = game_with(me, &[bay, science]);
        assert_eq!(
            game.upgrade_failure(UpgradeType::TerranInfantryArmor, None, false),
            Some(LegalityFailure::MaxLevel { level: 1 })
        );
    }

    #[test]
    fn test_upgrade_in_progress() {
        let bay = structure(1, UnitType::TerranEngineeringBay);
        let mut me = rich(Race::Terran);
        me.upgrading.insert(UpgradeType::TerranInfantryArmor);
        let game = game_with(me, &[bay]);
        assert_eq!(
            game.upgrade_failure(UpgradeType::TerranInfantryArmor, None, false),
            Some(LegalityFailure::InProgress)
        );
    }

    #[test]
    fn test_lifted_researcher_cannot_issue() {
        let lifted = structure(1, UnitType::TerranEngineeringBay).with_flags(UnitFlags::ACTIVE | UnitFlags::LIFTED);
        let game = game_with(rich(Race::Terran), &[lifted.clone()]);
        assert_eq!(
            game.upgrade_failure(UpgradeType::TerranInfantryArmor, Some(&lifted), true),
            Some(LegalityFailure::UnitBusy { unit: UnitId(1) })
        );
        assert!(game.can_upgrade(UpgradeType::TerranInfantryArmor, Some(&lifted), false));
    }
}
