//! Property-based tests for the query core.
//!
//! These check invariants that must hold for any snapshot, not just the
//! hand-built scenarios.

use bw_core::catalog::{DamageType, Race, UnitSizeType, UnitType};
use bw_core::combat::{hit_damage, weapon_damage};
use bw_core::game::Game;
use bw_core::pathfinding::bresenham_line;
use bw_core::position::{Position, TilePosition};
use bw_core::power::in_psi_field;
use bw_core::snapshot::RegionId;
use bw_test_utils::determinism::strategies::{
    arb_armed_unit_type, arb_offset, arb_position, arb_race, arb_structure_type, arb_tile,
    arb_unit_layout, arb_unit_type, arb_upgrade_levels,
};
use bw_test_utils::fixtures::{terran_base, SnapshotBuilder, ENEMY, ME, NEUTRAL};
use proptest::prelude::*;

const SIZES: [UnitSizeType; 4] = [
    UnitSizeType::Independent,
    UnitSizeType::Small,
    UnitSizeType::Medium,
    UnitSizeType::Large,
];

/// A 32×32 map split into four vertical stripes, each its own region with
/// the given connectivity group.
fn striped_game(groups: [u16; 4]) -> Game {
    let mut builder = SnapshotBuilder::new(32, 32, Race::Terran);
    for (i, group) in groups.iter().enumerate() {
        let x = i as i32 * 8;
        builder = builder.region(RegionId(i as u16 + 1), *group, x, 0, 8, 32);
    }
    builder.game()
}

proptest! {
    // =========================================================================
    // Power
    // =========================================================================

    #[test]
    fn prop_psi_field_is_translation_invariant(
        source in arb_position(64, 64),
        target in arb_position(64, 64),
        shift in arb_offset(4096),
    ) {
        prop_assert_eq!(
            in_psi_field(source, target),
            in_psi_field(source + shift, target + shift)
        );
    }

    #[test]
    fn prop_pylon_power_moves_with_pylon(
        pylon in (10..40i32, 10..40i32).prop_map(|(x, y)| TilePosition::new(x, y)),
        delta in arb_offset(300),
        shift in (0..10i32, 0..10i32).prop_map(|(x, y)| TilePosition::new(x, y)),
    ) {
        let powered_at = |tile: TilePosition| {
            let game = SnapshotBuilder::new(64, 64, Race::Protoss)
                .unit(UnitType::ProtossPylon, ME, tile)
                .game();
            let center = tile.to_position() + Position::new(32, 32);
            game.has_power_precise(center + delta, None)
        };
        prop_assert_eq!(powered_at(pylon), powered_at(pylon + shift));
    }

    #[test]
    fn prop_no_pylon_means_no_power(
        race in arb_race(),
        tile in arb_tile(32, 32),
    ) {
        let game = SnapshotBuilder::new(32, 32, race).game();
        prop_assert!(!game.has_power(tile, None));
        prop_assert!(!game.has_power(tile, Some(UnitType::ProtossGateway)));
        prop_assert!(!game.can_build_here(tile, UnitType::ProtossGateway, None, false));
    }

    // =========================================================================
    // Connectivity
    // =========================================================================

    #[test]
    fn prop_has_path_is_an_equivalence(
        groups in prop::array::uniform4(0..3u16),
        a in arb_position(32, 32),
        b in arb_position(32, 32),
        c in arb_position(32, 32),
    ) {
        let game = striped_game(groups);
        prop_assert!(game.has_path(a, a));
        prop_assert_eq!(game.has_path(a, b), game.has_path(b, a));
        if game.has_path(a, b) && game.has_path(b, c) {
            prop_assert!(game.has_path(a, c));
        }
    }

    // =========================================================================
    // Combat
    // =========================================================================

    #[test]
    fn prop_damage_is_never_negative(
        from in arb_unit_type(),
        to in arb_unit_type(),
        mine in arb_upgrade_levels(),
        theirs in arb_upgrade_levels(),
    ) {
        let mut snapshot = terran_base().build();
        for (player, levels) in [(ME, mine), (ENEMY, theirs)] {
            if let Some(p) = snapshot.players.get_mut(&player) {
                p.upgrade_levels.extend(levels);
            }
        }
        let game = Game::from_snapshot(snapshot);

        let damage = game.damage_between(from, to, Some(ME), Some(ENEMY));
        prop_assert!(damage >= 0);

        let weapon = if to.is_flyer() { from.air_weapon() } else { from.ground_weapon() };
        if weapon.is_none() {
            prop_assert_eq!(damage, 0);
        }
    }

    #[test]
    fn prop_armor_never_raises_damage(
        from in arb_armed_unit_type(),
        to in arb_unit_type(),
    ) {
        let game = terran_base().game();
        let weapon = if to.is_flyer() { from.air_weapon() } else { from.ground_weapon() };
        let damage = game.damage_between(from, to, None, None);
        match weapon {
            Some(weapon) => {
                prop_assert!(damage <= weapon_damage(weapon, None));
                prop_assert!(damage <= hit_damage(weapon_damage(weapon, None), 0, weapon.damage_type(), to.size()));
            }
            None => prop_assert_eq!(damage, 0),
        }
    }

    #[test]
    fn prop_ignore_armor_ignores_armor(
        damage in 0..500i32,
        armor_a in 0..50i32,
        armor_b in 0..50i32,
        size in proptest::sample::select(SIZES.to_vec()),
    ) {
        prop_assert_eq!(
            hit_damage(damage, armor_a, DamageType::IgnoreArmor, size),
            hit_damage(damage, armor_b, DamageType::IgnoreArmor, size)
        );
        prop_assert!(hit_damage(damage, armor_a, DamageType::Normal, size) >= 0);
    }

    // =========================================================================
    // Placement
    // =========================================================================

    #[test]
    fn prop_placement_is_idempotent(
        tile in arb_tile(64, 64),
        structure in arb_structure_type(),
        check_explored in any::<bool>(),
    ) {
        let game = terran_base().game();
        let first = game.placement_failure(tile, structure, None, check_explored);
        let second = game.placement_failure(tile, structure, None, check_explored);
        prop_assert_eq!(first, second);
        prop_assert_eq!(first.is_none(), game.can_build_here(tile, structure, None, check_explored));
    }

    // =========================================================================
    // Spatial
    // =========================================================================

    #[test]
    fn prop_tile_rectangle_matches_unit_tile(
        layout in arb_unit_layout(32, 32, 12),
        tile in arb_tile(32, 32),
    ) {
        let mut builder = SnapshotBuilder::new(32, 32, Race::Terran);
        for (unit_type, position) in layout {
            builder = builder.unit_at(unit_type, NEUTRAL, position);
        }
        let game = builder.game();

        let found = game.units_in_rectangle(tile.to_position(), (tile + TilePosition::new(1, 1)).to_position(), |_| true);
        for unit in game.all_units() {
            let inside = found.iter().any(|u| u.id == unit.id);
            prop_assert_eq!(inside, unit.position.to_tile_position() == tile);
        }
    }

    // =========================================================================
    // Lines
    // =========================================================================

    #[test]
    fn prop_bresenham_line_is_four_connected(
        from in arb_tile(128, 128),
        to in arb_tile(128, 128),
    ) {
        let line = bresenham_line(from, to);
        let expected = 1 + (to.x - from.x).abs() + (to.y - from.y).abs();
        prop_assert_eq!(line.len(), expected as usize);
        prop_assert_eq!(line.first().copied(), Some(from));
        prop_assert_eq!(line.last().copied(), Some(to));
        for pair in line.windows(2) {
            let step = (pair[1].x - pair[0].x).abs() + (pair[1].y - pair[0].y).abs();
            prop_assert_eq!(step, 1);
        }
    }
}
