//! Spatial unit queries.
//!
//! Every query scans the units the engine currently shows to the local
//! player; on frame 0, before the engine has shown anything, it scans all
//! units. Unit counts are in the low hundreds, so a linear scan is cheap.
//!
//! Ordering: results come back in ascending [`UnitId`](crate::snapshot::UnitId)
//! order, and a "closest" query that finds several units at the same
//! distance returns the one with the lowest id.

use crate::catalog::UnitType;
use crate::client::EngineClient;
use crate::game::{Game, StaticUnit};
use crate::position::{Position, TilePosition};
use crate::snapshot::Unit;

impl<C: EngineClient> Game<C> {
    /// Units visible to the local player, or every unit on frame 0.
    pub fn all_units(&self) -> impl Iterator<Item = &Unit> + '_ {
        let snapshot = self.snapshot();
        let initial = snapshot.frame == 0;
        snapshot
            .units
            .values()
            .filter(move |u| initial || snapshot.accessible.contains(&u.id))
    }

    /// Visible mineral fields.
    #[must_use]
    pub fn minerals(&self) -> Vec<&Unit> {
        self.all_units().filter(|u| u.unit_type.is_mineral_field()).collect()
    }

    /// Visible vespene geysers.
    #[must_use]
    pub fn geysers(&self) -> Vec<&Unit> {
        self.all_units()
            .filter(|u| u.unit_type == UnitType::VespeneGeyser)
            .collect()
    }

    /// Visible units owned by the neutral player.
    #[must_use]
    pub fn neutral_units(&self) -> Vec<&Unit> {
        let neutral = self.snapshot().neutral_player;
        self.all_units().filter(|u| Some(u.player) == neutral).collect()
    }

    /// Mineral fields present at match start.
    #[must_use]
    pub fn static_minerals(&self) -> &[StaticUnit] {
        self.static_mineral_list()
    }

    /// Geysers present at match start.
    #[must_use]
    pub fn static_geysers(&self) -> &[StaticUnit] {
        self.static_geyser_list()
    }

    /// Neutral units present at match start.
    #[must_use]
    pub fn static_neutral_units(&self) -> &[StaticUnit] {
        self.static_neutral_list()
    }

    /// Units whose footprint-derived tile is `tile`.
    #[must_use]
    pub fn units_on_tile(&self, tile: TilePosition) -> Vec<&Unit> {
        self.all_units().filter(|u| u.tile_position() == tile).collect()
    }

    /// Units centred in `[left_top.x, right_bottom.x) × [left_top.y, right_bottom.y)`
    /// that pass `filter`.
    pub fn units_in_rectangle(
        &self,
        left_top: Position,
        right_bottom: Position,
        filter: impl Fn(&Unit) -> bool,
    ) -> Vec<&Unit> {
        self.all_units()
            .filter(|u| in_rectangle(u.position, left_top, right_bottom) && filter(u))
            .collect()
    }

    /// Units centred within `radius` pixels of `center` that pass `filter`.
    pub fn units_in_radius(&self, center: Position, radius: i32, filter: impl Fn(&Unit) -> bool) -> Vec<&Unit> {
        let limit = i64::from(radius) * i64::from(radius);
        self.all_units()
            .filter(|u| radius >= 0 && u.position.distance_squared(center) <= limit && filter(u))
            .collect()
    }

    /// The unit centred in the rectangle whose footprint is closest to `center`.
    pub fn closest_unit_in_rectangle(
        &self,
        center: Position,
        left_top: Position,
        right_bottom: Position,
        filter: impl Fn(&Unit) -> bool,
    ) -> Option<&Unit> {
        closest(
            center,
            self.all_units()
                .filter(|u| in_rectangle(u.position, left_top, right_bottom) && filter(u)),
        )
    }

    /// The unit within `radius` of `center` whose footprint is closest to it.
    pub fn closest_unit_in_radius(
        &self,
        center: Position,
        radius: i32,
        filter: impl Fn(&Unit) -> bool,
    ) -> Option<&Unit> {
        closest(center, self.units_in_radius(center, radius, filter).into_iter())
    }
}

fn in_rectangle(position: Position, left_top: Position, right_bottom: Position) -> bool {
    left_top.x <= position.x
        && position.x < right_bottom.x
        && left_top.y <= position.y
        && position.y < right_bottom.y
}

/// First unit with the smallest footprint distance; input is in id order.
fn closest<'a>(center: Position, units: impl Iterator<Item = &'a Unit>) -> Option<&'a Unit> {
    let mut best: Option<(i64, &Unit)> = None;
    for unit in units {
        let distance = unit.footprint_distance_squared(center);
        if best.map_or(true, |(d, _)| distance < d) {
            best = Some((distance, unit));
        }
    }
    best.map(|(_, unit)| unit)
}

/// Common unit predicates for the spatial queries.
pub mod filters {
    use crate::catalog::UnitType;
    use crate::snapshot::{PlayerId, Unit};

    /// Owned by `player`.
    pub fn owned_by(player: PlayerId) -> impl Fn(&Unit) -> bool {
        move |u| u.player == player
    }

    /// Of exactly `unit_type`.
    pub fn of_type(unit_type: UnitType) -> impl Fn(&Unit) -> bool {
        move |u| u.unit_type == unit_type
    }

    /// A structure.
    pub fn is_building(unit: &Unit) -> bool {
        unit.unit_type.is_building()
    }

    /// A worker.
    pub fn is_worker(unit: &Unit) -> bool {
        unit.unit_type.is_worker()
    }

    /// Finished constructing.
    pub fn is_completed(unit: &Unit) -> bool {
        unit.is_completed()
    }

    /// Airborne.
    pub fn is_flying(unit: &Unit) -> bool {
        unit.is_flying()
    }

    /// Mineral field or geyser.
    pub fn is_resource(unit: &Unit) -> bool {
        unit.unit_type.is_mineral_field() || unit.unit_type == UnitType::VespeneGeyser
    }

    /// Matches everything.
    pub fn any(_unit: &Unit) -> bool {
        true
    }

    /// Both predicates hold.
    pub fn both(a: impl Fn(&Unit) -> bool, b: impl Fn(&Unit) -> bool) -> impl Fn(&Unit) -> bool {
        move |u| a(u) && b(u)
    }

    /// The predicate does not hold.
    pub fn not(f: impl Fn(&Unit) -> bool) -> impl Fn(&Unit) -> bool {
        move |u| !f(u)
    }
}

#[cfg(test)]
mod tests {
    use super::filters;
    use super::*;
    use crate::catalog::Race;
    use crate::snapshot::{MapData, Player, PlayerId, Snapshot, UnitId};

    const ME: PlayerId = PlayerId(0);
    const NEUTRAL: PlayerId = PlayerId(11);

    fn game(frame: u32, hidden: &[u32]) -> Game {
        let mut snap = Snapshot::new(MapData::new(64, 64).unwrap());
        snap.frame = frame;
        snap.insert_player(Player::new(ME, "me", Race::Terran));
        snap.insert_player(Player::new(NEUTRAL, "neutral", Race::Neutral));
        snap.self_player = Some(ME);
        snap.neutral_player = Some(NEUTRAL);

        let units = [
            Unit::new(UnitId(5), UnitType::TerranMarine, ME, Position::new(100, 100)),
            Unit::new(UnitId(2), UnitType::TerranMarine, ME, Position::new(140, 100)),
            Unit::new(UnitId(9), UnitType::TerranScv, ME, Position::new(64, 64)),
            Unit::at_tile(UnitId(3), UnitType::MineralFieldType1, NEUTRAL, TilePosition::new(10, 10)),
            Unit::at_tile(UnitId(4), UnitType::VespeneGeyser, NEUTRAL, TilePosition::new(20, 10)),
        ];
        for unit in units {
            let shown = !hidden.contains(&unit.id.0);
            snap.insert_unit(unit, shown);
        }
        Game::from_snapshot(snap)
    }

    fn ids(units: &[&Unit]) -> Vec<u32> {
        units.iter().map(|u| u.id.0).collect()
    }

    #[test]
    fn test_frame_zero_sees_everything() {
        let game = game(0, &[3, 4]);
        assert_eq!(game.all_units().count(), 5);
    }

    #[test]
    fn test_later_frames_only_see_accessible() {
        let game = game(10, &[3, 4]);
        assert_eq!(game.all_units().count(), 3);
        assert!(game.minerals().is_empty());
        assert!(game.geysers().is_empty());
        assert!(game.neutral_units().is_empty());
    }

    #[test]
    fn test_results_are_in_id_order() {
        let game = game(10, &[]);
        let found = game.units_in_rectangle(Position::new(0, 0), Position::new(2048, 2048), filters::any);
        assert_eq!(ids(&found), vec![2, 3, 4, 5, 9]);
    }

    #[test]
    fn test_rectangle_is_half_open() {
        let game = game(10, &[]);
        // Marine 5 sits at (100, 100).
        let inclusive = game.units_in_rectangle(Position::new(100, 100), Position::new(101, 101), filters::any);
        assert_eq!(ids(&inclusive), vec![5]);
        let exclusive = game.units_in_rectangle(Position::new(90, 90), Position::new(100, 100), filters::any);
        assert!(exclusive.is_empty());
    }

    #[test]
    fn test_units_on_tile() {
        let game = game(10, &[]);
        assert_eq!(ids(&game.units_on_tile(TilePosition::new(10, 10))), vec![3]);
        assert_eq!(ids(&game.units_on_tile(TilePosition::new(2, 2))), vec![5]);
        assert_eq!(ids(&game.units_on_tile(TilePosition::new(1, 1))), vec![9]);
    }

    #[test]
    fn test_radius_with_filter() {
        let game = game(10, &[]);
        let marines = game.units_in_radius(Position::new(120, 100), 20, filters::of_type(UnitType::TerranMarine));
        assert_eq!(ids(&marines), vec![2, 5]);
        let workers = game.units_in_radius(Position::new(120, 100), 20, filters::is_worker);
        assert!(workers.is_empty());
    }

    #[test]
    fn test_closest_tie_breaks_on_lowest_id() {
        let game = game(10, &[]);
        // Exactly between marines 5 and 2.
        let closest = game.closest_unit_in_radius(Position::new(120, 100), 64, filters::of_type(UnitType::TerranMarine));
        assert_eq!(closest.map(|u| u.id), Some(UnitId(2)));
    }

    #[test]
    fn test_closest_in_rectangle() {
        let game = game(10, &[]);
        let closest = game.closest_unit_in_rectangle(
            Position::new(60, 60),
            Position::new(0, 0),
            Position::new(2048, 2048),
            filters::both(filters::owned_by(ME), filters::not(filters::is_building)),
        );
        assert_eq!(closest.map(|u| u.id), Some(UnitId(9)));
    }

    #[test]
    fn test_static_units_survive_hiding() {
        let game = game(10, &[3, 4]);
        assert_eq!(game.static_minerals().len(), 1);
        assert_eq!(game.static_geysers().len(), 1);
        assert_eq!(game.static_neutral_units().len(), 2);
    }
}
