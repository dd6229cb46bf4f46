//! Region connectivity.
//!
//! The engine partitions walkable ground into regions and labels regions
//! that can reach each other with the same group id. Two ground positions
//! are connected exactly when their regions share a group.

use crate::client::EngineClient;
use crate::game::Game;
use crate::position::Position;
use crate::snapshot::Unit;

impl<C: EngineClient> Game<C> {
    /// Whether a ground unit could travel from `source` to `destination`.
    ///
    /// Off-map positions and tiles without a region are unreachable.
    #[must_use]
    pub fn has_path(&self, source: Position, destination: Position) -> bool {
        if !self.is_valid_position(source) || !self.is_valid_position(destination) {
            return false;
        }
        match (self.region_at(source), self.region_at(destination)) {
            (Some(from), Some(to)) => from.group_id == to.group_id,
            _ => false,
        }
    }

    /// Whether `unit` could reach `destination`. Airborne units always can.
    #[must_use]
    pub fn unit_has_path(&self, unit: &Unit, destination: Position) -> bool {
        if unit.is_flying() {
            return true;
        }
        let reachable = self.has_path(unit.position, destination);
        if !reachable {
            tracing::trace!("Unit {} has no ground path to {}", unit.id, destination);
        }
        reachable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Race, UnitType};
    use crate::snapshot::{MapData, Player, PlayerId, Region, RegionId, Snapshot, UnitId};

    /// Three regions: 1 and 2 share an island, 3 sits alone. Row 15 has no region.
    fn game() -> Game {
        let mut map = MapData::new(32, 16).unwrap();
        map.paint(0, 0, 16, 15, |t| t.region = Some(RegionId(1)));
        map.paint(16, 0, 8, 15, |t| t.region = Some(RegionId(2)));
        map.paint(24, 0, 8, 15, |t| t.region = Some(RegionId(3)));
        let mut snap = Snapshot::new(map);
        for (id, group, x) in [(1, 0, 256), (2, 0, 640), (3, 1, 896)] {
            snap.insert_region(Region {
                id: RegionId(id),
                group_id: group,
                center: Position::new(x, 240),
                neighbors: Vec::new(),
            });
        }
        snap.insert_player(Player::new(PlayerId(0), "me", Race::Terran));
        snap.self_player = Some(PlayerId(0));
        Game::from_snapshot(snap)
    }

    #[test]
    fn test_same_group_is_connected() {
        let game = game();
        assert!(game.has_path(Position::new(10, 10), Position::new(600, 100)));
        assert!(game.has_path(Position::new(600, 100), Position::new(10, 10)));
        assert!(game.has_path(Position::new(10, 10), Position::new(10, 10)));
    }

    #[test]
    fn test_different_group_is_disconnected() {
        let game = game();
        assert!(!game.has_path(Position::new(10, 10), Position::new(900, 100)));
    }

    #[test]
    fn test_missing_region_or_off_map() {
        let game = game();
        assert!(!game.has_path(Position::new(10, 10), Position::new(10, 490)));
        assert!(!game.has_path(Position::new(10, 10), Position::new(-1, 10)));
        assert!(!game.has_path(Position::new(10, 10), Position::new(1024, 10)));
    }

    #[test]
    fn test_unit_path_ground_and_air() {
        let game = game();
        let marine = Unit::new(UnitId(1), UnitType::TerranMarine, PlayerId(0), Position::new(40, 40));
        let wraith = Unit::new(UnitId(2), UnitType::TerranWraith, PlayerId(0), Position::new(40, 40));

        assert!(game.unit_has_path(&marine, Position::new(600, 40)));
        assert!(!game.unit_has_path(&marine, Position::new(900, 40)));
        assert!(game.unit_has_path(&wraith, Position::new(900, 40)));
    }
}
