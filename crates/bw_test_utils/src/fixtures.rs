//! Test fixtures and helpers.
//!
//! Pre-built snapshots for consistent testing. [`SnapshotBuilder`] starts
//! from an open, explored, buildable map covered by one region and lets a
//! test add players, units and terrain edits.

use bw_core::catalog::{Race, UnitType};
use bw_core::game::Game;
use bw_core::position::{Position, TilePosition};
use bw_core::snapshot::{MapData, Player, PlayerId, Region, RegionId, Snapshot, TileInfo, Unit, UnitFlags, UnitId};

/// The local player in fixtures.
pub const ME: PlayerId = PlayerId(0);

/// The opponent in fixtures.
pub const ENEMY: PlayerId = PlayerId(1);

/// The neutral player in fixtures.
pub const NEUTRAL: PlayerId = PlayerId(11);

/// Region covering the whole fixture map unless repainted.
pub const MAIN_REGION: RegionId = RegionId(1);

/// Minerals and gas given to fixture players.
pub const STARTING_STOCK: i32 = 10_000;

/// Supply given to fixture players, per race.
pub const STARTING_SUPPLY: i32 = 400;

/// A well-funded player with plenty of supply.
#[must_use]
pub fn rich_player(id: PlayerId, race: Race) -> Player {
    let mut player = Player::new(id, format!("player {}", id.0), race);
    player.minerals = STARTING_STOCK;
    player.gas = STARTING_STOCK;
    player.supply_total = [STARTING_SUPPLY; 3];
    player
}

/// Fluent builder for test snapshots.
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    snapshot: Snapshot,
    next_id: u32,
}

impl SnapshotBuilder {
    /// An open `width` × `height` map on frame 1, with the local player
    /// playing `race`, an idle enemy and a neutral player.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(width: u16, height: u16, race: Race) -> Self {
        let mut map = MapData::new(width, height).expect("fixture map must not be empty");
        map.paint(0, 0, i32::from(width), i32::from(height), |t| {
            t.region = Some(MAIN_REGION);
        });

        let mut snapshot = Snapshot::new(map);
        snapshot.frame = 1;
        snapshot.insert_region(Region {
            id: MAIN_REGION,
            group_id: 0,
            center: Position::new(i32::from(width) * 16, i32::from(height) * 16),
            neighbors: Vec::new(),
        });
        snapshot.insert_player(rich_player(ME, race));
        snapshot.insert_player(Player::new(ENEMY, "enemy", Race::Zerg));
        snapshot.insert_player(Player {
            neutral: true,
            ..Player::new(NEUTRAL, "neutral", Race::Neutral)
        });
        snapshot.self_player = Some(ME);
        snapshot.neutral_player = Some(NEUTRAL);

        Self { snapshot, next_id: 1 }
    }

    /// Set the frame number.
    #[must_use]
    pub fn frame(mut self, frame: u32) -> Self {
        self.snapshot.frame = frame;
        self
    }

    /// Edit the local player.
    #[must_use]
    pub fn me(mut self, edit: impl FnOnce(&mut Player)) -> Self {
        if let Some(player) = self.snapshot.players.get_mut(&ME) {
            edit(player);
        }
        self
    }

    /// Drop the local player.
    #[must_use]
    pub fn without_local_player(mut self) -> Self {
        self.snapshot.self_player = None;
        self
    }

    /// Edit a rectangle of tiles.
    #[must_use]
    pub fn terrain(mut self, x: i32, y: i32, width: i32, height: i32, edit: impl FnMut(&mut TileInfo)) -> Self {
        self.snapshot.map.paint(x, y, width, height, edit);
        self
    }

    /// Paint a rectangle as a new region in connectivity group `group`.
    #[must_use]
    pub fn region(mut self, id: RegionId, group: u16, x: i32, y: i32, width: i32, height: i32) -> Self {
        self.snapshot.map.paint(x, y, width, height, |t| t.region = Some(id));
        self.snapshot.insert_region(Region {
            id,
            group_id: group,
            center: Position::new((x * 2 + width) * 16, (y * 2 + height) * 16),
            neighbors: Vec::new(),
        });
        self
    }

    /// Add a live unit with its footprint's top-left on `tile`.
    #[must_use]
    pub fn unit(self, unit_type: UnitType, owner: PlayerId, tile: TilePosition) -> Self {
        self.unit_with(unit_type, owner, tile, |_| {})
    }

    /// Add a live unit and edit it before insertion.
    #[must_use]
    pub fn unit_with(mut self, unit_type: UnitType, owner: PlayerId, tile: TilePosition, edit: impl FnOnce(&mut Unit)) -> Self {
        let mut unit = Unit::at_tile(UnitId(self.next_id), unit_type, owner, tile);
        edit(&mut unit);
        self.next_id += 1;
        self.snapshot.insert_unit(unit, true);
        self
    }

    /// Add a unit centred on `position`.
    #[must_use]
    pub fn unit_at(mut self, unit_type: UnitType, owner: PlayerId, position: Position) -> Self {
        let unit = Unit::new(UnitId(self.next_id), unit_type, owner, position);
        self.next_id += 1;
        self.snapshot.insert_unit(unit, true);
        self
    }

    /// Add a neutral resource the local player has not seen.
    #[must_use]
    pub fn hidden_resource(mut self, unit_type: UnitType, tile: TilePosition) -> Self {
        let unit = Unit::at_tile(UnitId(self.next_id), unit_type, NEUTRAL, tile).with_flags(UnitFlags::EXISTS);
        self.next_id += 1;
        self.snapshot.insert_unit(unit, true);
        self
    }

    /// Id the next added unit will get.
    #[must_use]
    pub fn next_id(&self) -> UnitId {
        UnitId(self.next_id)
    }

    /// Finish the snapshot.
    #[must_use]
    pub fn build(self) -> Snapshot {
        self.snapshot
    }

    /// Finish the snapshot and start a game from it.
    #[must_use]
    pub fn game(self) -> Game {
        Game::from_snapshot(self.build())
    }
}

/// A Terran opening: command center, supply depot and barracks near the
/// top-left, mineral line to the left and a geyser above.
#[must_use]
pub fn terran_base() -> SnapshotBuilder {
    let mut builder = SnapshotBuilder::new(64, 64, Race::Terran)
        .unit(UnitType::TerranCommandCenter, ME, TilePosition::new(10, 10))
        .unit(UnitType::TerranSupplyDepot, ME, TilePosition::new(16, 10))
        .unit(UnitType::TerranBarracks, ME, TilePosition::new(16, 14))
        .unit(UnitType::VespeneGeyser, NEUTRAL, TilePosition::new(10, 4));
    for y in 8..14 {
        builder = builder.unit(UnitType::MineralFieldType1, NEUTRAL, TilePosition::new(3, y));
    }
    builder.unit_at(UnitType::TerranScv, ME, Position::new(300, 400))
}

/// A Protoss opening with one pylon at tile (20, 20).
#[must_use]
pub fn protoss_base() -> SnapshotBuilder {
    SnapshotBuilder::new(64, 64, Race::Protoss)
        .unit(UnitType::ProtossNexus, ME, TilePosition::new(6, 6))
        .unit(UnitType::ProtossPylon, ME, TilePosition::new(20, 20))
        .unit_at(UnitType::ProtossProbe, ME, Position::new(400, 400))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_assigns_sequential_ids() {
        let snapshot = SnapshotBuilder::new(16, 16, Race::Terran)
            .unit(UnitType::TerranMarine, ME, TilePosition::new(1, 1))
            .unit(UnitType::TerranMarine, ME, TilePosition::new(2, 2))
            .build();
        let ids: Vec<u32> = snapshot.units.keys().map(|id| id.0).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_fixture_snapshot_is_consistent() {
        assert_eq!(terran_base().build().validate(), Ok(()));
        assert_eq!(protoss_base().build().validate(), Ok(()));
    }

    #[test]
    fn test_base_captures_static_resources() {
        let game = terran_base().game();
        assert_eq!(game.static_minerals().len(), 6);
        assert_eq!(game.static_geysers().len(), 1);
    }
}
