//! Scenario loading.
//!
//! A scenario is a compact RON description of one frame: map size, terrain
//! patches, regions, players and unit placements. It expands into a full
//! [`Snapshot`] and the [`AreaGraph`] derived from its regions.

use std::path::Path;

use bw_core::catalog::{Race, TechType, UnitType, UpgradeType};
use bw_core::error::QueryError;
use bw_core::pathfinding::AreaGraph;
use bw_core::position::{Position, TilePosition};
use bw_core::snapshot::{MapData, Player, PlayerId, Region, RegionId, Snapshot, Unit, UnitFlags, UnitId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for scenario operations.
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// File not found.
    #[error("Scenario file not found: {0}")]
    FileNotFound(String),
    /// Failed to read file.
    #[error("Failed to read scenario file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse RON.
    #[error("Failed to parse scenario: {0}")]
    ParseError(#[from] ron::error::SpannedError),
    /// The expanded snapshot is inconsistent.
    #[error("Invalid scenario: {0}")]
    Invalid(#[from] QueryError),
}

/// A complete scenario description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Frame number of the snapshot.
    #[serde(default = "default_frame")]
    pub frame: u32,
    /// Map size in tiles.
    pub map_size: (u16, u16),
    /// Terrain edits, applied in order over an open map.
    #[serde(default)]
    pub terrain: Vec<TerrainPatch>,
    /// Regions; tiles outside every region have none.
    #[serde(default)]
    pub regions: Vec<RegionSetup>,
    /// Players in the match.
    pub players: Vec<PlayerSetup>,
    /// Units, numbered from 1 in order unless given an id.
    #[serde(default)]
    pub units: Vec<UnitPlacement>,
    /// Start location tiles.
    #[serde(default)]
    pub start_locations: Vec<(i32, i32)>,
    /// The local player.
    pub self_player: Option<u8>,
    /// The neutral player.
    pub neutral_player: Option<u8>,
}

fn default_frame() -> u32 {
    1
}

/// A rectangle of tiles whose flags are overwritten.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerrainPatch {
    /// Left tile.
    pub x: i32,
    /// Top tile.
    pub y: i32,
    /// Width in tiles.
    pub width: i32,
    /// Height in tiles.
    pub height: i32,
    /// New buildable flag.
    #[serde(default)]
    pub buildable: Option<bool>,
    /// New walkable flag.
    #[serde(default)]
    pub walkable: Option<bool>,
    /// New explored flag.
    #[serde(default)]
    pub explored: Option<bool>,
    /// New visible flag.
    #[serde(default)]
    pub visible: Option<bool>,
    /// New creep flag.
    #[serde(default)]
    pub creep: Option<bool>,
    /// New ground height.
    #[serde(default)]
    pub ground_height: Option<i32>,
}

/// A rectangular region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionSetup {
    /// Region id.
    pub id: u16,
    /// Connectivity group; regions in one group are mutually reachable.
    pub group: u16,
    /// Covered tiles as `(x, y, width, height)`.
    pub rect: (i32, i32, i32, i32),
    /// Adjacent regions.
    #[serde(default)]
    pub neighbors: Vec<u16>,
}

/// A player slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSetup {
    /// Slot id.
    pub id: u8,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Race.
    pub race: Race,
    /// Whether this is the neutral slot.
    #[serde(default)]
    pub neutral: bool,
    /// Minerals.
    #[serde(default)]
    pub minerals: i32,
    /// Gas.
    #[serde(default)]
    pub gas: i32,
    /// Supply used per race (Zerg, Terran, Protoss), in half-units.
    #[serde(default)]
    pub supply_used: [i32; 3],
    /// Supply available per race, in half-units.
    #[serde(default)]
    pub supply_total: [i32; 3],
    /// Finished techs.
    #[serde(default)]
    pub researched: Vec<TechType>,
    /// Upgrade levels.
    #[serde(default)]
    pub upgrades: Vec<(UpgradeType, i32)>,
}

/// Lifecycle of a placed unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnitState {
    /// Finished, idle and visible.
    #[default]
    Active,
    /// Finished and visible, with an order.
    Busy,
    /// Still under construction.
    Constructing,
    /// Exists but is not in sight.
    Hidden,
    /// A lifted building.
    Lifted,
}

impl UnitState {
    fn flags(self) -> UnitFlags {
        match self {
            Self::Active => UnitFlags::ACTIVE,
            Self::Busy => UnitFlags::ACTIVE.difference(UnitFlags::IDLE),
            Self::Constructing => UnitFlags::EXISTS | UnitFlags::VISIBLE,
            Self::Hidden => UnitFlags::EXISTS,
            Self::Lifted => UnitFlags::ACTIVE | UnitFlags::LIFTED,
        }
    }
}

/// A unit to place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitPlacement {
    /// Explicit id.
    #[serde(default)]
    pub id: Option<u32>,
    /// Unit type.
    pub unit_type: UnitType,
    /// Owner.
    pub player: u8,
    /// Footprint top-left tile.
    #[serde(default)]
    pub tile: Option<(i32, i32)>,
    /// Center pixel; used when `tile` is absent.
    #[serde(default)]
    pub position: Option<(i32, i32)>,
    /// Lifecycle.
    #[serde(default)]
    pub state: UnitState,
    /// Larva held by a hatchery-like unit.
    #[serde(default)]
    pub larva: u32,
    /// Id of the attached addon.
    #[serde(default)]
    pub addon: Option<u32>,
}

impl Scenario {
    /// Load a scenario from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ScenarioError::FileNotFound(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Load from a RON string.
    pub fn from_ron_str(ron: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = ron::from_str(ron)?;
        Ok(scenario)
    }

    /// Expand into a checked snapshot.
    pub fn to_snapshot(&self) -> Result<Snapshot, ScenarioError> {
        let (width, height) = self.map_size;
        let mut map = MapData::new(width, height)?;
        for region in &self.regions {
            let (x, y, w, h) = region.rect;
            map.paint(x, y, w, h, |t| t.region = Some(RegionId(region.id)));
        }
        for patch in &self.terrain {
            map.paint(patch.x, patch.y, patch.width, patch.height, |t| {
                t.buildable = patch.buildable.unwrap_or(t.buildable);
                t.walkable = patch.walkable.unwrap_or(t.walkable);
                t.explored = patch.explored.unwrap_or(t.explored);
                t.visible = patch.visible.unwrap_or(t.visible);
                t.creep = patch.creep.unwrap_or(t.creep);
                t.ground_height = patch.ground_height.unwrap_or(t.ground_height);
            });
        }

        let mut snapshot = Snapshot::new(map);
        snapshot.frame = self.frame;
        snapshot.self_player = self.self_player.map(PlayerId);
        snapshot.neutral_player = self.neutral_player.map(PlayerId);
        snapshot.start_locations = self
            .start_locations
            .iter()
            .map(|&(x, y)| TilePosition::new(x, y))
            .collect();

        for region in &self.regions {
            let (x, y, w, h) = region.rect;
            snapshot.insert_region(Region {
                id: RegionId(region.id),
                group_id: region.group,
                center: Position::new((x * 2 + w) * 16, (y * 2 + h) * 16),
                neighbors: region.neighbors.iter().copied().map(RegionId).collect(),
            });
        }

        for setup in &self.players {
            snapshot.insert_player(setup.to_player());
        }

        let mut next_id = 1;
        for placement in &self.units {
            let id = placement.id.unwrap_or(next_id);
            next_id = id + 1;
            snapshot.insert_unit(placement.to_unit(UnitId(id)), true);
        }

        snapshot.validate()?;
        tracing::debug!(
            "Scenario '{}' expanded: {} players, {} units, {} regions",
            self.name,
            snapshot.players.len(),
            snapshot.units.len(),
            snapshot.regions.len()
        );
        Ok(snapshot)
    }

    /// Expand into a snapshot and the area graph of its regions.
    pub fn build(&self) -> Result<(Snapshot, AreaGraph), ScenarioError> {
        let snapshot = self.to_snapshot()?;
        let topology = AreaGraph::from_snapshot(&snapshot)?;
        Ok((snapshot, topology))
    }
}

impl PlayerSetup {
    fn to_player(&self) -> Player {
        let name = if self.name.is_empty() {
            format!("player {}", self.id)
        } else {
            self.name.clone()
        };
        let mut player = Player::new(PlayerId(self.id), name, self.race);
        player.neutral = self.neutral;
        player.minerals = self.minerals;
        player.gas = self.gas;
        player.supply_used = self.supply_used;
        player.supply_total = self.supply_total;
        player.researched = self.researched.iter().copied().collect();
        player.upgrade_levels = self.upgrades.iter().copied().collect();
        player
    }
}

impl UnitPlacement {
    fn to_unit(&self, id: UnitId) -> Unit {
        let owner = PlayerId(self.player);
        let mut unit = match (self.tile, self.position) {
            (Some((x, y)), _) => Unit::at_tile(id, self.unit_type, owner, TilePosition::new(x, y)),
            (None, Some((x, y))) => Unit::new(id, self.unit_type, owner, Position::new(x, y)),
            (None, None) => Unit::new(id, self.unit_type, owner, Position::ORIGIN),
        };
        unit.flags = self.state.flags();
        unit.larva_count = self.larva;
        unit.addon = self.addon.map(UnitId);
        unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"(
        name: "Two plateaus",
        map_size: (32, 16),
        regions: [
            (id: 1, group: 0, rect: (0, 0, 16, 16), neighbors: [2]),
            (id: 2, group: 0, rect: (16, 0, 16, 16), neighbors: [1]),
        ],
        terrain: [(x: 0, y: 0, width: 2, height: 2, buildable: Some(false), creep: Some(true))],
        players: [
            (id: 0, race: Terran, minerals: 150, supply_total: (0, 20, 0)),
            (id: 11, race: Neutral, neutral: true),
        ],
        units: [
            (unit_type: TerranCommandCenter, player: 0, tile: Some((4, 4))),
            (unit_type: TerranScv, player: 0, position: Some((300, 100)), state: Busy),
            (id: Some(20), unit_type: MineralFieldType1, player: 11, tile: Some((1, 8)), state: Hidden),
        ],
        self_player: Some(0),
        neutral_player: Some(11),
    )"#;

    #[test]
    fn test_parse_and_expand() {
        let scenario = Scenario::from_ron_str(SMALL).unwrap();
        assert_eq!(scenario.frame, 1);

        let snapshot = scenario.to_snapshot().unwrap();
        assert_eq!(snapshot.players.len(), 2);
        assert_eq!(snapshot.units.len(), 3);
        assert!(snapshot.units.contains_key(&UnitId(20)));
        assert_eq!(snapshot.units[&UnitId(1)].unit_type, UnitType::TerranCommandCenter);
        assert!(!snapshot.units[&UnitId(2)].is_idle());
        assert!(!snapshot.units[&UnitId(20)].is_visible());
        assert_eq!(snapshot.players[&PlayerId(0)].minerals, 150);
    }

    #[test]
    fn test_terrain_patch_applies() {
        let snapshot = Scenario::from_ron_str(SMALL).unwrap().to_snapshot().unwrap();
        let tile = snapshot.map.tile(1, 1).unwrap();
        assert!(!tile.buildable);
        assert!(tile.creep);
        assert!(snapshot.map.tile(2, 2).unwrap().buildable);
        assert_eq!(snapshot.map.tile(20, 3).unwrap().region, Some(RegionId(2)));
    }

    #[test]
    fn test_build_derives_topology() {
        let (_, topology) = Scenario::from_ron_str(SMALL).unwrap().build().unwrap();
        assert_eq!(topology.areas().count(), 2);
        assert_eq!(topology.chokepoints().len(), 1);
    }

    #[test]
    fn test_missing_owner_is_invalid() {
        let mut scenario = Scenario::from_ron_str(SMALL).unwrap();
        scenario.units[0].player = 5;
        let err = scenario.to_snapshot().unwrap_err();
        assert!(matches!(err, ScenarioError::Invalid(QueryError::MissingOwner { .. })));
    }

    #[test]
    fn test_empty_map_is_invalid() {
        let mut scenario = Scenario::from_ron_str(SMALL).unwrap();
        scenario.map_size = (0, 16);
        assert!(matches!(scenario.to_snapshot(), Err(ScenarioError::Invalid(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Scenario::load("no/such/scenario.ron"),
            Err(ScenarioError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_unknown_unit_type_fails_to_parse() {
        let ron = SMALL.replace("TerranCommandCenter", "TerranCastle");
        assert!(matches!(Scenario::from_ron_str(&ron), Err(ScenarioError::ParseError(_))));
    }
}
