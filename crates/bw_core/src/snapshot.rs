//! Per-frame match state.
//!
//! A [`Snapshot`] is the complete, immutable view of one frame: terrain,
//! regions, players and units keyed by stable ids. The engine hands over a
//! fresh snapshot every frame and every query runs against exactly one.
//!
//! All collections are ordered maps so iteration, and therefore every query
//! result, is deterministic.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{Race, TechType, UnitType, UpgradeType};
use crate::error::{QueryError, Result};
use crate::position::{Position, TilePosition, TILE_SIZE};

// ============================================================================
// Identifiers
// ============================================================================

macro_rules! id_type {
    ($name:ident, $inner:ty, $doc:literal) => {
        #[doc = $doc]
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            Default,
            Serialize,
            Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(UnitId, u32, "Stable engine identifier of a unit.");
id_type!(PlayerId, u8, "Engine identifier of a player slot.");
id_type!(RegionId, u16, "Identifier of a terrain region.");

// ============================================================================
// Units
// ============================================================================

/// Lifecycle flags of a unit for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitFlags(u32);

impl UnitFlags {
    /// No flags.
    pub const NONE: Self = Self(0);
    /// The unit is alive and on the map.
    pub const EXISTS: Self = Self(1 << 0);
    /// The local player can currently see the unit.
    pub const VISIBLE: Self = Self(1 << 1);
    /// Construction or morph has finished.
    pub const COMPLETED: Self = Self(1 << 2);
    /// A lifted-off structure.
    pub const LIFTED: Self = Self(1 << 3);
    /// Airborne.
    pub const FLYING: Self = Self(1 << 4);
    /// Inside a transport or bunker.
    pub const LOADED: Self = Self(1 << 5);
    /// No current order.
    pub const IDLE: Self = Self(1 << 6);

    /// Flags of a live, finished, idle unit in plain sight.
    pub const ACTIVE: Self =
        Self(Self::EXISTS.0 | Self::VISIBLE.0 | Self::COMPLETED.0 | Self::IDLE.0);

    /// Create from raw bits.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Get raw bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Check if all flags in `other` are set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Combine with another set of flags.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Remove the flags in `other`.
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl std::ops::BitOr for UnitFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

/// A unit or neutral map object as seen this frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Stable identifier.
    pub id: UnitId,
    /// Current type.
    pub unit_type: UnitType,
    /// Owner.
    pub player: PlayerId,
    /// Center pixel.
    pub position: Position,
    /// Top-left tile at match start.
    pub initial_tile_position: TilePosition,
    /// Lifecycle flags.
    pub flags: UnitFlags,
    /// Attached addon.
    #[serde(default)]
    pub addon: Option<UnitId>,
    /// Larva currently attached to this hatchery.
    #[serde(default)]
    pub larva_count: u32,
    /// Interceptors carried.
    #[serde(default)]
    pub interceptor_count: u32,
    /// Scarabs carried.
    #[serde(default)]
    pub scarab_count: u32,
    /// Types waiting in the production queue.
    #[serde(default)]
    pub training_queue: Vec<UnitType>,
    /// Paired exit of a nydus canal.
    #[serde(default)]
    pub nydus_exit: Option<UnitId>,
}

impl Unit {
    /// A live, completed, idle, visible unit centred on `position`.
    ///
    /// The initial tile position is derived from `position`.
    #[must_use]
    pub fn new(id: UnitId, unit_type: UnitType, player: PlayerId, position: Position) -> Self {
        let mut unit = Self {
            id,
            unit_type,
            player,
            position,
            initial_tile_position: TilePosition::ORIGIN,
            flags: UnitFlags::ACTIVE,
            addon: None,
            larva_count: 0,
            interceptor_count: 0,
            scarab_count: 0,
            training_queue: Vec::new(),
            nydus_exit: None,
        };
        unit.initial_tile_position = unit.tile_position();
        unit
    }

    /// A unit whose footprint's top-left tile is `tile`.
    #[must_use]
    pub fn at_tile(id: UnitId, unit_type: UnitType, player: PlayerId, tile: TilePosition) -> Self {
        let center = Position::new(
            tile.x * TILE_SIZE + unit_type.tile_width() * TILE_SIZE / 2,
            tile.y * TILE_SIZE + unit_type.tile_height() * TILE_SIZE / 2,
        );
        Self::new(id, unit_type, player, center)
    }

    /// Replace the lifecycle flags.
    #[must_use]
    pub fn with_flags(mut self, flags: UnitFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Left edge of the footprint, in pixels.
    #[must_use]
    pub fn left(&self) -> i32 {
        self.position.x - self.unit_type.data().dimension_left
    }

    /// Top edge of the footprint, in pixels.
    #[must_use]
    pub fn top(&self) -> i32 {
        self.position.y - self.unit_type.data().dimension_up
    }

    /// Right edge of the footprint, in pixels (inclusive).
    #[must_use]
    pub fn right(&self) -> i32 {
        self.position.x + self.unit_type.data().dimension_right
    }

    /// Bottom edge of the footprint, in pixels (inclusive).
    #[must_use]
    pub fn bottom(&self) -> i32 {
        self.position.y + self.unit_type.data().dimension_down
    }

    /// Top-left tile of the type's build footprint around the current center.
    #[must_use]
    pub fn tile_position(&self) -> TilePosition {
        let half_w = self.unit_type.tile_width() * TILE_SIZE / 2;
        let half_h = self.unit_type.tile_height() * TILE_SIZE / 2;
        TilePosition::new(
            (self.position.x - half_w).div_euclid(TILE_SIZE),
            (self.position.y - half_h).div_euclid(TILE_SIZE),
        )
    }

    /// Squared distance from the footprint to `target`; zero when inside.
    #[must_use]
    pub fn footprint_distance_squared(&self, target: Position) -> i64 {
        let dx = (self.left() - target.x).max(target.x - self.right()).max(0);
        let dy = (self.top() - target.y).max(target.y - self.bottom()).max(0);
        i64::from(dx) * i64::from(dx) + i64::from(dy) * i64::from(dy)
    }

    /// Alive and on the map.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.flags.contains(UnitFlags::EXISTS)
    }

    /// Seen by the local player this frame.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.flags.contains(UnitFlags::VISIBLE)
    }

    /// Finished constructing.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.flags.contains(UnitFlags::COMPLETED)
    }

    /// A lifted structure.
    #[must_use]
    pub fn is_lifted(&self) -> bool {
        self.flags.contains(UnitFlags::LIFTED)
    }

    /// Airborne, either by type or because it lifted off.
    #[must_use]
    pub fn is_flying(&self) -> bool {
        self.flags.contains(UnitFlags::FLYING) || self.is_lifted() || self.unit_type.is_flyer()
    }

    /// Inside a transport.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.flags.contains(UnitFlags::LOADED)
    }

    /// Without orders.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.flags.contains(UnitFlags::IDLE)
    }
}

// ============================================================================
// Players
// ============================================================================

/// Economy and tech state of one player.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Player {
    /// Slot identifier.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Race.
    pub race: Race,
    /// Neutral resource owner.
    pub neutral: bool,
    /// Banked minerals.
    pub minerals: i32,
    /// Banked gas.
    pub gas: i32,
    /// Supply in use per playable race, in engine units.
    pub supply_used: [i32; 3],
    /// Supply available per playable race, in engine units.
    pub supply_total: [i32; 3],
    /// Finished research.
    pub researched: BTreeSet<TechType>,
    /// Research in progress.
    pub researching: BTreeSet<TechType>,
    /// Finished upgrade levels.
    pub upgrade_levels: BTreeMap<UpgradeType, i32>,
    /// Upgrades in progress.
    pub upgrading: BTreeSet<UpgradeType>,
    /// Custom-rule caps on upgrade levels.
    pub max_upgrade_levels: BTreeMap<UpgradeType, i32>,
    /// Unit types disabled by custom rules.
    pub unavailable_units: BTreeSet<UnitType>,
    /// Techs disabled by custom rules.
    pub unavailable_techs: BTreeSet<TechType>,
}

impl Player {
    /// A player with no resources or tech.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, race: Race) -> Self {
        Self {
            id,
            name: name.into(),
            race,
            ..Self::default()
        }
    }

    /// Supply available for `race`; zero for races without supply.
    #[must_use]
    pub fn supply_total(&self, race: Race) -> i32 {
        race.supply_index().map_or(0, |i| self.supply_total[i])
    }

    /// Supply in use for `race`; zero for races without supply.
    #[must_use]
    pub fn supply_used(&self, race: Race) -> i32 {
        race.supply_index().map_or(0, |i| self.supply_used[i])
    }

    /// Whether `tech` has finished.
    #[must_use]
    pub fn has_researched(&self, tech: TechType) -> bool {
        self.researched.contains(&tech)
    }

    /// Whether `tech` is in progress.
    #[must_use]
    pub fn is_researching(&self, tech: TechType) -> bool {
        self.researching.contains(&tech)
    }

    /// Finished level of `upgrade`.
    #[must_use]
    pub fn upgrade_level(&self, upgrade: UpgradeType) -> i32 {
        self.upgrade_levels.get(&upgrade).copied().unwrap_or(0)
    }

    /// Whether `upgrade` is in progress.
    #[must_use]
    pub fn is_upgrading(&self, upgrade: UpgradeType) -> bool {
        self.upgrading.contains(&upgrade)
    }

    /// Highest reachable level of `upgrade` under the current rules.
    #[must_use]
    pub fn max_upgrade_level(&self, upgrade: UpgradeType) -> i32 {
        self.max_upgrade_levels
            .get(&upgrade)
            .copied()
            .unwrap_or_else(|| upgrade.max_repeats())
    }

    /// Whether custom rules allow producing `unit_type`.
    #[must_use]
    pub fn is_unit_available(&self, unit_type: UnitType) -> bool {
        !self.unavailable_units.contains(&unit_type)
    }

    /// Whether custom rules allow researching `tech`.
    #[must_use]
    pub fn is_research_available(&self, tech: TechType) -> bool {
        !self.unavailable_techs.contains(&tech)
    }
}

// ============================================================================
// Terrain
// ============================================================================

/// Terrain state of one build tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileInfo {
    /// Structures may be placed here.
    pub buildable: bool,
    /// Ground units may stand here.
    pub walkable: bool,
    /// The local player has seen this tile.
    pub explored: bool,
    /// The local player currently sees this tile.
    pub visible: bool,
    /// Covered by creep.
    pub creep: bool,
    /// Elevation level.
    pub ground_height: i32,
    /// Region this tile belongs to.
    pub region: Option<RegionId>,
}

impl Default for TileInfo {
    fn default() -> Self {
        Self {
            buildable: true,
            walkable: true,
            explored: true,
            visible: true,
            creep: false,
            ground_height: 0,
            region: None,
        }
    }
}

/// Tile grid of the map, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapData {
    width: u16,
    height: u16,
    tiles: Vec<TileInfo>,
}

impl MapData {
    /// An open, fully explored map of `width` × `height` tiles.
    pub fn new(width: u16, height: u16) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(QueryError::InvalidMapSize { width, height });
        }
        Ok(Self {
            width,
            height,
            tiles: vec![TileInfo::default(); usize::from(width) * usize::from(height)],
        })
    }

    /// Width in tiles.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in tiles.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if TilePosition::new(x, y).is_within(self.width, self.height) {
            Some(y as usize * usize::from(self.width) + x as usize)
        } else {
            None
        }
    }

    /// Tile at `(x, y)`, or `None` off the map.
    #[must_use]
    pub fn tile(&self, x: i32, y: i32) -> Option<&TileInfo> {
        self.index(x, y).and_then(|i| self.tiles.get(i))
    }

    /// Mutable tile at `(x, y)`, or `None` off the map.
    pub fn tile_mut(&mut self, x: i32, y: i32) -> Option<&mut TileInfo> {
        match self.index(x, y) {
            Some(i) => self.tiles.get_mut(i),
            None => None,
        }
    }

    /// Apply `edit` to every tile of the rectangle with top-left `(x, y)`.
    ///
    /// Off-map tiles are skipped.
    pub fn paint(&mut self, x: i32, y: i32, width: i32, height: i32, mut edit: impl FnMut(&mut TileInfo)) {
        for ty in y..y + height {
            for tx in x..x + width {
                if let Some(tile) = self.tile_mut(tx, ty) {
                    edit(tile);
                }
            }
        }
    }

    /// Iterate over `(x, y, tile)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, &TileInfo)> {
        let width = usize::from(self.width);
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, tile)| ((i % width) as i32, (i / width) as i32, tile))
    }
}

/// A connected terrain partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Identifier.
    pub id: RegionId,
    /// Connectivity group; regions sharing it are mutually reachable.
    pub group_id: u16,
    /// Representative pixel.
    pub center: Position,
    /// Adjacent regions.
    #[serde(default)]
    pub neighbors: Vec<RegionId>,
}

// ============================================================================
// Snapshot
// ============================================================================

/// Everything known about the match at one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Frame number; 0 before the first engine frame.
    pub frame: u32,
    /// Terrain.
    pub map: MapData,
    /// Regions by id.
    pub regions: BTreeMap<RegionId, Region>,
    /// Players by id.
    pub players: BTreeMap<PlayerId, Player>,
    /// Units by id, including ones the local player cannot see.
    pub units: BTreeMap<UnitId, Unit>,
    /// Units the engine currently shows to the local player.
    pub accessible: BTreeSet<UnitId>,
    /// Start locations, top-left tiles.
    pub start_locations: Vec<TilePosition>,
    /// The local player, absent for observers and replays.
    pub self_player: Option<PlayerId>,
    /// Owner of resources and map objects.
    pub neutral_player: Option<PlayerId>,
}

impl Snapshot {
    /// An empty frame-0 snapshot over `map`.
    #[must_use]
    pub fn new(map: MapData) -> Self {
        Self {
            frame: 0,
            map,
            regions: BTreeMap::new(),
            players: BTreeMap::new(),
            units: BTreeMap::new(),
            accessible: BTreeSet::new(),
            start_locations: Vec::new(),
            self_player: None,
            neutral_player: None,
        }
    }

    /// Add or replace a unit; `accessible` marks it as shown to the local player.
    pub fn insert_unit(&mut self, unit: Unit, accessible: bool) {
        if accessible {
            self.accessible.insert(unit.id);
        } else {
            self.accessible.remove(&unit.id);
        }
        self.units.insert(unit.id, unit);
    }

    /// Add or replace a player.
    pub fn insert_player(&mut self, player: Player) {
        self.players.insert(player.id, player);
    }

    /// Add or replace a region.
    pub fn insert_region(&mut self, region: Region) {
        self.regions.insert(region.id, region);
    }

    /// Check cross references: owners, tile regions and the player slots.
    pub fn validate(&self) -> Result<()> {
        for unit in self.units.values() {
            if !self.players.contains_key(&unit.player) {
                return Err(QueryError::MissingOwner {
                    unit: unit.id,
                    player: unit.player,
                });
            }
        }

        for (x, y, tile) in self.map.iter() {
            if let Some(region) = tile.region {
                if !self.regions.contains_key(&region) {
                    return Err(QueryError::MissingRegion { x, y, region });
                }
            }
        }

        for player in [self.self_player, self.neutral_player].into_iter().flatten() {
            if !self.players.contains_key(&player) {
                return Err(QueryError::MissingLocalPlayer(player));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Snapshot {
        Snapshot::new(MapData::new(16, 16).unwrap())
    }

    #[test]
    fn test_zero_sized_map_is_rejected() {
        assert_eq!(
            MapData::new(0, 8),
            Err(QueryError::InvalidMapSize { width: 0, height: 8 })
        );
    }

    #[test]
    fn test_tile_lookup_off_map() {
        let map = MapData::new(4, 4).unwrap();
        assert!(map.tile(3, 3).is_some());
        assert!(map.tile(4, 0).is_none());
        assert!(map.tile(-1, 0).is_none());
    }

    #[test]
    fn test_paint_clips_to_map() {
        let mut map = MapData::new(4, 4).unwrap();
        map.paint(2, 2, 5, 5, |t| t.creep = true);
        let creep: Vec<_> = map.iter().filter(|(_, _, t)| t.creep).map(|(x, y, _)| (x, y)).collect();
        assert_eq!(creep, vec![(2, 2), (3, 2), (2, 3), (3, 3)]);
    }

    #[test]
    fn test_building_tile_position_from_center() {
        let cc = Unit::at_tile(UnitId(1), UnitType::TerranCommandCenter, PlayerId(0), TilePosition::new(5, 7));
        assert_eq!(cc.position, Position::new(5 * 32 + 64, 7 * 32 + 48));
        assert_eq!(cc.tile_position(), TilePosition::new(5, 7));
        assert_eq!(cc.initial_tile_position, TilePosition::new(5, 7));
        assert_eq!(cc.left(), 160);
        assert_eq!(cc.right(), 160 + 127);
    }

    #[test]
    fn test_footprint_distance_is_zero_inside() {
        let pylon = Unit::at_tile(UnitId(1), UnitType::ProtossPylon, PlayerId(0), TilePosition::new(0, 0));
        assert_eq!(pylon.footprint_distance_squared(Position::new(10, 10)), 0);
        assert_eq!(pylon.footprint_distance_squared(Position::new(63 + 3, 0)), 9);
    }

    #[test]
    fn test_flyer_types_are_flying_without_flag() {
        let wraith = Unit::new(UnitId(1), UnitType::TerranWraith, PlayerId(0), Position::new(50, 50));
        assert!(wraith.is_flying());
        let barracks = Unit::new(UnitId(2), UnitType::TerranBarracks, PlayerId(0), Position::new(200, 200))
            .with_flags(UnitFlags::ACTIVE | UnitFlags::LIFTED);
        assert!(barracks.is_flying());
    }

    #[test]
    fn test_player_supply_per_race() {
        let mut player = Player::new(PlayerId(0), "p", Race::Zerg);
        player.supply_total = [18, 0, 0];
        player.supply_used = [8, 0, 0];
        assert_eq!(player.supply_total(Race::Zerg), 18);
        assert_eq!(player.supply_used(Race::Zerg), 8);
        assert_eq!(player.supply_total(Race::Neutral), 0);
    }

    #[test]
    fn test_max_upgrade_level_override() {
        let mut player = Player::new(PlayerId(0), "p", Race::Terran);
        assert_eq!(player.max_upgrade_level(UpgradeType::TerranInfantryArmor), 3);
        player.max_upgrade_levels.insert(UpgradeType::TerranInfantryArmor, 1);
        assert_eq!(player.max_upgrade_level(UpgradeType::TerranInfantryArmor), 1);
    }

    #[test]
    fn test_validate_catches_missing_owner() {
        let mut snap = snapshot();
        snap.insert_unit(Unit::new(UnitId(4), UnitType::TerranMarine, PlayerId(9), Position::new(40, 40)), true);
        assert_eq!(
            snap.validate(),
            Err(QueryError::MissingOwner { unit: UnitId(4), player: PlayerId(9) })
        );
    }

    #[test]
    fn test_validate_catches_missing_region() {
        let mut snap = snapshot();
        if let Some(tile) = snap.map.tile_mut(2, 3) {
            tile.region = Some(RegionId(7));
        }
        assert_eq!(
            snap.validate(),
            Err(QueryError::MissingRegion { x: 2, y: 3, region: RegionId(7) })
        );
    }

    #[test]
    fn test_validate_catches_missing_local_player() {
        let mut snap = snapshot();
        snap.self_player = Some(PlayerId(1));
        assert_eq!(snap.validate(), Err(QueryError::MissingLocalPlayer(PlayerId(1))));
    }
}
