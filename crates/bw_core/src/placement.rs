//! Build placement validation.
//!
//! [`Game::placement_failure`] runs the engine's placement rules in order
//! and reports the first one that rejects the site. Every other entry point
//! is a thin wrapper around it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::UnitType;
use crate::client::EngineClient;
use crate::game::{Game, StaticUnit};
use crate::position::{Position, TilePosition};
use crate::snapshot::{Unit, UnitId};

/// Tile offset from a main building's top-left to its addon's top-left.
pub const ADDON_OFFSET: TilePosition = TilePosition::new(4, 1);

/// Ring radius, in tiles, searched by [`Game::build_location`] by default.
pub const DEFAULT_BUILD_SEARCH_RANGE: i32 = 64;

/// Why a structure cannot be placed at a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum PlacementFailure {
    /// Part of the footprint is off the map.
    #[error("footprint leaves the map")]
    OutOfBounds,

    /// A refinery must sit exactly on a known geyser.
    #[error("no known geyser at the site")]
    NoGeyser,

    /// The geyser at the site is visible and no longer a plain geyser.
    #[error("geyser {geyser} already has a refinery")]
    GeyserTaken {
        /// The geyser unit.
        geyser: UnitId,
    },

    /// A covered tile is not buildable.
    #[error("tile ({x}, {y}) is not buildable")]
    Unbuildable {
        /// Tile x.
        x: i32,
        /// Tile y.
        y: i32,
    },

    /// A covered tile has not been explored.
    #[error("tile ({x}, {y}) is unexplored")]
    Unexplored {
        /// Tile x.
        x: i32,
        /// Tile y.
        y: i32,
    },

    /// The builder has no ground path to the site.
    #[error("builder {builder} cannot reach the site")]
    Unreachable {
        /// The builder.
        builder: UnitId,
    },

    /// The builder is a structure that cannot relocate.
    #[error("builder {builder} is a grounded structure")]
    BuilderCannotRelocate {
        /// The builder.
        builder: UnitId,
    },

    /// A ground unit stands in the footprint.
    #[error("unit {unit} is in the way")]
    Occupied {
        /// The blocking unit.
        unit: UnitId,
    },

    /// A covered tile's creep does not match the type's requirement.
    #[error("creep mismatch at tile ({x}, {y})")]
    CreepMismatch {
        /// Tile x.
        x: i32,
        /// Tile y.
        y: i32,
    },

    /// The footprint center is outside every power field.
    #[error("site is unpowered")]
    Unpowered,

    /// A resource depot would sit too close to a resource.
    #[error("too close to resource {resource}")]
    TooCloseToResource {
        /// The mineral field or geyser.
        resource: UnitId,
    },
}

impl<C: EngineClient> Game<C> {
    /// Whether `unit_type` can be placed with its top-left at `tile`.
    ///
    /// With a builder, an addon's site is offset from the builder's own site
    /// and the builder must be able to reach or land there. With
    /// `check_explored`, every covered tile must have been explored.
    #[must_use]
    pub fn can_build_here(
        &self,
        tile: TilePosition,
        unit_type: UnitType,
        builder: Option<&Unit>,
        check_explored: bool,
    ) -> bool {
        self.placement_failure(tile, unit_type, builder, check_explored).is_none()
    }

    /// The first placement rule that rejects the site, if any.
    #[must_use]
    pub fn placement_failure(
        &self,
        tile: TilePosition,
        unit_type: UnitType,
        builder: Option<&Unit>,
        check_explored: bool,
    ) -> Option<PlacementFailure> {
        let failure = self.check_site(tile, unit_type, builder, check_explored, 0);
        if let Some(failure) = failure {
            tracing::trace!("Cannot place {unit_type} at {tile}: {failure}");
        }
        failure
    }

    /// The first tile on rings of growing radius around `desired` where
    /// `unit_type` can be placed without a builder.
    ///
    /// Each ring is scanned top to bottom, left to right.
    #[must_use]
    pub fn build_location(&self, unit_type: UnitType, desired: TilePosition, max_range: i32) -> Option<TilePosition> {
        for radius in 0..=max_range {
            for y in desired.y - radius..=desired.y + radius {
                let on_edge_row = (y - desired.y).abs() == radius;
                let mut x = desired.x - radius;
                while x <= desired.x + radius {
                    let tile = TilePosition::new(x, y);
                    if self.is_valid_tile(tile) && self.can_build_here(tile, unit_type, None, false) {
                        tracing::debug!("Found site for {unit_type} at {tile} (ring {radius})");
                        return Some(tile);
                    }
                    // Interior rows only contribute their two end tiles.
                    x += if on_edge_row || radius == 0 { 1 } else { 2 * radius };
                }
            }
        }
        None
    }

    fn check_site(
        &self,
        tile: TilePosition,
        unit_type: UnitType,
        builder: Option<&Unit>,
        check_explored: bool,
        depth: u8,
    ) -> Option<PlacementFailure> {
        debug_assert!(depth <= 1, "addon relocation recursed more than once");

        let lt = if builder.is_some() && unit_type.is_addon() {
            tile + ADDON_OFFSET
        } else {
            tile
        };
        let rb = lt + unit_type.tile_size();

        if !self.is_valid_tile(lt) || !self.is_valid_position(rb.to_position() - Position::new(1, 1)) {
            return Some(PlacementFailure::OutOfBounds);
        }

        if unit_type.is_refinery() {
            return self.refinery_failure(lt);
        }

        if !unit_type.is_start_location() {
            if let Some(failure) = self.terrain_failure(lt, rb, check_explored) {
                return Some(failure);
            }
            if let Some(failure) = builder.and_then(|b| self.builder_failure(b, lt, unit_type)) {
                return Some(failure);
            }
            if let Some(failure) = self.occupancy_failure(lt, rb, unit_type, builder) {
                return Some(failure);
            }
            if let Some(failure) = self.creep_failure(lt, rb, unit_type) {
                return Some(failure);
            }
            if unit_type.requires_psi() && !self.has_power(lt, Some(unit_type)) {
                return Some(PlacementFailure::Unpowered);
            }
            if unit_type.is_resource_depot() {
                if let Some(failure) = self.resource_failure(lt) {
                    return Some(failure);
                }
            }
        }

        // The main building has to stand where it will build the addon from.
        if let Some(b) = builder {
            if !b.unit_type.is_addon() && unit_type.is_addon() {
                return self.check_site(lt - ADDON_OFFSET, b.unit_type, builder, check_explored, depth + 1);
            }
        }

        None
    }

    fn refinery_failure(&self, lt: TilePosition) -> Option<PlacementFailure> {
        let Some(geyser) = self.static_geysers().iter().find(|g| g.initial_tile_position == lt) else {
            return Some(PlacementFailure::NoGeyser);
        };
        // A refinery morphs the geyser in place, so the same unit shows the change.
        match self.unit(geyser.id) {
            Some(u) if u.is_visible() && u.unit_type != UnitType::VespeneGeyser => {
                Some(PlacementFailure::GeyserTaken { geyser: geyser.id })
            }
            _ => None,
        }
    }

    fn terrain_failure(&self, lt: TilePosition, rb: TilePosition, check_explored: bool) -> Option<PlacementFailure> {
        for x in lt.x..rb.x {
            for y in lt.y..rb.y {
                let tile = TilePosition::new(x, y);
                if !self.is_buildable(tile) {
                    return Some(PlacementFailure::Unbuildable { x, y });
                }
                if check_explored && !self.is_explored(tile) {
                    return Some(PlacementFailure::Unexplored { x, y });
                }
            }
        }
        None
    }

    fn builder_failure(&self, builder: &Unit, lt: TilePosition, unit_type: UnitType) -> Option<PlacementFailure> {
        if !builder.unit_type.is_building() {
            let center = footprint_center(lt, unit_type);
            if !self.unit_has_path(builder, center) {
                return Some(PlacementFailure::Unreachable { builder: builder.id });
            }
        } else if !builder.unit_type.is_flying_building()
            && unit_type != UnitType::ZergNydusCanal
            && !unit_type.is_flag_beacon()
        {
            return Some(PlacementFailure::BuilderCannotRelocate { builder: builder.id });
        }
        None
    }

    fn occupancy_failure(
        &self,
        lt: TilePosition,
        rb: TilePosition,
        unit_type: UnitType,
        builder: Option<&Unit>,
    ) -> Option<PlacementFailure> {
        if unit_type == UnitType::ZergNydusCanal {
            return None;
        }
        let builder_id = builder.map(|b| b.id);
        self.units_in_rectangle(lt.to_position(), rb.to_position(), |u| {
            !u.is_flying() && !u.is_loaded() && Some(u.id) != builder_id
        })
        .into_iter()
        .find(|u| !(unit_type.is_addon() && u.unit_type.can_move()))
        .map(|u| PlacementFailure::Occupied { unit: u.id })
    }

    fn creep_failure(&self, lt: TilePosition, rb: TilePosition, unit_type: UnitType) -> Option<PlacementFailure> {
        let needs_creep = unit_type.requires_creep();
        // Zerg structures without a creep requirement may stand anywhere.
        if unit_type.race() == crate::catalog::Race::Zerg && !needs_creep {
            return None;
        }
        for x in lt.x..rb.x {
            for y in lt.y..rb.y {
                if self.has_creep(TilePosition::new(x, y)) != needs_creep {
                    return Some(PlacementFailure::CreepMismatch { x, y });
                }
            }
        }
        None
    }

    fn resource_failure(&self, lt: TilePosition) -> Option<PlacementFailure> {
        let blocking = |resource: &&StaticUnit, (left, up, right, down): (i32, i32, i32, i32)| {
            let tp = resource.initial_tile_position;
            !self.is_disproven(resource)
                && tp.x > lt.x - left
                && tp.y > lt.y - up
                && tp.x < lt.x + right
                && tp.y < lt.y + down
        };

        self.static_minerals()
            .iter()
            .find(|m| blocking(m, (5, 4, 7, 6)))
            .or_else(|| self.static_geysers().iter().find(|g| blocking(g, (7, 5, 7, 6))))
            .map(|r| PlacementFailure::TooCloseToResource { resource: r.id })
    }

    /// The resource's tile is in sight but the resource itself is not, so it
    /// no longer exists.
    fn is_disproven(&self, resource: &StaticUnit) -> bool {
        let tp = resource.initial_tile_position;
        let tile_seen = self.is_visible(tp) || self.is_visible(TilePosition::new(tp.x + 1, tp.y));
        let unit_seen = self.unit(resource.id).is_some_and(|u| u.exists() && u.is_visible());
        tile_seen && !unit_seen
    }
}

/// Center pixel of a `unit_type` footprint with top-left `lt`.
pub(crate) fn footprint_center(lt: TilePosition, unit_type: UnitType) -> Position {
    lt.to_position() + unit_type.tile_size().to_position() / 2
}
