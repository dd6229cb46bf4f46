//! Error types for the query core.
//!
//! Expected negative answers (off-map tiles, missing units, no local player)
//! are never errors: queries return `false`, `None` or an empty `Vec`.
//! [`QueryError`] is reserved for contract violations at the boundary with
//! the engine, such as identifiers outside the catalog's domain.

use thiserror::Error;

use crate::snapshot::{PlayerId, RegionId, UnitId};

/// Result type alias using [`QueryError`].
pub type Result<T> = std::result::Result<T, QueryError>;

/// Top-level error type for all query-core errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Engine unit type identifier not present in the catalog.
    #[error("Unknown unit type id: {0}")]
    UnknownUnitType(u16),

    /// Engine weapon type identifier not present in the catalog.
    #[error("Unknown weapon type id: {0}")]
    UnknownWeaponType(u16),

    /// Engine tech type identifier not present in the catalog.
    #[error("Unknown tech type id: {0}")]
    UnknownTechType(u16),

    /// Engine upgrade type identifier not present in the catalog.
    #[error("Unknown upgrade type id: {0}")]
    UnknownUpgradeType(u16),

    /// Unit or type name not present in the catalog.
    #[error("Unknown catalog name: {0}")]
    UnknownName(String),

    /// A unit references an owner missing from the snapshot.
    #[error("Unit {unit} is owned by missing player {player}")]
    MissingOwner {
        /// The offending unit.
        unit: UnitId,
        /// The player it claims as owner.
        player: PlayerId,
    },

    /// A tile references a region missing from the snapshot.
    #[error("Tile ({x}, {y}) references missing region {region}")]
    MissingRegion {
        /// Tile x coordinate.
        x: i32,
        /// Tile y coordinate.
        y: i32,
        /// The region id stored on the tile.
        region: RegionId,
    },

    /// The local player id does not name a player in the snapshot.
    #[error("Local player {0} is not part of the snapshot")]
    MissingLocalPlayer(PlayerId),

    /// A topology edit names an area that was never added.
    #[error("Unknown area: {0}")]
    UnknownArea(u16),

    /// Map dimensions are unusable.
    #[error("Invalid map dimensions {width}x{height}")]
    InvalidMapSize {
        /// Width in tiles.
        width: u16,
        /// Height in tiles.
        height: u16,
    },
}
