//! # BW Core
//!
//! Frame query and validation core for Brood War bots.
//!
//! This crate answers questions about **one** frame of a running match:
//! - Which units are where
//! - Whether a structure may be placed on a site
//! - Whether the local player may produce, research or upgrade something
//! - How much damage one hit deals
//! - Whether two points are connected by ground
//!
//! It owns no I/O and keeps no state between frames beyond the static
//! resources seen at match start. The surrounding process feeds it one
//! [`snapshot::Snapshot`] per frame and forwards outbound orders through an
//! [`client::EngineClient`].
//!
//! ## Crate Structure
//!
//! - [`catalog`] - Static unit, weapon, tech and upgrade tables
//! - [`snapshot`] - Per-frame match state
//! - [`game`] - The per-match façade every query hangs off
//! - [`spatial`], [`power`], [`placement`] - Map queries
//! - [`production`], [`research`] - Legality checks
//! - [`combat`] - Damage resolution
//! - [`connectivity`], [`pathfinding`] - Ground reachability and routes

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod catalog;
pub mod client;
pub mod combat;
pub mod connectivity;
pub mod error;
pub mod game;
pub mod pathfinding;
pub mod placement;
pub mod position;
pub mod power;
pub mod production;
pub mod research;
pub mod snapshot;
pub mod spatial;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::catalog::{DamageType, Race, TechType, UnitSizeType, UnitType, UpgradeType, WeaponType};
    pub use crate::client::{EngineClient, NullClient, RecordingClient, UnitCommand, UnitCommandType};
    pub use crate::error::{QueryError, Result};
    pub use crate::game::{Game, StaticUnit};
    pub use crate::pathfinding::{AreaGraph, AreaId, ChokePath, ChokePoint, TerrainTopology};
    pub use crate::placement::{PlacementFailure, DEFAULT_BUILD_SEARCH_RANGE};
    pub use crate::position::{Position, TilePosition, WalkPosition};
    pub use crate::production::LegalityFailure;
    pub use crate::snapshot::{MapData, Player, PlayerId, Region, RegionId, Snapshot, TileInfo, Unit, UnitFlags, UnitId};
    pub use crate::spatial::filters;
}
