//! Psi power fields.
//!
//! A completed pylon powers an elliptical area around its center. The
//! engine approximates the ellipse with a 16 × 10 grid of 32-pixel cells,
//! reproduced here as [`PSI_FIELD_MASK`]. A point is powered when it falls
//! into a set cell of any of the player's completed pylons.

use crate::catalog::UnitType;
use crate::client::EngineClient;
use crate::game::Game;
use crate::position::{Position, TilePosition, TILE_SIZE};
use crate::snapshot::PlayerId;

/// Horizontal reach of a power field from the pylon center, exclusive.
pub const PSI_FIELD_HALF_WIDTH: i32 = 256;

/// Vertical reach of a power field from the pylon center, exclusive.
pub const PSI_FIELD_HALF_HEIGHT: i32 = 160;

/// Power field shape, `[row][column]` in 32-pixel cells, pylon centred
/// between columns 7/8 and rows 4/5.
pub const PSI_FIELD_MASK: [[u8; 16]; 10] = [
    [0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0],
    [0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0],
    [0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0],
    [0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0],
    [0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0],
];

/// Whether a pylon centred at `source` powers `target`.
#[must_use]
pub fn in_psi_field(source: Position, target: Position) -> bool {
    let dx = target.x - source.x;
    let dy = target.y - source.y;
    if dx.abs() >= PSI_FIELD_HALF_WIDTH || dy.abs() >= PSI_FIELD_HALF_HEIGHT {
        return false;
    }
    let row = ((dy + PSI_FIELD_HALF_HEIGHT) / TILE_SIZE) as usize;
    let column = ((dx + PSI_FIELD_HALF_WIDTH) / TILE_SIZE) as usize;
    PSI_FIELD_MASK[row][column] != 0
}

impl<C: EngineClient> Game<C> {
    /// Whether `position` is powered for `player`.
    ///
    /// A known type that is not a psi-requiring building is always powered.
    /// Otherwise the player's existing, completed pylons are checked.
    #[must_use]
    pub fn has_power_at(&self, player: PlayerId, position: Position, unit_type: Option<UnitType>) -> bool {
        if !self.is_valid_position(position) {
            return false;
        }
        if let Some(unit_type) = unit_type {
            if !unit_type.requires_psi() || !unit_type.is_building() {
                return true;
            }
        }
        self.snapshot()
            .units
            .values()
            .filter(|u| {
                u.player == player
                    && u.unit_type == UnitType::ProtossPylon
                    && u.exists()
                    && u.is_completed()
            })
            .any(|pylon| in_psi_field(pylon.position, position))
    }

    /// [`Self::has_power_at`] for the local player; `false` without one.
    #[must_use]
    pub fn has_power_precise(&self, position: Position, unit_type: Option<UnitType>) -> bool {
        self.snapshot()
            .self_player
            .is_some_and(|me| self.has_power_at(me, position, unit_type))
    }

    /// Whether a structure of `unit_type` with top-left `tile` would be
    /// powered. Without a type, the tile's top-left pixel is checked.
    #[must_use]
    pub fn has_power(&self, tile: TilePosition, unit_type: Option<UnitType>) -> bool {
        match unit_type {
            Some(t) => self.has_power_sized(tile, t.tile_width(), t.tile_height(), Some(t)),
            None => self.has_power_precise(tile.to_position(), None),
        }
    }

    /// Whether a `width` × `height` tile footprint at `tile` would be powered.
    #[must_use]
    pub fn has_power_sized(
        &self,
        tile: TilePosition,
        width: i32,
        height: i32,
        unit_type: Option<UnitType>,
    ) -> bool {
        let center = Position::new(
            tile.x * TILE_SIZE + width * TILE_SIZE / 2,
            tile.y * TILE_SIZE + height * TILE_SIZE / 2,
        );
        self.has_power_precise(center, unit_type)
    }
}
