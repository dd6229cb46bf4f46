//! The per-match query façade.
//!
//! [`Game`] owns the current [`Snapshot`] and the outbound [`EngineClient`].
//! The query engines (spatial, power, placement, legality, combat,
//! connectivity) each extend it with their own `impl` block, so callers
//! see one object, the way an agent sees the match.
//!
//! Queries borrow `&self`; only [`Game::advance_frame`] and the engine
//! pass-through calls take `&mut self`. A query can therefore never observe
//! a frame swap halfway through.

use serde::{Deserialize, Serialize};

use crate::catalog::UnitType;
use crate::client::{
    CommandType, CoordinateType, DrawShape, EngineClient, NullClient, ShapeType, UnitCommand,
};
use crate::position::{Position, TilePosition};
use crate::snapshot::{Player, PlayerId, Region, RegionId, Snapshot, TileInfo, Unit, UnitId};

/// A unit present when the match started, remembered for the whole match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticUnit {
    /// Identifier.
    pub id: UnitId,
    /// Type at match start.
    pub unit_type: UnitType,
    /// Top-left tile at match start.
    pub initial_tile_position: TilePosition,
    /// Center pixel at match start.
    pub initial_position: Position,
}

impl StaticUnit {
    fn capture(unit: &Unit) -> Self {
        Self {
            id: unit.id,
            unit_type: unit.unit_type,
            initial_tile_position: unit.initial_tile_position,
            initial_position: unit.position,
        }
    }
}

/// Query façade over the current frame.
#[derive(Debug, Clone)]
pub struct Game<C: EngineClient = NullClient> {
    snapshot: Snapshot,
    client: C,
    static_minerals: Vec<StaticUnit>,
    static_geysers: Vec<StaticUnit>,
    static_neutral_units: Vec<StaticUnit>,
}

impl Game<NullClient> {
    /// A game that discards every outbound call.
    #[must_use]
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self::new(snapshot, NullClient)
    }
}

impl<C: EngineClient> Game<C> {
    /// Start a match from its first snapshot.
    ///
    /// Neutral units present now are remembered as the static minerals,
    /// geysers and neutral units, even after they are mined out or hidden.
    pub fn new(snapshot: Snapshot, client: C) -> Self {
        let neutral = snapshot.neutral_player;
        let static_neutral_units: Vec<StaticUnit> = snapshot
            .units
            .values()
            .filter(|u| Some(u.player) == neutral)
            .map(StaticUnit::capture)
            .collect();
        let static_minerals = static_neutral_units
            .iter()
            .filter(|u| u.unit_type.is_mineral_field())
            .copied()
            .collect();
        let static_geysers = static_neutral_units
            .iter()
            .filter(|u| u.unit_type == UnitType::VespeneGeyser)
            .copied()
            .collect();

        tracing::info!(
            "Match start: {}x{} map, {} units, {} static neutrals",
            snapshot.map.width(),
            snapshot.map.height(),
            snapshot.units.len(),
            static_neutral_units.len()
        );

        Self {
            snapshot,
            client,
            static_minerals,
            static_geysers,
            static_neutral_units,
        }
    }

    /// Replace the snapshot with the next frame's.
    pub fn advance_frame(&mut self, snapshot: Snapshot) {
        if cfg!(feature = "debug-validation") {
            if let Err(e) = snapshot.validate() {
                tracing::warn!("Frame {} snapshot is inconsistent: {e}", snapshot.frame);
            }
        }

        tracing::debug!(
            "Advancing frame {} -> {} ({} units, {} accessible)",
            self.snapshot.frame,
            snapshot.frame,
            snapshot.units.len(),
            snapshot.accessible.len()
        );
        self.snapshot = snapshot;
    }

    /// The current frame.
    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// The outbound client.
    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// The outbound client, mutably.
    pub fn client_mut(&mut self) -> &mut C {
        &mut self.client
    }

    /// Consume the game, returning the client.
    pub fn into_client(self) -> C {
        self.client
    }

    pub(crate) fn static_mineral_list(&self) -> &[StaticUnit] {
        &self.static_minerals
    }

    pub(crate) fn static_geyser_list(&self) -> &[StaticUnit] {
        &self.static_geysers
    }

    pub(crate) fn static_neutral_list(&self) -> &[StaticUnit] {
        &self.static_neutral_units
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Unit by id, visible or not.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.snapshot.units.get(&id)
    }

    /// Player by id.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.snapshot.players.get(&id)
    }

    /// Region by id.
    #[must_use]
    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.snapshot.regions.get(&id)
    }

    /// The local player.
    #[must_use]
    pub fn self_player(&self) -> Option<&Player> {
        self.snapshot.self_player.and_then(|id| self.player(id))
    }

    /// The neutral player.
    #[must_use]
    pub fn neutral_player(&self) -> Option<&Player> {
        self.snapshot.neutral_player.and_then(|id| self.player(id))
    }

    /// Every player that is neither neutral nor the local player, by id.
    pub fn enemies(&self) -> impl Iterator<Item = &Player> + '_ {
        let me = self.snapshot.self_player;
        self.snapshot
            .players
            .values()
            .filter(move |p| !p.neutral && Some(p.id) != me && Some(p.id) != self.snapshot.neutral_player)
    }

    /// The first of [`Self::enemies`].
    #[must_use]
    pub fn enemy(&self) -> Option<&Player> {
        self.enemies().next()
    }

    /// Region containing a pixel.
    #[must_use]
    pub fn region_at(&self, position: Position) -> Option<&Region> {
        let tile = position.to_tile_position();
        self.tile(tile)
            .and_then(|t| t.region)
            .and_then(|id| self.region(id))
    }

    // ========================================================================
    // Map
    // ========================================================================

    /// Map width in tiles.
    #[must_use]
    pub fn map_width(&self) -> u16 {
        self.snapshot.map.width()
    }

    /// Map height in tiles.
    #[must_use]
    pub fn map_height(&self) -> u16 {
        self.snapshot.map.height()
    }

    /// Current frame number.
    #[must_use]
    pub fn frame_count(&self) -> u32 {
        self.snapshot.frame
    }

    /// Start locations.
    #[must_use]
    pub fn start_locations(&self) -> &[TilePosition] {
        &self.snapshot.start_locations
    }

    /// Whether a pixel lies on the map.
    #[must_use]
    pub fn is_valid_position(&self, position: Position) -> bool {
        position.is_within(self.map_width(), self.map_height())
    }

    /// Whether a tile lies on the map.
    #[must_use]
    pub fn is_valid_tile(&self, tile: TilePosition) -> bool {
        tile.is_within(self.map_width(), self.map_height())
    }

    pub(crate) fn tile(&self, tile: TilePosition) -> Option<&TileInfo> {
        self.snapshot.map.tile(tile.x, tile.y)
    }

    /// Structures may be placed on the tile.
    #[must_use]
    pub fn is_buildable(&self, tile: TilePosition) -> bool {
        self.tile(tile).is_some_and(|t| t.buildable)
    }

    /// Ground units may stand on the tile.
    #[must_use]
    pub fn is_walkable(&self, tile: TilePosition) -> bool {
        self.tile(tile).is_some_and(|t| t.walkable)
    }

    /// The local player has seen the tile.
    #[must_use]
    pub fn is_explored(&self, tile: TilePosition) -> bool {
        self.tile(tile).is_some_and(|t| t.explored)
    }

    /// The local player currently sees the tile.
    #[must_use]
    pub fn is_visible(&self, tile: TilePosition) -> bool {
        self.tile(tile).is_some_and(|t| t.visible)
    }

    /// The tile is covered by creep.
    #[must_use]
    pub fn has_creep(&self, tile: TilePosition) -> bool {
        self.tile(tile).is_some_and(|t| t.creep)
    }

    /// Elevation of the tile; -1 off the map.
    #[must_use]
    pub fn ground_height(&self, tile: TilePosition) -> i32 {
        self.tile(tile).map_or(-1, |t| t.ground_height)
    }

    // ========================================================================
    // Unit counts
    // ========================================================================

    /// Existing, completed units of `unit_type` owned by `player`.
    #[must_use]
    pub fn completed_unit_count(&self, player: PlayerId, unit_type: UnitType) -> u32 {
        self.snapshot
            .units
            .values()
            .filter(|u| u.player == player && u.unit_type == unit_type && u.exists() && u.is_completed())
            .count() as u32
    }

    /// Whether `player` owns at least `count` completed units satisfying
    /// `unit_type`. A morphed structure satisfies the structure it came from.
    #[must_use]
    pub fn has_unit_type_requirement(&self, player: PlayerId, unit_type: Option<UnitType>, count: u32) -> bool {
        let Some(unit_type) = unit_type else {
            return true;
        };
        let have = match unit_type {
            UnitType::ZergHatchery => {
                self.completed_unit_count(player, UnitType::ZergHatchery)
                    + self.completed_unit_count(player, UnitType::ZergLair)
                    + self.completed_unit_count(player, UnitType::ZergHive)
            }
            UnitType::ZergLair => {
                self.completed_unit_count(player, UnitType::ZergLair)
                    + self.completed_unit_count(player, UnitType::ZergHive)
            }
            UnitType::ZergSpire => {
                self.completed_unit_count(player, UnitType::ZergSpire)
                    + self.completed_unit_count(player, UnitType::ZergGreaterSpire)
            }
            other => self.completed_unit_count(player, other),
        };
        have >= count
    }

    // ========================================================================
    // Engine pass-through
    // ========================================================================

    /// Order every unit in `units` owned by the local player.
    ///
    /// Returns `false` if any unit was skipped because it is missing, dead or
    /// not ours.
    pub fn issue_command(&mut self, units: &[UnitId], command: UnitCommand) -> bool {
        let me = self.snapshot.self_player;
        let mut all_sent = true;
        for &id in units {
            let ours = self
                .snapshot
                .units
                .get(&id)
                .is_some_and(|u| u.exists() && Some(u.player) == me);
            if ours {
                self.client.submit_unit_command(UnitCommand { unit: id, ..command });
            } else {
                tracing::trace!("Skipping command {:?} for unit {id}", command.kind);
                all_sent = false;
            }
        }
        all_sent
    }

    /// Send a chat message to everyone.
    pub fn send_text(&mut self, text: &str) {
        self.send_text_ex(false, text);
    }

    /// Send a chat message, optionally to allies only.
    pub fn send_text_ex(&mut self, to_allies: bool, text: &str) {
        let id = self.client.allocate_string_id(text);
        self.client.submit_command(CommandType::SendText, id, i32::from(to_allies));
    }

    /// Print a local-only message.
    pub fn printf(&mut self, text: &str) {
        let id = self.client.allocate_string_id(text);
        self.client.submit_command(CommandType::Printf, id, 0);
    }

    /// Move the camera.
    pub fn set_screen_position(&mut self, position: Position) {
        self.client.submit_command(CommandType::SetScreenPosition, position.x, position.y);
    }

    /// Ping the minimap.
    pub fn ping_minimap(&mut self, position: Position) {
        self.client.submit_command(CommandType::PingMinimap, position.x, position.y);
    }

    /// Set how many frames the engine skips rendering.
    pub fn set_frame_skip(&mut self, frame_skip: i32) {
        self.client.submit_command(CommandType::SetFrameSkip, frame_skip, 0);
    }

    /// Set local game speed in milliseconds per frame.
    pub fn set_local_speed(&mut self, speed: i32) {
        self.client.submit_command(CommandType::SetLocalSpeed, speed, 0);
    }

    /// Set how aggressively the engine merges unit orders.
    pub fn set_command_optimization_level(&mut self, level: i32) {
        self.client
            .submit_command(CommandType::SetCommandOptimizationLevel, level.clamp(0, 4), 0);
    }

    /// Pause the match.
    pub fn pause_game(&mut self) {
        self.client.submit_command(CommandType::PauseGame, 0, 0);
    }

    /// Resume the match.
    pub fn resume_game(&mut self) {
        self.client.submit_command(CommandType::ResumeGame, 0, 0);
    }

    /// Leave the match.
    pub fn leave_game(&mut self) {
        self.client.submit_command(CommandType::LeaveGame, 0, 0);
    }

    /// Restart the match (single player only).
    pub fn restart_game(&mut self) {
        self.client.submit_command(CommandType::RestartGame, 0, 0);
    }

    fn draw(
        &mut self,
        kind: ShapeType,
        coordinate_type: CoordinateType,
        (x1, y1, x2, y2): (i32, i32, i32, i32),
        (extra1, extra2): (i32, i32),
        color: u8,
        solid: bool,
    ) {
        self.client.submit_draw_shape(DrawShape {
            kind,
            coordinate_type,
            x1,
            y1,
            x2,
            y2,
            extra1,
            extra2,
            color,
            solid,
        });
    }

    /// Draw text.
    pub fn draw_text(&mut self, coordinate_type: CoordinateType, at: Position, text: &str) {
        let id = self.client.allocate_string_id(text);
        self.draw(ShapeType::Text, coordinate_type, (at.x, at.y, 0, 0), (id, 0), 0, false);
    }

    /// Draw an axis-aligned box.
    pub fn draw_box(
        &mut self,
        coordinate_type: CoordinateType,
        left_top: Position,
        right_bottom: Position,
        color: u8,
        solid: bool,
    ) {
        self.draw(
            ShapeType::Box,
            coordinate_type,
            (left_top.x, left_top.y, right_bottom.x, right_bottom.y),
            (0, 0),
            color,
            solid,
        );
    }

    /// Draw a triangle.
    pub fn draw_triangle(
        &mut self,
        coordinate_type: CoordinateType,
        [a, b, c]: [Position; 3],
        color: u8,
        solid: bool,
    ) {
        self.draw(ShapeType::Triangle, coordinate_type, (a.x, a.y, b.x, b.y), (c.x, c.y), color, solid);
    }

    /// Draw a circle.
    pub fn draw_circle(&mut self, coordinate_type: CoordinateType, center: Position, radius: i32, color: u8, solid: bool) {
        self.draw(ShapeType::Circle, coordinate_type, (center.x, center.y, 0, 0), (radius, 0), color, solid);
    }

    /// Draw an ellipse.
    pub fn draw_ellipse(
        &mut self,
        coordinate_type: CoordinateType,
        center: Position,
        x_radius: i32,
        y_radius: i32,
        color: u8,
        solid: bool,
    ) {
        self.draw(
            ShapeType::Ellipse,
            coordinate_type,
            (center.x, center.y, 0, 0),
            (x_radius, y_radius),
            color,
            solid,
        );
    }

    /// Draw a single pixel.
    pub fn draw_dot(&mut self, coordinate_type: CoordinateType, at: Position, color: u8) {
        self.draw(ShapeType::Dot, coordinate_type, (at.x, at.y, 0, 0), (0, 0), color, false);
    }

    /// Draw a line segment.
    pub fn draw_line(&mut self, coordinate_type: CoordinateType, from: Position, to: Position, color: u8) {
        self.draw(ShapeType::Line, coordinate_type, (from.x, from.y, to.x, to.y), (0, 0), color, false);
    }
}
