//! Outbound calls to the match engine.
//!
//! The query core never talks to the engine directly; everything it sends
//! goes through an [`EngineClient`]. Calls are fire-and-forget: the engine
//! applies them after the current frame and nothing is awaited.

use serde::{Deserialize, Serialize};

use crate::snapshot::UnitId;

/// Coordinate space of a draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoordinateType {
    /// Relative to the top-left of the screen.
    Screen,
    /// Map pixels.
    Map,
    /// Relative to the mouse cursor.
    Mouse,
}

/// Shape primitive of a draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum ShapeType {
    Text,
    Box,
    Triangle,
    Circle,
    Ellipse,
    Dot,
    Line,
}

/// One debug shape, in the engine's flat layout.
///
/// The meaning of the geometry fields depends on [`ShapeType`]: a box uses
/// both corners, a circle stores its radius in `extra1`, text stores its
/// interned string id in `extra1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawShape {
    /// Primitive.
    pub kind: ShapeType,
    /// Coordinate space.
    pub coordinate_type: CoordinateType,
    /// First x.
    pub x1: i32,
    /// First y.
    pub y1: i32,
    /// Second x.
    pub x2: i32,
    /// Second y.
    pub y2: i32,
    /// Shape-specific value.
    pub extra1: i32,
    /// Shape-specific value.
    pub extra2: i32,
    /// Palette index.
    pub color: u8,
    /// Filled rather than outlined.
    pub solid: bool,
}

/// Game-level commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum CommandType {
    SetScreenPosition,
    PingMinimap,
    SetFrameSkip,
    SetLocalSpeed,
    SetCommandOptimizationLevel,
    SendText,
    Printf,
    PauseGame,
    ResumeGame,
    LeaveGame,
    RestartGame,
}

/// Orders that can be given to a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum UnitCommandType {
    AttackMove,
    AttackUnit,
    Build,
    BuildAddon,
    Train,
    Morph,
    Research,
    Upgrade,
    Move,
    Patrol,
    HoldPosition,
    Stop,
    Gather,
    ReturnCargo,
    Lift,
    Land,
    Cancel,
}

/// A unit order in the engine's flat layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitCommand {
    /// Order.
    pub kind: UnitCommandType,
    /// Ordered unit; filled in per unit by [`Game::issue_command`](crate::game::Game::issue_command).
    pub unit: UnitId,
    /// Target unit.
    pub target: Option<UnitId>,
    /// Target x.
    pub x: i32,
    /// Target y.
    pub y: i32,
    /// Order-specific value (type id, tech id, ...).
    pub extra: i32,
}

impl UnitCommand {
    /// An order with no target.
    #[must_use]
    pub const fn new(kind: UnitCommandType) -> Self {
        Self {
            kind,
            unit: UnitId(0),
            target: None,
            x: 0,
            y: 0,
            extra: 0,
        }
    }

    /// Target a point.
    #[must_use]
    pub const fn at(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Target a unit.
    #[must_use]
    pub const fn targeting(mut self, target: UnitId) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the order-specific value.
    #[must_use]
    pub const fn with_extra(mut self, extra: i32) -> Self {
        self.extra = extra;
        self
    }
}

/// Sink for everything the core sends to the engine.
pub trait EngineClient {
    /// Queue a unit order.
    fn submit_unit_command(&mut self, command: UnitCommand);

    /// Queue a game-level command.
    fn submit_command(&mut self, command: CommandType, value1: i32, value2: i32);

    /// Queue a debug shape for this frame.
    fn submit_draw_shape(&mut self, shape: DrawShape);

    /// Intern `text` and return its id.
    fn allocate_string_id(&mut self, text: &str) -> i32;
}

/// Client that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullClient;

impl EngineClient for NullClient {
    fn submit_unit_command(&mut self, _command: UnitCommand) {}

    fn submit_command(&mut self, _command: CommandType, _value1: i32, _value2: i32) {}

    fn submit_draw_shape(&mut self, _shape: DrawShape) {}

    fn allocate_string_id(&mut self, _text: &str) -> i32 {
        0
    }
}

/// Client that keeps every call, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingClient {
    /// Unit orders.
    pub unit_commands: Vec<UnitCommand>,
    /// Game-level commands with their two values.
    pub commands: Vec<(CommandType, i32, i32)>,
    /// Debug shapes.
    pub shapes: Vec<DrawShape>,
    /// Interned strings; a string's id is its index.
    pub strings: Vec<String>,
}

impl RecordingClient {
    /// Text previously interned under `id`.
    #[must_use]
    pub fn string(&self, id: i32) -> Option<&str> {
        usize::try_from(id).ok().and_then(|i| self.strings.get(i)).map(String::as_str)
    }
}

impl EngineClient for RecordingClient {
    fn submit_unit_command(&mut self, command: UnitCommand) {
        self.unit_commands.push(command);
    }

    fn submit_command(&mut self, command: CommandType, value1: i32, value2: i32) {
        self.commands.push((command, value1, value2));
    }

    fn submit_draw_shape(&mut self, shape: DrawShape) {
        self.shapes.push(shape);
    }

    fn allocate_string_id(&mut self, text: &str) -> i32 {
        self.strings.push(text.to_string());
        (self.strings.len() - 1) as i32
    }
}
