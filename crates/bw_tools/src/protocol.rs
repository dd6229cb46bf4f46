//! JSON-lines protocol for the oracle.
//!
//! **Input (stdin):** one request object per line
//! **Output (stdout):** one response object per line
//! **Logs (stderr):** tracing output
//!
//! # Example Session
//!
//! ```text
//! <- {"type":"ready","version":"1.0","frame":1,"scenario":"Terran opening"}
//! -> {"cmd":"can_build_here","unit_type":"TerranBarracks","tile":{"x":20,"y":12}}
//! <- {"type":"placement","ok":true,"failure":null}
//! -> {"cmd":"can_make","unit_type":"TerranMarine","builder":3}
//! <- {"type":"legality","ok":false,"failure":{"reason":"minerals","need":50,"have":0}}
//! -> {"cmd":"damage","from_type":"ProtossDragoon","to_type":"TerranMarine"}
//! <- {"type":"damage","amount":10}
//! -> {"cmd":"quit"}
//! <- {"type":"bye"}
//! ```

use bw_core::catalog::{TechType, UnitType, UpgradeType};
use bw_core::client::UnitCommand;
use bw_core::placement::PlacementFailure;
use bw_core::position::{Position, TilePosition};
use bw_core::production::LegalityFailure;
use bw_core::snapshot::{PlayerId, UnitId};
use serde::{Deserialize, Serialize};

/// Protocol version reported in the ready line.
pub const PROTOCOL_VERSION: &str = "1.0";

// ============================================================================
// Input Requests (agent -> oracle)
// ============================================================================

/// Requests the oracle answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Request {
    /// Frame summary.
    Status,

    /// Whether a structure fits at a tile.
    CanBuildHere {
        unit_type: UnitType,
        tile: TilePosition,
        #[serde(default)]
        builder: Option<UnitId>,
        #[serde(default)]
        check_explored: bool,
    },

    /// Nearest legal site around a tile.
    BuildLocation {
        unit_type: UnitType,
        tile: TilePosition,
        #[serde(default)]
        range: Option<i32>,
    },

    /// Whether a unit type can be produced now.
    CanMake {
        unit_type: UnitType,
        #[serde(default)]
        builder: Option<UnitId>,
    },

    /// Whether a tech can be researched now.
    CanResearch {
        tech: TechType,
        #[serde(default)]
        unit: Option<UnitId>,
        #[serde(default = "default_true")]
        check_can_issue: bool,
    },

    /// Whether the next level of an upgrade can be started now.
    CanUpgrade {
        upgrade: UpgradeType,
        #[serde(default)]
        unit: Option<UnitId>,
        #[serde(default = "default_true")]
        check_can_issue: bool,
    },

    /// Whether a structure at a tile would be powered.
    HasPower {
        tile: TilePosition,
        #[serde(default)]
        unit_type: Option<UnitType>,
    },

    /// Whether two pixels are mutually reachable by ground.
    HasPath { from: Position, to: Position },

    /// Damage of one hit.
    Damage {
        from_type: UnitType,
        to_type: UnitType,
        #[serde(default)]
        from_player: Option<PlayerId>,
        #[serde(default)]
        to_player: Option<PlayerId>,
    },

    /// Units centred within a radius.
    UnitsInRadius { center: Position, radius: i32 },

    /// Ground distance through the area graph.
    GroundDistance { from: TilePosition, to: TilePosition },

    /// Tile path through the area graph.
    ShortestPath { from: TilePosition, to: TilePosition },

    /// Whether two tiles lie in mutually accessible areas.
    IsConnected { from: TilePosition, to: TilePosition },

    /// Order units; only our own existing units receive it.
    Issue { units: Vec<UnitId>, command: UnitCommand },

    /// Stop answering.
    Quit,
}

fn default_true() -> bool {
    true
}

impl Request {
    /// Parse from a JSON line.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Request name for logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::CanBuildHere { .. } => "can_build_here",
            Self::BuildLocation { .. } => "build_location",
            Self::CanMake { .. } => "can_make",
            Self::CanResearch { .. } => "can_research",
            Self::CanUpgrade { .. } => "can_upgrade",
            Self::HasPower { .. } => "has_power",
            Self::HasPath { .. } => "has_path",
            Self::Damage { .. } => "damage",
            Self::UnitsInRadius { .. } => "units_in_radius",
            Self::GroundDistance { .. } => "ground_distance",
            Self::ShortestPath { .. } => "shortest_path",
            Self::IsConnected { .. } => "is_connected",
            Self::Issue { .. } => "issue",
            Self::Quit => "quit",
        }
    }
}

// ============================================================================
// Output Responses (oracle -> agent)
// ============================================================================

/// Responses written by the oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// The oracle is ready for requests.
    Ready {
        version: String,
        frame: u32,
        scenario: String,
    },

    /// Frame summary.
    Status {
        frame: u32,
        map_width: u16,
        map_height: u16,
        units: usize,
        self_player: Option<PlayerId>,
    },

    /// Placement verdict.
    Placement {
        ok: bool,
        failure: Option<PlacementFailure>,
    },

    /// Build-site search result.
    Location { tile: Option<TilePosition> },

    /// Production, research or upgrade verdict.
    Legality {
        ok: bool,
        failure: Option<LegalityFailure>,
    },

    /// A yes/no answer.
    Answer { value: bool },

    /// Damage of one hit.
    Damage { amount: i32 },

    /// Unit ids, ascending.
    Units { ids: Vec<UnitId> },

    /// Ground distance in pixels; absent when unreachable.
    Distance { pixels: Option<i32> },

    /// Tile path.
    Path { tiles: Vec<TilePosition> },

    /// The order reached every unit (`all_sent`) or only some.
    Issued { all_sent: bool, sent: usize },

    /// Error processing a request.
    Error {
        message: String,
        cmd: Option<String>,
    },

    /// The oracle is stopping.
    Bye,
}

impl Response {
    /// Create a ready response.
    pub fn ready(frame: u32, scenario: impl Into<String>) -> Self {
        Self::Ready {
            version: PROTOCOL_VERSION.to_string(),
            frame,
            scenario: scenario.into(),
        }
    }

    /// Create an error response.
    pub fn error(message: impl Into<String>, cmd: Option<&str>) -> Self {
        Self::Error {
            message: message.into(),
            cmd: cmd.map(String::from),
        }
    }

    /// A placement verdict from the first failing rule, if any.
    pub fn placement(failure: Option<PlacementFailure>) -> Self {
        Self::Placement {
            ok: failure.is_none(),
            failure,
        }
    }

    /// A legality verdict from the first failing rule, if any.
    pub fn legality(failure: Option<LegalityFailure>) -> Self {
        Self::Legality {
            ok: failure.is_none(),
            failure,
        }
    }

    /// Serialize to JSON line (with newline).
    pub fn to_json_line(&self, pretty: bool) -> String {
        let encoded = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        let mut json = encoded.unwrap_or_else(|e| {
            format!(r#"{{"type":"error","message":"Serialization failed: {e}"}}"#)
        });
        json.push('\n');
        json
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status() {
        assert_eq!(Request::from_json(r#"{"cmd":"status"}"#).unwrap(), Request::Status);
    }

    #[test]
    fn test_parse_can_build_here_defaults() {
        let json = r#"{"cmd":"can_build_here","unit_type":"TerranBarracks","tile":{"x":20,"y":12}}"#;
        let request = Request::from_json(json).unwrap();
        assert_eq!(
            request,
            Request::CanBuildHere {
                unit_type: UnitType::TerranBarracks,
                tile: TilePosition::new(20, 12),
                builder: None,
                check_explored: false,
            }
        );
        assert_eq!(request.name(), "can_build_here");
    }

    #[test]
    fn test_parse_research_defaults_to_checking_the_unit() {
        let json = r#"{"cmd":"can_research","tech":"Stimpacks","unit":7}"#;
        let Request::CanResearch { unit, check_can_issue, .. } = Request::from_json(json).unwrap() else {
            panic!("wrong request");
        };
        assert_eq!(unit, Some(UnitId(7)));
        assert!(check_can_issue);
    }

    #[test]
    fn test_parse_is_connected() {
        let json = r#"{"cmd":"is_connected","from":{"x":4,"y":4},"to":{"x":60,"y":60}}"#;
        let request = Request::from_json(json).unwrap();
        assert_eq!(
            request,
            Request::IsConnected {
                from: TilePosition::new(4, 4),
                to: TilePosition::new(60, 60),
            }
        );
        assert_eq!(request.name(), "is_connected");
    }

    #[test]
    fn test_unknown_command_is_an_error() {
        assert!(Request::from_json(r#"{"cmd":"teleport"}"#).is_err());
        assert!(Request::from_json(r#"{"cmd":"can_make","unit_type":"TerranCastle"}"#).is_err());
    }

    #[test]
    fn test_legality_response_json() {
        let line = Response::legality(Some(LegalityFailure::Minerals { need: 50, have: 0 })).to_json_line(false);
        assert_eq!(
            line,
            "{\"type\":\"legality\",\"ok\":false,\"failure\":{\"reason\":\"minerals\",\"need\":50,\"have\":0}}\n"
        );
    }

    #[test]
    fn test_placement_response_ok() {
        let line = Response::placement(None).to_json_line(false);
        assert_eq!(line, "{\"type\":\"placement\",\"ok\":true,\"failure\":null}\n");
    }

    #[test]
    fn test_pretty_output_is_multiline() {
        let line = Response::Damage { amount: 6 }.to_json_line(true);
        assert!(line.lines().count() > 1);
        assert!(line.ends_with('\n'));
    }
}
