//! Request loop over one scenario.

use std::io::{self, BufRead, Write};

use bw_core::client::RecordingClient;
use bw_core::game::Game;
use bw_core::pathfinding::{ground_distance, is_connected, shortest_path, AreaGraph};
use bw_core::snapshot::{Snapshot, Unit, UnitId};

use crate::protocol::{Request, Response};
use crate::scenario::{Scenario, ScenarioError};

/// Runner settings taken from the oracle config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Ring radius for build-site searches without an explicit range.
    pub build_search_range: i32,
    /// Pretty-print responses.
    pub pretty: bool,
}

/// Answers requests against one frame.
pub struct QueryRunner {
    name: String,
    game: Game<RecordingClient>,
    topology: AreaGraph,
    config: RunnerConfig,
}

impl QueryRunner {
    /// Create a runner over an expanded snapshot.
    pub fn new(name: impl Into<String>, snapshot: Snapshot, topology: AreaGraph, config: RunnerConfig) -> Self {
        Self {
            name: name.into(),
            game: Game::new(snapshot, RecordingClient::default()),
            topology,
            config,
        }
    }

    /// Create a runner from a scenario.
    pub fn from_scenario(scenario: &Scenario, config: RunnerConfig) -> Result<Self, ScenarioError> {
        let (snapshot, topology) = scenario.build()?;
        Ok(Self::new(scenario.name.clone(), snapshot, topology, config))
    }

    /// The game being queried.
    pub fn game(&self) -> &Game<RecordingClient> {
        &self.game
    }

    /// Answer one request.
    pub fn handle(&mut self, request: &Request) -> Response {
        tracing::trace!("Handling {}", request.name());
        match *request {
            Request::Status => {
                let snapshot = self.game.snapshot();
                Response::Status {
                    frame: snapshot.frame,
                    map_width: self.game.map_width(),
                    map_height: self.game.map_height(),
                    units: self.game.all_units().count(),
                    self_player: snapshot.self_player,
                }
            }
            Request::CanBuildHere {
                unit_type,
                tile,
                builder,
                check_explored,
            } => {
                let builder = match self.lookup(builder, request) {
                    Ok(unit) => unit,
                    Err(response) => return response,
                };
                Response::placement(self.game.placement_failure(tile, unit_type, builder.as_ref(), check_explored))
            }
            Request::BuildLocation { unit_type, tile, range } => {
                let range = range.unwrap_or(self.config.build_search_range);
                Response::Location {
                    tile: self.game.build_location(unit_type, tile, range),
                }
            }
            Request::CanMake { unit_type, builder } => {
                let builder = match self.lookup(builder, request) {
                    Ok(unit) => unit,
                    Err(response) => return response,
                };
                Response::legality(self.game.production_failure(unit_type, builder.as_ref()))
            }
            Request::CanResearch {
                tech,
                unit,
                check_can_issue,
            } => {
                let unit = match self.lookup(unit, request) {
                    Ok(unit) => unit,
                    Err(response) => return response,
                };
                Response::legality(self.game.research_failure(tech, unit.as_ref(), check_can_issue))
            }
            Request::CanUpgrade {
                upgrade,
                unit,
                check_can_issue,
            } => {
                let unit = match self.lookup(unit, request) {
                    Ok(unit) => unit,
                    Err(response) => return response,
                };
                Response::legality(self.game.upgrade_failure(upgrade, unit.as_ref(), check_can_issue))
            }
            Request::HasPower { tile, unit_type } => Response::Answer {
                value: self.game.has_power(tile, unit_type),
            },
            Request::HasPath { from, to } => Response::Answer {
                value: self.game.has_path(from, to),
            },
            Request::Damage {
                from_type,
                to_type,
                from_player,
                to_player,
            } => Response::Damage {
                amount: self.game.damage_from(from_type, to_type, from_player, to_player),
            },
            Request::UnitsInRadius { center, radius } => Response::Units {
                ids: self
                    .game
                    .units_in_radius(center, radius, |_| true)
                    .into_iter()
                    .map(|u| u.id)
                    .collect(),
            },
            Request::GroundDistance { from, to } => Response::Distance {
                pixels: ground_distance(&self.topology, from, to),
            },
            Request::ShortestPath { from, to } => Response::Path {
                tiles: shortest_path(&self.topology, from, to),
            },
            Request::IsConnected { from, to } => Response::Answer {
                value: is_connected(&self.topology, from, to),
            },
            Request::Issue { ref units, command } => {
                let before = self.game.client().unit_commands.len();
                let all_sent = self.game.issue_command(units, command);
                Response::Issued {
                    all_sent,
                    sent: self.game.client().unit_commands.len() - before,
                }
            }
            Request::Quit => Response::Bye,
        }
    }

    /// Read requests from `input` until `quit` or end of input, writing one
    /// response per request to `output`.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        let ready = Response::ready(self.game.frame_count(), self.name.as_str());
        output.write_all(ready.to_json_line(self.config.pretty).as_bytes())?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let response = match Request::from_json(line) {
                Ok(request) => self.handle(&request),
                Err(e) => {
                    tracing::warn!("Rejected request: {e}");
                    Response::error(format!("Parse error: {e}"), None)
                }
            };
            let done = matches!(response, Response::Bye);
            output.write_all(response.to_json_line(self.config.pretty).as_bytes())?;
            output.flush()?;
            if done {
                break;
            }
        }

        tracing::info!(
            "Session over, {} unit commands recorded",
            self.game.client().unit_commands.len()
        );
        Ok(())
    }

    fn lookup(&self, id: Option<UnitId>, request: &Request) -> Result<Option<Unit>, Response> {
        match id {
            None => Ok(None),
            Some(id) => self
                .game
                .unit(id)
                .cloned()
                .map(Some)
                .ok_or_else(|| Response::error(format!("Unknown unit {id}"), Some(request.name()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bw_core::catalog::{TechType, UnitType};
    use bw_core::client::{UnitCommand, UnitCommandType};
    use bw_core::placement::PlacementFailure;
    use bw_core::position::{Position, TilePosition};
    use bw_core::production::LegalityFailure;
    use bw_core::catalog::Race;
    use bw_core::snapshot::RegionId;
    use bw_test_utils::fixtures::{terran_base, SnapshotBuilder, ME};

    const CONFIG: RunnerConfig = RunnerConfig {
        build_search_range: 16,
        pretty: false,
    };

    fn runner() -> QueryRunner {
        let snapshot = terran_base().build();
        let topology = AreaGraph::from_snapshot(&snapshot).unwrap();
        QueryRunner::new("terran base", snapshot, topology, CONFIG)
    }

    #[test]
    fn test_status() {
        let mut runner = runner();
        assert_eq!(
            runner.handle(&Request::Status),
            Response::Status {
                frame: 1,
                map_width: 64,
                map_height: 64,
                units: 11,
                self_player: Some(ME),
            }
        );
    }

    #[test]
    fn test_placement_reports_first_failure() {
        let mut runner = runner();
        let response = runner.handle(&Request::CanBuildHere {
            unit_type: UnitType::TerranBarracks,
            tile: TilePosition::new(62, 62),
            builder: None,
            check_explored: false,
        });
        assert_eq!(response, Response::placement(Some(PlacementFailure::OutOfBounds)));
    }

    #[test]
    fn test_unknown_builder_is_an_error() {
        let mut runner = runner();
        let response = runner.handle(&Request::CanMake {
            unit_type: UnitType::TerranMarine,
            builder: Some(UnitId(999)),
        });
        assert!(matches!(response, Response::Error { cmd: Some(ref c), .. } if c == "can_make"));
    }

    #[test]
    fn test_research_checks_the_researcher() {
        let mut runner = runner();
        let barracks = UnitId(3);
        let response = runner.handle(&Request::CanResearch {
            tech: TechType::Stimpacks,
            unit: Some(barracks),
            check_can_issue: true,
        });
        assert_eq!(response, Response::legality(Some(LegalityFailure::WrongProducer { unit: barracks })));

        let response = runner.handle(&Request::CanResearch {
            tech: TechType::Stimpacks,
            unit: None,
            check_can_issue: true,
        });
        assert_eq!(response, Response::legality(None));
    }

    #[test]
    fn test_build_location_uses_configured_range() {
        let mut runner = runner();
        let response = runner.handle(&Request::BuildLocation {
            unit_type: UnitType::TerranSupplyDepot,
            tile: TilePosition::new(30, 30),
            range: None,
        });
        assert_eq!(response, Response::Location { tile: Some(TilePosition::new(30, 30)) });
    }

    #[test]
    fn test_is_connected_follows_area_graph() {
        // Right half is its own area with no chokepoint to the main one.
        let snapshot = SnapshotBuilder::new(32, 32, Race::Terran)
            .region(RegionId(2), 1, 16, 0, 16, 32)
            .build();
        let topology = AreaGraph::from_snapshot(&snapshot).unwrap();
        let mut runner = QueryRunner::new("split", snapshot, topology, CONFIG);

        let ask = |runner: &mut QueryRunner, from: TilePosition, to: TilePosition| {
            runner.handle(&Request::IsConnected { from, to })
        };
        assert_eq!(
            ask(&mut runner, TilePosition::new(2, 2), TilePosition::new(10, 30)),
            Response::Answer { value: true }
        );
        assert_eq!(
            ask(&mut runner, TilePosition::new(2, 2), TilePosition::new(20, 2)),
            Response::Answer { value: false }
        );
        assert_eq!(
            ask(&mut runner, TilePosition::new(2, 2), TilePosition::new(40, 2)),
            Response::Answer { value: false }
        );
    }

    #[test]
    fn test_session_over_streams() {
        let input = concat!(
            "{\"cmd\":\"has_path\",\"from\":{\"x\":10,\"y\":10},\"to\":{\"x\":1000,\"y\":1000}}\n",
            "\n",
            "not json\n",
            "{\"cmd\":\"damage\",\"from_type\":\"ProtossDragoon\",\"to_type\":\"TerranMarine\"}\n",
            "{\"cmd\":\"quit\"}\n",
            "{\"cmd\":\"status\"}\n",
        );
        let mut output = Vec::new();
        runner().run(input.as_bytes(), &mut output).unwrap();

        let lines: Vec<Response> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], Response::ready(1, "terran base"));
        assert_eq!(lines[1], Response::Answer { value: true });
        assert!(matches!(lines[2], Response::Error { cmd: None, .. }));
        assert_eq!(lines[3], Response::Damage { amount: 10 });
        assert_eq!(lines[4], Response::Bye);
    }

    #[test]
    fn test_issue_reaches_own_units_only() {
        let mut runner = runner();
        let command = UnitCommand::new(UnitCommandType::Move).at(640, 640);
        let response = runner.handle(&Request::Issue {
            units: vec![UnitId(11), UnitId(5)],
            command,
        });
        assert_eq!(response, Response::Issued { all_sent: false, sent: 1 });
        assert_eq!(runner.game().client().unit_commands[0].unit, UnitId(11));
        assert_eq!(
            runner.game().units_in_radius(Position::new(300, 400), 0, |_| true)[0].id,
            UnitId(11)
        );
    }
}
