//! Chokepoint paths and tile-level path reconstruction.
//!
//! Ground routes are planned over a coarse terrain topology: areas joined
//! by chokepoints. [`TerrainTopology`] is the seam to whatever computes
//! that topology; [`AreaGraph`] is an in-memory implementation built from
//! painted areas or from a snapshot's regions.
//!
//! [`shortest_path`] turns a chokepoint route into a tile polyline by
//! tracing a 4-connected line between consecutive chokepoint centers.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};
use crate::position::{Position, TilePosition};
use crate::snapshot::Snapshot;

/// Identifier of a terrain area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AreaId(pub u16);

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A narrow passage joining two areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChokePoint {
    /// Center pixel of the passage.
    pub center: Position,
    /// The two areas it joins.
    pub areas: (AreaId, AreaId),
}

impl ChokePoint {
    /// Whether the chokepoint borders `area`.
    #[must_use]
    pub fn touches(&self, area: AreaId) -> bool {
        self.areas.0 == area || self.areas.1 == area
    }
}

/// A ground route: the chokepoints crossed in order and the total length
/// in pixels from source to destination.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChokePath {
    /// Chokepoints in traversal order; empty when both ends share an area.
    pub chokepoints: Vec<ChokePoint>,
    /// Source to first chokepoint, between chokepoints, last to destination.
    pub length: i32,
}

/// Coarse terrain topology used for ground routing.
pub trait TerrainTopology {
    /// The area containing `position`, or the closest one to it.
    fn nearest_area(&self, position: Position) -> Option<AreaId>;

    /// Shortest chokepoint route between two points; `None` when unreachable.
    fn path(&self, source: Position, destination: Position) -> Option<ChokePath>;

    /// Whether ground units can travel between the two areas.
    fn is_accessible_from(&self, a: AreaId, b: AreaId) -> bool;
}

// ============================================================================
// Path reconstruction
// ============================================================================

/// 4-connected tile line from `from` to `to`, both included.
///
/// Holds `1 + |dx| + |dy|` tiles; each step moves one tile along one axis,
/// choosing the axis by the accumulated error.
#[must_use]
pub fn bresenham_line(from: TilePosition, to: TilePosition) -> Vec<TilePosition> {
    let mut dx = (to.x - from.x).abs();
    let mut dy = (to.y - from.y).abs();
    let x_inc = if to.x > from.x { 1 } else { -1 };
    let y_inc = if to.y > from.y { 1 } else { -1 };
    let n = 1 + dx + dy;
    let mut error = dx - dy;
    dx *= 2;
    dy *= 2;

    let (mut x, mut y) = (from.x, from.y);
    let mut line = Vec::with_capacity(n as usize);
    for _ in 0..n {
        line.push(TilePosition::new(x, y));
        if error > 0 {
            x += x_inc;
            error -= dy;
        } else {
            y += y_inc;
            error += dx;
        }
    }
    line
}

/// Tile polyline following the chokepoint route from `start` to `end`.
///
/// Each leg between consecutive chokepoint centers is traced with
/// [`bresenham_line`] and the legs are concatenated, so a chokepoint tile
/// shared by two legs appears twice. Empty when unreachable or when the
/// route crosses fewer than two chokepoints.
#[must_use]
pub fn shortest_path<T: TerrainTopology + ?Sized>(
    topology: &T,
    start: TilePosition,
    end: TilePosition,
) -> Vec<TilePosition> {
    let Some(route) = topology.path(start.to_position(), end.to_position()) else {
        tracing::trace!("No ground route from {start} to {end}");
        return Vec::new();
    };
    route
        .chokepoints
        .windows(2)
        .flat_map(|leg| bresenham_line(leg[0].center.to_tile_position(), leg[1].center.to_tile_position()))
        .collect()
}

/// Ground distance in pixels between two tiles; `None` when unreachable.
#[must_use]
pub fn ground_distance<T: TerrainTopology + ?Sized>(topology: &T, start: TilePosition, end: TilePosition) -> Option<i32> {
    topology
        .path(start.to_position(), end.to_position())
        .map(|route| route.length)
}

/// Whether the areas nearest to `a` and `b` are mutually accessible.
#[must_use]
pub fn is_connected<T: TerrainTopology + ?Sized>(topology: &T, a: TilePosition, b: TilePosition) -> bool {
    match (
        topology.nearest_area(a.to_position()),
        topology.nearest_area(b.to_position()),
    ) {
        (Some(from), Some(to)) => topology.is_accessible_from(from, to),
        _ => false,
    }
}

// ============================================================================
// In-memory topology
// ============================================================================

/// An area of an [`AreaGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    /// Identifier.
    pub id: AreaId,
    /// Representative pixel.
    pub center: Position,
}

/// Areas painted over a tile grid, joined by chokepoints.
#[derive(Debug, Clone)]
pub struct AreaGraph {
    width: u16,
    height: u16,
    tiles: Vec<Option<AreaId>>,
    areas: BTreeMap<AreaId, Area>,
    chokepoints: Vec<ChokePoint>,
}

/// A node in the Dijkstra frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SearchNode {
    cost: i64,
    node: usize,
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap on cost, then on node index for determinism.
        other.cost.cmp(&self.cost).then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl AreaGraph {
    /// An empty graph over a `width` × `height` tile map.
    pub fn new(width: u16, height: u16) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(QueryError::InvalidMapSize { width, height });
        }
        Ok(Self {
            width,
            height,
            tiles: vec![None; usize::from(width) * usize::from(height)],
            areas: BTreeMap::new(),
            chokepoints: Vec::new(),
        })
    }

    /// One area per snapshot region, with a chokepoint halfway between each
    /// pair of neighbouring region centers.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self> {
        let mut graph = Self::new(snapshot.map.width(), snapshot.map.height())?;
        for region in snapshot.regions.values() {
            graph.add_area(AreaId(region.id.0), region.center);
        }
        for (x, y, tile) in snapshot.map.iter() {
            if let Some(region) = tile.region {
                graph.set_tile(x, y, AreaId(region.0));
            }
        }
        for region in snapshot.regions.values() {
            for neighbor in &region.neighbors {
                let Some(other) = snapshot.regions.get(neighbor) else {
                    return Err(QueryError::UnknownArea(neighbor.0));
                };
                if region.id < other.id {
                    let center = (region.center + other.center) / 2;
                    graph.add_chokepoint(center, AreaId(region.id.0), AreaId(other.id.0))?;
                }
            }
        }
        tracing::debug!(
            "Built area graph: {} areas, {} chokepoints",
            graph.areas.len(),
            graph.chokepoints.len()
        );
        Ok(graph)
    }

    /// Add or replace an area.
    pub fn add_area(&mut self, id: AreaId, center: Position) {
        self.areas.insert(id, Area { id, center });
    }

    /// Assign a rectangle of tiles to `area`; tiles off the map are skipped.
    pub fn paint(&mut self, area: AreaId, x: i32, y: i32, width: i32, height: i32) -> Result<()> {
        if !self.areas.contains_key(&area) {
            return Err(QueryError::UnknownArea(area.0));
        }
        for ty in y..y + height {
            for tx in x..x + width {
                self.set_tile(tx, ty, area);
            }
        }
        Ok(())
    }

    /// Join two areas with a chokepoint centred on `center`.
    pub fn add_chokepoint(&mut self, center: Position, a: AreaId, b: AreaId) -> Result<()> {
        for area in [a, b] {
            if !self.areas.contains_key(&area) {
                return Err(QueryError::UnknownArea(area.0));
            }
        }
        self.chokepoints.push(ChokePoint { center, areas: (a, b) });
        Ok(())
    }

    /// All areas in id order.
    pub fn areas(&self) -> impl Iterator<Item = &Area> + '_ {
        self.areas.values()
    }

    /// All chokepoints in insertion order.
    #[must_use]
    pub fn chokepoints(&self) -> &[ChokePoint] {
        &self.chokepoints
    }

    /// The area painted on `tile`.
    #[must_use]
    pub fn area_at(&self, tile: TilePosition) -> Option<AreaId> {
        self.index(tile.x, tile.y).and_then(|i| self.tiles[i])
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        TilePosition::new(x, y)
            .is_within(self.width, self.height)
            .then(|| y as usize * usize::from(self.width) + x as usize)
    }

    fn set_tile(&mut self, x: i32, y: i32, area: AreaId) {
        if let Some(i) = self.index(x, y) {
            self.tiles[i] = Some(area);
        }
    }

    /// Dijkstra over chokepoints, with the source and destination as two
    /// extra nodes.
    fn route(&self, source: Position, from: AreaId, destination: Position, to: AreaId) -> Option<ChokePath> {
        let count = self.chokepoints.len();
        let (start, goal) = (count, count + 1);
        let position_of = |node: usize| match node {
            n if n == start => source,
            n if n == goal => destination,
            n => self.chokepoints[n].center,
        };

        let mut best = vec![i64::MAX; count + 2];
        let mut came_from: Vec<Option<usize>> = vec![None; count + 2];
        let mut frontier = BinaryHeap::new();
        best[start] = 0;
        frontier.push(SearchNode { cost: 0, node: start });

        while let Some(SearchNode { cost, node }) = frontier.pop() {
            if node == goal {
                break;
            }
            if cost > best[node] {
                continue;
            }

            let here = position_of(node);
            let neighbors = (0..count)
                .filter(|&n| {
                    n != node
                        && match node {
                            n2 if n2 == start => self.chokepoints[n].touches(from),
                            current => shares_area(&self.chokepoints[current], &self.chokepoints[n]),
                        }
                })
                .chain((node != start && self.chokepoints[node].touches(to)).then_some(goal));

            for next in neighbors {
                let step = i64::from(here.distance(position_of(next)));
                let candidate = cost + step;
                if candidate < best[next] {
                    best[next] = candidate;
                    came_from[next] = Some(node);
                    frontier.push(SearchNode { cost: candidate, node: next });
                }
            }
        }

        if best[goal] == i64::MAX {
            return None;
        }

        let mut chokepoints = Vec::new();
        let mut current = came_from[goal];
        while let Some(node) = current {
            if node == start {
                break;
            }
            chokepoints.push(self.chokepoints[node]);
            current = came_from[node];
        }
        chokepoints.reverse();
        Some(ChokePath {
            chokepoints,
            length: best[goal] as i32,
        })
    }
}

fn shares_area(a: &ChokePoint, b: &ChokePoint) -> bool {
    b.touches(a.areas.0) || b.touches(a.areas.1)
}

impl TerrainTopology for AreaGraph {
    fn nearest_area(&self, position: Position) -> Option<AreaId> {
        let tile = position.to_tile_position();
        if !tile.is_within(self.width, self.height) {
            return None;
        }
        if let Some(area) = self.area_at(tile) {
            return Some(area);
        }
        // Closest painted tile; row-major scan keeps ties deterministic.
        let mut best: Option<(i64, AreaId)> = None;
        for (i, area) in self.tiles.iter().enumerate() {
            let Some(area) = *area else {
                continue;
            };
            let x = (i % usize::from(self.width)) as i32;
            let y = (i / usize::from(self.width)) as i32;
            let distance = TilePosition::new(x, y).distance_squared(tile);
            if best.map_or(true, |(d, _)| distance < d) {
                best = Some((distance, area));
            }
        }
        best.map(|(_, area)| area)
    }

    fn path(&self, source: Position, destination: Position) -> Option<ChokePath> {
        let from = self.nearest_area(source)?;
        let to = self.nearest_area(destination)?;
        if from == to {
            return Some(ChokePath {
                chokepoints: Vec::new(),
                length: source.distance(destination),
            });
        }
        self.route(source, from, destination, to)
    }

    fn is_accessible_from(&self, a: AreaId, b: AreaId) -> bool {
        if a == b {
            return self.areas.contains_key(&a);
        }
        let mut seen = vec![a];
        let mut queue = VecDeque::from([a]);
        while let Some(area) = queue.pop_front() {
            for choke in self.chokepoints.iter().filter(|c| c.touches(area)) {
                let other = if choke.areas.0 == area { choke.areas.1 } else { choke.areas.0 };
                if other == b {
                    return true;
                }
                if !seen.contains(&other) {
                    seen.push(other);
                    queue.push_back(other);
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{MapData, Region, RegionId};

    const A: AreaId = AreaId(1);
    const B: AreaId = AreaId(2);
    const C: AreaId = AreaId(3);
    const D: AreaId = AreaId(4);

    /// A | B | C in a corridor, D walled off on the right.
    fn corridor() -> AreaGraph {
        let mut graph = AreaGraph::new(40, 10).unwrap();
        for (id, x) in [(A, 0), (B, 10), (C, 20), (D, 30)] {
            graph.add_area(id, Position::new(x * 32 + 160, 160));
            graph.paint(id, x, 0, 10, 10).unwrap();
        }
        graph.add_chokepoint(Position::new(320, 160), A, B).unwrap();
        graph.add_chokepoint(Position::new(640, 160), B, C).unwrap();
        graph
    }

    #[test]
    fn test_bresenham_horizontal() {
        let line = bresenham_line(TilePosition::new(0, 0), TilePosition::new(3, 0));
        assert_eq!(
            line,
            vec![
                TilePosition::new(0, 0),
                TilePosition::new(1, 0),
                TilePosition::new(2, 0),
                TilePosition::new(3, 0),
            ]
        );
    }

    #[test]
    fn test_bresenham_diagonal_is_four_connected() {
        let line = bresenham_line(TilePosition::new(0, 0), TilePosition::new(2, 2));
        assert_eq!(
            line,
            vec![
                TilePosition::new(0, 0),
                TilePosition::new(0, 1),
                TilePosition::new(1, 1),
                TilePosition::new(1, 2),
                TilePosition::new(2, 2),
            ]
        );
    }

    #[test]
    fn test_bresenham_steps_up_when_target_is_above() {
        let line = bresenham_line(TilePosition::new(0, 3), TilePosition::new(2, 0));
        assert_eq!(line.len(), 6);
        assert_eq!(line.first(), Some(&TilePosition::new(0, 3)));
        assert_eq!(line.last(), Some(&TilePosition::new(2, 0)));
        assert!(line.windows(2).all(|w| w[1].y <= w[0].y));
    }

    #[test]
    fn test_bresenham_single_tile() {
        assert_eq!(
            bresenham_line(TilePosition::new(4, 4), TilePosition::new(4, 4)),
            vec![TilePosition::new(4, 4)]
        );
    }

    #[test]
    fn test_route_through_two_chokepoints() {
        let graph = corridor();
        let route = graph
            .path(TilePosition::new(2, 5).to_position(), TilePosition::new(25, 5).to_position())
            .unwrap();
        assert_eq!(route.chokepoints.len(), 2);
        // 256 to the first chokepoint, 320 between them, 160 to the end.
        assert_eq!(route.length, 736);
        assert_eq!(ground_distance(&graph, TilePosition::new(2, 5), TilePosition::new(25, 5)), Some(736));
    }

    #[test]
    fn test_shortest_path_traces_between_chokepoints() {
        let graph = corridor();
        let path = shortest_path(&graph, TilePosition::new(2, 5), TilePosition::new(25, 5));
        assert_eq!(path.len(), 11);
        assert_eq!(path.first(), Some(&TilePosition::new(10, 5)));
        assert_eq!(path.last(), Some(&TilePosition::new(20, 5)));
    }

    #[test]
    fn test_same_area_has_straight_length_and_no_tiles() {
        let graph = corridor();
        let route = graph.path(Position::new(10, 10), Position::new(40, 50)).unwrap();
        assert!(route.chokepoints.is_empty());
        assert_eq!(route.length, 50);
        assert!(shortest_path(&graph, TilePosition::new(1, 1), TilePosition::new(5, 5)).is_empty());
    }

    #[test]
    fn test_unreachable_area() {
        let graph = corridor();
        let (a, d) = (TilePosition::new(2, 5), TilePosition::new(35, 5));
        assert!(!is_connected(&graph, a, d));
        assert_eq!(ground_distance(&graph, a, d), None);
        assert!(shortest_path(&graph, a, d).is_empty());
        assert!(is_connected(&graph, a, TilePosition::new(25, 5)));
    }

    #[test]
    fn test_nearest_area_for_unpainted_tile() {
        let mut graph = AreaGraph::new(10, 10).unwrap();
        graph.add_area(A, Position::new(32, 32));
        graph.paint(A, 0, 0, 2, 2).unwrap();
        assert_eq!(graph.nearest_area(Position::new(300, 300)), Some(A));
        assert_eq!(graph.nearest_area(Position::new(-5, 0)), None);
    }

    #[test]
    fn test_unknown_area_is_rejected() {
        let mut graph = AreaGraph::new(10, 10).unwrap();
        graph.add_area(A, Position::new(32, 32));
        assert_eq!(graph.paint(B, 0, 0, 1, 1), Err(QueryError::UnknownArea(2)));
        assert_eq!(
            graph.add_chokepoint(Position::new(0, 0), A, B),
            Err(QueryError::UnknownArea(2))
        );
    }

    #[test]
    fn test_from_snapshot_regions() {
        let mut map = MapData::new(20, 10).unwrap();
        map.paint(0, 0, 10, 10, |t| t.region = Some(RegionId(1)));
        map.paint(10, 0, 10, 10, |t| t.region = Some(RegionId(2)));
        let mut snap = Snapshot::new(map);
        snap.insert_region(Region {
            id: RegionId(1),
            group_id: 0,
            center: Position::new(160, 160),
            neighbors: vec![RegionId(2)],
        });
        snap.insert_region(Region {
            id: RegionId(2),
            group_id: 0,
            center: Position::new(480, 160),
            neighbors: vec![RegionId(1)],
        });

        let graph = AreaGraph::from_snapshot(&snap).unwrap();
        assert_eq!(graph.chokepoints().len(), 1);
        assert_eq!(graph.chokepoints()[0].center, Position::new(320, 160));
        assert_eq!(graph.area_at(TilePosition::new(15, 3)), Some(B));
        assert!(graph.is_accessible_from(A, B));
    }
}
