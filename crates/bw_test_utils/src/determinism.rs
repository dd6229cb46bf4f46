//! Determinism testing utilities.
//!
//! Provides a harness for verifying that queries produce identical answers
//! given an identical snapshot.
//!
//! # Testing Strategy
//!
//! Bots replay decisions from recorded snapshots, so a query must depend on
//! nothing but the snapshot and its arguments. Sources of non-determinism
//! include:
//!
//! - **HashMap iteration order**: Rust's default hasher is randomized.
//!   Snapshots store units, players and regions in ordered maps and every
//!   query walks them in id order.
//!
//! - **Floating-point math**: distances use integer square roots and the
//!   damage ratio table is fixed-point.
//!
//! - **Hidden state**: queries take `&self`; only frame advance mutates.
//!
//! # Test Levels
//!
//! 1. **Unit tests**: a query asked twice gives the same answer
//! 2. **Property tests**: random snapshots still give repeatable answers
//! 3. **Serialization tests**: a snapshot that went through RON answers the same
//! 4. **Parallel tests**: N threads over copies of one snapshot all agree

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::thread;

use bw_core::game::Game;
use bw_core::snapshot::Snapshot;

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Hashes from each run.
    pub hashes: Vec<u64>,
}

impl DeterminismResult {
    fn from_hashes(hashes: Vec<u64>) -> Self {
        Self {
            is_deterministic: hashes.windows(2).all(|w| w[0] == w[1]),
            hashes,
        }
    }

    /// Get all unique hashes (should be 1 for a deterministic query).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that the query was deterministic, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if the query produced different hashes across runs.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Query is non-deterministic!\n\
                 Runs: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Build a fresh game `runs` times, ask `query` of each and compare hashes
/// of the answers.
///
/// # Example
///
/// ```ignore
/// use bw_test_utils::determinism::verify_determinism;
/// use bw_test_utils::fixtures::terran_base;
///
/// let result = verify_determinism(
///     5,
///     || terran_base().game(),
///     |game| game.units_in_radius(Position::new(320, 320), 256, |_| true).len(),
/// );
/// result.assert_deterministic();
/// ```
pub fn verify_determinism<T, Setup, Query>(runs: usize, setup: Setup, query: Query) -> DeterminismResult
where
    T: Hash,
    Setup: Fn() -> Game,
    Query: Fn(&Game) -> T,
{
    let hashes = (0..runs)
        .map(|_| {
            let game = setup();
            compute_hash(&query(&game))
        })
        .collect();
    DeterminismResult::from_hashes(hashes)
}

/// Whether a snapshot answers `query` the same after a RON round trip.
///
/// Returns `false` if the snapshot fails to serialize or parse back.
pub fn verify_serialization_determinism<T, Query>(snapshot: &Snapshot, query: Query) -> bool
where
    T: Hash,
    Query: Fn(&Game) -> T,
{
    let before = compute_hash(&query(&Game::from_snapshot(snapshot.clone())));

    let text = match ron::to_string(snapshot) {
        Ok(t) => t,
        Err(e) => {
            tracing::warn!("Snapshot failed to serialize: {e}");
            return false;
        }
    };
    let restored: Snapshot = match ron::from_str(&text) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!("Snapshot failed to parse back: {e}");
            return false;
        }
    };

    before == compute_hash(&query(&Game::from_snapshot(restored)))
}

/// Ask `query` of `threads` copies of one snapshot on scoped threads.
///
/// # Panics
///
/// Panics if a worker thread panics.
pub fn run_parallel_queries<T, Query>(snapshot: &Snapshot, threads: usize, query: Query) -> DeterminismResult
where
    T: Hash,
    Query: Fn(&Game) -> T + Sync,
{
    let hashes = thread::scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let query = &query;
                s.spawn(move || {
                    let game = Game::from_snapshot(snapshot.clone());
                    compute_hash(&query(&game))
                })
            })
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    DeterminismResult::from_hashes(hashes)
}

/// Compute a simple hash for any hashable value.
pub fn compute_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Proptest strategies for query testing.
///
/// These strategies generate random but reproducible inputs for
/// property-based testing of the query core.
pub mod strategies {
    use bw_core::catalog::{Race, UnitType, UpgradeType};
    use bw_core::position::{Position, TilePosition};
    use proptest::prelude::*;

    /// Generate a pixel position on a `width` × `height` tile map.
    pub fn arb_position(width: u16, height: u16) -> impl Strategy<Value = Position> {
        (0..i32::from(width) * 32, 0..i32::from(height) * 32).prop_map(|(x, y)| Position::new(x, y))
    }

    /// Generate a tile on a `width` × `height` tile map.
    pub fn arb_tile(width: u16, height: u16) -> impl Strategy<Value = TilePosition> {
        (0..i32::from(width), 0..i32::from(height)).prop_map(|(x, y)| TilePosition::new(x, y))
    }

    /// Generate a translation vector in pixels.
    pub fn arb_offset(max: i32) -> impl Strategy<Value = Position> {
        (-max..=max, -max..=max).prop_map(|(x, y)| Position::new(x, y))
    }

    /// Generate any catalog unit type.
    pub fn arb_unit_type() -> impl Strategy<Value = UnitType> {
        let all: Vec<UnitType> = UnitType::all().collect();
        proptest::sample::select(all)
    }

    /// Generate a unit type that carries at least one weapon.
    pub fn arb_armed_unit_type() -> impl Strategy<Value = UnitType> {
        let armed: Vec<UnitType> = UnitType::all()
            .filter(|t| t.ground_weapon().is_some() || t.air_weapon().is_some())
            .collect();
        proptest::sample::select(armed)
    }

    /// Generate a placeable structure type.
    pub fn arb_structure_type() -> impl Strategy<Value = UnitType> {
        let structures: Vec<UnitType> = UnitType::all()
            .filter(|t| t.is_building() && !t.is_addon() && !t.is_refinery() && !t.is_resource_container())
            .collect();
        proptest::sample::select(structures)
    }

    /// Generate a playable race.
    pub fn arb_race() -> impl Strategy<Value = Race> {
        proptest::sample::select(Race::PLAYABLE.to_vec())
    }

    /// Generate upgrade levels for a handful of upgrades.
    pub fn arb_upgrade_levels() -> impl Strategy<Value = Vec<(UpgradeType, i32)>> {
        let all: Vec<UpgradeType> = UpgradeType::all().collect();
        proptest::collection::vec((proptest::sample::select(all), 0..=3i32), 0..6)
    }

    /// Generate unit placements: type and center.
    pub fn arb_unit_layout(
        width: u16,
        height: u16,
        max_units: usize,
    ) -> impl Strategy<Value = Vec<(UnitType, Position)>> {
        proptest::collection::vec((arb_unit_type(), arb_position(width, height)), 0..max_units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{protoss_base, terran_base};
    use bw_core::catalog::UnitType;
    use bw_core::position::{Position, TilePosition};
    use proptest::prelude::*;

    #[test]
    fn test_verify_determinism_simple() {
        let result = verify_determinism(3, || terran_base().game(), |game| game.all_units().count());
        assert!(result.is_deterministic);
        assert_eq!(result.unique_hashes().len(), 1);
    }

    #[test]
    fn test_placement_determinism() {
        verify_determinism(
            4,
            || terran_base().game(),
            |game| {
                (0..40)
                    .map(|x| game.placement_failure(TilePosition::new(x, 20), UnitType::TerranBarracks, None, false))
                    .collect::<Vec<_>>()
            },
        )
        .assert_deterministic();
    }

    #[test]
    fn test_spatial_order_survives_serialization() {
        let snapshot = terran_base().build();
        assert!(verify_serialization_determinism(&snapshot, |game| {
            game.units_in_radius(Position::new(300, 300), 512, |_| true)
                .iter()
                .map(|u| u.id)
                .collect::<Vec<_>>()
        }));
    }

    #[test]
    fn test_parallel_power_queries_agree() {
        let snapshot = protoss_base().build();
        let result = run_parallel_queries(&snapshot, 4, |game| {
            (10..40)
                .map(|x| game.has_power(TilePosition::new(x, 20), Some(UnitType::ProtossGateway)))
                .collect::<Vec<_>>()
        });
        result.assert_deterministic();
        assert_eq!(result.hashes.len(), 4);
    }

    proptest! {
        #[test]
        fn prop_build_location_is_repeatable(
            desired in strategies::arb_tile(64, 64),
            structure in strategies::arb_structure_type(),
        ) {
            let result = verify_determinism(
                2,
                || terran_base().game(),
                |game| game.build_location(structure, desired, 8),
            );
            prop_assert!(result.is_deterministic);
        }
    }
}
