//! Playable races.

use serde::{Deserialize, Serialize};

/// Race of a player or unit type.
///
/// Supply is tracked separately per playable race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Race {
    /// Creep-dependent race; builds from larva.
    Zerg,
    /// Builds with workers; structures can lift off.
    Terran,
    /// Structures need a power field.
    Protoss,
    /// Resources, beacons and other map objects.
    #[default]
    Neutral,
}

impl Race {
    /// The three playable races, in supply-slot order.
    pub const PLAYABLE: [Race; 3] = [Race::Zerg, Race::Terran, Race::Protoss];

    /// Index of this race's supply counters, if it has any.
    #[must_use]
    pub const fn supply_index(self) -> Option<usize> {
        match self {
            Race::Zerg => Some(0),
            Race::Terran => Some(1),
            Race::Protoss => Some(2),
            Race::Neutral => None,
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Race::Zerg => "Zerg",
            Race::Terran => "Terran",
            Race::Protoss => "Protoss",
            Race::Neutral => "Neutral",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supply_slots_are_distinct() {
        let slots: Vec<_> = Race::PLAYABLE.iter().filter_map(|r| r.supply_index()).collect();
        assert_eq!(slots, vec![0, 1, 2]);
        assert_eq!(Race::Neutral.supply_index(), None);
    }
}
