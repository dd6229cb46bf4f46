//! Damage types, target size classes and the damage ratio table.

use serde::{Deserialize, Serialize};

/// How a weapon's damage interacts with target size and armor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageType {
    /// Not scaled by size; deals nothing through the ratio table.
    Independent,
    /// 50% vs small, 75% vs medium, 100% vs large.
    Explosive,
    /// 100% vs small, 50% vs medium, 25% vs large.
    Concussive,
    /// Full damage against every size.
    Normal,
    /// Full damage and bypasses armor.
    IgnoreArmor,
    /// No damage type.
    None,
    /// Unrecognised damage type.
    Unknown,
}

/// Size class of a unit type, the second key of the ratio table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitSizeType {
    /// Resources and other map objects.
    Independent,
    /// Infantry-sized units.
    Small,
    /// Vehicles and mid-sized creatures.
    Medium,
    /// Structures, capital ships and large creatures.
    Large,
    /// No size.
    None,
    /// Unrecognised size.
    Unknown,
}

/// Fixed-point damage multipliers out of 256, `[damage type][size]`.
///
/// Columns: Independent, Small, Medium, Large, None, Unknown.
pub const DAMAGE_RATIO: [[i32; 6]; 7] = [
    [0, 0, 0, 0, 0, 0],       // Independent
    [0, 128, 192, 256, 0, 0], // Explosive
    [0, 256, 128, 64, 0, 0],  // Concussive
    [0, 256, 256, 256, 0, 0], // Normal
    [0, 256, 256, 256, 0, 0], // IgnoreArmor
    [0, 0, 0, 0, 0, 0],       // None
    [0, 0, 0, 0, 0, 0],       // Unknown
];

/// Denominator of [`DAMAGE_RATIO`] entries.
pub const DAMAGE_RATIO_SCALE: i32 = 256;

impl DamageType {
    /// Row index into [`DAMAGE_RATIO`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Independent => 0,
            Self::Explosive => 1,
            Self::Concussive => 2,
            Self::Normal => 3,
            Self::IgnoreArmor => 4,
            Self::None => 5,
            Self::Unknown => 6,
        }
    }

    /// Multiplier (out of 256) against a target of the given size.
    #[must_use]
    pub const fn ratio_vs(self, size: UnitSizeType) -> i32 {
        DAMAGE_RATIO[self.index()][size.index()]
    }

    /// Whether target armor is skipped.
    #[must_use]
    pub const fn ignores_armor(self) -> bool {
        matches!(self, Self::IgnoreArmor)
    }
}

impl UnitSizeType {
    /// Column index into [`DAMAGE_RATIO`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Independent => 0,
            Self::Small => 1,
            Self::Medium => 2,
            Self::Large => 3,
            Self::None => 4,
            Self::Unknown => 5,
        }
    }
}
