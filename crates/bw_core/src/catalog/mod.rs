//! Static game catalog.
//!
//! Immutable, process-wide lookup tables for everything the rules engines
//! read about a type: unit types, weapons, techs, upgrades, races, damage
//! types and size classes.
//!
//! Every catalog is an enum keyed into a `static` table by discriminant,
//! so a lookup is an array index. Engine identifiers arriving as integers
//! are converted once at the boundary (`from_id`) and an identifier outside
//! the table is a [`QueryError`](crate::error::QueryError).

mod damage;
mod race;
mod tech;
mod unit_type;
mod upgrade;
mod weapon;

pub use damage::{DamageType, UnitSizeType, DAMAGE_RATIO, DAMAGE_RATIO_SCALE};
pub use race::Race;
pub use tech::{TechType, TechTypeData};
pub use unit_type::{TypeTraits, UnitType, UnitTypeData};
pub use upgrade::{UpgradeType, UpgradeTypeData};
pub use weapon::{WeaponType, WeaponTypeData};
