//! Fixed stream ids for [`gen_core::SeededRandom::derive`].
//!
//! One id per named quantity. Changing a value here changes every world
//! generated from existing seeds.

pub const THEME: i64 = 1;
pub const MOON_COUNT: i64 = 2;
pub const MOON_TYPE: i64 = 3;
pub const NAME: i64 = 4;
pub const ORBIT_DISTANCE: i64 = 5;
pub const ORBIT_PHASE: i64 = 6;
pub const ORBIT_SPEED: i64 = 7;
pub const ORBIT_BASE_ANGLE: i64 = 8;
pub const FIELD_SHAPE: i64 = 9;
pub const FIELD_COUNT: i64 = 10;
pub const FIELD_PLACEMENT: i64 = 11;
pub const FIELD_MEMBER: i64 = 12;
pub const TEXTURE_NOISE: i64 = 13;
pub const TEXTURE_FEATURES: i64 = 14;
pub const SECTOR: i64 = 15;

/// Child seeds (moons, field members) are mixed with `CHILD_BASE + index`.
pub const CHILD_BASE: i64 = 1 << 16;
