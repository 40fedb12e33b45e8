//! Seed arithmetic.
//!
//! Every derived seed is a wrapping integer combination of its parent, so the
//! same world seed always reproduces the same tree of objects.

/// Root of all determinism for one generated object.
pub type Seed = i64;

/// Grid cell stride on the x axis when deriving a cell seed.
pub const GRID_STRIDE_X: i64 = 1000;
/// Grid cell stride on the y axis when deriving a cell seed.
pub const GRID_STRIDE_Y: i64 = 100;

/// Hash-combine used for per-object randomization: `((seed << 5) + seed) ^ id`.
///
/// This exact formula keeps previously generated worlds bit-compatible.
#[inline]
pub fn mix(seed: Seed, id: i64) -> Seed {
    (seed << 5).wrapping_add(seed) ^ id
}

/// Seed for the object living in grid cell `(grid_x, grid_y)` of a world.
#[inline]
pub fn grid_seed(base: Seed, grid_x: i32, grid_y: i32) -> Seed {
    base.wrapping_add((grid_x as i64).wrapping_mul(GRID_STRIDE_X))
        .wrapping_add((grid_y as i64).wrapping_mul(GRID_STRIDE_Y))
}
