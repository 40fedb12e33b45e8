//! What occupies each cell of the world grid.

use crate::config::SectorConfig;
use crate::streams;
use gen_core::{grid_seed, mix, Seed, SeededRandom};
use serde::{Deserialize, Serialize};

/// Contents of one grid cell, before any textures are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectorContents {
    Empty,
    Planet { seed: Seed },
    AsteroidField { seed: Seed },
}

impl SectorContents {
    pub fn is_empty(&self) -> bool {
        matches!(self, SectorContents::Empty)
    }
}

/// Roll the contents of cell `(grid_x, grid_y)`.
///
/// Planets use the cell's grid seed directly, so the result lines up with
/// `CelestialBodyFactory::build_planet` for the same cell.
pub fn plan_sector(world_seed: Seed, grid_x: i32, grid_y: i32, config: &SectorConfig) -> SectorContents {
    let cell_seed = grid_seed(world_seed, grid_x, grid_y);
    let roll = SeededRandom::derive(cell_seed, streams::SECTOR).next_unit();

    if roll < config.planet_chance {
        SectorContents::Planet { seed: cell_seed }
    } else if roll < config.planet_chance + config.field_chance {
        SectorContents::AsteroidField {
            seed: mix(cell_seed, streams::SECTOR),
        }
    } else {
        SectorContents::Empty
    }
}

/// Occupied cells in the rectangle `[x0, x1) x [y0, y1)`, row by row.
pub fn scan_sectors(
    world_seed: Seed,
    (x0, x1): (i32, i32),
    (y0, y1): (i32, i32),
    config: &SectorConfig,
) -> Vec<((i32, i32), SectorContents)> {
    (y0..y1)
        .flat_map(|y| (x0..x1).map(move |x| (x, y)))
        .map(|(x, y)| ((x, y), plan_sector(world_seed, x, y, config)))
        .filter(|(_, contents)| !contents.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_per_cell() {
        let config = SectorConfig::default();
        for x in -5..5 {
            for y in -5..5 {
                assert_eq!(plan_sector(3, x, y, &config), plan_sector(3, x, y, &config));
            }
        }
    }

    #[test]
    fn planet_seed_is_grid_seed() {
        let config = SectorConfig {
            planet_chance: 1.0,
            field_chance: 0.0,
        };
        assert_eq!(
            plan_sector(42, 1, 0, &config),
            SectorContents::Planet { seed: 1042 }
        );
    }

    #[test]
    fn zero_chances_leave_space_empty() {
        let config = SectorConfig {
            planet_chance: 0.0,
            field_chance: 0.0,
        };
        assert!(scan_sectors(11, (0, 20), (0, 20), &config).is_empty());
    }

    #[test]
    fn chances_roughly_respected() {
        let config = SectorConfig::default();
        let cells = scan_sectors(5, (0, 40), (0, 40), &config);
        let planets = cells
            .iter()
            .filter(|(_, c)| matches!(c, SectorContents::Planet { .. }))
            .count();
        let fields = cells.len() - planets;
        // 1600 cells at 15% and 25%
        assert!((150..=330).contains(&planets), "{}", planets);
        assert!((280..=520).contains(&fields), "{}", fields);
    }
}
