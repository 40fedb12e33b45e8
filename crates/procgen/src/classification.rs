//! Seed → theme → category classification, plus the moon and asteroid kinds.
//!
//! **Purity:** `classify(seed)` depends on nothing but the seed. Every roll uses
//! its own derived stream, so calling order and cache state never matter.

use crate::streams;
use gen_core::{GenError, GenResult, Seed, SeededRandom};
use serde::{Deserialize, Serialize};

/// Coarse body classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Rocky worlds with a solid surface.
    Terran,
    /// Gas and ice giants.
    Gaseous,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Terran, Category::Gaseous];

    pub fn id(self) -> i32 {
        match self {
            Category::Terran => 0,
            Category::Gaseous => 1,
        }
    }

    pub fn from_id(id: i32) -> GenResult<Self> {
        match id {
            0 => Ok(Category::Terran),
            1 => Ok(Category::Gaseous),
            _ => Err(GenError::invalid("category_id", id)),
        }
    }
}

/// A planet's surface archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanetTheme {
    /// Dry cracked rock, ochre and rust.
    Arid,
    /// Dune seas, pale sand.
    Desert,
    /// Black crust over glowing fissures.
    Lava,
    /// Frozen white-blue shell.
    Ice,
    /// Mostly water, scattered islands.
    Ocean,
    /// Green continents and shallow seas.
    Lush,
    /// Grey highlands with snowy peaks.
    Alpine,
    /// Tan and brown bands with a storm spot.
    Jovian,
    /// Soft gold bands.
    Saturnine,
    /// Pale cyan haze.
    Uranian,
    /// Deep blue with dark storms.
    Neptunian,
}

/// Relative roll weight of each theme (sums to 100).
const THEME_WEIGHTS: [(PlanetTheme, u32); PlanetTheme::COUNT] = [
    (PlanetTheme::Arid, 12),
    (PlanetTheme::Desert, 10),
    (PlanetTheme::Lava, 10),
    (PlanetTheme::Ice, 12),
    (PlanetTheme::Ocean, 10),
    (PlanetTheme::Lush, 10),
    (PlanetTheme::Alpine, 8),
    (PlanetTheme::Jovian, 9),
    (PlanetTheme::Saturnine, 7),
    (PlanetTheme::Uranian, 6),
    (PlanetTheme::Neptunian, 6),
];

impl PlanetTheme {
    pub const COUNT: usize = 11;

    pub const ALL: [PlanetTheme; PlanetTheme::COUNT] = [
        PlanetTheme::Arid,
        PlanetTheme::Desert,
        PlanetTheme::Lava,
        PlanetTheme::Ice,
        PlanetTheme::Ocean,
        PlanetTheme::Lush,
        PlanetTheme::Alpine,
        PlanetTheme::Jovian,
        PlanetTheme::Saturnine,
        PlanetTheme::Uranian,
        PlanetTheme::Neptunian,
    ];

    /// Stable integer id (index into [`PlanetTheme::ALL`]).
    pub fn id(self) -> i32 {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0) as i32
    }

    pub fn from_id(id: i32) -> GenResult<Self> {
        usize::try_from(id)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| GenError::invalid("theme_id", id))
    }

    /// Like [`PlanetTheme::from_id`] but clamps out-of-range ids to the nearest theme.
    pub fn from_id_clamped(id: i32) -> Self {
        match Self::from_id(id) {
            Ok(theme) => theme,
            Err(_) => {
                let clamped = id.clamp(0, Self::COUNT as i32 - 1);
                log::warn!("Theme id {} out of range, clamping to {}", id, clamped);
                Self::ALL[clamped as usize]
            }
        }
    }

    /// Fixed theme → category lookup.
    pub fn category(self) -> Category {
        match self {
            PlanetTheme::Jovian
            | PlanetTheme::Saturnine
            | PlanetTheme::Uranian
            | PlanetTheme::Neptunian => Category::Gaseous,
            _ => Category::Terran,
        }
    }

    pub fn is_gaseous(self) -> bool {
        self.category() == Category::Gaseous
    }
}

/// Result of classifying a seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Classification {
    pub theme: PlanetTheme,
    pub category: Category,
}

impl Classification {
    fn from_theme(theme: PlanetTheme) -> Self {
        Self {
            theme,
            category: theme.category(),
        }
    }
}

/// Weighted roll over the themes accepted by `filter`.
fn roll_theme(seed: Seed, filter: impl Fn(PlanetTheme) -> bool) -> PlanetTheme {
    let candidates: Vec<(PlanetTheme, u32)> = THEME_WEIGHTS
        .iter()
        .copied()
        .filter(|(theme, _)| filter(*theme))
        .collect();
    let total: u32 = candidates.iter().map(|(_, w)| w).sum();
    if total == 0 {
        return PlanetTheme::Arid;
    }

    let mut rng = SeededRandom::derive(seed, streams::THEME);
    let mut roll = rng.next_int(0, total as i64 - 1) as u32;
    for (theme, weight) in &candidates {
        if roll < *weight {
            return *theme;
        }
        roll -= weight;
    }
    candidates[candidates.len() - 1].0
}

/// Theme and category of the planet with `seed`.
pub fn classify(seed: Seed) -> Classification {
    Classification::from_theme(roll_theme(seed, |_| true))
}

/// Classify with optional overrides.
///
/// A theme override wins outright. A category override alone restricts the
/// weighted roll to that category's themes. If both are given and disagree,
/// the theme wins and the conflict is logged.
pub fn resolve(
    seed: Seed,
    theme_override: Option<PlanetTheme>,
    category_override: Option<Category>,
) -> Classification {
    match (theme_override, category_override) {
        (Some(theme), category) => {
            if let Some(category) = category {
                if category != theme.category() {
                    log::warn!(
                        "Theme override {:?} is {:?}, ignoring category override {:?}",
                        theme,
                        theme.category(),
                        category
                    );
                }
            }
            Classification::from_theme(theme)
        }
        (None, Some(category)) => {
            Classification::from_theme(roll_theme(seed, |t| t.category() == category))
        }
        (None, None) => classify(seed),
    }
}

/// Moon surface kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoonType {
    Rocky,
    Icy,
    Volcanic,
}

impl MoonType {
    pub const ALL: [MoonType; 3] = [MoonType::Rocky, MoonType::Icy, MoonType::Volcanic];

    pub fn id(self) -> i32 {
        match self {
            MoonType::Rocky => 0,
            MoonType::Icy => 1,
            MoonType::Volcanic => 2,
        }
    }

    pub fn from_id_clamped(id: i32) -> Self {
        let clamped = id.clamp(0, Self::ALL.len() as i32 - 1);
        if clamped != id {
            log::warn!("Moon type id {} out of range, clamping to {}", id, clamped);
        }
        Self::ALL[clamped as usize]
    }

    /// Moon kind for a moon of a `parent` body. Gas giants collect more ice.
    pub fn roll(seed: Seed, parent: Category) -> Self {
        let mut rng = SeededRandom::derive(seed, streams::MOON_TYPE);
        let roll = rng.next_int(0, 99);
        match parent {
            Category::Terran => match roll {
                0..=59 => MoonType::Rocky,
                60..=84 => MoonType::Icy,
                _ => MoonType::Volcanic,
            },
            Category::Gaseous => match roll {
                0..=34 => MoonType::Rocky,
                35..=79 => MoonType::Icy,
                _ => MoonType::Volcanic,
            },
        }
    }
}

/// Asteroid size classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AsteroidSize {
    Small,
    Medium,
    Large,
}

impl AsteroidSize {
    pub fn id(self) -> i32 {
        match self {
            AsteroidSize::Small => 0,
            AsteroidSize::Medium => 1,
            AsteroidSize::Large => 2,
        }
    }

    /// Size class for a uniform roll in `[0, 1)` against cumulative thresholds.
    pub fn from_roll(roll: f32, small_threshold: f32, medium_threshold: f32) -> Self {
        if roll < small_threshold {
            AsteroidSize::Small
        } else if roll < medium_threshold {
            AsteroidSize::Medium
        } else {
            AsteroidSize::Large
        }
    }
}
