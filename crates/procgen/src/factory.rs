//! Celestial body assembly: classification, textures, names and orbits wired
//! together into descriptor trees.
//!
//! **Seed-based replayability:** `build_planet(seed, x, y, params)` is fully
//! deterministic. The same world seed and grid cell always give the same
//! planet, atmosphere, name and moon system, whether or not the textures came
//! from the cache.
//!
//! Nothing here fails. A bad texture size degrades to a placeholder texture,
//! an out-of-range override is clamped, a crowded field comes back short.

use crate::cache::{CacheKey, GenerationCache, TextureKind};
use crate::classification::{self, AsteroidSize, Category, MoonType, PlanetTheme};
use crate::config::{FieldConfig, GenerationConfig};
use crate::layout::{self, AsteroidField, MoonOrbit};
use crate::naming;
use crate::sector::{self, SectorContents};
use crate::streams;
use crate::textures::TextureSynthesizer;
use gen_core::{grid_seed, mix, Seed, SeededRandom, TextureBuffer};
use std::sync::Arc;

/// What kind of body a descriptor describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Planet { theme: PlanetTheme, category: Category },
    Moon { moon_type: MoonType },
    Asteroid { size: AsteroidSize },
}

/// Complete output of generating one celestial object.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDescriptor {
    pub seed: Seed,
    pub kind: BodyKind,
    /// Edge length of `texture` in pixels.
    pub pixel_size: u32,
    pub texture: Arc<TextureBuffer>,
    /// Glow overlay; planets only.
    pub atmosphere: Option<Arc<TextureBuffer>>,
    pub name: String,
    /// Orbit around the parent; moons only.
    pub orbit: Option<MoonOrbit>,
    pub children: Vec<BodyDescriptor>,
}

impl BodyDescriptor {
    pub fn theme(&self) -> Option<PlanetTheme> {
        match self.kind {
            BodyKind::Planet { theme, .. } => Some(theme),
            _ => None,
        }
    }

    pub fn category(&self) -> Option<Category> {
        match self.kind {
            BodyKind::Planet { category, .. } => Some(category),
            _ => None,
        }
    }

    /// This body and all of its descendants, depth first.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &BodyDescriptor> + '_> {
        Box::new(std::iter::once(self).chain(self.children.iter().flat_map(|c| c.iter())))
    }

    /// Whether any texture in the tree fell back to a placeholder.
    pub fn is_degraded(&self) -> bool {
        self.iter().any(|body| {
            body.texture.is_placeholder()
                || body.atmosphere.as_ref().is_some_and(|a| a.is_placeholder())
        })
    }
}

/// An asteroid field layout plus one descriptor per member, in member order.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub layout: AsteroidField,
    pub bodies: Vec<BodyDescriptor>,
}

/// Generated contents of one world grid cell.
#[derive(Debug, Clone, PartialEq)]
pub enum SectorDescriptor {
    Empty,
    Planet(BodyDescriptor),
    AsteroidField(FieldDescriptor),
}

/// Optional overrides for planet generation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanetParams {
    pub theme_override: Option<PlanetTheme>,
    pub category_override: Option<Category>,
    /// Exact moon count; clamped into `0..=max_moons`. `None` rolls from the seed.
    pub moon_count: Option<i32>,
}

impl PlanetParams {
    /// Params from raw integer overrides, where any negative value means "no override".
    /// Ids past the end clamp to the last valid value.
    pub fn from_raw(theme_id: i32, category_id: i32, moon_count: i32) -> Self {
        let theme_override = (theme_id >= 0).then(|| PlanetTheme::from_id_clamped(theme_id));
        let category_override = (category_id >= 0).then(|| {
            Category::from_id(category_id).unwrap_or_else(|e| {
                log::warn!("{}, clamping to gaseous", e);
                Category::Gaseous
            })
        });
        Self {
            theme_override,
            category_override,
            moon_count: (moon_count >= 0).then_some(moon_count),
        }
    }
}

/// Builds planets, moons and asteroid fields on top of a shared texture cache.
pub struct CelestialBodyFactory {
    config: GenerationConfig,
    synthesizer: TextureSynthesizer,
    cache: Arc<GenerationCache>,
}

impl CelestialBodyFactory {
    pub fn new(config: GenerationConfig, cache: Arc<GenerationCache>) -> Self {
        let config = config.sanitized();
        Self {
            synthesizer: TextureSynthesizer::new(config.textures.clone()),
            config,
            cache,
        }
    }

    /// Factory with default config and its own cache.
    pub fn with_defaults() -> Self {
        let config = GenerationConfig::default();
        let cache = Arc::new(GenerationCache::new(&config.cache));
        Self::new(config, cache)
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<GenerationCache> {
        &self.cache
    }

    pub fn synthesizer(&self) -> &TextureSynthesizer {
        &self.synthesizer
    }

    /// Planet in grid cell `(grid_x, grid_y)` of world `seed`, with its moons.
    pub fn build_planet(
        &self,
        seed: Seed,
        grid_x: i32,
        grid_y: i32,
        params: &PlanetParams,
    ) -> BodyDescriptor {
        let planet_seed = grid_seed(seed, grid_x, grid_y);
        let class = classification::resolve(
            planet_seed,
            params.theme_override,
            params.category_override,
        );
        let theme = class.theme;
        let pixel_size = self.synthesizer.planet_size(class.category);

        let texture = self.cache.get_or_create(
            self.key(planet_seed, TextureKind::Planet, theme.id(), pixel_size),
            || self.synthesizer.planet(planet_seed, theme),
        );
        let atmosphere = self.cache.get_or_create(
            self.key(planet_seed, TextureKind::Atmosphere, theme.id(), pixel_size),
            || self.synthesizer.atmosphere(planet_seed, theme),
        );
        let name = naming::planet_name(seed, grid_x, grid_y);

        let moon_count = self.moon_count(planet_seed, class.category, params.moon_count);
        let orbits = layout::plan_moon_orbits(
            planet_seed,
            moon_count,
            pixel_size as f32 * 0.5,
            class.category,
            &self.config.moons,
        );
        let children = orbits
            .into_iter()
            .enumerate()
            .map(|(i, orbit)| {
                let moon_seed = mix(planet_seed, streams::CHILD_BASE + i as i64);
                let moon_type = MoonType::roll(moon_seed, class.category);
                let mut moon = self.build_moon(moon_seed, moon_type, &name);
                moon.orbit = Some(orbit);
                moon
            })
            .collect::<Vec<_>>();

        log::debug!(
            "Planet {} seed {} ({:?}, {} moons)",
            name,
            planet_seed,
            theme,
            children.len()
        );

        BodyDescriptor {
            seed: planet_seed,
            kind: BodyKind::Planet {
                theme,
                category: class.category,
            },
            pixel_size,
            texture,
            atmosphere: Some(atmosphere),
            name,
            orbit: None,
            children,
        }
    }

    /// A single moon. The orbit is left unset; `build_planet` fills it in.
    pub fn build_moon(&self, seed: Seed, moon_type: MoonType, parent_name: &str) -> BodyDescriptor {
        let texture = self.cache.get_or_create(
            self.key(seed, TextureKind::Moon, moon_type.id(), self.synthesizer.moon_size()),
            || self.synthesizer.moon(seed, moon_type),
        );
        BodyDescriptor {
            seed,
            kind: BodyKind::Moon { moon_type },
            pixel_size: self.synthesizer.moon_size(),
            texture,
            atmosphere: None,
            name: naming::moon_name(seed, parent_name),
            orbit: None,
            children: Vec::new(),
        }
    }

    /// A single asteroid of the given size class.
    pub fn build_asteroid(&self, seed: Seed, size: AsteroidSize) -> BodyDescriptor {
        let texture = self.cache.get_or_create(
            self.key(seed, TextureKind::Asteroid, size.id(), self.synthesizer.asteroid_size(size)),
            || self.synthesizer.asteroid(seed, size),
        );
        BodyDescriptor {
            seed,
            kind: BodyKind::Asteroid { size },
            pixel_size: self.synthesizer.asteroid_size(size),
            texture,
            atmosphere: None,
            name: naming::asteroid_designation(seed),
            orbit: None,
            children: Vec::new(),
        }
    }

    /// Field layout plus one asteroid per placed member.
    pub fn build_asteroid_field(&self, seed: Seed, field: &FieldConfig) -> FieldDescriptor {
        let layout = layout::plan_field(seed, field);
        let bodies = layout
            .members
            .iter()
            .map(|member| self.build_asteroid(member.seed, member.size))
            .collect();
        log::debug!(
            "Asteroid field {} with {}/{} members",
            seed,
            layout.actual_count(),
            layout.requested_count
        );
        FieldDescriptor { layout, bodies }
    }

    /// Whatever the world grid cell `(grid_x, grid_y)` contains.
    pub fn populate_sector(&self, world_seed: Seed, grid_x: i32, grid_y: i32) -> SectorDescriptor {
        match sector::plan_sector(world_seed, grid_x, grid_y, &self.config.sector) {
            SectorContents::Empty => SectorDescriptor::Empty,
            SectorContents::Planet { .. } => SectorDescriptor::Planet(self.build_planet(
                world_seed,
                grid_x,
                grid_y,
                &PlanetParams::default(),
            )),
            SectorContents::AsteroidField { seed } => {
                SectorDescriptor::AsteroidField(self.build_asteroid_field(seed, &self.config.field))
            }
        }
    }

    fn key(&self, seed: Seed, kind: TextureKind, variant: i32, size: u32) -> CacheKey {
        CacheKey::new(seed, kind, variant).with_texture(size, self.synthesizer.config().octaves)
    }

    fn moon_count(&self, planet_seed: Seed, category: Category, requested: Option<i32>) -> usize {
        let planets = &self.config.planets;
        match requested {
            Some(count) => {
                let max = i32::try_from(planets.max_moons).unwrap_or(i32::MAX);
                let clamped = count.clamp(0, max);
                if clamped != count {
                    log::warn!("Moon count {} out of range, clamping to {}", count, clamped);
                }
                clamped as usize
            }
            None => {
                let (min, max) = match category {
                    Category::Terran => (planets.terran_moons_min, planets.terran_moons_max),
                    Category::Gaseous => (planets.gaseous_moons_min, planets.gaseous_moons_max),
                };
                SeededRandom::derive(planet_seed, streams::MOON_COUNT).next_int(min as i64, max as i64)
                    as usize
            }
        }
    }
}
