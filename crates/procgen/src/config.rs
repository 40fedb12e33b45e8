//! Generation configuration. Loaded from a RON file, every field optional.
//!
//! Spawner variants disagree on several constants (moon distance factors of
//! 1.8 to 2.5 in one, 2.2 to 3.0 in another), so none of them are hard-coded:
//! they live here as defaults.

use crate::cache::EvictionPolicy;
use gen_core::{GenError, GenResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Ceiling for `PlanetConfig::max_moons`.
pub const MAX_MOONS_LIMIT: u32 = 64;
/// Ceiling for `FieldConfig::count_max`. Placement is quadratic in the count.
pub const FIELD_COUNT_LIMIT: u32 = 1024;
/// Ceiling for `FieldConfig::attempts_per_member`.
pub const FIELD_ATTEMPTS_LIMIT: u32 = 100;

/// `value` if finite, otherwise `default` with a warning.
fn finite_or(value: f32, default: f32, name: &str) -> f32 {
    if value.is_finite() {
        value
    } else {
        log::warn!("{} is {}, using default {}", name, value, default);
        default
    }
}

/// All tunables for one generator instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default)]
    pub textures: TextureConfig,
    #[serde(default)]
    pub planets: PlanetConfig,
    #[serde(default)]
    pub moons: MoonOrbitConfig,
    #[serde(default)]
    pub field: FieldConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub sector: SectorConfig,
}

/// Texture edge lengths in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureConfig {
    #[serde(default = "default_terran_size")]
    pub terran_size: u32,
    #[serde(default = "default_gaseous_size")]
    pub gaseous_size: u32,
    #[serde(default = "default_moon_size")]
    pub moon_size: u32,
    #[serde(default = "default_asteroid_small")]
    pub asteroid_small: u32,
    #[serde(default = "default_asteroid_medium")]
    pub asteroid_medium: u32,
    #[serde(default = "default_asteroid_large")]
    pub asteroid_large: u32,
    /// Octaves of fbm noise for surfaces.
    #[serde(default = "default_octaves")]
    pub octaves: u32,
}

fn default_terran_size() -> u32 {
    256
}
fn default_gaseous_size() -> u32 {
    512
}
fn default_moon_size() -> u32 {
    64
}
fn default_asteroid_small() -> u32 {
    16
}
fn default_asteroid_medium() -> u32 {
    32
}
fn default_asteroid_large() -> u32 {
    64
}
fn default_octaves() -> u32 {
    5
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            terran_size: default_terran_size(),
            gaseous_size: default_gaseous_size(),
            moon_size: default_moon_size(),
            asteroid_small: default_asteroid_small(),
            asteroid_medium: default_asteroid_medium(),
            asteroid_large: default_asteroid_large(),
            octaves: default_octaves(),
        }
    }
}

/// Moon counts rolled per planet category when no override is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetConfig {
    #[serde(default = "default_terran_moons_min")]
    pub terran_moons_min: u32,
    #[serde(default = "default_terran_moons_max")]
    pub terran_moons_max: u32,
    #[serde(default = "default_gaseous_moons_min")]
    pub gaseous_moons_min: u32,
    #[serde(default = "default_gaseous_moons_max")]
    pub gaseous_moons_max: u32,
    /// Hard ceiling for explicit moon count overrides.
    #[serde(default = "default_max_moons")]
    pub max_moons: u32,
}

fn default_terran_moons_min() -> u32 {
    0
}
fn default_terran_moons_max() -> u32 {
    2
}
fn default_gaseous_moons_min() -> u32 {
    1
}
fn default_gaseous_moons_max() -> u32 {
    4
}
fn default_max_moons() -> u32 {
    8
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            terran_moons_min: default_terran_moons_min(),
            terran_moons_max: default_terran_moons_max(),
            gaseous_moons_min: default_gaseous_moons_min(),
            gaseous_moons_max: default_gaseous_moons_max(),
            max_moons: default_max_moons(),
        }
    }
}

/// Moon orbit distribution around a body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoonOrbitConfig {
    /// Innermost orbit as a multiple of the body radius.
    #[serde(default = "default_min_factor")]
    pub min_factor: f32,
    /// Outermost orbit as a multiple of the body radius.
    #[serde(default = "default_max_factor")]
    pub max_factor: f32,
    /// Upper bound of the eccentricity-like deviation.
    #[serde(default = "default_max_deviation")]
    pub max_deviation: f32,
    /// Angular speed (rad/s) of a moon on the innermost orbit.
    #[serde(default = "default_orbit_factor")]
    pub orbit_factor: f32,
    /// Gas giant moons orbit this much slower.
    #[serde(default = "default_gaseous_speed_factor")]
    pub gaseous_speed_factor: f32,
    /// Gas giants push the outer bound out by this factor.
    #[serde(default = "default_gaseous_distance_factor")]
    pub gaseous_distance_factor: f32,
    /// Distance jitter as a fraction of the ring step.
    #[serde(default = "default_step_jitter")]
    pub step_jitter: f32,
    /// Phase jitter as a fraction of the angular slot.
    #[serde(default = "default_phase_jitter")]
    pub phase_jitter: f32,
}

fn default_min_factor() -> f32 {
    2.2
}
fn default_max_factor() -> f32 {
    3.0
}
fn default_max_deviation() -> f32 {
    0.25
}
fn default_orbit_factor() -> f32 {
    0.6
}
fn default_gaseous_speed_factor() -> f32 {
    0.8
}
fn default_gaseous_distance_factor() -> f32 {
    1.2
}
fn default_step_jitter() -> f32 {
    0.2
}
fn default_phase_jitter() -> f32 {
    0.1
}

impl Default for MoonOrbitConfig {
    fn default() -> Self {
        Self {
            min_factor: default_min_factor(),
            max_factor: default_max_factor(),
            max_deviation: default_max_deviation(),
            orbit_factor: default_orbit_factor(),
            gaseous_speed_factor: default_gaseous_speed_factor(),
            gaseous_distance_factor: default_gaseous_distance_factor(),
            step_jitter: default_step_jitter(),
            phase_jitter: default_phase_jitter(),
        }
    }
}

/// Asteroid field layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Nominal field radius in world units.
    #[serde(default = "default_field_radius")]
    pub radius: f32,
    #[serde(default = "default_count_min")]
    pub count_min: u32,
    #[serde(default = "default_count_max")]
    pub count_max: u32,
    /// Minimum center-to-center distance between members.
    #[serde(default = "default_min_spacing")]
    pub min_spacing: f32,
    /// The actual radius is `radius * (1 ± radius_jitter)`.
    #[serde(default = "default_radius_jitter")]
    pub radius_jitter: f32,
    /// Placement attempts per requested member.
    #[serde(default = "default_attempts_per_member")]
    pub attempts_per_member: u32,
    #[serde(default = "default_elongation_min")]
    pub elongation_min: f32,
    #[serde(default = "default_elongation_max")]
    pub elongation_max: f32,
    /// Rolls below this are small.
    #[serde(default = "default_small_threshold")]
    pub small_threshold: f32,
    /// Rolls below this (and above `small_threshold`) are medium; the rest large.
    #[serde(default = "default_medium_threshold")]
    pub medium_threshold: f32,
    #[serde(default = "default_small_scale")]
    pub small_scale: f32,
    #[serde(default = "default_medium_scale")]
    pub medium_scale: f32,
    #[serde(default = "default_large_scale")]
    pub large_scale: f32,
    #[serde(default = "default_scale_jitter")]
    pub scale_jitter: f32,
    /// Members spin at up to this many rad/s in either direction.
    #[serde(default = "default_max_rotation_speed")]
    pub max_rotation_speed: f32,
    /// Number of visual variants per size class.
    #[serde(default = "default_variant_count")]
    pub variant_count: u32,
}

fn default_field_radius() -> f32 {
    400.0
}
fn default_count_min() -> u32 {
    8
}
fn default_count_max() -> u32 {
    15
}
fn default_min_spacing() -> f32 {
    60.0
}
fn default_radius_jitter() -> f32 {
    0.2
}
fn default_attempts_per_member() -> u32 {
    10
}
fn default_elongation_min() -> f32 {
    0.55
}
fn default_elongation_max() -> f32 {
    1.0
}
fn default_small_threshold() -> f32 {
    0.6
}
fn default_medium_threshold() -> f32 {
    0.9
}
fn default_small_scale() -> f32 {
    0.6
}
fn default_medium_scale() -> f32 {
    1.0
}
fn default_large_scale() -> f32 {
    1.6
}
fn default_scale_jitter() -> f32 {
    0.15
}
fn default_max_rotation_speed() -> f32 {
    1.2
}
fn default_variant_count() -> u32 {
    4
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            radius: default_field_radius(),
            count_min: default_count_min(),
            count_max: default_count_max(),
            min_spacing: default_min_spacing(),
            radius_jitter: default_radius_jitter(),
            attempts_per_member: default_attempts_per_member(),
            elongation_min: default_elongation_min(),
            elongation_max: default_elongation_max(),
            small_threshold: default_small_threshold(),
            medium_threshold: default_medium_threshold(),
            small_scale: default_small_scale(),
            medium_scale: default_medium_scale(),
            large_scale: default_large_scale(),
            scale_jitter: default_scale_jitter(),
            max_rotation_speed: default_max_rotation_speed(),
            variant_count: default_variant_count(),
        }
    }
}

impl FieldConfig {
    /// Field with the given radius, count range and spacing; other fields default.
    pub fn new(radius: f32, count_min: u32, count_max: u32, min_spacing: f32) -> Self {
        Self {
            radius,
            count_min,
            count_max,
            min_spacing,
            ..Default::default()
        }
    }
}

/// Per-kind texture cache bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub policy: EvictionPolicy,
    #[serde(default = "default_planet_capacity")]
    pub planet_capacity: usize,
    #[serde(default = "default_atmosphere_capacity")]
    pub atmosphere_capacity: usize,
    #[serde(default = "default_moon_capacity")]
    pub moon_capacity: usize,
    #[serde(default = "default_asteroid_capacity")]
    pub asteroid_capacity: usize,
    /// Once over capacity, evict down to `capacity * trim_ratio` entries.
    #[serde(default = "default_trim_ratio")]
    pub trim_ratio: f32,
}

fn default_planet_capacity() -> usize {
    24
}
fn default_atmosphere_capacity() -> usize {
    24
}
fn default_moon_capacity() -> usize {
    32
}
fn default_asteroid_capacity() -> usize {
    64
}
fn default_trim_ratio() -> f32 {
    0.8
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            policy: EvictionPolicy::default(),
            planet_capacity: default_planet_capacity(),
            atmosphere_capacity: default_atmosphere_capacity(),
            moon_capacity: default_moon_capacity(),
            asteroid_capacity: default_asteroid_capacity(),
            trim_ratio: default_trim_ratio(),
        }
    }
}

/// What a world grid cell may contain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorConfig {
    #[serde(default = "default_planet_chance")]
    pub planet_chance: f32,
    #[serde(default = "default_field_chance")]
    pub field_chance: f32,
}

fn default_planet_chance() -> f32 {
    0.15
}
fn default_field_chance() -> f32 {
    0.25
}

impl Default for SectorConfig {
    fn default() -> Self {
        Self {
            planet_chance: default_planet_chance(),
            field_chance: default_field_chance(),
        }
    }
}

impl GenerationConfig {
    /// Parse a config from RON text.
    pub fn from_ron(data: &str) -> GenResult<Self> {
        ron::from_str(data).map_err(|e| GenError::Config(e.to_string()))
    }

    /// Load from a RON file.
    pub fn load_from(path: impl AsRef<Path>) -> GenResult<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        Self::from_ron(&data)
    }

    /// Load from `path`. If the file is missing or invalid, returns the default config.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from(path) {
            Ok(config) => config,
            Err(GenError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                log::warn!("Invalid config at {:?}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    pub fn to_ron(&self) -> GenResult<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| GenError::Config(e.to_string()))
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> GenResult<()> {
        std::fs::write(path.as_ref(), self.to_ron()?)?;
        Ok(())
    }

    /// Clamp inconsistent values (swapped ranges, negative factors) to the nearest
    /// valid configuration. Texture sizes are left alone: the synthesizer rejects
    /// them and falls back to placeholders.
    pub fn sanitized(mut self) -> Self {
        let moons = &mut self.moons;
        moons.min_factor = finite_or(moons.min_factor, default_min_factor(), "moons.min_factor");
        moons.max_factor = finite_or(moons.max_factor, default_max_factor(), "moons.max_factor");
        moons.max_deviation =
            finite_or(moons.max_deviation, default_max_deviation(), "moons.max_deviation");
        moons.orbit_factor =
            finite_or(moons.orbit_factor, default_orbit_factor(), "moons.orbit_factor");
        moons.gaseous_speed_factor = finite_or(
            moons.gaseous_speed_factor,
            default_gaseous_speed_factor(),
            "moons.gaseous_speed_factor",
        );
        moons.gaseous_distance_factor = finite_or(
            moons.gaseous_distance_factor,
            default_gaseous_distance_factor(),
            "moons.gaseous_distance_factor",
        );
        moons.step_jitter = finite_or(moons.step_jitter, default_step_jitter(), "moons.step_jitter");
        moons.phase_jitter =
            finite_or(moons.phase_jitter, default_phase_jitter(), "moons.phase_jitter");
        if moons.min_factor <= 0.0 {
            log::warn!("moons.min_factor {} must be positive, using default", moons.min_factor);
            moons.min_factor = default_min_factor();
        }
        if moons.max_factor < moons.min_factor {
            log::warn!(
                "moons.max_factor {} below min_factor {}, clamping",
                moons.max_factor,
                moons.min_factor
            );
            moons.max_factor = moons.min_factor;
        }
        moons.max_deviation = moons.max_deviation.clamp(0.05, 0.95);
        moons.step_jitter = moons.step_jitter.clamp(0.0, 0.45);
        moons.phase_jitter = moons.phase_jitter.clamp(0.0, 0.45);

        let planets = &mut self.planets;
        if planets.max_moons > MAX_MOONS_LIMIT {
            log::warn!(
                "planets.max_moons {} too large, clamping to {}",
                planets.max_moons,
                MAX_MOONS_LIMIT
            );
            planets.max_moons = MAX_MOONS_LIMIT;
        }
        planets.terran_moons_max = planets.terran_moons_max.min(planets.max_moons);
        planets.gaseous_moons_max = planets.gaseous_moons_max.min(planets.max_moons);
        planets.terran_moons_min = planets.terran_moons_min.min(planets.terran_moons_max);
        planets.gaseous_moons_min = planets.gaseous_moons_min.min(planets.gaseous_moons_max);

        self.field = self.field.sanitized();

        let cache = &mut self.cache;
        cache.trim_ratio = finite_or(cache.trim_ratio, default_trim_ratio(), "cache.trim_ratio")
            .clamp(0.1, 1.0);

        let sector = &mut self.sector;
        sector.planet_chance =
            finite_or(sector.planet_chance, default_planet_chance(), "sector.planet_chance")
                .clamp(0.0, 1.0);
        sector.field_chance =
            finite_or(sector.field_chance, default_field_chance(), "sector.field_chance")
                .clamp(0.0, 1.0 - sector.planet_chance);
        self
    }
}

impl FieldConfig {
    /// Field config with swapped, negative, non-finite or oversized values clamped.
    pub fn sanitized(mut self) -> Self {
        self.radius = finite_or(self.radius, default_field_radius(), "field.radius");
        self.min_spacing = finite_or(self.min_spacing, default_min_spacing(), "field.min_spacing");
        self.radius_jitter =
            finite_or(self.radius_jitter, default_radius_jitter(), "field.radius_jitter");
        self.elongation_min =
            finite_or(self.elongation_min, default_elongation_min(), "field.elongation_min");
        self.elongation_max =
            finite_or(self.elongation_max, default_elongation_max(), "field.elongation_max");
        self.small_threshold =
            finite_or(self.small_threshold, default_small_threshold(), "field.small_threshold");
        self.medium_threshold =
            finite_or(self.medium_threshold, default_medium_threshold(), "field.medium_threshold");
        self.small_scale = finite_or(self.small_scale, default_small_scale(), "field.small_scale");
        self.medium_scale =
            finite_or(self.medium_scale, default_medium_scale(), "field.medium_scale");
        self.large_scale = finite_or(self.large_scale, default_large_scale(), "field.large_scale");
        self.scale_jitter =
            finite_or(self.scale_jitter, default_scale_jitter(), "field.scale_jitter");
        self.max_rotation_speed = finite_or(
            self.max_rotation_speed,
            default_max_rotation_speed(),
            "field.max_rotation_speed",
        );

        if self.count_min > self.count_max {
            log::warn!(
                "field count range {}..{} inverted, swapping",
                self.count_min,
                self.count_max
            );
            std::mem::swap(&mut self.count_min, &mut self.count_max);
        }
        if self.count_max > FIELD_COUNT_LIMIT {
            log::warn!(
                "field.count_max {} too large, clamping to {}",
                self.count_max,
                FIELD_COUNT_LIMIT
            );
            self.count_max = FIELD_COUNT_LIMIT;
            self.count_min = self.count_min.min(FIELD_COUNT_LIMIT);
        }
        if self.radius < 0.0 {
            log::warn!("field radius {} invalid, clamping to 0", self.radius);
            self.radius = 0.0;
        }
        self.min_spacing = self.min_spacing.max(0.0);
        self.radius_jitter = self.radius_jitter.clamp(0.0, 0.9);
        self.elongation_min = self.elongation_min.clamp(0.05, 1.0);
        self.elongation_max = self.elongation_max.clamp(self.elongation_min, 1.0);
        self.medium_threshold = self.medium_threshold.clamp(0.0, 1.0);
        self.small_threshold = self.small_threshold.clamp(0.0, self.medium_threshold);
        self.scale_jitter = self.scale_jitter.clamp(0.0, 0.9);
        self.max_rotation_speed = self.max_rotation_speed.abs();
        self.variant_count = self.variant_count.max(1);
        self.attempts_per_member = self.attempts_per_member.clamp(1, FIELD_ATTEMPTS_LIMIT);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ron_gives_defaults() {
        let config = GenerationConfig::from_ron("()").unwrap();
        assert_eq!(config, GenerationConfig::default());
    }

    #[test]
    fn partial_ron_keeps_other_defaults() {
        let config = GenerationConfig::from_ron("(moons: (min_factor: 1.8, max_factor: 2.5))").unwrap();
        assert_eq!(config.moons.min_factor, 1.8);
        assert_eq!(config.moons.max_factor, 2.5);
        assert_eq!(config.moons.orbit_factor, default_orbit_factor());
        assert_eq!(config.textures.gaseous_size, 512);
    }

    #[test]
    fn ron_round_trip() {
        let mut config = GenerationConfig::default();
        config.cache.policy = EvictionPolicy::OldestInserted;
        config.field.min_spacing = 42.0;
        let text = config.to_ron().unwrap();
        assert_eq!(GenerationConfig::from_ron(&text).unwrap(), config);
    }

    #[test]
    fn invalid_ron_is_a_config_error() {
        let err = GenerationConfig::from_ron("(moons: 12)").unwrap_err();
        assert!(matches!(err, GenError::Config(_)));
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let config = GenerationConfig::load_or_default("/definitely/not/here/procgen.ron");
        assert_eq!(config, GenerationConfig::default());
    }

    #[test]
    fn sanitize_fixes_inverted_ranges() {
        let mut config = GenerationConfig::default();
        config.moons.min_factor = 3.0;
        config.moons.max_factor = 2.0;
        config.field.count_min = 20;
        config.field.count_max = 5;
        config.sector.planet_chance = 0.9;
        config.sector.field_chance = 0.9;
        let config = config.sanitized();
        assert_eq!(config.moons.max_factor, 3.0);
        assert_eq!((config.field.count_min, config.field.count_max), (5, 20));
        assert!(config.sector.planet_chance + config.sector.field_chance <= 1.0 + 1e-6);
    }

    #[test]
    fn non_finite_ron_values_fall_back_to_defaults() {
        let mut config = GenerationConfig::from_ron(
            "(field: (medium_threshold: NaN, elongation_min: NaN), \
             sector: (planet_chance: NaN), moons: (max_factor: NaN))",
        )
        .unwrap();
        config.field.radius = f32::INFINITY;
        let config = config.sanitized();
        assert_eq!(config.field.medium_threshold, default_medium_threshold());
        assert_eq!(config.field.elongation_min, default_elongation_min());
        assert_eq!(config.field.radius, default_field_radius());
        assert_eq!(config.sector.planet_chance, default_planet_chance());
        assert_eq!(config.moons.max_factor, default_max_factor());
    }

    #[test]
    fn oversized_counts_are_capped() {
        let mut config = GenerationConfig::default();
        config.planets.max_moons = u32::MAX;
        config.planets.gaseous_moons_max = u32::MAX;
        config.field.count_min = u32::MAX - 1;
        config.field.count_max = u32::MAX;
        config.field.attempts_per_member = u32::MAX;
        let config = config.sanitized();
        assert_eq!(config.planets.max_moons, MAX_MOONS_LIMIT);
        assert_eq!(config.planets.gaseous_moons_max, MAX_MOONS_LIMIT);
        assert_eq!(config.field.count_max, FIELD_COUNT_LIMIT);
        assert!(config.field.count_min <= config.field.count_max);
        assert_eq!(config.field.attempts_per_member, FIELD_ATTEMPTS_LIMIT);
    }
}
