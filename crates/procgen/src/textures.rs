//! Procedural texture synthesis for planets, atmospheres, moons and asteroids.
//!
//! Every texture is a pure function of `(seed, kind discriminant, config)`. The
//! theme or moon type is folded into the noise seed, so two themes never share
//! a surface even for the same planet seed.
//!
//! The `try_*` functions report invalid configured sizes; the plain functions
//! never fail and substitute [`TextureBuffer::placeholder`] instead.

use crate::classification::{AsteroidSize, Category, MoonType, PlanetTheme};
use crate::config::TextureConfig;
use crate::streams;
use gen_core::{mix, GenResult, Pixel, Seed, SeededRandom, TextureBuffer};
use glam::{Vec2, Vec3};
use noise::{NoiseFn, Perlin};

/// Direction light falls from (top-left, towards the viewer).
const LIGHT_DIR: Vec3 = Vec3::new(-0.55, -0.5, 0.67);

/// Planet disk radius inside an atmosphere texture (fraction of the half-size).
/// Draw the atmosphere at `1 / ATMOSPHERE_INNER` times the planet's size.
pub const ATMOSPHERE_INNER: f32 = 0.86;

/// Surface colors and features for one planet theme.
#[derive(Debug, Clone)]
pub struct ThemePalette {
    /// Deep water or darkest band.
    pub deep: Vec3,
    /// Shallows or low ground.
    pub low: Vec3,
    /// Bulk of the land or main band color.
    pub mid: Vec3,
    /// Highlands or light band.
    pub high: Vec3,
    /// Peaks, storm spots, lava glow.
    pub accent: Vec3,
    pub atmosphere: Vec3,
    /// Peak atmosphere alpha.
    pub atmosphere_density: f32,
    /// Height below which terrain is water (terran) or the band cutoff (gaseous).
    pub sea_level: f32,
    pub polar_caps: bool,
    pub lava_cracks: bool,
    /// Band frequency for gas giants.
    pub bands: f32,
    /// How much noise bends the gas bands.
    pub turbulence: f32,
    pub storm_spot: bool,
}

impl ThemePalette {
    /// Get the palette for a theme.
    pub fn for_theme(theme: PlanetTheme) -> Self {
        let base = Self {
            deep: Vec3::ZERO,
            low: Vec3::ZERO,
            mid: Vec3::ZERO,
            high: Vec3::ZERO,
            accent: Vec3::ONE,
            atmosphere: Vec3::new(0.5, 0.7, 1.0),
            atmosphere_density: 0.5,
            sea_level: 0.0,
            polar_caps: false,
            lava_cracks: false,
            bands: 0.0,
            turbulence: 0.0,
            storm_spot: false,
        };
        match theme {
            PlanetTheme::Arid => Self {
                deep: Vec3::new(0.36, 0.20, 0.12),
                low: Vec3::new(0.55, 0.32, 0.18),
                mid: Vec3::new(0.72, 0.46, 0.26),
                high: Vec3::new(0.82, 0.62, 0.40),
                accent: Vec3::new(0.90, 0.78, 0.60),
                atmosphere: Vec3::new(0.95, 0.70, 0.45),
                atmosphere_density: 0.30,
                ..base
            },
            PlanetTheme::Desert => Self {
                deep: Vec3::new(0.62, 0.48, 0.30),
                low: Vec3::new(0.78, 0.64, 0.42),
                mid: Vec3::new(0.86, 0.74, 0.52),
                high: Vec3::new(0.93, 0.84, 0.64),
                accent: Vec3::new(0.70, 0.52, 0.34),
                atmosphere: Vec3::new(1.0, 0.85, 0.60),
                atmosphere_density: 0.35,
                ..base
            },
            PlanetTheme::Lava => Self {
                deep: Vec3::new(0.06, 0.04, 0.04),
                low: Vec3::new(0.14, 0.10, 0.09),
                mid: Vec3::new(0.22, 0.16, 0.14),
                high: Vec3::new(0.32, 0.24, 0.20),
                accent: Vec3::new(1.0, 0.42, 0.08),
                atmosphere: Vec3::new(1.0, 0.40, 0.15),
                atmosphere_density: 0.45,
                lava_cracks: true,
                ..base
            },
            PlanetTheme::Ice => Self {
                deep: Vec3::new(0.45, 0.62, 0.78),
                low: Vec3::new(0.66, 0.80, 0.90),
                mid: Vec3::new(0.82, 0.90, 0.96),
                high: Vec3::new(0.93, 0.96, 1.0),
                accent: Vec3::new(1.0, 1.0, 1.0),
                atmosphere: Vec3::new(0.70, 0.88, 1.0),
                atmosphere_density: 0.40,
                sea_level: 0.35,
                polar_caps: true,
                ..base
            },
            PlanetTheme::Ocean => Self {
                deep: Vec3::new(0.04, 0.14, 0.38),
                low: Vec3::new(0.10, 0.34, 0.62),
                mid: Vec3::new(0.78, 0.72, 0.50),
                high: Vec3::new(0.30, 0.56, 0.26),
                accent: Vec3::new(0.95, 0.97, 1.0),
                atmosphere: Vec3::new(0.40, 0.65, 1.0),
                atmosphere_density: 0.60,
                sea_level: 0.62,
                polar_caps: true,
                ..base
            },
            PlanetTheme::Lush => Self {
                deep: Vec3::new(0.06, 0.20, 0.42),
                low: Vec3::new(0.14, 0.40, 0.60),
                mid: Vec3::new(0.22, 0.52, 0.22),
                high: Vec3::new(0.38, 0.46, 0.24),
                accent: Vec3::new(0.92, 0.94, 0.96),
                atmosphere: Vec3::new(0.45, 0.70, 1.0),
                atmosphere_density: 0.55,
                sea_level: 0.45,
                polar_caps: true,
                ..base
            },
            PlanetTheme::Alpine => Self {
                deep: Vec3::new(0.20, 0.26, 0.32),
                low: Vec3::new(0.34, 0.40, 0.36),
                mid: Vec3::new(0.46, 0.48, 0.46),
                high: Vec3::new(0.62, 0.62, 0.64),
                accent: Vec3::new(0.96, 0.97, 1.0),
                atmosphere: Vec3::new(0.60, 0.75, 0.95),
                atmosphere_density: 0.40,
                sea_level: 0.25,
                polar_caps: true,
                ..base
            },
            PlanetTheme::Jovian => Self {
                deep: Vec3::new(0.48, 0.32, 0.22),
                low: Vec3::new(0.68, 0.50, 0.36),
                mid: Vec3::new(0.84, 0.72, 0.56),
                high: Vec3::new(0.94, 0.88, 0.78),
                accent: Vec3::new(0.78, 0.34, 0.22),
                atmosphere: Vec3::new(0.95, 0.82, 0.65),
                atmosphere_density: 0.50,
                sea_level: 0.5,
                bands: 9.0,
                turbulence: 0.12,
                storm_spot: true,
                ..base
            },
            PlanetTheme::Saturnine => Self {
                deep: Vec3::new(0.62, 0.52, 0.34),
                low: Vec3::new(0.78, 0.68, 0.46),
                mid: Vec3::new(0.88, 0.80, 0.60),
                high: Vec3::new(0.96, 0.90, 0.74),
                accent: Vec3::new(0.82, 0.70, 0.48),
                atmosphere: Vec3::new(1.0, 0.92, 0.72),
                atmosphere_density: 0.45,
                sea_level: 0.5,
                bands: 12.0,
                turbulence: 0.05,
                ..base
            },
            PlanetTheme::Uranian => Self {
                deep: Vec3::new(0.46, 0.72, 0.76),
                low: Vec3::new(0.56, 0.80, 0.84),
                mid: Vec3::new(0.64, 0.86, 0.88),
                high: Vec3::new(0.74, 0.92, 0.94),
                accent: Vec3::new(0.86, 0.97, 0.98),
                atmosphere: Vec3::new(0.70, 0.95, 1.0),
                atmosphere_density: 0.55,
                sea_level: 0.5,
                bands: 4.0,
                turbulence: 0.03,
                ..base
            },
            PlanetTheme::Neptunian => Self {
                deep: Vec3::new(0.06, 0.14, 0.46),
                low: Vec3::new(0.12, 0.26, 0.66),
                mid: Vec3::new(0.20, 0.38, 0.80),
                high: Vec3::new(0.36, 0.54, 0.90),
                accent: Vec3::new(0.04, 0.08, 0.28),
                atmosphere: Vec3::new(0.35, 0.55, 1.0),
                atmosphere_density: 0.60,
                sea_level: 0.5,
                bands: 6.0,
                turbulence: 0.10,
                storm_spot: true,
                ..base
            },
        }
    }
}

/// (base, dark, light) colors of a moon surface.
fn moon_colors(moon_type: MoonType) -> (Vec3, Vec3, Vec3) {
    match moon_type {
        MoonType::Rocky => (
            Vec3::new(0.52, 0.50, 0.48),
            Vec3::new(0.30, 0.29, 0.28),
            Vec3::new(0.70, 0.68, 0.66),
        ),
        MoonType::Icy => (
            Vec3::new(0.78, 0.86, 0.92),
            Vec3::new(0.52, 0.64, 0.76),
            Vec3::new(0.95, 0.98, 1.0),
        ),
        MoonType::Volcanic => (
            Vec3::new(0.62, 0.56, 0.30),
            Vec3::new(0.30, 0.22, 0.12),
            Vec3::new(1.0, 0.55, 0.12),
        ),
    }
}

/// Seeded noise helpers shared by every texture kind.
struct NoiseSampler {
    perlin: Perlin,
    offset: Vec2,
}

impl NoiseSampler {
    fn new(seed: Seed) -> Self {
        let mut rng = SeededRandom::derive(seed, streams::TEXTURE_NOISE);
        let noise_seed = (seed as u64 ^ (seed as u64 >> 32)) as u32;
        Self {
            perlin: Perlin::new(noise_seed),
            offset: Vec2::new(rng.next_float(0.0, 256.0), rng.next_float(0.0, 256.0)),
        }
    }

    /// Fractal Brownian motion in roughly `[0, 1]`.
    fn fbm(&self, x: f64, y: f64, octaves: u32) -> f64 {
        let mut value = 0.0;
        let mut amplitude = 0.5;
        let mut frequency = 1.0;
        let ox = self.offset.x as f64;
        let oy = self.offset.y as f64;

        for _ in 0..octaves.max(1) {
            value += amplitude
                * (self.perlin.get([(x + ox) * frequency, (y + oy) * frequency]) * 0.5 + 0.5);
            amplitude *= 0.5;
            frequency *= 2.0;
        }

        value
    }

    /// Distances to the nearest and second-nearest cell points.
    fn voronoi(&self, x: f64, y: f64) -> (f64, f64) {
        let n = (x.floor(), y.floor());
        let f = (x - n.0, y - n.1);

        let mut min_dist = 8.0;
        let mut second_dist = 8.0;

        for j in -1..=1 {
            for i in -1..=1 {
                let g = (i as f64, j as f64);
                let o = (
                    hash2d(n.0 + g.0, n.1 + g.1),
                    hash2d(n.0 + g.0 + 17.0, n.1 + g.1 + 31.0),
                );
                let r = (g.0 + o.0 - f.0, g.1 + o.1 - f.1);
                let d = r.0 * r.0 + r.1 * r.1;

                if d < min_dist {
                    second_dist = min_dist;
                    min_dist = d;
                } else if d < second_dist {
                    second_dist = d;
                }
            }
        }

        (min_dist.sqrt(), second_dist.sqrt())
    }
}

fn hash2d(x: f64, y: f64) -> f64 {
    let p3 = (Vec3::new(x as f32, y as f32, x as f32) * 0.1031).fract();
    let p3 = p3 + Vec3::splat(p3.dot(Vec3::new(p3.y + 33.33, p3.z + 33.33, p3.x + 33.33)));
    ((p3.x + p3.y) * p3.z).fract() as f64
}

fn smooth_step(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Pixel center in `[-1, 1]²` disk coordinates, scaled so the disk edge sits at `radius`.
fn disk_coords(x: u32, y: u32, size: u32, radius: f32) -> Vec2 {
    let half = size as f32 * 0.5;
    Vec2::new(
        (x as f32 + 0.5 - half) / (half * radius),
        (y as f32 + 0.5 - half) / (half * radius),
    )
}

/// Alpha of a one-pixel anti-aliased disk edge at normalized distance `d`.
fn edge_alpha(d: f32, size: u32, radius: f32) -> f32 {
    let half = size as f32 * 0.5 * radius;
    ((1.0 - d) * half + 0.5).clamp(0.0, 1.0)
}

/// Lambert shading of a sphere point with a soft ambient floor.
fn sphere_light(p: Vec2) -> f32 {
    let z = (1.0 - p.length_squared()).max(0.0).sqrt();
    let normal = Vec3::new(p.x, p.y, z);
    normal.dot(LIGHT_DIR.normalize()).max(0.0) * 0.85 + 0.15
}

fn ramp(stops: &[Vec3], t: f32) -> Vec3 {
    let t = t.clamp(0.0, 1.0) * (stops.len() - 1) as f32;
    let i = (t.floor() as usize).min(stops.len() - 2);
    stops[i].lerp(stops[i + 1], t - i as f32)
}

/// Crater centers and radii inside the unit disk.
fn roll_craters(rng: &mut SeededRandom, count: usize, min_r: f32, max_r: f32) -> Vec<(Vec2, f32)> {
    (0..count)
        .map(|_| {
            let center = rng.next_point_in_unit_disk() * 0.8;
            (center, rng.next_float(min_r, max_r))
        })
        .collect()
}

/// Darken crater floors and lighten their rims. Returns the brightness factor.
fn crater_shade(p: Vec2, craters: &[(Vec2, f32)]) -> f32 {
    let mut shade = 1.0;
    for (center, radius) in craters {
        let d = p.distance(*center) / radius;
        if d < 1.0 {
            shade *= 0.72 + 0.18 * d * d;
        } else if d < 1.2 {
            shade *= 1.0 + (1.2 - d) * 0.6;
        }
    }
    shade
}

/// Deterministic texture generator.
#[derive(Debug, Clone, Default)]
pub struct TextureSynthesizer {
    config: TextureConfig,
}

impl TextureSynthesizer {
    pub fn new(config: TextureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TextureConfig {
        &self.config
    }

    /// Planet texture edge length for a category.
    pub fn planet_size(&self, category: Category) -> u32 {
        match category {
            Category::Terran => self.config.terran_size,
            Category::Gaseous => self.config.gaseous_size,
        }
    }

    pub fn asteroid_size(&self, size: AsteroidSize) -> u32 {
        match size {
            AsteroidSize::Small => self.config.asteroid_small,
            AsteroidSize::Medium => self.config.asteroid_medium,
            AsteroidSize::Large => self.config.asteroid_large,
        }
    }

    pub fn moon_size(&self) -> u32 {
        self.config.moon_size
    }

    /// Planet surface with circular alpha mask and limb shading.
    pub fn try_planet(&self, seed: Seed, theme: PlanetTheme) -> GenResult<TextureBuffer> {
        let size = self.planet_size(theme.category());
        let tex_seed = mix(seed, theme.id() as i64);
        let noise = NoiseSampler::new(tex_seed);
        let palette = ThemePalette::for_theme(theme);
        let octaves = self.config.octaves;

        let mut features = SeededRandom::derive(tex_seed, streams::TEXTURE_FEATURES);
        let band_phase = features.next_angle();
        let storm = Vec2::new(features.next_float(-0.45, 0.45), features.next_float(-0.5, 0.5));
        let storm_radius = features.next_float(0.10, 0.18);
        let cap_latitude = features.next_float(0.72, 0.86);

        TextureBuffer::from_fn(size, |x, y| {
            let p = disk_coords(x, y, size, 1.0);
            let d = p.length();
            let alpha = edge_alpha(d, size, 1.0);
            if alpha <= 0.0 {
                return Pixel::TRANSPARENT;
            }

            let color = if theme.is_gaseous() {
                gas_color(&noise, &palette, p, octaves, band_phase, storm, storm_radius)
            } else {
                terran_color(&noise, &palette, p, octaves, cap_latitude)
            };
            Pixel::from_color(color * sphere_light(p), alpha)
        })
    }

    /// Soft glow ring around the planet disk, same edge length as the planet texture.
    pub fn try_atmosphere(&self, seed: Seed, theme: PlanetTheme) -> GenResult<TextureBuffer> {
        let size = self.planet_size(theme.category());
        let tex_seed = mix(seed, PlanetTheme::COUNT as i64 + theme.id() as i64);
        let noise = NoiseSampler::new(tex_seed);
        let palette = ThemePalette::for_theme(theme);
        let density = if theme.is_gaseous() {
            (palette.atmosphere_density * 1.2).min(1.0)
        } else {
            palette.atmosphere_density
        };

        TextureBuffer::from_fn(size, |x, y| {
            let p = disk_coords(x, y, size, 1.0);
            let d = p.length();
            if d >= 1.0 {
                return Pixel::TRANSPARENT;
            }
            let strength = if d < ATMOSPHERE_INNER {
                // Thin haze over the disk, thickening towards the limb.
                0.25 * (d / ATMOSPHERE_INNER).powi(4)
            } else {
                let t = (d - ATMOSPHERE_INNER) / (1.0 - ATMOSPHERE_INNER);
                (1.0 - t).powi(2)
            };
            let haze = noise.fbm(p.x as f64 * 3.0, p.y as f64 * 3.0, 3) as f32;
            let color = palette.atmosphere * (0.9 + haze * 0.2);
            Pixel::from_color(color, strength * density)
        })
    }

    /// Cratered moon disk.
    pub fn try_moon(&self, seed: Seed, moon_type: MoonType) -> GenResult<TextureBuffer> {
        let size = self.moon_size();
        let tex_seed = mix(seed, 100 + moon_type.id() as i64);
        let noise = NoiseSampler::new(tex_seed);
        let (base, dark, light) = moon_colors(moon_type);
        let octaves = self.config.octaves.min(4);

        let mut features = SeededRandom::derive(tex_seed, streams::TEXTURE_FEATURES);
        let crater_count = features.next_int(4, 10) as usize;
        let craters = roll_craters(&mut features, crater_count, 0.08, 0.25);

        TextureBuffer::from_fn(size, |x, y| {
            let p = disk_coords(x, y, size, 1.0);
            let alpha = edge_alpha(p.length(), size, 1.0);
            if alpha <= 0.0 {
                return Pixel::TRANSPARENT;
            }

            let n = noise.fbm(p.x as f64 * 2.5, p.y as f64 * 2.5, octaves) as f32;
            let mut color = dark.lerp(base, smooth_step(0.3, 0.6, n));
            match moon_type {
                MoonType::Icy => {
                    let (near, second) = noise.voronoi(p.x as f64 * 4.0, p.y as f64 * 4.0);
                    let crack = 1.0 - smooth_step(0.0, 0.06, (second - near) as f32);
                    color = color.lerp(light, crack * 0.6);
                }
                MoonType::Volcanic => {
                    let hot = smooth_step(0.62, 0.72, n);
                    color = color.lerp(light, hot);
                }
                MoonType::Rocky => {}
            }
            color *= crater_shade(p, &craters);
            Pixel::from_color(color * sphere_light(p), alpha)
        })
    }

    /// Irregular lumpy asteroid silhouette.
    pub fn try_asteroid(&self, seed: Seed, size_class: AsteroidSize) -> GenResult<TextureBuffer> {
        let size = self.asteroid_size(size_class);
        let tex_seed = mix(seed, 200 + size_class.id() as i64);
        let noise = NoiseSampler::new(tex_seed);

        let mut features = SeededRandom::derive(tex_seed, streams::TEXTURE_FEATURES);
        let outline = AsteroidOutline::roll(&mut features);
        let tint = features.next_float(0.0, 1.0);
        let base = Vec3::new(0.45, 0.42, 0.38).lerp(Vec3::new(0.50, 0.40, 0.30), tint);
        let dark = base * 0.55;
        let crater_count = match size_class {
            AsteroidSize::Small => 0,
            AsteroidSize::Medium => features.next_int(1, 3) as usize,
            AsteroidSize::Large => features.next_int(2, 5) as usize,
        };
        let craters = roll_craters(&mut features, crater_count, 0.12, 0.28);

        TextureBuffer::from_fn(size, |x, y| {
            let p = disk_coords(x, y, size, 1.0);
            let rim = outline.radius_at(p.y.atan2(p.x));
            let d = p.length() / rim;
            let alpha = edge_alpha(d, size, rim);
            if alpha <= 0.0 {
                return Pixel::TRANSPARENT;
            }

            let n = noise.fbm(p.x as f64 * 3.0, p.y as f64 * 3.0, 3) as f32;
            let mut color = dark.lerp(base, smooth_step(0.25, 0.7, n));
            color *= crater_shade(p, &craters);
            Pixel::from_color(color * sphere_light(p / rim), alpha)
        })
    }

    /// Planet surface, or a placeholder if the configured size is invalid.
    pub fn planet(&self, seed: Seed, theme: PlanetTheme) -> TextureBuffer {
        self.try_planet(seed, theme).unwrap_or_else(|e| {
            log::warn!("Planet texture for seed {} failed: {}, using placeholder", seed, e);
            TextureBuffer::placeholder(self.planet_size(theme.category()))
        })
    }

    pub fn atmosphere(&self, seed: Seed, theme: PlanetTheme) -> TextureBuffer {
        self.try_atmosphere(seed, theme).unwrap_or_else(|e| {
            log::warn!("Atmosphere texture for seed {} failed: {}, using placeholder", seed, e);
            TextureBuffer::placeholder(self.planet_size(theme.category()))
        })
    }

    pub fn moon(&self, seed: Seed, moon_type: MoonType) -> TextureBuffer {
        self.try_moon(seed, moon_type).unwrap_or_else(|e| {
            log::warn!("Moon texture for seed {} failed: {}, using placeholder", seed, e);
            TextureBuffer::placeholder(self.moon_size())
        })
    }

    pub fn asteroid(&self, seed: Seed, size_class: AsteroidSize) -> TextureBuffer {
        self.try_asteroid(seed, size_class).unwrap_or_else(|e| {
            log::warn!("Asteroid texture for seed {} failed: {}, using placeholder", seed, e);
            TextureBuffer::placeholder(self.asteroid_size(size_class))
        })
    }
}

fn terran_color(
    noise: &NoiseSampler,
    palette: &ThemePalette,
    p: Vec2,
    octaves: u32,
    cap_latitude: f32,
) -> Vec3 {
    let h = noise.fbm(p.x as f64 * 2.2, p.y as f64 * 2.2, octaves) as f32;
    // fbm clusters around 0.5; stretch it so the ramps use their full range.
    let h = ((h - 0.5) * 1.8 + 0.5).clamp(0.0, 1.0);

    let mut color = if h < palette.sea_level {
        palette.deep.lerp(palette.low, h / palette.sea_level)
    } else {
        let t = (h - palette.sea_level) / (1.0 - palette.sea_level).max(1e-3);
        ramp(&[palette.mid, palette.high, palette.accent], t * 0.85)
    };

    if palette.lava_cracks {
        let (near, second) = noise.voronoi(p.x as f64 * 5.0, p.y as f64 * 5.0);
        let glow = 1.0 - smooth_step(0.0, 0.08, (second - near) as f32);
        color = color.lerp(palette.accent, glow);
    }

    if palette.polar_caps {
        let wobble = (noise.fbm(p.x as f64 * 6.0, 7.0, 2) as f32 - 0.5) * 0.12;
        let cap = smooth_step(cap_latitude, cap_latitude + 0.06, p.y.abs() + wobble);
        color = color.lerp(Vec3::new(0.95, 0.97, 1.0), cap);
    }

    color
}

fn gas_color(
    noise: &NoiseSampler,
    palette: &ThemePalette,
    p: Vec2,
    octaves: u32,
    band_phase: f32,
    storm: Vec2,
    storm_radius: f32,
) -> Vec3 {
    let swirl = noise.fbm(p.x as f64 * 1.5, p.y as f64 * 6.0, octaves.min(4)) as f32 - 0.5;
    let latitude = p.y + swirl * palette.turbulence * 4.0;
    let band = (latitude * palette.bands * std::f32::consts::PI + band_phase).sin() * 0.5 + 0.5;
    let fine = noise.fbm(p.x as f64 * 8.0, p.y as f64 * 24.0, 2) as f32;

    let mut color = ramp(&[palette.deep, palette.low, palette.mid, palette.high], band);
    color *= 0.92 + fine * 0.16;

    if palette.storm_spot {
        let q = (p - storm) / Vec2::new(storm_radius * 1.8, storm_radius);
        let inside = 1.0 - smooth_step(0.7, 1.0, q.length());
        color = color.lerp(palette.accent, inside * 0.85);
    }

    color
}

/// Star-shaped polygon outline with jittered vertex radii.
struct AsteroidOutline {
    radii: Vec<f32>,
}

impl AsteroidOutline {
    fn roll(rng: &mut SeededRandom) -> Self {
        let vertices = rng.next_int(7, 11) as usize;
        Self {
            radii: (0..vertices).map(|_| rng.next_float(0.62, 0.96)).collect(),
        }
    }

    /// Outline radius at `angle`, linearly interpolated between vertices.
    fn radius_at(&self, angle: f32) -> f32 {
        let n = self.radii.len();
        let t = angle.rem_euclid(std::f32::consts::TAU) / std::f32::consts::TAU * n as f32;
        let i = (t.floor() as usize) % n;
        let j = (i + 1) % n;
        let f = t - t.floor();
        self.radii[i] + (self.radii[j] - self.radii[i]) * f
    }
}
