//! Orbital and spatial layout: moon orbits around a body, asteroid field placement.
//!
//! Moon orbits are spaced by construction (step + bounded jitter), so distances
//! are strictly increasing. Field members are placed by rejection sampling
//! with a fixed attempt budget; a field that cannot fit its target count comes
//! back short, which is a normal outcome.

use crate::classification::{AsteroidSize, Category};
use crate::config::{FieldConfig, MoonOrbitConfig};
use crate::streams;
use gen_core::{mix, Seed, SeededRandom};
use glam::Vec2;
use std::f32::consts::TAU;

/// Orbit parameters of one moon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonOrbit {
    /// Semi-major axis from the parent center.
    pub distance: f32,
    /// Rotation shared by every moon of the parent.
    pub base_angle: f32,
    /// Radians per second.
    pub angular_speed: f32,
    /// Starting angle relative to `base_angle`.
    pub phase_offset: f32,
    /// Eccentricity-like flattening of the orbit (0 = circle).
    pub eccentricity: f32,
}

impl MoonOrbit {
    /// Orbit angle after `time` seconds.
    pub fn angle_at(&self, time: f32) -> f32 {
        (self.base_angle + self.phase_offset + self.angular_speed * time).rem_euclid(TAU)
    }

    /// Position relative to the parent after `time` seconds.
    pub fn position_at(&self, time: f32) -> Vec2 {
        let angle = self.angle_at(time);
        Vec2::new(
            self.distance * angle.cos(),
            self.distance * (1.0 - self.eccentricity) * angle.sin(),
        )
    }

    /// Seconds for one full revolution.
    pub fn period(&self) -> f32 {
        if self.angular_speed > 0.0 {
            TAU / self.angular_speed
        } else {
            f32::INFINITY
        }
    }
}

/// Inner and outer orbit bounds after category modifiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitBounds {
    pub min_distance: f32,
    pub max_distance: f32,
    pub orbit_factor: f32,
}

impl OrbitBounds {
    /// Bounds for moons of a body with `body_radius` in `category`.
    pub fn new(body_radius: f32, category: Category, config: &MoonOrbitConfig) -> Self {
        let body_radius = if body_radius > 0.0 {
            body_radius
        } else {
            log::warn!("Body radius {} invalid, clamping to 1", body_radius);
            1.0
        };
        let min_factor = if config.min_factor > 0.0 { config.min_factor } else { 1.0 };
        let (mut max_factor, mut orbit_factor) = (config.max_factor, config.orbit_factor);
        if category == Category::Gaseous {
            max_factor *= config.gaseous_distance_factor;
            orbit_factor *= config.gaseous_speed_factor;
        }
        if !(max_factor > min_factor) {
            // A zero-width band cannot hold strictly increasing orbits.
            max_factor = min_factor * 1.25;
        }
        Self {
            min_distance: body_radius * min_factor,
            max_distance: body_radius * max_factor,
            orbit_factor,
        }
    }

    /// Closer orbits are faster: `orbit_factor / sqrt(distance / min_distance)`.
    pub fn speed_at(&self, distance: f32) -> f32 {
        self.orbit_factor / (distance / self.min_distance).max(1e-6).sqrt()
    }

    fn eccentricity_at(&self, distance: f32, max_deviation: f32) -> f32 {
        let max_deviation = max_deviation.max(0.05);
        0.05 + (max_deviation - 0.05) * (distance / self.max_distance).clamp(0.0, 1.0)
    }
}

/// Orbits for `count` moons around a body.
pub fn plan_moon_orbits(
    seed: Seed,
    count: usize,
    body_radius: f32,
    category: Category,
    config: &MoonOrbitConfig,
) -> Vec<MoonOrbit> {
    if count == 0 {
        return Vec::new();
    }

    let bounds = OrbitBounds::new(body_radius, category, config);
    let base_angle = SeededRandom::derive(seed, streams::ORBIT_BASE_ANGLE).next_angle();
    let mut distance_rng = SeededRandom::derive(seed, streams::ORBIT_DISTANCE);
    let mut phase_rng = SeededRandom::derive(seed, streams::ORBIT_PHASE);

    if count == 1 {
        let distance = distance_rng.next_float(bounds.min_distance, bounds.max_distance);
        let slowest = bounds.speed_at(bounds.max_distance);
        let angular_speed =
            SeededRandom::derive(seed, streams::ORBIT_SPEED).next_float(slowest, bounds.orbit_factor);
        return vec![MoonOrbit {
            distance,
            base_angle,
            angular_speed,
            phase_offset: phase_rng.next_angle(),
            eccentricity: bounds.eccentricity_at(distance, config.max_deviation),
        }];
    }

    let step = (bounds.max_distance - bounds.min_distance) / (count - 1) as f32;
    let step_jitter = config.step_jitter.clamp(0.0, 0.45);
    let slot = TAU / count as f32;
    let phase_jitter = config.phase_jitter.clamp(0.0, 0.45);

    (0..count)
        .map(|i| {
            let jitter = distance_rng.next_float(-step_jitter, step_jitter) * step;
            let distance = (bounds.min_distance + step * i as f32 + jitter)
                .clamp(bounds.min_distance, bounds.max_distance);
            let phase_offset =
                i as f32 * slot + phase_rng.next_float(-phase_jitter, phase_jitter) * slot;
            MoonOrbit {
                distance,
                base_angle,
                angular_speed: bounds.speed_at(distance),
                phase_offset,
                eccentricity: bounds.eccentricity_at(distance, config.max_deviation),
            }
        })
        .collect()
}

/// One placed member of a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldMember {
    /// Offset from the field center.
    pub position: Vec2,
    pub size: AsteroidSize,
    pub scale: f32,
    /// Radians per second, either direction.
    pub rotation_speed: f32,
    /// Visual variant index in `0..variant_count`.
    pub variant: u32,
    /// Seed for this member's own texture and name.
    pub seed: Seed,
}

/// Layout of a whole field.
#[derive(Debug, Clone, PartialEq)]
pub struct AsteroidField {
    pub seed: Seed,
    /// Nominal radius after the seed-derived jitter.
    pub actual_radius: f32,
    /// Minor/major axis ratio of the field ellipse.
    pub elongation: f32,
    /// Rotation of the field ellipse in radians.
    pub rotation: f32,
    /// How many members the field aimed for.
    pub requested_count: usize,
    pub members: Vec<FieldMember>,
}

impl AsteroidField {
    pub fn actual_count(&self) -> usize {
        self.members.len()
    }

    /// Members that did not fit within the attempt budget.
    pub fn shortfall(&self) -> usize {
        self.requested_count.saturating_sub(self.members.len())
    }
}

fn member_attributes(seed: Seed, position: Vec2, config: &FieldConfig) -> FieldMember {
    let mut rng = SeededRandom::derive(seed, streams::FIELD_MEMBER);
    let size = AsteroidSize::from_roll(
        rng.next_unit(),
        config.small_threshold,
        config.medium_threshold,
    );
    let base_scale = match size {
        AsteroidSize::Small => config.small_scale,
        AsteroidSize::Medium => config.medium_scale,
        AsteroidSize::Large => config.large_scale,
    };
    FieldMember {
        position,
        size,
        scale: rng.jitter(base_scale, config.scale_jitter),
        rotation_speed: rng.next_float(-config.max_rotation_speed, config.max_rotation_speed),
        variant: rng.next_int(0, config.variant_count as i64 - 1) as u32,
        seed,
    }
}

/// Place a field of members with a minimum spacing.
pub fn plan_field(seed: Seed, config: &FieldConfig) -> AsteroidField {
    let config = config.clone().sanitized();

    let mut shape = SeededRandom::derive(seed, streams::FIELD_SHAPE);
    let actual_radius = shape.jitter(config.radius, config.radius_jitter);
    let elongation = shape.next_float(config.elongation_min, config.elongation_max);
    let rotation = shape.next_angle();

    let mut count_rng = SeededRandom::derive(seed, streams::FIELD_COUNT);
    let base_count = count_rng.next_int(config.count_min as i64, config.count_max as i64) as f32;
    let ratio = if config.radius > 0.0 {
        actual_radius / config.radius
    } else {
        1.0
    };
    let requested_count = (base_count * ratio * ratio).round().max(0.0) as usize;

    let attempts = requested_count * config.attempts_per_member as usize;
    let min_spacing_sq = config.min_spacing * config.min_spacing;
    let (sin, cos) = rotation.sin_cos();
    let mut placement = SeededRandom::derive(seed, streams::FIELD_PLACEMENT);
    let mut members: Vec<FieldMember> = Vec::with_capacity(requested_count);

    for _ in 0..attempts {
        if members.len() >= requested_count {
            break;
        }
        let p = placement.next_point_in_unit_disk();
        let local = Vec2::new(p.x * actual_radius, p.y * actual_radius * elongation);
        let position = Vec2::new(local.x * cos - local.y * sin, local.x * sin + local.y * cos);

        if members
            .iter()
            .all(|m| m.position.distance_squared(position) >= min_spacing_sq)
        {
            let member_seed = mix(seed, streams::CHILD_BASE + members.len() as i64);
            members.push(member_attributes(member_seed, position, &config));
        }
    }

    if members.len() < requested_count {
        log::debug!(
            "Field {} placed {}/{} members within {} attempts",
            seed,
            members.len(),
            requested_count,
            attempts
        );
    }

    AsteroidField {
        seed,
        actual_radius,
        elongation,
        rotation,
        requested_count,
        members,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_moons_is_empty() {
        assert!(plan_moon_orbits(1, 0, 100.0, Category::Terran, &MoonOrbitConfig::default()).is_empty());
    }

    #[test]
    fn single_moon_within_bounds() {
        let config = MoonOrbitConfig::default();
        let bounds = OrbitBounds::new(100.0, Category::Terran, &config);
        for seed in 0..50 {
            let orbits = plan_moon_orbits(seed, 1, 100.0, Category::Terran, &config);
            assert_eq!(orbits.len(), 1);
            let o = orbits[0];
            assert!(o.distance >= bounds.min_distance && o.distance <= bounds.max_distance);
            assert!(o.angular_speed <= bounds.orbit_factor);
            assert!(o.angular_speed >= bounds.speed_at(bounds.max_distance));
            assert!((0.0..TAU).contains(&o.phase_offset));
        }
    }

    #[test]
    fn multiple_moons_strictly_increasing() {
        let config = MoonOrbitConfig::default();
        let orbits = plan_moon_orbits(42, 5, 128.0, Category::Terran, &config);
        assert_eq!(orbits.len(), 5);
        for pair in orbits.windows(2) {
            assert!(pair[0].distance < pair[1].distance);
            assert!(pair[0].angular_speed > pair[1].angular_speed);
        }
        assert!(orbits.iter().all(|o| o.base_angle == orbits[0].base_angle));
    }

    #[test]
    fn phases_start_evenly_spread() {
        let config = MoonOrbitConfig::default();
        let orbits = plan_moon_orbits(3, 4, 100.0, Category::Terran, &config);
        let slot = TAU / 4.0;
        for (i, o) in orbits.iter().enumerate() {
            assert!((o.phase_offset - i as f32 * slot).abs() <= slot * 0.1 + 1e-5);
        }
    }

    #[test]
    fn gaseous_moons_orbit_wider_and_slower() {
        let config = MoonOrbitConfig::default();
        let terran = OrbitBounds::new(100.0, Category::Terran, &config);
        let gaseous = OrbitBounds::new(100.0, Category::Gaseous, &config);
        assert!(gaseous.max_distance > terran.max_distance);
        assert_eq!(gaseous.min_distance, terran.min_distance);
        assert!(gaseous.orbit_factor < terran.orbit_factor);
    }

    #[test]
    fn eccentricity_in_range() {
        let config = MoonOrbitConfig::default();
        for o in plan_moon_orbits(8, 6, 90.0, Category::Gaseous, &config) {
            assert!(o.eccentricity >= 0.05 && o.eccentricity <= config.max_deviation + 1e-6);
        }
    }

    #[test]
    fn orbit_position_moves_over_time() {
        let orbit = MoonOrbit {
            distance: 100.0,
            base_angle: 0.0,
            angular_speed: 1.0,
            phase_offset: 0.0,
            eccentricity: 0.0,
        };
        assert!((orbit.position_at(0.0) - Vec2::new(100.0, 0.0)).length() < 1e-3);
        let quarter = orbit.position_at(std::f32::consts::FRAC_PI_2);
        assert!((quarter - Vec2::new(0.0, 100.0)).length() < 1e-3);
        assert!((orbit.period() - TAU).abs() < 1e-5);
    }

    #[test]
    fn field_is_deterministic() {
        let config = FieldConfig::new(400.0, 8, 15, 60.0);
        assert_eq!(plan_field(7, &config), plan_field(7, &config));
    }

    #[test]
    fn field_respects_spacing() {
        let config = FieldConfig::new(300.0, 20, 40, 45.0);
        let field = plan_field(11, &config);
        for (i, a) in field.members.iter().enumerate() {
            for b in &field.members[i + 1..] {
                assert!(a.position.distance(b.position) >= 45.0 - 1e-3);
            }
        }
    }

    #[test]
    fn overpacked_field_comes_back_short() {
        let config = FieldConfig::new(50.0, 30, 30, 40.0);
        let field = plan_field(2, &config);
        assert!(field.actual_count() < field.requested_count);
        assert_eq!(field.shortfall(), field.requested_count - field.actual_count());
    }

    #[test]
    fn members_lie_inside_the_field() {
        let config = FieldConfig::new(400.0, 8, 15, 60.0);
        let field = plan_field(21, &config);
        for m in &field.members {
            assert!(m.position.length() <= field.actual_radius + 1e-3);
            assert!(m.variant < config.variant_count);
            assert!(m.rotation_speed.abs() <= config.max_rotation_speed);
        }
    }

    #[test]
    fn member_seeds_are_distinct() {
        let field = plan_field(5, &FieldConfig::default());
        let seeds: std::collections::HashSet<Seed> = field.members.iter().map(|m| m.seed).collect();
        assert_eq!(seeds.len(), field.members.len());
    }

    #[test]
    fn empty_count_range_gives_empty_field() {
        let config = FieldConfig::new(400.0, 0, 0, 60.0);
        let field = plan_field(1, &config);
        assert_eq!(field.requested_count, 0);
        assert!(field.members.is_empty());
    }

    #[test]
    fn nan_config_from_ron_still_places_a_field() {
        let config = crate::config::GenerationConfig::from_ron(
            "(field: (medium_threshold: NaN, elongation_min: NaN, small_threshold: NaN))",
        )
        .unwrap();
        let field = plan_field(7, &config.field);
        assert!(field.elongation.is_finite());
        assert!(!field.members.is_empty());
        assert_eq!(field, plan_field(7, &config.field));
    }

    #[test]
    fn huge_count_range_is_bounded() {
        let config = FieldConfig::new(400.0, u32::MAX - 1, u32::MAX, 60.0);
        let field = plan_field(3, &config);
        assert!(field.requested_count <= 2 * crate::config::FIELD_COUNT_LIMIT as usize);
    }
}
