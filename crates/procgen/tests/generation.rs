use procgen::{
    plan_field, BodyKind, CelestialBodyFactory, FieldConfig, GenerationCache, GenerationConfig,
    PlanetParams, PlanetTheme, SectorDescriptor, TextureConfig, TextureKind,
};
use std::sync::Arc;
use std::thread;

fn small_config() -> GenerationConfig {
    GenerationConfig {
        textures: TextureConfig {
            terran_size: 32,
            gaseous_size: 48,
            moon_size: 16,
            ..Default::default()
        },
        ..Default::default()
    }
}

#[test]
fn field_layout_replays_exactly() {
    let config = FieldConfig::new(400.0, 8, 15, 60.0);
    let first = plan_field(7, &config);
    let second = plan_field(7, &config);
    assert_eq!(first, second);
    assert!(first.actual_count() > 0);
}

#[test]
fn shared_cache_across_threads_gives_identical_planets() {
    let config = small_config();
    let cache = Arc::new(GenerationCache::new(&config.cache));
    let factory = Arc::new(CelestialBodyFactory::new(config, cache.clone()));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let factory = factory.clone();
            thread::spawn(move || factory.build_planet(2024, 3, -1, &PlanetParams::default()))
        })
        .collect();
    let planets: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for planet in &planets[1..] {
        assert_eq!(planet, &planets[0]);
    }
    assert!(cache.stats(TextureKind::Planet).len >= 1);
}

#[test]
fn cached_and_uncached_planets_match() {
    let config = small_config();
    let warm = CelestialBodyFactory::new(config.clone(), Arc::new(GenerationCache::default()));
    let _ = warm.build_planet(5, 0, 0, &PlanetParams::default());
    let from_cache = warm.build_planet(5, 0, 0, &PlanetParams::default());

    let cold = CelestialBodyFactory::new(config, Arc::new(GenerationCache::default()));
    let fresh = cold.build_planet(5, 0, 0, &PlanetParams::default());

    assert_eq!(from_cache, fresh);
    assert!(warm.cache().total_stats().hits >= 2);
}

#[test]
fn gaseous_planet_has_atmosphere_and_moons() {
    let factory = CelestialBodyFactory::new(small_config(), Arc::new(GenerationCache::default()));
    let params = PlanetParams {
        theme_override: Some(PlanetTheme::Jovian),
        ..Default::default()
    };
    let planet = factory.build_planet(11, 0, 0, &params);
    assert!(planet.atmosphere.is_some());
    // gaseous planets roll at least one moon by default
    assert!(!planet.children.is_empty());
    assert!(planet
        .children
        .iter()
        .all(|moon| matches!(moon.kind, BodyKind::Moon { .. })));
}

#[test]
fn sectors_populate_consistently() {
    let factory = CelestialBodyFactory::new(small_config(), Arc::new(GenerationCache::default()));
    let mut occupied = 0;
    for x in 0..12 {
        match factory.populate_sector(8, x, 0) {
            SectorDescriptor::Empty => {}
            SectorDescriptor::Planet(planet) => {
                occupied += 1;
                assert_eq!(planet.seed, gen_core::grid_seed(8, x, 0));
            }
            SectorDescriptor::AsteroidField(field) => {
                occupied += 1;
                assert_eq!(field.bodies.len(), field.layout.actual_count());
            }
        }
    }
    assert!(occupied <= 12);
}

#[test]
fn factory_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CelestialBodyFactory>();
    assert_send_sync::<procgen::BodyDescriptor>();
}
