//! Renders one generated planet system and asteroid field to PNG files.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use gen_core::{Seed, TextureBuffer};
use procgen::{
    BodyDescriptor, CelestialBodyFactory, GenerationCache, GenerationConfig, PlanetParams,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render a generated planet system and asteroid field to PNGs", long_about = None)]
struct Args {
    /// World seed
    #[arg(default_value_t = 42, allow_negative_numbers = true)]
    seed: Seed,

    /// Grid column of the planet cell
    #[arg(default_value_t = 0, allow_negative_numbers = true)]
    grid_x: i32,

    /// Grid row of the planet cell
    #[arg(default_value_t = 0, allow_negative_numbers = true)]
    grid_y: i32,

    /// RON generation config; defaults are used if the file is missing
    #[arg(long, default_value = "procgen.ron")]
    config: PathBuf,

    /// Directory the PNGs are written to
    #[arg(long, default_value = "preview_out")]
    out: PathBuf,

    /// Write the effective config to `--config` and exit
    #[arg(long)]
    dump_config: bool,
}

fn save_texture(texture: &TextureBuffer, path: &Path) -> Result<()> {
    let image = image::RgbaImage::from_raw(
        texture.width(),
        texture.height(),
        texture.as_bytes().to_vec(),
    )
    .ok_or_else(|| anyhow!("texture buffer does not match {}x{}", texture.width(), texture.height()))?;
    image
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}

fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}

/// Names can repeat or sanitize to the same stem; the seed keeps files apart.
fn body_stem(body: &BodyDescriptor) -> String {
    format!("{}_{}", file_stem(&body.name), body.seed)
}

fn write_body(body: &BodyDescriptor, out_dir: &Path) -> Result<usize> {
    let stem = body_stem(body);
    save_texture(&body.texture, &out_dir.join(format!("{}.png", stem)))?;
    let mut written = 1;
    if let Some(atmosphere) = &body.atmosphere {
        save_texture(atmosphere, &out_dir.join(format!("{}_atmosphere.png", stem)))?;
        written += 1;
    }
    for child in &body.children {
        written += write_body(child, out_dir)?;
    }
    Ok(written)
}

/// Build the planet system and field for `args` and write every texture to `out_dir`.
fn render(factory: &CelestialBodyFactory, args: &Args, out_dir: &Path) -> Result<usize> {
    let planet =
        factory.build_planet(args.seed, args.grid_x, args.grid_y, &PlanetParams::default());
    log::info!(
        "Planet {} ({:?}, {:?}) seed {} with {} moons",
        planet.name,
        planet.theme(),
        planet.category(),
        planet.seed,
        planet.children.len()
    );
    for moon in &planet.children {
        if let Some(orbit) = &moon.orbit {
            log::info!(
                "  {} at distance {:.1}, period {:.1}s",
                moon.name,
                orbit.distance,
                orbit.period()
            );
        }
    }
    if planet.is_degraded() {
        log::warn!("Some textures fell back to placeholders, check texture sizes in the config");
    }
    let mut written = write_body(&planet, out_dir)?;

    let field = factory.build_asteroid_field(planet.seed, &factory.config().field);
    log::info!(
        "Asteroid field: {}/{} members, radius {:.0}",
        field.layout.actual_count(),
        field.layout.requested_count,
        field.layout.actual_radius
    );
    for body in &field.bodies {
        written += write_body(body, out_dir)?;
    }
    Ok(written)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = GenerationConfig::load_or_default(&args.config);

    if args.dump_config {
        config
            .save_to(&args.config)
            .with_context(|| format!("Failed to write {}", args.config.display()))?;
        log::info!("Wrote config to {}", args.config.display());
        return Ok(());
    }

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("Failed to create {}", args.out.display()))?;

    let cache = Arc::new(GenerationCache::new(&config.cache));
    let factory = CelestialBodyFactory::new(config, cache.clone());
    let written = render(&factory, &args, &args.out)?;

    let stats = cache.total_stats();
    log::info!(
        "Wrote {} textures to {} (cache: {} hits, {} misses, {} evictions)",
        written,
        args.out.display(),
        stats.hits,
        stats.misses,
        stats.evictions
    );
    Ok(())
}
