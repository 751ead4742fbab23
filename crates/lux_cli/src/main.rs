//! Lux - renders a sphere scene to a plain-text PPM image.
//!
//! Run with: cargo run --release -p lux_cli -- --quick --output out.ppm

mod scene;

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lux_renderer::{render, write_ppm, Camera, CameraSettings};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Offline Monte Carlo path tracer.
#[derive(Parser, Debug)]
#[command(name = "lux", version, about)]
struct Args {
    /// JSON scene description; the built-in random sphere field is used when omitted
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Output PPM path; writes to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Seed for scene generation and sampling
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Override the image width
    #[arg(long)]
    width: Option<u32>,

    /// Override the samples per pixel
    #[arg(long)]
    samples: Option<u32>,

    /// Override the maximum bounce depth
    #[arg(long)]
    max_depth: Option<u32>,

    /// Preview quality: 10 samples per pixel, depth 20
    #[arg(long)]
    quick: bool,
}

const QUICK_SAMPLES: u32 = 10;
const QUICK_MAX_DEPTH: u32 = 20;

/// Apply command-line overrides on top of the scene's camera settings.
///
/// Explicit `--samples`/`--max-depth` win over `--quick`.
fn apply_overrides(args: &Args, mut settings: CameraSettings) -> CameraSettings {
    if args.quick {
        settings = settings.with_quality(QUICK_SAMPLES, QUICK_MAX_DEPTH);
    }
    if let Some(width) = args.width {
        settings.image_width = width;
    }
    if let Some(samples) = args.samples {
        settings.samples_per_pixel = samples;
    }
    if let Some(max_depth) = args.max_depth {
        settings.max_depth = max_depth;
    }
    settings
}

fn main() -> Result<()> {
    // Logs go to stderr so a PPM on stdout stays clean
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    let mut rng = StdRng::seed_from_u64(args.seed);

    let scene = match &args.scene {
        Some(path) => scene::load_scene(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("Building random scene (seed {})", args.seed);
            scene::random_scene(&mut rng)
        }
    };
    log::info!("Scene has {} objects", scene.world.len());

    let settings = apply_overrides(&args, scene.camera.clone());
    let camera = Camera::new(settings).context("Invalid camera settings")?;

    let image = render(&camera, &scene.world, &mut rng);

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_ppm(BufWriter::new(file), &image)?;
            log::info!("Saved to {}", path.display());
        }
        None => write_ppm(BufWriter::new(io::stdout().lock()), &image)?,
    }

    Ok(())
}
