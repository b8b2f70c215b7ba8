//! Voxray Raycast Benchmark
//!
//! Generates terrain, scatters entities over it and times a fan of rays
//! cast sequentially through one `Raycaster` and in parallel through
//! `cast_many`.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release -p voxray-benchmark -- [OPTIONS]
//! ```
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use glam::{DVec3, IVec2};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use voxray_core::{BlockMode, FluidMode, Segment};
use voxray_entity::EntityKind;
use voxray_raycast::{cast_many, HitType, RaycastConfig, RaycastHit, Raycaster};
use voxray_world::{GridWorld, TerrainGenerator};

/// Benchmark parameters.
#[derive(Debug, Clone)]
struct BenchArgs {
    seed: u64,
    rays: usize,
    extent: i32,
    length: f64,
    mobs: usize,
}

impl Default for BenchArgs {
    fn default() -> Self {
        Self {
            seed: 42,
            rays: 100_000,
            extent: 64,
            length: 96.0,
            mobs: 256,
        }
    }
}

impl BenchArgs {
    /// Parse benchmark parameters from command line arguments.
    ///
    /// Returns `None` when help was requested.
    fn from_args() -> anyhow::Result<Option<Self>> {
        let mut params = Self::default();
        let args: Vec<String> = std::env::args().collect();

        let mut i = 1;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "-h" | "--help" => return Ok(None),
                "--seed" | "--rays" | "--extent" | "--length" | "--mobs" => {
                    let value = args
                        .get(i + 1)
                        .with_context(|| format!("{flag} needs a value"))?;
                    match flag {
                        "--seed" => params.seed = value.parse().context("--seed")?,
                        "--rays" => params.rays = value.parse().context("--rays")?,
                        "--extent" => params.extent = value.parse().context("--extent")?,
                        "--length" => params.length = value.parse().context("--length")?,
                        _ => params.mobs = value.parse().context("--mobs")?,
                    }
                    i += 1;
                }
                other => warn!("Ignoring unknown argument {other:?}"),
            }
            i += 1;
        }

        if params.extent <= 0 {
            bail!("--extent must be positive");
        }
        if !(params.length.is_finite() && params.length > 0.0) {
            bail!("--length must be a positive number");
        }
        Ok(Some(params))
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let Some(args) = BenchArgs::from_args()? else {
        print_help();
        return Ok(());
    };
    info!(?args, "Voxray Raycast Benchmark");

    let world = build_world(&args)?;
    let segments = ray_fan(&args);

    let mut raycaster = Raycaster::new();
    let started = Instant::now();
    let mut sequential = Vec::with_capacity(segments.len());
    for segment in &segments {
        raycaster.cast(
            &world,
            BlockMode::Collision,
            FluidMode::Source,
            None,
            segment.start,
            segment.end,
        )?;
        sequential.push(raycaster.take());
    }
    report("sequential", started.elapsed(), &sequential);

    let started = Instant::now();
    let parallel = cast_many(
        &world,
        RaycastConfig::default(),
        BlockMode::Collision,
        FluidMode::Source,
        None,
        &segments,
    )?;
    report("parallel", started.elapsed(), &parallel);

    if sequential != parallel {
        bail!("parallel results differ from sequential results");
    }
    Ok(())
}

fn build_world(args: &BenchArgs) -> anyhow::Result<GridWorld> {
    let generator = TerrainGenerator::with_seed(args.seed)?;
    let mut world = GridWorld::new();

    let started = Instant::now();
    let stats = generator.fill(&mut world, IVec2::splat(-args.extent), IVec2::splat(args.extent));
    info!(
        solid = stats.solid,
        water = stats.water,
        plants = stats.plants,
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "Generated terrain"
    );

    // Place mobs on a spiral standing on the surface
    for i in 0..args.mobs {
        let angle = i as f64 * 2.399_963;
        let radius = f64::from(args.extent) * (i as f64 / args.mobs as f64).sqrt();
        let x = angle.cos() * radius;
        let z = angle.sin() * radius;
        let ground = generator.height_at(x.floor() as i32, z.floor() as i32);
        world.spawn_entity(
            DVec3::new(x, f64::from(ground) + 1.9, z),
            DVec3::new(0.3, 0.9, 0.3),
            EntityKind::Mob,
        );
    }
    Ok(world)
}

/// Rays from above the terrain centre, fanning out and down.
fn ray_fan(args: &BenchArgs) -> Vec<Segment> {
    let origin = DVec3::new(0.5, 48.0, 0.5);
    (0..args.rays)
        .map(|i| {
            let yaw = i as f64 * 0.618_034 * std::f64::consts::TAU;
            let pitch = -0.15 - (i % 97) as f64 / 97.0 * 1.2;
            let direction = DVec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos());
            Segment::from_direction(origin, direction, args.length)
        })
        .collect()
}

fn report<E>(label: &str, elapsed: Duration, hits: &[RaycastHit<E>]) {
    let count = |kind: HitType| hits.iter().filter(|hit| hit.hit_type() == kind).count();
    let seconds = elapsed.as_secs_f64();
    info!(
        label,
        rays = hits.len(),
        blocks = count(HitType::Block),
        fluids = count(HitType::Fluid),
        entities = count(HitType::Entity),
        misses = count(HitType::None),
        elapsed_ms = seconds * 1000.0,
        rays_per_sec = hits.len() as f64 / seconds.max(f64::EPSILON),
        "Raycast pass finished"
    );
}

fn print_help() {
    eprintln!(
        "Voxray Raycast Benchmark

USAGE:
    cargo run --release -p voxray-benchmark -- [OPTIONS]

OPTIONS:
    --seed <N>      Terrain seed (default: 42)
    --rays <N>      Number of rays to cast (default: 100000)
    --extent <N>    Terrain covers -N..=N on X and Z (default: 64)
    --length <L>    Length of each ray (default: 96)
    --mobs <N>      Entities scattered over the terrain (default: 256)
    -h, --help      Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG        Set log level (e.g., info, debug, trace)"
    );
}
