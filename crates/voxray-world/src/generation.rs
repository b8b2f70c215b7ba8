//! Procedural terrain generation.

use glam::{IVec2, IVec3};
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use rayon::prelude::*;
use voxray_core::{Aabb, Result, VoxelShape};

use crate::grid::{BlockState, FluidState, GridWorld};
use crate::WorldSeed;

/// Terrain generator configuration.
#[derive(Debug, Clone)]
pub struct TerrainConfig {
    /// Seed for noise generation.
    pub seed: WorldSeed,
    /// Average surface height (Y coordinate).
    pub surface_level: i32,
    /// Sea level (Y coordinate). Columns below it are flooded up to it.
    pub sea_level: i32,
    /// Lowest Y coordinate that gets filled.
    pub bottom_y: i32,
    /// Horizontal scale of terrain features.
    pub terrain_scale: f64,
    /// Maximum terrain height variation around the surface level.
    pub terrain_height: f64,
    /// Number of noise octaves for detail.
    pub octaves: usize,
    /// Frequency multiplier between octaves.
    pub lacunarity: f64,
    /// Amplitude multiplier between octaves.
    pub persistence: f64,
    /// Fraction of dry surface columns that get a plant, 0.0 to 1.0.
    pub plant_density: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            surface_level: 16,
            sea_level: 14,
            bottom_y: 0,
            terrain_scale: 48.0,
            terrain_height: 12.0,
            octaves: 4,
            lacunarity: 2.0,
            persistence: 0.5,
            plant_density: 0.1,
        }
    }
}

/// Counts of what a [`TerrainGenerator::fill`] call placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TerrainStats {
    pub solid: usize,
    pub water: usize,
    pub plants: usize,
}

/// Procedural terrain generator using fractal noise.
pub struct TerrainGenerator {
    config: TerrainConfig,
    height_noise: Fbm<Perlin>,
    plant_noise: Perlin,
    plant_shape: VoxelShape,
}

impl TerrainGenerator {
    /// Create a new terrain generator with the given configuration.
    pub fn new(config: TerrainConfig) -> Result<Self> {
        let height_noise = Fbm::<Perlin>::new(config.seed as u32)
            .set_octaves(config.octaves)
            .set_lacunarity(config.lacunarity)
            .set_persistence(config.persistence);
        let plant_noise = Perlin::new(config.seed.wrapping_add(1) as u32);
        let plant_shape = VoxelShape::from_boxes([Aabb::new(
            glam::DVec3::new(0.2, 0.0, 0.2),
            glam::DVec3::new(0.8, 0.8, 0.8),
        )])?;

        Ok(Self {
            config,
            height_noise,
            plant_noise,
            plant_shape,
        })
    }

    /// Create a terrain generator with default configuration.
    pub fn with_seed(seed: WorldSeed) -> Result<Self> {
        Self::new(TerrainConfig {
            seed,
            ..Default::default()
        })
    }

    /// Get the terrain configuration.
    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Get terrain height at world XZ coordinates.
    ///
    /// Returns the Y coordinate of the topmost solid block in this column.
    pub fn height_at(&self, x: i32, z: i32) -> i32 {
        let nx = f64::from(x) / self.config.terrain_scale;
        let nz = f64::from(z) / self.config.terrain_scale;

        // Noise returns roughly [-1, 1]
        let noise_value = self.height_noise.get([nx, nz]);
        let height = (noise_value * self.config.terrain_height) as i32 + self.config.surface_level;
        height.max(self.config.bottom_y)
    }

    fn has_plant(&self, x: i32, z: i32) -> bool {
        let sample = self.plant_noise.get([f64::from(x) * 0.731, f64::from(z) * 0.731]);
        (sample + 1.0) * 0.5 < self.config.plant_density
    }

    /// Fill the XZ rectangle `min..=max` of `world` with terrain.
    ///
    /// Column heights are sampled in parallel; blocks are written afterwards.
    pub fn fill(&self, world: &mut GridWorld, min: IVec2, max: IVec2) -> TerrainStats {
        let columns: Vec<(i32, i32, i32, bool)> = (min.x..=max.x)
            .into_par_iter()
            .flat_map_iter(|x| {
                (min.y..=max.y).map(move |z| (x, z, self.height_at(x, z), self.has_plant(x, z)))
            })
            .collect();

        let solid = BlockState::solid();
        let plant = BlockState::ghost(self.plant_shape.clone());
        let mut stats = TerrainStats::default();

        for (x, z, height, plant_here) in columns {
            for y in self.config.bottom_y..=height {
                world.set_block(IVec3::new(x, y, z), solid.clone());
                stats.solid += 1;
            }
            if height < self.config.sea_level {
                for y in height + 1..=self.config.sea_level {
                    world.set_fluid(IVec3::new(x, y, z), FluidState::source());
                    stats.water += 1;
                }
            } else if plant_here {
                world.set_block(IVec3::new(x, height + 1, z), plant.clone());
                stats.plants += 1;
            }
        }

        tracing::debug!(
            solid = stats.solid,
            water = stats.water,
            plants = stats.plants,
            "Generated terrain"
        );
        stats
    }
}
