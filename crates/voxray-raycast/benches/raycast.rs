use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::{DVec3, IVec2};
use voxray_core::{BlockMode, FluidMode, Segment};
use voxray_entity::{Entity, EntityKind};
use voxray_raycast::{cast_many, RaycastConfig, Raycaster};
use voxray_world::{GridWorld, TerrainGenerator};

fn terrain() -> GridWorld {
    let mut world = GridWorld::new();
    TerrainGenerator::with_seed(42)
        .expect("terrain generator")
        .fill(&mut world, IVec2::splat(-64), IVec2::splat(64));
    for i in 0..64 {
        let x = f64::from(i % 8) * 12.0 - 48.0;
        let z = f64::from(i / 8) * 12.0 - 48.0;
        world.spawn_entity(DVec3::new(x, 34.0, z), DVec3::new(0.3, 0.9, 0.3), EntityKind::Mob);
    }
    world
}

fn segments(count: usize) -> Vec<Segment> {
    (0..count)
        .map(|i| {
            let angle = i as f64 * 0.618_033_988_75 * std::f64::consts::TAU;
            let start = DVec3::new(0.5, 48.0, 0.5);
            let direction = DVec3::new(angle.cos(), -0.35, angle.sin());
            Segment::from_direction(start, direction, 96.0)
        })
        .collect()
}

fn bench_single(c: &mut Criterion) {
    let world = terrain();
    let rays = segments(256);
    let mut raycaster = Raycaster::<Entity>::new();

    c.bench_function("cast_blocks_fluids_entities", |b| {
        b.iter(|| {
            for segment in &rays {
                let hit = raycaster
                    .cast(
                        &world,
                        BlockMode::Visual,
                        FluidMode::Source,
                        None,
                        segment.start,
                        segment.end,
                    )
                    .expect("cast");
                black_box(hit.fraction());
            }
        });
    });

    c.bench_function("cast_blocks_only", |b| {
        b.iter(|| {
            for segment in &rays {
                let hit = raycaster
                    .cast_blocks(&world, BlockMode::Collision, segment.start, segment.end)
                    .expect("cast");
                black_box(hit.fraction());
            }
        });
    });
}

fn bench_batch(c: &mut Criterion) {
    let world = terrain();
    let rays = segments(4096);

    c.bench_function("cast_many_4096", |b| {
        b.iter(|| {
            let hits = cast_many(
                &world,
                RaycastConfig::default(),
                BlockMode::Visual,
                FluidMode::Source,
                None,
                &rays,
            )
            .expect("batch");
            black_box(hits.len());
        });
    });
}

criterion_group!(benches, bench_single, bench_batch);
criterion_main!(benches);
