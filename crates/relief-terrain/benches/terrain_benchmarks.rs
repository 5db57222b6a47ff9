use criterion::{Criterion, black_box, criterion_group, criterion_main};
use relief_terrain::*;

fn bench_diamond_square_256(c: &mut Criterion) {
    let range = Range::new(-30.0, 40.0).unwrap();
    c.bench_function("diamond_square_256", |bencher| {
        let mut grid = HeightGrid::new(256, 256).unwrap();
        let mut generator = TerrainGenerator::new(42, &grid);
        bencher.iter(|| black_box(generator.diamond_square(&mut grid, &range)))
    });
}

fn bench_smooth_256(c: &mut Criterion) {
    let mut grid = HeightGrid::new(256, 256).unwrap();
    let mut generator = TerrainGenerator::new(42, &grid);
    generator.build_random_height_map(&mut grid, &Range::new(-10.0, 10.0).unwrap());
    c.bench_function("smooth_256", |bencher| {
        bencher.iter(|| generator.smooth(black_box(&mut grid)))
    });
}

fn bench_waves_256(c: &mut Criterion) {
    let mut grid = HeightGrid::new(256, 256).unwrap();
    let params = WaveParameters::default();
    c.bench_function("waves_256", |bencher| {
        bencher.iter(|| black_box(build_wave_height_map(&mut grid, &params, 0.0)))
    });
}

fn bench_fault_256(c: &mut Criterion) {
    let range = Range::new(-5.0, 5.0).unwrap();
    let mut grid = HeightGrid::new(256, 256).unwrap();
    let mut generator = TerrainGenerator::new(42, &grid);
    c.bench_function("fault_256", |bencher| {
        bencher.iter(|| black_box(generator.fault(&mut grid, &range)))
    });
}

fn bench_particle_deposition(c: &mut Criterion) {
    let range = Range::new(0.5, 1.5).unwrap();
    let mut grid = HeightGrid::new(128, 128).unwrap();
    let mut generator = TerrainGenerator::new(42, &grid);
    c.bench_function("particle_deposition", |bencher| {
        bencher.iter(|| black_box(generator.particle_deposition(&mut grid, &range)))
    });
}

criterion_group!(
    benches,
    bench_diamond_square_256,
    bench_smooth_256,
    bench_waves_256,
    bench_fault_256,
    bench_particle_deposition,
);
criterion_main!(benches);
