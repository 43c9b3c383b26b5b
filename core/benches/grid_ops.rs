use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use sweepgrid_core::{Coord2, GameConfig, Grid, RandomSpawner};

fn construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");
    for (name, config) in [
        ("beginner", GameConfig::BEGINNER),
        ("intermediate", GameConfig::INTERMEDIATE),
        ("expert", GameConfig::EXPERT),
    ] {
        group.bench_function(name, |b| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                Grid::with_spawner(black_box(config), RandomSpawner::from_seed(seed))
            })
        });
    }
    group.finish();
}

/// Seeded board plus a start cell that floods, falling back to any safe cell.
fn flood_setup(config: GameConfig, seed: u64) -> (Grid, Coord2) {
    let grid = Grid::with_spawner(config, RandomSpawner::from_seed(seed)).unwrap();
    let safe = || grid.cells().filter(|(_, cell)| !cell.has_mine());
    let start = safe()
        .find(|(_, cell)| !cell.has_neighbor_mines())
        .or_else(|| safe().next())
        .map(|(coords, _)| coords)
        .unwrap();
    (grid, start)
}

fn flood_reveal(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_reveal");
    for (name, config) in [
        ("expert", GameConfig::EXPERT),
        // sparse board so the first reveal floods most of it
        ("255x255", GameConfig::new((255, 255), 64).unwrap()),
    ] {
        let (grid, start) = flood_setup(config, 5);
        group.bench_function(name, |b| {
            b.iter_batched(
                || grid.clone(),
                |mut grid| grid.reveal_at(black_box(start)),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, construction, flood_reveal);
criterion_main!(benches);
