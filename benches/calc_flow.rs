//! Measure deriving the flow of an integrated grid with uneven costs
//!
//! Grid is 500x500 tiles
//!

use bevy_flowfield_terrain::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Integrate a grid of pseudo random costs before benchmarking
fn prepare_grid(length: usize) -> TileGrid {
	let costs: Vec<u8> = (0..length * length)
		.map(|i| match (i * 7919) % 23 {
			0 => IMPASSABLE_COST,
			n => (n % 5) as u8 + 1,
		})
		.collect();
	let mut grid = match TileGrid::from_costs(length, length, &costs) {
		Ok(grid) => grid,
		Err(e) => panic!("Cost layout is invalid: {}", e),
	};
	if let Err(e) = grid.integrate(TileIndex::new(length / 2, length / 2)) {
		panic!("Integration failed: {}", e);
	}
	grid
}

pub fn criterion_benchmark(c: &mut Criterion) {
	let mut group = c.benchmark_group("algorithm_use");
	group.significance_level(0.05).sample_size(100);
	let grid = prepare_grid(500);
	group.bench_function("calc_flow", |b| {
		b.iter(|| {
			let mut grid = black_box(grid.clone());
			grid.derive_flow();
		})
	});
	group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
