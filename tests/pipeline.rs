//! Run the full pipeline, terrain to flow, over small known terrains
//!

use bevy::prelude::*;
use bevy_flowfield_terrain::prelude::*;

/// Generate tiles from `heights` then integrate and derive towards `destination`
fn run_pipeline(heights: &HeightGrid, obstacles: &dyn ObstacleOracle, destination: TileIndex) -> TileGrid {
	let builder = CostFieldBuilder::new(CostFieldSettings::default());
	let mut grid = builder.build(Some(heights), obstacles).unwrap();
	grid.integrate(destination).unwrap();
	grid.derive_flow();
	grid
}

#[rustfmt::skip]
#[test]
fn flat_terrain_points_to_centre() {
	let heights = HeightGrid::flat(4, 0.0);
	let grid = run_pipeline(&heights, &NoObstacles, TileIndex::new(1, 1));
	let result = grid.best_cost_layer();
	let actual = vec![
		2, 1, 2,
		1, 0, 1,
		2, 1, 2,
	];
	assert_eq!(actual, result);
	// each tile steps straight onto the destination
	for cell in grid.get_cells() {
		if cell.get_index() == TileIndex::new(1, 1) {
			assert_eq!(Direction::None, cell.get_best_direction());
		} else {
			let next = cell.get_index().offset(cell.get_best_direction().offset()).unwrap();
			assert_eq!(TileIndex::new(1, 1), next);
		}
	}
}

#[test]
fn obstacle_forces_detour() {
	let heights = HeightGrid::flat(4, 0.0);
	let mut obstacles = ObstacleBoxes::default();
	obstacles.add(Vec3::new(1.5, 0.0, 0.5), Vec3::splat(0.5), ObstacleClass::OBSTACLE);
	let grid = run_pipeline(&heights, &obstacles, TileIndex::new(2, 0));
	assert!(grid.get(TileIndex::new(1, 0)).is_impassable());
	assert_eq!(4, grid.get(TileIndex::new(0, 0)).get_best_cost());
	// cuts diagonally past the obstacle
	assert_eq!(Direction::NorthEast, grid.get(TileIndex::new(0, 0)).get_best_direction());
	let path = grid.follow_flow(TileIndex::new(0, 0), 10);
	assert_eq!(TileIndex::new(2, 0), *path.last().unwrap());
	assert!(!path.contains(&TileIndex::new(1, 0)));
}

#[test]
fn obstacle_of_other_class_is_ignored() {
	let heights = HeightGrid::flat(4, 0.0);
	let mut obstacles = ObstacleBoxes::default();
	obstacles.add(Vec3::new(1.5, 0.0, 0.5), Vec3::splat(0.5), ObstacleClass(2));
	let grid = run_pipeline(&heights, &obstacles, TileIndex::new(2, 0));
	assert_eq!(DEFAULT_COST, grid.get(TileIndex::new(1, 0)).get_cost());
	assert_eq!(2, grid.get(TileIndex::new(0, 0)).get_best_cost());
}

#[test]
fn gentle_slope_costs_more_than_flat() {
	// rising by 0.5 per sample along x
	let heights = HeightGrid::from_fn(4, |x, _| x as f32 * 0.5);
	let settings = CostFieldSettings::new(0.6, 4.0);
	let grid = CostFieldBuilder::new(settings)
		.build(Some(&heights), &NoObstacles)
		.unwrap();
	// sqrt(1 + 2^2) rounds to 2
	for cost in grid.cost_layer() {
		assert_eq!(2, cost);
	}
}

#[test]
fn steep_cliff_is_unreachable() {
	let heights = HeightGrid::from_fn(5, |_, y| if y >= 2 { 10.0 } else { 0.0 });
	let grid = run_pipeline(&heights, &NoObstacles, TileIndex::new(0, 0));
	for column in 0..4 {
		assert!(grid.get(TileIndex::new(column, 1)).is_impassable());
		let above = grid.get(TileIndex::new(column, 2));
		assert!(!above.is_reached());
		assert_eq!(Direction::None, above.get_best_direction());
	}
}

#[test]
fn pipeline_is_idempotent() {
	let heights = HeightGrid::from_fn(9, |x, y| ((x * 3 + y * 5) % 4) as f32 * 0.15);
	let first = run_pipeline(&heights, &NoObstacles, TileIndex::new(3, 5));
	let mut second = first.clone();
	second.integrate(TileIndex::new(3, 5)).unwrap();
	second.derive_flow();
	assert_eq!(first, second);
}

#[test]
fn changing_destination_leaves_no_residue() {
	let heights = HeightGrid::from_fn(9, |x, y| ((x + y * 2) % 3) as f32 * 0.2);
	let mut moved = run_pipeline(&heights, &NoObstacles, TileIndex::new(0, 0));
	moved.integrate(TileIndex::new(6, 7)).unwrap();
	moved.derive_flow();
	let fresh = run_pipeline(&heights, &NoObstacles, TileIndex::new(6, 7));
	assert_eq!(fresh.cost_layer(), moved.cost_layer());
	assert_eq!(fresh.best_cost_layer(), moved.best_cost_layer());
	assert_eq!(fresh.flow_layer(), moved.flow_layer());
}

#[test]
fn flow_descends_to_destination() {
	let heights = HeightGrid::from_fn(12, |x, y| ((x * 7 + y * 3) % 5) as f32 * 0.12);
	let mut obstacles = ObstacleBoxes::default();
	obstacles.add(Vec3::new(5.5, 0.0, 4.0), Vec3::new(0.5, 10.0, 3.0), ObstacleClass::OBSTACLE);
	let destination = TileIndex::new(9, 2);
	let grid = run_pipeline(&heights, &obstacles, destination);
	for cell in grid.get_cells() {
		if !cell.is_reached() {
			continue;
		}
		let path = grid.follow_flow(cell.get_index(), grid.len());
		assert_eq!(destination, *path.last().unwrap());
		for step in path.windows(2) {
			assert!(grid.get(step[1]).get_best_cost() < grid.get(step[0]).get_best_cost());
			assert!(!grid.get(step[1]).is_impassable());
		}
	}
}
