//! The integration field is the `best_cost` of every [TileCell]: the
//! cumulative cost of reaching the destination. When a new destination is
//! chosen every `best_cost` is reset to `u16::MAX` and the destination is given
//! a cost and best cost of `0`. The field is then relaxed outwards:
//!
//! 1. Pop the tile at the front of a FIFO queue, at first this is only the destination
//! 2. Look up its cardinal neighbours (North, East, South, West, when not against a boundary)
//! 3. Ignore impassable neighbours, they are never relaxed or queued
//! 4. Add the neighbour's cost to the popped tile's best cost, if this is cheaper than the
//! neighbour's current best cost store it and queue the neighbour
//! 5. Repeat until the queue is empty
//!
//! A tile may be queued more than once if a cheaper route to it turns up after it was first
//! relaxed, the queue doesn't order tiles by cost so this is what guarantees the result converges
//! on the cheapest route. With the default cost of `1` this produces a diamond-like pattern:
//!
//! ```text
//!  _______________________________
//! |     |     |     |     |     |
//! |  4  |  3  |  2  |  3  |  4  |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! |  3  |  2  |  1  |  2  |  3  |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! |  2  |  1  |  0  |  1  |  2  |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! |  3  |  2  |  1  |  2  |  3  |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! |  4  |  3  |  2  |  3  |  4  |
//! |_____|_____|_____|_____|_____|
//! ```
//!
//! Impassable tiles keep `u16::MAX` and the wave flows around them.
//!

use std::collections::VecDeque;

use crate::error::Result;
use crate::prelude::*;
use bevy::prelude::*;

impl TileGrid {
	/// Reset and recalculate the `best_cost` of every tile for a route to
	/// `destination`. An out of bounds destination is rejected before any
	/// tile is touched
	pub fn integrate(&mut self, destination: TileIndex) -> Result<()> {
		if !self.contains(destination) {
			return Err(self.out_of_bounds(destination));
		}
		self.replace_destination(destination);
		for cell in self.cells_mut().iter_mut() {
			cell.set_best_cost(UNREACHED_COST);
		}
		let goal = self.get_mut(destination);
		goal.set_cost(DESTINATION_COST);
		goal.set_best_cost(0);

		let mut queue = VecDeque::from([destination]);
		let mut relaxations: usize = 0;
		while let Some(current) = queue.pop_front() {
			// read live, it may have improved since being queued
			let current_best = self.get(current).get_best_cost();
			for direction in CARDINAL_DIRECTIONS.iter() {
				let Some(n) = self.neighbour_index(current, direction.offset()) else {
					continue;
				};
				let neighbour = self.get_mut(n);
				if neighbour.is_impassable() {
					continue;
				}
				// overflow counts as no improvement
				if let Some(int_cost) = current_best.checked_add(neighbour.get_cost() as u16) {
					if int_cost < neighbour.get_best_cost() {
						neighbour.set_best_cost(int_cost);
						queue.push_back(n);
						relaxations += 1;
					}
				}
			}
		}
		debug!(
			"Integrated {}x{} grid towards {:?} with {} relaxations",
			self.get_width(),
			self.get_height(),
			destination.get_column_row(),
			relaxations
		);
		Ok(())
	}
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::FlowFieldError;
	/// Calculate integration field from a uniform cost field with a destination at the centre
	#[test]
	fn basic_field() {
		let mut grid = TileGrid::new(5, 5);
		grid.integrate(TileIndex::new(2, 2)).unwrap();
		let result = grid.best_cost_layer();
		let actual: Vec<u16> = vec![
			4,3,2,3,4,
			3,2,1,2,3,
			2,1,0,1,2,
			3,2,1,2,3,
			4,3,2,3,4,
		];
		assert_eq!(actual, result);
	}
	/// Impassable tiles are left unreached and routes flow around them
	#[test]
	fn field_with_walls() {
		let costs: Vec<u8> = vec![
			1,  1,  1,  1,
			1,255,255,  1,
			1,  1,255,  1,
			1,  1,  1,  1,
		];
		let mut grid = TileGrid::from_costs(4, 4, &costs).unwrap();
		grid.integrate(TileIndex::new(0, 0)).unwrap();
		let result = grid.best_cost_layer();
		let actual: Vec<u16> = vec![
			0,    1,    2,    3,
			1,65535,65535,    4,
			2,    3,65535,    5,
			3,    4,    5,    6,
		];
		assert_eq!(actual, result);
	}
	/// Higher costs are avoided when a cheaper detour exists
	#[test]
	fn field_prefers_cheap_detour() {
		let costs: Vec<u8> = vec![
			1,1,1,
			1,9,1,
			1,1,1,
		];
		let mut grid = TileGrid::from_costs(3, 3, &costs).unwrap();
		grid.integrate(TileIndex::new(0, 1)).unwrap();
		// straight through the centre would cost 10
		assert_eq!(4, grid.get(TileIndex::new(2, 1)).get_best_cost());
		assert_eq!(9, grid.get(TileIndex::new(1, 1)).get_best_cost());
	}
	#[test]
	fn destination_is_zeroed() {
		let mut grid = TileGrid::new(3, 3);
		grid.integrate(TileIndex::new(1, 2)).unwrap();
		let dest = grid.get(TileIndex::new(1, 2));
		assert_eq!(0, dest.get_cost());
		assert_eq!(0, dest.get_best_cost());
		assert!(dest.is_destination());
		assert_eq!(Some(TileIndex::new(1, 2)), grid.get_destination());
	}
	#[test]
	fn out_of_bounds_leaves_grid_untouched() {
		let mut grid = TileGrid::new(3, 3);
		grid.integrate(TileIndex::new(0, 0)).unwrap();
		let before = grid.clone();
		let result = grid.integrate(TileIndex::new(3, 0));
		assert!(matches!(result, Err(FlowFieldError::OutOfBounds { column: 3, row: 0, .. })));
		assert_eq!(before, grid);
	}
	#[test]
	fn moving_destination_restores_previous_cost() {
		let costs: Vec<u8> = vec![
			7,1,
			1,1,
		];
		let mut grid = TileGrid::from_costs(2, 2, &costs).unwrap();
		grid.integrate(TileIndex::new(0, 0)).unwrap();
		assert_eq!(0, grid.get(TileIndex::new(0, 0)).get_cost());
		grid.integrate(TileIndex::new(1, 1)).unwrap();
		assert_eq!(7, grid.get(TileIndex::new(0, 0)).get_cost());
		assert_eq!(8, grid.get(TileIndex::new(0, 0)).get_best_cost());
	}
	/// Saturating arithmetic means a route that would exceed `u16::MAX` is never recorded
	#[test]
	fn overflowing_route_stays_unreached() {
		// 300 tiles of cost 254 in a line
		let costs = vec![254_u8; 300];
		let mut grid = TileGrid::from_costs(300, 1, &costs).unwrap();
		grid.integrate(TileIndex::new(0, 0)).unwrap();
		// 258 * 254 = 65532 fits, one more tile would overflow
		assert_eq!(65532, grid.get(TileIndex::new(258, 0)).get_best_cost());
		assert_eq!(u16::MAX, grid.get(TileIndex::new(259, 0)).get_best_cost());
		assert_eq!(u16::MAX, grid.get(TileIndex::new(299, 0)).get_best_cost());
	}
	/// A cheaper route found after a tile was first relaxed re-queues the tile
	#[test]
	fn tile_relaxed_again_when_cheaper_route_found() {
		// the direct neighbour east of the goal is expensive, the
		// detour through the row above is found later by the wave
		let costs: Vec<u8> = vec![
			1,50,1,
			1, 1,1,
		];
		let mut grid = TileGrid::from_costs(3, 2, &costs).unwrap();
		grid.integrate(TileIndex::new(0, 0)).unwrap();
		assert_eq!(50, grid.get(TileIndex::new(1, 0)).get_best_cost());
		// (2, 0) first gets 51 via (1, 0) then 4 via the row above
		assert_eq!(4, grid.get(TileIndex::new(2, 0)).get_best_cost());
	}
}
