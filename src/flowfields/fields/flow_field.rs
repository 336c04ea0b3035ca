//! The flow field is the `best_direction` of every [TileCell]. Once the
//! integration field has been calculated each tile looks at its (up to) 8
//! neighbours and points at the one with the lowest `best_cost`, as long as it
//! is cheaper than the tile itself. An actor standing on any tile can then read
//! a direction of movement instead of searching for its own path.
//!
//! Neighbours are examined cardinals first (North, East, South, West, then
//! NorthEast, SouthEast, SouthWest, NorthWest) and only a strictly cheaper
//! neighbour replaces the current best, so when several neighbours share the
//! lowest cost the first one in that order wins.
//!
//! Tiles without a direction:
//!
//! * the destination, it has nothing cheaper around it (`cost == 0`)
//! * unreached tiles, including impassable ones (`best_cost == u16::MAX`)
//!

use crate::prelude::*;
use bevy::prelude::*;

impl TileGrid {
	/// Calculate the `best_direction` of every tile from the current
	/// integration field. Every tile is overwritten so no direction from an
	/// earlier destination survives
	pub fn derive_flow(&mut self) {
		let mut pointing: usize = 0;
		for position in 0..self.len() {
			let index = self.get_cells()[position].get_index();
			let direction = self.cheapest_neighbour_direction(index);
			if direction != Direction::None {
				pointing += 1;
			}
			self.cells_mut()[position].set_best_direction(direction);
		}
		debug!(
			"Derived flow for {}x{} grid, {} of {} tiles have a direction",
			self.get_width(),
			self.get_height(),
			pointing,
			self.len()
		);
	}
	/// Direction from the tile at `index` to its cheapest neighbour, [Direction::None]
	/// if the tile is unreached or nothing around it is cheaper
	fn cheapest_neighbour_direction(&self, index: TileIndex) -> Direction {
		let current_cost = self.get(index).get_best_cost();
		if current_cost == UNREACHED_COST {
			return Direction::None;
		}
		let mut cheapest_value = current_cost;
		let mut cheapest_direction = Direction::None;
		for (direction, neighbour) in self.neighbours(index, &ALL_DIRECTIONS) {
			if neighbour.get_best_cost() < cheapest_value {
				cheapest_value = neighbour.get_best_cost();
				cheapest_direction = direction;
			}
		}
		cheapest_direction
	}
	/// Walk the flow field from `start`, returning each tile visited
	/// (including `start`). The walk ends on a tile without a direction or after
	/// `max_steps` moves, whichever comes first
	pub fn follow_flow(&self, start: TileIndex, max_steps: usize) -> Vec<TileIndex> {
		let mut path = Vec::new();
		if !self.contains(start) {
			warn!(
				"Cannot follow flow from {:?}, it is outside of the grid",
				start.get_column_row()
			);
			return path;
		}
		let mut current = start;
		path.push(current);
		for _ in 0..max_steps {
			let direction = self.get(current).get_best_direction();
			if direction == Direction::None {
				break;
			}
			match self.neighbour_index(current, direction.offset()) {
				Some(next) => {
					current = next;
					path.push(current);
				}
				None => break,
			}
		}
		trace!("Flow path: {:?}", path);
		path
	}
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	/// Uniform field, every tile heads straight for the destination
	#[test]
	fn flow_uniform() {
		let mut grid = TileGrid::new(3, 3);
		grid.integrate(TileIndex::new(1, 1)).unwrap();
		grid.derive_flow();
		let result = grid.flow_layer();
		let actual = vec![
			Direction::NorthEast, Direction::North, Direction::NorthWest,
			Direction::East,      Direction::None,  Direction::West,
			Direction::SouthEast, Direction::South, Direction::SouthWest,
		];
		assert_eq!(actual, result);
	}
	/// Cardinal and diagonal neighbours share the lowest cost, the cardinal wins
	#[test]
	fn tie_break_prefers_cardinal() {
		let mut grid = TileGrid::new(2, 2);
		grid.get_mut(TileIndex::new(0, 0)).set_best_cost(5);
		grid.get_mut(TileIndex::new(0, 1)).set_best_cost(3);
		grid.get_mut(TileIndex::new(1, 0)).set_best_cost(4);
		grid.get_mut(TileIndex::new(1, 1)).set_best_cost(3);
		grid.derive_flow();
		assert_eq!(Direction::North, grid.get(TileIndex::new(0, 0)).get_best_direction());
	}
	/// Two cardinals tie, the first in enumeration order wins
	#[test]
	fn tie_break_between_cardinals() {
		let mut grid = TileGrid::new(2, 2);
		grid.get_mut(TileIndex::new(0, 0)).set_best_cost(5);
		grid.get_mut(TileIndex::new(0, 1)).set_best_cost(2);
		grid.get_mut(TileIndex::new(1, 0)).set_best_cost(2);
		grid.get_mut(TileIndex::new(1, 1)).set_best_cost(9);
		grid.derive_flow();
		assert_eq!(Direction::North, grid.get(TileIndex::new(0, 0)).get_best_direction());
	}
	/// A strictly cheaper diagonal beats the cardinals
	#[test]
	fn cheaper_diagonal_wins() {
		let mut grid = TileGrid::new(2, 2);
		grid.get_mut(TileIndex::new(0, 0)).set_best_cost(5);
		grid.get_mut(TileIndex::new(0, 1)).set_best_cost(3);
		grid.get_mut(TileIndex::new(1, 0)).set_best_cost(4);
		grid.get_mut(TileIndex::new(1, 1)).set_best_cost(2);
		grid.derive_flow();
		assert_eq!(Direction::NorthEast, grid.get(TileIndex::new(0, 0)).get_best_direction());
	}
	/// An unreached tile never points anywhere, even with reached neighbours
	#[test]
	fn unreached_has_no_direction() {
		let mut grid = TileGrid::new(2, 1);
		grid.get_mut(TileIndex::new(0, 0)).set_best_cost(0);
		grid.get_mut(TileIndex::new(1, 0)).set_best_cost(u16::MAX);
		grid.get_mut(TileIndex::new(1, 0)).set_best_direction(Direction::West);
		grid.derive_flow();
		assert_eq!(Direction::None, grid.get(TileIndex::new(1, 0)).get_best_direction());
	}
	/// Directions from an earlier destination are replaced
	#[test]
	fn rederive_overwrites_directions() {
		let mut grid = TileGrid::new(3, 1);
		grid.integrate(TileIndex::new(0, 0)).unwrap();
		grid.derive_flow();
		assert_eq!(Direction::West, grid.get(TileIndex::new(1, 0)).get_best_direction());
		grid.integrate(TileIndex::new(2, 0)).unwrap();
		grid.derive_flow();
		assert_eq!(Direction::East, grid.get(TileIndex::new(1, 0)).get_best_direction());
		assert_eq!(Direction::None, grid.get(TileIndex::new(2, 0)).get_best_direction());
	}
	#[test]
	fn follow_flow_reaches_destination() {
		let mut grid = TileGrid::new(5, 5);
		grid.integrate(TileIndex::new(4, 4)).unwrap();
		grid.derive_flow();
		let path = grid.follow_flow(TileIndex::new(0, 0), 20);
		assert_eq!(Some(&TileIndex::new(4, 4)), path.last());
		assert_eq!(TileIndex::new(0, 0), path[0]);
	}
	#[test]
	fn follow_flow_step_limit() {
		let mut grid = TileGrid::new(5, 1);
		grid.integrate(TileIndex::new(4, 0)).unwrap();
		grid.derive_flow();
		let path = grid.follow_flow(TileIndex::new(0, 0), 2);
		let actual = vec![TileIndex::new(0, 0), TileIndex::new(1, 0), TileIndex::new(2, 0)];
		assert_eq!(actual, path);
	}
	#[test]
	fn follow_flow_outside_grid() {
		let grid = TileGrid::new(2, 2);
		assert!(grid.follow_flow(TileIndex::new(3, 3), 5).is_empty());
	}
}
