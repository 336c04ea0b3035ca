//! A [TileCell] is the record held for every `(column, row)` of a
//! [crate::prelude::TileGrid]. It stores:
//!
//! * `cost` - 8-bit traversal cost, `1` by default, `255` marks the tile as
//! impassable and `0` is reserved for the destination
//! * `best_cost` - 16-bit cost of the cheapest known route from the tile to
//! the destination, `65535` when no route is known
//! * `best_direction` - the neighbour to move towards in order to descend the
//! `best_cost` values
//! * `world_anchor` - a point at the centre of the tile used by renderers and
//! pickers, the algorithm never reads it
//!

use crate::prelude::*;
use bevy::prelude::*;

#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct TileCell {
	/// Position of the tile in the grid
	index: TileIndex,
	/// World space point at the centre of the tile
	world_anchor: Vec3,
	/// Traversal cost
	cost: u8,
	/// Accumulated cost to the destination
	best_cost: u16,
	/// Direction of the cheapest neighbour
	best_direction: Direction,
}

impl TileCell {
	/// Create a new passable [TileCell] with the default cost and no route
	pub fn new(index: TileIndex, world_anchor: Vec3) -> Self {
		TileCell {
			index,
			world_anchor,
			cost: DEFAULT_COST,
			best_cost: UNREACHED_COST,
			best_direction: Direction::None,
		}
	}
	/// Get the index of the tile
	pub fn get_index(&self) -> TileIndex {
		self.index
	}
	/// Get the world anchor of the tile
	pub fn get_world_anchor(&self) -> Vec3 {
		self.world_anchor
	}
	/// Get the traversal cost
	pub fn get_cost(&self) -> u8 {
		self.cost
	}
	/// Set the traversal cost
	pub fn set_cost(&mut self, cost: u8) {
		self.cost = cost;
	}
	/// Get the accumulated cost to the destination
	pub fn get_best_cost(&self) -> u16 {
		self.best_cost
	}
	/// Set the accumulated cost to the destination
	pub fn set_best_cost(&mut self, best_cost: u16) {
		self.best_cost = best_cost;
	}
	/// Get the direction of the cheapest neighbour
	pub fn get_best_direction(&self) -> Direction {
		self.best_direction
	}
	/// Set the direction of the cheapest neighbour
	pub fn set_best_direction(&mut self, direction: Direction) {
		self.best_direction = direction;
	}
	/// Raise the cost of the tile. An impassable tile stays impassable and
	/// anything reaching `255` saturates to impassable
	pub fn increase_cost(&mut self, amount: u8) {
		if self.is_impassable() {
			return;
		}
		self.cost = self.cost.saturating_add(amount);
	}
	/// Is the tile excluded from all routes
	pub fn is_impassable(&self) -> bool {
		self.cost == IMPASSABLE_COST
	}
	/// Does the tile have a known route to the destination
	pub fn is_reached(&self) -> bool {
		self.best_cost != UNREACHED_COST
	}
	/// Is the tile the destination of the current integration
	pub fn is_destination(&self) -> bool {
		self.cost == DESTINATION_COST && self.best_cost == 0
	}
}
