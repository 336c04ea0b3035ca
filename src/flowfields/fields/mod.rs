//! The kinds of fields used by the algorithm. Rather than holding three
//! separate arrays each [TileCell] carries its own cost, best cost and best
//! direction so a single dense grid describes all three fields
//!

pub mod cost_field;
pub mod flow_field;
pub mod integration_field;
pub mod tile_cell;

use bevy::prelude::*;

/// ID of a tile within a grid, `(column, row)`
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Reflect)]
pub struct TileIndex((usize, usize));

impl TileIndex {
	/// Create a new instance of [TileIndex]
	pub fn new(column: usize, row: usize) -> Self {
		TileIndex((column, row))
	}
	/// Get the `(column, row)` tuple
	pub fn get_column_row(&self) -> (usize, usize) {
		self.0
	}
	/// Get the column
	pub fn get_column(&self) -> usize {
		self.0 .0
	}
	/// Get the row
	pub fn get_row(&self) -> usize {
		self.0 .1
	}
	/// Apply a `(column, row)` offset, returns [None] when the result would be
	/// negative. The upper bounds depend on the grid and are checked there
	pub fn offset(&self, offset: (i32, i32)) -> Option<TileIndex> {
		let column = self.get_column().checked_add_signed(offset.0 as isize)?;
		let row = self.get_row().checked_add_signed(offset.1 as isize)?;
		Some(TileIndex::new(column, row))
	}
	/// The `(column, row)` delta from `self` to `target`
	pub fn delta_to(&self, target: TileIndex) -> (i32, i32) {
		(
			target.get_column() as i32 - self.get_column() as i32,
			target.get_row() as i32 - self.get_row() as i32,
		)
	}
}

impl From<(usize, usize)> for TileIndex {
	fn from(value: (usize, usize)) -> Self {
		TileIndex(value)
	}
}

/// Selects which field of the tiles a renderer wants to read
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Reflect)]
pub enum FieldLayer {
	/// Traversal cost of each tile
	#[default]
	Cost,
	/// Accumulated cost to the destination
	BestCost,
	/// Best direction encoded with [crate::prelude::Direction::to_bits]
	Flow,
}
