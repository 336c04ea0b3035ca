//! A [TileGrid] is the dense `width x height` array of [TileCell] generated
//! from a terrain. It owns every cell; the integration and flow passes mutate
//! the cells in place and regenerating the terrain replaces the grid wholesale.
//!
//! Cells are stored row by row, row `0` first:
//!
//! ```text
//!         column
//!        0   1   2
//!      _____________
//!  2  | 6 | 7 | 8 |
//!     |___|___|___|
//!  1  | 3 | 4 | 5 |   <- storage position of each (column, row)
//!     |___|___|___|
//!  0  | 0 | 1 | 2 |
//!     |___|___|___|
//! ```
//!

use crate::error::{FlowFieldError, Result};
use crate::prelude::*;
use bevy::prelude::*;

/// Bounds checked access to the cells of a grid and their neighbours
pub trait GridAccessor {
	/// Number of columns
	fn get_width(&self) -> usize;
	/// Number of rows
	fn get_height(&self) -> usize;
	/// Retrieve a cell, [None] if the index is outside of the grid
	fn try_get(&self, index: TileIndex) -> Option<&TileCell>;
	/// Is the index within `[0, width) x [0, height)`
	fn contains(&self, index: TileIndex) -> bool {
		index.get_column() < self.get_width() && index.get_row() < self.get_height()
	}
	/// Index of the tile at `offset` from `origin`, [None] when it falls outside of the grid
	fn neighbour_index(&self, origin: TileIndex, offset: (i32, i32)) -> Option<TileIndex> {
		origin.offset(offset).filter(|index| self.contains(*index))
	}
	/// The cell at `offset` from `origin`, [None] when it falls outside of the grid
	fn neighbour(&self, origin: TileIndex, offset: (i32, i32)) -> Option<&TileCell> {
		self.neighbour_index(origin, offset)
			.and_then(|index| self.try_get(index))
	}
	/// The cells in each of `directions` from `origin`, in the order of
	/// `directions`. Directions leading off the grid are skipped
	fn neighbours<'a>(
		&'a self,
		origin: TileIndex,
		directions: &'a [Direction],
	) -> impl Iterator<Item = (Direction, &'a TileCell)> + 'a {
		directions.iter().filter_map(move |direction| {
			self.neighbour(origin, direction.offset())
				.map(|cell| (*direction, cell))
		})
	}
}

#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, Default, PartialEq, Reflect)]
pub struct TileGrid {
	/// Number of columns
	width: usize,
	/// Number of rows
	height: usize,
	/// Row-major cells
	cells: Vec<TileCell>,
	/// The destination of the last integration and the cost it had before
	/// being zeroed
	destination: Option<(TileIndex, u8)>,
}

impl GridAccessor for TileGrid {
	fn get_width(&self) -> usize {
		self.width
	}
	fn get_height(&self) -> usize {
		self.height
	}
	fn try_get(&self, index: TileIndex) -> Option<&TileCell> {
		if self.contains(index) {
			self.cells.get(self.position(index))
		} else {
			None
		}
	}
}

impl TileGrid {
	/// Create a grid where every tile has the default cost and sits on a flat
	/// plane at `y = 0`
	pub fn new(width: usize, height: usize) -> Self {
		let mut cells = Vec::with_capacity(width * height);
		for row in 0..height {
			for column in 0..width {
				let index = TileIndex::new(column, row);
				cells.push(TileCell::new(index, flat_anchor(index)));
			}
		}
		TileGrid {
			width,
			height,
			cells,
			destination: None,
		}
	}
	/// Create a flat grid from row-major cost values. A cost of `0` is
	/// reserved for the destination and rejected, choose the destination with
	/// [TileGrid::integrate] instead
	pub fn from_costs(width: usize, height: usize, costs: &[u8]) -> Result<Self> {
		let expected = width.checked_mul(height).unwrap_or(usize::MAX);
		if costs.len() != expected {
			return Err(FlowFieldError::DimensionMismatch {
				width,
				height,
				expected,
				found: costs.len(),
			});
		}
		if let Some(position) = costs.iter().position(|cost| *cost == DESTINATION_COST) {
			return Err(FlowFieldError::ReservedCost {
				column: position % width,
				row: position / width,
			});
		}
		let mut grid = TileGrid::new(width, height);
		for (cell, cost) in grid.cells.iter_mut().zip(costs.iter()) {
			cell.set_cost(*cost);
		}
		Ok(grid)
	}
	/// Assemble a grid from row-major cells produced by a builder
	pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<TileCell>) -> Self {
		debug_assert_eq!(width * height, cells.len());
		TileGrid {
			width,
			height,
			cells,
			destination: None,
		}
	}
	/// Storage position of an index already known to be within the grid
	fn position(&self, index: TileIndex) -> usize {
		index.get_row() * self.width + index.get_column()
	}
	/// Error describing `index` being outside of the grid
	pub(crate) fn out_of_bounds(&self, index: TileIndex) -> FlowFieldError {
		FlowFieldError::OutOfBounds {
			column: index.get_column(),
			row: index.get_row(),
			width: self.width,
			height: self.height,
		}
	}
	/// Retrieve a cell. Panics when the index is outside of the grid, see
	/// [GridAccessor::try_get] for a fallible lookup
	pub fn get(&self, index: TileIndex) -> &TileCell {
		if !self.contains(index) {
			panic!("Cannot get a TileCell, index out of bounds. Asked for column {}, row {}, grid width is {}, grid height is {}", index.get_column(), index.get_row(), self.width, self.height)
		}
		&self.cells[self.position(index)]
	}
	/// Retrieve a mutable cell. Panics when the index is outside of the grid,
	/// see [TileGrid::try_get_mut] for a fallible lookup
	pub fn get_mut(&mut self, index: TileIndex) -> &mut TileCell {
		if !self.contains(index) {
			panic!("Cannot get a TileCell, index out of bounds. Asked for column {}, row {}, grid width is {}, grid height is {}", index.get_column(), index.get_row(), self.width, self.height)
		}
		let position = self.position(index);
		&mut self.cells[position]
	}
	/// Retrieve a mutable cell, [None] if the index is outside of the grid
	pub fn try_get_mut(&mut self, index: TileIndex) -> Option<&mut TileCell> {
		if self.contains(index) {
			let position = self.position(index);
			self.cells.get_mut(position)
		} else {
			None
		}
	}
	/// All cells in row-major order
	pub fn get_cells(&self) -> &[TileCell] {
		&self.cells
	}
	/// Number of tiles in the grid
	pub fn len(&self) -> usize {
		self.cells.len()
	}
	/// Does the grid contain no tiles
	pub fn is_empty(&self) -> bool {
		self.cells.is_empty()
	}
	/// The destination of the most recent integration
	pub fn get_destination(&self) -> Option<TileIndex> {
		self.destination.map(|(index, _)| index)
	}
	/// The cost of a tile ignoring any destination, for the destination itself
	/// this is the cost it had before being zeroed. Panics when the index is
	/// outside of the grid
	pub fn get_base_cost(&self, index: TileIndex) -> u8 {
		match self.destination {
			Some((destination, base_cost)) if destination == index => base_cost,
			_ => self.get(index).get_cost(),
		}
	}
	/// From a point in 3D space calculate which tile it lies over. `origin_offset`
	/// is the world position of the corner of the terrain, as given to
	/// [CostFieldSettings::with_origin_offset]. Points off the grid are [None]
	pub fn get_tile_index_from_xyz(&self, position: Vec3, origin_offset: Vec3) -> Option<TileIndex> {
		let x = (position.x - origin_offset.x).floor();
		let z = (position.z - origin_offset.z).floor();
		// NaN fails both comparisons
		if !(x >= 0.0 && z >= 0.0) || !x.is_finite() || !z.is_finite() {
			return None;
		}
		let index = TileIndex::new(x as usize, z as usize);
		if self.contains(index) {
			Some(index)
		} else {
			None
		}
	}
	/// Record a new destination, restoring the cost the previous destination
	/// had before it was zeroed
	pub(crate) fn replace_destination(&mut self, destination: TileIndex) {
		if let Some((previous, base_cost)) = self.destination.take() {
			if let Some(cell) = self.try_get_mut(previous) {
				cell.set_cost(base_cost);
			}
		}
		let base_cost = self.get(destination).get_cost();
		self.destination = Some((destination, base_cost));
	}
	/// Mark a loaded tile as the destination, `base_cost` is what it returns
	/// to once the destination moves
	pub(crate) fn restore_destination(&mut self, destination: TileIndex, base_cost: u8) {
		self.destination = Some((destination, base_cost));
	}
	/// Raise the cost of a tile, saturating to impassable. When the tile is the
	/// current destination the increase is applied to the cost it will be
	/// restored to once the destination moves.
	///
	/// Callers must rerun the integration and flow passes afterwards
	pub fn increase_cost(&mut self, index: TileIndex, amount: u8) -> Result<()> {
		if !self.contains(index) {
			return Err(self.out_of_bounds(index));
		}
		if self.get_destination() == Some(index) {
			if let Some((_, base_cost)) = self.destination.as_mut() {
				if *base_cost != IMPASSABLE_COST {
					*base_cost = base_cost.saturating_add(amount);
				}
			}
		} else {
			self.get_mut(index).increase_cost(amount);
		}
		debug!(
			"Increased cost of tile {:?} by {}",
			index.get_column_row(),
			amount
		);
		Ok(())
	}
	/// The values of one field for every tile in row-major order, widened to
	/// `u16` so each layer can be handled the same way by a renderer
	pub fn layer_values(&self, layer: FieldLayer) -> Vec<u16> {
		self.cells
			.iter()
			.map(|cell| match layer {
				FieldLayer::Cost => cell.get_cost() as u16,
				FieldLayer::BestCost => cell.get_best_cost(),
				FieldLayer::Flow => cell.get_best_direction().to_bits() as u16,
			})
			.collect()
	}
	/// Row-major traversal costs
	pub fn cost_layer(&self) -> Vec<u8> {
		self.cells.iter().map(|cell| cell.get_cost()).collect()
	}
	/// Row-major best costs
	pub fn best_cost_layer(&self) -> Vec<u16> {
		self.cells.iter().map(|cell| cell.get_best_cost()).collect()
	}
	/// Row-major best directions
	pub fn flow_layer(&self) -> Vec<Direction> {
		self.cells
			.iter()
			.map(|cell| cell.get_best_direction())
			.collect()
	}
	/// Mutable access to every cell, used by the passes which touch all tiles
	pub(crate) fn cells_mut(&mut self) -> &mut [TileCell] {
		&mut self.cells
	}
}

/// Anchor of a tile on a flat plane, centred within the tile
pub(crate) fn flat_anchor(index: TileIndex) -> Vec3 {
	Vec3::new(
		index.get_column() as f32 + 0.5,
		0.0,
		index.get_row() as f32 + 0.5,
	)
}
