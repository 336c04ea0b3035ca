//! Saving and loading a [TileGrid].
//!
//! The dense layout is an 8 byte header of `width` and `height` (little endian
//! `u32`) followed by 4 bytes per tile in row-major order:
//!
//! ```text
//!  ________________________________________________
//! |  cost (u8)  |  best_cost (u16 LE)  |  dir (u8) |
//! |_____________|______________________|___________|
//! ```
//!
//! where `dir` uses the bit layout of [Direction::to_bits]. World anchors are not
//! stored, a loaded grid places its tiles on a flat plane.
//!
//! With the `ron` feature a whole grid can be (de)serialised and with the `csv`
//! feature the cost layer can be exchanged as a matrix of values, one line per row.
//!

use crate::error::{FlowFieldError, Result};
use crate::prelude::*;
use bevy::prelude::*;

/// Bytes of the `width`, `height` header
const HEADER_LEN: usize = 8;
/// Bytes of each tile
const CELL_LEN: usize = 4;

impl TileGrid {
	/// Encode the grid into the dense layout
	pub fn to_layout_bytes(&self) -> Vec<u8> {
		let mut bytes = Vec::with_capacity(HEADER_LEN + self.len() * CELL_LEN);
		bytes.extend_from_slice(&(self.get_width() as u32).to_le_bytes());
		bytes.extend_from_slice(&(self.get_height() as u32).to_le_bytes());
		for cell in self.get_cells().iter() {
			bytes.push(cell.get_cost());
			bytes.extend_from_slice(&cell.get_best_cost().to_le_bytes());
			bytes.push(cell.get_best_direction().to_bits());
		}
		bytes
	}
	/// Decode a grid from the dense layout. A tile with a cost and best cost of
	/// `0` is taken to be the destination and will be restored to the default
	/// cost when the destination moves, more than one such tile is rejected
	pub fn from_layout_bytes(bytes: &[u8]) -> Result<Self> {
		if bytes.len() < HEADER_LEN {
			return Err(FlowFieldError::MalformedLayout(format!(
				"expected a header of {} bytes, found {} bytes",
				HEADER_LEN,
				bytes.len()
			)));
		}
		let (header, body) = bytes.split_at(HEADER_LEN);
		let width = u32::from_le_bytes([header[0], header[1], header[2], header[3]]) as usize;
		let height = u32::from_le_bytes([header[4], header[5], header[6], header[7]]) as usize;
		let Some(expected) = width
			.checked_mul(height)
			.and_then(|cells| cells.checked_mul(CELL_LEN))
		else {
			return Err(FlowFieldError::MalformedLayout(format!(
				"a {}x{} grid is too large to describe",
				width, height
			)));
		};
		if body.len() != expected {
			return Err(FlowFieldError::MalformedLayout(format!(
				"a {}x{} grid needs {} bytes of tiles, found {}",
				width,
				height,
				expected,
				body.len()
			)));
		}
		let mut grid = TileGrid::new(width, height);
		let mut destination = None;
		for (cell, chunk) in grid.cells_mut().iter_mut().zip(body.chunks(CELL_LEN)) {
			let direction = Direction::from_bits(chunk[3]).ok_or_else(|| {
				FlowFieldError::MalformedLayout(format!(
					"unknown direction bits {:#010b} at tile {:?}",
					chunk[3],
					cell.get_index().get_column_row()
				))
			})?;
			cell.set_cost(chunk[0]);
			cell.set_best_cost(u16::from_le_bytes([chunk[1], chunk[2]]));
			cell.set_best_direction(direction);
			if cell.is_destination() {
				if let Some(previous) = destination.replace(cell.get_index()) {
					return Err(FlowFieldError::MalformedLayout(format!(
						"tiles {:?} and {:?} both claim to be the destination",
						previous.get_column_row(),
						cell.get_index().get_column_row()
					)));
				}
			}
		}
		if let Some(index) = destination {
			grid.restore_destination(index, DEFAULT_COST);
		}
		debug!("Decoded {}x{} grid from dense layout", width, height);
		Ok(grid)
	}
	/// Serialise the grid into a `ron` string
	#[cfg(feature = "ron")]
	pub fn to_ron_string(&self) -> Result<String> {
		ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
			.map_err(|e| FlowFieldError::Ron(e.to_string()))
	}
	/// From a `ron` file generate the [TileGrid]
	#[cfg(feature = "ron")]
	pub fn from_ron(path: &str) -> Result<Self> {
		let file = std::fs::File::open(path)?;
		ron::de::from_reader(file).map_err(|e| FlowFieldError::Ron(e.to_string()))
	}
	/// Write the cost of every tile as `csv`, one line per row starting with row `0`.
	/// The destination is written with its base cost so the matrix can be
	/// loaded with [TileGrid::from_cost_csv]
	#[cfg(feature = "csv")]
	pub fn write_cost_csv<W: std::io::Write>(&self, writer: W) -> Result<()> {
		let mut wtr = csv::WriterBuilder::new()
			.has_headers(false)
			.from_writer(writer);
		for row in self.get_cells().chunks(self.get_width().max(1)) {
			wtr.write_record(
				row.iter()
					.map(|cell| self.get_base_cost(cell.get_index()).to_string()),
			)?;
		}
		wtr.flush()?;
		Ok(())
	}
	/// Create a flat [TileGrid] from a `csv` matrix of costs, one line per row
	/// starting with row `0`
	#[cfg(feature = "csv")]
	pub fn from_cost_csv<R: std::io::Read>(reader: R) -> Result<Self> {
		let mut rdr = csv::ReaderBuilder::new()
			.has_headers(false)
			.from_reader(reader);
		let mut costs = Vec::new();
		let mut width = 0;
		let mut height = 0;
		for record in rdr.records() {
			let record = record?;
			width = record.len();
			for field in record.iter() {
				let cost = field.trim().parse::<u8>().map_err(|e| {
					FlowFieldError::MalformedLayout(format!(
						"cost `{}` on row {} is not a u8: {}",
						field, height, e
					))
				})?;
				costs.push(cost);
			}
			height += 1;
		}
		TileGrid::from_costs(width, height, &costs)
	}
}
