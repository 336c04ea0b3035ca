//! Errors raised while building and solving a [crate::prelude::TileGrid]
//!
//! Saturating numeric behaviour (an 8-bit cost clamped to impassable, a 16-bit
//! best cost that would overflow being treated as "no improvement") is policy
//! rather than an error and so has no variant here.
//!

use thiserror::Error;

/// Crate wide result alias
pub type Result<T> = std::result::Result<T, FlowFieldError>;

/// Failures of the flow field pipeline, each one is reported before the grid
/// is mutated
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum FlowFieldError {
	/// No height data was provided to the cost field builder
	#[error("no height source was provided, cannot generate tile info")]
	MissingHeightSource,
	/// A height source needs at least a `2x2` set of samples to describe a cell
	#[error("height source resolution of {resolution} cannot describe any cells, at least 2 is required")]
	InvalidResolution {
		/// Resolution reported by the source
		resolution: usize,
	},
	/// The number of height samples does not describe a square of the given resolution
	#[error("expected {expected} height samples, found {found}")]
	HeightSampleCount {
		/// Samples required by the resolution
		expected: usize,
		/// Samples actually supplied
		found: usize,
	},
	/// The number of cell values does not match the grid dimensions
	#[error("grid of {width}x{height} requires {expected} cells, found {found}")]
	DimensionMismatch {
		/// Grid width in cells
		width: usize,
		/// Grid height in cells
		height: usize,
		/// Cells required
		expected: usize,
		/// Cells supplied
		found: usize,
	},
	/// A tile index lies outside of the grid
	#[error("tile ({column}, {row}) is outside of the {width}x{height} grid")]
	OutOfBounds {
		/// Requested column
		column: usize,
		/// Requested row
		row: usize,
		/// Grid width in cells
		width: usize,
		/// Grid height in cells
		height: usize,
	},
	/// A cost of `0` was supplied for a tile, that value is reserved for the destination
	#[error("tile ({column}, {row}) has a cost of 0 which is reserved for the destination")]
	ReservedCost {
		/// Column of the tile
		column: usize,
		/// Row of the tile
		row: usize,
	},
	/// A dense persisted layout could not be decoded
	#[error("malformed grid layout: {0}")]
	MalformedLayout(String),
	/// Reading or writing a file failed
	#[error(transparent)]
	Io(#[from] std::io::Error),
	/// A `ron` document could not be (de)serialised
	#[cfg(feature = "ron")]
	#[error("ron error: {0}")]
	Ron(String),
	/// A `csv` document could not be (de)serialised
	#[cfg(feature = "csv")]
	#[error(transparent)]
	Csv(#[from] csv::Error),
	/// A heightmap image could not be used as a height source
	#[cfg(feature = "heightmap")]
	#[error("heightmap error: {0}")]
	Heightmap(String),
}

#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn out_of_bounds_message() {
		let err = FlowFieldError::OutOfBounds {
			column: 4,
			row: 9,
			width: 3,
			height: 3,
		};
		assert_eq!("tile (4, 9) is outside of the 3x3 grid", err.to_string());
	}
	#[test]
	fn reserved_cost_message() {
		let err = FlowFieldError::ReservedCost { column: 1, row: 2 };
		assert_eq!(
			"tile (1, 2) has a cost of 0 which is reserved for the destination",
			err.to_string()
		);
	}
	#[test]
	fn io_converts() {
		let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
		let err: FlowFieldError = io.into();
		assert!(matches!(err, FlowFieldError::Io(_)));
	}
}
