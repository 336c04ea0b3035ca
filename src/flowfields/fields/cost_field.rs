//! The cost field is the `cost` of every [TileCell], an 8-bit value describing
//! how hard it is to move across a tile. A value of 1 is the default, a value of
//! 255 is a special case indicating the tile is strictly forbidden from being
//! used in a pathing calculation (a cliff or an obstacle) and anything in
//! between is a harder cost of movement, here derived from the steepness of the
//! terrain.
//!
//! The [CostFieldBuilder] samples a square [HeightSource] of `R x R` vertices
//! which describes `(R - 1) x (R - 1)` tiles. For each tile the 4 corner heights
//! are read and the difference between the highest and lowest corner is the
//! slope of the tile:
//!
//! * a slope at or above the threshold makes the tile impassable
//! * otherwise an [ObstacleOracle] is asked about the footprint of the tile in
//! world space, any obstacle of the blocking class makes the tile impassable
//! * otherwise the cost is `round(sqrt(1 + (slope * multiplier)^2))`, saturating at 255
//!
//! ```text
//!   (i,j+1)      (i+1,j+1)
//!      x-----------x
//!      |           |
//!      |   tile    |     slope = max(corners) - min(corners)
//!      |  (i, j)   |
//!      x-----------x
//!   (i,j)        (i+1,j)
//! ```
//!

use crate::error::{FlowFieldError, Result};
use crate::prelude::*;
use bevy::prelude::*;

/// Half size of the region queried for obstacles around the centre of a tile,
/// just under half a tile so neighbouring tiles don't overlap
const OBSTACLE_QUERY_HALF_EXTENT: f32 = 0.49;

/// Provides the terrain heights which the cost field is derived from
pub trait HeightSource: Send + Sync {
	/// Height of the vertex at `(x, y)` where both are in `0..resolution()`
	fn height(&self, x: usize, y: usize) -> f32;
	/// Number of vertices along each side of the square source
	fn resolution(&self) -> usize;
}

/// Classification of an obstacle returned by an [ObstacleOracle], analogous to
/// a physics layer
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect)]
pub struct ObstacleClass(pub u32);

impl ObstacleClass {
	/// The classification reserved for blocking obstacles
	pub const OBSTACLE: ObstacleClass = ObstacleClass(6);
}

impl Default for ObstacleClass {
	fn default() -> Self {
		ObstacleClass::OBSTACLE
	}
}

/// Answers whether anything obstructs a region of the world, typically backed
/// by a physics engine
pub trait ObstacleOracle: Send + Sync {
	/// Classifications of every obstacle overlapping the axis aligned box
	/// centred on `center` with half sizes `half_extent`. Both are in world
	/// space, the terrain's origin offset has already been applied
	fn query(&self, center: Vec3, half_extent: Vec3) -> Vec<ObstacleClass>;
}

/// Configuration of how terrain is turned into tile costs
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Component, Clone, Copy, Debug, PartialEq, Reflect)]
pub struct CostFieldSettings {
	/// Tiles with a height difference across their corners at or above this are impassable
	slope_threshold: f32,
	/// Scales the height difference before it is turned into a cost
	slope_cost_multiplier: f32,
	/// World position of the corner of the terrain
	origin_offset: Vec3,
	/// Obstacles of this class make a tile impassable
	blocking_class: ObstacleClass,
}

impl Default for CostFieldSettings {
	fn default() -> Self {
		CostFieldSettings {
			slope_threshold: 0.6,
			slope_cost_multiplier: 1.0,
			origin_offset: Vec3::ZERO,
			blocking_class: ObstacleClass::OBSTACLE,
		}
	}
}

impl CostFieldSettings {
	/// Create a new instance of [CostFieldSettings]
	pub fn new(slope_threshold: f32, slope_cost_multiplier: f32) -> Self {
		CostFieldSettings {
			slope_threshold,
			slope_cost_multiplier,
			..default()
		}
	}
	/// Place the terrain at `origin_offset` in the world
	pub fn with_origin_offset(mut self, origin_offset: Vec3) -> Self {
		self.origin_offset = origin_offset;
		self
	}
	/// Treat obstacles of `class` as blocking
	pub fn with_blocking_class(mut self, class: ObstacleClass) -> Self {
		self.blocking_class = class;
		self
	}
	pub fn get_slope_threshold(&self) -> f32 {
		self.slope_threshold
	}
	pub fn get_slope_cost_multiplier(&self) -> f32 {
		self.slope_cost_multiplier
	}
	pub fn get_origin_offset(&self) -> Vec3 {
		self.origin_offset
	}
	pub fn get_blocking_class(&self) -> ObstacleClass {
		self.blocking_class
	}
	/// From a `ron` file generate the [CostFieldSettings]
	#[cfg(feature = "ron")]
	pub fn from_ron(path: &str) -> Result<Self> {
		let file = std::fs::File::open(path)?;
		ron::de::from_reader(file).map_err(|e| FlowFieldError::Ron(e.to_string()))
	}
}

/// Generates a fresh [TileGrid] from terrain
#[derive(Clone, Copy, Debug, Default)]
pub struct CostFieldBuilder {
	/// How terrain maps to costs
	settings: CostFieldSettings,
}

impl CostFieldBuilder {
	/// Create a new instance of [CostFieldBuilder]
	pub fn new(settings: CostFieldSettings) -> Self {
		CostFieldBuilder { settings }
	}
	/// Get the settings used by the builder
	pub fn get_settings(&self) -> &CostFieldSettings {
		&self.settings
	}
	/// Build a new grid of `(R - 1) x (R - 1)` tiles from a height source of
	/// resolution `R`. A missing height source is a configuration error
	pub fn build(
		&self,
		heights: Option<&dyn HeightSource>,
		obstacles: &dyn ObstacleOracle,
	) -> Result<TileGrid> {
		let Some(heights) = heights else {
			error!("A height source is required to generate tile info");
			return Err(FlowFieldError::MissingHeightSource);
		};
		let resolution = heights.resolution();
		if resolution < 2 {
			return Err(FlowFieldError::InvalidResolution { resolution });
		}
		let tiles = resolution - 1;
		let mut cells = Vec::with_capacity(tiles * tiles);
		let mut impassable: usize = 0;
		for j in 0..tiles {
			for i in 0..tiles {
				let cell = self.build_cell(i, j, heights, obstacles);
				if cell.is_impassable() {
					impassable += 1;
				}
				cells.push(cell);
			}
		}
		debug!(
			"Generated tile info for {}x{} tiles, {} impassable",
			tiles, tiles, impassable
		);
		Ok(TileGrid::from_cells(tiles, tiles, cells))
	}
	/// Derive the cell at column `i`, row `j`
	fn build_cell(
		&self,
		i: usize,
		j: usize,
		heights: &dyn HeightSource,
		obstacles: &dyn ObstacleOracle,
	) -> TileCell {
		let corners = [
			heights.height(i, j),
			heights.height(i + 1, j),
			heights.height(i, j + 1),
			heights.height(i + 1, j + 1),
		];
		let max_height = corners.iter().copied().fold(f32::MIN, f32::max);
		let min_height = corners.iter().copied().fold(f32::MAX, f32::min);
		let height_delta = max_height - min_height;
		// centred on the tile horizontally and on its height span vertically
		let world_anchor = self.settings.origin_offset
			+ Vec3::new(1.0, height_delta, 1.0) * 0.5
			+ Vec3::new(i as f32, min_height, j as f32);
		let mut cell = TileCell::new(TileIndex::new(i, j), world_anchor);

		if height_delta >= self.settings.slope_threshold {
			cell.set_cost(IMPASSABLE_COST);
			return cell;
		}
		let center =
			self.settings.origin_offset + Vec3::new(i as f32 + 0.5, min_height, j as f32 + 0.5);
		let half_extent = Vec3::splat(OBSTACLE_QUERY_HALF_EXTENT);
		let mut has_obstacle = false;
		// every candidate is inspected, no early exit
		for class in obstacles.query(center, half_extent).iter() {
			if *class == self.settings.blocking_class {
				trace!("Tile ({}, {}) is blocked by an obstacle", i, j);
				has_obstacle = true;
			}
		}
		if has_obstacle {
			cell.set_cost(IMPASSABLE_COST);
		} else {
			cell.set_cost(slope_cost(
				height_delta,
				self.settings.slope_cost_multiplier,
			));
		}
		cell
	}
}

/// Cost of crossing a tile with the given height difference, saturating at
/// impassable rather than wrapping
pub fn slope_cost(height_delta: f32, multiplier: f32) -> u8 {
	let scaled = height_delta as f64 * multiplier as f64;
	let cost = (1.0 + scaled * scaled).sqrt().round();
	if !cost.is_finite() || cost >= IMPASSABLE_COST as f64 {
		IMPASSABLE_COST
	} else {
		cost as u8
	}
}
