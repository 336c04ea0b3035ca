//! Components describing a pathable terrain and the grid generated from it
//!

use crate::error::Result;
use crate::prelude::*;
use bevy::prelude::*;

/// The terrain data a [TileGrid] is generated from, supplied by the host
#[derive(Component)]
pub struct TerrainSources {
	/// Heights of the terrain vertices, generation fails without them
	heights: Option<Box<dyn HeightSource>>,
	/// Detects obstacles standing on the terrain
	obstacles: Box<dyn ObstacleOracle>,
}

impl TerrainSources {
	/// Create a new instance of [TerrainSources]
	pub fn new(heights: impl HeightSource + 'static, obstacles: impl ObstacleOracle + 'static) -> Self {
		TerrainSources {
			heights: Some(Box::new(heights)),
			obstacles: Box::new(obstacles),
		}
	}
	/// Sources where the height data has not been provided yet, useful when a
	/// terrain streams in after the entity is spawned
	pub fn without_heights(obstacles: impl ObstacleOracle + 'static) -> Self {
		TerrainSources {
			heights: None,
			obstacles: Box::new(obstacles),
		}
	}
	/// Replace the height data
	pub fn set_heights(&mut self, heights: impl HeightSource + 'static) {
		self.heights = Some(Box::new(heights));
	}
	/// Replace the obstacle oracle
	pub fn set_obstacles(&mut self, obstacles: impl ObstacleOracle + 'static) {
		self.obstacles = Box::new(obstacles);
	}
	pub fn get_heights(&self) -> Option<&dyn HeightSource> {
		self.heights.as_deref()
	}
	pub fn get_obstacles(&self) -> &dyn ObstacleOracle {
		self.obstacles.as_ref()
	}
}

/// Owns the [TileGrid] of a terrain. Each operation either completes or
/// leaves the grid as it was
#[derive(Component, Default, Clone)]
pub struct FlowFieldTerrain {
	/// Tiles of the terrain
	grid: TileGrid,
}

impl FlowFieldTerrain {
	/// Get the grid of tiles
	pub fn get_grid(&self) -> &TileGrid {
		&self.grid
	}
	/// Replace the grid with one generated from `sources`. If a destination
	/// had been chosen the fields are recalculated for it
	pub fn regenerate(
		&mut self,
		sources: &TerrainSources,
		settings: &CostFieldSettings,
	) -> Result<()> {
		let mut grid = CostFieldBuilder::new(*settings)
			.build(sources.get_heights(), sources.get_obstacles())?;
		if let Some(destination) = self.grid.get_destination() {
			if grid.contains(destination) {
				grid.integrate(destination)?;
				grid.derive_flow();
			} else {
				warn!(
					"Destination {:?} no longer lies on the terrain, it has been dropped",
					destination.get_column_row()
				);
			}
		}
		self.grid = grid;
		Ok(())
	}
	/// Run the whole pipeline towards `destination`: generate the tiles,
	/// integrate then derive the flow
	pub fn set_destination(
		&mut self,
		sources: &TerrainSources,
		settings: &CostFieldSettings,
		destination: TileIndex,
	) -> Result<()> {
		let mut grid = CostFieldBuilder::new(*settings)
			.build(sources.get_heights(), sources.get_obstacles())?;
		grid.integrate(destination)?;
		grid.derive_flow();
		self.grid = grid;
		Ok(())
	}
	/// Raise the cost of a tile and recalculate the fields for the current
	/// destination. The increase lasts until the tiles are next generated
	pub fn increase_cost(&mut self, index: TileIndex, amount: u8) -> Result<()> {
		self.grid.increase_cost(index, amount)?;
		if let Some(destination) = self.grid.get_destination() {
			self.grid.integrate(destination)?;
			self.grid.derive_flow();
		}
		Ok(())
	}
}

#[derive(Bundle)]
pub struct FlowFieldTerrainBundle {
	/// Generated tiles
	terrain: FlowFieldTerrain,
	/// Data the tiles are generated from
	sources: TerrainSources,
	/// How the data maps to costs
	settings: CostFieldSettings,
}

impl FlowFieldTerrainBundle {
	/// Create a new instance of [FlowFieldTerrainBundle], generating the
	/// initial tiles from `sources`
	pub fn new(sources: TerrainSources, settings: CostFieldSettings) -> Result<Self> {
		let mut terrain = FlowFieldTerrain::default();
		terrain.regenerate(&sources, &settings)?;
		Ok(FlowFieldTerrainBundle {
			terrain,
			sources,
			settings,
		})
	}
}
