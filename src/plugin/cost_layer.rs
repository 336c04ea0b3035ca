//! Logic for regenerating the tiles of a terrain and for adjusting the cost of
//! individual tiles at runtime
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Regenerate the tiles of every terrain from its [TerrainSources], for
/// instance after the heights have been modified
#[derive(Event, Default)]
pub struct EventRegenerateTiles;

/// Raise the cost of a tile
#[derive(Event)]
pub struct EventIncreaseCost {
	/// Tile to update
	index: TileIndex,
	/// How much to add to the cost of the tile
	amount: u8,
}

impl EventIncreaseCost {
	/// Create a new instance of [EventIncreaseCost]
	pub fn new(index: TileIndex, amount: u8) -> Self {
		EventIncreaseCost { index, amount }
	}
	pub fn get_index(&self) -> TileIndex {
		self.index
	}
	pub fn get_amount(&self) -> u8 {
		self.amount
	}
}

/// Read [EventRegenerateTiles] and rebuild the grid of each terrain
#[cfg(not(tarpaulin_include))]
pub fn regenerate_tiles(
	mut events: EventReader<EventRegenerateTiles>,
	mut query: Query<(Entity, &mut FlowFieldTerrain, &TerrainSources, &CostFieldSettings)>,
) {
	// several requests in one frame produce the same grid
	if events.is_empty() {
		return;
	}
	events.clear();
	for (entity, mut terrain, sources, settings) in query.iter_mut() {
		match terrain.regenerate(sources, settings) {
			Ok(()) => info!(
				"Regenerated {} tiles of {:?}",
				terrain.get_grid().len(),
				entity
			),
			Err(e) => error!("Failed to regenerate the tiles of {:?}: {}", entity, e),
		}
	}
}

/// Read [EventIncreaseCost] and apply each increase to every terrain
#[cfg(not(tarpaulin_include))]
pub fn process_cost_increases(
	mut events: EventReader<EventIncreaseCost>,
	mut query: Query<(Entity, &mut FlowFieldTerrain)>,
) {
	for event in events.read() {
		for (entity, mut terrain) in query.iter_mut() {
			if let Err(e) = terrain.increase_cost(event.get_index(), event.get_amount()) {
				warn!("Cost increase ignored for {:?}: {}", entity, e);
			}
		}
	}
}
