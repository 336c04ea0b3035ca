//! Logic relating to picking a destination and recalculating the fields
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Pick the tile actors should travel to
#[derive(Event)]
pub struct EventSetDestination(pub TileIndex);

impl EventSetDestination {
	pub fn get_destination(&self) -> TileIndex {
		self.0
	}
}

/// Pick the tile under a point in world space, such as a cursor ray hitting the
/// terrain, as the destination
#[derive(Event)]
pub struct EventPickDestination(pub Vec3);

impl EventPickDestination {
	pub fn get_position(&self) -> Vec3 {
		self.0
	}
}

/// Read [EventSetDestination] and run the pipeline of each terrain towards the
/// most recent destination
#[cfg(not(tarpaulin_include))]
pub fn process_destination_requests(
	mut events: EventReader<EventSetDestination>,
	mut query: Query<(Entity, &mut FlowFieldTerrain, &TerrainSources, &CostFieldSettings)>,
) {
	// only the latest pick within a frame matters
	let Some(destination) = events.read().last().map(|e| e.get_destination()) else {
		return;
	};
	for (entity, mut terrain, sources, settings) in query.iter_mut() {
		match terrain.set_destination(sources, settings, destination) {
			Ok(()) => debug!(
				"Recalculated {:?} towards {:?}",
				entity,
				destination.get_column_row()
			),
			Err(e) => error!("Failed to set the destination of {:?}: {}", entity, e),
		}
	}
}

/// Read [EventPickDestination], find the tile under the most recent point on
/// each terrain and run the pipeline towards it
#[cfg(not(tarpaulin_include))]
pub fn process_destination_picks(
	mut events: EventReader<EventPickDestination>,
	mut query: Query<(Entity, &mut FlowFieldTerrain, &TerrainSources, &CostFieldSettings)>,
) {
	let Some(position) = events.read().last().map(|e| e.get_position()) else {
		return;
	};
	for (entity, mut terrain, sources, settings) in query.iter_mut() {
		let Some(destination) = terrain
			.get_grid()
			.get_tile_index_from_xyz(position, settings.get_origin_offset())
		else {
			warn!("Picked point {:?} is not over the terrain of {:?}", position, entity);
			continue;
		};
		if let Err(e) = terrain.set_destination(sources, settings, destination) {
			error!("Failed to set the destination of {:?}: {}", entity, e);
		}
	}
}
