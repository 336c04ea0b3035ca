//! Defines the Bevy [Plugin] for FlowFieldTerrain
//!

use crate::prelude::*;
use bevy::prelude::*;

pub mod cost_layer;
pub mod flow_layer;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum OrderingSet {
	/// Tiles are generated and their costs adjusted
	Cost,
	/// Destinations are picked and the fields recalculated
	Flow,
}

pub struct FlowFieldTerrainPlugin;

impl Plugin for FlowFieldTerrainPlugin {
	#[cfg(not(tarpaulin_include))]
	fn build(&self, app: &mut App) {
		app.register_type::<Direction>()
			.register_type::<TileIndex>()
			.register_type::<TileCell>()
			.register_type::<TileGrid>()
			.register_type::<ObstacleClass>()
			.register_type::<CostFieldSettings>()
			.register_type::<FieldLayer>()
			.add_event::<cost_layer::EventRegenerateTiles>()
			.add_event::<cost_layer::EventIncreaseCost>()
			.add_event::<flow_layer::EventSetDestination>()
			.add_event::<flow_layer::EventPickDestination>()
			.configure_sets(Update, (OrderingSet::Cost, OrderingSet::Flow).chain())
			.add_systems(
				Update,
				(
					(
						cost_layer::regenerate_tiles,
						cost_layer::process_cost_increases,
					)
						.chain()
						.in_set(OrderingSet::Cost),
					(
						flow_layer::process_destination_picks,
						flow_layer::process_destination_requests,
					)
						.chain()
						.in_set(OrderingSet::Flow),
				),
			);
	}
}
