//! `use bevy_flowfield_terrain::prelude::*;` to import common structures and methods
//!

#[doc(hidden)]
pub use crate::flowfields::{
	fields::{cost_field::*, tile_cell::*, *},
	grid::*,
	sources::*,
	utilities::*,
};

#[doc(hidden)]
pub use crate::error::FlowFieldError;

#[doc(hidden)]
pub use crate::{
	bundle::*,
	plugin::{cost_layer::*, flow_layer::*, *},
};
