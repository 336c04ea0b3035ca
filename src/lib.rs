//! Flow field pathfinding over heightmap terrain, with a plugin for the Bevy
//! game engine to regenerate the fields when a destination is picked
//!

pub mod bundle;
pub mod error;
pub mod flowfields;
pub mod plugin;

pub mod prelude;
