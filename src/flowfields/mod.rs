//! Flowfields are a means of handling pathfinding for a crowd of actors.
//!
//! [Fixing Pathfinding Once and For All](https://web.archive.org/web/20150905073624/http://www.ai-blog.net/archives/000152.html)
//!
//! [leifnode](https://leifnode.com/2013/12/flow-field-pathfinding/)
//!
//! A terrain is divided into a grid of tiles, one tile per square of heightmap
//! samples. Each tile carries the three values the algorithm needs:
//!
//! * Cost field - 8-bit value where 255 represents impassable terrain (a slope
//! that is too steep or an obstacle) and range 1 - 254 represents the cost of
//! traversing the tile, 1 being flat ground
//! * Integration field - 16-bit cumulative cost of reaching the destination,
//! `u16::MAX` when the destination can't be reached
//! * Flow field - the direction to the neighbouring tile with the lowest
//! integration cost, so an actor on any tile knows where to head next
//!
//! Tiles are indexed `(column, row)` from the corner of the terrain at its
//! origin, columns run along the world `x` axis and rows along `z`.
//!
//! The pipeline is always run in order and rerun in full after the costs change:
//!
//! 1. [crate::prelude::CostFieldBuilder::build] - a fresh grid from terrain
//! 2. [crate::prelude::TileGrid::integrate] - best costs to a destination
//! 3. [crate::prelude::TileGrid::derive_flow] - best directions
//!

pub mod fields;
pub mod grid;
pub mod persistence;
pub mod sources;
pub mod utilities;
