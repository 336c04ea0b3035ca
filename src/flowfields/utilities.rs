//! Useful structures and tools used by the fields
//!

use bevy::prelude::*;

/// Cost of a tile that can never be traversed
pub const IMPASSABLE_COST: u8 = u8::MAX;
/// Cost given to every tile when it is created
pub const DEFAULT_COST: u8 = 1;
/// Cost reserved for the destination tile
pub const DESTINATION_COST: u8 = 0;
/// Best cost of a tile which has no known route to the destination
pub const UNREACHED_COST: u16 = u16::MAX;

/// Bit to indicate a northerly direction
const BITS_NORTH: u8 = 0b0000_0001;
/// Bit to indicate an easterly direction
const BITS_EAST: u8 = 0b0000_0010;
/// Bit to indicate a southerly direction
const BITS_SOUTH: u8 = 0b0000_0100;
/// Bit to indicate a westerly direction
const BITS_WEST: u8 = 0b0000_1000;
/// Bit to indicate a north-easterly direction
const BITS_NORTH_EAST: u8 = 0b0000_0011;
/// Bit to indicate a south-easterly direction
const BITS_SOUTH_EAST: u8 = 0b0000_0110;
/// Bit to indicate south-westerly direction
const BITS_SOUTH_WEST: u8 = 0b0000_1100;
/// Bit to indicate a north-westerly direction
const BITS_NORTH_WEST: u8 = 0b0000_1001;
/// Bits of a tile with no direction
const BITS_NONE: u8 = 0b0000_0000;

/// The 4 axis-aligned directions, used when propagating the integration field
pub const CARDINAL_DIRECTIONS: [Direction; 4] = [
	Direction::North,
	Direction::East,
	Direction::South,
	Direction::West,
];

/// All 8 directions, cardinals first. The flow field relies on this ordering
/// to break ties between equally cheap neighbours
pub const ALL_DIRECTIONS: [Direction; 8] = [
	Direction::North,
	Direction::East,
	Direction::South,
	Direction::West,
	Direction::NorthEast,
	Direction::SouthEast,
	Direction::SouthWest,
	Direction::NorthWest,
];

/// Direction of movement from a tile to one of its neighbours.
///
/// Offsets are `(column, row)` deltas where rows grow northward:
///
/// ```text
///  _____________________
/// |      |      |      |
/// |  NW  |  N   |  NE  |   (-1, 1) ( 0, 1) ( 1, 1)
/// |______|______|______|
/// |      |      |      |
/// |  W   | None |  E   |   (-1, 0) ( 0, 0) ( 1, 0)
/// |______|______|______|
/// |      |      |      |
/// |  SW  |  S   |  SE  |   (-1,-1) ( 0,-1) ( 1,-1)
/// |______|______|______|
/// ```
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy, Reflect)]
pub enum Direction {
	/// No movement, either the destination or a tile without a route
	#[default]
	None,
	North,
	South,
	East,
	West,
	NorthEast,
	NorthWest,
	SouthEast,
	SouthWest,
}

impl Direction {
	/// The `(column, row)` offset of the neighbour this direction points at
	pub fn offset(&self) -> (i32, i32) {
		match self {
			Direction::None => (0, 0),
			Direction::North => (0, 1),
			Direction::South => (0, -1),
			Direction::East => (1, 0),
			Direction::West => (-1, 0),
			Direction::NorthEast => (1, 1),
			Direction::NorthWest => (-1, 1),
			Direction::SouthEast => (1, -1),
			Direction::SouthWest => (-1, -1),
		}
	}
	/// Exact lookup of an offset, anything outside of the unit ring (including
	/// `(0, 0)`) is [Direction::None]
	pub fn from_offset(offset: (i32, i32)) -> Self {
		match offset {
			(0, 1) => Direction::North,
			(0, -1) => Direction::South,
			(1, 0) => Direction::East,
			(-1, 0) => Direction::West,
			(1, 1) => Direction::NorthEast,
			(-1, 1) => Direction::NorthWest,
			(1, -1) => Direction::SouthEast,
			(-1, -1) => Direction::SouthWest,
			_ => Direction::None,
		}
	}
	/// Returns the opposite [Direction] of the current
	pub fn inverse(&self) -> Direction {
		match self {
			Direction::None => Direction::None,
			Direction::North => Direction::South,
			Direction::South => Direction::North,
			Direction::East => Direction::West,
			Direction::West => Direction::East,
			Direction::NorthEast => Direction::SouthWest,
			Direction::NorthWest => Direction::SouthEast,
			Direction::SouthEast => Direction::NorthWest,
			Direction::SouthWest => Direction::NorthEast,
		}
	}
	/// Is this one of the 4 axis-aligned directions
	pub fn is_cardinal(&self) -> bool {
		matches!(
			self,
			Direction::North | Direction::South | Direction::East | Direction::West
		)
	}
	/// Is this one of the 4 diagonal directions
	pub fn is_diagonal(&self) -> bool {
		matches!(
			self,
			Direction::NorthEast
				| Direction::NorthWest
				| Direction::SouthEast
				| Direction::SouthWest
		)
	}
	/// Unit vector of the direction in world space where columns run along `x`
	/// and rows along `z`. [Direction::None] is [Vec3::ZERO]
	pub fn as_world_vector(&self) -> Vec3 {
		let (x, z) = self.offset();
		Vec3::new(x as f32, 0.0, z as f32).normalize_or_zero()
	}
	/// Convert to the compact bit representation used in persisted layouts
	pub fn to_bits(&self) -> u8 {
		match self {
			Direction::None => BITS_NONE,
			Direction::North => BITS_NORTH,
			Direction::South => BITS_SOUTH,
			Direction::East => BITS_EAST,
			Direction::West => BITS_WEST,
			Direction::NorthEast => BITS_NORTH_EAST,
			Direction::NorthWest => BITS_NORTH_WEST,
			Direction::SouthEast => BITS_SOUTH_EAST,
			Direction::SouthWest => BITS_SOUTH_WEST,
		}
	}
	/// Read a direction from its bit representation, unknown bit patterns are [None]
	pub fn from_bits(bits: u8) -> Option<Self> {
		match bits {
			BITS_NONE => Some(Direction::None),
			BITS_NORTH => Some(Direction::North),
			BITS_SOUTH => Some(Direction::South),
			BITS_EAST => Some(Direction::East),
			BITS_WEST => Some(Direction::West),
			BITS_NORTH_EAST => Some(Direction::NorthEast),
			BITS_NORTH_WEST => Some(Direction::NorthWest),
			BITS_SOUTH_EAST => Some(Direction::SouthEast),
			BITS_SOUTH_WEST => Some(Direction::SouthWest),
			_ => None,
		}
	}
}
