//! Ready made implementations of [HeightSource] and [ObstacleOracle] for
//! hosts without their own terrain or physics
//!

use crate::error::{FlowFieldError, Result};
use crate::prelude::*;
use bevy::prelude::*;

/// A square set of height samples stored row by row
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct HeightGrid {
	/// Samples along each side
	resolution: usize,
	/// Row-major heights, `resolution * resolution` of them
	heights: Vec<f32>,
}

impl HeightSource for HeightGrid {
	fn height(&self, x: usize, y: usize) -> f32 {
		self.heights[y * self.resolution + x]
	}
	fn resolution(&self) -> usize {
		self.resolution
	}
}

impl HeightGrid {
	/// Create a new instance of [HeightGrid] from row-major samples
	pub fn new(resolution: usize, heights: Vec<f32>) -> Result<Self> {
		let expected = resolution * resolution;
		if heights.len() != expected {
			return Err(FlowFieldError::HeightSampleCount {
				expected,
				found: heights.len(),
			});
		}
		Ok(HeightGrid {
			resolution,
			heights,
		})
	}
	/// Every sample at the same `height`
	pub fn flat(resolution: usize, height: f32) -> Self {
		HeightGrid {
			resolution,
			heights: vec![height; resolution * resolution],
		}
	}
	/// Sample a function of `(x, y)`
	pub fn from_fn(resolution: usize, f: impl Fn(usize, usize) -> f32) -> Self {
		let mut heights = Vec::with_capacity(resolution * resolution);
		for y in 0..resolution {
			for x in 0..resolution {
				heights.push(f(x, y));
			}
		}
		HeightGrid {
			resolution,
			heights,
		}
	}
	/// Create a [HeightGrid] from a square greyscale image where white is
	/// `max_height` and black is `0.0`. The top row of pixels is the most
	/// northerly row of samples
	#[cfg(feature = "heightmap")]
	pub fn from_heightmap(path: &str, max_height: f32) -> Result<Self> {
		use photon_rs::native::open_image;
		let img = open_image(path).map_err(|e| FlowFieldError::Heightmap(format!("{:?}", e)))?;
		let img_width = img.get_width() as usize;
		let img_height = img.get_height() as usize;
		if img_width != img_height {
			return Err(FlowFieldError::Heightmap(format!(
				"heightmap must be square, found {}x{} pixels",
				img_width, img_height
			)));
		}
		let raw_pixels = img.get_raw_pixels();
		// pixels run from the top left in RGB or RGBA sets
		let chunk_size = if img_width * img_height * 4 == raw_pixels.len() {
			4
		} else {
			3
		};
		let mut heights = vec![0.0; img_width * img_height];
		for (px_index, rgb) in raw_pixels.chunks(chunk_size).enumerate() {
			let column = px_index % img_width;
			let line_number = px_index / img_width;
			// flip so that row 0 is the bottom of the image
			let row = img_height - 1 - line_number;
			let colour_avg = (rgb[0] as f32 + rgb[1] as f32 + rgb[2] as f32) / 3.0;
			heights[row * img_width + column] = colour_avg / 255.0 * max_height;
		}
		debug!(
			"Loaded {}x{} heightmap from {}",
			img_width, img_height, path
		);
		HeightGrid::new(img_width, heights)
	}
}

/// An oracle for terrain without any obstacles
#[derive(Clone, Copy, Debug, Default)]
pub struct NoObstacles;

impl ObstacleOracle for NoObstacles {
	fn query(&self, _center: Vec3, _half_extent: Vec3) -> Vec<ObstacleClass> {
		Vec::new()
	}
}

/// A list of axis aligned boxes standing in for obstacle colliders
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, Default)]
pub struct ObstacleBoxes {
	/// `(center, half_extent, class)` of each box
	boxes: Vec<(Vec3, Vec3, ObstacleClass)>,
}

impl ObstacleBoxes {
	/// Add a box centred on `center`
	pub fn add(&mut self, center: Vec3, half_extent: Vec3, class: ObstacleClass) {
		self.boxes.push((center, half_extent, class));
	}
	/// Number of boxes
	pub fn len(&self) -> usize {
		self.boxes.len()
	}
	/// Are there no boxes
	pub fn is_empty(&self) -> bool {
		self.boxes.is_empty()
	}
}

impl ObstacleOracle for ObstacleBoxes {
	fn query(&self, center: Vec3, half_extent: Vec3) -> Vec<ObstacleClass> {
		self.boxes
			.iter()
			.filter(|(box_center, box_half, _)| {
				let gap = (*box_center - center).abs();
				let reach = *box_half + half_extent;
				gap.cmple(reach).all()
			})
			.map(|(_, _, class)| *class)
			.collect()
	}
}
