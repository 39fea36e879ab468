use std::fmt::{Debug, Display, Formatter, Result};

/// Identifies a chunk in the world: a horizontal X/Y grid coordinate plus the layer it lives on.
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct ChunkPosition {
	x: i32,
	y: i32,
	layer: i8
}

impl ChunkPosition {
	pub fn new(x: i32, y: i32, layer: i8) -> Self {
		ChunkPosition { x, y, layer }
	}

	pub fn x(&self) -> i32 {
		self.x
	}

	pub fn y(&self) -> i32 {
		self.y
	}

	pub fn layer(&self) -> i8 {
		self.layer
	}

	pub fn plus_x(&self) -> Option<ChunkPosition> {
		self.x.checked_add(1).map(|x| ChunkPosition { x, ..*self })
	}

	pub fn minus_x(&self) -> Option<ChunkPosition> {
		self.x.checked_sub(1).map(|x| ChunkPosition { x, ..*self })
	}

	pub fn plus_y(&self) -> Option<ChunkPosition> {
		self.y.checked_add(1).map(|y| ChunkPosition { y, ..*self })
	}

	pub fn minus_y(&self) -> Option<ChunkPosition> {
		self.y.checked_sub(1).map(|y| ChunkPosition { y, ..*self })
	}
}

impl Display for ChunkPosition {
	fn fmt(&self, f: &mut Formatter) -> Result {
		write!(f, "({}, {}, layer {})", self.x, self.y, self.layer)
	}
}

impl Debug for ChunkPosition {
	fn fmt(&self, f: &mut Formatter) -> Result {
		write!(f, "ChunkPosition {{ x: {}, y: {}, layer: {} }}", self.x, self.y, self.layer)
	}
}

#[cfg(test)]
mod test {
	use super::ChunkPosition;

	#[test]
	fn test_relative() {
		assert_eq!(ChunkPosition::new(0, 0, 0).plus_x(), Some(ChunkPosition::new(1, 0, 0)));
		assert_eq!(ChunkPosition::new(-1, 7, 2).minus_x(), Some(ChunkPosition::new(-2, 7, 2)));
		assert_eq!(ChunkPosition::new(4, -1, -3).plus_y(), Some(ChunkPosition::new(4, 0, -3)));

		assert_eq!(ChunkPosition::new(i32::MAX, 0, 0).plus_x(), None);
		assert_eq!(ChunkPosition::new(0, i32::MIN, 0).minus_y(), None);
	}

	#[test]
	fn test_layer_distinguishes() {
		assert_ne!(ChunkPosition::new(3, 4, 0), ChunkPosition::new(3, 4, 1));
		assert_eq!(ChunkPosition::new(3, 4, -1).layer(), -1);
	}
}
