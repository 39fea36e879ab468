use crate::position::{BlockIndex, ChunkPosition};
use std::fmt::{Display, Formatter, Result};

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub struct GlobalBlockPosition {
	x: i64,
	y: i64,
	layer: i8
}

impl GlobalBlockPosition {
	pub fn new(x: i64, y: i64, layer: i8) -> Self {
		GlobalBlockPosition { x, y, layer }
	}

	/// Rebuilds a global position from a chunk and a position inside it.
	pub fn from_parts(chunk: ChunkPosition, local: BlockIndex) -> Self {
		GlobalBlockPosition {
			x: ((chunk.x() as i64) << 8) | local.x() as i64,
			y: ((chunk.y() as i64) << 8) | local.y() as i64,
			layer: chunk.layer()
		}
	}

	/// Returns the chunk containing this block.
	/// ### Out of bounds behavior
	/// Chunk coordinates outside of the i32 range are truncated.
	pub fn chunk(&self) -> ChunkPosition {
		ChunkPosition::new((self.x >> 8) as i32, (self.y >> 8) as i32, self.layer)
	}

	pub fn local(&self) -> BlockIndex {
		BlockIndex::new((self.x & 255) as u8, (self.y & 255) as u8)
	}

	pub fn x(&self) -> i64 {
		self.x
	}

	pub fn y(&self) -> i64 {
		self.y
	}

	pub fn layer(&self) -> i8 {
		self.layer
	}
}

impl Display for GlobalBlockPosition {
	fn fmt(&self, f: &mut Formatter) -> Result {
		write!(f, "({}, {}, layer {})", self.x, self.y, self.layer)
	}
}

#[cfg(test)]
mod test {
	use crate::position::{BlockIndex, ChunkPosition, GlobalBlockPosition};

	#[test]
	fn test_split() {
		let position = GlobalBlockPosition::new(300, 5, 2);

		assert_eq!(position.chunk(), ChunkPosition::new(1, 0, 2));
		assert_eq!(position.local(), BlockIndex::new(44, 5));
	}

	#[test]
	fn test_split_negative() {
		let position = GlobalBlockPosition::new(-1, -256, 0);

		assert_eq!(position.chunk(), ChunkPosition::new(-1, -1, 0));
		assert_eq!(position.local(), BlockIndex::new(255, 0));

		let position = GlobalBlockPosition::new(-257, -513, -4);

		assert_eq!(position.chunk(), ChunkPosition::new(-2, -3, -4));
		assert_eq!(position.local(), BlockIndex::new(255, 255));
	}

	#[test]
	fn test_parts_roundtrip() {
		for &(x, y) in &[(0i64, 0i64), (255, 256), (-1, -1), (-70000, 123456), (1 << 36, -(1 << 36))] {
			let position = GlobalBlockPosition::new(x, y, 3);

			assert_eq!(GlobalBlockPosition::from_parts(position.chunk(), position.local()), position);
		}
	}
}
