use std::fmt::{Debug, Display, Formatter, Result};

/// Number of block positions in a chunk.
pub const CHUNK_BLOCKS: usize = 65536;

/// A block position inside a 256x256 chunk, stored as the flat index `x | (y << 8)`.
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct BlockIndex(u16);

impl BlockIndex {
	pub fn new(x: u8, y: u8) -> Self {
		BlockIndex((x as u16) | ((y as u16) << 8))
	}

	/// Creates a BlockIndex from a flat index. Every u16 is a valid position.
	pub fn from_flat(flat: u16) -> Self {
		BlockIndex(flat)
	}

	/// Returns the index represented as `x | (y << 8)`.
	pub fn flat(&self) -> u16 {
		self.0
	}

	pub fn x(&self) -> u8 {
		(self.0 & 0xFF) as u8
	}

	pub fn y(&self) -> u8 {
		(self.0 >> 8) as u8
	}

	/// Iterates over every position of a chunk in flat order.
	pub fn enumerate() -> Enumerate {
		Enumerate { next: 0 }
	}
}

impl From<u16> for BlockIndex {
	fn from(flat: u16) -> Self {
		BlockIndex::from_flat(flat)
	}
}

impl From<BlockIndex> for u16 {
	fn from(index: BlockIndex) -> u16 {
		index.flat()
	}
}

impl Display for BlockIndex {
	fn fmt(&self, f: &mut Formatter) -> Result {
		write!(f, "({}, {})", self.x(), self.y())
	}
}

impl Debug for BlockIndex {
	fn fmt(&self, f: &mut Formatter) -> Result {
		write!(f, "BlockIndex {{ x: {}, y: {} }}", self.x(), self.y())
	}
}

pub struct Enumerate {
	next: usize
}

impl Iterator for Enumerate {
	type Item = BlockIndex;

	fn next(&mut self) -> Option<BlockIndex> {
		if self.next >= CHUNK_BLOCKS {
			return None;
		}

		let index = BlockIndex(self.next as u16);
		self.next += 1;

		Some(index)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = CHUNK_BLOCKS - self.next;

		(remaining, Some(remaining))
	}
}

impl ExactSizeIterator for Enumerate {}
