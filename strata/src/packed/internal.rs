use crate::error::{try_zeroed, StorageError};
use crate::position::{BlockIndex, CHUNK_BLOCKS};

/// Sub-byte packed storage for a full chunk. `BITS` must divide 64, so an entry never
/// straddles two words.
#[derive(Debug, Clone)]
pub struct PackedWords<const BITS: usize>(Box<[u64]>);

impl<const BITS: usize> PackedWords<BITS> {
	const MASK: u64 = (1 << BITS) - 1;

	pub fn new() -> Result<Self, StorageError> {
		Ok(PackedWords(try_zeroed(CHUNK_BLOCKS * BITS / 64)?))
	}

	/// Returns the word index and the shift of the entry within that word.
	fn indices(position: BlockIndex) -> (usize, u32) {
		let bit_index = position.flat() as usize * BITS;

		(bit_index / 64, (bit_index % 64) as u32)
	}

	pub fn get(&self, position: BlockIndex) -> u16 {
		let (word, shift) = Self::indices(position);

		((self.0[word] >> shift) & Self::MASK) as u16
	}

	pub fn set(&mut self, position: BlockIndex, value: u16) {
		debug_assert!((value as u64) <= Self::MASK, "value {} does not fit in {} bits", value, BITS);

		let (word, shift) = Self::indices(position);
		let value = value as u64 & Self::MASK;

		self.0[word] = self.0[word] & !(Self::MASK << shift) | value << shift;
	}
}
