//! The per-chunk palette index table.
//!
//! Every block position of a chunk stores a palette index. The table keeps those indices at the
//! narrowest width that can address the current palette, widening through 2, 4, 8 and 16 bits
//! as the palette grows. Widening is irreversible.

use crate::error::{try_zeroed, StorageError};
use crate::position::{BlockIndex, CHUNK_BLOCKS};
use log::debug;
use std::fmt::{self, Debug, Display};

mod internal;

pub use self::internal::PackedWords;

/// Width of each entry in an `IndexTable`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
	Two,
	Four,
	Eight,
	Sixteen
}

impl Tier {
	/// Returns the narrowest tier able to address `states` distinct palette entries,
	/// or None if no tier is wide enough.
	pub fn for_states(states: usize) -> Option<Tier> {
		match states {
			0..=4 => Some(Tier::Two),
			5..=16 => Some(Tier::Four),
			17..=256 => Some(Tier::Eight),
			257..=65536 => Some(Tier::Sixteen),
			_ => None
		}
	}

	pub fn bits(self) -> u8 {
		match self {
			Tier::Two => 2,
			Tier::Four => 4,
			Tier::Eight => 8,
			Tier::Sixteen => 16
		}
	}

	/// Number of distinct palette indices this tier can represent.
	pub fn capacity(self) -> usize {
		1 << self.bits()
	}

	/// Size in bytes of the backing buffer for a full chunk.
	pub fn buffer_size(self) -> usize {
		CHUNK_BLOCKS * self.bits() as usize / 8
	}
}

impl Display for Tier {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}-bit", self.bits())
	}
}

/// Maps each of the 65,536 positions of a chunk to a palette index.
///
/// The tier and the buffer it owns form a single tagged variant, so the active width can never
/// disagree with the layout of the storage.
#[derive(Clone)]
pub enum IndexTable {
	Two(PackedWords<2>),
	Four(PackedWords<4>),
	Eight(Box<[u8]>),
	Sixteen(Box<[u16]>)
}

impl IndexTable {
	/// Creates a zeroed table at the 2-bit tier.
	pub fn new() -> Result<Self, StorageError> {
		Self::with_tier(Tier::Two)
	}

	/// Creates a zeroed table at the requested tier.
	pub fn with_tier(tier: Tier) -> Result<Self, StorageError> {
		Ok(match tier {
			Tier::Two => IndexTable::Two(PackedWords::new()?),
			Tier::Four => IndexTable::Four(PackedWords::new()?),
			Tier::Eight => IndexTable::Eight(try_zeroed(CHUNK_BLOCKS)?),
			Tier::Sixteen => IndexTable::Sixteen(try_zeroed(CHUNK_BLOCKS)?)
		})
	}

	pub fn tier(&self) -> Tier {
		match *self {
			IndexTable::Two(_) => Tier::Two,
			IndexTable::Four(_) => Tier::Four,
			IndexTable::Eight(_) => Tier::Eight,
			IndexTable::Sixteen(_) => Tier::Sixteen
		}
	}

	pub fn bits(&self) -> u8 {
		self.tier().bits()
	}

	/// Bytes owned on the heap by this table.
	pub fn heap_size(&self) -> usize {
		self.tier().buffer_size()
	}

	pub fn index_at(&self, position: BlockIndex) -> u16 {
		match *self {
			IndexTable::Two(ref words) => words.get(position),
			IndexTable::Four(ref words) => words.get(position),
			IndexTable::Eight(ref bytes) => bytes[position.flat() as usize] as u16,
			IndexTable::Sixteen(ref shorts) => shorts[position.flat() as usize]
		}
	}

	/// Stores `value` at `position`, replacing whatever index was there before.
	///
	/// ### Contract
	/// `value` must fit in the active tier. This is only checked in debug builds; in release
	/// builds an oversized value is truncated to the tier width.
	pub fn set_index_at(&mut self, value: u16, position: BlockIndex) {
		debug_assert!((value as usize) < self.tier().capacity(), "palette index {} does not fit in the {} tier", value, self.tier());

		match *self {
			IndexTable::Two(ref mut words) => words.set(position, value),
			IndexTable::Four(ref mut words) => words.set(position, value),
			IndexTable::Eight(ref mut bytes) => bytes[position.flat() as usize] = value as u8,
			IndexTable::Sixteen(ref mut shorts) => shorts[position.flat() as usize] = value
		}
	}

	/// Makes sure the table can hold indices for `required_unique_states` distinct palette
	/// entries, widening it if the current tier is too narrow. Never narrows the table.
	///
	/// The wider table is fully built before it replaces the current one, so on failure
	/// the table is left as it was.
	///
	/// ### Panics
	/// If `required_unique_states` exceeds 65,536, which no tier can address.
	pub fn reserve(&mut self, required_unique_states: usize) -> Result<(), StorageError> {
		let current = self.tier();

		if required_unique_states <= current.capacity() {
			return Ok(());
		}

		let target = match Tier::for_states(required_unique_states) {
			Some(target) => target,
			None => panic!("cannot address {} unique states in a chunk", required_unique_states)
		};

		let mut replacement = IndexTable::with_tier(target)?;

		for position in BlockIndex::enumerate() {
			let value = self.index_at(position);

			if value != 0 {
				replacement.set_index_at(value, position);
			}
		}

		debug!("widened index table from {} to {} for {} unique states", current, target, required_unique_states);

		*self = replacement;

		Ok(())
	}
}

impl Debug for IndexTable {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "IndexTable {{ tier: {}, heap_size: {} }}", self.tier(), self.heap_size())
	}
}

#[cfg(test)]
mod test {
	use super::{IndexTable, Tier};
	use crate::position::BlockIndex;

	fn pattern(position: BlockIndex, tier: Tier) -> u16 {
		((position.flat() as usize * 7 + 3) % tier.capacity()) as u16
	}

	#[test]
	fn test_tier_selection() {
		assert_eq!(Tier::for_states(0), Some(Tier::Two));
		assert_eq!(Tier::for_states(4), Some(Tier::Two));
		assert_eq!(Tier::for_states(5), Some(Tier::Four));
		assert_eq!(Tier::for_states(16), Some(Tier::Four));
		assert_eq!(Tier::for_states(17), Some(Tier::Eight));
		assert_eq!(Tier::for_states(256), Some(Tier::Eight));
		assert_eq!(Tier::for_states(257), Some(Tier::Sixteen));
		assert_eq!(Tier::for_states(65536), Some(Tier::Sixteen));
		assert_eq!(Tier::for_states(65537), None);
	}

	#[test]
	fn test_buffer_sizes() {
		assert_eq!(Tier::Two.buffer_size(), 16 * 1024);
		assert_eq!(Tier::Four.buffer_size(), 32 * 1024);
		assert_eq!(Tier::Eight.buffer_size(), 64 * 1024);
		assert_eq!(Tier::Sixteen.buffer_size(), 128 * 1024);
	}

	#[test]
	fn test_starts_zeroed_at_two_bits() {
		let table = IndexTable::new().unwrap();

		assert_eq!(table.tier(), Tier::Two);

		for position in BlockIndex::enumerate() {
			assert_eq!(table.index_at(position), 0);
		}
	}

	#[test]
	fn test_set_get_every_tier() {
		for &tier in &[Tier::Two, Tier::Four, Tier::Eight, Tier::Sixteen] {
			let mut table = IndexTable::with_tier(tier).unwrap();

			for position in BlockIndex::enumerate() {
				table.set_index_at(pattern(position, tier), position);
			}

			for position in BlockIndex::enumerate() {
				assert_eq!(table.index_at(position), pattern(position, tier), "{} tier mismatch at {:?}", tier, position);
			}
		}
	}

	#[test]
	fn test_overwrite_nonzero() {
		let mut table = IndexTable::new().unwrap();
		let position = BlockIndex::new(9, 200);

		table.set_index_at(1, position);
		table.set_index_at(2, position);
		assert_eq!(table.index_at(position), 2);

		table.set_index_at(3, position);
		table.set_index_at(0, position);
		assert_eq!(table.index_at(position), 0);
	}

	#[test]
	fn test_reserve_widens_and_preserves() {
		let mut table = IndexTable::new().unwrap();

		table.set_index_at(3, BlockIndex::new(0, 0));
		table.reserve(6).unwrap();

		assert_eq!(table.tier(), Tier::Four);
		assert_eq!(table.index_at(BlockIndex::new(0, 0)), 3);
	}

	#[test]
	fn test_reserve_preserves_every_position() {
		let mut table = IndexTable::new().unwrap();

		for position in BlockIndex::enumerate() {
			table.set_index_at(pattern(position, Tier::Two), position);
		}

		for &(states, tier) in &[(16, Tier::Four), (200, Tier::Eight), (4000, Tier::Sixteen)] {
			table.reserve(states).unwrap();
			assert_eq!(table.tier(), tier);

			for position in BlockIndex::enumerate() {
				assert_eq!(table.index_at(position), pattern(position, Tier::Two), "value lost widening to {}", tier);
			}
		}
	}

	#[test]
	fn test_reserve_never_narrows() {
		let mut table = IndexTable::new().unwrap();

		table.reserve(100).unwrap();
		assert_eq!(table.tier(), Tier::Eight);

		table.reserve(3).unwrap();
		assert_eq!(table.tier(), Tier::Eight);

		table.reserve(256).unwrap();
		assert_eq!(table.tier(), Tier::Eight);
	}

	#[test]
	fn test_reserve_jumps_tiers() {
		let mut table = IndexTable::new().unwrap();

		table.set_index_at(2, BlockIndex::new(255, 255));
		table.reserve(300).unwrap();

		assert_eq!(table.tier(), Tier::Sixteen);
		assert_eq!(table.heap_size(), 128 * 1024);
		assert_eq!(table.index_at(BlockIndex::new(255, 255)), 2);

		table.set_index_at(65535, BlockIndex::new(1, 1));
		assert_eq!(table.index_at(BlockIndex::new(1, 1)), 65535);
	}

	#[test]
	#[should_panic]
	#[cfg(debug_assertions)]
	fn test_set_index_too_wide() {
		let mut table = IndexTable::new().unwrap();

		table.set_index_at(4, BlockIndex::new(0, 0));
	}

	#[test]
	fn test_debug_is_short() {
		let table = IndexTable::with_tier(Tier::Eight).unwrap();

		assert_eq!(format!("{:?}", table), "IndexTable { tier: 8-bit, heap_size: 65536 }");
	}

	#[test]
	#[should_panic]
	fn test_reserve_beyond_chunk() {
		let mut table = IndexTable::new().unwrap();

		let _ = table.reserve(65537);
	}
}
