//! Lane-wide comparison of a group's tag bytes.
//!
//! The 32 tags of a group are read as four little-endian words and compared eight lanes at a
//! time, producing a 32-bit mask with bit `i` set when lane `i` matches.

use crate::map::group::GROUP_SLOTS;

const LANES: usize = 8;
const LOW_BITS: u64 = 0x0101_0101_0101_0101;
const LOW_SEVEN: u64 = 0x7F7F_7F7F_7F7F_7F7F;
const GATHER: u64 = 0x0102_0408_1020_4080;

/// Set of matching slots in a group, iterated lowest first.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BitMask(pub u32);

impl BitMask {
	pub fn lowest(self) -> Option<usize> {
		if self.0 == 0 {
			None
		} else {
			Some(self.0.trailing_zeros() as usize)
		}
	}
}

impl Iterator for BitMask {
	type Item = usize;

	fn next(&mut self) -> Option<usize> {
		let lowest = self.lowest()?;
		self.0 &= self.0 - 1;

		Some(lowest)
	}
}

/// Sets the high bit of every zero byte in `word`, and nothing else.
/// Unlike the usual `(x - 0x01..) & !x & 0x80..` trick this never reports a false positive.
fn zero_bytes(word: u64) -> u64 {
	!(((word & LOW_SEVEN).wrapping_add(LOW_SEVEN)) | word | LOW_SEVEN)
}

/// Packs the high bit of each byte into the low 8 bits, byte 0 becoming bit 0.
fn gather_high_bits(word: u64) -> u32 {
	((word >> 7).wrapping_mul(GATHER) >> 56) as u32
}

/// Returns the lanes of `tags` equal to `byte`.
pub fn match_byte(tags: &[u8; GROUP_SLOTS], byte: u8) -> BitMask {
	let pattern = LOW_BITS.wrapping_mul(byte as u64);
	let mut mask = 0;

	for (index, lanes) in tags.chunks(LANES).enumerate() {
		let mut bytes = [0; LANES];
		bytes.copy_from_slice(lanes);

		let word = u64::from_le_bytes(bytes) ^ pattern;
		mask |= gather_high_bits(zero_bytes(word)) << (index * LANES);
	}

	BitMask(mask)
}

#[cfg(test)]
mod test {
	use super::{match_byte, BitMask};
	use crate::map::group::GROUP_SLOTS;

	fn match_byte_scalar(tags: &[u8; GROUP_SLOTS], byte: u8) -> BitMask {
		let mut mask = 0;

		for (index, &tag) in tags.iter().enumerate() {
			if tag == byte {
				mask |= 1 << index;
			}
		}

		BitMask(mask)
	}

	#[test]
	fn test_matches_scalar() {
		let mut tags = [0u8; GROUP_SLOTS];

		for (index, tag) in tags.iter_mut().enumerate() {
			*tag = match index % 5 {
				0 => 0,
				1 => 0x80,
				2 => 0x81,
				3 => 0xFF,
				_ => 0x80 | (index as u8)
			};
		}

		for byte in 0..=255u8 {
			assert_eq!(match_byte(&tags, byte), match_byte_scalar(&tags, byte), "Mismatch scanning for {:#x}", byte);
		}
	}

	#[test]
	fn test_adjacent_lanes() {
		// A match directly followed by a byte one greater must not leak into the next lane.
		let mut tags = [0x81u8; GROUP_SLOTS];
		tags[7] = 0x80;
		tags[8] = 0x80;
		tags[31] = 0x80;

		assert_eq!(match_byte(&tags, 0x80), BitMask((1 << 7) | (1 << 8) | (1 << 31)));
		assert_eq!(match_byte(&tags, 0), BitMask(0));
	}

	#[test]
	fn test_iteration() {
		let lanes: Vec<usize> = BitMask(0b1001_0000_0000_0000_0000_0000_0000_0101).collect();

		assert_eq!(lanes, vec![0, 2, 28, 31]);
		assert_eq!(BitMask(0).lowest(), None);
		assert_eq!(BitMask(1 << 31).lowest(), Some(31));
	}
}
