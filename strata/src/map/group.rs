use crate::map::scan::{self, BitMask};

/// Number of slots in a group.
pub const GROUP_SLOTS: usize = 32;

/// Tag marking an empty slot. Occupied slots always have the high bit set.
pub const EMPTY: u8 = 0;

/// A fixed-size bucket of the map: parallel arrays of tag bytes and owned key/value pairs.
pub struct Group<K, V> {
	tags: [u8; GROUP_SLOTS],
	slots: [Option<Box<(K, V)>>; GROUP_SLOTS],
	/// Number of entries that probed past this group because it was full when they were placed.
	overflow: u32
}

impl<K, V> Group<K, V> {
	pub fn new() -> Self {
		Group {
			tags: [EMPTY; GROUP_SLOTS],
			slots: Default::default(),
			overflow: 0
		}
	}

	pub fn matches(&self, tag: u8) -> BitMask {
		scan::match_byte(&self.tags, tag)
	}

	pub fn empty_slots(&self) -> BitMask {
		scan::match_byte(&self.tags, EMPTY)
	}

	pub fn get(&self, slot: usize) -> Option<&(K, V)> {
		self.slots[slot].as_deref()
	}

	pub fn get_mut(&mut self, slot: usize) -> Option<&mut (K, V)> {
		self.slots[slot].as_deref_mut()
	}

	pub fn put(&mut self, slot: usize, tag: u8, pair: Box<(K, V)>) {
		debug_assert!(tag & 0x80 != 0, "occupied tags must have the high bit set");
		debug_assert!(self.tags[slot] == EMPTY, "slot {} is already occupied", slot);

		self.tags[slot] = tag;
		self.slots[slot] = Some(pair);
	}

	/// Empties the slot, returning the pair that was stored in it.
	pub fn take(&mut self, slot: usize) -> Option<Box<(K, V)>> {
		self.tags[slot] = EMPTY;
		self.slots[slot].take()
	}

	pub fn overflow(&self) -> u32 {
		self.overflow
	}

	pub fn add_overflow(&mut self) {
		self.overflow += 1;
	}

	pub fn remove_overflow(&mut self) {
		debug_assert!(self.overflow > 0, "overflow count underflow");
		self.overflow -= 1;
	}

	pub fn iter(&self) -> impl Iterator<Item = &(K, V)> {
		self.slots.iter().filter_map(|slot| slot.as_deref())
	}

	pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut (K, V)> {
		self.slots.iter_mut().filter_map(|slot| slot.as_deref_mut())
	}

	/// Moves every pair out of the group, leaving it empty.
	pub fn drain(&mut self) -> impl Iterator<Item = Box<(K, V)>> + '_ {
		self.tags = [EMPTY; GROUP_SLOTS];
		self.overflow = 0;

		self.slots.iter_mut().filter_map(|slot| slot.take())
	}
}
