//! The spatial chunk map.
//!
//! An open-addressing hash map in the style of SwissTable, specialized for a read-heavy
//! workload. Slots are organized into groups of 32; each group keeps one tag byte per slot next
//! to the owned key/value pairs, so a lookup compares all 32 tags of a group in a single
//! lane-wide operation and only touches the pairs whose tags matched.
//!
//! A key's hash picks its home group (`(hash >> 7) % groups`) and its tag
//! (`(hash & 0x7F) | 0x80`). Entries that do not fit in their home group are placed in the
//! following groups, and every group they pass over counts them in its overflow counter. A
//! lookup stops at the first group that does not contain the key and has no overflow.
//!
//! The map does no locking of its own. Callers must serialize access, either by owning it from
//! a single thread or by wrapping it in a lock as `World` does.
//!
//! ### Contract
//! Inserting a key that is already present, or erasing a key that is not, is a logic error in
//! the caller and panics.

use crate::chunk::Chunk;
use crate::config::MapConfig;
use crate::error::StorageError;
use crate::position::ChunkPosition;
use log::debug;
use rustc_hash::FxHasher;
use std::fmt::Debug;
use std::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};

mod group;
mod scan;

pub use self::group::GROUP_SLOTS;
use self::group::Group;

pub type FxBuildHasher = BuildHasherDefault<FxHasher>;

/// Map from chunk positions to the loaded chunks.
pub type ChunkMap = GroupMap<ChunkPosition, Chunk>;

fn tag(hash: u64) -> u8 {
	(hash & 0x7F) as u8 | 0x80
}

/// Largest number of entries `groups` groups may hold: 75% of the slots.
fn max_len(groups: usize) -> usize {
	groups * GROUP_SLOTS / 4 * 3
}

pub struct GroupMap<K, V, S = FxBuildHasher> {
	groups: Box<[Group<K, V>]>,
	len: usize,
	rehashes: usize,
	hasher: S
}

impl<K, V> GroupMap<K, V, FxBuildHasher> where K: Hash + Eq + Debug {
	/// Creates an empty map. No memory is allocated until the first insertion.
	pub fn new() -> Self {
		GroupMap::with_hasher(FxBuildHasher::default())
	}

	/// Creates a map with room for `groups` groups of 32 slots.
	pub fn with_groups(groups: usize) -> Result<Self, StorageError> {
		let mut map = Self::new();
		map.groups = allocate(groups)?;

		Ok(map)
	}

	pub fn from_config(config: &MapConfig) -> Result<Self, StorageError> {
		Self::with_groups(config.initial_groups)
	}
}

impl<K, V> Default for GroupMap<K, V, FxBuildHasher> where K: Hash + Eq + Debug {
	fn default() -> Self {
		Self::new()
	}
}

impl<K, V, S> GroupMap<K, V, S> where K: Hash + Eq + Debug, S: BuildHasher {
	pub fn with_hasher(hasher: S) -> Self {
		GroupMap {
			groups: Vec::new().into_boxed_slice(),
			len: 0,
			rehashes: 0,
			hasher
		}
	}

	fn hash(&self, key: &K) -> u64 {
		hash_with(&self.hasher, key)
	}

	fn home(&self, hash: u64) -> usize {
		home(hash, self.groups.len())
	}

	/// Returns the group and slot holding `key`.
	fn locate(&self, key: &K) -> Option<(usize, usize)> {
		if self.groups.is_empty() {
			return None;
		}

		let hash = self.hash(key);
		let tag = tag(hash);
		let mut index = self.home(hash);

		for _ in 0..self.groups.len() {
			let group = &self.groups[index];

			for slot in group.matches(tag) {
				if let Some(&(ref candidate, _)) = group.get(slot) {
					if candidate == key {
						return Some((index, slot));
					}
				}
			}

			if group.overflow() == 0 {
				return None;
			}

			index = (index + 1) % self.groups.len();
		}

		None
	}

	pub fn find(&self, key: &K) -> Option<&V> {
		let (group, slot) = self.locate(key)?;

		self.groups[group].get(slot).map(|pair| &pair.1)
	}

	pub fn find_mut(&mut self, key: &K) -> Option<&mut V> {
		let (group, slot) = self.locate(key)?;

		self.groups[group].get_mut(slot).map(|pair| &mut pair.1)
	}

	pub fn contains(&self, key: &K) -> bool {
		self.locate(key).is_some()
	}

	/// Inserts a new entry, growing the map first if it would exceed its load factor.
	///
	/// ### Panics
	/// If `key` is already present.
	pub fn insert(&mut self, key: K, value: V) -> Result<(), StorageError> {
		if self.contains(&key) {
			panic!("key {:?} inserted into the map twice", key);
		}

		if self.len + 1 > max_len(self.groups.len()) {
			self.grow(self.len + 1)?;
		}

		let hash = self.hash(&key);
		place(&mut self.groups, hash, Box::new((key, value)));
		self.len += 1;

		Ok(())
	}

	/// Removes an entry and returns its value.
	///
	/// ### Panics
	/// If `key` is not present.
	pub fn erase(&mut self, key: &K) -> V {
		let (group, slot) = match self.locate(key) {
			Some(location) => location,
			None => panic!("key {:?} erased from the map but not present", key)
		};

		let mut index = self.home(self.hash(key));

		while index != group {
			self.groups[index].remove_overflow();
			index = (index + 1) % self.groups.len();
		}

		let pair = self.groups[group].take(slot).expect("matching tag without a stored pair");
		self.len -= 1;

		pair.1
	}

	/// Rehashes every entry into the smallest group array that keeps `required` entries within
	/// the load factor. The new array is allocated before any entry moves, so a failure leaves
	/// the map intact.
	fn grow(&mut self, required: usize) -> Result<(), StorageError> {
		let previous = self.groups.len();
		let per_group = max_len(1);
		let count = (required + per_group - 1) / per_group;

		let mut groups = allocate(count)?;

		for group in self.groups.iter_mut() {
			for pair in group.drain() {
				place(&mut groups, hash_with(&self.hasher, &pair.0), pair);
			}
		}

		self.groups = groups;

		if previous != 0 {
			self.rehashes += 1;
			debug!("rehashed {} entries from {} to {} groups", self.len, previous, count);
		}

		Ok(())
	}

	/// Removes every entry, keeping the allocated groups.
	pub fn drain(&mut self) -> Vec<(K, V)> {
		let mut entries = Vec::with_capacity(self.len);

		for group in self.groups.iter_mut() {
			entries.extend(group.drain().map(|pair| *pair));
		}

		self.len = 0;

		entries
	}

	pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
		self.groups.iter().flat_map(|group| group.iter()).map(|pair| (&pair.0, &pair.1))
	}

	pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut V)> {
		self.groups.iter_mut().flat_map(|group| group.iter_mut()).map(|pair| (&pair.0, &mut pair.1))
	}

	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Total number of slots, occupied or not.
	pub fn capacity(&self) -> usize {
		self.groups.len() * GROUP_SLOTS
	}

	pub fn group_count(&self) -> usize {
		self.groups.len()
	}

	/// Number of times the map has rehashed its entries into a larger group array.
	pub fn rehash_count(&self) -> usize {
		self.rehashes
	}
}

fn hash_with<K, S>(hasher: &S, key: &K) -> u64 where K: Hash, S: BuildHasher {
	let mut state = hasher.build_hasher();
	key.hash(&mut state);

	state.finish()
}

fn home(hash: u64, groups: usize) -> usize {
	((hash >> 7) % groups as u64) as usize
}

/// Stores `pair` in the first empty slot at or after its home group.
/// The caller guarantees that the groups are below their load factor, so a slot always exists.
fn place<K, V>(groups: &mut [Group<K, V>], hash: u64, pair: Box<(K, V)>) {
	let mut index = home(hash, groups.len());

	loop {
		let group = &mut groups[index];

		if let Some(slot) = group.empty_slots().lowest() {
			group.put(slot, tag(hash), pair);
			return;
		}

		group.add_overflow();
		index = (index + 1) % groups.len();
	}
}

fn allocate<K, V>(count: usize) -> Result<Box<[Group<K, V>]>, StorageError> {
	let mut groups = Vec::new();
	groups.try_reserve_exact(count)?;

	for _ in 0..count {
		groups.push(Group::new());
	}

	Ok(groups.into_boxed_slice())
}
