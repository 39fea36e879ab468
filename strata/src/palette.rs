use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use std::fmt::Debug;
use std::hash::Hash;

/// Maximum number of distinct entries a chunk palette can address.
pub const PALETTE_CAPACITY: usize = 65536;

pub trait Target: Eq + Hash + Clone + Debug {}
impl<T> Target for T where T: Eq + Hash + Clone + Debug {}

/// An insertion-ordered list of distinct targets, with a reverse lookup from target to index.
/// Entries are never reordered, so an index stays valid for the lifetime of the palette.
#[derive(Debug, Clone)]
pub struct Palette<B> where B: Target {
	entries: Vec<B>,
	reverse: FxHashMap<B, u16>
}

impl<B> Palette<B> where B: Target {
	pub fn new(default: B) -> Self {
		let mut reverse = FxHashMap::default();
		reverse.insert(default.clone(), 0);

		Palette { entries: vec![default], reverse }
	}

	/// Returns the index of `target`, appending it if it is not yet present.
	/// If the palette is full, the target is handed back.
	pub fn try_insert(&mut self, target: B) -> Result<u16, B> {
		let next = self.entries.len();

		match self.reverse.entry(target) {
			Entry::Occupied(occupied) => Ok(*occupied.get()),
			Entry::Vacant(vacant) => {
				if next >= PALETTE_CAPACITY {
					return Err(vacant.into_key());
				}

				self.entries.push(vacant.key().clone());
				vacant.insert(next as u16);

				Ok(next as u16)
			}
		}
	}

	pub fn reverse_lookup(&self, target: &B) -> Option<u16> {
		self.reverse.get(target).copied()
	}

	pub fn entries(&self) -> &[B] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Always false: a palette holds at least its default entry.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
