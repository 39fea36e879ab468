//! Chunks: a palette of block states bound to the index table that references it.

use crate::error::StorageError;
use crate::packed::{IndexTable, Tier};
use crate::palette::{Palette, PALETTE_CAPACITY};
use crate::position::{BlockIndex, ChunkPosition};
use spin::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::fmt::{self, Debug, Display};

mod breaking;

pub use self::breaking::{BreakProgress, Breaking};

/// Opaque identifier of a distinct block configuration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Default)]
pub struct BlockState(pub u32);

impl Display for BlockState {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// The lock-protected contents of a chunk.
///
/// The palette and the index table are only reachable through this type, so every change to
/// one is made while holding the same write guard as the matching change to the other.
#[derive(Clone)]
pub struct ChunkData {
	palette: Palette<BlockState>,
	table: IndexTable,
	breaking: Breaking
}

impl ChunkData {
	fn new(default: BlockState) -> Result<Self, StorageError> {
		Ok(ChunkData {
			palette: Palette::new(default),
			table: IndexTable::new()?,
			breaking: Breaking::default()
		})
	}

	pub fn block_state_index_at(&self, position: BlockIndex) -> u16 {
		self.table.index_at(position)
	}

	/// ### Panics
	/// If `palette_index` does not refer to an existing palette entry.
	pub fn set_block_state_index_at(&mut self, palette_index: u16, position: BlockIndex) {
		assert!(
			(palette_index as usize) < self.palette.len(),
			"palette index {} out of range for a palette of {} entries", palette_index, self.palette.len()
		);

		self.table.set_index_at(palette_index, position);
	}

	/// Widens the index table so that it can address `required_unique_states` palette entries.
	pub fn reserve_palette(&mut self, required_unique_states: usize) -> Result<(), StorageError> {
		self.table.reserve(required_unique_states)
	}

	/// Returns the palette index of `state`, appending it to the palette first if needed.
	/// The table is widened before the palette grows, so a failed allocation changes nothing.
	pub fn palette_index_for(&mut self, state: BlockState) -> Result<u16, StorageError> {
		if let Some(index) = self.palette.reverse_lookup(&state) {
			return Ok(index);
		}

		if self.palette.len() >= PALETTE_CAPACITY {
			return Err(StorageError::PaletteFull { capacity: PALETTE_CAPACITY });
		}

		self.table.reserve(self.palette.len() + 1)?;

		self.palette.try_insert(state).map_err(|_| StorageError::PaletteFull { capacity: PALETTE_CAPACITY })
	}

	pub fn block_state_at(&self, position: BlockIndex) -> BlockState {
		self.palette.entries()[self.table.index_at(position) as usize]
	}

	/// Sets the block at `position` to `state`, growing the palette when needed.
	/// Returns the palette index now stored at `position`.
	pub fn set_block_state(&mut self, position: BlockIndex, state: BlockState) -> Result<u16, StorageError> {
		let index = self.palette_index_for(state)?;
		self.table.set_index_at(index, position);

		Ok(index)
	}

	pub fn palette(&self) -> &Palette<BlockState> {
		&self.palette
	}

	pub fn tier(&self) -> Tier {
		self.table.tier()
	}

	pub fn breaking(&self) -> &Breaking {
		&self.breaking
	}

	pub fn breaking_mut(&mut self) -> &mut Breaking {
		&mut self.breaking
	}
}

/// A 256x256 area of blocks on one layer of the world.
pub struct Chunk {
	position: ChunkPosition,
	data: RwLock<ChunkData>
}

impl Chunk {
	/// Creates a chunk filled with `default`, which becomes palette index 0.
	pub fn new(position: ChunkPosition, default: BlockState) -> Result<Self, StorageError> {
		Ok(Chunk {
			position,
			data: RwLock::new(ChunkData::new(default)?)
		})
	}

	pub fn position(&self) -> ChunkPosition {
		self.position
	}

	// Locking

	pub fn read(&self) -> RwLockReadGuard<ChunkData> {
		self.data.read()
	}

	pub fn write(&self) -> RwLockWriteGuard<ChunkData> {
		self.data.write()
	}

	pub fn try_read(&self) -> Option<RwLockReadGuard<ChunkData>> {
		self.data.try_read()
	}

	pub fn try_write(&self) -> Option<RwLockWriteGuard<ChunkData>> {
		self.data.try_write()
	}

	// Single operations. Each holds the lock only for its own duration;
	// use `read` or `write` to group several of them.

	pub fn block_state_index_at(&self, position: BlockIndex) -> u16 {
		self.read().block_state_index_at(position)
	}

	pub fn set_block_state_index_at(&self, palette_index: u16, position: BlockIndex) {
		self.write().set_block_state_index_at(palette_index, position)
	}

	pub fn reserve_palette(&self, required_unique_states: usize) -> Result<(), StorageError> {
		self.write().reserve_palette(required_unique_states)
	}

	pub fn block_state_at(&self, position: BlockIndex) -> BlockState {
		self.read().block_state_at(position)
	}

	pub fn set_block_state(&self, position: BlockIndex, state: BlockState) -> Result<u16, StorageError> {
		self.write().set_block_state(position, state)
	}

	pub fn palette_len(&self) -> usize {
		self.read().palette().len()
	}

	pub fn tier(&self) -> Tier {
		self.read().tier()
	}

	// Breaking overlay

	pub fn set_breaking_progress(&self, position: BlockIndex, progress: f32) {
		self.write().breaking_mut().set(position, progress)
	}

	pub fn breaking_progress(&self, position: BlockIndex) -> Option<f32> {
		self.read().breaking().get(position)
	}

	/// Removes `position` from the overlay once it is broken or no longer being broken.
	pub fn stop_breaking(&self, position: BlockIndex) -> Option<f32> {
		self.write().breaking_mut().remove(position)
	}

	pub fn is_breaking(&self) -> bool {
		!self.read().breaking().is_empty()
	}
}

impl Debug for ChunkData {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "ChunkData {{ palette: {}, tier: {}, breaking: {} }}", self.palette.len(), self.table.tier(), self.breaking.iter().count())
	}
}

impl Debug for Chunk {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self.try_read() {
			Some(data) => write!(f, "Chunk {{ position: {:?}, palette: {}, tier: {} }}", self.position, data.palette().len(), data.tier()),
			None => write!(f, "Chunk {{ position: {:?}, <locked> }}", self.position)
		}
	}
}
