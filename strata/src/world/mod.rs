//! The world layer: owns the chunk map behind a lock and routes world coordinates to chunks.

use crate::chunk::{BlockState, Chunk, ChunkData};
use crate::config::WorldConfig;
use crate::error::StorageError;
use crate::map::ChunkMap;
use crate::position::{ChunkPosition, GlobalBlockPosition};
use log::trace;
use spin::RwLock;

mod pending;

pub use self::pending::Pending;

pub struct World {
	chunks: RwLock<ChunkMap>,
	config: WorldConfig
}

impl World {
	pub fn new(config: WorldConfig) -> Result<Self, StorageError> {
		Ok(World {
			chunks: RwLock::new(ChunkMap::from_config(&config.map)?),
			config
		})
	}

	pub fn config(&self) -> &WorldConfig {
		&self.config
	}

	/// Makes `chunk` available at its position, returning the chunk it replaced, if any.
	pub fn load(&self, chunk: Chunk) -> Result<Option<Chunk>, StorageError> {
		let position = chunk.position();
		let mut chunks = self.chunks.write();

		let replaced = if chunks.contains(&position) {
			Some(chunks.erase(&position))
		} else {
			None
		};

		chunks.insert(position, chunk)?;
		trace!("loaded chunk {} ({} loaded)", position, chunks.len());

		Ok(replaced)
	}

	/// Loads a new chunk filled with the configured default state.
	pub fn create(&self, position: ChunkPosition) -> Result<Option<Chunk>, StorageError> {
		self.load(Chunk::new(position, self.config.default_state())?)
	}

	pub fn unload(&self, position: ChunkPosition) -> Option<Chunk> {
		let mut chunks = self.chunks.write();

		if !chunks.contains(&position) {
			return None;
		}

		let chunk = chunks.erase(&position);
		trace!("unloaded chunk {} ({} loaded)", position, chunks.len());

		Some(chunk)
	}

	/// Unloads every chunk.
	pub fn unload_all(&self) -> Vec<Chunk> {
		self.chunks.write().drain().into_iter().map(|(_, chunk)| chunk).collect()
	}

	pub fn is_loaded(&self, position: ChunkPosition) -> bool {
		self.chunks.read().contains(&position)
	}

	pub fn loaded_count(&self) -> usize {
		self.chunks.read().len()
	}

	/// Runs `f` on the chunk at `position` while holding the map's read lock.
	pub fn with_chunk<F, R>(&self, position: ChunkPosition, f: F) -> Option<R> where F: FnOnce(&Chunk) -> R {
		self.chunks.read().find(&position).map(f)
	}

	pub fn block_state_at(&self, position: GlobalBlockPosition) -> Option<BlockState> {
		let local = position.local();

		self.with_chunk(position.chunk(), |chunk| chunk.block_state_at(local))
	}

	/// Sets a block by world position. Returns false if its chunk is not loaded.
	pub fn set_block_state(&self, position: GlobalBlockPosition, state: BlockState) -> Result<bool, StorageError> {
		let local = position.local();

		match self.with_chunk(position.chunk(), |chunk| chunk.set_block_state(local, state)) {
			Some(result) => result.map(|_| true),
			None => Ok(false)
		}
	}

	/// Builds a chunk on the worker pool. The chunk starts filled with the configured default
	/// state and is handed to `fill` before being returned; it is not loaded automatically.
	pub fn generate<F>(&self, position: ChunkPosition, fill: F) -> Pending<Chunk> where F: FnOnce(&mut ChunkData) -> Result<(), StorageError> + Send + 'static {
		let default = self.config.default_state();

		Pending::spawn(move || {
			let chunk = Chunk::new(position, default)?;
			fill(&mut *chunk.write())?;

			Ok(chunk)
		})
	}
}
