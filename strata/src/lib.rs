#![forbid(unsafe_code)]

//! # `strata`: chunk storage for a layered tile world
//!
//! Stores the voxel contents of a world made of 256x256 chunks stacked in layers, and answers
//! two questions quickly:
//!
//!  * Which chunk occupies a given chunk position? See `map`.
//!  * Which block state occupies a given position inside a chunk? See `chunk` and `packed`.
//!
//! # Architecture
//!
//! Chunks are kept in a `ChunkMap`, an open-addressing hash map built from 32-slot groups whose
//! tag bytes are compared in parallel. The map is read far more often than it is written, and
//! does no locking of its own.
//!
//! Each chunk holds a palette of the distinct block states present in it, and an index table
//! storing a palette index for each of its 65,536 blocks. The table uses the narrowest of
//! 2, 4, 8 or 16 bits per entry that can address the palette, and widens as the palette grows.
//! Both live behind the chunk's read-write lock.
//!
//! `World` ties these together behind a lock for the whole map, and hands chunk generation
//! to the rayon thread pool.

// Efficient and fine-grained spin locks
extern crate spin;

// Fast hashing of chunk positions and palette entries
extern crate rustc_hash;

// Worker pool used for chunk generation
extern crate rayon;

pub mod chunk;
pub mod config;
pub mod error;
pub mod map;
pub mod packed;
pub mod palette;
pub mod position;
pub mod world;

pub use crate::chunk::{BlockState, Chunk};
pub use crate::error::StorageError;
pub use crate::map::ChunkMap;
pub use crate::world::World;
