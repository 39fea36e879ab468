mod block;
mod chunk;

/// World-space block positions, complementing the chunk-local `BlockIndex`.
///
/// A chunk covers a 256 by 256 area of blocks on a single layer, so a global block coordinate
/// splits into a chunk coordinate (the coordinate shifted right by 8) and a local coordinate
/// (the low 8 bits).
mod global;

pub use self::block::{BlockIndex, Enumerate, CHUNK_BLOCKS};
pub use self::chunk::ChunkPosition;
pub use self::global::GlobalBlockPosition;
