//! Error types shared by every fallible storage operation.

use std::collections::TryReserveError;
use thiserror::Error;

/// Recoverable failures. Misuse of the map or table contracts is not reported here,
/// it panics instead.
#[derive(Debug, Error)]
pub enum StorageError {
	#[error("allocation failed: {0}")]
	Alloc(#[from] TryReserveError),

	#[error("palette is full (capacity: {capacity})")]
	PaletteFull { capacity: usize },

	#[error("generation task ended without producing a chunk")]
	WorkerLost,

	#[error("invalid configuration: {0}")]
	Config(#[from] serde_json::Error),
}

/// Allocates a zeroed boxed slice, reporting allocation failure instead of aborting.
pub(crate) fn try_zeroed<T>(len: usize) -> Result<Box<[T]>, StorageError> where T: Copy + Default {
	let mut buffer = Vec::new();
	buffer.try_reserve_exact(len)?;
	buffer.resize(len, T::default());

	Ok(buffer.into_boxed_slice())
}
