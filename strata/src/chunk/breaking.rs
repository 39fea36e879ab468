use crate::position::BlockIndex;
use std::slice;

/// Damage accumulated on a block that is currently being broken.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BreakProgress {
	pub position: BlockIndex,
	/// Fraction of the block that has been broken, in `[0, 1]`.
	pub progress: f32
}

/// Sparse set of blocks taking damage in a chunk. Only allocates while at least one block is
/// being broken.
#[derive(Debug, Clone, Default)]
pub struct Breaking(Option<Vec<BreakProgress>>);

impl Breaking {
	/// Records `progress` for `position`, adding an entry if the block was not being broken.
	/// Progress outside of `[0, 1]` is clamped, and NaN is treated as no progress.
	pub fn set(&mut self, position: BlockIndex, progress: f32) {
		let progress = if progress.is_nan() { 0.0 } else { progress.max(0.0).min(1.0) };
		let entries = self.0.get_or_insert_with(Vec::new);

		match entries.iter_mut().find(|entry| entry.position == position) {
			Some(entry) => entry.progress = progress,
			None => entries.push(BreakProgress { position, progress })
		}
	}

	pub fn get(&self, position: BlockIndex) -> Option<f32> {
		self.0.as_ref()?.iter().find(|entry| entry.position == position).map(|entry| entry.progress)
	}

	/// Removes the entry for `position`, returning its last progress. Frees the overlay once
	/// nothing is left in it.
	pub fn remove(&mut self, position: BlockIndex) -> Option<f32> {
		let entries = self.0.as_mut()?;
		let index = entries.iter().position(|entry| entry.position == position)?;
		let removed = entries.swap_remove(index);

		if entries.is_empty() {
			self.0 = None;
		}

		Some(removed.progress)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_none()
	}

	pub fn iter(&self) -> slice::Iter<BreakProgress> {
		self.0.as_deref().unwrap_or(&[]).iter()
	}
}
