use crate::error::StorageError;
use log::warn;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver};

/// The eventual result of work submitted to the worker pool.
///
/// A pending result is consumed exactly once, either by waiting for it or by discarding it.
/// Discarding does not cancel the work; its result is dropped when it completes.
#[must_use = "a pending result should be waited on or explicitly discarded"]
pub struct Pending<T> {
	receiver: Receiver<Result<T, StorageError>>
}

impl<T> Pending<T> where T: Send + 'static {
	/// Submits `work` to the global rayon pool.
	pub fn spawn<F>(work: F) -> Self where F: FnOnce() -> Result<T, StorageError> + Send + 'static {
		let (sender, receiver) = mpsc::sync_channel(1);

		rayon::spawn(move || {
			match panic::catch_unwind(AssertUnwindSafe(work)) {
				// A send error means the result was discarded.
				Ok(result) => { let _ = sender.send(result); },
				Err(_) => warn!("worker task panicked before producing a result")
			}
		});

		Pending { receiver }
	}

	/// Blocks the calling thread until the result is produced.
	pub fn wait(self) -> Result<T, StorageError> {
		match self.receiver.recv() {
			Ok(result) => result,
			Err(_) => Err(StorageError::WorkerLost)
		}
	}

	/// Releases interest in the result without waiting for it.
	pub fn discard(self) {}
}
