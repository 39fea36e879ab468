//! Settings for a world session, loadable from JSON.

use crate::chunk::BlockState;
use crate::error::StorageError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MapConfig {
	/// Groups of 32 slots allocated up front. Zero defers allocation to the first insertion.
	pub initial_groups: usize
}

impl Default for MapConfig {
	fn default() -> Self {
		MapConfig { initial_groups: 1 }
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct WorldConfig {
	pub map: MapConfig,
	/// Block state every new chunk is filled with.
	pub default_state: u32
}

impl WorldConfig {
	pub fn from_json(json: &str) -> Result<Self, StorageError> {
		Ok(serde_json::from_str(json)?)
	}

	pub fn default_state(&self) -> BlockState {
		BlockState(self.default_state)
	}
}
