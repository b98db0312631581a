//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Behavior switches held by a [`Registry`](crate::Registry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
	/// Keep every chain frame in failure stacks instead of trimming at `ssfi`.
	pub include_stack: bool,
	/// Allow failures to request a diff.
	pub show_diff: bool,
	/// Rendering length at which `obj_display` collapses values; `0` disables.
	pub truncate_threshold: usize,
	/// Reject reads of unknown members.
	pub use_proxy: bool,
	/// Member names that never trigger the unknown-member check.
	pub proxy_excluded_keys: Vec<String>,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			include_stack: false,
			show_diff: true,
			truncate_threshold: 40,
			use_proxy: true,
			proxy_excluded_keys: ["then", "catch", "inspect", "toJSON"]
				.map(String::from)
				.to_vec(),
		}
	}
}

impl Config {
	pub fn is_excluded(&self, name: &str) -> bool {
		self.proxy_excluded_keys.iter().any(|key| key == name)
	}
}
