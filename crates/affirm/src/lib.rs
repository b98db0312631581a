//! Extensible fluent assertions.
//!
//! [`Affirm`] is the composition root: it builds a [`Registry`] with the
//! configured defaults, the [language chains](language) and every plugin
//! submitted with `inventory::submit!` as a [`PluginDef`].
//!
//! ```ignore
//! let affirm = Affirm::new();
//! affirm.use_plugin(&my_vocabulary());
//! affirm.expect(3).prop("to")?.prop("be")?.method("equal", &[3.into()])?;
//! ```

use std::path::Path;
use std::sync::Arc;

pub use affirm_registry::{
	Access, Assertion, AssertionFailure, Behavior, ChainError, Config, EventKind, Fallback, Flagged, InvalidUsage,
	MessageArgs, Plugin, PluginDef, Registry, StepResult, Utils, Value,
};
use affirm_registry::static_plugins;
use tracing::debug;

pub mod config;
pub mod language;

/// Handle on a fully set up registry.
#[derive(Clone, Debug)]
pub struct Affirm {
	registry: Arc<Registry>,
}

impl Default for Affirm {
	fn default() -> Self {
		Self::new()
	}
}

impl Affirm {
	/// Default configuration with every static plugin in use.
	pub fn new() -> Self {
		Self::with_config(Config::default())
	}

	pub fn with_config(config: Config) -> Self {
		let registry = Arc::new(Registry::new(config));
		let mut count = 0;
		for def in static_plugins() {
			if registry.use_plugin(&Plugin::from_def(def)) {
				count += 1;
			}
		}
		debug!(plugins = count, "static plugins in use");
		Self { registry }
	}

	/// Like [`Affirm::with_config`] with the configuration read from a TOML file.
	pub fn from_config_file(path: impl AsRef<Path>) -> config::Result<Self> {
		Ok(Self::with_config(config::load_config(path)?))
	}

	pub fn expect(&self, subject: impl Into<Value>) -> Assertion {
		self.registry.expect(subject)
	}

	pub fn expect_with_message(&self, subject: impl Into<Value>, message: impl Into<String>) -> Assertion {
		self.registry.expect_with_message(subject, message)
	}

	/// Runs `plugin` unless it is already in use. Returns whether it ran.
	pub fn use_plugin(&self, plugin: &Plugin) -> bool {
		self.registry.use_plugin(plugin)
	}

	pub fn registry(&self) -> &Arc<Registry> {
		&self.registry
	}
}
