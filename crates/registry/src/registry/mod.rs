//! Chain step registry.
//!
//! # Role
//!
//! Maps member names to step entries. Each entry is an override stack of
//! [`Layer`]s: `add_*` installs a first layer, `overwrite_*` pushes a layer
//! whose behavior receives the one below it as a [`Fallback`].
//!
//! # Invariants
//!
//! - Entries keep registration order; re-adding a name keeps its position.
//! - No lock is held while a behavior, factory, listener or plugin runs, so
//!   all of them may call back into the registry.
//! - Overwrites do not emit events.

use std::fmt;
use std::sync::Arc;

use affirm_value::{Function, Value};
use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::assertion::Assertion;
use crate::config::Config;
use crate::events::{EventBus, EventKind, RegistryEvent};
use crate::layer::{Behavior, Fallback, Layer};
use crate::plugin::Plugin;
use crate::utils::Utils;

/// Kind of a registered member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
	Method,
	Property,
	ChainableMethod,
}

impl EntryKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Method => "method",
			Self::Property => "property",
			Self::ChainableMethod => "chainableMethod",
		}
	}
}

impl fmt::Display for EntryKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Top layer(s) of a registered member.
#[derive(Clone)]
pub(crate) enum Entry {
	Method(Arc<Layer>),
	Property(Arc<Layer>),
	Chainable {
		method: Arc<Layer>,
		chaining: Arc<Layer>,
	},
}

impl Entry {
	pub(crate) fn kind(&self) -> EntryKind {
		match self {
			Self::Method(_) => EntryKind::Method,
			Self::Property(_) => EntryKind::Property,
			Self::Chainable { .. } => EntryKind::ChainableMethod,
		}
	}
}

/// Extensible set of chain steps shared by every assertion built from it.
pub struct Registry {
	entries: RwLock<IndexMap<String, Entry>>,
	config: RwLock<Config>,
	events: EventBus,
	/// Plugins already used, kept alive so identities stay unique.
	plugins: Mutex<Vec<Plugin>>,
	/// Root frame of every chain.
	expect_frame: Function,
}

impl Default for Registry {
	fn default() -> Self {
		Self::new(Config::default())
	}
}

impl Registry {
	pub fn new(config: Config) -> Self {
		Self {
			entries: RwLock::new(IndexMap::new()),
			config: RwLock::new(config),
			events: EventBus::new(),
			plugins: Mutex::new(Vec::new()),
			expect_frame: Function::new("expect"),
		}
	}

	/// Starts a chain on `subject`.
	pub fn expect(self: &Arc<Self>, subject: impl Into<Value>) -> Assertion {
		Assertion::root(self.clone(), subject.into(), None)
	}

	/// Starts a chain whose failures are prefixed with `message`.
	pub fn expect_with_message(self: &Arc<Self>, subject: impl Into<Value>, message: impl Into<String>) -> Assertion {
		Assertion::root(self.clone(), subject.into(), Some(message.into()))
	}

	pub(crate) fn expect_frame(&self) -> &Function {
		&self.expect_frame
	}

	/// Registers a callable step.
	pub fn add_method(&self, name: impl Into<String>, behavior: Behavior) {
		let name = name.into();
		self.install(&name, Entry::Method(Layer::new(&name, behavior.clone(), false)));
		debug!(name = %name, kind = "method", "step added");
		self.events.emit(&RegistryEvent {
			kind: EventKind::AddMethod,
			name,
			behavior,
			chaining: None,
		});
	}

	/// Registers a step triggered on read. `None` registers a no-op.
	pub fn add_property(&self, name: impl Into<String>, behavior: Option<Behavior>) {
		let name = name.into();
		let behavior = behavior.unwrap_or_else(Behavior::noop);
		self.install(&name, Entry::Property(Layer::new(&name, behavior.clone(), false)));
		debug!(name = %name, kind = "property", "step added");
		self.events.emit(&RegistryEvent {
			kind: EventKind::AddProperty,
			name,
			behavior,
			chaining: None,
		});
	}

	/// Registers a step usable both as a property and as a method.
	///
	/// Reading it runs `chaining`; calling it runs `method`. `None` for
	/// `chaining` registers a no-op.
	pub fn add_chainable_method(&self, name: impl Into<String>, method: Behavior, chaining: Option<Behavior>) {
		let name = name.into();
		let chaining = chaining.unwrap_or_else(Behavior::noop);
		self.install(
			&name,
			Entry::Chainable {
				method: Layer::new(&name, method.clone(), false),
				chaining: Layer::new(&name, chaining.clone(), false),
			},
		);
		debug!(name = %name, kind = "chainableMethod", "step added");
		self.events.emit(&RegistryEvent {
			kind: EventKind::AddChainableMethod,
			name,
			behavior: method,
			chaining: Some(chaining),
		});
	}

	/// Pushes a method layer built by `factory` from the current one.
	///
	/// The factory runs once, immediately. If `name` is not a method the
	/// fallback it receives fails when called.
	pub fn overwrite_method<F>(&self, name: impl Into<String>, factory: F)
	where
		F: FnOnce(Fallback) -> Behavior,
	{
		let name = name.into();
		let prior = match self.replaced(&name, EntryKind::Method) {
			Some(Entry::Method(layer)) => Some(layer),
			_ => None,
		};
		let behavior = factory(Fallback::new(&name, prior));
		self.install(&name, Entry::Method(Layer::new(&name, behavior, true)));
		debug!(name = %name, kind = "method", "step overwritten");
	}

	/// Pushes a property layer built by `factory` from the current one.
	pub fn overwrite_property<F>(&self, name: impl Into<String>, factory: F)
	where
		F: FnOnce(Fallback) -> Behavior,
	{
		let name = name.into();
		let prior = match self.replaced(&name, EntryKind::Property) {
			Some(Entry::Property(layer)) => Some(layer),
			_ => None,
		};
		let behavior = factory(Fallback::new(&name, prior));
		self.install(&name, Entry::Property(Layer::new(&name, behavior, true)));
		debug!(name = %name, kind = "property", "step overwritten");
	}

	/// Pushes method and chaining layers, each built from its current layer.
	pub fn overwrite_chainable_method<M, C>(&self, name: impl Into<String>, method_factory: M, chaining_factory: C)
	where
		M: FnOnce(Fallback) -> Behavior,
		C: FnOnce(Fallback) -> Behavior,
	{
		let name = name.into();
		let (prior_method, prior_chaining) = match self.replaced(&name, EntryKind::ChainableMethod) {
			Some(Entry::Chainable { method, chaining }) => (Some(method), Some(chaining)),
			_ => (None, None),
		};
		let method = method_factory(Fallback::new(&name, prior_method));
		let chaining = chaining_factory(Fallback::new(&name, prior_chaining));
		self.install(
			&name,
			Entry::Chainable {
				method: Layer::new(&name, method, true),
				chaining: Layer::new(&name, chaining, true),
			},
		);
		debug!(name = %name, kind = "chainableMethod", "step overwritten");
	}

	/// Unregisters `name` with its whole override stack.
	pub fn remove(&self, name: &str) -> bool {
		let removed = self.entries.write().shift_remove(name).is_some();
		if removed {
			debug!(name, "step removed");
		}
		removed
	}

	pub fn contains(&self, name: &str) -> bool {
		self.entries.read().contains_key(name)
	}

	pub fn kind_of(&self, name: &str) -> Option<EntryKind> {
		self.entries.read().get(name).map(Entry::kind)
	}

	/// Registered names in registration order.
	pub fn names(&self) -> Vec<String> {
		self.entries.read().keys().cloned().collect()
	}

	/// Snapshot of the current configuration.
	pub fn config(&self) -> Config {
		self.config.read().clone()
	}

	/// Applies `update` to a copy of the configuration, then stores it.
	pub fn update_config(&self, update: impl FnOnce(&mut Config)) {
		let mut config = self.config();
		update(&mut config);
		*self.config.write() = config;
	}

	pub fn events(&self) -> &EventBus {
		&self.events
	}

	/// Helper surface bound to this registry.
	pub fn utils(&self) -> Utils<'_> {
		Utils::new(self)
	}

	/// Runs `plugin` once; later uses of the same plugin are no-ops.
	///
	/// Returns whether the plugin ran.
	pub fn use_plugin(&self, plugin: &Plugin) -> bool {
		{
			let mut used = self.plugins.lock();
			if used.iter().any(|p| p.same(plugin)) {
				debug!(plugin = plugin.name(), "plugin already in use");
				return false;
			}
			used.push(plugin.clone());
		}
		debug!(plugin = plugin.name(), "using plugin");
		plugin.register(self, &self.utils());
		true
	}

	pub(crate) fn lookup(&self, name: &str) -> Option<Entry> {
		self.entries.read().get(name).cloned()
	}

	fn install(&self, name: &str, entry: Entry) {
		self.entries.write().insert(name.to_string(), entry);
	}

	/// Current entry for `name`, warning when it is of another kind than `kind`.
	fn replaced(&self, name: &str, kind: EntryKind) -> Option<Entry> {
		let entry = self.lookup(name)?;
		if entry.kind() != kind {
			warn!(name, existing = %entry.kind(), incoming = %kind, "overwriting step of a different kind");
			return None;
		}
		Some(entry)
	}
}

impl fmt::Debug for Registry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Registry")
			.field("names", &self.names())
			.field("config", &*self.config.read())
			.finish_non_exhaustive()
	}
}
