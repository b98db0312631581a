//! Plugin handles and static plugin definitions.

use std::fmt;
use std::sync::Arc;

use crate::registry::Registry;
use crate::utils::Utils;

type RegisterFn = dyn Fn(&Registry, &Utils<'_>) + Send + Sync;

/// A unit of registrations applied with [`Registry::use_plugin`].
///
/// Clones share identity: using any clone of a plugin that was already
/// used is a no-op.
#[derive(Clone)]
pub struct Plugin {
	name: Arc<str>,
	register: Arc<RegisterFn>,
	identity: usize,
}

impl Plugin {
	pub fn new<F>(name: &str, register: F) -> Self
	where
		F: Fn(&Registry, &Utils<'_>) + Send + Sync + 'static,
	{
		let register: Arc<RegisterFn> = Arc::new(register);
		let identity = Arc::as_ptr(&register) as *const () as usize;
		Self {
			name: Arc::from(name),
			register,
			identity,
		}
	}

	/// Plugin for a statically submitted definition. Every handle made from
	/// the same definition shares its identity.
	pub fn from_def(def: &'static PluginDef) -> Self {
		let register = def.register;
		Self {
			name: Arc::from(def.name),
			register: Arc::new(move |registry: &Registry, utils: &Utils<'_>| register(registry, utils)),
			identity: def as *const PluginDef as usize,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Whether both handles denote the same plugin.
	pub fn same(&self, other: &Plugin) -> bool {
		self.identity == other.identity
	}

	pub(crate) fn register(&self, registry: &Registry, utils: &Utils<'_>) {
		(self.register)(registry, utils);
	}
}

impl fmt::Debug for Plugin {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Plugin").field("name", &self.name).finish_non_exhaustive()
	}
}

/// A plugin submitted at compile time with `inventory::submit!`.
pub struct PluginDef {
	pub name: &'static str,
	pub register: fn(&Registry, &Utils<'_>),
}

inventory::collect!(PluginDef);

impl PluginDef {
	pub const fn new(name: &'static str, register: fn(&Registry, &Utils<'_>)) -> Self {
		Self { name, register }
	}
}

/// Every submitted [`PluginDef`], in unspecified order.
pub fn static_plugins() -> impl Iterator<Item = &'static PluginDef> {
	inventory::iter::<PluginDef>.into_iter()
}
