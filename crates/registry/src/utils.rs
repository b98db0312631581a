//! Helper surface handed to plugins.

use affirm_value::{InspectOptions, PropertyKey, Value};

use crate::config::Config;
use crate::events::{EventKind, ListenerId, RegistryEvent};
use crate::flags::{self, Flagged};
use crate::guard::{self, Guarded};
use crate::message::{self, MessageArgs};
use crate::registry::Registry;

/// Utilities bound to one registry and a snapshot of its configuration.
pub struct Utils<'a> {
	registry: &'a Registry,
	config: Config,
}

impl<'a> Utils<'a> {
	pub(crate) fn new(registry: &'a Registry) -> Self {
		Self {
			registry,
			config: registry.config(),
		}
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	pub fn flag<F: Flagged + ?Sized>(&self, obj: &F, name: &str) -> Value {
		flags::flag(obj, name)
	}

	pub fn set_flag<F: Flagged + ?Sized>(&self, obj: &mut F, name: &str, value: impl Into<Value>) {
		flags::set_flag(obj, name, value);
	}

	pub fn transfer_flags<S, T>(&self, source: &S, target: &mut T, include_all: bool)
	where
		S: Flagged + ?Sized,
		T: Flagged + ?Sized,
	{
		flags::transfer_flags(source, target, include_all);
	}

	pub fn get_message<F: Flagged + ?Sized>(&self, obj: &F, args: &MessageArgs) -> String {
		message::get_message(obj, args, self.config.truncate_threshold)
	}

	pub fn get_operator<F: Flagged + ?Sized>(&self, obj: &F, args: &MessageArgs) -> Option<String> {
		message::get_operator(obj, args)
	}

	pub fn obj_display(&self, value: &Value) -> String {
		message::obj_display(value, self.config.truncate_threshold)
	}

	/// Renders `value` with the configured truncation threshold.
	pub fn inspect(&self, value: &Value) -> String {
		affirm_value::inspect_with(value, &InspectOptions::with_truncate_threshold(self.config.truncate_threshold))
	}

	pub fn compare_by_inspect(&self, a: &Value, b: &Value) -> i32 {
		affirm_value::compare_by_inspect(a, b)
	}

	pub fn own_enumerable_properties(&self, value: &Value) -> Vec<PropertyKey> {
		affirm_value::own_enumerable_properties(value)
	}

	pub fn own_enumerable_property_symbols(&self, value: &Value) -> Vec<PropertyKey> {
		affirm_value::own_enumerable_property_symbols(value)
	}

	pub fn add_length_guard(&self, target: impl Into<Guarded>, method_name: &str, is_chainable: bool) -> Guarded {
		guard::add_length_guard(target, method_name, is_chainable)
	}

	pub fn proxify(&self, value: impl Into<Guarded>, non_chainable_method: Option<&str>) -> Guarded {
		guard::proxify(value, non_chainable_method, &self.config)
	}

	pub fn is_proxy_enabled(&self) -> bool {
		guard::is_proxy_enabled(&self.config)
	}

	pub fn add_event_listener<F>(&self, kind: EventKind, listener: F) -> ListenerId
	where
		F: Fn(&RegistryEvent) + Send + Sync + 'static,
	{
		self.registry.events().add_listener(kind, listener)
	}

	pub fn remove_event_listener(&self, id: ListenerId) -> bool {
		self.registry.events().remove_listener(id)
	}
}
