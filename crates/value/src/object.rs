use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::inspect::InspectHook;
use crate::{Symbol, Value};

/// Key of an object property.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum PropertyKey {
	Name(String),
	Symbol(Symbol),
}

impl PropertyKey {
	pub fn as_name(&self) -> Option<&str> {
		match self {
			Self::Name(name) => Some(name),
			Self::Symbol(_) => None,
		}
	}
}

impl From<&str> for PropertyKey {
	fn from(name: &str) -> Self {
		Self::Name(name.to_string())
	}
}

impl From<String> for PropertyKey {
	fn from(name: String) -> Self {
		Self::Name(name)
	}
}

impl From<Symbol> for PropertyKey {
	fn from(sym: Symbol) -> Self {
		Self::Symbol(sym)
	}
}

/// One own property of an [`Object`].
#[derive(Clone, Debug)]
pub struct Property {
	pub key: PropertyKey,
	pub value: Value,
	pub enumerable: bool,
}

#[derive(Default)]
struct ObjectData {
	class: Option<String>,
	properties: Vec<Property>,
	hook: Option<InspectHook>,
}

/// A shared, interior-mutable record.
///
/// Clones share the same storage; equality is identity. Readers take short
/// locks and hand out copies, so a property holding the object itself never
/// re-enters a held lock.
#[derive(Clone, Default)]
pub struct Object(Arc<RwLock<ObjectData>>);

impl Object {
	pub fn new() -> Self {
		Self::default()
	}

	/// An object tagged with a class name, rendered as `Name{ ... }`.
	pub fn with_class(class: impl Into<String>) -> Self {
		let obj = Self::new();
		obj.0.write().class = Some(class.into());
		obj
	}

	pub fn from_entries<K, V, I>(entries: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<Value>,
	{
		let obj = Self::new();
		{
			let mut data = obj.0.write();
			for (key, value) in entries {
				data.properties.push(Property {
					key: PropertyKey::Name(key.into()),
					value: value.into(),
					enumerable: true,
				});
			}
		}
		obj
	}

	pub fn class(&self) -> Option<String> {
		self.0.read().class.clone()
	}

	pub fn get(&self, key: impl Into<PropertyKey>) -> Option<Value> {
		let key = key.into();
		self.0
			.read()
			.properties
			.iter()
			.find(|p| p.key == key)
			.map(|p| p.value.clone())
	}

	pub fn contains(&self, key: impl Into<PropertyKey>) -> bool {
		let key = key.into();
		self.0.read().properties.iter().any(|p| p.key == key)
	}

	/// Sets an enumerable property, keeping the enumerability of an existing one.
	pub fn set(&self, key: impl Into<PropertyKey>, value: impl Into<Value>) {
		let key = key.into();
		let value = value.into();
		let mut data = self.0.write();
		match data.properties.iter_mut().find(|p| p.key == key) {
			Some(existing) => existing.value = value,
			None => data.properties.push(Property {
				key,
				value,
				enumerable: true,
			}),
		}
	}

	/// Defines a property with explicit enumerability, replacing any existing one.
	pub fn define(&self, key: impl Into<PropertyKey>, value: impl Into<Value>, enumerable: bool) {
		let property = Property {
			key: key.into(),
			value: value.into(),
			enumerable,
		};
		let mut data = self.0.write();
		match data.properties.iter_mut().find(|p| p.key == property.key) {
			Some(existing) => *existing = property,
			None => data.properties.push(property),
		}
	}

	pub fn remove(&self, key: impl Into<PropertyKey>) -> Option<Value> {
		let key = key.into();
		let mut data = self.0.write();
		let idx = data.properties.iter().position(|p| p.key == key)?;
		Some(data.properties.remove(idx).value)
	}

	/// Snapshot of all own properties in insertion order.
	pub fn properties(&self) -> Vec<Property> {
		self.0.read().properties.clone()
	}

	pub fn len(&self) -> usize {
		self.0.read().properties.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.read().properties.is_empty()
	}

	/// Installs a custom inspection hook consulted by the inspector.
	pub fn set_inspect_hook(&self, hook: InspectHook) {
		self.0.write().hook = Some(hook);
	}

	pub fn inspect_hook(&self) -> Option<InspectHook> {
		self.0.read().hook.clone()
	}

	pub fn ptr_eq(&self, other: &Object) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}

	/// Stable address used for cycle detection.
	pub(crate) fn addr(&self) -> usize {
		Arc::as_ptr(&self.0) as *const () as usize
	}
}

impl PartialEq for Object {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}
}

impl fmt::Debug for Object {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&crate::inspect(&Value::Object(self.clone())))
	}
}
