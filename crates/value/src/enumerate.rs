//! Own-property enumeration.

use crate::{PropertyKey, Value};

/// Enumerable own keys of `value`: names in insertion order, then symbols.
///
/// Non-object values have no own properties and yield an empty list.
pub fn own_enumerable_properties(value: &Value) -> Vec<PropertyKey> {
	let Some(obj) = value.as_object() else {
		return Vec::new();
	};
	let (mut names, symbols): (Vec<PropertyKey>, Vec<PropertyKey>) = obj
		.properties()
		.into_iter()
		.filter(|p| p.enumerable)
		.map(|p| p.key)
		.partition(|key| matches!(key, PropertyKey::Name(_)));
	names.extend(symbols);
	names
}

/// Enumerable own symbol keys of `value`.
pub fn own_enumerable_property_symbols(value: &Value) -> Vec<PropertyKey> {
	let Some(obj) = value.as_object() else {
		return Vec::new();
	};
	obj.properties()
		.into_iter()
		.filter(|p| p.enumerable && matches!(p.key, PropertyKey::Symbol(_)))
		.map(|p| p.key)
		.collect()
}
