//! Dynamic value model shared by the assertion engine.
//!
//! Assertion subjects, flag values and expected values are all [`Value`]s.
//! The model mirrors the kinds a fluent assertion chain has to describe in
//! diagnostics: primitives, symbols, immutable lists, typed numeric arrays,
//! and shared, interior-mutable objects that may reference themselves.
//!
//! Rendering lives in [`inspect`]; own-property enumeration in [`enumerate`].

pub mod enumerate;
pub mod inspect;
mod function;
mod object;
mod symbol;
mod typed;

use std::fmt;
use std::sync::Arc;

pub use enumerate::{own_enumerable_properties, own_enumerable_property_symbols};
pub use function::Function;
pub use inspect::{
	DEFAULT_DEPTH, DEFAULT_TRUNCATE, InspectHook, InspectOptions, Inspected, Style,
	compare_by_inspect, inspect, inspect_with,
};
pub use object::{Object, Property, PropertyKey};
pub use symbol::Symbol;
pub use typed::{TypedArray, TypedKind};

/// A dynamically typed value.
#[derive(Clone, Default)]
pub enum Value {
	#[default]
	Undefined,
	Null,
	Bool(bool),
	Number(f64),
	BigInt(i128),
	String(Arc<str>),
	Symbol(Symbol),
	Array(Arc<[Value]>),
	TypedArray(TypedArray),
	Map(Arc<[(Value, Value)]>),
	Set(Arc<[Value]>),
	Function(Function),
	Object(Object),
}

impl Value {
	/// Builds an array value.
	pub fn array<I>(items: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<Value>,
	{
		Self::Array(items.into_iter().map(Into::into).collect())
	}

	/// Builds a plain object from name/value pairs, all enumerable.
	pub fn record<K, V, I>(entries: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<Value>,
	{
		Self::Object(Object::from_entries(entries))
	}

	pub fn map<I>(entries: I) -> Self
	where
		I: IntoIterator<Item = (Value, Value)>,
	{
		Self::Map(entries.into_iter().collect())
	}

	pub fn set<I>(items: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<Value>,
	{
		Self::Set(items.into_iter().map(Into::into).collect())
	}

	pub fn bigint(n: i128) -> Self {
		Self::BigInt(n)
	}

	/// Name of the dynamic kind, in the vocabulary of `typeof`.
	pub fn type_name(&self) -> &'static str {
		match self {
			Self::Undefined => "undefined",
			Self::Null => "object",
			Self::Bool(_) => "boolean",
			Self::Number(_) => "number",
			Self::BigInt(_) => "bigint",
			Self::String(_) => "string",
			Self::Symbol(_) => "symbol",
			Self::Function(_) => "function",
			Self::Array(_) | Self::TypedArray(_) | Self::Map(_) | Self::Set(_) | Self::Object(_) => {
				"object"
			}
		}
	}

	/// True for containers and functions; false for primitives, `null` included.
	pub fn is_object_like(&self) -> bool {
		matches!(
			self,
			Self::Array(_)
				| Self::TypedArray(_)
				| Self::Map(_)
				| Self::Set(_)
				| Self::Function(_)
				| Self::Object(_)
		)
	}

	pub fn is_undefined(&self) -> bool {
		matches!(self, Self::Undefined)
	}

	pub fn is_nullish(&self) -> bool {
		matches!(self, Self::Undefined | Self::Null)
	}

	pub fn is_truthy(&self) -> bool {
		match self {
			Self::Undefined | Self::Null => false,
			Self::Bool(b) => *b,
			Self::Number(n) => *n != 0.0 && !n.is_nan(),
			Self::BigInt(n) => *n != 0,
			Self::String(s) => !s.is_empty(),
			_ => true,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::Number(n) => Some(*n),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(b) => Some(*b),
			_ => None,
		}
	}

	pub fn as_object(&self) -> Option<&Object> {
		match self {
			Self::Object(o) => Some(o),
			_ => None,
		}
	}

	pub fn as_function(&self) -> Option<&Function> {
		match self {
			Self::Function(f) => Some(f),
			_ => None,
		}
	}

	/// Number of items for list-like values.
	pub fn length(&self) -> Option<usize> {
		match self {
			Self::String(s) => Some(s.chars().count()),
			Self::Array(items) | Self::Set(items) => Some(items.len()),
			Self::TypedArray(t) => Some(t.len()),
			Self::Map(entries) => Some(entries.len()),
			_ => None,
		}
	}

	/// SameValue: identity for references, `NaN` equals itself, `0` and `-0` differ.
	pub fn same(&self, other: &Value) -> bool {
		match (self, other) {
			(Self::Number(a), Self::Number(b)) => {
				if a.is_nan() && b.is_nan() {
					true
				} else {
					a == b && a.is_sign_negative() == b.is_sign_negative()
				}
			}
			_ => self == other,
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
			(Self::Bool(a), Self::Bool(b)) => a == b,
			(Self::Number(a), Self::Number(b)) => a == b,
			(Self::BigInt(a), Self::BigInt(b)) => a == b,
			(Self::String(a), Self::String(b)) => a == b,
			(Self::Symbol(a), Self::Symbol(b)) => a == b,
			(Self::Array(a), Self::Array(b)) | (Self::Set(a), Self::Set(b)) => a == b,
			(Self::TypedArray(a), Self::TypedArray(b)) => a == b,
			(Self::Map(a), Self::Map(b)) => a == b,
			(Self::Function(a), Self::Function(b)) => a == b,
			(Self::Object(a), Self::Object(b)) => a == b,
			_ => false,
		}
	}
}

impl fmt::Debug for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&inspect(self))
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&inspect(self))
	}
}

impl From<bool> for Value {
	fn from(b: bool) -> Self {
		Self::Bool(b)
	}
}

impl From<f64> for Value {
	fn from(n: f64) -> Self {
		Self::Number(n)
	}
}

impl From<i32> for Value {
	fn from(n: i32) -> Self {
		Self::Number(f64::from(n))
	}
}

impl From<u32> for Value {
	fn from(n: u32) -> Self {
		Self::Number(f64::from(n))
	}
}

impl From<i64> for Value {
	fn from(n: i64) -> Self {
		Self::Number(n as f64)
	}
}

impl From<usize> for Value {
	fn from(n: usize) -> Self {
		Self::Number(n as f64)
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Self::String(Arc::from(s))
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Self::String(Arc::from(s))
	}
}

impl From<Symbol> for Value {
	fn from(s: Symbol) -> Self {
		Self::Symbol(s)
	}
}

impl From<Function> for Value {
	fn from(f: Function) -> Self {
		Self::Function(f)
	}
}

impl From<Object> for Value {
	fn from(o: Object) -> Self {
		Self::Object(o)
	}
}

impl From<TypedArray> for Value {
	fn from(t: TypedArray) -> Self {
		Self::TypedArray(t)
	}
}

impl From<Vec<Value>> for Value {
	fn from(items: Vec<Value>) -> Self {
		Self::Array(items.into())
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(v: Option<T>) -> Self {
		v.map_or(Self::Undefined, Into::into)
	}
}
