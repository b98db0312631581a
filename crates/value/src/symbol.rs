use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A unique symbol. Two symbols are equal only if they are the same symbol,
/// whatever their descriptions.
#[derive(Clone)]
pub struct Symbol(Arc<SymbolInner>);

struct SymbolInner {
	description: Option<String>,
}

impl Symbol {
	pub fn new(description: impl Into<String>) -> Self {
		Self(Arc::new(SymbolInner {
			description: Some(description.into()),
		}))
	}

	/// A symbol without a description.
	pub fn anonymous() -> Self {
		Self(Arc::new(SymbolInner { description: None }))
	}

	pub fn description(&self) -> Option<&str> {
		self.0.description.as_deref()
	}

	pub fn ptr_eq(&self, other: &Symbol) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

impl PartialEq for Symbol {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}
}

impl Eq for Symbol {}

impl Hash for Symbol {
	fn hash<H: Hasher>(&self, state: &mut H) {
		std::ptr::hash(Arc::as_ptr(&self.0), state);
	}
}

impl fmt::Debug for Symbol {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Symbol({})", self.description().unwrap_or_default())
	}
}
