use std::fmt;
use std::sync::Arc;

/// An opaque function handle.
///
/// Only identity and name matter to the engine: functions appear as expected
/// values, as stack-frame markers (`ssfi`), and in rendered diagnostics.
#[derive(Clone)]
pub struct Function(Arc<FunctionInner>);

struct FunctionInner {
	name: String,
}

impl Function {
	pub fn new(name: impl Into<String>) -> Self {
		Self(Arc::new(FunctionInner { name: name.into() }))
	}

	pub fn anonymous() -> Self {
		Self::new("")
	}

	pub fn name(&self) -> &str {
		&self.0.name
	}

	pub fn ptr_eq(&self, other: &Function) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

impl PartialEq for Function {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}
}

impl Eq for Function {}

impl fmt::Debug for Function {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.name().is_empty() {
			f.write_str("[Function]")
		} else {
			write!(f, "[Function {}]", self.name())
		}
	}
}
