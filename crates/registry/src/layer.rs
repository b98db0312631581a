//! Step behaviors and override stacks.

use std::fmt;
use std::sync::Arc;

use affirm_value::{Function, Value};

use crate::assertion::Assertion;
use crate::error::{InvalidUsage, StepResult};

type StepFn = dyn Fn(&mut Assertion, &[Value]) -> StepResult + Send + Sync;

/// The code run when a chain step is accessed or called.
///
/// The receiver is the freshly created successor assertion.
#[derive(Clone)]
pub struct Behavior(Arc<StepFn>);

impl Behavior {
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(&mut Assertion, &[Value]) -> StepResult + Send + Sync + 'static,
	{
		Self(Arc::new(f))
	}

	/// A behavior that takes no arguments, for properties and chaining.
	pub fn getter<F>(f: F) -> Self
	where
		F: Fn(&mut Assertion) -> StepResult + Send + Sync + 'static,
	{
		Self::new(move |this, _| f(this))
	}

	pub fn noop() -> Self {
		Self::new(|_, _| Ok(None))
	}

	pub fn call(&self, this: &mut Assertion, args: &[Value]) -> StepResult {
		(self.0)(this, args)
	}

	pub fn ptr_eq(&self, other: &Behavior) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

impl fmt::Debug for Behavior {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Behavior(..)")
	}
}

/// One layer of an entry's override stack.
pub(crate) struct Layer {
	pub(crate) name: String,
	pub(crate) behavior: Behavior,
	/// Blame frame recorded as `ssfi` when this layer starts a hop.
	pub(crate) frame: Function,
	/// Installed by an `overwrite_*` call.
	pub(crate) overrides: bool,
}

impl Layer {
	pub(crate) fn new(name: &str, behavior: Behavior, overrides: bool) -> Arc<Self> {
		Arc::new(Self {
			name: name.to_string(),
			behavior,
			frame: Function::new(name),
			overrides,
		})
	}
}

/// Handle on the layer an override replaced, passed to override factories.
#[derive(Clone)]
pub struct Fallback {
	name: String,
	layer: Option<Arc<Layer>>,
}

impl Fallback {
	pub(crate) fn new(name: &str, layer: Option<Arc<Layer>>) -> Self {
		Self {
			name: name.to_string(),
			layer,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Whether a prior layer exists.
	pub fn exists(&self) -> bool {
		self.layer.is_some()
	}

	/// Runs the prior layer on the same receiver.
	///
	/// Fails with `"<name> is not a function"` when the override was installed
	/// over nothing.
	pub fn call(&self, this: &mut Assertion, args: &[Value]) -> StepResult {
		match &self.layer {
			Some(layer) => layer.behavior.call(this, args),
			None => Err(InvalidUsage::NotAFunction {
				name: self.name.clone(),
			}
			.into()),
		}
	}
}

impl fmt::Debug for Fallback {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Fallback")
			.field("name", &self.name)
			.field("exists", &self.exists())
			.finish()
	}
}
