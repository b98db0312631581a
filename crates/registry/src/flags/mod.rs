//! Per-chain flag storage.
//!
//! Each [`Assertion`](crate::Assertion) owns one [`FlagStore`]. A chain hop
//! copies the store into the successor, leaving out the hop-local flags
//! ([`HOP_LOCAL`]) which every instance establishes for itself.

use affirm_value::Value;
use rustc_hash::FxHashMap as HashMap;

/// Subject under test.
pub const OBJECT: &str = "object";
/// User-supplied message prefix.
pub const MESSAGE: &str = "message";
/// Start-stack-frame indicator: the frame failure stacks are trimmed at.
pub const SSFI: &str = "ssfi";
/// Freezes `ssfi` propagation while true.
pub const LOCK_SSFI: &str = "lockSsfi";
pub const NEGATE: &str = "negate";
/// Explicit comparison operator reported on failure.
pub const OPERATOR: &str = "operator";

/// Flags left out of a partial transfer.
pub const HOP_LOCAL: [&str; 4] = [OBJECT, MESSAGE, SSFI, LOCK_SSFI];

/// Mapping from flag name to value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlagStore {
	flags: HashMap<String, Value>,
}

impl FlagStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, name: &str) -> Option<&Value> {
		self.flags.get(name)
	}

	pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
		self.flags.insert(name.into(), value.into());
	}

	pub fn remove(&mut self, name: &str) -> Option<Value> {
		self.flags.remove(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.flags.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.flags.len()
	}

	pub fn is_empty(&self) -> bool {
		self.flags.is_empty()
	}

	/// Iterates flags in unspecified order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.flags.iter().map(|(name, value)| (name.as_str(), value))
	}

	/// Flag names, sorted.
	pub fn names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.flags.keys().map(String::as_str).collect();
		names.sort_unstable();
		names
	}
}

/// Anything that owns a [`FlagStore`].
pub trait Flagged {
	fn flags(&self) -> &FlagStore;

	fn flags_mut(&mut self) -> &mut FlagStore;

	/// The `object` flag.
	fn subject(&self) -> Value {
		flag(self, OBJECT)
	}
}

impl Flagged for FlagStore {
	fn flags(&self) -> &FlagStore {
		self
	}

	fn flags_mut(&mut self) -> &mut FlagStore {
		self
	}
}

/// Reads a flag; absent flags read as `undefined`.
pub fn flag<F: Flagged + ?Sized>(obj: &F, name: &str) -> Value {
	obj.flags().get(name).cloned().unwrap_or_default()
}

pub fn set_flag<F: Flagged + ?Sized>(obj: &mut F, name: &str, value: impl Into<Value>) {
	obj.flags_mut().set(name, value);
}

/// Copies every flag of `source` into `target`, overwriting same-named flags.
///
/// With `include_all` false the [`HOP_LOCAL`] flags are skipped.
pub fn transfer_flags<S, T>(source: &S, target: &mut T, include_all: bool)
where
	S: Flagged + ?Sized,
	T: Flagged + ?Sized,
{
	let target = target.flags_mut();
	for (name, value) in source.flags().iter() {
		if include_all || !HOP_LOCAL.contains(&name) {
			target.set(name, value.clone());
		}
	}
}
