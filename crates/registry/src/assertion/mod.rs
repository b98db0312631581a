//! Assertion instances and chain hops.
//!
//! # Role
//!
//! An [`Assertion`] wraps a subject and its flags. Every member access that
//! resolves to a step produces a new instance (the *successor*) and runs the
//! step's behavior with the successor as receiver.
//!
//! # Hop rules
//!
//! The successor gets every flag of its predecessor except `object`,
//! `message`, `ssfi` and `lockSsfi`, which it establishes itself:
//!
//! - `object` and `message` are seeded from the predecessor.
//! - FRESH (predecessor not locked): `ssfi` becomes the frame of the layer
//!   being run.
//! - LOCKED (predecessor `lockSsfi` true): `ssfi` and the lock are copied.
//!
//! Override layers hold `lockSsfi` true on their receiver while they run and
//! restore the previous value afterwards.
//!
//! # Chainable members
//!
//! Reading a chainable member runs its chaining behavior and leaves the
//! method *pending*: [`Assertion::invoke`] runs it on a further successor.
//! Reading `length` while a method is pending is a usage error.

use std::fmt;
use std::sync::Arc;

use affirm_value::{Function, Object, Value, inspect};
use tracing::trace;

use crate::error::{AssertionFailure, ChainError, InvalidUsage};
use crate::flags::{self, FlagStore, Flagged, flag, transfer_flags};
use crate::guard;
use crate::layer::Layer;
use crate::message::{MessageArgs, get_message, get_operator};
use crate::registry::{Entry, Registry};

#[derive(Clone)]
struct Pending {
	name: String,
	method: Arc<Layer>,
}

/// One link of a fluent assertion chain.
#[derive(Clone)]
pub struct Assertion {
	registry: Arc<Registry>,
	flags: FlagStore,
	/// Frames of the hops that produced this instance, root first.
	trace: Vec<Function>,
	pending: Option<Pending>,
}

/// Result of reading or calling a chain member.
#[derive(Debug)]
pub enum Access {
	/// The chain continues with a new instance.
	Chain(Assertion),
	/// The step returned an explicit value.
	Value(Value),
	/// An uninvoked method.
	Method(MethodRef),
}

impl Access {
	/// The continued chain, or an error describing what came back instead.
	pub fn into_assertion(self) -> Result<Assertion, InvalidUsage> {
		match self {
			Self::Chain(assertion) => Ok(assertion),
			Self::Value(value) => Err(InvalidUsage::ReturnedValue {
				found: inspect(&value),
			}),
			Self::Method(method) => Err(InvalidUsage::ReturnedValue {
				found: format!("[Function {}]", method.name),
			}),
		}
	}

	pub fn into_value(self) -> Option<Value> {
		match self {
			Self::Value(value) => Some(value),
			_ => None,
		}
	}

	/// Calls what was accessed.
	pub fn call(self, args: &[Value]) -> Result<Access, ChainError> {
		match self {
			Self::Chain(assertion) => assertion.invoke(args),
			Self::Method(method) => method.call(args),
			Self::Value(value) => Err(InvalidUsage::NotAFunction { name: inspect(&value) }.into()),
		}
	}

	/// Reads member `name` of what was accessed.
	pub fn get(&self, name: &str) -> Result<Access, ChainError> {
		match self {
			Self::Chain(assertion) => assertion.get(name),
			Self::Method(method) => method.get(name).map(Access::Value).map_err(Into::into),
			Self::Value(Value::Object(obj)) => Ok(Self::Value(obj.get(name).unwrap_or_default())),
			Self::Value(_) => Ok(Self::Value(Value::Undefined)),
		}
	}
}

/// A registered method read but not yet called.
#[derive(Clone)]
pub struct MethodRef {
	receiver: Assertion,
	name: String,
	layer: Arc<Layer>,
}

impl MethodRef {
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn call(&self, args: &[Value]) -> Result<Access, ChainError> {
		self.receiver.apply(&self.layer, args)
	}

	/// Member reads on an uninvoked method are misuse, `length` included.
	pub fn get(&self, name: &str) -> Result<Value, InvalidUsage> {
		let config = self.receiver.registry.config();
		guard::check_method_member(&self.name, name, &config).map(|()| Value::Undefined)
	}
}

impl fmt::Debug for MethodRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MethodRef").field("name", &self.name).finish_non_exhaustive()
	}
}

impl Flagged for Assertion {
	fn flags(&self) -> &FlagStore {
		&self.flags
	}

	fn flags_mut(&mut self) -> &mut FlagStore {
		&mut self.flags
	}
}

impl Assertion {
	pub(crate) fn root(registry: Arc<Registry>, subject: Value, message: Option<String>) -> Self {
		let frame = registry.expect_frame().clone();
		let mut store = FlagStore::new();
		store.set(flags::OBJECT, subject);
		store.set(flags::SSFI, frame.clone());
		if let Some(message) = message {
			store.set(flags::MESSAGE, message);
		}
		Self {
			registry,
			flags: store,
			trace: vec![frame],
			pending: None,
		}
	}

	pub fn registry(&self) -> &Arc<Registry> {
		&self.registry
	}

	pub fn set_subject(&mut self, subject: impl Into<Value>) {
		self.flags.set(flags::OBJECT, subject);
	}

	pub fn is_negated(&self) -> bool {
		flag(self, flags::NEGATE).is_truthy()
	}

	fn ssfi_locked(&self) -> bool {
		flag(self, flags::LOCK_SSFI).is_truthy()
	}

	/// Name of the chainable method awaiting a call, if any.
	pub fn pending(&self) -> Option<&str> {
		self.pending.as_ref().map(|p| p.name.as_str())
	}

	/// Reads member `name`.
	///
	/// Properties run immediately, chainable members run their chaining
	/// behavior, and methods come back uninvoked as [`Access::Method`].
	pub fn get(&self, name: &str) -> Result<Access, ChainError> {
		if let Some(pending) = &self.pending {
			if name == "length" {
				return Err(guard::length_error(&pending.name, true).into());
			}
		}
		match self.registry.lookup(name) {
			Some(Entry::Property(layer)) => self.apply(&layer, &[]),
			Some(Entry::Method(layer)) => Ok(Access::Method(MethodRef {
				receiver: self.clone(),
				name: name.to_string(),
				layer,
			})),
			Some(Entry::Chainable { method, chaining }) => {
				self.chain_through(name, &chaining, method).map(Access::Chain)
			}
			None => {
				self.miss(name)?;
				Ok(Access::Value(Value::Undefined))
			}
		}
	}

	/// Calls member `name` with `args`.
	///
	/// A chainable member runs its chaining behavior first. Calling a
	/// property runs it, then fails: its result is not callable.
	pub fn call(&self, name: &str, args: &[Value]) -> Result<Access, ChainError> {
		match self.registry.lookup(name) {
			Some(Entry::Method(layer)) => self.apply(&layer, args),
			Some(Entry::Chainable { method, chaining }) => {
				self.chain_through(name, &chaining, method)?.invoke(args)
			}
			Some(Entry::Property(layer)) => {
				self.apply(&layer, &[])?;
				Err(not_a_function(name))
			}
			None => {
				self.miss(name)?;
				Err(not_a_function(name))
			}
		}
	}

	/// Calls the pending chainable method.
	pub fn invoke(&self, args: &[Value]) -> Result<Access, ChainError> {
		match &self.pending {
			Some(pending) => self.apply(&pending.method, args),
			None => Err(not_a_function(self.last_step())),
		}
	}

	/// Reads a member that must continue the chain.
	pub fn prop(&self, name: &str) -> Result<Assertion, ChainError> {
		Ok(self.get(name)?.into_assertion()?)
	}

	/// Calls a member that must continue the chain.
	pub fn method(&self, name: &str, args: &[Value]) -> Result<Assertion, ChainError> {
		Ok(self.call(name, args)?.into_assertion()?)
	}

	/// Fails unless `ok` holds, inverted when the chain is negated.
	pub fn assert(&self, ok: bool, args: MessageArgs) -> Result<(), AssertionFailure> {
		if ok != self.is_negated() {
			return Ok(());
		}
		let config = self.registry.config();
		let message = get_message(self, &args, config.truncate_threshold);
		let operator = get_operator(self, &args);
		let show_diff =
			config.show_diff && args.show_diff && !(args.expected.is_undefined() && args.actual.is_none());
		let actual = args.actual.unwrap_or_else(|| self.subject());
		Err(AssertionFailure {
			message,
			actual,
			expected: args.expected,
			operator,
			show_diff,
			stack: self.stack(config.include_stack),
		})
	}

	/// A new chain on `subject` that keeps this instance's blame frame.
	///
	/// For steps that delegate to other steps: failures raised through the
	/// nested chain are attributed like failures of this one.
	pub fn nested(&self, subject: impl Into<Value>) -> Assertion {
		let mut store = FlagStore::new();
		store.set(flags::OBJECT, subject);
		store.set(flags::SSFI, flag(self, flags::SSFI));
		store.set(flags::LOCK_SSFI, true);
		if let Some(message) = self.flags.get(flags::MESSAGE) {
			store.set(flags::MESSAGE, message.clone());
		}
		Assertion {
			registry: self.registry.clone(),
			flags: store,
			trace: self.trace.clone(),
			pending: None,
		}
	}

	/// An inspectable record of this instance.
	pub fn to_value(&self) -> Value {
		let record = Object::new();
		for name in self.flags.names() {
			record.set(name, flag(self, name));
		}
		let obj = Object::with_class("Assertion");
		obj.set("__flags", record);
		Value::Object(obj)
	}

	/// Names of the chain frames for a failure raised here.
	///
	/// Unless `include_all`, frames from the latest `ssfi` frame on are dropped.
	fn stack(&self, include_all: bool) -> Vec<String> {
		let cut = match flag(self, flags::SSFI) {
			Value::Function(ssfi) if !include_all => self
				.trace
				.iter()
				.rposition(|frame| frame.ptr_eq(&ssfi))
				.unwrap_or(self.trace.len()),
			_ => self.trace.len(),
		};
		self.trace[..cut].iter().map(|frame| frame.name().to_string()).collect()
	}

	fn last_step(&self) -> &str {
		self.trace.last().map_or("expect", Function::name)
	}

	/// Builds the instance a hop through `layer` hands to its behavior.
	fn successor(&self, layer: &Layer) -> Assertion {
		let mut next = Assertion {
			registry: self.registry.clone(),
			flags: FlagStore::new(),
			trace: self.trace.clone(),
			pending: None,
		};
		transfer_flags(self, &mut next, false);
		next.flags.set(flags::OBJECT, self.subject());
		if let Some(message) = self.flags.get(flags::MESSAGE) {
			next.flags.set(flags::MESSAGE, message.clone());
		}
		let locked = self.ssfi_locked();
		if locked {
			next.flags.set(flags::LOCK_SSFI, true);
			next.flags.set(flags::SSFI, flag(self, flags::SSFI));
		} else {
			next.flags.set(flags::SSFI, layer.frame.clone());
		}
		next.trace.push(layer.frame.clone());
		trace!(step = %layer.name, locked, "chain hop");
		next
	}

	/// Runs `layer`'s behavior on this instance.
	fn run(&mut self, layer: &Layer, args: &[Value]) -> Result<Option<Value>, ChainError> {
		if !layer.overrides {
			return layer.behavior.call(self, args);
		}
		let saved = self.flags.get(flags::LOCK_SSFI).cloned();
		self.flags.set(flags::LOCK_SSFI, true);
		let result = layer.behavior.call(self, args);
		match saved {
			Some(lock) => self.flags.set(flags::LOCK_SSFI, lock),
			None => {
				self.flags.remove(flags::LOCK_SSFI);
			}
		}
		result
	}

	/// Hops through `layer` and runs it.
	fn apply(&self, layer: &Layer, args: &[Value]) -> Result<Access, ChainError> {
		let mut next = self.successor(layer);
		Ok(match next.run(layer, args)? {
			Some(value) => Access::Value(value),
			None => Access::Chain(next),
		})
	}

	/// Hops through a chainable member's chaining layer and leaves its method pending.
	fn chain_through(&self, name: &str, chaining: &Layer, method: Arc<Layer>) -> Result<Assertion, ChainError> {
		let mut next = self.successor(chaining);
		next.run(chaining, &[])?;
		next.pending = Some(Pending {
			name: name.to_string(),
			method,
		});
		Ok(next)
	}

	/// Handles a read of a name with no entry.
	fn miss(&self, name: &str) -> Result<(), InvalidUsage> {
		let config = self.registry.config();
		let names = self.registry.names();
		guard::check_unknown(name, names.iter().map(String::as_str), &config)?;
		trace!(name, "unguarded read of unknown member");
		Ok(())
	}
}

fn not_a_function(name: &str) -> ChainError {
	InvalidUsage::NotAFunction {
		name: name.to_string(),
	}
	.into()
}

impl fmt::Debug for Assertion {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let trace: Vec<&str> = self.trace.iter().map(Function::name).collect();
		f.debug_struct("Assertion")
			.field("subject", &self.subject())
			.field("trace", &trace)
			.field("pending", &self.pending())
			.finish_non_exhaustive()
	}
}
