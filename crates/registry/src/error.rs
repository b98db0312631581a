//! Error types raised by chain steps.

use affirm_value::Value;

/// A failed assertion, raised only through [`Assertion::assert`].
///
/// [`Assertion::assert`]: crate::Assertion::assert
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct AssertionFailure {
	/// Rendered failure message.
	pub message: String,
	/// Explicit actual value, or the subject under test.
	pub actual: Value,
	pub expected: Value,
	/// Inferred comparison operator, e.g. `strictEqual`.
	pub operator: Option<String>,
	/// Whether a reporter should diff `actual` against `expected`.
	pub show_diff: bool,
	/// Chain frame names, root first.
	pub stack: Vec<String>,
}

/// Misuse of the chain surface itself, as opposed to a failed check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidUsage {
	/// A member that is not registered.
	#[error("Invalid property: {path}{}", did_you_mean(.suggestion))]
	UnknownProperty {
		path: String,
		suggestion: Option<String>,
	},

	/// A member read on an uninvoked method reference.
	#[error("Invalid property: {method}.{property}. See docs for proper usage of \"{method}\".")]
	MethodMisuse { method: String, property: String },

	/// `length` read on an uninvoked method reference.
	#[error(
		"Invalid property: {method}.length. \"length\" cannot be read before calling \"{method}\". See docs for proper usage of \"{method}\"."
	)]
	LengthBeforeCall { method: String },

	/// `length` read right after a chainable member.
	#[error(
		"Invalid property: {method}.length. Due to a compatibility issue, \"length\" cannot directly follow \"{method}\". Use \"{method}.lengthOf\" instead."
	)]
	LengthAfterChainable { method: String },

	#[error("{name} is not a function")]
	NotAFunction { name: String },

	/// A step produced a plain value where the caller needed an assertion.
	#[error("expected a chainable assertion, got {found}")]
	ReturnedValue { found: String },
}

fn did_you_mean(suggestion: &Option<String>) -> String {
	match suggestion {
		Some(name) => format!(". Did you mean \"{name}\"?"),
		None => String::new(),
	}
}

/// Error type of every chain step.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ChainError {
	#[error(transparent)]
	Failure(#[from] AssertionFailure),

	#[error(transparent)]
	Usage(#[from] InvalidUsage),
}

impl ChainError {
	pub fn as_failure(&self) -> Option<&AssertionFailure> {
		match self {
			Self::Failure(failure) => Some(failure),
			Self::Usage(_) => None,
		}
	}

	pub fn as_usage(&self) -> Option<&InvalidUsage> {
		match self {
			Self::Usage(usage) => Some(usage),
			Self::Failure(_) => None,
		}
	}
}

/// Outcome of a step behavior: an explicit return value, or `None` to
/// continue the chain with the receiver.
pub type StepResult = Result<Option<Value>, ChainError>;
