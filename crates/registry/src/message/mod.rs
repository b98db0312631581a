//! Failure message templating and operator inference.

use std::fmt;
use std::sync::{Arc, LazyLock};

use affirm_value::{InspectOptions, PropertyKey, Value, inspect_with, own_enumerable_properties};
use regex::Regex;

use crate::flags::{self, Flagged};

static PARTIAL_PHRASE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\shave\s").expect("static pattern"));
static NEGATED_PHRASE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\snot\s").expect("static pattern"));

/// Message slot text: literal, or produced on demand.
#[derive(Clone)]
pub enum MessageText {
	Literal(String),
	Producer(Arc<dyn Fn() -> String + Send + Sync>),
}

impl MessageText {
	pub fn producer<F>(f: F) -> Self
	where
		F: Fn() -> String + Send + Sync + 'static,
	{
		Self::Producer(Arc::new(f))
	}

	pub fn resolve(&self) -> String {
		match self {
			Self::Literal(text) => text.clone(),
			Self::Producer(f) => f(),
		}
	}
}

impl fmt::Debug for MessageText {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
			Self::Producer(_) => f.write_str("Producer(..)"),
		}
	}
}

impl From<&str> for MessageText {
	fn from(text: &str) -> Self {
		Self::Literal(text.to_string())
	}
}

impl From<String> for MessageText {
	fn from(text: String) -> Self {
		Self::Literal(text)
	}
}

/// Arguments of an `assert` call.
#[derive(Clone, Debug)]
pub struct MessageArgs {
	/// Text used when the assertion is not negated.
	pub message: Option<MessageText>,
	/// Text used when the `negate` flag is set.
	pub negated: Option<MessageText>,
	pub expected: Value,
	/// Overrides the subject as the actual value.
	pub actual: Option<Value>,
	pub show_diff: bool,
}

impl Default for MessageArgs {
	fn default() -> Self {
		Self {
			message: None,
			negated: None,
			expected: Value::Undefined,
			actual: None,
			show_diff: true,
		}
	}
}

impl MessageArgs {
	pub fn new(message: impl Into<MessageText>) -> Self {
		Self {
			message: Some(message.into()),
			..Self::default()
		}
	}

	pub fn negated(mut self, message: impl Into<MessageText>) -> Self {
		self.negated = Some(message.into());
		self
	}

	pub fn expected(mut self, expected: impl Into<Value>) -> Self {
		self.expected = expected.into();
		self
	}

	pub fn actual(mut self, actual: impl Into<Value>) -> Self {
		self.actual = Some(actual.into());
		self
	}

	pub fn show_diff(mut self, show_diff: bool) -> Self {
		self.show_diff = show_diff;
		self
	}

	/// Resolves the slot selected by `negate`; an empty slot yields `""`.
	fn select(&self, negate: bool) -> String {
		let slot = if negate { &self.negated } else { &self.message };
		slot.as_ref().map(MessageText::resolve).unwrap_or_default()
	}
}

fn is_negated<F: Flagged + ?Sized>(obj: &F) -> bool {
	flags::flag(obj, flags::NEGATE).is_truthy()
}

/// Builds the failure message for `obj`.
///
/// Substitutes `#{this}`, `#{act}` and `#{exp}` in one pass and prefixes a
/// `message` flag as `"<flag>: "`. Unrecognized `#{...}` tokens stay as they
/// are; replacement text is never re-scanned.
pub fn get_message<F: Flagged + ?Sized>(obj: &F, args: &MessageArgs, truncate_threshold: usize) -> String {
	let template = args.select(is_negated(obj));
	let subject = obj.subject();
	let actual = args.actual.as_ref().unwrap_or(&subject);

	let mut this_text = None;
	let mut act_text = None;
	let mut exp_text = None;

	let mut out = String::with_capacity(template.len());
	let mut rest = template.as_str();
	while let Some(start) = rest.find("#{") {
		out.push_str(&rest[..start]);
		let tail = &rest[start..];
		let (slot, value, len) = if tail.starts_with("#{this}") {
			(&mut this_text, &subject, 7)
		} else if tail.starts_with("#{act}") {
			(&mut act_text, actual, 6)
		} else if tail.starts_with("#{exp}") {
			(&mut exp_text, &args.expected, 6)
		} else {
			out.push_str("#{");
			rest = &tail[2..];
			continue;
		};
		out.push_str(slot.get_or_insert_with(|| obj_display(value, truncate_threshold)));
		rest = &tail[len..];
	}
	out.push_str(rest);

	match flags::flag(obj, flags::MESSAGE) {
		Value::String(prefix) if !prefix.is_empty() => format!("{prefix}: {out}"),
		Value::String(_) | Value::Undefined | Value::Null => out,
		other if other.is_truthy() => format!("{other}: {out}"),
		_ => out,
	}
}

/// Display form used in messages.
///
/// Values whose full rendering is at least `truncate_threshold` characters
/// long collapse to a short summary (functions, arrays, objects) or to the
/// truncated rendering (everything else). A threshold of `0` never collapses.
pub fn obj_display(value: &Value, truncate_threshold: usize) -> String {
	let full = inspect_with(value, &InspectOptions::with_truncate_threshold(0));
	if truncate_threshold == 0 || full.chars().count() < truncate_threshold {
		return full;
	}
	match value {
		Value::Function(f) if f.name().is_empty() => "[Function]".to_string(),
		Value::Function(f) => format!("[Function: {}]", f.name()),
		Value::Array(items) => format!("[ Array({}) ]", items.len()),
		Value::Object(_) => {
			let keys = own_enumerable_properties(value);
			let names: Vec<&str> = keys.iter().filter_map(PropertyKey::as_name).collect();
			let listed = if names.len() > 2 {
				format!("{}, ...", names[..2].join(", "))
			} else {
				names.join(", ")
			};
			format!("{{ Object ({listed}) }}")
		}
		_ => inspect_with(value, &InspectOptions::with_truncate_threshold(truncate_threshold)),
	}
}

/// Comparison operator reported with a failure.
///
/// An explicit `operator` flag wins. Otherwise the operator is inferred from
/// the selected message: none for empty text or a partial phrase (one with a
/// standalone `have`), a deep variant for object-like `expected`, and the
/// negated variant when `negate` is set or the text has a standalone `not`.
pub fn get_operator<F: Flagged + ?Sized>(obj: &F, args: &MessageArgs) -> Option<String> {
	match flags::flag(obj, flags::OPERATOR) {
		Value::String(op) if !op.is_empty() => return Some(op.to_string()),
		_ => {}
	}

	let negate = is_negated(obj);
	let text = args.select(negate);
	if text.is_empty() || PARTIAL_PHRASE.is_match(&text) {
		return None;
	}

	let deep = args.expected.is_object_like();
	let negated = negate || NEGATED_PHRASE.is_match(&text);
	let op = match (negated, deep) {
		(false, false) => "strictEqual",
		(false, true) => "deepStrictEqual",
		(true, false) => "notStrictEqual",
		(true, true) => "notDeepStrictEqual",
	};
	Some(op.to_string())
}

#[cfg(test)]
mod tests;
