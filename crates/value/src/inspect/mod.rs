//! Deep value rendering for diagnostics.
//!
//! # Role
//!
//! Turns any [`Value`] into a single-line, deterministic string. Failure
//! messages, `compare_by_inspect` and `Debug` output all go through here.
//!
//! # Invariants
//!
//! - Never panics on self-referential input: an object already on the render
//!   path prints as `[Circular]`.
//! - Containers nested deeper than [`InspectOptions::depth`] collapse to a
//!   bracketed tag (`[Object]`, `[Array]`, ...).
//! - Lists are cut against a character budget; the cut is marked with an
//!   ellipsis annotated with the number of items left out.
//! - A custom hook either supplies finished text or a replacement value that
//!   is rendered in place of the hooked object.

mod number;
mod text;

use std::sync::Arc;

use crate::{Function, Object, Property, PropertyKey, TypedArray, Value};

/// Default nesting depth rendered before collapsing containers.
pub const DEFAULT_DEPTH: usize = 2;

/// Default character budget.
pub const DEFAULT_TRUNCATE: usize = 40;

const SEPARATOR: &str = ", ";

/// Custom inspection hook. Receives the remaining depth and the active options.
pub type InspectHook = Arc<dyn Fn(usize, &InspectOptions) -> Inspected + Send + Sync>;

/// Result of a custom inspection hook.
pub enum Inspected {
	/// Finished text, emitted verbatim.
	Text(String),
	/// A stand-in value, rendered recursively.
	Value(Value),
}

/// Visual class of a rendered fragment, used when colors are enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
	Number,
	BigInt,
	Boolean,
	String,
	Symbol,
	Null,
	Undefined,
	Special,
}

impl Style {
	fn ansi(self) -> (u8, u8) {
		match self {
			Self::Number | Self::BigInt | Self::Boolean => (33, 39),
			Self::String | Self::Symbol => (32, 39),
			Self::Null => (1, 22),
			Self::Undefined => (90, 39),
			Self::Special => (36, 39),
		}
	}
}

/// Rendering options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InspectOptions {
	/// Container nesting rendered before collapsing.
	pub depth: usize,
	/// Wrap primitives in ANSI color codes.
	pub colors: bool,
	/// Render non-enumerable properties too.
	pub show_hidden: bool,
	/// Character budget; `usize::MAX` disables truncation.
	pub truncate: usize,
}

impl Default for InspectOptions {
	fn default() -> Self {
		Self {
			depth: DEFAULT_DEPTH,
			colors: false,
			show_hidden: false,
			truncate: DEFAULT_TRUNCATE,
		}
	}
}

impl InspectOptions {
	/// Options for a configured truncation threshold, where `0` means unlimited.
	pub fn with_truncate_threshold(threshold: usize) -> Self {
		Self {
			truncate: if threshold == 0 { usize::MAX } else { threshold },
			..Self::default()
		}
	}

	/// Applies `style` to `text` when colors are enabled.
	pub fn stylize(&self, text: &str, style: Style) -> String {
		if !self.colors {
			return text.to_string();
		}
		let (open, close) = style.ansi();
		format!("\u{1b}[{open}m{text}\u{1b}[{close}m")
	}
}

/// Renders `value` with default options.
pub fn inspect(value: &Value) -> String {
	inspect_with(value, &InspectOptions::default())
}

pub fn inspect_with(value: &Value, options: &InspectOptions) -> String {
	let mut inspector = Inspector {
		options,
		seen: Vec::new(),
	};
	inspector.render(value, 0, options.truncate)
}

/// Orders two values by their rendered text.
///
/// Returns `-1` when `a` renders strictly before `b` and `1` otherwise. Equal
/// renderings yield `1`, never `0`, so this is not a total order and is not
/// exposed as [`std::cmp::Ordering`].
pub fn compare_by_inspect(a: &Value, b: &Value) -> i32 {
	if inspect(a) < inspect(b) { -1 } else { 1 }
}

struct Inspector<'a> {
	options: &'a InspectOptions,
	/// Addresses of objects on the current render path.
	seen: Vec<usize>,
}

impl Inspector<'_> {
	fn style(&self, text: &str, style: Style) -> String {
		self.options.stylize(text, style)
	}

	fn render(&mut self, value: &Value, depth: usize, budget: usize) -> String {
		match value {
			Value::Undefined => self.style("undefined", Style::Undefined),
			Value::Null => self.style("null", Style::Null),
			Value::Bool(b) => self.style(if *b { "true" } else { "false" }, Style::Boolean),
			Value::Number(n) => self.style(&number::format(*n), Style::Number),
			Value::BigInt(n) => self.style(&format!("{n}n"), Style::BigInt),
			Value::String(s) => self.style(&text::quote(s, budget.saturating_sub(2)), Style::String),
			Value::Symbol(sym) => self.style(
				&format!("Symbol({})", sym.description().unwrap_or_default()),
				Style::Symbol,
			),
			Value::Function(f) => self.style(&function_label(f), Style::Special),
			Value::Array(items) => self.render_array(items, depth, budget),
			Value::TypedArray(array) => self.render_typed(array, budget),
			Value::Map(entries) => self.render_map(entries, depth, budget),
			Value::Set(items) => self.render_set(items, depth, budget),
			Value::Object(obj) => self.render_object(obj, depth, budget),
		}
	}

	fn render_array(&mut self, items: &[Value], depth: usize, budget: usize) -> String {
		if items.is_empty() {
			return "[]".to_string();
		}
		if depth > self.options.depth {
			return "[Array]".to_string();
		}
		let inner = self.list(items, budget.saturating_sub(4), |this, item, b| {
			this.render(item, depth + 1, b)
		});
		format!("[ {inner} ]")
	}

	fn render_typed(&mut self, array: &TypedArray, budget: usize) -> String {
		let tag = array.kind().tag();
		if array.is_empty() {
			return format!("{tag}[]");
		}
		let budget = budget.saturating_sub(tag.len() + 4);
		let inner = self.list(array.elements(), budget, |this, n, _| {
			this.style(&number::format(*n), Style::Number)
		});
		format!("{tag}[ {inner} ]")
	}

	fn render_map(&mut self, entries: &[(Value, Value)], depth: usize, budget: usize) -> String {
		if entries.is_empty() {
			return "Map{}".to_string();
		}
		if depth > self.options.depth {
			return "[Map]".to_string();
		}
		let inner = self.list(entries, budget.saturating_sub(7), |this, (key, value), b| {
			let key = this.render(key, depth + 1, b);
			let rest = b.saturating_sub(text::char_len(&key) + 4);
			let value = this.render(value, depth + 1, rest);
			format!("{key} => {value}")
		});
		format!("Map{{ {inner} }}")
	}

	fn render_set(&mut self, items: &[Value], depth: usize, budget: usize) -> String {
		if items.is_empty() {
			return "Set{}".to_string();
		}
		if depth > self.options.depth {
			return "[Set]".to_string();
		}
		let inner = self.list(items, budget.saturating_sub(7), |this, item, b| {
			this.render(item, depth + 1, b)
		});
		format!("Set{{ {inner} }}")
	}

	fn render_object(&mut self, obj: &Object, depth: usize, budget: usize) -> String {
		let addr = obj.addr();
		if self.seen.contains(&addr) {
			return self.style("[Circular]", Style::Special);
		}

		if let Some(hook) = obj.inspect_hook() {
			let remaining = self.options.depth.saturating_sub(depth);
			match hook(remaining, self.options) {
				Inspected::Text(text) => return text,
				Inspected::Value(Value::Object(ref same)) if same.ptr_eq(obj) => {}
				Inspected::Value(replacement) => {
					self.seen.push(addr);
					let out = self.render(&replacement, depth, budget);
					self.seen.pop();
					return out;
				}
			}
		}

		let class = obj.class();
		let (mut props, symbols): (Vec<Property>, Vec<Property>) = obj
			.properties()
			.into_iter()
			.filter(|p| p.enumerable || self.options.show_hidden)
			.partition(|p| matches!(p.key, PropertyKey::Name(_)));
		props.extend(symbols);

		let prefix = class.unwrap_or_default();
		if props.is_empty() {
			return format!("{prefix}{{}}");
		}
		if depth > self.options.depth {
			let tag = if prefix.is_empty() { "Object" } else { &prefix };
			return format!("[{tag}]");
		}

		self.seen.push(addr);
		let budget = budget.saturating_sub(text::char_len(&prefix) + 4);
		let inner = self.list(&props, budget, |this, prop, b| {
			this.render_property(prop, depth, b)
		});
		self.seen.pop();
		format!("{prefix}{{ {inner} }}")
	}

	fn render_property(&mut self, prop: &Property, depth: usize, budget: usize) -> String {
		let key = match &prop.key {
			PropertyKey::Name(name) if text::is_identifier(name) => name.clone(),
			PropertyKey::Name(name) => self.style(&text::quote(name, usize::MAX), Style::String),
			PropertyKey::Symbol(sym) => format!(
				"[{}]",
				self.style(
					&format!("Symbol({})", sym.description().unwrap_or_default()),
					Style::Symbol
				)
			),
		};
		let rest = budget.saturating_sub(text::char_len(&key) + 2);
		let value = self.render(&prop.value, depth + 1, rest);
		format!("{key}: {value}")
	}

	/// Joins rendered items with `, ` until the budget runs out.
	///
	/// An item is only emitted if the marker for the items after it would
	/// still fit, so a cut list always ends in `…(n)` with `n` the count of
	/// items left out. The last item is swapped for `…(1)` only when it does
	/// not fit but the marker does.
	fn list<T>(
		&mut self,
		items: &[T],
		budget: usize,
		mut item: impl FnMut(&mut Self, &T, usize) -> String,
	) -> String {
		let mut out = String::new();
		let mut used = 0usize;
		for (i, entry) in items.iter().enumerate() {
			let last = i + 1 == items.len();
			let sep = if last { 0 } else { SEPARATOR.len() };
			let rendered = item(self, entry, budget.saturating_sub(used + sep));
			let piece = text::char_len(&rendered) + sep;

			if last {
				let marker = text::ellipsis(1);
				if used + piece > budget && used + text::char_len(&marker) <= budget {
					out.push_str(&marker);
				} else {
					out.push_str(&rendered);
				}
				break;
			}

			let rest = text::ellipsis(items.len() - i - 1);
			if used + piece + text::char_len(&rest) > budget {
				out.push_str(&text::ellipsis(items.len() - i));
				break;
			}
			out.push_str(&rendered);
			out.push_str(SEPARATOR);
			used += piece;
		}
		out
	}
}

fn function_label(f: &Function) -> String {
	if f.name().is_empty() {
		"[Function]".to_string()
	} else {
		format!("[Function {}]", f.name())
	}
}
