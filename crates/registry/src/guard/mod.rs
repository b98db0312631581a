//! Member-access validation.
//!
//! Reading a member that resolves to nothing is an error unless guarding is
//! off or the name is exempt. The error names the closest registered member
//! when one is within [`SUGGESTION_CAP`] edits.

use affirm_value::{PropertyKey, Value, own_enumerable_properties};

use crate::config::Config;
use crate::error::InvalidUsage;

/// Initial edit-distance budget for suggestions.
pub const SUGGESTION_CAP: usize = 4;

/// Names never offered as suggestions.
pub const INTERNAL_NAMES: [&str; 4] = ["__flags", "__methods", "_obj", "assert"];

/// Levenshtein distance between `a` and `b`, saturated at `cap`.
///
/// Gives up as soon as the result is known to reach `cap`: when the lengths
/// differ by `cap` or more, for cells `cap` or more off the diagonal, and when
/// a whole row is at least `cap`.
pub fn capped_distance(a: &str, b: &str, cap: usize) -> usize {
	let a: Vec<char> = a.chars().collect();
	let b: Vec<char> = b.chars().collect();
	distance_in_chars(&a, &b, cap)
}

fn distance_in_chars(a: &[char], b: &[char], cap: usize) -> usize {
	if a.len().abs_diff(b.len()) >= cap {
		return cap;
	}

	let mut prev: Vec<usize> = (0..=b.len()).map(|j| j.min(cap)).collect();
	let mut row = vec![0; b.len() + 1];
	for i in 1..=a.len() {
		row[0] = i.min(cap);
		let mut row_min = row[0];
		for j in 1..=b.len() {
			row[j] = if i.abs_diff(j) >= cap {
				cap
			} else {
				let substitute = prev[j - 1] + usize::from(a[i - 1] != b[j - 1]);
				(prev[j] + 1).min(row[j - 1] + 1).min(substitute).min(cap)
			};
			row_min = row_min.min(row[j]);
		}
		if row_min >= cap {
			return cap;
		}
		std::mem::swap(&mut prev, &mut row);
	}
	prev[b.len()]
}

/// Closest candidate to `name`, if any is under [`SUGGESTION_CAP`] edits.
///
/// The budget shrinks to the best distance seen, so the first of several
/// equally close candidates wins.
pub fn suggest<'a, I>(name: &str, candidates: I) -> Option<&'a str>
where
	I: IntoIterator<Item = &'a str>,
{
	let name: Vec<char> = name.chars().collect();
	let mut best = SUGGESTION_CAP;
	let mut suggestion = None;
	let mut buf = Vec::new();
	for candidate in candidates {
		if INTERNAL_NAMES.contains(&candidate) {
			continue;
		}
		if candidate.chars().count().abs_diff(name.len()) >= best {
			continue;
		}
		buf.clear();
		buf.extend(candidate.chars());
		let distance = distance_in_chars(&name, &buf, best);
		if distance < best {
			best = distance;
			suggestion = Some(candidate);
		}
	}
	suggestion
}

/// Whether unknown reads are rejected under `config`.
pub fn is_proxy_enabled(config: &Config) -> bool {
	config.use_proxy
}

/// Whether reading `name` can never raise.
fn is_exempt(name: &str, config: &Config) -> bool {
	name == "then" || !is_proxy_enabled(config) || config.is_excluded(name)
}

/// Validates a read of `name` that matched nothing.
///
/// `Ok` means the read yields `undefined`.
pub(crate) fn check_unknown<'a, I>(
	name: &str,
	candidates: I,
	config: &Config,
) -> Result<(), InvalidUsage>
where
	I: IntoIterator<Item = &'a str>,
{
	if is_exempt(name, config) {
		return Ok(());
	}
	Err(InvalidUsage::UnknownProperty {
		path: name.to_string(),
		suggestion: suggest(name, candidates).map(str::to_string),
	})
}

/// Validates a member read on an uninvoked method reference.
pub(crate) fn check_method_member(
	method: &str,
	property: &str,
	config: &Config,
) -> Result<(), InvalidUsage> {
	if property == "length" {
		return Err(length_error(method, false));
	}
	if is_exempt(property, config) {
		return Ok(());
	}
	Err(InvalidUsage::MethodMisuse {
		method: method.to_string(),
		property: property.to_string(),
	})
}

pub(crate) fn length_error(method: &str, chainable: bool) -> InvalidUsage {
	let method = method.to_string();
	if chainable {
		InvalidUsage::LengthAfterChainable { method }
	} else {
		InvalidUsage::LengthBeforeCall { method }
	}
}

#[derive(Clone, Debug)]
struct LengthGuard {
	method: String,
	chainable: bool,
}

#[derive(Clone, Debug)]
struct ProxyRules {
	method: Option<String>,
	config: Config,
}

/// A value whose member reads are validated.
///
/// Built with [`proxify`] and [`add_length_guard`]; a bare `Guarded` made
/// from a value reads members without any checks.
#[derive(Clone, Debug)]
pub struct Guarded {
	value: Value,
	proxy: Option<ProxyRules>,
	length_guard: Option<LengthGuard>,
}

impl From<Value> for Guarded {
	fn from(value: Value) -> Self {
		Self {
			value,
			proxy: None,
			length_guard: None,
		}
	}
}

impl Guarded {
	pub fn value(&self) -> &Value {
		&self.value
	}

	pub fn into_value(self) -> Value {
		self.value
	}

	/// Reads member `name`.
	pub fn get(&self, name: &str) -> Result<Value, InvalidUsage> {
		if name == "length" {
			if let Some(guard) = &self.length_guard {
				return Err(length_error(&guard.method, guard.chainable));
			}
		}
		if let Some(found) = member(&self.value, name) {
			return Ok(found);
		}
		let Some(rules) = &self.proxy else {
			return Ok(Value::Undefined);
		};
		if let Some(method) = &rules.method {
			return check_method_member(method, name, &rules.config).map(|()| Value::Undefined);
		}
		let keys = own_enumerable_properties(&self.value);
		let names = keys.iter().filter_map(PropertyKey::as_name);
		check_unknown(name, names, &rules.config).map(|()| Value::Undefined)
	}
}

/// Own member lookup: object properties and the `length` of list-likes.
fn member(value: &Value, name: &str) -> Option<Value> {
	match value {
		Value::Object(obj) => obj.get(name),
		_ if name == "length" => value.length().map(Value::from),
		_ => None,
	}
}

/// Wraps `value` so reads of unknown members fail.
///
/// With `non_chainable_method` set, every unknown read is reported as misuse
/// of that method rather than with a suggestion. When guarding is disabled
/// the value is returned unchecked.
pub fn proxify(
	value: impl Into<Guarded>,
	non_chainable_method: Option<&str>,
	config: &Config,
) -> Guarded {
	let mut guarded = value.into();
	if is_proxy_enabled(config) {
		guarded.proxy = Some(ProxyRules {
			method: non_chainable_method.map(str::to_string),
			config: config.clone(),
		});
	}
	guarded
}

/// Makes reading `length` on `target` fail with a usage hint for `method_name`.
pub fn add_length_guard(target: impl Into<Guarded>, method_name: &str, is_chainable: bool) -> Guarded {
	let mut guarded = target.into();
	guarded.length_guard = Some(LengthGuard {
		method: method_name.to_string(),
		chainable: is_chainable,
	});
	guarded
}
