//! Fixture plugin shared by the integration tests.

use std::sync::Arc;

use affirm_registry::{Behavior, Flagged, MessageArgs, Plugin, Registry, Value, flag, flags, set_flag};

/// Registry with [`fixture_plugin`] in use.
pub fn registry() -> Arc<Registry> {
	let _ = tracing_subscriber::fmt::try_init();
	let registry = Arc::new(Registry::default());
	registry.use_plugin(&fixture_plugin());
	registry
}

/// A small assertion vocabulary.
///
/// `to`, `be` and `have` are no-op chains, `not` negates, `equal` and `ok`
/// assert, `contain` is chainable and sets the `contains` flag on read,
/// `lengthOf` checks a length and `answer` returns 42 instead of continuing.
pub fn fixture_plugin() -> Plugin {
	Plugin::new("fixture", |registry, _| {
		for word in ["to", "be", "have"] {
			registry.add_property(word, None);
		}
		registry.add_property(
			"not",
			Some(Behavior::getter(|this| {
				set_flag(this, flags::NEGATE, true);
				Ok(None)
			})),
		);
		registry.add_property(
			"ok",
			Some(Behavior::getter(|this| {
				let truthy = this.subject().is_truthy();
				this.assert(
					truthy,
					MessageArgs::new("expected #{this} to be truthy").negated("expected #{this} to be falsy"),
				)?;
				Ok(None)
			})),
		);
		registry.add_method(
			"equal",
			Behavior::new(|this, args| {
				let expected = args.first().cloned().unwrap_or_default();
				let ok = this.subject() == expected;
				this.assert(
					ok,
					MessageArgs::new("expected #{this} to equal #{exp}")
						.negated("expected #{this} to not equal #{exp}")
						.expected(expected),
				)?;
				Ok(None)
			}),
		);
		registry.add_chainable_method(
			"contain",
			Behavior::new(|this, args| {
				let needle = args.first().cloned().unwrap_or_default();
				let found = match this.subject() {
					Value::Array(items) => items.contains(&needle),
					Value::String(text) => needle.as_str().is_some_and(|n| text.contains(n)),
					_ => false,
				};
				this.assert(
					found,
					MessageArgs::new("expected #{this} to contain #{exp}")
						.negated("expected #{this} to not contain #{exp}")
						.expected(needle),
				)?;
				Ok(None)
			}),
			Some(Behavior::getter(|this| {
				set_flag(this, "contains", true);
				Ok(None)
			})),
		);
		registry.add_method(
			"lengthOf",
			Behavior::new(|this, args| {
				let expected = args.first().cloned().unwrap_or_default();
				let length = this.subject().length().map(Value::from).unwrap_or_default();
				this.assert(
					length == expected,
					MessageArgs::new("expected #{this} to have a length of #{exp} but got #{act}")
						.negated("expected #{this} to not have a length of #{exp}")
						.expected(expected)
						.actual(length),
				)?;
				Ok(None)
			}),
		);
		registry.add_method("answer", Behavior::new(|_, _| Ok(Some(Value::from(42)))));
	})
}

/// Whether `contains` was set on the chain.
pub fn contains_flag(assertion: &affirm_registry::Assertion) -> bool {
	flag(assertion, "contains").is_truthy()
}
