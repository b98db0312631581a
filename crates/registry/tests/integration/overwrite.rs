//! Overrides layered over the fixture vocabulary.

use affirm_registry::{Behavior, Flagged, MessageArgs, Object, Value, flag, flags};

use crate::common::registry;

fn model(id: i32) -> Value {
	let obj = Object::with_class("Model");
	obj.set("id", id);
	Value::Object(obj)
}

fn model_id(value: &Value) -> Option<Value> {
	let obj = value.as_object()?;
	(obj.class().as_deref() == Some("Model")).then(|| obj.get("id").unwrap_or_default())
}

/// Overrides `equal` to compare models by id and defer everything else.
fn install_model_equal(registry: &affirm_registry::Registry) {
	registry.overwrite_method("equal", |fallback| {
		Behavior::new(move |this, args| {
			let expected = args.first().cloned().unwrap_or_default();
			let (Some(actual_id), Some(expected_id)) = (model_id(&this.subject()), model_id(&expected)) else {
				return fallback.call(this, args);
			};
			this.assert(
				actual_id == expected_id,
				MessageArgs::new("expected model #{act} to equal model #{exp}")
					.negated("expected model #{act} to not equal model #{exp}")
					.expected(expected_id)
					.actual(actual_id),
			)?;
			Ok(None)
		})
	});
}

#[test]
fn test_override_handles_its_case() {
	let registry = registry();
	install_model_equal(&registry);
	registry
		.expect(model(7))
		.prop("to")
		.and_then(|a| a.method("equal", &[model(7)]))
		.expect("same id");

	let err = registry
		.expect(model(7))
		.prop("to")
		.and_then(|a| a.method("equal", &[model(8)]))
		.unwrap_err();
	assert_eq!(err.to_string(), "expected model 7 to equal model 8");
}

#[test]
fn test_override_defers_to_fallback() {
	let registry = registry();
	install_model_equal(&registry);
	registry.expect(3).method("equal", &[Value::from(3)]).expect("plain equal");

	let err = registry
		.expect(3)
		.prop("to")
		.and_then(|a| a.method("equal", &[Value::from(4)]))
		.unwrap_err();
	let failure = err.as_failure().expect("assertion failure");
	assert_eq!(failure.message, "expected 3 to equal 4");
	assert_eq!(failure.stack, vec!["expect", "to"]);
}

#[test]
fn test_override_sees_lock_and_restores_it() {
	let registry = registry();
	registry.overwrite_property("ok", |fallback| {
		Behavior::getter(move |this| {
			assert!(flag(this, flags::LOCK_SSFI).is_truthy());
			fallback.call(this, &[])
		})
	});
	let done = registry.expect(1).prop("ok").expect("1 is truthy");
	assert!(flag(&done, flags::LOCK_SSFI).is_undefined());
}

#[test]
fn test_override_chain_inside_keeps_blame() {
	let registry = registry();
	registry.overwrite_method("equal", |fallback| {
		Behavior::new(move |this, args| {
			// delegate through a further chain on the same receiver
			this.prop("be")?.call("lengthOf", &[Value::from(99)])?;
			fallback.call(this, args)
		})
	});

	let err = registry
		.expect("abc")
		.prop("to")
		.and_then(|a| a.method("equal", &[Value::from("abc")]))
		.unwrap_err();
	let failure = err.as_failure().expect("assertion failure");
	assert_eq!(failure.message, "expected 'abc' to have a length of 99 but got 3");
	assert_eq!(failure.stack, vec!["expect", "to"]);
}

#[test]
fn test_chainable_override() {
	let registry = registry();
	registry.overwrite_chainable_method(
		"contain",
		|fallback| {
			Behavior::new(move |this, args| {
				if flag(this, "deep").is_truthy() {
					return Ok(Some(Value::from("deep contain")));
				}
				fallback.call(this, args)
			})
		},
		|fallback| {
			Behavior::getter(move |this| {
				fallback.call(this, &[])?;
				let deep = this.subject().is_object_like();
				affirm_registry::set_flag(this, "deep", deep);
				Ok(None)
			})
		},
	);

	let access = registry
		.expect(Value::array([1]))
		.prop("contain")
		.and_then(|a| a.invoke(&[Value::from(1)]))
		.expect("deep path");
	assert_eq!(access.into_value(), Some(Value::from("deep contain")));

	registry.expect("text").method("contain", &[Value::from("ex")]).expect("fallback path");
}
