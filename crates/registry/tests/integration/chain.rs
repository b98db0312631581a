//! End-to-end chains through the fixture vocabulary.

use affirm_registry::{Access, Flagged, InvalidUsage, Value};

use crate::common::{contains_flag, registry};

#[test]
fn test_passing_chain() {
	let registry = registry();
	let done = registry
		.expect(Value::array([1, 2, 3]))
		.prop("to")
		.and_then(|a| a.prop("have"))
		.and_then(|a| a.method("lengthOf", &[Value::from(3)]))
		.expect("length 3");
	assert_eq!(done.subject(), Value::array([1, 2, 3]));
}

#[test]
fn test_negated_chain() {
	let registry = registry();
	registry
		.expect(0)
		.prop("to")
		.and_then(|a| a.prop("not"))
		.and_then(|a| a.prop("be"))
		.and_then(|a| a.prop("ok"))
		.expect("0 is falsy");

	let err = registry
		.expect("x")
		.prop("not")
		.and_then(|a| a.prop("ok"))
		.unwrap_err();
	assert_eq!(err.to_string(), "expected 'x' to be falsy");
}

#[test]
fn test_failure_reports_actual_override() {
	let registry = registry();
	let err = registry
		.expect_with_message("abc", "name")
		.prop("to")
		.and_then(|a| a.prop("have"))
		.and_then(|a| a.method("lengthOf", &[Value::from(2)]))
		.unwrap_err();
	let failure = err.as_failure().expect("assertion failure");
	assert_eq!(failure.message, "name: expected 'abc' to have a length of 2 but got 3");
	assert_eq!(failure.actual, Value::from(3));
	assert_eq!(failure.expected, Value::from(2));
	assert!(failure.show_diff);
	assert_eq!(failure.stack, vec!["expect", "to", "have"]);
}

#[test]
fn test_chainable_both_ways() {
	let registry = registry();
	let read = registry
		.expect(Value::array(["a", "b"]))
		.prop("to")
		.and_then(|a| a.prop("contain"))
		.expect("read contain");
	assert!(contains_flag(&read));

	let called = read.invoke(&[Value::from("a")]).expect("contains a");
	assert!(matches!(called, Access::Chain(ref a) if contains_flag(a)));

	registry
		.expect("haystack")
		.method("contain", &[Value::from("st")])
		.expect("substring");
}

#[test]
fn test_length_after_chainable_read() {
	let registry = registry();
	let read = registry.expect("abc").prop("contain").expect("read contain");
	let err = read.get("length").unwrap_err();
	assert_eq!(
		err.to_string(),
		"Invalid property: contain.length. Due to a compatibility issue, \"length\" cannot directly follow \"contain\". Use \"contain.lengthOf\" instead."
	);
}

#[test]
fn test_uninvoked_method_misuse() {
	let registry = registry();
	let access = registry.expect(1).get("equal").expect("method ref");
	let err = access.get("length").unwrap_err();
	assert_eq!(
		err.as_usage(),
		Some(&InvalidUsage::LengthBeforeCall {
			method: "equal".into()
		})
	);
	let err = access.get("ok").unwrap_err();
	assert_eq!(
		err.to_string(),
		"Invalid property: equal.ok. See docs for proper usage of \"equal\"."
	);
}

#[test]
fn test_typo_suggestion() {
	let registry = registry();
	let err = registry.expect(1).prop("to").and_then(|a| a.get("eqaul")).unwrap_err();
	assert_eq!(err.to_string(), "Invalid property: eqaul. Did you mean \"equal\"?");
}

#[test]
fn test_excluded_keys_read_undefined() {
	let registry = registry();
	for name in ["then", "catch", "inspect", "toJSON"] {
		let access = registry.expect(1).get(name).expect("exempt");
		assert_eq!(access.into_value(), Some(Value::Undefined), "{name}");
	}
}

#[test]
fn test_returned_value_replaces_chain() {
	let registry = registry();
	let access = registry.expect(1).prop("to").and_then(|a| a.call("answer", &[])).expect("answer");
	assert_eq!(access.into_value(), Some(Value::from(42)));
}

#[test]
fn test_message_truncation_follows_config() {
	let registry = registry();
	let long: Vec<Value> = (0..30).map(Value::from).collect();
	let err = registry
		.expect(Value::array(long.clone()))
		.method("equal", &[Value::from(1)])
		.unwrap_err();
	assert_eq!(err.to_string(), "expected [ Array(30) ] to equal 1");

	registry.update_config(|config| config.truncate_threshold = 0);
	let err = registry
		.expect(Value::array(long))
		.method("equal", &[Value::from(1)])
		.unwrap_err();
	assert!(err.to_string().starts_with("expected [ 0, 1, 2, 3,"));
	assert!(err.to_string().ends_with("29 ] to equal 1"));
}
