use affirm_value::Function;
use rstest::rstest;

use super::*;
use crate::flags::{FlagStore, set_flag};

fn subject(value: impl Into<Value>) -> FlagStore {
	let mut store = FlagStore::new();
	set_flag(&mut store, flags::OBJECT, value);
	store
}

#[rstest]
#[case("no tokens here", "no tokens here")]
#[case("expected #{this} to be #{exp}", "expected 'foo' to be 'bar'")]
#[case("#{exp} #{act} #{this}", "'bar' 'foo' 'foo'")]
#[case("#{this} and #{this}", "'foo' and 'foo'")]
#[case("cost $$ for #{exp}", "cost $$ for 'bar'")]
#[case("keep #{other} and #{", "keep #{other} and #{")]
fn test_template_substitution(#[case] template: &str, #[case] expected: &str) {
	let obj = subject("foo");
	let args = MessageArgs::new(template).expected("bar");
	assert_eq!(get_message(&obj, &args, 40), expected);
}

#[test]
fn test_replacement_text_is_not_rescanned() {
	let obj = subject("#{exp}");
	let args = MessageArgs::new("#{this}").expected("bar");
	assert_eq!(get_message(&obj, &args, 40), "'#{exp}'");
}

#[test]
fn test_explicit_actual_overrides_subject() {
	let obj = subject("foo");
	let args = MessageArgs::new("#{act} vs #{this}").actual(3);
	assert_eq!(get_message(&obj, &args, 40), "3 vs 'foo'");
}

#[test]
fn test_negated_slot_is_selected() {
	let mut obj = subject(1);
	set_flag(&mut obj, flags::NEGATE, true);
	let args = MessageArgs::new("positive").negated("negative #{this}");
	assert_eq!(get_message(&obj, &args, 40), "negative 1");
}

#[test]
fn test_producer_runs_lazily() {
	let obj = subject(1);
	let args = MessageArgs::new(MessageText::producer(|| "made #{this}".to_string()));
	assert_eq!(get_message(&obj, &args, 40), "made 1");
}

#[test]
fn test_missing_slot_yields_empty_text() {
	let mut obj = subject(1);
	set_flag(&mut obj, flags::NEGATE, true);
	assert_eq!(get_message(&obj, &MessageArgs::new("only positive"), 40), "");
}

#[test]
fn test_message_flag_is_prefixed() {
	let mut obj = subject(1);
	set_flag(&mut obj, flags::MESSAGE, "custom");
	let args = MessageArgs::new("got #{this}");
	assert_eq!(get_message(&obj, &args, 40), "custom: got 1");
}

#[test]
fn test_obj_display_collapses_long_renderings() {
	let long_array = Value::array(0..50);
	assert_eq!(obj_display(&long_array, 40), "[ Array(50) ]");

	let record = Value::record([
		("alpha", "aaaaaaaaaa"),
		("beta", "bbbbbbbbbb"),
		("gamma", "cccccccccc"),
	]);
	assert_eq!(obj_display(&record, 40), "{ Object (alpha, beta, ...) }");

	let short = Value::record([("a", 1)]);
	assert_eq!(obj_display(&short, 40), "{ a: 1 }");

	assert_eq!(obj_display(&Value::array(0..50), 0).matches(", ").count(), 49);
}

#[test]
fn test_obj_display_functions() {
	let named = Value::from(Function::new("averyveryverylongfunctionnamethatistoolong"));
	assert_eq!(
		obj_display(&named, 40),
		"[Function: averyveryverylongfunctionnamethatistoolong]"
	);
	assert_eq!(obj_display(&Value::from(Function::anonymous()), 5), "[Function]");
}

#[rstest]
#[case(Value::record([("a", 1)]), "expected #{this} to equal #{exp}", false, Some("deepStrictEqual"))]
#[case(Value::array([1]), "expected #{this} to equal #{exp}", false, Some("deepStrictEqual"))]
#[case(Value::from(Function::new("f")), "expected #{this} to be #{exp}", false, Some("deepStrictEqual"))]
#[case(Value::from("x"), "expected #{this} to equal #{exp}", false, Some("strictEqual"))]
#[case(Value::from(1), "expected #{this} to equal #{exp}", false, Some("strictEqual"))]
#[case(Value::from(1), "expected #{this} to not equal #{exp}", false, Some("notStrictEqual"))]
#[case(Value::array([1]), "expected #{this} to not equal #{exp}", false, Some("notDeepStrictEqual"))]
#[case(Value::from(1), "expected #{this} to equal #{exp}", true, Some("notStrictEqual"))]
#[case(Value::from(1), "expected #{this} to have a property", false, None)]
#[case(Value::from(1), "", false, None)]
fn test_operator_inference(
	#[case] expected: Value,
	#[case] text: &str,
	#[case] negate: bool,
	#[case] operator: Option<&str>,
) {
	let mut obj = subject(1);
	set_flag(&mut obj, flags::NEGATE, negate);
	let args = MessageArgs::new(text).negated(text).expected(expected);
	assert_eq!(get_operator(&obj, &args).as_deref(), operator);
}

#[test]
fn test_operator_flag_wins() {
	let mut obj = subject(1);
	set_flag(&mut obj, flags::OPERATOR, "match");
	let args = MessageArgs::new("expected #{this} to have a thing");
	assert_eq!(get_operator(&obj, &args).as_deref(), Some("match"));
}

#[test]
fn test_operator_uses_producer_text() {
	let obj = subject(1);
	let args = MessageArgs::new(MessageText::producer(|| "will have nothing".into()));
	assert_eq!(get_operator(&obj, &args), None);
}
