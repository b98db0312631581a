//! Plugin use, static plugin definitions and the helper surface.

use std::sync::Arc;

use affirm_registry::{
	Behavior, EventKind, Flagged, Plugin, PluginDef, Registry, Utils, Value, static_plugins,
};
use parking_lot::Mutex;

use crate::common::{fixture_plugin, registry};

fn register_positive(registry: &Registry, utils: &Utils<'_>) {
	let threshold = utils.config().truncate_threshold;
	registry.add_property(
		"positive",
		Some(Behavior::getter(move |this| {
			let n = this.subject().as_f64().unwrap_or(f64::NAN);
			this.assert(
				n > 0.0,
				affirm_registry::MessageArgs::new(format!("expected #{{this}} to be positive (threshold {threshold})")),
			)?;
			Ok(None)
		})),
	);
}

inventory::submit! {
	PluginDef::new("positive", register_positive)
}

fn positive_def() -> &'static PluginDef {
	static_plugins()
		.find(|def| def.name == "positive")
		.expect("positive plugin should be submitted")
}

#[test]
fn test_static_plugin_is_collected() {
	let registry = Arc::new(Registry::default());
	assert!(registry.use_plugin(&Plugin::from_def(positive_def())));
	assert!(!registry.use_plugin(&Plugin::from_def(positive_def())));
	registry.expect(3).prop("positive").expect("3 is positive");

	let err = registry.expect(-1).prop("positive").unwrap_err();
	assert_eq!(err.to_string(), "expected -1 to be positive (threshold 40)");
}

#[test]
fn test_fixture_plugin_is_idempotent_per_handle() {
	let registry = registry();
	let before = registry.names();
	let again = fixture_plugin();
	// a fresh handle is a distinct plugin and re-registers in place
	assert!(registry.use_plugin(&again));
	assert!(!registry.use_plugin(&again));
	assert_eq!(registry.names(), before);
}

#[test]
fn test_plugin_listens_to_later_registrations() {
	let registry = registry();
	let seen = Arc::new(Mutex::new(Vec::new()));
	let sink = seen.clone();
	let watcher = Plugin::new("watcher", move |_, utils| {
		let sink = sink.clone();
		utils.add_event_listener(EventKind::AddMethod, move |ev| sink.lock().push(ev.name.clone()));
	});
	registry.use_plugin(&watcher);

	registry.add_method("above", Behavior::noop());
	registry.add_property("positive", None);
	registry.add_method("below", Behavior::noop());
	assert_eq!(*seen.lock(), vec!["above", "below"]);
}

#[test]
fn test_listener_removal_through_utils() {
	let registry = registry();
	let seen = Arc::new(Mutex::new(0));
	let sink = seen.clone();
	let utils = registry.utils();
	let id = utils.add_event_listener(EventKind::AddProperty, move |_| *sink.lock() += 1);
	registry.add_property("first", None);
	assert!(utils.remove_event_listener(id));
	assert!(!utils.remove_event_listener(id));
	registry.add_property("second", None);
	assert_eq!(*seen.lock(), 1);
}

#[test]
fn test_utils_helpers() {
	let registry = registry();
	let utils = registry.utils();
	let mut source = registry.expect("subject");
	utils.set_flag(&mut source, "tag", "kept");

	let mut target = registry.expect(0);
	utils.transfer_flags(&source, &mut target, false);
	assert_eq!(utils.flag(&target, "tag"), Value::from("kept"));
	assert_eq!(target.subject(), Value::from(0));

	let long = Value::array((0..30).map(Value::from));
	assert_eq!(utils.obj_display(&long), "[ Array(30) ]");
	assert!(utils.inspect(&long).contains('…'));
	assert!(utils.compare_by_inspect(&Value::from("a"), &Value::from("b")) < 0);
	assert!(utils.is_proxy_enabled());

	let guarded = utils.add_length_guard(Value::Undefined, "contain", true);
	assert!(guarded.get("length").is_err());
	let proxied = utils.proxify(Value::record([("size", 1)]), None);
	assert_eq!(proxied.get("size"), Ok(Value::from(1)));
	assert_eq!(
		proxied.get("szie").unwrap_err().to_string(),
		"Invalid property: szie. Did you mean \"size\"?"
	);
}
