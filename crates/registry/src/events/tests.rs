use std::sync::Arc;

use parking_lot::Mutex;

use super::*;

fn event(kind: EventKind, name: &str) -> RegistryEvent {
	RegistryEvent {
		kind,
		name: name.to_string(),
		behavior: Behavior::noop(),
		chaining: None,
	}
}

#[test]
fn test_listeners_filtered_by_kind() {
	let bus = EventBus::new();
	let seen = Arc::new(Mutex::new(Vec::new()));

	let sink = seen.clone();
	bus.add_listener(EventKind::AddMethod, move |ev| sink.lock().push(ev.name.clone()));

	bus.emit(&event(EventKind::AddMethod, "equal"));
	bus.emit(&event(EventKind::AddProperty, "ok"));

	assert_eq!(*seen.lock(), vec!["equal".to_string()]);
}

#[test]
fn test_listeners_run_in_registration_order() {
	let bus = EventBus::new();
	let order = Arc::new(Mutex::new(Vec::new()));
	for i in 0..3 {
		let order = order.clone();
		bus.add_listener(EventKind::AddProperty, move |_| order.lock().push(i));
	}
	bus.emit(&event(EventKind::AddProperty, "x"));
	assert_eq!(*order.lock(), vec![0, 1, 2]);
}

#[test]
fn test_remove_listener() {
	let bus = EventBus::new();
	let id = bus.add_listener(EventKind::AddMethod, |_| {});
	assert_eq!(bus.listener_count(EventKind::AddMethod), 1);
	assert!(bus.remove_listener(id));
	assert!(!bus.remove_listener(id));
	assert_eq!(bus.listener_count(EventKind::AddMethod), 0);
}

/// A listener registering another listener mid-dispatch only affects the
/// next emission.
#[test]
fn test_mutation_during_dispatch_applies_next_round() {
	let bus = Arc::new(EventBus::new());
	let calls = Arc::new(Mutex::new(0));

	let inner_bus = bus.clone();
	let inner_calls = calls.clone();
	bus.add_listener(EventKind::AddMethod, move |_| {
		let calls = inner_calls.clone();
		inner_bus.add_listener(EventKind::AddMethod, move |_| *calls.lock() += 1);
	});

	bus.emit(&event(EventKind::AddMethod, "a"));
	assert_eq!(*calls.lock(), 0);
	assert_eq!(bus.listener_count(EventKind::AddMethod), 2);

	bus.emit(&event(EventKind::AddMethod, "b"));
	assert_eq!(*calls.lock(), 1);
}

#[test]
fn test_kind_names() {
	assert_eq!(EventKind::AddMethod.as_str(), "addMethod");
	assert_eq!(EventKind::AddProperty.to_string(), "addProperty");
	assert_eq!(EventKind::AddChainableMethod.as_str(), "addChainableMethod");
}
