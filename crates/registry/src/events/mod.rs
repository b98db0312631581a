//! Registration events.
//!
//! Every `add_*` call on a [`Registry`](crate::Registry) emits one
//! [`RegistryEvent`] before returning. Listeners run synchronously in
//! registration order against a snapshot taken when emission starts, so a
//! listener may add or remove listeners without affecting the current round.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::layer::Behavior;

/// Kind of registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
	AddMethod,
	AddProperty,
	AddChainableMethod,
}

impl EventKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::AddMethod => "addMethod",
			Self::AddProperty => "addProperty",
			Self::AddChainableMethod => "addChainableMethod",
		}
	}
}

impl fmt::Display for EventKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Payload of a registration event.
#[derive(Clone, Debug)]
pub struct RegistryEvent {
	pub kind: EventKind,
	pub name: String,
	pub behavior: Behavior,
	/// Chaining behavior, for [`EventKind::AddChainableMethod`] only.
	pub chaining: Option<Behavior>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Arc<dyn Fn(&RegistryEvent) + Send + Sync>;

struct Registration {
	id: ListenerId,
	kind: EventKind,
	listener: Listener,
}

/// Synchronous observer list keyed by [`EventKind`].
#[derive(Default)]
pub struct EventBus {
	next_id: AtomicU64,
	listeners: RwLock<Vec<Registration>>,
}

impl EventBus {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_listener<F>(&self, kind: EventKind, listener: F) -> ListenerId
	where
		F: Fn(&RegistryEvent) + Send + Sync + 'static,
	{
		let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
		self.listeners.write().push(Registration {
			id,
			kind,
			listener: Arc::new(listener),
		});
		id
	}

	/// Removes a listener; `false` if it was not registered.
	pub fn remove_listener(&self, id: ListenerId) -> bool {
		let mut listeners = self.listeners.write();
		let before = listeners.len();
		listeners.retain(|reg| reg.id != id);
		listeners.len() != before
	}

	pub fn listener_count(&self, kind: EventKind) -> usize {
		self.listeners.read().iter().filter(|reg| reg.kind == kind).count()
	}

	/// Delivers `event` to the listeners registered for its kind.
	pub fn emit(&self, event: &RegistryEvent) {
		let snapshot: Vec<Listener> = self
			.listeners
			.read()
			.iter()
			.filter(|reg| reg.kind == event.kind)
			.map(|reg| reg.listener.clone())
			.collect();
		for listener in snapshot {
			listener(event);
		}
	}
}

#[cfg(test)]
mod tests;
