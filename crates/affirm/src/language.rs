//! Language chains.
//!
//! Words that only make a chain read naturally (`expect(x).to.be...`). They
//! carry no checks; `not` negates every later assertion in the chain.

use affirm_registry::{Behavior, PluginDef, Registry, Utils, flags, set_flag};
use tracing::trace;

/// Chains registered as no-op properties.
pub const CHAINS: [&str; 17] = [
	"to", "be", "been", "is", "that", "which", "and", "has", "have", "with", "at", "of", "same", "but", "does",
	"still", "also",
];

pub const PLUGIN_NAME: &str = "language";

fn register(registry: &Registry, _: &Utils<'_>) {
	for chain in CHAINS {
		registry.add_property(chain, None);
	}
	registry.add_property(
		"not",
		Some(Behavior::getter(|this| {
			set_flag(this, flags::NEGATE, true);
			Ok(None)
		})),
	);
	trace!(count = CHAINS.len() + 1, "language chains registered");
}

inventory::submit! {
	PluginDef::new(PLUGIN_NAME, register)
}
