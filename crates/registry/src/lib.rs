//! Extension engine for fluent assertion chains.
//!
//! Plugins register chain steps (methods, properties and hybrid chainable
//! members) on a [`Registry`]. Every step access produces a fresh
//! [`Assertion`] whose [`FlagStore`] is a selective copy of its
//! predecessor's; unknown members are rejected with a typo suggestion.
//!
//! # Modules
//!
//! - [`flags`] - per-chain flag storage and transfer
//! - [`registry`] - entries, override stacks and plugin use
//! - [`assertion`] - chain hops and the `assert` primitive
//! - [`guard`] - member-access validation and suggestions
//! - [`message`] - failure message templating and operator inference
//! - [`events`] - registration events
//! - [`utils`] - helper surface handed to plugins

pub mod assertion;
pub mod config;
pub mod error;
pub mod events;
pub mod flags;
pub mod guard;
pub mod layer;
pub mod message;
pub mod plugin;
pub mod registry;
pub mod utils;

pub use affirm_value::{Function, Object, PropertyKey, Symbol, Value};
pub use assertion::{Access, Assertion, MethodRef};
pub use config::Config;
pub use error::{AssertionFailure, ChainError, InvalidUsage, StepResult};
pub use events::{EventBus, EventKind, ListenerId, RegistryEvent};
pub use flags::{FlagStore, Flagged, flag, set_flag, transfer_flags};
pub use guard::{Guarded, add_length_guard, is_proxy_enabled, proxify};
pub use layer::{Behavior, Fallback};
pub use message::{MessageArgs, MessageText, get_message, get_operator, obj_display};
pub use plugin::{Plugin, PluginDef, static_plugins};
pub use registry::{EntryKind, Registry};
pub use utils::Utils;
