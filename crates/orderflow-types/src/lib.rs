//! Common types module for the orderflow system.
//!
//! This module defines the lifecycle states, events, order snapshots and the
//! transition table shared by every orderflow component. Nothing here holds
//! mutable state, so all of it can be shared freely between callers.

/// Lifecycle notifications published when orders change.
pub mod events;
/// Order identifiers, statuses, events and snapshots.
pub mod order;
/// The closed transition table between lifecycle states.
pub mod transitions;

pub use events::*;
pub use order::*;
pub use transitions::{next_status, transition};
