//! Transition table for the order lifecycle.
//!
//! ```text
//!   (none) --create--> CREATED --pay--> PAID --deliver--> DELIVERED --receive--> RECEIVED
//! ```
//!
//! Any `(status, event)` pair absent from the table is an invalid transition.

use crate::{OrderEvent, OrderStatus};
use once_cell::sync::Lazy;
use std::collections::HashMap;

// `None` as the source status stands for "no order yet".
static TRANSITIONS: Lazy<HashMap<(Option<OrderStatus>, OrderEvent), OrderStatus>> =
	Lazy::new(|| {
		HashMap::from([
			((None, OrderEvent::Create), OrderStatus::Created),
			((Some(OrderStatus::Created), OrderEvent::Pay), OrderStatus::Paid),
			((Some(OrderStatus::Paid), OrderEvent::Deliver), OrderStatus::Delivered),
			((Some(OrderStatus::Delivered), OrderEvent::Receive), OrderStatus::Received),
		])
	});

/// Looks up the status reached by applying `event` from `from`.
///
/// Returns `None` when the table holds no such transition.
pub fn transition(from: Option<OrderStatus>, event: OrderEvent) -> Option<OrderStatus> {
	TRANSITIONS.get(&(from, event)).copied()
}

/// Looks up the status reached by applying `event` to an existing order.
pub fn next_status(from: OrderStatus, event: OrderEvent) -> Option<OrderStatus> {
	transition(Some(from), event)
}
