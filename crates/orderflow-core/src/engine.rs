//! Transition engine enforcing the order lifecycle.
//!
//! The read-check-write of a transition happens entirely under the order's
//! own lock. Two concurrent `pay` calls on one order therefore produce exactly
//! one success; the loser sees `PAID` and is rejected. Orders never share a
//! lock, so a transition on one order cannot delay another.

use crate::event_bus::EventBus;
use crate::record::{now_secs, OrderRecord};
use crate::OrderError;
use orderflow_types::{next_status, LifecycleEvent, Order, OrderEvent};
use tracing::instrument;

/// Applies lifecycle events to order records.
pub struct TransitionEngine {
	event_bus: EventBus,
}

impl TransitionEngine {
	pub fn new(event_bus: EventBus) -> Self {
		Self { event_bus }
	}

	/// Applies `event` to `order` atomically.
	///
	/// On success returns the committed snapshot. If the transition table has
	/// no entry for the current status and `event`, the order is left
	/// untouched and `InvalidTransition` reports the status actually observed.
	/// `Create` is never valid here since existing orders have a status.
	#[instrument(skip_all, fields(order_id = %order.id(), %event))]
	pub async fn apply(
		&self,
		order: &OrderRecord,
		event: OrderEvent,
	) -> Result<Order, OrderError> {
		let mut state = order.state.lock().await;
		let from = state.status;

		let Some(to) = next_status(from, event) else {
			tracing::warn!(current = %from, "Rejected transition");
			self.event_bus
				.publish(LifecycleEvent::Rejected {
					order_id: order.id(),
					event,
					current: from,
				})
				.ok();
			return Err(OrderError::InvalidTransition {
				order_id: order.id(),
				event,
				current: from,
			});
		};

		state.status = to;
		state.version += 1;
		state.updated_at = now_secs();

		// Published before unlocking so per-order notifications keep commit order.
		self.event_bus
			.publish(LifecycleEvent::Transitioned {
				order_id: order.id(),
				event,
				from,
				to,
			})
			.ok();
		tracing::info!(%from, %to, "Order transitioned");

		Ok(order.snapshot_locked(&state))
	}
}
