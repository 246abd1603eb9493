//! Lifecycle notifications.
//!
//! Notifications describe what already happened to an order. They are
//! informational: every failure is still returned to the caller that caused it.

use crate::{Order, OrderEvent, OrderId, OrderStatus};
use serde::{Deserialize, Serialize};

/// Notification published whenever an order is created or an event is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleEvent {
	/// A new order has been registered.
	Created { order: Order },
	/// An event was applied and the order moved to a new status.
	Transitioned {
		order_id: OrderId,
		event: OrderEvent,
		from: OrderStatus,
		to: OrderStatus,
	},
	/// An event was rejected because it is not legal from the current status.
	Rejected {
		order_id: OrderId,
		event: OrderEvent,
		current: OrderStatus,
	},
}

impl LifecycleEvent {
	/// Returns the order this notification concerns.
	pub fn order_id(&self) -> OrderId {
		match self {
			LifecycleEvent::Created { order } => order.id,
			LifecycleEvent::Transitioned { order_id, .. } => *order_id,
			LifecycleEvent::Rejected { order_id, .. } => *order_id,
		}
	}
}
