//! Errors surfaced by order operations.

use orderflow_types::{OrderEvent, OrderId, OrderStatus};
use thiserror::Error;

/// Errors that can occur while creating, looking up or transitioning orders.
///
/// Both variants are terminal for the call that produced them. Nothing is
/// retried internally and a rejected transition never mutates the order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
	#[error("Order not found: {0}")]
	OrderNotFound(OrderId),
	#[error("Invalid transition: cannot {event} order {order_id} in state {current}")]
	InvalidTransition {
		order_id: OrderId,
		event: OrderEvent,
		current: OrderStatus,
	},
}

impl OrderError {
	pub fn is_not_found(&self) -> bool {
		matches!(self, OrderError::OrderNotFound(_))
	}

	pub fn is_invalid_transition(&self) -> bool {
		matches!(self, OrderError::InvalidTransition { .. })
	}
}
