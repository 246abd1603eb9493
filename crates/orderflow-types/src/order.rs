//! Order types for the orderflow system.
//!
//! This module defines order identifiers, lifecycle statuses, the events that
//! drive an order between statuses, and the point-in-time `Order` snapshot
//! handed out to callers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unique, monotonically issued order identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl OrderId {
	/// Returns the raw numeric identifier.
	pub fn get(self) -> u64 {
		self.0
	}
}

impl fmt::Display for OrderId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<u64> for OrderId {
	fn from(id: u64) -> Self {
		OrderId(id)
	}
}

/// Status of an order in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
	/// Order has been created but not yet paid.
	Created,
	/// Order has been paid and awaits delivery.
	Paid,
	/// Order has been handed over for delivery.
	Delivered,
	/// Order has been received by the customer.
	Received,
}

impl OrderStatus {
	/// Returns true when no further event can move the order.
	pub fn is_terminal(&self) -> bool {
		matches!(self, OrderStatus::Received)
	}
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OrderStatus::Created => write!(f, "CREATED"),
			OrderStatus::Paid => write!(f, "PAID"),
			OrderStatus::Delivered => write!(f, "DELIVERED"),
			OrderStatus::Received => write!(f, "RECEIVED"),
		}
	}
}

/// Named request to move an order through its lifecycle.
///
/// `Create` produces a new order rather than transitioning an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderEvent {
	Create,
	Pay,
	Deliver,
	Receive,
}

impl fmt::Display for OrderEvent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OrderEvent::Create => write!(f, "create"),
			OrderEvent::Pay => write!(f, "pay"),
			OrderEvent::Deliver => write!(f, "deliver"),
			OrderEvent::Receive => write!(f, "receive"),
		}
	}
}

/// Error returned when an event name is not part of the lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseEventError {
	#[error("Unknown order event: {0}")]
	UnknownEvent(String),
}

impl FromStr for OrderEvent {
	type Err = ParseEventError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"create" => Ok(OrderEvent::Create),
			"pay" => Ok(OrderEvent::Pay),
			"deliver" => Ok(OrderEvent::Deliver),
			"receive" => Ok(OrderEvent::Receive),
			_ => Err(ParseEventError::UnknownEvent(s.to_string())),
		}
	}
}

/// Point-in-time copy of an order.
///
/// Snapshots are detached from the registry: holding one grants no right to
/// mutate the order, and the status it carries may already be stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
	/// Unique identifier for this order.
	pub id: OrderId,
	/// Status observed when the snapshot was taken.
	pub status: OrderStatus,
	/// Number of transitions committed so far.
	pub version: u64,
	/// Timestamp when this order was created.
	pub created_at: u64,
	/// Timestamp when this order was last updated.
	pub updated_at: u64,
}
