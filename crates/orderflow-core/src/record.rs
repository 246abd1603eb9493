//! A single order and the lock guarding its lifecycle state.

use orderflow_types::{Order, OrderId, OrderStatus};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;

/// Mutable lifecycle state of an order. Only reachable through the record's lock.
#[derive(Debug)]
pub(crate) struct RecordState {
	pub(crate) status: OrderStatus,
	pub(crate) version: u64,
	pub(crate) updated_at: u64,
}

/// Shared, lock-guarded order entry owned by the [`OrderRegistry`](crate::OrderRegistry).
///
/// The identifier and creation time never change. The status can only be
/// changed by the [`TransitionEngine`](crate::TransitionEngine), which holds
/// the record's lock for the read-check-write of a single transition.
#[derive(Debug)]
pub struct OrderRecord {
	id: OrderId,
	created_at: u64,
	pub(crate) state: Mutex<RecordState>,
}

impl OrderRecord {
	/// Creates a record in the `CREATED` status.
	pub(crate) fn new(id: OrderId) -> Self {
		let now = now_secs();
		Self {
			id,
			created_at: now,
			state: Mutex::new(RecordState {
				status: OrderStatus::Created,
				version: 0,
				updated_at: now,
			}),
		}
	}

	pub fn id(&self) -> OrderId {
		self.id
	}

	pub fn created_at(&self) -> u64 {
		self.created_at
	}

	/// Returns the status as observed at the instant of the call.
	///
	/// The value may be stale as soon as this returns; transitions must go
	/// through the engine, which re-checks under the lock.
	pub async fn current_state(&self) -> OrderStatus {
		self.state.lock().await.status
	}

	/// Returns a detached copy of the whole order.
	pub async fn snapshot(&self) -> Order {
		let state = self.state.lock().await;
		self.snapshot_locked(&state)
	}

	/// Snapshot of a record that has not been shared yet.
	pub(crate) fn initial_snapshot(&self) -> Order {
		Order {
			id: self.id,
			status: OrderStatus::Created,
			version: 0,
			created_at: self.created_at,
			updated_at: self.created_at,
		}
	}

	/// Builds a snapshot from state the caller already holds locked.
	pub(crate) fn snapshot_locked(&self, state: &RecordState) -> Order {
		Order {
			id: self.id,
			status: state.status,
			version: state.version,
			created_at: self.created_at,
			updated_at: state.updated_at,
		}
	}
}

/// Current Unix time in seconds, or zero if the clock is before the epoch.
pub(crate) fn now_secs() -> u64 {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map(|d| d.as_secs())
		.unwrap_or_default()
}
