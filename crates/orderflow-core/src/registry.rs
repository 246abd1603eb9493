//! In-memory order registry.
//!
//! Maps identifiers to [`OrderRecord`]s. The backing map is sharded, so
//! concurrent creations and lookups do not serialize on a single lock, and
//! identifiers come from an atomic counter so they are never reused.

use crate::event_bus::EventBus;
use crate::record::OrderRecord;
use crate::OrderError;
use dashmap::DashMap;
use orderflow_types::{LifecycleEvent, Order, OrderId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Exclusive owner of all order records.
pub struct OrderRegistry {
	orders: DashMap<OrderId, Arc<OrderRecord>>,
	next_id: AtomicU64,
	event_bus: EventBus,
}

impl OrderRegistry {
	pub fn new(event_bus: EventBus) -> Self {
		Self {
			orders: DashMap::new(),
			next_id: AtomicU64::new(1),
			event_bus,
		}
	}

	/// Allocates the next identifier and registers a new order in `CREATED`.
	pub fn create_order(&self) -> OrderId {
		let id = OrderId(self.next_id.fetch_add(1, Ordering::SeqCst));
		let record = Arc::new(OrderRecord::new(id));
		let snapshot = record.initial_snapshot();

		self.orders.insert(id, record);
		tracing::info!(order_id = %id, "Created order");

		self.event_bus
			.publish(LifecycleEvent::Created { order: snapshot })
			.ok();

		id
	}

	/// Looks up the record for `id`.
	pub fn find(&self, id: OrderId) -> Result<Arc<OrderRecord>, OrderError> {
		match self.orders.get(&id) {
			Some(entry) => Ok(Arc::clone(entry.value())),
			None => {
				tracing::debug!(order_id = %id, "Order not found");
				Err(OrderError::OrderNotFound(id))
			},
		}
	}

	/// Returns a best-effort snapshot of every order in creation order.
	///
	/// Orders transitioning during the scan may show either their old or new
	/// status; orders untouched during the scan appear exactly once.
	pub async fn list_all(&self) -> Vec<Order> {
		// Collect handles first so no map guard is held across an await.
		let mut records: Vec<Arc<OrderRecord>> = self
			.orders
			.iter()
			.map(|entry| Arc::clone(entry.value()))
			.collect();
		records.sort_by_key(|record| record.id());

		let mut orders = Vec::with_capacity(records.len());
		for record in records {
			orders.push(record.snapshot().await);
		}
		orders
	}

	pub fn len(&self) -> usize {
		self.orders.len()
	}

	pub fn is_empty(&self) -> bool {
		self.orders.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use orderflow_types::OrderStatus;
	use std::collections::HashSet;

	#[test]
	fn test_ids_are_sequential_from_one() {
		let registry = OrderRegistry::new(EventBus::default());
		assert!(registry.is_empty());

		assert_eq!(registry.create_order(), OrderId(1));
		assert_eq!(registry.create_order(), OrderId(2));
		assert_eq!(registry.create_order(), OrderId(3));
		assert_eq!(registry.len(), 3);
	}

	#[tokio::test]
	async fn test_find_existing_and_missing() {
		let registry = OrderRegistry::new(EventBus::default());
		let id = registry.create_order();

		let record = registry.find(id).unwrap();
		assert_eq!(record.id(), id);
		assert_eq!(record.current_state().await, OrderStatus::Created);

		let err = registry.find(OrderId(42)).unwrap_err();
		assert_eq!(err, OrderError::OrderNotFound(OrderId(42)));
	}

	#[tokio::test]
	async fn test_list_all_in_creation_order() {
		let registry = OrderRegistry::new(EventBus::default());
		for _ in 0..20 {
			registry.create_order();
		}

		let ids: Vec<u64> = registry.list_all().await.iter().map(|o| o.id.get()).collect();
		assert_eq!(ids, (1..=20).collect::<Vec<_>>());
	}

	#[tokio::test]
	async fn test_create_publishes_notification() {
		let bus = EventBus::new(8);
		let mut rx = bus.subscribe();
		let registry = OrderRegistry::new(bus);

		let id = registry.create_order();
		match rx.recv().await.unwrap() {
			LifecycleEvent::Created { order } => {
				assert_eq!(order.id, id);
				assert_eq!(order.status, OrderStatus::Created);
			},
			other => panic!("unexpected notification: {:?}", other),
		}
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
	async fn test_concurrent_creation_yields_distinct_ids() {
		let registry = Arc::new(OrderRegistry::new(EventBus::default()));
		let mut handles = Vec::new();
		for _ in 0..64 {
			let registry = Arc::clone(&registry);
			handles.push(tokio::spawn(async move {
				(0..8).map(|_| registry.create_order()).collect::<Vec<_>>()
			}));
		}

		let mut ids = HashSet::new();
		for handle in futures::future::join_all(handles).await {
			for id in handle.unwrap() {
				assert!(ids.insert(id), "duplicate id {}", id);
			}
		}

		assert_eq!(ids.len(), 512);
		assert_eq!(registry.len(), 512);

		let listed = registry.list_all().await;
		assert_eq!(listed.len(), 512);
		assert!(listed.windows(2).all(|pair| pair[0].id < pair[1].id));
		for order in &listed {
			assert!(ids.contains(&order.id));
		}
	}
}
