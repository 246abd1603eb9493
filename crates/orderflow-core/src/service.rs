//! Order service façade.
//!
//! Exposes the lifecycle operations (`create`, `pay`, `deliver`, `receive`)
//! and listing. Each lifecycle call resolves the order through the registry
//! and hands it to the transition engine; failures from either are returned
//! to the caller unchanged.

use crate::engine::TransitionEngine;
use crate::event_bus::EventBus;
use crate::registry::OrderRegistry;
use crate::OrderError;
use orderflow_config::Config;
use orderflow_types::{LifecycleEvent, Order, OrderEvent, OrderId};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::instrument;

/// Entry point for order lifecycle operations.
///
/// Clones share the same registry, so one service can be handed to any number
/// of concurrent tasks.
#[derive(Clone)]
pub struct OrderService {
	registry: Arc<OrderRegistry>,
	engine: Arc<TransitionEngine>,
	event_bus: EventBus,
}

impl OrderService {
	pub fn new(event_bus: EventBus) -> Self {
		Self {
			registry: Arc::new(OrderRegistry::new(event_bus.clone())),
			engine: Arc::new(TransitionEngine::new(event_bus.clone())),
			event_bus,
		}
	}

	/// Builds a service using the notification settings from `config`.
	pub fn from_config(config: &Config) -> Self {
		Self::new(EventBus::new(config.events.capacity))
	}

	/// Creates a new order in `CREATED` and returns its identifier.
	#[instrument(skip(self))]
	pub fn create(&self) -> OrderId {
		self.registry.create_order()
	}

	#[instrument(skip(self))]
	pub async fn pay(&self, id: OrderId) -> Result<Order, OrderError> {
		self.apply(id, OrderEvent::Pay).await
	}

	#[instrument(skip(self))]
	pub async fn deliver(&self, id: OrderId) -> Result<Order, OrderError> {
		self.apply(id, OrderEvent::Deliver).await
	}

	#[instrument(skip(self))]
	pub async fn receive(&self, id: OrderId) -> Result<Order, OrderError> {
		self.apply(id, OrderEvent::Receive).await
	}

	/// Applies an arbitrary event to an existing order.
	pub async fn apply(&self, id: OrderId, event: OrderEvent) -> Result<Order, OrderError> {
		let record = self.registry.find(id)?;
		self.engine.apply(&record, event).await
	}

	/// Returns a snapshot of a single order.
	pub async fn get_order(&self, id: OrderId) -> Result<Order, OrderError> {
		Ok(self.registry.find(id)?.snapshot().await)
	}

	/// Returns a snapshot of all orders in creation order.
	pub async fn get_orders(&self) -> Vec<Order> {
		self.registry.list_all().await
	}

	/// Subscribes to lifecycle notifications.
	pub fn subscribe(&self) -> broadcast::Receiver<LifecycleEvent> {
		self.event_bus.subscribe()
	}

	pub fn registry(&self) -> &OrderRegistry {
		&self.registry
	}

	pub fn len(&self) -> usize {
		self.registry.len()
	}

	pub fn is_empty(&self) -> bool {
		self.registry.is_empty()
	}
}

impl Default for OrderService {
	fn default() -> Self {
		Self::new(EventBus::default())
	}
}
