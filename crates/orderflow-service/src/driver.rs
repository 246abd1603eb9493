//! Two-actor lifecycle driver.
//!
//! The main context pays the customer order and then walks every other order
//! through pay, deliver and receive. Meanwhile a spawned customer context
//! delivers and receives the customer order. Output across orders interleaves
//! freely; rejected steps are logged and collected, never retried.

use orderflow_config::DriverConfig;
use orderflow_core::{OrderError, OrderService};
use orderflow_types::{Order, OrderEvent, OrderId};
use std::collections::HashSet;
use thiserror::Error;

/// Errors that stop the driver itself, as opposed to rejected order events.
#[derive(Debug, Error)]
pub enum DriverError {
	#[error("Customer order {position} is outside the {orders} orders created by this run")]
	CustomerOrder { position: u64, orders: u64 },
	#[error("Customer task failed: {0}")]
	Task(#[from] tokio::task::JoinError),
}

/// Outcome of a driver run.
#[derive(Debug)]
pub struct DriverReport {
	/// Orders created by this run at the end of the run, in creation order.
	pub orders: Vec<Order>,
	/// Every rejected step, from both contexts.
	pub rejections: Vec<OrderError>,
}

/// Runs the demonstration against `service`.
///
/// `config.customer_order` is the 1-based position among the orders this run
/// creates, so orders already held by `service` are never touched.
pub async fn run(
	service: OrderService,
	config: &DriverConfig,
) -> Result<DriverReport, DriverError> {
	if config.customer_order == 0 || config.customer_order > config.orders {
		return Err(DriverError::CustomerOrder {
			position: config.customer_order,
			orders: config.orders,
		});
	}

	let ids: Vec<OrderId> = (0..config.orders).map(|_| service.create()).collect();
	let customer_order = ids[(config.customer_order - 1) as usize];

	let mut rejections = Vec::new();
	record(service.pay(customer_order).await, &mut rejections);

	let customer_service = service.clone();
	let customer = tokio::spawn(async move {
		let mut rejections = Vec::new();
		drive(
			&customer_service,
			customer_order,
			&[OrderEvent::Deliver, OrderEvent::Receive],
			&mut rejections,
		)
		.await;
		rejections
	});

	for &id in ids.iter().filter(|id| **id != customer_order) {
		drive(
			&service,
			id,
			&[OrderEvent::Pay, OrderEvent::Deliver, OrderEvent::Receive],
			&mut rejections,
		)
		.await;
	}

	rejections.extend(customer.await?);

	let created: HashSet<OrderId> = ids.into_iter().collect();
	let orders: Vec<Order> = service
		.get_orders()
		.await
		.into_iter()
		.filter(|order| created.contains(&order.id))
		.collect();
	for order in &orders {
		tracing::info!(order_id = %order.id, status = %order.status, "Final order status");
	}

	Ok(DriverReport { orders, rejections })
}

/// Applies `events` to one order in sequence, stopping at the first rejection.
async fn drive(
	service: &OrderService,
	id: OrderId,
	events: &[OrderEvent],
	rejections: &mut Vec<OrderError>,
) {
	for event in events {
		if !record(service.apply(id, *event).await, rejections) {
			break;
		}
	}
}

/// Logs the outcome of one step; returns whether it succeeded.
fn record(result: Result<Order, OrderError>, rejections: &mut Vec<OrderError>) -> bool {
	match result {
		Ok(order) => {
			tracing::debug!(order_id = %order.id, status = %order.status, "Step committed");
			true
		},
		Err(err) => {
			tracing::warn!("{}", err);
			rejections.push(err);
			false
		},
	}
}
