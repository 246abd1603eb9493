//! Event bus for lifecycle notifications.
//!
//! A thin wrapper over a tokio broadcast channel. Every subscriber sees every
//! notification published after it subscribed, as long as it keeps up with
//! the configured buffer.

use orderflow_config::MAX_EVENT_CAPACITY;
use orderflow_types::LifecycleEvent;
use tokio::sync::broadcast;

/// In-process publisher of [`LifecycleEvent`]s.
#[derive(Clone)]
pub struct EventBus {
	sender: broadcast::Sender<LifecycleEvent>,
}

impl EventBus {
	/// Creates a bus buffering up to `capacity` notifications per subscriber.
	///
	/// `capacity` is clamped to `1..=MAX_EVENT_CAPACITY`.
	pub fn new(capacity: usize) -> Self {
		let (sender, _) = broadcast::channel(capacity.clamp(1, MAX_EVENT_CAPACITY));
		Self { sender }
	}

	/// Registers a new subscriber.
	pub fn subscribe(&self) -> broadcast::Receiver<LifecycleEvent> {
		self.sender.subscribe()
	}

	/// Publishes a notification to all current subscribers.
	///
	/// Fails only when nobody is subscribed.
	pub fn publish(
		&self,
		event: LifecycleEvent,
	) -> Result<usize, broadcast::error::SendError<LifecycleEvent>> {
		self.sender.send(event)
	}

	pub fn subscriber_count(&self) -> usize {
		self.sender.receiver_count()
	}
}

impl Default for EventBus {
	fn default() -> Self {
		Self::new(1024)
	}
}
