//! Event bus for broadcasting committed marketplace changes.
//!
//! Publishing never blocks and never fails the mutation that triggered it:
//! with no subscribers the event is simply dropped, and a subscriber that
//! falls behind loses the oldest events.

use pressline_types::MarketplaceEvent;
use tokio::sync::broadcast;

/// Default number of events buffered per subscriber.
pub const DEFAULT_CAPACITY: usize = 256;

#[derive(Clone)]
pub struct EventBus {
	sender: broadcast::Sender<MarketplaceEvent>,
}

impl EventBus {
	pub fn new(capacity: usize) -> Self {
		let (sender, _) = broadcast::channel(capacity);
		Self { sender }
	}

	pub fn subscribe(&self) -> broadcast::Receiver<MarketplaceEvent> {
		self.sender.subscribe()
	}

	/// Publishes an event to every current subscriber.
	///
	/// Returns the number of subscribers that received it.
	pub fn publish(&self, event: MarketplaceEvent) -> usize {
		self.sender.send(event).unwrap_or(0)
	}
}

impl Default for EventBus {
	fn default() -> Self {
		Self::new(DEFAULT_CAPACITY)
	}
}
