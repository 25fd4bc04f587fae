//! Event types published by the marketplace engine.
//!
//! Events are emitted after a mutation has been persisted, so a subscriber
//! never observes a change that storage rejected.

use crate::{Community, Order, OrderStatus, Role, Vendor};
use serde::{Deserialize, Serialize};

/// Main event type encompassing all marketplace events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MarketplaceEvent {
	/// Events from the order store.
	Order(OrderEvent),
	/// Events from the user store.
	User(UserEvent),
	/// Events from the community/vendor directory.
	Directory(DirectoryEvent),
}

/// Events related to the order lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OrderEvent {
	/// A customer placed a new order.
	Placed { order: Order },
	/// An order moved to its next status.
	StatusChanged {
		order_id: String,
		from: OrderStatus,
		to: OrderStatus,
		role: Role,
	},
}

/// Events related to user accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum UserEvent {
	/// A new account was created.
	Registered { email: String, role: Role },
}

/// Events related to the admin-managed directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DirectoryEvent {
	CommunityAdded { community: Community },
	VendorAdded { vendor: Vendor },
}
