//! Order state machine.
//!
//! Orders move forward through a fixed sequence:
//! Pending Pickup -> Picked Up -> Ironing in Process -> Ready for Delivery ->
//! Delivered -> Paid. Each step belongs to exactly one role, and there is no
//! way back and no way out of `Paid`.

use once_cell::sync::Lazy;
use pressline_types::{OrderStatus, Role};
use serde::Serialize;
use std::collections::HashMap;

/// An action a role can take on an order in its current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Action {
	/// Status the order moves to.
	pub target: OrderStatus,
	/// Button label shown for the action.
	pub label: &'static str,
}

// Static transition table - (current status, role) maps to the only allowed next step
static TRANSITIONS: Lazy<HashMap<(OrderStatus, Role), Action>> = Lazy::new(|| {
	let mut m = HashMap::new();
	m.insert(
		(OrderStatus::PendingPickup, Role::DeliveryStaff),
		Action {
			target: OrderStatus::PickedUp,
			label: "Mark as Picked Up",
		},
	);
	m.insert(
		(OrderStatus::PickedUp, Role::Vendor),
		Action {
			target: OrderStatus::IroningInProcess,
			label: "Start Ironing",
		},
	);
	m.insert(
		(OrderStatus::IroningInProcess, Role::Vendor),
		Action {
			target: OrderStatus::ReadyForDelivery,
			label: "Mark as Ready",
		},
	);
	m.insert(
		(OrderStatus::ReadyForDelivery, Role::DeliveryStaff),
		Action {
			target: OrderStatus::Delivered,
			label: "Mark as Delivered",
		},
	);
	m.insert(
		(OrderStatus::Delivered, Role::Customer),
		Action {
			target: OrderStatus::Paid,
			label: "Pay Now",
		},
	);
	m
});

/// The action offered to `role` for an order in `status`, if any.
pub fn available_action(status: OrderStatus, role: Role) -> Option<Action> {
	TRANSITIONS.get(&(status, role)).copied()
}

/// The status `role` may move an order in `current` to, if any.
pub fn next_status(current: OrderStatus, role: Role) -> Option<OrderStatus> {
	available_action(current, role).map(|action| action.target)
}

/// Checks if `role` may move an order from `current` to `target`.
pub fn is_permitted(current: OrderStatus, role: Role, target: OrderStatus) -> bool {
	next_status(current, role) == Some(target)
}

/// A status with no outgoing transition for any role.
pub fn is_terminal(status: OrderStatus) -> bool {
	Role::ALL
		.iter()
		.all(|role| available_action(status, *role).is_none())
}
