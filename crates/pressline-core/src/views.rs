//! Dashboard projections.
//!
//! Pure functions over a snapshot of the order collection. They never fail
//! and never mutate; each dashboard recomputes its view on every read.

use crate::pricing::{PriceBreakdown, Pricing};
use crate::state::{self, Action};
use pressline_types::{Community, Order, OrderStatus, Role, Vendor, VendorStatus};
use serde::Serialize;

/// Vendor dashboard: orders grouped by the vendor's stage of work.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorBuckets {
	/// Waiting for pickup.
	#[serde(rename = "new")]
	pub new_requests: Vec<Order>,
	/// Picked up or being ironed.
	pub in_progress: Vec<Order>,
	/// Ironed and waiting for delivery.
	pub ready: Vec<Order>,
}

/// What a delivery task asks the staff member to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TaskKind {
	Pickup,
	Delivery,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryTask {
	pub kind: TaskKind,
	pub action: Action,
	pub order: Order,
}

/// Delivery staff dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeliveryTasks {
	/// Orders the staff must act on, oldest first.
	pub active: Vec<DeliveryTask>,
	/// Orders currently with the vendor, newest first.
	pub tracked: Vec<Order>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAggregates {
	pub community_count: usize,
	pub active_vendor_count: usize,
	pub total_orders: usize,
}

/// One row of the customer dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerOrderView {
	pub order: Order,
	pub progress: u8,
	pub action: Option<Action>,
	pub price: PriceBreakdown,
	/// Promised turnaround for the order's delivery type.
	pub turnaround_hours: u32,
}

pub fn vendor_buckets(orders: &[Order]) -> VendorBuckets {
	let mut buckets = VendorBuckets::default();
	for order in orders {
		match order.status {
			OrderStatus::PendingPickup => buckets.new_requests.push(order.clone()),
			OrderStatus::PickedUp | OrderStatus::IroningInProcess => {
				buckets.in_progress.push(order.clone())
			},
			OrderStatus::ReadyForDelivery => buckets.ready.push(order.clone()),
			OrderStatus::Delivered | OrderStatus::Paid => {},
		}
	}
	buckets
}

pub fn delivery_staff_tasks(orders: &[Order]) -> DeliveryTasks {
	let mut active: Vec<DeliveryTask> = orders
		.iter()
		.filter_map(|order| {
			let kind = match order.status {
				OrderStatus::PendingPickup => TaskKind::Pickup,
				OrderStatus::ReadyForDelivery => TaskKind::Delivery,
				_ => return None,
			};
			let action = state::available_action(order.status, Role::DeliveryStaff)?;
			Some(DeliveryTask {
				kind,
				action,
				order: order.clone(),
			})
		})
		.collect();
	// sort_by_key is stable, equal dates keep collection order
	active.sort_by_key(|task| task.order.date);

	let mut tracked: Vec<Order> = orders
		.iter()
		.filter(|order| {
			matches!(
				order.status,
				OrderStatus::PickedUp | OrderStatus::IroningInProcess
			)
		})
		.cloned()
		.collect();
	tracked.sort_by_key(|order| std::cmp::Reverse(order.date));

	DeliveryTasks { active, tracked }
}

pub fn admin_aggregates(
	communities: &[Community],
	vendors: &[Vendor],
	orders: &[Order],
) -> AdminAggregates {
	AdminAggregates {
		community_count: communities.len(),
		active_vendor_count: vendors
			.iter()
			.filter(|vendor| vendor.status == VendorStatus::Active)
			.count(),
		total_orders: orders.len(),
	}
}

/// Progress bar percentage shown to the customer for a status.
pub fn customer_progress(status: OrderStatus) -> u8 {
	match status {
		OrderStatus::PendingPickup => 10,
		OrderStatus::PickedUp => 30,
		OrderStatus::IroningInProcess => 50,
		OrderStatus::ReadyForDelivery => 70,
		OrderStatus::Delivered => 90,
		OrderStatus::Paid => 100,
	}
}

pub fn customer_dashboard(orders: &[Order], pricing: &Pricing) -> Vec<CustomerOrderView> {
	orders
		.iter()
		.map(|order| CustomerOrderView {
			progress: customer_progress(order.status),
			action: state::available_action(order.status, Role::Customer),
			price: pricing.breakdown(order),
			turnaround_hours: order.delivery_type.turnaround_hours(),
			order: order.clone(),
		})
		.collect()
}
