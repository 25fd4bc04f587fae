//! Order types for the marketplace.
//!
//! This module defines the order record persisted by the order store, the
//! lifecycle statuses an order moves through, and the delivery options a
//! customer picks when placing an order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A customer's ironing order.
///
/// `amount` is fixed at creation as `item_count * unit_price` and is never
/// recomputed, whatever happens to the order afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
	/// Identifier of the form `ORD-<number>`.
	pub id: String,
	/// Current lifecycle status.
	pub status: OrderStatus,
	/// Number of garments, always positive.
	pub item_count: u32,
	/// Creation day.
	pub date: NaiveDate,
	/// Tower of the pickup address, if known.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tower: Option<String>,
	/// Flat of the pickup address, if known.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub flat: Option<String>,
	/// Base price of the order.
	pub amount: u64,
	/// Delivery speed chosen at placement.
	#[serde(default)]
	pub delivery_type: DeliveryType,
	/// Special instructions from the customer.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,
}

impl Order {
	/// Numeric suffix of the id, if the id follows the `ORD-<number>` format.
	pub fn sequence(&self) -> Option<u64> {
		self.id.strip_prefix(ORDER_ID_PREFIX)?.parse().ok()
	}

	/// Price of `item_count` items, or `None` if it does not fit in a `u64`.
	pub fn amount_for(item_count: u32, unit_price: u64) -> Option<u64> {
		u64::from(item_count).checked_mul(unit_price)
	}
}

/// Prefix shared by every order id.
pub const ORDER_ID_PREFIX: &str = "ORD-";

/// Status of an order, declared in lifecycle order.
///
/// The derived `Ord` follows lifecycle progress, so `PendingPickup` is the
/// smallest value and `Paid` the largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrderStatus {
	#[serde(rename = "Pending Pickup")]
	PendingPickup,
	#[serde(rename = "Picked Up")]
	PickedUp,
	#[serde(rename = "Ironing in Process")]
	IroningInProcess,
	#[serde(rename = "Ready for Delivery")]
	ReadyForDelivery,
	#[serde(rename = "Delivered")]
	Delivered,
	#[serde(rename = "Paid")]
	Paid,
}

impl OrderStatus {
	/// Every status, in lifecycle order.
	pub const ALL: [OrderStatus; 6] = [
		OrderStatus::PendingPickup,
		OrderStatus::PickedUp,
		OrderStatus::IroningInProcess,
		OrderStatus::ReadyForDelivery,
		OrderStatus::Delivered,
		OrderStatus::Paid,
	];

	/// Returns the display form, which is also the wire form.
	pub fn as_str(&self) -> &'static str {
		match self {
			OrderStatus::PendingPickup => "Pending Pickup",
			OrderStatus::PickedUp => "Picked Up",
			OrderStatus::IroningInProcess => "Ironing in Process",
			OrderStatus::ReadyForDelivery => "Ready for Delivery",
			OrderStatus::Delivered => "Delivered",
			OrderStatus::Paid => "Paid",
		}
	}
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for OrderStatus {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		OrderStatus::ALL
			.into_iter()
			.find(|status| status.as_str() == s)
			.ok_or_else(|| format!("Unknown order status: {}", s))
	}
}

/// Delivery speed offered at order placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryType {
	/// 48 hour turnaround.
	#[default]
	Standard,
	/// 24 hour turnaround.
	Express,
}

impl DeliveryType {
	/// Promised turnaround in hours.
	pub fn turnaround_hours(&self) -> u32 {
		match self {
			DeliveryType::Standard => 48,
			DeliveryType::Express => 24,
		}
	}
}

impl fmt::Display for DeliveryType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			DeliveryType::Standard => write!(f, "standard"),
			DeliveryType::Express => write!(f, "express"),
		}
	}
}
