//! Demo data loaded into empty stores.

use chrono::NaiveDate;
use pressline_types::{
	Address, Community, DeliveryType, Order, OrderStatus, Role, SecretString, User, Vendor,
	VendorStatus,
};

const DEMO_PASSWORD: &str = "password123";

fn july_2024(day: u32) -> NaiveDate {
	NaiveDate::from_ymd_opt(2024, 7, day).unwrap_or_default()
}

/// One account per role.
pub fn demo_users() -> Vec<User> {
	let user = |name: &str, email: &str, role: Role, address: Option<Address>| User {
		name: name.to_string(),
		email: email.to_string(),
		password: SecretString::from(DEMO_PASSWORD),
		role,
		address,
	};

	vec![
		user(
			"Priya Sharma",
			"customer@example.com",
			Role::Customer,
			Some(Address {
				tower: "F".to_string(),
				flat: "1603".to_string(),
			}),
		),
		user("QuickClean Irons", "vendor@example.com", Role::Vendor, None),
		user("Admin User", "admin@example.com", Role::SuperAdmin, None),
		user(
			"Delivery Staff",
			"delivery@example.com",
			Role::DeliveryStaff,
			None,
		),
	]
}

/// Orders spread across every status, newest first.
///
/// An order whose amount would overflow at `unit_price` is left out.
pub fn demo_orders(unit_price: u64) -> Vec<Order> {
	let order = |id: &str, status, item_count: u32, day, tower: &str, flat: &str| {
		Some(Order {
			id: id.to_string(),
			status,
			item_count,
			date: july_2024(day),
			tower: Some(tower.to_string()),
			flat: Some(flat.to_string()),
			amount: Order::amount_for(item_count, unit_price)?,
			delivery_type: DeliveryType::Standard,
			notes: None,
		})
	};

	vec![
		order("ORD-7892", OrderStatus::IroningInProcess, 12, 28, "B", "503"),
		order("ORD-7891", OrderStatus::Delivered, 8, 26, "A", "101"),
		order("ORD-7890", OrderStatus::Paid, 15, 22, "C", "1204"),
		order("ORD-8112", OrderStatus::PendingPickup, 15, 29, "A", "101"),
		order("ORD-8111", OrderStatus::PendingPickup, 5, 29, "C", "1204"),
		order("ORD-7888", OrderStatus::PickedUp, 22, 28, "D", "808"),
		order("ORD-7955", OrderStatus::ReadyForDelivery, 18, 29, "B", "1101"),
	]
	.into_iter()
	.flatten()
	.collect()
}

pub fn demo_communities() -> Vec<Community> {
	[
		("Prestige Lakeside Habitat", 5),
		("Sobha Dream Acres", 3),
		("Brigade Exotica", 2),
	]
	.into_iter()
	.map(|(name, vendor_count)| Community {
		name: name.to_string(),
		location: "Bangalore".to_string(),
		vendor_count,
	})
	.collect()
}

pub fn demo_vendors() -> Vec<Vendor> {
	[
		("QuickClean Irons", "Ramesh Kumar", VendorStatus::Active),
		("SuperPress Services", "Sunita Sharma", VendorStatus::Active),
		("DailyPress Co.", "Amit Patel", VendorStatus::Inactive),
	]
	.into_iter()
	.map(|(name, owner, status)| Vendor {
		name: name.to_string(),
		owner: owner.to_string(),
		status,
	})
	.collect()
}
