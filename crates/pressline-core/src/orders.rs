//! Order store.
//!
//! The store owns the order collection and is the only place an order's
//! status changes. Every mutation is applied to a copy of the collection,
//! persisted, and only then committed, so a failed save leaves the store as
//! it was.

use crate::{seed, state};
use chrono::{Local, NaiveDate};
use pressline_storage::{StorageError, StorageService};
use pressline_types::{Address, DeliveryType, Order, OrderStatus, Role, StorageKey, ORDER_ID_PREFIX};
use std::sync::Arc;
use thiserror::Error;

/// First sequence number handed out by an empty store.
const FIRST_SEQUENCE: u64 = 1000;

/// Errors that can occur during order store operations.
#[derive(Debug, Error)]
pub enum OrderStoreError {
	#[error("Item count must be at least 1")]
	InvalidItemCount,
	#[error("Order of {item_count} items at {unit_price} each is too large")]
	AmountOverflow { item_count: u32, unit_price: u64 },
	#[error("No order ids left to allocate")]
	SequenceExhausted,
	#[error("Order not found: {0}")]
	NotFound(String),
	#[error("Role {role} cannot move an order from {from} to {to}")]
	IllegalTransition {
		from: OrderStatus,
		to: OrderStatus,
		role: Role,
	},
	#[error("Storage error: {0}")]
	Storage(#[from] StorageError),
}

/// Result of a successful status change.
#[derive(Debug, Clone)]
pub struct Transitioned {
	/// Status before the change.
	pub from: OrderStatus,
	/// The order after the change.
	pub order: Order,
}

/// Owner of the order collection, newest order first.
pub struct OrderStore {
	orders: Vec<Order>,
	storage: Arc<StorageService>,
	unit_price: u64,
	/// `None` once the highest possible id has been handed out.
	next_sequence: Option<u64>,
}

impl OrderStore {
	/// Loads the persisted orders, or the demo orders when `seed_demo_data`
	/// is set and nothing has been stored yet.
	pub async fn load(
		storage: Arc<StorageService>,
		unit_price: u64,
		seed_demo_data: bool,
	) -> Result<Self, OrderStoreError> {
		let orders: Vec<Order> = storage
			.load(StorageKey::Orders, || {
				if seed_demo_data {
					seed::demo_orders(unit_price)
				} else {
					Vec::new()
				}
			})
			.await?;

		let next_sequence = orders
			.iter()
			.filter_map(Order::sequence)
			.max()
			.map_or(Some(FIRST_SEQUENCE), |highest| highest.checked_add(1));

		tracing::debug!(
			count = orders.len(),
			next_sequence = ?next_sequence,
			"Loaded orders"
		);

		Ok(Self {
			orders,
			storage,
			unit_price,
			next_sequence,
		})
	}

	/// Places a new order dated today.
	pub async fn create(
		&mut self,
		item_count: u32,
		delivery_type: DeliveryType,
		notes: Option<String>,
		location: Option<&Address>,
	) -> Result<Order, OrderStoreError> {
		let today = Local::now().date_naive();
		self.create_on(today, item_count, delivery_type, notes, location)
			.await
	}

	/// Places a new order with an explicit creation date.
	pub async fn create_on(
		&mut self,
		date: NaiveDate,
		item_count: u32,
		delivery_type: DeliveryType,
		notes: Option<String>,
		location: Option<&Address>,
	) -> Result<Order, OrderStoreError> {
		if item_count == 0 {
			return Err(OrderStoreError::InvalidItemCount);
		}
		let amount = Order::amount_for(item_count, self.unit_price).ok_or(
			OrderStoreError::AmountOverflow {
				item_count,
				unit_price: self.unit_price,
			},
		)?;
		let sequence = self
			.next_sequence
			.ok_or(OrderStoreError::SequenceExhausted)?;

		let order = Order {
			id: format!("{}{:04}", ORDER_ID_PREFIX, sequence),
			status: OrderStatus::PendingPickup,
			item_count,
			date,
			tower: location.map(|address| address.tower.clone()),
			flat: location.map(|address| address.flat.clone()),
			amount,
			delivery_type,
			notes: notes.filter(|text| !text.trim().is_empty()),
		};

		let mut updated = Vec::with_capacity(self.orders.len() + 1);
		updated.push(order.clone());
		updated.extend(self.orders.iter().cloned());

		self.commit(updated).await?;
		self.next_sequence = sequence.checked_add(1);

		Ok(order)
	}

	/// Moves an order to `target` on behalf of `role`.
	///
	/// Only the step listed in the transition table for the order's current
	/// status and the requesting role is accepted.
	pub async fn transition(
		&mut self,
		order_id: &str,
		role: Role,
		target: OrderStatus,
	) -> Result<Transitioned, OrderStoreError> {
		let index = self
			.orders
			.iter()
			.position(|order| order.id == order_id)
			.ok_or_else(|| OrderStoreError::NotFound(order_id.to_string()))?;

		let from = self.orders[index].status;
		if !state::is_permitted(from, role, target) {
			return Err(OrderStoreError::IllegalTransition {
				from,
				to: target,
				role,
			});
		}

		let mut updated = self.orders.clone();
		updated[index].status = target;
		let order = updated[index].clone();

		self.commit(updated).await?;

		Ok(Transitioned { from, order })
	}

	/// All orders, newest first.
	pub fn list(&self) -> &[Order] {
		&self.orders
	}

	/// Orders matching `predicate`, newest first.
	pub fn list_where<P>(&self, predicate: P) -> Vec<Order>
	where
		P: Fn(&Order) -> bool,
	{
		self.orders
			.iter()
			.filter(|order| predicate(order))
			.cloned()
			.collect()
	}

	pub fn get(&self, order_id: &str) -> Option<&Order> {
		self.orders.iter().find(|order| order.id == order_id)
	}

	/// Price charged per item for new orders.
	pub fn unit_price(&self) -> u64 {
		self.unit_price
	}

	async fn commit(&mut self, updated: Vec<Order>) -> Result<(), OrderStoreError> {
		self.storage.save(StorageKey::Orders, &updated).await?;
		self.orders = updated;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_support::{failing_storage, memory_storage};
	use pressline_storage::implementations::file::FileStorage;
	use tempfile::TempDir;

	fn day(d: u32) -> NaiveDate {
		NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
	}

	async fn empty_store() -> OrderStore {
		OrderStore::load(memory_storage(), 15, false).await.unwrap()
	}

	#[tokio::test]
	async fn test_create_prices_and_starts_pending() {
		let mut store = empty_store().await;
		for item_count in [1, 4, 12, 250] {
			let order = store
				.create(item_count, DeliveryType::Standard, None, None)
				.await
				.unwrap();
			assert_eq!(order.amount, u64::from(item_count) * 15);
			assert_eq!(order.status, OrderStatus::PendingPickup);
		}
	}

	#[tokio::test]
	async fn test_express_does_not_change_amount() {
		let mut store = empty_store().await;
		let order = store
			.create(4, DeliveryType::Express, Some("Starch collars".into()), None)
			.await
			.unwrap();
		assert_eq!(order.amount, 60);
		assert_eq!(order.delivery_type, DeliveryType::Express);
		assert_eq!(order.notes.as_deref(), Some("Starch collars"));
	}

	#[tokio::test]
	async fn test_zero_items_rejected() {
		let mut store = empty_store().await;
		let result = store.create(0, DeliveryType::Standard, None, None).await;
		assert!(matches!(result, Err(OrderStoreError::InvalidItemCount)));
		assert!(store.list().is_empty());
	}

	#[tokio::test]
	async fn test_create_copies_location_and_prepends() {
		let mut store = empty_store().await;
		let address = Address {
			tower: "F".into(),
			flat: "1603".into(),
		};
		let first = store
			.create_on(day(1), 2, DeliveryType::Standard, None, Some(&address))
			.await
			.unwrap();
		let second = store
			.create_on(day(2), 3, DeliveryType::Standard, None, None)
			.await
			.unwrap();

		assert_eq!(first.id, "ORD-1000");
		assert_eq!(first.tower.as_deref(), Some("F"));
		assert_eq!(first.flat.as_deref(), Some("1603"));
		assert_eq!(second.id, "ORD-1001");
		assert!(second.tower.is_none());

		let ids: Vec<_> = store.list().iter().map(|o| o.id.as_str()).collect();
		assert_eq!(ids, vec!["ORD-1001", "ORD-1000"]);
	}

	#[tokio::test]
	async fn test_overflowing_amount_rejected() {
		let mut store = OrderStore::load(memory_storage(), 10_000_000_000, false)
			.await
			.unwrap();
		let result = store
			.create(u32::MAX, DeliveryType::Standard, None, None)
			.await;
		assert!(matches!(
			result,
			Err(OrderStoreError::AmountOverflow {
				item_count: u32::MAX,
				..
			})
		));
		assert!(store.list().is_empty());

		let order = store
			.create(3, DeliveryType::Standard, None, None)
			.await
			.unwrap();
		assert_eq!(order.id, "ORD-1000");
		assert_eq!(order.amount, 30_000_000_000);
	}

	async fn store_with_highest_id(id: &str) -> OrderStore {
		let storage = memory_storage();
		let mut orders = seed::demo_orders(15);
		orders[0].id = id.to_string();
		storage.save(StorageKey::Orders, &orders).await.unwrap();
		OrderStore::load(storage, 15, false).await.unwrap()
	}

	#[tokio::test]
	async fn test_ids_continue_past_u32_range() {
		let mut store = store_with_highest_id("ORD-4294967295").await;
		let order = store
			.create(1, DeliveryType::Standard, None, None)
			.await
			.unwrap();
		assert_eq!(order.id, "ORD-4294967296");

		let ids: Vec<_> = store.list().iter().map(|o| o.id.as_str()).collect();
		assert_eq!(ids.iter().filter(|id| **id == order.id).count(), 1);
	}

	#[tokio::test]
	async fn test_exhausted_sequence_rejected() {
		let mut store = store_with_highest_id(&format!("ORD-{}", u64::MAX)).await;
		let result = store.create(1, DeliveryType::Standard, None, None).await;
		assert!(matches!(result, Err(OrderStoreError::SequenceExhausted)));
		assert_eq!(store.list().len(), 7);
	}

	#[tokio::test]
	async fn test_ids_continue_after_seed() {
		let mut store = OrderStore::load(memory_storage(), 15, true).await.unwrap();
		let order = store
			.create(1, DeliveryType::Standard, None, None)
			.await
			.unwrap();
		assert_eq!(order.id, "ORD-8113");
	}

	#[tokio::test]
	async fn test_ids_increase_across_restarts() {
		let dir = TempDir::new().unwrap();
		let mut seen = Vec::new();

		for _ in 0..3 {
			let backend = FileStorage::open(dir.path()).unwrap();
			let storage = Arc::new(StorageService::new(Box::new(backend)));
			let mut store = OrderStore::load(storage, 15, false).await.unwrap();
			for _ in 0..2 {
				let order = store
					.create(1, DeliveryType::Standard, None, None)
					.await
					.unwrap();
				seen.push(order.sequence().unwrap());
			}
		}

		assert_eq!(seen, vec![1000, 1001, 1002, 1003, 1004, 1005]);
	}

	#[tokio::test]
	async fn test_vendor_starts_ironing_once() {
		let mut store = OrderStore::load(memory_storage(), 15, true).await.unwrap();
		assert_eq!(store.get("ORD-7888").unwrap().status, OrderStatus::PickedUp);

		let done = store
			.transition("ORD-7888", Role::Vendor, OrderStatus::IroningInProcess)
			.await
			.unwrap();
		assert_eq!(done.from, OrderStatus::PickedUp);
		assert_eq!(done.order.status, OrderStatus::IroningInProcess);
		assert_eq!(done.order.item_count, 22);

		let again = store
			.transition("ORD-7888", Role::Vendor, OrderStatus::IroningInProcess)
			.await;
		assert!(matches!(
			again,
			Err(OrderStoreError::IllegalTransition {
				from: OrderStatus::IroningInProcess,
				..
			})
		));
	}

	#[tokio::test]
	async fn test_every_illegal_transition_is_rejected() {
		for from in OrderStatus::ALL {
			for role in Role::ALL {
				for target in OrderStatus::ALL {
					if state::is_permitted(from, role, target) {
						continue;
					}

					let mut store = empty_store().await;
					let order = store
						.create(1, DeliveryType::Standard, None, None)
						.await
						.unwrap();
					store.orders[0].status = from;

					let result = store.transition(&order.id, role, target).await;
					assert!(
						matches!(result, Err(OrderStoreError::IllegalTransition { .. })),
						"{} by {} to {}",
						from,
						role,
						target
					);
					assert_eq!(store.get(&order.id).unwrap().status, from);
				}
			}
		}
	}

	#[tokio::test]
	async fn test_full_lifecycle() {
		let mut store = empty_store().await;
		let order = store
			.create(3, DeliveryType::Standard, None, None)
			.await
			.unwrap();

		let steps = [
			(Role::DeliveryStaff, OrderStatus::PickedUp),
			(Role::Vendor, OrderStatus::IroningInProcess),
			(Role::Vendor, OrderStatus::ReadyForDelivery),
			(Role::DeliveryStaff, OrderStatus::Delivered),
			(Role::Customer, OrderStatus::Paid),
		];
		for (role, target) in steps {
			store.transition(&order.id, role, target).await.unwrap();
		}

		let paid = store.get(&order.id).unwrap();
		assert_eq!(paid.status, OrderStatus::Paid);
		assert_eq!(paid.amount, 45);
	}

	#[tokio::test]
	async fn test_unknown_order() {
		let mut store = empty_store().await;
		let result = store
			.transition("ORD-0001", Role::Vendor, OrderStatus::IroningInProcess)
			.await;
		assert!(matches!(result, Err(OrderStoreError::NotFound(id)) if id == "ORD-0001"));
	}

	#[tokio::test]
	async fn test_failed_save_leaves_store_unchanged() {
		let (storage, fail) = failing_storage();
		let mut store = OrderStore::load(storage, 15, true).await.unwrap();
		let before = store.list().to_vec();

		fail.store(true, std::sync::atomic::Ordering::SeqCst);

		let created = store.create(2, DeliveryType::Standard, None, None).await;
		assert!(matches!(created, Err(OrderStoreError::Storage(_))));

		let moved = store
			.transition("ORD-8112", Role::DeliveryStaff, OrderStatus::PickedUp)
			.await;
		assert!(matches!(moved, Err(OrderStoreError::Storage(_))));

		assert_eq!(store.list(), before.as_slice());

		fail.store(false, std::sync::atomic::Ordering::SeqCst);
		let order = store
			.create(2, DeliveryType::Standard, None, None)
			.await
			.unwrap();
		assert_eq!(order.id, "ORD-8113");
	}

	#[tokio::test]
	async fn test_list_where() {
		let store = OrderStore::load(memory_storage(), 15, true).await.unwrap();
		let pending = store.list_where(|o| o.status == OrderStatus::PendingPickup);
		let ids: Vec<_> = pending.iter().map(|o| o.id.as_str()).collect();
		assert_eq!(ids, vec!["ORD-8112", "ORD-8111"]);
	}
}
