//! Marketplace engine.
//!
//! The engine owns the order store, the user store and the directory, and
//! is the single entry point the HTTP layer talks to. Each store sits behind
//! its own `RwLock`: a mutation holds the write lock from validation until
//! the collection is persisted, so writers to one collection are applied one
//! at a time and readers never see a half-applied change.

pub mod event_bus;
pub mod lifecycle;

use crate::directory::{Directory, DirectoryError};
use crate::orders::{OrderStore, OrderStoreError};
use crate::pricing::Pricing;
use crate::users::{AuthError, UserStore};
use crate::views::{
	self, AdminAggregates, CustomerOrderView, DeliveryTasks, VendorBuckets,
};
use event_bus::EventBus;
use pressline_config::Config;
use pressline_storage::StorageService;
use pressline_types::{
	Community, DirectoryEvent, LoginRequest, MarketplaceEvent, Order, OrderEvent, OrderStatus,
	PlaceOrderRequest, Role, Session, SignupRequest, UserEvent, Vendor,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::instrument;

/// Errors returned by engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
	#[error(transparent)]
	Orders(#[from] OrderStoreError),
	#[error(transparent)]
	Auth(#[from] AuthError),
	#[error(transparent)]
	Directory(#[from] DirectoryError),
	/// The requester's role may not perform the operation.
	#[error("Forbidden: {0}")]
	Forbidden(String),
}

pub struct MarketplaceEngine {
	config: Config,
	pricing: Pricing,
	orders: RwLock<OrderStore>,
	users: RwLock<UserStore>,
	directory: RwLock<Directory>,
	event_bus: EventBus,
}

impl MarketplaceEngine {
	/// Loads every store from `storage`.
	pub async fn new(
		config: Config,
		storage: Arc<StorageService>,
		event_bus: EventBus,
	) -> Result<Self, EngineError> {
		let marketplace = &config.marketplace;
		let orders = OrderStore::load(
			storage.clone(),
			marketplace.unit_price,
			marketplace.seed_demo_data,
		)
		.await?;
		let users = UserStore::load(storage.clone()).await?;
		let directory = Directory::load(storage, marketplace.seed_demo_data).await?;
		let pricing = Pricing::new(&marketplace.fees);

		Ok(Self {
			config,
			pricing,
			orders: RwLock::new(orders),
			users: RwLock::new(users),
			directory: RwLock::new(directory),
			event_bus,
		})
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	pub fn event_bus(&self) -> &EventBus {
		&self.event_bus
	}

	pub fn pricing(&self) -> &Pricing {
		&self.pricing
	}

	#[instrument(skip_all, fields(role = ?request.role))]
	pub async fn signup(&self, request: SignupRequest) -> Result<Session, EngineError> {
		let session = self.users.write().await.signup(request).await?;

		tracing::info!(email = %session.email, role = %session.role, "User registered");
		self.event_bus
			.publish(MarketplaceEvent::User(UserEvent::Registered {
				email: session.email.clone(),
				role: session.role,
			}));
		Ok(session)
	}

	pub async fn login(&self, request: LoginRequest) -> Result<Session, EngineError> {
		let result = self.users.read().await.login(request);
		if let Err(AuthError::AuthenticationFailure) = &result {
			tracing::debug!("Rejected login");
		}
		Ok(result?)
	}

	/// Places an order for the customer named in the request.
	///
	/// The pickup location is taken from the customer's stored address.
	#[instrument(skip_all, fields(item_count = request.item_count))]
	pub async fn place_order(&self, request: PlaceOrderRequest) -> Result<Order, EngineError> {
		if request.role != Role::Customer {
			return Err(EngineError::Forbidden(format!(
				"Role {} cannot place orders",
				request.role
			)));
		}

		let address = {
			let users = self.users.read().await;
			let user = users
				.find(&request.email)
				.filter(|user| user.role == Role::Customer)
				.ok_or(AuthError::AuthenticationFailure)?;
			user.address.clone()
		};

		let order = self
			.orders
			.write()
			.await
			.create(
				request.item_count,
				request.delivery_type,
				request.notes,
				address.as_ref(),
			)
			.await?;

		tracing::info!(order_id = %order.id, amount = order.amount, "Order placed");
		self.event_bus
			.publish(MarketplaceEvent::Order(OrderEvent::Placed {
				order: order.clone(),
			}));
		Ok(order)
	}

	/// Moves an order to `target` on behalf of `role`.
	#[instrument(skip_all, fields(order_id = %order_id, role = %role, target = %target))]
	pub async fn transition_order(
		&self,
		order_id: &str,
		role: Role,
		target: OrderStatus,
	) -> Result<Order, EngineError> {
		let transitioned = self
			.orders
			.write()
			.await
			.transition(order_id, role, target)
			.await
			.inspect_err(|e| tracing::debug!(error = %e, "Transition rejected"))?;

		tracing::info!(from = %transitioned.from, "Order status changed");
		self.event_bus
			.publish(MarketplaceEvent::Order(OrderEvent::StatusChanged {
				order_id: transitioned.order.id.clone(),
				from: transitioned.from,
				to: transitioned.order.status,
				role,
			}));
		Ok(transitioned.order)
	}

	/// Snapshot of every order, newest first.
	pub async fn orders(&self) -> Vec<Order> {
		self.orders.read().await.list().to_vec()
	}

	pub async fn order(&self, order_id: &str) -> Result<Order, EngineError> {
		self.orders
			.read()
			.await
			.get(order_id)
			.cloned()
			.ok_or_else(|| OrderStoreError::NotFound(order_id.to_string()).into())
	}

	pub async fn communities(&self) -> Vec<Community> {
		self.directory.read().await.communities().to_vec()
	}

	pub async fn vendors(&self) -> Vec<Vendor> {
		self.directory.read().await.vendors().to_vec()
	}

	#[instrument(skip_all)]
	pub async fn add_community(&self, name: &str, location: &str) -> Result<Community, EngineError> {
		let community = self
			.directory
			.write()
			.await
			.add_community(name, location)
			.await?;

		tracing::info!(community = %community.name, "Community added");
		self.event_bus
			.publish(MarketplaceEvent::Directory(DirectoryEvent::CommunityAdded {
				community: community.clone(),
			}));
		Ok(community)
	}

	#[instrument(skip_all)]
	pub async fn add_vendor(&self, name: &str, owner: &str) -> Result<Vendor, EngineError> {
		let vendor = self.directory.write().await.add_vendor(name, owner).await?;

		tracing::info!(vendor = %vendor.name, "Vendor added");
		self.event_bus
			.publish(MarketplaceEvent::Directory(DirectoryEvent::VendorAdded {
				vendor: vendor.clone(),
			}));
		Ok(vendor)
	}

	pub async fn vendor_dashboard(&self) -> VendorBuckets {
		views::vendor_buckets(self.orders.read().await.list())
	}

	pub async fn delivery_staff_dashboard(&self) -> DeliveryTasks {
		views::delivery_staff_tasks(self.orders.read().await.list())
	}

	pub async fn admin_dashboard(&self) -> AdminAggregates {
		let directory = self.directory.read().await;
		let orders = self.orders.read().await;
		views::admin_aggregates(directory.communities(), directory.vendors(), orders.list())
	}

	pub async fn customer_dashboard(&self) -> Vec<CustomerOrderView> {
		views::customer_dashboard(self.orders.read().await.list(), &self.pricing)
	}
}
