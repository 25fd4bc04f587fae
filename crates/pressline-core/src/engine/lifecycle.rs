//! Startup and shutdown reporting for the marketplace engine.

use super::MarketplaceEngine;
use pressline_types::Role;

impl MarketplaceEngine {
	/// Logs what the engine loaded. Called once before serving requests.
	pub async fn initialize(&self) {
		let orders = self.orders.read().await.list().len();
		let users = self.users.read().await;
		let directory = self.directory.read().await;

		tracing::info!(
			marketplace = %self.config.marketplace.id,
			orders,
			customers = users.count_with_role(Role::Customer),
			communities = directory.communities().len(),
			vendors = directory.vendors().len(),
			"Initialized marketplace engine"
		);
	}

	/// Logs shutdown. Every mutation is persisted before it returns, so there
	/// is nothing left to flush.
	pub async fn shutdown(&self) {
		tracing::info!(
			marketplace = %self.config.marketplace.id,
			"Shutting down marketplace engine"
		);
	}
}
