//! Read-only dashboard projections, one per role.

use crate::server::AppState;
use axum::{extract::State, Json};
use pressline_core::views::{AdminAggregates, CustomerOrderView, DeliveryTasks, VendorBuckets};

pub async fn handle_vendor(State(state): State<AppState>) -> Json<VendorBuckets> {
	Json(state.engine.vendor_dashboard().await)
}

pub async fn handle_delivery_staff(State(state): State<AppState>) -> Json<DeliveryTasks> {
	Json(state.engine.delivery_staff_dashboard().await)
}

pub async fn handle_super_admin(State(state): State<AppState>) -> Json<AdminAggregates> {
	Json(state.engine.admin_dashboard().await)
}

pub async fn handle_customer(State(state): State<AppState>) -> Json<Vec<CustomerOrderView>> {
	Json(state.engine.customer_dashboard().await)
}
