//! Order endpoints.
//!
//! Placing an order and changing its status both name the requesting role in
//! the body; the engine decides whether that role may act.

use super::{api_error, json_body};
use crate::server::AppState;
use axum::{
	extract::{rejection::JsonRejection, Path, State},
	http::StatusCode,
	Json,
};
use pressline_types::{APIError, Order, PlaceOrderRequest, TransitionRequest};

/// Handles GET /api/orders.
pub async fn handle_list_orders(State(state): State<AppState>) -> Json<Vec<Order>> {
	Json(state.engine.orders().await)
}

/// Handles GET /api/orders/{id}.
pub async fn handle_get_order(
	State(state): State<AppState>,
	Path(order_id): Path<String>,
) -> Result<Json<Order>, APIError> {
	state.engine.order(&order_id).await.map(Json).map_err(api_error)
}

/// Handles POST /api/orders.
pub async fn handle_place_order(
	State(state): State<AppState>,
	payload: Result<Json<PlaceOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), APIError> {
	let request = json_body(payload)?;
	match state.engine.place_order(request).await {
		Ok(order) => Ok((StatusCode::CREATED, Json(order))),
		Err(e) => {
			tracing::warn!("Order placement failed: {}", e);
			Err(api_error(e))
		},
	}
}

/// Handles POST /api/orders/{id}/status.
pub async fn handle_transition(
	State(state): State<AppState>,
	Path(order_id): Path<String>,
	payload: Result<Json<TransitionRequest>, JsonRejection>,
) -> Result<Json<Order>, APIError> {
	let request = json_body(payload)?;
	match state
		.engine
		.transition_order(&order_id, request.role, request.status)
		.await
	{
		Ok(order) => Ok(Json(order)),
		Err(e) => {
			tracing::warn!(order_id = %order_id, "Status change failed: {}", e);
			Err(api_error(e))
		},
	}
}
