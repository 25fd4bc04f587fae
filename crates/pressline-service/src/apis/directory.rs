//! Community and vendor directory endpoints.

use super::{api_error, json_body};
use crate::server::AppState;
use axum::{
	extract::{rejection::JsonRejection, State},
	http::StatusCode,
	Json,
};
use pressline_types::{APIError, Community, NewCommunityRequest, NewVendorRequest, Vendor};

pub async fn handle_list_communities(State(state): State<AppState>) -> Json<Vec<Community>> {
	Json(state.engine.communities().await)
}

pub async fn handle_add_community(
	State(state): State<AppState>,
	payload: Result<Json<NewCommunityRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Community>), APIError> {
	let request = json_body(payload)?;
	state
		.engine
		.add_community(&request.name, &request.location)
		.await
		.map(|community| (StatusCode::CREATED, Json(community)))
		.map_err(api_error)
}

pub async fn handle_list_vendors(State(state): State<AppState>) -> Json<Vec<Vendor>> {
	Json(state.engine.vendors().await)
}

pub async fn handle_add_vendor(
	State(state): State<AppState>,
	payload: Result<Json<NewVendorRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Vendor>), APIError> {
	let request = json_body(payload)?;
	state
		.engine
		.add_vendor(&request.name, &request.owner)
		.await
		.map(|vendor| (StatusCode::CREATED, Json(vendor)))
		.map_err(api_error)
}
