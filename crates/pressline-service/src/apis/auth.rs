//! Sign-up and login endpoints.

use super::{api_error, json_body};
use crate::server::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use pressline_types::{APIError, LoginRequest, MessageResponse, Session, SignupRequest};

/// Handles POST /api/signup.
pub async fn handle_signup(
	State(state): State<AppState>,
	payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), APIError> {
	let request = json_body(payload)?;
	match state.engine.signup(request).await {
		Ok(_) => Ok((
			StatusCode::CREATED,
			Json(MessageResponse {
				message: "User created successfully".into(),
			}),
		)),
		Err(e) => {
			tracing::warn!("Signup failed: {}", e);
			Err(api_error(e))
		},
	}
}

/// Handles POST /api/login.
pub async fn handle_login(
	State(state): State<AppState>,
	payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<Session>, APIError> {
	let request = json_body(payload)?;
	state.engine.login(request).await.map(Json).map_err(api_error)
}
