//! API types for the Pressline HTTP API.
//!
//! This module defines the request and response bodies of the `/api`
//! endpoints and the structured error type every handler returns.

use crate::{DeliveryType, OrderStatus, Role, SecretString};
use axum::{
	http::StatusCode,
	response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of `POST /api/signup`.
///
/// Every field is optional at the wire level so that a missing field is
/// reported as a validation error instead of a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupRequest {
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub email: Option<String>,
	#[serde(default)]
	pub password: Option<SecretString>,
	#[serde(default)]
	pub role: Option<Role>,
	#[serde(default)]
	pub tower: Option<String>,
	#[serde(default)]
	pub flat: Option<String>,
}

/// Body of `POST /api/login`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
	#[serde(default)]
	pub email: Option<String>,
	#[serde(default)]
	pub password: Option<SecretString>,
	#[serde(default)]
	pub role: Option<Role>,
}

/// Body of `POST /api/orders`.
///
/// The requester is identified by email and role, the same pair a login
/// session carries.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
	pub email: String,
	pub role: Role,
	pub item_count: u32,
	#[serde(default)]
	pub delivery_type: DeliveryType,
	#[serde(default)]
	pub notes: Option<String>,
}

/// Body of `POST /api/orders/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct TransitionRequest {
	pub role: Role,
	pub status: OrderStatus,
}

/// Body of `POST /api/communities`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCommunityRequest {
	pub name: String,
	pub location: String,
}

/// Body of `POST /api/vendors`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewVendorRequest {
	pub name: String,
	pub owner: String,
}

/// Plain acknowledgement body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
	pub message: String,
}

/// API error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
	/// Error type/code
	pub error: String,
	/// Human-readable description
	pub message: String,
}

/// Structured API error type with appropriate HTTP status mapping.
#[derive(Debug)]
pub enum APIError {
	/// Missing or malformed input (400)
	BadRequest { error_type: String, message: String },
	/// Credential mismatch (401)
	Unauthorized { error_type: String, message: String },
	/// Requester's role may not perform the operation (403)
	Forbidden { error_type: String, message: String },
	/// Unknown resource (404)
	NotFound { error_type: String, message: String },
	/// Request conflicts with current state (409)
	Conflict { error_type: String, message: String },
	/// Internal server error (500)
	InternalServerError { error_type: String, message: String },
}

impl APIError {
	/// Get the HTTP status code for this error.
	pub fn status_code(&self) -> StatusCode {
		match self {
			APIError::BadRequest { .. } => StatusCode::BAD_REQUEST,
			APIError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
			APIError::Forbidden { .. } => StatusCode::FORBIDDEN,
			APIError::NotFound { .. } => StatusCode::NOT_FOUND,
			APIError::Conflict { .. } => StatusCode::CONFLICT,
			APIError::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	/// Convert to ErrorResponse for JSON serialization.
	pub fn to_error_response(&self) -> ErrorResponse {
		let (error_type, message) = match self {
			APIError::BadRequest { error_type, message }
			| APIError::Unauthorized { error_type, message }
			| APIError::Forbidden { error_type, message }
			| APIError::NotFound { error_type, message }
			| APIError::Conflict { error_type, message }
			| APIError::InternalServerError { error_type, message } => (error_type, message),
		};
		ErrorResponse {
			error: error_type.clone(),
			message: message.clone(),
		}
	}
}

impl fmt::Display for APIError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let body = self.to_error_response();
		write!(f, "{} ({}): {}", self.status_code(), body.error, body.message)
	}
}

impl std::error::Error for APIError {}

impl IntoResponse for APIError {
	fn into_response(self) -> Response {
		(self.status_code(), Json(self.to_error_response())).into_response()
	}
}
