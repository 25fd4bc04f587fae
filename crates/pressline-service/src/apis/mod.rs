//! HTTP handlers grouped by the collection they serve.

pub mod auth;
pub mod dashboard;
pub mod directory;
pub mod orders;

use axum::{extract::rejection::JsonRejection, Json};
use pressline_core::{AuthError, DirectoryError, EngineError, OrderStoreError};
use pressline_types::APIError;

/// Maps an engine failure onto the HTTP error it is reported as.
pub fn api_error(error: EngineError) -> APIError {
	let message = error.to_string();
	match error {
		EngineError::Orders(OrderStoreError::InvalidItemCount) => APIError::BadRequest {
			error_type: "INVALID_ITEM_COUNT".into(),
			message,
		},
		EngineError::Orders(OrderStoreError::AmountOverflow { .. }) => APIError::BadRequest {
			error_type: "AMOUNT_TOO_LARGE".into(),
			message,
		},
		EngineError::Orders(OrderStoreError::SequenceExhausted) => {
			tracing::error!("Order id sequence exhausted");
			APIError::InternalServerError {
				error_type: "ORDER_IDS_EXHAUSTED".into(),
				message,
			}
		},
		EngineError::Orders(OrderStoreError::NotFound(_)) => APIError::NotFound {
			error_type: "ORDER_NOT_FOUND".into(),
			message,
		},
		EngineError::Orders(OrderStoreError::IllegalTransition { .. }) => APIError::Conflict {
			error_type: "ILLEGAL_TRANSITION".into(),
			message,
		},
		EngineError::Auth(AuthError::Validation(_))
		| EngineError::Directory(DirectoryError::Validation(_)) => APIError::BadRequest {
			error_type: "VALIDATION_ERROR".into(),
			message,
		},
		EngineError::Auth(AuthError::DuplicateEmail) => APIError::Conflict {
			error_type: "DUPLICATE_EMAIL".into(),
			message,
		},
		EngineError::Auth(AuthError::AuthenticationFailure) => APIError::Unauthorized {
			error_type: "INVALID_CREDENTIALS".into(),
			message,
		},
		EngineError::Forbidden(_) => APIError::Forbidden {
			error_type: "FORBIDDEN".into(),
			message,
		},
		EngineError::Orders(OrderStoreError::Storage(_))
		| EngineError::Auth(AuthError::Storage(_))
		| EngineError::Directory(DirectoryError::Storage(_)) => {
			tracing::error!(error = %message, "Failed to persist marketplace state");
			APIError::InternalServerError {
				error_type: "STORAGE_ERROR".into(),
				message: "Failed to save changes".into(),
			}
		},
	}
}

/// Unwraps a JSON body, reporting a malformed one as a 400.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, APIError> {
	payload
		.map(|Json(body)| body)
		.map_err(|rejection| APIError::BadRequest {
			error_type: "INVALID_REQUEST".into(),
			message: rejection.body_text(),
		})
}
