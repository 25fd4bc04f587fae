//! HTTP server for the Pressline API.
//!
//! Every route lives under `/api`. Handlers are thin: they decode the body,
//! call the engine and map its errors onto status codes.

use crate::apis::{auth, dashboard, directory, orders};
use axum::{
	http::{header, HeaderValue, Method},
	routing::{get, post},
	Router,
};
use pressline_config::{ApiConfig, CorsConfig};
use pressline_core::MarketplaceEngine;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
	pub engine: Arc<MarketplaceEngine>,
}

/// Builds the API router around `engine`.
pub fn router(engine: Arc<MarketplaceEngine>, cors: Option<&CorsConfig>) -> Router {
	let api = Router::new()
		.route("/signup", post(auth::handle_signup))
		.route("/login", post(auth::handle_login))
		.route(
			"/orders",
			get(orders::handle_list_orders).post(orders::handle_place_order),
		)
		.route("/orders/{id}", get(orders::handle_get_order))
		.route("/orders/{id}/status", post(orders::handle_transition))
		.route(
			"/communities",
			get(directory::handle_list_communities).post(directory::handle_add_community),
		)
		.route(
			"/vendors",
			get(directory::handle_list_vendors).post(directory::handle_add_vendor),
		)
		.route("/dashboard/vendor", get(dashboard::handle_vendor))
		.route(
			"/dashboard/delivery-staff",
			get(dashboard::handle_delivery_staff),
		)
		.route("/dashboard/super-admin", get(dashboard::handle_super_admin))
		.route("/dashboard/customer", get(dashboard::handle_customer));

	Router::new()
		.nest("/api", api)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(cors_layer(cors)),
		)
		.with_state(AppState { engine })
}

/// Permissive unless specific origins are configured.
fn cors_layer(cors: Option<&CorsConfig>) -> CorsLayer {
	let origins = match cors {
		Some(cors)
			if !cors.allowed_origins.is_empty()
				&& !cors.allowed_origins.iter().any(|origin| origin == "*") =>
		{
			&cors.allowed_origins
		},
		_ => return CorsLayer::permissive(),
	};

	let origins: Vec<HeaderValue> = origins
		.iter()
		.filter_map(|origin| match origin.parse::<HeaderValue>() {
			Ok(value) => Some(value),
			Err(_) => {
				tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
				None
			},
		})
		.collect();

	CorsLayer::new()
		.allow_origin(AllowOrigin::list(origins))
		.allow_methods([Method::GET, Method::POST])
		.allow_headers([header::CONTENT_TYPE])
}

/// Serves the API until `shutdown` resolves.
pub async fn start_server(
	api_config: ApiConfig,
	engine: Arc<MarketplaceEngine>,
	shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), Box<dyn std::error::Error>> {
	let app = router(engine, api_config.cors.as_ref());

	let bind_address = format!("{}:{}", api_config.host, api_config.port);
	let listener = TcpListener::bind(&bind_address).await?;

	tracing::info!("Pressline API server starting on {}", bind_address);

	axum::serve(listener, app)
		.with_graceful_shutdown(shutdown)
		.await?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::body::Body;
	use axum::http::{Request, StatusCode};
	use http_body_util::BodyExt;
	use pressline_config::Config;
	use pressline_core::{MarketplaceBuilder, MarketplaceFactories};
	use pressline_storage::implementations::memory;
	use serde_json::{json, Value};
	use std::collections::HashMap;
	use tower::ServiceExt;

	async fn engine() -> Arc<MarketplaceEngine> {
		let config: Config = r#"
[marketplace]
id = "pressline-api-test"

[storage]
primary = "memory"
[storage.implementations.memory]
"#
		.parse()
		.unwrap();

		let mut storage_factories = HashMap::new();
		storage_factories.insert(
			"memory".to_string(),
			memory::create_storage as pressline_storage::StorageFactory,
		);
		let engine = MarketplaceBuilder::new(config)
			.build(MarketplaceFactories { storage_factories })
			.await
			.unwrap();
		Arc::new(engine)
	}

	async fn app() -> Router {
		router(engine().await, None)
	}

	async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
		let request = Request::builder().method(method).uri(uri);
		let request = match body {
			Some(body) => request
				.header("content-type", "application/json")
				.body(Body::from(body.to_string())),
			None => request.body(Body::empty()),
		}
		.unwrap();

		let response = app.clone().oneshot(request).await.unwrap();
		let status = response.status();
		let bytes = response.into_body().collect().await.unwrap().to_bytes();
		let body = if bytes.is_empty() {
			Value::Null
		} else {
			serde_json::from_slice(&bytes).unwrap()
		};
		(status, body)
	}

	#[tokio::test]
	async fn test_login_seeded_customer() {
		let app = app().await;
		let (status, body) = send(
			&app,
			"POST",
			"/api/login",
			Some(json!({
				"email": "customer@example.com",
				"password": "password123",
				"role": "customer"
			})),
		)
		.await;

		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["name"], "Priya Sharma");
		assert_eq!(body["role"], "customer");
	}

	#[tokio::test]
	async fn test_login_wrong_role() {
		let app = app().await;
		let (status, body) = send(
			&app,
			"POST",
			"/api/login",
			Some(json!({
				"email": "customer@example.com",
				"password": "password123",
				"role": "vendor"
			})),
		)
		.await;

		assert_eq!(status, StatusCode::UNAUTHORIZED);
		assert_eq!(body["error"], "INVALID_CREDENTIALS");
	}

	#[tokio::test]
	async fn test_signup_then_duplicate() {
		let app = app().await;
		let signup = json!({
			"name": "Meera Iyer",
			"email": "meera@example.com",
			"password": "ironing-day",
			"role": "customer",
			"tower": "G",
			"flat": "204"
		});

		let (status, body) = send(&app, "POST", "/api/signup", Some(signup.clone())).await;
		assert_eq!(status, StatusCode::CREATED);
		assert_eq!(body["message"], "User created successfully");

		let (status, body) = send(&app, "POST", "/api/signup", Some(signup)).await;
		assert_eq!(status, StatusCode::CONFLICT);
		assert_eq!(body["error"], "DUPLICATE_EMAIL");
	}

	#[tokio::test]
	async fn test_signup_missing_fields() {
		let app = app().await;
		let (status, body) = send(
			&app,
			"POST",
			"/api/signup",
			Some(json!({ "email": "meera@example.com" })),
		)
		.await;

		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(body["message"], "All fields are required");
	}

	#[tokio::test]
	async fn test_malformed_body_is_bad_request() {
		let app = app().await;
		let request = Request::builder()
			.method("POST")
			.uri("/api/login")
			.header("content-type", "application/json")
			.body(Body::from("{not json"))
			.unwrap();

		let response = app.oneshot(request).await.unwrap();
		assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	}

	#[tokio::test]
	async fn test_place_order_and_fetch() {
		let app = app().await;
		let (status, order) = send(
			&app,
			"POST",
			"/api/orders",
			Some(json!({
				"email": "customer@example.com",
				"role": "customer",
				"itemCount": 6,
				"deliveryType": "express"
			})),
		)
		.await;

		assert_eq!(status, StatusCode::CREATED);
		assert_eq!(order["id"], "ORD-8113");
		assert_eq!(order["status"], "Pending Pickup");
		assert_eq!(order["amount"], 90);
		assert_eq!(order["tower"], "F");

		let (status, fetched) = send(&app, "GET", "/api/orders/ORD-8113", None).await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(fetched, order);

		let (_, all) = send(&app, "GET", "/api/orders", None).await;
		assert_eq!(all[0]["id"], "ORD-8113");
		assert_eq!(all.as_array().unwrap().len(), 8);
	}

	#[tokio::test]
	async fn test_vendor_cannot_place_order() {
		let app = app().await;
		let (status, body) = send(
			&app,
			"POST",
			"/api/orders",
			Some(json!({
				"email": "vendor@example.com",
				"role": "vendor",
				"itemCount": 3
			})),
		)
		.await;

		assert_eq!(status, StatusCode::FORBIDDEN);
		assert_eq!(body["error"], "FORBIDDEN");
	}

	#[tokio::test]
	async fn test_zero_items_rejected() {
		let app = app().await;
		let (status, body) = send(
			&app,
			"POST",
			"/api/orders",
			Some(json!({
				"email": "customer@example.com",
				"role": "customer",
				"itemCount": 0
			})),
		)
		.await;

		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(body["error"], "INVALID_ITEM_COUNT");
	}

	#[tokio::test]
	async fn test_status_transitions() {
		let app = app().await;

		let (status, body) = send(
			&app,
			"POST",
			"/api/orders/ORD-8112/status",
			Some(json!({ "role": "vendor", "status": "Picked Up" })),
		)
		.await;
		assert_eq!(status, StatusCode::CONFLICT);
		assert_eq!(body["error"], "ILLEGAL_TRANSITION");

		let (status, order) = send(
			&app,
			"POST",
			"/api/orders/ORD-8112/status",
			Some(json!({ "role": "delivery-staff", "status": "Picked Up" })),
		)
		.await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(order["status"], "Picked Up");

		let (_, buckets) = send(&app, "GET", "/api/dashboard/vendor", None).await;
		assert_eq!(buckets["new"].as_array().unwrap().len(), 1);
		assert_eq!(buckets["inProgress"].as_array().unwrap().len(), 3);
	}

	#[tokio::test]
	async fn test_unknown_order() {
		let app = app().await;
		let (status, body) = send(&app, "GET", "/api/orders/ORD-0001", None).await;
		assert_eq!(status, StatusCode::NOT_FOUND);
		assert_eq!(body["error"], "ORDER_NOT_FOUND");

		let (status, _) = send(
			&app,
			"POST",
			"/api/orders/ORD-0001/status",
			Some(json!({ "role": "customer", "status": "Paid" })),
		)
		.await;
		assert_eq!(status, StatusCode::NOT_FOUND);
	}

	#[tokio::test]
	async fn test_directory_updates_admin_dashboard() {
		let app = app().await;

		let (status, community) = send(
			&app,
			"POST",
			"/api/communities",
			Some(json!({ "name": "Godrej Woodsman", "location": "Bangalore" })),
		)
		.await;
		assert_eq!(status, StatusCode::CREATED);
		assert_eq!(community["vendors"], 0);

		let (status, _) = send(
			&app,
			"POST",
			"/api/vendors",
			Some(json!({ "name": " ", "owner": "Kavya Rao" })),
		)
		.await;
		assert_eq!(status, StatusCode::BAD_REQUEST);

		let (_, aggregates) = send(&app, "GET", "/api/dashboard/super-admin", None).await;
		assert_eq!(aggregates["communityCount"], 4);
		assert_eq!(aggregates["activeVendorCount"], 2);
		assert_eq!(aggregates["totalOrders"], 7);
	}

	#[tokio::test]
	async fn test_customer_and_delivery_dashboards() {
		let app = app().await;

		let (status, rows) = send(&app, "GET", "/api/dashboard/customer", None).await;
		assert_eq!(status, StatusCode::OK);
		let delivered = rows
			.as_array()
			.unwrap()
			.iter()
			.find(|row| row["order"]["id"] == "ORD-7891")
			.unwrap();
		assert_eq!(delivered["progress"], 90);
		assert_eq!(delivered["action"]["label"], "Pay Now");
		assert_eq!(delivered["turnaroundHours"], 48);

		let (status, tasks) = send(&app, "GET", "/api/dashboard/delivery-staff", None).await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(tasks["active"].as_array().unwrap().len(), 3);
	}

	async fn allowed_origin(app: Router, origin: &str) -> Option<String> {
		let request = Request::builder()
			.uri("/api/vendors")
			.header(header::ORIGIN, origin)
			.body(Body::empty())
			.unwrap();
		let response = app.oneshot(request).await.unwrap();
		assert_eq!(response.status(), StatusCode::OK);
		response
			.headers()
			.get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
			.map(|value| value.to_str().unwrap().to_string())
	}

	#[tokio::test]
	async fn test_cors_permissive_by_default_and_for_wildcard() {
		let engine = engine().await;
		let wildcard = CorsConfig {
			allowed_origins: vec!["*".into()],
		};

		for app in [
			router(engine.clone(), None),
			router(engine.clone(), Some(&wildcard)),
		] {
			assert_eq!(
				allowed_origin(app, "http://anywhere.test").await.as_deref(),
				Some("*")
			);
		}
	}

	#[tokio::test]
	async fn test_cors_restricted_to_listed_origins() {
		let cors = CorsConfig {
			allowed_origins: vec!["http://localhost:3000".into(), "bad\norigin".into()],
		};
		let app = router(engine().await, Some(&cors));

		assert_eq!(
			allowed_origin(app.clone(), "http://localhost:3000")
				.await
				.as_deref(),
			Some("http://localhost:3000")
		);
		assert_eq!(allowed_origin(app, "http://evil.test").await, None);
	}
}
