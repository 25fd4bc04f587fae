//! Main entry point for the Pressline marketplace service.
//!
//! Loads the configuration, builds the marketplace engine on the configured
//! storage backend and serves the HTTP API until interrupted.

use clap::Parser;
use pressline_config::Config;
use pressline_core::{MarketplaceBuilder, MarketplaceEngine, MarketplaceFactories};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

mod apis;
mod server;

use pressline_storage::implementations::file::create_storage as create_file_storage;
use pressline_storage::implementations::memory::create_storage as create_memory_storage;

/// Command-line arguments for the marketplace service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	use tracing_subscriber::{fmt, EnvFilter};

	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt()
		.with_env_filter(env_filter)
		.with_thread_ids(true)
		.with_target(true)
		.init();

	tracing::info!("Started pressline");

	let config_path = args
		.config
		.to_str()
		.ok_or("Configuration path is not valid UTF-8")?;
	let config = Config::from_file(config_path).await?;
	tracing::info!("Loaded configuration [{}]", config.marketplace.id);

	let engine = Arc::new(build_engine(config.clone()).await?);
	spawn_event_logger(&engine);
	engine.initialize().await;

	match config.api.filter(|api| api.enabled) {
		Some(api_config) => {
			server::start_server(api_config, Arc::clone(&engine), shutdown_signal()).await?;
			tracing::info!("API server finished");
		},
		None => {
			tracing::warn!("API disabled, nothing will be served");
			shutdown_signal().await;
		},
	}

	engine.shutdown().await;
	tracing::info!("Stopped pressline");
	Ok(())
}

/// Macro to create a factory HashMap with the appropriate type aliases
macro_rules! create_factory_map {
    ($interface:path, $error:path, $( $name:literal => $factory:expr ),* $(,)?) => {{
        let mut factories = std::collections::HashMap::new();
        $(
            factories.insert(
                $name.to_string(),
                $factory as fn(&toml::Value) -> Result<Box<dyn $interface>, $error>
            );
        )*
        factories
    }};
}

/// Builds the marketplace engine with every registered storage backend.
async fn build_engine(config: Config) -> Result<MarketplaceEngine, Box<dyn std::error::Error>> {
	let storage_factories = create_factory_map!(
		pressline_storage::StorageInterface,
		pressline_storage::StorageError,
		"file" => create_file_storage,
		"memory" => create_memory_storage,
	);

	let engine = MarketplaceBuilder::new(config)
		.build(MarketplaceFactories { storage_factories })
		.await?;
	Ok(engine)
}

/// Logs every committed marketplace change.
fn spawn_event_logger(engine: &MarketplaceEngine) {
	let mut events = engine.event_bus().subscribe();
	tokio::spawn(async move {
		loop {
			match events.recv().await {
				Ok(event) => tracing::info!(?event, "Marketplace event"),
				Err(RecvError::Lagged(skipped)) => {
					tracing::warn!(skipped, "Event logger fell behind")
				},
				Err(RecvError::Closed) => break,
			}
		}
	});
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::error!("Failed to listen for shutdown signal: {}", e);
	}
	tracing::info!("Shutdown requested");
}

#[cfg(test)]
mod tests {
	use super::*;
	use pressline_types::Role;
	use tempfile::tempdir;

	#[test]
	fn test_args_default_values() {
		let args = Args::try_parse_from(["pressline"]).unwrap();

		assert_eq!(args.config, PathBuf::from("config.toml"));
		assert_eq!(args.log_level, "info");
	}

	#[test]
	fn test_args_custom_values() {
		let args =
			Args::try_parse_from(["pressline", "-c", "custom.toml", "--log-level", "debug"]).unwrap();

		assert_eq!(args.config, PathBuf::from("custom.toml"));
		assert_eq!(args.log_level, "debug");
	}

	#[test]
	fn test_create_factory_map_multiple_entries() {
		use pressline_storage::{StorageError, StorageInterface};

		let factories = create_factory_map!(
			StorageInterface,
			StorageError,
			"memory" => create_memory_storage,
			"file" => create_file_storage,
		);

		assert_eq!(factories.len(), 2);
		assert!(factories.contains_key("memory"));
		assert!(factories.contains_key("file"));
	}

	#[tokio::test]
	async fn test_build_engine_from_file_config() {
		let temp_dir = tempdir().expect("Failed to create temp dir");
		let config_path = temp_dir.path().join("config.toml");
		let storage_path = temp_dir.path().join("storage");

		let config_content = format!(
			r#"
[marketplace]
id = "test-file-marketplace"
unit_price = 20
seed_demo_data = false

[storage]
primary = "file"
[storage.implementations.file]
storage_path = "{}"
[storage.implementations.memory]

[api]
enabled = true
port = 4001
"#,
			storage_path.display()
		);
		std::fs::write(&config_path, config_content).expect("Failed to write config");

		let config = Config::from_file(config_path.to_str().unwrap())
			.await
			.expect("Failed to load config");
		assert_eq!(config.api.as_ref().map(|api| api.port), Some(4001));

		let engine = build_engine(config).await.expect("Failed to build engine");
		assert_eq!(engine.config().marketplace.id, "test-file-marketplace");
		assert!(engine.orders().await.is_empty());
		assert!(engine.communities().await.is_empty());
		assert_eq!(
			engine
				.login(pressline_types::LoginRequest {
					email: Some("admin@example.com".into()),
					password: Some("password123".into()),
					role: Some(Role::SuperAdmin),
				})
				.await
				.expect("Seeded admin should log in")
				.role,
			Role::SuperAdmin
		);
		assert!(storage_path.join(".pressline.lock").exists());
	}

	#[tokio::test]
	async fn test_event_logger_consumes_events() {
		let config: Config = r#"
[marketplace]
id = "events"

[storage]
primary = "memory"
[storage.implementations.memory]
"#
		.parse()
		.unwrap();
		let engine = build_engine(config).await.unwrap();
		spawn_event_logger(&engine);

		engine.add_vendor("SteamPro", "Kavya Rao").await.unwrap();
		assert_eq!(engine.vendors().await[0].name, "SteamPro");
	}
}
