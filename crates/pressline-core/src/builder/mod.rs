//! Builder pattern for constructing marketplace engines.
//!
//! Wires a MarketplaceEngine to the storage backend named as primary in the
//! configuration, using factory functions registered by the binary.

use crate::engine::{event_bus::EventBus, EngineError, MarketplaceEngine};
use pressline_config::Config;
use pressline_storage::{StorageError, StorageInterface, StorageService};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during engine construction.
#[derive(Debug, Error)]
pub enum BuilderError {
	#[error("Configuration error: {0}")]
	Config(String),
	#[error("Missing required component: {0}")]
	MissingComponent(String),
	#[error("Failed to load marketplace state: {0}")]
	Engine(#[from] EngineError),
}

/// Factory functions available to the builder, keyed by implementation name.
pub struct MarketplaceFactories<SF> {
	pub storage_factories: HashMap<String, SF>,
}

/// Builder for constructing a MarketplaceEngine with a pluggable storage backend.
pub struct MarketplaceBuilder {
	config: Config,
	event_bus: Option<EventBus>,
}

impl MarketplaceBuilder {
	pub fn new(config: Config) -> Self {
		Self {
			config,
			event_bus: None,
		}
	}

	/// Uses an existing event bus instead of creating a new one.
	pub fn with_event_bus(mut self, event_bus: EventBus) -> Self {
		self.event_bus = Some(event_bus);
		self
	}

	/// Builds the engine on top of the primary storage implementation.
	///
	/// Only the primary backend is instantiated; other configured backends
	/// are left untouched so that, for example, an unused file backend does
	/// not create or lock its directory.
	pub async fn build<SF>(
		self,
		factories: MarketplaceFactories<SF>,
	) -> Result<MarketplaceEngine, BuilderError>
	where
		SF: Fn(&toml::Value) -> Result<Box<dyn StorageInterface>, StorageError>,
	{
		let primary = &self.config.storage.primary;
		let settings = self
			.config
			.storage
			.implementations
			.get(primary)
			.ok_or_else(|| {
				BuilderError::Config(format!(
					"Primary storage '{}' not found in implementations",
					primary
				))
			})?;
		let factory = factories.storage_factories.get(primary).ok_or_else(|| {
			BuilderError::MissingComponent(format!("storage implementation '{}'", primary))
		})?;

		let backend = factory(settings).map_err(|e| {
			tracing::error!(
				component = "storage",
				implementation = %primary,
				error = %e,
				"Failed to create storage implementation"
			);
			BuilderError::Config(format!(
				"Failed to create storage implementation '{}': {}",
				primary, e
			))
		})?;
		tracing::info!(component = "storage", implementation = %primary, "Loaded");

		for name in self.config.storage.implementations.keys() {
			if name != primary {
				tracing::debug!(component = "storage", implementation = %name, enabled = false, "Skipped");
			}
		}

		let storage = Arc::new(StorageService::new(backend));
		let event_bus = self.event_bus.unwrap_or_default();

		Ok(MarketplaceEngine::new(self.config, storage, event_bus).await?)
	}
}
