//! Storage module for the Pressline marketplace.
//!
//! This module is the persistence gateway of the marketplace: an opaque
//! key-value blob store that the stores load their collections from at
//! startup and save them to after every mutation. Backends only move bytes;
//! typed collections are handled by [`StorageService`].

use async_trait::async_trait;
use pressline_types::{ConfigSchema, StorageKey};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod file;
	pub mod memory;
}

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
	/// Error that occurs when a requested item is not found.
	#[error("Not found")]
	NotFound,
	/// Error that occurs during serialization/deserialization.
	#[error("Serialization error: {0}")]
	Serialization(String),
	/// Error that occurs in the storage backend.
	#[error("Backend error: {0}")]
	Backend(String),
	/// Error that occurs during configuration validation.
	#[error("Configuration error: {0}")]
	Configuration(String),
}

/// Trait defining the low-level interface for storage backends.
///
/// This trait must be implemented by any storage backend that wants to
/// integrate with the marketplace. It provides basic key-value operations
/// over raw bytes.
#[async_trait]
pub trait StorageInterface: Send + Sync {
	/// Retrieves raw bytes for the given key.
	async fn get_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError>;

	/// Stores raw bytes, replacing any previous value.
	async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;

	/// Deletes the value associated with the given key.
	async fn delete(&self, key: &str) -> Result<(), StorageError>;

	/// Checks if a key exists in storage.
	async fn exists(&self, key: &str) -> Result<bool, StorageError>;

	/// Returns the configuration schema for validation.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;
}

/// Type alias for storage factory functions.
///
/// This is the function signature that all storage implementations must provide
/// to create instances of their storage interface.
pub type StorageFactory = fn(&toml::Value) -> Result<Box<dyn StorageInterface>, StorageError>;

/// Get all available storage implementations.
///
/// Returns a vector of (name, factory) tuples. The names are the keys used
/// under `[storage.implementations]` in the configuration file.
pub fn get_all_implementations() -> Vec<(&'static str, StorageFactory)> {
	use implementations::{file, memory};

	vec![
		("file", file::create_storage as StorageFactory),
		("memory", memory::create_storage as StorageFactory),
	]
}

/// High-level storage service that provides typed collection operations.
///
/// The StorageService wraps a low-level storage backend and stores each
/// collection as one JSON blob under its [`StorageKey`].
pub struct StorageService {
	/// The underlying storage backend implementation.
	backend: Box<dyn StorageInterface>,
}

impl StorageService {
	/// Creates a new StorageService with the specified backend.
	pub fn new(backend: Box<dyn StorageInterface>) -> Self {
		Self { backend }
	}

	/// Loads a collection, falling back to `default` when it is absent.
	///
	/// A blob that cannot be deserialized is treated the same as an absent
	/// one: it is logged and replaced by the default. Only backend failures
	/// are returned as errors.
	pub async fn load<T, F>(&self, key: StorageKey, default: F) -> Result<T, StorageError>
	where
		T: DeserializeOwned,
		F: FnOnce() -> T,
	{
		let bytes = match self.backend.get_bytes(key.as_str()).await {
			Ok(bytes) => bytes,
			Err(StorageError::NotFound) => {
				tracing::debug!(key = key.as_str(), "No stored collection, using default");
				return Ok(default());
			},
			Err(e) => return Err(e),
		};

		match serde_json::from_slice(&bytes) {
			Ok(value) => Ok(value),
			Err(e) => {
				tracing::warn!(
					key = key.as_str(),
					error = %e,
					"Stored collection is corrupt, using default"
				);
				Ok(default())
			},
		}
	}

	/// Serializes and stores a whole collection under `key`.
	pub async fn save<T: Serialize + ?Sized>(
		&self,
		key: StorageKey,
		data: &T,
	) -> Result<(), StorageError> {
		let bytes =
			serde_json::to_vec(data).map_err(|e| StorageError::Serialization(e.to_string()))?;
		self.backend.set_bytes(key.as_str(), bytes).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::implementations::memory::MemoryStorage;
	use serde::Deserialize;

	#[derive(Debug, PartialEq, Serialize, Deserialize)]
	struct Entry {
		name: String,
	}

	fn service() -> StorageService {
		StorageService::new(Box::new(MemoryStorage::new()))
	}

	#[tokio::test]
	async fn test_load_absent_uses_default() {
		let storage = service();
		let loaded: Vec<Entry> = storage
			.load(StorageKey::Vendors, || {
				vec![Entry {
					name: "seed".into(),
				}]
			})
			.await
			.unwrap();
		assert_eq!(loaded.len(), 1);
		assert!(!storage.backend.exists("vendors").await.unwrap());
	}

	#[tokio::test]
	async fn test_save_then_load() {
		let storage = service();
		let entries = vec![Entry { name: "a".into() }, Entry { name: "b".into() }];
		storage.save(StorageKey::Communities, &entries).await.unwrap();

		let loaded: Vec<Entry> = storage
			.load(StorageKey::Communities, Vec::new)
			.await
			.unwrap();
		assert_eq!(loaded, entries);
	}

	#[tokio::test]
	async fn test_corrupt_blob_falls_back_to_default() {
		let backend = MemoryStorage::new();
		backend
			.set_bytes("orders", b"{not json".to_vec())
			.await
			.unwrap();
		let storage = StorageService::new(Box::new(backend));

		let loaded: Vec<Entry> = storage.load(StorageKey::Orders, Vec::new).await.unwrap();
		assert!(loaded.is_empty());
	}

	#[tokio::test]
	async fn test_wrong_shape_is_treated_as_corrupt() {
		let storage = service();
		storage.save(StorageKey::Users, &42u32).await.unwrap();

		let loaded: Vec<Entry> = storage.load(StorageKey::Users, Vec::new).await.unwrap();
		assert!(loaded.is_empty());
	}

	#[test]
	fn test_all_implementations_registered() {
		let names: Vec<_> = get_all_implementations()
			.into_iter()
			.map(|(name, _)| name)
			.collect();
		assert_eq!(names, vec!["file", "memory"]);
	}
}
