//! Community and vendor directory maintained by the super-admin.

use crate::seed;
use pressline_storage::{StorageError, StorageService};
use pressline_types::{Community, StorageKey, Vendor, VendorStatus};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectoryError {
	#[error("{0}")]
	Validation(String),
	#[error("Storage error: {0}")]
	Storage(#[from] StorageError),
}

/// Owner of the community and vendor lists, newest entry first.
pub struct Directory {
	communities: Vec<Community>,
	vendors: Vec<Vendor>,
	storage: Arc<StorageService>,
}

impl Directory {
	pub async fn load(
		storage: Arc<StorageService>,
		seed_demo_data: bool,
	) -> Result<Self, DirectoryError> {
		let communities: Vec<Community> = storage
			.load(StorageKey::Communities, || {
				if seed_demo_data {
					seed::demo_communities()
				} else {
					Vec::new()
				}
			})
			.await?;
		let vendors: Vec<Vendor> = storage
			.load(StorageKey::Vendors, || {
				if seed_demo_data {
					seed::demo_vendors()
				} else {
					Vec::new()
				}
			})
			.await?;

		Ok(Self {
			communities,
			vendors,
			storage,
		})
	}

	/// Adds a community with no vendors yet.
	pub async fn add_community(
		&mut self,
		name: &str,
		location: &str,
	) -> Result<Community, DirectoryError> {
		let community = Community {
			name: required("name", name)?,
			location: required("location", location)?,
			vendor_count: 0,
		};

		let mut updated = Vec::with_capacity(self.communities.len() + 1);
		updated.push(community.clone());
		updated.extend(self.communities.iter().cloned());

		self.storage.save(StorageKey::Communities, &updated).await?;
		self.communities = updated;
		Ok(community)
	}

	/// Adds an active vendor.
	pub async fn add_vendor(&mut self, name: &str, owner: &str) -> Result<Vendor, DirectoryError> {
		let vendor = Vendor {
			name: required("name", name)?,
			owner: required("owner", owner)?,
			status: VendorStatus::Active,
		};

		let mut updated = Vec::with_capacity(self.vendors.len() + 1);
		updated.push(vendor.clone());
		updated.extend(self.vendors.iter().cloned());

		self.storage.save(StorageKey::Vendors, &updated).await?;
		self.vendors = updated;
		Ok(vendor)
	}

	pub fn communities(&self) -> &[Community] {
		&self.communities
	}

	pub fn vendors(&self) -> &[Vendor] {
		&self.vendors
	}
}

fn required(field: &str, value: &str) -> Result<String, DirectoryError> {
	let value = value.trim();
	if value.is_empty() {
		return Err(DirectoryError::Validation(format!(
			"Field '{}' is required",
			field
		)));
	}
	Ok(value.to_string())
}
