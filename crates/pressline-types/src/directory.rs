//! Community and vendor directory entries.
//!
//! These are reference lists maintained by the super-admin. There is no
//! relational link between them: adding a vendor does not touch any
//! community's vendor count.

use serde::{Deserialize, Serialize};

/// A residential community served by the marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Community {
	pub name: String,
	pub location: String,
	/// Number of vendors serving the community.
	#[serde(rename = "vendors")]
	pub vendor_count: u32,
}

/// An ironing vendor registered with the marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
	pub name: String,
	pub owner: String,
	pub status: VendorStatus,
}

/// Whether a vendor is currently taking work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VendorStatus {
	#[default]
	Active,
	Inactive,
}
