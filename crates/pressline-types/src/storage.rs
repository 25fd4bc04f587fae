//! Storage-related types for the marketplace.

use std::str::FromStr;

/// Storage keys for the persisted collections.
///
/// Each key holds one whole collection, serialized as a single blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
	/// Registered users
	Users,
	/// Orders, newest first
	Orders,
	/// Communities managed by the super-admin
	Communities,
	/// Vendors managed by the super-admin
	Vendors,
}

impl StorageKey {
	/// Returns the string representation of the storage key.
	pub fn as_str(&self) -> &'static str {
		match self {
			StorageKey::Users => "users",
			StorageKey::Orders => "orders",
			StorageKey::Communities => "communities",
			StorageKey::Vendors => "vendors",
		}
	}

	/// Returns an iterator over all StorageKey variants.
	pub fn all() -> impl Iterator<Item = Self> {
		[Self::Users, Self::Orders, Self::Communities, Self::Vendors].into_iter()
	}
}

impl FromStr for StorageKey {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"users" => Ok(Self::Users),
			"orders" => Ok(Self::Orders),
			"communities" => Ok(Self::Communities),
			"vendors" => Ok(Self::Vendors),
			_ => Err(()),
		}
	}
}

impl From<StorageKey> for &'static str {
	fn from(key: StorageKey) -> Self {
		key.as_str()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_keys_parse_back() {
		for key in StorageKey::all() {
			assert_eq!(key.as_str().parse::<StorageKey>(), Ok(key));
		}
		assert!("quotes".parse::<StorageKey>().is_err());
	}
}
