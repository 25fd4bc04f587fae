//! Users, roles and sessions.

use crate::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a marketplace user.
///
/// The role selects the dashboard a user sees and the order transitions
/// they are allowed to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
	Customer,
	Vendor,
	SuperAdmin,
	DeliveryStaff,
}

impl Role {
	/// Every role.
	pub const ALL: [Role; 4] = [
		Role::Customer,
		Role::Vendor,
		Role::SuperAdmin,
		Role::DeliveryStaff,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			Role::Customer => "customer",
			Role::Vendor => "vendor",
			Role::SuperAdmin => "super-admin",
			Role::DeliveryStaff => "delivery-staff",
		}
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Residential address of a user inside a community.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
	pub tower: String,
	pub flat: String,
}

/// A registered user as persisted by the user store.
///
/// The password is written to storage as-is but is redacted from `Debug`
/// output and never leaves the store; callers only ever see a [`Session`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	pub name: String,
	/// Unique key of the user.
	pub email: String,
	#[serde(with = "crate::secret_string::exposed")]
	pub password: SecretString,
	pub role: Role,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub address: Option<Address>,
}

impl User {
	/// Returns the password-free view of this user.
	pub fn session(&self) -> Session {
		Session {
			name: self.name.clone(),
			email: self.email.clone(),
			role: self.role,
		}
	}
}

/// A logged-in user, as returned by login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
	pub name: String,
	pub email: String,
	pub role: Role,
}
