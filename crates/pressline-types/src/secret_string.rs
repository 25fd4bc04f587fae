//! Secure string type for handling sensitive data like passwords.
//!
//! This module provides `SecretString`, a wrapper around sensitive string data
//! that ensures the data is zeroed out when dropped and is never accidentally
//! exposed in logs or debug output.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::Zeroizing;

/// A secure string type that automatically zeros memory on drop and
/// prevents accidental exposure in logs.
#[derive(Clone)]
pub struct SecretString(Zeroizing<String>);

impl SecretString {
	/// Creates a new SecretString from a regular string.
	pub fn new(s: String) -> Self {
		Self(Zeroizing::new(s))
	}

	/// Exposes the secret string as a string slice.
	///
	/// # Security Warning
	/// This method exposes the actual secret. Use it only when absolutely necessary
	/// and ensure the exposed value is not logged or stored insecurely.
	pub fn expose_secret(&self) -> &str {
		&self.0
	}

	/// Exposes the secret string to a closure for processing.
	pub fn with_exposed<F, R>(&self, f: F) -> R
	where
		F: FnOnce(&str) -> R,
	{
		f(&self.0)
	}

	/// Returns the length of the secret in characters.
	pub fn char_count(&self) -> usize {
		self.0.chars().count()
	}

	/// Returns true if the secret is empty or only whitespace.
	pub fn is_blank(&self) -> bool {
		self.0.trim().is_empty()
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "SecretString(***REDACTED***)")
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "***REDACTED***")
	}
}

impl From<String> for SecretString {
	fn from(s: String) -> Self {
		Self::new(s)
	}
}

impl From<&str> for SecretString {
	fn from(s: &str) -> Self {
		Self::new(s.to_string())
	}
}

impl PartialEq for SecretString {
	fn eq(&self, other: &Self) -> bool {
		self.0.as_str() == other.0.as_str()
	}
}

impl Eq for SecretString {}

// Serializing through the default impl always redacts. Persistence goes
// through `exposed` instead.
impl Serialize for SecretString {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str("***REDACTED***")
	}
}

impl<'de> Deserialize<'de> for SecretString {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		Ok(SecretString::new(s))
	}
}

/// Serde adapter that writes the real secret, for records that must survive
/// a round trip through storage.
///
/// Use with `#[serde(with = "pressline_types::secret_string::exposed")]`.
pub mod exposed {
	use super::SecretString;
	use serde::{Deserialize, Deserializer, Serializer};

	pub fn serialize<S>(value: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(value.expose_secret())
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
	where
		D: Deserializer<'de>,
	{
		String::deserialize(deserializer).map(SecretString::new)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_secret_string_debug() {
		let secret = SecretString::from("password123");
		let debug_str = format!("{:?}", secret);
		assert_eq!(debug_str, "SecretString(***REDACTED***)");
		assert!(!debug_str.contains("password123"));
	}

	#[test]
	fn test_secret_string_display() {
		let secret = SecretString::from("password123");
		assert_eq!(format!("{}", secret), "***REDACTED***");
	}

	#[test]
	fn test_default_serialization_redacts() {
		let secret = SecretString::from("password123");
		let json = serde_json::to_string(&secret).unwrap();
		assert_eq!(json, "\"***REDACTED***\"");
	}

	#[test]
	fn test_char_count_counts_characters() {
		assert_eq!(SecretString::from("pässwörd").char_count(), 8);
		assert!(SecretString::from("   ").is_blank());
		assert!(!SecretString::from("x").is_blank());
	}

	#[test]
	fn test_with_exposed() {
		let secret = SecretString::from("my-secret-value");
		let result = secret.with_exposed(|s| s.len());
		assert_eq!(result, 15);
	}
}
