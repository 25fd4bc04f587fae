//! User store: sign-up and role-scoped login.

use crate::seed;
use pressline_storage::{StorageError, StorageService};
use pressline_types::{
	Address, LoginRequest, Role, Session, SignupRequest, StorageKey, User,
};
use std::sync::Arc;
use thiserror::Error;

/// Shortest password accepted at sign-up, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors that can occur during sign-up and login.
#[derive(Debug, Error)]
pub enum AuthError {
	#[error("{0}")]
	Validation(String),
	#[error("User with this email already exists")]
	DuplicateEmail,
	#[error("Invalid credentials or role")]
	AuthenticationFailure,
	#[error("Storage error: {0}")]
	Storage(#[from] StorageError),
}

/// Owner of the user collection.
pub struct UserStore {
	users: Vec<User>,
	storage: Arc<StorageService>,
}

impl UserStore {
	/// Loads the persisted users, falling back to one demo account per role.
	pub async fn load(storage: Arc<StorageService>) -> Result<Self, AuthError> {
		let users: Vec<User> = storage.load(StorageKey::Users, seed::demo_users).await?;
		tracing::debug!(count = users.len(), "Loaded users");
		Ok(Self { users, storage })
	}

	/// Registers a new user.
	pub async fn signup(&mut self, request: SignupRequest) -> Result<Session, AuthError> {
		let (Some(name), Some(email), Some(password), Some(role)) = (
			present(request.name),
			present(request.email),
			request.password.filter(|p| !p.is_blank()),
			request.role,
		) else {
			return Err(AuthError::Validation("All fields are required".into()));
		};

		if password.char_count() < MIN_PASSWORD_LENGTH {
			return Err(AuthError::Validation(format!(
				"Password must be at least {} characters long",
				MIN_PASSWORD_LENGTH
			)));
		}

		let address = match (present(request.tower), present(request.flat)) {
			(Some(tower), Some(flat)) => Some(Address { tower, flat }),
			(None, None) => None,
			_ => {
				return Err(AuthError::Validation(
					"Tower and flat must be given together".into(),
				));
			},
		};

		if self.find(&email).is_some() {
			return Err(AuthError::DuplicateEmail);
		}

		let user = User {
			name,
			email,
			password,
			role,
			address,
		};
		let session = user.session();

		let mut updated = self.users.clone();
		updated.push(user);
		self.storage.save(StorageKey::Users, &updated).await?;
		self.users = updated;

		Ok(session)
	}

	/// Checks credentials for a role.
	///
	/// A wrong email, password or role all fail the same way, so a caller
	/// cannot tell which one was wrong.
	pub fn login(&self, request: LoginRequest) -> Result<Session, AuthError> {
		let (Some(email), Some(password), Some(role)) = (
			present(request.email),
			request.password.filter(|p| !p.is_blank()),
			request.role,
		) else {
			return Err(AuthError::Validation(
				"Email, password, and role are required".into(),
			));
		};

		self.users
			.iter()
			.find(|user| user.email == email && user.password == password && user.role == role)
			.map(User::session)
			.ok_or(AuthError::AuthenticationFailure)
	}

	/// Looks a user up by email.
	pub fn find(&self, email: &str) -> Option<&User> {
		self.users.iter().find(|user| user.email == email)
	}

	/// Number of users holding `role`.
	pub fn count_with_role(&self, role: Role) -> usize {
		self.users.iter().filter(|user| user.role == role).count()
	}
}

fn present(value: Option<String>) -> Option<String> {
	value
		.map(|s| s.trim().to_string())
		.filter(|s| !s.is_empty())
}
