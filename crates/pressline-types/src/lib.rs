//! Common types module for the Pressline marketplace.
//!
//! This module defines the domain types shared by every Pressline crate:
//! orders and their lifecycle statuses, users and roles, the admin-managed
//! directory entries, storage keys, and the HTTP API request and error types.

/// API types for HTTP endpoints and request/response structures.
pub mod api;
/// Community and vendor directory entries managed by the super-admin.
pub mod directory;
/// Event types published after each committed mutation.
pub mod events;
/// Order types including the lifecycle status and delivery options.
pub mod order;
/// Secret wrapper used for passwords.
pub mod secret_string;
/// Storage keys for the persisted collections.
pub mod storage;
/// Users, roles and sessions.
pub mod user;
/// Configuration validation types for ensuring type-safe configurations.
pub mod validation;

// Re-export all types for convenient access
pub use api::*;
pub use directory::*;
pub use events::*;
pub use order::*;
pub use secret_string::SecretString;
pub use storage::*;
pub use user::*;
pub use validation::*;
