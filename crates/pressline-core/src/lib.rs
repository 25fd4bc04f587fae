//! Core of the Pressline laundry marketplace.
//!
//! Orders move through a fixed lifecycle, from pickup to payment, and each
//! step may only be taken by one role. This crate holds the stores that own
//! the marketplace's collections, the transition table they enforce, the
//! dashboard projections computed from them, and the engine and builder that
//! wire everything to a storage backend.

pub mod builder;
pub mod directory;
pub mod engine;
pub mod orders;
pub mod pricing;
pub mod seed;
pub mod state;
pub mod users;
pub mod views;

pub use builder::{BuilderError, MarketplaceBuilder, MarketplaceFactories};
pub use directory::{Directory, DirectoryError};
pub use engine::{event_bus::EventBus, EngineError, MarketplaceEngine};
pub use orders::{OrderStore, OrderStoreError};
pub use users::{AuthError, UserStore};
