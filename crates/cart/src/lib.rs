//! Cartage - client-held shopping cart with remote stock validation.
//!
//! # Architecture
//!
//! - [`CartStore`] owns the authoritative in-memory cart and serializes all
//!   mutations through it
//! - Remote inventory is the authority on availability; every add/update is
//!   validated against a fresh stock read
//! - The cart is persisted as a single JSON blob after every successful
//!   mutation, so a restart always resumes from the last committed state
//! - Consumers observe immutable snapshots through a watch channel; they
//!   never see a half-applied mutation
//!
//! # Collaborators
//!
//! The store is constructed from three injected ports, so deployments (and
//! tests) choose their own transports:
//!
//! - [`InventoryLookup`] - stock and catalog metadata by product id
//! - [`CartStorage`] - durable blob persistence under one fixed key
//! - [`Notifier`] - user-facing failure messages, one per failed operation
//!
//! # Example
//!
//! ```rust,ignore
//! use cartage::{CartConfig, CartStore, HttpInventory, JsonFileStorage, TracingNotifier};
//!
//! let config = CartConfig::from_env()?;
//! let store = CartStore::open(
//!     HttpInventory::new(&config)?,
//!     JsonFileStorage::new(config.storage_path.clone()),
//!     TracingNotifier,
//! )
//! .await;
//!
//! store.add_product(ProductId::new(5)).await?;
//! let snapshot = store.snapshot();
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod inventory;
pub mod notify;
pub mod storage;
pub mod store;

pub use config::{CartConfig, ConfigError};
pub use error::CartError;
pub use inventory::{HttpInventory, InventoryLookup, LookupError};
pub use notify::{Notice, Notifier, TracingNotifier};
pub use storage::{CartStorage, JsonFileStorage, MemoryStorage, StorageError};
pub use store::CartStore;
