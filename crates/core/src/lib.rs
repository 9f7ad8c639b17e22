//! Cartage Core - Shared types library.
//!
//! This crate provides the domain types used across all Cartage components:
//! - `cart` - The cart store library and its adapters
//! - `cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no file
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - `ProductId`, `Product`, `StockInfo`, and the `Cart` itself

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
