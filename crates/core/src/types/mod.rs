//! Core types for Cartage.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod product;
pub mod stock;

pub use cart::{Cart, CartBlobError};
pub use id::*;
pub use product::{Product, ProductMetadata};
pub use stock::StockInfo;
