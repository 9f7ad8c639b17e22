//! Cart operation errors.
//!
//! Every mutation is all-or-nothing: on any error the in-memory and
//! persisted carts are exactly the pre-call state, and the store stays
//! usable. No error here is fatal to the process.

use cartage_core::ProductId;
use thiserror::Error;

use crate::inventory::LookupError;
use crate::storage::StorageError;

/// Errors a cart mutation can fail with.
#[derive(Debug, Error)]
pub enum CartError {
    /// The requested quantity exceeds the remote availability observed by
    /// this mutation.
    #[error("requested quantity for product {product_id} exceeds available stock ({available})")]
    OutOfStock {
        /// The product whose stock was insufficient.
        product_id: ProductId,
        /// Availability reported by the inventory service.
        available: u32,
    },

    /// The target product has no line item in the cart.
    #[error("product {0} is not in the cart")]
    NotFound(ProductId),

    /// The remote lookup failed (network or parse error).
    #[error("inventory lookup failed: {0}")]
    Lookup(#[from] LookupError),

    /// Persisting the cart failed; the in-memory change was rolled back.
    #[error("cart persistence failed: {0}")]
    Storage(#[from] StorageError),
}

impl CartError {
    /// Whether this is an operational failure (lookup or storage) rather
    /// than a domain refusal (out of stock, not found).
    #[must_use]
    pub const fn is_operation_failure(&self) -> bool {
        matches!(self, Self::Lookup(_) | Self::Storage(_))
    }
}

/// Result type alias for cart operations.
pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        let err = CartError::NotFound(ProductId::new(9));
        assert_eq!(err.to_string(), "product 9 is not in the cart");

        let err = CartError::OutOfStock {
            product_id: ProductId::new(2),
            available: 1,
        };
        assert_eq!(
            err.to_string(),
            "requested quantity for product 2 exceeds available stock (1)"
        );
    }

    #[test]
    fn test_is_operation_failure() {
        assert!(!CartError::NotFound(ProductId::new(1)).is_operation_failure());
        assert!(
            !CartError::OutOfStock {
                product_id: ProductId::new(1),
                available: 0,
            }
            .is_operation_failure()
        );
        assert!(
            CartError::Lookup(LookupError::Parse("truncated response".to_string()))
                .is_operation_failure()
        );
    }
}
