//! Product types: cart line items and remote catalog metadata.
//!
//! A [`Product`] only exists as a cart line item - its `amount` field is the
//! quantity in the cart, not a catalog attribute. The remote catalog side of
//! the same record is [`ProductMetadata`], which has no quantity.

use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A cart line item: one selected product with its in-cart quantity.
///
/// Prices are integer cents; no fractional currency units are represented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price in cents.
    pub price_cents: i64,
    /// Product image URL.
    pub image_url: String,
    /// Quantity currently in the cart. Always >= 1 for a live line item.
    pub amount: u32,
}

/// Catalog metadata for a product, as returned by the remote lookup.
///
/// This is what the inventory service knows about a product before it
/// becomes a line item; combining it with a quantity yields a [`Product`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMetadata {
    /// Display title.
    pub title: String,
    /// Unit price in cents.
    pub price_cents: i64,
    /// Product image URL.
    pub image_url: String,
}

impl ProductMetadata {
    /// Turn catalog metadata into a cart line item with the given quantity.
    #[must_use]
    pub fn into_line_item(self, id: ProductId, amount: u32) -> Product {
        Product {
            id,
            title: self.title,
            price_cents: self.price_cents,
            image_url: self.image_url,
            amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_line_item() {
        let meta = ProductMetadata {
            title: "Shoe".to_string(),
            price_cents: 17_999,
            image_url: "https://cdn.example.com/shoe.jpg".to_string(),
        };

        let item = meta.into_line_item(ProductId::new(5), 1);
        assert_eq!(item.id, ProductId::new(5));
        assert_eq!(item.title, "Shoe");
        assert_eq!(item.price_cents, 17_999);
        assert_eq!(item.amount, 1);
    }

    #[test]
    fn test_product_json_roundtrip_preserves_amount() {
        let item = Product {
            id: ProductId::new(1),
            title: "Sneaker".to_string(),
            price_cents: 9_990,
            image_url: "https://cdn.example.com/sneaker.jpg".to_string(),
            amount: 3,
        };

        let json = serde_json::to_string(&item).expect("serialize");
        let back: Product = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, item);
    }
}
