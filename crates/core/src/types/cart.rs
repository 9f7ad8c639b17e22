//! The cart: an ordered sequence of line items, unique by product id.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::ProductId;
use super::product::Product;

/// Errors decoding a persisted cart blob.
#[derive(Debug, Error)]
pub enum CartBlobError {
    /// The blob is not valid JSON for a product array.
    #[error("malformed cart blob: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The blob contains two line items with the same product id.
    #[error("duplicate line item for product {0}")]
    DuplicateLineItem(ProductId),
}

/// The client-held cart: ordered line items, unique by product id.
///
/// Insertion order is preserved but carries no meaning. All mutation
/// helpers maintain the uniqueness invariant; validation against remote
/// stock is the caller's responsibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Number of line items (not total units).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over line items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.items.iter()
    }

    /// The line item for a product, if present.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.items.iter().find(|p| p.id == id)
    }

    /// Whether the cart holds a line item for this product.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// The in-cart quantity for a product, or `None` if absent.
    #[must_use]
    pub fn amount_of(&self, id: ProductId) -> Option<u32> {
        self.get(id).map(|p| p.amount)
    }

    /// Append a new line item.
    ///
    /// Returns `false` (and leaves the cart untouched) if a line item with
    /// the same id already exists.
    pub fn insert(&mut self, item: Product) -> bool {
        if self.contains(item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Increment an existing line item's quantity by one.
    ///
    /// Returns `false` if the product has no line item.
    pub fn increment(&mut self, id: ProductId) -> bool {
        match self.items.iter_mut().find(|p| p.id == id) {
            Some(item) => {
                item.amount += 1;
                true
            }
            None => false,
        }
    }

    /// Set an existing line item's quantity exactly.
    ///
    /// Returns `false` if the product has no line item; nothing is inserted.
    pub fn set_amount(&mut self, id: ProductId, amount: u32) -> bool {
        match self.items.iter_mut().find(|p| p.id == id) {
            Some(item) => {
                item.amount = amount;
                true
            }
            None => false,
        }
    }

    /// Remove a line item, returning it if it was present.
    pub fn remove(&mut self, id: ProductId) -> Option<Product> {
        let index = self.items.iter().position(|p| p.id == id)?;
        Some(self.items.remove(index))
    }

    /// Serialize to the persisted blob format: a single JSON array of
    /// products, `amount` included.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn to_blob(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.items)
    }

    /// Decode a persisted blob.
    ///
    /// # Errors
    ///
    /// Returns [`CartBlobError`] when the blob is not a valid product array
    /// or violates the unique-id invariant. Callers that tolerate corrupt
    /// state should map the error to an empty cart.
    pub fn from_blob(blob: &str) -> Result<Self, CartBlobError> {
        let items: Vec<Product> = serde_json::from_str(blob)?;
        for (i, item) in items.iter().enumerate() {
            if items.iter().take(i).any(|other| other.id == item.id) {
                return Err(CartBlobError::DuplicateLineItem(item.id));
            }
        }
        Ok(Self { items })
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_item(id: i64, amount: u32) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price_cents: 1_000 * id,
            image_url: format!("https://cdn.example.com/{id}.jpg"),
            amount,
        }
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let mut cart = Cart::new();
        assert!(cart.insert(line_item(1, 1)));
        assert!(!cart.insert(line_item(1, 5)));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.amount_of(ProductId::new(1)), Some(1));
    }

    #[test]
    fn test_increment_and_set_amount_only_touch_existing() {
        let mut cart = Cart::new();
        cart.insert(line_item(1, 1));

        assert!(cart.increment(ProductId::new(1)));
        assert_eq!(cart.amount_of(ProductId::new(1)), Some(2));

        assert!(!cart.increment(ProductId::new(9)));
        assert!(!cart.set_amount(ProductId::new(9), 4));
        assert_eq!(cart.len(), 1);

        assert!(cart.set_amount(ProductId::new(1), 4));
        assert_eq!(cart.amount_of(ProductId::new(1)), Some(4));
    }

    #[test]
    fn test_remove_deletes_exactly_one_entry() {
        let mut cart = Cart::new();
        cart.insert(line_item(1, 1));
        cart.insert(line_item(2, 2));
        cart.insert(line_item(3, 3));

        let removed = cart.remove(ProductId::new(2)).expect("present");
        assert_eq!(removed.id, ProductId::new(2));
        assert_eq!(cart.len(), 2);
        assert!(cart.contains(ProductId::new(1)));
        assert!(cart.contains(ProductId::new(3)));

        assert!(cart.remove(ProductId::new(2)).is_none());
    }

    #[test]
    fn test_blob_roundtrip() {
        let mut cart = Cart::new();
        cart.insert(line_item(1, 2));
        cart.insert(line_item(7, 1));

        let blob = cart.to_blob().expect("serialize");
        let back = Cart::from_blob(&blob).expect("deserialize");
        assert_eq!(back, cart);
    }

    #[test]
    fn test_blob_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.insert(line_item(7, 1));
        cart.insert(line_item(1, 2));

        let blob = cart.to_blob().expect("serialize");
        let back = Cart::from_blob(&blob).expect("deserialize");
        let ids: Vec<i64> = back.iter().map(|p| p.id.as_i64()).collect();
        assert_eq!(ids, vec![7, 1]);
    }

    #[test]
    fn test_from_blob_rejects_duplicates() {
        let blob = serde_json::to_string(&vec![line_item(1, 1), line_item(1, 2)])
            .expect("serialize");
        let err = Cart::from_blob(&blob).expect_err("duplicate ids");
        assert!(matches!(err, CartBlobError::DuplicateLineItem(id) if id == ProductId::new(1)));
    }

    #[test]
    fn test_from_blob_rejects_garbage() {
        assert!(matches!(
            Cart::from_blob("not json"),
            Err(CartBlobError::Malformed(_))
        ));
    }
}
