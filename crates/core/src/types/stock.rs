//! Remote stock availability.

use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Point-in-time available quantity for a product, as reported by the
/// remote inventory service.
///
/// This value is authoritative only at the moment the lookup returns; it is
/// never cached beyond the single validation it was fetched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockInfo {
    /// The product this availability refers to.
    #[serde(rename = "id")]
    pub product_id: ProductId,
    /// Units currently available. Zero means out of stock.
    pub amount: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_info_wire_format() {
        // The inventory service sends the product id under "id".
        let info: StockInfo = serde_json::from_str(r#"{"id": 3, "amount": 2}"#).expect("parse");
        assert_eq!(info.product_id, ProductId::new(3));
        assert_eq!(info.amount, 2);
    }
}
