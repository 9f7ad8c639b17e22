//! Remote inventory lookup: stock and catalog metadata by product id.
//!
//! The inventory service is query-only from the cart's point of view. Two
//! endpoints are consumed: `stock/{id}` returning a point-in-time available
//! quantity, and `products/{id}` returning catalog metadata for products
//! that are not yet line items.

use async_trait::async_trait;
use cartage_core::{ProductId, ProductMetadata, StockInfo};
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::debug;

use crate::config::CartConfig;

/// Errors that can occur querying the inventory service.
#[derive(Debug, Error)]
pub enum LookupError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Product unknown to the catalog.
    #[error("product not found in catalog: {0}")]
    NotFound(ProductId),

    /// Failed to parse a response body.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Query interface to the remote inventory service.
///
/// Implementations own their transport and timeouts; the cart store treats
/// any failure uniformly as an operation failure and leaves the cart
/// untouched.
#[async_trait]
pub trait InventoryLookup: Send + Sync {
    /// Available quantity for a product right now. Absent products read as
    /// zero stock.
    async fn stock_of(&self, id: ProductId) -> Result<u32, LookupError>;

    /// Catalog metadata for a product that is about to become a line item.
    async fn product_metadata(&self, id: ProductId) -> Result<ProductMetadata, LookupError>;
}

#[async_trait]
impl<T> InventoryLookup for std::sync::Arc<T>
where
    T: InventoryLookup + ?Sized,
{
    async fn stock_of(&self, id: ProductId) -> Result<u32, LookupError> {
        (**self).stock_of(id).await
    }

    async fn product_metadata(&self, id: ProductId) -> Result<ProductMetadata, LookupError> {
        (**self).product_metadata(id).await
    }
}

/// HTTP client for the inventory service.
#[derive(Clone)]
pub struct HttpInventory {
    client: reqwest::Client,
    base_url: String,
}

impl HttpInventory {
    /// Create a new inventory client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build or the configured
    /// API token is not a valid header value.
    pub fn new(config: &CartConfig) -> Result<Self, LookupError> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));

        if let Some(token) = &config.api_token {
            let auth_value = format!("Bearer {}", token.expose_secret());
            headers.insert(
                "Authorization",
                HeaderValue::from_str(&auth_value)
                    .map_err(|e| LookupError::Parse(format!("invalid API token format: {e}")))?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// GET a path and return the raw body, mapping non-success statuses.
    ///
    /// A 404 is surfaced as `Ok(None)` so callers can apply their own
    /// absent-resource policy.
    async fn get_body(&self, path: &str) -> Result<Option<String>, LookupError> {
        let url = format!("{}/{path}", self.base_url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LookupError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(Some(response.text().await?))
    }
}

#[async_trait]
impl InventoryLookup for HttpInventory {
    async fn stock_of(&self, id: ProductId) -> Result<u32, LookupError> {
        let Some(body) = self.get_body(&format!("stock/{id}")).await? else {
            debug!(product_id = %id, "stock endpoint returned 404, treating as no stock");
            return Ok(0);
        };

        // The service may answer a known id with an empty or null body;
        // that also reads as no stock.
        if body.trim().is_empty() {
            return Ok(0);
        }
        let info: Option<StockInfo> = serde_json::from_str(&body)
            .map_err(|e| LookupError::Parse(format!("stock/{id}: {e}")))?;

        let amount = info.map_or(0, |s| s.amount);
        debug!(product_id = %id, amount, "fetched stock");
        Ok(amount)
    }

    async fn product_metadata(&self, id: ProductId) -> Result<ProductMetadata, LookupError> {
        let Some(body) = self.get_body(&format!("products/{id}")).await? else {
            return Err(LookupError::NotFound(id));
        };

        serde_json::from_str(&body).map_err(|e| LookupError::Parse(format!("products/{id}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_display() {
        let err = LookupError::Api {
            status: 503,
            message: "maintenance".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 503 - maintenance");

        let err = LookupError::NotFound(ProductId::new(4));
        assert_eq!(err.to_string(), "product not found in catalog: 4");
    }

    #[test]
    fn test_stock_wire_format_tolerates_null() {
        // Mirrors the parse in stock_of: a null body means no stock.
        let info: Option<StockInfo> = serde_json::from_str("null").expect("parse");
        assert_eq!(info.map_or(0, |s| s.amount), 0);

        let info: Option<StockInfo> =
            serde_json::from_str(r#"{"id": 1, "amount": 5}"#).expect("parse");
        assert_eq!(info.map_or(0, |s| s.amount), 5);
    }
}
