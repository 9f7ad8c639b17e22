//! Cart commands: open the store, mutate it, render the result.

use cartage::{CartConfig, CartStore, HttpInventory, JsonFileStorage, TracingNotifier};
use cartage_core::ProductId;
use thiserror::Error;

/// Errors setting up the cart store.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration loading failed.
    #[error("configuration error: {0}")]
    Config(#[from] cartage::ConfigError),

    /// Building the inventory client failed.
    #[error("inventory client error: {0}")]
    Inventory(#[from] cartage::LookupError),
}

/// Open a cart store from environment configuration.
pub async fn open_store() -> Result<CartStore, CliError> {
    let config = CartConfig::from_env()?;
    tracing::debug!(?config, "loaded configuration");

    let inventory = HttpInventory::new(&config)?;
    let storage = JsonFileStorage::new(config.storage_path.clone());

    Ok(CartStore::open(inventory, storage, TracingNotifier).await)
}

/// Render the current cart.
pub fn show(store: &CartStore) {
    let snapshot = store.snapshot();
    if snapshot.is_empty() {
        tracing::info!("Cart is empty");
        return;
    }

    let mut total_cents: i64 = 0;
    tracing::info!("Cart ({} line items):", snapshot.len());
    for item in snapshot.iter() {
        let line_cents = item.price_cents * i64::from(item.amount);
        total_cents += line_cents;
        tracing::info!(
            "  {} x{} - {} ({})",
            item.title,
            item.amount,
            format_cents(line_cents),
            item.id,
        );
    }
    tracing::info!("Total: {}", format_cents(total_cents));
}

/// Add one unit of a product, then render the cart.
pub async fn add(store: &CartStore, id: i64) -> Result<(), cartage::CartError> {
    store.add_product(ProductId::new(id)).await?;
    show(store);
    Ok(())
}

/// Remove a product's line item, then render the cart.
pub async fn remove(store: &CartStore, id: i64) -> Result<(), cartage::CartError> {
    store.remove_product(ProductId::new(id)).await?;
    show(store);
    Ok(())
}

/// Set a product's quantity, then render the cart.
pub async fn set(store: &CartStore, id: i64, amount: i64) -> Result<(), cartage::CartError> {
    store.update_product_amount(ProductId::new(id), amount).await?;
    show(store);
    Ok(())
}

/// Format integer cents as a dollar string.
fn format_cents(cents: i64) -> String {
    format!("${}.{:02}", cents / 100, (cents % 100).abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(0), "$0.00");
        assert_eq!(format_cents(5), "$0.05");
        assert_eq!(format_cents(9_990), "$99.90");
        assert_eq!(format_cents(17_999), "$179.99");
    }
}
