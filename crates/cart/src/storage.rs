//! Durable cart persistence.
//!
//! The cart is stored as one serialized blob under one fixed key. Loading
//! is tolerant: a missing or corrupt blob yields an empty cart rather than
//! a startup failure. Saving must complete before the mutation that
//! triggered it is considered done.

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use cartage_core::Cart;
use thiserror::Error;
use tracing::warn;

/// Errors persisting the cart.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Writing the blob failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the cart failed.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable blob store for the cart.
#[async_trait]
pub trait CartStorage: Send + Sync {
    /// Load the persisted cart.
    ///
    /// Infallible by contract: missing or corrupt data yields an empty
    /// cart (logged, never propagated), so initialization cannot fail on
    /// bad state left by an earlier session.
    async fn load(&self) -> Cart;

    /// Persist the cart. Awaited before the triggering mutation is
    /// applied in memory; a failure aborts the mutation entirely.
    async fn save(&self, cart: &Cart) -> Result<(), StorageError>;
}

#[async_trait]
impl<T> CartStorage for std::sync::Arc<T>
where
    T: CartStorage + ?Sized,
{
    async fn load(&self) -> Cart {
        (**self).load().await
    }

    async fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        (**self).save(cart).await
    }
}

/// Cart persistence in a single JSON file.
///
/// The file path is the fixed storage key. Writes go through a temp file
/// in the same directory followed by a rename, so a crash mid-write leaves
/// the previous blob intact.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create a store persisting to the given path.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl CartStorage for JsonFileStorage {
    async fn load(&self) -> Cart {
        let blob = match tokio::fs::read_to_string(&self.path).await {
            Ok(blob) => blob,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Cart::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read cart blob, starting empty");
                return Cart::new();
            }
        };

        match Cart::from_blob(&blob) {
            Ok(cart) => cart,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "corrupt cart blob, starting empty");
                Cart::new()
            }
        }
    }

    async fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        let blob = cart.to_blob()?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &blob).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

/// In-memory blob store for tests and ephemeral carts.
///
/// Holds the serialized blob behind a mutex, exactly as a file store holds
/// bytes on disk, so persistence tests exercise the same encode/decode
/// path as production.
#[derive(Default)]
pub struct MemoryStorage {
    blob: Mutex<Option<String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with an arbitrary blob, corrupt or not.
    #[must_use]
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
        }
    }

    /// The currently persisted blob, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn blob(&self) -> Option<String> {
        self.blob.lock().expect("storage mutex poisoned").clone()
    }
}

#[async_trait]
impl CartStorage for MemoryStorage {
    async fn load(&self) -> Cart {
        let guard = self.blob.lock().expect("storage mutex poisoned");
        let Some(blob) = guard.as_ref() else {
            return Cart::new();
        };

        match Cart::from_blob(blob) {
            Ok(cart) => cart,
            Err(e) => {
                warn!(error = %e, "corrupt cart blob, starting empty");
                Cart::new()
            }
        }
    }

    async fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        let blob = cart.to_blob()?;
        *self.blob.lock().expect("storage mutex poisoned") = Some(blob);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use cartage_core::{Product, ProductId};

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.insert(Product {
            id: ProductId::new(1),
            title: "Sneaker".to_string(),
            price_cents: 9_990,
            image_url: "https://cdn.example.com/sneaker.jpg".to_string(),
            amount: 2,
        });
        cart
    }

    #[tokio::test]
    async fn test_file_storage_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("cart.json"));

        let cart = sample_cart();
        storage.save(&cart).await.unwrap();
        assert_eq!(storage.load().await, cart);
    }

    #[tokio::test]
    async fn test_file_storage_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("nope.json"));
        assert!(storage.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_file_storage_corrupt_blob_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        tokio::fs::write(&path, "{{ nonsense").await.unwrap();

        let storage = JsonFileStorage::new(path);
        assert!(storage.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_file_storage_overwrite_replaces_blob() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("cart.json"));

        storage.save(&sample_cart()).await.unwrap();
        storage.save(&Cart::new()).await.unwrap();
        assert!(storage.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_memory_storage_corrupt_blob_is_empty() {
        let storage = MemoryStorage::with_blob("not json at all");
        assert!(storage.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        let cart = sample_cart();
        storage.save(&cart).await.unwrap();
        assert_eq!(storage.load().await, cart);
        assert!(storage.blob().is_some());
    }
}
