//! The cart store: serialized, validated, durably persisted mutations.
//!
//! # Mutation protocol
//!
//! Every mutation is a two-phase apply:
//!
//! 1. **Validate** - read-only, may suspend on the remote stock lookup.
//! 2. **Commit** - build the next cart, persist it, then swap it in and
//!    publish a fresh snapshot.
//!
//! Persistence happens before the in-memory swap, so a storage failure
//! leaves both the in-memory and persisted carts exactly as they were; no
//! observer ever sees a partially-validated state.
//!
//! # Serialization
//!
//! A mutex is held from validate through commit, so mutations on one store
//! run strictly one at a time. A stock value read for one mutation can
//! never race a concurrent increment of the same product.

use std::sync::Arc;

use cartage_core::{Cart, ProductId};
use tokio::sync::{Mutex, watch};
use tracing::{info, instrument};

use crate::error::{CartError, Result};
use crate::inventory::InventoryLookup;
use crate::notify::{Notice, Notifier};
use crate::storage::CartStorage;

/// The client-held cart store.
///
/// Holds the authoritative in-memory cart, validates every mutation
/// against the remote inventory, and persists after every successful
/// mutation. Cheaply cloneable via `Arc`; clones share one cart.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    inventory: Box<dyn InventoryLookup>,
    storage: Box<dyn CartStorage>,
    notifier: Box<dyn Notifier>,
    /// Authoritative cart. The lock spans validate and commit.
    cart: Mutex<Cart>,
    /// Published snapshot, replaced on every successful mutation.
    snapshot: watch::Sender<Arc<Cart>>,
}

impl CartStore {
    /// Open a store from its collaborators, resuming the persisted cart.
    ///
    /// Missing or corrupt persisted state yields an empty cart; opening
    /// never fails on bad state left by an earlier session.
    pub async fn open<I, S, N>(inventory: I, storage: S, notifier: N) -> Self
    where
        I: InventoryLookup + 'static,
        S: CartStorage + 'static,
        N: Notifier + 'static,
    {
        let cart = storage.load().await;
        info!(line_items = cart.len(), "cart store opened");

        let (snapshot, _) = watch::channel(Arc::new(cart.clone()));
        Self {
            inner: Arc::new(CartStoreInner {
                inventory: Box::new(inventory),
                storage: Box::new(storage),
                notifier: Box::new(notifier),
                cart: Mutex::new(cart),
                snapshot,
            }),
        }
    }

    /// The current published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Cart> {
        self.inner.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot updates.
    ///
    /// The receiver observes only fully committed carts, one value per
    /// successful mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<Cart>> {
        self.inner.snapshot.subscribe()
    }

    /// Add one unit of a product to the cart.
    ///
    /// A product already in the cart has its quantity incremented; a new
    /// product is fetched from the catalog and inserted with quantity 1.
    /// Either path fails with [`CartError::OutOfStock`] when the remote
    /// availability does not cover the resulting quantity.
    ///
    /// # Errors
    ///
    /// [`CartError::OutOfStock`] on insufficient availability, or a lookup
    /// or storage failure. The cart is unchanged on any error.
    #[instrument(skip(self))]
    pub async fn add_product(&self, id: ProductId) -> Result<()> {
        let mut cart = self.inner.cart.lock().await;
        let result = self.try_add(&mut cart, id).await;
        if let Err(e) = &result {
            self.notify_failure(e, Notice::AddFailed(id));
        }
        result
    }

    /// Remove a product's line item from the cart.
    ///
    /// Performs no remote validation; removal is always safe.
    ///
    /// # Errors
    ///
    /// [`CartError::NotFound`] when the product has no line item, or a
    /// storage failure. The cart is unchanged on any error.
    #[instrument(skip(self))]
    pub async fn remove_product(&self, id: ProductId) -> Result<()> {
        let mut cart = self.inner.cart.lock().await;
        let result = self.try_remove(&mut cart, id).await;
        if let Err(e) = &result {
            self.notify_failure(e, Notice::RemoveFailed(id));
        }
        result
    }

    /// Set a product's in-cart quantity exactly.
    ///
    /// Two silent no-ops by contract: a non-positive `amount` (guards
    /// decrement-below-one UI actions) and a product with no line item
    /// (this operation maps over existing items, it never inserts).
    ///
    /// # Errors
    ///
    /// [`CartError::OutOfStock`] when `amount` exceeds the remote
    /// availability, or a lookup or storage failure. The cart is unchanged
    /// on any error.
    #[instrument(skip(self))]
    pub async fn update_product_amount(&self, id: ProductId, amount: i64) -> Result<()> {
        if amount <= 0 {
            return Ok(());
        }

        let mut cart = self.inner.cart.lock().await;
        let result = self.try_update(&mut cart, id, amount).await;
        if let Err(e) = &result {
            self.notify_failure(e, Notice::UpdateFailed(id));
        }
        result
    }

    async fn try_add(&self, cart: &mut Cart, id: ProductId) -> Result<()> {
        let stock = self.inner.inventory.stock_of(id).await?;

        let next = match cart.amount_of(id) {
            Some(current) => {
                if current >= stock {
                    return Err(CartError::OutOfStock {
                        product_id: id,
                        available: stock,
                    });
                }
                let mut next = cart.clone();
                next.increment(id);
                next
            }
            None => {
                // Same policy as the increment path: a product with zero
                // availability cannot enter the cart either.
                if stock == 0 {
                    return Err(CartError::OutOfStock {
                        product_id: id,
                        available: 0,
                    });
                }
                let metadata = self.inner.inventory.product_metadata(id).await?;
                let mut next = cart.clone();
                next.insert(metadata.into_line_item(id, 1));
                next
            }
        };

        self.commit(cart, next).await
    }

    async fn try_remove(&self, cart: &mut Cart, id: ProductId) -> Result<()> {
        if !cart.contains(id) {
            return Err(CartError::NotFound(id));
        }

        let mut next = cart.clone();
        next.remove(id);
        self.commit(cart, next).await
    }

    async fn try_update(&self, cart: &mut Cart, id: ProductId, amount: i64) -> Result<()> {
        let stock = self.inner.inventory.stock_of(id).await?;

        // Requests beyond u32 range can never be covered by stock.
        let requested = u32::try_from(amount).unwrap_or(u32::MAX);
        if requested > stock {
            return Err(CartError::OutOfStock {
                product_id: id,
                available: stock,
            });
        }

        // Mapping over existing line items only; nothing is inserted.
        if !cart.contains(id) {
            return Ok(());
        }

        let mut next = cart.clone();
        next.set_amount(id, requested);
        self.commit(cart, next).await
    }

    /// Persist the candidate cart, then swap it in and publish it.
    async fn commit(&self, cart: &mut Cart, next: Cart) -> Result<()> {
        self.inner.storage.save(&next).await?;
        *cart = next.clone();
        self.inner.snapshot.send_replace(Arc::new(next));
        info!(line_items = cart.len(), "cart committed");
        Ok(())
    }

    /// Fire exactly one notice for a failed operation.
    fn notify_failure(&self, err: &CartError, fallback: Notice) {
        let notice = match err {
            CartError::OutOfStock { .. } => Notice::OutOfStock,
            _ => fallback,
        };
        self.inner.notifier.notify(notice);
    }
}
