//! User-facing failure notifications.
//!
//! The cart store reports failures to the user through this side-channel:
//! exactly one notice per failed operation, never one on success. The
//! channel carries no cart data; consumers read the snapshot for that.

use cartage_core::ProductId;

/// The four user-facing notice kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Requested quantity exceeds available stock.
    OutOfStock,
    /// Adding a product failed.
    AddFailed(ProductId),
    /// Removing a product failed.
    RemoveFailed(ProductId),
    /// Changing a product's quantity failed.
    UpdateFailed(ProductId),
}

impl Notice {
    /// The message shown to the user.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::OutOfStock => "Requested quantity is out of stock",
            Self::AddFailed(_) => "Could not add the product",
            Self::RemoveFailed(_) => "Could not remove the product",
            Self::UpdateFailed(_) => "Could not change the product quantity",
        }
    }
}

/// Side-channel for user-facing failure messages.
///
/// Synchronous by design: notifying must not suspend a mutation that is
/// already failing, and implementations that need delivery machinery
/// should enqueue internally.
pub trait Notifier: Send + Sync {
    /// Deliver one notice to the user.
    fn notify(&self, notice: Notice);
}

impl<T> Notifier for std::sync::Arc<T>
where
    T: Notifier + ?Sized,
{
    fn notify(&self, notice: Notice) {
        (**self).notify(notice);
    }
}

/// Notifier that surfaces notices through the tracing pipeline.
///
/// Suits headless deployments where "the user" is an operator reading
/// logs; interactive front ends provide their own implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        tracing::warn!(?notice, "{}", notice.message());
    }
}
