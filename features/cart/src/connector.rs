//! Backend seams for cart effects.
//!
//! Implementations own their arguments: the returned future must not borrow
//! from the call site, so copy what it needs before boxing.

use crate::types::{Cart, CartModification};
use storefront_core::error::ConnectorFuture;

/// Loads carts
pub trait CartConnector: Send + Sync {
    /// Fetch `cart_id` as seen by `user_id`
    fn load(&self, user_id: &str, cart_id: &str) -> ConnectorFuture<Cart>;
}

/// Runs commands against cart lines
pub trait CartEntryConnector: Send + Sync {
    /// Add `quantity` of `product_code`
    fn add(
        &self,
        user_id: &str,
        cart_id: &str,
        product_code: &str,
        quantity: u32,
        pickup_store: Option<&str>,
    ) -> ConnectorFuture<CartModification>;

    /// Remove a line
    fn remove(&self, user_id: &str, cart_id: &str, entry_number: &str) -> ConnectorFuture<()>;

    /// Change quantity or pickup store of a line
    fn update(
        &self,
        user_id: &str,
        cart_id: &str,
        entry_number: &str,
        quantity: Option<u32>,
        pickup_store: Option<&str>,
    ) -> ConnectorFuture<CartModification>;
}
