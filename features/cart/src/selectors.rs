//! Read-side projections of [`CartState`].
//!
//! Unknown cart ids read as an idle, empty cart.

use crate::types::{Cart, CartState};
use storefront_core::state_utils::selectors;

/// The loaded cart, if any
#[must_use]
pub fn get_cart<'a>(state: &'a CartState, cart_id: &str) -> Option<&'a Cart> {
    selectors::get_value(&state.carts, cart_id)
}

/// A load of the cart is running
#[must_use]
pub fn is_cart_loading(state: &CartState, cart_id: &str) -> bool {
    selectors::get_loading(&state.carts, cart_id)
}

/// At least one entry command on the cart is running
#[must_use]
pub fn is_cart_busy(state: &CartState, cart_id: &str) -> bool {
    selectors::has_pending_processes(&state.carts, cart_id)
}

/// Nothing is running against the cart
#[must_use]
pub fn is_cart_stable(state: &CartState, cart_id: &str) -> bool {
    selectors::is_stable(&state.carts, cart_id)
}

/// Number of lines of the loaded cart, zero when not loaded
#[must_use]
pub fn get_entry_count(state: &CartState, cart_id: &str) -> usize {
    get_cart(state, cart_id).map_or(0, |cart| cart.entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OrderEntry, MULTI_CART_DATA};
    use storefront_core::state_utils::{EntityLoaderReducer, EntityMeta, EntityPayload};

    #[test]
    fn unknown_cart_is_empty_and_stable() {
        let state = CartState::default();

        assert!(get_cart(&state, "nope").is_none());
        assert_eq!(get_entry_count(&state, "nope"), 0);
        assert!(is_cart_stable(&state, "nope"));
        assert!(!is_cart_busy(&state, "nope"));
        assert!(!is_cart_loading(&state, "nope"));
    }

    #[test]
    fn loaded_cart_reports_entries() {
        let mut state = CartState::default();
        let cart = Cart {
            code: "c1".to_string(),
            entries: vec![OrderEntry::default(), OrderEntry::default()],
            ..Cart::default()
        };
        EntityLoaderReducer::new(MULTI_CART_DATA).reduce(
            &mut state.carts,
            &EntityMeta::success(MULTI_CART_DATA, "c1"),
            EntityPayload::One(cart),
        );

        assert_eq!(get_entry_count(&state, "c1"), 2);
        assert!(is_cart_stable(&state, "c1"));
    }
}
