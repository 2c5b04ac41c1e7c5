//! # Storefront Cart
//!
//! Multi-cart state for the storefront.
//!
//! Every cart the session touches lives in one entity state keyed by cart
//! code. Loading a cart drives its loader; commands against cart lines (add,
//! remove, update) drive its process counter instead, so a cart stays busy
//! until the last of several overlapping commands finishes. Once it is stable
//! again the cart is reloaded.
//!
//! Commands issued for the anonymous user are dropped before they reach a
//! connector.
//!
//! ## Example
//!
//! ```ignore
//! let store = Store::new(CartState::default(), CartReducer::new(), environment);
//!
//! let done = store
//!     .send_and_wait_for(add_entry, CartAction::is_entry_terminal, timeout)
//!     .await?;
//! let lines = store.state(|s| get_entry_count(s, "00001")).await;
//! ```

pub mod connector;
pub mod reducer;
pub mod selectors;
pub mod types;

pub use connector::{CartConnector, CartEntryConnector};
pub use reducer::{CartEnvironment, CartReducer};
pub use selectors::{get_cart, get_entry_count, is_cart_busy, is_cart_loading, is_cart_stable};
pub use types::{Cart, CartAction, CartModification, CartState, OrderEntry, Price, MULTI_CART_DATA};
