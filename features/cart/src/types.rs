//! Cart models, state and actions.

use serde::{Deserialize, Serialize};
use storefront_core::action::{ActionMeta, MetaAction};
use storefront_core::error::HttpErrorModel;
use storefront_core::state_utils::{EntityMeta, EntityPayload, EntityState, ProcessesLoaderState};
use storefront_macros::Action;

/// Entity type of the multi-cart entity state
pub const MULTI_CART_DATA: &str = "multi-cart-data";

/// A monetary amount as returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    /// ISO currency code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_iso: Option<String>,
    /// Localized display value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_value: Option<String>,
    /// Numeric value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

/// One line of a cart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderEntry {
    /// Position of the entry in the cart
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_number: Option<u32>,
    /// Code of the product on this line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_code: Option<String>,
    /// Ordered quantity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    /// Unit price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_price: Option<Price>,
    /// Line total
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<Price>,
}

/// A cart as returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Cart code, the id carts are keyed by
    pub code: String,
    /// Guid of anonymous carts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    /// Cart lines
    #[serde(default)]
    pub entries: Vec<OrderEntry>,
    /// Number of distinct lines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_items: Option<u32>,
    /// Sum of all quantities
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_unit_count: Option<u32>,
    /// Cart total
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<Price>,
}

/// Outcome of an entry command as reported by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartModification {
    /// The entry as stored after the command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<OrderEntry>,
    /// Quantity actually added, which may be below the requested one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_added: Option<u32>,
    /// Backend status, e.g. `success` or `lowStock`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,
    /// Human readable status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
    /// The command changed the delivery mode of the cart
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_mode_changed: Option<bool>,
}

/// Every cart the session knows about, keyed by cart code
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartState {
    /// Loader and process counter per cart
    pub carts: EntityState<ProcessesLoaderState<Cart>>,
}

/// Cart actions
///
/// Commands carry the acting user; anonymous commands never reach a
/// connector. Terminal actions carry the generation their command started
/// under, so results of work that a reset discarded are ignored.
#[derive(Action, Debug, Clone, PartialEq, Serialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum CartAction {
    /// Fetch a cart
    #[command]
    #[action_type("[Cart] Load Cart")]
    LoadCart {
        /// Acting user
        user_id: String,
        /// Cart to load
        cart_id: String,
    },

    /// Cart fetched
    #[event]
    #[action_type("[Cart] Load Cart Success")]
    LoadCartSuccess {
        /// Acting user
        user_id: String,
        /// Loaded cart
        cart_id: String,
        /// Cart as returned by the backend
        cart: Cart,
        /// Generation the load started under
        #[serde(skip)]
        generation: Option<u64>,
    },

    /// Cart fetch failed
    #[event]
    #[action_type("[Cart] Load Cart Fail")]
    LoadCartFail {
        /// Acting user
        user_id: String,
        /// Cart that failed to load
        cart_id: String,
        /// Normalized error
        error: HttpErrorModel,
        /// Generation the load started under
        #[serde(skip)]
        generation: Option<u64>,
    },

    /// Forget a cart, including its in-flight work
    #[action_type("[Cart] Reset Cart")]
    ResetCart {
        /// Cart to forget
        cart_id: String,
    },

    /// Add a product to a cart
    #[command]
    #[action_type("[Cart-entry] Add Entry")]
    AddEntry {
        /// Acting user
        user_id: String,
        /// Target cart
        cart_id: String,
        /// Product to add
        product_code: String,
        /// Requested quantity
        quantity: u32,
        /// Store for pickup in store
        #[serde(skip_serializing_if = "Option::is_none")]
        pickup_store: Option<String>,
    },

    /// Product added
    #[event]
    #[action_type("[Cart-entry] Add Entry Success")]
    AddEntrySuccess {
        /// Acting user
        user_id: String,
        /// Target cart
        cart_id: String,
        /// Product added
        product_code: String,
        /// Requested quantity
        quantity: u32,
        /// Backend outcome
        modification: CartModification,
        /// Generation the command started under
        #[serde(skip)]
        generation: Option<u64>,
    },

    /// Adding the product failed
    #[event]
    #[action_type("[Cart-entry] Add Entry Fail")]
    AddEntryFail {
        /// Acting user
        user_id: String,
        /// Target cart
        cart_id: String,
        /// Product that was not added
        product_code: String,
        /// Requested quantity
        quantity: u32,
        /// Normalized error
        error: HttpErrorModel,
        /// Generation the command started under
        #[serde(skip)]
        generation: Option<u64>,
    },

    /// Remove a cart line
    #[command]
    #[action_type("[Cart-entry] Remove Entry")]
    RemoveEntry {
        /// Acting user
        user_id: String,
        /// Target cart
        cart_id: String,
        /// Line to remove
        entry_number: String,
    },

    /// Cart line removed
    #[event]
    #[action_type("[Cart-entry] Remove Entry Success")]
    RemoveEntrySuccess {
        /// Acting user
        user_id: String,
        /// Target cart
        cart_id: String,
        /// Removed line
        entry_number: String,
        /// Generation the command started under
        #[serde(skip)]
        generation: Option<u64>,
    },

    /// Removing the line failed
    #[event]
    #[action_type("[Cart-entry] Remove Entry Fail")]
    RemoveEntryFail {
        /// Acting user
        user_id: String,
        /// Target cart
        cart_id: String,
        /// Line that was not removed
        entry_number: String,
        /// Normalized error
        error: HttpErrorModel,
        /// Generation the command started under
        #[serde(skip)]
        generation: Option<u64>,
    },

    /// Change quantity or pickup store of a cart line
    #[command]
    #[action_type("[Cart-entry] Update Entry")]
    UpdateEntry {
        /// Acting user
        user_id: String,
        /// Target cart
        cart_id: String,
        /// Line to update
        entry_number: String,
        /// New quantity
        #[serde(skip_serializing_if = "Option::is_none")]
        quantity: Option<u32>,
        /// New pickup store
        #[serde(skip_serializing_if = "Option::is_none")]
        pickup_store: Option<String>,
    },

    /// Cart line updated
    #[event]
    #[action_type("[Cart-entry] Update Entry Success")]
    UpdateEntrySuccess {
        /// Acting user
        user_id: String,
        /// Target cart
        cart_id: String,
        /// Updated line
        entry_number: String,
        /// Backend outcome
        modification: CartModification,
        /// Generation the command started under
        #[serde(skip)]
        generation: Option<u64>,
    },

    /// Updating the line failed
    #[event]
    #[action_type("[Cart-entry] Update Entry Fail")]
    UpdateEntryFail {
        /// Acting user
        user_id: String,
        /// Target cart
        cart_id: String,
        /// Line that was not updated
        entry_number: String,
        /// Normalized error
        error: HttpErrorModel,
        /// Generation the command started under
        #[serde(skip)]
        generation: Option<u64>,
    },
}

impl CartAction {
    /// Cart the action targets
    #[must_use]
    pub fn cart_id(&self) -> &str {
        match self {
            Self::LoadCart { cart_id, .. }
            | Self::LoadCartSuccess { cart_id, .. }
            | Self::LoadCartFail { cart_id, .. }
            | Self::ResetCart { cart_id }
            | Self::AddEntry { cart_id, .. }
            | Self::AddEntrySuccess { cart_id, .. }
            | Self::AddEntryFail { cart_id, .. }
            | Self::RemoveEntry { cart_id, .. }
            | Self::RemoveEntrySuccess { cart_id, .. }
            | Self::RemoveEntryFail { cart_id, .. }
            | Self::UpdateEntry { cart_id, .. }
            | Self::UpdateEntrySuccess { cart_id, .. }
            | Self::UpdateEntryFail { cart_id, .. } => cart_id,
        }
    }

    /// Acting user, for actions that carry one
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::ResetCart { .. } => None,
            Self::LoadCart { user_id, .. }
            | Self::LoadCartSuccess { user_id, .. }
            | Self::LoadCartFail { user_id, .. }
            | Self::AddEntry { user_id, .. }
            | Self::AddEntrySuccess { user_id, .. }
            | Self::AddEntryFail { user_id, .. }
            | Self::RemoveEntry { user_id, .. }
            | Self::RemoveEntrySuccess { user_id, .. }
            | Self::RemoveEntryFail { user_id, .. }
            | Self::UpdateEntry { user_id, .. }
            | Self::UpdateEntrySuccess { user_id, .. }
            | Self::UpdateEntryFail { user_id, .. } => Some(user_id),
        }
    }

    /// Value stored into the cart's loader by this action
    #[must_use]
    pub fn cart_payload(&self) -> EntityPayload<Cart> {
        match self {
            Self::LoadCartSuccess { cart, .. } => EntityPayload::One(cart.clone()),
            _ => EntityPayload::None,
        }
    }

    /// Whether this action ends an entry command
    #[must_use]
    pub const fn is_entry_terminal(&self) -> bool {
        matches!(
            self,
            Self::AddEntrySuccess { .. }
                | Self::AddEntryFail { .. }
                | Self::RemoveEntrySuccess { .. }
                | Self::RemoveEntryFail { .. }
                | Self::UpdateEntrySuccess { .. }
                | Self::UpdateEntryFail { .. }
        )
    }
}

impl MetaAction for CartAction {
    fn meta(&self) -> Option<ActionMeta> {
        let cart_id = self.cart_id();
        let meta = match self {
            Self::LoadCart { .. } => EntityMeta::load(MULTI_CART_DATA, cart_id),
            Self::LoadCartSuccess { generation, .. } => {
                EntityMeta::success(MULTI_CART_DATA, cart_id).with_generation(*generation)
            },
            Self::LoadCartFail {
                error, generation, ..
            } => EntityMeta::fail(MULTI_CART_DATA, cart_id, error.clone())
                .with_generation(*generation),
            Self::ResetCart { .. } => EntityMeta::reset(MULTI_CART_DATA, cart_id),
            Self::AddEntry { .. } | Self::RemoveEntry { .. } | Self::UpdateEntry { .. } => {
                EntityMeta::processes_increment(MULTI_CART_DATA, cart_id)
            },
            Self::AddEntrySuccess { generation, .. }
            | Self::AddEntryFail { generation, .. }
            | Self::RemoveEntrySuccess { generation, .. }
            | Self::RemoveEntryFail { generation, .. }
            | Self::UpdateEntrySuccess { generation, .. }
            | Self::UpdateEntryFail { generation, .. } => {
                EntityMeta::processes_decrement(MULTI_CART_DATA, cart_id).with_generation(*generation)
            },
        };
        Some(meta.into())
    }
}
