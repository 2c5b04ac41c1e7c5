//! # Storefront Site Context
//!
//! Currencies the site supports and the one currently active.
//!
//! Currencies live in a single loader keyed by nothing but the slice itself.
//! Each successful load merges the returned currencies into those already
//! known. Switching from one active currency to another announces the
//! switch with [`CurrencyAction::CurrencyChange`], so other slices can
//! reload prices.

pub mod connector;
pub mod reducer;
pub mod selectors;
pub mod types;

pub use connector::CurrencyConnector;
pub use reducer::{site_context_reducer, CurrenciesReducer, SiteContextEnvironment, SiteContextReducer};
pub use selectors::{
    get_active_currency, get_all_currencies, get_currencies_loaded, get_currencies_loading,
    get_currency,
};
pub use types::{CurrenciesState, Currency, CurrencyAction, SiteContextState, CURRENCIES};
