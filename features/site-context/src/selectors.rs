//! Read-side projections of [`SiteContextState`].

use crate::types::{Currency, SiteContextState};

/// All known currencies, ordered by isocode
#[must_use]
pub fn get_all_currencies(state: &SiteContextState) -> Vec<&Currency> {
    let mut currencies: Vec<&Currency> = state
        .currencies
        .entities
        .value
        .iter()
        .flat_map(|entities| entities.values())
        .collect();
    currencies.sort_by(|a, b| a.isocode.cmp(&b.isocode));
    currencies
}

/// A known currency
#[must_use]
pub fn get_currency<'a>(state: &'a SiteContextState, isocode: &str) -> Option<&'a Currency> {
    state
        .currencies
        .entities
        .value
        .as_ref()
        .and_then(|entities| entities.get(isocode))
}

/// Isocode of the active currency
#[must_use]
pub fn get_active_currency(state: &SiteContextState) -> Option<&str> {
    state.currencies.active_currency.as_deref()
}

/// Currencies are loading
#[must_use]
pub const fn get_currencies_loading(state: &SiteContextState) -> bool {
    state.currencies.entities.loading
}

/// The last currency load succeeded
#[must_use]
pub const fn get_currencies_loaded(state: &SiteContextState) -> bool {
    state.currencies.entities.success
}
