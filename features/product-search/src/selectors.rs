//! Read-side projections of [`ProductSearchState`].

use crate::types::{Product, ProductSearchPage, ProductSearchState, Suggestion};
use storefront_core::state_utils::selectors;

/// Page search results, once loaded
#[must_use]
pub const fn get_search_results(state: &ProductSearchState) -> Option<&ProductSearchPage> {
    state.results.value.as_ref()
}

/// Auxiliary search results, once loaded
#[must_use]
pub const fn get_aux_search_results(state: &ProductSearchState) -> Option<&ProductSearchPage> {
    state.aux_results.value.as_ref()
}

/// Current suggestions, empty until loaded
#[must_use]
pub fn get_product_suggestions(state: &ProductSearchState) -> &[Suggestion] {
    state.suggestions.value.as_deref().unwrap_or_default()
}

/// A page search is running
#[must_use]
pub const fn is_search_loading(state: &ProductSearchState) -> bool {
    state.results.loading
}

/// A cached product
#[must_use]
pub fn get_product<'a>(state: &'a ProductSearchState, code: &str) -> Option<&'a Product> {
    selectors::get_value(&state.products, code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_state_reads_as_nothing_loaded() {
        let state = ProductSearchState::default();

        assert!(get_search_results(&state).is_none());
        assert!(get_aux_search_results(&state).is_none());
        assert!(get_product_suggestions(&state).is_empty());
        assert!(!is_search_loading(&state));
        assert!(get_product(&state, "300938").is_none());
    }
}
