//! Read-side projections of [`OrderApprovalState`].

use crate::types::{list_key, OrderApproval, OrderApprovalState};
use storefront_core::state_utils::{denormalize_list_page, selectors, EntitiesModel, LoaderError, SearchConfig};

/// A loaded approval
#[must_use]
pub fn get_order_approval<'a>(state: &'a OrderApprovalState, code: &str) -> Option<&'a OrderApproval> {
    selectors::get_value(&state.entities, code)
}

/// The page answering `params`, rebuilt from the approval cache
///
/// `None` until the page has loaded. Codes whose approval is not cached are
/// left out.
#[must_use]
pub fn get_order_approval_list(
    state: &OrderApprovalState,
    params: &SearchConfig,
) -> Option<EntitiesModel<OrderApproval>> {
    selectors::get_value(&state.list, &list_key(params))
        .map(|page| denormalize_list_page(page, &state.entities))
}

/// The page answering `params` is loading
#[must_use]
pub fn is_order_approval_list_loading(state: &OrderApprovalState, params: &SearchConfig) -> bool {
    selectors::get_loading(&state.list, &list_key(params))
}

/// A decision on `code` is being recorded
#[must_use]
pub fn is_decision_loading(state: &OrderApprovalState, code: &str) -> bool {
    selectors::get_loading(&state.decisions, code)
}

/// Error of the last decision on `code`
#[must_use]
pub fn get_decision_error<'a>(state: &'a OrderApprovalState, code: &str) -> &'a LoaderError {
    selectors::get_error(&state.decisions, code)
}
