//! Backend seam for product search effects.

use crate::types::{ProductSearchPage, Suggestion};
use storefront_core::error::ConnectorFuture;
use storefront_core::state_utils::SearchConfig;

/// Runs product searches
pub trait ProductSearchConnector: Send + Sync {
    /// Search products matching `query_text`
    fn search(&self, query_text: &str, search_config: &SearchConfig) -> ConnectorFuture<ProductSearchPage>;

    /// Suggest terms completing `term`
    fn get_suggestions(&self, term: &str, page_size: Option<u32>) -> ConnectorFuture<Vec<Suggestion>>;
}
