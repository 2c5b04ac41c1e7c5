//! # Storefront Product Search
//!
//! State for free-text product search.
//!
//! Page searches and auxiliary searches (the search box preview) load into
//! separate loaders so one never overwrites the other. Every result page
//! also feeds the product cache, which is filled before the results
//! themselves become visible.
//!
//! ```
//! use storefront_product_search::{product_search_reducer, ProductSearchState};
//!
//! let reducer = product_search_reducer();
//! let state = ProductSearchState::default();
//! # let _ = (reducer, state);
//! ```

pub mod connector;
pub mod reducer;
pub mod selectors;
pub mod types;

pub use connector::ProductSearchConnector;
pub use reducer::{
    product_search_reducer, ProductCacheReducer, ProductSearchEnvironment, ProductSearchReducer,
    SearchResultsReducer,
};
pub use selectors::{
    get_aux_search_results, get_product, get_product_suggestions, get_search_results,
    is_search_loading,
};
pub use types::{
    Facet, FacetValue, Product, ProductPrice, ProductSearchAction, ProductSearchPage,
    ProductSearchState, Suggestion, PRODUCT_DETAIL_ENTITY, PRODUCT_SEARCH_AUX_RESULTS,
    PRODUCT_SEARCH_RESULTS, PRODUCT_SUGGESTIONS,
};
