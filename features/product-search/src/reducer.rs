//! Product search reducers.
//!
//! The slice reducer is assembled from two parts: [`SearchResultsReducer`]
//! drives the result and suggestion loaders and runs the searches, and
//! [`ProductCacheReducer`] stores the products of every result page.

use crate::connector::ProductSearchConnector;
use crate::types::{
    ProductSearchAction, ProductSearchState, PRODUCT_DETAIL_ENTITY, PRODUCT_SEARCH_AUX_RESULTS,
    PRODUCT_SEARCH_RESULTS, PRODUCT_SUGGESTIONS,
};
use std::sync::Arc;
use std::time::Instant;
use storefront_core::action::{ActionMeta, MetaAction};
use storefront_core::composition::{combine_reducers, CombinedReducer, SharedReducer};
use storefront_core::effect::Effect;
use storefront_core::error::normalize_http_error;
use storefront_core::reducer::Reducer;
use storefront_core::state_utils::{EntityLoaderReducer, LoaderReducer, LoaderState};
use storefront_core::{async_effect, smallvec, stream_effect, SmallVec};
use storefront_runtime::metrics::ConnectorMetrics;

/// Connectors product search effects call
#[derive(Clone)]
pub struct ProductSearchEnvironment {
    /// Search backend
    pub search: Arc<dyn ProductSearchConnector>,
}

impl ProductSearchEnvironment {
    /// Environment over the given connector
    #[must_use]
    pub fn new(search: Arc<dyn ProductSearchConnector>) -> Self {
        Self { search }
    }
}

/// The product search slice reducer
pub type ProductSearchReducer =
    CombinedReducer<ProductSearchState, ProductSearchAction, ProductSearchEnvironment>;

/// Build the product search slice reducer
#[must_use]
pub fn product_search_reducer() -> ProductSearchReducer {
    let reducers: Vec<SharedReducer<ProductSearchState, ProductSearchAction, ProductSearchEnvironment>> =
        vec![Arc::new(SearchResultsReducer::new()), Arc::new(ProductCacheReducer::new())];
    combine_reducers(reducers)
}

/// Result and suggestion loaders, and the searches behind them
///
/// Searches are not cancelled: when two searches overlap, whichever
/// response arrives last is kept.
#[derive(Debug, Clone, Copy)]
pub struct SearchResultsReducer {
    results: LoaderReducer,
    aux_results: LoaderReducer,
    suggestions: LoaderReducer,
}

impl SearchResultsReducer {
    /// Create the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            results: LoaderReducer::new(PRODUCT_SEARCH_RESULTS),
            aux_results: LoaderReducer::new(PRODUCT_SEARCH_AUX_RESULTS),
            suggestions: LoaderReducer::new(PRODUCT_SUGGESTIONS),
        }
    }
}

impl Default for SearchResultsReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for SearchResultsReducer {
    type State = ProductSearchState;
    type Action = ProductSearchAction;
    type Environment = ProductSearchEnvironment;

    fn reduce(
        &self,
        state: &mut ProductSearchState,
        action: ProductSearchAction,
        env: &ProductSearchEnvironment,
    ) -> SmallVec<[Effect<ProductSearchAction>; 4]> {
        if let Some(ActionMeta::Loader(meta)) = action.meta() {
            self.results.reduce(&mut state.results, &meta, action.page_payload());
            self.aux_results
                .reduce(&mut state.aux_results, &meta, action.page_payload());
            self.suggestions
                .reduce(&mut state.suggestions, &meta, action.suggestions_payload());
        }

        match action {
            ProductSearchAction::SearchProducts {
                query_text,
                search_config,
                auxiliary,
            } => {
                let connector = Arc::clone(&env.search);
                smallvec![stream_effect! {
                    let start = Instant::now();
                    let result = connector.search(&query_text, &search_config).await;
                    ConnectorMetrics::record_call("product.search", result.is_ok(), start.elapsed());
                    match result {
                        Ok(page) => {
                            if !page.products.is_empty() {
                                yield ProductSearchAction::ProductsLoaded(page.products.clone());
                            }
                            yield ProductSearchAction::SearchProductsSuccess { page, auxiliary };
                        },
                        Err(error) => {
                            yield ProductSearchAction::SearchProductsFail {
                                error: normalize_http_error(&error),
                                auxiliary,
                            };
                        },
                    }
                }]
            },

            ProductSearchAction::GetProductSuggestions {
                term,
                search_config,
            } => {
                let connector = Arc::clone(&env.search);
                smallvec![async_effect! {
                    let start = Instant::now();
                    let result = connector.get_suggestions(&term, search_config.page_size).await;
                    ConnectorMetrics::record_call("product.suggestions", result.is_ok(), start.elapsed());
                    Some(match result {
                        Ok(suggestions) => ProductSearchAction::GetProductSuggestionsSuccess(suggestions),
                        Err(error) => ProductSearchAction::GetProductSuggestionsFail {
                            error: normalize_http_error(&error),
                        },
                    })
                }]
            },

            ProductSearchAction::ClearProductSearchResult {
                clear_page_results,
                clear_searchbox_results,
            } => {
                tracing::debug!(clear_page_results, clear_searchbox_results, "Clearing search results");
                if clear_page_results {
                    state.results = LoaderState::default();
                }
                if clear_searchbox_results {
                    state.aux_results = LoaderState::default();
                    state.suggestions = LoaderState::default();
                }
                smallvec![Effect::None]
            },

            ProductSearchAction::SearchProductsSuccess { .. }
            | ProductSearchAction::SearchProductsFail { .. }
            | ProductSearchAction::GetProductSuggestionsSuccess(_)
            | ProductSearchAction::GetProductSuggestionsFail { .. }
            | ProductSearchAction::ProductsLoaded(_) => smallvec![Effect::None],
        }
    }
}

/// Product cache fed by result pages
#[derive(Debug, Clone, Copy)]
pub struct ProductCacheReducer {
    products: EntityLoaderReducer,
}

impl ProductCacheReducer {
    /// Create the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: EntityLoaderReducer::new(PRODUCT_DETAIL_ENTITY),
        }
    }
}

impl Default for ProductCacheReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for ProductCacheReducer {
    type State = ProductSearchState;
    type Action = ProductSearchAction;
    type Environment = ProductSearchEnvironment;

    fn reduce(
        &self,
        state: &mut ProductSearchState,
        action: ProductSearchAction,
        _env: &ProductSearchEnvironment,
    ) -> SmallVec<[Effect<ProductSearchAction>; 4]> {
        if let Some(ActionMeta::Entity(meta)) = action.meta() {
            self.products
                .reduce(&mut state.products, &meta, action.products_payload());
        }
        smallvec![Effect::None]
    }
}
