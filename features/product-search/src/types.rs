//! Product search models, state and actions.

use serde::{Deserialize, Serialize};
use storefront_core::action::{ActionMeta, MetaAction};
use storefront_core::error::HttpErrorModel;
use storefront_core::state_utils::{
    EntityMeta, EntityPayload, EntityState, LoaderMeta, LoaderState, PaginationModel,
    ProcessesLoaderState, SearchConfig, SortModel,
};
use storefront_macros::Action;

/// Loader of the main search results
pub const PRODUCT_SEARCH_RESULTS: &str = "product-search-results";

/// Loader of auxiliary results, e.g. the search box preview
pub const PRODUCT_SEARCH_AUX_RESULTS: &str = "product-search-aux-results";

/// Loader of search term suggestions
pub const PRODUCT_SUGGESTIONS: &str = "product-suggestions";

/// Entity type of the product cache
pub const PRODUCT_DETAIL_ENTITY: &str = "product-detail-entity";

/// Displayable price
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPrice {
    /// Localized display value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_value: Option<String>,
    /// Numeric value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

/// A product as listed in search results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product code, the id products are cached by
    pub code: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Short description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<ProductPrice>,
}

/// One value of a facet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetValue {
    /// Display name
    pub name: String,
    /// Number of matching products
    #[serde(default)]
    pub count: u64,
    /// Currently applied
    #[serde(default)]
    pub selected: bool,
}

/// A filter dimension of the results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facet {
    /// Display name
    pub name: String,
    /// Selectable values
    #[serde(default)]
    pub values: Vec<FacetValue>,
}

/// One page of search results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSearchPage {
    /// Matching products
    #[serde(default)]
    pub products: Vec<Product>,
    /// Facets of the result set
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub facets: Vec<Facet>,
    /// Paging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationModel>,
    /// Sort options
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<SortModel>,
    /// Query text the backend actually searched for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_text_search: Option<String>,
}

/// A search term suggestion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Suggested term
    pub value: String,
}

/// Search loaders plus the product cache
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSearchState {
    /// Results of the page search
    pub results: LoaderState<ProductSearchPage>,
    /// Results of auxiliary searches
    pub aux_results: LoaderState<ProductSearchPage>,
    /// Term suggestions
    pub suggestions: LoaderState<Vec<Suggestion>>,
    /// Products seen in any result, by code
    pub products: EntityState<ProcessesLoaderState<Product>>,
}

/// Product search actions
#[derive(Action, Debug, Clone, PartialEq, Serialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum ProductSearchAction {
    /// Run a search
    #[command]
    #[action_type("[Product] Search Products")]
    SearchProducts {
        /// Free text query
        query_text: String,
        /// Paging and sorting
        search_config: SearchConfig,
        /// Store the results as auxiliary results
        #[serde(skip)]
        auxiliary: bool,
    },

    /// Search finished
    #[event]
    #[action_type("[Product] Search Products Success")]
    SearchProductsSuccess {
        /// Result page
        page: ProductSearchPage,
        /// Results belong to an auxiliary search
        #[serde(skip)]
        auxiliary: bool,
    },

    /// Search failed
    #[event]
    #[action_type("[Product] Search Products Fail")]
    SearchProductsFail {
        /// Normalized error
        error: HttpErrorModel,
        /// Failure belongs to an auxiliary search
        #[serde(skip)]
        auxiliary: bool,
    },

    /// Fetch suggestions for a partial term
    #[command]
    #[action_type("[Product] Get Product Suggestions")]
    GetProductSuggestions {
        /// Partial term
        term: String,
        /// Paging, `page_size` caps the number of suggestions
        search_config: SearchConfig,
    },

    /// Suggestions fetched
    #[event]
    #[action_type("[Product] Get Product Suggestions Success")]
    GetProductSuggestionsSuccess(Vec<Suggestion>),

    /// Fetching suggestions failed
    #[event]
    #[action_type("[Product] Get Product Suggestions Fail")]
    GetProductSuggestionsFail {
        /// Normalized error
        error: HttpErrorModel,
    },

    /// Reset page results, search box results, or both
    #[action_type("[Product] Clear Product Search Result")]
    ClearProductSearchResult {
        /// Reset the page results
        clear_page_results: bool,
        /// Reset auxiliary results and suggestions
        clear_searchbox_results: bool,
    },

    /// Products of a result page, for the product cache
    #[event]
    #[action_type("[Product] Products Loaded")]
    ProductsLoaded(Vec<Product>),
}

fn results_type(auxiliary: bool) -> &'static str {
    if auxiliary {
        PRODUCT_SEARCH_AUX_RESULTS
    } else {
        PRODUCT_SEARCH_RESULTS
    }
}

impl ProductSearchAction {
    /// Result page stored by this action
    #[must_use]
    pub fn page_payload(&self) -> Option<ProductSearchPage> {
        match self {
            Self::SearchProductsSuccess { page, .. } => Some(page.clone()),
            _ => None,
        }
    }

    /// Suggestions stored by this action
    #[must_use]
    pub fn suggestions_payload(&self) -> Option<Vec<Suggestion>> {
        match self {
            Self::GetProductSuggestionsSuccess(suggestions) => Some(suggestions.clone()),
            _ => None,
        }
    }

    /// Products stored in the cache by this action
    #[must_use]
    pub fn products_payload(&self) -> EntityPayload<Product> {
        match self {
            Self::ProductsLoaded(products) => EntityPayload::Many(products.clone()),
            _ => EntityPayload::None,
        }
    }
}

impl MetaAction for ProductSearchAction {
    fn meta(&self) -> Option<ActionMeta> {
        match self {
            Self::SearchProducts { auxiliary, .. } => {
                Some(LoaderMeta::load(results_type(*auxiliary)).into())
            },
            Self::SearchProductsSuccess { auxiliary, .. } => {
                Some(LoaderMeta::success(results_type(*auxiliary)).into())
            },
            Self::SearchProductsFail { error, auxiliary } => {
                Some(LoaderMeta::fail(results_type(*auxiliary), error.clone()).into())
            },
            Self::GetProductSuggestions { .. } => Some(LoaderMeta::load(PRODUCT_SUGGESTIONS).into()),
            Self::GetProductSuggestionsSuccess(_) => {
                Some(LoaderMeta::success(PRODUCT_SUGGESTIONS).into())
            },
            Self::GetProductSuggestionsFail { error } => {
                Some(LoaderMeta::fail(PRODUCT_SUGGESTIONS, error.clone()).into())
            },
            Self::ProductsLoaded(products) => Some(
                EntityMeta::success(
                    PRODUCT_DETAIL_ENTITY,
                    products
                        .iter()
                        .map(|product| product.code.clone())
                        .collect::<Vec<_>>(),
                )
                .into(),
            ),
            Self::ClearProductSearchResult { .. } => None,
        }
    }
}
