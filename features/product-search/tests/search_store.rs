//! Product searches running through a store.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use std::sync::Arc;
use std::time::Duration;
use storefront_core::error::ConnectorFuture;
use storefront_core::state_utils::SearchConfig;
use storefront_product_search::{
    get_aux_search_results, get_product, get_product_suggestions, get_search_results,
    is_search_loading, product_search_reducer, Product, ProductSearchAction,
    ProductSearchConnector, ProductSearchEnvironment, ProductSearchPage, ProductSearchReducer,
    ProductSearchState, Suggestion,
};
use storefront_runtime::Store;
use storefront_testing::helpers::{init_test_tracing, next_actions};
use storefront_testing::{CallLog, ConnectorGate};

/// Backend answering each query with one product named after it.
/// A search waits for its gate `search:{query}` to open.
#[derive(Clone, Default)]
struct GatedCatalog {
    gate: ConnectorGate,
    log: CallLog,
}

impl ProductSearchConnector for GatedCatalog {
    fn search(&self, query_text: &str, _config: &SearchConfig) -> ConnectorFuture<ProductSearchPage> {
        self.log.record(format!("search:{query_text}"));
        let gate = self.gate.clone();
        let query = query_text.to_string();
        Box::pin(async move {
            gate.wait(&format!("search:{query}")).await;
            Ok(ProductSearchPage {
                products: vec![Product {
                    code: format!("{query}-1"),
                    name: Some(query.clone()),
                    ..Product::default()
                }],
                free_text_search: Some(query),
                ..ProductSearchPage::default()
            })
        })
    }

    fn get_suggestions(&self, term: &str, page_size: Option<u32>) -> ConnectorFuture<Vec<Suggestion>> {
        self.log.record(format!("suggest:{term}"));
        let suggestions = ["", "era", "corder"]
            .iter()
            .map(|suffix| Suggestion {
                value: format!("{term}{suffix}"),
            })
            .take(page_size.map_or(usize::MAX, |n| usize::try_from(n).unwrap_or(usize::MAX)))
            .collect();
        Box::pin(async move { Ok(suggestions) })
    }
}

type SearchStore = Store<ProductSearchState, ProductSearchAction, ProductSearchEnvironment, ProductSearchReducer>;

fn store(backend: &GatedCatalog) -> SearchStore {
    init_test_tracing();
    Store::new(
        ProductSearchState::default(),
        product_search_reducer(),
        ProductSearchEnvironment::new(Arc::new(backend.clone())),
    )
}

fn search(query_text: &str, auxiliary: bool) -> ProductSearchAction {
    ProductSearchAction::SearchProducts {
        query_text: query_text.to_string(),
        search_config: SearchConfig::default(),
        auxiliary,
    }
}

fn searched_for(page: Option<&ProductSearchPage>) -> Option<String> {
    page.and_then(|p| p.free_text_search.clone())
}

#[tokio::test]
async fn products_are_cached_before_results_appear() {
    let backend = GatedCatalog::default();
    let store = store(&backend);
    let mut rx = store.subscribe_actions();

    let mut handle = store.send(search("camera", false)).await.unwrap();
    assert!(store.state(is_search_loading).await);
    backend.gate.open("search:camera");
    handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

    let actions = next_actions(&mut rx, 2, Duration::from_millis(100)).await;
    assert!(matches!(
        actions.as_slice(),
        [
            ProductSearchAction::ProductsLoaded(products),
            ProductSearchAction::SearchProductsSuccess { auxiliary: false, .. },
        ] if products.len() == 1
    ));

    let cached = store.state(|s| get_product(s, "camera-1").cloned()).await.expect("product cached");
    assert_eq!(cached.name.as_deref(), Some("camera"));
    assert!(!store.state(is_search_loading).await);
}

#[tokio::test]
async fn auxiliary_results_do_not_replace_page_results() {
    let backend = GatedCatalog::default();
    backend.gate.open("search:camera");
    backend.gate.open("search:cam");
    let store = store(&backend);

    let mut page = store.send(search("camera", false)).await.unwrap();
    let mut preview = store.send(search("cam", true)).await.unwrap();
    page.wait_with_timeout(Duration::from_secs(1)).await.unwrap();
    preview.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

    let (results, aux) = store
        .state(|s| {
            (
                searched_for(get_search_results(s)),
                searched_for(get_aux_search_results(s)),
            )
        })
        .await;
    assert_eq!(results.as_deref(), Some("camera"));
    assert_eq!(aux.as_deref(), Some("cam"));
}

#[tokio::test]
async fn overlapping_searches_keep_the_last_response() {
    let backend = GatedCatalog::default();
    backend.gate.open("search:second");
    let store = store(&backend);

    let mut first = store.send(search("first", false)).await.unwrap();
    let mut second = store.send(search("second", false)).await.unwrap();
    second.wait_with_timeout(Duration::from_secs(1)).await.unwrap();
    assert_eq!(
        store.state(|s| searched_for(get_search_results(s))).await.as_deref(),
        Some("second")
    );

    backend.gate.open("search:first");
    first.wait_with_timeout(Duration::from_secs(1)).await.unwrap();
    assert_eq!(
        store.state(|s| searched_for(get_search_results(s))).await.as_deref(),
        Some("first")
    );
    assert_eq!(backend.log.count("search:"), 2);
}

#[tokio::test]
async fn clearing_the_search_box_keeps_page_results() {
    let backend = GatedCatalog::default();
    backend.gate.open("search:camera");
    backend.gate.open("search:cam");
    let store = store(&backend);

    for action in [
        search("camera", false),
        search("cam", true),
        ProductSearchAction::GetProductSuggestions {
            term: "cam".to_string(),
            search_config: SearchConfig {
                page_size: Some(2),
                ..SearchConfig::default()
            },
        },
    ] {
        let mut handle = store.send(action).await.unwrap();
        handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();
    }
    let suggestions: Vec<String> = store
        .state(|s| get_product_suggestions(s).iter().map(|s| s.value.clone()).collect())
        .await;
    assert_eq!(suggestions, vec!["cam", "camera"]);

    let mut handle = store
        .send(ProductSearchAction::ClearProductSearchResult {
            clear_page_results: false,
            clear_searchbox_results: true,
        })
        .await
        .unwrap();
    handle.wait().await;

    let (results, aux, suggestions) = store
        .state(|s| {
            (
                get_search_results(s).is_some(),
                get_aux_search_results(s).is_some(),
                get_product_suggestions(s).len(),
            )
        })
        .await;
    assert!(results);
    assert!(!aux);
    assert_eq!(suggestions, 0);
    // Cached products survive a clear
    assert!(store.state(|s| get_product(s, "cam-1").is_some()).await);
}
