//! Currency reducer, scoped into the site context slice.

use crate::connector::CurrencyConnector;
use crate::types::{CurrenciesState, CurrencyAction, SiteContextState, CURRENCIES};
use std::sync::Arc;
use std::time::Instant;
use storefront_core::action::{ActionMeta, MetaAction};
use storefront_core::composition::{scope_reducer, ScopedReducer};
use storefront_core::effect::Effect;
use storefront_core::error::normalize_http_error;
use storefront_core::reducer::Reducer;
use storefront_core::state_utils::LoaderReducer;
use storefront_core::{async_effect, smallvec, SmallVec};
use storefront_runtime::metrics::ConnectorMetrics;

/// Connectors site context effects call
#[derive(Clone)]
pub struct SiteContextEnvironment {
    /// Currency backend
    pub currencies: Arc<dyn CurrencyConnector>,
}

impl SiteContextEnvironment {
    /// Environment over the given connector
    #[must_use]
    pub fn new(currencies: Arc<dyn CurrencyConnector>) -> Self {
        Self { currencies }
    }
}

/// The site context slice reducer
pub type SiteContextReducer = ScopedReducer<SiteContextState, CurrenciesReducer>;

fn currencies_of(state: &mut SiteContextState) -> &mut CurrenciesState {
    &mut state.currencies
}

/// Build the site context slice reducer
#[must_use]
pub fn site_context_reducer() -> SiteContextReducer {
    scope_reducer(CurrenciesReducer::new(), currencies_of)
}

/// Reducer for [`CurrenciesState`]
///
/// A successful load merges into the currencies already known; isocodes
/// missing from the response are kept.
#[derive(Debug, Clone, Copy)]
pub struct CurrenciesReducer {
    loader: LoaderReducer,
}

impl CurrenciesReducer {
    /// Create the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            loader: LoaderReducer::new(CURRENCIES),
        }
    }
}

impl Default for CurrenciesReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for CurrenciesReducer {
    type State = CurrenciesState;
    type Action = CurrencyAction;
    type Environment = SiteContextEnvironment;

    fn reduce(
        &self,
        state: &mut CurrenciesState,
        action: CurrencyAction,
        env: &SiteContextEnvironment,
    ) -> SmallVec<[Effect<CurrencyAction>; 4]> {
        if let Some(ActionMeta::Loader(meta)) = action.meta() {
            let merged = match &action {
                CurrencyAction::LoadCurrenciesSuccess(currencies) => {
                    let mut entities = state.entities.value.take().unwrap_or_default();
                    entities.extend(
                        currencies
                            .iter()
                            .map(|currency| (currency.isocode.clone(), currency.clone())),
                    );
                    Some(entities)
                },
                _ => None,
            };
            self.loader.reduce(&mut state.entities, &meta, merged);
        }

        match action {
            CurrencyAction::LoadCurrencies => {
                let connector = Arc::clone(&env.currencies);
                smallvec![async_effect! {
                    let start = Instant::now();
                    let result = connector.get_currencies().await;
                    ConnectorMetrics::record_call("site.currencies", result.is_ok(), start.elapsed());
                    Some(match result {
                        Ok(currencies) => CurrencyAction::LoadCurrenciesSuccess(currencies),
                        Err(error) => CurrencyAction::LoadCurrenciesFail {
                            error: normalize_http_error(&error),
                        },
                    })
                }]
            },

            CurrencyAction::SetActiveCurrency(isocode) => {
                match state.active_currency.replace(isocode.clone()) {
                    Some(previous) if previous != isocode => {
                        tracing::debug!(%previous, current = %isocode, "Active currency changed");
                        smallvec![async_effect! {
                            Some(CurrencyAction::CurrencyChange {
                                previous,
                                current: isocode,
                            })
                        }]
                    },
                    _ => smallvec![Effect::None],
                }
            },

            CurrencyAction::LoadCurrenciesSuccess(_)
            | CurrencyAction::LoadCurrenciesFail { .. }
            | CurrencyAction::CurrencyChange { .. } => smallvec![Effect::None],
        }
    }
}
