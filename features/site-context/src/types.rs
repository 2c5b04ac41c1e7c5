//! Currency models, state and actions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use storefront_core::action::{ActionMeta, MetaAction};
use storefront_core::error::HttpErrorModel;
use storefront_core::state_utils::{LoaderMeta, LoaderState};
use storefront_macros::Action;

/// Loader of the available currencies
pub const CURRENCIES: &str = "currencies";

/// A currency the site can display prices in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    /// ISO 4217 code, the key currencies are stored by
    pub isocode: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Display symbol
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Enabled for the site
    #[serde(default)]
    pub active: bool,
}

/// Currencies by isocode plus the one in use
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrenciesState {
    /// Every currency loaded so far
    pub entities: LoaderState<HashMap<String, Currency>>,
    /// Isocode of the active currency
    pub active_currency: Option<String>,
}

/// Site context slice of the state tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteContextState {
    /// Currency context
    pub currencies: CurrenciesState,
}

/// Currency actions
#[derive(Action, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum CurrencyAction {
    /// Fetch the site currencies
    #[command]
    #[action_type("[Site-context] Load Currencies")]
    LoadCurrencies,

    /// Currencies fetched
    #[event]
    #[action_type("[Site-context] Load Currencies Success")]
    LoadCurrenciesSuccess(Vec<Currency>),

    /// Fetching currencies failed
    #[event]
    #[action_type("[Site-context] Load Currencies Fail")]
    LoadCurrenciesFail {
        /// Normalized error
        error: HttpErrorModel,
    },

    /// Switch the active currency
    #[action_type("[Site-context] Set Active Currency")]
    SetActiveCurrency(String),

    /// The active currency was replaced
    #[event]
    #[action_type("[Site-context] Currency Change")]
    CurrencyChange {
        /// Isocode active before
        previous: String,
        /// Isocode active now
        current: String,
    },
}

impl MetaAction for CurrencyAction {
    fn meta(&self) -> Option<ActionMeta> {
        match self {
            Self::LoadCurrencies => Some(LoaderMeta::load(CURRENCIES).into()),
            Self::LoadCurrenciesSuccess(_) => Some(LoaderMeta::success(CURRENCIES).into()),
            Self::LoadCurrenciesFail { error } => Some(LoaderMeta::fail(CURRENCIES, error.clone()).into()),
            Self::SetActiveCurrency(_) | Self::CurrencyChange { .. } => None,
        }
    }
}
