//! Backend seam for site context effects.

use crate::types::Currency;
use storefront_core::error::ConnectorFuture;

/// Fetches the currencies a site supports
pub trait CurrencyConnector: Send + Sync {
    /// All currencies of the site
    fn get_currencies(&self) -> ConnectorFuture<Vec<Currency>>;
}
