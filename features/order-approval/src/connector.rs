//! Backend seam for order approval effects.

use crate::types::{OrderApproval, OrderApprovalDecision};
use storefront_core::error::ConnectorFuture;
use storefront_core::state_utils::{EntitiesModel, SearchConfig};

/// Reads approvals and records decisions
pub trait OrderApprovalConnector: Send + Sync {
    /// Fetch one approval
    fn get(&self, user_id: &str, order_approval_code: &str) -> ConnectorFuture<OrderApproval>;

    /// Fetch a page of approvals
    fn get_list(
        &self,
        user_id: &str,
        params: &SearchConfig,
    ) -> ConnectorFuture<EntitiesModel<OrderApproval>>;

    /// Record a decision and return it as stored
    fn make_decision(
        &self,
        user_id: &str,
        order_approval_code: &str,
        decision: &OrderApprovalDecision,
    ) -> ConnectorFuture<OrderApprovalDecision>;
}
