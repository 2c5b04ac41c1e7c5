//! # Storefront Order Approval
//!
//! State for B2B order approvals.
//!
//! Three entity states are kept side by side: approvals keyed by approval
//! code, pages of approval codes keyed by the query that produced them, and
//! the decision an approver made, keyed by approval code. Fetching a page
//! stores the approvals in the entity cache first and the page of codes
//! second, so a page is never visible before its records. A recorded
//! decision triggers a reload of its approval.

pub mod connector;
pub mod reducer;
pub mod selectors;
pub mod types;

pub use connector::OrderApprovalConnector;
pub use reducer::{OrderApprovalEnvironment, OrderApprovalReducer};
pub use selectors::{
    get_decision_error, get_order_approval, get_order_approval_list, is_decision_loading,
    is_order_approval_list_loading,
};
pub use types::{
    list_key, ApprovalOrder, OrderApproval, OrderApprovalAction, OrderApprovalDecision,
    OrderApprovalDecisionValue, OrderApprovalRecord, OrderApprovalState, ORDER_APPROVAL_DECISIONS,
    ORDER_APPROVAL_ENTITIES, ORDER_APPROVAL_LIST,
};
