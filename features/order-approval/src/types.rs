//! Order approval models, state and actions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_core::action::{ActionMeta, MetaAction};
use storefront_core::error::HttpErrorModel;
use storefront_core::state_utils::{
    serialize_search_config, EntityMeta, EntityPayload, EntityState, ListModel,
    ProcessesLoaderState, SearchConfig,
};
use storefront_macros::Action;

/// Entity type of approvals keyed by approval code
pub const ORDER_APPROVAL_ENTITIES: &str = "order-approval-entities";

/// Entity type of approval list pages keyed by query
pub const ORDER_APPROVAL_LIST: &str = "order-approval-list";

/// Entity type of decisions keyed by approval code
pub const ORDER_APPROVAL_DECISIONS: &str = "order-approval-decisions";

/// Outcome an approver can choose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderApprovalDecisionValue {
    /// Let the order proceed
    Approve,
    /// Stop the order
    Reject,
}

/// A decision on an approval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderApprovalDecision {
    /// Chosen outcome
    pub decision: OrderApprovalDecisionValue,
    /// Free text shown to the buyer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// One step of the approval history of an order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderApprovalRecord {
    /// Approver display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approver: Option<String>,
    /// Approver comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    /// Permissions that triggered this step
    #[serde(default)]
    pub permission_types: Vec<String>,
    /// Localized status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_display: Option<String>,
}

/// Order an approval belongs to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalOrder {
    /// Order code
    pub code: String,
    /// When the order was placed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// Buyer display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordered_by: Option<String>,
    /// Localized order status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_display: Option<String>,
}

/// An order waiting for, or past, approval
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderApproval {
    /// Approval code, the id approvals are keyed by
    pub code: String,
    /// The current user still has to decide
    #[serde(default)]
    pub approval_decision_required: bool,
    /// The order under approval
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<ApprovalOrder>,
    /// Approval history
    #[serde(default)]
    pub customer_order_approval_records: Vec<OrderApprovalRecord>,
}

/// Approvals, list pages and decisions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderApprovalState {
    /// Approvals by approval code
    pub entities: EntityState<ProcessesLoaderState<OrderApproval>>,
    /// Pages of approval codes by query key
    pub list: EntityState<ProcessesLoaderState<ListModel>>,
    /// Decisions by approval code
    pub decisions: EntityState<ProcessesLoaderState<OrderApprovalDecision>>,
}

/// Order approval actions
#[derive(Action, Debug, Clone, PartialEq, Serialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum OrderApprovalAction {
    /// Fetch one approval
    #[command]
    #[action_type("[Order Approval] Load Order Approval")]
    LoadOrderApproval {
        /// Acting user
        user_id: String,
        /// Approval to load
        order_approval_code: String,
    },

    /// Approvals fetched, one or many
    #[event]
    #[action_type("[Order Approval] Load Order Approval Success")]
    LoadOrderApprovalSuccess(Vec<OrderApproval>),

    /// Fetching an approval failed
    #[event]
    #[action_type("[Order Approval] Load Order Approval Fail")]
    LoadOrderApprovalFail {
        /// Approval that failed to load
        order_approval_code: String,
        /// Normalized error
        error: HttpErrorModel,
    },

    /// Fetch a page of approvals
    #[command]
    #[action_type("[Order Approval] Load Order Approvals")]
    LoadOrderApprovals {
        /// Acting user
        user_id: String,
        /// Paging and sorting
        params: SearchConfig,
    },

    /// Page fetched; the approvals themselves arrive separately
    #[event]
    #[action_type("[Order Approval] Load Order Approvals Success")]
    LoadOrderApprovalsSuccess {
        /// Approval codes of the page
        page: ListModel,
        /// Query the page answers
        params: SearchConfig,
    },

    /// Fetching a page failed
    #[event]
    #[action_type("[Order Approval] Load Order Approvals Fail")]
    LoadOrderApprovalsFail {
        /// Query that failed
        params: SearchConfig,
        /// Normalized error
        error: HttpErrorModel,
    },

    /// Approve or reject an order
    #[command]
    #[action_type("[Order Approval] Make Decision")]
    MakeDecision {
        /// Acting user
        user_id: String,
        /// Approval to decide on
        order_approval_code: String,
        /// The decision
        order_approval_decision: OrderApprovalDecision,
    },

    /// Decision recorded
    #[event]
    #[action_type("[Order Approval] Make Decision Success")]
    MakeDecisionSuccess {
        /// Approval decided on
        order_approval_code: String,
        /// Decision as stored by the backend
        order_approval_decision: OrderApprovalDecision,
    },

    /// Recording the decision failed
    #[event]
    #[action_type("[Order Approval] Make Decision Fail")]
    MakeDecisionFail {
        /// Approval decided on
        order_approval_code: String,
        /// Normalized error
        error: HttpErrorModel,
    },

    /// Forget the decision state of an approval
    #[action_type("[Order Approval] Make Decision Reset")]
    MakeDecisionReset {
        /// Approval to forget
        order_approval_code: String,
    },
}

impl OrderApprovalAction {
    /// Acting user, for commands
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::LoadOrderApproval { user_id, .. }
            | Self::LoadOrderApprovals { user_id, .. }
            | Self::MakeDecision { user_id, .. } => Some(user_id),
            _ => None,
        }
    }

    /// Approvals stored by this action
    #[must_use]
    pub fn approvals_payload(&self) -> EntityPayload<OrderApproval> {
        match self {
            Self::LoadOrderApprovalSuccess(approvals) => EntityPayload::Many(approvals.clone()),
            _ => EntityPayload::None,
        }
    }

    /// List page stored by this action
    #[must_use]
    pub fn page_payload(&self) -> EntityPayload<ListModel> {
        match self {
            Self::LoadOrderApprovalsSuccess { page, .. } => EntityPayload::One(page.clone()),
            _ => EntityPayload::None,
        }
    }

    /// Decision stored by this action
    #[must_use]
    pub fn decision_payload(&self) -> EntityPayload<OrderApprovalDecision> {
        match self {
            Self::MakeDecisionSuccess {
                order_approval_decision,
                ..
            } => EntityPayload::One(order_approval_decision.clone()),
            _ => EntityPayload::None,
        }
    }
}

/// Key a list page is stored under
#[must_use]
pub fn list_key(params: &SearchConfig) -> String {
    serialize_search_config(params, None)
}

impl MetaAction for OrderApprovalAction {
    fn meta(&self) -> Option<ActionMeta> {
        let meta = match self {
            Self::LoadOrderApproval {
                order_approval_code,
                ..
            } => EntityMeta::load(ORDER_APPROVAL_ENTITIES, order_approval_code.as_str()),
            Self::LoadOrderApprovalSuccess(approvals) => EntityMeta::success(
                ORDER_APPROVAL_ENTITIES,
                approvals
                    .iter()
                    .map(|approval| approval.code.clone())
                    .collect::<Vec<_>>(),
            ),
            Self::LoadOrderApprovalFail {
                order_approval_code,
                error,
            } => EntityMeta::fail(
                ORDER_APPROVAL_ENTITIES,
                order_approval_code.as_str(),
                error.clone(),
            ),
            Self::LoadOrderApprovals { params, .. } => {
                EntityMeta::load(ORDER_APPROVAL_LIST, list_key(params))
            },
            Self::LoadOrderApprovalsSuccess { params, .. } => {
                EntityMeta::success(ORDER_APPROVAL_LIST, list_key(params))
            },
            Self::LoadOrderApprovalsFail { params, error } => {
                EntityMeta::fail(ORDER_APPROVAL_LIST, list_key(params), error.clone())
            },
            Self::MakeDecision {
                order_approval_code,
                ..
            } => EntityMeta::load(ORDER_APPROVAL_DECISIONS, order_approval_code.as_str()),
            Self::MakeDecisionSuccess {
                order_approval_code,
                ..
            } => EntityMeta::success(ORDER_APPROVAL_DECISIONS, order_approval_code.as_str()),
            Self::MakeDecisionFail {
                order_approval_code,
                error,
            } => EntityMeta::fail(
                ORDER_APPROVAL_DECISIONS,
                order_approval_code.as_str(),
                error.clone(),
            ),
            Self::MakeDecisionReset {
                order_approval_code,
            } => EntityMeta::reset(ORDER_APPROVAL_DECISIONS, order_approval_code.as_str()),
        };
        Some(meta.into())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use serde_json::json;
    use storefront_core::action::envelope;
    use storefront_core::state_utils::EntityId;

    #[test]
    fn list_actions_are_keyed_by_query() {
        let params = SearchConfig {
            current_page: Some(0),
            page_size: Some(20),
            sort: Some("byDate".to_string()),
        };
        let action = OrderApprovalAction::LoadOrderApprovals {
            user_id: "current".to_string(),
            params,
        };

        let Some(ActionMeta::Entity(meta)) = action.meta() else {
            unreachable!("approval actions carry entity meta");
        };
        assert_eq!(meta.entity_type, ORDER_APPROVAL_LIST);
        assert_eq!(
            meta.entity_id,
            EntityId::One("?currentPage=0&pageSize=20&sort=byDate".to_string())
        );
    }

    #[test]
    fn multi_success_targets_every_code() {
        let action = OrderApprovalAction::LoadOrderApprovalSuccess(vec![
            OrderApproval {
                code: "0000000A".to_string(),
                ..OrderApproval::default()
            },
            OrderApproval {
                code: "0000000B".to_string(),
                ..OrderApproval::default()
            },
        ]);

        let json = serde_json::to_value(envelope(&action).unwrap()).unwrap();
        assert_eq!(json["meta"]["entityId"], json!(["0000000A", "0000000B"]));
        assert_eq!(json["meta"]["loader"], json!({"success": true}));
        assert_eq!(json["payload"][1]["code"], json!("0000000B"));
    }

    #[test]
    fn decision_serializes_screaming_case() {
        let decision = OrderApprovalDecision {
            decision: OrderApprovalDecisionValue::Reject,
            comment: Some("Over budget".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&decision).unwrap(),
            json!({"decision": "REJECT", "comment": "Over budget"})
        );
    }

    #[test]
    fn approval_parses_order_timestamp() {
        let approval: OrderApproval = serde_json::from_value(json!({
            "code": "0000000A",
            "approvalDecisionRequired": true,
            "order": {"code": "00001000", "created": "2026-03-02T10:15:00Z"}
        }))
        .unwrap();

        let created = approval.order.and_then(|order| order.created).unwrap();
        assert_eq!(created.to_rfc3339(), "2026-03-02T10:15:00+00:00");
        assert!(approval.customer_order_approval_records.is_empty());
    }
}
