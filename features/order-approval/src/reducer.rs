//! Order approval reducer and its effects.

use crate::connector::OrderApprovalConnector;
use crate::types::{
    OrderApprovalAction, OrderApprovalState, ORDER_APPROVAL_DECISIONS, ORDER_APPROVAL_ENTITIES,
    ORDER_APPROVAL_LIST,
};
use std::sync::Arc;
use std::time::Instant;
use storefront_core::action::{is_anonymous, Action as _, ActionMeta, MetaAction};
use storefront_core::effect::Effect;
use storefront_core::error::normalize_http_error;
use storefront_core::reducer::Reducer;
use storefront_core::state_utils::{normalize_list_page, EntityLoaderReducer};
use storefront_core::{async_effect, smallvec, stream_effect, SmallVec};
use storefront_runtime::metrics::{ConnectorMetrics, PreconditionMetrics};

/// Connectors order approval effects call
#[derive(Clone)]
pub struct OrderApprovalEnvironment {
    /// Approval backend
    pub approvals: Arc<dyn OrderApprovalConnector>,
}

impl OrderApprovalEnvironment {
    /// Environment over the given connector
    #[must_use]
    pub fn new(approvals: Arc<dyn OrderApprovalConnector>) -> Self {
        Self { approvals }
    }
}

/// Reducer for [`OrderApprovalState`]
#[derive(Debug, Clone, Copy)]
pub struct OrderApprovalReducer {
    entities: EntityLoaderReducer,
    list: EntityLoaderReducer,
    decisions: EntityLoaderReducer,
}

impl OrderApprovalReducer {
    /// Create the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entities: EntityLoaderReducer::new(ORDER_APPROVAL_ENTITIES),
            list: EntityLoaderReducer::new(ORDER_APPROVAL_LIST),
            decisions: EntityLoaderReducer::new(ORDER_APPROVAL_DECISIONS),
        }
    }

    fn apply_meta(&self, state: &mut OrderApprovalState, action: &OrderApprovalAction) {
        let Some(ActionMeta::Entity(meta)) = action.meta() else {
            return;
        };
        // Each reducer ignores metas of other entity types
        let applied = self
            .entities
            .reduce(&mut state.entities, &meta, action.approvals_payload())
            || self.list.reduce(&mut state.list, &meta, action.page_payload())
            || self
                .decisions
                .reduce(&mut state.decisions, &meta, action.decision_payload());
        if !applied {
            tracing::warn!(entity_type = %meta.entity_type, "No order approval state for entity type");
        }
    }
}

impl Default for OrderApprovalReducer {
    fn default() -> Self {
        Self::new()
    }
}

fn command_entity_type(action: &OrderApprovalAction) -> &'static str {
    match action {
        OrderApprovalAction::LoadOrderApprovals { .. } => ORDER_APPROVAL_LIST,
        OrderApprovalAction::MakeDecision { .. } => ORDER_APPROVAL_DECISIONS,
        _ => ORDER_APPROVAL_ENTITIES,
    }
}

impl Reducer for OrderApprovalReducer {
    type State = OrderApprovalState;
    type Action = OrderApprovalAction;
    type Environment = OrderApprovalEnvironment;

    fn reduce(
        &self,
        state: &mut OrderApprovalState,
        action: OrderApprovalAction,
        env: &OrderApprovalEnvironment,
    ) -> SmallVec<[Effect<OrderApprovalAction>; 4]> {
        if action.is_command() && action.user_id().is_some_and(is_anonymous) {
            tracing::debug!(
                action = action.action_type(),
                "Dropping order approval command for anonymous user"
            );
            PreconditionMetrics::record_dropped(command_entity_type(&action));
            return smallvec![Effect::None];
        }

        self.apply_meta(state, &action);

        match action {
            OrderApprovalAction::LoadOrderApproval {
                user_id,
                order_approval_code,
            } => {
                let connector = Arc::clone(&env.approvals);
                smallvec![async_effect! {
                    let start = Instant::now();
                    let result = connector.get(&user_id, &order_approval_code).await;
                    ConnectorMetrics::record_call("order_approval.get", result.is_ok(), start.elapsed());
                    Some(match result {
                        Ok(approval) => OrderApprovalAction::LoadOrderApprovalSuccess(vec![approval]),
                        Err(error) => OrderApprovalAction::LoadOrderApprovalFail {
                            order_approval_code,
                            error: normalize_http_error(&error),
                        },
                    })
                }]
            },

            OrderApprovalAction::LoadOrderApprovals { user_id, params } => {
                let connector = Arc::clone(&env.approvals);
                smallvec![stream_effect! {
                    let start = Instant::now();
                    let result = connector.get_list(&user_id, &params).await;
                    ConnectorMetrics::record_call("order_approval.get_list", result.is_ok(), start.elapsed());
                    match result {
                        Ok(list) => {
                            let (values, page) =
                                normalize_list_page(list, |approval| approval.code.clone())
                                    .into_ordered_parts();
                            yield OrderApprovalAction::LoadOrderApprovalSuccess(values);
                            yield OrderApprovalAction::LoadOrderApprovalsSuccess { page, params };
                        },
                        Err(error) => {
                            yield OrderApprovalAction::LoadOrderApprovalsFail {
                                params,
                                error: normalize_http_error(&error),
                            };
                        },
                    }
                }]
            },

            OrderApprovalAction::MakeDecision {
                user_id,
                order_approval_code,
                order_approval_decision,
            } => {
                let connector = Arc::clone(&env.approvals);
                smallvec![stream_effect! {
                    let start = Instant::now();
                    let result = connector
                        .make_decision(&user_id, &order_approval_code, &order_approval_decision)
                        .await;
                    ConnectorMetrics::record_call("order_approval.make_decision", result.is_ok(), start.elapsed());
                    match result {
                        Ok(stored) => {
                            yield OrderApprovalAction::MakeDecisionSuccess {
                                order_approval_code: order_approval_code.clone(),
                                order_approval_decision: stored,
                            };
                            yield OrderApprovalAction::LoadOrderApproval {
                                user_id,
                                order_approval_code,
                            };
                        },
                        Err(error) => {
                            yield OrderApprovalAction::MakeDecisionFail {
                                order_approval_code,
                                error: normalize_http_error(&error),
                            };
                        },
                    }
                }]
            },

            OrderApprovalAction::LoadOrderApprovalSuccess(_)
            | OrderApprovalAction::LoadOrderApprovalFail { .. }
            | OrderApprovalAction::LoadOrderApprovalsSuccess { .. }
            | OrderApprovalAction::LoadOrderApprovalsFail { .. }
            | OrderApprovalAction::MakeDecisionSuccess { .. }
            | OrderApprovalAction::MakeDecisionFail { .. }
            | OrderApprovalAction::MakeDecisionReset { .. } => smallvec![Effect::None],
        }
    }
}
