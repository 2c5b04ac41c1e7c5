//! Cart reducer and its effects.

use crate::connector::{CartConnector, CartEntryConnector};
use crate::types::{CartAction, CartState, MULTI_CART_DATA};
use std::sync::Arc;
use std::time::Instant;
use storefront_core::action::{is_anonymous, Action as _, ActionMeta, MetaAction};
use storefront_core::effect::Effect;
use storefront_core::error::normalize_http_error;
use storefront_core::reducer::Reducer;
use storefront_core::state_utils::selectors::{get_generation, has_pending_processes};
use storefront_core::state_utils::EntityLoaderReducer;
use storefront_core::{async_effect, smallvec, SmallVec};
use storefront_runtime::metrics::{ConnectorMetrics, PreconditionMetrics};

/// Connectors cart effects call
#[derive(Clone)]
pub struct CartEnvironment {
    /// Cart loading
    pub carts: Arc<dyn CartConnector>,
    /// Cart line commands
    pub entries: Arc<dyn CartEntryConnector>,
}

impl CartEnvironment {
    /// Environment over the given connectors
    #[must_use]
    pub fn new(carts: Arc<dyn CartConnector>, entries: Arc<dyn CartEntryConnector>) -> Self {
        Self { carts, entries }
    }
}

/// Reducer for [`CartState`]
///
/// Entry commands are counted per cart. When the last one of a burst
/// finishes the cart is reloaded once, even if a load is already running.
/// Results of commands that a reset discarded never trigger a reload.
#[derive(Debug, Clone, Copy)]
pub struct CartReducer {
    carts: EntityLoaderReducer,
}

impl CartReducer {
    /// Create the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            carts: EntityLoaderReducer::new(MULTI_CART_DATA),
        }
    }

    fn reload_when_stable(
        state: &CartState,
        user_id: String,
        cart_id: String,
        generation: Option<u64>,
    ) -> SmallVec<[Effect<CartAction>; 4]> {
        if generation.is_some_and(|generation| generation != get_generation(&state.carts, &cart_id)) {
            return smallvec![Effect::None];
        }
        // A load already running may have started before this command
        // finished, so it does not replace the reload.
        if has_pending_processes(&state.carts, &cart_id) {
            tracing::trace!(cart_id = %cart_id, "Cart still busy, deferring reload");
            return smallvec![Effect::None];
        }
        smallvec![async_effect! {
            Some(CartAction::LoadCart { user_id, cart_id })
        }]
    }
}

impl Default for CartReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for CartReducer {
    type State = CartState;
    type Action = CartAction;
    type Environment = CartEnvironment;

    #[allow(clippy::too_many_lines)]
    fn reduce(
        &self,
        state: &mut CartState,
        action: CartAction,
        env: &CartEnvironment,
    ) -> SmallVec<[Effect<CartAction>; 4]> {
        if action.is_command() && action.user_id().is_some_and(is_anonymous) {
            tracing::debug!(
                action = action.action_type(),
                cart_id = action.cart_id(),
                "Dropping cart command for anonymous user"
            );
            PreconditionMetrics::record_dropped(MULTI_CART_DATA);
            return smallvec![Effect::None];
        }

        if let Some(ActionMeta::Entity(meta)) = action.meta() {
            self.carts.reduce(&mut state.carts, &meta, action.cart_payload());
        }

        match action {
            CartAction::LoadCart { user_id, cart_id } => {
                let generation = Some(get_generation(&state.carts, &cart_id));
                let connector = Arc::clone(&env.carts);
                smallvec![async_effect! {
                    let start = Instant::now();
                    let result = connector.load(&user_id, &cart_id).await;
                    ConnectorMetrics::record_call("cart.load", result.is_ok(), start.elapsed());
                    Some(match result {
                        Ok(cart) => CartAction::LoadCartSuccess { user_id, cart_id, cart, generation },
                        Err(error) => CartAction::LoadCartFail {
                            user_id,
                            cart_id,
                            error: normalize_http_error(&error),
                            generation,
                        },
                    })
                }]
            },

            CartAction::AddEntry {
                user_id,
                cart_id,
                product_code,
                quantity,
                pickup_store,
            } => {
                let generation = Some(get_generation(&state.carts, &cart_id));
                let connector = Arc::clone(&env.entries);
                smallvec![async_effect! {
                    let start = Instant::now();
                    let result = connector
                        .add(&user_id, &cart_id, &product_code, quantity, pickup_store.as_deref())
                        .await;
                    ConnectorMetrics::record_call("cart.add_entry", result.is_ok(), start.elapsed());
                    Some(match result {
                        Ok(modification) => CartAction::AddEntrySuccess {
                            user_id,
                            cart_id,
                            product_code,
                            quantity,
                            modification,
                            generation,
                        },
                        Err(error) => CartAction::AddEntryFail {
                            user_id,
                            cart_id,
                            product_code,
                            quantity,
                            error: normalize_http_error(&error),
                            generation,
                        },
                    })
                }]
            },

            CartAction::RemoveEntry {
                user_id,
                cart_id,
                entry_number,
            } => {
                let generation = Some(get_generation(&state.carts, &cart_id));
                let connector = Arc::clone(&env.entries);
                smallvec![async_effect! {
                    let start = Instant::now();
                    let result = connector.remove(&user_id, &cart_id, &entry_number).await;
                    ConnectorMetrics::record_call("cart.remove_entry", result.is_ok(), start.elapsed());
                    Some(match result {
                        Ok(()) => CartAction::RemoveEntrySuccess {
                            user_id,
                            cart_id,
                            entry_number,
                            generation,
                        },
                        Err(error) => CartAction::RemoveEntryFail {
                            user_id,
                            cart_id,
                            entry_number,
                            error: normalize_http_error(&error),
                            generation,
                        },
                    })
                }]
            },

            CartAction::UpdateEntry {
                user_id,
                cart_id,
                entry_number,
                quantity,
                pickup_store,
            } => {
                let generation = Some(get_generation(&state.carts, &cart_id));
                let connector = Arc::clone(&env.entries);
                smallvec![async_effect! {
                    let start = Instant::now();
                    let result = connector
                        .update(&user_id, &cart_id, &entry_number, quantity, pickup_store.as_deref())
                        .await;
                    ConnectorMetrics::record_call("cart.update_entry", result.is_ok(), start.elapsed());
                    Some(match result {
                        Ok(modification) => CartAction::UpdateEntrySuccess {
                            user_id,
                            cart_id,
                            entry_number,
                            modification,
                            generation,
                        },
                        Err(error) => CartAction::UpdateEntryFail {
                            user_id,
                            cart_id,
                            entry_number,
                            error: normalize_http_error(&error),
                            generation,
                        },
                    })
                }]
            },

            CartAction::AddEntrySuccess {
                user_id,
                cart_id,
                generation,
                ..
            }
            | CartAction::AddEntryFail {
                user_id,
                cart_id,
                generation,
                ..
            }
            | CartAction::RemoveEntrySuccess {
                user_id,
                cart_id,
                generation,
                ..
            }
            | CartAction::RemoveEntryFail {
                user_id,
                cart_id,
                generation,
                ..
            }
            | CartAction::UpdateEntrySuccess {
                user_id,
                cart_id,
                generation,
                ..
            }
            | CartAction::UpdateEntryFail {
                user_id,
                cart_id,
                generation,
                ..
            } => Self::reload_when_stable(state, user_id, cart_id, generation),

            _ => smallvec![Effect::None],
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use crate::types::{Cart, CartModification};
    use storefront_core::error::{ConnectorError, ConnectorFuture, HttpErrorModel};
    use storefront_core::state_utils::selectors::{get_loading, get_processes_count, get_value};
    use storefront_testing::{assertions, effect_actions, ReducerTest};

    struct FixedBackend;

    impl CartConnector for FixedBackend {
        fn load(&self, _user_id: &str, cart_id: &str) -> ConnectorFuture<Cart> {
            let cart = Cart {
                code: cart_id.to_string(),
                ..Cart::default()
            };
            Box::pin(async move { Ok(cart) })
        }
    }

    impl CartEntryConnector for FixedBackend {
        fn add(
            &self,
            _user_id: &str,
            _cart_id: &str,
            _product_code: &str,
            quantity: u32,
            _pickup_store: Option<&str>,
        ) -> ConnectorFuture<CartModification> {
            Box::pin(async move {
                Ok(CartModification {
                    quantity_added: Some(quantity),
                    ..CartModification::default()
                })
            })
        }

        fn remove(&self, _user_id: &str, _cart_id: &str, _entry_number: &str) -> ConnectorFuture<()> {
            Box::pin(async { Err(ConnectorError::http(404, "Entry not found")) })
        }

        fn update(
            &self,
            _user_id: &str,
            _cart_id: &str,
            _entry_number: &str,
            _quantity: Option<u32>,
            _pickup_store: Option<&str>,
        ) -> ConnectorFuture<CartModification> {
            Box::pin(async { Ok(CartModification::default()) })
        }
    }

    fn env() -> CartEnvironment {
        CartEnvironment::new(Arc::new(FixedBackend), Arc::new(FixedBackend))
    }

    fn add_entry(user_id: &str) -> CartAction {
        CartAction::AddEntry {
            user_id: user_id.to_string(),
            cart_id: "c1".to_string(),
            product_code: "300938".to_string(),
            quantity: 1,
            pickup_store: None,
        }
    }

    fn add_success(generation: u64) -> CartAction {
        CartAction::AddEntrySuccess {
            user_id: "current".to_string(),
            cart_id: "c1".to_string(),
            product_code: "300938".to_string(),
            quantity: 1,
            modification: CartModification::default(),
            generation: Some(generation),
        }
    }

    #[test]
    fn anonymous_command_changes_nothing() {
        ReducerTest::new(CartReducer::new())
            .with_env(env())
            .given_state(CartState::default())
            .when_action(add_entry("anonymous"))
            .then_state(|state| assert!(state.carts.is_empty()))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn add_entry_counts_and_calls_connector() {
        ReducerTest::new(CartReducer::new())
            .with_env(env())
            .given_state(CartState::default())
            .when_action(add_entry("current"))
            .then_state(|state| {
                assert_eq!(get_processes_count(&state.carts, "c1"), 1);
                assert!(!get_loading(&state.carts, "c1"));
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn overlapping_commands_reload_once() {
        ReducerTest::new(CartReducer::new())
            .with_env(env())
            .given_state(CartState::default())
            .when_action(add_entry("current"))
            .when_action(add_entry("current"))
            .when_action(add_success(0))
            .then_state(|state| assert_eq!(get_processes_count(&state.carts, "c1"), 1))
            .then_effects(assertions::assert_no_effects)
            .run();

        ReducerTest::new(CartReducer::new())
            .with_env(env())
            .given_state(CartState::default())
            .when_action(add_entry("current"))
            .when_action(add_entry("current"))
            .when_action(add_success(0))
            .when_action(add_success(0))
            .then_state(|state| assert_eq!(get_processes_count(&state.carts, "c1"), 0))
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn success_after_reset_is_ignored() {
        let reducer = CartReducer::new();
        let env = env();
        let mut state = CartState::default();

        reducer.reduce(&mut state, add_entry("current"), &env);
        reducer.reduce(
            &mut state,
            CartAction::ResetCart {
                cart_id: "c1".to_string(),
            },
            &env,
        );
        reducer.reduce(&mut state, add_entry("current"), &env);
        reducer.reduce(&mut state, add_success(0), &env);

        // The stale success must not finish the command started after the reset
        assert_eq!(get_processes_count(&state.carts, "c1"), 1);
        assert_eq!(get_generation(&state.carts, "c1"), 1);
    }

    #[tokio::test]
    async fn load_running_when_last_command_finishes_still_reloads() {
        let reducer = CartReducer::new();
        let env = env();
        let mut state = CartState::default();
        let load = CartAction::LoadCart {
            user_id: "current".to_string(),
            cart_id: "c1".to_string(),
        };

        reducer.reduce(&mut state, add_entry("current"), &env);
        reducer.reduce(&mut state, load.clone(), &env);
        assert!(get_loading(&state.carts, "c1"));

        let effects = reducer.reduce(&mut state, add_success(0), &env);
        assert_eq!(get_processes_count(&state.carts, "c1"), 0);
        assert_eq!(effect_actions(effects).await, vec![load]);

        // The earlier load finishing does not reload again
        let effects = reducer.reduce(
            &mut state,
            CartAction::LoadCartSuccess {
                user_id: "current".to_string(),
                cart_id: "c1".to_string(),
                cart: Cart {
                    code: "c1".to_string(),
                    ..Cart::default()
                },
                generation: Some(0),
            },
            &env,
        );
        assertions::assert_no_effects(&effects);
    }

    #[tokio::test]
    async fn load_effect_produces_tagged_success() {
        let reducer = CartReducer::new();
        let env = env();
        let mut state = CartState::default();

        let effects = reducer.reduce(
            &mut state,
            CartAction::LoadCart {
                user_id: "current".to_string(),
                cart_id: "c1".to_string(),
            },
            &env,
        );
        assert!(get_loading(&state.carts, "c1"));

        let actions = effect_actions(effects).await;
        assert!(matches!(
            actions.as_slice(),
            [CartAction::LoadCartSuccess { generation: Some(0), .. }]
        ));

        for action in actions {
            reducer.reduce(&mut state, action, &env);
        }
        assert_eq!(get_value(&state.carts, "c1").map(|cart| cart.code.as_str()), Some("c1"));
    }

    #[tokio::test]
    async fn failed_remove_still_finishes_the_command() {
        let reducer = CartReducer::new();
        let env = env();
        let mut state = CartState::default();

        let effects = reducer.reduce(
            &mut state,
            CartAction::RemoveEntry {
                user_id: "current".to_string(),
                cart_id: "c1".to_string(),
                entry_number: "7".to_string(),
            },
            &env,
        );
        let actions = effect_actions(effects).await;
        let [CartAction::RemoveEntryFail { error, .. }] = actions.as_slice() else {
            panic!("expected a single remove failure, got {actions:?}");
        };
        assert_eq!(error, &HttpErrorModel {
            status: Some(404),
            message: Some("Entry not found".to_string()),
            ..HttpErrorModel::default()
        });

        for action in actions {
            let effects = reducer.reduce(&mut state, action, &env);
            let reload = effect_actions(effects).await;
            assert!(matches!(reload.as_slice(), [CartAction::LoadCart { .. }]));
        }
        assert_eq!(get_processes_count(&state.carts, "c1"), 0);
    }
}
