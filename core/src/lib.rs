//! # Storefront Core
//!
//! Core traits and state utilities for the storefront state layer.
//!
//! This crate provides the abstractions every storefront feature is built from:
//! a reducer that applies actions to a normalized state tree, effect values that
//! describe connector calls, and the generic entity state machinery that tracks
//! remote resources per id.
//!
//! ## Core Concepts
//!
//! - **State**: Normalized feature state (entity maps of loader sub-states)
//! - **Action**: Closed enum of commands and events per feature
//! - **Reducer**: `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Description of a connector call that feeds actions back
//! - **Environment**: Injected connectors and configuration
//!
//! ## State Utilities
//!
//! - [`state_utils::loader`]: load/success/fail/reset for a named entity type
//! - [`state_utils::processes`]: per-id counters of in-flight commands
//! - [`state_utils::entity`]: id-keyed collections and the generic entity reducer
//! - [`state_utils::normalize`]: paged list normalization
//! - [`state_utils::selectors`]: total read projections over entity state
//!
//! ## Example
//!
//! ```ignore
//! use storefront_core::*;
//!
//! impl Reducer for CartReducer {
//!     type State = CartState;
//!     type Action = CartAction;
//!     type Environment = CartEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CartState,
//!         action: CartAction,
//!         env: &CartEnvironment,
//!     ) -> SmallVec<[Effect<CartAction>; 4]> {
//!         if let Some(meta) = action.meta() {
//!             self.carts.reduce(&mut state.carts, &meta, action.cart_payload());
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{smallvec, SmallVec};

#[doc(hidden)]
pub use async_stream;

pub mod action;
pub mod composition;
pub mod config;
pub mod effect_macros;
pub mod error;
pub mod state_utils;

/// Reducer module - The core trait for state transitions
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They hold all transition logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for state transitions
    ///
    /// # Type Parameters
    ///
    /// - `State`: The normalized state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected connectors this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for CurrencyReducer {
    ///     type State = CurrenciesState;
    ///     type Action = CurrencyAction;
    ///     type Environment = SiteContextEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut CurrenciesState,
    ///         action: CurrencyAction,
    ///         env: &SiteContextEnvironment,
    ///     ) -> SmallVec<[Effect<CurrencyAction>; 4]> {
    ///         match action {
    ///             CurrencyAction::LoadCurrencies => {
    ///                 // Apply the LOAD transition, return the connector call
    ///                 smallvec![Effect::None]
    ///             }
    ///             _ => smallvec![Effect::None],
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Checks the action's preconditions
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// Reducers never fail: an action that does not apply leaves state
        /// unchanged.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution), returned from reducers and executed by the Store.
pub mod effect {
    use futures::Stream;
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes a side effect to be executed
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),

        /// Async computation producing several actions in order
        ///
        /// Each yielded action is fed back into the reducer before the next one
        /// is pulled from the stream.
        Stream(Pin<Box<dyn Stream<Item = Action> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
                Effect::Stream(_) => write!(f, "Effect::Stream(<stream>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run in parallel
        ///
        /// `None` effects are dropped; a single remaining effect is returned as is.
        #[must_use]
        pub fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            let mut effects: Vec<_> = effects
                .into_iter()
                .filter(|effect| !matches!(effect, Effect::None))
                .collect();
            match effects.len() {
                0 => Effect::None,
                1 => effects.pop().unwrap_or(Effect::None),
                _ => Effect::Parallel(effects),
            }
        }

        /// Whether this effect does nothing
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }
    }
}

pub use effect::Effect;
pub use reducer::Reducer;

#[cfg(test)]
mod tests {
    use super::effect::Effect;

    #[test]
    fn merge_drops_none_and_unwraps_single_effect() {
        let merged: Effect<u8> = Effect::merge(vec![
            Effect::None,
            Effect::Future(Box::pin(async { Some(1) })),
        ]);
        assert!(matches!(merged, Effect::Future(_)));

        let empty: Effect<u8> = Effect::merge(vec![Effect::None, Effect::None]);
        assert!(empty.is_none());
    }

    #[test]
    fn merge_keeps_several_effects_parallel() {
        let merged: Effect<u8> = Effect::merge(vec![
            Effect::Future(Box::pin(async { Some(1) })),
            Effect::Future(Box::pin(async { Some(2) })),
        ]);
        assert!(matches!(merged, Effect::Parallel(ref effects) if effects.len() == 2));
    }
}
