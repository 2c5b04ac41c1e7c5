//! Reducer composition utilities
//!
//! - **`combine_reducers`**: run several reducers on the same state and action
//! - **`scope_reducer`**: run a reducer on one field of a larger state
//!
//! Feature crates use these to assemble a slice from smaller reducers, e.g.
//! the search result loaders and the product cache in product search.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use storefront_core::composition::{combine_reducers, SharedReducer};
//! use storefront_core::{smallvec, Effect, Reducer, SmallVec};
//!
//! #[derive(Default)]
//! struct BadgeState {
//!     unread: u32,
//!     seen: u32,
//! }
//!
//! #[derive(Clone)]
//! enum BadgeAction {
//!     Notify,
//!     Open,
//! }
//!
//! struct UnreadReducer;
//! struct SeenReducer;
//!
//! impl Reducer for UnreadReducer {
//!     type State = BadgeState;
//!     type Action = BadgeAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut BadgeState, action: BadgeAction, _env: &()) -> SmallVec<[Effect<BadgeAction>; 4]> {
//!         if matches!(action, BadgeAction::Notify) {
//!             state.unread += 1;
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! impl Reducer for SeenReducer {
//!     type State = BadgeState;
//!     type Action = BadgeAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut BadgeState, action: BadgeAction, _env: &()) -> SmallVec<[Effect<BadgeAction>; 4]> {
//!         if matches!(action, BadgeAction::Open) {
//!             state.seen += state.unread;
//!             state.unread = 0;
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let reducers: Vec<SharedReducer<BadgeState, BadgeAction, ()>> =
//!     vec![Arc::new(UnreadReducer), Arc::new(SeenReducer)];
//! let combined = combine_reducers(reducers);
//! let mut state = BadgeState::default();
//! let _ = combined.reduce(&mut state, BadgeAction::Notify, &());
//! let _ = combined.reduce(&mut state, BadgeAction::Open, &());
//! assert_eq!((state.unread, state.seen), (0, 1));
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;
use std::sync::Arc;

/// A shareable reducer over `S`, `A`, `E`
pub type SharedReducer<S, A, E> = Arc<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>;

/// Combines reducers that operate on the same state and action types.
///
/// Each reducer runs in order on a clone of the action; the effects of all
/// of them are concatenated, `Effect::None` dropped.
#[must_use]
pub fn combine_reducers<S, A, E>(reducers: Vec<SharedReducer<S, A, E>>) -> CombinedReducer<S, A, E>
where
    A: Clone,
{
    CombinedReducer { reducers }
}

/// Reducers run in sequence. Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E> {
    reducers: Vec<SharedReducer<S, A, E>>,
}

impl<S, A, E> Clone for CombinedReducer<S, A, E> {
    fn clone(&self) -> Self {
        Self {
            reducers: self.reducers.clone(),
        }
    }
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    A: Clone,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut all_effects = SmallVec::new();

        for reducer in &self.reducers {
            all_effects.extend(
                reducer
                    .reduce(state, action.clone(), env)
                    .into_iter()
                    .filter(|effect| !effect.is_none()),
            );
        }

        if all_effects.is_empty() {
            all_effects.push(Effect::None);
        }
        all_effects
    }
}

/// Scopes a reducer to one field of a larger state.
///
/// `field` borrows the sub-state out of the parent, so the child reducer
/// mutates it in place.
pub fn scope_reducer<S, R>(reducer: R, field: fn(&mut S) -> &mut R::State) -> ScopedReducer<S, R>
where
    R: Reducer,
{
    ScopedReducer { reducer, field }
}

/// A reducer lifted onto a parent state. Created by [`scope_reducer`].
pub struct ScopedReducer<S, R: Reducer> {
    reducer: R,
    field: fn(&mut S) -> &mut R::State,
}

impl<S, R> Clone for ScopedReducer<S, R>
where
    R: Reducer + Clone,
{
    fn clone(&self) -> Self {
        Self {
            reducer: self.reducer.clone(),
            field: self.field,
        }
    }
}

impl<S, R> Reducer for ScopedReducer<S, R>
where
    R: Reducer,
{
    type State = S;
    type Action = R::Action;
    type Environment = R::Environment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        self.reducer.reduce((self.field)(state), action, env)
    }
}
