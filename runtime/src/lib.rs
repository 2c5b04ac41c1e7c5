//! # Storefront Runtime
//!
//! Runtime for the storefront state layer.
//!
//! This crate provides the [`Store`]: the single owner of a feature's state
//! tree. It runs the reducer for every dispatched action, executes the effects
//! the reducer returns, and feeds the actions those effects produce back into
//! the same dispatch pipeline.
//!
//! ## Core Components
//!
//! - **Store**: Owns state, serializes reducer calls, executes effects
//! - **`EffectHandle`**: Lets callers wait for an action's effects, including
//!   the effects of any actions fed back by them
//! - **`StoreConfig`**: Broadcast capacity and shutdown timeout, from the environment
//!
//! ## Example
//!
//! ```ignore
//! use storefront_runtime::Store;
//!
//! let store = Store::new(CartState::default(), CartReducer::new(), environment);
//!
//! let mut handle = store.send(CartAction::AddEntry { .. }).await?;
//! handle.wait().await;
//!
//! let busy = store.state(|s| has_pending_processes(&s.carts, "cart-1")).await;
//! ```

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use storefront_core::{effect::Effect, reducer::Reducer};
use tokio::sync::{watch, RwLock};

/// Prometheus metrics for observability
pub mod metrics;

use metrics::StoreMetrics;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and no longer accepts actions
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Graceful shutdown timed out with effects still running
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// Timed out waiting for effects or a matching action
        #[error("Timed out waiting for store activity")]
        Timeout,

        /// The action broadcast channel was closed
        #[error("Action broadcast channel closed")]
        ChannelClosed,
    }
}

pub use error::StoreError;

/// Environment variable for the action broadcast capacity
pub const BROADCAST_CAPACITY_VAR: &str = "STOREFRONT_BROADCAST_CAPACITY";

/// Environment variable for the default shutdown timeout, in seconds
pub const SHUTDOWN_TIMEOUT_VAR: &str = "STOREFRONT_SHUTDOWN_TIMEOUT_SECS";

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use storefront_runtime::StoreConfig;
///
/// let config = StoreConfig::default()
///     .with_broadcast_capacity(256)
///     .with_shutdown_timeout(Duration::from_secs(5));
/// assert_eq!(config.broadcast_capacity, 256);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Capacity of the channel broadcasting effect-produced actions
    pub broadcast_capacity: usize,
    /// Default timeout for graceful shutdown
    pub default_shutdown_timeout: Duration,
}

impl StoreConfig {
    /// Load configuration from the process environment.
    ///
    /// Reads [`BROADCAST_CAPACITY_VAR`] and [`SHUTDOWN_TIMEOUT_VAR`]; missing
    /// or unparsable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through a variable lookup function.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let broadcast_capacity = lookup(BROADCAST_CAPACITY_VAR)
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|capacity| *capacity > 0)
            .unwrap_or(defaults.broadcast_capacity);

        let default_shutdown_timeout = lookup(SHUTDOWN_TIMEOUT_VAR)
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map_or(defaults.default_shutdown_timeout, Duration::from_secs);

        Self {
            broadcast_capacity,
            default_shutdown_timeout,
        }
    }

    /// Set the action broadcast capacity (minimum 1)
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = if capacity == 0 { 1 } else { capacity };
        self
    }

    /// Set the default shutdown timeout
    #[must_use]
    pub const fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.default_shutdown_timeout = timeout;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            broadcast_capacity: 64,
            default_shutdown_timeout: Duration::from_secs(30),
        }
    }
}

/// Handle for tracking effect completion
///
/// Returned by [`Store::send()`] to allow waiting for effects to complete.
/// Effects that feed an action back into the store register that action's
/// handle as a child, so waiting covers the whole chain: a command, its
/// connector call, the terminal action and any follow-up reload.
///
/// # Example
///
/// ```ignore
/// let mut handle = store.send(CartAction::AddEntry { .. }).await?;
/// handle.wait_with_timeout(Duration::from_secs(5)).await?;
/// // The connector call, AddEntrySuccess and the chained LoadCart are done
/// ```
#[derive(Clone)]
pub struct EffectHandle {
    effects: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
    children: Arc<Mutex<Vec<EffectHandle>>>,
}

impl EffectHandle {
    /// Create a new effect handle and the tracking context that feeds it
    fn new() -> (Self, EffectTracking) {
        let counter = Arc::new(AtomicUsize::new(0));
        let children = Arc::new(Mutex::new(Vec::new()));
        let (tx, rx) = watch::channel(());

        let handle = Self {
            effects: Arc::clone(&counter),
            completion: rx,
            children: Arc::clone(&children),
        };

        let tracking = EffectTracking {
            counter,
            notifier: tx,
            children,
        };

        (handle, tracking)
    }

    /// Create a handle that's already complete
    ///
    /// Useful for initialization in loops where you need a `last_handle`.
    #[must_use]
    pub fn completed() -> Self {
        let (handle, _tracking) = Self::new();
        handle
    }

    /// Number of effects of this action still running
    #[must_use]
    pub fn pending(&self) -> usize {
        self.effects.load(Ordering::SeqCst)
    }

    /// Wait for all effects to complete, including fed-back actions' effects
    pub async fn wait(&mut self) {
        while self.effects.load(Ordering::SeqCst) > 0 {
            if self.completion.changed().await.is_err() {
                break;
            }
        }

        loop {
            let handles = {
                let mut guard = self
                    .children
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                if guard.is_empty() {
                    break;
                }
                guard.drain(..).collect::<Vec<_>>()
            };

            for mut handle in handles {
                Box::pin(handle.wait()).await;
            }
        }
    }

    /// Wait for all effects to complete with a timeout
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the timeout expires before all
    /// effects complete.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending_effects", &self.effects.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Internal: effect tracking context passed through effect execution
#[derive(Clone)]
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: watch::Sender<()>,
    children: Arc<Mutex<Vec<EffectHandle>>>,
}

impl EffectTracking {
    /// Effect started
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    /// Effect completed
    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            let _ = self.notifier.send(());
        }
    }

    /// Register the handle of an action fed back by one of our effects
    fn adopt(&self, child: EffectHandle) {
        self.children
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(child);
    }
}

/// Internal: RAII guard that decrements the effect counter on drop
///
/// Ensures the effect counter is always decremented, even if the effect panics.
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Guard that decrements the store-wide pending counter on drop (for shutdown tracking)
struct AtomicCounterGuard(Arc<AtomicUsize>);

impl Drop for AtomicCounterGuard {
    fn drop(&mut self) {
        let previous = self.0.fetch_sub(1, Ordering::SeqCst);
        StoreMetrics::record_pending(previous.saturating_sub(1));
    }
}

/// Store runtime for coordinating reducer execution and effect handling.
pub mod store {
    use super::{
        Arc, AtomicBool, AtomicCounterGuard, AtomicUsize, DecrementGuard, Duration, Effect,
        EffectHandle, EffectTracking, Ordering, Reducer, RwLock, StoreConfig, StoreError,
        StoreMetrics,
    };
    use futures::StreamExt;
    use std::future::Future;
    use tokio::sync::broadcast;

    /// The Store - single owning dispatcher for a feature's state
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`; reducers run one at a time under the write lock)
    /// 2. Reducer (transition logic)
    /// 3. Environment (injected connectors)
    /// 4. Effect execution (with feedback loop)
    ///
    /// State is never mutated by callers directly: every change goes through
    /// [`Store::send`].
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        config: StoreConfig,
        shutdown: Arc<AtomicBool>,
        pending_effects: Arc<AtomicUsize>,
        /// Every action produced by an effect is broadcast here before it is
        /// dispatched.
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + 'static,
        E: Clone + Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default()`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new store with a custom configuration
        #[must_use]
        pub fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            let (action_broadcast, _) = broadcast::channel(config.broadcast_capacity.max(1));

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                config,
                shutdown: Arc::new(AtomicBool::new(false)),
                pending_effects: Arc::new(AtomicUsize::new(0)),
                action_broadcast,
            }
        }

        /// The configuration this store was built with
        #[must_use]
        pub const fn config(&self) -> &StoreConfig {
            &self.config
        }

        /// Number of effects currently running across the whole store
        #[must_use]
        pub fn pending_effects(&self) -> usize {
            self.pending_effects.load(Ordering::Acquire)
        }

        /// Initiate graceful shutdown
        ///
        /// New actions are rejected from now on; running effects are given
        /// `timeout` to finish. Actions they produce after this point are
        /// dropped with a warning.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if the timeout expires before all
        /// pending effects complete.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            tracing::info!("Initiating graceful shutdown");

            self.shutdown.store(true, Ordering::Release);

            let start = std::time::Instant::now();
            let poll_interval = Duration::from_millis(10);

            loop {
                let pending = self.pending_effects.load(Ordering::Acquire);

                if pending == 0 {
                    tracing::info!("All effects completed, shutdown successful");
                    return Ok(());
                }

                if start.elapsed() >= timeout {
                    tracing::error!(pending_effects = pending, "Shutdown timed out");
                    StoreMetrics::record_shutdown_timeout();
                    return Err(StoreError::ShutdownTimeout(pending));
                }

                tracing::debug!(
                    pending_effects = pending,
                    elapsed_ms = start.elapsed().as_millis(),
                    "Waiting for effects to complete"
                );

                tokio::time::sleep(poll_interval).await;
            }
        }

        /// Graceful shutdown using the configured default timeout
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if effects are still running
        /// when the configured timeout expires.
        pub async fn shutdown_gracefully(&self) -> Result<(), StoreError> {
            self.shutdown(self.config.default_shutdown_timeout).await
        }

        /// Send an action to the store
        ///
        /// 1. Acquires the write lock on state
        /// 2. Calls the reducer with (state, action, environment)
        /// 3. Starts the returned effects in spawned tasks
        /// 4. Effects may produce more actions (feedback loop)
        ///
        /// Actions are applied in the order `send` acquires the lock. `send`
        /// returns once the reducer has run and effects have started, not when
        /// they complete; use the returned [`EffectHandle`] to wait.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                StoreMetrics::record_rejected();
                return Err(StoreError::ShutdownInProgress);
            }

            let (handle, tracking) = EffectHandle::new();

            let effects = {
                let mut state = self.state.write().await;
                tracing::trace!("Acquired write lock on state");

                let start = std::time::Instant::now();
                let effects = self.reducer.reduce(&mut *state, action, &self.environment);
                StoreMetrics::record_action(start.elapsed(), effects.len());

                effects
            };

            tracing::trace!("Executing {} effects", effects.len());
            for effect in effects {
                self.execute_effect(effect, &tracking);
            }

            Ok(handle)
        }

        /// Send an action and wait for a matching action produced by its effects
        ///
        /// Subscribes to the action broadcast before sending, so the result
        /// cannot be missed.
        ///
        /// # Errors
        ///
        /// - [`StoreError::Timeout`]: Timeout expired before a matching action arrived
        /// - [`StoreError::ChannelClosed`]: Action broadcast channel closed
        /// - [`StoreError::ShutdownInProgress`]: Store is shutting down
        ///
        /// # Example
        ///
        /// ```ignore
        /// let result = store.send_and_wait_for(
        ///     CartAction::AddEntry { .. },
        ///     |a| matches!(a, CartAction::AddEntrySuccess { .. } | CartAction::AddEntryFail { .. }),
        ///     Duration::from_secs(10),
        /// ).await?;
        /// ```
        pub async fn send_and_wait_for<F>(
            &self,
            action: A,
            predicate: F,
            timeout: Duration,
        ) -> Result<A, StoreError>
        where
            F: Fn(&A) -> bool,
        {
            let mut rx = self.action_broadcast.subscribe();

            self.send(action).await?;

            tokio::time::timeout(timeout, async {
                loop {
                    match rx.recv().await {
                        Ok(action) if predicate(&action) => return Ok(action),
                        Ok(_) => {},
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "Action observer lagged");
                        },
                        Err(broadcast::error::RecvError::Closed) => {
                            return Err(StoreError::ChannelClosed);
                        },
                    }
                }
            })
            .await
            .map_err(|_| StoreError::Timeout)?
        }

        /// Subscribe to every action produced by effects
        ///
        /// Actions sent directly through [`Store::send`] are not broadcast.
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let busy = store.state(|s| has_pending_processes(&s.carts, "cart-1")).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Broadcast an effect-produced action and dispatch it, adopting its handle
        async fn feed_back(&self, action: A, tracking: &EffectTracking) {
            let _ = self.action_broadcast.send(action.clone());

            match self.send(action).await {
                Ok(child) => tracking.adopt(child),
                Err(error) => {
                    tracing::warn!(%error, "Dropped action produced by effect");
                },
            }
        }

        /// Spawn an effect task that counts towards the handle and shutdown
        fn spawn_tracked<F>(&self, tracking: &EffectTracking, task: F)
        where
            F: Future<Output = ()> + Send + 'static,
        {
            tracking.increment();

            let pending = self.pending_effects.fetch_add(1, Ordering::SeqCst) + 1;
            StoreMetrics::record_pending(pending);
            let pending_guard = AtomicCounterGuard(Arc::clone(&self.pending_effects));
            let guard = DecrementGuard(tracking.clone());

            tokio::spawn(async move {
                let _guard = guard;
                let _pending_guard = pending_guard;
                task.await;
            });
        }

        /// Execute an effect with tracking
        ///
        /// Effect tasks that panic are isolated in their spawned task; the
        /// guards still release the handle and the shutdown counter.
        fn execute_effect(&self, effect: Effect<A>, tracking: &EffectTracking) {
            match effect {
                Effect::None => {
                    StoreMetrics::record_effect("none");
                },
                Effect::Parallel(effects) => {
                    tracing::trace!("Executing Effect::Parallel with {} effects", effects.len());
                    StoreMetrics::record_effect("parallel");
                    for effect in effects {
                        self.execute_effect(effect, tracking);
                    }
                },
                Effect::Future(fut) => {
                    tracing::trace!("Executing Effect::Future");
                    StoreMetrics::record_effect("future");

                    let store = self.clone();
                    let task_tracking = tracking.clone();
                    self.spawn_tracked(tracking, async move {
                        if let Some(action) = fut.await {
                            tracing::trace!("Effect::Future produced an action");
                            store.feed_back(action, &task_tracking).await;
                        } else {
                            tracing::trace!("Effect::Future completed with no action");
                        }
                    });
                },
                Effect::Stream(mut stream) => {
                    tracing::trace!("Executing Effect::Stream");
                    StoreMetrics::record_effect("stream");

                    let store = self.clone();
                    let task_tracking = tracking.clone();
                    self.spawn_tracked(tracking, async move {
                        while let Some(action) = stream.next().await {
                            store.feed_back(action, &task_tracking).await;
                        }
                        tracing::trace!("Effect::Stream completed");
                    });
                },
            }
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
                config: self.config.clone(),
                shutdown: Arc::clone(&self.shutdown),
                pending_effects: Arc::clone(&self.pending_effects),
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }
}

// Re-export for convenience
pub use store::Store;
