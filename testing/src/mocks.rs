//! Mock building blocks for connector fakes.
//!
//! Feature tests implement their connector traits over these: a
//! [`ConnectorGate`] holds a call until the test releases it, so completion
//! order can be chosen independently of dispatch order, and a [`CallLog`]
//! records which calls actually reached the connector.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;

/// Keyed latches that hold connector calls until opened
///
/// Gates start closed. Opening a gate releases current and future waiters
/// on that key; gates never close again.
///
/// # Example
///
/// ```
/// use storefront_testing::mocks::ConnectorGate;
///
/// # tokio_test::block_on(async {
/// let gate = ConnectorGate::new();
/// gate.open("add-entry");
/// gate.wait("add-entry").await;
/// assert!(gate.is_open("add-entry"));
/// assert!(!gate.is_open("remove-entry"));
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConnectorGate {
    gates: Arc<Mutex<HashMap<String, Arc<watch::Sender<bool>>>>>,
}

impl ConnectorGate {
    /// Create a set of closed gates
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn sender(&self, key: &str) -> Arc<watch::Sender<bool>> {
        let mut gates = self.gates.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            gates
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(watch::channel(false).0)),
        )
    }

    /// Wait until the gate for `key` is open
    pub async fn wait(&self, key: &str) {
        let mut receiver = self.sender(key).subscribe();
        // The sender lives in the map, so the channel cannot close.
        let _ = receiver.wait_for(|open| *open).await;
    }

    /// Open the gate for `key`
    pub fn open(&self, key: &str) {
        self.sender(key).send_replace(true);
    }

    /// Whether the gate for `key` is open
    #[must_use]
    pub fn is_open(&self, key: &str) -> bool {
        *self.sender(key).borrow()
    }
}

/// Ordered record of connector calls
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Create an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a call
    pub fn record(&self, call: impl Into<String>) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call.into());
    }

    /// All calls in order
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Number of calls whose name starts with `prefix`
    #[must_use]
    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    /// No call was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).is_empty()
    }
}
