//! # Storefront Testing
//!
//! Testing utilities and helpers for storefront features.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then harness for reducers, plus effect assertions
//! - [`mocks`]: connector gates and call logs for ordering tests
//! - [`helpers`]: running effects without a store, collecting broadcast actions
//! - [`properties`]: proptest strategies for process interleavings
//!
//! ## Example
//!
//! ```ignore
//! use storefront_testing::mocks::ConnectorGate;
//!
//! #[tokio::test]
//! async fn busy_until_last_entry_command_finishes() {
//!     let gate = ConnectorGate::new();
//!     let store = Store::new(CartState::default(), CartReducer::new(), gated_env(&gate));
//!
//!     store.send(add_entry("cart-1")).await?;
//!     store.send(remove_entry("cart-1")).await?;
//!     assert!(store.state(|s| has_pending_processes(&s.carts, "cart-1")).await);
//!
//!     gate.open("add");
//!     gate.open("remove");
//! }
//! ```

pub mod helpers;
pub mod mocks;
pub mod properties;
pub mod reducer_test;

// Re-export commonly used items
pub use helpers::effect_actions;
pub use mocks::{CallLog, ConnectorGate};
pub use properties::{paired_process_schedule, ProcessStep};
pub use reducer_test::{assertions, ReducerTest};
