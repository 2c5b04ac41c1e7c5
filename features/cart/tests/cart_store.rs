//! Cart commands running through a store against a gated backend.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

mod common;

use common::{add_entry, remove_entry, update_entry, GatedBackend, CART};
use std::time::Duration;
use storefront_cart::{
    get_entry_count, is_cart_busy, is_cart_stable, CartAction, CartReducer, CartState,
};
use storefront_core::state_utils::selectors::{get_generation, get_processes_count};
use storefront_runtime::Store;
use storefront_testing::helpers::{init_test_tracing, wait_until};

type CartStore = Store<CartState, CartAction, storefront_cart::CartEnvironment, CartReducer>;

fn store(backend: &GatedBackend) -> CartStore {
    init_test_tracing();
    Store::new(CartState::default(), CartReducer::new(), backend.environment())
}

async fn processes(store: &CartStore) -> u32 {
    store.state(|s| get_processes_count(&s.carts, CART)).await
}

#[tokio::test]
async fn anonymous_commands_never_reach_the_backend() {
    let backend = GatedBackend::new();
    let store = store(&backend);

    let mut handle = store.send(add_entry("anonymous", "300938")).await.unwrap();
    handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

    assert!(backend.log.is_empty());
    assert!(store.state(|s| s.carts.is_empty()).await);
}

#[tokio::test]
async fn cart_stays_busy_until_the_last_command_finishes() {
    let backend = GatedBackend::new();
    let store = store(&backend);

    let mut first = store.send(add_entry("current", "300938")).await.unwrap();
    let mut second = store.send(add_entry("current", "1934793")).await.unwrap();
    assert_eq!(processes(&store).await, 2);

    // The second command finishes first
    backend.gate.open("add:1934793");
    second.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

    assert_eq!(processes(&store).await, 1);
    assert!(store.state(|s| is_cart_busy(s, CART)).await);
    assert_eq!(backend.log.count("load"), 0);

    backend.gate.open("add:300938");
    first.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

    assert!(store.state(|s| is_cart_stable(s, CART)).await);
    assert_eq!(backend.log.count("load"), 1);
    assert_eq!(store.state(|s| get_entry_count(s, CART)).await, 2);
}

#[tokio::test]
async fn mixed_commands_share_one_counter() {
    let backend = GatedBackend::new();
    let store = store(&backend);

    let mut handles = vec![
        store.send(add_entry("current", "300938")).await.unwrap(),
        store.send(remove_entry("0")).await.unwrap(),
        store.send(update_entry("4", 3)).await.unwrap(),
    ];
    assert_eq!(processes(&store).await, 3);

    for key in ["update:4", "add:300938", "remove:0"] {
        backend.gate.open(key);
    }
    for handle in &mut handles {
        handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();
    }

    assert_eq!(processes(&store).await, 0);
    assert!(store.state(|s| is_cart_stable(s, CART)).await);
}

#[tokio::test]
async fn failed_update_is_observable_as_terminal_action() {
    let backend = GatedBackend::new();
    let store = store(&backend);
    backend.gate.open("update:9");

    let terminal = store
        .send_and_wait_for(
            update_entry("9", 2),
            CartAction::is_entry_terminal,
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    let CartAction::UpdateEntryFail { error, .. } = terminal else {
        panic!("expected an update failure, got {terminal:?}");
    };
    assert_eq!(error.status, Some(400));
}

#[tokio::test]
async fn reset_discards_in_flight_commands() {
    let backend = GatedBackend::new();
    let store = store(&backend);

    let mut stale = store.send(add_entry("current", "300938")).await.unwrap();
    store
        .send(CartAction::ResetCart {
            cart_id: CART.to_string(),
        })
        .await
        .unwrap();
    let mut fresh = store.send(add_entry("current", "779841")).await.unwrap();
    assert_eq!(processes(&store).await, 1);

    backend.gate.open("add:300938");
    stale.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

    // The command started after the reset is still running
    assert_eq!(processes(&store).await, 1);
    assert_eq!(store.state(|s| get_generation(&s.carts, CART)).await, 1);
    assert_eq!(backend.log.count("load"), 0);

    backend.gate.open("add:779841");
    fresh.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

    assert_eq!(processes(&store).await, 0);
    let log = backend.log.clone();
    let reloaded = wait_until(
        move || {
            let log = log.clone();
            async move { log.count("load") == 1 }
        },
        Duration::from_secs(1),
    )
    .await;
    assert!(reloaded);
}
