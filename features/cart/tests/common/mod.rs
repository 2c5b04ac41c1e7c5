//! Gated cart backend shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use storefront_cart::{
    Cart, CartAction, CartConnector, CartEntryConnector, CartEnvironment, CartModification,
    OrderEntry,
};
use storefront_core::error::{ConnectorError, ConnectorFuture};
use storefront_testing::{CallLog, ConnectorGate};

pub const CART: &str = "00001";

/// Backend whose entry calls block on a gate named after the call
///
/// `add:<product>`, `remove:<entry>` and `update:<entry>` gate the entry
/// commands; loads are never gated. Every call is recorded in the log when it
/// starts.
#[derive(Clone, Default)]
pub struct GatedBackend {
    pub gate: ConnectorGate,
    pub log: CallLog,
    lines: Arc<AtomicU32>,
}

impl GatedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn environment(&self) -> CartEnvironment {
        let backend = Arc::new(self.clone());
        CartEnvironment::new(backend.clone(), backend)
    }
}

impl CartConnector for GatedBackend {
    fn load(&self, _user_id: &str, cart_id: &str) -> ConnectorFuture<Cart> {
        self.log.record(format!("load:{cart_id}"));
        let lines = self.lines.load(Ordering::SeqCst);
        let cart = Cart {
            code: cart_id.to_string(),
            entries: (0..lines)
                .map(|number| OrderEntry {
                    entry_number: Some(number),
                    ..OrderEntry::default()
                })
                .collect(),
            ..Cart::default()
        };
        Box::pin(async move { Ok(cart) })
    }
}

impl CartEntryConnector for GatedBackend {
    fn add(
        &self,
        _user_id: &str,
        _cart_id: &str,
        product_code: &str,
        quantity: u32,
        _pickup_store: Option<&str>,
    ) -> ConnectorFuture<CartModification> {
        let key = format!("add:{product_code}");
        self.log.record(key.clone());
        let gate = self.gate.clone();
        let lines = Arc::clone(&self.lines);
        Box::pin(async move {
            gate.wait(&key).await;
            lines.fetch_add(1, Ordering::SeqCst);
            Ok(CartModification {
                quantity_added: Some(quantity),
                ..CartModification::default()
            })
        })
    }

    fn remove(&self, _user_id: &str, _cart_id: &str, entry_number: &str) -> ConnectorFuture<()> {
        let key = format!("remove:{entry_number}");
        self.log.record(key.clone());
        let gate = self.gate.clone();
        let lines = Arc::clone(&self.lines);
        Box::pin(async move {
            gate.wait(&key).await;
            lines
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .map(|_| ())
                .map_err(|_| ConnectorError::http(400, "Cart has no entries"))
        })
    }

    fn update(
        &self,
        _user_id: &str,
        _cart_id: &str,
        entry_number: &str,
        _quantity: Option<u32>,
        _pickup_store: Option<&str>,
    ) -> ConnectorFuture<CartModification> {
        let key = format!("update:{entry_number}");
        self.log.record(key.clone());
        let gate = self.gate.clone();
        Box::pin(async move {
            gate.wait(&key).await;
            Err(ConnectorError::http(400, format!("Entry {key} not found")))
        })
    }
}

pub fn add_entry(user_id: &str, product_code: &str) -> CartAction {
    CartAction::AddEntry {
        user_id: user_id.to_string(),
        cart_id: CART.to_string(),
        product_code: product_code.to_string(),
        quantity: 1,
        pickup_store: None,
    }
}

pub fn remove_entry(entry_number: &str) -> CartAction {
    CartAction::RemoveEntry {
        user_id: "current".to_string(),
        cart_id: CART.to_string(),
        entry_number: entry_number.to_string(),
    }
}

pub fn update_entry(entry_number: &str, quantity: u32) -> CartAction {
    CartAction::UpdateEntry {
        user_id: "current".to_string(),
        cart_id: CART.to_string(),
        entry_number: entry_number.to_string(),
        quantity: Some(quantity),
        pickup_store: None,
    }
}
