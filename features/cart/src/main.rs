//! Cart demo binary
//!
//! Runs a burst of overlapping entry commands against an in-memory backend
//! and prints the cart once it is stable again.
//!
//! Set `STOREFRONT_METRICS=1` to print the Prometheus scrape text at the end.

#![allow(missing_docs)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use storefront_cart::{
    get_cart, get_entry_count, is_cart_busy, Cart, CartAction, CartConnector, CartEntryConnector,
    CartEnvironment, CartModification, CartReducer, CartState, OrderEntry,
};
use storefront_core::error::{ConnectorError, ConnectorFuture};
use storefront_runtime::metrics::MetricsExporter;
use storefront_runtime::{Store, StoreConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Carts kept in process memory, with a fixed latency per call
#[derive(Clone, Default)]
struct InMemoryCarts {
    carts: Arc<Mutex<HashMap<String, Cart>>>,
    latency: Duration,
}

impl InMemoryCarts {
    fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Cart>> {
        self.carts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CartConnector for InMemoryCarts {
    fn load(&self, _user_id: &str, cart_id: &str) -> ConnectorFuture<Cart> {
        let backend = self.clone();
        let cart_id = cart_id.to_string();
        Box::pin(async move {
            tokio::time::sleep(backend.latency).await;
            backend
                .lock()
                .get(&cart_id)
                .cloned()
                .ok_or_else(|| ConnectorError::http(404, format!("Cart not found: {cart_id}")))
        })
    }
}

impl CartEntryConnector for InMemoryCarts {
    fn add(
        &self,
        _user_id: &str,
        cart_id: &str,
        product_code: &str,
        quantity: u32,
        _pickup_store: Option<&str>,
    ) -> ConnectorFuture<CartModification> {
        let backend = self.clone();
        let cart_id = cart_id.to_string();
        let product_code = product_code.to_string();
        Box::pin(async move {
            tokio::time::sleep(backend.latency).await;
            let mut carts = backend.lock();
            let cart = carts.entry(cart_id.clone()).or_insert_with(|| Cart {
                code: cart_id,
                ..Cart::default()
            });
            let entry_number = u32::try_from(cart.entries.len()).unwrap_or(u32::MAX);
            let entry = OrderEntry {
                entry_number: Some(entry_number),
                product_code: Some(product_code),
                quantity: Some(quantity),
                ..OrderEntry::default()
            };
            cart.entries.push(entry.clone());
            Ok(CartModification {
                entry: Some(entry),
                quantity_added: Some(quantity),
                status_code: Some("success".to_string()),
                ..CartModification::default()
            })
        })
    }

    fn remove(&self, _user_id: &str, cart_id: &str, entry_number: &str) -> ConnectorFuture<()> {
        let backend = self.clone();
        let cart_id = cart_id.to_string();
        let entry_number = entry_number.parse::<u32>().ok();
        Box::pin(async move {
            tokio::time::sleep(backend.latency).await;
            let mut carts = backend.lock();
            let cart = carts
                .get_mut(&cart_id)
                .ok_or_else(|| ConnectorError::http(404, "Cart not found"))?;
            let before = cart.entries.len();
            cart.entries.retain(|entry| entry.entry_number != entry_number);
            if cart.entries.len() == before {
                return Err(ConnectorError::http(400, "Entry not found"));
            }
            Ok(())
        })
    }

    fn update(
        &self,
        _user_id: &str,
        cart_id: &str,
        entry_number: &str,
        quantity: Option<u32>,
        _pickup_store: Option<&str>,
    ) -> ConnectorFuture<CartModification> {
        let backend = self.clone();
        let cart_id = cart_id.to_string();
        let entry_number = entry_number.parse::<u32>().ok();
        Box::pin(async move {
            tokio::time::sleep(backend.latency).await;
            let mut carts = backend.lock();
            let entry = carts
                .get_mut(&cart_id)
                .and_then(|cart| {
                    cart.entries
                        .iter_mut()
                        .find(|entry| entry.entry_number == entry_number)
                })
                .ok_or_else(|| ConnectorError::http(400, "Entry not found"))?;
            if quantity.is_some() {
                entry.quantity = quantity;
            }
            Ok(CartModification {
                entry: Some(entry.clone()),
                status_code: Some("success".to_string()),
                ..CartModification::default()
            })
        })
    }
}

fn add_entry(user_id: &str, product_code: &str, quantity: u32) -> CartAction {
    CartAction::AddEntry {
        user_id: user_id.to_string(),
        cart_id: "00001".to_string(),
        product_code: product_code.to_string(),
        quantity,
        pickup_store: None,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront_cart=debug,storefront_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut exporter = MetricsExporter::new();
    if std::env::var_os("STOREFRONT_METRICS").is_some() {
        exporter.install()?;
    }

    let backend = Arc::new(InMemoryCarts::with_latency(Duration::from_millis(50)));
    let env = CartEnvironment::new(backend.clone(), backend);
    let store = Store::with_config(
        CartState::default(),
        CartReducer::new(),
        env,
        StoreConfig::from_env(),
    );

    println!("=== Cart Demo: overlapping entry commands ===\n");

    println!(">>> Anonymous add (dropped)");
    store.send(add_entry("anonymous", "1934793", 1)).await?;

    println!(">>> Three adds in flight at once");
    let mut handles = Vec::new();
    for (product, quantity) in [("300938", 1), ("1934793", 2), ("779841", 1)] {
        handles.push(store.send(add_entry("current", product, quantity)).await?);
    }
    let busy = store.state(|s| is_cart_busy(s, "00001")).await;
    println!("Cart busy while commands run: {busy}");

    for handle in &mut handles {
        handle.wait_with_timeout(Duration::from_secs(5)).await?;
    }

    let (lines, cart) = store
        .state(|s| (get_entry_count(s, "00001"), get_cart(s, "00001").cloned()))
        .await;
    println!("Cart lines after reload: {lines}");
    if let Some(cart) = cart {
        println!("{}", serde_json::to_string_pretty(&cart)?);
    }

    store.shutdown_gracefully().await?;

    if let Some(scrape) = exporter.render() {
        println!("\n{scrape}");
    }
    Ok(())
}
