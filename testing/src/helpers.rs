//! Test helpers and utilities.

use futures::StreamExt;
use std::collections::VecDeque;
use std::future::Future;
use std::time::Duration;
use storefront_core::effect::Effect;
use tokio::sync::broadcast;

/// Install a `tracing` subscriber writing to the test output
///
/// Honors `RUST_LOG`; calling it more than once is harmless.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Run effects to completion without a store and collect the actions they
/// produce
///
/// Effects run one after another; parallel effects run in declaration order
/// and streams are drained before the next effect starts. Produced actions
/// are not fed back.
pub async fn effect_actions<A>(effects: impl IntoIterator<Item = Effect<A>>) -> Vec<A> {
    let mut queue: VecDeque<Effect<A>> = effects.into_iter().collect();
    let mut actions = Vec::new();

    while let Some(effect) = queue.pop_front() {
        match effect {
            Effect::None => {},
            Effect::Parallel(children) => {
                for child in children.into_iter().rev() {
                    queue.push_front(child);
                }
            },
            Effect::Future(future) => actions.extend(future.await),
            Effect::Stream(stream) => actions.extend(stream.collect::<Vec<_>>().await),
        }
    }

    actions
}

/// Receive the next `count` broadcast actions, or fewer if `timeout` expires
pub async fn next_actions<A: Clone>(
    receiver: &mut broadcast::Receiver<A>,
    count: usize,
    timeout: Duration,
) -> Vec<A> {
    let mut actions = Vec::with_capacity(count);
    let _ = tokio::time::timeout(timeout, async {
        while actions.len() < count {
            match receiver.recv().await {
                Ok(action) => actions.push(action),
                Err(broadcast::error::RecvError::Lagged(_)) => {},
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
    .await;
    actions
}

/// Poll `check` every few milliseconds until it returns true or `timeout`
/// expires; returns the last result
pub async fn wait_until<F, Fut>(mut check: F, timeout: Duration) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if check().await {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
