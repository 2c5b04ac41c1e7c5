//! Prometheus metrics for observability and monitoring.
//!
//! This module describes and records the metrics emitted by the storefront
//! state layer:
//! - Store action processing and reducer latency
//! - Effect execution
//! - Connector calls made by feature effects
//! - Commands dropped by precondition checks
//!
//! # Example
//!
//! ```rust,no_run
//! use storefront_runtime::metrics::MetricsExporter;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut exporter = MetricsExporter::new();
//! exporter.install()?;
//!
//! // Scrape text for a /metrics endpoint
//! let text = exporter.render();
//! # Ok(())
//! # }
//! ```

use metrics::{describe_counter, describe_gauge, describe_histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;
use thiserror::Error;

// Re-export metrics macros for use in other modules
pub use metrics::{counter, gauge, histogram};

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build metrics exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
}

/// Prometheus metrics exporter.
///
/// Installs the global recorder and renders the scrape text on demand.
#[derive(Default)]
pub struct MetricsExporter {
    handle: Option<PrometheusHandle>,
}

impl MetricsExporter {
    /// Create an exporter that has not been installed yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { handle: None }
    }

    /// Describe all metrics and install the Prometheus recorder.
    ///
    /// # Errors
    ///
    /// Returns error if the exporter cannot be built or installed.
    ///
    /// # Note
    ///
    /// If a metrics recorder is already installed (e.g., in tests), this logs a
    /// warning and leaves the exporter without a handle.
    pub fn install(&mut self) -> Result<(), MetricsError> {
        register_metrics();

        let builder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Suffix("duration_seconds".to_string()),
                &[
                    0.0001, 0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5,
                ],
            )
            .map_err(|e| MetricsError::Build(e.to_string()))?;

        match builder.install_recorder() {
            Ok(handle) => {
                self.handle = Some(handle);
                tracing::info!("Prometheus metrics recorder installed");
                Ok(())
            },
            Err(e) => {
                let err_msg = e.to_string();
                if err_msg.contains("already initialized") {
                    tracing::warn!("Metrics recorder already initialized, skipping re-initialization");
                    Ok(())
                } else {
                    Err(MetricsError::Install(err_msg))
                }
            },
        }
    }

    /// Get the metrics handle for rendering.
    #[must_use]
    pub const fn handle(&self) -> Option<&PrometheusHandle> {
        self.handle.as_ref()
    }

    /// Render current metrics in Prometheus format.
    ///
    /// Returns `None` if this exporter did not install the recorder.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        self.handle.as_ref().map(PrometheusHandle::render)
    }
}

/// Register all metric descriptions.
fn register_metrics() {
    // Store
    describe_counter!(
        "store_actions_total",
        "Total number of actions processed by the store"
    );
    describe_histogram!(
        "store_reducer_duration_seconds",
        "Time taken to run the reducer for one action"
    );
    describe_histogram!(
        "store_effects_count",
        "Number of effects returned per action"
    );
    describe_counter!(
        "store_effects_executed_total",
        "Total number of effects executed, by type"
    );
    describe_gauge!(
        "store_effects_pending",
        "Effects currently running"
    );
    describe_counter!(
        "store_shutdown_rejected_actions_total",
        "Actions rejected because the store was shutting down"
    );
    describe_counter!(
        "store_shutdown_timeout_total",
        "Shutdowns that timed out with effects still running"
    );

    // Connectors
    describe_counter!(
        "connector_calls_total",
        "Total number of connector calls, by operation and outcome"
    );
    describe_histogram!(
        "connector_call_duration_seconds",
        "Time taken by connector calls"
    );

    // Preconditions
    describe_counter!(
        "commands_dropped_total",
        "Commands dropped by a precondition check, by entity type"
    );
}

/// Store metrics recorder.
pub struct StoreMetrics;

impl StoreMetrics {
    /// Record an action processed by the reducer.
    #[allow(clippy::cast_precision_loss)] // effect counts are small
    pub fn record_action(duration: Duration, effect_count: usize) {
        counter!("store_actions_total").increment(1);
        histogram!("store_reducer_duration_seconds").record(duration.as_secs_f64());
        histogram!("store_effects_count").record(effect_count as f64);
    }

    /// Record an effect handed to the executor.
    pub fn record_effect(kind: &'static str) {
        counter!("store_effects_executed_total", "type" => kind).increment(1);
    }

    /// Record the number of effects currently running.
    #[allow(clippy::cast_precision_loss)]
    pub fn record_pending(pending: usize) {
        gauge!("store_effects_pending").set(pending as f64);
    }

    /// Record an action rejected during shutdown.
    pub fn record_rejected() {
        counter!("store_shutdown_rejected_actions_total").increment(1);
    }

    /// Record a shutdown that timed out.
    pub fn record_shutdown_timeout() {
        counter!("store_shutdown_timeout_total").increment(1);
    }
}

/// Connector call metrics recorder.
pub struct ConnectorMetrics;

impl ConnectorMetrics {
    /// Record one connector call and its outcome.
    pub fn record_call(operation: &'static str, success: bool, duration: Duration) {
        let outcome = if success { "success" } else { "failure" };
        counter!("connector_calls_total", "operation" => operation, "outcome" => outcome)
            .increment(1);
        histogram!("connector_call_duration_seconds", "operation" => operation)
            .record(duration.as_secs_f64());
    }
}

/// Precondition metrics recorder.
pub struct PreconditionMetrics;

impl PreconditionMetrics {
    /// Record a command dropped before reaching its connector.
    pub fn record_dropped(entity_type: &'static str) {
        counter!("commands_dropped_total", "entity_type" => entity_type).increment(1);
    }
}
