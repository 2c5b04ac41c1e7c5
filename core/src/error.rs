//! Error types shared by connectors and state utilities.
//!
//! Connectors report [`ConnectorError`]. Effects convert it with
//! [`normalize_http_error`] before building a fail action, so reducers only ever
//! see the serializable [`HttpErrorModel`].

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Errors reported by injected connectors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectorError {
    /// The backend answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Reason phrase, if known
        status_text: Option<String>,
        /// Request URL, if known
        url: Option<String>,
        /// Top-level message
        message: String,
        /// Structured error details from the response body
        details: Vec<ErrorDetail>,
    },

    /// The request never produced a response
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response could not be decoded
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl ConnectorError {
    /// Shorthand for an HTTP error with a single message
    #[must_use]
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            status_text: None,
            url: None,
            message: message.into(),
            details: Vec::new(),
        }
    }
}

/// Boxed future returned by connector trait methods
pub type ConnectorFuture<T> = Pin<Box<dyn Future<Output = Result<T, ConnectorError>> + Send>>;

/// One entry of a backend error list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    /// Human readable message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Machine readable reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Field or object the error refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Kind of subject
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_type: Option<String>,
    /// Backend error class, e.g. `InsufficientStockError`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
}

/// Normalized error payload carried by fail actions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpErrorModel {
    /// Top-level message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// HTTP status code, absent for transport failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Reason phrase
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    /// Request URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Structured details
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ErrorDetail>,
}

impl HttpErrorModel {
    /// Error model with only a message
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Convert a connector error into the payload stored in loader state.
///
/// HTTP errors keep their status and details. Transport and decode failures
/// have no status; they are logged since they usually point at a bug or an
/// outage rather than a business rule.
#[must_use]
pub fn normalize_http_error(error: &ConnectorError) -> HttpErrorModel {
    match error {
        ConnectorError::Http {
            status,
            status_text,
            url,
            message,
            details,
        } => HttpErrorModel {
            message: Some(message.clone()),
            status: Some(*status),
            status_text: status_text.clone(),
            url: url.clone(),
            details: details.clone(),
        },
        ConnectorError::Transport(message) | ConnectorError::Decode(message) => {
            tracing::error!(%error, "Connector failed without an HTTP response");
            HttpErrorModel::message(message.clone())
        },
    }
}

/// Errors raised by state utilities outside the reducer path
#[derive(Error, Debug)]
pub enum StateError {
    /// A fail transition without an error payload under strict error handling
    #[error("Fail transition for '{entity_type}' requires an error payload")]
    ErrorRequired {
        /// Entity type of the rejected transition
        entity_type: String,
    },

    /// A list record has no usable id field
    #[error("Record {index} has no string or number field '{key}'")]
    MissingIdField {
        /// Field that was looked up
        key: String,
        /// Position of the record in the list
        index: usize,
    },

    /// A value could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
